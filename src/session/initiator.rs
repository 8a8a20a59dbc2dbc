//! Session initiation: recipe → system prompt → persona config → token.

use super::types::{SessionParams, SessionToken};
use super::TokenIssuer;
use crate::persona::{Persona, PersonaConfig};
use crate::prompt::{PromptOptions, PromptSource};
use crate::recipe::{Recipe, RecipeBook};
use crate::Result;
use std::sync::Arc;

/// Server-side entry point for starting an avatar session.
///
/// Cheap to clone; the recipe book and token issuer are shared.
#[derive(Clone)]
pub struct SessionInitiator {
    book: Arc<RecipeBook>,
    issuer: Arc<dyn TokenIssuer>,
    persona: Persona,
    prompt_options: PromptOptions,
    default_recipe: Option<String>,
    default_source: PromptSource,
}

impl SessionInitiator {
    pub fn new(book: Arc<RecipeBook>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            book,
            issuer,
            persona: Persona::default(),
            prompt_options: PromptOptions::default(),
            default_recipe: None,
            default_source: PromptSource::default(),
        }
    }

    /// Sets the persona. The prompt's assistant name follows the persona name.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.prompt_options.assistant_name = persona.name.clone();
        self.persona = persona;
        self
    }

    pub fn with_prompt_options(mut self, options: PromptOptions) -> Self {
        self.prompt_options = options;
        self
    }

    pub fn with_default_recipe(mut self, recipe_id: Option<String>) -> Self {
        self.default_recipe = recipe_id;
        self
    }

    pub fn with_default_source(mut self, source: PromptSource) -> Self {
        self.default_source = source;
        self
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    pub fn recipe(&self, recipe_id: Option<&str>) -> Result<&Recipe> {
        let id = recipe_id.or(self.default_recipe.as_deref());
        self.book.resolve(id)
    }

    /// Build the persona config a session would be opened with.
    pub fn persona_config(&self, params: &SessionParams) -> Result<PersonaConfig> {
        let recipe = self.recipe(params.recipe_id.as_deref())?;
        let source = params.prompt_source.unwrap_or(self.default_source);
        let prompt = source.render(recipe, &self.prompt_options);
        tracing::debug!(
            recipe = %recipe.recipe_id,
            source = %source,
            "compiled system prompt"
        );
        Ok(self.persona.configure(prompt))
    }

    /// Resolve the recipe, compile the prompt and ask the provider for a token.
    pub async fn initiate(&self, params: &SessionParams) -> Result<SessionToken> {
        let persona = self.persona_config(params)?;
        let token = self.issuer.issue(&persona).await?;
        tracing::info!(
            recipe = params.recipe_id.as_deref().unwrap_or("<default>"),
            "session initiated"
        );
        Ok(token)
    }
}
