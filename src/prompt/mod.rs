//! System prompt generation for the cooking persona.
//!
//! Two sources exist: the hand-written Carbonara prompt, and the compiler that
//! derives a prompt from any recipe record. The recipe-driven one is the
//! default.

mod compiler;

pub use compiler::{
    compile, compile_with, ingredient_line, render_ingredients, render_steps, step_line,
    timer_annotation, PromptOptions, DEFAULT_ASSISTANT_NAME, DEFAULT_PRINCIPLES,
};

use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hand-written prompt for the Spaghetti Carbonara persona.
pub const STATIC_CARBONARA_PROMPT: &str = include_str!("carbonara_static.txt");

/// Where a session's system prompt comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSource {
    /// Compiled from the selected recipe.
    #[default]
    Recipe,
    /// The fixed Carbonara prompt; the recipe is ignored.
    Static,
}

impl PromptSource {
    pub fn render(&self, recipe: &Recipe, options: &PromptOptions) -> String {
        match self {
            PromptSource::Recipe => compile_with(recipe, options),
            PromptSource::Static => STATIC_CARBONARA_PROMPT.to_string(),
        }
    }
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSource::Recipe => f.write_str("recipe"),
            PromptSource::Static => f.write_str("static"),
        }
    }
}

impl FromStr for PromptSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recipe" | "dynamic" => Ok(PromptSource::Recipe),
            "static" => Ok(PromptSource::Static),
            other => Err(crate::Error::validation_with_context(
                format!("unknown prompt source '{}'", other),
                crate::ErrorContext::new().with_field_path("promptSource"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prompt_is_embedded() {
        assert!(STATIC_CARBONARA_PROMPT.starts_with("You are Alex"));
        assert!(STATIC_CARBONARA_PROMPT.contains("traditional Roman dish"));
        assert!(STATIC_CARBONARA_PROMPT.contains("4. Serve immediately"));
    }

    #[test]
    fn test_prompt_source_parsing() {
        assert_eq!("static".parse::<PromptSource>().unwrap(), PromptSource::Static);
        assert_eq!("Recipe".parse::<PromptSource>().unwrap(), PromptSource::Recipe);
        assert!("yaml".parse::<PromptSource>().is_err());
        assert_eq!(PromptSource::default(), PromptSource::Recipe);
    }

    #[test]
    fn test_prompt_source_serde() {
        let src: PromptSource = serde_json::from_str("\"static\"").unwrap();
        assert_eq!(src, PromptSource::Static);
        assert_eq!(serde_json::to_string(&PromptSource::Recipe).unwrap(), "\"recipe\"");
    }
}
