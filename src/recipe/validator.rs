//! Shape checks applied when a recipe book is loaded.
//!
//! The prompt compiler accepts any [`Recipe`] value; everything that would make
//! a record nonsensical (blank title, negative quantities, duplicate ids) is
//! rejected here instead.

use super::types::Recipe;
use crate::{Error, ErrorContext, Result};
use std::collections::HashSet;

const SOURCE: &str = "recipe_validator";

/// Validates recipe records before they enter a [`super::RecipeBook`].
#[derive(Debug, Default, Clone)]
pub struct RecipeValidator {
    /// Reject recipes with no ingredients or no steps instead of warning.
    require_content: bool,
}

impl RecipeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_content(mut self, require: bool) -> Self {
        self.require_content = require;
        self
    }

    /// Validate a whole book, including id uniqueness.
    pub fn validate_all(&self, recipes: &[Recipe]) -> Result<()> {
        let mut seen = HashSet::with_capacity(recipes.len());
        for (i, recipe) in recipes.iter().enumerate() {
            self.validate(recipe, &format!("recipes[{}]", i))?;
            if !seen.insert(recipe.recipe_id.as_str()) {
                return Err(invalid(
                    "duplicate recipeId",
                    format!("recipes[{}].recipeId", i),
                    &recipe.recipe_id,
                ));
            }
        }
        Ok(())
    }

    /// Validate one record. `path` prefixes field paths in errors.
    pub fn validate(&self, recipe: &Recipe, path: &str) -> Result<()> {
        if recipe.recipe_id.trim().is_empty() {
            return Err(invalid("recipeId must not be empty", format!("{}.recipeId", path), ""));
        }
        if recipe.title.trim().is_empty() {
            return Err(invalid("title must not be empty", format!("{}.title", path), ""));
        }
        if recipe.servings == 0 {
            return Err(invalid("servings must be positive", format!("{}.servings", path), "0"));
        }
        if recipe.estimate_mins == 0 {
            return Err(invalid(
                "estimateMins must be positive",
                format!("{}.estimateMins", path),
                "0",
            ));
        }
        let kcal = recipe.nutrition_per_serving.kcal;
        if !kcal.is_finite() || kcal < 0.0 {
            return Err(invalid(
                "kcal must be a non-negative number",
                format!("{}.nutritionPerServing.kcal", path),
                kcal.to_string(),
            ));
        }

        for (i, ingredient) in recipe.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(invalid(
                    "ingredient name must not be empty",
                    format!("{}.ingredients[{}].name", path, i),
                    "",
                ));
            }
            if let Some(qty) = ingredient.qty {
                if !qty.is_finite() || qty < 0.0 {
                    return Err(invalid(
                        "qty must be a non-negative number",
                        format!("{}.ingredients[{}].qty", path, i),
                        qty.to_string(),
                    ));
                }
            }
            if ingredient.qty.is_some() != ingredient.unit.is_some() {
                tracing::warn!(
                    recipe = %recipe.recipe_id,
                    ingredient = %ingredient.name,
                    "qty and unit should be given together; reciting ingredient by name only"
                );
            }
        }

        for (i, step) in recipe.steps.iter().enumerate() {
            if step.text.trim().is_empty() {
                return Err(invalid(
                    "step text must not be empty",
                    format!("{}.steps[{}].text", path, i),
                    step.id.to_string(),
                ));
            }
        }

        if recipe.ingredients.is_empty() || recipe.steps.is_empty() {
            if self.require_content {
                let field = if recipe.ingredients.is_empty() {
                    "ingredients"
                } else {
                    "steps"
                };
                return Err(invalid(
                    "recipe has no content",
                    format!("{}.{}", path, field),
                    "[]",
                ));
            }
            tracing::warn!(
                recipe = %recipe.recipe_id,
                ingredients = recipe.ingredients.len(),
                steps = recipe.steps.len(),
                "recipe has an empty ingredient or step list"
            );
        }

        Ok(())
    }
}

fn invalid(msg: &str, field: String, details: impl Into<String>) -> Error {
    let details = details.into();
    let mut ctx = ErrorContext::new().with_field_path(field).with_source(SOURCE);
    if !details.is_empty() {
        ctx = ctx.with_details(details);
    }
    Error::validation_with_context(msg, ctx)
}
