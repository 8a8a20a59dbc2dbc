//! Recipe records, the recipe book they live in, and load-time validation.

mod book;
mod types;
mod validator;

pub use book::RecipeBook;
pub use types::{Ingredient, Nutrition, Recipe, RecipeSummary, Step, StepId, Timer};
pub use validator::RecipeValidator;
