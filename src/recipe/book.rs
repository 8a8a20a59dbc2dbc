//! Recipe book: the read-only set of recipes a server instance can talk about.
//! Supports JSON (preferred) and YAML files, each holding either a single
//! recipe object or an array of them.

use super::types::{Recipe, RecipeSummary};
use super::validator::RecipeValidator;
use crate::{Error, ErrorContext, Result};
use std::path::Path;

const SOURCE: &str = "recipe_loader";

fn malformed(index: usize, e: impl std::fmt::Display) -> Error {
    Error::validation_with_context(
        format!("malformed recipe: {}", e),
        ErrorContext::new()
            .with_field_path(format!("recipes[{}]", index))
            .with_source(SOURCE),
    )
}

// Records are decoded one at a time so a bad field names the record it is in.
fn json_records(value: serde_json::Value) -> Result<Vec<Recipe>> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| serde_json::from_value(item).map_err(|e| malformed(i, e)))
        .collect()
}

fn yaml_records(value: serde_yaml::Value) -> Result<Vec<Recipe>> {
    let items = match value {
        serde_yaml::Value::Sequence(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| serde_yaml::from_value(item).map_err(|e| malformed(i, e)))
        .collect()
}

/// Validated, ordered collection of recipes.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Build a book from records already in memory.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        Self::with_validator(recipes, &RecipeValidator::default())
    }

    pub fn with_validator(recipes: Vec<Recipe>, validator: &RecipeValidator) -> Result<Self> {
        validator.validate_all(&recipes)?;
        Ok(Self { recipes })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::new(json_records(value)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::new(yaml_records(value)?)
    }

    /// Load a recipe book from disk. `.yaml`/`.yml` files are parsed as YAML,
    /// anything else as JSON.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read recipe book: {}", e),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_source(SOURCE),
            )
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let book = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::info!(
            path = %path.display(),
            recipes = book.len(),
            "loaded recipe book"
        );
        Ok(book)
    }

    pub fn get(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.recipe_id == recipe_id)
    }

    /// Like [`get`](Self::get) but reports an unknown id as [`Error::NotFound`].
    pub fn require(&self, recipe_id: &str) -> Result<&Recipe> {
        self.get(recipe_id).ok_or_else(|| Error::not_found(recipe_id))
    }

    /// Resolve an optional id, falling back to the first recipe in the book.
    pub fn resolve(&self, recipe_id: Option<&str>) -> Result<&Recipe> {
        match recipe_id {
            Some(id) => self.require(id),
            None => self
                .recipes
                .first()
                .ok_or_else(|| Error::not_found("<default>")),
        }
    }

    pub fn summaries(&self) -> Vec<RecipeSummary> {
        self.recipes.iter().map(Recipe::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECIPES: &str = r#"[
      {
        "recipeId": "carbonara",
        "title": "Spaghetti Carbonara",
        "servings": 2,
        "estimateMins": 25,
        "ingredients": [{ "name": "spaghetti", "qty": 200, "unit": "g" }],
        "steps": [{ "id": 1, "text": "Boil water", "type": "prep" }],
        "tags": ["Italian"],
        "nutritionPerServing": { "kcal": 650 }
      },
      {
        "recipeId": "aglio-olio",
        "title": "Aglio e Olio",
        "servings": 2,
        "estimateMins": 15,
        "ingredients": [{ "name": "garlic" }],
        "steps": [{ "id": 1, "text": "Slice garlic", "type": "prep" }],
        "tags": [],
        "nutritionPerServing": { "kcal": 480 }
      }
    ]"#;

    #[test]
    fn test_array_book() {
        let book = RecipeBook::from_json_str(TWO_RECIPES).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.require("aglio-olio").unwrap().title, "Aglio e Olio");
        assert_eq!(book.resolve(None).unwrap().recipe_id, "carbonara");
        let ids: Vec<_> = book.summaries().into_iter().map(|s| s.recipe_id).collect();
        assert_eq!(ids, vec!["carbonara", "aglio-olio"]);
    }

    #[test]
    fn test_single_object_book() {
        let single = r#"{
          "recipeId": "toast",
          "title": "Toast",
          "servings": 1,
          "estimateMins": 3,
          "ingredients": [{ "name": "bread" }],
          "steps": [{ "id": 1, "text": "Toast the bread", "type": "cook" }],
          "nutritionPerServing": { "kcal": 90 }
        }"#;
        let book = RecipeBook::from_json_str(single).unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.get("toast").unwrap().tags.is_empty());
    }

    #[test]
    fn test_yaml_book() {
        let yaml = r#"
- recipeId: toast
  title: Toast
  servings: 1
  estimateMins: 3
  ingredients:
    - name: bread
      qty: 2
      unit: slices
  steps:
    - id: 1
      text: Toast the bread
      type: cook
      timer: { secs: 150, kind: passive }
  tags: [Breakfast]
  nutritionPerServing: { kcal: 160 }
"#;
        let book = RecipeBook::from_yaml_str(yaml).unwrap();
        let toast = book.require("toast").unwrap();
        assert_eq!(toast.steps[0].timer.as_ref().map(|t| t.secs), Some(150));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let book = RecipeBook::from_json_str(TWO_RECIPES).unwrap();
        assert!(matches!(book.require("ramen"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_missing_title_names_the_record() {
        let bad = r#"[
          { "recipeId": "ok", "title": "Fine", "servings": 1, "estimateMins": 1,
            "ingredients": [], "steps": [], "nutritionPerServing": { "kcal": 1 } },
          { "recipeId": "x", "servings": 1, "estimateMins": 1,
            "ingredients": [], "steps": [], "nutritionPerServing": { "kcal": 1 } }
        ]"#;
        let err = RecipeBook::from_json_str(bad).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("missing field `title`"));
        let field = err.context().and_then(|c| c.field_path.clone());
        assert_eq!(field.as_deref(), Some("recipes[1]"));
    }

    #[test]
    fn test_malformed_yaml_record_names_the_record() {
        let yaml = "recipeId: toast\nservings: 1\n";
        let err = RecipeBook::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("missing field"));
        let field = err.context().and_then(|c| c.field_path.clone());
        assert_eq!(field.as_deref(), Some("recipes[0]"));
    }

    #[test]
    fn test_syntax_error_is_serialization_error() {
        assert!(matches!(
            RecipeBook::from_json_str("[{"),
            Err(Error::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let err = RecipeBook::load("/nonexistent/recipes.json").await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
