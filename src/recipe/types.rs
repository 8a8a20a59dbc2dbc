//! Recipe record types.
//!
//! Field names follow the recipe book's JSON layout (`recipeId`, `estimateMins`,
//! `nutritionPerServing`), except the step dependency lists which are stored
//! as `depends_on` / `produces`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dish, loaded whole from the recipe book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_id: String,
    pub title: String,
    pub servings: u32,
    pub estimate_mins: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub nutrition_per_serving: Nutrition,
}

impl Recipe {
    /// The first tag, treated as the primary cuisine descriptor.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Short `{ recipeId, title }` view used by listings.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            recipe_id: self.recipe_id.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub recipe_id: String,
    pub title: String,
}

/// Per-serving nutrition. Only `kcal` is interpreted; any other keys are kept
/// so the record serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub kcal: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Nutrition {
    pub fn kcal(kcal: f64) -> Self {
        Self {
            kcal,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: None,
            unit: None,
        }
    }

    pub fn measured(qty: f64, unit: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: Some(qty),
            unit: Some(unit.into()),
        }
    }

    /// Quantity and unit, only when both are usable.
    ///
    /// A zero or non-finite quantity, an empty unit, or either half missing
    /// all yield `None`; the ingredient is then recited by name alone.
    pub fn measure(&self) -> Option<(f64, &str)> {
        let qty = self.qty.filter(|q| q.is_finite() && *q > 0.0)?;
        let unit = self.unit.as_deref().filter(|u| !u.is_empty())?;
        Some((qty, unit))
    }
}

/// Opaque step identifier. Recipe books use both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepId {
    Number(u64),
    Text(String),
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepId::Number(n) => write!(f, "{}", n),
            StepId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for StepId {
    fn from(n: u64) -> Self {
        StepId::Number(n)
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        StepId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<Timer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,
}

impl Step {
    pub fn new(id: impl Into<StepId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: String::new(),
            timer: None,
            depends_on: None,
            produces: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_timer(mut self, secs: u64, kind: impl Into<String>) -> Self {
        self.timer = Some(Timer {
            secs,
            kind: kind.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub secs: u64,
    #[serde(default)]
    pub kind: String,
}

impl Timer {
    /// Whole minutes and leftover seconds.
    pub fn split(&self) -> (u64, u64) {
        (self.secs / 60, self.secs % 60)
    }
}
