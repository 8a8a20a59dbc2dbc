//! Recipe prompt compiler.
//!
//! Renders a [`Recipe`] into the persona's system prompt. The output is a pure
//! function of the recipe and the [`PromptOptions`]: same input, same bytes.
//!
//! Section order is fixed: persona framing, recipe summary, ingredients,
//! steps, key principles, closing guidance.

use crate::recipe::{Ingredient, Recipe, Step, Timer};

/// Default assistant name used in the persona framing.
pub const DEFAULT_ASSISTANT_NAME: &str = "Alex";

/// Principles appended after the generic "traditional dish" line.
pub const DEFAULT_PRINCIPLES: &[&str] = &[
    "The magic happens when you combine hot pasta with the egg mixture OFF the heat",
    "Pancetta should be crispy, and the sauce should be creamy, not scrambled",
    "Freshly grated pecorino and parmesan are essential",
    "Timing is crucial - work quickly when combining the final ingredients",
];

/// Knobs for the surrounding prose. The recipe-derived sections are not
/// configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    pub assistant_name: String,
    pub principles: Vec<String>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            principles: DEFAULT_PRINCIPLES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PromptOptions {
    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub fn with_principles<I, S>(mut self, principles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.principles = principles.into_iter().map(Into::into).collect();
        self
    }
}

/// Compile a recipe into a system prompt using the default options.
pub fn compile(recipe: &Recipe) -> String {
    compile_with(recipe, &PromptOptions::default())
}

/// Compile a recipe into a system prompt.
pub fn compile_with(recipe: &Recipe, options: &PromptOptions) -> String {
    let ingredients_list = render_ingredients(&recipe.ingredients);
    let steps_list = render_steps(&recipe.steps);

    let cuisine = recipe.tags.join(" and ");
    let specialty = if cuisine.trim().is_empty() {
        String::new()
    } else {
        format!(" specializing in {} cuisine", cuisine)
    };
    let tradition = match recipe.primary_tag() {
        Some(tag) => format!("traditional {} dish", tag),
        None => "traditional dish".to_string(),
    };

    let mut principles = format!(
        "- This is a {} with simple, quality ingredients",
        tradition
    );
    for p in &options.principles {
        principles.push_str("\n- ");
        principles.push_str(p);
    }

    format!(
        r#"You are {name}, an enthusiastic and knowledgeable cooking assistant{specialty}. You're here to guide users through making authentic {title} step by step.

Your role is to:
- Be encouraging and supportive throughout the cooking process
- Explain each step clearly with helpful tips and techniques
- Warn about common mistakes before they happen
- Provide timing guidance and visual cues
- Share the cultural background and authenticity of the dish
- Be patient with beginners and celebrate their progress

RECIPE INFORMATION:
- Recipe: {title}
- Servings: {servings}
- Total Time: {minutes} minutes
- Calories per serving: {kcal} kcal

INGREDIENTS NEEDED:
{ingredients_list}

COOKING STEPS:
{steps_list}

KEY COOKING PRINCIPLES FOR {title_upper}:
{principles}

When users ask about the recipe, guide them through these steps in order, providing detailed explanations for each step. Always be encouraging, explain the "why" behind each step, and help users feel confident in their cooking abilities.

Pay special attention to timing and temperature control, as these are critical for success with this dish."#,
        name = options.assistant_name,
        specialty = specialty,
        title = recipe.title,
        servings = recipe.servings,
        minutes = recipe.estimate_mins,
        kcal = unsigned_zero(recipe.nutrition_per_serving.kcal),
        ingredients_list = ingredients_list,
        steps_list = steps_list,
        title_upper = recipe.title.to_uppercase(),
        principles = principles,
    )
}

// `-0` prints as "-0"; the prompt should say "0".
fn unsigned_zero(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else {
        n
    }
}

/// One `- ...` line per ingredient, in recipe order.
pub fn render_ingredients(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(ingredient_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- 200g pancetta` when quantity and unit are both usable, otherwise `- salt`.
pub fn ingredient_line(ingredient: &Ingredient) -> String {
    match ingredient.measure() {
        Some((qty, unit)) => format!("- {}{} {}", qty, unit, ingredient.name),
        None => format!("- {}", ingredient.name),
    }
}

/// Numbered step lines. Numbering is positional; step ids are ignored.
pub fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| step_line(i + 1, step))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn step_line(position: usize, step: &Step) -> String {
    match &step.timer {
        Some(timer) => format!("{}. {} {}", position, step.text, timer_annotation(timer)),
        None => format!("{}. {}", position, step.text),
    }
}

/// `(1:30 minutes)`, `(2 minutes)` or `(45 seconds)`.
pub fn timer_annotation(timer: &Timer) -> String {
    let (minutes, seconds) = timer.split();
    if minutes > 0 {
        if seconds > 0 {
            format!("({}:{:02} minutes)", minutes, seconds)
        } else {
            format!("({} minutes)", minutes)
        }
    } else {
        format!("({} seconds)", timer.secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{Nutrition, StepId};

    fn timer(secs: u64) -> Timer {
        Timer {
            secs,
            kind: "passive".into(),
        }
    }

    fn bare_recipe() -> Recipe {
        Recipe {
            recipe_id: "empty".into(),
            title: "Mystery Dish".into(),
            servings: 1,
            estimate_mins: 5,
            ingredients: vec![],
            steps: vec![],
            tags: vec![],
            nutrition_per_serving: Nutrition::kcal(0.0),
        }
    }

    #[test]
    fn test_ingredient_lines() {
        assert_eq!(
            ingredient_line(&Ingredient::measured(200.0, "g", "pancetta")),
            "- 200g pancetta"
        );
        assert_eq!(ingredient_line(&Ingredient::named("salt")), "- salt");
        assert_eq!(
            ingredient_line(&Ingredient::measured(0.5, "tsp", "black pepper")),
            "- 0.5tsp black pepper"
        );
    }

    #[test]
    fn test_half_measured_ingredient_degrades_to_name() {
        let eggs = Ingredient {
            name: "eggs".into(),
            qty: Some(3.0),
            unit: None,
        };
        assert_eq!(ingredient_line(&eggs), "- eggs");
    }

    #[test]
    fn test_timer_annotations() {
        assert_eq!(timer_annotation(&timer(90)), "(1:30 minutes)");
        assert_eq!(timer_annotation(&timer(60)), "(1 minutes)");
        assert_eq!(timer_annotation(&timer(45)), "(45 seconds)");
        assert_eq!(timer_annotation(&timer(0)), "(0 seconds)");
        assert_eq!(timer_annotation(&timer(605)), "(10:05 minutes)");
    }

    #[test]
    fn test_steps_numbered_by_position() {
        let steps = vec![
            Step::new(7, "Boil water"),
            Step::new(StepId::Text("b".into()), "Add salt").with_timer(45, "active"),
        ];
        assert_eq!(render_steps(&steps), "1. Boil water\n2. Add salt (45 seconds)");
    }

    #[test]
    fn test_empty_recipe_renders_empty_sections() {
        let prompt = compile(&bare_recipe());
        assert!(prompt.contains("INGREDIENTS NEEDED:\n\n\nCOOKING STEPS:\n\n\nKEY COOKING"));
        assert!(!prompt.contains("undefined"));
        assert!(!prompt.contains("null"));
        assert!(prompt.contains("traditional dish"));
        assert!(!prompt.contains("  "));
    }

    #[test]
    fn test_custom_options() {
        let opts = PromptOptions::default()
            .with_assistant_name("Marta")
            .with_principles(["Salt the water generously"]);
        let prompt = compile_with(&bare_recipe(), &opts);
        assert!(prompt.starts_with("You are Marta,"));
        assert!(prompt.contains("- Salt the water generously"));
        assert!(!prompt.contains("Pancetta should be crispy"));
    }

    #[test]
    fn test_negative_zero_kcal_prints_as_zero() {
        let mut recipe = bare_recipe();
        recipe.nutrition_per_serving = Nutrition::kcal(-0.0);
        let prompt = compile(&recipe);
        assert!(prompt.contains("- Calories per serving: 0 kcal"));
        assert!(!prompt.contains("-0 kcal"));
    }
}
