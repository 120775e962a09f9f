use serde_json::{Map, Value};

use crate::models::{number_text, Recipe};

/// Label of the first row, resolved separately from the other nutrients
pub const CALORIES_LABEL: &str = "Calories";

/// Nutrients shown after calories, in display order
pub const NUTRIENT_KEYS: [&str; 8] = [
    "carbohydrateContent",
    "cholesterolContent",
    "fiberContent",
    "proteinContent",
    "saturatedFatContent",
    "sodiumContent",
    "sugarContent",
    "fatContent",
];

/// Placeholder for a missing value
pub const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutrientRow {
    pub label: &'static str,
    pub value: Option<String>,
}

impl NutrientRow {
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(MISSING)
    }

    fn has_value(&self) -> bool {
        self.value
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Nutrition section of the detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NutritionFacts {
    /// Calories row first, then [`NUTRIENT_KEYS`]
    Available(Vec<NutrientRow>),
    Unavailable,
}

impl NutritionFacts {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self::build(recipe.nutrients.resolve(), recipe.calories_int)
    }

    /// Malformed or missing payloads yield [`NutritionFacts::Unavailable`], never an error.
    pub fn build(nutrients: Option<Map<String, Value>>, calories_int: Option<i64>) -> Self {
        let nutrients = nutrients.unwrap_or_default();

        let calories = calories_int
            .map(|c| c.to_string())
            .or_else(|| display(nutrients.get("calories")))
            .or_else(|| display(nutrients.get("caloriesValue")));

        let mut rows = Vec::with_capacity(NUTRIENT_KEYS.len() + 1);
        rows.push(NutrientRow {
            label: CALORIES_LABEL,
            value: calories,
        });
        rows.extend(NUTRIENT_KEYS.iter().map(|key| NutrientRow {
            label: *key,
            value: display(nutrients.get(*key)),
        }));

        if rows.iter().any(NutrientRow::has_value) {
            NutritionFacts::Available(rows)
        } else {
            NutritionFacts::Unavailable
        }
    }

    pub fn rows(&self) -> &[NutrientRow] {
        match self {
            NutritionFacts::Available(rows) => rows,
            NutritionFacts::Unavailable => &[],
        }
    }

    /// Value shown for a label, if the section is available
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows()
            .iter()
            .find(|row| row.label == label)
            .map(NutrientRow::display_value)
    }
}

fn display(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::NutrientsPayload;
    use serde_json::json;

    fn recipe_with(nutrients: NutrientsPayload, calories_int: Option<i64>) -> Recipe {
        Recipe {
            id: 1,
            title: "Test".to_string(),
            cuisine: None,
            rating: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            description: None,
            serves: None,
            calories_int,
            nutrients,
        }
    }

    fn structured(value: Value) -> NutrientsPayload {
        NutrientsPayload::from(value)
    }

    #[test]
    fn test_calories_from_json_string() {
        let recipe = recipe_with(
            NutrientsPayload::Unparsed(r#"{"calories": 200}"#.to_string()),
            None,
        );
        let facts = NutritionFacts::from_recipe(&recipe);

        assert_eq!(facts.value_of(CALORIES_LABEL), Some("200"));
        assert_eq!(facts.value_of("fatContent"), Some(MISSING));
    }

    #[test]
    fn test_whole_float_values_render_as_integers() {
        let recipe = recipe_with(
            structured(json!({"calories": 200.0, "fatContent": 4.5, "proteinContent": 12.0})),
            None,
        );
        let facts = NutritionFacts::from_recipe(&recipe);

        assert_eq!(facts.value_of(CALORIES_LABEL), Some("200"));
        assert_eq!(facts.value_of("fatContent"), Some("4.5"));
        assert_eq!(facts.value_of("proteinContent"), Some("12"));
    }

    #[test]
    fn test_absent_payload_is_unavailable() {
        let facts = NutritionFacts::from_recipe(&recipe_with(NutrientsPayload::Absent, None));
        assert_eq!(facts, NutritionFacts::Unavailable);
    }

    #[test]
    fn test_empty_object_is_unavailable() {
        let facts = NutritionFacts::from_recipe(&recipe_with(structured(json!({})), None));
        assert_eq!(facts, NutritionFacts::Unavailable);
    }

    #[test]
    fn test_single_nutrient_renders_section() {
        let facts =
            NutritionFacts::from_recipe(&recipe_with(structured(json!({"fatContent": "5g"})), None));

        assert_eq!(facts.rows().len(), 9);
        assert_eq!(facts.value_of("fatContent"), Some("5g"));
        for row in facts.rows().iter().filter(|r| r.label != "fatContent") {
            assert_eq!(row.display_value(), MISSING);
        }
    }

    #[test]
    fn test_malformed_string_degrades_silently() {
        let facts = NutritionFacts::from_recipe(&recipe_with(
            NutrientsPayload::Unparsed("calories: lots".to_string()),
            None,
        ));
        assert_eq!(facts, NutritionFacts::Unavailable);
    }

    #[test]
    fn test_calorie_resolution_order() {
        let payload = structured(json!({"calories": "300 kcal", "caloriesValue": 310}));

        let precomputed = NutritionFacts::from_recipe(&recipe_with(payload.clone(), Some(290)));
        assert_eq!(precomputed.value_of(CALORIES_LABEL), Some("290"));

        let from_key = NutritionFacts::from_recipe(&recipe_with(payload, None));
        assert_eq!(from_key.value_of(CALORIES_LABEL), Some("300 kcal"));

        let fallback = NutritionFacts::from_recipe(&recipe_with(
            structured(json!({"calories": null, "caloriesValue": 310})),
            None,
        ));
        assert_eq!(fallback.value_of(CALORIES_LABEL), Some("310"));
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let facts = NutritionFacts::from_recipe(&recipe_with(
            structured(json!({"sugarContent": "  ", "fatContent": null})),
            None,
        ));
        assert_eq!(facts, NutritionFacts::Unavailable);
    }

    #[test]
    fn test_row_order_is_stable() {
        let facts = NutritionFacts::build(None, Some(100));
        let labels: Vec<&str> = facts.rows().iter().map(|r| r.label).collect();

        assert_eq!(labels[0], CALORIES_LABEL);
        assert_eq!(&labels[1..], &NUTRIENT_KEYS);
    }
}
