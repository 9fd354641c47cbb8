use serde::Serialize;

use super::repo_types::Meal;

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
}

/// `meal` is left out entirely when nothing matched.
#[derive(Debug, Serialize)]
pub struct MealResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<Meal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_meals: i64,
    pub total_on_the_diet_meals: i64,
    pub total_off_diet_meals: i64,
    pub best_sequence_of_on_diet_meals: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_camel_case_keys() {
        let json = serde_json::to_value(SummaryResponse {
            total_meals: 4,
            total_on_the_diet_meals: 3,
            total_off_diet_meals: 1,
            best_sequence_of_on_diet_meals: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalMeals": 4,
                "totalOnTheDietMeals": 3,
                "totalOffDietMeals": 1,
                "bestSequenceOfOnDietMeals": 2
            })
        );
    }

    #[test]
    fn missing_meal_serializes_as_empty_object() {
        let json = serde_json::to_string(&MealResponse { meal: None }).unwrap();
        assert_eq!(json, "{}");
    }
}
