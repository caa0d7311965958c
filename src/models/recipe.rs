use serde::{Deserialize, Serialize};

use crate::errors::{check_name, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

/// A catalog food used by weight. The food may since have been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub food_id: String,
    pub grams: f64,
}

impl Ingredient {
    pub fn new(food_id: impl Into<String>, grams: f64) -> Self {
        Self {
            food_id: food_id.into(),
            grams,
        }
    }
}

/// Reusable meal template. Its nutrients are never stored, only resolved
/// against the current catalog when needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("recipe name", &self.name)?;
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        for ingredient in &self.ingredients {
            check_name("ingredient food", &ingredient.food_id)?;
            if !(ingredient.grams.is_finite() && ingredient.grams > 0.0) {
                return Err(ValidationError::NonPositiveGrams(ingredient.grams));
            }
        }
        Ok(())
    }
}

impl MealRecipe {
    pub fn from_input(id: String, input: RecipeInput) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self {
            id,
            name: input.name,
            description: input.description,
            meal_type: input.meal_type,
            ingredients: input.ingredients,
        })
    }

    pub fn uses_food(&self, food_id: &str) -> bool {
        self.ingredients.iter().any(|ing| ing.food_id == food_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(ingredients: Vec<Ingredient>) -> RecipeInput {
        RecipeInput {
            name: "Porridge".into(),
            description: String::new(),
            meal_type: MealType::Breakfast,
            ingredients,
        }
    }

    #[test]
    fn persisted_recipes_need_an_ingredient() {
        assert_eq!(
            MealRecipe::from_input("r".into(), input(vec![])).unwrap_err(),
            ValidationError::NoIngredients
        );
    }

    #[test]
    fn grams_must_be_positive() {
        let err = MealRecipe::from_input("r".into(), input(vec![Ingredient::new("oats", 0.0)]))
            .unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveGrams(0.0));
    }

    #[test]
    fn type_tag_round_trips_under_its_stored_name() {
        let recipe =
            MealRecipe::from_input("r1".into(), input(vec![Ingredient::new("oats", 60.0)])).unwrap();
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["type"], "breakfast");
        assert_eq!(json["ingredients"][0]["foodId"], "oats");
        assert!(recipe.uses_food("oats"));
        assert!(!recipe.uses_food("milk"));
    }
}
