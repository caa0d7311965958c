use serde::{Deserialize, Serialize};

use crate::errors::{check_amount, check_name, ValidationError};
use crate::nutrition::{Macros, Totals};

/// A catalog food. Macros are grams per 100 g; calories are per 100 g too.
///
/// Macros and calories are private so the calories can't drift from the macros;
/// they are re-derived on load as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredFood")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub description: String,
    protein: f64,
    fat: f64,
    carbs: f64,
    calories: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFood {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default)]
    carbs: f64,
}

impl From<StoredFood> for FoodItem {
    fn from(stored: StoredFood) -> Self {
        // Whatever calorie value was on disk is ignored.
        FoodItem::build(
            stored.id,
            stored.name,
            stored.description,
            Macros::new(stored.protein, stored.fat, stored.carbs),
        )
    }
}

/// User-entered fields for creating or editing a food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl FoodInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("food name", &self.name)?;
        check_amount("protein", self.protein)?;
        check_amount("fat", self.fat)?;
        check_amount("carbs", self.carbs)?;
        Ok(())
    }
}

impl FoodItem {
    fn build(id: String, name: String, description: String, per_100g: Macros) -> Self {
        Self {
            id,
            name,
            description,
            protein: per_100g.protein,
            fat: per_100g.fat,
            carbs: per_100g.carbs,
            calories: per_100g.calories(),
        }
    }

    /// Builds a catalog entry, deriving calories from the macros.
    pub fn from_input(id: String, input: FoodInput) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self::build(
            id,
            input.name,
            input.description,
            Macros::new(input.protein, input.fat, input.carbs),
        ))
    }

    pub fn protein(&self) -> f64 {
        self.protein
    }

    pub fn fat(&self) -> f64 {
        self.fat
    }

    pub fn carbs(&self) -> f64 {
        self.carbs
    }

    /// Calories per 100 g.
    pub fn calories(&self) -> i64 {
        self.calories
    }

    pub fn per_100g(&self) -> Macros {
        Macros::new(self.protein, self.fat, self.carbs)
    }

    /// Nutrients in a portion of `grams`.
    pub fn portion(&self, grams: f64) -> Totals {
        self.per_100g().scaled(grams).to_totals()
    }
}
