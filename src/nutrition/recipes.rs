use serde::Serialize;

use crate::models::{FoodItem, Ingredient, MealRecipe, MealType};
use crate::nutrition::{Macros, Totals};

/// Totals for a recipe plus the ingredients that couldn't be resolved.
///
/// Unresolved ingredients (their food was deleted) contribute nothing to
/// `totals`; they are listed so callers can show a hint, but resolution
/// itself never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResolution {
    pub totals: Totals,
    pub unresolved: Vec<String>,
}

impl RecipeResolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

fn find_food<'a>(foods: &'a [FoodItem], food_id: &str) -> Option<&'a FoodItem> {
    foods.iter().find(|food| food.id == food_id)
}

pub fn resolve_recipe(recipe: &MealRecipe, foods: &[FoodItem]) -> RecipeResolution {
    let mut macros = Macros::default();
    let mut unresolved = Vec::new();

    for ingredient in &recipe.ingredients {
        match find_food(foods, &ingredient.food_id) {
            Some(food) => macros += food.per_100g().scaled(ingredient.grams),
            None => unresolved.push(ingredient.food_id.clone()),
        }
    }

    RecipeResolution {
        totals: macros.to_totals(),
        unresolved,
    }
}

/// Nutrients of a single ingredient line, or `None` if its food is gone.
pub fn ingredient_nutrients(ingredient: &Ingredient, foods: &[FoodItem]) -> Option<Totals> {
    find_food(foods, &ingredient.food_id).map(|food| food.portion(ingredient.grams))
}

pub fn recipes_by_type(recipes: &[MealRecipe], meal_type: MealType) -> Vec<&MealRecipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.meal_type == meal_type)
        .collect()
}

pub fn recipes_using_food<'a>(recipes: &'a [MealRecipe], food_id: &str) -> Vec<&'a MealRecipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.uses_food(food_id))
        .collect()
}
