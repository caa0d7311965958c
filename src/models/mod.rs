pub mod food;
pub mod language;
pub mod meal_note;
pub mod profile;
pub mod recipe;
pub mod weight;

pub use food::{FoodInput, FoodItem};
pub use language::Language;
pub use meal_note::{LegacyMealNote, MealNote, MealNoteDraft, MealNoteItem, MealNoteRecord, SourceType};
pub use profile::UserProfile;
pub use recipe::{Ingredient, MealRecipe, MealType, RecipeInput};
pub use weight::{WeightEntry, WeightInput};
