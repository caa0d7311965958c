//! Diary entries and their line items.
//!
//! Two shapes of meal note exist on disk: the current one with an `items` array,
//! and an older flat one that carried macros directly on the note. Both are read
//! into [`MealNoteRecord`] and immediately normalized into a [`MealNote`], so the
//! rest of the crate only ever sees the itemized shape.
//!
//! Item calories and note totals are private and recomputed on every change;
//! callers can read them but can't make them disagree with the items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{check_amount, check_name, ValidationError};
use crate::models::{FoodItem, Language, MealRecipe};
use crate::nutrition::{aggregate, resolve_recipe, HasTotals, Macros, Totals};

/// Grams assumed for a food line when none (or nonsense) was entered.
pub const DEFAULT_PORTION_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Manual,
    Food,
    Recipe,
}

/// One line of a meal note. Macros are absolute grams for this line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredItem")]
pub struct MealNoteItem {
    pub id: String,
    pub name: String,
    protein: f64,
    fat: f64,
    carbs: f64,
    calories: i64,
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    source_type: SourceType,
    #[serde(default)]
    source_id: Option<String>,
    #[serde(default)]
    grams: Option<f64>,
}

impl From<StoredItem> for MealNoteItem {
    fn from(stored: StoredItem) -> Self {
        MealNoteItem::build(
            stored.id,
            stored.name,
            Macros::new(stored.protein, stored.fat, stored.carbs),
            stored.source_type,
            stored.source_id,
            stored.grams,
        )
    }
}

impl MealNoteItem {
    fn build(
        id: String,
        name: String,
        macros: Macros,
        source_type: SourceType,
        source_id: Option<String>,
        grams: Option<f64>,
    ) -> Self {
        Self {
            id,
            name,
            protein: macros.protein,
            fat: macros.fat,
            carbs: macros.carbs,
            calories: macros.calories(),
            source_type,
            // A manual line never points at the catalog.
            source_id: match source_type {
                SourceType::Manual => None,
                _ => source_id,
            },
            grams: match source_type {
                SourceType::Food => grams,
                _ => None,
            },
        }
    }

    /// A line typed in by hand.
    pub fn manual(id: String, name: String, macros: Macros) -> Result<Self, ValidationError> {
        check_name("item name", &name)?;
        check_amount("protein", macros.protein)?;
        check_amount("fat", macros.fat)?;
        check_amount("carbs", macros.carbs)?;
        Ok(Self::build(id, name, macros, SourceType::Manual, None, None))
    }

    /// A portion of a catalog food. Missing or non-positive grams fall back to 100 g.
    pub fn from_food(id: String, food: &FoodItem, grams: Option<f64>, language: Language) -> Self {
        let grams = grams
            .filter(|g| g.is_finite() && *g > 0.0)
            .unwrap_or(DEFAULT_PORTION_GRAMS);
        let name = format!("{} ({}{})", food.name, grams, language.grams_label());
        Self::build(
            id,
            name,
            food.per_100g().scaled(grams),
            SourceType::Food,
            Some(food.id.clone()),
            Some(grams),
        )
    }

    /// One serving of a recipe, resolved against the current catalog.
    pub fn from_recipe(id: String, recipe: &MealRecipe, foods: &[FoodItem]) -> Self {
        let resolved = resolve_recipe(recipe, foods);
        Self::build(
            id,
            recipe.name.clone(),
            resolved.totals.macros(),
            SourceType::Recipe,
            Some(recipe.id.clone()),
            None,
        )
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

    pub fn calories(&self) -> i64 {
        self.calories
    }

    pub fn macros(&self) -> Macros {
        Macros::new(self.protein, self.fat, self.carbs)
    }

    fn with_id(&self, id: String) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

impl HasTotals for MealNoteItem {
    fn totals(&self) -> Totals {
        Totals {
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            calories: self.calories,
        }
    }
}

/// What the user submits when saving a note; the id is assigned by the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct MealNoteDraft {
    pub date: NaiveDate,
    pub name: String,
    pub description: String,
    pub items: Vec<MealNoteItem>,
}

/// A diary entry for one calendar day. Never has zero items once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredMealNote")]
pub struct MealNote {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub description: String,
    items: Vec<MealNoteItem>,
    #[serde(flatten)]
    totals: Totals,
}

impl MealNote {
    fn assemble(
        id: String,
        date: NaiveDate,
        name: String,
        description: String,
        items: Vec<MealNoteItem>,
    ) -> Self {
        let totals = aggregate(&items);
        Self {
            id,
            date,
            name,
            description,
            items,
            totals,
        }
    }

    /// Validates a draft and fixes up its name: a blank name takes the first item's.
    pub fn from_draft(id: String, draft: MealNoteDraft) -> Result<Self, ValidationError> {
        let Some(first) = draft.items.first() else {
            return Err(ValidationError::NoItems);
        };
        let name = if draft.name.trim().is_empty() {
            first.name.clone()
        } else {
            draft.name
        };
        Ok(Self::assemble(id, draft.date, name, draft.description, draft.items))
    }

    pub fn items(&self) -> &[MealNoteItem] {
        &self.items
    }

    pub fn push_item(&mut self, item: MealNoteItem) {
        self.items.push(item);
        self.recompute_totals();
    }

    pub fn replace_item(&mut self, item: MealNoteItem) -> Result<(), ValidationError> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| ValidationError::unknown("meal note item", &item.id))?;
        *slot = item;
        self.recompute_totals();
        Ok(())
    }

    /// Removes a line. The last remaining line can't be removed.
    pub fn remove_item(&mut self, item_id: &str) -> Result<MealNoteItem, ValidationError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| ValidationError::unknown("meal note item", item_id))?;
        if self.items.len() == 1 {
            return Err(ValidationError::NoItems);
        }
        let removed = self.items.remove(index);
        self.recompute_totals();
        Ok(removed)
    }

    /// A copy of this note on another day, with fresh ids throughout.
    pub fn duplicate_onto(
        &self,
        id: String,
        date: NaiveDate,
        mut next_item_id: impl FnMut() -> String,
    ) -> MealNote {
        let items = self
            .items
            .iter()
            .map(|item| item.with_id(next_item_id()))
            .collect();
        Self::assemble(id, date, self.name.clone(), self.description.clone(), items)
    }

    fn recompute_totals(&mut self) {
        self.totals = aggregate(&self.items);
    }
}

impl HasTotals for MealNote {
    fn totals(&self) -> Totals {
        self.totals
    }
}

/// Flat-field note written before notes had line items.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyMealNote {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub description: String,
    pub macros: Macros,
    pub source_type: Option<SourceType>,
    pub source_id: Option<String>,
}

/// A meal note as read from disk, in either of its historical shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum MealNoteRecord {
    Itemized {
        id: String,
        date: NaiveDate,
        name: String,
        description: String,
        items: Vec<MealNoteItem>,
    },
    Legacy(LegacyMealNote),
}

impl MealNoteRecord {
    /// Canonical itemized form. Idempotent: an itemized record comes back with the
    /// same items and totals it went in with.
    pub fn normalize(self) -> MealNote {
        match self {
            MealNoteRecord::Itemized {
                id,
                date,
                name,
                description,
                items,
            } => MealNote::assemble(id, date, name, description, items),
            MealNoteRecord::Legacy(legacy) => {
                // Deterministic so that loading the same file twice gives equal notes.
                let item_id = format!("{}-item", legacy.id);
                let item = MealNoteItem::build(
                    item_id,
                    legacy.name.clone(),
                    legacy.macros,
                    legacy.source_type.unwrap_or_default(),
                    legacy.source_id,
                    None,
                );
                MealNote::assemble(legacy.id, legacy.date, legacy.name, legacy.description, vec![item])
            }
        }
    }
}

impl From<MealNote> for MealNoteRecord {
    fn from(note: MealNote) -> Self {
        MealNoteRecord::Itemized {
            id: note.id,
            date: note.date,
            name: note.name,
            description: note.description,
            items: note.items,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMealNote {
    id: String,
    date: NaiveDate,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    items: Option<Vec<MealNoteItem>>,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    source_type: Option<SourceType>,
    #[serde(default)]
    source_id: Option<String>,
}

impl From<StoredMealNote> for MealNoteRecord {
    fn from(stored: StoredMealNote) -> Self {
        match stored.items {
            Some(items) if !items.is_empty() => MealNoteRecord::Itemized {
                id: stored.id,
                date: stored.date,
                name: stored.name,
                description: stored.description,
                items,
            },
            _ => MealNoteRecord::Legacy(LegacyMealNote {
                id: stored.id,
                date: stored.date,
                name: stored.name,
                description: stored.description,
                macros: Macros::new(stored.protein, stored.fat, stored.carbs),
                source_type: stored.source_type,
                source_id: stored.source_id,
            }),
        }
    }
}

impl From<StoredMealNote> for MealNote {
    fn from(stored: StoredMealNote) -> Self {
        MealNoteRecord::from(stored).normalize()
    }
}
