//! In-memory collections and every user-facing mutation on them.
//!
//! Each mutation builds the next version of one collection, writes the whole
//! collection through the [`Store`], and only then swaps it into memory. A failed
//! write leaves memory exactly as it was.

use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::ValidationError;
use crate::ids::new_id;
use crate::models::{
    FoodInput, FoodItem, Language, MealNote, MealNoteDraft, MealNoteItem, MealRecipe, MealType,
    RecipeInput, UserProfile, WeightEntry, WeightInput,
};
use crate::nutrition::{
    self, dates, Macros, RecipeResolution, TargetProgress, Totals, WeekSummary, WeightHistoryRow,
};
use crate::store::{keys, Store};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// Days offered as paste targets, today included.
pub const PASTE_WINDOW_DAYS: u32 = 14;

/// Collection sizes, for the startup log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub foods: usize,
    pub recipes: usize,
    pub meal_notes: usize,
    pub weight_entries: usize,
}

pub struct Journal {
    store: Store,
    language: Language,
    profile: UserProfile,
    foods: Vec<FoodItem>,
    recipes: Vec<MealRecipe>,
    meal_notes: Vec<MealNote>,
    weight_entries: Vec<WeightEntry>,
    /// Copied note; never persisted.
    clipboard: Option<MealNote>,
}

fn commit<T: Serialize>(store: &Store, key: &str, next: Vec<T>, slot: &mut Vec<T>) -> Result<()> {
    store.set(key, &next)?;
    *slot = next;
    Ok(())
}

fn position_of<T>(items: &[T], kind: &'static str, id: &str, id_of: impl Fn(&T) -> &str) -> Result<usize> {
    items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or_else(|| ValidationError::unknown(kind, id).into())
}

impl Journal {
    /// Reads every collection. Missing or unreadable values start out empty;
    /// older flat meal notes come back itemized.
    pub fn load(store: Store) -> Self {
        let language = store.get(keys::LANGUAGE, Language::default());
        let profile = store.get(keys::PROFILE, UserProfile::default());
        let foods = store.get_list(keys::FOODS);
        let recipes = store.get_list(keys::RECIPES);
        let meal_notes = store.get_list(keys::MEAL_NOTES);
        let weight_entries = store.get_list(keys::WEIGHT_ENTRIES);

        let journal = Self {
            store,
            language,
            profile,
            foods,
            recipes,
            meal_notes,
            weight_entries,
            clipboard: None,
        };
        log_debug!("Journal loaded: {:?}", journal.stats());
        journal
    }

    pub fn stats(&self) -> JournalStats {
        JournalStats {
            foods: self.foods.len(),
            recipes: self.recipes.len(),
            meal_notes: self.meal_notes.len(),
            weight_entries: self.weight_entries.len(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.store.set(keys::LANGUAGE, &language)?;
        self.language = language;
        Ok(())
    }

    pub fn toggle_language(&mut self) -> Result<Language> {
        let next = self.language.toggled();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn set_profile_targets(&mut self, protein: f64, fat: f64, carbs: f64) -> Result<UserProfile> {
        let profile = UserProfile::new(protein, fat, carbs)?;
        self.store.set(keys::PROFILE, &profile)?;
        self.profile = profile;
        log_info!("Daily targets set to {} kcal", profile.calories_target());
        Ok(profile)
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn food(&self, id: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.id == id)
    }

    pub fn add_food(&mut self, input: FoodInput) -> Result<FoodItem> {
        let food = FoodItem::from_input(new_id(), input)?;
        let mut next = self.foods.clone();
        next.push(food.clone());
        commit(&self.store, keys::FOODS, next, &mut self.foods)?;
        Ok(food)
    }

    pub fn update_food(&mut self, id: &str, input: FoodInput) -> Result<FoodItem> {
        let index = position_of(&self.foods, "food", id, |f| f.id.as_str())?;
        let food = FoodItem::from_input(id.to_string(), input)?;
        let mut next = self.foods.clone();
        next[index] = food.clone();
        commit(&self.store, keys::FOODS, next, &mut self.foods)?;
        Ok(food)
    }

    /// Removes a food. Recipes and note items that point at it are left alone.
    pub fn delete_food(&mut self, id: &str) -> Result<FoodItem> {
        let index = position_of(&self.foods, "food", id, |f| f.id.as_str())?;
        let mut next = self.foods.clone();
        let removed = next.remove(index);
        commit(&self.store, keys::FOODS, next, &mut self.foods)?;

        let dangling = self.recipes_using_food(id).len();
        if dangling > 0 {
            log_info!("Deleted food '{}' is still used by {dangling} recipe(s)", removed.name);
        }
        Ok(removed)
    }

    pub fn recipes_using_food(&self, food_id: &str) -> Vec<&MealRecipe> {
        nutrition::recipes_using_food(&self.recipes, food_id)
    }

    pub fn recipes(&self) -> &[MealRecipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: &str) -> Option<&MealRecipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn recipes_by_type(&self, meal_type: MealType) -> Vec<&MealRecipe> {
        nutrition::recipes_by_type(&self.recipes, meal_type)
    }

    /// Ingredients can only be picked from the current catalog.
    fn check_ingredients_exist(&self, input: &RecipeInput) -> Result<(), ValidationError> {
        match input
            .ingredients
            .iter()
            .find(|ingredient| self.food(&ingredient.food_id).is_none())
        {
            Some(missing) => Err(ValidationError::unknown("food", &missing.food_id)),
            None => Ok(()),
        }
    }

    pub fn add_recipe(&mut self, input: RecipeInput) -> Result<MealRecipe> {
        self.check_ingredients_exist(&input)?;
        let recipe = MealRecipe::from_input(new_id(), input)?;
        let mut next = self.recipes.clone();
        next.push(recipe.clone());
        commit(&self.store, keys::RECIPES, next, &mut self.recipes)?;
        Ok(recipe)
    }

    pub fn update_recipe(&mut self, id: &str, input: RecipeInput) -> Result<MealRecipe> {
        let index = position_of(&self.recipes, "recipe", id, |r| r.id.as_str())?;
        self.check_ingredients_exist(&input)?;
        let recipe = MealRecipe::from_input(id.to_string(), input)?;
        let mut next = self.recipes.clone();
        next[index] = recipe.clone();
        commit(&self.store, keys::RECIPES, next, &mut self.recipes)?;
        Ok(recipe)
    }

    pub fn delete_recipe(&mut self, id: &str) -> Result<MealRecipe> {
        let index = position_of(&self.recipes, "recipe", id, |r| r.id.as_str())?;
        let mut next = self.recipes.clone();
        let removed = next.remove(index);
        commit(&self.store, keys::RECIPES, next, &mut self.recipes)?;
        Ok(removed)
    }

    pub fn resolve_recipe(&self, id: &str) -> Result<RecipeResolution> {
        let recipe = self
            .recipe(id)
            .ok_or_else(|| ValidationError::unknown("recipe", id))?;
        Ok(nutrition::resolve_recipe(recipe, &self.foods))
    }

    pub fn manual_item(&self, name: &str, macros: Macros) -> Result<MealNoteItem> {
        Ok(MealNoteItem::manual(new_id(), name.to_string(), macros)?)
    }

    /// A portion of a catalog food, named in the current language.
    pub fn food_item(&self, food_id: &str, grams: Option<f64>) -> Result<MealNoteItem> {
        let food = self
            .food(food_id)
            .ok_or_else(|| ValidationError::unknown("food", food_id))?;
        Ok(MealNoteItem::from_food(new_id(), food, grams, self.language))
    }

    pub fn recipe_item(&self, recipe_id: &str) -> Result<MealNoteItem> {
        let recipe = self
            .recipe(recipe_id)
            .ok_or_else(|| ValidationError::unknown("recipe", recipe_id))?;
        Ok(MealNoteItem::from_recipe(new_id(), recipe, &self.foods))
    }

    pub fn meal_notes(&self) -> &[MealNote] {
        &self.meal_notes
    }

    pub fn meal_note(&self, id: &str) -> Option<&MealNote> {
        self.meal_notes.iter().find(|note| note.id == id)
    }

    pub fn add_meal_note(&mut self, draft: MealNoteDraft) -> Result<MealNote> {
        let note = MealNote::from_draft(new_id(), draft)?;
        let mut next = self.meal_notes.clone();
        next.push(note.clone());
        commit(&self.store, keys::MEAL_NOTES, next, &mut self.meal_notes)?;
        Ok(note)
    }

    pub fn update_meal_note(&mut self, id: &str, draft: MealNoteDraft) -> Result<MealNote> {
        let index = position_of(&self.meal_notes, "meal note", id, |n| n.id.as_str())?;
        let note = MealNote::from_draft(id.to_string(), draft)?;
        self.replace_note(index, note)
    }

    pub fn delete_meal_note(&mut self, id: &str) -> Result<MealNote> {
        let index = position_of(&self.meal_notes, "meal note", id, |n| n.id.as_str())?;
        let mut next = self.meal_notes.clone();
        let removed = next.remove(index);
        commit(&self.store, keys::MEAL_NOTES, next, &mut self.meal_notes)?;
        Ok(removed)
    }

    pub fn add_note_item(&mut self, note_id: &str, item: MealNoteItem) -> Result<MealNote> {
        let index = position_of(&self.meal_notes, "meal note", note_id, |n| n.id.as_str())?;
        let mut note = self.meal_notes[index].clone();
        note.push_item(item);
        self.replace_note(index, note)
    }

    pub fn replace_note_item(&mut self, note_id: &str, item: MealNoteItem) -> Result<MealNote> {
        let index = position_of(&self.meal_notes, "meal note", note_id, |n| n.id.as_str())?;
        let mut note = self.meal_notes[index].clone();
        note.replace_item(item)?;
        self.replace_note(index, note)
    }

    pub fn remove_note_item(&mut self, note_id: &str, item_id: &str) -> Result<MealNote> {
        let index = position_of(&self.meal_notes, "meal note", note_id, |n| n.id.as_str())?;
        let mut note = self.meal_notes[index].clone();
        note.remove_item(item_id)?;
        self.replace_note(index, note)
    }

    fn replace_note(&mut self, index: usize, note: MealNote) -> Result<MealNote> {
        let mut next = self.meal_notes.clone();
        next[index] = note.clone();
        commit(&self.store, keys::MEAL_NOTES, next, &mut self.meal_notes)?;
        Ok(note)
    }

    pub fn notes_for_day(&self, date: NaiveDate) -> Vec<&MealNote> {
        nutrition::notes_for_day(&self.meal_notes, date)
    }

    /// Notes for a `YYYY-MM-DD` key.
    pub fn notes_for_date_key(&self, key: &str) -> Result<Vec<&MealNote>> {
        Ok(self.notes_for_day(dates::parse_date_key(key)?))
    }

    pub fn day_totals(&self, date: NaiveDate) -> Totals {
        nutrition::day_totals(&self.meal_notes, date)
    }

    pub fn day_progress(&self, date: NaiveDate) -> TargetProgress {
        nutrition::target_progress(&self.day_totals(date), &self.profile)
    }

    pub fn clipboard(&self) -> Option<&MealNote> {
        self.clipboard.as_ref()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn copy_meal_note(&mut self, id: &str) -> Result<()> {
        let note = self
            .meal_note(id)
            .ok_or_else(|| ValidationError::unknown("meal note", id))?
            .clone();
        log_debug!("Copied meal note '{}'", note.name);
        self.clipboard = Some(note);
        Ok(())
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }

    /// Dates a copied note can be pasted onto.
    pub fn paste_targets(today: NaiveDate) -> Vec<NaiveDate> {
        dates::days_from(today, PASTE_WINDOW_DAYS)
    }

    /// Adds one copy of the clipboard note per distinct date, each with new ids.
    /// The clipboard keeps its note.
    pub fn paste_clipboard(&mut self, targets: &[NaiveDate]) -> Result<Vec<MealNote>> {
        let source = self.clipboard.as_ref().ok_or(ValidationError::EmptyClipboard)?;
        if targets.is_empty() {
            return Err(ValidationError::NoPasteTargets.into());
        }

        let mut seen = HashSet::new();
        let pasted: Vec<MealNote> = targets
            .iter()
            .filter(|date| seen.insert(**date))
            .map(|date| source.duplicate_onto(new_id(), *date, new_id))
            .collect();

        let mut next = self.meal_notes.clone();
        next.extend(pasted.iter().cloned());
        commit(&self.store, keys::MEAL_NOTES, next, &mut self.meal_notes)?;
        log_info!("Pasted '{}' onto {} day(s)", source.name, pasted.len());
        Ok(pasted)
    }

    pub fn weekly_summary(&self, week_offset: u32, today: NaiveDate) -> WeekSummary {
        nutrition::weekly_summary(&self.meal_notes, week_offset, today)
    }

    pub fn weekly_history(&self, today: NaiveDate) -> Vec<WeekSummary> {
        nutrition::weekly_history(&self.meal_notes, today)
    }

    pub fn weight_entries(&self) -> &[WeightEntry] {
        &self.weight_entries
    }

    /// Writes `entry` at `index` (or appends), keeping at most one starting entry.
    fn save_weight(&mut self, index: Option<usize>, entry: WeightEntry) -> Result<WeightEntry> {
        let mut next = self.weight_entries.clone();
        if entry.is_starting {
            for other in next.iter_mut() {
                other.is_starting = false;
            }
        }
        match index {
            Some(index) => next[index] = entry.clone(),
            None => next.push(entry.clone()),
        }
        commit(&self.store, keys::WEIGHT_ENTRIES, next, &mut self.weight_entries)?;
        Ok(entry)
    }

    pub fn add_weight(&mut self, input: WeightInput) -> Result<WeightEntry> {
        let entry = WeightEntry::from_input(new_id(), input)?;
        self.save_weight(None, entry)
    }

    pub fn update_weight(&mut self, id: &str, input: WeightInput) -> Result<WeightEntry> {
        let index = position_of(&self.weight_entries, "weight entry", id, |w| w.id.as_str())?;
        let entry = WeightEntry::from_input(id.to_string(), input)?;
        self.save_weight(Some(index), entry)
    }

    pub fn delete_weight(&mut self, id: &str) -> Result<WeightEntry> {
        let index = position_of(&self.weight_entries, "weight entry", id, |w| w.id.as_str())?;
        let mut next = self.weight_entries.clone();
        let removed = next.remove(index);
        commit(&self.store, keys::WEIGHT_ENTRIES, next, &mut self.weight_entries)?;
        Ok(removed)
    }

    pub fn starting_weight(&self) -> Option<&WeightEntry> {
        nutrition::starting_entry(&self.weight_entries)
    }

    pub fn latest_weight(&self) -> Option<&WeightEntry> {
        nutrition::latest_entry(&self.weight_entries)
    }

    pub fn weight_change(&self) -> Option<f64> {
        nutrition::weight_change(&self.weight_entries)
    }

    pub fn weight_history(&self) -> Vec<WeightHistoryRow<'_>> {
        nutrition::weight_history(&self.weight_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use crate::nutrition::HasTotals;
    use crate::store::memory::MemoryBackend;
    use crate::store::{JsonFileBackend, StorageBackend};
    use serde_json::{json, Value};

    fn memory_journal() -> Journal {
        Journal::load(Store::new(Box::new(MemoryBackend::default())))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food_input(name: &str, protein: f64, fat: f64, carbs: f64) -> FoodInput {
        FoodInput {
            name: name.into(),
            description: String::new(),
            protein,
            fat,
            carbs,
        }
    }

    fn recipe_input(name: &str, ingredients: Vec<Ingredient>) -> RecipeInput {
        RecipeInput {
            name: name.into(),
            description: String::new(),
            meal_type: MealType::Breakfast,
            ingredients,
        }
    }

    fn draft(date: NaiveDate, name: &str, items: Vec<MealNoteItem>) -> MealNoteDraft {
        MealNoteDraft {
            date,
            name: name.into(),
            description: String::new(),
            items,
        }
    }

    fn validation(err: &anyhow::Error) -> Option<&ValidationError> {
        err.downcast_ref::<ValidationError>()
    }

    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn read(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        fn write(&self, key: &str, _value: Value) -> Result<()> {
            anyhow::bail!("disk full while writing {key}")
        }

        fn describe(&self) -> String {
            "read-only".into()
        }
    }

    #[test]
    fn collections_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mealnote.json");
        let open = || Journal::load(Store::new(Box::new(JsonFileBackend::new(path.clone()).unwrap())));

        let mut journal = open();
        let oats = journal.add_food(food_input("Oats", 12.0, 7.0, 60.0)).unwrap();
        journal
            .add_recipe(recipe_input("Porridge", vec![Ingredient::new(oats.id.clone(), 50.0)]))
            .unwrap();
        let item = journal.food_item(&oats.id, Some(80.0)).unwrap();
        journal.add_meal_note(draft(ymd(2024, 5, 2), "", vec![item])).unwrap();
        journal.set_profile_targets(100.0, 70.0, 250.0).unwrap();
        journal.set_language(Language::Ru).unwrap();
        drop(journal);

        let reopened = open();
        assert_eq!(reopened.foods(), &[oats]);
        assert_eq!(reopened.recipes().len(), 1);
        assert_eq!(reopened.meal_notes().len(), 1);
        assert_eq!(reopened.meal_notes()[0].name, "Oats (80grams)");
        assert_eq!(reopened.profile().calories_target(), 2030);
        assert_eq!(reopened.language(), Language::Ru);
    }

    #[test]
    fn food_calories_are_derived_on_add_and_update() {
        let mut journal = memory_journal();
        let food = journal.add_food(food_input("Chicken", 20.0, 5.0, 0.0)).unwrap();
        assert_eq!(food.calories(), 125);

        let updated = journal
            .update_food(&food.id, food_input("Chicken breast", 23.0, 2.0, 0.0))
            .unwrap();
        assert_eq!(updated.id, food.id);
        assert_eq!(updated.calories(), 110);
        assert_eq!(journal.food(&food.id).map(|f| f.name.as_str()), Some("Chicken breast"));
    }

    #[test]
    fn deleting_a_food_leaves_recipes_dangling() {
        let mut journal = memory_journal();
        let oats = journal.add_food(food_input("Oats", 12.0, 7.0, 60.0)).unwrap();
        let milk = journal.add_food(food_input("Milk", 3.0, 3.5, 5.0)).unwrap();
        let recipe = journal
            .add_recipe(recipe_input(
                "Porridge",
                vec![Ingredient::new(oats.id.clone(), 50.0), Ingredient::new(milk.id.clone(), 200.0)],
            ))
            .unwrap();
        let complete = journal.resolve_recipe(&recipe.id).unwrap();
        assert!(complete.is_complete());

        assert_eq!(journal.recipes_using_food(&milk.id).len(), 1);
        journal.delete_food(&milk.id).unwrap();
        assert_eq!(journal.recipes().len(), 1);

        let partial = journal.resolve_recipe(&recipe.id).unwrap();
        assert_eq!(partial.unresolved, vec![milk.id.clone()]);
        assert!(partial.totals.calories < complete.totals.calories);
        assert_eq!(partial.totals.protein, 6.0);
    }

    #[test]
    fn recipes_are_validated_against_the_catalog() {
        let mut journal = memory_journal();
        let err = journal
            .add_recipe(recipe_input("Ghost", vec![Ingredient::new("nope", 10.0)]))
            .unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::unknown("food", "nope")));

        let err = journal.add_recipe(recipe_input("Empty", vec![])).unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::NoIngredients));
        assert!(journal.recipes().is_empty());
    }

    #[test]
    fn recipes_filter_by_meal_type_and_delete() {
        let mut journal = memory_journal();
        let oats = journal.add_food(food_input("Oats", 12.0, 7.0, 60.0)).unwrap();
        let breakfast = journal
            .add_recipe(recipe_input("Porridge", vec![Ingredient::new(oats.id.clone(), 50.0)]))
            .unwrap();
        let mut snack = recipe_input("Bar", vec![Ingredient::new(oats.id.clone(), 30.0)]);
        snack.meal_type = MealType::Snack;
        let snack = journal.add_recipe(snack).unwrap();

        assert_eq!(journal.recipes_by_type(MealType::Snack), vec![&snack]);
        journal.delete_recipe(&breakfast.id).unwrap();
        assert!(journal.recipes_by_type(MealType::Breakfast).is_empty());
        assert!(journal.resolve_recipe(&breakfast.id).is_err());
    }

    #[test]
    fn note_items_from_food_recipe_and_by_hand() {
        let mut journal = memory_journal();
        let chicken = journal.add_food(food_input("Chicken", 20.0, 5.0, 0.0)).unwrap();
        let food_line = journal.food_item(&chicken.id, Some(150.0)).unwrap();
        assert_eq!(food_line.name, "Chicken (150grams)");
        assert_eq!(food_line.calories(), 188);

        let recipe = journal
            .add_recipe(recipe_input("Plate", vec![Ingredient::new(chicken.id.clone(), 200.0)]))
            .unwrap();
        let recipe_line = journal.recipe_item(&recipe.id).unwrap();
        assert_eq!(recipe_line.name, "Plate");
        assert_eq!(recipe_line.calories(), 250);

        let manual = journal
            .manual_item("Coffee", Macros::new(1.0, 0.0, 2.0))
            .unwrap();
        let note = journal
            .add_meal_note(draft(ymd(2024, 5, 6), "Lunch", vec![food_line, recipe_line, manual]))
            .unwrap();
        assert_eq!(note.totals().calories, 188 + 250 + 12);

        journal.toggle_language().unwrap();
        let russian = journal.food_item(&chicken.id, None).unwrap();
        assert_eq!(russian.name, "Chicken (100грамм)");
    }

    #[test]
    fn note_edits_keep_totals_in_step() {
        let mut journal = memory_journal();
        let first = journal.manual_item("Rice", Macros::new(0.0, 0.0, 50.0)).unwrap();
        let note = journal
            .add_meal_note(draft(ymd(2024, 5, 6), "", vec![first.clone()]))
            .unwrap();
        assert_eq!(note.name, "Rice");
        assert_eq!(note.totals().calories, 200);

        let extra = journal.manual_item("Oil", Macros::new(0.0, 10.0, 0.0)).unwrap();
        let note = journal.add_note_item(&note.id, extra.clone()).unwrap();
        assert_eq!(note.totals().calories, 290);

        let err = journal.remove_note_item(&note.id, "missing").unwrap_err();
        assert!(matches!(validation(&err), Some(ValidationError::UnknownId { .. })));

        let note = journal.remove_note_item(&note.id, &first.id).unwrap();
        assert_eq!(note.totals().calories, 90);
        let err = journal.remove_note_item(&note.id, &extra.id).unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::NoItems));
        assert_eq!(journal.meal_note(&note.id).unwrap().items().len(), 1);

        let heavier = MealNoteItem::manual(extra.id.clone(), "Oil".into(), Macros::new(0.0, 20.0, 0.0))
            .unwrap();
        let note = journal.replace_note_item(&note.id, heavier).unwrap();
        assert_eq!(note.totals().calories, 180);

        let dinner = journal.manual_item("Soup", Macros::new(5.0, 5.0, 5.0)).unwrap();
        let note = journal
            .update_meal_note(&note.id, draft(ymd(2024, 5, 7), "Dinner", vec![dinner]))
            .unwrap();
        assert_eq!(note.date, ymd(2024, 5, 7));
        assert_eq!(note.totals().calories, 85);

        journal.delete_meal_note(&note.id).unwrap();
        assert!(journal.meal_notes().is_empty());
    }

    #[test]
    fn note_without_items_is_refused() {
        let mut journal = memory_journal();
        let err = journal
            .add_meal_note(draft(ymd(2024, 5, 6), "Empty", vec![]))
            .unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::NoItems));
        assert!(journal.meal_notes().is_empty());
    }

    #[test]
    fn legacy_notes_are_itemized_on_load() {
        let backend = MemoryBackend::with(&[(
            keys::MEAL_NOTES,
            json!([{
                "id": "old",
                "date": "2024-05-01",
                "name": "Soup",
                "description": "",
                "protein": 10,
                "fat": 5,
                "carbs": 20,
                "calories": 999
            }]),
        )]);
        let journal = Journal::load(Store::new(Box::new(backend)));
        let note = journal.meal_note("old").unwrap();
        assert_eq!(note.items().len(), 1);
        assert_eq!(note.items()[0].id, "old-item");
        assert_eq!(note.totals().calories, 165);
        assert_eq!(journal.notes_for_date_key("2024-05-01").unwrap().len(), 1);
        assert!(journal.notes_for_date_key("01/05/2024").is_err());
    }

    #[test]
    fn day_totals_and_progress() {
        let mut journal = memory_journal();
        journal.set_profile_targets(100.0, 70.0, 250.0).unwrap();
        let day = ymd(2024, 3, 4);
        for carbs in [125.0, 75.0] {
            let item = journal.manual_item("Bread", Macros::new(0.0, 0.0, carbs)).unwrap();
            journal.add_meal_note(draft(day, "", vec![item])).unwrap();
        }
        assert_eq!(journal.notes_for_day(day).len(), 2);
        assert_eq!(journal.day_totals(day).calories, 800);

        let progress = journal.day_progress(day);
        assert_eq!(progress.carbs, 80);
        assert_eq!(progress.calories, 39);
        assert_eq!(progress.protein, 0);
    }

    #[test]
    fn paste_copies_onto_each_distinct_day_with_fresh_ids() {
        let mut journal = memory_journal();
        let err = journal.paste_clipboard(&[ymd(2024, 5, 8)]).unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::EmptyClipboard));

        let item = journal.manual_item("Toast", Macros::new(4.0, 2.0, 20.0)).unwrap();
        let source = journal
            .add_meal_note(draft(ymd(2024, 5, 6), "Breakfast", vec![item]))
            .unwrap();
        journal.copy_meal_note(&source.id).unwrap();
        assert!(journal.has_clipboard());

        let err = journal.paste_clipboard(&[]).unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::NoPasteTargets));

        let pasted = journal
            .paste_clipboard(&[ymd(2024, 5, 8), ymd(2024, 5, 9), ymd(2024, 5, 8)])
            .unwrap();
        assert_eq!(pasted.len(), 2);
        assert_eq!(journal.meal_notes().len(), 3);
        for copy in &pasted {
            assert_ne!(copy.id, source.id);
            assert_ne!(copy.items()[0].id, source.items()[0].id);
            assert_eq!(copy.name, "Breakfast");
            assert_eq!(copy.totals(), source.totals());
        }
        assert_eq!(pasted[1].date, ymd(2024, 5, 9));

        assert_eq!(journal.clipboard().map(|n| n.id.as_str()), Some(source.id.as_str()));
        journal.clear_clipboard();
        assert!(!journal.has_clipboard());
    }

    #[test]
    fn paste_targets_are_the_next_fourteen_days() {
        let targets = Journal::paste_targets(ymd(2024, 12, 25));
        assert_eq!(targets.len(), 14);
        assert_eq!(targets[0], ymd(2024, 12, 25));
        assert_eq!(targets[13], ymd(2025, 1, 7));
    }

    #[test]
    fn only_one_starting_weight_at_a_time() {
        let mut journal = memory_journal();
        let first = journal
            .add_weight(WeightInput {
                date: ymd(2024, 1, 1),
                weight: 80.0,
                is_starting: true,
            })
            .unwrap();
        journal
            .add_weight(WeightInput {
                date: ymd(2024, 2, 1),
                weight: 82.5,
                is_starting: false,
            })
            .unwrap();
        assert_eq!(journal.weight_change(), Some(2.5));
        assert_eq!(journal.latest_weight().map(|w| w.weight), Some(82.5));

        let restart = journal
            .add_weight(WeightInput {
                date: ymd(2024, 1, 15),
                weight: 81.0,
                is_starting: true,
            })
            .unwrap();
        assert_eq!(journal.starting_weight().map(|w| w.id.clone()), Some(restart.id));
        assert_eq!(journal.weight_entries().iter().filter(|w| w.is_starting).count(), 1);
        assert_eq!(journal.weight_change(), Some(1.5));

        let history = journal.weight_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].change, 1.5);

        let err = journal
            .update_weight(
                &first.id,
                WeightInput {
                    date: ymd(2024, 1, 1),
                    weight: -3.0,
                    is_starting: false,
                },
            )
            .unwrap_err();
        assert_eq!(validation(&err), Some(&ValidationError::InvalidWeight(-3.0)));

        journal.delete_weight(&first.id).unwrap();
        assert_eq!(journal.weight_entries().len(), 2);
    }

    #[test]
    fn weekly_views_use_the_logged_notes() {
        let mut journal = memory_journal();
        let item = journal.manual_item("Pasta", Macros::new(0.0, 0.0, 100.0)).unwrap();
        journal.add_meal_note(draft(ymd(2024, 5, 14), "", vec![item])).unwrap();

        let week = journal.weekly_summary(0, ymd(2024, 5, 15));
        assert_eq!(week.totals().calories, 400);
        assert_eq!(journal.weekly_history(ymd(2024, 5, 15))[0], week);
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let mut journal = Journal::load(Store::new(Box::new(ReadOnlyBackend)));
        assert!(journal.add_food(food_input("Oats", 12.0, 7.0, 60.0)).is_err());
        assert!(journal.foods().is_empty());
        assert!(journal.toggle_language().is_err());
        assert_eq!(journal.language(), Language::En);
        assert_eq!(journal.stats(), JournalStats::default());
    }
}
