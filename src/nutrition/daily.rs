use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MealNote, UserProfile};
use crate::nutrition::{aggregate, percent_of_target, Totals};

pub fn notes_for_day(notes: &[MealNote], date: NaiveDate) -> Vec<&MealNote> {
    notes.iter().filter(|note| note.date == date).collect()
}

pub fn day_totals(notes: &[MealNote], date: NaiveDate) -> Totals {
    aggregate(notes_for_day(notes, date))
}

/// Percentage of each daily target reached. Zero targets report 0%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgress {
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

pub fn target_progress(totals: &Totals, profile: &UserProfile) -> TargetProgress {
    TargetProgress {
        calories: percent_of_target(totals.calories as f64, Some(profile.calories_target() as f64)),
        protein: percent_of_target(totals.protein, Some(profile.protein_target())),
        fat: percent_of_target(totals.fat, Some(profile.fat_target())),
        carbs: percent_of_target(totals.carbs, Some(profile.carbs_target())),
    }
}
