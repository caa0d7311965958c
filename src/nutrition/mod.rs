//! Derived values: calories, totals, targets, recipe resolution, day/week rollups
//! and weight trend. Everything here is pure; nothing touches the store.

pub mod calculator;
pub mod daily;
pub mod dates;
pub mod recipes;
pub mod weekly;
pub mod weight;

pub use calculator::{
    aggregate, calories_from_macros, percent_of_target, round_half_up, scale_by_grams,
    AverageTotals, HasTotals, Macros, Totals,
};
pub use daily::{day_totals, notes_for_day, target_progress, TargetProgress};
pub use dates::{date_key, parse_date_key};
pub use recipes::{
    ingredient_nutrients, recipes_by_type, recipes_using_food, resolve_recipe, RecipeResolution,
};
pub use weekly::{weekly_history, weekly_summary, DayBucket, WeekSummary, HISTORY_WEEKS};
pub use weight::{latest_entry, starting_entry, weight_change, weight_history, WeightHistoryRow};
