use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Rounds to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Calories for a macro split using the 4/9/4 kcal-per-gram rule.
///
/// This is the only place calories are computed; foods, note items, recipes
/// and profile targets all go through it.
pub fn calories_from_macros(protein: f64, fat: f64, carbs: f64) -> i64 {
    round_half_up(
        protein * KCAL_PER_GRAM_PROTEIN + fat * KCAL_PER_GRAM_FAT + carbs * KCAL_PER_GRAM_CARBS,
    )
}

/// Scales a per-100 g nutrient value to an actual portion.
pub fn scale_by_grams(per_100g: f64, grams: f64) -> f64 {
    per_100g * grams / 100.0
}

/// Whole-number percentage of `target`, or 0 when no usable target is set.
///
/// Not clamped: eating twice the goal reports 200.
pub fn percent_of_target(value: f64, target: Option<f64>) -> i64 {
    match target {
        Some(target) if target != 0.0 && target.is_finite() => {
            round_half_up(value / target * 100.0)
        }
        _ => 0,
    }
}

/// Protein/fat/carbs in grams. Calories are always derived, never carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Macros {
    pub fn new(protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            protein,
            fat,
            carbs,
        }
    }

    pub fn calories(&self) -> i64 {
        calories_from_macros(self.protein, self.fat, self.carbs)
    }

    /// Treats `self` as a per-100 g density and scales it to `grams`.
    pub fn scaled(&self, grams: f64) -> Macros {
        Macros {
            protein: scale_by_grams(self.protein, grams),
            fat: scale_by_grams(self.fat, grams),
            carbs: scale_by_grams(self.carbs, grams),
        }
    }

    pub fn to_totals(self) -> Totals {
        Totals {
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            calories: self.calories(),
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

/// Summed nutrients for a note, a day, a recipe or a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub calories: i64,
}

impl Totals {
    pub fn macros(&self) -> Macros {
        Macros::new(self.protein, self.fat, self.carbs)
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Totals) {
        self.protein += rhs.protein;
        self.fat += rhs.fat;
        self.carbs += rhs.carbs;
        self.calories += rhs.calories;
    }
}

/// Anything that contributes a set of totals to a sum.
pub trait HasTotals {
    fn totals(&self) -> Totals;
}

impl HasTotals for Totals {
    fn totals(&self) -> Totals {
        *self
    }
}

/// Field-wise sum of every entry; empty input sums to zero.
///
/// Day, note, recipe and week totals all use this one routine.
pub fn aggregate<'a, T, I>(items: I) -> Totals
where
    T: HasTotals + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().fold(Totals::default(), |mut acc, item| {
        acc += item.totals();
        acc
    })
}

/// Per-day averages over a fixed-length window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageTotals {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub calories: f64,
}

impl AverageTotals {
    pub fn over(totals: Totals, days: u32) -> Self {
        if days == 0 {
            return Self::default();
        }
        let days = f64::from(days);
        Self {
            protein: totals.protein / days,
            fat: totals.fat / days,
            carbs: totals.carbs / days,
            calories: totals.calories as f64 / days,
        }
    }
}
