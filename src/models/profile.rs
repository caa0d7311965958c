use serde::{Deserialize, Serialize};

use crate::errors::{check_amount, ValidationError};
use crate::nutrition::calories_from_macros;

/// Daily targets. The calorie target is always derived from the three macro
/// targets; there is no way to set it on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredProfile")]
pub struct UserProfile {
    protein_target: f64,
    fat_target: f64,
    carbs_target: f64,
    calories_target: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    #[serde(default)]
    protein_target: f64,
    #[serde(default)]
    fat_target: f64,
    #[serde(default)]
    carbs_target: f64,
}

impl From<StoredProfile> for UserProfile {
    fn from(stored: StoredProfile) -> Self {
        // Whatever calorie target was on disk is ignored and re-derived.
        Self::derive(stored.protein_target, stored.fat_target, stored.carbs_target)
    }
}

impl UserProfile {
    pub fn new(protein_target: f64, fat_target: f64, carbs_target: f64) -> Result<Self, ValidationError> {
        check_amount("protein target", protein_target)?;
        check_amount("fat target", fat_target)?;
        check_amount("carbs target", carbs_target)?;
        Ok(Self::derive(protein_target, fat_target, carbs_target))
    }

    fn derive(protein_target: f64, fat_target: f64, carbs_target: f64) -> Self {
        Self {
            protein_target,
            fat_target,
            carbs_target,
            calories_target: calories_from_macros(protein_target, fat_target, carbs_target),
        }
    }

    pub fn protein_target(&self) -> f64 {
        self.protein_target
    }

    pub fn fat_target(&self) -> f64 {
        self.fat_target
    }

    pub fn carbs_target(&self) -> f64 {
        self.carbs_target
    }

    pub fn calories_target(&self) -> i64 {
        self.calories_target
    }

    pub fn has_targets(&self) -> bool {
        self.calories_target > 0
    }
}
