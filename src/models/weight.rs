use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One weigh-in. `weight` is in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub id: String,
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_starting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightInput {
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default)]
    pub is_starting: bool,
}

impl WeightInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.weight.is_finite() && self.weight > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::InvalidWeight(self.weight))
        }
    }
}

impl WeightEntry {
    pub fn from_input(id: String, input: WeightInput) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self {
            id,
            date: input.date,
            weight: input.weight,
            is_starting: input.is_starting,
        })
    }
}
