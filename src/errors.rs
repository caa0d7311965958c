use thiserror::Error;

/// Input rejected before it reaches the store.
///
/// These mirror the blocking prompts the UI shows ("add at least one item", ...):
/// nothing is written when one of them is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("a recipe needs at least one ingredient")]
    NoIngredients,

    #[error("a meal note needs at least one item")]
    NoItems,

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("grams must be greater than zero, got {0}")]
    NonPositiveGrams(f64),

    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("'{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("no {kind} with id '{id}'")]
    UnknownId { kind: &'static str, id: String },

    #[error("nothing has been copied")]
    EmptyClipboard,

    #[error("select at least one date to paste onto")]
    NoPasteTargets,
}

impl ValidationError {
    pub(crate) fn unknown(kind: &'static str, id: &str) -> Self {
        ValidationError::UnknownId {
            kind,
            id: id.to_string(),
        }
    }
}

/// Rejects negative or non-finite macro amounts.
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeAmount { field, value })
    }
}

pub(crate) fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyName { field })
    } else {
        Ok(())
    }
}
