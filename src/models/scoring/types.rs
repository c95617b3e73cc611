use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::catalog;

/// Point values stay fractional: the under-half-attendance rule halves
/// without rounding.
pub type Points = f64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    InvalidInput(String),
    SelectionRequired,
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            ScoringError::SelectionRequired => {
                write!(f, "An activity must be selected before submitting")
            }
        }
    }
}

impl std::error::Error for ScoringError {}

/// Inputs for one hangout score computation.
///
/// Built per submission or per recomputation; only the resulting points
/// are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    pub base_points: u8,
    pub members_present: u32,
    pub family_size: u32,
    #[serde(default)]
    pub bonus_tags: BTreeSet<String>,
}

impl ScoringInput {
    /// Build a checked input. Duplicate tag labels collapse.
    pub fn new<I, S>(
        base_points: u8,
        members_present: u32,
        family_size: u32,
        bonus_tags: I,
    ) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input = ScoringInput {
            base_points,
            members_present,
            family_size,
            bonus_tags: bonus_tags.into_iter().map(Into::into).collect(),
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !catalog::is_valid_custom_points(self.base_points) {
            return Err(ScoringError::InvalidInput(format!(
                "base points must be between {} and {}, got {}",
                catalog::CUSTOM_MIN_POINTS,
                catalog::CUSTOM_MAX_POINTS,
                self.base_points
            )));
        }
        if self.members_present < 1 {
            return Err(ScoringError::InvalidInput(
                "at least one member must be present".to_string(),
            ));
        }
        if let Some(unknown) = self.bonus_tags.iter().find(|t| catalog::bonus_tag(t).is_none()) {
            return Err(ScoringError::InvalidInput(format!("unknown bonus tag '{unknown}'")));
        }
        Ok(())
    }

    pub fn has_exclusive_tag(&self) -> bool {
        self.bonus_tags.contains(catalog::EXCLUSIVE_TAG)
    }
}
