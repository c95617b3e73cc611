//! Submission-side state for a hangout post form.
//!
//! The form holds the headcount, bonus tags and chosen activity, and keeps
//! the computed points in sync:
//!
//! ```text
//! Selecting --select_activity--> Selected
//! Selected  --set_members_present(changed)--> Selecting
//! Selected  --toggle_bonus_tag--> Selected (points recomputed)
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::catalog::{self, EXCLUSIVE_TAG};
use crate::models::scoring::{compute_final_points, Points, ScoringError, ScoringInput};

/// Headcount input is a single digit.
pub const MAX_MEMBERS_PRESENT: u32 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityChoice {
    Tier { base_points: u8, activity: String },
    Custom { base_points: u8, label: String },
}

impl ActivityChoice {
    pub fn base_points(&self) -> u8 {
        match self {
            ActivityChoice::Tier { base_points, .. } | ActivityChoice::Custom { base_points, .. } => {
                *base_points
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActivityChoice::Tier { activity, .. } => activity,
            ActivityChoice::Custom { label, .. } => label,
        }
    }

    /// Check the choice against the catalog.
    pub fn validate(&self) -> Result<(), ScoringError> {
        match self {
            ActivityChoice::Tier { base_points, activity } => {
                let tier = catalog::activity_tier_for(*base_points).ok_or_else(|| {
                    ScoringError::InvalidInput(format!("no activity tier worth {base_points} points"))
                })?;
                if !tier.activities.contains(&activity.as_str()) {
                    return Err(ScoringError::InvalidInput(format!(
                        "'{activity}' is not a {base_points}-point activity"
                    )));
                }
                Ok(())
            }
            ActivityChoice::Custom { base_points, label } => {
                if !catalog::is_valid_custom_points(*base_points) {
                    return Err(ScoringError::InvalidInput(format!(
                        "custom activities must be worth {} to {} points",
                        catalog::CUSTOM_MIN_POINTS,
                        catalog::CUSTOM_MAX_POINTS
                    )));
                }
                if label.trim().is_empty() {
                    return Err(ScoringError::InvalidInput(
                        "custom activities need a description".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Selecting,
    Selected { choice: ActivityChoice, points: Points },
}

/// What a completed form hands to the post-creation flow.
#[derive(Debug, Clone, PartialEq)]
pub struct HangoutSubmission {
    pub choice: ActivityChoice,
    pub input: ScoringInput,
    pub points: Points,
}

#[derive(Debug, Clone)]
pub struct HangoutForm {
    family_size: u32,
    members_present: u32,
    bonus_tags: BTreeSet<String>,
    state: SelectionState,
}

impl HangoutForm {
    pub fn new(family_size: u32) -> Self {
        HangoutForm {
            family_size,
            members_present: 1,
            bonus_tags: BTreeSet::new(),
            state: SelectionState::Selecting,
        }
    }

    pub fn members_present(&self) -> u32 {
        self.members_present
    }

    pub fn bonus_tags(&self) -> &BTreeSet<String> {
        &self.bonus_tags
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn points(&self) -> Option<Points> {
        match &self.state {
            SelectionState::Selected { points, .. } => Some(*points),
            SelectionState::Selecting => None,
        }
    }

    /// Update the headcount. A different value clears the chosen activity.
    pub fn set_members_present(&mut self, members_present: u32) -> Result<(), ScoringError> {
        if !(1..=MAX_MEMBERS_PRESENT).contains(&members_present) {
            return Err(ScoringError::InvalidInput(format!(
                "members present must be between 1 and {MAX_MEMBERS_PRESENT}"
            )));
        }
        if members_present != self.members_present {
            self.members_present = members_present;
            self.state = SelectionState::Selecting;
        }
        Ok(())
    }

    pub fn select_activity(&mut self, choice: ActivityChoice) -> Result<Points, ScoringError> {
        choice.validate()?;
        let points = compute_final_points(&self.scoring_input(choice.base_points()));
        self.state = SelectionState::Selected { choice, points };
        Ok(points)
    }

    /// Toggle a bonus tag on or off.
    ///
    /// Choosing the exclusive tag drops every other tag, and ordinary tags
    /// are ignored while it stays chosen.
    pub fn toggle_bonus_tag(&mut self, label: &str) -> Result<(), ScoringError> {
        if catalog::bonus_tag(label).is_none() {
            return Err(ScoringError::InvalidInput(format!("unknown bonus tag '{label}'")));
        }

        if self.bonus_tags.remove(label) {
            // deselected
        } else if label == EXCLUSIVE_TAG {
            self.bonus_tags.clear();
            self.bonus_tags.insert(label.to_string());
        } else if !self.bonus_tags.contains(EXCLUSIVE_TAG) {
            self.bonus_tags.insert(label.to_string());
        }

        self.recompute();
        Ok(())
    }

    pub fn submit(&self) -> Result<HangoutSubmission, ScoringError> {
        match &self.state {
            SelectionState::Selecting => Err(ScoringError::SelectionRequired),
            SelectionState::Selected { choice, points } => Ok(HangoutSubmission {
                choice: choice.clone(),
                input: self.scoring_input(choice.base_points()),
                points: *points,
            }),
        }
    }

    fn scoring_input(&self, base_points: u8) -> ScoringInput {
        ScoringInput {
            base_points,
            members_present: self.members_present,
            family_size: self.family_size,
            bonus_tags: self.bonus_tags.clone(),
        }
    }

    fn recompute(&mut self) {
        if let SelectionState::Selected { choice, .. } = &self.state {
            let choice = choice.clone();
            let points = compute_final_points(&self.scoring_input(choice.base_points()));
            self.state = SelectionState::Selected { choice, points };
        }
    }
}
