use serde::{Deserialize, Serialize};

use crate::models::scoring::Points;

/// A family with its running point totals.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Family {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub code: String,
    pub total_points: Points,
    pub semester_points: Points,
    pub member_count: i64,
    pub created_at: String,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FamilyStanding {
    pub family_id: i64,
    pub name: String,
    pub points: Points,
    pub member_count: i64,
}

/// Which total a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    #[default]
    AllTime,
    Semester,
    Month,
}

impl TimeFrame {
    pub fn parse(value: &str) -> Option<TimeFrame> {
        match value {
            "all_time" => Some(TimeFrame::AllTime),
            "semester" => Some(TimeFrame::Semester),
            "month" => Some(TimeFrame::Month),
            _ => None,
        }
    }
}

pub struct NewFamily {
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_frame_parses_query_values() {
        assert_eq!(TimeFrame::parse("all_time"), Some(TimeFrame::AllTime));
        assert_eq!(TimeFrame::parse("semester"), Some(TimeFrame::Semester));
        assert_eq!(TimeFrame::parse("month"), Some(TimeFrame::Month));
        assert_eq!(TimeFrame::parse("week"), None);
        assert_eq!(TimeFrame::default(), TimeFrame::AllTime);
    }
}
