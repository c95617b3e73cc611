use std::collections::BTreeSet;

use super::types::{Points, ScoringInput};
use crate::models::catalog::EXCLUSIVE_TAG;

const BONUS_CAP: u8 = 3;
const ATTENDANCE_FLOOR: Points = 2.0;
const LARGE_TIER_THREE_ATTENDEE_CAP: Points = 7.0;

fn is_mid_tier(base_points: u8) -> bool {
    (3..=7).contains(&base_points)
}

fn is_large_tier(base_points: u8) -> bool {
    (10..=13).contains(&base_points)
}

/// Base award before bonuses.
///
/// Two attendees follow a fixed small-group schedule that ignores family
/// size. Otherwise the base is halved when fewer than half the family's
/// roster attended; an unknown roster (`family_size == 0`) never halves.
pub fn compute_base_points(base_points: u8, members_present: u32, family_size: u32) -> Points {
    if members_present == 2 {
        return match base_points {
            1..=5 => 1.0,
            7 => 2.0,
            10 => 3.0,
            13 => 4.0,
            _ => 1.0,
        };
    }

    if family_size > 0 && members_present < family_size.div_ceil(2) {
        return Points::from(base_points) / 2.0;
    }

    Points::from(base_points)
}

/// Extra points from bonus tags: the exclusive tag is a flat 3, ordinary
/// tags are 1 each up to 3.
pub fn bonus_extra(bonus_tags: &BTreeSet<String>) -> Points {
    if bonus_tags.contains(EXCLUSIVE_TAG) {
        return Points::from(BONUS_CAP);
    }
    let count = bonus_tags.len().min(usize::from(BONUS_CAP));
    count as Points
}

/// Final point award for a hangout post.
///
/// Attendance overrides are checked first and win over any bonus. Never
/// fails; out-of-range values fall through to the plain rules.
pub fn compute_final_points(input: &ScoringInput) -> Points {
    let ScoringInput {
        base_points,
        members_present,
        family_size,
        ref bonus_tags,
    } = *input;

    if members_present == 2 {
        return ATTENDANCE_FLOOR;
    }
    if is_mid_tier(base_points) && members_present < 3 {
        return ATTENDANCE_FLOOR;
    }
    if is_large_tier(base_points) && members_present == 1 {
        return ATTENDANCE_FLOOR;
    }

    let base = compute_base_points(base_points, members_present, family_size);
    if bonus_tags.is_empty() {
        return base;
    }

    let total = base + bonus_extra(bonus_tags);
    if is_large_tier(base_points) && members_present == 3 {
        return total.min(LARGE_TIER_THREE_ATTENDEE_CAP);
    }
    total
}
