//! Hangout scoring rules: attendance overrides, family-size halving, bonus caps.

use vsa_points::models::catalog::{self, BONUS_TAGS, EXCLUSIVE_TAG};
use vsa_points::models::scoring::{
    bonus_extra, compute_base_points, compute_final_points, ScoringError, ScoringInput,
};

const TIERS: [u8; 6] = [2, 3, 5, 7, 10, 13];

fn scored(base: u8, present: u32, family: u32, tags: &[&str]) -> f64 {
    let input = ScoringInput::new(base, present, family, tags.iter().copied()).expect("valid input");
    compute_final_points(&input)
}

fn ordinary_tags() -> Vec<&'static str> {
    BONUS_TAGS.iter().filter(|t| !t.is_exclusive()).map(|t| t.label).collect()
}

// ---------------------------------------------------------------------------
// Attendance overrides
// ---------------------------------------------------------------------------

#[test]
fn test_two_attendees_always_score_two() {
    for base in TIERS {
        assert_eq!(scored(base, 2, 0, &[]), 2.0, "base {base}");
        assert_eq!(scored(base, 2, 12, &[]), 2.0, "base {base} with family");
        assert_eq!(scored(base, 2, 0, &[EXCLUSIVE_TAG]), 2.0, "base {base} with bonus");
    }
}

#[test]
fn test_mid_tiers_need_three_attendees() {
    let ordinary = ordinary_tags();
    for base in 3..=7u8 {
        for present in [1, 2] {
            assert_eq!(scored(base, present, 0, &[]), 2.0);
            assert_eq!(scored(base, present, 10, &ordinary[..3]), 2.0);
            assert_eq!(scored(base, present, 4, &[EXCLUSIVE_TAG]), 2.0);
        }
    }
}

#[test]
fn test_large_tier_single_attendee_floor() {
    assert_eq!(scored(13, 1, 0, &[]), 2.0);
    assert_eq!(scored(13, 1, 8, &[]), 2.0);
    assert_eq!(scored(13, 1, 0, &[EXCLUSIVE_TAG]), 2.0);
    assert_eq!(scored(10, 1, 3, &["Birthday celebration", "Grad photos together"]), 2.0);
}

#[test]
fn test_large_tier_three_attendees_capped_at_seven_with_bonus() {
    // 10 + 3 = 13, clamped to 7
    assert_eq!(scored(10, 3, 6, &[EXCLUSIVE_TAG]), 7.0);
    assert_eq!(scored(13, 3, 0, &["Birthday celebration"]), 7.0);
    // without bonuses the base passes through
    assert_eq!(scored(10, 3, 6, &[]), 10.0);
}

#[test]
fn test_large_tier_four_or_more_keeps_bonus() {
    assert_eq!(scored(13, 4, 0, &[]), 13.0);
    assert_eq!(scored(13, 4, 0, &[EXCLUSIVE_TAG]), 16.0);
    assert_eq!(scored(10, 6, 8, &["Birthday celebration", "Performance/competition"]), 12.0);
}

// ---------------------------------------------------------------------------
// Family-size halving
// ---------------------------------------------------------------------------

#[test]
fn test_under_half_attendance_halves_fractionally() {
    // 4 < ceil(10 / 2) = 5, so 5 halves to 2.5; two tags add 2
    let ordinary = ordinary_tags();
    assert_eq!(scored(5, 4, 10, &ordinary[..2]), 4.5);
    assert_eq!(scored(3, 3, 8, &[]), 1.5);
}

#[test]
fn test_unknown_family_size_never_halves() {
    assert_eq!(scored(13, 4, 0, &[]), 13.0);
    assert_eq!(scored(7, 3, 0, &[]), 7.0);
}

#[test]
fn test_exactly_half_is_not_halved() {
    assert_eq!(scored(7, 3, 6, &[]), 7.0);
    assert_eq!(scored(7, 3, 5, &[]), 7.0);
    assert_eq!(scored(7, 3, 7, &[]), 3.5);
}

#[test]
fn test_base_points_schedule_is_reachable_directly() {
    assert_eq!(compute_base_points(3, 2, 0), 1.0);
    assert_eq!(compute_base_points(7, 2, 0), 2.0);
    assert_eq!(compute_base_points(10, 2, 0), 3.0);
    assert_eq!(compute_base_points(13, 2, 20), 4.0);
    assert_eq!(compute_base_points(11, 2, 0), 1.0);
}

// ---------------------------------------------------------------------------
// Bonus tags
// ---------------------------------------------------------------------------

#[test]
fn test_ordinary_bonus_never_exceeds_three() {
    let ordinary = ordinary_tags();
    for n in 3..=ordinary.len() {
        let input = ScoringInput::new(2, 5, 0, ordinary[..n].iter().copied()).unwrap();
        assert_eq!(bonus_extra(&input.bonus_tags), 3.0);
        assert_eq!(compute_final_points(&input), 5.0);
    }
}

#[test]
fn test_exclusive_tag_contributes_exactly_three() {
    let mut tags = ordinary_tags();
    tags.push(EXCLUSIVE_TAG);
    let input = ScoringInput::new(5, 4, 0, tags).unwrap();
    assert_eq!(bonus_extra(&input.bonus_tags), 3.0);
    assert_eq!(compute_final_points(&input), 8.0);
}

#[test]
fn test_tag_order_and_duplicates_do_not_matter() {
    let a = scored(7, 5, 0, &["Birthday celebration", "Grad photos together"]);
    let b = scored(7, 5, 0, &["Grad photos together", "Birthday celebration", "Birthday celebration"]);
    assert_eq!(a, b);
    assert_eq!(a, 9.0);
}

#[test]
fn test_result_never_exceeds_base_plus_three() {
    let mut all_tags: Vec<&str> = BONUS_TAGS.iter().map(|t| t.label).collect();
    all_tags.sort();
    for base in catalog::CUSTOM_MIN_POINTS..=catalog::CUSTOM_MAX_POINTS {
        for present in 1..=9 {
            for family in [0, 1, 4, 9, 20] {
                for tags in [&all_tags[..0], &all_tags[..1], &all_tags[..]] {
                    let points = scored(base, present, family, tags);
                    assert!(points >= 0.0);
                    assert!(points <= f64::from(base) + 3.0, "{base}/{present}/{family} -> {points}");
                }
            }
        }
    }
}

#[test]
fn test_computation_is_repeatable() {
    let input = ScoringInput::new(10, 5, 12, ["Birthday celebration", "Homemade food"]).unwrap();
    let first = compute_final_points(&input);
    let second = compute_final_points(&input);
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Input checks
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_inputs_are_rejected() {
    let no_tags: [&str; 0] = [];
    assert!(matches!(ScoringInput::new(0, 3, 0, no_tags), Err(ScoringError::InvalidInput(_))));
    assert!(matches!(ScoringInput::new(14, 3, 0, no_tags), Err(ScoringError::InvalidInput(_))));
    assert!(matches!(ScoringInput::new(5, 0, 0, no_tags), Err(ScoringError::InvalidInput(_))));
    assert!(matches!(ScoringInput::new(5, 3, 0, ["Sleepover"]), Err(ScoringError::InvalidInput(_))));
}

#[test]
fn test_catalog_lookup_for_tiers_and_custom() {
    for base in TIERS {
        assert!(catalog::activity_tier_for(base).is_some());
    }
    assert!(catalog::activity_tier_for(4).is_none());
    assert!(catalog::activity_tier_for(12).is_none());
}
