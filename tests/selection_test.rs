//! Hangout form state machine: headcount changes reset the chosen activity,
//! bonus toggles recompute points, and the exclusive tag locks out the rest.

use vsa_points::models::catalog::EXCLUSIVE_TAG;
use vsa_points::models::scoring::ScoringError;
use vsa_points::models::selection::{ActivityChoice, HangoutForm, SelectionState};

fn cook_together() -> ActivityChoice {
    ActivityChoice::Tier { base_points: 10, activity: "Cook or bake together".to_string() }
}

fn crafts_night() -> ActivityChoice {
    ActivityChoice::Tier { base_points: 5, activity: "Arts & crafts night".to_string() }
}

#[test]
fn test_select_then_submit() {
    let mut form = HangoutForm::new(6);
    form.set_members_present(5).unwrap();
    let points = form.select_activity(cook_together()).unwrap();
    assert_eq!(points, 10.0);

    let submission = form.submit().unwrap();
    assert_eq!(submission.points, 10.0);
    assert_eq!(submission.choice, cook_together());
    assert_eq!(submission.input.members_present, 5);
    assert_eq!(submission.input.family_size, 6);
}

#[test]
fn test_submit_without_selection_fails() {
    let form = HangoutForm::new(4);
    assert_eq!(form.submit().unwrap_err(), ScoringError::SelectionRequired);
}

#[test]
fn test_headcount_change_requires_reselection() {
    let mut form = HangoutForm::new(6);
    form.set_members_present(5).unwrap();
    form.select_activity(cook_together()).unwrap();

    form.set_members_present(3).unwrap();
    assert_eq!(form.state(), &SelectionState::Selecting);
    assert_eq!(form.points(), None);
    assert_eq!(form.submit().unwrap_err(), ScoringError::SelectionRequired);

    // reselecting scores against the new headcount
    form.toggle_bonus_tag(EXCLUSIVE_TAG).unwrap();
    assert_eq!(form.select_activity(cook_together()).unwrap(), 7.0);
}

#[test]
fn test_bonus_toggle_recomputes_selected_points() {
    let mut form = HangoutForm::new(0);
    form.set_members_present(4).unwrap();
    form.select_activity(crafts_night()).unwrap();
    assert_eq!(form.points(), Some(5.0));

    form.toggle_bonus_tag("Birthday celebration").unwrap();
    assert_eq!(form.points(), Some(6.0));
    form.toggle_bonus_tag("Grad photos together").unwrap();
    assert_eq!(form.points(), Some(7.0));
    form.toggle_bonus_tag("Birthday celebration").unwrap();
    assert_eq!(form.points(), Some(6.0));
}

#[test]
fn test_bonus_toggle_keeps_selection_when_selecting() {
    let mut form = HangoutForm::new(0);
    form.toggle_bonus_tag("Birthday celebration").unwrap();
    assert_eq!(form.state(), &SelectionState::Selecting);
    assert!(form.bonus_tags().contains("Birthday celebration"));
}

#[test]
fn test_exclusive_tag_clears_and_blocks_others() {
    let mut form = HangoutForm::new(0);
    form.set_members_present(4).unwrap();
    form.toggle_bonus_tag("Birthday celebration").unwrap();
    form.toggle_bonus_tag("Homemade food").unwrap();

    form.toggle_bonus_tag(EXCLUSIVE_TAG).unwrap();
    assert_eq!(form.bonus_tags().len(), 1);
    assert!(form.bonus_tags().contains(EXCLUSIVE_TAG));

    // ignored while the exclusive tag is chosen
    form.toggle_bonus_tag("Performance/competition").unwrap();
    assert_eq!(form.bonus_tags().len(), 1);

    assert_eq!(form.select_activity(crafts_night()).unwrap(), 8.0);

    // dropping it frees the other tags again
    form.toggle_bonus_tag(EXCLUSIVE_TAG).unwrap();
    assert!(form.bonus_tags().is_empty());
    assert_eq!(form.points(), Some(5.0));
    form.toggle_bonus_tag("Performance/competition").unwrap();
    assert_eq!(form.points(), Some(6.0));
}

#[test]
fn test_unknown_bonus_tag_is_rejected() {
    let mut form = HangoutForm::new(0);
    let err = form.toggle_bonus_tag("Sleepover").unwrap_err();
    assert!(matches!(err, ScoringError::InvalidInput(_)));
    assert!(form.bonus_tags().is_empty());
}

#[test]
fn test_custom_activity_is_scored_like_a_tier() {
    let mut form = HangoutForm::new(0);
    form.set_members_present(6).unwrap();
    let custom = ActivityChoice::Custom { base_points: 12, label: "Tet festival booth".to_string() };
    assert_eq!(form.select_activity(custom).unwrap(), 12.0);

    let out_of_range = ActivityChoice::Custom { base_points: 14, label: "Too much".to_string() };
    assert!(form.select_activity(out_of_range).is_err());
    // a rejected choice leaves the previous one in place
    assert_eq!(form.points(), Some(12.0));
}

#[test]
fn test_two_attendees_override_in_form() {
    let mut form = HangoutForm::new(10);
    form.set_members_present(2).unwrap();
    form.toggle_bonus_tag(EXCLUSIVE_TAG).unwrap();
    let trip = ActivityChoice::Tier { base_points: 13, activity: "Overnight trip or retreat".to_string() };
    assert_eq!(form.select_activity(trip).unwrap(), 2.0);
}
