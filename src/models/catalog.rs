//! Static reference data for hangout scoring: activity tiers and bonus tags.
//!
//! Tiers are keyed by their base point value. Anything outside the six fixed
//! values is a custom entry, which the submitter scores by hand within
//! [`CUSTOM_MIN_POINTS`]..=[`CUSTOM_MAX_POINTS`].

use serde::Serialize;

/// A fixed base-point level with example activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityTier {
    pub base_points: u8,
    pub activities: &'static [&'static str],
}

/// An optional modifier selected at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusTag {
    pub label: &'static str,
    pub weight: u8,
}

impl BonusTag {
    pub fn is_exclusive(&self) -> bool {
        self.label == EXCLUSIVE_TAG
    }
}

pub const CUSTOM_MIN_POINTS: u8 = 1;
pub const CUSTOM_MAX_POINTS: u8 = 13;

/// The one tag that contributes a flat +3 and cannot stack with others.
pub const EXCLUSIVE_TAG: &str = "Viet-themed";

pub const ACTIVITY_TIERS: &[ActivityTier] = &[
    ActivityTier {
        base_points: 2,
        activities: &[
            "Dining hall meal",
            "Dorm/apartment hangout",
            "Anh/Chị–Em coffee or hangout",
            "Lawns/Steps hangout",
            "Study Session",
            "Workout Together",
            "Cafe Hang-Out (On campus: Joes, Cafe East, Lizs, etc.)",
        ],
    },
    ActivityTier {
        base_points: 3,
        activities: &[
            "Attend VSA Event together (GBM, mixers)",
            "Group study session",
            "Attend another Columbia org event",
            "Volunteer/tabling on campus",
            "Workshop/Performance",
            "Movie Night",
        ],
    },
    ActivityTier {
        base_points: 5,
        activities: &[
            "Game night (Hex & Co)",
            "Movie Theaters / Outdoor Movie Theaters",
            "Arts & crafts night",
            "Farmers market / neighborhood stroll",
            "Grocery run together (with shared activity)",
            "Cafe Hang-Out (Off campus)",
        ],
    },
    ActivityTier {
        base_points: 7,
        activities: &[
            "Dinner/dessert downtown (Chinatown, K-town, etc.)",
            "Museum visit (Met/MoMA/AMNH)",
            "Picnic (Central Park/Roosevelt/Riverside)",
            "Karaoke night (booked room)",
            "NYC festival or night market",
            "Neighborhood explore (SoHo, DUMBO, Flushing)",
            "Go to New Jersey",
        ],
    },
    ActivityTier {
        base_points: 10,
        activities: &[
            "Cook or bake together",
            "Attend WEAI/EALAC/Cô Chung events",
            "Vietnam Consulate Tết Party",
            "Perform/MC/organize a cultural show",
            "Charity/volunteering together",
            "Plan & host a VSA family event",
            "Host Vietnamese dinner/potluck",
        ],
    },
    ActivityTier {
        base_points: 13,
        activities: &[
            "Upstate / Rockaway / Bear Mountain day trip",
            "Out-of-state trip (excl. NJ)",
            "Apple/pumpkin picking",
            "Beach day or amusement park",
            "Concert / festival / Broadway",
            "Overnight trip or retreat",
        ],
    },
];

pub const BONUS_TAGS: &[BonusTag] = &[
    BonusTag { label: "Birthday celebration", weight: 1 },
    BonusTag { label: "Homemade food", weight: 1 },
    BonusTag { label: "Cultural holiday (Tết/Mid-Autumn)", weight: 1 },
    BonusTag { label: "Grad photos together", weight: 1 },
    BonusTag { label: "Performance/competition", weight: 1 },
    BonusTag { label: "Unique event (eclipse/art show)", weight: 1 },
    BonusTag { label: EXCLUSIVE_TAG, weight: 3 },
];

/// Look up the tier for a base point value. `None` means a custom entry.
pub fn activity_tier_for(base_points: u8) -> Option<&'static ActivityTier> {
    ACTIVITY_TIERS.iter().find(|t| t.base_points == base_points)
}

/// Look up a bonus tag by its exact label.
pub fn bonus_tag(label: &str) -> Option<&'static BonusTag> {
    BONUS_TAGS.iter().find(|t| t.label == label)
}

pub fn is_valid_custom_points(base_points: u8) -> bool {
    (CUSTOM_MIN_POINTS..=CUSTOM_MAX_POINTS).contains(&base_points)
}
