use serde::{Deserialize, Serialize};

use crate::models::catalog::{ActivityTier, BonusTag};
use crate::models::scoring::Points;
use crate::models::selection::ActivityChoice;

/// API error body.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ApiErrorResponse { success: false, message: message.into() }
    }
}

/// Successful response wrapper: `{ "success": true, ...data }`.
#[derive(Serialize, Debug)]
pub struct ApiSuccess<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        ApiSuccess { success: true, data }
    }
}

/// Body of `POST /api/v1/points/compute`. Numbers are taken raw and
/// checked before scoring.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ComputePointsRequest {
    pub base_points: f64,
    pub members_present: i64,
    #[serde(default)]
    pub family_size: i64,
    #[serde(default)]
    pub bonus_tags: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct PointsBody {
    pub points: Points,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBody {
    pub tiers: &'static [ActivityTier],
    pub bonus_tags: &'static [BonusTag],
    pub exclusive_tag: &'static str,
    pub custom_min_points: u8,
    pub custom_max_points: u8,
}

#[derive(Deserialize, Debug)]
pub struct CreateFamilyRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct JoinFamilyRequest {
    pub code: String,
}

#[derive(Deserialize, Debug)]
pub struct LeaderboardQuery {
    pub time_frame: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Hangout details as entered on the form; points are computed server-side.
#[derive(Deserialize, Debug, Clone)]
pub struct HangoutRequest {
    pub activity: ActivityChoice,
    pub members_present: i64,
    #[serde(default)]
    pub bonus_tags: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreatePostRequest {
    pub family_id: i64,
    #[serde(rename = "type")]
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub hangout: Option<HangoutRequest>,
}

#[derive(Deserialize, Debug)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub hangout: Option<HangoutRequest>,
}
