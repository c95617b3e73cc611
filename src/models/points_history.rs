//! Append-only ledger of changes to family point totals.

use serde::Serialize;
use sqlx::{PgPool, Postgres};

use crate::models::scoring::Points;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsEntryKind {
    HangoutAttendance,
    EventParticipation,
    ManualAdjustment,
}

impl PointsEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointsEntryKind::HangoutAttendance => "hangout_attendance",
            PointsEntryKind::EventParticipation => "event_participation",
            PointsEntryKind::ManualAdjustment => "manual_adjustment",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PointsEntry {
    pub id: i64,
    pub family_id: i64,
    pub user_id: i64,
    pub post_id: Option<i64>,
    pub points: Points,
    pub kind: String,
    pub description: String,
    pub created_at: String,
}

pub struct NewPointsEntry<'a> {
    pub family_id: i64,
    pub user_id: i64,
    pub post_id: Option<i64>,
    pub points: Points,
    pub kind: PointsEntryKind,
    pub description: &'a str,
}

pub async fn record<'e, E>(executor: E, entry: &NewPointsEntry<'_>) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO points_history (family_id, user_id, post_id, points, kind, description) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(entry.family_id)
    .bind(entry.user_id)
    .bind(entry.post_id)
    .bind(entry.points)
    .bind(entry.kind.as_str())
    .bind(entry.description)
    .fetch_one(executor)
    .await?;
    Ok(row.0)
}

/// Most recent entries for a family, newest first.
pub async fn find_for_family(
    pool: &PgPool,
    family_id: i64,
    limit: i64,
) -> Result<Vec<PointsEntry>, sqlx::Error> {
    sqlx::query_as::<_, PointsEntry>(
        "SELECT id, family_id, user_id, post_id, points, kind, description, \
                created_at::TEXT AS created_at \
         FROM points_history \
         WHERE family_id = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(family_id)
    .bind(limit.clamp(1, 100))
    .fetch_all(pool)
    .await
}
