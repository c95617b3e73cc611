use sqlx::{PgPool, Postgres};

use super::types::{HangoutRecord, NewPost, Post, PostType, PostUpdate};
use crate::errors::AppError;
use crate::models::family;
use crate::models::points_history::{self, NewPointsEntry, PointsEntryKind};
use crate::models::scoring::Points;

const SELECT_POST: &str = "\
    SELECT id, author_id, family_id, post_type, title, content, point_value, \
           base_points, members_present, bonus_tags, activity, \
           created_at::TEXT AS created_at, updated_at::TEXT AS updated_at \
    FROM posts";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Post>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Posts for one family, newest first.
pub async fn find_for_family(pool: &PgPool, family_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "{SELECT_POST} WHERE family_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(family_id)
    .fetch_all(pool)
    .await
}

/// All announcements, newest first.
pub async fn find_announcements(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "{SELECT_POST} WHERE post_type = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(PostType::Announcement.as_str())
    .fetch_all(pool)
    .await
}

/// Posts from the user's own family, newest first. Empty when the user has no family.
pub async fn find_feed_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "{SELECT_POST} \
         WHERE family_id = (SELECT family_id FROM family_members WHERE user_id = $1) \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Write a signed change to the family totals and the ledger. The ledger gets
/// the amount the totals actually moved, which is smaller than `delta` when a
/// debit hits the zero clamp.
async fn apply_family_delta(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    post: (i64, i64, i64),
    delta: Points,
    description: &str,
) -> Result<(), AppError> {
    let (post_id, family_id, user_id) = post;
    let delta = family::apply_delta(&mut **tx, family_id, delta)
        .await?
        .ok_or_else(|| AppError::NotFound("Family".to_string()))?;
    if delta == 0.0 {
        return Ok(());
    }
    points_history::record(
        &mut **tx,
        &NewPointsEntry {
            family_id,
            user_id,
            post_id: Some(post_id),
            points: delta,
            kind: PointsEntryKind::HangoutAttendance,
            description,
        },
    )
    .await?;
    log::info!("Family {family_id} points changed by {delta} ({description})");
    Ok(())
}

/// Insert a post. A scored hangout credits its family in the same transaction.
pub async fn create(pool: &PgPool, new: &NewPost) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    let empty = Vec::new();
    let (activity, base_points, members_present, bonus_tags) = match &new.hangout {
        Some(h) => (
            Some(h.activity.as_str()),
            Some(i16::from(h.base_points)),
            Some(h.members_present as i32),
            &h.bonus_tags,
        ),
        None => (None, None, None, &empty),
    };
    let point_value = new.point_value();

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO posts \
            (author_id, family_id, post_type, title, content, point_value, \
             base_points, members_present, bonus_tags, activity) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(new.author_id)
    .bind(new.family_id)
    .bind(new.post_type.as_str())
    .bind(new.title.trim())
    .bind(new.content.trim())
    .bind(point_value)
    .bind(base_points)
    .bind(members_present)
    .bind(bonus_tags)
    .bind(activity)
    .fetch_one(&mut *tx)
    .await?;

    if new.post_type == PostType::Hangout && point_value > 0.0 {
        apply_family_delta(
            &mut tx,
            (id, new.family_id, new.author_id),
            point_value,
            &format!("Hangout post {id} created"),
        )
        .await?;
    }

    let post = find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;
    tx.commit().await?;
    Ok(post)
}

/// Rewrite a post. A changed hangout score moves the family totals by the difference.
pub async fn update(pool: &PgPool, id: i64, changes: &PostUpdate) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE id = $1 FOR UPDATE"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;

    sqlx::query(
        "UPDATE posts SET title = $2, content = $3, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(changes.title.trim())
    .bind(changes.content.trim())
    .execute(&mut *tx)
    .await?;

    if let Some(HangoutRecord { activity, base_points, members_present, bonus_tags, point_value }) =
        &changes.hangout
    {
        if !existing.is_hangout() {
            return Err(AppError::Validation("Only hangout posts carry points".to_string()));
        }

        sqlx::query(
            "UPDATE posts SET point_value = $2, base_points = $3, members_present = $4, \
                              bonus_tags = $5, activity = $6 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(point_value)
        .bind(i16::from(*base_points))
        .bind(*members_present as i32)
        .bind(bonus_tags)
        .bind(activity)
        .execute(&mut *tx)
        .await?;

        let delta = point_value - existing.point_value;
        if delta != 0.0 {
            apply_family_delta(
                &mut tx,
                (id, existing.family_id, existing.author_id),
                delta,
                &format!("Hangout post {id} edited"),
            )
            .await?;
        }
    }

    let post = find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;
    tx.commit().await?;
    Ok(post)
}

/// Delete a post, taking back any hangout points. Returns the deleted post.
pub async fn delete(pool: &PgPool, id: i64) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE id = $1 FOR UPDATE"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;

    if existing.is_hangout() && existing.point_value > 0.0 {
        apply_family_delta(
            &mut tx,
            (id, existing.family_id, existing.author_id),
            -existing.point_value,
            &format!("Hangout post {id} deleted"),
        )
        .await?;
    }

    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(existing)
}
