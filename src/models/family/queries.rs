use rand::Rng;
use sqlx::{PgPool, Postgres};

use super::types::{Family, FamilyStanding, NewFamily, TimeFrame};
use crate::errors::AppError;
use crate::models::scoring::Points;

const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;
const CODE_ATTEMPTS: usize = 5;

pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

const SELECT_FAMILY: &str = "\
    SELECT f.id, f.name, f.description, f.code, f.total_points, f.semester_points, \
           (SELECT COUNT(*) FROM family_members m WHERE m.family_id = f.id) AS member_count, \
           f.created_at::TEXT AS created_at \
    FROM families f";

/// Random 6-character join code, uppercase letters and digits.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}

/// Create a family and enrol its creator. Retries the join code on collision.
pub async fn create(pool: &PgPool, new: &NewFamily, creator_id: i64) -> Result<Family, AppError> {
    for _ in 0..CODE_ATTEMPTS {
        let code = generate_code(&mut rand::rng());
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO families (name, description, code) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new.name.trim())
        .bind(new.description.trim())
        .bind(&code)
        .fetch_one(&mut *tx)
        .await;

        let family_id = match inserted {
            Ok((id,)) => id,
            Err(e) if violates(&e, "families_code_key") => {
                log::warn!("Join code collision on {code}, retrying");
                continue;
            }
            Err(e) if violates(&e, "families_name_key") => {
                return Err(AppError::Conflict(format!(
                    "A family named '{}' already exists",
                    new.name.trim()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        insert_member(&mut tx, family_id, creator_id).await?;
        tx.commit().await?;

        log::info!("Created family {family_id} with code {code}");
        return find_by_id(pool, family_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Family".to_string()));
    }

    Err(AppError::Conflict("Could not allocate a unique join code".to_string()))
}

async fn insert_member(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    family_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO family_members (family_id, user_id) VALUES ($1, $2) \
         ON CONFLICT (family_id, user_id) DO NOTHING",
    )
    .bind(family_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if violates(&e, "family_members_user_id_key") {
            AppError::Conflict("User already belongs to a family".to_string())
        } else {
            e.into()
        }
    })?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Family>, sqlx::Error> {
    sqlx::query_as::<_, Family>(&format!("{SELECT_FAMILY} WHERE f.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Codes are matched case-insensitively.
pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Family>, sqlx::Error> {
    sqlx::query_as::<_, Family>(&format!("{SELECT_FAMILY} WHERE f.code = $1"))
        .bind(code.trim().to_uppercase())
        .fetch_optional(pool)
        .await
}

/// Add a user to a family. Re-joining the same family is a no-op.
pub async fn add_member(pool: &PgPool, family_id: i64, user_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    insert_member(&mut tx, family_id, user_id).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn remove_member(pool: &PgPool, family_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM family_members WHERE family_id = $1 AND user_id = $2")
        .bind(family_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn is_member<'e, E>(executor: E, family_id: i64, user_id: i64) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM family_members WHERE family_id = $1 AND user_id = $2)",
    )
    .bind(family_id)
    .bind(user_id)
    .fetch_one(executor)
    .await?;
    Ok(row.0)
}

/// Current roster size. Zero for unknown families.
pub async fn member_count<'e, E>(executor: E, family_id: i64) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM family_members WHERE family_id = $1")
        .bind(family_id)
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

/// Atomically add to both the all-time and semester totals.
pub async fn add_points<'e, E>(executor: E, family_id: i64, points: Points) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        "UPDATE families \
         SET total_points = total_points + $2, semester_points = semester_points + $2 \
         WHERE id = $1",
    )
    .bind(family_id)
    .bind(points)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Atomically subtract from both totals, never going below zero. Returns how
/// much the all-time total actually dropped, or `None` for an unknown family.
pub async fn subtract_points<'e, E>(
    executor: E,
    family_id: i64,
    points: Points,
) -> Result<Option<Points>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row: Option<(Points,)> = sqlx::query_as(
        "WITH old AS (SELECT id, total_points FROM families WHERE id = $1 FOR UPDATE) \
         UPDATE families f \
         SET total_points = GREATEST(0, f.total_points - $2), \
             semester_points = GREATEST(0, f.semester_points - $2) \
         FROM old WHERE f.id = old.id \
         RETURNING old.total_points - f.total_points",
    )
    .bind(family_id)
    .bind(points)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(|(applied,)| applied))
}

/// Apply a signed change: positive adds, negative subtracts with the zero clamp.
/// Returns the signed change that actually landed on the all-time total.
pub async fn apply_delta<'e, E>(
    executor: E,
    family_id: i64,
    delta: Points,
) -> Result<Option<Points>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    if delta >= 0.0 {
        let found = add_points(executor, family_id, delta).await?;
        Ok(found.then_some(delta))
    } else {
        let applied = subtract_points(executor, family_id, -delta).await?;
        Ok(applied.map(|points| -points))
    }
}

/// Zero every family's semester total. Returns the number of families reset.
pub async fn reset_semester_points(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE families SET semester_points = 0 WHERE semester_points <> 0")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Families ranked by the chosen total, highest first. Ties break by name.
pub async fn leaderboard(
    pool: &PgPool,
    time_frame: TimeFrame,
    limit: i64,
) -> Result<Vec<FamilyStanding>, sqlx::Error> {
    let limit = limit.clamp(1, 100);
    let sql = match time_frame {
        TimeFrame::AllTime => {
            "SELECT f.id AS family_id, f.name, f.total_points AS points, \
                    (SELECT COUNT(*) FROM family_members m WHERE m.family_id = f.id) AS member_count \
             FROM families f \
             ORDER BY f.total_points DESC, f.name ASC \
             LIMIT $1"
        }
        TimeFrame::Semester => {
            "SELECT f.id AS family_id, f.name, f.semester_points AS points, \
                    (SELECT COUNT(*) FROM family_members m WHERE m.family_id = f.id) AS member_count \
             FROM families f \
             ORDER BY f.semester_points DESC, f.name ASC \
             LIMIT $1"
        }
        TimeFrame::Month => {
            "SELECT f.id AS family_id, f.name, \
                    COALESCE(SUM(h.points), 0)::DOUBLE PRECISION AS points, \
                    (SELECT COUNT(*) FROM family_members m WHERE m.family_id = f.id) AS member_count \
             FROM families f \
             LEFT JOIN points_history h \
                 ON h.family_id = f.id AND h.created_at >= date_trunc('month', now()) \
             GROUP BY f.id, f.name \
             ORDER BY points DESC, f.name ASC \
             LIMIT $1"
        }
    };

    sqlx::query_as::<_, FamilyStanding>(sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}
