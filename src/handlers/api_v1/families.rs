use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::api_types::{CreateFamilyRequest, HistoryQuery, JoinFamilyRequest, LeaderboardQuery};
use crate::auth::identity::Caller;
use crate::errors::AppError;
use crate::models::family::{self, NewFamily, TimeFrame};
use crate::models::{points_history, post};
use crate::validate;

const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// GET /api/v1/families/leaderboard - Families ranked by points.
/// Query params: time_frame (all_time | semester | month, default all_time), limit (default 10).
pub async fn leaderboard(
    pool: web::Data<PgPool>,
    _caller: Caller,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    let time_frame = match query.time_frame.as_deref() {
        None => TimeFrame::default(),
        Some(raw) => TimeFrame::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("time_frame must be all_time, semester or month, got '{raw}'"))
        })?,
    };
    let limit = query.limit.unwrap_or(family::DEFAULT_LEADERBOARD_LIMIT);

    let standings = family::leaderboard(&pool, time_frame, limit).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "time_frame": time_frame,
        "families": standings,
    })))
}

/// POST /api/v1/families - Create a family; the caller becomes its first member.
pub async fn create(
    pool: web::Data<PgPool>,
    caller: Caller,
    body: web::Json<CreateFamilyRequest>,
) -> Result<HttpResponse, AppError> {
    if let Some(msg) = validate::validate_required(&body.name, "Name", validate::FAMILY_NAME_MAX_LEN)
        .or_else(|| validate::validate_optional(&body.description, "Description", validate::DESCRIPTION_MAX_LEN))
    {
        return Err(AppError::Validation(msg));
    }

    let new = NewFamily {
        name: body.name.clone(),
        description: body.description.clone(),
    };
    let created = family::create(&pool, &new, caller.user_id).await?;
    Ok(HttpResponse::Created().json(json!({ "success": true, "family": created })))
}

/// POST /api/v1/families/join - Join a family by its code.
pub async fn join(
    pool: web::Data<PgPool>,
    caller: Caller,
    body: web::Json<JoinFamilyRequest>,
) -> Result<HttpResponse, AppError> {
    if let Some(msg) = validate::validate_join_code(&body.code) {
        return Err(AppError::Validation(msg));
    }

    let found = family::find_by_code(&pool, &body.code)
        .await?
        .ok_or_else(|| AppError::NotFound("Family".to_string()))?;
    family::add_member(&pool, found.id, caller.user_id).await?;
    log::info!("User {} joined family {}", caller.user_id, found.id);

    let refreshed = family::find_by_id(&pool, found.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Family".to_string()))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "family": refreshed })))
}

/// GET /api/v1/families/{id} - Family detail with member count.
pub async fn detail(
    pool: web::Data<PgPool>,
    _caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let found = family::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Family".to_string()))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "family": found })))
}

/// GET /api/v1/families/{id}/posts - Family posts, newest first.
pub async fn posts(
    pool: web::Data<PgPool>,
    _caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let family_id = path.into_inner();
    if family::find_by_id(&pool, family_id).await?.is_none() {
        return Err(AppError::NotFound("Family".to_string()));
    }
    let items = post::find_for_family(&pool, family_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": items })))
}

/// GET /api/v1/families/{id}/history - Point changes, newest first.
pub async fn history(
    pool: web::Data<PgPool>,
    _caller: Caller,
    path: web::Path<i64>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let family_id = path.into_inner();
    if family::find_by_id(&pool, family_id).await?.is_none() {
        return Err(AppError::NotFound("Family".to_string()));
    }
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let entries = points_history::find_for_family(&pool, family_id, limit).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "history": entries })))
}

/// POST /api/v1/families/semester/reset - Zero all semester totals (admin only).
pub async fn reset_semester(
    pool: web::Data<PgPool>,
    caller: Caller,
) -> Result<HttpResponse, AppError> {
    caller.require_admin("reset semester points")?;
    let reset = family::reset_semester_points(&pool).await?;
    log::info!("User {} reset semester points for {reset} families", caller.user_id);
    Ok(HttpResponse::Ok().json(json!({ "success": true, "families_reset": reset })))
}
