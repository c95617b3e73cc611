use std::collections::BTreeSet;

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::api_types::{CreatePostRequest, HangoutRequest, UpdatePostRequest};
use crate::auth::identity::Caller;
use crate::errors::AppError;
use crate::models::family;
use crate::models::post::{self, HangoutRecord, NewPost, PostType, PostUpdate};
use crate::models::selection::HangoutForm;
use crate::validate;

fn validate_text(title: &str, content: &str) -> Result<(), AppError> {
    match validate::validate_required(title, "Title", validate::TITLE_MAX_LEN)
        .or_else(|| validate::validate_required(content, "Content", validate::CONTENT_MAX_LEN))
    {
        Some(msg) => Err(AppError::Validation(msg)),
        None => Ok(()),
    }
}

/// Run the hangout form with the submitted values and the family's current
/// roster size, the same way the post form does.
pub fn score_hangout(family_size: i64, req: &HangoutRequest) -> Result<HangoutRecord, AppError> {
    if let Some(msg) = validate::validate_members_present(req.members_present) {
        return Err(AppError::Validation(msg));
    }

    let mut form = HangoutForm::new(u32::try_from(family_size).unwrap_or(0));
    form.set_members_present(req.members_present as u32)?;
    // Repeated labels would toggle themselves off
    let tags: BTreeSet<&str> = req.bonus_tags.iter().map(String::as_str).collect();
    for tag in tags {
        form.toggle_bonus_tag(tag)?;
    }
    form.select_activity(req.activity.clone())?;
    let submission = form.submit()?;

    Ok(HangoutRecord {
        activity: submission.choice.label().trim().to_string(),
        base_points: submission.input.base_points,
        members_present: submission.input.members_present,
        bonus_tags: submission.input.bonus_tags.into_iter().collect(),
        point_value: submission.points,
    })
}

/// GET /api/v1/posts/announcements - Public list of announcements.
pub async fn announcements(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let posts = post::find_announcements(&pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": posts })))
}

/// GET /api/v1/posts/feed - Posts from the caller's family.
pub async fn feed(pool: web::Data<PgPool>, caller: Caller) -> Result<HttpResponse, AppError> {
    let posts = post::find_feed_for_user(&pool, caller.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": posts })))
}

/// GET /api/v1/posts/{id}
pub async fn detail(
    pool: web::Data<PgPool>,
    _caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let post = post::find_by_id(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "post": post })))
}

/// POST /api/v1/posts - Create a post. Hangout points are scored here and
/// credited to the family.
pub async fn create(
    pool: web::Data<PgPool>,
    caller: Caller,
    body: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, AppError> {
    validate_text(&body.title, &body.content)?;

    let post_type = PostType::parse(&body.post_type).ok_or_else(|| {
        AppError::Validation(format!("type must be post, hangout or announcement, got '{}'", body.post_type))
    })?;
    if post_type == PostType::Announcement {
        caller.require_admin("create announcement posts")?;
    }
    if body.hangout.is_some() && post_type != PostType::Hangout {
        return Err(AppError::Validation("Only hangout posts carry points".to_string()));
    }

    if family::find_by_id(&pool, body.family_id).await?.is_none() {
        return Err(AppError::NotFound("Family".to_string()));
    }
    if !family::is_member(pool.get_ref(), body.family_id, caller.user_id).await? {
        return Err(AppError::PermissionDenied(
            "you must be a member of this family to post".to_string(),
        ));
    }

    // A hangout posted without details is stored unscored at 0 points
    let hangout = match &body.hangout {
        Some(details) => {
            let family_size = family::member_count(pool.get_ref(), body.family_id).await?;
            Some(score_hangout(family_size, details)?)
        }
        None => None,
    };

    let new = NewPost {
        author_id: caller.user_id,
        family_id: body.family_id,
        post_type,
        title: body.title.clone(),
        content: body.content.clone(),
        hangout,
    };
    let created = post::create(&pool, &new).await?;
    Ok(HttpResponse::Created().json(json!({ "success": true, "post": created })))
}

/// PUT /api/v1/posts/{id} - Edit a post (author or admin). New hangout
/// details are rescored and the family total moves by the difference.
pub async fn update(
    pool: web::Data<PgPool>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    validate_text(&body.title, &body.content)?;

    let existing = post::find_by_id(pool.get_ref(), post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;
    caller.require_owner_or_admin(existing.author_id, "edit this post")?;

    let hangout = match &body.hangout {
        Some(details) => {
            let family_size = family::member_count(pool.get_ref(), existing.family_id).await?;
            Some(score_hangout(family_size, details)?)
        }
        None => None,
    };

    let changes = PostUpdate {
        title: body.title.clone(),
        content: body.content.clone(),
        hangout,
    };
    let updated = post::update(&pool, post_id, &changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "post": updated })))
}

/// DELETE /api/v1/posts/{id} - Delete a post (author or admin), taking back its points.
pub async fn delete(
    pool: web::Data<PgPool>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let existing = post::find_by_id(pool.get_ref(), post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post".to_string()))?;
    caller.require_owner_or_admin(existing.author_id, "delete this post")?;

    let deleted = post::delete(&pool, post_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post removed",
        "post_id": deleted.id,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::selection::ActivityChoice;

    fn request(base_points: u8, activity: &str, members_present: i64, tags: &[&str]) -> HangoutRequest {
        HangoutRequest {
            activity: ActivityChoice::Tier { base_points, activity: activity.to_string() },
            members_present,
            bonus_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn scores_with_roster_size() {
        // 3 of 8 present is under half: 7 halves to 3.5, plus one tag
        let record = score_hangout(8, &request(7, "Museum visit (Met/MoMA/AMNH)", 3, &["Birthday celebration"])).unwrap();
        assert_eq!(record.point_value, 4.5);
        assert_eq!(record.base_points, 7);
        assert_eq!(record.activity, "Museum visit (Met/MoMA/AMNH)");
        assert_eq!(record.bonus_tags, vec!["Birthday celebration".to_string()]);
    }

    #[test]
    fn repeated_tags_count_once() {
        let record = score_hangout(0, &request(5, "Game night (Hex & Co)", 4, &["Birthday celebration", "Birthday celebration"])).unwrap();
        assert_eq!(record.point_value, 6.0);
    }

    #[test]
    fn exclusive_tag_wins_over_ordinary_ones() {
        let record =
            score_hangout(0, &request(5, "Game night (Hex & Co)", 4, &["Birthday celebration", "Viet-themed", "Performance/competition"]))
                .unwrap();
        assert_eq!(record.bonus_tags, vec!["Viet-themed".to_string()]);
        assert_eq!(record.point_value, 8.0);
    }

    #[test]
    fn rejects_bad_headcount_and_activity() {
        assert!(score_hangout(0, &request(5, "Game night (Hex & Co)", 0, &[])).is_err());
        assert!(score_hangout(0, &request(5, "Game night (Hex & Co)", 10, &[])).is_err());
        assert!(score_hangout(0, &request(5, "Skydiving", 4, &[])).is_err());
    }
}
