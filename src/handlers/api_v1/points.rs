use actix_web::{web, HttpResponse};

use crate::api_types::{ApiSuccess, CatalogBody, ComputePointsRequest, PointsBody};
use crate::errors::AppError;
use crate::models::catalog;
use crate::models::scoring::{compute_final_points, ScoringInput};
use crate::validate;

/// GET /api/v1/catalog - Activity tiers and bonus tags for the post form.
pub async fn catalog() -> HttpResponse {
    HttpResponse::Ok().json(ApiSuccess::new(CatalogBody {
        tiers: catalog::ACTIVITY_TIERS,
        bonus_tags: catalog::BONUS_TAGS,
        exclusive_tag: catalog::EXCLUSIVE_TAG,
        custom_min_points: catalog::CUSTOM_MIN_POINTS,
        custom_max_points: catalog::CUSTOM_MAX_POINTS,
    }))
}

/// Check raw request numbers and build a scoring input from them.
pub fn scoring_input_from_request(req: &ComputePointsRequest) -> Result<ScoringInput, AppError> {
    let errors: Vec<String> = [
        validate::validate_base_points(req.base_points),
        validate::validate_members_present(req.members_present),
        validate::validate_family_size(req.family_size),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !errors.is_empty() {
        let message = errors.join("; ");
        log::warn!("Rejected scoring request: {message}");
        return Err(AppError::Validation(message));
    }

    // Ranges were checked above
    let input = ScoringInput::new(
        req.base_points as u8,
        req.members_present as u32,
        req.family_size as u32,
        req.bonus_tags.iter().cloned(),
    )?;
    Ok(input)
}

/// POST /api/v1/points/compute - Score a hangout without saving anything.
pub async fn compute(body: web::Json<ComputePointsRequest>) -> Result<HttpResponse, AppError> {
    let input = scoring_input_from_request(&body)?;
    let points = compute_final_points(&input);
    Ok(HttpResponse::Ok().json(ApiSuccess::new(PointsBody { points })))
}
