pub mod families;
pub mod points;
pub mod posts;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Next,
};

use crate::api_types::ApiErrorResponse;

/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// GET requests are exempt.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        // DELETE carries no body, so only reject a content type that is present and wrong
        let acceptable = content_type.starts_with("application/json")
            || (method == actix_web::http::Method::DELETE && content_type.is_empty());

        if !acceptable {
            let body = ApiErrorResponse::new("Content-Type must be application/json for mutation requests");
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let message = format!("Invalid request body: {err}");
        log::warn!("Rejected body for {}: {err}", req.path());
        InternalError::from_response(err, HttpResponse::BadRequest().json(ApiErrorResponse::new(message)))
            .into()
    })
}

fn query_error_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid query string: {err}");
        InternalError::from_response(err, HttpResponse::BadRequest().json(ApiErrorResponse::new(message)))
            .into()
    })
}

/// Configure API v1 routes (mounted under `/api/v1`).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_error_config());
    cfg.app_data(query_error_config());

    cfg.route("/catalog", web::get().to(points::catalog));
    cfg.service(
        web::scope("/points")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/compute", web::post().to(points::compute))
    );
    // Fixed segments BEFORE /families/{id}
    cfg.service(
        web::scope("/families")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::post().to(families::create))
            .route("/leaderboard", web::get().to(families::leaderboard))
            .route("/join", web::post().to(families::join))
            .route("/semester/reset", web::post().to(families::reset_semester))
            .route("/{id}", web::get().to(families::detail))
            .route("/{id}/posts", web::get().to(families::posts))
            .route("/{id}/history", web::get().to(families::history))
    );
    cfg.service(
        web::scope("/posts")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::post().to(posts::create))
            .route("/announcements", web::get().to(posts::announcements))
            .route("/feed", web::get().to(posts::feed))
            .route("/{id}", web::get().to(posts::detail))
            .route("/{id}", web::put().to(posts::update))
            .route("/{id}", web::delete().to(posts::delete))
    );
}
