use actix_web::{error::InternalError, web, HttpResponse};

use crate::api::handlers::{
    gardens::{
        create_garden, patch_season, post_generate, post_occupancy, post_place, post_resize,
        post_score, post_selectable,
    },
    variants::{get_variant, list_categories, list_variants},
};
use crate::models::request::ErrorResponse;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(list_variants)
            .service(get_variant)
            .service(list_categories)
            .service(create_garden)
            .service(post_occupancy)
            .service(post_selectable)
            .service(post_place)
            .service(post_generate)
            .service(post_score)
            .service(post_resize)
            .service(patch_season),
    );
}

/// Malformed bodies answer 400 with the usual error shape instead of actix's plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse {
                error: message,
                reason: None,
            }),
        )
        .into()
    })
}
