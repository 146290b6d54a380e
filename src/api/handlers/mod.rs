use actix_web::HttpResponse;

use crate::{error::GardenError, models::request::ErrorResponse};

pub mod gardens;
pub mod variants;

impl From<&GardenError> for ErrorResponse {
    fn from(err: &GardenError) -> Self {
        let reason = match err {
            GardenError::Blocked(reason) => Some(*reason),
            _ => None,
        };
        ErrorResponse {
            error: err.to_string(),
            reason,
        }
    }
}

/// Maps a domain error to its HTTP response.
pub(crate) fn error_response(err: &GardenError) -> HttpResponse {
    let body = ErrorResponse::from(err);
    match err {
        GardenError::Blocked(_) => HttpResponse::Conflict().json(body),
        GardenError::UnknownVariant(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}
