use std::collections::BTreeMap;

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::constants::middleware_constants::{
    FLASH_ALREADY_LOGGED, FLASH_FORBIDDEN, FLASH_LOGIN_REQUIRED,
};

/// Field name to message, as redisplayed next to the form inputs.
pub type FieldErrors = BTreeMap<String, String>;

/// Every controller failure is recovered at this boundary into a redirect
/// with a flash message or a form redisplay; nothing propagates as a crash.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("resource not found")]
    NotFound,

    #[error("{}", FLASH_LOGIN_REQUIRED)]
    Unauthorized,

    #[error("{}", FLASH_ALREADY_LOGGED)]
    AlreadyLogged,

    #[error("{}", FLASH_FORBIDDEN)]
    Forbidden,

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("database connection error")]
    Pool,

    #[error("internal error")]
    Internal,
}

impl AppError {
    fn redirect(location: &str, flash: &str) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .body(flash.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound | AppError::Unauthorized | AppError::AlreadyLogged | AppError::Forbidden => {
                StatusCode::FOUND
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Pool | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => Self::redirect("/not_found", "Page not found"),
            AppError::Unauthorized => Self::redirect("/auth", FLASH_LOGIN_REQUIRED),
            AppError::AlreadyLogged => Self::redirect("/", FLASH_ALREADY_LOGGED),
            AppError::Forbidden => Self::redirect("/", FLASH_FORBIDDEN),
            AppError::Validation(fields) => HttpResponse::BadRequest().json(fields),
            AppError::Database(e) => {
                tracing::error!("query failed: {e}");
                HttpResponse::InternalServerError().body("Database error")
            }
            AppError::Pool => HttpResponse::InternalServerError().body("Database connection error"),
            AppError::Internal => HttpResponse::InternalServerError().body("Internal error"),
        }
    }
}

/// Lookup misses become the generic not-found redirect.
pub fn not_found(e: diesel::result::Error) -> AppError {
    match e {
        diesel::result::Error::NotFound => AppError::NotFound,
        other => AppError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_redirects_to_login_with_flash() {
        let resp = AppError::Unauthorized.error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/auth"
        );
    }

    #[test]
    fn not_found_maps_lookup_miss() {
        assert!(matches!(
            not_found(diesel::result::Error::NotFound),
            AppError::NotFound
        ));
    }

    #[test]
    fn validation_is_a_bad_request() {
        let mut fields = FieldErrors::new();
        fields.insert("title".into(), "Title is required".into());
        let resp = AppError::Validation(fields).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
