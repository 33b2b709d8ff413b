pub mod admin_handlers;
pub mod auth_handlers;
pub mod music_handlers;
pub mod website_handlers;

use actix_web::{http::header, HttpResponse};

/// Successful mutations answer with a redirect carrying the flash text; the
/// renderer surfaces it on the next page.
pub(crate) fn redirect_with_flash(location: &str, flash: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .body(flash.to_string())
}
