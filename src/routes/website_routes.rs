use actix_web::web;

use crate::handlers::website_handlers::{home, not_found_page, profile};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/user/{username}", web::get().to(profile))
        .route("/not_found", web::get().to(not_found_page));
}
