pub mod admin_routes;
pub mod auth_routes;
pub mod music_routes;
pub mod website_routes;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    music_routes::configure(cfg);
    auth_routes::configure(cfg);
    admin_routes::configure(cfg);
    website_routes::configure(cfg);
}
