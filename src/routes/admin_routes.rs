use actix_web::web;

use crate::error::AppError;
use crate::handlers::admin_handlers::{delete_user, list_users};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(web::PathConfig::default().error_handler(|_, _| AppError::NotFound.into()))
            .route("/users", web::get().to(list_users))
            .route("/user/{id}", web::delete().to(delete_user)),
    );
}
