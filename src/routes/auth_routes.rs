use actix_web::web;

use crate::error::AppError;
use crate::handlers::auth_handlers::{
    change_password, change_password_form, delete_social, login, login_form, logout, register,
    register_form, setting, setting_media, setting_personal, setting_social,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .app_data(web::PathConfig::default().error_handler(|_, _| AppError::NotFound.into()))
            .route("", web::get().to(login_form))
            .route("", web::post().to(login))
            .route("/register", web::get().to(register_form))
            .route("/register", web::post().to(register))
            .route("/logout", web::get().to(logout))
            .route("/change_password", web::get().to(change_password_form))
            .route("/change_password", web::post().to(change_password))
            .route("/setting", web::get().to(setting))
            .route("/setting/personal", web::post().to(setting_personal))
            .route("/setting/media", web::post().to(setting_media))
            .route("/setting/social", web::post().to(setting_social))
            .route("/setting/social/{id}", web::delete().to(delete_social)),
    );
}
