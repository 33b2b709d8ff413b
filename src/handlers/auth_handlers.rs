use actix_web::web::ReqData;
use actix_web::{cookie::Cookie, http::header, web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};
use diesel::prelude::*;
use serde_json::json;

use crate::constants::middleware_constants::{
    FLASH_LOGGED_OUT, FLASH_MEDIA_UPDATED, FLASH_PASSWORD_CHANGED, FLASH_PERSONAL_UPDATED,
    FLASH_SOCIAL_UPDATED, FLASH_USER_LOGGED, FLASH_USER_SIGNED,
};
use crate::db::{get_conn, DbConn, DbPool};
use crate::error::{not_found, AppError, FieldErrors};
use crate::handlers::redirect_with_flash;
use crate::models::now_stamps;
use crate::models::profile_models::{
    MediaForm, NewUserInformation, NewUserMedia, NewUserSocial, PersonalForm, SocialForm,
    UserInformation, UserMedia, UserSocial, DEFAULT_BANNER_IMG, DEFAULT_PROFILE_IMG,
};
use crate::models::session_models::{CurrentUser, NewSession};
use crate::models::user_models::{
    ChangePasswordForm, LoginForm, NewUser, RegisterForm, Role, User,
};
use crate::schema::{sessions, user_information, user_media, user_socials, users};
use crate::utils::auth_utils::require_owner_or_role;
use crate::utils::token_utils::{generate_token, session_expiry};
use crate::utils::validation_utils::Validator;

pub async fn login_form() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "title": "Login" })))
}

pub async fn register_form() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "title": "Register" })))
}

pub async fn register(
    pool: web::Data<DbPool>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let mut conn = get_conn(&pool)?;

    let taken: i64 = users::table
        .filter(users::email.eq(&form.email))
        .count()
        .get_result(&mut conn)?;

    let mut v = Validator::new();
    v.length("username", &form.username, 1, 15)
        .length("email", &form.email, 6, 125)
        .require("password", &form.password)
        .require("recover_password", &form.recover_password)
        .check("email", taken == 0, "email is already taken");
    v.finish()?;

    let password_hash = hash(&form.password, DEFAULT_COST).map_err(|_| AppError::Internal)?;
    let (created_at, created_on) = now_stamps();
    diesel::insert_into(users::table)
        .values(&NewUser {
            username: form.username.clone(),
            email: form.email,
            password_hash,
            recover_password: form.recover_password,
            role: Role::default().as_str().to_string(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)
        .map_err(email_taken)?;

    tracing::info!(username = %form.username, "user registered");
    Ok(redirect_with_flash("/auth", FLASH_USER_SIGNED))
}

/// A concurrent registration can slip past the pre-check; the UNIQUE
/// constraint answer carries the same field message.
fn email_taken(e: diesel::result::Error) -> AppError {
    match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => {
            let mut fields = FieldErrors::new();
            fields.insert("email".into(), "email is already taken".into());
            AppError::Validation(fields)
        }
        other => AppError::Database(other),
    }
}

pub async fn login(
    pool: web::Data<DbPool>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let user = users::table
        .filter(users::email.eq(&form.email))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .optional()?;

    let user = match user {
        Some(u) if verify(&form.password, &u.password_hash).unwrap_or(false) => u,
        _ => {
            let mut fields = FieldErrors::new();
            fields.insert("credentials".into(), "Invalid email or password".into());
            return Err(AppError::Validation(fields));
        }
    };

    let token = generate_token();
    diesel::insert_into(sessions::table)
        .values(&NewSession {
            user_id: user.id,
            token: token.clone(),
            created_at: chrono::Utc::now().naive_utc(),
            expires_at: session_expiry(),
        })
        .execute(&mut conn)?;

    tracing::info!(username = %user.username, "user logged in");
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(
            Cookie::build("session", token)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .body(FLASH_USER_LOGGED))
}

pub async fn logout(
    pool: web::Data<DbPool>,
    req: HttpRequest,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    // Drop only the session that made this request.
    let token = req
        .cookie("session")
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_string)
        });

    if let Some(token) = token {
        diesel::delete(
            sessions::table
                .filter(sessions::token.eq(token))
                .filter(sessions::user_id.eq(current.id)),
        )
        .execute(&mut conn)?;
    }

    let mut removal = Cookie::new("session", "");
    removal.set_path("/");
    removal.make_removal();

    tracing::info!(username = %current.username, "user logged out");
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal)
        .body(FLASH_LOGGED_OUT))
}

pub async fn change_password_form() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "title": "Change password" })))
}

pub async fn change_password(
    pool: web::Data<DbPool>,
    form: web::Form<ChangePasswordForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let user = users::table
        .find(current.id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .map_err(not_found)?;

    let mut v = Validator::new();
    v.require("password_new", &form.password_new)
        .check(
            "recover_password",
            form.recover_password == user.recover_password,
            "your secret is wrong",
        )
        .check(
            "password_old",
            verify(&form.password_old, &user.password_hash).unwrap_or(false),
            "old password does not match",
        );
    v.finish()?;

    let password_hash = hash(&form.password_new, DEFAULT_COST).map_err(|_| AppError::Internal)?;
    let (updated_at, updated_on) = now_stamps();
    diesel::update(users::table.find(user.id))
        .set((
            users::password_hash.eq(password_hash),
            users::updated_at.eq(updated_at),
            users::updated_on.eq(updated_on),
        ))
        .execute(&mut conn)?;

    tracing::info!(username = %user.username, "password changed");
    Ok(redirect_with_flash("/", FLASH_PASSWORD_CHANGED))
}

/// Settings page state. The one-to-one profile rows are created here on
/// first visit, with their default values.
pub async fn setting(
    pool: web::Data<DbPool>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let user = users::table
        .find(current.id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .map_err(not_found)?;
    let information = ensure_information(&mut conn, current.id)?;
    let media = ensure_media(&mut conn, current.id)?;
    let socials = user_socials::table
        .filter(user_socials::user_id.eq(current.id))
        .select(UserSocial::as_select())
        .load::<UserSocial>(&mut conn)?;

    Ok(HttpResponse::Ok().json(json!({
        "user": user,
        "information": information,
        "media": media,
        "socials": socials,
    })))
}

pub async fn setting_personal(
    pool: web::Data<DbPool>,
    form: web::Form<PersonalForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let mut v = Validator::new();
    v.length_opt("display_name", form.display_name.as_deref(), 2, 50)
        .length_opt("first_name", form.first_name.as_deref(), 2, 50)
        .length_opt("last_name", form.last_name.as_deref(), 2, 50)
        .length_opt("country", form.country.as_deref(), 2, 50)
        .length_opt("city", form.city.as_deref(), 2, 50)
        .length_opt("bio", form.bio.as_deref(), 10, 225);
    v.finish()?;

    let mut conn = get_conn(&pool)?;
    ensure_information(&mut conn, current.id)?;

    let (updated_at, updated_on) = now_stamps();
    diesel::update(user_information::table.find(current.id))
        .set((
            &form,
            user_information::updated_at.eq(updated_at),
            user_information::updated_on.eq(updated_on),
        ))
        .execute(&mut conn)?;

    Ok(redirect_with_flash("/auth/setting", FLASH_PERSONAL_UPDATED))
}

pub async fn setting_media(
    pool: web::Data<DbPool>,
    form: web::Form<MediaForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    ensure_media(&mut conn, current.id)?;

    let (updated_at, updated_on) = now_stamps();
    diesel::update(user_media::table.find(current.id))
        .set((
            &form.into_inner(),
            user_media::updated_at.eq(updated_at),
            user_media::updated_on.eq(updated_on),
        ))
        .execute(&mut conn)?;

    Ok(redirect_with_flash("/auth/setting", FLASH_MEDIA_UPDATED))
}

pub async fn setting_social(
    pool: web::Data<DbPool>,
    form: web::Form<SocialForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let mut v = Validator::new();
    v.require("url", &form.url).require("name", &form.name);
    v.finish()?;

    let mut conn = get_conn(&pool)?;
    let (created_at, created_on) = now_stamps();
    diesel::insert_into(user_socials::table)
        .values(&NewUserSocial {
            user_id: current.id,
            url: form.url,
            name: form.name,
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)?;

    Ok(redirect_with_flash("/auth/setting", FLASH_SOCIAL_UPDATED))
}

pub async fn delete_social(
    pool: web::Data<DbPool>,
    social_id: web::Path<i32>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let social = user_socials::table
        .find(social_id.into_inner())
        .select(UserSocial::as_select())
        .first::<UserSocial>(&mut conn)
        .map_err(not_found)?;

    require_owner_or_role(social.user_id, &current, Role::Admin)?;

    diesel::delete(user_socials::table.find(social.id)).execute(&mut conn)?;
    Ok(redirect_with_flash("/auth/setting", "Social link removed"))
}

fn ensure_information(conn: &mut DbConn, user_id: i32) -> Result<UserInformation, AppError> {
    let existing = user_information::table
        .find(user_id)
        .select(UserInformation::as_select())
        .first::<UserInformation>(conn)
        .optional()?;
    if let Some(info) = existing {
        return Ok(info);
    }

    let (created_at, created_on) = now_stamps();
    diesel::insert_into(user_information::table)
        .values(&NewUserInformation {
            user_id,
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(conn)?;

    Ok(user_information::table
        .find(user_id)
        .select(UserInformation::as_select())
        .first::<UserInformation>(conn)?)
}

fn ensure_media(conn: &mut DbConn, user_id: i32) -> Result<UserMedia, AppError> {
    let existing = user_media::table
        .find(user_id)
        .select(UserMedia::as_select())
        .first::<UserMedia>(conn)
        .optional()?;
    if let Some(media) = existing {
        return Ok(media);
    }

    let (created_at, created_on) = now_stamps();
    diesel::insert_into(user_media::table)
        .values(&NewUserMedia {
            user_id,
            profile_img_url: DEFAULT_PROFILE_IMG.to_string(),
            banner_img_url: DEFAULT_BANNER_IMG.to_string(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(conn)?;

    Ok(user_media::table
        .find(user_id)
        .select(UserMedia::as_select())
        .first::<UserMedia>(conn)?)
}
