use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::error::{not_found, AppError};
use crate::models::album_models::Album;
use crate::models::profile_models::{UserInformation, UserMedia, UserSocial};
use crate::models::song_models::Song;
use crate::models::user_models::User;
use crate::schema::{albums, songs, user_information, user_media, user_socials, users};

const HOME_PAGE_SIZE: i64 = 10;

pub async fn home(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let recent_songs = songs::table
        .order(songs::created_at.desc())
        .limit(HOME_PAGE_SIZE)
        .select(Song::as_select())
        .load::<Song>(&mut conn)?;

    let recent_albums = albums::table
        .order(albums::created_at.desc())
        .limit(HOME_PAGE_SIZE)
        .select(Album::as_select())
        .load::<Album>(&mut conn)?;

    Ok(HttpResponse::Ok().json(json!({
        "songs": recent_songs,
        "albums": recent_albums,
    })))
}

/// Public profile page state.
pub async fn profile(
    pool: web::Data<DbPool>,
    username: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;

    let user = users::table
        .filter(users::username.eq(username.into_inner()))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .map_err(not_found)?;

    let information = user_information::table
        .find(user.id)
        .select(UserInformation::as_select())
        .first::<UserInformation>(&mut conn)
        .optional()?;
    let media = user_media::table
        .find(user.id)
        .select(UserMedia::as_select())
        .first::<UserMedia>(&mut conn)
        .optional()?;
    let socials = user_socials::table
        .filter(user_socials::user_id.eq(user.id))
        .select(UserSocial::as_select())
        .load::<UserSocial>(&mut conn)?;
    let user_songs = songs::table
        .filter(songs::user_id.eq(user.id))
        .select(Song::as_select())
        .load::<Song>(&mut conn)?;
    let user_albums = albums::table
        .filter(albums::user_id.eq(user.id))
        .select(Album::as_select())
        .load::<Album>(&mut conn)?;

    Ok(HttpResponse::Ok().json(json!({
        "user": user,
        "information": information,
        "media": media,
        "socials": socials,
        "songs": user_songs,
        "albums": user_albums,
    })))
}

pub async fn not_found_page() -> HttpResponse {
    HttpResponse::NotFound().body("Page not found")
}
