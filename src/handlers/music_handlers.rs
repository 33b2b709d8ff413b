use std::str::FromStr;

use actix_web::web::ReqData;
use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde_json::json;

use crate::constants::middleware_constants::{
    FLASH_ALBUM_CREATED, FLASH_ALBUM_DELETED, FLASH_SONG_CREATED, FLASH_SONG_DELETED,
};
use crate::db::{get_conn, DbPool};
use crate::error::{not_found, AppError};
use crate::handlers::redirect_with_flash;
use crate::models::album_models::{Album, AlbumForm, AlbumSong, NewAlbum, DEFAULT_ALBUM_IMG};
use crate::models::comment_models::{
    CommentAlbum, CommentForm, CommentSong, NewCommentAlbum, NewCommentSong,
};
use crate::models::now_stamps;
use crate::models::profile_models::UserSocial;
use crate::models::session_models::CurrentUser;
use crate::models::song_models::{
    License, NewSong, Song, SongForm, SongFormOptions, SongKind, DEFAULT_SONG_IMG,
};
use crate::models::user_models::{Role, User};
use crate::schema::{album_songs, albums, comment_albums, comment_songs, songs, user_socials, users};
use crate::utils::auth_utils::require_owner_or_role;
use crate::utils::validation_utils::Validator;

pub async fn list_songs(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let list = songs::table.select(Song::as_select()).load::<Song>(&mut conn)?;
    Ok(HttpResponse::Ok().json(list))
}

/// Song page state: the song, its owner, the owner's share links and the
/// song's comments.
pub async fn get_song(
    pool: web::Data<DbPool>,
    song_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let song_id = song_id.into_inner();

    let song = songs::table
        .find(song_id)
        .select(Song::as_select())
        .first::<Song>(&mut conn)
        .map_err(not_found)?;

    let owner = users::table
        .find(song.user_id)
        .select(User::as_select())
        .first::<User>(&mut conn)?;

    let socials = user_socials::table
        .filter(user_socials::user_id.eq(song.user_id))
        .select(UserSocial::as_select())
        .load::<UserSocial>(&mut conn)?;

    let comments = comment_songs::table
        .filter(comment_songs::song_id.eq(song.id))
        .select(CommentSong::as_select())
        .load::<CommentSong>(&mut conn)?;

    Ok(HttpResponse::Ok().json(json!({
        "song": song,
        "owner": owner,
        "socials": socials,
        "comments": comments,
    })))
}

/// Owner (or admin) deletes a song together with its join rows and comments.
pub async fn delete_song(
    pool: web::Data<DbPool>,
    song_id: web::Path<i32>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let song_id = song_id.into_inner();

    let song = songs::table
        .find(song_id)
        .select(Song::as_select())
        .first::<Song>(&mut conn)
        .map_err(not_found)?;

    require_owner_or_role(song.user_id, &current, Role::Admin)?;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(album_songs::table.filter(album_songs::song_id.eq(song.id)))
            .execute(conn)?;
        diesel::delete(comment_songs::table.filter(comment_songs::song_id.eq(song.id)))
            .execute(conn)?;
        diesel::delete(songs::table.find(song.id)).execute(conn)?;
        Ok(())
    })?;

    tracing::info!(song = song.id, user = current.id, "song deleted");
    Ok(redirect_with_flash("/music/", FLASH_SONG_DELETED))
}

pub async fn create_song_form() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SongFormOptions::new()))
}

pub async fn create_song(
    pool: web::Data<DbPool>,
    form: web::Form<SongForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let kind = form
        .kind
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map_or(Ok(SongKind::default()), SongKind::from_str);
    let license = License::from_str(&form.license);

    let mut v = Validator::new();
    v.require("title", &form.title)
        .require("url_song", &form.url_song)
        .check("type", kind.is_ok(), "type must be one of the supported values")
        .check(
            "license",
            license.is_ok(),
            "license must be creative_commons or all_rights_reserved",
        );
    v.finish()?;

    let kind = kind.unwrap_or_default();
    let license = license.unwrap_or(License::AllRightsReserved);

    let (created_at, created_on) = now_stamps();
    let new_song = NewSong {
        user_id: current.id,
        url_song: form.url_song,
        title: form.title,
        description: form.description,
        genre: form.genre,
        kind: kind.as_str().to_string(),
        license: license.as_str().to_string(),
        song_img_url: DEFAULT_SONG_IMG.to_string(),
        created_at,
        created_on,
        updated_at: created_at,
        updated_on: created_on,
    };

    let mut conn = get_conn(&pool)?;
    let song: Song = diesel::insert_into(songs::table)
        .values(&new_song)
        .returning(Song::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(song = song.id, user = current.id, "song created");
    Ok(redirect_with_flash(
        &format!("/music/song/{}", song.id),
        FLASH_SONG_CREATED,
    ))
}

/// Album page state; also loads the owning user for display.
pub async fn get_album(
    pool: web::Data<DbPool>,
    album_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let album_id = album_id.into_inner();

    let album = albums::table
        .find(album_id)
        .select(Album::as_select())
        .first::<Album>(&mut conn)
        .map_err(not_found)?;

    let owner = users::table
        .find(album.user_id)
        .select(User::as_select())
        .first::<User>(&mut conn)?;

    let album_tracks = album_songs::table
        .inner_join(songs::table)
        .filter(album_songs::album_id.eq(album.id))
        .select(Song::as_select())
        .load::<Song>(&mut conn)?;

    let comments = comment_albums::table
        .filter(comment_albums::album_id.eq(album.id))
        .select(CommentAlbum::as_select())
        .load::<CommentAlbum>(&mut conn)?;

    Ok(HttpResponse::Ok().json(json!({
        "album": album,
        "owner": owner,
        "songs": album_tracks,
        "comments": comments,
    })))
}

pub async fn delete_album(
    pool: web::Data<DbPool>,
    album_id: web::Path<i32>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let album_id = album_id.into_inner();

    let album = albums::table
        .find(album_id)
        .select(Album::as_select())
        .first::<Album>(&mut conn)
        .map_err(not_found)?;

    require_owner_or_role(album.user_id, &current, Role::Admin)?;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(album_songs::table.filter(album_songs::album_id.eq(album.id)))
            .execute(conn)?;
        diesel::delete(comment_albums::table.filter(comment_albums::album_id.eq(album.id)))
            .execute(conn)?;
        diesel::delete(albums::table.find(album.id)).execute(conn)?;
        Ok(())
    })?;

    tracing::info!(album = album.id, user = current.id, "album deleted");
    Ok(redirect_with_flash("/music/", FLASH_ALBUM_DELETED))
}

/// Create-album form state: the picklist of the current user's own songs.
pub async fn create_album_form(
    pool: web::Data<DbPool>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let own_songs = songs_by_user(&mut conn, current.id)?;
    Ok(HttpResponse::Ok().json(json!({ "songs": own_songs })))
}

pub async fn create_album(
    pool: web::Data<DbPool>,
    form: web::Form<AlbumForm>,
    current: ReqData<CurrentUser>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let mut v = Validator::new();
    v.require("name", &form.name);
    v.finish()?;

    let (created_at, created_on) = now_stamps();
    let new_album = NewAlbum {
        user_id: current.id,
        name: form.name.clone(),
        date: form.date,
        album_img_url: DEFAULT_ALBUM_IMG.to_string(),
        created_at,
        created_on,
        updated_at: created_at,
        updated_on: created_on,
    };

    let picked = form.song_ids();
    let user_id = current.id;

    let mut conn = get_conn(&pool)?;
    let album = conn.transaction::<Album, diesel::result::Error, _>(|conn| {
        let album: Album = diesel::insert_into(albums::table)
            .values(&new_album)
            .returning(Album::as_returning())
            .get_result(conn)?;

        // Only the user's own existing songs can be attached.
        let own_ids: Vec<i32> = songs::table
            .filter(songs::user_id.eq(user_id))
            .filter(songs::id.eq_any(&picked))
            .select(songs::id)
            .load(conn)?;

        let rows: Vec<AlbumSong> = own_ids
            .into_iter()
            .map(|song_id| AlbumSong {
                album_id: album.id,
                song_id,
            })
            .collect();

        if !rows.is_empty() {
            diesel::insert_into(album_songs::table)
                .values(&rows)
                .execute(conn)?;
        }

        Ok(album)
    })?;

    tracing::info!(album = album.id, user = current.id, "album created");
    Ok(redirect_with_flash(
        &format!("/music/album/{}", album.id),
        FLASH_ALBUM_CREATED,
    ))
}

pub async fn list_songs_by_user(
    pool: web::Data<DbPool>,
    user_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let list = songs_by_user(&mut conn, user_id.into_inner())?;
    Ok(HttpResponse::Ok().json(list))
}

fn songs_by_user(conn: &mut crate::db::DbConn, user_id: i32) -> Result<Vec<Song>, AppError> {
    Ok(songs::table
        .filter(songs::user_id.eq(user_id))
        .select(Song::as_select())
        .load::<Song>(conn)?)
}

/// Atomic counter bump; the increment happens in the store, not in process.
pub async fn like_song(
    pool: web::Data<DbPool>,
    song_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let song_id = song_id.into_inner();

    let affected = diesel::update(songs::table.find(song_id))
        .set(songs::likes.eq(songs::likes + 1))
        .execute(&mut conn)?;
    if affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(redirect_with_flash(
        &format!("/music/song/{song_id}"),
        "Like saved",
    ))
}

pub async fn replay_song(
    pool: web::Data<DbPool>,
    song_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let song_id = song_id.into_inner();

    let affected = diesel::update(songs::table.find(song_id))
        .set(songs::replay.eq(songs::replay + 1))
        .execute(&mut conn)?;
    if affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(redirect_with_flash(
        &format!("/music/song/{song_id}"),
        "Replay counted",
    ))
}

pub async fn like_album(
    pool: web::Data<DbPool>,
    album_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let album_id = album_id.into_inner();

    let affected = diesel::update(albums::table.find(album_id))
        .set(albums::likes.eq(albums::likes + 1))
        .execute(&mut conn)?;
    if affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(redirect_with_flash(
        &format!("/music/album/{album_id}"),
        "Like saved",
    ))
}

pub async fn comment_song(
    pool: web::Data<DbPool>,
    song_id: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let song_id = song_id.into_inner();

    let mut v = Validator::new();
    v.require("text", &form.text);
    v.finish()?;

    songs::table
        .find(song_id)
        .select(Song::as_select())
        .first::<Song>(&mut conn)
        .map_err(not_found)?;

    let (created_at, created_on) = now_stamps();
    diesel::insert_into(comment_songs::table)
        .values(&NewCommentSong {
            song_id,
            text: form.text.clone(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)?;

    Ok(redirect_with_flash(
        &format!("/music/song/{song_id}"),
        "Comment added",
    ))
}

pub async fn comment_album(
    pool: web::Data<DbPool>,
    album_id: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let album_id = album_id.into_inner();

    let mut v = Validator::new();
    v.require("text", &form.text);
    v.finish()?;

    albums::table
        .find(album_id)
        .select(Album::as_select())
        .first::<Album>(&mut conn)
        .map_err(not_found)?;

    let (created_at, created_on) = now_stamps();
    diesel::insert_into(comment_albums::table)
        .values(&NewCommentAlbum {
            album_id,
            text: form.text.clone(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)?;

    Ok(redirect_with_flash(
        &format!("/music/album/{album_id}"),
        "Comment added",
    ))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::{cookie::Cookie, test};
    use diesel::prelude::*;

    use crate::constants::middleware_constants::FLASH_LOGIN_REQUIRED;
    use crate::schema::{album_songs, comment_songs, songs};
    use crate::test_utils::{open_session, seed_song, seed_user, test_app, test_pool};

    #[actix_web::test]
    async fn guest_create_song_redirects_with_login_flash() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/music/create/song")
            .set_form([("title", "x"), ("url_song", "y"), ("license", "creative_commons")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(body, FLASH_LOGIN_REQUIRED.as_bytes());
    }

    #[actix_web::test]
    async fn song_list_answers_with_and_without_trailing_slash() {
        let pool = test_pool();
        let app = test_app!(pool);

        for uri in ["/music", "/music/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[actix_web::test]
    async fn non_numeric_song_id_redirects_to_not_found() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/music/song/abc").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/not_found"
        );
    }

    #[actix_web::test]
    async fn missing_song_redirects_to_not_found() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/music/song/999").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/not_found"
        );
    }

    #[actix_web::test]
    async fn created_song_belongs_to_the_session_user() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let token = open_session(&pool, user_id);
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/music/create/song")
            .cookie(Cookie::new("session", token))
            .set_form([
                ("title", "First Track"),
                ("url_song", "tracks/first.mp3"),
                ("type", "demo"),
                ("license", "creative_commons"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let mut conn = pool.get().unwrap();
        let (owner, kind): (i32, String) = songs::table
            .filter(songs::title.eq("First Track"))
            .select((songs::user_id, songs::kind))
            .first(&mut conn)
            .unwrap();
        assert_eq!(owner, user_id);
        assert_eq!(kind, "demo");
    }

    #[actix_web::test]
    async fn create_song_rejects_bad_enum_values() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let token = open_session(&pool, user_id);
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/music/create/song")
            .cookie(Cookie::new("session", token))
            .set_form([
                ("title", ""),
                ("url_song", "tracks/x.mp3"),
                ("type", "mashup"),
                ("license", "creative_commons"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let fields: std::collections::BTreeMap<String, String> =
            test::read_body_json(resp).await;
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("type"));
    }

    #[actix_web::test]
    async fn owner_delete_cascades_and_later_get_redirects() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let song_id = seed_song(&pool, user_id, "Doomed Track");
        let token = open_session(&pool, user_id);

        {
            let mut conn = pool.get().unwrap();
            let (created_at, created_on) = crate::models::now_stamps();
            diesel::insert_into(comment_songs::table)
                .values(&crate::models::comment_models::NewCommentSong {
                    song_id,
                    text: "great".into(),
                    created_at,
                    created_on,
                    updated_at: created_at,
                    updated_on: created_on,
                })
                .execute(&mut conn)
                .unwrap();
        }

        let app = test_app!(pool);

        let req = test::TestRequest::delete()
            .uri(&format!("/music/song/{song_id}"))
            .cookie(Cookie::new("session", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let mut conn = pool.get().unwrap();
        let comments: i64 = comment_songs::table
            .filter(comment_songs::song_id.eq(song_id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(comments, 0);
        drop(conn);

        let req = test::TestRequest::get()
            .uri(&format!("/music/song/{song_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/not_found"
        );
    }

    #[actix_web::test]
    async fn stranger_cannot_delete_a_foreign_song() {
        let pool = test_pool();
        let owner = seed_user(&pool, "owner", "owner@example.com", "password", "user");
        let stranger = seed_user(&pool, "intruder", "intruder@example.com", "password", "user");
        let song_id = seed_song(&pool, owner, "Protected");
        let token = open_session(&pool, stranger);
        let app = test_app!(pool);

        let req = test::TestRequest::delete()
            .uri(&format!("/music/song/{song_id}"))
            .cookie(Cookie::new("session", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let mut conn = pool.get().unwrap();
        let still_there: i64 = songs::table
            .filter(songs::id.eq(song_id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(still_there, 1);
    }

    #[actix_web::test]
    async fn album_attaches_only_own_songs() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let other = seed_user(&pool, "other", "other@example.com", "password", "user");
        let mine = seed_song(&pool, user_id, "Mine");
        let theirs = seed_song(&pool, other, "Theirs");
        let token = open_session(&pool, user_id);
        let app = test_app!(pool);

        let picked = format!("{mine},{theirs}");
        let req = test::TestRequest::post()
            .uri("/music/create/album")
            .cookie(Cookie::new("session", token))
            .set_form([("name", "Mixtape"), ("song_ids", picked.as_str())])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let mut conn = pool.get().unwrap();
        let attached: Vec<i32> = album_songs::table
            .select(album_songs::song_id)
            .load(&mut conn)
            .unwrap();
        assert_eq!(attached, vec![mine]);
    }

    #[actix_web::test]
    async fn likes_increment_atomically_per_request() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let song_id = seed_song(&pool, user_id, "Banger");
        let token = open_session(&pool, user_id);
        let app = test_app!(pool);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&format!("/music/song/{song_id}/like"))
                .cookie(Cookie::new("session", token.clone()))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }

        let mut conn = pool.get().unwrap();
        let likes: i32 = songs::table
            .find(song_id)
            .select(songs::likes)
            .first(&mut conn)
            .unwrap();
        assert_eq!(likes, 2);
    }
}
