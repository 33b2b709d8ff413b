use actix_web::{web, HttpResponse};
use diesel::prelude::*;

use crate::db::{get_conn, DbPool};
use crate::error::{not_found, AppError};
use crate::handlers::redirect_with_flash;
use crate::models::user_models::User;
use crate::schema::{
    album_songs, albums, comment_albums, comment_songs, sessions, songs, user_information,
    user_media, user_socials, users,
};

pub async fn list_users(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let list = users::table.select(User::as_select()).load::<User>(&mut conn)?;
    Ok(HttpResponse::Ok().json(list))
}

/// Admin removes an account and everything hanging off it, in one
/// transaction: sessions, profile rows, socials, songs and albums with their
/// join rows and comments.
pub async fn delete_user(
    pool: web::Data<DbPool>,
    user_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let mut conn = get_conn(&pool)?;
    let user_id = user_id.into_inner();

    let user = users::table
        .find(user_id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .map_err(not_found)?;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(sessions::table.filter(sessions::user_id.eq(user.id))).execute(conn)?;
        diesel::delete(user_socials::table.filter(user_socials::user_id.eq(user.id)))
            .execute(conn)?;
        diesel::delete(user_information::table.find(user.id)).execute(conn)?;
        diesel::delete(user_media::table.find(user.id)).execute(conn)?;

        let song_ids: Vec<i32> = songs::table
            .filter(songs::user_id.eq(user.id))
            .select(songs::id)
            .load(conn)?;
        diesel::delete(album_songs::table.filter(album_songs::song_id.eq_any(&song_ids)))
            .execute(conn)?;
        diesel::delete(comment_songs::table.filter(comment_songs::song_id.eq_any(&song_ids)))
            .execute(conn)?;

        let album_ids: Vec<i32> = albums::table
            .filter(albums::user_id.eq(user.id))
            .select(albums::id)
            .load(conn)?;
        diesel::delete(album_songs::table.filter(album_songs::album_id.eq_any(&album_ids)))
            .execute(conn)?;
        diesel::delete(comment_albums::table.filter(comment_albums::album_id.eq_any(&album_ids)))
            .execute(conn)?;

        diesel::delete(songs::table.filter(songs::user_id.eq(user.id))).execute(conn)?;
        diesel::delete(albums::table.filter(albums::user_id.eq(user.id))).execute(conn)?;
        diesel::delete(users::table.find(user.id)).execute(conn)?;
        Ok(())
    })?;

    tracing::info!(username = %user.username, "user deleted by admin");
    Ok(redirect_with_flash("/admin/users", "User deleted"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{cookie::Cookie, test};
    use diesel::prelude::*;

    use crate::constants::middleware_constants::{FLASH_FORBIDDEN, FLASH_LOGIN_REQUIRED};
    use crate::schema::{songs, users};
    use crate::test_utils::{open_session, seed_song, seed_user, test_app, test_pool};

    #[actix_web::test]
    async fn guest_is_sent_to_login() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/admin/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(body, FLASH_LOGIN_REQUIRED.as_bytes());
    }

    #[actix_web::test]
    async fn plain_user_is_forbidden() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        let token = open_session(&pool, user_id);
        let app = test_app!(pool);

        let req = test::TestRequest::get()
            .uri("/admin/users")
            .cookie(Cookie::new("session", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(body, FLASH_FORBIDDEN.as_bytes());
    }

    #[actix_web::test]
    async fn admin_delete_cascades_to_songs() {
        let pool = test_pool();
        let admin_id = seed_user(&pool, "boss", "boss@example.com", "password", "admin");
        let user_id = seed_user(&pool, "charly", "charly@example.com", "password", "user");
        seed_song(&pool, user_id, "Orphaned");
        let token = open_session(&pool, admin_id);
        let app = test_app!(pool);

        let req = test::TestRequest::delete()
            .uri(&format!("/admin/user/{user_id}"))
            .cookie(Cookie::new("session", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let mut conn = pool.get().unwrap();
        let remaining_users: i64 = users::table.count().get_result(&mut conn).unwrap();
        assert_eq!(remaining_users, 1);
        let remaining_songs: i64 = songs::table.count().get_result(&mut conn).unwrap();
        assert_eq!(remaining_songs, 0);
    }
}
