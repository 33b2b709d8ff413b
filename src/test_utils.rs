use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;

use crate::db::{DbPool, MIGRATIONS};
use crate::models::now_stamps;
use crate::models::session_models::NewSession;
use crate::models::song_models::{NewSong, DEFAULT_SONG_IMG};
use crate::models::user_models::NewUser;
use crate::schema::{sessions, songs, users};
use crate::utils::token_utils::{generate_token, session_expiry};

/// In-memory database. Pool size 1 so every request sees the same
/// connection (each `:memory:` connection is its own database).
pub fn test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("test pool");
    pool.get()
        .unwrap()
        .run_pending_migrations(MIGRATIONS)
        .unwrap();
    pool
}

pub fn seed_user(pool: &DbPool, username: &str, email: &str, password: &str, role: &str) -> i32 {
    let mut conn = pool.get().unwrap();
    let (created_at, created_on) = now_stamps();
    diesel::insert_into(users::table)
        .values(&NewUser {
            username: username.to_string(),
            email: email.to_string(),
            // Minimum cost keeps the test suite fast.
            password_hash: bcrypt::hash(password, 4).unwrap(),
            recover_password: "secret".to_string(),
            role: role.to_string(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)
        .unwrap();

    users::table
        .filter(users::email.eq(email))
        .select(users::id)
        .first(&mut conn)
        .unwrap()
}

pub fn open_session(pool: &DbPool, user_id: i32) -> String {
    let mut conn = pool.get().unwrap();
    let token = generate_token();
    diesel::insert_into(sessions::table)
        .values(&NewSession {
            user_id,
            token: token.clone(),
            created_at: chrono::Utc::now().naive_utc(),
            expires_at: session_expiry(),
        })
        .execute(&mut conn)
        .unwrap();
    token
}

/// Session whose expiry already passed; the gate must treat it as absent.
pub fn open_expired_session(pool: &DbPool, user_id: i32) -> String {
    let mut conn = pool.get().unwrap();
    let token = generate_token();
    let now = chrono::Utc::now().naive_utc();
    diesel::insert_into(sessions::table)
        .values(&NewSession {
            user_id,
            token: token.clone(),
            created_at: now - chrono::Duration::hours(2),
            expires_at: now - chrono::Duration::hours(1),
        })
        .execute(&mut conn)
        .unwrap();
    token
}

pub fn seed_song(pool: &DbPool, user_id: i32, title: &str) -> i32 {
    let mut conn = pool.get().unwrap();
    let (created_at, created_on) = now_stamps();
    diesel::insert_into(songs::table)
        .values(&NewSong {
            user_id,
            url_song: format!("tracks/{title}.mp3"),
            title: title.to_string(),
            description: None,
            genre: None,
            kind: "original".to_string(),
            license: "creative_commons".to_string(),
            song_img_url: DEFAULT_SONG_IMG.to_string(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        })
        .execute(&mut conn)
        .unwrap();

    songs::table
        .filter(songs::title.eq(title))
        .select(songs::id)
        .first(&mut conn)
        .unwrap()
}

/// Full application under test: pool, session gate and all routes.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .wrap($crate::middleware::session_middleware::SessionGate)
                .configure($crate::routes::configure),
        )
        .await
    };
}
pub(crate) use test_app;
