use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;

/// Sessions live for 30 days.
const SESSION_HOURS: i64 = 720;

/// Opaque session credential. Random, not derived from the user.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

pub fn session_expiry() -> NaiveDateTime {
    (Utc::now() + Duration::hours(SESSION_HOURS)).naive_utc()
}
