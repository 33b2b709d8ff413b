pub mod album_models;
pub mod comment_models;
pub mod profile_models;
pub mod session_models;
pub mod song_models;
pub mod user_models;

use chrono::{NaiveDate, NaiveDateTime, Utc};

/// Timestamp pair stamped onto new and updated rows.
pub(crate) fn now_stamps() -> (NaiveDateTime, NaiveDate) {
    let now = Utc::now().naive_utc();
    (now, now.date())
}
