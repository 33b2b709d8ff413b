use chrono::{NaiveDate, NaiveDateTime};
use diesel::{prelude::Queryable, Insertable, Selectable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALBUM_IMG: &str = "album/default_album.jpg";

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::albums)]
pub struct Album {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub likes: i32,
    pub album_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::albums)]
pub struct NewAlbum {
    pub user_id: i32,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub album_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

/// Join row tying a song into an album; both sides must exist.
#[derive(Queryable, Insertable, Serialize)]
#[diesel(table_name = crate::schema::album_songs)]
pub struct AlbumSong {
    pub album_id: i32,
    pub song_id: i32,
}

/// Create-album form. `song_ids` is the picklist of the user's own songs,
/// submitted as a comma-separated list.
#[derive(Deserialize)]
pub struct AlbumForm {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub song_ids: Option<String>,
}

impl AlbumForm {
    pub fn song_ids(&self) -> Vec<i32> {
        self.song_ids
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_ids_parse_from_csv() {
        let form = AlbumForm {
            name: "Demos".into(),
            date: None,
            song_ids: Some("1, 2,9".into()),
        };
        assert_eq!(form.song_ids(), vec![1, 2, 9]);
    }

    #[test]
    fn missing_song_ids_mean_empty_picklist() {
        let form = AlbumForm {
            name: "Demos".into(),
            date: None,
            song_ids: None,
        };
        assert!(form.song_ids().is_empty());
    }
}
