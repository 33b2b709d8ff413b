use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::{prelude::Queryable, Insertable, Selectable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SONG_IMG: &str = "songs/default_song.png";

/// Closed song-type enumeration. The `type` column is only ever written
/// through `as_str`, so unknown values cannot enter the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongKind {
    Original,
    Remix,
    Live,
    Recording,
    Demo,
    Work,
    Effect,
    Other,
}

impl SongKind {
    pub const ALL: [SongKind; 8] = [
        SongKind::Original,
        SongKind::Remix,
        SongKind::Live,
        SongKind::Recording,
        SongKind::Demo,
        SongKind::Work,
        SongKind::Effect,
        SongKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SongKind::Original => "original",
            SongKind::Remix => "remix",
            SongKind::Live => "live",
            SongKind::Recording => "recording",
            SongKind::Demo => "demo",
            SongKind::Work => "work",
            SongKind::Effect => "effect",
            SongKind::Other => "other",
        }
    }
}

impl Default for SongKind {
    fn default() -> Self {
        SongKind::Original
    }
}

impl FromStr for SongKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SongKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum License {
    CreativeCommons,
    AllRightsReserved,
}

impl License {
    pub const ALL: [License; 2] = [License::CreativeCommons, License::AllRightsReserved];

    pub fn as_str(&self) -> &'static str {
        match self {
            License::CreativeCommons => "creative_commons",
            License::AllRightsReserved => "all_rights_reserved",
        }
    }
}

impl FromStr for License {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        License::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or(())
    }
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::songs)]
pub struct Song {
    pub id: i32,
    pub user_id: i32,
    pub url_song: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub license: String,
    pub replay: i32,
    pub likes: i32,
    pub song_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::songs)]
pub struct NewSong {
    pub user_id: i32,
    pub url_song: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub kind: String,
    pub license: String,
    pub song_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

/// Create-song form, validated at the boundary before any write.
#[derive(Deserialize)]
pub struct SongForm {
    pub url_song: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub license: String,
}

/// View state for the create-song form: the closed enumerations the picker
/// offers.
#[derive(Serialize)]
pub struct SongFormOptions {
    pub kinds: Vec<&'static str>,
    pub licenses: Vec<&'static str>,
}

impl SongFormOptions {
    pub fn new() -> Self {
        Self {
            kinds: SongKind::ALL.iter().map(|k| k.as_str()).collect(),
            licenses: License::ALL.iter().map(|l| l.as_str()).collect(),
        }
    }
}
