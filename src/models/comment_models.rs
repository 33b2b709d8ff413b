use chrono::{NaiveDate, NaiveDateTime};
use diesel::{prelude::Queryable, Insertable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::comment_songs)]
pub struct CommentSong {
    pub id: i32,
    pub song_id: i32,
    pub text: String,
    pub likes: i32,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comment_songs)]
pub struct NewCommentSong {
    pub song_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::comment_albums)]
pub struct CommentAlbum {
    pub id: i32,
    pub album_id: i32,
    pub text: String,
    pub likes: i32,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comment_albums)]
pub struct NewCommentAlbum {
    pub album_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Deserialize)]
pub struct CommentForm {
    pub text: String,
}
