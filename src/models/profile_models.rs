use chrono::{NaiveDate, NaiveDateTime};
use diesel::{prelude::Queryable, AsChangeset, Insertable, Selectable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_IMG: &str = "profiles/default_profile.jpg";
pub const DEFAULT_BANNER_IMG: &str = "banners/default_banner.jpg";

/// One-to-one personal profile, keyed by the owning user. Created lazily on
/// the first settings edit.
#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::user_information)]
pub struct UserInformation {
    pub user_id: i32,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_information)]
pub struct NewUserInformation {
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::user_information)]
pub struct PersonalForm {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
}

/// One-to-one media row with defaulted image paths.
#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::user_media)]
pub struct UserMedia {
    pub user_id: i32,
    pub profile_img_url: String,
    pub banner_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_media)]
pub struct NewUserMedia {
    pub user_id: i32,
    pub profile_img_url: String,
    pub banner_img_url: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::user_media)]
pub struct MediaForm {
    pub profile_img_url: Option<String>,
    pub banner_img_url: Option<String>,
}

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::user_socials)]
pub struct UserSocial {
    pub id: i32,
    pub user_id: i32,
    pub url: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_socials)]
pub struct NewUserSocial {
    pub user_id: i32,
    pub url: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Deserialize)]
pub struct SocialForm {
    pub url: String,
    pub name: String,
}
