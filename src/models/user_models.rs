use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::{prelude::Queryable, Insertable, Selectable};
use serde::{Deserialize, Serialize};

/// Closed role enumeration; the `role` column is validated through it at the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub recover_password: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

impl User {
    /// Unknown role strings fall back to the default role rather than
    /// granting anything.
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or_default()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub recover_password: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub created_on: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub updated_on: NaiveDate,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub recover_password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordForm {
    pub recover_password: String,
    pub password_old: String,
    pub password_new: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::from_str("admin"), Ok(Role::Admin));
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn unknown_role_falls_back_to_user() {
        let (created_at, created_on) = crate::models::now_stamps();
        let user = User {
            id: 1,
            username: "charly".into(),
            email: "charly@example.com".into(),
            password_hash: String::new(),
            recover_password: String::new(),
            role: "root".into(),
            created_at,
            created_on,
            updated_at: created_at,
            updated_on: created_on,
        };
        assert_eq!(user.role(), Role::User);
    }
}
