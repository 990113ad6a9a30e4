//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Category, Email, GeoPoint, TouristSpot, TouristSpotId, User, UserAccount, UserId, UserName,
};

use super::schema::{tourist_spots, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Row written to `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub photo: Option<&'a str>,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_account(self) -> Result<UserAccount, String> {
        let name = UserName::new(&self.name)
            .map_err(|err| format!("user {} has an invalid name: {err}", self.id))?;
        let email = Email::new(&self.email)
            .map_err(|err| format!("user {} has an invalid email: {err}", self.id))?;
        Ok(UserAccount {
            user: User {
                id: UserId::from_uuid(self.id),
                name,
                email,
                photo: self.photo,
                is_active: self.is_active,
                is_staff: self.is_staff,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
        })
    }
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = &account.user;
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            photo: user.photo.as_deref(),
            password_hash: account.password_hash.as_str(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}

/// Row read from `tourist_spots`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tourist_spots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TouristSpotRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub city: String,
    pub latitude_micro: i32,
    pub longitude_micro: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl TouristSpotRow {
    pub(crate) fn into_domain(self, image_count: u32) -> Result<TouristSpot, String> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|err| format!("tourist spot {}: {err}", self.id))?;
        let location = GeoPoint::from_micro_degrees(self.latitude_micro, self.longitude_micro)
            .map_err(|err| format!("tourist spot {}: {err}", self.id))?;
        Ok(TouristSpot {
            id: TouristSpotId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            city: self.city,
            location,
            category,
            image_count,
            created_at: self.created_at,
        })
    }
}
