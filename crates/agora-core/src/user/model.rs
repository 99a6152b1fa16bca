//! User data models

use crate::comment::AuthorInfo;
use crate::types::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Unique username
    pub username: String,
    /// Email address
    pub email: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Profile photo URL
    pub profile_photo: Option<String>,
    /// Short bio
    pub bio: Option<String>,
    /// Free-form location
    pub location: Option<String>,
    /// Personal website URL
    pub website: Option<String>,
    /// Verified account badge
    #[serde(default)]
    pub is_verified: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a partial profile update and refresh updated_at
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = birth_date;
        }
        if update.profile_photo.is_some() {
            self.profile_photo = update.profile_photo;
        }
        if update.bio.is_some() {
            self.bio = update.bio;
        }
        if update.location.is_some() {
            self.location = update.location;
        }
        if update.website.is_some() {
            self.website = update.website;
        }
        self.updated_at = Utc::now();
    }

    /// Display fields denormalized onto comments
    pub fn author_info(&self) -> AuthorInfo {
        AuthorInfo {
            username: self.username.clone(),
            profile_photo: self.profile_photo.clone(),
        }
    }
}

/// Registration form for a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Requested username
    pub username: String,
    /// Email address
    pub email: String,
    /// Date of birth
    pub birth_date: NaiveDate,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_photo: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}
