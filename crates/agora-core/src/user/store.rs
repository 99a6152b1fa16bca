//! In-memory user store

use super::model::{NewUser, ProfileUpdate, User};
use crate::error::{AgoraError, Result};
use crate::types::UserId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store for user accounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStore {
    users: HashMap<UserId, User>,
    next_id: i64,
}

impl UserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a new user; usernames are unique
    pub fn create(&mut self, form: NewUser) -> Result<User> {
        let username = form.username.trim();
        if username.is_empty() {
            return Err(AgoraError::Validation(
                "username cannot be empty".to_string(),
            ));
        }
        if self.by_username(username).is_some() {
            return Err(AgoraError::Validation(format!(
                "username '{}' is already taken",
                username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(self.next_id),
            username: username.to_string(),
            email: form.email,
            birth_date: form.birth_date,
            profile_photo: None,
            bio: None,
            location: None,
            website: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Get a user by id
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Look up a user by exact username
    pub fn by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }

    /// Check a user exists, returning an error when not
    pub fn ensure_exists(&self, id: UserId) -> Result<&User> {
        self.users.get(&id).ok_or(AgoraError::UserNotFound(id))
    }

    /// Apply a partial profile update
    pub fn update_profile(&mut self, id: UserId, update: ProfileUpdate) -> Result<User> {
        if let Some(new_name) = update.username.as_deref() {
            if self.by_username(new_name).is_some_and(|u| u.id != id) {
                return Err(AgoraError::Validation(format!(
                    "username '{}' is already taken",
                    new_name
                )));
            }
        }

        let user = self.users.get_mut(&id).ok_or(AgoraError::UserNotFound(id))?;
        user.apply(update);
        Ok(user.clone())
    }

    /// Mark a user as verified
    pub fn set_verified(&mut self, id: UserId, verified: bool) -> Result<()> {
        let user = self.users.get_mut(&id).ok_or(AgoraError::UserNotFound(id))?;
        user.is_verified = verified;
        Ok(())
    }

    /// Case-insensitive search over usernames and bios.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&User> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&User> = self
            .users
            .values()
            .filter(|u| {
                u.username.to_lowercase().contains(&query)
                    || u.bio
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&query))
            })
            .collect();
        matches.sort_by_key(|u| u.id);
        matches.truncate(limit);
        matches
    }

    /// All users
    pub fn all(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Total user count
    pub fn count(&self) -> usize {
        self.users.len()
    }
}
