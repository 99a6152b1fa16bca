//! Community groups with role-based membership

use crate::error::{AgoraError, Result};
use crate::types::{GroupId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a user inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// A single group membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// A community group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier
    pub id: GroupId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// User who created the group
    pub created_by: UserId,
    /// When the group was created
    pub created_at: DateTime<Utc>,
}

/// Store for groups and their members
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupStore {
    groups: HashMap<GroupId, Group>,
    /// Members per group, in join order
    members: HashMap<GroupId, Vec<Membership>>,
    next_id: i64,
}

impl GroupStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            members: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a group; the creator joins as admin
    pub fn create(
        &mut self,
        created_by: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Group> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AgoraError::Validation(
                "group name cannot be empty".to_string(),
            ));
        }

        let group = Group {
            id: GroupId::new(self.next_id),
            name: name.trim().to_string(),
            description: description.into(),
            created_by,
            created_at: Utc::now(),
        };
        self.next_id += 1;

        self.members.insert(
            group.id,
            vec![Membership {
                user_id: created_by,
                role: Role::Admin,
                joined_at: group.created_at,
            }],
        );
        self.groups.insert(group.id, group.clone());
        Ok(group)
    }

    /// Get a group by id
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Get a group or fail with a not-found error
    pub fn ensure_exists(&self, id: GroupId) -> Result<&Group> {
        self.get(id).ok_or(AgoraError::GroupNotFound(id))
    }

    /// Join a group as a regular member; returns `false` when already a member
    pub fn join(&mut self, user: UserId, group: GroupId) -> Result<bool> {
        if !self.groups.contains_key(&group) {
            return Err(AgoraError::GroupNotFound(group));
        }
        let members = self.members.entry(group).or_default();
        if members.iter().any(|m| m.user_id == user) {
            return Ok(false);
        }
        members.push(Membership {
            user_id: user,
            role: Role::Member,
            joined_at: Utc::now(),
        });
        Ok(true)
    }

    /// Leave a group; returns `false` when not a member
    pub fn leave(&mut self, user: UserId, group: GroupId) -> bool {
        self.members
            .get_mut(&group)
            .map(|members| {
                let before = members.len();
                members.retain(|m| m.user_id != user);
                members.len() < before
            })
            .unwrap_or(false)
    }

    /// Role of a user inside a group, if a member
    pub fn role_of(&self, user: UserId, group: GroupId) -> Option<Role> {
        self.members
            .get(&group)?
            .iter()
            .find(|m| m.user_id == user)
            .map(|m| m.role)
    }

    /// Members of a group in join order
    pub fn members_of(&self, group: GroupId) -> &[Membership] {
        self.members.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of members in a group
    pub fn member_count(&self, group: GroupId) -> usize {
        self.members.get(&group).map(Vec::len).unwrap_or(0)
    }

    /// Groups with the most members first
    pub fn active(&self, limit: usize) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.values().collect();
        groups.sort_by(|a, b| {
            self.member_count(b.id)
                .cmp(&self.member_count(a.id))
                .then(a.id.cmp(&b.id))
        });
        groups.truncate(limit);
        groups
    }

    /// Case-insensitive search over names and descriptions
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Group> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&Group> = self
            .groups
            .values()
            .filter(|g| {
                g.name.to_lowercase().contains(&query)
                    || g.description.to_lowercase().contains(&query)
            })
            .collect();
        matches.sort_by_key(|g| g.id);
        matches.truncate(limit);
        matches
    }

    /// Total group count
    pub fn count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_is_admin() {
        let mut store = GroupStore::new();
        let creator = UserId::new(1);
        let group = store.create(creator, "Photography", "Share your shots").unwrap();

        assert_eq!(store.role_of(creator, group.id), Some(Role::Admin));
        assert_eq!(store.member_count(group.id), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = GroupStore::new();
        assert!(store.create(UserId::new(1), "  ", "desc").is_err());
    }

    #[test]
    fn test_join_and_leave() {
        let mut store = GroupStore::new();
        let group = store.create(UserId::new(1), "Hiking", "Trails").unwrap();
        let joiner = UserId::new(2);

        assert!(store.join(joiner, group.id).unwrap());
        assert!(!store.join(joiner, group.id).unwrap());
        assert_eq!(store.role_of(joiner, group.id), Some(Role::Member));

        assert!(store.leave(joiner, group.id));
        assert!(!store.leave(joiner, group.id));
        assert_eq!(store.role_of(joiner, group.id), None);
    }

    #[test]
    fn test_join_missing_group() {
        let mut store = GroupStore::new();
        assert!(store.join(UserId::new(1), GroupId::new(5)).is_err());
    }

    #[test]
    fn test_active_ranks_by_member_count() {
        let mut store = GroupStore::new();
        let small = store.create(UserId::new(1), "Small", "").unwrap();
        let big = store.create(UserId::new(1), "Big", "").unwrap();
        store.join(UserId::new(2), big.id).unwrap();
        store.join(UserId::new(3), big.id).unwrap();

        let active = store.active(2);
        assert_eq!(active[0].id, big.id);
        assert_eq!(active[1].id, small.id);
    }

    #[test]
    fn test_search_matches_description() {
        let mut store = GroupStore::new();
        store
            .create(UserId::new(1), "Lens Club", "Photography enthusiasts")
            .unwrap();

        assert_eq!(store.search("photo", 10).len(), 1);
        assert_eq!(store.search("cooking", 10).len(), 0);
    }
}
