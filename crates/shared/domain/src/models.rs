//! Forum entities owned by the host platform.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type CategoryId = u64;
pub type TopicId = u64;
pub type UserId = u64;
pub type GroupId = u64;

/// A grouping of topics with its own access configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Loosely typed plugin settings, stored the way the host stores them.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    /// Groups whose members may read the category. Empty means unrestricted.
    #[serde(default)]
    pub group_ids: BTreeSet<GroupId>,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), custom_fields: BTreeMap::new(), group_ids: BTreeSet::new() }
    }

    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_group_restricted(&self) -> bool {
        !self.group_ids.is_empty()
    }
}

/// A topic's kind tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    #[default]
    Regular,
    PrivateMessage,
}

impl Archetype {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::PrivateMessage => "private_message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub archetype: Archetype,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub group_ids: BTreeSet<GroupId>,
    #[serde(default)]
    pub admin: bool,
}

/// Whoever is making the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(User),
}

impl Viewer {
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// Group memberships; `None` for anonymous viewers.
    #[must_use]
    pub fn group_ids(&self) -> Option<&BTreeSet<GroupId>> {
        self.user().map(|user| &user.group_ids)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.admin)
    }
}

/// Initial forum content loaded into the in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumSeed {
    pub categories: Vec<Category>,
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
}
