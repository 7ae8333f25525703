//! Corpus: the users and items of one experiment run
//!
//! Both collections keep their load order, which the recommenders rely on
//! for tie-breaking, and are indexed by id for constant-time lookup.

use crate::error::FairRecError;
use crate::models::item::{Item, ItemId};
use crate::models::user::{User, UserId};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Wire shape of a corpus document: `{ "users": [...], "items": [...] }`
#[derive(Debug, Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    items: Vec<Item>,
}

/// Immutable users + items for a run
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "CorpusDocument")]
pub struct Corpus {
    users: Vec<User>,
    items: Vec<Arc<Item>>,
    user_index: HashMap<UserId, usize>,
    item_index: HashMap<ItemId, usize>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate user or item ids
    pub fn new(users: Vec<User>, items: Vec<Item>) -> Result<Self, FairRecError> {
        let mut user_index = HashMap::with_capacity(users.len());
        for (position, user) in users.iter().enumerate() {
            if user_index.insert(user.id, position).is_some() {
                return Err(FairRecError::InvalidCorpus(format!(
                    "duplicate user id {}",
                    user.id
                )));
            }
        }

        let mut item_index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item_index.insert(item.id, position).is_some() {
                return Err(FairRecError::InvalidCorpus(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
        }

        debug!(
            users = users.len(),
            items = items.len(),
            "Corpus indexed"
        );

        Ok(Self {
            users,
            items: items.into_iter().map(Arc::new).collect(),
            user_index,
            item_index,
        })
    }

    /// Parse a corpus from a JSON document
    pub fn from_json(json: &str) -> Result<Self, FairRecError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&position| &self.users[position])
    }

    pub fn item(&self, id: ItemId) -> Option<&Arc<Item>> {
        self.item_index.get(&id).map(|&position| &self.items[position])
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.items.is_empty()
    }
}

impl TryFrom<CorpusDocument> for Corpus {
    type Error = FairRecError;

    fn try_from(document: CorpusDocument) -> Result<Self, Self::Error> {
        Self::new(document.users, document.items)
    }
}
