//! Set-once display-name registry.

use std::collections::{HashMap, hash_map::Entry};

use crate::domain::{
    entity::{BindStatus, NameBinding},
    value_object::{DisplayName, UserId},
};

/// Maps a user to the display name bound on first use.
///
/// A binding is written while absent and never changed or removed afterwards.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    bindings: HashMap<UserId, DisplayName>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the bound name, binding `requested` (or the generated fallback)
    /// first if the user has none yet.
    pub fn resolve(&mut self, user_id: &UserId, requested: Option<DisplayName>) -> DisplayName {
        self.bindings
            .entry(user_id.clone())
            .or_insert_with(|| requested.unwrap_or_else(|| user_id.fallback_name()))
            .clone()
    }

    /// Explicit set-once. An existing binding wins and is returned unchanged.
    pub fn try_set(&mut self, user_id: UserId, name: DisplayName) -> NameBinding {
        match self.bindings.entry(user_id) {
            Entry::Occupied(entry) => NameBinding {
                status: BindStatus::AlreadyBound,
                name: entry.get().clone(),
            },
            Entry::Vacant(entry) => NameBinding {
                status: BindStatus::Created,
                name: entry.insert(name).clone(),
            },
        }
    }

    pub fn lookup(&self, user_id: &UserId) -> Option<DisplayName> {
        self.bindings.get(user_id).cloned()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
