//! Bounded, ordered item storage.

use thiserror::Error;
use tracing::debug;

use crate::models::Item;

/// Number of slots in a freshly created backpack.
pub const DEFAULT_CAPACITY: usize = 10;

/// Recoverable failures reported by [`Backpack`] operations.
///
/// A failed operation never modifies the backpack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackpackError {
    /// Every slot is taken.
    #[error("backpack is full ({capacity} items)")]
    Full {
        /// Capacity of the rejecting backpack.
        capacity: usize,
    },
    /// Nothing to operate on.
    #[error("backpack is empty")]
    Empty,
    /// No item carries the requested name.
    #[error("item '{0}' not found")]
    NotFound(String),
}

/// Fixed-capacity list of items kept in insertion order.
///
/// Names are not unique. Lookups and removals always act on the first
/// (lowest position) match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backpack {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Backpack {
    fn default() -> Self {
        Self::new()
    }
}

impl Backpack {
    /// Create an empty backpack with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty backpack holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another insert would be rejected.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// All items in storage order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over items in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Append an item, returning the position it was stored at.
    pub fn insert(&mut self, item: Item) -> Result<usize, BackpackError> {
        if self.is_full() {
            debug!(name = %item.name, capacity = self.capacity, "insert rejected, backpack full");
            return Err(BackpackError::Full {
                capacity: self.capacity,
            });
        }

        let position = self.items.len();
        debug!(name = %item.name, position, "item inserted");
        self.items.push(item);
        Ok(position)
    }

    /// Remove the first item named `name`, shifting later items down by one.
    pub fn remove_by_name(&mut self, name: &str) -> Result<(usize, Item), BackpackError> {
        if self.is_empty() {
            debug!(name, "remove rejected, backpack empty");
            return Err(BackpackError::Empty);
        }

        let Some(position) = self.position_of(name) else {
            debug!(name, "remove rejected, no match");
            return Err(BackpackError::NotFound(name.to_string()));
        };

        let removed = self.items.remove(position);
        debug!(name, position, remaining = self.items.len(), "item removed");
        Ok((position, removed))
    }

    /// First item whose name equals `name` exactly, with its position.
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| item.name == name)
    }

    /// Position of the first item named `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }
}

impl<'a> IntoIterator for &'a Backpack {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
