//! Shared domain models.

use std::fmt;

/// Visible characters kept for an item name.
pub const DEFAULT_NAME_MAX_LEN: usize = 29;
/// Visible characters kept for an item type label.
pub const DEFAULT_KIND_MAX_LEN: usize = 19;

/// A single entry carried in the backpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Name used for lookups (case-sensitive).
    pub name: String,
    /// Free-form category label such as `weapon`, `ammo` or `healing`.
    pub kind: String,
    /// Number of units; any sign is accepted.
    pub quantity: i32,
}

impl Item {
    /// Build an item from its three fields.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            quantity,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Type: {}", self.kind)?;
        write!(f, "  Quantity: {}", self.quantity)
    }
}

/// Maximum widths applied to text read from the user.
///
/// Clipping happens where input enters the program; [`crate::Backpack`]
/// stores whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    /// Limit for names and name queries.
    pub name: usize,
    /// Limit for type labels.
    pub kind: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_MAX_LEN,
            kind: DEFAULT_KIND_MAX_LEN,
        }
    }
}

impl FieldLimits {
    /// Clip a name or name query.
    pub fn clip_name(&self, text: &str) -> String {
        clip(text, self.name)
    }

    /// Clip a type label.
    pub fn clip_kind(&self, text: &str) -> String {
        clip(text, self.kind)
    }
}

fn clip(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
