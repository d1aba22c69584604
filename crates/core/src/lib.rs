#![warn(clippy::all, missing_docs)]

//! Core domain logic for the backpack inventory.
//!
//! This crate hosts the item model, the bounded backpack collection,
//! menu parsing, and configuration handling used by the command-line
//! frontend.

pub mod backpack;
pub mod config;
pub mod menu;
pub mod models;

pub use backpack::{Backpack, BackpackError, DEFAULT_CAPACITY};
pub use config::AppConfig;
pub use menu::{MenuChoice, MenuError};
pub use models::{FieldLimits, Item};
