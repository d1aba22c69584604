//! Top-level menu choices.

use std::str::FromStr;

use thiserror::Error;

/// Actions offered by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Leave the program.
    Exit = 0,
    /// Add a new item.
    Insert = 1,
    /// Remove an item by name.
    Remove = 2,
    /// Show every item.
    List = 3,
    /// Look an item up by name.
    Find = 4,
}

impl MenuChoice {
    /// Every choice in the order the menu displays them.
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Insert,
        MenuChoice::Remove,
        MenuChoice::List,
        MenuChoice::Find,
        MenuChoice::Exit,
    ];

    /// Numeric key typed by the user.
    pub fn key(self) -> u8 {
        self as u8
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit",
            MenuChoice::Insert => "Insert item",
            MenuChoice::Remove => "Remove item",
            MenuChoice::List => "List items",
            MenuChoice::Find => "Find item",
        }
    }
}

/// Raised for input that does not name a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The typed text is not one of the offered keys.
    #[error("invalid menu option '{0}'")]
    InvalidChoice(String),
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let choice = match trimmed.parse::<i64>() {
            Ok(0) => MenuChoice::Exit,
            Ok(1) => MenuChoice::Insert,
            Ok(2) => MenuChoice::Remove,
            Ok(3) => MenuChoice::List,
            Ok(4) => MenuChoice::Find,
            _ => return Err(MenuError::InvalidChoice(trimmed.to_string())),
        };
        Ok(choice)
    }
}
