//! Menu storage
//!
//! A single SQLite table of menu items, read by the chat engine and the
//! HTTP endpoints. Rows are normally loaded out-of-band or via the
//! `toskactl add` command.

mod store;

pub use store::MenuStore;

use serde::{Deserialize, Serialize};

/// One dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Surrogate id assigned by SQLite on insert
    pub id: i64,
    pub name: String,
    /// Whole-unit price; currency is presentation-side
    pub price: i64,
    pub description: String,
}
