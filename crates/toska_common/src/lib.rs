//! Shared library for the Toska restaurant chatbot.
//!
//! Holds everything both the daemon and the CLI client need: configuration,
//! the SQLite-backed menu store, the chat engine, the extractive QA engine,
//! and the API wire types.

pub mod api;
pub mod chat;
pub mod config;
pub mod menu;
pub mod qa;

pub use api::{HealthResponse, MenuItemBody, NewMenuItem};
pub use chat::{ChatEngine, ChatReply};
pub use config::ToskaConfig;
pub use menu::{MenuItem, MenuStore};
pub use qa::{QaAnswer, QaEngine, QaError};
