//! Third Thursday lunch bot
//!
//! Answers questions about the group's monthly lunch: where we've been, who
//! picked it, whose turn is next, and where to try next. Visit history,
//! restaurant search and intent recognition are collaborators behind traits,
//! each with an offline and an online implementation.

pub mod bot_impl;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use bot_impl::Bot;
pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use traits::*;
pub use types::*;
