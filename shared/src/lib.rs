//! Shared types for the Third Thursday lunch bot
//!
//! Holds the data model exchanged between the bot and its collaborators
//! (visit history, rotation members, search candidates) plus the tracing
//! setup every binary uses.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
