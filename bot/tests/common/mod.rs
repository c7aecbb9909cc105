//! Common test utilities and infrastructure
//!
//! Shared fixtures and builders used by the bot's integration suites.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{BotBuilder, TestHelpers};
