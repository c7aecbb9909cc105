//! Tests for the collaborator implementations
//!
//! HTTP backends are exercised against wiremock servers; the offline
//! backends are tested directly.

pub mod recognizer;
pub mod visit_store;
