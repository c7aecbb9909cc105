//! Collaborator implementations

pub mod http;
pub mod recognizer;
pub mod visit_store;
pub mod yelp;

#[cfg(test)]
pub mod tests;

pub use recognizer::*;
pub use visit_store::*;
pub use yelp::*;
