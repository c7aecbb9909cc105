//! Core bot logic: rotation, recommendations and reply formatting

pub mod cards;
pub mod messages;
pub mod recommendation;
pub mod rotation;

pub use recommendation::{RecommendationSelector, describe_rating_hint, interpret_rating_band};
pub use rotation::{NextPick, next_pick};
