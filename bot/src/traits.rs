//! Collaborator trait definitions for dependency injection

use async_trait::async_trait;

use shared::{ApiFailure, CandidateRestaurant, Member, VisitRecord};
use crate::types::Recognition;

/// Persistence collaborator holding the group's lunch history
#[mockall::automock]
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Every recorded visit, in the order the store returns them
    async fn fetch_all_visits(&self) -> Result<Vec<VisitRecord>, ApiFailure>;

    /// The rotation, in picking order
    async fn fetch_members(&self) -> Result<Vec<Member>, ApiFailure>;

    /// The most recent visit by date, `None` when there is no history yet
    async fn fetch_last_visit(&self) -> Result<Option<VisitRecord>, ApiFailure> {
        let visits = self.fetch_all_visits().await?;
        Ok(visits.into_iter().max_by_key(|visit| visit.visited_on))
    }
}

/// Restaurant search collaborator
#[mockall::automock]
#[async_trait]
pub trait RestaurantSearch: Send + Sync {
    /// Search for up to `limit` restaurants matching `term` near `location`
    async fn search(&self, term: &str, location: &str, limit: u32) -> Result<Vec<CandidateRestaurant>, ApiFailure>;
}

/// Natural-language intent recognition collaborator
#[mockall::automock]
#[async_trait]
pub trait IntentRecognizer: Send + Sync {
    /// Classify an utterance into an intent plus any extracted entities
    async fn recognize(&self, utterance: &str) -> Result<Recognition, ApiFailure>;
}
