//! Visit history backends: an in-memory store and a Firebase realtime database

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::debug;
use url::Url;

use shared::{ApiFailure, Member, VisitRecord};
use crate::services::http;
use crate::traits::VisitStore;

/// Visit store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryVisitStore {
    visits: Vec<VisitRecord>,
    members: Vec<Member>,
}

impl InMemoryVisitStore {
    pub fn new(visits: Vec<VisitRecord>, members: Vec<Member>) -> Self {
        Self { visits, members }
    }

    /// The group's history up to the summer of 2019
    pub fn seeded() -> Self {
        let visit = |location: &str, picked_by: &str, y: i32, m: u32, d: u32| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| VisitRecord::new(location, picked_by, date))
        };
        let visits = [
            visit("Wendys", "Mike", 2019, 3, 15),
            visit("Burger King", "Trey", 2019, 4, 19),
            visit("McDonalds", "Anthony", 2019, 5, 17),
            visit("Taco Bell", "Mike", 2019, 6, 21),
            visit("Pizza Hut", "Trey", 2019, 7, 19),
        ]
        .into_iter()
        .flatten()
        .collect();
        let members = ["Mike", "Trey", "Anthony"].iter().map(|m| m.to_string()).collect();

        Self::new(visits, members)
    }
}

#[async_trait]
impl VisitStore for InMemoryVisitStore {
    async fn fetch_all_visits(&self) -> Result<Vec<VisitRecord>, ApiFailure> {
        Ok(self.visits.clone())
    }

    async fn fetch_members(&self) -> Result<Vec<Member>, ApiFailure> {
        Ok(self.members.clone())
    }
}

/// Visit store backed by a Firebase realtime database.
///
/// Visits live under `/Restaurants` and the rotation under `/Members`, both
/// read through the REST `.json` endpoints.
pub struct FirebaseVisitStore {
    client: Client,
    base_url: Url,
}

impl FirebaseVisitStore {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ApiFailure> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::parse_base_url(endpoint)?,
        })
    }

    /// Firebase answers `null` for a missing node and may leave holes in arrays
    async fn fetch_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiFailure> {
        let url = http::endpoint(&self.base_url, path)?;
        debug!(url = %url, "Fetching from Firebase");

        let response = http::send(self.client.get(url)).await?;
        let items: Option<Vec<Option<T>>> = http::decode(response).await?;
        Ok(items.unwrap_or_default().into_iter().flatten().collect())
    }
}

#[async_trait]
impl VisitStore for FirebaseVisitStore {
    async fn fetch_all_visits(&self) -> Result<Vec<VisitRecord>, ApiFailure> {
        self.fetch_list("Restaurants/.json").await
    }

    async fn fetch_members(&self) -> Result<Vec<Member>, ApiFailure> {
        self.fetch_list("Members/.json").await
    }
}
