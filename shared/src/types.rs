//! Core shared types and identifiers

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single conversational turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a member of the lunch rotation
pub type Member = String;

/// A past lunch: where the group went, who picked it and when
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "PickedBy")]
    pub picked_by: Member,
    #[serde(rename = "Date", deserialize_with = "deserialize_visit_date")]
    pub visited_on: NaiveDate,
}

impl VisitRecord {
    pub fn new(location: impl Into<String>, picked_by: impl Into<Member>, visited_on: NaiveDate) -> Self {
        Self {
            location: location.into(),
            picked_by: picked_by.into(),
            visited_on,
        }
    }
}

/// Accepts both `2019-03-15` and `2019-03-15T00:00:00` date strings
fn deserialize_visit_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_visit_date(&raw).map_err(serde::de::Error::custom)
}

/// Parse a visit date from either a plain date or a date-time string
pub fn parse_visit_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }
    // Firebase exports sometimes carry an offset
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| format!("unrecognised visit date: {raw}"))
}

/// A restaurant returned by the search collaborator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateRestaurant {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: f64,
    pub image_url: String,
    pub details_url: String,
}

impl CandidateRestaurant {
    /// Candidate with only a name and rating, the rest left blank
    pub fn named(name: impl Into<String>, rating: f64) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            phone: String::new(),
            rating,
            image_url: String::new(),
            details_url: String::new(),
        }
    }
}

/// Inclusive rating interval used to filter candidates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    pub low: f64,
    pub high: f64,
}

impl RatingBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band containing a single value
    pub const fn exactly(rating: f64) -> Self {
        Self { low: rating, high: rating }
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.low && rating <= self.high
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.low, self.high)
    }
}

/// External service the bot depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collaborator {
    VisitStore,
    RestaurantSearch,
    IntentRecognizer,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::VisitStore => write!(f, "visit store"),
            Collaborator::RestaurantSearch => write!(f, "restaurant search"),
            Collaborator::IntentRecognizer => write!(f, "intent recognizer"),
        }
    }
}

/// Reasons a collaborator call can fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    AuthenticationFailed,
    RateLimitExceeded,
    ServiceUnavailable,
    ServerError(String),
    NetworkError(String),
    InvalidResponse(String),
    NotConfigured(String),
}

impl ApiFailure {
    /// Map a non-success HTTP status to a failure
    pub fn from_status(status: u16, reason: &str) -> Self {
        match status {
            401 | 403 => ApiFailure::AuthenticationFailed,
            429 => ApiFailure::RateLimitExceeded,
            503 => ApiFailure::ServiceUnavailable,
            _ => ApiFailure::ServerError(format!("{status} {reason}")),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::ServiceUnavailable => write!(f, "service unavailable"),
            ApiFailure::ServerError(detail) => write!(f, "server error: {detail}"),
            ApiFailure::NetworkError(detail) => write!(f, "network error: {detail}"),
            ApiFailure::InvalidResponse(detail) => write!(f, "invalid response: {detail}"),
            ApiFailure::NotConfigured(detail) => write!(f, "not configured: {detail}"),
        }
    }
}
