//! Restaurant search backends: Yelp Fusion and a fixed offline catalog

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use shared::{ApiFailure, CandidateRestaurant};
use crate::services::http;
use crate::traits::RestaurantSearch;

pub const DEFAULT_YELP_API_URL: &str = "https://api.yelp.com/";

/// Term used when the caller has nothing specific in mind
pub const DEFAULT_SEARCH_TERM: &str = "food";

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at.map_or(true, |expiry| Instant::now() < expiry)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Bearer credential owned by one search client.
///
/// With a client id the secret is exchanged for an access token on first
/// use; without one the secret is itself the API key. The token is cached
/// until it expires or is invalidated.
#[derive(Debug)]
pub struct YelpCredential {
    client_id: Option<String>,
    client_secret: String,
    token: RwLock<Option<CachedToken>>,
}

impl YelpCredential {
    pub fn new(client_id: Option<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.filter(|id| !id.trim().is_empty()),
            client_secret: client_secret.into(),
            token: RwLock::new(None),
        }
    }

    /// Plain API key credential
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::new(None, key)
    }

    /// Whether a fresh token can be obtained after invalidation
    pub fn is_refreshable(&self) -> bool {
        self.client_id.is_some()
    }

    /// Drop the cached token so the next request fetches a new one
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    /// Current bearer token, fetching one if needed
    pub async fn bearer(&self, client: &Client, token_url: &Url) -> Result<String, ApiFailure> {
        if let Some(token) = self.token.read().await.as_ref().filter(|token| token.is_fresh()) {
            return Ok(token.value.clone());
        }

        let mut slot = self.token.write().await;
        // another turn may have refreshed while we waited
        if let Some(token) = slot.as_ref().filter(|token| token.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = match &self.client_id {
            Some(client_id) => self.exchange(client, token_url, client_id).await?,
            None => CachedToken {
                value: self.client_secret.clone(),
                expires_at: None,
            },
        };
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn exchange(&self, client: &Client, token_url: &Url, client_id: &str) -> Result<CachedToken, ApiFailure> {
        if self.client_secret.trim().is_empty() {
            return Err(ApiFailure::NotConfigured("Yelp client secret".to_string()));
        }
        info!("Requesting Yelp access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", self.client_secret.as_str()),
        ];
        let response = http::send(client.post(token_url.clone()).form(&form)).await?;
        let body: TokenResponse = http::decode(response).await?;

        Ok(CachedToken {
            value: body.access_token,
            expires_at: body.expires_in.map(|secs| Instant::now() + Duration::from_secs(secs)),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Deserialize)]
struct YelpBusiness {
    name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    display_phone: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    location: Option<YelpLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct YelpLocation {
    #[serde(default)]
    display_address: Vec<String>,
    #[serde(default)]
    address1: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

impl YelpLocation {
    fn full_address(&self) -> String {
        if !self.display_address.is_empty() {
            return self.display_address.join(", ");
        }
        [self.address1.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<YelpBusiness> for CandidateRestaurant {
    fn from(business: YelpBusiness) -> Self {
        let phone = business
            .display_phone
            .filter(|phone| !phone.is_empty())
            .or(business.phone)
            .unwrap_or_default();
        CandidateRestaurant {
            name: business.name,
            address: business.location.unwrap_or_default().full_address(),
            phone,
            rating: business.rating,
            image_url: business.image_url.unwrap_or_default(),
            details_url: business.url.unwrap_or_default(),
        }
    }
}

/// Yelp Fusion business search
pub struct YelpSearch {
    client: Client,
    search_url: Url,
    token_url: Url,
    credential: YelpCredential,
}

impl YelpSearch {
    pub fn new(api_url: &str, credential: YelpCredential, timeout: Duration) -> Result<Self, ApiFailure> {
        let base = http::parse_base_url(api_url)?;
        Ok(Self {
            client: http::build_client(timeout)?,
            search_url: http::endpoint(&base, "v3/businesses/search")?,
            token_url: http::endpoint(&base, "oauth2/token")?,
            credential,
        })
    }

    async fn request(&self, term: &str, location: &str, limit: u32) -> Result<reqwest::Response, ApiFailure> {
        let token = self.credential.bearer(&self.client, &self.token_url).await?;
        let limit = limit.to_string();
        let query = [("term", term), ("location", location), ("limit", limit.as_str())];

        self.client
            .get(self.search_url.clone())
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiFailure::NetworkError(e.to_string()))
    }
}

#[async_trait]
impl RestaurantSearch for YelpSearch {
    async fn search(&self, term: &str, location: &str, limit: u32) -> Result<Vec<CandidateRestaurant>, ApiFailure> {
        let term = if term.trim().is_empty() { DEFAULT_SEARCH_TERM } else { term.trim() };
        debug!(term, location, limit, "Searching Yelp");

        let mut response = self.request(term, location, limit).await?;
        if response.status() == StatusCode::UNAUTHORIZED && self.credential.is_refreshable() {
            warn!("Yelp rejected the cached token, refreshing");
            self.credential.invalidate().await;
            response = self.request(term, location, limit).await?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure::from_status(status.as_u16(), status.canonical_reason().unwrap_or("")));
        }

        let body: SearchResponse = http::decode(response).await?;
        Ok(body.businesses.into_iter().map(CandidateRestaurant::from).collect())
    }
}

/// Offline search over a fixed catalog.
///
/// The default term matches everything; any other term filters by
/// case-insensitive name containment. `location` is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticRestaurantSearch {
    catalog: Vec<CandidateRestaurant>,
}

impl StaticRestaurantSearch {
    pub fn new(catalog: Vec<CandidateRestaurant>) -> Self {
        Self { catalog }
    }

    /// A handful of places around Lake Charles, including some already visited
    pub fn lake_charles() -> Self {
        let place = |name: &str, address: &str, phone: &str, rating: f64, slug: &str| CandidateRestaurant {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            rating,
            image_url: String::new(),
            details_url: format!("https://www.yelp.com/biz/{slug}"),
        };
        Self::new(vec![
            place("Wendys", "2801 Ryan St, Lake Charles, LA 70601", "(337) 555-0110", 2.5, "wendys-lake-charles"),
            place("McDonald's Drive-Thru", "3400 Ryan St, Lake Charles, LA 70605", "(337) 555-0111", 2.0, "mcdonalds-lake-charles"),
            place("Pizza Hut Express", "201 W Prien Lake Rd, Lake Charles, LA 70601", "(337) 555-0112", 2.5, "pizza-hut-lake-charles"),
            place("Cafe Mosaic", "1301 Ryan St, Lake Charles, LA 70601", "(337) 555-0113", 4.5, "cafe-mosaic-lake-charles"),
            place("Steamboat Bill's", "1004 N Lakeshore Dr, Lake Charles, LA 70601", "(337) 555-0114", 4.0, "steamboat-bills-lake-charles"),
            place("Pitt Grill", "1501 Ryan St, Lake Charles, LA 70601", "(337) 555-0115", 3.5, "pitt-grill-lake-charles"),
            place("Darrell's", "119 W College St, Lake Charles, LA 70605", "(337) 555-0116", 4.5, "darrells-lake-charles"),
            place("Southern Spice", "3901 Nelson Rd, Lake Charles, LA 70605", "(337) 555-0117", 3.0, "southern-spice-lake-charles"),
            place("Seafood Palace", "2218 Enterprise Blvd, Lake Charles, LA 70601", "(337) 555-0118", 4.0, "seafood-palace-lake-charles"),
            place("Roadside Diner", "5200 Hwy 14, Lake Charles, LA 70607", "(337) 555-0119", 2.0, "roadside-diner-lake-charles"),
        ])
    }
}

#[async_trait]
impl RestaurantSearch for StaticRestaurantSearch {
    async fn search(&self, term: &str, _location: &str, limit: u32) -> Result<Vec<CandidateRestaurant>, ApiFailure> {
        let wanted = term.trim().to_lowercase();
        let match_all = wanted.is_empty() || wanted == DEFAULT_SEARCH_TERM;

        Ok(self
            .catalog
            .iter()
            .filter(|candidate| match_all || candidate.name.to_lowercase().contains(&wanted))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
