//! Bot implementation with dependency injection

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use shared::logging;
use shared::{CandidateRestaurant, TurnId, VisitRecord, turn_debug, turn_info, turn_warn};
use crate::config::{BotConfig, RecognizerBackend, SearchBackend, StoreBackend};
use crate::core::{RecommendationSelector, cards, describe_rating_hint, messages, next_pick};
use crate::error::{BotError, BotResult};
use crate::services::{
    DEFAULT_SEARCH_TERM, FirebaseVisitStore, InMemoryVisitStore, LuisRecognizer, RegexRecognizer, StaticRestaurantSearch,
    YelpCredential, YelpSearch,
};
use crate::traits::{IntentRecognizer, RestaurantSearch, VisitStore};
use crate::types::{Intent, Recognition, Reply};

/// How many candidates to ask the search collaborator for
pub const SEARCH_LIMIT: u32 = 50;

/// Conversational bot answering questions about the lunch rotation.
///
/// Each call to [`Bot::handle_turn`] is independent; collaborator failures
/// become apology replies and never escape the turn.
pub struct Bot {
    visit_store: Arc<dyn VisitStore>,
    search: Arc<dyn RestaurantSearch>,
    recognizer: Arc<dyn IntentRecognizer>,
    preferred_location: String,
    rng: Mutex<StdRng>,
    today: Option<NaiveDate>,
}

impl Bot {
    /// Create new bot instance
    pub fn new(
        visit_store: Arc<dyn VisitStore>,
        search: Arc<dyn RestaurantSearch>,
        recognizer: Arc<dyn IntentRecognizer>,
        preferred_location: impl Into<String>,
    ) -> Self {
        Self {
            visit_store,
            search,
            recognizer,
            preferred_location: preferred_location.into(),
            rng: Mutex::new(StdRng::from_entropy()),
            today: None,
        }
    }

    /// Build a bot with the backends selected in `config`
    pub fn from_config(config: &BotConfig) -> BotResult<Self> {
        config.validate()?;
        let not_configured = |message: String| BotError::ConfigError { message };

        let visit_store: Arc<dyn VisitStore> = match config.store {
            StoreBackend::Memory => Arc::new(InMemoryVisitStore::seeded()),
            StoreBackend::Firebase => {
                let endpoint = config.database_endpoint.as_deref().unwrap_or_default();
                let store = FirebaseVisitStore::new(endpoint, config.http_timeout)
                    .map_err(|reason| not_configured(format!("firebase visit store: {reason}")))?;
                Arc::new(store)
            }
        };

        let search: Arc<dyn RestaurantSearch> = match config.search {
            SearchBackend::Static => Arc::new(StaticRestaurantSearch::lake_charles()),
            SearchBackend::Yelp => {
                let credential = YelpCredential::new(
                    config.yelp.client_id.clone(),
                    config.yelp.client_secret.clone().unwrap_or_default(),
                );
                let yelp = YelpSearch::new(&config.yelp.api_url, credential, config.http_timeout)
                    .map_err(|reason| not_configured(format!("yelp search: {reason}")))?;
                Arc::new(yelp)
            }
        };

        let recognizer: Arc<dyn IntentRecognizer> = match config.recognizer {
            RecognizerBackend::Regex => Arc::new(RegexRecognizer::new()?),
            RecognizerBackend::Luis => {
                let luis = LuisRecognizer::new(
                    &config.luis.url,
                    &config.luis.model_id,
                    &config.luis.subscription_key,
                    config.http_timeout,
                )
                .map_err(|reason| not_configured(format!("luis recognizer: {reason}")))?;
                Arc::new(luis)
            }
        };

        Ok(Self::new(visit_store, search, recognizer, config.preferred_location.clone()))
    }

    /// Make recommendations reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Pin the date used when there is no lunch history
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn preferred_location(&self) -> &str {
        &self.preferred_location
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Answer one message
    pub async fn handle_turn(&self, utterance: &str) -> Reply {
        let turn_id = TurnId::new();
        turn_debug!(turn_id, utterance, "Handling message");

        let recognition = match self.recognizer.recognize(utterance).await {
            Ok(recognition) => recognition,
            Err(reason) => {
                let error = BotError::recognizer(reason);
                turn_warn!(turn_id, error = %error, "Falling back to the default response");
                Recognition::unrecognized()
            }
        };
        turn_info!(turn_id, intent = %recognition.intent, "Recognized intent");

        self.dispatch(&turn_id, recognition).await
    }

    /// Route a recognized message to its handler
    pub async fn dispatch(&self, turn_id: &TurnId, recognition: Recognition) -> Reply {
        match recognition.intent {
            Intent::History => match recognition.restaurant.as_deref() {
                Some(name) if name.trim().is_empty() => Reply::text(messages::UNRECOGNIZABLE_RESTAURANT),
                Some(name) => self.reply_with_history_lookup(turn_id, name.trim()).await,
                None => self.reply_with_listing(turn_id).await,
            },
            Intent::Suggestion => {
                self.reply_with_recommendation(turn_id, recognition.star_rating.as_deref())
                    .await
            }
            Intent::WhosNext => self.reply_with_next_member(turn_id).await,
            Intent::None => Reply::text(messages::DEFAULT_RESPONSE),
        }
    }

    /// Find a previous visit by name, ignoring case
    pub async fn find_visit(&self, restaurant: &str) -> BotResult<Option<VisitRecord>> {
        let visits = self.visit_store.fetch_all_visits().await.map_err(BotError::store)?;
        Ok(visits
            .into_iter()
            .find(|visit| visit.location.to_lowercase() == restaurant.to_lowercase()))
    }

    async fn reply_with_history_lookup(&self, turn_id: &TurnId, restaurant: &str) -> Reply {
        match self.find_visit(restaurant).await {
            Ok(Some(visit)) => Reply::Card(cards::already_visited_card(&visit)),
            Ok(None) => self.reply_with_unchosen_restaurant(turn_id, restaurant).await,
            Err(error) => {
                logging::log_error(turn_id, "History lookup", &error);
                Reply::text(messages::DATABASE_ACCESS_ISSUES)
            }
        }
    }

    async fn reply_with_unchosen_restaurant(&self, turn_id: &TurnId, restaurant: &str) -> Reply {
        match self.restaurant_details(restaurant).await {
            Ok(Some(details)) => Reply::Card(cards::new_restaurant_card(restaurant, &details)),
            Ok(None) => Reply::text(messages::unchosen_restaurant(restaurant)),
            Err(error) => {
                turn_warn!(turn_id, error = %error, "Restaurant details unavailable");
                Reply::text(messages::unchosen_restaurant(restaurant))
            }
        }
    }

    /// Best search match for a restaurant name
    pub async fn restaurant_details(&self, restaurant: &str) -> BotResult<Option<CandidateRestaurant>> {
        let results = self
            .search
            .search(restaurant, &self.preferred_location, SEARCH_LIMIT)
            .await
            .map_err(BotError::search)?;
        Ok(results.into_iter().next())
    }

    async fn reply_with_listing(&self, turn_id: &TurnId) -> Reply {
        match self.visit_store.fetch_all_visits().await {
            Ok(visits) => Reply::text(messages::restaurant_listing(&visits)),
            Err(reason) => {
                turn_warn!(turn_id, error = %BotError::store(reason), "Listing failed");
                Reply::text(messages::DATABASE_ACCESS_ISSUES)
            }
        }
    }

    /// Pick an unvisited restaurant matching the rating hint
    pub async fn recommend(&self, turn_id: &TurnId, rating_hint: Option<&str>) -> BotResult<CandidateRestaurant> {
        let visited = self.visit_store.fetch_all_visits().await.map_err(BotError::store)?;

        let candidates = match self
            .search
            .search(DEFAULT_SEARCH_TERM, &self.preferred_location, SEARCH_LIMIT)
            .await
        {
            Ok(candidates) => candidates,
            Err(reason) => {
                turn_warn!(turn_id, error = %BotError::search(reason), "Search failed, no candidates");
                Vec::new()
            }
        };

        let selector = RecommendationSelector::new(&visited, rating_hint);
        let choice = {
            let mut rng = self.rng.lock().await;
            selector.select(&candidates, &mut *rng)
        };
        turn_debug!(
            turn_id,
            band = %selector.band(),
            candidates = candidates.len(),
            visited = visited.len(),
            "Selected recommendation"
        );

        choice.ok_or(BotError::NoQualifyingCandidate { band: selector.band() })
    }

    async fn reply_with_recommendation(&self, turn_id: &TurnId, rating_hint: Option<&str>) -> Reply {
        match self.recommend(turn_id, rating_hint).await {
            Ok(choice) => {
                turn_info!(turn_id, restaurant = %choice.name, "Recommending");
                Reply::Card(cards::recommendation_card(&choice))
            }
            Err(BotError::NoQualifyingCandidate { band }) => {
                turn_info!(turn_id, band = %band, "Nothing qualifies");
                Reply::text(messages::no_rated_place(&describe_rating_hint(rating_hint)))
            }
            Err(error) => {
                logging::log_error(turn_id, "Recommendation", &error);
                Reply::text(messages::UNABLE_TO_GET_RECOMMENDATION)
            }
        }
    }

    async fn reply_with_next_member(&self, turn_id: &TurnId) -> Reply {
        let last_visit = match self.visit_store.fetch_last_visit().await {
            Ok(last_visit) => last_visit,
            Err(reason) => {
                turn_warn!(turn_id, error = %BotError::store(reason), "No history, counting from today");
                None
            }
        };

        let result = match self.visit_store.fetch_members().await {
            Ok(members) => next_pick(&members, last_visit.as_ref(), self.today()),
            Err(reason) => Err(BotError::store(reason)),
        };

        match result {
            Ok(pick) => Reply::text(messages::next_chooser(&pick.member, &pick.month_name())),
            Err(error) => {
                turn_warn!(turn_id, error = %error, "Next pick unavailable");
                Reply::text(messages::NEXT_PICK_UNKNOWN)
            }
        }
    }
}
