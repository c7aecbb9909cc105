//! Intent recognizers: a LUIS client and a pattern-based fallback

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use shared::ApiFailure;
use crate::error::BotResult;
use crate::services::http;
use crate::traits::IntentRecognizer;
use crate::types::{Intent, Recognition};

/// Recognizer driven by regular expressions, for running without an NLU service
pub struct RegexRecognizer {
    history: Regex,
    suggestion: Regex,
    whos_next: Regex,
    listing: Regex,
    star_rating: Regex,
    rating_word: Regex,
}

impl RegexRecognizer {
    pub fn new() -> BotResult<Self> {
        Ok(Self {
            history: Regex::new(
                r"(?i)have we (?:been|gone) to (?P<restaurant>[^?]+?)(?:\s+(?:yet|before|already|lately|recently))?\s*[.!]*\s*(?:\?|$)",
            )?,
            suggestion: Regex::new(r"(?i)where should we go|recommend|pick for me|suggest")?,
            whos_next: Regex::new(r"(?i)who(?:'|’)?s next|who is next|whose (?:pick|turn) is it")?,
            listing: Regex::new(r"(?i)\b(?:show|list|all)\b")?,
            star_rating: Regex::new(r"(?i)\b(?P<stars>\d(?:\.\d)?)[\s-]*stars?\b")?,
            // "ok" and "fair" are filler unless they describe the place
            rating_word: Regex::new(
                r"(?i)\b(?:(?P<word>excellent|great|awesome|classy|superb|good|decent)|(?P<modest>ok|okay|fair)\s+(?:place|restaurant|spot))\b",
            )?,
        })
    }

    fn rating_hint(&self, utterance: &str) -> Option<String> {
        if let Some(captures) = self.star_rating.captures(utterance) {
            return Some(captures["stars"].to_string());
        }
        let captures = self.rating_word.captures(utterance)?;
        captures
            .name("word")
            .or_else(|| captures.name("modest"))
            .map(|word| word.as_str().to_lowercase())
    }

    /// Classify without going through the async trait
    pub fn classify(&self, utterance: &str) -> Recognition {
        if let Some(captures) = self.history.captures(utterance) {
            let restaurant = captures["restaurant"]
                .trim()
                .trim_end_matches(&['.', '!'][..])
                .trim()
                .to_string();
            return Recognition::new(Intent::History).with_restaurant(restaurant);
        }

        if self.suggestion.is_match(utterance) {
            let recognition = Recognition::new(Intent::Suggestion);
            return match self.rating_hint(utterance) {
                Some(hint) => recognition.with_star_rating(hint),
                None => recognition,
            };
        }

        if self.whos_next.is_match(utterance) {
            return Recognition::new(Intent::WhosNext);
        }

        if self.listing.is_match(utterance) {
            return Recognition::new(Intent::History);
        }

        Recognition::unrecognized()
    }
}

#[async_trait]
impl IntentRecognizer for RegexRecognizer {
    async fn recognize(&self, utterance: &str) -> Result<Recognition, ApiFailure> {
        Ok(self.classify(utterance))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    #[serde(default)]
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct LuisEntity {
    entity: String,
    #[serde(rename = "type")]
    kind: String,
}

impl LuisResponse {
    fn first_entity(&self, kind: &str) -> Option<String> {
        self.entities
            .iter()
            .find(|entity| entity.kind.eq_ignore_ascii_case(kind))
            .map(|entity| entity.entity.clone())
    }

    fn into_recognition(self) -> Recognition {
        let intent = self
            .top_scoring_intent
            .as_ref()
            .map_or(Intent::None, |top| Intent::from_model_name(&top.intent));

        Recognition {
            intent,
            restaurant: self.first_entity("Restaurant"),
            star_rating: self.first_entity("StarRating"),
        }
    }
}

/// Client for a published LUIS application (v2 prediction endpoint)
pub struct LuisRecognizer {
    client: Client,
    app_url: Url,
    subscription_key: String,
}

impl LuisRecognizer {
    pub fn new(luis_url: &str, model_id: &str, subscription_key: &str, timeout: Duration) -> Result<Self, ApiFailure> {
        let base = http::parse_base_url(luis_url)?;
        Ok(Self {
            client: http::build_client(timeout)?,
            app_url: http::endpoint(&base, &format!("luis/v2.0/apps/{}", model_id.trim()))?,
            subscription_key: subscription_key.to_string(),
        })
    }
}

#[async_trait]
impl IntentRecognizer for LuisRecognizer {
    async fn recognize(&self, utterance: &str) -> Result<Recognition, ApiFailure> {
        let query = [
            ("subscription-key", self.subscription_key.as_str()),
            ("verbose", "false"),
            ("q", utterance),
        ];
        let response = http::send(self.client.get(self.app_url.clone()).query(&query)).await?;
        let body: LuisResponse = http::decode(response).await?;

        if let Some(top) = &body.top_scoring_intent {
            debug!(intent = %top.intent, score = top.score, "LUIS classified utterance");
        }
        Ok(body.into_recognition())
    }
}
