//! Tests for the IntentRecognizer implementations

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::ApiFailure;
use crate::services::recognizer::{LuisRecognizer, RegexRecognizer};
use crate::traits::IntentRecognizer;
use crate::types::{Intent, Recognition};

fn classify(utterance: &str) -> Recognition {
    RegexRecognizer::new().unwrap().classify(utterance)
}

#[test]
fn test_history_with_restaurant() {
    assert_eq!(
        classify("Have we been to Wendys?"),
        Recognition::new(Intent::History).with_restaurant("Wendys")
    );
    assert_eq!(
        classify("have we gone to Steamboat Bill's"),
        Recognition::new(Intent::History).with_restaurant("Steamboat Bill's")
    );
    assert_eq!(
        classify("HAVE WE BEEN TO pizza hut!"),
        Recognition::new(Intent::History).with_restaurant("pizza hut")
    );
}

#[test]
fn test_history_drops_trailing_qualifiers() {
    for utterance in [
        "Have we been to Wendys yet?",
        "have we been to Wendys before",
        "have we gone to Wendys already?!",
        "Have we been to Wendys lately ?",
    ] {
        assert_eq!(
            classify(utterance),
            Recognition::new(Intent::History).with_restaurant("Wendys"),
            "{utterance}"
        );
    }
    assert_eq!(
        classify("have we been to Taco Bell yet? just wondering").restaurant.as_deref(),
        Some("Taco Bell")
    );
}

#[test]
fn test_history_with_blank_name() {
    let recognition = classify("have we been to   ");
    assert_eq!(recognition.intent, Intent::History);
    assert_eq!(recognition.restaurant.as_deref(), Some(""));
}

#[test]
fn test_listing_is_history_without_restaurant() {
    for utterance in ["show me where we've been", "List them", "all the places please"] {
        assert_eq!(classify(utterance), Recognition::new(Intent::History), "{utterance}");
    }
    // "all" must be a whole word
    assert_eq!(classify("call me maybe").intent, Intent::None);
}

#[test]
fn test_suggestion_phrases() {
    for utterance in ["Where should we go?", "any recommendations", "pick for me", "suggest something"] {
        assert_eq!(classify(utterance), Recognition::new(Intent::Suggestion), "{utterance}");
    }
}

#[test]
fn test_suggestion_rating_entities() {
    assert_eq!(
        classify("recommend a 4 star place").star_rating.as_deref(),
        Some("4")
    );
    assert_eq!(
        classify("recommend somewhere 3.5-stars").star_rating.as_deref(),
        Some("3.5")
    );
    assert_eq!(
        classify("Where should we go that's GREAT?").star_rating.as_deref(),
        Some("great")
    );
    assert_eq!(classify("Where should we go?").star_rating, None);
}

#[test]
fn test_filler_words_are_not_ratings() {
    assert_eq!(classify("Ok, where should we go?"), Recognition::new(Intent::Suggestion));
    assert_eq!(classify("fair enough, suggest something").star_rating, None);
    assert_eq!(
        classify("recommend an OK place").star_rating.as_deref(),
        Some("ok")
    );
    assert_eq!(
        classify("suggest a fair spot for lunch").star_rating.as_deref(),
        Some("fair")
    );
}

#[test]
fn test_whos_next_phrases() {
    for utterance in ["Who's next?", "whos next", "who is next", "Whose turn is it?", "whose pick is it", "who’s next"] {
        assert_eq!(classify(utterance), Recognition::new(Intent::WhosNext), "{utterance}");
    }
}

#[test]
fn test_unrecognized() {
    assert_eq!(classify("what's the weather like"), Recognition::unrecognized());
    assert_eq!(classify(""), Recognition::unrecognized());
}

#[tokio::test]
async fn test_regex_recognizer_trait() {
    let recognizer = RegexRecognizer::new().unwrap();
    let recognition = recognizer.recognize("who is next").await.unwrap();
    assert_eq!(recognition.intent, Intent::WhosNext);
}

async fn luis(server: &MockServer) -> LuisRecognizer {
    LuisRecognizer::new(&server.uri(), "lunch-model", "sub-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_luis_suggestion_with_rating() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/luis/v2.0/apps/lunch-model"))
        .and(query_param("subscription-key", "sub-key"))
        .and(query_param("q", "find us an awesome place"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "find us an awesome place",
            "topScoringIntent": {"intent": "Suggestion", "score": 0.93},
            "entities": [
                {"entity": "awesome", "type": "StarRating", "startIndex": 11, "endIndex": 17, "score": 0.88}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let recognition = luis(&server).await.recognize("find us an awesome place").await.unwrap();
    assert_eq!(recognition, Recognition::new(Intent::Suggestion).with_star_rating("awesome"));
}

#[tokio::test]
async fn test_luis_history_with_restaurant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/luis/v2.0/apps/lunch-model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "did we ever eat at taco bell",
            "topScoringIntent": {"intent": "History", "score": 0.81},
            "entities": [{"entity": "taco bell", "type": "Restaurant"}]
        })))
        .mount(&server)
        .await;

    let recognition = luis(&server).await.recognize("did we ever eat at taco bell").await.unwrap();
    assert_eq!(recognition, Recognition::new(Intent::History).with_restaurant("taco bell"));
}

#[tokio::test]
async fn test_luis_unknown_intent_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/luis/v2.0/apps/lunch-model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "hello",
            "topScoringIntent": {"intent": "Greeting", "score": 0.5},
            "entities": []
        })))
        .mount(&server)
        .await;

    let recognition = luis(&server).await.recognize("hello").await.unwrap();
    assert_eq!(recognition, Recognition::unrecognized());
}

#[tokio::test]
async fn test_luis_bad_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/luis/v2.0/apps/lunch-model"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = luis(&server).await.recognize("who is next").await;
    assert_eq!(result, Err(ApiFailure::AuthenticationFailed));
}

#[test]
fn test_model_intent_names() {
    assert_eq!(Intent::from_model_name("WhosNext"), Intent::WhosNext);
    assert_eq!(Intent::from_model_name("history"), Intent::History);
    assert_eq!(Intent::from_model_name("None"), Intent::None);
}
