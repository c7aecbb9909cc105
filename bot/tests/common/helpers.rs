//! Test helpers and builder patterns for bot tests

use std::sync::Arc;

use chrono::NaiveDate;

use bot::services::{InMemoryVisitStore, RegexRecognizer, StaticRestaurantSearch};
use bot::{Bot, Card, MockIntentRecognizer, MockRestaurantSearch, MockVisitStore, Recognition, Reply};
use shared::ApiFailure;
use super::fixtures::TestFixtures;

/// Builder for bots wired to mockall collaborators.
///
/// Every collaborator starts with permissive defaults backed by
/// [`TestFixtures`]; `with_*` replaces a mock wholesale.
pub struct BotBuilder {
    visit_store: MockVisitStore,
    search: MockRestaurantSearch,
    recognizer: MockIntentRecognizer,
    today: Option<NaiveDate>,
}

impl BotBuilder {
    pub fn new() -> Self {
        let mut visit_store = MockVisitStore::new();
        visit_store
            .expect_fetch_all_visits()
            .returning(|| Ok(TestFixtures::visits()))
            .times(0..);
        visit_store
            .expect_fetch_members()
            .returning(|| Ok(TestFixtures::members()))
            .times(0..);
        visit_store
            .expect_fetch_last_visit()
            .returning(|| Ok(Some(TestFixtures::last_visit())))
            .times(0..);

        let mut search = MockRestaurantSearch::new();
        search
            .expect_search()
            .returning(|_, _, _| Ok(TestFixtures::candidates()))
            .times(0..);

        let mut recognizer = MockIntentRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(|_| Ok(Recognition::unrecognized()))
            .times(0..);

        Self {
            visit_store,
            search,
            recognizer,
            today: None,
        }
    }

    /// Replace the visit store with a fresh mock configured by `setup`
    pub fn with_visit_store<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockVisitStore),
    {
        let mut visit_store = MockVisitStore::new();
        setup(&mut visit_store);
        self.visit_store = visit_store;
        self
    }

    /// Replace the search collaborator with a fresh mock configured by `setup`
    pub fn with_search<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRestaurantSearch),
    {
        let mut search = MockRestaurantSearch::new();
        setup(&mut search);
        self.search = search;
        self
    }

    /// Make every message recognize as `recognition`
    pub fn with_recognition(mut self, recognition: Recognition) -> Self {
        let mut recognizer = MockIntentRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Ok(recognition.clone()));
        self.recognizer = recognizer;
        self
    }

    /// Make the recognizer fail with `failure`
    pub fn with_recognizer_failure(mut self, failure: ApiFailure) -> Self {
        let mut recognizer = MockIntentRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Err(failure.clone()));
        self.recognizer = recognizer;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn build(self) -> Bot {
        let bot = Bot::new(
            Arc::new(self.visit_store),
            Arc::new(self.search),
            Arc::new(self.recognizer),
            TestFixtures::LOCATION,
        )
        .with_seed(TestFixtures::SEED);

        match self.today {
            Some(today) => bot.with_today(today),
            None => bot,
        }
    }
}

/// Helper functions for common test scenarios
pub struct TestHelpers;

impl TestHelpers {
    /// Bot running entirely on the offline backends
    pub fn offline_bot() -> Bot {
        Bot::new(
            Arc::new(InMemoryVisitStore::seeded()),
            Arc::new(StaticRestaurantSearch::lake_charles()),
            Arc::new(RegexRecognizer::new().unwrap()),
            TestFixtures::LOCATION,
        )
        .with_seed(TestFixtures::SEED)
    }

    /// Unwrap a text reply
    pub fn expect_text(reply: Reply) -> String {
        match reply {
            Reply::Text(message) => message,
            Reply::Card(card) => panic!("Expected a text reply, got card {}", card.name),
        }
    }

    /// Unwrap a card reply
    pub fn expect_card(reply: Reply) -> Card {
        match reply {
            Reply::Card(card) => card,
            Reply::Text(message) => panic!("Expected a card, got text {message:?}"),
        }
    }

    /// Value of the fact titled `title`
    pub fn fact<'a>(card: &'a Card, title: &str) -> &'a str {
        card.facts
            .iter()
            .find(|fact| fact.title == title)
            .map(|fact| fact.value.as_str())
            .unwrap_or_else(|| panic!("Card {} has no {title} fact", card.name))
    }

    /// Rating shown on a recommendation card
    pub fn card_rating(card: &Card) -> f64 {
        Self::fact(card, "Rating")
            .split(" / ")
            .next()
            .and_then(|rating| rating.parse().ok())
            .unwrap()
    }
}
