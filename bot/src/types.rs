//! Bot-specific data types

use std::fmt;
use serde::{Deserialize, Serialize};

/// What the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Have we been to a place, or list every place we have been
    History,
    /// Recommend somewhere new
    Suggestion,
    /// Whose turn is it to pick
    WhosNext,
    /// Nothing recognised
    None,
}

impl Intent {
    /// Parse the intent names used by the NLU model
    pub fn from_model_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "history" => Intent::History,
            "suggestion" => Intent::Suggestion,
            "whosnext" | "whos next" | "whos_next" => Intent::WhosNext,
            _ => Intent::None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::History => write!(f, "history"),
            Intent::Suggestion => write!(f, "suggestion"),
            Intent::WhosNext => write!(f, "whos_next"),
            Intent::None => write!(f, "none"),
        }
    }
}

/// Result of classifying one utterance, identical for every recognizer backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    pub intent: Intent,
    pub restaurant: Option<String>,
    pub star_rating: Option<String>,
}

impl Recognition {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            restaurant: None,
            star_rating: None,
        }
    }

    pub fn unrecognized() -> Self {
        Self::new(Intent::None)
    }

    pub fn with_restaurant(mut self, restaurant: impl Into<String>) -> Self {
        self.restaurant = Some(restaurant.into());
        self
    }

    pub fn with_star_rating(mut self, star_rating: impl Into<String>) -> Self {
        self.star_rating = Some(star_rating.into());
        self
    }
}

/// A labelled value shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

/// A follow-up the user can send back by tapping a card button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAction {
    pub title: String,
    /// Message sent as the user's next turn
    pub reply: String,
}

impl CardAction {
    /// Button whose reply is its own title
    pub fn submit(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            reply: title.clone(),
            title,
        }
    }
}

/// Rich reply content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub speak: String,
    pub heading: String,
    pub facts: Vec<Fact>,
    pub image_url: Option<String>,
    pub details_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<CardAction>,
}

impl Card {
    /// Plain-text fallback for channels that cannot show cards
    pub fn to_plain_text(&self) -> String {
        let mut lines = vec![strip_markup(&self.heading)];
        for fact in &self.facts {
            lines.push(format!("{}: {}", fact.title, fact.value));
        }
        if let Some(url) = &self.details_url {
            lines.push(format!("More info: {url}"));
        }
        if !self.actions.is_empty() {
            let titles: Vec<&str> = self.actions.iter().map(|action| action.title.as_str()).collect();
            lines.push(format!("Reply with: {}", titles.join(" | ")));
        }
        lines.join("\n")
    }
}

fn strip_markup(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}

/// One bot reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Reply {
    Text(String),
    Card(Card),
}

impl Reply {
    pub fn text(message: impl Into<String>) -> Self {
        Reply::Text(message.into())
    }

    pub fn to_plain_text(&self) -> String {
        match self {
            Reply::Text(message) => message.clone(),
            Reply::Card(card) => card.to_plain_text(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain_text())
    }
}
