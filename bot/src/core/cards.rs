//! Card builders for rich replies

use shared::{CandidateRestaurant, VisitRecord};
use crate::core::messages::short_date;
use crate::core::messages;
use crate::types::{Card, CardAction, Fact};

fn fact(title: &str, value: impl Into<String>) -> Fact {
    Fact {
        title: title.to_string(),
        value: value.into(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Buttons offered under any restaurant the group could pick
fn choice_actions() -> Vec<CardAction> {
    vec![
        CardAction::submit(messages::PICK_THIS_RESTAURANT),
        CardAction::submit(messages::SUGGEST_SOMEWHERE_ELSE),
    ]
}

/// Restaurant details shared by recommendation and lookup cards
fn restaurant_facts(restaurant: &CandidateRestaurant) -> Vec<Fact> {
    let mut facts = vec![fact("Rating", format!("{:.1} / 5", restaurant.rating))];
    if let Some(address) = non_empty(&restaurant.address) {
        facts.push(fact("Address", address));
    }
    if let Some(phone) = non_empty(&restaurant.phone) {
        facts.push(fact("Phone", phone));
    }
    facts
}

pub fn already_visited_card(visit: &VisitRecord) -> Card {
    Card {
        name: "AlreadyChosen".to_string(),
        speak: format!("You have already been to {}", visit.location),
        heading: format!("You have already been to {}.", visit.location),
        facts: vec![
            fact("Chosen By", visit.picked_by.clone()),
            fact("On", short_date(visit.visited_on)),
        ],
        image_url: None,
        details_url: None,
        actions: Vec::new(),
    }
}

pub fn recommendation_card(choice: &CandidateRestaurant) -> Card {
    let mut facts = vec![fact("Name", choice.name.clone())];
    facts.extend(restaurant_facts(choice));
    Card {
        name: "Recommendation".to_string(),
        speak: format!("How about trying {}", choice.name),
        heading: "Here's a recommendation for you".to_string(),
        facts,
        image_url: non_empty(&choice.image_url),
        details_url: non_empty(&choice.details_url),
        actions: choice_actions(),
    }
}

/// Card for a restaurant nobody has picked yet, found by searching for `asked`
pub fn new_restaurant_card(asked: &str, found: &CandidateRestaurant) -> Card {
    let wanted = asked.trim().to_lowercase();
    let heading = if found.name.to_lowercase().contains(&wanted) {
        format!("Sure thing <b>{}</b> sounds great!", found.name)
    } else {
        format!("I couldn't find <b>{}</b>, but <b>{}</b> looks like it might be good", asked.trim(), found.name)
    };

    Card {
        name: "NewRestaurant".to_string(),
        speak: heading.replace("<b>", "").replace("</b>", ""),
        heading,
        facts: restaurant_facts(found),
        image_url: non_empty(&found.image_url),
        details_url: non_empty(&found.details_url),
        actions: choice_actions(),
    }
}
