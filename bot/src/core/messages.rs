//! Reply text templates

use chrono::NaiveDate;

use shared::VisitRecord;

pub const DEFAULT_RESPONSE: &str = "Hi! I keep track of our Third Thursday lunches. You can ask me:\n\
- \"Have we been to <restaurant>?\"\n\
- \"Show me everywhere we've been\"\n\
- \"Who's next?\"\n\
- \"Where should we go?\" (add a rating like \"great\" or \"4 star\" if you're picky)";

pub const UNRECOGNIZABLE_RESTAURANT: &str =
    "I didn't catch the name of that restaurant. Try \"Have we been to <restaurant>?\"";

pub const RESTAURANT_LISTING_HEADER: &str = "Here's everywhere we've been so far:\n";

pub const DATABASE_ACCESS_ISSUES: &str =
    "I'm having trouble reaching our lunch history right now. Try again later.";

pub const UNABLE_TO_GET_RECOMMENDATION: &str =
    "I couldn't come up with a recommendation right now. Try again later.";

pub const NEXT_PICK_UNKNOWN: &str = "I'm not sure who has the next pick. Try again later.";

pub const PICK_THIS_RESTAURANT: &str = "Pick this restaurant";

pub const SUGGEST_SOMEWHERE_ELSE: &str = "Suggest somewhere else";

pub const NO_HISTORY: &str = "We haven't been anywhere yet!";

/// `"<member> has the next pick for <Month>."`
pub fn next_chooser(member: &str, month_name: &str) -> String {
    format!("{member} has the next pick for {month_name}.")
}

pub fn unchosen_restaurant(restaurant: &str) -> String {
    format!("Nope, nobody has picked {restaurant} yet. Maybe it's time?")
}

pub fn no_rated_place(hint_description: &str) -> String {
    format!("Sorry, I couldn't find a {hint_description} place. Can you try a different rating?")
}

/// `M/D/YYYY`, as the group writes dates
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Every visit, oldest first
pub fn restaurant_listing(visits: &[VisitRecord]) -> String {
    if visits.is_empty() {
        return NO_HISTORY.to_string();
    }

    let mut ordered: Vec<&VisitRecord> = visits.iter().collect();
    ordered.sort_by_key(|visit| visit.visited_on);

    let mut message = String::from(RESTAURANT_LISTING_HEADER);
    for visit in ordered {
        message.push_str(&format!(
            "- '{}' on {} ({})\n",
            visit.location,
            short_date(visit.visited_on),
            visit.picked_by
        ));
    }
    message
}
