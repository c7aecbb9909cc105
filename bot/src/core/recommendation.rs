//! Picking somewhere new for lunch

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use shared::{CandidateRestaurant, RatingBand, VisitRecord};

/// Band used when no rating hint was given
pub const DEFAULT_BAND: RatingBand = RatingBand::new(2.0, 5.0);

const TOP_BAND: RatingBand = RatingBand::new(4.0, 5.0);
const MIDDLE_BAND: RatingBand = RatingBand::new(3.0, 4.0);
const FALLBACK_BAND: RatingBand = RatingBand::new(2.0, 3.0);

const TOP_WORDS: &[&str] = &["excellent", "great", "awesome", "classy", "superb"];
const MIDDLE_WORDS: &[&str] = &["good", "decent"];

fn numeric_hint(hint: &str) -> Option<f64> {
    hint.trim().parse::<f64>().ok().filter(|rating| rating.is_finite())
}

/// Turn a free-text or numeric rating hint into a band.
///
/// A number asks for that exact rating, not a minimum.
pub fn interpret_rating_band(hint: Option<&str>) -> RatingBand {
    let Some(hint) = hint else {
        return DEFAULT_BAND;
    };
    if let Some(rating) = numeric_hint(hint) {
        return RatingBand::exactly(rating);
    }

    let word = hint.trim().to_lowercase();
    if TOP_WORDS.contains(&word.as_str()) {
        TOP_BAND
    } else if MIDDLE_WORDS.contains(&word.as_str()) {
        MIDDLE_BAND
    } else {
        FALLBACK_BAND
    }
}

/// How a rating hint reads in a sentence: "5 star", "excellent", or "good"
pub fn describe_rating_hint(hint: Option<&str>) -> String {
    match hint {
        None => "good".to_string(),
        Some(hint) if numeric_hint(hint).is_some() => format!("{} star", hint.trim()),
        Some(hint) => hint.trim().to_string(),
    }
}

/// True when the candidate looks like a place the group already visited.
///
/// Names are matched loosely, by containment in either direction, so that
/// "McDonalds" also covers "McDonalds Drive-Thru".
pub fn already_visited(candidate: &CandidateRestaurant, visited: &[VisitRecord]) -> bool {
    visited
        .iter()
        .any(|visit| visit.location.contains(&candidate.name) || candidate.name.contains(&visit.location))
}

/// Chooses one unvisited restaurant within a rating band
#[derive(Debug, Clone)]
pub struct RecommendationSelector<'a> {
    visited: &'a [VisitRecord],
    band: RatingBand,
}

impl<'a> RecommendationSelector<'a> {
    pub fn new(visited: &'a [VisitRecord], rating_hint: Option<&str>) -> Self {
        Self {
            visited,
            band: interpret_rating_band(rating_hint),
        }
    }

    pub fn with_band(visited: &'a [VisitRecord], band: RatingBand) -> Self {
        Self { visited, band }
    }

    pub fn band(&self) -> RatingBand {
        self.band
    }

    pub fn qualifies(&self, candidate: &CandidateRestaurant) -> bool {
        self.band.contains(candidate.rating) && !already_visited(candidate, self.visited)
    }

    /// Candidates that pass both filters, first occurrence of each name only
    pub fn qualifying<'c>(&self, candidates: &'c [CandidateRestaurant]) -> Vec<&'c CandidateRestaurant> {
        let mut seen = HashSet::new();
        let mut qualifying = Vec::new();
        for candidate in candidates {
            if self.qualifies(candidate) && seen.insert(candidate.name.as_str()) {
                qualifying.push(candidate);
            }
        }
        qualifying
    }

    /// Uniform random pick among qualifying candidates, `None` when nothing qualifies
    pub fn select<R: Rng + ?Sized>(&self, candidates: &[CandidateRestaurant], rng: &mut R) -> Option<CandidateRestaurant> {
        self.qualifying(candidates).choose(rng).map(|candidate| (*candidate).clone())
    }
}
