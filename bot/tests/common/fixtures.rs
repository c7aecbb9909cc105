//! Test fixtures and data for bot tests

use chrono::NaiveDate;

use shared::{CandidateRestaurant, Member, VisitRecord};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const MIKE: &'static str = "Mike";
    pub const TREY: &'static str = "Trey";
    pub const ANTHONY: &'static str = "Anthony";

    pub const LOCATION: &'static str = "Lake Charles";
    pub const SEED: u64 = 7;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn members() -> Vec<Member> {
        vec![Self::MIKE.to_string(), Self::TREY.to_string(), Self::ANTHONY.to_string()]
    }

    /// Visits deliberately out of date order
    pub fn visits() -> Vec<VisitRecord> {
        vec![
            VisitRecord::new("Taco Bell", Self::MIKE, Self::date(2019, 6, 21)),
            VisitRecord::new("Wendys", Self::MIKE, Self::date(2019, 3, 15)),
            VisitRecord::new("Pizza Hut", Self::TREY, Self::date(2019, 7, 19)),
            VisitRecord::new("Burger King", Self::TREY, Self::date(2019, 4, 19)),
        ]
    }

    pub fn last_visit() -> VisitRecord {
        VisitRecord::new("Pizza Hut", Self::TREY, Self::date(2019, 7, 19))
    }

    /// Search results mixing visited and unvisited places
    pub fn candidates() -> Vec<CandidateRestaurant> {
        vec![
            CandidateRestaurant::named("Wendys", 4.5),
            CandidateRestaurant::named("Pizza Hut Express", 4.0),
            CandidateRestaurant::named("Cafe Mosaic", 4.5),
            CandidateRestaurant::named("Pitt Grill", 3.5),
            CandidateRestaurant::named("Roadside Diner", 2.0),
        ]
    }
}
