//! Whose turn it is to pick, and for which month

use chrono::{Months, NaiveDate};

use shared::{Member, VisitRecord};
use crate::error::{BotError, BotResult};

/// The member who picks next and the month of that lunch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPick {
    pub member: Member,
    pub month: NaiveDate,
}

impl NextPick {
    /// Full month name, e.g. "August"
    pub fn month_name(&self) -> String {
        self.month.format("%B").to_string()
    }
}

/// Work out who picks after `most_recent`.
///
/// A picker missing from `members` restarts the rotation at its head. With no
/// history the next lunch is a month from `today`.
pub fn next_pick(members: &[Member], most_recent: Option<&VisitRecord>, today: NaiveDate) -> BotResult<NextPick> {
    if members.is_empty() {
        return Err(BotError::RotationUnavailable);
    }

    let next_index = most_recent
        .and_then(|visit| members.iter().position(|member| *member == visit.picked_by))
        .map_or(0, |index| (index + 1) % members.len());
    let member = members.get(next_index).cloned().ok_or(BotError::RotationUnavailable)?;

    let from = most_recent.map_or(today, |visit| visit.visited_on);
    let month = from
        .checked_add_months(Months::new(1))
        .ok_or(BotError::RotationUnavailable)?;

    Ok(NextPick { member, month })
}
