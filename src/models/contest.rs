use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contest {
    pub id: i32,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub freeze_time: Option<NaiveDateTime>,
    pub unfreeze: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Finished,
}

impl Contest {
    pub fn status(&self, now: NaiveDateTime) -> ContestStatus {
        if self.end_time > now {
            if self.start_time <= now {
                ContestStatus::Ongoing
            } else {
                ContestStatus::Upcoming
            }
        } else {
            ContestStatus::Finished
        }
    }

    /// Frozen means the freeze instant has passed and the contest has not
    /// been explicitly unfrozen. Evaluated against the caller's clock.
    pub fn is_frozen(&self, now: NaiveDateTime) -> bool {
        match self.freeze_time {
            Some(freeze_time) => now >= freeze_time && !self.unfreeze,
            None => false,
        }
    }
}

/// The point value and display position a problem carries within one contest.
/// `order` values of one contest always form a permutation of 1..=N.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ContestProblem {
    pub id: i32,
    pub contest_id: i32,
    pub problem_id: i32,
    pub score: i32,
    pub order: i32,
}
