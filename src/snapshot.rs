use serde::{Deserialize, Serialize};

use crate::models::contest::{Contest, ContestProblem};
use crate::models::submission::Submission;
use crate::models::user::Participant;

/// One consistent snapshot of everything the scoring core reads for a
/// contest. The caller (the data-access layer) is responsible for fetching
/// it atomically; the core never goes back to the store mid-computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContestSnapshot {
    pub contest: Contest,
    pub participants: Vec<Participant>,
    pub problems: Vec<ContestProblem>,
    pub submissions: Vec<Submission>,
}
