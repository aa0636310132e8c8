use serde::{Deserialize, Serialize};

/// A registered contestant, together with the penalty attributes the judging
/// subsystem maintains per problem. Penalties are consumed as-is by the
/// leaderboard; they are never recomputed here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: i32,
    pub username: String,
    #[serde(default)]
    pub problem_penalties: Vec<ProblemPenalty>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProblemPenalty {
    pub problem_id: i32,
    pub submit_count_penalty: i32,
    pub time_penalty: i32,
}

impl ProblemPenalty {
    pub fn total(&self) -> i32 {
        self.submit_count_penalty + self.time_penalty
    }
}
