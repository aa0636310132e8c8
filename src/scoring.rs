use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::contest::ContestProblem;
use crate::models::submission::Submission;
use crate::models::user::Participant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemScore {
    pub problem_id: i32,
    pub score: i32,
    pub max_score: i32,
}

/// Per user+contest score aggregate, recomputed on demand from submissions
/// and problem point values. Never persisted as source of truth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub submitted_problem_count: usize,
    pub total_problem_count: usize,
    pub user_contest_score: i32,
    pub contest_perfect_score: i32,
    pub problem_scores: Vec<ProblemScore>,
}

/// Reduces one user's submissions against the contest's point values.
///
/// Only the latest submission per problem counts (by `create_time`, the
/// authoritative ordering; never by id). Submissions to problems no longer
/// in the contest are ignored. Empty input degrades to an all-zero summary.
pub fn reduce(submissions: &[Submission], problem_points: &[ContestProblem]) -> ScoreSummary {
    let mut max_score_by_problem = HashMap::with_capacity(problem_points.len());
    for contest_problem in problem_points {
        max_score_by_problem.insert(contest_problem.problem_id, contest_problem.score);
    }

    let mut relevant: Vec<&Submission> = submissions
        .iter()
        .filter(|submission| max_score_by_problem.contains_key(&submission.problem_id))
        .collect();
    relevant.sort_by(|a, b| b.create_time.cmp(&a.create_time));

    let mut latest_by_problem: HashMap<i32, &Submission> = HashMap::new();
    for submission in relevant {
        latest_by_problem
            .entry(submission.problem_id)
            .or_insert(submission);
    }

    let mut by_order: Vec<&ContestProblem> = problem_points.iter().collect();
    by_order.sort_by_key(|contest_problem| contest_problem.order);

    let mut problem_scores = Vec::with_capacity(latest_by_problem.len());
    for contest_problem in by_order {
        if let Some(submission) = latest_by_problem.get(&contest_problem.problem_id) {
            problem_scores.push(ProblemScore {
                problem_id: contest_problem.problem_id,
                score: awarded_score(submission.score, contest_problem.score),
                max_score: contest_problem.score,
            });
        }
    }

    debug!(
        "Reduced {} submissions onto {} problems",
        submissions.len(),
        problem_scores.len()
    );

    ScoreSummary {
        submitted_problem_count: problem_scores.len(),
        total_problem_count: problem_points.len(),
        user_contest_score: problem_scores
            .iter()
            .map(|problem_score| problem_score.score)
            .sum(),
        contest_perfect_score: problem_points
            .iter()
            .map(|contest_problem| contest_problem.score)
            .sum(),
        problem_scores,
    }
}

// Truncation toward zero: partial credit never rounds up.
pub(crate) fn awarded_score(percentage: i32, max_score: i32) -> i32 {
    (percentage as i64 * max_score as i64 / 100) as i32
}

#[derive(Clone, Debug, Serialize)]
pub struct UserScoreSummary {
    pub user_id: i32,
    pub username: String,
    #[serde(flatten)]
    pub summary: ScoreSummary,
}

/// The per-user summary over every registered participant, optionally
/// filtered by case-insensitive substring on username.
pub fn reduce_all(
    participants: &[Participant],
    submissions: &[Submission],
    problem_points: &[ContestProblem],
    searching_name: Option<&str>,
) -> Vec<UserScoreSummary> {
    let searching_name = searching_name.map(|name| name.to_lowercase());

    participants
        .iter()
        .filter(|participant| match &searching_name {
            Some(name) => participant.username.to_lowercase().contains(name),
            None => true,
        })
        .map(|participant| {
            let user_submissions: Vec<Submission> = submissions
                .iter()
                .filter(|submission| submission.user_id == participant.user_id)
                .cloned()
                .collect();
            UserScoreSummary {
                user_id: participant.user_id,
                username: participant.username.clone(),
                summary: reduce(&user_submissions, problem_points),
            }
        })
        .collect()
}
