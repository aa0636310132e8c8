use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::contest::{Contest, ContestProblem};
use crate::models::submission::Submission;
use crate::models::user::Participant;
use crate::scoring;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemRecord {
    pub order: i32,
    pub problem_id: i32,
    pub score: i32,
    pub penalty: i32,
    pub is_first_solver: bool,
    pub submission_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: i32,
    pub username: String,
    pub total_score: i32,
    pub total_penalty: i32,
    pub problem_records: Vec<ProblemRecord>,
    pub rank: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Leaderboard {
    pub max_score: i32,
    pub participated_num: usize,
    pub registered_num: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub is_frozen: bool,
}

struct Standing {
    user_id: i32,
    username: String,
    total_score: i32,
    total_penalty: i32,
    last_accepted_time: Option<NaiveDateTime>,
    problem_records: Vec<ProblemRecord>,
}

/// Builds the ranked leaderboard for one contest from a consistent snapshot
/// of its participants, submissions and problem point values.
///
/// Ranks are positional after a stable three-key sort (total score
/// descending, total penalty ascending, last accepted time ascending) and
/// are assigned before the username filter runs, so filtering never
/// renumbers anyone. `now` is the caller's clock and only feeds the freeze
/// flag; freezing does not mask any number in the output.
pub fn build(
    contest: &Contest,
    participants: &[Participant],
    submissions: &[Submission],
    problem_points: &[ContestProblem],
    search: Option<&str>,
    now: NaiveDateTime,
) -> Leaderboard {
    info!(
        "Building leaderboard for contest {} with {} participants",
        contest.id,
        participants.len()
    );

    let max_score = problem_points
        .iter()
        .map(|contest_problem| contest_problem.score)
        .sum();

    let participated: HashSet<i32> = submissions
        .iter()
        .map(|submission| submission.user_id)
        .collect();

    let is_frozen = contest.is_frozen(now);

    let mut submission_counts: HashMap<(i32, i32), usize> = HashMap::new();
    for submission in submissions {
        *submission_counts
            .entry((submission.user_id, submission.problem_id))
            .or_insert(0) += 1;
    }

    let first_solvers = first_solvers(submissions);

    let mut by_order: Vec<&ContestProblem> = problem_points.iter().collect();
    by_order.sort_by_key(|contest_problem| contest_problem.order);

    let mut standings: Vec<Standing> = participants
        .iter()
        .map(|participant| {
            standing_for(
                participant,
                submissions,
                problem_points,
                &by_order,
                &submission_counts,
                &first_solvers,
            )
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then(a.total_penalty.cmp(&b.total_penalty))
            .then_with(|| compare_last_accepted(a.last_accepted_time, b.last_accepted_time))
    });

    let ranked = standings
        .into_iter()
        .enumerate()
        .map(|(position, standing)| LeaderboardEntry {
            user_id: standing.user_id,
            username: standing.username,
            total_score: standing.total_score,
            total_penalty: standing.total_penalty,
            problem_records: standing.problem_records,
            rank: position as i32 + 1,
        })
        .filter(|entry| match search {
            Some(name) => entry
                .username
                .to_lowercase()
                .contains(&name.to_lowercase()),
            None => true,
        })
        .collect();

    Leaderboard {
        max_score,
        participated_num: participated.len(),
        registered_num: participants.len(),
        leaderboard: ranked,
        is_frozen,
    }
}

fn standing_for(
    participant: &Participant,
    submissions: &[Submission],
    problem_points: &[ContestProblem],
    by_order: &[&ContestProblem],
    submission_counts: &HashMap<(i32, i32), usize>,
    first_solvers: &HashMap<i32, i32>,
) -> Standing {
    let user_submissions: Vec<Submission> = submissions
        .iter()
        .filter(|submission| submission.user_id == participant.user_id)
        .cloned()
        .collect();

    let summary = scoring::reduce(&user_submissions, problem_points);
    let score_by_problem: HashMap<i32, i32> = summary
        .problem_scores
        .iter()
        .map(|problem_score| (problem_score.problem_id, problem_score.score))
        .collect();

    let penalty_by_problem: HashMap<i32, i32> = participant
        .problem_penalties
        .iter()
        .map(|penalty| (penalty.problem_id, penalty.total()))
        .collect();

    let last_accepted_time = user_submissions
        .iter()
        .filter(|submission| submission.is_accepted())
        .map(|submission| submission.create_time)
        .max();

    let problem_records: Vec<ProblemRecord> = by_order
        .iter()
        .map(|contest_problem| ProblemRecord {
            order: contest_problem.order,
            problem_id: contest_problem.problem_id,
            score: *score_by_problem
                .get(&contest_problem.problem_id)
                .unwrap_or(&0),
            penalty: *penalty_by_problem
                .get(&contest_problem.problem_id)
                .unwrap_or(&0),
            is_first_solver: first_solvers.get(&contest_problem.problem_id)
                == Some(&participant.user_id),
            submission_count: *submission_counts
                .get(&(participant.user_id, contest_problem.problem_id))
                .unwrap_or(&0),
        })
        .collect();

    Standing {
        user_id: participant.user_id,
        username: participant.username.clone(),
        total_score: summary.user_contest_score,
        total_penalty: problem_records.iter().map(|record| record.penalty).sum(),
        last_accepted_time,
        problem_records,
    }
}

/// The single earliest Accepted submission per problem determines the first
/// solver; at most one user holds the flag per problem.
fn first_solvers(submissions: &[Submission]) -> HashMap<i32, i32> {
    let mut earliest_accepted: HashMap<i32, &Submission> = HashMap::new();
    for submission in submissions {
        if !submission.is_accepted() {
            continue;
        }
        let first = earliest_accepted
            .entry(submission.problem_id)
            .or_insert(submission);
        if submission.create_time < first.create_time {
            *first = submission;
        }
    }
    earliest_accepted
        .into_iter()
        .map(|(problem_id, submission)| (problem_id, submission.user_id))
        .collect()
}

// Users who never got an Accepted verdict sort after everyone who did.
fn compare_last_accepted(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::SubmissionResult;
    use crate::models::user::ProblemPenalty;
    use chrono::NaiveDate;

    fn minute(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 9, 1)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    fn contest() -> Contest {
        Contest {
            id: 1,
            title: "Test Round".into(),
            start_time: minute(0),
            end_time: minute(59),
            freeze_time: None,
            unfreeze: false,
        }
    }

    fn contest_problem(problem_id: i32, score: i32, order: i32) -> ContestProblem {
        ContestProblem {
            id: problem_id * 100,
            contest_id: 1,
            problem_id,
            score,
            order,
        }
    }

    fn participant(user_id: i32, username: &str) -> Participant {
        Participant {
            user_id,
            username: username.into(),
            problem_penalties: vec![],
        }
    }

    fn submission(
        id: i32,
        user_id: i32,
        problem_id: i32,
        result: SubmissionResult,
        score: i32,
        create_minute: u32,
    ) -> Submission {
        Submission {
            id,
            user_id,
            problem_id,
            contest_id: Some(1),
            result,
            score,
            create_time: minute(create_minute),
        }
    }

    #[test]
    fn scores_ranks_and_counts() {
        let problems = vec![contest_problem(1, 50, 1), contest_problem(2, 50, 2)];
        let participants = vec![participant(1, "alice"), participant(2, "bob")];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::WrongAnswer, 40, 1),
            submission(2, 1, 1, SubmissionResult::Accepted, 100, 5),
            submission(3, 2, 1, SubmissionResult::Accepted, 100, 3),
            submission(4, 1, 2, SubmissionResult::Accepted, 100, 10),
        ];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );

        assert_eq!(leaderboard.max_score, 100);
        assert_eq!(leaderboard.participated_num, 2);
        assert_eq!(leaderboard.registered_num, 2);
        assert!(!leaderboard.is_frozen);

        let alice = &leaderboard.leaderboard[0];
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.total_score, 100);
        assert_eq!(alice.rank, 1);
        assert_eq!(alice.problem_records.len(), 2);
        assert_eq!(alice.problem_records[0].submission_count, 2);

        let bob = &leaderboard.leaderboard[1];
        assert_eq!(bob.total_score, 50);
        assert_eq!(bob.rank, 2);
        // bob's record for problem 2 is a zeroed placeholder
        assert_eq!(bob.problem_records[1].score, 0);
        assert_eq!(bob.problem_records[1].submission_count, 0);
    }

    #[test]
    fn first_solver_is_the_earliest_accepted_and_unique() {
        let problems = vec![contest_problem(1, 50, 1)];
        let participants = vec![participant(1, "alice"), participant(2, "bob")];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::WrongAnswer, 0, 1),
            submission(2, 2, 1, SubmissionResult::Accepted, 100, 2),
            submission(3, 1, 1, SubmissionResult::Accepted, 100, 4),
        ];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );

        let holders: Vec<&LeaderboardEntry> = leaderboard
            .leaderboard
            .iter()
            .filter(|entry| entry.problem_records[0].is_first_solver)
            .collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].username, "bob");
    }

    #[test]
    fn penalties_break_score_ties() {
        let problems = vec![contest_problem(1, 100, 1)];
        let mut alice = participant(1, "alice");
        alice.problem_penalties = vec![ProblemPenalty {
            problem_id: 1,
            submit_count_penalty: 20,
            time_penalty: 15,
        }];
        let mut bob = participant(2, "bob");
        bob.problem_penalties = vec![ProblemPenalty {
            problem_id: 1,
            submit_count_penalty: 0,
            time_penalty: 10,
        }];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::Accepted, 100, 5),
            submission(2, 2, 1, SubmissionResult::Accepted, 100, 8),
        ];

        let leaderboard = build(
            &contest(),
            &[alice, bob],
            &submissions,
            &problems,
            None,
            minute(30),
        );

        assert_eq!(leaderboard.leaderboard[0].username, "bob");
        assert_eq!(leaderboard.leaderboard[0].total_penalty, 10);
        assert_eq!(leaderboard.leaderboard[1].total_penalty, 35);
    }

    #[test]
    fn earlier_last_accepted_breaks_remaining_ties() {
        let problems = vec![contest_problem(1, 100, 1)];
        let participants = vec![participant(1, "late"), participant(2, "early")];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::Accepted, 100, 20),
            submission(2, 2, 1, SubmissionResult::Accepted, 100, 10),
        ];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );

        assert_eq!(leaderboard.leaderboard[0].username, "early");
        assert_eq!(leaderboard.leaderboard[1].username, "late");
    }

    #[test]
    fn fully_tied_users_keep_input_order_both_ways() {
        let problems = vec![contest_problem(1, 100, 1)];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::Accepted, 100, 10),
            submission(2, 2, 1, SubmissionResult::Accepted, 100, 10),
        ];

        let forward = vec![participant(1, "alice"), participant(2, "bob")];
        let built = build(
            &contest(),
            &forward,
            &submissions,
            &problems,
            None,
            minute(30),
        );
        assert_eq!(built.leaderboard[0].username, "alice");
        assert_eq!(built.leaderboard[1].username, "bob");

        let reversed = vec![participant(2, "bob"), participant(1, "alice")];
        let built = build(
            &contest(),
            &reversed,
            &submissions,
            &problems,
            None,
            minute(30),
        );
        assert_eq!(built.leaderboard[0].username, "bob");
        assert_eq!(built.leaderboard[1].username, "alice");
    }

    #[test]
    fn users_without_an_accepted_submission_rank_after_tied_solvers() {
        let problems = vec![contest_problem(1, 100, 1), contest_problem(2, 100, 2)];
        // both score 100 with no penalties, but only one ever got Accepted
        let participants = vec![participant(1, "partial"), participant(2, "solver")];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::WrongAnswer, 100, 5),
            submission(2, 2, 1, SubmissionResult::Accepted, 100, 8),
        ];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );

        assert_eq!(leaderboard.leaderboard[0].username, "solver");
    }

    #[test]
    fn search_filters_after_ranking() {
        let problems = vec![contest_problem(1, 100, 1)];
        let participants = vec![participant(1, "alice"), participant(2, "bob")];
        let submissions = vec![
            submission(1, 1, 1, SubmissionResult::Accepted, 100, 5),
            submission(2, 2, 1, SubmissionResult::Accepted, 50, 8),
        ];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            Some("BO"),
            minute(30),
        );

        assert_eq!(leaderboard.leaderboard.len(), 1);
        assert_eq!(leaderboard.leaderboard[0].username, "bob");
        // bob keeps the rank assigned before filtering
        assert_eq!(leaderboard.leaderboard[0].rank, 2);
    }

    #[test]
    fn freeze_flag_follows_the_clock_but_hides_nothing() {
        let problems = vec![contest_problem(1, 100, 1)];
        let participants = vec![participant(1, "alice")];
        let submissions = vec![submission(1, 1, 1, SubmissionResult::Accepted, 100, 5)];
        let mut frozen_contest = contest();
        frozen_contest.freeze_time = Some(minute(40));

        let before = build(
            &frozen_contest,
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );
        assert!(!before.is_frozen);

        let after = build(
            &frozen_contest,
            &participants,
            &submissions,
            &problems,
            None,
            minute(45),
        );
        assert!(after.is_frozen);
        assert_eq!(after.leaderboard[0].total_score, 100);
    }

    #[test]
    fn registered_but_silent_users_still_get_entries() {
        let problems = vec![contest_problem(1, 100, 1)];
        let participants = vec![participant(1, "alice"), participant(2, "silent")];
        let submissions = vec![submission(1, 1, 1, SubmissionResult::Accepted, 100, 5)];

        let leaderboard = build(
            &contest(),
            &participants,
            &submissions,
            &problems,
            None,
            minute(30),
        );

        assert_eq!(leaderboard.participated_num, 1);
        assert_eq!(leaderboard.registered_num, 2);
        assert_eq!(leaderboard.leaderboard.len(), 2);
        assert_eq!(leaderboard.leaderboard[1].username, "silent");
        assert_eq!(leaderboard.leaderboard[1].total_score, 0);
    }
}
