use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionResult {
    Accepted,
    WrongAnswer,
    CompileError,
    RuntimeError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    SegmentationFaultError,
    ServerError,
    Judging,
    Blind,
    Canceled,
}

/// One graded submission, append-only and owned by the judging subsystem.
/// `score` is the percentage of the problem's testcases passed (0..=100),
/// already weight-adjusted by the grader.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub id: i32,
    pub user_id: i32,
    pub problem_id: i32,
    pub contest_id: Option<i32>,
    pub result: SubmissionResult,
    pub score: i32,
    pub create_time: NaiveDateTime,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.result == SubmissionResult::Accepted
    }
}
