use log::info;
use serde::Serialize;
use std::fs::File;

use poentaro::leaderboard::{self, Leaderboard};
use poentaro::scoring::{self, UserScoreSummary};
use poentaro::setup;
use poentaro::snapshot::ContestSnapshot;

#[derive(Serialize)]
struct ContestReport {
    leaderboard: Leaderboard,
    score_summaries: Vec<UserScoreSummary>,
}

fn main() {
    setup::setup_dotenv();
    env_logger::init();

    let path = setup::snapshot_path();
    info!("Loading contest snapshot from {}", path);
    let file = File::open(&path).expect("couldn't open the snapshot file");
    let snapshot: ContestSnapshot =
        serde_json::from_reader(file).expect("couldn't decode the snapshot file");

    let search = setup::leaderboard_search();
    let now = chrono::Local::now().naive_local();

    let leaderboard = leaderboard::build(
        &snapshot.contest,
        &snapshot.participants,
        &snapshot.submissions,
        &snapshot.problems,
        search.as_deref(),
        now,
    );
    let score_summaries = scoring::reduce_all(
        &snapshot.participants,
        &snapshot.submissions,
        &snapshot.problems,
        None,
    );

    let report = ContestReport {
        leaderboard,
        score_summaries,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("couldn't encode the report")
    );
}
