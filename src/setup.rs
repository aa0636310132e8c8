use dotenv::dotenv;
use std::env;

pub fn setup_dotenv() {
    dotenv().ok();
}

pub fn snapshot_path() -> String {
    env::args()
        .nth(1)
        .or_else(|| env::var("SNAPSHOT_PATH").ok())
        .expect("pass the snapshot path as the first argument or set SNAPSHOT_PATH")
}

pub fn leaderboard_search() -> Option<String> {
    env::var("LEADERBOARD_SEARCH").ok()
}
