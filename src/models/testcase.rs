use serde::Deserialize;

/// A testcase as authored by an administrator. The three weight fields are
/// alternatives: explicit fraction, flat percentage, or nothing at all
/// (`weight::canonicalize` resolves them into one representation).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTestcase {
    pub score_weight: Option<i32>,
    pub score_weight_numerator: Option<i32>,
    pub score_weight_denominator: Option<i32>,
    pub is_hidden: bool,
    pub order: Option<i32>,
}
