use serde::{Deserialize, Serialize};

use crate::models::testcase::NewTestcase;

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum WeightDistributionError {
        #[error("manual weights leave no share for the remaining testcases")]
        InvalidWeightDistribution,
    }
}

pub use error::WeightDistributionError;

/// Exact share of a problem's score carried by one testcase. The denominator
/// is positive on every value produced by this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightFraction {
    pub numerator: i32,
    pub denominator: i32,
}

impl WeightFraction {
    /// Integer percentage used for submission scoring and display,
    /// rounded half away from zero.
    pub fn percent(&self) -> i32 {
        ((self.numerator as f64 / self.denominator as f64) * 100.0).round() as i32
    }
}

/// Resolves the three weight input shapes into one fraction. Total over all
/// inputs: a testcase with no weight at all canonicalizes to zero weight.
pub fn canonicalize(testcase: &NewTestcase) -> WeightFraction {
    if let (Some(numerator), Some(denominator)) = (
        testcase.score_weight_numerator,
        testcase.score_weight_denominator,
    ) {
        if denominator > 0 {
            return WeightFraction {
                numerator,
                denominator,
            };
        }
        return percentage_fallback(numerator);
    }

    if let Some(score_weight) = testcase.score_weight {
        return WeightFraction {
            numerator: score_weight,
            denominator: 100,
        };
    }

    WeightFraction {
        numerator: 0,
        denominator: 1,
    }
}

// Historically a malformed denominator meant "the numerator is already a
// percentage". Possibly a latent bug upstream of us; kept in this one
// function until the intent is settled.
fn percentage_fallback(numerator: i32) -> WeightFraction {
    WeightFraction {
        numerator,
        denominator: 100,
    }
}

/// Weights for a testcase set created without explicit weights: each of the
/// `testcase_count` testcases receives exactly 1/testcase_count.
pub fn equal_distribution(testcase_count: usize) -> Vec<WeightFraction> {
    (0..testcase_count)
        .map(|_| WeightFraction {
            numerator: 1,
            denominator: testcase_count as i32,
        })
        .collect()
}

/// Weights for a testcase set where some testcases carry manual weights and
/// the rest share the remainder equally. Fails when the manual weights
/// already use up the whole score or no testcase is left for the remainder.
pub fn distribute_remaining(
    total_testcases: usize,
    manual: &[WeightFraction],
) -> Result<Vec<WeightFraction>, WeightDistributionError> {
    if manual.is_empty() {
        return Ok(equal_distribution(total_testcases));
    }

    let common_denominator = common_denominator(manual);
    let manual_sum = sum_over(manual, common_denominator);

    let remaining_numerator = common_denominator - manual_sum;
    let remaining_count = total_testcases as i64 - manual.len() as i64;

    if remaining_numerator <= 0 || remaining_count <= 0 {
        return Err(WeightDistributionError::InvalidWeightDistribution);
    }

    let mut weights = manual.to_vec();
    let equal_denominator = common_denominator * remaining_count;
    for _ in 0..remaining_count {
        weights.push(WeightFraction {
            numerator: remaining_numerator as i32,
            denominator: equal_denominator as i32,
        });
    }

    Ok(weights)
}

/// Exact rational check that a problem's weights cover its whole score.
pub fn weights_sum_to_one(weights: &[WeightFraction]) -> bool {
    if weights.is_empty() {
        return false;
    }
    let common_denominator = common_denominator(weights);
    sum_over(weights, common_denominator) == common_denominator
}

fn common_denominator(weights: &[WeightFraction]) -> i64 {
    weights
        .iter()
        .fold(1, |acc, weight| lcm(acc, weight.denominator as i64))
}

fn sum_over(weights: &[WeightFraction], common_denominator: i64) -> i64 {
    weights
        .iter()
        .map(|weight| weight.numerator as i64 * (common_denominator / weight.denominator as i64))
        .sum()
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: i64, b: i64) -> i64 {
    a / gcd(a, b) * b
}
