use log::debug;
use serde::Serialize;
use std::collections::HashMap;

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum ReorderError {
        #[error(
            "the length of the desired order ({actual}) and the number of existing problems ({expected}) are not equal"
        )]
        InvalidOrderLength { expected: usize, actual: usize },
        #[error("problem {problem_id} is missing from or duplicated in the desired order")]
        OrderNotPermutation { problem_id: i32 },
    }
}

pub use error::ReorderError;

/// An ordered child entity as it currently exists (a contest, assignment or
/// workbook problem row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderedProblem {
    pub id: i32,
    pub problem_id: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrderUpdate {
    pub id: i32,
    pub new_order: i32,
}

/// Validates a reordering permutation and returns the full update set,
/// 1-based: `new_order` is the position of the item's problem within
/// `desired_order`, counted from 1. The result covers every existing item or
/// is an error; the caller must persist it in a single transaction so a
/// partial ordering is never observable.
pub fn apply_order(
    existing: &[OrderedProblem],
    desired_order: &[i32],
) -> Result<Vec<OrderUpdate>, ReorderError> {
    if desired_order.len() != existing.len() {
        return Err(ReorderError::InvalidOrderLength {
            expected: existing.len(),
            actual: desired_order.len(),
        });
    }

    let mut position_by_problem = HashMap::with_capacity(desired_order.len());
    for (position, problem_id) in desired_order.iter().enumerate() {
        if position_by_problem.insert(*problem_id, position).is_some() {
            return Err(ReorderError::OrderNotPermutation {
                problem_id: *problem_id,
            });
        }
    }

    let updates = existing
        .iter()
        .map(|item| {
            let position = position_by_problem.get(&item.problem_id).ok_or(
                ReorderError::OrderNotPermutation {
                    problem_id: item.problem_id,
                },
            )?;
            Ok(OrderUpdate {
                id: item.id,
                new_order: *position as i32 + 1,
            })
        })
        .collect::<Result<Vec<OrderUpdate>, ReorderError>>()?;

    debug!("Reordered {} problems", updates.len());
    Ok(updates)
}
