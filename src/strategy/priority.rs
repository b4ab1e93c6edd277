//! # Priority order
//!
//! Scan order over all variables of a problem. One element can be moved to the front, shifting
//! the elements it jumps over a step towards the back.
use itertools::Itertools;

use crate::error::InconsistencyError;

/// Order in which candidate variables are considered.
///
/// Always a permutation of `0..self.len()`: after construction, elements are only ever relocated,
/// never added or removed. An instance belongs to a single solve; it is built as the identity
/// when a rule is attached to a solver and mutates for the lifetime of that solve.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct PriorityOrder {
    /// Variable indices, most preferred first.
    order: Vec<usize>,
}

impl PriorityOrder {
    /// Identity order over the variables of a problem.
    ///
    /// # Arguments
    ///
    /// * `len`: Total number of variables, structural and slack.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self { order: (0..len).collect(), }
    }

    /// Number of variables ranged over.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the order ranges over any variables at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The variables, most preferred first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Make a variable the most preferred one.
    ///
    /// The variables it jumps over move one step towards the back; their relative order is kept.
    ///
    /// # Arguments
    ///
    /// * `variable`: Index to relocate to the front.
    ///
    /// # Errors
    ///
    /// When the variable is not part of the order. The permutation invariant is then already
    /// broken, and selections over this order can no longer be trusted.
    pub fn promote(&mut self, variable: usize) -> Result<(), InconsistencyError> {
        debug_assert!(self.order.iter().all_unique());

        match self.order.iter().position(|&j| j == variable) {
            Some(index) => {
                self.order[..=index].rotate_right(1);
                Ok(())
            },
            None => Err(InconsistencyError::new(format!(
                "variable {} is not part of the priority order over {} variables",
                variable, self.order.len(),
            ))),
        }
    }
}
