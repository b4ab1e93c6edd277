//! # Number type requirements
//!
//! Reduced costs and tolerances are owned by the solver; this crate never fixes a concrete number
//! type. The selection logic only needs an ordering, negation and the additive identity, so that
//! is all that is asked of the generic value type.
use std::ops::Neg;

use num_traits::Zero;

/// Absolute value of a number.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait Abs: Neg<Output = Self> + PartialOrd + Zero + Sized {
    /// The absolute value of a number.
    ///
    /// Compute the additive inverse if the number is smaller than the additive identity.
    fn abs(self) -> Self {
        if self < Self::zero() {
            -self
        } else {
            self
        }
    }
}
impl<T: Neg<Output = Self> + PartialOrd + Zero> Abs for T {
}
