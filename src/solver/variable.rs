//! # Variables as the solver presents them
//!
//! The solver tracks, for each variable, where it currently is relative to the basis and its
//! bounds. That status determines the sign convention of the dual infeasibility measure.

/// Position of a variable relative to the current basis and its bounds.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VariableStatus {
    Basic,
    AtLowerBound,
    AtUpperBound,
    /// Not in the basis and bounded by neither a lower nor an upper bound.
    Free,
    /// Not in the basis, yet not at one of its bounds either.
    SuperBasic,
    /// Both bounds coincide; such a variable can never (re)enter the basis.
    Fixed,
}
