//! # Strategies for the Simplex method
//!
//! Module containing different strategies for performing certain procedures in the Simplex
//! method. One example is the decision on which variable should enter the basis.
pub mod pivot_rule;
pub mod priority;
