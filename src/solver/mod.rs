//! # Solver state access
//!
//! Pivot rules are defined over state that the solver owns: reduced costs, variable statuses and
//! tolerances are pulled by reference each call rather than copied into the strategy. The trait
//! in this module is the capability handed to a strategy at construction time; strategies never
//! reach the solver through any other channel.
pub mod variable;

use crate::solver::variable::VariableStatus;

/// Read access to a simplex solver, as far as entering variable selection needs it.
///
/// The implementor is expected to be primarily read-only from the perspective of this trait; all
/// mutation of the tableau and basis happens on the solver's side, between the two calls a
/// strategy receives each iteration.
///
/// Variables are indexed `0..self.nr_variables()` with the structural variables first and one
/// slack variable per row after them, consistent with the indexing the solver itself uses.
pub trait SolverState<F> {
    /// The number of structural columns in the problem.
    fn nr_columns(&self) -> usize;

    /// The number of rows in the problem, equal to the number of slack variables.
    fn nr_rows(&self) -> usize;

    /// The total number of variables a pivot rule chooses from.
    fn nr_variables(&self) -> usize {
        self.nr_columns() + self.nr_rows()
    }

    /// Reduced cost of a variable.
    ///
    /// # Arguments
    ///
    /// * `j`: Variable index, smaller than `self.nr_variables()`.
    ///
    /// # Return value
    ///
    /// Rate of objective change if this variable were to enter the basis.
    fn reduced_cost(&self, j: usize) -> F;

    /// Position of a variable relative to the current basis and its bounds.
    ///
    /// # Arguments
    ///
    /// * `j`: Variable index, smaller than `self.nr_variables()`.
    fn status(&self, j: usize) -> VariableStatus;

    /// Whether the solver temporarily bars a variable from entering the basis.
    ///
    /// # Arguments
    ///
    /// * `j`: Variable index, smaller than `self.nr_variables()`.
    fn is_flagged(&self, j: usize) -> bool;

    /// Threshold below which a reduced cost violation is considered numerical noise.
    fn dual_feasibility_tolerance(&self) -> F;

    /// Row of the pivot that was performed last.
    ///
    /// # Return value
    ///
    /// `None` when the latest step did not remove a variable from the basis, such as after a
    /// bound flip or a degenerate step without a pivot row.
    fn pivot_row(&self) -> Option<usize>;

    /// The variable occupying a basis row at the moment this is called.
    ///
    /// During `PivotRule::after_basis_update`, called with the row of `Self::pivot_row`, this
    /// identifies the variable that the pivot removed from the basis.
    ///
    /// # Arguments
    ///
    /// * `row`: Row index, smaller than `self.nr_rows()`.
    fn basic_variable_on_row(&self, row: usize) -> usize;
}
