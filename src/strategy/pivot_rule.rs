//! # Pivot rules
//!
//! Strategies for deciding which variable should enter the basis next. The solver calls
//! `select_entering_variable` at the start of an iteration and, once it carried out the pivot
//! (or decided that none was needed), reports back through `after_basis_update`.
use crate::error::InconsistencyError;
use crate::number::Abs;
use crate::solver::SolverState;
use crate::solver::variable::VariableStatus;
use crate::strategy::priority::PriorityOrder;

/// Deciding which variable enters the basis.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once a variable has been selected for entering, the row to pivot on is chosen by the solver
/// independent of the strategy; the strategy only hears which row that was through
/// `after_basis_update`.
pub trait PivotRule<F> {
    /// Create a new instance for a single solve.
    ///
    /// Bookkeeping is sized from the solver's dimensions at this point. An instance should not be
    /// reused for a second solve; create a fresh one instead.
    fn new<S: SolverState<F>>(state: &S) -> Self;

    /// Entering variable selection for the primal Simplex method.
    ///
    /// Candidates that are flagged by the solver or fixed are never selected.
    ///
    /// # Return value
    ///
    /// Index of the variable that should enter the basis, or `None` if no variable has a dual
    /// infeasibility strictly exceeding the solver's tolerance. The latter is the normal
    /// termination signal: the current basis is optimal for this pass.
    fn select_entering_variable<S: SolverState<F>>(&mut self, state: &S) -> Option<usize>;

    /// Update bookkeeping after the solver performed a pivot.
    ///
    /// Rules never veto a pivot; this hook exists purely so that stateful rules can track which
    /// variable left the basis. The default implementation does nothing.
    ///
    /// # Errors
    ///
    /// When the rule's bookkeeping turns out to no longer match the solver's state. This is fatal
    /// for the solve, see `InconsistencyError`.
    fn after_basis_update<S: SolverState<F>>(
        &mut self,
        _state: &S,
    ) -> Result<(), InconsistencyError> {
        Ok(())
    }
}

/// Amount by which a variable violates dual feasibility.
///
/// The sign convention depends on where the variable sits relative to its bounds: a variable at
/// its upper bound improves the objective when its reduced cost is positive, a variable at its
/// lower bound when it is negative, and a variable restricted by neither bound in both cases.
///
/// # Return value
///
/// A value that is positive, beyond the solver's tolerance, exactly when bringing the variable
/// into the basis improves the objective.
#[must_use]
pub fn dual_infeasibility<F: Abs>(status: VariableStatus, reduced_cost: F) -> F {
    match status {
        VariableStatus::AtUpperBound => reduced_cost,
        VariableStatus::Free | VariableStatus::SuperBasic => reduced_cost.abs(),
        _ => -reduced_cost,
    }
}

/// Whether the solver excludes a variable from entering, regardless of its reduced cost.
fn is_excluded<F, S: SolverState<F>>(state: &S, j: usize) -> bool {
    state.is_flagged(j) || state.status(j) == VariableStatus::Fixed
}

/// Scan candidates in the order given, settling for the first dual infeasible one.
fn first_dual_infeasible<F, S, I>(state: &S, candidates: I) -> Option<usize>
where
    F: Abs,
    S: SolverState<F>,
    I: Iterator<Item = usize>,
{
    let tolerance = state.dual_feasibility_tolerance();

    candidates
        .filter(|&j| !is_excluded(state, j))
        .find(|&j| dual_infeasibility(state.status(j), state.reduced_cost(j)) > tolerance)
}

/// Simply pivot on the first variable which is dual infeasible.
///
/// Candidates are scanned in index order; no comparison between candidates is made beyond the
/// tolerance test.
pub struct FirstInfeasible;
impl<F: Abs> PivotRule<F> for FirstInfeasible {
    fn new<S: SolverState<F>>(_state: &S) -> Self {
        Self
    }

    fn select_entering_variable<S: SolverState<F>>(&mut self, state: &S) -> Option<usize> {
        first_dual_infeasible(state, 0..state.nr_variables())
    }
}

/// Small modification w.r.t. the `FirstInfeasible` rule; it starts the search from the last
/// variable selected.
pub struct FirstInfeasibleWithMemory {
    last_selected: Option<usize>,
}
impl<F: Abs> PivotRule<F> for FirstInfeasibleWithMemory {
    fn new<S: SolverState<F>>(_state: &S) -> Self {
        Self { last_selected: None }
    }

    fn select_entering_variable<S: SolverState<F>>(&mut self, state: &S) -> Option<usize> {
        let potential = self.last_selected
            .map_or_else(
                || first_dual_infeasible(state, 0..state.nr_variables()),
                |last| {
                    first_dual_infeasible(state, (last + 1)..state.nr_variables())
                        .or_else(|| first_dual_infeasible(state, 0..last))
                },
            );

        self.last_selected = potential;
        potential
    }
}

/// Pivot on the variable with the largest dual infeasibility.
///
/// This best-improvement variant scans all candidates every iteration, so selection is more
/// expensive than for the first-improvement rules.
pub struct MostInfeasible;
impl<F: Abs> PivotRule<F> for MostInfeasible {
    fn new<S: SolverState<F>>(_state: &S) -> Self {
        Self
    }

    fn select_entering_variable<S: SolverState<F>>(&mut self, state: &S) -> Option<usize> {
        let tolerance = state.dual_feasibility_tolerance();

        let mut largest: Option<(usize, F)> = None;
        for (j, infeasibility) in (0..state.nr_variables())
            .filter(|&j| !is_excluded(state, j))
            .map(|j| (j, dual_infeasibility(state.status(j), state.reduced_cost(j))))
            .filter(|(_, infeasibility)| *infeasibility > tolerance) {
            if let Some((existing_j, existing)) = largest.as_mut() {
                if infeasibility > *existing {
                    *existing_j = j;
                    *existing = infeasibility;
                }
            } else {
                largest = Some((j, infeasibility));
            }
        }

        largest.map(|(j, _)| j)
    }
}

/// Prefer the variable that left the basis most recently.
///
/// Candidates are scanned in a priority order rather than index order. Whenever a variable
/// leaves the basis it is promoted to the front of that order, so the next search considers it
/// first. Letting recently displaced variables re-enter quickly tends to interrupt the short
/// cycles that degenerate problems can trap a first-improvement rule in.
///
/// The order starts out as the identity permutation over all variables of the solve the rule was
/// created for.
pub struct LastInFirstOut {
    priority: PriorityOrder,
}

impl<F: Abs> PivotRule<F> for LastInFirstOut {
    fn new<S: SolverState<F>>(state: &S) -> Self {
        Self {
            priority: PriorityOrder::identity(state.nr_variables()),
        }
    }

    fn select_entering_variable<S: SolverState<F>>(&mut self, state: &S) -> Option<usize> {
        debug_assert_eq!(self.priority.len(), state.nr_variables());

        first_dual_infeasible(state, self.priority.iter())
    }

    fn after_basis_update<S: SolverState<F>>(
        &mut self,
        state: &S,
    ) -> Result<(), InconsistencyError> {
        match state.pivot_row() {
            Some(row) => self.priority.promote(state.basic_variable_on_row(row)),
            // A bound flip removes no variable from the basis; there is nothing to reorder.
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use num::rational::Ratio;

    use crate::solver::variable::VariableStatus;
    use crate::strategy::pivot_rule::{
        dual_infeasibility, FirstInfeasible, FirstInfeasibleWithMemory, LastInFirstOut,
        MostInfeasible, PivotRule,
    };
    use crate::tests::state::{at_lower_bound, Scripted};

    #[test]
    fn measure_sign_conventions() {
        assert_eq!(dual_infeasibility(VariableStatus::AtUpperBound, 0.5), 0.5);
        assert_eq!(dual_infeasibility(VariableStatus::AtLowerBound, 0.5), -0.5);
        assert_eq!(dual_infeasibility(VariableStatus::Free, -0.5), 0.5);
        assert_eq!(dual_infeasibility(VariableStatus::SuperBasic, -0.5), 0.5);
        assert_eq!(dual_infeasibility(VariableStatus::Basic, -0.5), 0.5);
    }

    #[test]
    fn single_variable_beyond_tolerance() {
        let state = at_lower_bound(vec![-0.5, 0.2, -1e-9, 0.9], 1e-7);

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));
        // Selection itself must not reorder anything.
        assert_eq!(rule.select_entering_variable(&state), Some(0));

        let mut rule = <FirstInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));

        let mut rule = <MostInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));
    }

    #[test]
    fn priority_beats_magnitude() {
        // Variable 0 has the larger infeasibility, variable 2 left the basis last.
        let mut state = at_lower_bound(vec![-0.5, 0.0, -0.2, 0.0], 1e-7);
        state.basis = vec![2];
        state.pivot_row = Some(0);

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        rule.after_basis_update(&state).unwrap();
        assert_eq!(rule.select_entering_variable(&state), Some(2));

        // The best-improvement rule disagrees on the same state.
        let mut rule = <MostInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));
    }

    #[test]
    fn flagged_and_fixed_are_skipped() {
        let mut state = at_lower_bound(vec![-1.0, -1.0, -1.0], 1e-7);
        state.flagged[0] = true;
        state.statuses[1] = VariableStatus::Fixed;

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(2));

        let mut rule = <MostInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(2));
    }

    #[test]
    fn at_tolerance_is_not_beyond_it() {
        // Values at the tolerance itself don't count: the comparison is strict.
        let mut state = at_lower_bound(vec![-0.1, -0.05, 0.1], 0.1);
        state.statuses[2] = VariableStatus::Free;

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), None);

        let mut rule = <FirstInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), None);

        let mut rule = <MostInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), None);
    }

    #[test]
    fn status_determines_selection() {
        // The same positive reduced cost is only an improvement at an upper bound.
        let mut state = at_lower_bound(vec![0.5, 0.5], 1e-7);
        state.statuses[1] = VariableStatus::AtUpperBound;

        let mut rule = <FirstInfeasible as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(1));
    }

    #[test]
    fn bound_flip_changes_nothing() {
        let mut state = at_lower_bound(vec![-0.5, 0.0, -0.2, 0.0], 1e-7);
        state.basis = vec![2];

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert_eq!(rule.after_basis_update(&state), Ok(()));
        assert_eq!(rule.select_entering_variable(&state), Some(0));
    }

    #[test]
    fn leaving_variable_unknown_to_the_order() {
        let mut state = at_lower_bound(vec![-0.5, 0.0, -0.2, 0.0], 1e-7);
        // The solver reports a leaving variable that can't exist for this problem size.
        state.basis = vec![7];
        state.pivot_row = Some(0);

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert!(rule.after_basis_update(&state).is_err());
    }

    #[test]
    fn memory_resumes_and_wraps() {
        let state = at_lower_bound(vec![-1.0, 0.0, -1.0, 0.0], 1e-7);

        let mut rule = <FirstInfeasibleWithMemory as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));
        assert_eq!(rule.select_entering_variable(&state), Some(2));
        assert_eq!(rule.select_entering_variable(&state), Some(0));
    }

    #[test]
    fn exact_arithmetic() {
        type T = Ratio<i32>;

        let mut state = Scripted {
            reduced_costs: vec![
                T::new(1, 2),
                T::new(-1, 3),
                T::new(0, 1),
                T::new(1, 5),
            ],
            statuses: vec![
                VariableStatus::AtUpperBound,
                VariableStatus::AtLowerBound,
                VariableStatus::Basic,
                VariableStatus::AtLowerBound,
            ],
            flagged: vec![false; 4],
            tolerance: T::new(0, 1),
            pivot_row: None,
            basis: vec![2],
        };

        let mut rule = <LastInFirstOut as PivotRule<_>>::new(&state);
        assert_eq!(rule.select_entering_variable(&state), Some(0));

        // Variable 2 leaves the basis on row 0 and is preferred from then on.
        state.pivot_row = Some(0);
        rule.after_basis_update(&state).unwrap();
        state.statuses[2] = VariableStatus::AtLowerBound;
        state.reduced_costs[2] = T::new(-2, 1);
        assert_eq!(rule.select_entering_variable(&state), Some(2));
    }
}
