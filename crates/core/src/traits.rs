use crate::problem::LinearProgram;
use crate::solution::SolveResult;

/// A linear programming backend.
///
/// Implementations never fail: infeasible, unbounded and otherwise unsolved
/// programs are reported through [`SolveResult::status`].
pub trait LpSolver {
    fn name(&self) -> &'static str;

    fn solve(&self, program: &LinearProgram) -> SolveResult;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, program: &LinearProgram) -> SolveResult {
        (**self).solve(program)
    }
}

impl<S: LpSolver + ?Sized> LpSolver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, program: &LinearProgram) -> SolveResult {
        (**self).solve(program)
    }
}
