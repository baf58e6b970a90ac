#![forbid(unsafe_code)]

pub mod builder;
pub mod session;
pub mod solver;

use lpstudio_core::problem::ProblemError;
use thiserror::Error;

pub use builder::{build, from_form, LpBuilder};
pub use lpstudio_core::options::{Limits, SolveOptions};
pub use lpstudio_core::solution::{Sensitivity, SolveResult, Status};
pub use lpstudio_core::traits::LpSolver;
pub use session::Session;
pub use solver::MicrolpSolver;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("problem validation failed: {0}")]
    InvalidProblem(#[from] ProblemError),
}

pub fn solve(program: &lpstudio_core::problem::LinearProgram) -> SolveResult {
    MicrolpSolver::new().solve(program)
}
