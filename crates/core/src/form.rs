//! Input model shared by the front ends.
//!
//! A [`ProblemForm`] is what a user fills in: one objective coefficient per
//! variable and a row of coefficients, a relation and a right-hand side per
//! constraint. It is deliberately loose so widgets can edit it in place; the
//! builder turns it into a validated [`LinearProgram`](crate::LinearProgram).

use crate::problem::{check_finite, Direction, ProblemError, ProblemResult, Relation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintSpec {
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl ConstraintSpec {
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        Self {
            coefficients,
            relation,
            rhs,
        }
    }

    pub fn zeros(nvars: usize) -> Self {
        Self::new(vec![0.0; nvars], Relation::LessOrEqual, 0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemForm {
    pub direction: Direction,
    pub objective: Vec<f64>,
    pub constraints: Vec<ConstraintSpec>,
}

impl ProblemForm {
    pub fn blank(direction: Direction, nvars: usize, nconstraints: usize) -> Self {
        Self {
            direction,
            objective: vec![0.0; nvars],
            constraints: (0..nconstraints)
                .map(|_| ConstraintSpec::zeros(nvars))
                .collect(),
        }
    }

    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    /// Grows or shrinks every list, keeping existing cells and zero-filling new ones.
    pub fn resize(&mut self, nvars: usize, nconstraints: usize) {
        self.objective.resize(nvars, 0.0);
        self.constraints
            .resize_with(nconstraints, || ConstraintSpec::zeros(nvars));
        for row in &mut self.constraints {
            row.coefficients.resize(nvars, 0.0);
        }
    }

    pub fn validate(&self) -> ProblemResult<()> {
        let n = self.variable_count();
        check_finite("objective", &self.objective)?;
        for (idx, row) in self.constraints.iter().enumerate() {
            if row.coefficients.len() != n {
                return Err(ProblemError::DimensionMismatch(format!(
                    "constraint {} has {} coefficients, expected {n}",
                    idx + 1,
                    row.coefficients.len()
                )));
            }
            let what = format!("constraint {}", idx + 1);
            check_finite(&what, &row.coefficients)?;
            check_finite(&what, &[row.rhs])?;
        }
        Ok(())
    }
}

impl Default for ProblemForm {
    fn default() -> Self {
        Self::blank(Direction::Maximize, 2, 1)
    }
}
