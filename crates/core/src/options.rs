use crate::form::ProblemForm;
use crate::problem::{ProblemError, ProblemResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolveOptions {
    /// Values closer to zero than this are reported as exactly zero.
    pub zero_tolerance: f64,
}

impl SolveOptions {
    pub fn with_tolerance(zero_tolerance: f64) -> Self {
        Self { zero_tolerance }
    }

    pub fn snap(&self, value: f64) -> f64 {
        if value.abs() <= self.zero_tolerance {
            0.0
        } else {
            value
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            zero_tolerance: 1e-9,
        }
    }
}

/// Bounds the front ends impose on a problem form. The data model itself has none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub min_variables: usize,
    pub max_variables: usize,
    pub min_constraints: usize,
    pub max_constraints: usize,
    /// How many history entries are shown.
    pub history_display: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_variables: 2,
            max_variables: 4,
            min_constraints: 1,
            max_constraints: 10,
            history_display: 5,
        }
    }
}

impl Limits {
    pub fn validate(&self) -> ProblemResult<()> {
        if self.min_variables == 0 || self.min_variables > self.max_variables {
            return Err(ProblemError::InvalidStructure(format!(
                "variable range {}..={} is empty",
                self.min_variables, self.max_variables
            )));
        }
        if self.min_constraints > self.max_constraints {
            return Err(ProblemError::InvalidStructure(format!(
                "constraint range {}..={} is empty",
                self.min_constraints, self.max_constraints
            )));
        }
        Ok(())
    }

    pub fn check(&self, form: &ProblemForm) -> ProblemResult<()> {
        let nvars = form.variable_count();
        if nvars < self.min_variables || nvars > self.max_variables {
            return Err(ProblemError::OutOfLimits(format!(
                "{nvars} variables, allowed {}..={}",
                self.min_variables, self.max_variables
            )));
        }
        let ncons = form.constraints.len();
        if ncons < self.min_constraints || ncons > self.max_constraints {
            return Err(ProblemError::OutOfLimits(format!(
                "{ncons} constraints, allowed {}..={}",
                self.min_constraints, self.max_constraints
            )));
        }
        Ok(())
    }

    pub fn clamp_variables(&self, count: usize) -> usize {
        count.clamp(self.min_variables, self.max_variables)
    }

    pub fn clamp_constraints(&self, count: usize) -> usize {
        count.clamp(self.min_constraints, self.max_constraints)
    }
}
