use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProblemError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
    #[error("out of limits: {0}")]
    OutOfLimits(String),
}

pub type ProblemResult<T> = Result<T, ProblemError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    pub fn all() -> [Direction; 2] {
        [Direction::Maximize, Direction::Minimize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Maximize => "Maximizar",
            Direction::Minimize => "Minimizar",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    #[default]
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl Relation {
    pub fn all() -> [Relation; 3] {
        [
            Relation::LessOrEqual,
            Relation::GreaterOrEqual,
            Relation::Equal,
        ]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
            Relation::Equal => "=",
        }
    }

    pub fn parse(input: &str) -> Option<Relation> {
        match input.trim() {
            "<=" | "≤" => Some(Relation::LessOrEqual),
            ">=" | "≥" => Some(Relation::GreaterOrEqual),
            "=" | "==" => Some(Relation::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A decision variable. Every variable is non-negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub name: String,
    pub lower_bound: f64,
}

impl Variable {
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower_bound: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Constraint {
    pub label: String,
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    /// Left-hand side evaluated at `point`.
    pub fn lhs(&self, point: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(point.iter())
            .map(|(a, x)| a * x)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearProgram {
    pub direction: Direction,
    pub variables: Vec<Variable>,
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    pub fn nconstraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objective_at(&self, point: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(point.iter())
            .map(|(c, x)| c * x)
            .sum()
    }

    pub fn validate(&self) -> ProblemResult<()> {
        let n = self.nvars();
        if n == 0 {
            return Err(ProblemError::InvalidStructure(
                "a program needs at least one variable".into(),
            ));
        }
        if self.objective.len() != n {
            return Err(ProblemError::DimensionMismatch(format!(
                "objective length {} != nvars {n}",
                self.objective.len()
            )));
        }
        check_finite("objective", &self.objective)?;

        for (i, variable) in self.variables.iter().enumerate() {
            if self.variables[..i].iter().any(|v| v.name == variable.name) {
                return Err(ProblemError::InvalidStructure(format!(
                    "duplicate variable name {}",
                    variable.name
                )));
            }
        }

        for (i, constraint) in self.constraints.iter().enumerate() {
            if constraint.coefficients.len() != n {
                return Err(ProblemError::DimensionMismatch(format!(
                    "{} has {} coefficients, expected {n}",
                    constraint.label,
                    constraint.coefficients.len()
                )));
            }
            check_finite(&constraint.label, &constraint.coefficients)?;
            check_finite(&constraint.label, &[constraint.rhs])?;
            if self.constraints[..i]
                .iter()
                .any(|c| c.label == constraint.label)
            {
                return Err(ProblemError::InvalidStructure(format!(
                    "duplicate constraint label {}",
                    constraint.label
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_finite(what: &str, values: &[f64]) -> ProblemResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(ProblemError::InvalidStructure(format!(
            "{what}: value at index {idx} is not a finite number"
        ))),
        None => Ok(()),
    }
}
