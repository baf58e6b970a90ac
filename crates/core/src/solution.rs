use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    NotSolved,
}

impl Status {
    pub fn is_optimal(self) -> bool {
        matches!(self, Status::Optimal)
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Optimal => "Optimal",
            Status::Infeasible => "Infeasible",
            Status::Unbounded => "Unbounded",
            Status::NotSolved => "Not Solved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sensitivity {
    pub shadow_price: f64,
    pub slack: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolveResult {
    pub status: Status,
    /// Present iff the status is optimal.
    pub objective_value: Option<f64>,
    pub variable_values: IndexMap<String, f64>,
    /// Keyed by constraint label; present iff the status is optimal.
    pub sensitivity: Option<IndexMap<String, Sensitivity>>,
}

impl SolveResult {
    pub fn optimal(
        objective_value: f64,
        variable_values: IndexMap<String, f64>,
        sensitivity: IndexMap<String, Sensitivity>,
    ) -> Self {
        Self {
            status: Status::Optimal,
            objective_value: Some(objective_value),
            variable_values,
            sensitivity: Some(sensitivity),
        }
    }

    pub fn without_solution(status: Status) -> Self {
        debug_assert!(!status.is_optimal());
        Self {
            status,
            objective_value: None,
            variable_values: IndexMap::new(),
            sensitivity: None,
        }
    }

    pub fn infeasible() -> Self {
        Self::without_solution(Status::Infeasible)
    }

    pub fn unbounded() -> Self {
        Self::without_solution(Status::Unbounded)
    }

    pub fn value(&self, variable: &str) -> Option<f64> {
        self.variable_values.get(variable).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_optimal_results_carry_no_diagnostics() {
        let result = SolveResult::infeasible();
        assert_eq!(result.status, Status::Infeasible);
        assert!(result.objective_value.is_none());
        assert!(result.sensitivity.is_none());
        assert!(result.variable_values.is_empty());
    }

    #[test]
    fn keeps_variable_order() {
        let mut values = IndexMap::new();
        values.insert("x2".to_string(), 1.0);
        values.insert("x1".to_string(), 3.0);
        let result = SolveResult::optimal(11.0, values, IndexMap::new());
        let names: Vec<&str> = result.variable_values.keys().map(String::as_str).collect();
        assert_eq!(names, ["x2", "x1"]);
        assert_eq!(result.value("x1"), Some(3.0));
    }
}
