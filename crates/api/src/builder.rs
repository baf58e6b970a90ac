use crate::ApiError;
use lpstudio_core::form::{ConstraintSpec, ProblemForm};
use lpstudio_core::problem::{Constraint, Direction, LinearProgram, ProblemError, Variable};

pub fn variable_name(idx: usize) -> String {
    format!("x{}", idx + 1)
}

pub fn constraint_label(idx: usize) -> String {
    format!("Restrição {}", idx + 1)
}

#[derive(Debug, Clone, Default)]
pub struct LpBuilder {
    direction: Direction,
    variables: Option<usize>,
    objective: Option<Vec<f64>>,
    constraints: Vec<ConstraintSpec>,
}

impl LpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn variables(mut self, count: usize) -> Self {
        self.variables = Some(count);
        self
    }

    pub fn objective(mut self, coefficients: Vec<f64>) -> Self {
        self.objective = Some(coefficients);
        self
    }

    pub fn constraint(mut self, spec: ConstraintSpec) -> Self {
        self.constraints.push(spec);
        self
    }

    pub fn constraints(mut self, specs: impl IntoIterator<Item = ConstraintSpec>) -> Self {
        self.constraints.extend(specs);
        self
    }

    /// Names variables `x1..xN` and labels constraints `Restrição 1..M`.
    pub fn build(self) -> Result<LinearProgram, ApiError> {
        let objective = self.objective.ok_or_else(|| {
            ProblemError::InvalidStructure("objective vector missing".into())
        })?;
        let nvars = self.variables.unwrap_or(objective.len());
        if objective.len() != nvars {
            return Err(ProblemError::DimensionMismatch(format!(
                "{} objective coefficients for {nvars} variables",
                objective.len()
            ))
            .into());
        }

        let program = LinearProgram {
            direction: self.direction,
            variables: (0..nvars)
                .map(|idx| Variable::non_negative(variable_name(idx)))
                .collect(),
            objective,
            constraints: self
                .constraints
                .into_iter()
                .enumerate()
                .map(|(idx, spec)| Constraint {
                    label: constraint_label(idx),
                    coefficients: spec.coefficients,
                    relation: spec.relation,
                    rhs: spec.rhs,
                })
                .collect(),
        };
        program.validate()?;
        tracing::debug!(
            direction = ?program.direction,
            nvars = program.nvars(),
            nconstraints = program.nconstraints(),
            "built linear program"
        );
        Ok(program)
    }
}

pub fn build(
    direction: Direction,
    variable_count: usize,
    objective: &[f64],
    constraints: &[ConstraintSpec],
) -> Result<LinearProgram, ApiError> {
    LpBuilder::new()
        .direction(direction)
        .variables(variable_count)
        .objective(objective.to_vec())
        .constraints(constraints.iter().cloned())
        .build()
}

pub fn from_form(form: &ProblemForm) -> Result<LinearProgram, ApiError> {
    build(
        form.direction,
        form.variable_count(),
        &form.objective,
        &form.constraints,
    )
}
