use indexmap::IndexMap;
use lpstudio_core::options::SolveOptions;
use lpstudio_core::problem::{Constraint, Direction, LinearProgram, Relation};
use lpstudio_core::solution::{Sensitivity, SolveResult, Status};
use lpstudio_core::traits::LpSolver;
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use std::time::Instant;

/// [`LpSolver`] backed by the `microlp` simplex implementation.
///
/// `microlp` reports primal values only. Shadow prices are read from a second
/// solve of the dual program, whose optimal variables are the constraint duals.
#[derive(Debug, Clone, Default)]
pub struct MicrolpSolver {
    options: SolveOptions,
}

impl MicrolpSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    fn primal(program: &LinearProgram) -> (Problem, Vec<microlp::Variable>) {
        let mut problem = Problem::new(optimization_direction(program.direction));
        let vars: Vec<_> = program
            .variables
            .iter()
            .zip(program.objective.iter())
            .map(|(variable, &cost)| problem.add_var(cost, (variable.lower_bound, f64::INFINITY)))
            .collect();
        for constraint in &program.constraints {
            let mut expr = LinearExpr::empty();
            for (var, &coeff) in vars.iter().zip(constraint.coefficients.iter()) {
                if coeff != 0.0 {
                    expr.add(*var, coeff);
                }
            }
            problem.add_constraint(expr, comparison(constraint.relation), constraint.rhs);
        }
        (problem, vars)
    }

    /// Builds the dual of `program` over non-negative columns only. Each part
    /// stands for `sign * y_row`; an equality row gets two parts (`y+ - y-`).
    /// Rows without a single non-zero coefficient are left out.
    fn dual(program: &LinearProgram) -> (Problem, Vec<PricePart>) {
        let mut problem = Problem::new(match program.direction {
            Direction::Maximize => OptimizationDirection::Minimize,
            Direction::Minimize => OptimizationDirection::Maximize,
        });
        let mut parts = Vec::new();
        for (row, constraint) in program.constraints.iter().enumerate() {
            if is_zero_row(constraint) {
                continue;
            }
            for &sign in price_signs(program.direction, constraint.relation) {
                let var = problem.add_var(sign * constraint.rhs, (0.0, f64::INFINITY));
                parts.push(PricePart { row, sign, var });
            }
        }
        let op = match program.direction {
            Direction::Maximize => ComparisonOp::Ge,
            Direction::Minimize => ComparisonOp::Le,
        };
        for (col, &cost) in program.objective.iter().enumerate() {
            let mut expr = LinearExpr::empty();
            for part in &parts {
                let coeff = part.sign * program.constraints[part.row].coefficients[col];
                if coeff != 0.0 {
                    expr.add(part.var, coeff);
                }
            }
            problem.add_constraint(expr, op, cost);
        }
        (problem, parts)
    }

    fn shadow_prices(&self, program: &LinearProgram) -> Vec<f64> {
        let (dual, parts) = Self::dual(program);
        if parts.is_empty() {
            return vec![0.0; program.nconstraints()];
        }
        let solved = dual.solve().map(|solution| {
            let mut prices = vec![0.0; program.nconstraints()];
            for part in &parts {
                prices[part.row] += part.sign * solution[part.var];
            }
            prices
        });
        self.settle_prices(program, solved)
    }

    /// Snaps solved prices. On failure every row that takes part in the dual
    /// gets `NaN`; all-zero rows keep their price of zero.
    fn settle_prices(
        &self,
        program: &LinearProgram,
        solved: Result<Vec<f64>, microlp::Error>,
    ) -> Vec<f64> {
        match solved {
            Ok(prices) => prices
                .into_iter()
                .map(|price| self.options.snap(price))
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "dual solve failed, shadow prices unavailable");
                program
                    .constraints
                    .iter()
                    .map(|constraint| if is_zero_row(constraint) { 0.0 } else { f64::NAN })
                    .collect()
            }
        }
    }
}

struct PricePart {
    row: usize,
    sign: f64,
    var: microlp::Variable,
}

impl LpSolver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &LinearProgram) -> SolveResult {
        let started = Instant::now();
        let (problem, vars) = Self::primal(program);
        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(err) => {
                let status = status_of(&err);
                tracing::info!(
                    status = %status,
                    reason = %err,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "solver finished without a solution"
                );
                return SolveResult::without_solution(status);
            }
        };

        let point: Vec<f64> = vars
            .iter()
            .map(|var| self.options.snap(solution[*var]))
            .collect();
        let variable_values: IndexMap<String, f64> = program
            .variables
            .iter()
            .zip(point.iter())
            .map(|(variable, &value)| (variable.name.clone(), value))
            .collect();
        let objective_value = self.options.snap(solution.objective());

        let sensitivity: IndexMap<String, Sensitivity> = program
            .constraints
            .iter()
            .zip(self.shadow_prices(program))
            .map(|(constraint, shadow_price)| {
                let slack = self.options.snap(constraint.rhs - constraint.lhs(&point));
                (
                    constraint.label.clone(),
                    Sensitivity {
                        shadow_price,
                        slack,
                    },
                )
            })
            .collect();

        tracing::info!(
            status = %Status::Optimal,
            objective = objective_value,
            elapsed_us = started.elapsed().as_micros() as u64,
            "solver finished"
        );
        SolveResult::optimal(objective_value, variable_values, sensitivity)
    }
}

fn optimization_direction(direction: Direction) -> OptimizationDirection {
    match direction {
        Direction::Maximize => OptimizationDirection::Maximize,
        Direction::Minimize => OptimizationDirection::Minimize,
    }
}

fn comparison(relation: Relation) -> ComparisonOp {
    match relation {
        Relation::LessOrEqual => ComparisonOp::Le,
        Relation::GreaterOrEqual => ComparisonOp::Ge,
        Relation::Equal => ComparisonOp::Eq,
    }
}

fn is_zero_row(constraint: &Constraint) -> bool {
    constraint.coefficients.iter().all(|&coeff| coeff == 0.0)
}

/// Signs of the non-negative columns that make up one row's price.
fn price_signs(direction: Direction, relation: Relation) -> &'static [f64] {
    match (direction, relation) {
        (_, Relation::Equal) => &[1.0, -1.0],
        (Direction::Maximize, Relation::LessOrEqual) => &[1.0],
        (Direction::Maximize, Relation::GreaterOrEqual) => &[-1.0],
        (Direction::Minimize, Relation::LessOrEqual) => &[-1.0],
        (Direction::Minimize, Relation::GreaterOrEqual) => &[1.0],
    }
}

fn status_of(err: &microlp::Error) -> Status {
    match err {
        microlp::Error::Infeasible => Status::Infeasible,
        microlp::Error::Unbounded => Status::Unbounded,
        microlp::Error::InternalError(_) => Status::NotSolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use lpstudio_core::form::ConstraintSpec;

    #[test]
    fn price_signs_follow_the_objective_sense() {
        assert_eq!(price_signs(Direction::Maximize, Relation::LessOrEqual), &[1.0]);
        assert_eq!(price_signs(Direction::Maximize, Relation::GreaterOrEqual), &[-1.0]);
        assert_eq!(price_signs(Direction::Minimize, Relation::LessOrEqual), &[-1.0]);
        assert_eq!(price_signs(Direction::Minimize, Relation::Equal), &[1.0, -1.0]);
    }

    #[test]
    fn failed_dual_leaves_prices_unavailable() {
        let program = build(
            Direction::Minimize,
            2,
            &[1.0, 1.0],
            &[
                ConstraintSpec::new(vec![0.0, 0.0], Relation::Equal, 0.0),
                ConstraintSpec::new(vec![1.0, 1.0], Relation::GreaterOrEqual, 2.0),
            ],
        )
        .unwrap();
        let solver = MicrolpSolver::new();
        let prices = solver.settle_prices(
            &program,
            Err(microlp::Error::InternalError("stalled".into())),
        );
        assert_eq!(prices[0], 0.0);
        assert!(prices[1].is_nan());

        let snapped = solver.settle_prices(&program, Ok(vec![-1e-12, 1.0]));
        assert_eq!(snapped, vec![0.0, 1.0]);
    }

    #[test]
    fn maps_solver_errors() {
        assert_eq!(status_of(&microlp::Error::Infeasible), Status::Infeasible);
        assert_eq!(status_of(&microlp::Error::Unbounded), Status::Unbounded);
        assert_eq!(
            status_of(&microlp::Error::InternalError("singular basis".into())),
            Status::NotSolved
        );
    }
}
