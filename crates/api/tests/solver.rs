use approx::assert_abs_diff_eq;
use lpstudio_api::{build, LpSolver, MicrolpSolver, Status};
use lpstudio_core::form::ConstraintSpec;
use lpstudio_core::problem::{Direction, LinearProgram, Relation};

const EPS: f64 = 1e-6;

fn row(coefficients: &[f64], relation: Relation, rhs: f64) -> ConstraintSpec {
    ConstraintSpec::new(coefficients.to_vec(), relation, rhs)
}

fn production_mix() -> LinearProgram {
    // max 3x1 + 2x2  s.t.  x1 + x2 <= 4,  x1 <= 3
    build(
        Direction::Maximize,
        2,
        &[3.0, 2.0],
        &[
            row(&[1.0, 1.0], Relation::LessOrEqual, 4.0),
            row(&[1.0, 0.0], Relation::LessOrEqual, 3.0),
        ],
    )
    .expect("build")
}

fn assert_consistent(program: &LinearProgram) {
    let result = MicrolpSolver::new().solve(program);
    assert_eq!(result.status, Status::Optimal);
    let point: Vec<f64> = result.variable_values.values().copied().collect();
    assert_eq!(point.len(), program.nvars());
    for &x in &point {
        assert!(x >= -EPS, "negative variable value {x}");
    }
    let objective = result.objective_value.expect("objective");
    assert_abs_diff_eq!(objective, program.objective_at(&point), epsilon = EPS);
}

#[test]
fn solves_production_mix() {
    let result = MicrolpSolver::new().solve(&production_mix());
    assert_eq!(result.status, Status::Optimal);
    assert_abs_diff_eq!(result.objective_value.unwrap(), 11.0, epsilon = EPS);
    assert_abs_diff_eq!(result.value("x1").unwrap(), 3.0, epsilon = EPS);
    assert_abs_diff_eq!(result.value("x2").unwrap(), 1.0, epsilon = EPS);

    let sensitivity = result.sensitivity.expect("sensitivity");
    let first = sensitivity["Restrição 1"];
    let second = sensitivity["Restrição 2"];
    assert_abs_diff_eq!(first.shadow_price, 2.0, epsilon = EPS);
    assert_abs_diff_eq!(second.shadow_price, 1.0, epsilon = EPS);
    assert_abs_diff_eq!(first.slack, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(second.slack, 0.0, epsilon = EPS);
}

#[test]
fn minimization_prices_have_cost_signs() {
    // min 2x1 + 3x2  s.t.  x1 + x2 >= 4,  x1 <= 3,  x2 <= 3
    let program = build(
        Direction::Minimize,
        2,
        &[2.0, 3.0],
        &[
            row(&[1.0, 1.0], Relation::GreaterOrEqual, 4.0),
            row(&[1.0, 0.0], Relation::LessOrEqual, 3.0),
            row(&[0.0, 1.0], Relation::LessOrEqual, 3.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_eq!(result.status, Status::Optimal);
    assert_abs_diff_eq!(result.objective_value.unwrap(), 9.0, epsilon = EPS);

    let sensitivity = result.sensitivity.unwrap();
    let prices: Vec<f64> = sensitivity.values().map(|s| s.shadow_price).collect();
    let slacks: Vec<f64> = sensitivity.values().map(|s| s.slack).collect();
    assert_abs_diff_eq!(prices[0], 3.0, epsilon = EPS);
    assert_abs_diff_eq!(prices[1], -1.0, epsilon = EPS);
    assert_abs_diff_eq!(prices[2], 0.0, epsilon = EPS);
    assert_abs_diff_eq!(slacks[0], 0.0, epsilon = EPS);
    assert_abs_diff_eq!(slacks[1], 0.0, epsilon = EPS);
    assert_abs_diff_eq!(slacks[2], 2.0, epsilon = EPS);
}

#[test]
fn equality_constraints_get_free_prices() {
    // max x1 + x2  s.t.  x1 + 2x2 = 4,  x1 <= 2
    let program = build(
        Direction::Maximize,
        2,
        &[1.0, 1.0],
        &[
            row(&[1.0, 2.0], Relation::Equal, 4.0),
            row(&[1.0, 0.0], Relation::LessOrEqual, 2.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_eq!(result.status, Status::Optimal);
    assert_abs_diff_eq!(result.objective_value.unwrap(), 3.0, epsilon = EPS);
    let sensitivity = result.sensitivity.unwrap();
    assert_abs_diff_eq!(sensitivity["Restrição 1"].shadow_price, 0.5, epsilon = EPS);
    assert_abs_diff_eq!(sensitivity["Restrição 2"].shadow_price, 0.5, epsilon = EPS);
}

#[test]
fn surplus_of_a_loose_lower_bound_is_negative_slack() {
    // max 3x1 + 2x2  s.t.  x1 + x2 <= 4,  x1 <= 3,  x1 + x2 >= 1
    let program = build(
        Direction::Maximize,
        2,
        &[3.0, 2.0],
        &[
            row(&[1.0, 1.0], Relation::LessOrEqual, 4.0),
            row(&[1.0, 0.0], Relation::LessOrEqual, 3.0),
            row(&[1.0, 1.0], Relation::GreaterOrEqual, 1.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    let loose = result.sensitivity.unwrap()["Restrição 3"];
    assert_abs_diff_eq!(loose.slack, -3.0, epsilon = EPS);
    assert_abs_diff_eq!(loose.shadow_price, 0.0, epsilon = EPS);
}

#[test]
fn objective_matches_values_on_assorted_programs() {
    assert_consistent(&production_mix());
    assert_consistent(
        &build(
            Direction::Minimize,
            3,
            &[1.0, 4.0, 2.5],
            &[
                row(&[1.0, 1.0, 1.0], Relation::GreaterOrEqual, 10.0),
                row(&[2.0, 0.0, 1.0], Relation::LessOrEqual, 14.0),
                row(&[0.0, 1.0, -1.0], Relation::GreaterOrEqual, -2.0),
            ],
        )
        .unwrap(),
    );
    assert_consistent(
        &build(
            Direction::Maximize,
            4,
            &[5.0, 4.0, 3.0, 1.0],
            &[
                row(&[2.0, 3.0, 1.0, 0.0], Relation::LessOrEqual, 5.0),
                row(&[4.0, 1.0, 2.0, 1.0], Relation::LessOrEqual, 11.0),
                row(&[3.0, 4.0, 2.0, 0.0], Relation::LessOrEqual, 8.0),
                row(&[0.0, 0.0, 0.0, 1.0], Relation::Equal, 1.0),
            ],
        )
        .unwrap(),
    );
}

#[test]
fn contradictory_bounds_are_infeasible() {
    let program = build(
        Direction::Maximize,
        2,
        &[1.0, 1.0],
        &[
            row(&[1.0, 0.0], Relation::LessOrEqual, 1.0),
            row(&[1.0, 0.0], Relation::GreaterOrEqual, 2.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_eq!(result.status, Status::Infeasible);
    assert!(result.objective_value.is_none());
    assert!(result.sensitivity.is_none());
}

#[test]
fn zero_row_with_positive_lower_bound_is_infeasible() {
    let program = build(
        Direction::Minimize,
        2,
        &[1.0, 1.0],
        &[row(&[0.0, 0.0], Relation::GreaterOrEqual, 1.0)],
    )
    .unwrap();
    assert_eq!(MicrolpSolver::new().solve(&program).status, Status::Infeasible);
}

#[test]
fn open_direction_is_unbounded() {
    let program = build(
        Direction::Maximize,
        2,
        &[1.0, 0.0],
        &[row(&[1.0, 0.0], Relation::GreaterOrEqual, 0.0)],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_eq!(result.status, Status::Unbounded);
    assert!(result.objective_value.is_none());
    assert!(result.variable_values.is_empty());
}

#[test]
fn identical_input_gives_identical_results() {
    let program = production_mix();
    let solver = MicrolpSolver::new();
    assert_eq!(solver.solve(&program), solver.solve(&program));
    assert_eq!(solver.solve(&program), lpstudio_api::solve(&program));
}

fn finite_prices(program: &LinearProgram) -> Vec<f64> {
    let result = MicrolpSolver::new().solve(program);
    assert_eq!(result.status, Status::Optimal);
    let prices: Vec<f64> = result
        .sensitivity
        .expect("sensitivity")
        .values()
        .map(|s| s.shadow_price)
        .collect();
    for &price in &prices {
        assert!(price.is_finite(), "price {price} is not finite");
    }
    prices
}

fn dual_objective(program: &LinearProgram, prices: &[f64]) -> f64 {
    program
        .constraints
        .iter()
        .zip(prices)
        .map(|(constraint, price)| constraint.rhs * price)
        .sum()
}

#[test]
fn duplicated_equalities_are_priced() {
    // min x1 + x2  s.t.  x1 + x2 = 2,  x1 + x2 = 2
    let program = build(
        Direction::Minimize,
        2,
        &[1.0, 1.0],
        &[
            row(&[1.0, 1.0], Relation::Equal, 2.0),
            row(&[1.0, 1.0], Relation::Equal, 2.0),
        ],
    )
    .unwrap();
    let prices = finite_prices(&program);
    assert_abs_diff_eq!(prices[0] + prices[1], 1.0, epsilon = EPS);
    assert_abs_diff_eq!(dual_objective(&program, &prices), 2.0, epsilon = EPS);
}

#[test]
fn scaled_equalities_keep_the_bound_price() {
    // max 3x1 + 2x2  s.t.  x1 + x2 = 4,  2x1 + 2x2 = 8,  x1 <= 3
    let program = build(
        Direction::Maximize,
        2,
        &[3.0, 2.0],
        &[
            row(&[1.0, 1.0], Relation::Equal, 4.0),
            row(&[2.0, 2.0], Relation::Equal, 8.0),
            row(&[1.0, 0.0], Relation::LessOrEqual, 3.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_abs_diff_eq!(result.objective_value.unwrap(), 11.0, epsilon = EPS);
    let prices = finite_prices(&program);
    assert_abs_diff_eq!(prices[0] + 2.0 * prices[1], 2.0, epsilon = EPS);
    assert_abs_diff_eq!(prices[2], 1.0, epsilon = EPS);
}

#[test]
fn all_zero_equality_row_has_zero_price() {
    // min x1 + 2x2 + 3x3  s.t.  0 = 0,  x1 + x2 + x3 >= 2
    let program = build(
        Direction::Minimize,
        3,
        &[1.0, 2.0, 3.0],
        &[
            row(&[0.0, 0.0, 0.0], Relation::Equal, 0.0),
            row(&[1.0, 1.0, 1.0], Relation::GreaterOrEqual, 2.0),
        ],
    )
    .unwrap();
    let result = MicrolpSolver::new().solve(&program);
    assert_abs_diff_eq!(result.objective_value.unwrap(), 2.0, epsilon = EPS);
    let prices = finite_prices(&program);
    assert_eq!(prices[0], 0.0);
    assert_abs_diff_eq!(prices[1], 1.0, epsilon = EPS);
}

#[test]
fn degenerate_vertex_prices_close_the_duality_gap() {
    // max x1 + x2  s.t.  x1 <= 1,  x2 <= 1,  x1 + x2 <= 2: all three rows bind at (1, 1)
    let program = build(
        Direction::Maximize,
        2,
        &[1.0, 1.0],
        &[
            row(&[1.0, 0.0], Relation::LessOrEqual, 1.0),
            row(&[0.0, 1.0], Relation::LessOrEqual, 1.0),
            row(&[1.0, 1.0], Relation::LessOrEqual, 2.0),
        ],
    )
    .unwrap();
    let prices = finite_prices(&program);
    for &price in &prices {
        assert!(price >= -EPS, "negative price {price} on a <= row of a maximisation");
    }
    assert_abs_diff_eq!(dual_objective(&program, &prices), 2.0, epsilon = EPS);
}
