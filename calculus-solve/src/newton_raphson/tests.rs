use std::{f64::consts::SQRT_2, sync::Arc};

use approx::assert_relative_eq;
use calculus_core::{AlgorithmFactory, Arguments, Expr, GoalSeekAlgorithm, Number, Variable, Variables};
use num_traits::ToPrimitive;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

fn x() -> Expr {
    Expr::var("x")
}

fn real(value: f64) -> Number {
    Number::try_from(value).unwrap()
}

fn as_f64(value: &Number) -> f64 {
    value.to_f64().unwrap()
}

/// `x^2 - 2`
fn square_minus_two() -> Expr {
    Expr::pow(x(), Expr::constant(2)) - Expr::constant(2)
}

#[test]
fn square_root_of_two() {
    let config = Config::new(1e-10, 100, 10).unwrap();
    let solution = solve_seeded(&square_minus_two(), &real(1.0), &config, 7).unwrap();

    assert_relative_eq!(as_f64(&solution.x), SQRT_2, epsilon = 1e-9);
    assert!(as_f64(&solution.residual).abs() <= 1e-10);
    assert!(solution.iters > 0);
    assert_eq!(solution.corrections, 0);
}

#[test]
fn converged_guess_takes_no_steps() {
    let expr = x() - Expr::constant(3);
    let solution = solve_seeded(&expr, &Number::from(3), &Config::default(), 0).unwrap();
    assert_eq!(solution.iters, 0);
    assert_eq!(solution.x, Number::from(3));
    assert!(matches!(solution.x, Number::Real(_)));
}

#[test]
fn logarithm_of_exponential_from_zero() {
    // The first evaluation computes exp(0) exactly.
    let expr = Expr::ln(Expr::exp(x())) - Expr::constant(1);
    let solution = solve_seeded(&expr, &Number::zero(), &Config::default(), 0).unwrap();
    assert_relative_eq!(as_f64(&solution.x), 1.0, epsilon = 1e-9);
}

#[test]
fn recovers_from_a_zero_derivative() {
    // f'(0) = 0 for x^3 - 8, so the first step needs a correction.
    let expr = Expr::polynomial("x", [1, 0, 0, -8].map(Number::from)).unwrap();
    let config = Config::new(1e-10, 1000, 10).unwrap();
    let solution = solve_seeded(&expr, &Number::zero(), &config, 42).unwrap();

    assert_relative_eq!(as_f64(&solution.x), 2.0, epsilon = 1e-9);
    assert!(solution.corrections >= 1);
}

#[test]
fn constant_derivative_exhausts_corrections() {
    // x * 0 + 1 never reaches zero and its derivative is always zero.
    let expr = x() * Expr::constant(0) + Expr::constant(1);
    let config = Config::new(1e-10, 100, 5).unwrap();

    let result = solve_seeded(&expr, &real(1.0), &config, 3);
    assert!(matches!(
        result,
        Err(Error::MaxArgCorrectionsExceeded { iter: 0, .. })
    ));
}

#[test]
fn same_seed_same_outcome() {
    let expr = Expr::polynomial("x", [1, 0, 0, -8].map(Number::from)).unwrap();
    let config = Config::new(1e-10, 1000, 10).unwrap();

    let first = solve_seeded(&expr, &Number::zero(), &config, 99).unwrap();
    let second = solve_seeded(&expr, &Number::zero(), &config, 99).unwrap();
    assert_eq!(first, second);
}

#[test]
fn no_real_root_exhausts_iterations() {
    let expr = Expr::pow(x(), Expr::constant(2)) + Expr::constant(1);
    let config = Config::new(1e-10, 20, 10).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let result = solve(&expr, &real(0.5), &config, &mut rng);
    assert!(matches!(
        result,
        Err(Error::IterationsExhausted { max_iters: 20 })
    ));
}

#[test]
fn requires_a_single_free_variable() {
    let config = Config::default();

    let two = x() * Expr::var("y");
    assert!(matches!(
        solve_seeded(&two, &real(1.0), &config, 0),
        Err(Error::NotSingleVariable { count: 2 })
    ));

    let none = Expr::constant(4);
    assert!(matches!(
        solve_seeded(&none, &real(1.0), &config, 0),
        Err(Error::NotSingleVariable { count: 0 })
    ));

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(matches!(
        find_root(&two, &Variable::new("x"), &real(1.0), &config, &mut rng),
        Err(Error::NotSingleVariable { count: 2 })
    ));
}

#[test]
fn expression_errors_propagate() {
    let expr = Expr::ln(x());
    let result = solve_seeded(&expr, &real(-1.0), &Config::default(), 0);
    assert!(matches!(result, Err(Error::Expression(_))));

    let expr = Expr::factorial(x()) - Expr::constant(6);
    let result = solve_seeded(&expr, &real(2.0), &Config::default(), 0);
    assert!(matches!(
        result,
        Err(Error::Expression(calculus_core::Error::NotDerivableExpression))
    ));
}

#[test]
fn goal_seek_through_the_factory() {
    let factory = NewtonRaphsonFactory::new(|arguments: &Arguments| Parameters {
        guess: arguments
            .get(&Variable::new("start"))
            .cloned()
            .unwrap_or_else(Number::one),
        ..Parameters::default()
    });
    let cube_root = Expr::goal_seek(
        Expr::var("goal"),
        Expr::pow(x(), Expr::constant(3)),
        "x",
        Arc::new(factory),
    );

    let arguments = Arguments::from([
        (Variable::new("goal"), Number::from(27)),
        (Variable::new("start"), Number::from(2)),
    ]);
    let root = cube_root.evaluate(&arguments).unwrap();
    assert_relative_eq!(as_f64(&root), 3.0, epsilon = 1e-9);
}

#[test]
fn factory_rejects_invalid_parameters() {
    let factory = NewtonRaphsonFactory::new(|_: &Arguments| Parameters {
        max_iters: 0,
        ..Parameters::default()
    });
    let result = factory.create(&Arguments::new(), &Variable::new("x"), &Variables::new());
    let err = result.err().unwrap();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MaxIters)
    );
}

#[test]
fn algorithm_reports_solver_failures() {
    let algorithm = NewtonRaphson::new(real(1.0), Config::new(1e-10, 3, 1).unwrap());
    let expr = Expr::pow(x(), Expr::constant(2)) + Expr::constant(1);
    let err = algorithm.find_root(&expr, &Variable::new("x")).unwrap_err();
    assert!(err.downcast_ref::<Error>().is_some());
}
