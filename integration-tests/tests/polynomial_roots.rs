use approx::assert_relative_eq;
use calculus_core::{Expr, Number, Variable, number};
use calculus_solve::newton_raphson::{Config, Error, epsilon, solve_seeded};
use num_traits::ToPrimitive;

fn poly(coefficients: &[i64]) -> Expr {
    Expr::polynomial("x", coefficients.iter().copied().map(Number::from)).unwrap()
}

fn real(value: f64) -> Number {
    Number::try_from(value).unwrap()
}

fn root_from(expr: &Expr, guess: f64) -> f64 {
    let config = Config::new(epsilon(12), 200, 10).unwrap();
    solve_seeded(expr, &real(guess), &config, 2024)
        .unwrap()
        .x
        .to_f64()
        .unwrap()
}

#[test]
fn each_root_of_a_cubic_from_a_nearby_guess() {
    // (x - 1)(x - 2)(x + 3) = x^3 - 7x + 6
    let cubic = poly(&[1, 0, -7, 6]);
    assert_relative_eq!(root_from(&cubic, 0.5), 1.0, epsilon = 1e-9);
    assert_relative_eq!(root_from(&cubic, 2.6), 2.0, epsilon = 1e-9);
    assert_relative_eq!(root_from(&cubic, -4.0), -3.0, epsilon = 1e-9);
}

#[test]
fn root_of_a_quadratic_matches_the_formula() {
    // 2x^2 - 3x - 7
    let quadratic = poly(&[2, -3, -7]);
    let expected = (3.0 + (9.0_f64 + 56.0).sqrt()) / 4.0;
    assert_relative_eq!(root_from(&quadratic, 3.0), expected, epsilon = 1e-9);
}

#[test]
fn residual_is_within_tolerance() {
    let quartic = poly(&[1, 0, 0, 0, -16]);
    let config = Config::default();
    let solution = solve_seeded(&quartic, &real(3.0), &config, 1).unwrap();

    assert!(number::near(&solution.residual, &Number::zero(), &real(config.epsilon())).unwrap());
    assert_relative_eq!(solution.x.to_f64().unwrap(), 2.0, epsilon = 1e-9);
}

#[test]
fn stationary_start_is_perturbed_away() {
    // x^2 - 4 has a zero derivative at the starting point.
    let quadratic = poly(&[1, 0, -4]);
    let config = Config::new(epsilon(10), 500, 10).unwrap();
    let solution = solve_seeded(&quadratic, &Number::zero(), &config, 5).unwrap();

    assert!(solution.corrections >= 1);
    assert_relative_eq!(solution.x.to_f64().unwrap().abs(), 2.0, epsilon = 1e-9);
}

#[test]
fn transcendental_equation() {
    // cos(x) = x
    let x = Expr::var("x");
    let expr = Expr::cos(x.clone()) - x;
    let config = Config::default();
    let solution = solve_seeded(&expr, &real(1.0), &config, 0).unwrap();
    assert_relative_eq!(solution.x.to_f64().unwrap(), 0.739_085_133_215_160_6, epsilon = 1e-9);
}

#[test]
fn derivative_is_checked_before_iterating() {
    let x = Variable::new("x");
    let expr = Expr::round(Expr::var("x"), calculus_core::RoundMode::Floor) - Expr::constant(1);
    assert!(expr.variables().contains(&x));

    // The floor has a zero derivative everywhere it is defined.
    let result = solve_seeded(&expr, &real(0.5), &Config::default(), 0);
    assert!(matches!(result, Err(Error::MaxArgCorrectionsExceeded { .. })));
}
