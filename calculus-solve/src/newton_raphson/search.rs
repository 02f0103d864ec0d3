use calculus_core::{Arguments, Expr, Number, Variable, number};
use log::{debug, trace};
use rand::Rng;

use super::{Config, Error, Solution};

/// Core Newton–Raphson iteration.
///
/// The derivative is computed once up front. Whenever it evaluates to zero the
/// estimate is shifted by `epsilon * u`, `u ~ U[-0.5, 0.5]`, and both the
/// expression and its derivative are evaluated again at the shifted point
/// before the next step is taken.
pub(super) fn search<R>(
    expr: &Expr,
    variable: &Variable,
    guess: &Number,
    config: &Config,
    rng: &mut R,
) -> Result<Solution, Error>
where
    R: Rng + ?Sized,
{
    let derivative = expr.derivative(variable)?;
    let epsilon = Number::try_from(config.epsilon())?;

    debug!("newton-raphson: solving `{expr} = 0` for {variable} from {guess}, derivative `{derivative}`");

    let mut x = Number::from(guess.to_real());
    let mut corrections = 0;

    for iter in 0..config.max_iters() {
        let mut fx = evaluate(expr, variable, &x)?;
        if fx.abs() <= epsilon {
            debug!("newton-raphson: converged to {variable} = {x} after {iter} iterations");
            return Ok(Solution {
                x,
                residual: fx,
                iters: iter,
                corrections,
            });
        }

        let mut dfx = evaluate(&derivative, variable, &x)?;
        let mut attempts = 0;
        while dfx.is_zero() {
            if attempts == config.max_arg_corrections() {
                debug!("newton-raphson: derivative stuck at zero near {variable} = {x}");
                return Err(Error::MaxArgCorrectionsExceeded { x, iter });
            }
            attempts += 1;
            corrections += 1;

            let shift = Number::try_from(config.epsilon() * rng.gen_range(-0.5..=0.5))?;
            x = number::add(&[x, shift])?;
            trace!("newton-raphson: correction {attempts} moved {variable} to {x}");

            fx = evaluate(expr, variable, &x)?;
            dfx = evaluate(&derivative, variable, &x)?;
        }

        let step = number::div(&fx, &[dfx])?;
        x = number::sub(&x, &[step])?;
        trace!("newton-raphson: iteration {iter}, f = {fx}, next {variable} = {x}");
    }

    debug!(
        "newton-raphson: no root within {} iterations",
        config.max_iters()
    );
    Err(Error::IterationsExhausted {
        max_iters: config.max_iters(),
    })
}

fn evaluate(expr: &Expr, variable: &Variable, x: &Number) -> Result<Number, Error> {
    let arguments = Arguments::from([(variable.clone(), x.clone())]);
    Ok(expr.evaluate(&arguments)?)
}
