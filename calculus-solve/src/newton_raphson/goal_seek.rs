use calculus_core::{
    AlgorithmFactory, Arguments, BoxError, Expr, GoalSeekAlgorithm, Number, Variable, Variables,
};
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Config, search::search};

/// Newton–Raphson as a goal-seek algorithm.
///
/// Each root search seeds its own perturbation generator, so repeated
/// evaluations of the same goal-seek are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonRaphson {
    guess: Number,
    config: Config,
    seed: u64,
}

impl NewtonRaphson {
    #[must_use]
    pub fn new(guess: Number, config: Config) -> Self {
        Self {
            guess,
            config,
            seed: 0,
        }
    }

    /// Uses `seed` for the perturbation generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn guess(&self) -> &Number {
        &self.guess
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl GoalSeekAlgorithm for NewtonRaphson {
    fn find_root(&self, expr: &Expr, variable: &Variable) -> Result<Number, BoxError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let solution = search(expr, variable, &self.guess, &self.config, &mut rng)?;
        Ok(solution.x)
    }
}

/// Solver parameters produced for one goal-seek evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub guess: Number,
    pub epsilon: f64,
    pub max_iters: usize,
    pub max_arg_corrections: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        let config = Config::default();
        Self {
            guess: Number::zero(),
            epsilon: config.epsilon(),
            max_iters: config.max_iters(),
            max_arg_corrections: config.max_arg_corrections(),
        }
    }
}

/// Builds [`NewtonRaphson`] algorithms from parameters derived from the
/// bindings of each evaluation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use calculus_core::{Arguments, Expr, Number, Variable, number};
/// use calculus_solve::newton_raphson::{NewtonRaphsonFactory, Parameters};
///
/// // Find x such that x^2 == goal, starting from x = 1.
/// let factory = NewtonRaphsonFactory::new(|_: &Arguments| Parameters {
///     guess: Number::from(1),
///     ..Parameters::default()
/// });
/// let sqrt = Expr::goal_seek(
///     Expr::var("goal"),
///     Expr::pow(Expr::var("x"), Expr::constant(2)),
///     "x",
///     Arc::new(factory),
/// );
///
/// let arguments = Arguments::from([(Variable::new("goal"), Number::from(2))]);
/// let root = sqrt.evaluate(&arguments).unwrap();
/// let expected = Number::try_from(std::f64::consts::SQRT_2).unwrap();
/// let tolerance = Number::try_from(1e-9).unwrap();
/// assert!(number::near(&root, &expected, &tolerance).unwrap());
/// ```
pub struct NewtonRaphsonFactory<P> {
    provider: P,
    seed: u64,
}

impl<P> NewtonRaphsonFactory<P>
where
    P: Fn(&Arguments) -> Parameters + Send + Sync,
{
    pub fn new(provider: P) -> Self {
        Self { provider, seed: 0 }
    }

    /// Uses `seed` for the perturbation generator of every built algorithm.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl<P> AlgorithmFactory for NewtonRaphsonFactory<P>
where
    P: Fn(&Arguments) -> Parameters + Send + Sync,
{
    fn create(
        &self,
        arguments: &Arguments,
        inverted: &Variable,
        _domain: &Variables,
    ) -> Result<Box<dyn GoalSeekAlgorithm>, BoxError> {
        let parameters = (self.provider)(arguments);
        let config = Config::new(
            parameters.epsilon,
            parameters.max_iters,
            parameters.max_arg_corrections,
        )?;
        debug!(
            "newton-raphson: goal-seeking {inverted} from {} with {config:?}",
            parameters.guess
        );
        Ok(Box::new(
            NewtonRaphson::new(parameters.guess, config).with_seed(self.seed),
        ))
    }
}
