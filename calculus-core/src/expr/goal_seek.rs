use std::{fmt, sync::Arc};

use log::debug;

use crate::{BoxError, Error, number::Number};

use super::{Arguments, Expr, Variable, Variables};

/// Finds a root of a single-variable expression.
pub trait GoalSeekAlgorithm {
    /// Returns a value of `variable` at which `expr` evaluates to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if no root could be found.
    fn find_root(&self, expr: &Expr, variable: &Variable) -> Result<Number, BoxError>;
}

/// Builds a [`GoalSeekAlgorithm`] for one goal-seek evaluation.
///
/// Implemented for any `Fn(&Arguments, &Variable, &Variables)` closure with
/// the matching return type.
pub trait AlgorithmFactory: Send + Sync {
    /// Creates an algorithm from the bindings of the current evaluation, the
    /// inverted variable and the variables of the target expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm cannot be configured from the given
    /// bindings.
    fn create(
        &self,
        arguments: &Arguments,
        inverted: &Variable,
        domain: &Variables,
    ) -> Result<Box<dyn GoalSeekAlgorithm>, BoxError>;
}

impl<F> AlgorithmFactory for F
where
    F: Fn(&Arguments, &Variable, &Variables) -> Result<Box<dyn GoalSeekAlgorithm>, BoxError>
        + Send
        + Sync,
{
    fn create(
        &self,
        arguments: &Arguments,
        inverted: &Variable,
        domain: &Variables,
    ) -> Result<Box<dyn GoalSeekAlgorithm>, BoxError> {
        self(arguments, inverted, domain)
    }
}

/// Goal-seek node: the value of `inverted` that makes `target` equal `goal`.
#[derive(Clone)]
pub struct GoalSeek {
    goal: Box<Expr>,
    target: Box<Expr>,
    inverted: Variable,
    domain: Variables,
    factory: Arc<dyn AlgorithmFactory>,
}

impl GoalSeek {
    pub(super) fn new(
        goal: Expr,
        target: Expr,
        inverted: Variable,
        factory: Arc<dyn AlgorithmFactory>,
    ) -> Self {
        let domain = target.variables();
        Self {
            goal: Box::new(goal),
            target: Box::new(target),
            inverted,
            domain,
            factory,
        }
    }

    #[must_use]
    pub fn goal(&self) -> &Expr {
        &self.goal
    }

    #[must_use]
    pub fn target(&self) -> &Expr {
        &self.target
    }

    #[must_use]
    pub fn inverted(&self) -> &Variable {
        &self.inverted
    }

    /// Variables of the target as it was declared.
    #[must_use]
    pub fn domain(&self) -> &Variables {
        &self.domain
    }

    /// Same node with new goal and target; the declared domain and factory
    /// are kept.
    pub(super) fn with_parts(&self, goal: Expr, target: Expr) -> Self {
        Self {
            goal: Box::new(goal),
            target: Box::new(target),
            inverted: self.inverted.clone(),
            domain: self.domain.clone(),
            factory: Arc::clone(&self.factory),
        }
    }

    /// `arguments` without the binding of the inverted variable.
    pub(super) fn target_arguments(&self, arguments: &Arguments) -> Arguments {
        arguments
            .iter()
            .filter(|(variable, _)| **variable != self.inverted)
            .map(|(variable, value)| (variable.clone(), value.clone()))
            .collect()
    }

    pub(super) fn collect_variables(&self, variables: &mut Variables) {
        let mut target = self.target.variables();
        target.remove(&self.inverted);
        variables.extend(target);
        self.goal.collect_variables(variables);
    }

    pub(super) fn is_constant(&self, wrt: &Variable) -> bool {
        self.goal.is_constant(wrt) && (*wrt == self.inverted || self.target.is_constant(wrt))
    }

    pub(super) fn evaluate(&self, arguments: &Arguments) -> Result<Number, Error> {
        if !self.domain.contains(&self.inverted) {
            return Err(Error::InvertedVariableNotInDomain {
                variable: self.inverted.clone(),
            });
        }

        let goal = self.goal.evaluate(arguments)?;
        let algorithm = self
            .factory
            .create(arguments, &self.inverted, &self.domain)
            .map_err(Error::Algorithm)?;

        let target = self.target.curry(&self.target_arguments(arguments))?;
        let expr = Expr::sub(target, Expr::Constant(goal));

        let free = expr.variables();
        if free.len() != 1 || !free.contains(&self.inverted) {
            return Err(Error::NotSingleVariable { count: free.len() });
        }

        debug!("goal-seeking {} over `{expr}`", self.inverted);
        let root = algorithm
            .find_root(&expr, &self.inverted)
            .map_err(Error::Algorithm)?;
        debug!("goal-seek found {} = {root}", self.inverted);
        Ok(root)
    }
}

impl fmt::Debug for GoalSeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalSeek")
            .field("goal", &self.goal)
            .field("target", &self.target)
            .field("inverted", &self.inverted)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl PartialEq for GoalSeek {
    /// Nodes are equal when their parts are equal and they share a factory.
    fn eq(&self, other: &Self) -> bool {
        self.goal == other.goal
            && self.target == other.target
            && self.inverted == other.inverted
            && self.domain == other.domain
            && Arc::ptr_eq(&self.factory, &other.factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    /// Bisects on `[lo, hi]` with plain `f64` evaluation.
    struct Bisection {
        lo: f64,
        hi: f64,
    }

    impl GoalSeekAlgorithm for Bisection {
        fn find_root(&self, expr: &Expr, variable: &Variable) -> Result<Number, BoxError> {
            use num_traits::ToPrimitive;

            let eval = |x: f64| -> Result<f64, BoxError> {
                let arguments = Arguments::from([(variable.clone(), Number::try_from(x)?)]);
                Ok(expr.evaluate(&arguments)?.to_f64().unwrap_or(f64::NAN))
            };

            let (mut lo, mut hi) = (self.lo, self.hi);
            let low_sign = eval(lo)?.signum();
            for _ in 0..200 {
                let mid = 0.5 * (lo + hi);
                if eval(mid)?.signum() == low_sign {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            Ok(Number::try_from(0.5 * (lo + hi))?)
        }
    }

    fn bisection() -> Arc<dyn AlgorithmFactory> {
        Arc::new(
            |_: &Arguments, _: &Variable, _: &Variables| -> Result<Box<dyn GoalSeekAlgorithm>, BoxError> {
                Ok(Box::new(Bisection { lo: 0.0, hi: 10.0 }))
            },
        )
    }

    fn square_of_x_equals_goal(goal: Expr) -> Expr {
        Expr::goal_seek(
            goal,
            Expr::pow(Expr::var("x"), Expr::constant(2)),
            "x",
            bisection(),
        )
    }

    #[test]
    fn finds_the_inverted_value() {
        use approx::assert_relative_eq;
        use num_traits::ToPrimitive;

        let node = square_of_x_equals_goal(Expr::var("g"));
        let arguments = Arguments::from([(Variable::new("g"), Number::from(9))]);
        let root = node.evaluate(&arguments).unwrap();
        assert_relative_eq!(root.to_f64().unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn inverted_variable_is_not_free() {
        let node = square_of_x_equals_goal(Expr::var("g"));
        let variables = node.variables();
        assert_eq!(variables.len(), 1);
        assert!(variables.contains(&Variable::new("g")));

        assert!(node.is_constant(&Variable::new("x")));
        assert!(!node.is_constant(&Variable::new("g")));
    }

    #[test]
    fn inverted_variable_must_occur_in_target() {
        let node = Expr::goal_seek(Expr::constant(1), Expr::var("y"), "x", bisection());
        assert!(matches!(
            node.evaluate(&Arguments::from([(Variable::new("y"), Number::from(1))])),
            Err(Error::InvertedVariableNotInDomain { .. })
        ));
    }

    #[test]
    fn unbound_target_variables_are_rejected() {
        let target = Expr::var("x") * Expr::var("y");
        let node = Expr::goal_seek(Expr::constant(1), target, "x", bisection());
        assert!(matches!(
            node.evaluate(&Arguments::new()),
            Err(Error::NotSingleVariable { count: 2 })
        ));
    }

    #[test]
    fn factory_errors_propagate() {
        let failing: Arc<dyn AlgorithmFactory> = Arc::new(
            |_: &Arguments, _: &Variable, _: &Variables| -> Result<Box<dyn GoalSeekAlgorithm>, BoxError> {
                Err(Box::new(io::Error::other("bad parameters")))
            },
        );
        let node = Expr::goal_seek(Expr::constant(1), Expr::var("x"), "x", failing);
        assert!(matches!(
            node.evaluate(&Arguments::new()),
            Err(Error::Algorithm(_))
        ));
    }

    #[test]
    fn derivative_depends_on_free_variables() {
        let node = square_of_x_equals_goal(Expr::var("g"));
        assert_eq!(node.derivative(&Variable::new("x")).unwrap(), Expr::constant(0));
        assert!(matches!(
            node.derivative(&Variable::new("g")),
            Err(Error::NotDerivableExpression)
        ));
    }

    #[test]
    fn fully_bound_goal_seek_folds_to_a_constant() {
        use approx::assert_relative_eq;
        use num_traits::ToPrimitive;

        let node = square_of_x_equals_goal(Expr::var("g"));
        let curried = node
            .curry(&Arguments::from([(Variable::new("g"), Number::from(4))]))
            .unwrap();
        let root = match curried {
            Expr::Constant(root) => root,
            other => panic!("expected a constant, got {other}"),
        };
        assert_relative_eq!(root.to_f64().unwrap(), 2.0, epsilon = 1e-9);
    }
}
