use crate::Error;

use super::{Arguments, Expr};

impl Expr {
    /// Substitutes the bound variables with their values and simplifies.
    ///
    /// Binding every free variable reduces the expression to a constant equal
    /// to `self.evaluate(arguments)`. Variables without a binding stay free.
    ///
    /// # Errors
    ///
    /// Returns an error if simplifying the substituted tree fails.
    pub fn curry(&self, arguments: &Arguments) -> Result<Expr, Error> {
        match self {
            Self::Variable(variable) => Ok(arguments
                .get(variable)
                .map_or_else(|| self.clone(), |value| Self::Constant(value.clone()))),
            Self::Constant(_) => Ok(self.clone()),
            Self::GoalSeek(goal_seek) => {
                // The inverted variable is bound by the node, not by the caller.
                let goal = goal_seek.goal().curry(arguments)?;
                let target = goal_seek
                    .target()
                    .curry(&goal_seek.target_arguments(arguments))?;
                Self::GoalSeek(goal_seek.with_parts(goal, target)).simplify()
            }
            _ => self
                .try_map_children(|child| child.curry(arguments))?
                .simplify(),
        }
    }
}
