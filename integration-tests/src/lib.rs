//! Shared expression models for the integration tests.

pub mod finance {
    use calculus_core::Expr;

    /// `principal * (1 + rate)^years`
    #[must_use]
    pub fn future_value() -> Expr {
        Expr::var("principal")
            * Expr::pow(Expr::constant(1) + Expr::var("rate"), Expr::var("years"))
    }

    /// Present value of an annuity paying `payment` per period:
    /// `payment * (1 - (1 + rate)^-periods) / rate`.
    #[must_use]
    pub fn annuity_present_value() -> Expr {
        let growth = Expr::pow(
            Expr::constant(1) + Expr::var("rate"),
            -Expr::var("periods"),
        );
        Expr::var("payment") * (Expr::constant(1) - growth) / Expr::var("rate")
    }
}

pub mod kinematics {
    use calculus_core::Expr;

    /// Height of a projectile: `h0 + v0 * t - g * t^2 / 2`.
    #[must_use]
    pub fn height() -> Expr {
        let t = Expr::var("t");
        Expr::var("h0") + Expr::var("v0") * t.clone()
            - Expr::var("g") * Expr::pow(t, Expr::constant(2)) / Expr::constant(2)
    }
}

pub mod bindings {
    use calculus_core::{Arguments, Number, Variable};

    /// Builds an argument map from `(name, value)` pairs.
    pub fn bind<N>(pairs: impl IntoIterator<Item = (&'static str, N)>) -> Arguments
    where
        N: Into<Number>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| (Variable::new(name), value.into()))
            .collect()
    }
}
