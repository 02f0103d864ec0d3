use std::fmt;

/// The nested numeric domains `N ⊂ N0 ⊂ Z ⊂ Q ⊂ R`.
///
/// Domains are ordered by inclusion, so the narrowest domain containing two
/// others is simply the larger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Positive integers.
    N,
    /// Non-negative integers.
    N0,
    /// Integers.
    Z,
    /// Rationals.
    Q,
    /// Reals.
    R,
}

impl Domain {
    /// Returns the narrowest domain containing both `self` and `other`.
    #[must_use]
    pub fn broaden(self, other: Self) -> Self {
        self.max(other)
    }

    /// Returns the narrowest domain containing every given domain, or `None`
    /// when there are none.
    pub fn broadest(domains: impl IntoIterator<Item = Self>) -> Option<Self> {
        domains.into_iter().reduce(Self::broaden)
    }

    /// Returns whether values in this domain are represented exactly.
    #[must_use]
    pub fn is_exact(self) -> bool {
        self != Self::R
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::N => "N",
            Self::N0 => "N0",
            Self::Z => "Z",
            Self::Q => "Q",
            Self::R => "R",
        };
        f.write_str(name)
    }
}
