//! Coefficient-power terms.

use std::fmt;

use gpcanon_core::monomial;
use ordered_float::OrderedFloat;

/// The monomial `coefficient * X^power` over the implicit regression
/// variable `X`.
///
/// Floats are compared with `OrderedFloat`, so `-0.0 == 0.0` and `NaN`
/// equals itself; this keeps equality of representations reflexive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CvpTerm {
    coefficient: OrderedFloat<f64>,
    power: OrderedFloat<f64>,
}

impl CvpTerm {
    /// The canonical zero term `0 * X^0`.
    pub const ZERO: CvpTerm = CvpTerm {
        coefficient: OrderedFloat(0.0),
        power: OrderedFloat(0.0),
    };

    /// Creates `coefficient * X^power`.
    #[must_use]
    pub fn new(coefficient: f64, power: f64) -> Self {
        Self {
            coefficient: OrderedFloat(coefficient),
            power: OrderedFloat(power),
        }
    }

    /// Creates the constant term `value * X^0`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// The multiplier.
    #[must_use]
    pub fn coefficient(&self) -> f64 {
        self.coefficient.0
    }

    /// The exponent.
    #[must_use]
    pub fn power(&self) -> f64 {
        self.power.0
    }

    pub(crate) fn power_key(&self) -> OrderedFloat<f64> {
        self.power
    }

    /// Returns true if the coefficient is zero, of either sign.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficient.0 == 0.0
    }

    /// Returns true if this term does not depend on `X`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.power.0 == 0.0
    }

    /// Like terms have equal powers.
    #[must_use]
    pub fn is_like(&self, other: &CvpTerm) -> bool {
        self.power.0 == other.power.0
    }

    /// The term with its coefficient negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new(-self.coefficient.0, self.power.0)
    }

    /// `self * other`: coefficients multiply, powers add.
    #[must_use]
    pub fn product(&self, other: &CvpTerm) -> Self {
        Self::new(
            self.coefficient.0 * other.coefficient.0,
            self.power.0 + other.power.0,
        )
    }

    /// `self / other`: coefficients divide, powers subtract. A zero divisor
    /// coefficient yields a zero coefficient.
    #[must_use]
    pub fn quotient(&self, other: &CvpTerm) -> Self {
        let coefficient = if other.coefficient.0 == 0.0 {
            0.0
        } else {
            self.coefficient.0 / other.coefficient.0
        };
        Self::new(coefficient, self.power.0 - other.power.0)
    }

    /// Adds the coefficient of a like term into this one.
    pub(crate) fn absorb(&mut self, like: &CvpTerm) {
        debug_assert!(self.is_like(like));
        self.coefficient = OrderedFloat(self.coefficient.0 + like.coefficient.0);
    }

    /// Value of the term at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        monomial(self.coefficient.0, x, self.power.0)
    }
}

impl fmt::Display for CvpTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*X^{}", self.coefficient.0, self.power.0)
    }
}
