//! Sums of coefficient-power terms.
//!
//! A [`RegressionRepresentation`] is canonical once [`simplify`] and
//! [`order`] have both run on it:
//!
//! - no two terms share a power
//! - no term has a zero coefficient, except the lone canonical zero `0*X^0`
//! - terms ascend by power
//!
//! Equality compares term sequences position by position, so only canonical
//! representations compare semantically.
//!
//! [`simplify`]: RegressionRepresentation::simplify
//! [`order`]: RegressionRepresentation::order

use std::fmt;

use crate::cvp::CvpTerm;

/// An ordered sum of coefficient-power terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegressionRepresentation {
    terms: Vec<CvpTerm>,
}

impl RegressionRepresentation {
    /// Wraps a term list as-is. No normalization is applied.
    #[must_use]
    pub fn from_terms(terms: Vec<CvpTerm>) -> Self {
        Self { terms }
    }

    /// The canonical zero: exactly one term `0*X^0`.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            terms: vec![CvpTerm::ZERO],
        }
    }

    /// The terms in their current order.
    #[must_use]
    pub fn terms(&self) -> &[CvpTerm] {
        &self.terms
    }

    /// Consumes the representation, returning its terms.
    #[must_use]
    pub fn into_terms(self) -> Vec<CvpTerm> {
        self.terms
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Merges like powers, drops zero terms, and restores the canonical zero
    /// if nothing is left.
    ///
    /// The first occurrence of each power keeps its slot; later like terms
    /// are added into it in list order.
    pub fn simplify(&mut self) {
        let mut merged: Vec<CvpTerm> = Vec::with_capacity(self.terms.len());
        for term in self.terms.drain(..) {
            match merged.iter_mut().find(|kept| kept.is_like(&term)) {
                Some(kept) => kept.absorb(&term),
                None => merged.push(term),
            }
        }

        merged.retain(|term| !term.is_zero());
        if merged.is_empty() {
            merged.push(CvpTerm::ZERO);
        }
        self.terms = merged;
    }

    /// Stable sort ascending by power.
    pub fn order(&mut self) {
        self.terms.sort_by_key(CvpTerm::power_key);
    }

    /// Runs [`simplify`](Self::simplify) then [`order`](Self::order).
    pub fn canonicalize(&mut self) {
        self.simplify();
        self.order();
    }

    /// Returns the canonical form of this representation.
    #[must_use]
    pub fn canonical(mut self) -> Self {
        self.canonicalize();
        self
    }

    /// True if the sum does not depend on `X`: no terms, or a single term of
    /// power zero.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [term] => term.is_constant(),
            _ => false,
        }
    }

    /// Value of the sum at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.terms.iter().map(|term| term.evaluate(x)).sum()
    }

    /// Highest power among the terms, if any.
    #[must_use]
    pub fn degree(&self) -> Option<f64> {
        self.terms
            .iter()
            .map(CvpTerm::power_key)
            .max()
            .map(|power| power.0)
    }
}

impl FromIterator<CvpTerm> for RegressionRepresentation {
    fn from_iter<I: IntoIterator<Item = CvpTerm>>(iter: I) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

impl fmt::Display for RegressionRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
