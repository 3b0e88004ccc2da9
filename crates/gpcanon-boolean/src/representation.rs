//! Canonical behaviour of a boolean tree.

use std::fmt;

use crate::bdd::BddRef;
use crate::session::BddSession;

/// The ROBDD of a boolean tree, tied to the session that built it.
///
/// Two representations are equal iff they come from the same session and
/// share a root, which for ROBDDs means they compute the same function.
#[derive(Clone, Copy)]
pub struct BooleanRepresentation<'s> {
    session: &'s BddSession,
    root: BddRef,
}

impl<'s> BooleanRepresentation<'s> {
    pub(crate) fn new(session: &'s BddSession, root: BddRef) -> Self {
        Self { session, root }
    }

    /// Root of the diagram in the session's manager.
    #[must_use]
    pub fn root(&self) -> BddRef {
        self.root
    }

    /// The session this representation belongs to.
    #[must_use]
    pub fn session(&self) -> &'s BddSession {
        self.session
    }

    /// True if the function is a tautology or a contradiction, i.e. its
    /// satisfying-assignment count is `0` or `2^n`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.root.is_terminal()
    }

    /// The constant value, if the function is constant.
    #[must_use]
    pub fn as_constant(&self) -> Option<bool> {
        self.root.as_constant()
    }

    /// Number of assignments to the session's variables that satisfy the
    /// function.
    #[must_use]
    pub fn sat_count(&self) -> u128 {
        self.session.manager().sat_count(self.root)
    }

    /// Value under `assignment`, indexed in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is shorter than the declared variables.
    #[must_use]
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.session.manager().evaluate(self.root, assignment)
    }

    /// Number of diagram nodes reachable from the root.
    #[must_use]
    pub fn size(&self) -> usize {
        self.session.manager().size(self.root)
    }

    /// Negated behaviour.
    #[must_use]
    pub fn not(&self) -> Self {
        Self::new(self.session, self.session.manager().not(self.root))
    }

    /// Conjunction with `other`, or `None` if it belongs to another session.
    #[must_use]
    pub fn and(&self, other: &Self) -> Option<Self> {
        self.same_session(other)
            .then(|| Self::new(self.session, self.session.manager().and(self.root, other.root)))
    }

    /// Disjunction with `other`, or `None` if it belongs to another session.
    #[must_use]
    pub fn or(&self, other: &Self) -> Option<Self> {
        self.same_session(other)
            .then(|| Self::new(self.session, self.session.manager().or(self.root, other.root)))
    }

    pub(crate) fn same_session(&self, other: &Self) -> bool {
        std::ptr::eq(self.session, other.session)
    }
}

impl PartialEq for BooleanRepresentation<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_session(other) && self.root == other.root
    }
}

impl Eq for BooleanRepresentation<'_> {}

impl fmt::Debug for BooleanRepresentation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanRepresentation")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
