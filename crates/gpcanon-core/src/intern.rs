//! Symbol interning.
//!
//! Variable names (terminal set entries such as `X`, `A0`, `D3`) are interned
//! once per arena and referred to by a dense [`SymbolId`].

use hashbrown::HashMap;

use crate::expr::SymbolId;

/// Maps variable names to dense ids and back.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    ids: HashMap<Box<str>, SymbolId>,
    names: Vec<Box<str>>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its id. Ids are handed out in first-seen
    /// order starting at zero.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` symbols are interned.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = SymbolId::try_from(self.names.len()).expect("symbol table capacity exceeded");
        self.ids.insert(name.into(), id);
        self.names.push(name.into());
        id
    }

    /// Looks up the id of an already interned name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// Returns the name behind `id`.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id as usize).map(AsRef::as_ref)
    }

    /// Number of interned symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.names
            .iter()
            .zip(0..)
            .map(|(name, id)| (id, name.as_ref()))
    }
}
