//! Import alias table.
//!
//! Maps an external unit's import path to the alias generated code uses to
//! refer to it. The table is built by the caller before generation starts;
//! the generator only reads it.

use rustc_hash::FxHashMap;

use crate::ty::UnitPath;

/// Pre-resolved import aliases, keyed by unit path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImportAliasTable {
    by_path: FxHashMap<UnitPath, String>,
}

impl ImportAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the alias for `path`, replacing any previous one.
    pub fn insert(&mut self, path: UnitPath, alias: impl Into<String>) {
        self.by_path.insert(path, alias.into());
    }

    pub fn alias_for(&self, path: &UnitPath) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// `(alias, path)` pairs sorted by alias, then path.
    pub fn sorted_by_alias(&self) -> Vec<(&str, &UnitPath)> {
        let mut entries: Vec<(&str, &UnitPath)> = self
            .by_path
            .iter()
            .map(|(path, alias)| (alias.as_str(), path))
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl<P: Into<String>, A: Into<String>> FromIterator<(P, A)> for ImportAliasTable {
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        let mut table = ImportAliasTable::new();
        for (path, alias) in iter {
            table.insert(UnitPath::new(path), alias);
        }
        table
    }
}
