//! Work queue of record types awaiting a copy procedure.
//!
//! Every in-unit struct type reachable from the seeds passes through here
//! exactly once. Pending entries are handed out in qualified-name order so
//! that output does not depend on discovery order.

use std::collections::BTreeSet;

use copygen_ir::{TypeId, TypeTable, UnitPath};
use rustc_hash::FxHashMap;

/// Visit state of a queued type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Waiting to be emitted.
    Pending,
    /// Selected by [`TypeQueue::next`]; never handed out again.
    Done,
}

/// Queue of types that need a generated copy procedure.
pub struct TypeQueue {
    /// The only unit whose types are accepted.
    unit: UnitPath,
    /// Visit state of every type ever accepted.
    states: FxHashMap<TypeId, Visit>,
    /// Pending types ordered by `(qualified name, id)`.
    pending: BTreeSet<(String, TypeId)>,
}

impl TypeQueue {
    pub fn new(unit: UnitPath) -> Self {
        Self {
            unit,
            states: FxHashMap::default(),
            pending: BTreeSet::new(),
        }
    }

    /// Add `ty` if it belongs to the target unit and has not been seen.
    ///
    /// Returns `true` when the type was newly queued. Types from other units
    /// and types already known (pending or done) are ignored.
    pub fn enqueue(&mut self, table: &TypeTable, ty: TypeId) -> bool {
        if table.unit_of(ty) != Some(&self.unit) {
            return false;
        }
        if self.states.contains_key(&ty) {
            return false;
        }
        self.states.insert(ty, Visit::Pending);
        let name = table.qualified_name(ty);
        tracing::debug!(ty = %name, "queued type");
        self.pending.insert((name, ty));
        true
    }

    /// Select the pending type with the smallest qualified name and mark it
    /// done. Returns `None` once every queued type has been selected.
    pub fn next(&mut self) -> Option<TypeId> {
        let (_, ty) = self.pending.pop_first()?;
        self.states.insert(ty, Visit::Done);
        Some(ty)
    }

    pub fn state(&self, ty: TypeId) -> Option<Visit> {
        self.states.get(&ty).copied()
    }

    /// Number of types ever queued.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
