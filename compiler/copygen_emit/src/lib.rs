//! Copygen: deep-copy procedure synthesis
//!
//! Given record types from one Go package, emits a `Copy` method per type
//! that returns a defensively copied value: nested in-unit records are copied
//! recursively, everything else by value.
//!
//! # Architecture
//!
//! ```text
//! seeds ──► TypeQueue ──► Emitter ──► String ──► io::Write
//!              ▲             │
//!              │       FieldClassifier
//!              └── newly discovered in-unit structs
//! ```
//!
//! A [`Generator`] is one generation session: it owns the queue, the temp
//! counter and the output buffer, so separate runs never share state.
//!
//! # Example
//!
//! ```
//! use copygen_emit::Generator;
//! use copygen_ir::{FieldDescriptor, TypeId, TypeTable, Unit};
//!
//! let unit = Unit::new("example.com/app/model", "model");
//! let mut table = TypeTable::new();
//! let user = table.named_struct(&unit.path, "User", vec![
//!     FieldDescriptor::new("Name", TypeId::STRING),
//! ]);
//!
//! let mut generator = Generator::new(&table, unit);
//! generator.add(user);
//! let code = generator.generate();
//! assert!(code.contains("func (in *User) Copy() (out User) {"));
//! assert!(code.contains("\tout.Name = in.Name\n"));
//! ```

pub mod classify;
pub mod config;
pub mod context;
pub mod emit;
pub mod queue;

use std::io::Write;

use copygen_ir::{ImportAliasTable, TypeId, TypeTable, Unit};

pub use classify::{FieldClassifier, FieldKind, Pointee, StructCopy};
pub use config::{GenerateConfig, DEFAULT_MARKER};
pub use context::EmitContext;
pub use emit::{Emitter, FieldPath};
pub use queue::{TypeQueue, Visit};

/// One generation session.
///
/// Collects seed types, then renders the whole output in one pass. The
/// session is consumed by [`generate`](Self::generate) or
/// [`run`](Self::run).
pub struct Generator<'a> {
    table: &'a TypeTable,
    unit: Unit,
    imports: ImportAliasTable,
    config: GenerateConfig,
    queue: TypeQueue,
}

impl<'a> Generator<'a> {
    pub fn new(table: &'a TypeTable, unit: Unit) -> Self {
        let queue = TypeQueue::new(unit.path.clone());
        Self {
            table,
            unit,
            imports: ImportAliasTable::default(),
            config: GenerateConfig::default(),
            queue,
        }
    }

    /// Set the pre-resolved import aliases written to the header and used to
    /// qualify external element types.
    #[must_use]
    pub fn with_imports(mut self, imports: ImportAliasTable) -> Self {
        self.imports = imports;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: GenerateConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a seed type.
    ///
    /// Pointer-to-struct seeds are unwrapped. Seeds that are not structs, or
    /// that belong to another unit, are ignored.
    pub fn add(&mut self, ty: TypeId) {
        let ty = self
            .table
            .pointee(ty)
            .filter(|&elem| self.table.is_struct(elem))
            .unwrap_or(ty);
        if !self.table.is_struct(ty) {
            tracing::debug!(ty = %self.table.qualified_name(ty), "ignoring non-struct seed");
            return;
        }
        self.queue.enqueue(self.table, ty);
    }

    /// Render the header and every reachable copy procedure.
    #[tracing::instrument(level = "debug", skip_all, fields(unit = %self.unit.path))]
    pub fn generate(self) -> String {
        let Generator {
            table,
            unit,
            imports,
            config,
            queue,
        } = self;

        let mut emitter = Emitter::new(table, &unit, &imports, &config, queue);
        emitter.header();
        while let Some(ty) = emitter.next_type() {
            emitter.procedure(ty);
        }
        emitter.finish()
    }

    /// Render everything, then write it to `out` in one call.
    ///
    /// Nothing is written unless rendering completed.
    pub fn run<W: Write>(self, out: &mut W) -> std::io::Result<()> {
        let code = self.generate();
        out.write_all(code.as_bytes())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests;
