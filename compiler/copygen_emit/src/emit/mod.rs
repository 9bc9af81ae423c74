//! Go source emission.
//!
//! The [`Emitter`] owns the mutable state of a run (work queue and output
//! context) and borrows everything else. Its methods are split by concern:
//!
//! - [`header`]: marker comment, package clause, import block
//! - [`fields`]: one statement group per field strategy
//! - [`type_expr`]: element types for `make` calls

mod fields;
mod header;
pub mod type_expr;

use copygen_ir::{ImportAliasTable, TypeId, TypeTable, Unit};

use crate::classify::FieldClassifier;
use crate::config::GenerateConfig;
use crate::context::EmitContext;
use crate::queue::TypeQueue;
use type_expr::TypeRenderer;

/// Name of the receiver in generated procedures.
pub const INPUT: &str = "in";
/// Name of the named result in generated procedures.
pub const OUTPUT: &str = "out";

/// Access path of a field relative to the receiver, e.g. `Tags[v3]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(name: impl Into<String>) -> Self {
        FieldPath(name.into())
    }

    /// The field read from the input value.
    pub fn input(&self) -> String {
        format!("{INPUT}.{}", self.0)
    }

    /// The field written on the output value.
    pub fn output(&self) -> String {
        format!("{OUTPUT}.{}", self.0)
    }

    /// The element at `index` of this collection field.
    #[must_use]
    pub fn index(&self, index: &str) -> FieldPath {
        FieldPath(format!("{}[{index}]", self.0))
    }
}

/// Writes the header and copy procedures of one generation run.
pub struct Emitter<'a> {
    table: &'a TypeTable,
    unit: &'a Unit,
    imports: &'a ImportAliasTable,
    config: &'a GenerateConfig,
    classifier: FieldClassifier<'a>,
    types: TypeRenderer<'a>,
    queue: TypeQueue,
    ctx: EmitContext,
    emitted: usize,
}

impl<'a> Emitter<'a> {
    pub fn new(
        table: &'a TypeTable,
        unit: &'a Unit,
        imports: &'a ImportAliasTable,
        config: &'a GenerateConfig,
        queue: TypeQueue,
    ) -> Self {
        Self {
            table,
            unit,
            imports,
            config,
            classifier: FieldClassifier::new(table, &unit.path, &config.skip_tag),
            types: TypeRenderer::new(table, &unit.path, imports),
            queue,
            ctx: EmitContext::new(),
            emitted: 0,
        }
    }

    /// Next type awaiting a procedure, if any.
    pub fn next_type(&mut self) -> Option<TypeId> {
        self.queue.next()
    }

    /// Emit the copy procedure for the record type `ty`.
    ///
    /// ```text
    /// func (in *T) Copy() (out T) {
    ///     <one statement group per field>
    ///     return
    /// }
    /// ```
    pub fn procedure(&mut self, ty: TypeId) {
        let table = self.table;
        let Some(name) = table.name(ty) else {
            return;
        };
        let ident = name.ident.as_str();
        tracing::debug!(ty = %name, "emitting copy procedure");

        if self.emitted > 0 {
            self.ctx.newline();
        }
        self.emitted += 1;

        self.ctx.writeln(&format!(
            "func ({INPUT} *{ident}) {}() ({OUTPUT} {ident}) {{",
            self.config.method
        ));
        self.ctx.indent();
        for field in table.fields(ty) {
            let kind = self.classifier.classify_field(field);
            tracing::trace!(field = %field.name, ?kind, "classified field");
            self.field(&FieldPath::new(field.name.as_str()), &kind);
        }
        self.ctx.writeln("return");
        self.ctx.dedent();
        self.ctx.writeln("}");
    }

    /// Consume the emitter and return the generated text.
    pub fn finish(mut self) -> String {
        tracing::debug!(
            procedures = self.emitted,
            temps = self.ctx.temps_allocated(),
            "emission complete"
        );
        self.ctx.take_output()
    }
}
