//! Per-field statement groups.
//!
//! Each strategy reads from `in.<path>` and writes to `out.<path>`. Temps
//! come from the run-wide counter so nested guards and loops never reuse a
//! name.

use copygen_ir::TypeId;

use super::{Emitter, FieldPath};
use crate::classify::{FieldKind, Pointee, StructCopy};

impl Emitter<'_> {
    pub(super) fn field(&mut self, path: &FieldPath, kind: &FieldKind) {
        match kind {
            FieldKind::Skip | FieldKind::Omit => {}
            FieldKind::Assign | FieldKind::Struct(StructCopy::Value) => self.assign(path),
            FieldKind::Struct(StructCopy::Deep(ty)) => self.deep_struct(path, *ty),
            FieldKind::Pointer(pointee) => self.pointer(path, *pointee),
            FieldKind::Slice { elem, item } => self.slice(path, *elem, item),
            FieldKind::Array { item } => self.elements(path, item),
        }
    }

    fn assign(&mut self, path: &FieldPath) {
        self.ctx
            .writeln(&format!("{} = {}", path.output(), path.input()));
    }

    fn deep_struct(&mut self, path: &FieldPath, ty: TypeId) {
        self.queue.enqueue(self.table, ty);
        self.ctx.writeln(&format!(
            "{} = {}.{}()",
            path.output(),
            path.input(),
            self.config.method
        ));
    }

    /// Nil-guarded copy. A nil input leaves the output at its zero value, so
    /// no `else` branch is needed.
    fn pointer(&mut self, path: &FieldPath, pointee: Pointee) {
        let input = path.input();
        self.ctx.writeln(&format!("if {input} != nil {{"));
        self.ctx.indent();
        match pointee {
            Pointee::Scalar | Pointee::Struct(StructCopy::Value) => {
                let temp = self.ctx.fresh_temp();
                self.ctx.writeln(&format!("{temp} := *{input}"));
                self.ctx.writeln(&format!("{} = &{temp}", path.output()));
            }
            Pointee::Struct(StructCopy::Deep(ty)) => {
                self.queue.enqueue(self.table, ty);
                let temp = self.ctx.fresh_temp();
                self.ctx
                    .writeln(&format!("{temp} := {input}.{}()", self.config.method));
                self.ctx.writeln(&format!("{} = &{temp}", path.output()));
            }
            Pointee::Unsupported => {}
        }
        self.ctx.dedent();
        self.ctx.writeln("}");
    }

    /// Allocate a fresh slice of the input's length, then copy elements.
    /// Empty and nil inputs leave the output nil.
    fn slice(&mut self, path: &FieldPath, elem: TypeId, item: &FieldKind) {
        let input = path.input();
        self.ctx.writeln(&format!("if len({input}) > 0 {{"));
        self.ctx.indent();
        self.ctx.writeln(&format!(
            "{} = make([]{}, len({input}))",
            path.output(),
            self.types.render(elem)
        ));
        self.elements(path, item);
        self.ctx.dedent();
        self.ctx.writeln("}");
    }

    /// Element-wise loop over an existing collection.
    fn elements(&mut self, path: &FieldPath, item: &FieldKind) {
        let index = self.ctx.fresh_temp();
        self.ctx
            .writeln(&format!("for {index} := range {} {{", path.input()));
        self.ctx.indent();
        self.field(&path.index(&index), item);
        self.ctx.dedent();
        self.ctx.writeln("}");
    }
}
