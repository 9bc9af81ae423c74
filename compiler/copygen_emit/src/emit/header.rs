//! File header: marker comment, package clause and import block.

use super::Emitter;

impl Emitter<'_> {
    /// Write the file header. Imports are sorted by alias.
    pub fn header(&mut self) {
        self.ctx.writeln(&self.config.marker);
        self.ctx.newline();
        self.ctx.writeln(&format!("package {}", self.unit.name));
        self.ctx.newline();

        self.ctx.writeln("import (");
        self.ctx.indent();
        for (alias, path) in self.imports.sorted_by_alias() {
            self.ctx.writeln(&format!("{alias} {:?}", path.as_str()));
        }
        self.ctx.dedent();
        self.ctx.writeln(")");
        self.ctx.newline();
    }
}
