//! Go type expressions for allocation statements.
//!
//! Named types from the target unit and predeclared types render bare.
//! Named types from other units are qualified with their import alias, or
//! with the unit's package name when the alias table has no entry.

use copygen_ir::{ImportAliasTable, TypeId, TypeKind, TypeTable, UnitPath};

pub struct TypeRenderer<'a> {
    table: &'a TypeTable,
    unit: &'a UnitPath,
    imports: &'a ImportAliasTable,
}

impl<'a> TypeRenderer<'a> {
    pub fn new(table: &'a TypeTable, unit: &'a UnitPath, imports: &'a ImportAliasTable) -> Self {
        Self {
            table,
            unit,
            imports,
        }
    }

    pub fn render(&self, ty: TypeId) -> String {
        if let Some(name) = self.table.name(ty) {
            if &name.unit == self.unit {
                return name.ident.clone();
            }
            let qualifier = self
                .imports
                .alias_for(&name.unit)
                .unwrap_or_else(|| name.unit.default_name());
            return format!("{qualifier}.{}", name.ident);
        }

        match self.table.kind(ty) {
            TypeKind::Basic(kind) => kind.name().to_string(),
            TypeKind::Opaque { spelling, .. } => spelling.clone(),
            TypeKind::Pointer(elem) => format!("*{}", self.render(*elem)),
            TypeKind::Slice(elem) => format!("[]{}", self.render(*elem)),
            TypeKind::Array { len, elem } => format!("[{len}]{}", self.render(*elem)),
            TypeKind::Map { key, value } => {
                format!("map[{}]{}", self.render(*key), self.render(*value))
            }
            TypeKind::Struct(fields) => {
                if fields.is_empty() {
                    return "struct{}".to_string();
                }
                let body: Vec<String> = fields
                    .iter()
                    .map(|f| {
                        let tag = f.tag.as_str();
                        if tag.is_empty() {
                            format!("{} {}", f.name, self.render(f.ty))
                        } else {
                            format!("{} {} `{tag}`", f.name, self.render(f.ty))
                        }
                    })
                    .collect();
                format!("struct {{ {} }}", body.join("; "))
            }
        }
    }
}
