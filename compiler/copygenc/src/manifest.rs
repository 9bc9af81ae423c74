//! Type manifests.
//!
//! A manifest is the JSON stand-in for a reflection facility: it declares the
//! target package, the import aliases, every named type the generator may
//! encounter, and the seed types.
//!
//! Loading happens in three passes so declarations can refer to each other
//! in any order, including themselves:
//!
//! 1. declare every named type
//! 2. define struct types and types with a literal underlying type
//! 3. define types whose underlying type is another named type

use copygen_emit::{GenerateConfig, Generator};
use copygen_ir::{
    BasicKind, FieldDescriptor, ImportAliasTable, OpaqueKind, TypeId, TypeKind, TypeTable, Unit,
    UnitPath,
};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::CliError;
use crate::type_expr::{self, TypeExpr};

/// Raw manifest as written on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The unit copy methods are generated for.
    pub package: Unit,
    #[serde(default)]
    pub imports: ImportAliasTable,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Type expressions of the seed types.
    #[serde(default)]
    pub seeds: Vec<String>,
    #[serde(default)]
    pub config: GenerateConfig,
}

/// One named type.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    /// Owning unit; defaults to the target package.
    #[serde(default)]
    pub unit: Option<UnitPath>,
    /// Package name used to qualify references; defaults to the last
    /// segment of `unit`.
    #[serde(default)]
    pub package: Option<String>,
    /// Struct fields, in declaration order.
    #[serde(default)]
    pub fields: Option<Vec<FieldDecl>>,
    /// Underlying type expression for non-struct named types.
    #[serde(default)]
    pub underlying: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub tag: String,
}

/// A resolved manifest, ready to generate from.
pub struct Loaded {
    pub table: TypeTable,
    pub unit: Unit,
    pub imports: ImportAliasTable,
    pub config: GenerateConfig,
    pub seeds: Vec<TypeId>,
}

impl Loaded {
    /// Start a generation session over this manifest's types and seeds.
    pub fn generator(&self) -> Generator<'_> {
        let mut generator = Generator::new(&self.table, self.unit.clone())
            .with_imports(self.imports.clone())
            .with_config(self.config.clone());
        for &seed in &self.seeds {
            generator.add(seed);
        }
        generator
    }
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Manifest, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve every declaration and seed into a [`TypeTable`].
    #[tracing::instrument(level = "debug", skip_all, fields(
        package = %self.package.path,
        types = self.types.len(),
    ))]
    pub fn resolve(self) -> Result<Loaded, CliError> {
        let mut resolver = Resolver::new(&self.package, &self.imports);

        // Pass 1: declare.
        let mut ids = Vec::with_capacity(self.types.len());
        for decl in &self.types {
            ids.push(resolver.declare(decl)?);
        }

        // Pass 2: structs and literal underlying types.
        let mut chained = Vec::new();
        for (decl, &id) in self.types.iter().zip(&ids) {
            match (&decl.fields, &decl.underlying) {
                (Some(fields), None) => {
                    let fields = fields
                        .iter()
                        .map(|f| {
                            let ty = resolver.resolve_str(&f.ty)?;
                            Ok(FieldDescriptor::new(f.name.as_str(), ty).with_tag(f.tag.as_str()))
                        })
                        .collect::<Result<Vec<_>, CliError>>()?;
                    resolver.table.define(id, TypeKind::Struct(fields));
                }
                (None, Some(underlying)) => {
                    let target = resolver.resolve_str(underlying)?;
                    if resolver.table.name(target).is_some() {
                        chained.push((id, target));
                    } else {
                        let kind = resolver.table.kind(target).clone();
                        resolver.table.define(id, kind);
                    }
                }
                _ => {
                    return Err(CliError::AmbiguousDecl {
                        name: decl.name.clone(),
                    })
                }
            }
        }

        // Pass 3: `type A B` takes B's underlying type, following chains.
        for &(id, target) in &chained {
            let root = follow_chain(&chained, target);
            let kind = resolver.table.kind(root).clone();
            resolver.table.define(id, kind);
        }

        let seeds = self
            .seeds
            .iter()
            .map(|seed| resolver.resolve_str(seed))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(seeds = seeds.len(), "manifest resolved");

        Ok(Loaded {
            table: resolver.table,
            unit: self.package,
            imports: self.imports,
            config: self.config,
            seeds,
        })
    }
}

/// Follow `type A B` links to the first type that is not itself such a
/// link. Cyclic chains stop after visiting every link once.
fn follow_chain(chained: &[(TypeId, TypeId)], start: TypeId) -> TypeId {
    let mut current = start;
    for _ in 0..chained.len() {
        match chained.iter().find(|(id, _)| *id == current) {
            Some(&(_, next)) => current = next,
            None => break,
        }
    }
    current
}

/// Name resolution state for one manifest.
struct Resolver {
    table: TypeTable,
    target: UnitPath,
    /// Package name or import alias → unit path.
    qualifiers: FxHashMap<String, UnitPath>,
}

impl Resolver {
    fn new(package: &Unit, imports: &ImportAliasTable) -> Self {
        let mut qualifiers = FxHashMap::default();
        qualifiers.insert(package.name.clone(), package.path.clone());
        for (alias, path) in imports.sorted_by_alias() {
            qualifiers.insert(alias.to_string(), path.clone());
        }
        Self {
            table: TypeTable::new(),
            target: package.path.clone(),
            qualifiers,
        }
    }

    fn declare(&mut self, decl: &TypeDecl) -> Result<TypeId, CliError> {
        let unit = decl.unit.clone().unwrap_or_else(|| self.target.clone());
        if self.table.lookup_named(&unit, &decl.name).is_some() {
            return Err(CliError::Duplicate {
                name: format!("{unit}.{}", decl.name),
            });
        }
        let qualifier = decl
            .package
            .clone()
            .unwrap_or_else(|| unit.default_name().to_string());
        self.qualifiers.entry(qualifier).or_insert_with(|| unit.clone());
        Ok(self.table.declare_named(&unit, &decl.name))
    }

    fn resolve_str(&mut self, expr: &str) -> Result<TypeId, CliError> {
        let parsed = type_expr::parse(expr).map_err(|source| CliError::TypeExpr {
            expr: expr.to_string(),
            source,
        })?;
        self.resolve(&parsed)
    }

    fn resolve(&mut self, expr: &TypeExpr) -> Result<TypeId, CliError> {
        match expr {
            TypeExpr::Named {
                qualifier: None,
                ident,
            } => {
                if let Some(kind) = BasicKind::from_name(ident) {
                    return Ok(kind.type_id());
                }
                if ident == "error" {
                    return Ok(self.table.opaque(OpaqueKind::Interface, "error"));
                }
                self.table
                    .lookup_named(&self.target, ident)
                    .ok_or_else(|| CliError::UnknownType {
                        name: ident.clone(),
                    })
            }
            TypeExpr::Named {
                qualifier: Some(qualifier),
                ident,
            } => {
                let unit = self.qualifiers.get(qualifier).ok_or_else(|| {
                    CliError::UnknownQualifier {
                        qualifier: qualifier.clone(),
                    }
                })?;
                self.table
                    .lookup_named(unit, ident)
                    .ok_or_else(|| CliError::UnknownType {
                        name: format!("{qualifier}.{ident}"),
                    })
            }
            TypeExpr::Pointer(elem) => {
                let elem = self.resolve(elem)?;
                Ok(self.table.pointer(elem))
            }
            TypeExpr::Slice(elem) => {
                let elem = self.resolve(elem)?;
                Ok(self.table.slice(elem))
            }
            TypeExpr::Array(len, elem) => {
                let elem = self.resolve(elem)?;
                Ok(self.table.array(*len, elem))
            }
            TypeExpr::Map(key, value) => {
                let key = self.resolve(key)?;
                let value = self.resolve(value)?;
                Ok(self.table.map(key, value))
            }
            TypeExpr::Opaque(kind, spelling) => Ok(self.table.opaque(*kind, spelling.as_str())),
        }
    }
}
