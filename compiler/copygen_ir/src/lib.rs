//! Copygen IR
//!
//! Type information consumed by the copy generator.
//!
//! The generator never talks to a live reflection facility. Everything it
//! needs about a type (qualified name, owning unit, kind and, for structs,
//! the ordered field list) lives in a [`TypeTable`] populated by whoever
//! drives generation: a manifest loader, a test, or a library caller.
//!
//! # Modules
//!
//! - [`ty`]: `TypeId`, `TypeKind` and the other descriptor types
//! - [`table`]: the interning `TypeTable` and kind predicates
//! - [`tag`]: Go-style struct tag lookup and boolean parsing
//! - [`imports`]: the pre-resolved import alias table

pub mod imports;
pub mod table;
pub mod tag;
pub mod ty;

pub use imports::ImportAliasTable;
pub use table::{TypeData, TypeTable};
pub use tag::{parse_bool, StructTag};
pub use ty::{BasicKind, FieldDescriptor, OpaqueKind, TypeId, TypeKind, TypeName, Unit, UnitPath};
