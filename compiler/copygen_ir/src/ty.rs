//! Type descriptors.
//!
//! A [`TypeId`] is an index into a [`TypeTable`](crate::TypeTable). Two ids
//! are equal exactly when they denote the same type: structural types are
//! hash-consed and named types are unique per `(unit, ident)`.

use std::fmt;

use crate::tag::StructTag;

/// Interned type identifier.
///
/// Predeclared basic types occupy fixed indices `0..FIRST_COMPOUND`, in the
/// order of [`BasicKind::ALL`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const INT8: TypeId = TypeId(2);
    pub const INT16: TypeId = TypeId(3);
    pub const INT32: TypeId = TypeId(4);
    pub const INT64: TypeId = TypeId(5);
    pub const UINT: TypeId = TypeId(6);
    pub const UINT8: TypeId = TypeId(7);
    pub const UINT16: TypeId = TypeId(8);
    pub const UINT32: TypeId = TypeId(9);
    pub const UINT64: TypeId = TypeId(10);
    pub const UINTPTR: TypeId = TypeId(11);
    pub const FLOAT32: TypeId = TypeId(12);
    pub const FLOAT64: TypeId = TypeId(13);
    pub const COMPLEX64: TypeId = TypeId(14);
    pub const COMPLEX128: TypeId = TypeId(15);
    pub const STRING: TypeId = TypeId(16);

    /// First index handed out for non-basic types.
    pub const FIRST_COMPOUND: u32 = 17;

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        TypeId(index)
    }

    /// Raw table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id is one of the pre-interned basic types.
    #[inline]
    pub const fn is_basic(self) -> bool {
        self.0 < Self::FIRST_COMPOUND
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Predeclared scalar kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    /// Every basic kind, in `TypeId` order.
    pub const ALL: [BasicKind; 17] = [
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
    ];

    /// The Go spelling of this kind.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
        }
    }

    /// Parse a predeclared type name. `byte` and `rune` resolve to their
    /// underlying kinds.
    pub fn from_name(s: &str) -> Option<BasicKind> {
        match s {
            "byte" => Some(BasicKind::Uint8),
            "rune" => Some(BasicKind::Int32),
            _ => BasicKind::ALL.into_iter().find(|k| k.name() == s),
        }
    }

    /// The pre-interned id for this kind.
    pub fn type_id(self) -> TypeId {
        TypeId(self as u32)
    }
}

/// Kinds that are copied by plain assignment without inspecting their
/// contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
    Interface,
    Func,
    Chan,
}

/// Import path of a compilation unit (a Go package path).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitPath(String);

impl UnitPath {
    pub fn new(path: impl Into<String>) -> Self {
        UnitPath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The conventional package name: the last path segment.
    pub fn default_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The unit code is generated for: its import path and package name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Unit {
    pub path: UnitPath,
    pub name: String,
}

impl Unit {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Unit {
            path: UnitPath::new(path),
            name: name.into(),
        }
    }
}

/// Name of a declared (named) type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub unit: UnitPath,
    pub ident: String,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unit, self.ident)
    }
}

/// One field of a struct, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeId,
    pub tag: StructTag,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        FieldDescriptor {
            name: name.into(),
            ty,
            tag: StructTag::default(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = StructTag::new(tag);
        self
    }
}

/// Shape of a type. For named types this is the underlying type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Basic(BasicKind),
    /// Interface, func or chan; `spelling` is the literal Go type expression.
    Opaque { kind: OpaqueKind, spelling: String },
    Pointer(TypeId),
    Slice(TypeId),
    Array { len: u64, elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Struct(Vec<FieldDescriptor>),
}
