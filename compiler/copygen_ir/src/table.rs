//! Type table.
//!
//! Stores every type the generator can see and hands out [`TypeId`]s.
//! Structural types are deduplicated through a hash map; named types are
//! registered once per `(unit, ident)` and may refer to themselves, which is
//! why declaration and definition are separate steps.

use rustc_hash::FxHashMap;

use crate::ty::{BasicKind, FieldDescriptor, OpaqueKind, TypeId, TypeKind, TypeName, UnitPath};

/// One entry of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeData {
    /// Declared name, `None` for type literals and predeclared basics.
    pub name: Option<TypeName>,
    /// Underlying shape.
    pub kind: TypeKind,
}

/// Interning store for type descriptors.
pub struct TypeTable {
    /// Storage indexed by `TypeId`.
    types: Vec<TypeData>,
    /// Dedup map for unnamed types.
    structural: FxHashMap<TypeKind, TypeId>,
    /// Dedup map for named types.
    named: FxHashMap<TypeName, TypeId>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Create a table with the predeclared basics pre-interned at their
    /// fixed ids.
    pub fn new() -> Self {
        let mut table = TypeTable {
            types: Vec::with_capacity(64),
            structural: FxHashMap::default(),
            named: FxHashMap::default(),
        };
        for kind in BasicKind::ALL {
            let id = table.push(None, TypeKind::Basic(kind));
            debug_assert_eq!(id, kind.type_id());
            table.structural.insert(TypeKind::Basic(kind), id);
        }
        table
    }

    fn push(&mut self, name: Option<TypeName>, kind: TypeKind) -> TypeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type tables never approach u32::MAX entries"
        )]
        let id = TypeId::from_index(self.types.len() as u32);
        self.types.push(TypeData { name, kind });
        id
    }

    /// Intern an unnamed type.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.structural.get(&kind) {
            return id;
        }
        let id = self.push(None, kind.clone());
        self.structural.insert(kind, id);
        id
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Slice(elem))
    }

    pub fn array(&mut self, len: u64, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Array { len, elem })
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeKind::Map { key, value })
    }

    pub fn opaque(&mut self, kind: OpaqueKind, spelling: impl Into<String>) -> TypeId {
        self.intern(TypeKind::Opaque {
            kind,
            spelling: spelling.into(),
        })
    }

    /// The empty interface, `interface{}`.
    pub fn any(&mut self) -> TypeId {
        self.opaque(OpaqueKind::Interface, "interface{}")
    }

    /// Declare a named type, returning the existing id if it was already
    /// declared. Until [`define`](Self::define) runs, the type reads as an
    /// empty struct.
    pub fn declare_named(&mut self, unit: &UnitPath, ident: &str) -> TypeId {
        let name = TypeName {
            unit: unit.clone(),
            ident: ident.to_string(),
        };
        if let Some(&id) = self.named.get(&name) {
            return id;
        }
        let id = self.push(Some(name.clone()), TypeKind::Struct(Vec::new()));
        self.named.insert(name, id);
        id
    }

    /// Set the underlying shape of a declared named type.
    ///
    /// Returns `false` and leaves the table untouched when `id` is not a
    /// named type; unnamed types are fixed by their structure.
    pub fn define(&mut self, id: TypeId, kind: TypeKind) -> bool {
        let data = &mut self.types[id.index()];
        if data.name.is_none() {
            return false;
        }
        data.kind = kind;
        true
    }

    /// Declare and define a named struct in one step.
    pub fn named_struct(
        &mut self,
        unit: &UnitPath,
        ident: &str,
        fields: Vec<FieldDescriptor>,
    ) -> TypeId {
        let id = self.declare_named(unit, ident);
        self.define(id, TypeKind::Struct(fields));
        id
    }

    pub fn lookup_named(&self, unit: &UnitPath, ident: &str) -> Option<TypeId> {
        let name = TypeName {
            unit: unit.clone(),
            ident: ident.to_string(),
        };
        self.named.get(&name).copied()
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn name(&self, id: TypeId) -> Option<&TypeName> {
        self.get(id).name.as_ref()
    }

    /// Owning unit of a named type. Type literals and basics have none.
    pub fn unit_of(&self, id: TypeId) -> Option<&UnitPath> {
        self.name(id).map(|n| &n.unit)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // -- Kind predicates --

    pub fn is_struct(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Struct(_))
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Pointer(_))
    }

    /// Whether values of this type are copied by plain assignment: basics,
    /// interfaces, funcs and chans.
    pub fn is_scalar(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Basic(_) | TypeKind::Opaque { .. })
    }

    /// Pointee of a pointer type.
    pub fn pointee(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Pointer(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Fields of a struct type, empty for everything else.
    pub fn fields(&self, id: TypeId) -> &[FieldDescriptor] {
        match self.kind(id) {
            TypeKind::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Human-readable name used for ordering and diagnostics.
    ///
    /// Named types render as `unit/path.Ident`; everything else renders as its
    /// Go type expression with fully qualified names inside.
    pub fn qualified_name(&self, id: TypeId) -> String {
        if let Some(name) = self.name(id) {
            return name.to_string();
        }
        match self.kind(id) {
            TypeKind::Basic(kind) => kind.name().to_string(),
            TypeKind::Opaque { spelling, .. } => spelling.clone(),
            TypeKind::Pointer(elem) => format!("*{}", self.qualified_name(*elem)),
            TypeKind::Slice(elem) => format!("[]{}", self.qualified_name(*elem)),
            TypeKind::Array { len, elem } => format!("[{len}]{}", self.qualified_name(*elem)),
            TypeKind::Map { key, value } => format!(
                "map[{}]{}",
                self.qualified_name(*key),
                self.qualified_name(*value)
            ),
            TypeKind::Struct(fields) => {
                let body: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} {}", f.name, self.qualified_name(f.ty)))
                    .collect();
                format!("struct{{ {} }}", body.join("; "))
            }
        }
    }
}
