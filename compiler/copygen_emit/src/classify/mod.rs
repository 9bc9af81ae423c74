//! Field classification.
//!
//! Decides, for one field, which copy strategy the emitter uses. The result
//! is a closed [`FieldKind`] tree: collection variants carry the
//! classification of their elements, pointer variants carry the
//! classification of their pointee.
//!
//! Checked in order:
//!
//! 1. skip-tagged field: nothing is emitted
//! 2. slice or array: allocate (slices only) and copy element-wise
//! 3. pointer: nil-guarded copy of a scalar or struct pointee
//! 4. struct: delegate to the struct's own copy procedure, or assign
//! 5. map: nothing is emitted
//! 6. everything else: plain assignment

use copygen_ir::{FieldDescriptor, TypeId, TypeKind, TypeTable, UnitPath};

/// How a struct value is copied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StructCopy {
    /// In-unit struct: call its generated copy procedure.
    Deep(TypeId),
    /// External or anonymous struct: shallow value copy.
    Value,
}

/// What sits behind a pointer field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pointee {
    /// Copy the pointed-to value into a fresh temp and point at it.
    Scalar,
    Struct(StructCopy),
    /// Pointer, slice, array or map pointee. The nil guard is emitted with
    /// an empty body.
    Unsupported,
}

/// Copy strategy for one field or collection element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Skip-tagged; the output keeps its zero value.
    Skip,
    /// Map-typed; silently left out of the copy.
    Omit,
    /// Plain assignment.
    Assign,
    Pointer(Pointee),
    /// Re-allocate, then copy each element with `item`.
    Slice { elem: TypeId, item: Box<FieldKind> },
    /// Copy each element with `item` into the existing storage.
    Array { item: Box<FieldKind> },
    Struct(StructCopy),
}

/// Maps field types to [`FieldKind`]s for one target unit.
pub struct FieldClassifier<'a> {
    table: &'a TypeTable,
    unit: &'a UnitPath,
    skip_tag: &'a str,
}

impl<'a> FieldClassifier<'a> {
    pub fn new(table: &'a TypeTable, unit: &'a UnitPath, skip_tag: &'a str) -> Self {
        Self {
            table,
            unit,
            skip_tag,
        }
    }

    /// Classify a declared field, honouring its skip tag.
    pub fn classify_field(&self, field: &FieldDescriptor) -> FieldKind {
        if field.tag.flag(self.skip_tag) {
            return FieldKind::Skip;
        }
        self.classify_type(field.ty)
    }

    /// Classify a value of type `ty`. Used directly for collection items,
    /// which never carry a tag.
    pub fn classify_type(&self, ty: TypeId) -> FieldKind {
        let mut stack = Vec::new();
        self.classify_nested(ty, &mut stack)
    }

    /// `stack` holds the collection types currently being expanded. A type
    /// that contains itself through its elements (`type Tree []Tree`) is
    /// assigned as-is at the point of recursion.
    fn classify_nested(&self, ty: TypeId, stack: &mut Vec<TypeId>) -> FieldKind {
        match self.table.kind(ty) {
            TypeKind::Slice(elem) | TypeKind::Array { elem, .. } => {
                if stack.contains(&ty) {
                    return FieldKind::Assign;
                }
                stack.push(ty);
                let item = Box::new(self.classify_nested(*elem, stack));
                stack.pop();
                if matches!(self.table.kind(ty), TypeKind::Slice(_)) {
                    FieldKind::Slice { elem: *elem, item }
                } else {
                    FieldKind::Array { item }
                }
            }
            TypeKind::Pointer(elem) => FieldKind::Pointer(self.pointee(*elem)),
            TypeKind::Struct(_) => FieldKind::Struct(self.struct_copy(ty)),
            TypeKind::Map { .. } => FieldKind::Omit,
            TypeKind::Basic(_) | TypeKind::Opaque { .. } => FieldKind::Assign,
        }
    }

    fn pointee(&self, elem: TypeId) -> Pointee {
        if self.table.is_scalar(elem) {
            Pointee::Scalar
        } else if self.table.is_struct(elem) {
            Pointee::Struct(self.struct_copy(elem))
        } else {
            Pointee::Unsupported
        }
    }

    fn struct_copy(&self, ty: TypeId) -> StructCopy {
        if self.is_in_unit(ty) {
            StructCopy::Deep(ty)
        } else {
            StructCopy::Value
        }
    }

    /// Whether `ty` is a named type declared in the target unit.
    pub fn is_in_unit(&self, ty: TypeId) -> bool {
        self.table.unit_of(ty) == Some(self.unit)
    }
}
