//! Type references and resolved types.
//!
//! A type reference starts as a parsed shape (name path plus argument
//! shapes, or "implicit") and is rewritten in place to its resolved form by
//! the type-resolution phase. Resolution is one-directional: a resolved
//! reference is never resolved again.

use smallvec::SmallVec;

use crate::arena::TypeRefId;
use crate::decl::LookupTag;
use crate::interner::NamePath;
use crate::span::Span;

/// Annotation attached to a type reference, preserved through resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub path: NamePath,
    pub span: Span,
}

/// A type reference node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub span: Span,
    pub annotations: Vec<Annotation>,
    pub kind: TypeRefKind,
}

impl TypeRef {
    pub fn new(span: Span, kind: TypeRefKind) -> Self {
        TypeRef {
            span,
            annotations: Vec::new(),
            kind,
        }
    }

    /// Whether this reference carries a resolved type.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.kind,
            TypeRefKind::Resolved { .. } | TypeRefKind::ResolvedFunction { .. }
        )
    }

    /// The resolved type, if resolution has happened.
    pub fn resolved_type(&self) -> Option<&ResolvedType> {
        match &self.kind {
            TypeRefKind::Resolved { ty } | TypeRefKind::ResolvedFunction { ty, .. } => Some(ty),
            TypeRefKind::Unresolved { .. } | TypeRefKind::Implicit | TypeRefKind::Function(_) => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRefKind {
    /// Parsed shape awaiting resolution.
    Unresolved {
        path: NamePath,
        args: SmallVec<[TypeRefId; 2]>,
        nullable: bool,
    },
    /// No written type; inferred from context. Never resolved in place.
    Implicit,
    /// Parsed function-type shape, e.g. `(Int) -> Str`.
    Function(FunctionTypeShape),
    /// Fully resolved.
    Resolved { ty: ResolvedType },
    /// Resolved function shape; keeps its component references.
    ResolvedFunction {
        ty: ResolvedType,
        shape: FunctionTypeShape,
    },
}

/// Component references of a function type, each independently resolvable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTypeShape {
    pub receiver: Option<TypeRefId>,
    pub params: SmallVec<[TypeRefId; 4]>,
    pub ret: TypeRefId,
    pub nullable: bool,
}

impl FunctionTypeShape {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A fully resolved type value.
///
/// Resolution never fails with an error *return*: an unmatched or ambiguous
/// name comes back as the [`ResolvedType::Error`] sentinel, which flows
/// through downstream phases like any other resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Class {
        tag: LookupTag,
        args: Vec<ResolvedType>,
        nullable: bool,
    },
    Function {
        arity: usize,
        nullable: bool,
    },
    /// Error marker carrying the failure reason for later diagnostics.
    Error { reason: String },
}

impl ResolvedType {
    /// Plain non-generic class type.
    pub fn class(tag: LookupTag) -> Self {
        ResolvedType::Class {
            tag,
            args: Vec::new(),
            nullable: false,
        }
    }

    /// The lookup tag, for tag-based types only.
    pub fn lookup_tag(&self) -> Option<LookupTag> {
        match self {
            ResolvedType::Class { tag, .. } => Some(*tag),
            ResolvedType::Function { .. } | ResolvedType::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResolvedType::Error { .. })
    }

    /// Mark the type nullable, where the shape can express it.
    pub fn nullable(self) -> Self {
        match self {
            ResolvedType::Class { tag, args, .. } => ResolvedType::Class {
                tag,
                args,
                nullable: true,
            },
            ResolvedType::Function { arity, .. } => ResolvedType::Function {
                arity,
                nullable: true,
            },
            error @ ResolvedType::Error { .. } => error,
        }
    }
}
