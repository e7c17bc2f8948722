//! Declarations: classes, type aliases, and functions.

use std::fmt;

use smallvec::SmallVec;

use crate::arena::{DeclId, FlowRefId, StmtId, TypeRefId};
use crate::interner::Name;
use crate::span::Span;

/// Opaque, globally unique reference to a class-like declaration.
///
/// A value type used for cross-references such as inheritor lists; it never
/// owns or points back into the tree. Equality is structural.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LookupTag(u32);

impl LookupTag {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        LookupTag(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LookupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookupTag({})", self.0)
    }
}

/// Last pipeline stage a declaration has completed.
///
/// Markers only ever advance; see [`Decl::advance_phase`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ResolvePhase {
    /// As parsed, nothing resolved.
    Raw,
    /// Supertype references resolved.
    SuperTypes,
    /// All type references resolved.
    Types,
    /// Body analyses attached (control flow).
    Body,
}

/// Whether a class hierarchy is open, closed, or leaf-only.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Modality {
    Open,
    /// Closed hierarchy: the full set of direct subclasses must be known.
    Sealed,
    Final,
}

/// A named declaration with its resolve-phase marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub name: Name,
    pub span: Span,
    pub phase: ResolvePhase,
    pub kind: DeclKind,
}

impl Decl {
    pub fn new(name: Name, span: Span, kind: DeclKind) -> Self {
        Decl {
            name,
            span,
            phase: ResolvePhase::Raw,
            kind,
        }
    }

    /// Advance the resolve-phase marker.
    ///
    /// Markers are monotonic: a pass stamping an earlier phase than the
    /// declaration already carries leaves the marker unchanged.
    pub fn advance_phase(&mut self, phase: ResolvePhase) {
        if phase > self.phase {
            tracing::trace!(name = ?self.name, from = ?self.phase, to = ?phase, "phase advance");
            self.phase = phase;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Class(ClassDecl),
    TypeAlias(TypeAliasDecl),
    Function(FunctionDecl),
}

impl DeclKind {
    /// Short kind name for fault messages.
    pub fn name(&self) -> &'static str {
        match self {
            DeclKind::Class(_) => "class",
            DeclKind::TypeAlias(_) => "type alias",
            DeclKind::Function(_) => "function",
        }
    }
}

/// Class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// This declaration's own lookup tag.
    pub tag: LookupTag,
    pub modality: Modality,
    pub super_type_refs: SmallVec<[TypeRefId; 2]>,
    /// Member declarations in source order.
    pub members: Vec<DeclId>,
    /// Direct subclasses of a sealed class, in collection encounter order.
    ///
    /// `None` until the sealed-hierarchy phase finalizes it; finalized at
    /// most once. A sealed class nothing extends keeps `None`.
    pub inheritors: Option<Vec<LookupTag>>,
}

impl ClassDecl {
    pub fn new(tag: LookupTag, modality: Modality) -> Self {
        ClassDecl {
            tag,
            modality,
            super_type_refs: SmallVec::new(),
            members: Vec::new(),
            inheritors: None,
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.modality == Modality::Sealed
    }
}

/// `alias Name = Target` — expands transparently to its target reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub tag: LookupTag,
    pub expanded: TypeRefId,
}

/// Function-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub params: Vec<Param>,
    pub return_type: TypeRefId,
    pub body: Vec<StmtId>,
    /// Control-flow reference for the body; empty until flow analysis.
    pub flow_ref: FlowRefId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub type_ref: TypeRefId,
}
