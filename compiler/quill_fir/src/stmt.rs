//! Statements.
//!
//! The resolution pipeline only needs statements as traversal structure:
//! they carry declarations, type ascriptions, and references that phases
//! must reach, never any resolution state of their own.

use crate::arena::{DeclId, NamedRefId, TypeRefId};
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub span: Span,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(span: Span, kind: StmtKind) -> Self {
        Stmt { span, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// A local declaration (class, alias, or function) inside a body.
    Local(DeclId),
    /// A binding with a type ascription and an initializer reference.
    ///
    /// An omitted ascription parses as an implicit type reference.
    Binding {
        type_ref: TypeRefId,
        init: NamedRefId,
    },
    /// A bare reference mention.
    Ref(NamedRefId),
}
