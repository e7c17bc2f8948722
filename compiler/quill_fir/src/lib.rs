//! Quill FIR — front-end intermediate representation.
//!
//! This crate contains the tree model for one compilation unit between
//! parsing and code generation, plus the frameworks every resolution phase
//! is built on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Arena allocation with typed 32-bit node ids
//! - Declarations, statements, type references, and reference nodes
//! - Read-only [`visitor::Visitor`] traversal
//! - In-place [`transform::Transformer`] rewriting with transparent
//!   pass-through defaults
//!
//! # Design Philosophy
//!
//! - **Intern everything**: strings → `Name(u32)`
//! - **Flatten everything**: no boxed children, nodes reference each other
//!   by arena index, so a phase can rewrite one slot's attributes without
//!   invalidating any other id
//! - **Resolution state is one-directional**: phase markers only advance,
//!   resolved type references are never re-resolved, and control-flow
//!   references go empty → bound exactly once

mod arena;
mod decl;
mod fault;
mod interner;
mod refs;
mod span;
mod stmt;
pub mod transform;
mod types;
pub mod validate;
pub mod visitor;

pub use arena::{DeclId, FirArena, File, FlowRefId, NamedRefId, StmtId, TypeRefId};
pub use decl::{
    ClassDecl, Decl, DeclKind, FunctionDecl, LookupTag, Modality, Param, ResolvePhase,
    TypeAliasDecl,
};
pub use fault::{Fault, FirResult};
pub use interner::{Name, NamePath, StringInterner};
pub use refs::{FlowGraphId, FlowRef, NamedRef};
pub use span::Span;
pub use stmt::{Stmt, StmtKind};
pub use types::{Annotation, FunctionTypeShape, ResolvedType, TypeRef, TypeRefKind};
