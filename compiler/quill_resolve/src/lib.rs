//! Semantic resolution phases for the Quill compiler.
//!
//! This crate takes a freshly parsed FIR tree (`quill_fir`) and enriches
//! it phase by phase: supertype lists resolve against a scope tower,
//! sealed hierarchies collect their direct inheritors, every remaining
//! type reference resolves, and computed control-flow graphs attach to
//! function bodies.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Resolve** → checking / lowering
//! ```
//!
//! The lexer/parser, the scope tower, the symbol store, and the flow-graph
//! builder are external collaborators; this crate consumes them through
//! the [`ScopeTower`] and [`SymbolProvider`] traits and an opaque
//! flow-graph handle. Entry points live in [`pipeline`] and run strictly
//! in order, single-threaded, one compilation unit at a time.

mod control_flow;
mod pipeline;
mod scopes;
mod sealed;
mod symbols;
#[cfg(test)]
mod testutil;
mod type_resolution;

pub use control_flow::FlowGraphAttacher;
pub use pipeline::{
    attach_flow_graph, resolve_sealed_hierarchies, resolve_super_types, resolve_types,
};
pub use scopes::{Position, ScopeTower};
pub use sealed::{apply_inheritors, collect_inheritors, InheritorMap};
pub use symbols::{ClassLike, FileSymbolTable, SymbolProvider};
pub use type_resolution::{SuperTypeResolvePass, TypeResolvePass};
