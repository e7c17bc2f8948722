//! Scope tower interface.
//!
//! The tower — the ordered sequence of lookup scopes (imports, enclosing
//! class, package, ...) — is an external collaborator. This crate only
//! consumes it through the narrow [`ScopeTower`] trait and treats its
//! answers as authoritative.

use quill_fir::{NamePath, ResolvedType};

/// Syntactic position of the reference being resolved.
///
/// The position feeds the tower's ambiguity rules; nested type arguments
/// always resolve at [`Position::Other`] regardless of where the outer
/// reference appears.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Position {
    /// The reference appears in a supertype list.
    SuperTypeList,
    /// Ordinary expression or declaration position.
    Other,
}

/// Name resolution against a scope tower.
///
/// Side-effect-free. Resolution never fails with an error return: an
/// unmatched or ambiguous name comes back as [`ResolvedType::Error`].
pub trait ScopeTower {
    /// Resolve a qualified name path.
    fn lookup(&self, path: &NamePath, position: Position) -> ResolvedType;

    /// Resolve a function-type composite shape (arity and nullability).
    fn resolve_function_shape(
        &self,
        arity: usize,
        nullable: bool,
        position: Position,
    ) -> ResolvedType;
}
