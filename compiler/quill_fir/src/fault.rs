//! Internal-consistency faults.
//!
//! These are programming-contract violations, fatal to the current unit's
//! pipeline run — never user-facing diagnostics. Resolution failures are
//! not faults; they surface as [`crate::types::ResolvedType::Error`] values
//! and the pipeline runs to completion.

use thiserror::Error;

use crate::decl::LookupTag;
use crate::transform::ElementKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A pass that disallows stray elements was handed one.
    #[error("`{pass}` pass reached an unexpected {kind} element")]
    UnexpectedElement { pass: &'static str, kind: ElementKind },

    /// A transform changed a function declaration's fundamental kind.
    #[error("transforming a function changed its declaration kind to {found}")]
    FunctionKindChanged { found: &'static str },

    /// A sealed class's inheritor list was finalized a second time.
    #[error("inheritors of sealed class {tag:?} finalized twice")]
    InheritorsFinalizedTwice { tag: LookupTag },

    /// The collected inheritors map did not drain during the rewrite pass.
    #[error("{remaining} sealed inheritor entries left after hierarchy rewrite")]
    InheritorsNotDrained { remaining: usize },
}

pub type FirResult<T = ()> = Result<T, Fault>;
