//! Reference nodes: named references and control-flow references.

use std::fmt;

use crate::interner::Name;

/// A reference to a named entity inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedRef {
    /// Parsed but not yet resolved against any scope.
    Unresolved { name: Name },
    /// Error placeholder carrying only a diagnostic reason.
    ///
    /// A leaf: it owns no identifier or symbol, and transforming it is an
    /// identity no-op.
    Error { reason: String },
}

/// Opaque handle to a control-flow graph computed by the flow builder.
///
/// This core never constructs or inspects the graph; it only stores the
/// handle.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FlowGraphId(u32);

impl FlowGraphId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FlowGraphId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FlowGraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlowGraphId({})", self.0)
    }
}

/// Control-flow reference attached to a function body.
///
/// Transitions `Empty` → `Bound` exactly once per function, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRef {
    /// Placeholder prior to flow analysis.
    Empty,
    /// Holds the handle to the computed flow graph.
    Bound(FlowGraphId),
}

impl FlowRef {
    pub fn is_bound(self) -> bool {
        matches!(self, FlowRef::Bound(_))
    }
}
