//! Control-flow graph reference attachment.
//!
//! The flow graph itself is computed by an external builder; this pass
//! only binds the finished handle at the function body's empty placeholder.
//! It never inspects the graph, and an already-bound reference is left
//! untouched, so re-running the pass is a no-op.

use quill_fir::transform::{ensure_function, walk_element, Element, Transformer};
use quill_fir::{DeclId, FirArena, FirResult, FlowGraphId, FlowRef, FlowRefId, ResolvePhase};

/// Binds a computed flow graph at the empty flow reference.
///
/// Everything except the function's direct children passes through
/// untouched: exactly one node changes identity per invocation.
pub struct FlowGraphAttacher;

impl Transformer<FlowGraphId> for FlowGraphAttacher {
    fn phase(&self) -> Option<ResolvePhase> {
        Some(ResolvePhase::Body)
    }

    /// Attachment touches nothing but flow references.
    fn transform_element(
        &mut self,
        _arena: &mut FirArena,
        _element: Element,
        _data: &FlowGraphId,
    ) -> FirResult {
        Ok(())
    }

    fn transform_function(
        &mut self,
        arena: &mut FirArena,
        id: DeclId,
        data: &FlowGraphId,
    ) -> FirResult {
        walk_element(self, arena, Element::Decl(id), data)?;
        ensure_function(arena, id)
    }

    fn transform_flow_ref(
        &mut self,
        arena: &mut FirArena,
        id: FlowRefId,
        data: &FlowGraphId,
    ) -> FirResult {
        let slot = arena.flow_ref_mut(id);
        if matches!(slot, FlowRef::Empty) {
            *slot = FlowRef::Bound(*data);
        }
        Ok(())
    }
}
