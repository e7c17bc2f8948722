//! Per-phase driver entry points.
//!
//! The driver supplies phases in this fixed order, each with its own
//! auxiliary input:
//!
//! 1. [`resolve_super_types`] — supertype lists, against a scope tower
//! 2. [`resolve_sealed_hierarchies`] — sealed inheritor collection
//! 3. [`resolve_types`] — every remaining type reference
//! 4. [`attach_flow_graph`] — per function, with its computed flow graph
//!
//! Execution is single-threaded and synchronous: each phase owns the
//! arena for the duration of its call and runs to completion before the
//! next begins. Resolution failures ride through as error-marker types;
//! only internal-consistency faults abort the unit.

use quill_fir::transform::Transformer;
use quill_fir::validate::validate;
use quill_fir::{DeclId, FirArena, FirResult, File, FlowGraphId, ResolvePhase};

use crate::control_flow::FlowGraphAttacher;
use crate::scopes::{Position, ScopeTower};
use crate::sealed::{apply_inheritors, collect_inheritors};
use crate::symbols::SymbolProvider;
use crate::type_resolution::{SuperTypeResolvePass, TypeResolvePass};

/// Resolve every supertype list in the unit.
pub fn resolve_super_types<T: ScopeTower>(
    arena: &mut FirArena,
    file: &File,
    tower: &T,
) -> FirResult {
    SuperTypeResolvePass::new(tower).transform_file(arena, file, &())?;
    validate(arena, file);
    tracing::debug!("supertype resolution complete");
    Ok(())
}

/// Collect and finalize sealed-class inheritor lists.
///
/// Requires resolved supertype lists; takes no auxiliary input beyond the
/// tree itself.
pub fn resolve_sealed_hierarchies<P: SymbolProvider>(
    arena: &mut FirArena,
    file: &File,
    provider: &P,
) -> FirResult {
    let map = collect_inheritors(arena, file, provider);
    if map.is_empty() {
        tracing::debug!("no sealed hierarchies in unit");
        return Ok(());
    }
    apply_inheritors(arena, file, map)?;
    validate(arena, file);
    tracing::debug!("sealed hierarchy resolution complete");
    Ok(())
}

/// Resolve all remaining type references in the unit.
pub fn resolve_types<T: ScopeTower>(arena: &mut FirArena, file: &File, tower: &T) -> FirResult {
    TypeResolvePass::new(tower, Position::Other, ResolvePhase::Types)
        .transform_file(arena, file, &())?;
    validate(arena, file);
    tracing::debug!("type resolution complete");
    Ok(())
}

/// Attach an externally computed flow graph to one function.
pub fn attach_flow_graph(
    arena: &mut FirArena,
    file: &File,
    function: DeclId,
    graph: FlowGraphId,
) -> FirResult {
    FlowGraphAttacher.transform_decl(arena, function, &graph)?;
    validate(arena, file);
    tracing::debug!(?function, "control-flow graph attached");
    Ok(())
}
