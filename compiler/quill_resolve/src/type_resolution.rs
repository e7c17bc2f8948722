//! Type reference resolution against a scope tower.
//!
//! [`TypeResolvePass`] rewrites unresolved type references in place to
//! their resolved form. Nested type arguments resolve first, through a
//! fresh pass pinned to [`Position::Other`] — a nested argument sits in a
//! neutral position no matter where the outer reference appears — then the
//! outer path resolves at the pass's own position. Function-type shapes
//! resolve component by component through the same pass.
//!
//! Already-resolved and implicit references are left untouched: the pass
//! is idempotent and never re-resolves.

use quill_fir::transform::{Element, Transformer};
use quill_fir::{DeclId, DeclKind, FirArena, FirResult, ResolvePhase, TypeRefId, TypeRefKind};

use crate::scopes::{Position, ScopeTower};

/// Resolves every type reference it encounters.
pub struct TypeResolvePass<'t, T: ScopeTower> {
    tower: &'t T,
    position: Position,
    phase: ResolvePhase,
}

impl<'t, T: ScopeTower> TypeResolvePass<'t, T> {
    pub fn new(tower: &'t T, position: Position, phase: ResolvePhase) -> Self {
        TypeResolvePass {
            tower,
            position,
            phase,
        }
    }
}

impl<T: ScopeTower> Transformer<()> for TypeResolvePass<'_, T> {
    fn phase(&self) -> Option<ResolvePhase> {
        Some(self.phase)
    }

    fn transform_type_ref(&mut self, arena: &mut FirArena, id: TypeRefId, data: &()) -> FirResult {
        if arena.type_ref(id).is_resolved() {
            return Ok(());
        }
        let kind = arena.type_ref(id).kind.clone();
        match kind {
            TypeRefKind::Unresolved {
                path,
                args,
                nullable,
            } => {
                // Nested arguments resolve in a neutral position first.
                let mut nested = TypeResolvePass::new(self.tower, Position::Other, self.phase);
                for arg in &args {
                    nested.transform_type_ref(arena, *arg, data)?;
                }
                let mut ty = self.tower.lookup(&path, self.position);
                if nullable {
                    ty = ty.nullable();
                }
                arena.type_ref_mut(id).kind = TypeRefKind::Resolved { ty };
                Ok(())
            }
            TypeRefKind::Function(shape) => {
                if let Some(receiver) = shape.receiver {
                    self.transform_type_ref(arena, receiver, data)?;
                }
                for &param in &shape.params {
                    self.transform_type_ref(arena, param, data)?;
                }
                self.transform_type_ref(arena, shape.ret, data)?;
                let ty =
                    self.tower
                        .resolve_function_shape(shape.arity(), shape.nullable, self.position);
                arena.type_ref_mut(id).kind = TypeRefKind::ResolvedFunction { ty, shape };
                Ok(())
            }
            TypeRefKind::Implicit
            | TypeRefKind::Resolved { .. }
            | TypeRefKind::ResolvedFunction { .. } => Ok(()),
        }
    }
}

/// Resolves only supertype lists, at [`Position::SuperTypeList`].
///
/// Runs before whole-tree type resolution so the sealed-hierarchy phase
/// can follow resolved supertype references.
pub struct SuperTypeResolvePass<'t, T: ScopeTower> {
    tower: &'t T,
}

impl<'t, T: ScopeTower> SuperTypeResolvePass<'t, T> {
    pub fn new(tower: &'t T) -> Self {
        SuperTypeResolvePass { tower }
    }
}

impl<T: ScopeTower> Transformer<()> for SuperTypeResolvePass<'_, T> {
    fn phase(&self) -> Option<ResolvePhase> {
        Some(ResolvePhase::SuperTypes)
    }

    fn transform_class(&mut self, arena: &mut FirArena, id: DeclId, data: &()) -> FirResult {
        let DeclKind::Class(class) = &arena.decl(id).kind else {
            return self.transform_element(arena, Element::Decl(id), data);
        };
        let supers = class.super_type_refs.clone();
        let mut resolver =
            TypeResolvePass::new(self.tower, Position::SuperTypeList, ResolvePhase::SuperTypes);
        for super_ref in supers {
            resolver.transform_type_ref(arena, super_ref, data)?;
        }
        // Members may contain nested classes with supertype lists of their
        // own; the pass-through default reaches them.
        self.transform_element(arena, Element::Decl(id), data)
    }
}

#[cfg(test)]
mod tests;
