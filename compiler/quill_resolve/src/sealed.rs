//! Sealed-hierarchy inheritor resolution.
//!
//! Two strictly sequential passes over one unit:
//!
//! 1. *Collection* — a read-only visitor walks every declaration and
//!    returns a map from sealed parent declaration to the tags of its
//!    direct subclasses, in encounter order. Supertype references are
//!    followed through the [`SymbolProvider`], expanding type aliases
//!    transparently (with a cycle guard; a cyclic alias chain is a dead
//!    end, not a crash).
//! 2. *Rewrite* — a transformer takes the map by value, removes each key
//!    it reaches, and finalizes that class's inheritor list exactly once.
//!    Once the map drains, the walk short-circuits.
//!
//! The rewrite must consume every key; a residual entry means the two
//! passes saw different trees and is reported as a fault.
//!
//! Both passes traverse the same shape: file declarations, class members,
//! and local declarations inside function bodies.

use rustc_hash::{FxHashMap, FxHashSet};

use quill_fir::transform::Transformer;
use quill_fir::visitor::{self, Visitor};
use quill_fir::{
    DeclId, DeclKind, Fault, FirArena, FirResult, File, LookupTag, StmtId, StmtKind, TypeRefId,
};

use crate::symbols::{ClassLike, SymbolProvider};

/// Pending sealed parent → direct subclass tags, in encounter order.
pub type InheritorMap = FxHashMap<DeclId, Vec<LookupTag>>;

/// Collection pass. Pure: reads the tree, returns the map.
pub fn collect_inheritors<P: SymbolProvider>(
    arena: &FirArena,
    file: &File,
    provider: &P,
) -> InheritorMap {
    let mut collector = InheritorsCollector {
        provider,
        inheritors: InheritorMap::default(),
    };
    collector.visit_file(arena, file);
    collector.inheritors
}

/// Rewrite pass. Consumes the map; every key must be used.
pub fn apply_inheritors(arena: &mut FirArena, file: &File, map: InheritorMap) -> FirResult {
    let mut rewriter = InheritorsRewriter { inheritors: map };
    rewriter.transform_file(arena, file, &())?;
    if rewriter.inheritors.is_empty() {
        Ok(())
    } else {
        Err(Fault::InheritorsNotDrained {
            remaining: rewriter.inheritors.len(),
        })
    }
}

struct InheritorsCollector<'p, P: SymbolProvider> {
    provider: &'p P,
    inheritors: InheritorMap,
}

impl<P: SymbolProvider> Visitor for InheritorsCollector<'_, P> {
    fn visit_class(&mut self, arena: &FirArena, id: DeclId) {
        visitor::walk_class(self, arena, id);

        let DeclKind::Class(class) = &arena.decl(id).kind else {
            return;
        };
        let subclass_tag = class.tag;
        for &super_ref in &class.super_type_refs {
            let Some(parent) = extract_class(self.provider, arena, super_ref) else {
                continue;
            };
            let DeclKind::Class(parent_class) = &arena.decl(parent).kind else {
                continue;
            };
            if !parent_class.is_sealed() {
                continue;
            }
            tracing::trace!(parent = ?parent_class.tag, subclass = ?subclass_tag, "sealed edge");
            self.inheritors.entry(parent).or_default().push(subclass_tag);
        }
    }
}

/// Follow a resolved supertype reference to a class declaration, expanding
/// type aliases transparently.
fn extract_class<P: SymbolProvider>(
    provider: &P,
    arena: &FirArena,
    type_ref: TypeRefId,
) -> Option<DeclId> {
    let mut visited = FxHashSet::default();
    extract_class_guarded(provider, arena, type_ref, &mut visited)
}

fn extract_class_guarded<P: SymbolProvider>(
    provider: &P,
    arena: &FirArena,
    type_ref: TypeRefId,
    visited: &mut FxHashSet<LookupTag>,
) -> Option<DeclId> {
    let tag = arena.type_ref(type_ref).resolved_type()?.lookup_tag()?;
    if !visited.insert(tag) {
        tracing::debug!(?tag, "type alias cycle while following a supertype");
        return None;
    }
    match provider.resolve_lookup_tag(tag)? {
        ClassLike::Class(decl) => Some(decl),
        ClassLike::Alias(decl) => {
            let DeclKind::TypeAlias(alias) = &arena.decl(decl).kind else {
                return None;
            };
            extract_class_guarded(provider, arena, alias.expanded, visited)
        }
    }
}

struct InheritorsRewriter {
    inheritors: InheritorMap,
}

impl Transformer<()> for InheritorsRewriter {
    fn transform_class(&mut self, arena: &mut FirArena, id: DeclId, data: &()) -> FirResult {
        if let Some(tags) = self.inheritors.remove(&id) {
            let decl = arena.decl_mut(id);
            if let DeclKind::Class(class) = &mut decl.kind {
                if class.inheritors.is_some() {
                    return Err(Fault::InheritorsFinalizedTwice { tag: class.tag });
                }
                tracing::trace!(tag = ?class.tag, count = tags.len(), "finalizing inheritors");
                class.inheritors = Some(tags);
            }
        }
        // Fully drained: nothing below can match, stop descending.
        if self.inheritors.is_empty() {
            return Ok(());
        }
        let members = match &arena.decl(id).kind {
            DeclKind::Class(class) => class.members.clone(),
            _ => Vec::new(),
        };
        for member in members {
            self.transform_decl(arena, member, data)?;
        }
        Ok(())
    }

    fn transform_function(&mut self, arena: &mut FirArena, id: DeclId, data: &()) -> FirResult {
        if self.inheritors.is_empty() {
            return Ok(());
        }
        // Only local declarations in the body are interesting here.
        let body = match &arena.decl(id).kind {
            DeclKind::Function(function) => function.body.clone(),
            _ => Vec::new(),
        };
        for stmt in body {
            self.transform_stmt(arena, stmt, data)?;
        }
        Ok(())
    }

    fn transform_stmt(&mut self, arena: &mut FirArena, id: StmtId, data: &()) -> FirResult {
        let local = match &arena.stmt(id).kind {
            StmtKind::Local(decl) => Some(*decl),
            StmtKind::Binding { .. } | StmtKind::Ref(_) => None,
        };
        match local {
            Some(decl) => self.transform_decl(arena, decl, data),
            None => Ok(()),
        }
    }

    /// Nothing else in the tree participates in hierarchy rewriting.
    fn transform_element(
        &mut self,
        _arena: &mut FirArena,
        _element: quill_fir::transform::Element,
        _data: &(),
    ) -> FirResult {
        Ok(())
    }
}
