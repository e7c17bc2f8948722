//! Phase-parameterized FIR rewriting.
//!
//! A [`Transformer`] rewrites the tree in place, slot by slot. Every node
//! kind has a `transform_*` method whose default funnels into the generic
//! [`Transformer::transform_element`] handler, which in turn recursively
//! transforms all children and leaves the node's kind unchanged —
//! transparent pass-through. A phase overrides only the kinds it cares
//! about; everything else is traversed correctly without bespoke code.
//!
//! Two contract violations are detected here and reported as faults rather
//! than diagnostics: an element reaching a pass that explicitly disallows
//! it, and an override changing a function declaration's fundamental kind.

use std::fmt;

use smallvec::SmallVec;

use crate::arena::{DeclId, FirArena, File, FlowRefId, NamedRefId, StmtId, TypeRefId};
use crate::decl::{DeclKind, ResolvePhase};
use crate::fault::{Fault, FirResult};
use crate::stmt::StmtKind;
use crate::types::TypeRefKind;

/// A node addressed generically, for dispatch and fault reporting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Element {
    Decl(DeclId),
    Stmt(StmtId),
    TypeRef(TypeRefId),
    NamedRef(NamedRefId),
    FlowRef(FlowRefId),
}

impl Element {
    pub fn kind(self) -> ElementKind {
        match self {
            Element::Decl(_) => ElementKind::Decl,
            Element::Stmt(_) => ElementKind::Stmt,
            Element::TypeRef(_) => ElementKind::TypeRef,
            Element::NamedRef(_) => ElementKind::NamedRef,
            Element::FlowRef(_) => ElementKind::FlowRef,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ElementKind {
    Decl,
    Stmt,
    TypeRef,
    NamedRef,
    FlowRef,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Decl => "declaration",
            ElementKind::Stmt => "statement",
            ElementKind::TypeRef => "type reference",
            ElementKind::NamedRef => "named reference",
            ElementKind::FlowRef => "control-flow reference",
        };
        f.write_str(name)
    }
}

/// FIR transformer, parameterized over a phase-specific auxiliary input `D`.
pub trait Transformer<D> {
    /// Phase marker stamped onto every declaration this pass walks.
    fn phase(&self) -> Option<ResolvePhase> {
        None
    }

    /// Generic handler for elements the pass has no specific interest in.
    ///
    /// The default transforms all children and leaves the node unchanged.
    /// A pass that must never see stray elements overrides this to return
    /// [`Fault::UnexpectedElement`].
    fn transform_element(&mut self, arena: &mut FirArena, element: Element, data: &D) -> FirResult {
        walk_element(self, arena, element, data)
    }

    fn transform_file(&mut self, arena: &mut FirArena, file: &File, data: &D) -> FirResult {
        walk_file(self, arena, file, data)
    }

    /// Dispatch point for declarations; stamps the phase marker.
    fn transform_decl(&mut self, arena: &mut FirArena, id: DeclId, data: &D) -> FirResult {
        walk_decl(self, arena, id, data)
    }

    fn transform_class(&mut self, arena: &mut FirArena, id: DeclId, data: &D) -> FirResult {
        self.transform_element(arena, Element::Decl(id), data)
    }

    fn transform_type_alias(&mut self, arena: &mut FirArena, id: DeclId, data: &D) -> FirResult {
        self.transform_element(arena, Element::Decl(id), data)
    }

    /// Transform a function via the generic handler, then re-assert the
    /// slot still holds a function.
    ///
    /// The re-assertion guards against an override accidentally changing a
    /// node's fundamental kind.
    fn transform_function(&mut self, arena: &mut FirArena, id: DeclId, data: &D) -> FirResult {
        self.transform_element(arena, Element::Decl(id), data)?;
        ensure_function(arena, id)
    }

    fn transform_stmt(&mut self, arena: &mut FirArena, id: StmtId, data: &D) -> FirResult {
        self.transform_element(arena, Element::Stmt(id), data)
    }

    fn transform_type_ref(&mut self, arena: &mut FirArena, id: TypeRefId, data: &D) -> FirResult {
        self.transform_element(arena, Element::TypeRef(id), data)
    }

    fn transform_named_ref(&mut self, arena: &mut FirArena, id: NamedRefId, data: &D) -> FirResult {
        self.transform_element(arena, Element::NamedRef(id), data)
    }

    fn transform_flow_ref(&mut self, arena: &mut FirArena, id: FlowRefId, data: &D) -> FirResult {
        self.transform_element(arena, Element::FlowRef(id), data)
    }
}

/// Check that a declaration slot still holds a function.
///
/// Passes that descend into a function without the default dispatch use
/// this to keep the kind re-assertion guard.
pub fn ensure_function(arena: &FirArena, id: DeclId) -> FirResult {
    let kind = &arena.decl(id).kind;
    if matches!(kind, DeclKind::Function(_)) {
        Ok(())
    } else {
        Err(Fault::FunctionKindChanged { found: kind.name() })
    }
}

/// Dispatch one element to its kind-specific transform method.
pub fn transform_child<D, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    arena: &mut FirArena,
    element: Element,
    data: &D,
) -> FirResult {
    match element {
        Element::Decl(id) => transformer.transform_decl(arena, id, data),
        Element::Stmt(id) => transformer.transform_stmt(arena, id, data),
        Element::TypeRef(id) => transformer.transform_type_ref(arena, id, data),
        Element::NamedRef(id) => transformer.transform_named_ref(arena, id, data),
        Element::FlowRef(id) => transformer.transform_flow_ref(arena, id, data),
    }
}

pub fn walk_file<D, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    arena: &mut FirArena,
    file: &File,
    data: &D,
) -> FirResult {
    for &decl in &file.decls {
        transformer.transform_decl(arena, decl, data)?;
    }
    Ok(())
}

/// Stamp the pass's phase marker, then dispatch by declaration kind.
pub fn walk_decl<D, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    arena: &mut FirArena,
    id: DeclId,
    data: &D,
) -> FirResult {
    if let Some(phase) = transformer.phase() {
        arena.decl_mut(id).advance_phase(phase);
    }
    match &arena.decl(id).kind {
        DeclKind::Class(_) => transformer.transform_class(arena, id, data),
        DeclKind::TypeAlias(_) => transformer.transform_type_alias(arena, id, data),
        DeclKind::Function(_) => transformer.transform_function(arena, id, data),
    }
}

/// Transform an element's children in place; the element itself is kept.
pub fn walk_element<D, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    arena: &mut FirArena,
    element: Element,
    data: &D,
) -> FirResult {
    for child in child_elements(arena, element) {
        transform_child(transformer, arena, child, data)?;
    }
    Ok(())
}

/// Direct children of an element, in traversal order.
///
/// Mirrors the read-only walk order in [`crate::visitor`]: class members
/// before supertype references, function signature before body before flow
/// reference. Leaves (named references, control-flow references, implicit
/// and plainly resolved type references) have no children.
pub fn child_elements(arena: &FirArena, element: Element) -> SmallVec<[Element; 8]> {
    let mut children = SmallVec::new();
    match element {
        Element::Decl(id) => match &arena.decl(id).kind {
            DeclKind::Class(class) => {
                children.extend(class.members.iter().map(|&m| Element::Decl(m)));
                children.extend(class.super_type_refs.iter().map(|&r| Element::TypeRef(r)));
            }
            DeclKind::TypeAlias(alias) => children.push(Element::TypeRef(alias.expanded)),
            DeclKind::Function(function) => {
                children.extend(function.params.iter().map(|p| Element::TypeRef(p.type_ref)));
                children.push(Element::TypeRef(function.return_type));
                children.extend(function.body.iter().map(|&s| Element::Stmt(s)));
                children.push(Element::FlowRef(function.flow_ref));
            }
        },
        Element::Stmt(id) => match &arena.stmt(id).kind {
            StmtKind::Local(decl) => children.push(Element::Decl(*decl)),
            StmtKind::Binding { type_ref, init } => {
                children.push(Element::TypeRef(*type_ref));
                children.push(Element::NamedRef(*init));
            }
            StmtKind::Ref(named_ref) => children.push(Element::NamedRef(*named_ref)),
        },
        Element::TypeRef(id) => match &arena.type_ref(id).kind {
            TypeRefKind::Unresolved { args, .. } => {
                children.extend(args.iter().map(|&a| Element::TypeRef(a)));
            }
            TypeRefKind::Function(shape) | TypeRefKind::ResolvedFunction { shape, .. } => {
                if let Some(receiver) = shape.receiver {
                    children.push(Element::TypeRef(receiver));
                }
                children.extend(shape.params.iter().map(|&p| Element::TypeRef(p)));
                children.push(Element::TypeRef(shape.ret));
            }
            TypeRefKind::Implicit | TypeRefKind::Resolved { .. } => {}
        },
        Element::NamedRef(_) | Element::FlowRef(_) => {}
    }
    children
}
