//! Read-only FIR traversal.
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add custom behavior at specific nodes; the
//! visitor can mutate its own state, the tree stays immutable.
//!
//! The mutating counterpart is [`crate::transform::Transformer`].

use crate::arena::{DeclId, FirArena, File, FlowRefId, NamedRefId, StmtId, TypeRefId};
use crate::decl::DeclKind;
use crate::stmt::StmtKind;
use crate::types::TypeRefKind;

/// FIR visitor.
///
/// Children are visited depth-first in declaration order.
pub trait Visitor {
    fn visit_file(&mut self, arena: &FirArena, file: &File) {
        walk_file(self, arena, file);
    }

    fn visit_decl(&mut self, arena: &FirArena, id: DeclId) {
        walk_decl(self, arena, id);
    }

    fn visit_class(&mut self, arena: &FirArena, id: DeclId) {
        walk_class(self, arena, id);
    }

    fn visit_type_alias(&mut self, arena: &FirArena, id: DeclId) {
        walk_type_alias(self, arena, id);
    }

    fn visit_function(&mut self, arena: &FirArena, id: DeclId) {
        walk_function(self, arena, id);
    }

    fn visit_stmt(&mut self, arena: &FirArena, id: StmtId) {
        walk_stmt(self, arena, id);
    }

    fn visit_type_ref(&mut self, arena: &FirArena, id: TypeRefId) {
        walk_type_ref(self, arena, id);
    }

    /// Named references are leaves.
    fn visit_named_ref(&mut self, arena: &FirArena, id: NamedRefId) {
        let _ = (arena, id);
    }

    /// Control-flow references are leaves.
    fn visit_flow_ref(&mut self, arena: &FirArena, id: FlowRefId) {
        let _ = (arena, id);
    }
}

pub fn walk_file<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, file: &File) {
    for &decl in &file.decls {
        visitor.visit_decl(arena, decl);
    }
}

/// Dispatch a declaration to its kind-specific visit method.
pub fn walk_decl<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: DeclId) {
    match &arena.decl(id).kind {
        DeclKind::Class(_) => visitor.visit_class(arena, id),
        DeclKind::TypeAlias(_) => visitor.visit_type_alias(arena, id),
        DeclKind::Function(_) => visitor.visit_function(arena, id),
    }
}

/// Walk a class's children: member declarations, then supertype references.
pub fn walk_class<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: DeclId) {
    let DeclKind::Class(class) = &arena.decl(id).kind else {
        return;
    };
    for &member in &class.members {
        visitor.visit_decl(arena, member);
    }
    for &super_ref in &class.super_type_refs {
        visitor.visit_type_ref(arena, super_ref);
    }
}

pub fn walk_type_alias<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: DeclId) {
    let DeclKind::TypeAlias(alias) = &arena.decl(id).kind else {
        return;
    };
    visitor.visit_type_ref(arena, alias.expanded);
}

/// Walk a function's children: parameter types, return type, body, flow ref.
pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: DeclId) {
    let DeclKind::Function(function) = &arena.decl(id).kind else {
        return;
    };
    for param in &function.params {
        visitor.visit_type_ref(arena, param.type_ref);
    }
    visitor.visit_type_ref(arena, function.return_type);
    for &stmt in &function.body {
        visitor.visit_stmt(arena, stmt);
    }
    visitor.visit_flow_ref(arena, function.flow_ref);
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: StmtId) {
    match &arena.stmt(id).kind {
        StmtKind::Local(decl) => visitor.visit_decl(arena, *decl),
        StmtKind::Binding { type_ref, init } => {
            visitor.visit_type_ref(arena, *type_ref);
            visitor.visit_named_ref(arena, *init);
        }
        StmtKind::Ref(named_ref) => visitor.visit_named_ref(arena, *named_ref),
    }
}

pub fn walk_type_ref<V: Visitor + ?Sized>(visitor: &mut V, arena: &FirArena, id: TypeRefId) {
    match &arena.type_ref(id).kind {
        TypeRefKind::Unresolved { args, .. } => {
            for &arg in args {
                visitor.visit_type_ref(arena, arg);
            }
        }
        TypeRefKind::Function(shape) | TypeRefKind::ResolvedFunction { shape, .. } => {
            if let Some(receiver) = shape.receiver {
                visitor.visit_type_ref(arena, receiver);
            }
            for &param in &shape.params {
                visitor.visit_type_ref(arena, param);
            }
            visitor.visit_type_ref(arena, shape.ret);
        }
        TypeRefKind::Implicit | TypeRefKind::Resolved { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::SmallVec;

    use super::*;
    use crate::decl::{ClassDecl, Decl, DeclKind, LookupTag, Modality};
    use crate::interner::{Name, NamePath, StringInterner};
    use crate::span::Span;
    use crate::types::{TypeRef, TypeRefKind};

    struct CollectClassNames {
        names: Vec<Name>,
    }

    impl Visitor for CollectClassNames {
        fn visit_class(&mut self, arena: &FirArena, id: DeclId) {
            self.names.push(arena.decl(id).name);
            walk_class(self, arena, id);
        }
    }

    #[test]
    fn walk_reaches_nested_classes() {
        let mut interner = StringInterner::new();
        let mut arena = FirArena::new();

        let inner = arena.alloc_decl(Decl::new(
            interner.intern("Inner"),
            Span::DUMMY,
            DeclKind::Class(ClassDecl::new(LookupTag::from_raw(1), Modality::Final)),
        ));
        let mut outer_class = ClassDecl::new(LookupTag::from_raw(0), Modality::Open);
        outer_class.members.push(inner);
        let outer = arena.alloc_decl(Decl::new(
            interner.intern("Outer"),
            Span::DUMMY,
            DeclKind::Class(outer_class),
        ));

        let mut file = File::new(interner.intern("unit.q"), Span::DUMMY);
        file.decls.push(outer);

        let mut collector = CollectClassNames { names: Vec::new() };
        collector.visit_file(&arena, &file);
        assert_eq!(
            collector.names,
            vec![interner.intern("Outer"), interner.intern("Inner")]
        );
    }

    struct CountTypeRefs {
        count: usize,
    }

    impl Visitor for CountTypeRefs {
        fn visit_type_ref(&mut self, arena: &FirArena, id: TypeRefId) {
            self.count += 1;
            walk_type_ref(self, arena, id);
        }
    }

    #[test]
    fn walk_recurses_into_type_arguments() {
        let mut interner = StringInterner::new();
        let mut arena = FirArena::new();

        // List[Map[Int, Str]]
        let int_ref = arena.alloc_type_ref(TypeRef::new(
            Span::DUMMY,
            TypeRefKind::Unresolved {
                path: NamePath::single(interner.intern("Int")),
                args: SmallVec::new(),
                nullable: false,
            },
        ));
        let str_ref = arena.alloc_type_ref(TypeRef::new(
            Span::DUMMY,
            TypeRefKind::Unresolved {
                path: NamePath::single(interner.intern("Str")),
                args: SmallVec::new(),
                nullable: false,
            },
        ));
        let map_ref = arena.alloc_type_ref(TypeRef::new(
            Span::DUMMY,
            TypeRefKind::Unresolved {
                path: NamePath::single(interner.intern("Map")),
                args: SmallVec::from_slice(&[int_ref, str_ref]),
                nullable: false,
            },
        ));
        let list_ref = arena.alloc_type_ref(TypeRef::new(
            Span::DUMMY,
            TypeRefKind::Unresolved {
                path: NamePath::single(interner.intern("List")),
                args: SmallVec::from_slice(&[map_ref]),
                nullable: false,
            },
        ));

        let mut counter = CountTypeRefs { count: 0 };
        counter.visit_type_ref(&arena, list_ref);
        assert_eq!(counter.count, 4);
    }
}
