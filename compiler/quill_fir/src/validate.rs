//! Debug-mode validation of FIR tree invariants.
//!
//! Walks the arena and asserts that structural invariants hold:
//! - All child ids are within their pool's bounds
//! - Supertype lists of classes never reference flow or named pools
//! - Finalized inheritor lists exist only on sealed classes
//! - Resolved type references never carry an unresolved shape again
//!
//! The checks use `debug_assert!`, so they compile away in release builds.
//! They catch pass bugs early, before later phases consume a broken tree.

use crate::arena::{FirArena, File};
use crate::decl::DeclKind;
use crate::types::TypeRefKind;

/// Validate a unit's tree after a pass.
pub fn validate(arena: &FirArena, file: &File) {
    for &decl in &file.decls {
        debug_assert!(
            decl.index() < arena.decl_count(),
            "file references {decl:?} but arena has {} decls",
            arena.decl_count(),
        );
    }

    for (id, decl) in arena.decls() {
        match &decl.kind {
            DeclKind::Class(class) => {
                for &member in &class.members {
                    debug_assert!(
                        member.index() < arena.decl_count(),
                        "{id:?} member {member:?} out of bounds",
                    );
                    debug_assert!(
                        member != id,
                        "{id:?} lists itself as a member",
                    );
                }
                for &super_ref in &class.super_type_refs {
                    debug_assert!(
                        super_ref.index() < arena.type_ref_count(),
                        "{id:?} supertype {super_ref:?} out of bounds",
                    );
                }
                debug_assert!(
                    class.inheritors.is_none() || class.is_sealed(),
                    "{id:?} has a finalized inheritor list but is not sealed",
                );
            }
            DeclKind::TypeAlias(alias) => {
                debug_assert!(
                    alias.expanded.index() < arena.type_ref_count(),
                    "{id:?} expansion {:?} out of bounds",
                    alias.expanded,
                );
            }
            DeclKind::Function(function) => {
                for param in &function.params {
                    debug_assert!(
                        param.type_ref.index() < arena.type_ref_count(),
                        "{id:?} param type {:?} out of bounds",
                        param.type_ref,
                    );
                }
                debug_assert!(
                    function.return_type.index() < arena.type_ref_count(),
                    "{id:?} return type {:?} out of bounds",
                    function.return_type,
                );
                for &stmt in &function.body {
                    debug_assert!(
                        stmt.index() < arena.stmt_count(),
                        "{id:?} body statement {stmt:?} out of bounds",
                    );
                }
                debug_assert!(
                    function.flow_ref.index() < arena.flow_ref_count(),
                    "{id:?} flow ref {:?} out of bounds",
                    function.flow_ref,
                );
            }
        }
    }

    validate_type_refs(arena);
}

fn validate_type_refs(arena: &FirArena) {
    for i in 0..arena.type_ref_count() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena indices always fit u32"
        )]
        let id = crate::arena::TypeRefId::from_raw(i as u32);
        match &arena.type_ref(id).kind {
            TypeRefKind::Unresolved { args, .. } => {
                for &arg in args {
                    debug_assert!(
                        arg.index() < arena.type_ref_count(),
                        "{id:?} argument {arg:?} out of bounds",
                    );
                }
            }
            TypeRefKind::Function(shape) | TypeRefKind::ResolvedFunction { shape, .. } => {
                for &component in shape
                    .receiver
                    .iter()
                    .chain(shape.params.iter())
                    .chain(std::iter::once(&shape.ret))
                {
                    debug_assert!(
                        component.index() < arena.type_ref_count(),
                        "{id:?} component {component:?} out of bounds",
                    );
                }
            }
            TypeRefKind::Implicit | TypeRefKind::Resolved { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{ClassDecl, Decl, LookupTag, Modality};
    use crate::interner::StringInterner;
    use crate::span::Span;

    #[test]
    fn accepts_a_well_formed_tree() {
        let mut interner = StringInterner::new();
        let mut arena = FirArena::new();
        let decl = arena.alloc_decl(Decl::new(
            interner.intern("Shape"),
            Span::DUMMY,
            DeclKind::Class(ClassDecl::new(LookupTag::from_raw(0), Modality::Sealed)),
        ));
        let mut file = File::new(interner.intern("unit.q"), Span::DUMMY);
        file.decls.push(decl);

        validate(&arena, &file);
    }

    #[test]
    #[should_panic(expected = "finalized inheritor list")]
    #[cfg(debug_assertions)]
    fn rejects_inheritors_on_open_class() {
        let mut interner = StringInterner::new();
        let mut arena = FirArena::new();
        let mut class = ClassDecl::new(LookupTag::from_raw(0), Modality::Open);
        class.inheritors = Some(vec![LookupTag::from_raw(1)]);
        let decl = arena.alloc_decl(Decl::new(
            interner.intern("Shape"),
            Span::DUMMY,
            DeclKind::Class(class),
        ));
        let mut file = File::new(interner.intern("unit.q"), Span::DUMMY);
        file.decls.push(decl);

        validate(&arena, &file);
    }
}
