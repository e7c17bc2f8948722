use pretty_assertions::assert_eq;
use smallvec::SmallVec;

use quill_fir::transform::Transformer;
use quill_fir::{
    Annotation, Decl, DeclKind, FirArena, File, FunctionDecl, FunctionTypeShape, LookupTag,
    Modality, NamePath, Param, ResolvePhase, ResolvedType, Span, StringInterner, TypeRef,
    TypeRefKind,
};

use super::{SuperTypeResolvePass, TypeResolvePass};
use crate::scopes::Position;
use crate::testutil::{
    class_decl, unresolved_ref, unresolved_ref_with_args, RecordingTower, TestTower,
};

fn int_tower(interner: &mut StringInterner) -> TestTower {
    let mut tower = TestTower::new();
    tower.define(
        interner.intern("Int"),
        ResolvedType::class(LookupTag::from_raw(100)),
    );
    tower.define(
        interner.intern("Str"),
        ResolvedType::class(LookupTag::from_raw(101)),
    );
    tower.define(
        interner.intern("List"),
        ResolvedType::class(LookupTag::from_raw(102)),
    );
    tower
}

#[test]
fn resolves_path_and_preserves_annotations() {
    let mut interner = StringInterner::new();
    let tower = int_tower(&mut interner);
    let mut arena = FirArena::new();

    let id = unresolved_ref(&mut arena, interner.intern("Int"));
    let annotation = Annotation {
        path: NamePath::single(interner.intern("deprecated")),
        span: Span::new(0, 11),
    };
    arena.type_ref_mut(id).annotations.push(annotation.clone());
    arena.type_ref_mut(id).span = Span::new(12, 15);

    let mut pass = TypeResolvePass::new(&tower, Position::Other, ResolvePhase::Types);
    match pass.transform_type_ref(&mut arena, id, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected resolution to succeed, got {fault:?}"),
    }

    let type_ref = arena.type_ref(id);
    assert_eq!(
        type_ref.kind,
        TypeRefKind::Resolved {
            ty: ResolvedType::class(LookupTag::from_raw(100)),
        }
    );
    assert_eq!(type_ref.annotations, vec![annotation]);
    assert_eq!(type_ref.span, Span::new(12, 15));
}

#[test]
fn nullable_reference_marks_the_resolved_type() {
    let mut interner = StringInterner::new();
    let tower = int_tower(&mut interner);
    let mut arena = FirArena::new();

    let id = arena.alloc_type_ref(TypeRef::new(
        Span::DUMMY,
        TypeRefKind::Unresolved {
            path: NamePath::single(interner.intern("Int")),
            args: SmallVec::new(),
            nullable: true,
        },
    ));

    let mut pass = TypeResolvePass::new(&tower, Position::Other, ResolvePhase::Types);
    match pass.transform_type_ref(&mut arena, id, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected resolution to succeed, got {fault:?}"),
    }

    match &arena.type_ref(id).kind {
        TypeRefKind::Resolved {
            ty: ResolvedType::Class { nullable, .. },
        } => assert!(*nullable),
        other => panic!("expected nullable resolved class, got {other:?}"),
    }
}

#[test]
fn nested_arguments_resolve_in_neutral_position() {
    let mut interner = StringInterner::new();
    let tower = RecordingTower::new(int_tower(&mut interner));
    let mut arena = FirArena::new();

    // List[Int] appearing in a supertype list.
    let int_name = interner.intern("Int");
    let list_name = interner.intern("List");
    let int_ref = unresolved_ref(&mut arena, int_name);
    let list_ref = unresolved_ref_with_args(&mut arena, list_name, &[int_ref]);

    let mut pass = TypeResolvePass::new(&tower, Position::SuperTypeList, ResolvePhase::SuperTypes);
    match pass.transform_type_ref(&mut arena, list_ref, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected resolution to succeed, got {fault:?}"),
    }

    // The nested argument resolves first, in the neutral position; only the
    // outer path sees the supertype-list position.
    assert_eq!(
        *tower.lookups.borrow(),
        vec![
            (int_name, Position::Other),
            (list_name, Position::SuperTypeList),
        ]
    );
    assert!(arena.type_ref(int_ref).is_resolved());
    assert!(arena.type_ref(list_ref).is_resolved());
}

#[test]
fn resolved_reference_is_idempotent() {
    let mut interner = StringInterner::new();
    let tower = RecordingTower::new(int_tower(&mut interner));
    let mut arena = FirArena::new();

    let id = unresolved_ref(&mut arena, interner.intern("Int"));
    let mut pass = TypeResolvePass::new(&tower, Position::Other, ResolvePhase::Types);
    match pass.transform_type_ref(&mut arena, id, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected resolution to succeed, got {fault:?}"),
    }
    let before = arena.clone();
    assert_eq!(tower.lookups.borrow().len(), 1);

    // Second run: same reference back, no new tower traffic.
    match pass.transform_type_ref(&mut arena, id, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected idempotent re-run, got {fault:?}"),
    }
    assert_eq!(arena, before);
    assert_eq!(tower.lookups.borrow().len(), 1);
}

#[test]
fn implicit_reference_is_left_alone() {
    let mut interner = StringInterner::new();
    let tower = int_tower(&mut interner);
    let mut arena = FirArena::new();

    let id = arena.alloc_type_ref(TypeRef::new(Span::DUMMY, TypeRefKind::Implicit));
    let mut pass = TypeResolvePass::new(&tower, Position::Other, ResolvePhase::Types);
    match pass.transform_type_ref(&mut arena, id, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected implicit to pass through, got {fault:?}"),
    }
    assert_eq!(arena.type_ref(id).kind, TypeRefKind::Implicit);
}

fn function_shape_ref(
    interner: &mut StringInterner,
    arena: &mut FirArena,
) -> quill_fir::TypeRefId {
    // (Int) -> Str
    let param = unresolved_ref(arena, interner.intern("Int"));
    let ret = unresolved_ref(arena, interner.intern("Str"));
    arena.alloc_type_ref(TypeRef::new(
        Span::DUMMY,
        TypeRefKind::Function(FunctionTypeShape {
            receiver: None,
            params: SmallVec::from_slice(&[param]),
            ret,
            nullable: false,
        }),
    ))
}

#[test]
fn function_shape_resolves_components_in_any_position() {
    for position in [Position::Other, Position::SuperTypeList] {
        let mut interner = StringInterner::new();
        let tower = int_tower(&mut interner);
        let mut arena = FirArena::new();
        let id = function_shape_ref(&mut interner, &mut arena);

        let mut pass = TypeResolvePass::new(&tower, position, ResolvePhase::Types);
        match pass.transform_type_ref(&mut arena, id, &()) {
            Ok(()) => {}
            Err(fault) => panic!("expected resolution to succeed, got {fault:?}"),
        }

        let TypeRefKind::ResolvedFunction { ty, shape } = &arena.type_ref(id).kind else {
            panic!("expected resolved function, got {:?}", arena.type_ref(id).kind);
        };
        assert_eq!(
            *ty,
            ResolvedType::Function {
                arity: 1,
                nullable: false,
            },
            "position {position:?}",
        );
        assert_eq!(
            arena.type_ref(shape.params[0]).resolved_type(),
            Some(&ResolvedType::class(LookupTag::from_raw(100))),
        );
        assert_eq!(
            arena.type_ref(shape.ret).resolved_type(),
            Some(&ResolvedType::class(LookupTag::from_raw(101))),
        );
    }
}

#[test]
fn unknown_name_becomes_error_marker_and_pass_completes() {
    let mut interner = StringInterner::new();
    let tower = int_tower(&mut interner);
    let mut arena = FirArena::new();

    let foo_ref = unresolved_ref(&mut arena, interner.intern("Foo"));
    let int_ref = unresolved_ref(&mut arena, interner.intern("Int"));
    let class = class_decl(
        &mut arena,
        interner.intern("Holder"),
        LookupTag::from_raw(0),
        Modality::Open,
        &[foo_ref, int_ref],
    );
    let mut file = File::new(interner.intern("unit.q"), Span::DUMMY);
    file.decls.push(class);

    let mut pass = TypeResolvePass::new(&tower, Position::Other, ResolvePhase::Types);
    match pass.transform_file(&mut arena, &file, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected pipeline to complete, got {fault:?}"),
    }

    match arena.type_ref(foo_ref).resolved_type() {
        Some(ty) if ty.is_error() => {}
        other => panic!("expected error marker, got {other:?}"),
    }
    // The error marker does not stop later references from resolving.
    assert_eq!(
        arena.type_ref(int_ref).resolved_type(),
        Some(&ResolvedType::class(LookupTag::from_raw(100))),
    );
}

#[test]
fn supertype_pass_resolves_only_supertype_lists() {
    let mut interner = StringInterner::new();
    let tower = int_tower(&mut interner);
    let mut arena = FirArena::new();

    let super_ref = unresolved_ref(&mut arena, interner.intern("Int"));
    let param_ref = unresolved_ref(&mut arena, interner.intern("Str"));
    let return_ref = unresolved_ref(&mut arena, interner.intern("Str"));
    let flow_ref = arena.alloc_flow_ref(quill_fir::FlowRef::Empty);
    let method = arena.alloc_decl(Decl::new(
        interner.intern("area"),
        Span::DUMMY,
        DeclKind::Function(FunctionDecl {
            params: vec![Param {
                name: interner.intern("x"),
                type_ref: param_ref,
            }],
            return_type: return_ref,
            body: Vec::new(),
            flow_ref,
        }),
    ));
    let class = class_decl(
        &mut arena,
        interner.intern("Circle"),
        LookupTag::from_raw(0),
        Modality::Final,
        &[super_ref],
    );
    if let DeclKind::Class(c) = &mut arena.decl_mut(class).kind {
        c.members.push(method);
    }
    let mut file = File::new(interner.intern("unit.q"), Span::DUMMY);
    file.decls.push(class);

    let mut pass = SuperTypeResolvePass::new(&tower);
    match pass.transform_file(&mut arena, &file, &()) {
        Ok(()) => {}
        Err(fault) => panic!("expected supertype pass to succeed, got {fault:?}"),
    }

    assert!(arena.type_ref(super_ref).is_resolved());
    // Signature references wait for the whole-tree type phase.
    assert!(!arena.type_ref(param_ref).is_resolved());
    assert!(!arena.type_ref(return_ref).is_resolved());
    assert_eq!(arena.decl(class).phase, ResolvePhase::SuperTypes);
    assert_eq!(arena.decl(method).phase, ResolvePhase::SuperTypes);
}
