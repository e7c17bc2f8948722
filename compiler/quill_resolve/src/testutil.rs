//! Shared fixtures for the pass tests.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use quill_fir::{
    ClassDecl, Decl, DeclId, DeclKind, FirArena, File, LookupTag, Modality, Name, NamePath,
    ResolvedType, Span, StringInterner, TypeRef, TypeRefId, TypeRefKind,
};

use crate::scopes::{Position, ScopeTower};

/// Tower backed by a short-name map; position-agnostic.
pub(crate) struct TestTower {
    types: FxHashMap<Name, ResolvedType>,
}

impl TestTower {
    pub(crate) fn new() -> Self {
        TestTower {
            types: FxHashMap::default(),
        }
    }

    pub(crate) fn define(&mut self, name: Name, ty: ResolvedType) {
        self.types.insert(name, ty);
    }
}

impl ScopeTower for TestTower {
    fn lookup(&self, path: &NamePath, _position: Position) -> ResolvedType {
        match path.short_name().and_then(|name| self.types.get(&name)) {
            Some(ty) => ty.clone(),
            None => ResolvedType::Error {
                reason: "unresolved name".to_string(),
            },
        }
    }

    fn resolve_function_shape(
        &self,
        arity: usize,
        nullable: bool,
        _position: Position,
    ) -> ResolvedType {
        ResolvedType::Function { arity, nullable }
    }
}

/// Tower that records the position of every path lookup.
pub(crate) struct RecordingTower {
    pub(crate) inner: TestTower,
    pub(crate) lookups: RefCell<Vec<(Name, Position)>>,
}

impl RecordingTower {
    pub(crate) fn new(inner: TestTower) -> Self {
        RecordingTower {
            inner,
            lookups: RefCell::new(Vec::new()),
        }
    }
}

impl ScopeTower for RecordingTower {
    fn lookup(&self, path: &NamePath, position: Position) -> ResolvedType {
        if let Some(name) = path.short_name() {
            self.lookups.borrow_mut().push((name, position));
        }
        self.inner.lookup(path, position)
    }

    fn resolve_function_shape(
        &self,
        arity: usize,
        nullable: bool,
        position: Position,
    ) -> ResolvedType {
        self.inner.resolve_function_shape(arity, nullable, position)
    }
}

pub(crate) fn unresolved_ref(arena: &mut FirArena, name: Name) -> TypeRefId {
    unresolved_ref_with_args(arena, name, &[])
}

pub(crate) fn unresolved_ref_with_args(
    arena: &mut FirArena,
    name: Name,
    args: &[TypeRefId],
) -> TypeRefId {
    arena.alloc_type_ref(TypeRef::new(
        Span::DUMMY,
        TypeRefKind::Unresolved {
            path: NamePath::single(name),
            args: SmallVec::from_slice(args),
            nullable: false,
        },
    ))
}

/// Supertype reference already carrying a resolved class type.
pub(crate) fn resolved_class_ref(arena: &mut FirArena, tag: LookupTag) -> TypeRefId {
    arena.alloc_type_ref(TypeRef::new(
        Span::DUMMY,
        TypeRefKind::Resolved {
            ty: ResolvedType::class(tag),
        },
    ))
}

pub(crate) fn class_decl(
    arena: &mut FirArena,
    name: Name,
    tag: LookupTag,
    modality: Modality,
    supers: &[TypeRefId],
) -> DeclId {
    let mut class = ClassDecl::new(tag, modality);
    class.super_type_refs.extend(supers.iter().copied());
    arena.alloc_decl(Decl::new(name, Span::DUMMY, DeclKind::Class(class)))
}

/// `sealed class Shape; class Circle : Shape; class Square : Shape`, with
/// supertype references already resolved.
pub(crate) struct ShapesUnit {
    pub(crate) interner: StringInterner,
    pub(crate) arena: FirArena,
    pub(crate) file: File,
    pub(crate) shape: DeclId,
    pub(crate) shape_tag: LookupTag,
    pub(crate) circle_tag: LookupTag,
    pub(crate) square_tag: LookupTag,
}

pub(crate) fn shapes_unit() -> ShapesUnit {
    let mut interner = StringInterner::new();
    let mut arena = FirArena::new();

    let shape_tag = LookupTag::from_raw(0);
    let circle_tag = LookupTag::from_raw(1);
    let square_tag = LookupTag::from_raw(2);

    let shape = class_decl(
        &mut arena,
        interner.intern("Shape"),
        shape_tag,
        Modality::Sealed,
        &[],
    );
    let shape_super_a = resolved_class_ref(&mut arena, shape_tag);
    let circle = class_decl(
        &mut arena,
        interner.intern("Circle"),
        circle_tag,
        Modality::Final,
        &[shape_super_a],
    );
    let shape_super_b = resolved_class_ref(&mut arena, shape_tag);
    let square = class_decl(
        &mut arena,
        interner.intern("Square"),
        square_tag,
        Modality::Final,
        &[shape_super_b],
    );

    let mut file = File::new(interner.intern("shapes.q"), Span::DUMMY);
    file.decls.extend([shape, circle, square]);

    ShapesUnit {
        interner,
        arena,
        file,
        shape,
        shape_tag,
        circle_tag,
        square_tag,
    }
}
