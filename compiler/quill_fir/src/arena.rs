//! Arena storage for one compilation unit's FIR tree.
//!
//! Nodes live in typed pools and reference their children by 32-bit index.
//! A phase replaces a node's stored attributes in its slot without
//! invalidating any other index; the whole arena is dropped at the end of
//! the unit's pipeline.

use std::fmt;

use crate::decl::Decl;
use crate::interner::Name;
use crate::refs::{FlowRef, NamedRef};
use crate::span::Span;
use crate::stmt::Stmt;
use crate::types::TypeRef;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id! {
    /// Index of a declaration in the arena.
    DeclId
}
define_id! {
    /// Index of a statement in the arena.
    StmtId
}
define_id! {
    /// Index of a type reference in the arena.
    TypeRefId
}
define_id! {
    /// Index of a named reference in the arena.
    NamedRefId
}
define_id! {
    /// Index of a control-flow reference in the arena.
    FlowRefId
}

/// Root of one compilation unit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Source file name, interned.
    pub name: Name,
    pub span: Span,
    /// Top-level declarations in source order.
    pub decls: Vec<DeclId>,
}

impl File {
    pub fn new(name: Name, span: Span) -> Self {
        File {
            name,
            span,
            decls: Vec::new(),
        }
    }
}

/// Typed node pools for one compilation unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FirArena {
    decls: Vec<Decl>,
    stmts: Vec<Stmt>,
    type_refs: Vec<TypeRef>,
    named_refs: Vec<NamedRef>,
    flow_refs: Vec<FlowRef>,
}

macro_rules! pool_accessors {
    ($alloc:ident, $get:ident, $get_mut:ident, $count:ident, $field:ident, $node:ty, $id:ty) => {
        pub fn $alloc(&mut self, node: $node) -> $id {
            debug_assert!(self.$field.len() < u32::MAX as usize);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena indices always fit u32"
            )]
            let id = <$id>::from_raw(self.$field.len() as u32);
            self.$field.push(node);
            id
        }

        pub fn $get(&self, id: $id) -> &$node {
            &self.$field[id.index()]
        }

        pub fn $get_mut(&mut self, id: $id) -> &mut $node {
            &mut self.$field[id.index()]
        }

        pub fn $count(&self) -> usize {
            self.$field.len()
        }
    };
}

impl FirArena {
    pub fn new() -> Self {
        Self::default()
    }

    pool_accessors!(alloc_decl, decl, decl_mut, decl_count, decls, Decl, DeclId);
    pool_accessors!(alloc_stmt, stmt, stmt_mut, stmt_count, stmts, Stmt, StmtId);
    pool_accessors!(
        alloc_type_ref,
        type_ref,
        type_ref_mut,
        type_ref_count,
        type_refs,
        TypeRef,
        TypeRefId
    );
    pool_accessors!(
        alloc_named_ref,
        named_ref,
        named_ref_mut,
        named_ref_count,
        named_refs,
        NamedRef,
        NamedRefId
    );
    pool_accessors!(
        alloc_flow_ref,
        flow_ref,
        flow_ref_mut,
        flow_ref_count,
        flow_refs,
        FlowRef,
        FlowRefId
    );

    /// Iterate all declarations with their ids, in allocation order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls.iter().enumerate().map(|(i, decl)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena indices always fit u32"
            )]
            let id = DeclId::from_raw(i as u32);
            (id, decl)
        })
    }
}
