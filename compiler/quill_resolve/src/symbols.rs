//! Lookup-tag based declaration lookup.

use rustc_hash::FxHashMap;

use quill_fir::{DeclId, DeclKind, FirArena, LookupTag};

/// A class-like declaration found behind a lookup tag.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClassLike {
    Class(DeclId),
    Alias(DeclId),
}

/// Resolves lookup tags to declarations.
///
/// External collaborator boundary: the sealed-hierarchy resolver follows
/// supertype references and alias expansions through this trait only.
pub trait SymbolProvider {
    fn resolve_lookup_tag(&self, tag: LookupTag) -> Option<ClassLike>;
}

/// Symbol table over a single unit's arena.
#[derive(Debug, Default)]
pub struct FileSymbolTable {
    by_tag: FxHashMap<LookupTag, ClassLike>,
}

impl FileSymbolTable {
    /// Build the table by scanning every declaration in the arena.
    pub fn build(arena: &FirArena) -> Self {
        let mut by_tag = FxHashMap::default();
        for (id, decl) in arena.decls() {
            match &decl.kind {
                DeclKind::Class(class) => {
                    by_tag.insert(class.tag, ClassLike::Class(id));
                }
                DeclKind::TypeAlias(alias) => {
                    by_tag.insert(alias.tag, ClassLike::Alias(id));
                }
                DeclKind::Function(_) => {}
            }
        }
        FileSymbolTable { by_tag }
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl SymbolProvider for FileSymbolTable {
    fn resolve_lookup_tag(&self, tag: LookupTag) -> Option<ClassLike> {
        self.by_tag.get(&tag).copied()
    }
}
