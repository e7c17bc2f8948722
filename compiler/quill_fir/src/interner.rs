//! Interned identifiers and qualified name paths.
//!
//! Strings are interned once per compilation unit and referenced by a
//! 32-bit `Name`. Equality and hashing of names is O(1) index comparison;
//! the string itself is only needed for display.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Interned string identifier.
///
/// A `Name` is only meaningful together with the `StringInterner` that
/// produced it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from a raw u32 value.
    ///
    /// The caller must ensure the index came from the matching interner.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// String interner for one compilation unit.
///
/// The resolution pipeline is single-threaded per unit, so no sharding or
/// locking is needed here.
#[derive(Debug, Default)]
pub struct StringInterner {
    names: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same string twice returns the same `Name`.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.names.get(s) {
            return name;
        }
        debug_assert!(self.strings.len() < u32::MAX as usize);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "interner indices always fit u32"
        )]
        let name = Name(self.strings.len() as u32);
        self.strings.push(s.into());
        self.names.insert(s.into(), name);
        name
    }

    /// Look up the string for an interned `Name`.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Qualified name path, e.g. `collections.Map`.
///
/// Most paths are a single segment, so segments are stored inline.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NamePath {
    pub segments: SmallVec<[Name; 2]>,
}

impl NamePath {
    /// Path with a single segment.
    pub fn single(name: Name) -> Self {
        NamePath {
            segments: SmallVec::from_slice(&[name]),
        }
    }

    pub fn new(segments: impl IntoIterator<Item = Name>) -> Self {
        NamePath {
            segments: segments.into_iter().collect(),
        }
    }

    /// The trailing segment, i.e. the referenced short name.
    pub fn short_name(&self) -> Option<Name> {
        self.segments.last().copied()
    }

    /// Render as `a.b.c` for diagnostics and logs.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for (i, &segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(interner.resolve(segment));
        }
        out
    }
}
