//! Symbol module - String interning for identifiers and synthesized names.
//!
//! A [`Symbol`] is a compact (4-byte) handle to a string stored in a global
//! table. Interning gives O(1) equality and hashing for the names the
//! compiler shuffles around constantly: identifiers, attribute paths,
//! temporaries (`t0`, `t1`, ...) and labels (`L0`, `L1`, ...).
//!
//! # Thread safety
//!
//! The global table is lock-free for lookups (DashMap keyed with ahash) and
//! append-only, so independent pipelines may intern concurrently from
//! separate threads.
//!
//! # Memory model
//!
//! Interned strings are leaked to obtain `'static` references. The set of
//! unique names is bounded by the source text plus the synthesized
//! temporaries of a translation, so this is acceptable for a batch compiler.
//!
//! # Examples
//!
//! ```
//! use serpc_util::Symbol;
//!
//! let a = Symbol::intern("count");
//! let b = Symbol::intern("count");
//! let c = Symbol::intern("total");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(a.as_str(), "count");
//! ```

mod interner;

pub use interner::STRING_TABLE;

use std::fmt;

/// An interned string identifier.
///
/// `Symbol` is exactly 4 bytes and cheap to copy; comparison and hashing
/// work on the index rather than the string contents.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    /// Index into the global string table.
    index: u32,
}

static_assertions::assert_eq_size!(Symbol, u32);

impl Symbol {
    /// Intern a string, returning its symbol.
    ///
    /// Returns the existing symbol if the string was interned before.
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Get the string this symbol stands for.
    pub fn as_str(self) -> &'static str {
        STRING_TABLE.resolve(self.index)
    }

    /// Raw table index, for debugging.
    pub fn as_u32(self) -> u32 {
        self.index
    }

    pub(crate) fn from_index(index: u32) -> Self {
        Self { index }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
