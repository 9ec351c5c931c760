//! String interner implementation backing [`Symbol`].
//!
//! Lookups go through a DashMap keyed with ahash for lock-free reads; the
//! index-to-string direction is an append-only vector behind an RwLock.
//! Strings are leaked on first interning to obtain `'static` lifetime.

use std::sync::{LazyLock, RwLock};

use ahash::RandomState;
use dashmap::DashMap;

use super::Symbol;

/// Global string table instance.
///
/// Initialized on first use. The Serpent keywords are pre-interned so they
/// occupy stable low indices.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Keywords and other names interned at startup.
const KNOWN_SYMBOLS: &[&str] = &[
    "def", "if", "else", "elif", "while", "for", "in", "return", "import", "from", "as", "class",
    "pass", "break", "continue", "not", "and", "or", "True", "False", "None", "with", "self",
    "main", "__init__",
];

/// Thread-safe append-only string table.
pub struct StringTable {
    /// Maps interned string to its index.
    map: DashMap<&'static str, u32, RandomState>,

    /// Index-to-string direction. Append-only; indices are never reused.
    strings: RwLock<Vec<&'static str>>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: RwLock::new(Vec::with_capacity(256)),
        }
    }

    fn initialize_known_symbols(&self) {
        for s in KNOWN_SYMBOLS {
            self.intern(s);
        }
    }

    /// Intern a string, returning its symbol.
    pub fn intern(&self, string: &str) -> Symbol {
        // Fast path: already interned.
        if let Some(index) = self.map.get(string) {
            return Symbol::from_index(*index);
        }

        // Slow path: allocate under the write lock. Re-check the map first,
        // another thread may have interned the same string meanwhile.
        let mut strings = self.strings.write().expect("interner lock poisoned");
        if let Some(index) = self.map.get(string) {
            return Symbol::from_index(*index);
        }

        let interned: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = u32::try_from(strings.len()).expect("string table overflow");
        strings.push(interned);
        self.map.insert(interned, index);

        Symbol::from_index(index)
    }

    /// Resolve an index back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the index was not produced by this table.
    pub fn resolve(&self, index: u32) -> &'static str {
        self.strings.read().expect("interner lock poisoned")[index as usize]
    }

    /// Number of unique interned strings.
    pub fn len(&self) -> usize {
        self.strings.read().expect("interner lock poisoned").len()
    }

    /// Returns true if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
