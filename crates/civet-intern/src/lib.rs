//! Content-keyed string interning for the civet CSS engine.
//!
//! A CSS engine compares names constantly: element names against selector
//! buckets, property keywords against tables, attribute names against
//! document nodes. Interning turns all of those comparisons into pointer
//! equality: a [`Dictionary`] holds one copy of each distinct string, and
//! an [`Atom`] is a cheap, reference-counted handle to that copy.
//!
//! Two atoms are equal if and only if they came from the same dictionary
//! entry. Atoms from distinct dictionaries never compare equal, even when
//! their contents match; callers that need cross-sheet equality share one
//! dictionary per document.
//!
//! The dictionary is single-threaded by design (`Rc` + `RefCell`); the
//! engine's concurrency contract never shares one across threads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A handle to an interned string.
///
/// Cloning an atom bumps the reference count of the underlying entry;
/// dropping the last clone releases it. Equality and hashing are by
/// handle identity, never by content — that is the whole point.
#[derive(Clone)]
pub struct Atom(Rc<str>);

impl Atom {
    /// The interned text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the interned text, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the interned text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Content comparison with ASCII case folding.
    ///
    /// Used where one side is not guaranteed to come from the same
    /// dictionary (or was not lowercase-interned).
    #[must_use]
    pub fn caseless_eq(&self, other: &Atom) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Number of live handles to this entry, counting the dictionary's own.
    #[must_use]
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0).cast::<u8>() as usize).hash(state);
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:?})", &*self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Atom {
    /// Atoms serialize as their text; handle identity is a process-local
    /// property with no meaning on the wire.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A content-keyed intern table.
///
/// `intern` takes `&self`: the table uses interior mutability so a parser,
/// its stylesheet, and the selection engine can all hold the same
/// dictionary behind an `Rc` and intern through it.
#[derive(Default)]
pub struct Dictionary {
    entries: RefCell<HashMap<Box<str>, Atom>>,
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its canonical handle.
    ///
    /// Interning the same content twice yields identical handles.
    pub fn intern(&self, s: &str) -> Atom {
        let mut entries = self.entries.borrow_mut();
        if let Some(atom) = entries.get(s) {
            return atom.clone();
        }
        let atom = Atom(Rc::from(s));
        let _ = entries.insert(Box::from(s), atom.clone());
        atom
    }

    /// Intern the ASCII-lowercased form of a string.
    ///
    /// Case-insensitive CSS tokens (identifiers, at-keywords, function
    /// names, hashes) are interned in both original and lowercased form;
    /// this is the second half of that pair.
    pub fn intern_lower(&self, s: &str) -> Atom {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            self.intern(&s.to_ascii_lowercase())
        } else {
            self.intern(s)
        }
    }

    /// Look up a string without interning it.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Atom> {
        self.entries.borrow().get(s).cloned()
    }

    /// Number of distinct interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the dictionary holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("entries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_same_content_yields_identical_handles() {
        let dict = Dictionary::new();
        let a = dict.intern("color");
        let b = dict.intern("color");
        assert_eq!(a, b);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn intern_distinct_content_yields_distinct_handles() {
        let dict = Dictionary::new();
        let a = dict.intern("color");
        let b = dict.intern("colour");
        assert_ne!(a, b);
    }

    #[test]
    fn atoms_from_distinct_dictionaries_compare_unequal() {
        let d1 = Dictionary::new();
        let d2 = Dictionary::new();
        assert_ne!(d1.intern("p"), d2.intern("p"));
    }

    #[test]
    fn round_trip_through_content() {
        let dict = Dictionary::new();
        let a = dict.intern("background-color");
        let b = dict.intern(a.as_str());
        assert_eq!(a, b);
    }

    #[test]
    fn lowercase_interning_folds_ascii_only() {
        let dict = Dictionary::new();
        let lower = dict.intern_lower("DIV");
        assert_eq!(lower.as_str(), "div");
        assert_eq!(lower, dict.intern("div"));

        // Already-lowercase input shares the same entry as plain interning.
        let plain = dict.intern("span");
        assert_eq!(dict.intern_lower("span"), plain);
    }

    #[test]
    fn caseless_comparison_is_by_content() {
        let dict = Dictionary::new();
        let a = dict.intern("Red");
        let b = dict.intern("red");
        assert_ne!(a, b);
        assert!(a.caseless_eq(&b));
    }

    #[test]
    fn refcount_tracks_clones() {
        let dict = Dictionary::new();
        let a = dict.intern("em");
        let before = a.refcount();
        let b = a.clone();
        assert_eq!(b.refcount(), before + 1);
        drop(b);
        assert_eq!(a.refcount(), before);
    }
}
