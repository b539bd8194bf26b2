//! The selector hash.
//!
//! Compiled selector chains are indexed by the interned name of their
//! rightmost simple selector's element condition; chains whose
//! rightmost element is universal live under the interned `*`. Lookup
//! is by atom identity — the whole point of interning — and each
//! bucket keeps its chains ordered by ascending specificity, ties by
//! ascending rule index, so bucket walks feed the cascade in a stable
//! order.

use std::collections::HashMap;
use std::rc::Rc;

use civet_intern::Atom;

use crate::selector::Selector;
use crate::stylesheet::SelectorRule;

/// One bucket entry: a chain head and the rule it belongs to.
#[derive(Clone)]
pub(crate) struct HashEntry {
    /// The chain head (rightmost simple selector).
    pub(crate) selector: Rc<Selector>,
    /// The owning rule, carrying the style bytecode and media set.
    pub(crate) rule: Rc<SelectorRule>,
}

/// Name-indexed buckets of compiled selectors.
#[derive(Default)]
pub(crate) struct SelectorHash {
    buckets: HashMap<Atom, Vec<HashEntry>>,
}

impl SelectorHash {
    pub(crate) fn new() -> SelectorHash {
        SelectorHash::default()
    }

    /// Insert a chain head, keeping the bucket's
    /// (specificity, rule index) order.
    pub(crate) fn insert(&mut self, selector: Rc<Selector>, rule: Rc<SelectorRule>) {
        let key = selector.element_name().clone();
        let bucket = self.buckets.entry(key).or_default();

        let pos = bucket
            .iter()
            .position(|e| {
                e.selector.specificity > selector.specificity
                    || (e.selector.specificity == selector.specificity
                        && e.selector.rule_index > selector.rule_index)
            })
            .unwrap_or(bucket.len());
        bucket.insert(pos, HashEntry { selector, rule });
    }

    /// All chains whose rightmost element name is `name`, in bucket
    /// order. The returned slice doubles as the iteration cursor.
    pub(crate) fn find(&self, name: &Atom) -> &[HashEntry] {
        self.buckets.get(name).map_or(&[], Vec::as_slice)
    }

    /// Remove every chain belonging to the rule with `index`.
    pub(crate) fn remove_rule(&mut self, index: u32) {
        for bucket in self.buckets.values_mut() {
            bucket.retain(|e| e.rule.index != index);
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }
}
