//! Selector data model.
//!
//! A parsed selector chain is stored right-to-left: the head is the
//! simple selector matched against the candidate node itself, and each
//! [`Selector::next`] link leads to the selector that must match a
//! related node (ancestor, parent, or preceding sibling) as described by
//! the head's [`Combinator`]. Traversal follows `next` until a selector
//! with [`Combinator::None`] is reached.
//!
//! The head carries the precomputed specificity of the whole chain and
//! the index of the rule it belongs to.

use civet_intern::Atom;

/// Specificity weight of an element or pseudo-element condition.
pub const SPECIFICITY_D: u32 = 0x1;
/// Specificity weight of a class, attribute, or pseudo-class condition.
pub const SPECIFICITY_C: u32 = 0x100;
/// Specificity weight of an id condition.
pub const SPECIFICITY_B: u32 = 0x1_0000;
/// Specificity weight of inline style.
pub const SPECIFICITY_A: u32 = 0x100_0000;

/// The kind of a single selector condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// An element-name condition (`p`); the universal selector uses the
    /// interned name `*`.
    Element,
    /// A class condition (`.warning`).
    Class,
    /// An id condition (`#content`).
    Id,
    /// A pseudo-class or pseudo-element condition (`:hover`,
    /// `:first-line`).
    Pseudo,
    /// `[name]` — the attribute exists.
    Attribute,
    /// `[name=value]` — the attribute equals the value exactly.
    AttributeEqual,
    /// `[name|=value]` — the attribute equals the value or starts with
    /// it followed by `-`.
    AttributeDashmatch,
    /// `[name~=value]` — the attribute's space-separated word list
    /// contains the value.
    AttributeIncludes,
}

/// A single condition within a simple selector.
#[derive(Debug, Clone)]
pub struct Detail {
    /// What kind of condition this is.
    pub kind: DetailKind,
    /// The condition's interned name. Element names are stored
    /// lowercased; class and id names keep their case.
    pub name: Atom,
    /// The condition's interned value, for attribute tests and
    /// functional pseudo-classes.
    pub value: Option<Atom>,
}

/// How a selector relates to the next selector in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// End of chain.
    None,
    /// Whitespace: the next selector matches some ancestor.
    Descendant,
    /// `>`: the next selector matches the parent.
    Child,
    /// `+`: the next selector matches the immediately preceding
    /// sibling.
    AdjacentSibling,
}

/// One simple selector in a chain.
#[derive(Debug, Clone)]
pub struct Selector {
    /// The conditions of this simple selector. The first is always the
    /// element-name condition (possibly universal).
    pub details: Vec<Detail>,
    /// How this selector relates to [`Selector::next`].
    pub combinator: Combinator,
    /// The selector matched against the related node, when
    /// `combinator` is not [`Combinator::None`].
    pub next: Option<Box<Selector>>,
    /// Specificity of the whole chain. Meaningful on the head only.
    pub specificity: u32,
    /// Index of the owning rule within its stylesheet. Meaningful on
    /// the head only; assigned when the rule is added to the sheet.
    pub rule_index: u32,
}

impl Selector {
    /// A simple selector for the given element-name condition.
    #[must_use]
    pub fn new(element: Detail) -> Selector {
        debug_assert!(element.kind == DetailKind::Element);
        Selector {
            details: vec![element],
            combinator: Combinator::None,
            next: None,
            specificity: 0,
            rule_index: 0,
        }
    }

    /// The element-name condition.
    #[must_use]
    pub fn element_name(&self) -> &Atom {
        &self.details[0].name
    }

    /// The conditions beyond the element name.
    #[must_use]
    pub fn conditions(&self) -> &[Detail] {
        &self.details[1..]
    }
}
