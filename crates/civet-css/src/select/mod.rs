//! Style selection.
//!
//! Given a node, the selection context walks every applicable sheet
//! (imports depth-first, `@media` filtered by the active media set),
//! looks the node's element name up in each sheet's selector hash —
//! plus the universal bucket — and matches candidate chains
//! right-to-left through the host-supplied node interface. Each matched
//! chain contributes its rule's bytecode to the cascade, which decides
//! per property which candidate wins and writes the winner into the
//! computed style.
//!
//! The engine never inspects node memory: every question about the
//! document (names, classes, ids, attributes, tree neighbours) goes
//! through [`NodeHandler`].

pub(crate) mod hash;
mod properties;

use std::rc::Rc;

use civet_intern::Atom;

use crate::bytecode::{N_OPCODES, Opcode, Opv, SIDE_MASK, SIDE_SHIFT};
use crate::error::{Error, Result};
use crate::selector::{Combinator, Detail, DetailKind, Selector};
use crate::style::ComputedStyle;
use crate::stylesheet::{Rule, SelectorRule, Stylesheet};
use crate::types::{Media, Origin, PseudoClassSet, PseudoElement};

use hash::HashEntry;

/// Number of distinct longhand properties: one per opcode, with the
/// five four-sided opcodes expanded per box side.
pub(crate) const N_PROPS: usize = N_OPCODES + 5 * 3;

/// The host-node interface consumed during selection.
///
/// Each method answers one question about the document. Name matching
/// is the host's business (in particular its case policy); the engine
/// passes interned strings and never retains node handles past the
/// call.
pub trait NodeHandler {
    /// The host's node reference type.
    type Node: Clone;

    /// The node's element name.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_name(&self, node: &Self::Node) -> Result<String>;

    /// The nearest ancestor whose element name is `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn named_ancestor_node(&self, node: &Self::Node, name: &Atom)
    -> Result<Option<Self::Node>>;

    /// The parent, if its element name is `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn named_parent_node(&self, node: &Self::Node, name: &Atom) -> Result<Option<Self::Node>>;

    /// The immediately preceding sibling, if its element name is
    /// `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn named_sibling_node(&self, node: &Self::Node, name: &Atom) -> Result<Option<Self::Node>>;

    /// The parent node.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn parent_node(&self, node: &Self::Node) -> Result<Option<Self::Node>>;

    /// The immediately preceding sibling.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn sibling_node(&self, node: &Self::Node) -> Result<Option<Self::Node>>;

    /// Whether the node carries class `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_class(&self, node: &Self::Node, name: &Atom) -> Result<bool>;

    /// Whether the node's id is `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_id(&self, node: &Self::Node, name: &Atom) -> Result<bool>;

    /// Whether the node has attribute `name`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_attribute(&self, node: &Self::Node, name: &Atom) -> Result<bool>;

    /// Whether attribute `name` equals `value` exactly.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_attribute_equal(
        &self,
        node: &Self::Node,
        name: &Atom,
        value: &Atom,
    ) -> Result<bool>;

    /// Whether attribute `name` equals `value` or starts with
    /// `value-`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_attribute_dashmatch(
        &self,
        node: &Self::Node,
        name: &Atom,
        value: &Atom,
    ) -> Result<bool>;

    /// Whether attribute `name`'s space-separated word list contains
    /// `value`.
    ///
    /// # Errors
    /// Host-defined; any error aborts selection.
    fn node_has_attribute_includes(
        &self,
        node: &Self::Node,
        name: &Atom,
        value: &Atom,
    ) -> Result<bool>;
}

/// Cascade bookkeeping for one property slot.
#[derive(Debug, Clone, Copy, Default)]
struct PropState {
    set: bool,
    level: u8,
    specificity: u32,
    sheet: u32,
    rule: u32,
}

/// The per-selection working state.
struct SelectState {
    props: Vec<PropState>,
    sheet_counter: u32,
    media: Media,
    pseudo_classes: PseudoClassSet,
    pseudo_element: Option<PseudoElement>,
}

/// The candidate identity the cascade compares; built per matched rule.
pub(crate) struct CascadeCtx<'a> {
    pub(crate) computed: &'a mut ComputedStyle,
    props: &'a mut [PropState],
    origin: Origin,
    specificity: u32,
    sheet_index: u32,
    rule_index: u32,
}

/// Total cascade ordering of (importance, origin): normal declarations
/// below important ones. For normal declarations inline style outranks
/// author rules; for important declarations the order inverts to
/// `User > Author > UA`, with inline style outranked by both important
/// author and important user declarations.
fn cascade_level(origin: Origin, important: bool) -> u8 {
    match (important, origin) {
        (false, Origin::Ua) => 0,
        (false, Origin::User) => 1,
        (false, Origin::Author) => 2,
        (false, Origin::Inline) => 3,
        (true, Origin::Ua) => 4,
        (true, Origin::Inline) => 5,
        (true, Origin::Author) => 6,
        (true, Origin::User) => 7,
    }
}

impl CascadeCtx<'_> {
    /// Whether the current candidate wins property slot `index`, and if
    /// so, record it. Equal keys resolve to the later
    /// (sheet, rule) — and, within one rule, to the later declaration.
    pub(crate) fn outranks(&mut self, index: usize, important: bool) -> bool {
        let level = cascade_level(self.origin, important);
        let candidate = (level, self.specificity, self.sheet_index, self.rule_index);
        let state = &mut self.props[index];

        if state.set {
            let existing = (state.level, state.specificity, state.sheet, state.rule);
            if candidate < existing {
                return false;
            }
        }

        *state = PropState {
            set: true,
            level,
            specificity: self.specificity,
            sheet: self.sheet_index,
            rule: self.rule_index,
        };
        true
    }
}

/// Map an OPV to its property slot, expanding the four-sided opcodes.
pub(crate) fn prop_index(op: Opcode, value: u16) -> usize {
    const TRBL: [Opcode; 5] = [
        Opcode::BorderTrblColor,
        Opcode::BorderTrblStyle,
        Opcode::BorderTrblWidth,
        Opcode::MarginTrbl,
        Opcode::PaddingTrbl,
    ];

    let o = op as usize;
    let expanded_before = TRBL.iter().filter(|t| (**t as usize) < o).count() * 3;
    let side = if TRBL.contains(&op) {
        usize::from((value & SIDE_MASK) >> SIDE_SHIFT)
    } else {
        0
    };
    o + expanded_before + side
}

/// An indexed, ordered collection of stylesheets to select against.
#[derive(Default)]
pub struct SelectCtx {
    sheets: Vec<Rc<Stylesheet>>,
}

impl SelectCtx {
    /// An empty selection context.
    #[must_use]
    pub fn new() -> SelectCtx {
        SelectCtx::default()
    }

    /// Append a sheet at the end of the cascade order.
    pub fn append_sheet(&mut self, sheet: Rc<Stylesheet>) {
        self.sheets.push(sheet);
    }

    /// Insert a sheet at `index` in the cascade order.
    ///
    /// # Errors
    ///
    /// `Invalid` when `index` is beyond the end.
    pub fn insert_sheet(&mut self, sheet: Rc<Stylesheet>, index: usize) -> Result<()> {
        if index > self.sheets.len() {
            return Err(Error::Invalid);
        }
        self.sheets.insert(index, sheet);
        Ok(())
    }

    /// Remove a sheet (by identity).
    ///
    /// # Errors
    ///
    /// `Invalid` when the sheet is not in this context.
    pub fn remove_sheet(&mut self, sheet: &Rc<Stylesheet>) -> Result<()> {
        let pos = self
            .sheets
            .iter()
            .position(|s| Rc::ptr_eq(s, sheet))
            .ok_or(Error::Invalid)?;
        let _ = self.sheets.remove(pos);
        Ok(())
    }

    /// Number of top-level sheets.
    #[must_use]
    pub fn count_sheets(&self) -> usize {
        self.sheets.len()
    }

    /// The sheet at `index`.
    #[must_use]
    pub fn sheet(&self, index: usize) -> Option<&Rc<Stylesheet>> {
        self.sheets.get(index)
    }

    /// Select a style for `node`.
    ///
    /// The computed style is written in place; properties no matching
    /// rule sets are left as inherit. The result makes no reference to
    /// the parent's style — compose it with
    /// [`ComputedStyle::compose`] afterwards.
    ///
    /// # Errors
    ///
    /// Host callback errors abort selection (the partially written
    /// style is then invalid); `Invalid` on corrupt bytecode.
    pub fn select_style<H: NodeHandler>(
        &self,
        handler: &H,
        node: &H::Node,
        pseudo_element: Option<PseudoElement>,
        pseudo_classes: PseudoClassSet,
        media: Media,
        computed: &mut ComputedStyle,
    ) -> Result<()> {
        let mut state = SelectState {
            props: vec![PropState::default(); N_PROPS],
            sheet_counter: 0,
            media,
            pseudo_classes,
            pseudo_element,
        };

        for sheet in &self.sheets {
            if sheet.disabled() || !sheet.media().intersects(media) {
                continue;
            }
            select_from_sheet(sheet, handler, node, &mut state, computed)?;
        }
        Ok(())
    }
}

/// Process one sheet: registered imports first (depth-first, so an
/// imported sheet's rules rank below its importer's), then the sheet's
/// own selectors.
fn select_from_sheet<H: NodeHandler>(
    sheet: &Stylesheet,
    handler: &H,
    node: &H::Node,
    state: &mut SelectState,
    computed: &mut ComputedStyle,
) -> Result<()> {
    for rule in sheet.rules() {
        if let Rule::Import(import) = rule
            && let Some(child) = &import.sheet
            && import.media.intersects(state.media)
            && !child.disabled()
            && child.media().intersects(state.media)
        {
            select_from_sheet(child, handler, node, state, computed)?;
        }
    }

    state.sheet_counter += 1;
    let sheet_index = state.sheet_counter;

    match_selectors_in_sheet(sheet, sheet_index, handler, node, state, computed)
}

fn match_selectors_in_sheet<H: NodeHandler>(
    sheet: &Stylesheet,
    sheet_index: u32,
    handler: &H,
    node: &H::Node,
    state: &mut SelectState,
    computed: &mut ComputedStyle,
) -> Result<()> {
    let name = handler.node_name(node)?;
    let element = sheet.inner.dict.intern_lower(&name);
    let universal = sheet.inner.universal.clone();

    for entry in sheet.inner.hash.find(&element) {
        match_selector_chain(entry, sheet, sheet_index, handler, node, &universal, state, computed)?;
    }
    for entry in sheet.inner.hash.find(&universal) {
        match_selector_chain(entry, sheet, sheet_index, handler, node, &universal, state, computed)?;
    }
    Ok(())
}

/// The pseudo-element a chain head selects for, if any.
fn head_pseudo_element(head: &Selector) -> Option<PseudoElement> {
    head.conditions().iter().find_map(|d| {
        if d.kind == DetailKind::Pseudo {
            PseudoElement::from_name(d.name.as_str())
        } else {
            None
        }
    })
}

/// Walk one candidate chain right-to-left; on a full match, feed its
/// rule to the cascade.
#[allow(clippy::too_many_arguments)]
fn match_selector_chain<H: NodeHandler>(
    entry: &HashEntry,
    sheet: &Stylesheet,
    sheet_index: u32,
    handler: &H,
    node: &H::Node,
    universal: &Atom,
    state: &mut SelectState,
    computed: &mut ComputedStyle,
) -> Result<()> {
    // Rules inside @media only apply when their media set does.
    if !entry.rule.media.intersects(state.media) {
        return Ok(());
    }

    // A chain with a pseudo-element matches only a selection for that
    // pseudo-element, and vice versa.
    if head_pseudo_element(&entry.selector) != state.pseudo_element {
        return Ok(());
    }

    let mut s: &Selector = &entry.selector;
    let mut n: H::Node = node.clone();
    let mut is_head = true;

    loop {
        let mut next_node: Option<H::Node> = None;

        // A named combinator finds the related node by name.
        if s.combinator != Combinator::None {
            let next_sel = s.next.as_ref().ok_or(Error::Invalid)?;
            if next_sel.element_name() != universal {
                next_node = match s.combinator {
                    Combinator::Descendant => {
                        handler.named_ancestor_node(&n, next_sel.element_name())?
                    }
                    Combinator::Child => {
                        handler.named_parent_node(&n, next_sel.element_name())?
                    }
                    Combinator::AdjacentSibling => {
                        handler.named_sibling_node(&n, next_sel.element_name())?
                    }
                    Combinator::None => None,
                };
                if next_node.is_none() {
                    return Ok(());
                }
            }
        }

        // Match this selector's conditions against the current node.
        if !match_details(handler, &n, s, is_head, state)? {
            return Ok(());
        }

        // A universal combinator walks candidates, verifying the next
        // step's conditions as it goes.
        if s.combinator != Combinator::None {
            let next_sel = s.next.as_ref().ok_or(Error::Invalid)?;
            if next_sel.element_name() == universal {
                next_node =
                    match_universal_combinator(handler, s.combinator, next_sel, &n, state)?;
                if next_node.is_none() {
                    return Ok(());
                }
            }
        }

        match s.next.as_deref() {
            Some(next_sel) => {
                s = next_sel;
                n = next_node.ok_or(Error::Invalid)?;
                is_head = false;
            }
            None => break,
        }
    }

    // The whole chain matched: cascade this rule's bytecode.
    cascade_style(
        &entry.rule,
        sheet.origin(),
        entry.selector.specificity,
        sheet_index,
        state,
        computed,
    )
}

/// Find the related node for a universal-element combinator step,
/// verifying the step's own conditions against each candidate.
fn match_universal_combinator<H: NodeHandler>(
    handler: &H,
    combinator: Combinator,
    next_sel: &Selector,
    node: &H::Node,
    state: &mut SelectState,
) -> Result<Option<H::Node>> {
    let mut n = node.clone();
    loop {
        let candidate = match combinator {
            Combinator::Descendant | Combinator::Child => handler.parent_node(&n)?,
            Combinator::AdjacentSibling => handler.sibling_node(&n)?,
            Combinator::None => None,
        };
        let Some(candidate) = candidate else {
            return Ok(None);
        };

        if match_details(handler, &candidate, next_sel, false, state)? {
            return Ok(Some(candidate));
        }

        // Only the descendant combinator keeps looking further out.
        if combinator != Combinator::Descendant {
            return Ok(None);
        }
        n = candidate;
    }
}

/// Check a selector's conditions (everything beyond the element name)
/// against a node.
fn match_details<H: NodeHandler>(
    handler: &H,
    node: &H::Node,
    selector: &Selector,
    is_head: bool,
    state: &SelectState,
) -> Result<bool> {
    for detail in selector.conditions() {
        if !match_detail(handler, node, detail, is_head, state)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn match_detail<H: NodeHandler>(
    handler: &H,
    node: &H::Node,
    detail: &Detail,
    is_head: bool,
    state: &SelectState,
) -> Result<bool> {
    match detail.kind {
        DetailKind::Element => Ok(true),
        DetailKind::Class => handler.node_has_class(node, &detail.name),
        DetailKind::Id => handler.node_has_id(node, &detail.name),
        DetailKind::Attribute => handler.node_has_attribute(node, &detail.name),
        DetailKind::AttributeEqual => {
            let value = detail.value.as_ref().ok_or(Error::Invalid)?;
            handler.node_has_attribute_equal(node, &detail.name, value)
        }
        DetailKind::AttributeDashmatch => {
            let value = detail.value.as_ref().ok_or(Error::Invalid)?;
            handler.node_has_attribute_dashmatch(node, &detail.name, value)
        }
        DetailKind::AttributeIncludes => {
            let value = detail.value.as_ref().ok_or(Error::Invalid)?;
            handler.node_has_attribute_includes(node, &detail.name, value)
        }
        DetailKind::Pseudo => {
            // Dynamic pseudo-classes come from the host's asserted set.
            if let Some(bit) = PseudoClassSet::from_css_name(detail.name.as_str()) {
                return Ok(state.pseudo_classes.contains(bit));
            }
            // The head's pseudo-element was vetted before chain
            // matching started.
            if PseudoElement::from_name(detail.name.as_str()).is_some() {
                return Ok(is_head);
            }
            // Structural pseudo-classes are unanswerable through the
            // host-node interface; they never match.
            Ok(false)
        }
    }
}

/// Feed one matched rule's bytecode to the cascade.
fn cascade_style(
    rule: &SelectorRule,
    origin: Origin,
    specificity: u32,
    sheet_index: u32,
    state: &mut SelectState,
    computed: &mut ComputedStyle,
) -> Result<()> {
    let mut ctx = CascadeCtx {
        computed,
        props: &mut state.props,
        origin,
        specificity,
        sheet_index,
        rule_index: rule.index,
    };

    let mut iter = rule.style.iter();
    while let Some(word) = iter.next_word() {
        let opv = Opv::from_raw(word);
        let op = opv.opcode().ok_or(Error::Invalid)?;
        properties::apply(op, opv, &mut iter, &mut ctx)?;
    }
    Ok(())
}
