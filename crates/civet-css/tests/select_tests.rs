//! Integration tests for selection and the cascade, driven through a
//! small mock document implementing the host-node interface.

use std::rc::Rc;

use civet_css::style::values::{AutoLength, Display, FontSize, Spacing};
use civet_css::types::{Length, PseudoClassSet, Unit};
use civet_css::{
    Atom, ComputedStyle, Colour, Error, Media, NodeHandler, Origin, Params, Result, SelectCtx,
    Stylesheet,
};
use civet_css::fixed::Fixed;

/* ------------------------------------------------------------------ *
 * Mock document                                                      *
 * ------------------------------------------------------------------ */

#[derive(Default)]
struct NodeData {
    name: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    prev_sibling: Option<usize>,
}

/// A flat document tree addressed by node index.
#[derive(Default)]
struct Doc {
    nodes: Vec<NodeData>,
}

impl Doc {
    fn elem(&mut self, name: &str, parent: Option<usize>) -> usize {
        let prev_sibling = parent.and_then(|p| {
            self.nodes
                .iter()
                .enumerate()
                .rev()
                .find(|(_, n)| n.parent == Some(p))
                .map(|(i, _)| i)
        });
        self.nodes.push(NodeData {
            name: name.to_string(),
            parent,
            prev_sibling,
            ..NodeData::default()
        });
        self.nodes.len() - 1
    }

    fn set_id(&mut self, node: usize, id: &str) {
        self.nodes[node].id = Some(id.to_string());
    }

    fn add_class(&mut self, node: usize, class: &str) {
        self.nodes[node].classes.push(class.to_string());
    }

    fn set_attr(&mut self, node: usize, name: &str, value: &str) {
        self.nodes[node]
            .attrs
            .push((name.to_string(), value.to_string()));
    }

    fn attr(&self, node: usize, name: &str) -> Option<&str> {
        self.nodes[node]
            .attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl NodeHandler for Doc {
    type Node = usize;

    fn node_name(&self, node: &usize) -> Result<String> {
        Ok(self.nodes[*node].name.clone())
    }

    fn named_ancestor_node(&self, node: &usize, name: &Atom) -> Result<Option<usize>> {
        let mut cur = self.nodes[*node].parent;
        while let Some(n) = cur {
            if self.nodes[n].name.eq_ignore_ascii_case(name.as_str()) {
                return Ok(Some(n));
            }
            cur = self.nodes[n].parent;
        }
        Ok(None)
    }

    fn named_parent_node(&self, node: &usize, name: &Atom) -> Result<Option<usize>> {
        Ok(self.nodes[*node]
            .parent
            .filter(|&p| self.nodes[p].name.eq_ignore_ascii_case(name.as_str())))
    }

    fn named_sibling_node(&self, node: &usize, name: &Atom) -> Result<Option<usize>> {
        Ok(self.nodes[*node]
            .prev_sibling
            .filter(|&s| self.nodes[s].name.eq_ignore_ascii_case(name.as_str())))
    }

    fn parent_node(&self, node: &usize) -> Result<Option<usize>> {
        Ok(self.nodes[*node].parent)
    }

    fn sibling_node(&self, node: &usize) -> Result<Option<usize>> {
        Ok(self.nodes[*node].prev_sibling)
    }

    fn node_has_class(&self, node: &usize, name: &Atom) -> Result<bool> {
        Ok(self.nodes[*node].classes.iter().any(|c| c == name.as_str()))
    }

    fn node_has_id(&self, node: &usize, name: &Atom) -> Result<bool> {
        Ok(self.nodes[*node].id.as_deref() == Some(name.as_str()))
    }

    fn node_has_attribute(&self, node: &usize, name: &Atom) -> Result<bool> {
        Ok(self.attr(*node, name.as_str()).is_some())
    }

    fn node_has_attribute_equal(&self, node: &usize, name: &Atom, value: &Atom) -> Result<bool> {
        Ok(self.attr(*node, name.as_str()) == Some(value.as_str()))
    }

    fn node_has_attribute_dashmatch(
        &self,
        node: &usize,
        name: &Atom,
        value: &Atom,
    ) -> Result<bool> {
        Ok(self.attr(*node, name.as_str()).is_some_and(|v| {
            v == value.as_str() || v.starts_with(&format!("{}-", value.as_str()))
        }))
    }

    fn node_has_attribute_includes(
        &self,
        node: &usize,
        name: &Atom,
        value: &Atom,
    ) -> Result<bool> {
        Ok(self
            .attr(*node, name.as_str())
            .is_some_and(|v| v.split_ascii_whitespace().any(|w| w == value.as_str())))
    }
}

/* ------------------------------------------------------------------ *
 * Helpers                                                            *
 * ------------------------------------------------------------------ */

fn parse_sheet(css: &str) -> Stylesheet {
    parse_sheet_with(css, Params::default())
}

fn parse_sheet_with(css: &str, params: Params) -> Stylesheet {
    let mut sheet = Stylesheet::new(params).expect("create sheet");
    match sheet.append_data(css.as_bytes()) {
        Ok(()) | Err(Error::NeedData) => {}
        Err(e) => panic!("append_data failed: {e}"),
    }
    sheet.data_done().expect("data_done");
    sheet
}

fn select(ctx: &SelectCtx, doc: &Doc, node: usize) -> ComputedStyle {
    select_media(ctx, doc, node, Media::SCREEN, PseudoClassSet::empty())
}

fn select_media(
    ctx: &SelectCtx,
    doc: &Doc,
    node: usize,
    media: Media,
    pseudo: PseudoClassSet,
) -> ComputedStyle {
    let mut computed = ComputedStyle::new();
    ctx.select_style(doc, &node, None, pseudo, media, &mut computed)
        .expect("selection");
    computed
}

fn ctx_of(sheets: Vec<Stylesheet>) -> SelectCtx {
    let mut ctx = SelectCtx::new();
    for sheet in sheets {
        ctx.append_sheet(Rc::new(sheet));
    }
    ctx
}

const RED: Colour = Colour::rgb(0xFF, 0, 0);
const GREEN: Colour = Colour::rgb(0, 0x80, 0);
const BLUE: Colour = Colour::rgb(0, 0, 0xFF);

fn px(v: i32) -> Length {
    Length::new(Fixed::from_int(v), Unit::Px)
}

/* ------------------------------------------------------------------ *
 * Scenarios                                                          *
 * ------------------------------------------------------------------ */

#[test]
fn simple_declaration_applies_to_matching_node() {
    let mut doc = Doc::default();
    let html = doc.elem("html", None);
    let body = doc.elem("body", Some(html));
    let p = doc.elem("p", Some(body));

    let ctx = ctx_of(vec![parse_sheet("p { color: red }")]);
    let style = select(&ctx, &doc, p);

    assert_eq!(style.color(), Some(RED));
    // Untouched properties remain at the inherit sentinel.
    assert_eq!(style.display(), None);

    // A body node does not match.
    let style = select(&ctx, &doc, body);
    assert_eq!(style.color(), None);
}

#[test]
fn important_user_declaration_beats_author() {
    let user = parse_sheet_with(
        "p { color: red !important }",
        Params {
            origin: Origin::User,
            ..Params::default()
        },
    );
    let author = parse_sheet("p { color: blue }");

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![user, author]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(RED));
}

#[test]
fn normal_author_beats_normal_user() {
    let user = parse_sheet_with(
        "p { color: red }",
        Params {
            origin: Origin::User,
            ..Params::default()
        },
    );
    let author = parse_sheet("p { color: blue }");

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![user, author]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(BLUE));
}

#[test]
fn equal_specificity_resolves_by_source_order() {
    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![parse_sheet("p { color: red } p { color: blue }")]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(BLUE));
}

#[test]
fn later_sheet_wins_equal_keys() {
    let first = parse_sheet("p { color: red }");
    let second = parse_sheet("p { color: blue }");

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![first, second]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(BLUE));
}

#[test]
fn higher_specificity_beats_source_order() {
    let mut doc = Doc::default();
    let p = doc.elem("p", None);
    doc.add_class(p, "warn");

    let ctx = ctx_of(vec![parse_sheet(".warn { color: blue } p { color: red }")]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(BLUE));
}

#[test]
fn descendant_combinator_requires_an_ancestor() {
    let sheet = parse_sheet("div p { color: green }");
    let ctx = ctx_of(vec![sheet]);

    // p inside a div (indirectly): matches.
    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    let span = doc.elem("span", Some(div));
    let p_in = doc.elem("p", Some(span));
    assert_eq!(select(&ctx, &doc, p_in).color(), Some(GREEN));

    // p with no div ancestor: the property stays inherit.
    let mut doc = Doc::default();
    let body = doc.elem("body", None);
    let p_out = doc.elem("p", Some(body));
    assert_eq!(select(&ctx, &doc, p_out).color(), None);
}

#[test]
fn child_combinator_requires_the_parent() {
    let ctx = ctx_of(vec![parse_sheet("div > p { color: green }")]);

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    let p_child = doc.elem("p", Some(div));
    assert_eq!(select(&ctx, &doc, p_child).color(), Some(GREEN));

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    let span = doc.elem("span", Some(div));
    let p_grandchild = doc.elem("p", Some(span));
    assert_eq!(select(&ctx, &doc, p_grandchild).color(), None);
}

#[test]
fn adjacent_sibling_combinator_requires_the_immediate_sibling() {
    let ctx = ctx_of(vec![parse_sheet("h1 + p { color: green }")]);

    let mut doc = Doc::default();
    let body = doc.elem("body", None);
    let _h1 = doc.elem("h1", Some(body));
    let p_adjacent = doc.elem("p", Some(body));
    assert_eq!(select(&ctx, &doc, p_adjacent).color(), Some(GREEN));

    let p_second = doc.elem("p", Some(body));
    assert_eq!(select(&ctx, &doc, p_second).color(), None);
}

#[test]
fn universal_selector_matches_everything() {
    let ctx = ctx_of(vec![parse_sheet("* { color: red }")]);

    let mut doc = Doc::default();
    let anything = doc.elem("blink", None);
    assert_eq!(select(&ctx, &doc, anything).color(), Some(RED));
}

#[test]
fn class_id_and_attribute_conditions() {
    let ctx = ctx_of(vec![parse_sheet(
        ".note { color: red } #main { color: green } a[href] { color: blue } \
         [lang|=en] { display: block } [rel~=next] { display: inline }",
    )]);

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    doc.add_class(div, "note");
    assert_eq!(select(&ctx, &doc, div).color(), Some(RED));

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    doc.set_id(div, "main");
    assert_eq!(select(&ctx, &doc, div).color(), Some(GREEN));

    let mut doc = Doc::default();
    let a = doc.elem("a", None);
    doc.set_attr(a, "href", "x");
    assert_eq!(select(&ctx, &doc, a).color(), Some(BLUE));

    let mut doc = Doc::default();
    let q = doc.elem("q", None);
    doc.set_attr(q, "lang", "en-GB");
    assert_eq!(select(&ctx, &doc, q).display(), Some(Display::Block));

    let mut doc = Doc::default();
    let link = doc.elem("link", None);
    doc.set_attr(link, "rel", "prev next index");
    assert_eq!(select(&ctx, &doc, link).display(), Some(Display::Inline));
}

#[test]
fn malformed_declaration_does_not_lose_its_neighbours() {
    let ctx = ctx_of(vec![parse_sheet(
        "p { color: red; foo bar baz; font-size: 12px }",
    )]);

    let mut doc = Doc::default();
    let p = doc.elem("p", None);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(RED));
    assert_eq!(style.font_size(), Some(FontSize::Length(px(12))));
}

#[test]
fn pending_import_participates_only_after_registration() {
    let mut parent = parse_sheet("@import url(\"a.css\"); p { color: red }");

    let (url, _) = parent.next_pending_import().expect("pending");
    assert_eq!(url.as_str(), "a.css");

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    // Before registration, only the author rule applies.
    let ctx = ctx_of(vec![parent]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(RED));
    assert_eq!(style.width(), None);

    // Re-claim the sheet, register the child, and select again.
    let rc = ctx.sheet(0).unwrap().clone();
    drop(ctx);
    let mut parent = Rc::try_unwrap(rc).ok().expect("sole owner");
    let child = Rc::new(parse_sheet("p { width: 10px }"));
    parent.register_import(child).unwrap();

    let ctx = ctx_of(vec![parent]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(RED));
    assert_eq!(style.width(), Some(AutoLength::Length(px(10))));
}

#[test]
fn importing_sheet_outranks_its_import_on_ties() {
    let mut parent = parse_sheet("@import url(\"a.css\"); p { color: red }");
    let child = Rc::new(parse_sheet("p { color: blue; letter-spacing: normal }"));
    parent.register_import(child).unwrap();

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![parent]);
    let style = select(&ctx, &doc, p);
    // The importing sheet's own rule wins the tie; the imported sheet
    // still contributes what the parent leaves alone.
    assert_eq!(style.color(), Some(RED));
    assert_eq!(style.letter_spacing(), Some(Spacing::Normal));
}

#[test]
fn media_rules_filter_by_active_media() {
    let ctx = ctx_of(vec![parse_sheet("@media print { p { color: red } }")]);

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let on_screen = select_media(&ctx, &doc, p, Media::SCREEN, PseudoClassSet::empty());
    assert_eq!(on_screen.color(), None);

    let on_print = select_media(&ctx, &doc, p, Media::PRINT, PseudoClassSet::empty());
    assert_eq!(on_print.color(), Some(RED));
}

#[test]
fn sheet_media_and_disabled_flag_gate_selection() {
    let print_only = parse_sheet_with(
        "p { color: red }",
        Params {
            media: Media::PRINT,
            ..Params::default()
        },
    );
    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![print_only]);
    assert_eq!(select(&ctx, &doc, p).color(), None);

    let mut disabled = parse_sheet("p { color: red }");
    disabled.set_disabled(true);
    let ctx = ctx_of(vec![disabled]);
    assert_eq!(select(&ctx, &doc, p).color(), None);
}

#[test]
fn dynamic_pseudo_classes_come_from_the_host_set() {
    let ctx = ctx_of(vec![parse_sheet("a:hover { color: red }")]);

    let mut doc = Doc::default();
    let a = doc.elem("a", None);

    let plain = select(&ctx, &doc, a);
    assert_eq!(plain.color(), None);

    let hovered = select_media(&ctx, &doc, a, Media::SCREEN, PseudoClassSet::HOVER);
    assert_eq!(hovered.color(), Some(RED));
}

#[test]
fn inline_origin_outranks_author_but_not_important() {
    let author = parse_sheet("p { color: blue; display: block !important }");
    let inline = parse_sheet_with(
        "p { color: red; display: inline }",
        Params {
            origin: Origin::Inline,
            ..Params::default()
        },
    );

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    // Order in the context should not matter for origin ranking.
    let ctx = ctx_of(vec![inline, author]);
    let style = select(&ctx, &doc, p);
    assert_eq!(style.color(), Some(RED));
    assert_eq!(style.display(), Some(Display::Block));
}

#[test]
fn important_author_beats_important_inline() {
    let author = parse_sheet("p { color: blue !important }");
    let inline = parse_sheet_with(
        "p { color: red !important; width: 10px !important }",
        Params {
            origin: Origin::Inline,
            ..Params::default()
        },
    );

    let mut doc = Doc::default();
    let p = doc.elem("p", None);

    let ctx = ctx_of(vec![inline, author]);
    let style = select(&ctx, &doc, p);
    // Important author outranks important inline; inline importance
    // still holds where the author sheet says nothing.
    assert_eq!(style.color(), Some(BLUE));
    assert_eq!(style.width(), Some(AutoLength::Length(px(10))));
}

#[test]
fn explicit_inherit_defers_to_composition() {
    let ctx = ctx_of(vec![parse_sheet(
        "div { color: green } p { color: inherit }",
    )]);

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    let p = doc.elem("p", Some(div));

    let parent_style = select(&ctx, &doc, div);
    let child_style = select(&ctx, &doc, p);
    assert_eq!(child_style.color(), None);

    let mut composed = ComputedStyle::new();
    ComputedStyle::compose(&parent_style, &child_style, &mut composed);
    assert_eq!(composed.color(), Some(GREEN));
}

#[test]
fn composition_resolves_unset_properties_from_the_parent() {
    let ctx = ctx_of(vec![parse_sheet("div { color: red } p { width: 10px }")]);

    let mut doc = Doc::default();
    let div = doc.elem("div", None);
    let p = doc.elem("p", Some(div));

    let parent_style = select(&ctx, &doc, div);
    let child_style = select(&ctx, &doc, p);

    let mut composed = ComputedStyle::new();
    ComputedStyle::compose(&parent_style, &child_style, &mut composed);
    assert_eq!(composed.color(), Some(RED));
    assert_eq!(composed.width(), Some(AutoLength::Length(px(10))));

    // Composing against a parent that also inherits keeps the
    // sentinel.
    let empty = ComputedStyle::new();
    let mut composed = ComputedStyle::new();
    ComputedStyle::compose(&empty, &child_style, &mut composed);
    assert_eq!(composed.color(), None);
}

#[test]
fn shorthand_expansion_sets_all_sides() {
    let ctx = ctx_of(vec![parse_sheet("p { margin: 1px 2px 3px }")]);

    let mut doc = Doc::default();
    let p = doc.elem("p", None);
    let style = select(&ctx, &doc, p);

    assert_eq!(style.margin_top(), Some(AutoLength::Length(px(1))));
    assert_eq!(style.margin_right(), Some(AutoLength::Length(px(2))));
    assert_eq!(style.margin_bottom(), Some(AutoLength::Length(px(3))));
    assert_eq!(style.margin_left(), Some(AutoLength::Length(px(2))));
}

#[test]
fn selector_grouping_shares_one_style() {
    let ctx = ctx_of(vec![parse_sheet("h1, h2, h3 { color: red }")]);

    let mut doc = Doc::default();
    let h2 = doc.elem("h2", None);
    assert_eq!(select(&ctx, &doc, h2).color(), Some(RED));
}

#[test]
fn computed_styles_serialize_for_inspection() {
    let ctx = ctx_of(vec![parse_sheet("p { color: red; display: block }")]);

    let mut doc = Doc::default();
    let p = doc.elem("p", None);
    let style = select(&ctx, &doc, p);

    let json = serde_json::to_value(&style).expect("serializable");
    assert_eq!(json["color"], serde_json::json!(0xFF00_00FFu32));
    assert_eq!(json["display"], serde_json::json!("Block"));
    // Inherit serializes as null; absent lazy blocks are omitted.
    assert!(json["width"].is_null());
    assert_eq!(json.get("aural"), None);
}

#[test]
fn element_name_matching_is_case_insensitive() {
    let ctx = ctx_of(vec![parse_sheet("P { color: red }")]);

    let mut doc = Doc::default();
    let p = doc.elem("P", None);
    assert_eq!(select(&ctx, &doc, p).color(), Some(RED));
    let lower = doc.elem("p", None);
    assert_eq!(select(&ctx, &doc, lower).color(), Some(RED));
}
