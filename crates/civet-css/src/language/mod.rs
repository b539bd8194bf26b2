//! The language binding: CSS 2.1 semantics over parser events.
//!
//! Consumes the grammar parser's structural events and builds the
//! stylesheet: selector lists become compiled chains registered in the
//! selector hash, declarations run through the per-property parsers into
//! bytecode, and the recognised at-rules (`@charset`, `@import`,
//! `@media`, `@page`, `@font-face`) become their rule variants, with the
//! CSS 2.1 ordering rules enforced (`@charset` first, `@import` before
//! any other rule).
//!
//! Inside an at-rule block the grammar parser flattens content into
//! `BLOCK_CONTENT` token runs; for `@media` each run before a nested
//! block is a child ruleset's selector prelude, and the runs inside the
//! nested block are its declarations.

pub(crate) mod properties;
pub(crate) mod selector;

use civet_common::warn_once;
use civet_intern::Atom;

use crate::bytecode::Style;
use crate::error::{Error, Result};
use crate::parser::{EventHandler, EventType};
use crate::selector::Selector;
use crate::stylesheet::{
    FontFaceRule, ImportRule, MediaRule, PageRule, Rule, SheetInner,
};
use crate::tokenizer::{Token, TokenType};
use crate::types::{CharsetSource, Media};

use properties::{PropertyContext, PropertyId, TokenCursor};

/// Sheet-level ordering state for at-rule acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetState {
    /// Nothing accepted yet; `@charset` is still allowed.
    BeforeCharset,
    /// Only `@charset` / `@import` accepted so far.
    BeforeRules,
    /// A real rule was accepted; `@charset` and `@import` are over.
    HadRules,
}

/// The recognised block-carrying at-rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtRuleKind {
    Media,
    Page,
    FontFace,
}

/// A ruleset under construction.
struct RuleBuilder {
    selectors: Vec<Selector>,
    style: Style,
}

/// Context while inside a block-carrying at-rule.
struct AtContext {
    kind: AtRuleKind,
    /// Reserved document-order index for the rule itself.
    rule_index: u32,
    media: Media,
    page_selector: Option<Atom>,
    /// Declarations of `@page` / `@font-face` blocks.
    style: Style,
    /// Child rules of `@media`.
    child_rules: Vec<Rule>,
    /// Tokens accumulated ahead of a nested block: a child ruleset's
    /// selector prelude.
    prelude: Vec<Token>,
    /// Nesting depth inside the at-rule (1 = its own block).
    depth: u32,
    cur_child: Option<RuleBuilder>,
}

/// The language-level consumer.
pub(crate) struct Language {
    state: SheetState,
    context: Vec<EventType>,
    cur: Option<RuleBuilder>,
    at: Option<AtContext>,
}

/// Pairs the language state with the sheet it populates, forming the
/// parser's event handler.
pub(crate) struct LanguageHandler<'a> {
    pub(crate) language: &'a mut Language,
    pub(crate) sheet: &'a mut SheetInner,
}

impl EventHandler for LanguageHandler<'_> {
    fn handle(&mut self, event: EventType, tokens: Option<&[Token]>) -> Result<()> {
        self.language.on_event(self.sheet, event, tokens)
    }
}

impl Language {
    pub(crate) fn new() -> Language {
        Language {
            state: SheetState::BeforeCharset,
            context: Vec::new(),
            cur: None,
            at: None,
        }
    }

    fn on_event(
        &mut self,
        sheet: &mut SheetInner,
        event: EventType,
        tokens: Option<&[Token]>,
    ) -> Result<()> {
        match event {
            EventType::StartStylesheet => {
                self.context.push(event);
                Ok(())
            }
            EventType::EndStylesheet => {
                match self.context.pop() {
                    Some(EventType::StartStylesheet) => Ok(()),
                    _ => Err(Error::Invalid),
                }
            }
            EventType::StartRuleset => self.on_start_ruleset(sheet, tokens),
            EventType::EndRuleset => self.on_end_ruleset(sheet),
            EventType::StartAtRule => self.on_start_at_rule(sheet, tokens),
            EventType::EndAtRule => self.on_end_at_rule(sheet),
            EventType::StartBlock => {
                self.on_start_block(sheet);
                Ok(())
            }
            EventType::EndBlock => {
                self.on_end_block(sheet);
                Ok(())
            }
            EventType::BlockContent => {
                self.on_block_content(sheet, tokens.unwrap_or(&[]));
                Ok(())
            }
            EventType::Declaration => {
                if let Some(tokens) = tokens {
                    self.on_declaration(sheet, tokens);
                }
                Ok(())
            }
        }
    }

    /* ------------------------------------------------------------ *
     * Rulesets                                                     *
     * ------------------------------------------------------------ */

    fn on_start_ruleset(
        &mut self,
        sheet: &mut SheetInner,
        tokens: Option<&[Token]>,
    ) -> Result<()> {
        let tokens = tokens.ok_or(Error::Invalid)?;
        let selectors = selector::parse_selector_list(&sheet.dict, tokens)?;

        self.state = SheetState::HadRules;
        self.cur = Some(RuleBuilder {
            selectors,
            style: Style::new(),
        });
        self.context.push(EventType::StartRuleset);
        Ok(())
    }

    fn on_end_ruleset(&mut self, sheet: &mut SheetInner) -> Result<()> {
        match self.context.pop() {
            Some(EventType::StartRuleset) => {}
            _ => return Err(Error::Invalid),
        }
        if let Some(builder) = self.cur.take() {
            let rule = sheet.add_selector_rule(builder.selectors, builder.style, Media::ALL);
            sheet.rules.push(rule);
        }
        Ok(())
    }

    fn on_declaration(&mut self, sheet: &mut SheetInner, tokens: &[Token]) {
        // Top-level declarations always belong to the open ruleset.
        let Some(builder) = self.cur.as_mut() else {
            return;
        };
        parse_one_declaration(sheet, tokens, &mut builder.style);
    }

    /* ------------------------------------------------------------ *
     * At-rules                                                     *
     * ------------------------------------------------------------ */

    fn on_start_at_rule(
        &mut self,
        sheet: &mut SheetInner,
        tokens: Option<&[Token]>,
    ) -> Result<()> {
        let tokens = tokens.ok_or(Error::Invalid)?;
        let mut v = TokenCursor::new(tokens);

        v.skip_ws();
        let keyword = v.next().ok_or(Error::Invalid)?;
        if keyword.ttype != TokenType::AtKeyword {
            return Err(Error::Invalid);
        }

        let result = match keyword.lower_text() {
            "charset" => self.at_charset(sheet, &mut v),
            "import" => self.at_import(sheet, &mut v),
            "media" => self.at_media(sheet, &mut v),
            "page" => self.at_page(sheet, &mut v),
            "font-face" => self.at_font_face(sheet, &mut v),
            other => {
                warn_once("language", &format!("discarding unknown at-rule '@{other}'"));
                Err(Error::Invalid)
            }
        };

        if result.is_ok() {
            self.context.push(EventType::StartAtRule);
        }
        result
    }

    fn on_end_at_rule(&mut self, sheet: &mut SheetInner) -> Result<()> {
        match self.context.pop() {
            Some(EventType::StartAtRule) => {}
            _ => return Err(Error::Invalid),
        }
        let Some(at) = self.at.take() else {
            // @charset / @import finished when they were accepted.
            return Ok(());
        };

        let rule = match at.kind {
            AtRuleKind::Media => Rule::Media(MediaRule {
                index: at.rule_index,
                media: at.media,
                rules: at.child_rules,
            }),
            AtRuleKind::Page => Rule::Page(PageRule {
                index: at.rule_index,
                selector: at.page_selector,
                style: at.style,
            }),
            AtRuleKind::FontFace => Rule::FontFace(FontFaceRule {
                index: at.rule_index,
                style: at.style,
            }),
        };
        sheet.rules.push(rule);
        Ok(())
    }

    /// `@charset "name";` — only before anything else in the sheet.
    fn at_charset(&mut self, sheet: &mut SheetInner, v: &mut TokenCursor<'_>) -> Result<()> {
        if self.state != SheetState::BeforeCharset {
            return Err(Error::Invalid);
        }

        v.skip_ws();
        let name = v.next().ok_or(Error::Invalid)?;
        if name.ttype != TokenType::String {
            return Err(Error::Invalid);
        }
        if !v.exhausted() {
            return Err(Error::Invalid);
        }
        let encoding = name.text().to_owned();

        // A dictated charset cannot be overridden; disagreement is an
        // encoding error, not a parse error.
        if sheet.charset_source == CharsetSource::Dictated {
            if !sheet
                .charset
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&encoding))
            {
                return Err(Error::BadCharset);
            }
        } else {
            sheet.charset = Some(encoding.clone());
            sheet.charset_source = CharsetSource::Document;
        }

        let index = sheet.next_rule_index();
        sheet.rules.push(Rule::Charset(crate::stylesheet::CharsetRule {
            index,
            encoding,
        }));
        self.state = SheetState::BeforeRules;
        Ok(())
    }

    /// `@import url("x") media*;` — before any non-charset/import rule.
    fn at_import(&mut self, sheet: &mut SheetInner, v: &mut TokenCursor<'_>) -> Result<()> {
        if self.state == SheetState::HadRules {
            return Err(Error::Invalid);
        }

        v.skip_ws();
        let url_tok = v.next().ok_or(Error::Invalid)?;
        if !matches!(url_tok.ttype, TokenType::String | TokenType::Uri) {
            return Err(Error::Invalid);
        }
        let url = url_tok.data.clone().ok_or(Error::Invalid)?;

        let media = parse_media_list(v)?.unwrap_or(Media::ALL);
        if !v.exhausted() {
            return Err(Error::Invalid);
        }

        let index = sheet.next_rule_index();
        sheet.rules.push(Rule::Import(ImportRule {
            index,
            url: url.clone(),
            media,
            sheet: None,
        }));
        self.state = SheetState::BeforeRules;

        if let Some(callback) = sheet.import_callback.as_mut() {
            callback(url.as_str(), media);
        }
        Ok(())
    }

    /// `@media medium [, medium]* { ... }`.
    fn at_media(&mut self, sheet: &mut SheetInner, v: &mut TokenCursor<'_>) -> Result<()> {
        let media = parse_media_list(v)?.ok_or(Error::Invalid)?;
        if !v.exhausted() {
            return Err(Error::Invalid);
        }

        self.state = SheetState::HadRules;
        self.at = Some(AtContext {
            kind: AtRuleKind::Media,
            rule_index: sheet.next_rule_index(),
            media,
            page_selector: None,
            style: Style::new(),
            child_rules: Vec::new(),
            prelude: Vec::new(),
            depth: 0,
            cur_child: None,
        });
        Ok(())
    }

    /// `@page [: IDENT]? { declarations }`.
    fn at_page(&mut self, sheet: &mut SheetInner, v: &mut TokenCursor<'_>) -> Result<()> {
        v.skip_ws();
        let mut page_selector = None;
        if v.peek().is_some_and(|t| t.is_char(':')) {
            let _ = v.next();
            let name = v.next().ok_or(Error::Invalid)?;
            if name.ttype != TokenType::Ident {
                return Err(Error::Invalid);
            }
            page_selector = Some(name.lower.clone().ok_or(Error::Invalid)?);
        }
        if !v.exhausted() {
            return Err(Error::Invalid);
        }

        self.state = SheetState::HadRules;
        self.at = Some(AtContext {
            kind: AtRuleKind::Page,
            rule_index: sheet.next_rule_index(),
            media: Media::ALL,
            page_selector,
            style: Style::new(),
            child_rules: Vec::new(),
            prelude: Vec::new(),
            depth: 0,
            cur_child: None,
        });
        Ok(())
    }

    /// `@font-face { descriptors }`.
    fn at_font_face(&mut self, sheet: &mut SheetInner, v: &mut TokenCursor<'_>) -> Result<()> {
        if !v.exhausted() {
            return Err(Error::Invalid);
        }

        self.state = SheetState::HadRules;
        self.at = Some(AtContext {
            kind: AtRuleKind::FontFace,
            rule_index: sheet.next_rule_index(),
            media: Media::ALL,
            page_selector: None,
            style: Style::new(),
            child_rules: Vec::new(),
            prelude: Vec::new(),
            depth: 0,
            cur_child: None,
        });
        Ok(())
    }

    /* ------------------------------------------------------------ *
     * Blocks                                                       *
     * ------------------------------------------------------------ */

    fn on_start_block(&mut self, sheet: &mut SheetInner) {
        let Some(at) = self.at.as_mut() else { return };
        at.depth += 1;

        if at.depth == 2 && at.kind == AtRuleKind::Media {
            // The tokens ahead of this block are the child ruleset's
            // selector prelude.
            let prelude = std::mem::take(&mut at.prelude);
            match selector::parse_selector_list(&sheet.dict, &prelude) {
                Ok(selectors) => {
                    at.cur_child = Some(RuleBuilder {
                        selectors,
                        style: Style::new(),
                    });
                }
                Err(_) => {
                    warn_once("language", "discarding ruleset with unparseable selector in @media");
                    at.cur_child = None;
                }
            }
        }
    }

    fn on_end_block(&mut self, sheet: &mut SheetInner) {
        let Some(at) = self.at.as_mut() else { return };

        if at.depth == 2
            && at.kind == AtRuleKind::Media
            && let Some(builder) = at.cur_child.take()
        {
            let media = at.media;
            let rule = sheet.add_selector_rule(builder.selectors, builder.style, media);
            at.child_rules.push(rule);
        }
        at.prelude.clear();
        at.depth = at.depth.saturating_sub(1);
    }

    fn on_block_content(&mut self, sheet: &mut SheetInner, tokens: &[Token]) {
        // Split borrows: the at-context's style is written while the
        // sheet provides dictionary and quirks flags.
        let Some(at) = self.at.as_mut() else { return };

        match (at.kind, at.depth) {
            (AtRuleKind::Media, 1) => {
                at.prelude.extend_from_slice(tokens);
            }
            (AtRuleKind::Media, 2) => {
                if let Some(builder) = at.cur_child.as_mut() {
                    parse_declaration_run(sheet, tokens, &mut builder.style);
                }
            }
            (AtRuleKind::Page | AtRuleKind::FontFace, 1) => {
                parse_declaration_run(sheet, tokens, &mut at.style);
            }
            _ => {}
        }
    }
}

/// Parse a single `property : value` token run into `style`.
///
/// Failures discard the declaration with a warning; the rule survives.
fn parse_one_declaration(sheet: &mut SheetInner, tokens: &[Token], style: &mut Style) {
    let mut v = TokenCursor::new(tokens);

    v.skip_ws();
    let Some(name) = v.next() else { return };
    if name.ttype != TokenType::Ident {
        warn_once(
            "property",
            &format!(
                "discarding declaration with non-identifier property at {}:{}",
                name.line, name.col
            ),
        );
        return;
    }

    let Some(id) = PropertyId::by_name(name.lower_text()) else {
        warn_once(
            "property",
            &format!(
                "discarding declaration for unknown property '{}' at {}:{}",
                name.text(),
                name.line,
                name.col
            ),
        );
        return;
    };

    v.skip_ws();
    match v.next() {
        Some(t) if t.is_char(':') => {}
        _ => {
            warn_once(
                "property",
                &format!("discarding declaration without ':' at {}:{}", name.line, name.col),
            );
            return;
        }
    }

    let mut ctx = PropertyContext {
        dict: &sheet.dict,
        quirks_allowed: sheet.quirks_allowed,
        quirks_used: false,
    };
    let result = properties::parse_value(id, &mut ctx, &mut v, style);
    sheet.quirks_used |= ctx.quirks_used;

    if result.is_err() {
        warn_once(
            "property",
            &format!(
                "discarding invalid value for '{}' at {}:{}",
                name.text(),
                name.line,
                name.col
            ),
        );
    }
}

/// Parse a `decl ; decl ; ...` token run (block content) into `style`.
fn parse_declaration_run(sheet: &mut SheetInner, tokens: &[Token], style: &mut Style) {
    for decl in tokens.split(|t| t.is_char(';')) {
        let significant = decl
            .iter()
            .any(|t| !matches!(t.ttype, TokenType::Whitespace | TokenType::Comment));
        if significant {
            parse_one_declaration(sheet, decl, style);
        }
    }
}

/// Parse `IDENT [, IDENT]*` into a media bitset. `Ok(None)` when the
/// cursor holds no media list at all.
fn parse_media_list(v: &mut TokenCursor<'_>) -> Result<Option<Media>> {
    v.skip_ws();
    if v.peek().is_none() {
        return Ok(None);
    }

    let mut media = Media::empty();
    loop {
        v.skip_ws();
        let t = v.next().ok_or(Error::Invalid)?;
        if t.ttype != TokenType::Ident {
            return Err(Error::Invalid);
        }
        media |= Media::from_css_name(t.lower_text()).ok_or(Error::Invalid)?;

        v.skip_ws();
        match v.peek() {
            Some(t) if t.is_char(',') => {
                let _ = v.next();
            }
            _ => break,
        }
    }
    Ok(Some(media))
}
