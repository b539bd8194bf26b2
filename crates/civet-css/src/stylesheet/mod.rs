//! The stylesheet store.
//!
//! A [`Stylesheet`] owns its rules in document order, the selector hash
//! that indexes their compiled chains, and the (possibly shared) string
//! dictionary. Parsing is chunk-driven: [`Stylesheet::append_data`]
//! feeds bytes and suspends with `NeedData`; [`Stylesheet::data_done`]
//! finishes the parse. `@import` processing yields to the host through
//! [`Stylesheet::next_pending_import`] / [`Stylesheet::register_import`].

use std::rc::Rc;

use civet_intern::{Atom, Dictionary};

use crate::bytecode::Style;
use crate::error::{Error, Result};
use crate::language::{Language as LanguageBinding, LanguageHandler};
use crate::parser::Parser;
use crate::select::hash::SelectorHash;
use crate::selector::Selector;
use crate::types::{CharsetSource, Language, Media, Origin};

/// Import-callback signature: invoked once per accepted `@import` with
/// the URL and its media set.
pub type ImportCallback = Box<dyn FnMut(&str, Media)>;

/// A style rule: a selector list sharing one compiled style.
pub struct SelectorRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// Media applicability inherited from an enclosing `@media` rule
    /// (`ALL` at top level).
    pub media: Media,
    /// The comma-separated selector chains, by their heads.
    pub selectors: Vec<Rc<Selector>>,
    /// The rule's compiled declarations.
    pub style: Style,
}

/// An accepted `@charset` rule.
pub struct CharsetRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// The declared encoding name.
    pub encoding: String,
}

/// An accepted `@import` rule.
pub struct ImportRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// The unresolved URL as written.
    pub url: Atom,
    /// The import's media set (`ALL` when unspecified).
    pub media: Media,
    /// The parsed child sheet, once the host registers it.
    pub sheet: Option<Rc<Stylesheet>>,
}

/// An accepted `@media` rule and its child rules.
pub struct MediaRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// The media set the children apply to.
    pub media: Media,
    /// Child rules in document order.
    pub rules: Vec<Rule>,
}

/// An accepted `@font-face` rule.
pub struct FontFaceRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// The descriptor block, compiled like any declaration list.
    pub style: Style,
}

/// An accepted `@page` rule.
pub struct PageRule {
    /// Stylesheet-local document-order index.
    pub index: u32,
    /// The page pseudo-selector (`:first`, `:left`, `:right`), if any.
    pub selector: Option<Atom>,
    /// The rule's compiled declarations.
    pub style: Style,
}

/// A stylesheet rule.
pub enum Rule {
    /// A selector list plus one style.
    Selector(Rc<SelectorRule>),
    /// `@charset`.
    Charset(CharsetRule),
    /// `@import`.
    Import(ImportRule),
    /// `@media` with child rules.
    Media(MediaRule),
    /// `@font-face`.
    FontFace(FontFaceRule),
    /// `@page`.
    Page(PageRule),
}

impl Rule {
    /// The rule's stylesheet-local index.
    #[must_use]
    pub fn index(&self) -> u32 {
        match self {
            Rule::Selector(r) => r.index,
            Rule::Charset(r) => r.index,
            Rule::Import(r) => r.index,
            Rule::Media(r) => r.index,
            Rule::FontFace(r) => r.index,
            Rule::Page(r) => r.index,
        }
    }
}

/// Creation parameters for a stylesheet.
pub struct Params {
    /// Language level; only [`Language::Css21`] is accepted.
    pub level: Language,
    /// Charset the input was transcoded from, if known.
    pub charset: Option<String>,
    /// Where that charset came from.
    pub charset_source: CharsetSource,
    /// The sheet's URL.
    pub url: String,
    /// The sheet's advisory title.
    pub title: Option<String>,
    /// Cascade origin.
    pub origin: Origin,
    /// Media this sheet applies to.
    pub media: Media,
    /// Permit quirky colour and length forms.
    pub allow_quirks: bool,
    /// Dictionary to intern into; a fresh one is created when absent.
    /// Share one dictionary per document for cross-sheet atom equality.
    pub dictionary: Option<Rc<Dictionary>>,
    /// Invoked once per accepted `@import`.
    pub import_callback: Option<ImportCallback>,
}

impl Default for Params {
    fn default() -> Params {
        Params {
            level: Language::Css21,
            charset: None,
            charset_source: CharsetSource::Default,
            url: String::new(),
            title: None,
            origin: Origin::Author,
            media: Media::ALL,
            allow_quirks: false,
            dictionary: None,
            import_callback: None,
        }
    }
}

/// The mutable body of a stylesheet, shared between the public API and
/// the language binding.
pub(crate) struct SheetInner {
    pub(crate) dict: Rc<Dictionary>,
    pub(crate) universal: Atom,
    pub(crate) rules: Vec<Rule>,
    pub(crate) hash: SelectorHash,
    pub(crate) origin: Origin,
    pub(crate) media: Media,
    pub(crate) disabled: bool,
    pub(crate) url: String,
    pub(crate) title: Option<String>,
    pub(crate) level: Language,
    pub(crate) quirks_allowed: bool,
    pub(crate) quirks_used: bool,
    pub(crate) charset: Option<String>,
    pub(crate) charset_source: CharsetSource,
    pub(crate) import_callback: Option<ImportCallback>,
    rule_counter: u32,
}

impl SheetInner {
    /// Claim the next document-order rule index.
    pub(crate) fn next_rule_index(&mut self) -> u32 {
        let index = self.rule_counter;
        self.rule_counter += 1;
        index
    }

    /// Build a selector rule: assign its index, fix up the chains'
    /// back-references, and register every chain in the hash.
    pub(crate) fn add_selector_rule(
        &mut self,
        selectors: Vec<Selector>,
        style: Style,
        media: Media,
    ) -> Rule {
        debug_assert!(!selectors.is_empty());
        let index = self.next_rule_index();

        let heads: Vec<Rc<Selector>> = selectors
            .into_iter()
            .map(|mut s| {
                s.rule_index = index;
                Rc::new(s)
            })
            .collect();

        let rule = Rc::new(SelectorRule {
            index,
            media,
            selectors: heads.clone(),
            style,
        });

        for head in heads {
            self.hash.insert(head, Rc::clone(&rule));
        }

        Rule::Selector(rule)
    }
}

/// The parser half of a sheet, dropped once parsing completes.
struct ParseHarness {
    parser: Parser,
    language: LanguageBinding,
}

/// A parsed (or parsing) stylesheet.
pub struct Stylesheet {
    pub(crate) inner: SheetInner,
    harness: Option<ParseHarness>,
}

impl Stylesheet {
    /// Create an empty stylesheet ready to receive data.
    ///
    /// # Errors
    ///
    /// `BadParm` for any language level other than CSS 2.1.
    pub fn new(params: Params) -> Result<Stylesheet> {
        if params.level != Language::Css21 {
            return Err(Error::BadParm);
        }

        let dict = params.dictionary.unwrap_or_default();
        let universal = dict.intern("*");

        let mut parser = Parser::new(
            Rc::clone(&dict),
            params.charset.as_deref(),
            params.charset_source,
        );
        parser.set_quirks(params.allow_quirks);

        Ok(Stylesheet {
            inner: SheetInner {
                dict,
                universal,
                rules: Vec::new(),
                hash: SelectorHash::new(),
                origin: params.origin,
                media: params.media,
                disabled: false,
                url: params.url,
                title: params.title,
                level: params.level,
                quirks_allowed: params.allow_quirks,
                quirks_used: false,
                charset: params.charset,
                charset_source: params.charset_source,
                import_callback: params.import_callback,
                rule_counter: 0,
            },
            harness: Some(ParseHarness {
                parser,
                language: LanguageBinding::new(),
            }),
        })
    }

    /// Append a chunk of source bytes and run the parser.
    ///
    /// # Errors
    ///
    /// `NeedData` when the parser blocked waiting for more input — the
    /// normal outcome; resume with another call. `BadParm` after
    /// [`Stylesheet::data_done`].
    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        let harness = self.harness.as_mut().ok_or(Error::BadParm)?;
        let mut handler = LanguageHandler {
            language: &mut harness.language,
            sheet: &mut self.inner,
        };
        harness.parser.parse_chunk(data, &mut handler)
    }

    /// Signal end of input and drain the parser.
    ///
    /// Succeeds even while imports are pending; the sheet simply still
    /// reports them.
    ///
    /// # Errors
    ///
    /// `BadParm` when called twice; otherwise only hard parser errors.
    pub fn data_done(&mut self) -> Result<()> {
        let mut harness = self.harness.take().ok_or(Error::BadParm)?;
        let mut handler = LanguageHandler {
            language: &mut harness.language,
            sheet: &mut self.inner,
        };
        harness.parser.completed(&mut handler)
    }

    /// The first `@import` not yet resolved by the host.
    #[must_use]
    pub fn next_pending_import(&self) -> Option<(&Atom, Media)> {
        self.inner.rules.iter().find_map(|r| match r {
            Rule::Import(i) if i.sheet.is_none() => Some((&i.url, i.media)),
            _ => None,
        })
    }

    /// Attach a parsed child sheet to the first pending `@import`.
    ///
    /// # Errors
    ///
    /// `Invalid` when no import is pending.
    pub fn register_import(&mut self, sheet: Rc<Stylesheet>) -> Result<()> {
        let slot = self.inner.rules.iter_mut().find_map(|r| match r {
            Rule::Import(i) if i.sheet.is_none() => Some(i),
            _ => None,
        });
        match slot {
            Some(import) => {
                import.sheet = Some(sheet);
                Ok(())
            }
            None => Err(Error::Invalid),
        }
    }

    /// Remove a top-level rule by index, unregistering any selectors it
    /// contributed to the hash.
    ///
    /// # Errors
    ///
    /// `Invalid` when no top-level rule carries `index`.
    pub fn remove_rule(&mut self, index: u32) -> Result<()> {
        let pos = self
            .inner
            .rules
            .iter()
            .position(|r| r.index() == index)
            .ok_or(Error::Invalid)?;
        if matches!(self.inner.rules[pos], Rule::Selector(_)) {
            self.inner.hash.remove_rule(index);
        }
        let _ = self.inner.rules.remove(pos);
        Ok(())
    }

    /// The rules in document order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.inner.rules
    }

    /// Number of top-level rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.inner.rules.len()
    }

    /// The sheet's URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// The sheet's advisory title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.inner.title.as_deref()
    }

    /// The sheet's cascade origin.
    #[must_use]
    pub fn origin(&self) -> Origin {
        self.inner.origin
    }

    /// The media this sheet applies to.
    #[must_use]
    pub fn media(&self) -> Media {
        self.inner.media
    }

    /// The sheet's language level.
    #[must_use]
    pub fn language(&self) -> Language {
        self.inner.level
    }

    /// Whether the sheet is excluded from selection.
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.inner.disabled
    }

    /// Exclude or include the sheet in selection.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.inner.disabled = disabled;
    }

    /// Whether quirky parsing was permitted.
    #[must_use]
    pub fn quirks_allowed(&self) -> bool {
        self.inner.quirks_allowed
    }

    /// Whether any quirk was actually needed.
    #[must_use]
    pub fn quirks_used(&self) -> bool {
        self.inner.quirks_used
    }

    /// The effective charset and where it came from.
    #[must_use]
    pub fn charset(&self) -> (Option<&str>, CharsetSource) {
        (self.inner.charset.as_deref(), self.inner.charset_source)
    }

    /// The dictionary this sheet interns into.
    #[must_use]
    pub fn dictionary(&self) -> &Rc<Dictionary> {
        &self.inner.dict
    }
}
