//! CSS 2.1 engine: tokenizer, parser, bytecode compiler, and style
//! selection for the civet project.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: the CSS 2.1 lexical grammar with interned token
//!   text, resumable across input chunks.
//! - **Grammar parser**: an iterative push-down automaton over the
//!   CSS 2.1 generic grammar, emitting structural events with
//!   spec-mandated error recovery (malformed declarations, selectors,
//!   and at-rules are consumed, not fatal).
//! - **Language binding**: selector compilation, the recognised
//!   at-rules (`@charset`, `@import`, `@media`, `@page`, `@font-face`),
//!   and per-property value parsing into compact 32-bit bytecode.
//! - **Stylesheet store**: rules in document order, a selector hash
//!   keyed by rightmost element name, and host-driven `@import`
//!   resolution.
//! - **Selection**: matching compiled selector chains against a
//!   host-supplied node interface, cascading matched declarations by
//!   (importance, origin, specificity, source order), and populating a
//!   typed computed-style record with parent⇄child composition.
//!
//! # Usage sketch
//!
//! ```no_run
//! use std::rc::Rc;
//! use civet_css::{Params, SelectCtx, Stylesheet};
//!
//! let mut sheet = Stylesheet::new(Params::default()).unwrap();
//! match sheet.append_data(b"p { color: red }") {
//!     Ok(()) | Err(civet_css::Error::NeedData) => {}
//!     Err(e) => panic!("parse failed: {e}"),
//! }
//! sheet.data_done().unwrap();
//!
//! let mut ctx = SelectCtx::new();
//! ctx.append_sheet(Rc::new(sheet));
//! // ctx.select_style(...) with a NodeHandler implementation.
//! ```
//!
//! # Not implemented
//!
//! - Charset autodetection and transcoding (input is decoded by the
//!   host; the engine records charset names only).
//! - Fetching of `@import` sheets (pending imports are surfaced to the
//!   host, which registers parsed child sheets).
//! - CSS 3 modules; language levels other than CSS 2.1 are rejected at
//!   sheet creation.

pub mod bytecode;
mod error;
pub mod fixed;
mod language;
pub mod parser;
pub mod select;
pub mod selector;
pub mod stream;
pub mod style;
pub mod stylesheet;
pub mod tokenizer;
pub mod types;

pub use error::{Error, Result};
pub use select::{NodeHandler, SelectCtx};
pub use style::ComputedStyle;
pub use stylesheet::{ImportCallback, Params, Rule, Stylesheet};
pub use types::{
    CharsetSource, Colour, Language, Length, Media, Origin, PseudoClassSet, PseudoElement, Unit,
};

pub use civet_intern::{Atom, Dictionary};
