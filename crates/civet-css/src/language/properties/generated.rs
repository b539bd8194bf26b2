//! Generated content and list properties.

use civet_intern::Atom;

use super::utils::{
    keyword_property, lookup_keyword, parse_important, parse_number_token, try_inherit,
    uri_property,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::tokenizer::TokenType;

const LIST_STYLE_TYPE_KEYWORDS: &[(&str, u16)] = &[
    ("disc", bc::LIST_STYLE_TYPE_DISC),
    ("circle", bc::LIST_STYLE_TYPE_CIRCLE),
    ("square", bc::LIST_STYLE_TYPE_SQUARE),
    ("decimal", bc::LIST_STYLE_TYPE_DECIMAL),
    ("decimal-leading-zero", bc::LIST_STYLE_TYPE_DECIMAL_LEADING_ZERO),
    ("lower-roman", bc::LIST_STYLE_TYPE_LOWER_ROMAN),
    ("upper-roman", bc::LIST_STYLE_TYPE_UPPER_ROMAN),
    ("lower-greek", bc::LIST_STYLE_TYPE_LOWER_GREEK),
    ("lower-latin", bc::LIST_STYLE_TYPE_LOWER_LATIN),
    ("upper-latin", bc::LIST_STYLE_TYPE_UPPER_LATIN),
    ("armenian", bc::LIST_STYLE_TYPE_ARMENIAN),
    ("georgian", bc::LIST_STYLE_TYPE_GEORGIAN),
    ("lower-alpha", bc::LIST_STYLE_TYPE_LOWER_ALPHA),
    ("upper-alpha", bc::LIST_STYLE_TYPE_UPPER_ALPHA),
    ("none", bc::LIST_STYLE_TYPE_NONE),
];

pub(super) fn parse_list_style_type(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::ListStyleType, 0, LIST_STYLE_TYPE_KEYWORDS, v, style)
}

pub(super) fn parse_list_style_position(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::ListStylePosition,
        0,
        &[
            ("inside", bc::LIST_STYLE_POSITION_INSIDE),
            ("outside", bc::LIST_STYLE_POSITION_OUTSIDE),
        ],
        v,
        style,
    )
}

pub(super) fn parse_list_style_image(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    uri_property(
        Opcode::ListStyleImage,
        bc::LIST_STYLE_IMAGE_URI,
        &[("none", bc::LIST_STYLE_IMAGE_NONE)],
        v,
        style,
    )
}

/// `list-style` shorthand: `[type || position || image] | inherit`.
/// `none` is ambiguous between type and image; it resolves to type
/// unless the type slot is taken.
pub(super) fn parse_list_style(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for op in [
            Opcode::ListStyleType,
            Opcode::ListStylePosition,
            Opcode::ListStyleImage,
        ] {
            style.push_opv(Opv::new(op, flags, 0));
        }
        return Ok(());
    }

    let mut ltype: Option<u16> = None;
    let mut position: Option<u16> = None;
    let mut image: Option<(u16, Option<Atom>)> = None;
    let mut seen_any = false;

    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        match t.ttype {
            TokenType::Ident => {
                let name = t.lower_text();
                if position.is_none()
                    && let Some(value) = lookup_keyword(
                        &[
                            ("inside", bc::LIST_STYLE_POSITION_INSIDE),
                            ("outside", bc::LIST_STYLE_POSITION_OUTSIDE),
                        ],
                        name,
                    )
                {
                    let _ = v.next();
                    position = Some(value);
                    seen_any = true;
                    continue;
                }
                if name == "none" && ltype.is_some() && image.is_none() {
                    let _ = v.next();
                    image = Some((bc::LIST_STYLE_IMAGE_NONE, None));
                    seen_any = true;
                    continue;
                }
                if ltype.is_none()
                    && let Some(value) = lookup_keyword(LIST_STYLE_TYPE_KEYWORDS, name)
                {
                    let _ = v.next();
                    ltype = Some(value);
                    seen_any = true;
                    continue;
                }
                return Err(Error::Invalid);
            }
            TokenType::Uri if image.is_none() => {
                let url = t.data.clone().ok_or(Error::Invalid)?;
                let _ = v.next();
                image = Some((bc::LIST_STYLE_IMAGE_URI, Some(url)));
                seen_any = true;
            }
            _ => return Err(Error::Invalid),
        }
    }

    if !seen_any {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    if let Some(value) = ltype {
        style.push_opv(Opv::new(Opcode::ListStyleType, flags, value));
    }
    if let Some(value) = position {
        style.push_opv(Opv::new(Opcode::ListStylePosition, flags, value));
    }
    if let Some((value, url)) = image {
        style.push_opv(Opv::new(Opcode::ListStyleImage, flags, value));
        if let Some(url) = url {
            style.push_string(url);
        }
    }
    Ok(())
}

/// One item of a `content` list.
enum ContentItem {
    String(Atom),
    Uri(Atom),
    Attr(Atom),
    Counter(Atom, u16),
    Counters(Atom, Atom, u16),
    Keyword(u16),
}

/// Parse `counter(name, style?)` / `counters(name, sep, style?)` bodies
/// after the function token.
fn parse_counter_function(
    v: &mut TokenCursor<'_>,
    with_separator: bool,
) -> Result<(Atom, Option<Atom>, u16)> {
    v.skip_ws();
    let name_tok = v.next().ok_or(Error::Invalid)?;
    if name_tok.ttype != TokenType::Ident {
        return Err(Error::Invalid);
    }
    let name = name_tok.data.clone().ok_or(Error::Invalid)?;

    let mut separator = None;
    if with_separator {
        v.skip_ws();
        match v.next() {
            Some(t) if t.is_char(',') => {}
            _ => return Err(Error::Invalid),
        }
        v.skip_ws();
        match v.next() {
            Some(t) if t.ttype == TokenType::String => {
                separator = Some(t.data.clone().ok_or(Error::Invalid)?);
            }
            _ => return Err(Error::Invalid),
        }
    }

    v.skip_ws();
    let mut counter_style = bc::LIST_STYLE_TYPE_DECIMAL;
    if v.peek().is_some_and(|t| t.is_char(',')) {
        let _ = v.next();
        v.skip_ws();
        let t = v.next().ok_or(Error::Invalid)?;
        if t.ttype != TokenType::Ident {
            return Err(Error::Invalid);
        }
        counter_style =
            lookup_keyword(LIST_STYLE_TYPE_KEYWORDS, t.lower_text()).ok_or(Error::Invalid)?;
    }

    v.skip_ws();
    match v.next() {
        Some(t) if t.is_char(')') => Ok((name, separator, counter_style)),
        _ => Err(Error::Invalid),
    }
}

/// `content: normal | none | [string | uri | counter | counters | attr |
/// open-quote | close-quote | no-open-quote | no-close-quote]+ |
/// inherit`.
pub(super) fn parse_content(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let simple = if t.is_ident("inherit") {
            Some((FLAG_INHERIT, 0))
        } else if t.is_ident("normal") {
            Some((0, bc::CONTENT_NORMAL))
        } else if t.is_ident("none") {
            Some((0, bc::CONTENT_NONE))
        } else {
            None
        };
        if let Some((inherit, value)) = simple {
            let _ = v.next();
            let flags = inherit | parse_important(v)?;
            style.push_opv(Opv::new(Opcode::Content, flags, value));
            return Ok(());
        }
    }

    let mut items: Vec<ContentItem> = Vec::new();
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        match t.ttype {
            TokenType::String => {
                items.push(ContentItem::String(t.data.clone().ok_or(Error::Invalid)?));
                let _ = v.next();
            }
            TokenType::Uri => {
                items.push(ContentItem::Uri(t.data.clone().ok_or(Error::Invalid)?));
                let _ = v.next();
            }
            TokenType::Ident => {
                let value = match t.lower_text() {
                    "open-quote" => bc::CONTENT_OPEN_QUOTE,
                    "close-quote" => bc::CONTENT_CLOSE_QUOTE,
                    "no-open-quote" => bc::CONTENT_NO_OPEN_QUOTE,
                    "no-close-quote" => bc::CONTENT_NO_CLOSE_QUOTE,
                    _ => return Err(Error::Invalid),
                };
                items.push(ContentItem::Keyword(value));
                let _ = v.next();
            }
            TokenType::Function => {
                let name = t.lower_text().to_owned();
                let _ = v.next();
                match name.as_str() {
                    "attr" => {
                        v.skip_ws();
                        let attr = v.next().ok_or(Error::Invalid)?;
                        if attr.ttype != TokenType::Ident {
                            return Err(Error::Invalid);
                        }
                        let attr_name = attr.data.clone().ok_or(Error::Invalid)?;
                        v.skip_ws();
                        match v.next() {
                            Some(t) if t.is_char(')') => {}
                            _ => return Err(Error::Invalid),
                        }
                        items.push(ContentItem::Attr(attr_name));
                    }
                    "counter" => {
                        let (name, _, cstyle) = parse_counter_function(v, false)?;
                        items.push(ContentItem::Counter(name, cstyle));
                    }
                    "counters" => {
                        let (name, sep, cstyle) = parse_counter_function(v, true)?;
                        items.push(ContentItem::Counters(
                            name,
                            sep.ok_or(Error::Invalid)?,
                            cstyle,
                        ));
                    }
                    _ => return Err(Error::Invalid),
                }
            }
            _ => return Err(Error::Invalid),
        }
    }

    if items.is_empty() {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    for item in &items {
        let kind = match item {
            ContentItem::String(_) => bc::CONTENT_STRING,
            ContentItem::Uri(_) => bc::CONTENT_URI,
            ContentItem::Attr(_) => bc::CONTENT_ATTR,
            ContentItem::Counter(..) => bc::CONTENT_COUNTER,
            ContentItem::Counters(..) => bc::CONTENT_COUNTERS,
            ContentItem::Keyword(value) => *value,
        };
        style.push_opv(Opv::new(Opcode::Content, flags, kind));
        match item {
            ContentItem::String(s) | ContentItem::Uri(s) | ContentItem::Attr(s) => {
                style.push_string(s.clone());
            }
            ContentItem::Counter(name, cstyle) => {
                style.push_string(name.clone());
                style.push_word(u32::from(*cstyle));
            }
            ContentItem::Counters(name, sep, cstyle) => {
                style.push_string(name.clone());
                style.push_string(sep.clone());
                style.push_word(u32::from(*cstyle));
            }
            ContentItem::Keyword(_) => {}
        }
    }
    // The list terminator.
    style.push_opv(Opv::new(Opcode::Content, flags, bc::CONTENT_NORMAL));
    Ok(())
}

/// Shared body for `counter-increment` / `counter-reset`:
/// `[IDENT <integer>?]+ | none | inherit`, encoded as (name, delta)
/// pairs terminated by `COUNTER_NONE`.
fn counter_property(
    op: Opcode,
    default_delta: i32,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident && (t.is_ident("inherit") || t.is_ident("none")) {
        let inherit = if t.is_ident("inherit") { FLAG_INHERIT } else { 0 };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(op, flags, bc::COUNTER_NONE));
        return Ok(());
    }

    let mut items: Vec<(Atom, Fixed)> = Vec::new();
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        if t.ttype != TokenType::Ident {
            return Err(Error::Invalid);
        }
        let name = t.data.clone().ok_or(Error::Invalid)?;
        let _ = v.next();

        v.skip_ws();
        let delta = match v.peek() {
            Some(n) if n.ttype == TokenType::Number => parse_number_token(v, true)?,
            _ => Fixed::from_int(default_delta),
        };
        items.push((name, delta));
    }

    if items.is_empty() {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    for (name, delta) in items {
        style.push_opv(Opv::new(op, flags, bc::COUNTER_NAMED));
        style.push_string(name);
        style.push_fixed(delta);
    }
    style.push_opv(Opv::new(op, flags, bc::COUNTER_NONE));
    Ok(())
}

pub(super) fn parse_counter_increment(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    counter_property(Opcode::CounterIncrement, 1, v, style)
}

pub(super) fn parse_counter_reset(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    counter_property(Opcode::CounterReset, 0, v, style)
}

/// `quotes: [<string> <string>]+ | none | inherit`, encoded as
/// open/close pairs terminated by `QUOTES_NONE`.
pub(super) fn parse_quotes(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident && (t.is_ident("inherit") || t.is_ident("none")) {
        let inherit = if t.is_ident("inherit") { FLAG_INHERIT } else { 0 };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Quotes, flags, bc::QUOTES_NONE));
        return Ok(());
    }

    let mut pairs: Vec<(Atom, Atom)> = Vec::new();
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        if t.ttype != TokenType::String {
            return Err(Error::Invalid);
        }
        let open = t.data.clone().ok_or(Error::Invalid)?;
        let _ = v.next();

        v.skip_ws();
        let close_tok = v.next().ok_or(Error::Invalid)?;
        if close_tok.ttype != TokenType::String {
            return Err(Error::Invalid);
        }
        let close = close_tok.data.clone().ok_or(Error::Invalid)?;
        pairs.push((open, close));
    }

    if pairs.is_empty() {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    for (open, close) in pairs {
        style.push_opv(Opv::new(Opcode::Quotes, flags, bc::QUOTES_STRING));
        style.push_string(open);
        style.push_string(close);
    }
    style.push_opv(Opv::new(Opcode::Quotes, flags, bc::QUOTES_NONE));
    Ok(())
}

const CURSOR_KEYWORDS: &[(&str, u16)] = &[
    ("auto", bc::CURSOR_AUTO),
    ("crosshair", bc::CURSOR_CROSSHAIR),
    ("default", bc::CURSOR_DEFAULT),
    ("pointer", bc::CURSOR_POINTER),
    ("move", bc::CURSOR_MOVE),
    ("e-resize", bc::CURSOR_E_RESIZE),
    ("ne-resize", bc::CURSOR_NE_RESIZE),
    ("nw-resize", bc::CURSOR_NW_RESIZE),
    ("n-resize", bc::CURSOR_N_RESIZE),
    ("se-resize", bc::CURSOR_SE_RESIZE),
    ("sw-resize", bc::CURSOR_SW_RESIZE),
    ("s-resize", bc::CURSOR_S_RESIZE),
    ("w-resize", bc::CURSOR_W_RESIZE),
    ("text", bc::CURSOR_TEXT),
    ("wait", bc::CURSOR_WAIT),
    ("help", bc::CURSOR_HELP),
    ("progress", bc::CURSOR_PROGRESS),
];

/// `cursor: [uri ,]* keyword | inherit`. URI items continue the list;
/// the mandatory trailing keyword terminates it.
pub(super) fn parse_cursor(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Cursor, flags, 0));
        return Ok(());
    }

    let mut uris: Vec<Atom> = Vec::new();
    let keyword;
    loop {
        v.skip_ws();
        let t = v.next().ok_or(Error::Invalid)?;
        match t.ttype {
            TokenType::Uri => {
                uris.push(t.data.clone().ok_or(Error::Invalid)?);
                v.skip_ws();
                match v.next() {
                    Some(t) if t.is_char(',') => {}
                    _ => return Err(Error::Invalid),
                }
            }
            TokenType::Ident => {
                keyword =
                    lookup_keyword(CURSOR_KEYWORDS, t.lower_text()).ok_or(Error::Invalid)?;
                break;
            }
            _ => return Err(Error::Invalid),
        }
    }

    let flags = parse_important(v)?;
    for uri in uris {
        style.push_opv(Opv::new(Opcode::Cursor, flags, bc::CURSOR_URI));
        style.push_string(uri);
    }
    style.push_opv(Opv::new(Opcode::Cursor, flags, keyword));
    Ok(())
}
