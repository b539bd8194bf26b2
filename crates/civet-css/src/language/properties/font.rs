//! Font properties.

use civet_intern::Atom;

use super::utils::{keyword_property, length_property, lookup_keyword, parse_important, try_inherit};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::tokenizer::TokenType;

const FONT_STYLE_KEYWORDS: &[(&str, u16)] = &[
    ("normal", bc::FONT_STYLE_NORMAL),
    ("italic", bc::FONT_STYLE_ITALIC),
    ("oblique", bc::FONT_STYLE_OBLIQUE),
];

const FONT_VARIANT_KEYWORDS: &[(&str, u16)] = &[
    ("normal", bc::FONT_VARIANT_NORMAL),
    ("small-caps", bc::FONT_VARIANT_SMALL_CAPS),
];

const FONT_SIZE_KEYWORDS: &[(&str, u16)] = &[
    ("xx-small", bc::FONT_SIZE_XX_SMALL),
    ("x-small", bc::FONT_SIZE_X_SMALL),
    ("small", bc::FONT_SIZE_SMALL),
    ("medium", bc::FONT_SIZE_MEDIUM),
    ("large", bc::FONT_SIZE_LARGE),
    ("x-large", bc::FONT_SIZE_X_LARGE),
    ("xx-large", bc::FONT_SIZE_XX_LARGE),
    ("larger", bc::FONT_SIZE_LARGER),
    ("smaller", bc::FONT_SIZE_SMALLER),
];

pub(super) fn parse_font_style(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::FontStyle, 0, FONT_STYLE_KEYWORDS, v, style)
}

pub(super) fn parse_font_variant(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::FontVariant, 0, FONT_VARIANT_KEYWORDS, v, style)
}

pub(super) fn parse_font_size(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::FontSize,
        0,
        bc::FONT_SIZE_DIMENSION,
        FONT_SIZE_KEYWORDS,
        true,
        false,
        ctx,
        v,
        style,
    )
}

/// Map a `font-weight` token to its discriminant: the keywords, or one
/// of the nine multiple-of-100 numbers.
fn font_weight_value(v: &mut TokenCursor<'_>) -> Result<u16> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    match t.ttype {
        TokenType::Ident => lookup_keyword(
            &[
                ("normal", bc::FONT_WEIGHT_NORMAL),
                ("bold", bc::FONT_WEIGHT_BOLD),
                ("bolder", bc::FONT_WEIGHT_BOLDER),
                ("lighter", bc::FONT_WEIGHT_LIGHTER),
            ],
            t.lower_text(),
        )
        .ok_or(Error::Invalid),
        TokenType::Number => match t.text() {
            "100" => Ok(bc::FONT_WEIGHT_100),
            "200" => Ok(bc::FONT_WEIGHT_200),
            "300" => Ok(bc::FONT_WEIGHT_300),
            "400" => Ok(bc::FONT_WEIGHT_400),
            "500" => Ok(bc::FONT_WEIGHT_500),
            "600" => Ok(bc::FONT_WEIGHT_600),
            "700" => Ok(bc::FONT_WEIGHT_700),
            "800" => Ok(bc::FONT_WEIGHT_800),
            "900" => Ok(bc::FONT_WEIGHT_900),
            _ => Err(Error::Invalid),
        },
        _ => Err(Error::Invalid),
    }
}

pub(super) fn parse_font_weight(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::FontWeight, flags, 0));
        return Ok(());
    }
    let value = font_weight_value(v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::FontWeight, flags, value));
    Ok(())
}

/// One family item: a generic keyword, a quoted string, or a run of
/// identifiers joined by single spaces.
enum Family {
    Generic(u16),
    Quoted(Atom),
    Idents(Atom),
}

const GENERIC_FAMILIES: &[(&str, u16)] = &[
    ("serif", bc::FONT_FAMILY_SERIF),
    ("sans-serif", bc::FONT_FAMILY_SANS_SERIF),
    ("cursive", bc::FONT_FAMILY_CURSIVE),
    ("fantasy", bc::FONT_FAMILY_FANTASY),
    ("monospace", bc::FONT_FAMILY_MONOSPACE),
];

/// Parse one comma-separated family item.
fn parse_family_item(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<Family> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;

    match t.ttype {
        TokenType::String => Ok(Family::Quoted(t.data.clone().ok_or(Error::Invalid)?)),
        TokenType::Ident => {
            // A single identifier may be a generic family; several in a
            // row are an unquoted name.
            let mut parts = vec![t.text().to_owned()];
            loop {
                v.skip_ws();
                match v.peek() {
                    Some(n) if n.ttype == TokenType::Ident => {
                        parts.push(n.text().to_owned());
                        let _ = v.next();
                    }
                    _ => break,
                }
            }
            if parts.len() == 1
                && let Some(value) = lookup_keyword(GENERIC_FAMILIES, t.lower_text())
            {
                return Ok(Family::Generic(value));
            }
            Ok(Family::Idents(ctx.dict.intern(&parts.join(" "))))
        }
        _ => Err(Error::Invalid),
    }
}

/// Parse the comma-separated family list shared by `font-family` and
/// the tail of the `font` shorthand.
fn parse_family_list(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<Vec<Family>> {
    let mut families = vec![parse_family_item(ctx, v)?];
    loop {
        v.skip_ws();
        match v.peek() {
            Some(t) if t.is_char(',') => {
                let _ = v.next();
                families.push(parse_family_item(ctx, v)?);
            }
            _ => break,
        }
    }
    Ok(families)
}

/// Emit a family list: head OPV carries the first item's kind, each
/// subsequent item gets its own OPV, and `FONT_FAMILY_END` terminates.
fn emit_family_list(style: &mut Style, flags: u8, families: &[Family]) {
    for family in families {
        let (kind, atom) = match family {
            Family::Generic(value) => (*value, None),
            Family::Quoted(atom) => (bc::FONT_FAMILY_STRING, Some(atom.clone())),
            Family::Idents(atom) => (bc::FONT_FAMILY_IDENT_LIST, Some(atom.clone())),
        };
        style.push_opv(Opv::new(Opcode::FontFamily, flags, kind));
        if let Some(atom) = atom {
            style.push_string(atom);
        }
    }
    style.push_opv(Opv::new(Opcode::FontFamily, flags, bc::FONT_FAMILY_END));
}

pub(super) fn parse_font_family(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::FontFamily, flags, 0));
        return Ok(());
    }

    let families = parse_family_list(ctx, v)?;
    let flags = parse_important(v)?;
    emit_family_list(style, flags, &families);
    Ok(())
}

/// `font` shorthand:
/// `[style || variant || weight]? size [/ line-height]? family`.
/// System-font keywords are not supported and fail as invalid.
pub(super) fn parse_font(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for op in [
            Opcode::FontStyle,
            Opcode::FontVariant,
            Opcode::FontWeight,
            Opcode::FontSize,
            Opcode::LineHeight,
            Opcode::FontFamily,
        ] {
            style.push_opv(Opv::new(op, flags, 0));
        }
        return Ok(());
    }

    let mut style_kw: Option<u16> = None;
    let mut variant: Option<u16> = None;
    let mut weight: Option<u16> = None;

    // Leading style/variant/weight keywords, any order. 'normal' is a
    // member of several of these; assign it to the first free slot.
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else {
            return Err(Error::Invalid);
        };
        match t.ttype {
            TokenType::Ident => {
                let name = t.lower_text();
                if name == "normal" {
                    let _ = v.next();
                    if style_kw.is_none() {
                        style_kw = Some(bc::FONT_STYLE_NORMAL);
                    } else if variant.is_none() {
                        variant = Some(bc::FONT_VARIANT_NORMAL);
                    } else if weight.is_none() {
                        weight = Some(bc::FONT_WEIGHT_NORMAL);
                    } else {
                        return Err(Error::Invalid);
                    }
                    continue;
                }
                if style_kw.is_none()
                    && let Some(value) = lookup_keyword(FONT_STYLE_KEYWORDS, name)
                {
                    let _ = v.next();
                    style_kw = Some(value);
                    continue;
                }
                if variant.is_none() && name == "small-caps" {
                    let _ = v.next();
                    variant = Some(bc::FONT_VARIANT_SMALL_CAPS);
                    continue;
                }
                if weight.is_none()
                    && let Some(value) = lookup_keyword(
                        &[
                            ("bold", bc::FONT_WEIGHT_BOLD),
                            ("bolder", bc::FONT_WEIGHT_BOLDER),
                            ("lighter", bc::FONT_WEIGHT_LIGHTER),
                        ],
                        name,
                    )
                {
                    let _ = v.next();
                    weight = Some(value);
                    continue;
                }
                break;
            }
            TokenType::Number => {
                let save = v.pos();
                if weight.is_none()
                    && let Ok(value) = font_weight_value(v)
                {
                    weight = Some(value);
                    continue;
                }
                v.set_pos(save);
                break;
            }
            _ => break,
        }
    }

    // Mandatory font-size.
    v.skip_ws();
    let size_token = v.peek().ok_or(Error::Invalid)?;
    let size: (u16, Option<(crate::fixed::Fixed, crate::types::Unit)>) =
        if size_token.ttype == TokenType::Ident {
            let value = lookup_keyword(FONT_SIZE_KEYWORDS, size_token.lower_text())
                .ok_or(Error::Invalid)?;
            let _ = v.next();
            (value, None)
        } else {
            let (val, unit) = super::utils::parse_length(ctx, v, true, false)?;
            (bc::FONT_SIZE_DIMENSION, Some((val, unit)))
        };

    // Optional '/ line-height'.
    v.skip_ws();
    let mut line_height: Option<(u16, Vec<u32>)> = None;
    if v.peek().is_some_and(|t| t.is_char('/')) {
        let _ = v.next();
        v.skip_ws();
        let t = v.peek().ok_or(Error::Invalid)?;
        if t.is_ident("normal") {
            let _ = v.next();
            line_height = Some((bc::LINE_HEIGHT_NORMAL, Vec::new()));
        } else if t.ttype == TokenType::Number {
            let text = t.text();
            let (val, consumed) = crate::fixed::number_from_string(text, false);
            if consumed != text.len() || val.is_negative() {
                return Err(Error::Invalid);
            }
            let _ = v.next();
            line_height = Some((bc::LINE_HEIGHT_NUMBER, vec![val.raw()]));
        } else {
            let (val, unit) = super::utils::parse_length(ctx, v, true, false)?;
            line_height = Some((
                bc::LINE_HEIGHT_DIMENSION,
                vec![val.raw(), unit.to_bits()],
            ));
        }
    }

    // Mandatory family list.
    let families = parse_family_list(ctx, v)?;
    let flags = parse_important(v)?;

    style.push_opv(Opv::new(
        Opcode::FontStyle,
        flags,
        style_kw.unwrap_or(bc::FONT_STYLE_NORMAL),
    ));
    style.push_opv(Opv::new(
        Opcode::FontVariant,
        flags,
        variant.unwrap_or(bc::FONT_VARIANT_NORMAL),
    ));
    style.push_opv(Opv::new(
        Opcode::FontWeight,
        flags,
        weight.unwrap_or(bc::FONT_WEIGHT_NORMAL),
    ));

    style.push_opv(Opv::new(Opcode::FontSize, flags, size.0));
    if let Some((val, unit)) = size.1 {
        style.push_fixed(val);
        style.push_unit(unit);
    }

    let (lh_value, lh_words) =
        line_height.unwrap_or((bc::LINE_HEIGHT_NORMAL, Vec::new()));
    style.push_opv(Opv::new(Opcode::LineHeight, flags, lh_value));
    for word in lh_words {
        style.push_word(word);
    }

    emit_family_list(style, flags, &families);
    Ok(())
}
