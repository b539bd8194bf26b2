//! Shared machinery for property parsers: the trailing-important
//! parser, colour and unit specifiers, keyword tables, and the
//! missing-sides replication used by box shorthands.

use super::{PropertyContext, TokenCursor};
use crate::bytecode::{FLAG_IMPORTANT, FLAG_INHERIT, Opcode, Opv, SIDE_BOTTOM, SIDE_LEFT,
    SIDE_RIGHT, SIDE_TOP, Style};
use crate::error::{Error, Result};
use crate::fixed::{Fixed, number_from_string};
use crate::tokenizer::TokenType;
use crate::types::{Colour, Unit};

/// The four box sides in shorthand expansion order.
pub(super) const SIDES: [u16; 4] = [SIDE_TOP, SIDE_RIGHT, SIDE_BOTTOM, SIDE_LEFT];

/// Parse the optional trailing `!important`.
///
/// Consumes trailing whitespace either way. Anything else left on the
/// cursor is a grammar error.
pub(super) fn parse_important(v: &mut TokenCursor<'_>) -> Result<u8> {
    v.skip_ws();
    let Some(t) = v.peek() else { return Ok(0) };

    if !t.is_char('!') {
        return Err(Error::Invalid);
    }
    let _ = v.next();
    v.skip_ws();

    match v.next() {
        Some(t) if t.is_ident("important") => {
            v.skip_ws();
            Ok(FLAG_IMPORTANT)
        }
        _ => Err(Error::Invalid),
    }
}

/// Look a lowercased keyword up in a table.
pub(super) fn lookup_keyword(table: &[(&str, u16)], name: &str) -> Option<u16> {
    table.iter().find(|(kw, _)| *kw == name).map(|(_, v)| *v)
}

/// Parse a property whose grammar is `IDENT(keyword...) | inherit`.
pub(super) fn keyword_property(
    op: Opcode,
    side: u16,
    table: &[(&str, u16)],
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    if t.ttype != TokenType::Ident {
        return Err(Error::Invalid);
    }

    let (inherit, value) = if t.is_ident("inherit") {
        (FLAG_INHERIT, 0)
    } else {
        (0, lookup_keyword(table, t.lower_text()).ok_or(Error::Invalid)?)
    };

    let flags = inherit | parse_important(v)?;
    style.push_opv(Opv::new(op, flags, value | side));
    Ok(())
}

/// Whether the next significant token is the `inherit` keyword; if so,
/// consume it.
pub(super) fn try_inherit(v: &mut TokenCursor<'_>) -> bool {
    v.skip_ws();
    if v.peek().is_some_and(|t| t.is_ident("inherit")) {
        let _ = v.next();
        return true;
    }
    false
}

/* -------------------------------------------------------------------- *
 * Numbers and units                                                    *
 * -------------------------------------------------------------------- */

/// Parse a bare number token into fixed point. The token's whole text
/// must be numeric.
pub(super) fn parse_number_token(v: &mut TokenCursor<'_>, int_only: bool) -> Result<Fixed> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    if t.ttype != TokenType::Number {
        return Err(Error::Invalid);
    }
    let text = t.text();
    let (val, consumed) = number_from_string(text, int_only);
    if consumed != text.len() {
        return Err(Error::Invalid);
    }
    Ok(val)
}

/// Parse a dimension, percentage, or bare number into `(value, unit)`.
///
/// A bare `0` takes `default_unit`. A bare non-zero number is a quirk:
/// accepted only when the sheet allows quirks, and recorded as used.
pub(super) fn parse_unit_specifier(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    default_unit: Unit,
) -> Result<(Fixed, Unit)> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    match t.ttype {
        TokenType::Dimension => {
            let text = t.text();
            let (val, consumed) = number_from_string(text, false);
            if consumed == 0 || consumed == text.len() {
                return Err(Error::Invalid);
            }
            let unit: Unit = text[consumed..].parse().map_err(|_| Error::Invalid)?;
            Ok((val, unit))
        }
        TokenType::Number => {
            let text = t.text();
            let (val, consumed) = number_from_string(text, false);
            if consumed != text.len() {
                return Err(Error::Invalid);
            }
            if val != Fixed::ZERO {
                if !ctx.quirks_allowed {
                    return Err(Error::Invalid);
                }
                ctx.quirks_used = true;
            }
            Ok((val, default_unit))
        }
        TokenType::Percentage => {
            let text = t.text();
            let (val, consumed) = number_from_string(text, false);
            if consumed != text.len() {
                return Err(Error::Invalid);
            }
            Ok((val, Unit::Pct))
        }
        _ => Err(Error::Invalid),
    }
}

/// Parse a length (optionally percentage) with a negativity check.
pub(super) fn parse_length(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    allow_pct: bool,
    allow_negative: bool,
) -> Result<(Fixed, Unit)> {
    let (val, unit) = parse_unit_specifier(ctx, v, Unit::Px)?;
    if !unit.is_length() && !(allow_pct && unit.is_percentage()) {
        return Err(Error::Invalid);
    }
    if !allow_negative && val.is_negative() {
        return Err(Error::Invalid);
    }
    Ok((val, unit))
}

/// Parse an angle dimension (`deg`, `grad`, `rad`).
pub(super) fn parse_angle(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<(Fixed, Unit)> {
    let (val, unit) = parse_unit_specifier(ctx, v, Unit::Deg)?;
    if !unit.is_angle() {
        return Err(Error::Invalid);
    }
    Ok((val, unit))
}

/// Parse a non-negative time (`s`, `ms`) or percentage.
pub(super) fn parse_time_or_pct(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<(Fixed, Unit)> {
    let (val, unit) = parse_unit_specifier(ctx, v, Unit::S)?;
    if !unit.is_time() && !unit.is_percentage() {
        return Err(Error::Invalid);
    }
    if val.is_negative() {
        return Err(Error::Invalid);
    }
    Ok((val, unit))
}

/// Parse a frequency dimension (`hz`, `khz`).
pub(super) fn parse_frequency(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<(Fixed, Unit)> {
    let (val, unit) = parse_unit_specifier(ctx, v, Unit::Hz)?;
    if !unit.is_frequency() || val.is_negative() {
        return Err(Error::Invalid);
    }
    Ok((val, unit))
}

/* -------------------------------------------------------------------- *
 * Colours                                                              *
 * -------------------------------------------------------------------- */

/// Parse a colour: named, `#rgb`/`#rrggbb`, `rgb(...)`, or — in quirks
/// mode only — a bare hex-shaped ident, number, or dimension.
pub(super) fn parse_colour_specifier(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<Colour> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    match t.ttype {
        TokenType::Ident => {
            if let Some(c) = named_colour(t.lower_text()) {
                return Ok(c);
            }
            if ctx.quirks_allowed {
                if let Some(c) = hash_colour(t.text()) {
                    ctx.quirks_used = true;
                    return Ok(c);
                }
            }
            Err(Error::Invalid)
        }
        TokenType::Hash => hash_colour(t.text()).ok_or(Error::Invalid),
        TokenType::Number | TokenType::Dimension if ctx.quirks_allowed => {
            let c = hash_colour(t.text()).ok_or(Error::Invalid)?;
            ctx.quirks_used = true;
            Ok(c)
        }
        TokenType::Function if t.lower_text() == "rgb" => parse_rgb_args(v),
        _ => Err(Error::Invalid),
    }
}

/// `rgb(n, n, n)` or `rgb(p%, p%, p%)` — the three components must all
/// use the same form. The function token itself is already consumed.
fn parse_rgb_args(v: &mut TokenCursor<'_>) -> Result<Colour> {
    let mut components = [0u8; 3];
    let mut form: Option<TokenType> = None;

    for (i, slot) in components.iter_mut().enumerate() {
        v.skip_ws();
        let t = v.next().ok_or(Error::Invalid)?;
        if !matches!(t.ttype, TokenType::Number | TokenType::Percentage) {
            return Err(Error::Invalid);
        }
        match form {
            None => form = Some(t.ttype),
            Some(f) if f == t.ttype => {}
            Some(_) => return Err(Error::Invalid),
        }

        let text = t.text();
        let (val, consumed) = number_from_string(text, false);
        if consumed != text.len() {
            return Err(Error::Invalid);
        }
        let intval = if t.ttype == TokenType::Number {
            val.to_int()
        } else {
            val.mul_int(255).div_int(100).to_int()
        };
        *slot = intval.clamp(0, 255) as u8;

        v.skip_ws();
        let sep = v.next().ok_or(Error::Invalid)?;
        let want = if i < 2 { ',' } else { ')' };
        if !sep.is_char(want) {
            return Err(Error::Invalid);
        }
    }

    Ok(Colour::rgb(components[0], components[1], components[2]))
}

/// Decode a 3- or 6-hex-digit colour body (no leading `#`).
pub(super) fn hash_colour(text: &str) -> Option<Colour> {
    let bytes = text.as_bytes();
    let hex = |b: u8| (b as char).to_digit(16).map(|d| d as u8);
    match bytes {
        [r, g, b] => {
            let (r, g, b) = (hex(*r)?, hex(*g)?, hex(*b)?);
            Some(Colour::rgb(r * 0x11, g * 0x11, b * 0x11))
        }
        [r1, r2, g1, g2, b1, b2] => Some(Colour::rgb(
            hex(*r1)? * 16 + hex(*r2)?,
            hex(*g1)? * 16 + hex(*g2)?,
            hex(*b1)? * 16 + hex(*b2)?,
        )),
        _ => None,
    }
}

/// The named-colour table (lowercased names).
#[allow(clippy::too_many_lines)]
pub(super) fn named_colour(name: &str) -> Option<Colour> {
    let rgb = |v: u32| {
        Some(Colour::rgb(
            (v >> 16) as u8,
            (v >> 8) as u8,
            v as u8,
        ))
    };
    match name {
        "aliceblue" => rgb(0xf0f8ff),
        "antiquewhite" => rgb(0xfaebd7),
        "aqua" => rgb(0x00ffff),
        "aquamarine" => rgb(0x7fffd4),
        "azure" => rgb(0xf0ffff),
        "beige" => rgb(0xf5f5dc),
        "bisque" => rgb(0xffe4c4),
        "black" => rgb(0x000000),
        "blanchedalmond" => rgb(0xffebcd),
        "blue" => rgb(0x0000ff),
        "blueviolet" => rgb(0x8a2be2),
        "brown" => rgb(0xa52a2a),
        "burlywood" => rgb(0xdeb887),
        "cadetblue" => rgb(0x5f9ea0),
        "chartreuse" => rgb(0x7fff00),
        "chocolate" => rgb(0xd2691e),
        "coral" => rgb(0xff7f50),
        "cornflowerblue" => rgb(0x6495ed),
        "cornsilk" => rgb(0xfff8dc),
        "crimson" => rgb(0xdc143c),
        "cyan" => rgb(0x00ffff),
        "darkblue" => rgb(0x00008b),
        "darkcyan" => rgb(0x008b8b),
        "darkgoldenrod" => rgb(0xb8860b),
        "darkgray" => rgb(0xa9a9a9),
        "darkgreen" => rgb(0x006400),
        "darkgrey" => rgb(0xa9a9a9),
        "darkkhaki" => rgb(0xbdb76b),
        "darkmagenta" => rgb(0x8b008b),
        "darkolivegreen" => rgb(0x556b2f),
        "darkorange" => rgb(0xff8c00),
        "darkorchid" => rgb(0x9932cc),
        "darkred" => rgb(0x8b0000),
        "darksalmon" => rgb(0xe9967a),
        "darkseagreen" => rgb(0x8fbc8f),
        "darkslateblue" => rgb(0x483d8b),
        "darkslategray" => rgb(0x2f4f4f),
        "darkslategrey" => rgb(0x2f4f4f),
        "darkturquoise" => rgb(0x00ced1),
        "darkviolet" => rgb(0x9400d3),
        "deeppink" => rgb(0xff1493),
        "deepskyblue" => rgb(0x00bfff),
        "dimgray" => rgb(0x696969),
        "dimgrey" => rgb(0x696969),
        "dodgerblue" => rgb(0x1e90ff),
        "firebrick" => rgb(0xb22222),
        "floralwhite" => rgb(0xfffaf0),
        "forestgreen" => rgb(0x228b22),
        "fuchsia" => rgb(0xff00ff),
        "gainsboro" => rgb(0xdcdcdc),
        "ghostwhite" => rgb(0xf8f8ff),
        "gold" => rgb(0xffd700),
        "goldenrod" => rgb(0xdaa520),
        "gray" => rgb(0x808080),
        "green" => rgb(0x008000),
        "greenyellow" => rgb(0xadff2f),
        "grey" => rgb(0x808080),
        "honeydew" => rgb(0xf0fff0),
        "hotpink" => rgb(0xff69b4),
        "indianred" => rgb(0xcd5c5c),
        "indigo" => rgb(0x4b0082),
        "ivory" => rgb(0xfffff0),
        "khaki" => rgb(0xf0e68c),
        "lavender" => rgb(0xe6e6fa),
        "lavenderblush" => rgb(0xfff0f5),
        "lawngreen" => rgb(0x7cfc00),
        "lemonchiffon" => rgb(0xfffacd),
        "lightblue" => rgb(0xadd8e6),
        "lightcoral" => rgb(0xf08080),
        "lightcyan" => rgb(0xe0ffff),
        "lightgoldenrodyellow" => rgb(0xfafad2),
        "lightgray" => rgb(0xd3d3d3),
        "lightgreen" => rgb(0x90ee90),
        "lightgrey" => rgb(0xd3d3d3),
        "lightpink" => rgb(0xffb6c1),
        "lightsalmon" => rgb(0xffa07a),
        "lightseagreen" => rgb(0x20b2aa),
        "lightskyblue" => rgb(0x87cefa),
        "lightslategray" => rgb(0x778899),
        "lightslategrey" => rgb(0x778899),
        "lightsteelblue" => rgb(0xb0c4de),
        "lightyellow" => rgb(0xffffe0),
        "lime" => rgb(0x00ff00),
        "limegreen" => rgb(0x32cd32),
        "linen" => rgb(0xfaf0e6),
        "magenta" => rgb(0xff00ff),
        "maroon" => rgb(0x800000),
        "mediumaquamarine" => rgb(0x66cdaa),
        "mediumblue" => rgb(0x0000cd),
        "mediumorchid" => rgb(0xba55d3),
        "mediumpurple" => rgb(0x9370db),
        "mediumseagreen" => rgb(0x3cb371),
        "mediumslateblue" => rgb(0x7b68ee),
        "mediumspringgreen" => rgb(0x00fa9a),
        "mediumturquoise" => rgb(0x48d1cc),
        "mediumvioletred" => rgb(0xc71585),
        "midnightblue" => rgb(0x191970),
        "mintcream" => rgb(0xf5fffa),
        "mistyrose" => rgb(0xffe4e1),
        "moccasin" => rgb(0xffe4b5),
        "navajowhite" => rgb(0xffdead),
        "navy" => rgb(0x000080),
        "oldlace" => rgb(0xfdf5e6),
        "olive" => rgb(0x808000),
        "olivedrab" => rgb(0x6b8e23),
        "orange" => rgb(0xffa500),
        "orangered" => rgb(0xff4500),
        "orchid" => rgb(0xda70d6),
        "palegoldenrod" => rgb(0xeee8aa),
        "palegreen" => rgb(0x98fb98),
        "paleturquoise" => rgb(0xafeeee),
        "palevioletred" => rgb(0xdb7093),
        "papayawhip" => rgb(0xffefd5),
        "peachpuff" => rgb(0xffdab9),
        "peru" => rgb(0xcd853f),
        "pink" => rgb(0xffc0cb),
        "plum" => rgb(0xdda0dd),
        "powderblue" => rgb(0xb0e0e6),
        "purple" => rgb(0x800080),
        "red" => rgb(0xff0000),
        "rosybrown" => rgb(0xbc8f8f),
        "royalblue" => rgb(0x4169e1),
        "saddlebrown" => rgb(0x8b4513),
        "salmon" => rgb(0xfa8072),
        "sandybrown" => rgb(0xf4a460),
        "seagreen" => rgb(0x2e8b57),
        "seashell" => rgb(0xfff5ee),
        "sienna" => rgb(0xa0522d),
        "silver" => rgb(0xc0c0c0),
        "skyblue" => rgb(0x87ceeb),
        "slateblue" => rgb(0x6a5acd),
        "slategray" => rgb(0x708090),
        "slategrey" => rgb(0x708090),
        "snow" => rgb(0xfffafa),
        "springgreen" => rgb(0x00ff7f),
        "steelblue" => rgb(0x4682b4),
        "tan" => rgb(0xd2b48c),
        "teal" => rgb(0x008080),
        "thistle" => rgb(0xd8bfd8),
        "tomato" => rgb(0xff6347),
        "turquoise" => rgb(0x40e0d0),
        "violet" => rgb(0xee82ee),
        "wheat" => rgb(0xf5deb3),
        "white" => rgb(0xffffff),
        "whitesmoke" => rgb(0xf5f5f5),
        "yellow" => rgb(0xffff00),
        "yellowgreen" => rgb(0x9acd32),
        _ => None,
    }
}

/* -------------------------------------------------------------------- *
 * Whole-property shapes                                                *
 * -------------------------------------------------------------------- */

/// Parse a property whose grammar is
/// `<length> | <percentage>? | IDENT(keyword...) | inherit`, emitting
/// `set_value` plus a (fixed, unit) pair for the dimensional form.
pub(super) fn length_property(
    op: Opcode,
    side: u16,
    set_value: u16,
    keywords: &[(&str, u16)],
    allow_pct: bool,
    allow_negative: bool,
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else {
            (0, lookup_keyword(keywords, t.lower_text()).ok_or(Error::Invalid)?)
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(op, flags, value | side));
        return Ok(());
    }

    let (val, unit) = parse_length(ctx, v, allow_pct, allow_negative)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(op, flags, set_value | side));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

/// Parse a property whose grammar is
/// `<colour> | IDENT(keyword...) | inherit`, emitting `set_value` plus a
/// colour word for the colour form.
pub(super) fn colour_property(
    op: Opcode,
    side: u16,
    set_value: u16,
    keywords: &[(&str, u16)],
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        if t.is_ident("inherit") {
            let _ = v.next();
            let flags = FLAG_INHERIT | parse_important(v)?;
            style.push_opv(Opv::new(op, flags, side));
            return Ok(());
        }
        if let Some(value) = lookup_keyword(keywords, t.lower_text()) {
            let _ = v.next();
            let flags = parse_important(v)?;
            style.push_opv(Opv::new(op, flags, value | side));
            return Ok(());
        }
        // Fall through: named colours are identifiers too.
    }

    let colour = parse_colour_specifier(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(op, flags, set_value | side));
    style.push_colour(colour);
    Ok(())
}

/// Parse a property whose grammar is `URI | IDENT(keyword) | inherit`,
/// emitting `uri_value` plus a string reference for the URI form.
pub(super) fn uri_property(
    op: Opcode,
    uri_value: u16,
    keywords: &[(&str, u16)],
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;

    match t.ttype {
        TokenType::Ident => {
            let (inherit, value) = if t.is_ident("inherit") {
                (FLAG_INHERIT, 0)
            } else {
                (0, lookup_keyword(keywords, t.lower_text()).ok_or(Error::Invalid)?)
            };
            let flags = inherit | parse_important(v)?;
            style.push_opv(Opv::new(op, flags, value));
            Ok(())
        }
        TokenType::Uri => {
            let url = t.data.clone().ok_or(Error::Invalid)?;
            let flags = parse_important(v)?;
            style.push_opv(Opv::new(op, flags, uri_value));
            style.push_string(url);
            Ok(())
        }
        _ => Err(Error::Invalid),
    }
}

/* -------------------------------------------------------------------- *
 * Shorthand replication                                                *
 * -------------------------------------------------------------------- */

/// Apply the CSS missing-sides rule: one value applies to all sides, two
/// to vertical/horizontal, three to top/horizontal/bottom.
pub(super) fn replicate_sides<T: Copy>(values: &[T]) -> Option<[T; 4]> {
    match values {
        [a] => Some([*a, *a, *a, *a]),
        [a, b] => Some([*a, *b, *a, *b]),
        [a, b, c] => Some([*a, *b, *c, *b]),
        [a, b, c, d] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}
