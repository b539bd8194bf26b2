//! Border and outline properties.

use super::utils::{
    SIDES, colour_property, keyword_property, length_property, lookup_keyword, parse_colour_specifier,
    parse_important, parse_length, replicate_sides, try_inherit,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::tokenizer::TokenType;
use crate::types::{Colour, Unit};

const BORDER_STYLE_KEYWORDS: &[(&str, u16)] = &[
    ("none", bc::BORDER_STYLE_NONE),
    ("hidden", bc::BORDER_STYLE_HIDDEN),
    ("dotted", bc::BORDER_STYLE_DOTTED),
    ("dashed", bc::BORDER_STYLE_DASHED),
    ("solid", bc::BORDER_STYLE_SOLID),
    ("double", bc::BORDER_STYLE_DOUBLE),
    ("groove", bc::BORDER_STYLE_GROOVE),
    ("ridge", bc::BORDER_STYLE_RIDGE),
    ("inset", bc::BORDER_STYLE_INSET),
    ("outset", bc::BORDER_STYLE_OUTSET),
];

/// Outline style is border style minus `hidden`.
const OUTLINE_STYLE_KEYWORDS: &[(&str, u16)] = &[
    ("none", bc::BORDER_STYLE_NONE),
    ("dotted", bc::BORDER_STYLE_DOTTED),
    ("dashed", bc::BORDER_STYLE_DASHED),
    ("solid", bc::BORDER_STYLE_SOLID),
    ("double", bc::BORDER_STYLE_DOUBLE),
    ("groove", bc::BORDER_STYLE_GROOVE),
    ("ridge", bc::BORDER_STYLE_RIDGE),
    ("inset", bc::BORDER_STYLE_INSET),
    ("outset", bc::BORDER_STYLE_OUTSET),
];

const BORDER_WIDTH_KEYWORDS: &[(&str, u16)] = &[
    ("thin", bc::BORDER_WIDTH_THIN),
    ("medium", bc::BORDER_WIDTH_MEDIUM),
    ("thick", bc::BORDER_WIDTH_THICK),
];

const TRANSPARENT_KEYWORD: &[(&str, u16)] = &[("transparent", bc::BORDER_COLOR_TRANSPARENT)];

pub(super) fn parse_border_side_color(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    colour_property(
        Opcode::BorderTrblColor,
        side,
        bc::BORDER_COLOR_SET,
        TRANSPARENT_KEYWORD,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_border_side_style(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    keyword_property(Opcode::BorderTrblStyle, side, BORDER_STYLE_KEYWORDS, v, style)
}

pub(super) fn parse_border_side_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    // Border widths take lengths only; percentages are not in the
    // grammar, and negatives are rejected.
    length_property(
        Opcode::BorderTrblWidth,
        side,
        bc::BORDER_WIDTH_SET,
        BORDER_WIDTH_KEYWORDS,
        false,
        false,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_outline_color(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    colour_property(
        Opcode::OutlineColor,
        0,
        bc::OUTLINE_COLOR_SET,
        &[("invert", bc::OUTLINE_COLOR_INVERT)],
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_outline_style(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::OutlineStyle, 0, OUTLINE_STYLE_KEYWORDS, v, style)
}

pub(super) fn parse_outline_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::OutlineWidth,
        0,
        bc::BORDER_WIDTH_SET,
        BORDER_WIDTH_KEYWORDS,
        false,
        false,
        ctx,
        v,
        style,
    )
}

/// One component of a width/style/colour triple.
#[derive(Clone, Copy)]
enum SideComponent {
    WidthKeyword(u16),
    Width(Fixed, Unit),
    Style(u16),
    Colour(u16, Option<Colour>),
}

/// Parse one `width || style || colour` component, trying each aspect
/// the caller has not yet seen.
fn parse_side_component(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    want_width: bool,
    want_style: bool,
    want_colour: bool,
    colour_keywords: &[(&str, u16)],
    colour_set: u16,
) -> Result<SideComponent> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let name = t.lower_text();
        if want_width {
            if let Some(value) = lookup_keyword(BORDER_WIDTH_KEYWORDS, name) {
                let _ = v.next();
                return Ok(SideComponent::WidthKeyword(value));
            }
        }
        if want_style {
            if let Some(value) = lookup_keyword(BORDER_STYLE_KEYWORDS, name) {
                let _ = v.next();
                return Ok(SideComponent::Style(value));
            }
        }
        if want_colour {
            if let Some(value) = lookup_keyword(colour_keywords, name) {
                let _ = v.next();
                return Ok(SideComponent::Colour(value, None));
            }
        }
    }

    if want_width && matches!(t.ttype, TokenType::Dimension | TokenType::Number) {
        let save = v.pos();
        match parse_length(ctx, v, false, false) {
            Ok((val, unit)) => return Ok(SideComponent::Width(val, unit)),
            Err(_) => v.set_pos(save),
        }
    }

    if want_colour {
        let colour = parse_colour_specifier(ctx, v)?;
        return Ok(SideComponent::Colour(colour_set, Some(colour)));
    }

    Err(Error::Invalid)
}

/// Emit the longhand OPVs a side-shorthand produced for one box side.
fn emit_side_components(
    style: &mut Style,
    flags: u8,
    side: u16,
    width: Option<SideComponent>,
    style_kw: Option<u16>,
    colour: Option<(u16, Option<Colour>)>,
) {
    match width {
        Some(SideComponent::WidthKeyword(value)) => {
            style.push_opv(Opv::new(Opcode::BorderTrblWidth, flags, value | side));
        }
        Some(SideComponent::Width(val, unit)) => {
            style.push_opv(Opv::new(
                Opcode::BorderTrblWidth,
                flags,
                bc::BORDER_WIDTH_SET | side,
            ));
            style.push_fixed(val);
            style.push_unit(unit);
        }
        _ => {}
    }
    if let Some(value) = style_kw {
        style.push_opv(Opv::new(Opcode::BorderTrblStyle, flags, value | side));
    }
    if let Some((value, c)) = colour {
        style.push_opv(Opv::new(Opcode::BorderTrblColor, flags, value | side));
        if let Some(c) = c {
            style.push_colour(c);
        }
    }
}

/// Body shared by `border` and `border-{side}`: parse up to one each of
/// width, style, and colour, in any order.
fn border_side_shorthand(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    sides: &[u16],
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for &side in sides {
            style.push_opv(Opv::new(Opcode::BorderTrblWidth, flags, side));
            style.push_opv(Opv::new(Opcode::BorderTrblStyle, flags, side));
            style.push_opv(Opv::new(Opcode::BorderTrblColor, flags, side));
        }
        return Ok(());
    }

    let mut width: Option<SideComponent> = None;
    let mut style_kw: Option<u16> = None;
    let mut colour: Option<(u16, Option<Colour>)> = None;
    let mut seen_any = false;

    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        let component = parse_side_component(
            ctx,
            v,
            width.is_none(),
            style_kw.is_none(),
            colour.is_none(),
            TRANSPARENT_KEYWORD,
            bc::BORDER_COLOR_SET,
        )?;
        seen_any = true;
        match component {
            SideComponent::WidthKeyword(_) | SideComponent::Width(..) => width = Some(component),
            SideComponent::Style(value) => style_kw = Some(value),
            SideComponent::Colour(value, c) => colour = Some((value, c)),
        }
    }

    if !seen_any {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    for &side in sides {
        emit_side_components(style, flags, side, width, style_kw, colour);
    }
    Ok(())
}

pub(super) fn parse_border_side(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    border_side_shorthand(ctx, v, style, &[side])
}

pub(super) fn parse_border(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    border_side_shorthand(ctx, v, style, &SIDES)
}

pub(super) fn parse_outline(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::OutlineWidth, flags, 0));
        style.push_opv(Opv::new(Opcode::OutlineStyle, flags, 0));
        style.push_opv(Opv::new(Opcode::OutlineColor, flags, 0));
        return Ok(());
    }

    let mut width: Option<SideComponent> = None;
    let mut style_kw: Option<u16> = None;
    let mut colour: Option<(u16, Option<Colour>)> = None;
    let mut seen_any = false;

    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        let component = parse_side_component(
            ctx,
            v,
            width.is_none(),
            style_kw.is_none(),
            colour.is_none(),
            &[("invert", bc::OUTLINE_COLOR_INVERT)],
            bc::OUTLINE_COLOR_SET,
        )?;
        seen_any = true;
        match component {
            SideComponent::WidthKeyword(_) | SideComponent::Width(..) => width = Some(component),
            SideComponent::Style(value) => style_kw = Some(value),
            SideComponent::Colour(value, c) => colour = Some((value, c)),
        }
    }

    if !seen_any {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    match width {
        Some(SideComponent::WidthKeyword(value)) => {
            style.push_opv(Opv::new(Opcode::OutlineWidth, flags, value));
        }
        Some(SideComponent::Width(val, unit)) => {
            style.push_opv(Opv::new(Opcode::OutlineWidth, flags, bc::BORDER_WIDTH_SET));
            style.push_fixed(val);
            style.push_unit(unit);
        }
        _ => {}
    }
    if let Some(value) = style_kw {
        style.push_opv(Opv::new(Opcode::OutlineStyle, flags, value));
    }
    if let Some((value, c)) = colour {
        style.push_opv(Opv::new(Opcode::OutlineColor, flags, value));
        if let Some(c) = c {
            style.push_colour(c);
        }
    }
    Ok(())
}

/// `border-width`, `border-style`, `border-color`: one to four values
/// with missing-sides replication.
fn border_aspect_shorthand<T: Copy>(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    op: Opcode,
    mut parse_one: impl FnMut(&mut PropertyContext<'_>, &mut TokenCursor<'_>) -> Result<T>,
    mut emit_one: impl FnMut(&mut Style, u8, u16, T),
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for side in SIDES {
            style.push_opv(Opv::new(op, flags, side));
        }
        return Ok(());
    }

    let mut values: Vec<T> = Vec::new();
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        values.push(parse_one(ctx, v)?);
        if values.len() == 4 {
            break;
        }
    }

    let expanded = replicate_sides(&values).ok_or(Error::Invalid)?;
    let flags = parse_important(v)?;
    for (side, value) in SIDES.iter().copied().zip(expanded) {
        emit_one(style, flags, side, value);
    }
    Ok(())
}

pub(super) fn parse_border_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    border_aspect_shorthand(
        ctx,
        v,
        style,
        Opcode::BorderTrblWidth,
        |ctx, v| {
            v.skip_ws();
            if let Some(t) = v.peek()
                && t.ttype == TokenType::Ident
            {
                let value = lookup_keyword(BORDER_WIDTH_KEYWORDS, t.lower_text())
                    .ok_or(Error::Invalid)?;
                let _ = v.next();
                return Ok(SideComponent::WidthKeyword(value));
            }
            let (val, unit) = parse_length(ctx, v, false, false)?;
            Ok(SideComponent::Width(val, unit))
        },
        |style, flags, side, value| match value {
            SideComponent::WidthKeyword(kw) => {
                style.push_opv(Opv::new(Opcode::BorderTrblWidth, flags, kw | side));
            }
            SideComponent::Width(val, unit) => {
                style.push_opv(Opv::new(
                    Opcode::BorderTrblWidth,
                    flags,
                    bc::BORDER_WIDTH_SET | side,
                ));
                style.push_fixed(val);
                style.push_unit(unit);
            }
            _ => {}
        },
    )
}

pub(super) fn parse_border_style(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    border_aspect_shorthand(
        ctx,
        v,
        style,
        Opcode::BorderTrblStyle,
        |_ctx, v| {
            v.skip_ws();
            let t = v.next().ok_or(Error::Invalid)?;
            if t.ttype != TokenType::Ident {
                return Err(Error::Invalid);
            }
            lookup_keyword(BORDER_STYLE_KEYWORDS, t.lower_text()).ok_or(Error::Invalid)
        },
        |style, flags, side, value| {
            style.push_opv(Opv::new(Opcode::BorderTrblStyle, flags, value | side));
        },
    )
}

pub(super) fn parse_border_color(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    border_aspect_shorthand(
        ctx,
        v,
        style,
        Opcode::BorderTrblColor,
        |ctx, v| {
            v.skip_ws();
            if let Some(t) = v.peek()
                && t.is_ident("transparent")
            {
                let _ = v.next();
                return Ok((bc::BORDER_COLOR_TRANSPARENT, None));
            }
            let colour = parse_colour_specifier(ctx, v)?;
            Ok((bc::BORDER_COLOR_SET, Some(colour)))
        },
        |style, flags, side, (value, colour): (u16, Option<Colour>)| {
            style.push_opv(Opv::new(Opcode::BorderTrblColor, flags, value | side));
            if let Some(c) = colour {
                style.push_colour(c);
            }
        },
    )
}
