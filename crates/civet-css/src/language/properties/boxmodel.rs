//! Box model, positioning, and display properties.

use super::utils::{
    SIDES, keyword_property, length_property, lookup_keyword, parse_important, parse_length,
    parse_number_token, replicate_sides, try_inherit,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{
    self as bc, FLAG_INHERIT, Opcode, Opv, Style,
};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::tokenizer::TokenType;
use crate::types::Unit;

const DISPLAY_KEYWORDS: &[(&str, u16)] = &[
    ("inline", bc::DISPLAY_INLINE),
    ("block", bc::DISPLAY_BLOCK),
    ("list-item", bc::DISPLAY_LIST_ITEM),
    ("run-in", bc::DISPLAY_RUN_IN),
    ("inline-block", bc::DISPLAY_INLINE_BLOCK),
    ("table", bc::DISPLAY_TABLE),
    ("inline-table", bc::DISPLAY_INLINE_TABLE),
    ("table-row-group", bc::DISPLAY_TABLE_ROW_GROUP),
    ("table-header-group", bc::DISPLAY_TABLE_HEADER_GROUP),
    ("table-footer-group", bc::DISPLAY_TABLE_FOOTER_GROUP),
    ("table-row", bc::DISPLAY_TABLE_ROW),
    ("table-column-group", bc::DISPLAY_TABLE_COLUMN_GROUP),
    ("table-column", bc::DISPLAY_TABLE_COLUMN),
    ("table-cell", bc::DISPLAY_TABLE_CELL),
    ("table-caption", bc::DISPLAY_TABLE_CAPTION),
    ("none", bc::DISPLAY_NONE),
];

pub(super) fn parse_display(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::Display, 0, DISPLAY_KEYWORDS, v, style)
}

pub(super) fn parse_position(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Position,
        0,
        &[
            ("static", bc::POSITION_STATIC),
            ("relative", bc::POSITION_RELATIVE),
            ("absolute", bc::POSITION_ABSOLUTE),
            ("fixed", bc::POSITION_FIXED),
        ],
        v,
        style,
    )
}

pub(super) fn parse_float(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Float,
        0,
        &[
            ("none", bc::FLOAT_NONE),
            ("left", bc::FLOAT_LEFT),
            ("right", bc::FLOAT_RIGHT),
        ],
        v,
        style,
    )
}

pub(super) fn parse_clear(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Clear,
        0,
        &[
            ("none", bc::CLEAR_NONE),
            ("left", bc::CLEAR_LEFT),
            ("right", bc::CLEAR_RIGHT),
            ("both", bc::CLEAR_BOTH),
        ],
        v,
        style,
    )
}

pub(super) fn parse_visibility(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Visibility,
        0,
        &[
            ("visible", bc::VISIBILITY_VISIBLE),
            ("hidden", bc::VISIBILITY_HIDDEN),
            ("collapse", bc::VISIBILITY_COLLAPSE),
        ],
        v,
        style,
    )
}

pub(super) fn parse_overflow(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Overflow,
        0,
        &[
            ("visible", bc::OVERFLOW_VISIBLE),
            ("hidden", bc::OVERFLOW_HIDDEN),
            ("scroll", bc::OVERFLOW_SCROLL),
            ("auto", bc::OVERFLOW_AUTO),
        ],
        v,
        style,
    )
}

pub(super) fn parse_direction(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Direction,
        0,
        &[("ltr", bc::DIRECTION_LTR), ("rtl", bc::DIRECTION_RTL)],
        v,
        style,
    )
}

pub(super) fn parse_unicode_bidi(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::UnicodeBidi,
        0,
        &[
            ("normal", bc::UNICODE_BIDI_NORMAL),
            ("embed", bc::UNICODE_BIDI_EMBED),
            ("bidi-override", bc::UNICODE_BIDI_BIDI_OVERRIDE),
        ],
        v,
        style,
    )
}

const AUTO_KEYWORD: &[(&str, u16)] = &[("auto", bc::OFFSET_AUTO)];

/// The four box offsets share a grammar:
/// `<length> | <percentage> | auto | inherit`, negatives allowed.
fn offset(
    op: Opcode,
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(op, 0, bc::OFFSET_SET, AUTO_KEYWORD, true, true, ctx, v, style)
}

pub(super) fn parse_top(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    offset(Opcode::Top, ctx, v, style)
}

pub(super) fn parse_right(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    offset(Opcode::Right, ctx, v, style)
}

pub(super) fn parse_bottom(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    offset(Opcode::Bottom, ctx, v, style)
}

pub(super) fn parse_left(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    offset(Opcode::Left, ctx, v, style)
}

pub(super) fn parse_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::Width,
        0,
        bc::OFFSET_SET,
        AUTO_KEYWORD,
        true,
        false,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_height(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::Height,
        0,
        bc::OFFSET_SET,
        AUTO_KEYWORD,
        true,
        false,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_min_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(Opcode::MinWidth, 0, bc::MIN_SIZE_SET, &[], true, false, ctx, v, style)
}

pub(super) fn parse_min_height(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(Opcode::MinHeight, 0, bc::MIN_SIZE_SET, &[], true, false, ctx, v, style)
}

const NONE_MAX: &[(&str, u16)] = &[("none", bc::MAX_SIZE_NONE)];

pub(super) fn parse_max_width(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(Opcode::MaxWidth, 0, bc::MAX_SIZE_SET, NONE_MAX, true, false, ctx, v, style)
}

pub(super) fn parse_max_height(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(Opcode::MaxHeight, 0, bc::MAX_SIZE_SET, NONE_MAX, true, false, ctx, v, style)
}

const MARGIN_AUTO_KEYWORD: &[(&str, u16)] = &[("auto", bc::MARGIN_AUTO)];

pub(super) fn parse_margin_side(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    length_property(
        Opcode::MarginTrbl,
        side,
        bc::MARGIN_SET,
        MARGIN_AUTO_KEYWORD,
        true,
        true,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_padding_side(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
    side: u16,
) -> Result<()> {
    length_property(
        Opcode::PaddingTrbl,
        side,
        bc::PADDING_SET,
        &[],
        true,
        false,
        ctx,
        v,
        style,
    )
}

/// One component of a box shorthand: a keyword discriminant or a
/// dimensional value.
#[derive(Clone, Copy)]
enum BoxValue {
    Keyword(u16),
    Length(Fixed, Unit),
}

/// Shared shorthand body for `margin` and `padding`.
fn box_shorthand(
    op: Opcode,
    set_value: u16,
    keywords: &[(&str, u16)],
    allow_negative: bool,
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for side in SIDES {
            style.push_opv(Opv::new(op, flags, side));
        }
        return Ok(());
    }

    let mut values: Vec<BoxValue> = Vec::new();
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        if t.ttype == TokenType::Ident {
            let value =
                lookup_keyword(keywords, t.lower_text()).ok_or(Error::Invalid)?;
            let _ = v.next();
            values.push(BoxValue::Keyword(value));
        } else {
            let (val, unit) = parse_length(ctx, v, true, allow_negative)?;
            values.push(BoxValue::Length(val, unit));
        }
        if values.len() == 4 {
            break;
        }
    }

    let expanded = replicate_sides(&values).ok_or(Error::Invalid)?;
    let flags = parse_important(v)?;

    for (side, value) in SIDES.iter().copied().zip(expanded) {
        match value {
            BoxValue::Keyword(kw) => style.push_opv(Opv::new(op, flags, kw | side)),
            BoxValue::Length(val, unit) => {
                style.push_opv(Opv::new(op, flags, set_value | side));
                style.push_fixed(val);
                style.push_unit(unit);
            }
        }
    }
    Ok(())
}

pub(super) fn parse_margin(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    box_shorthand(
        Opcode::MarginTrbl,
        bc::MARGIN_SET,
        MARGIN_AUTO_KEYWORD,
        true,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_padding(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    box_shorthand(Opcode::PaddingTrbl, bc::PADDING_SET, &[], false, ctx, v, style)
}

pub(super) fn parse_z_index(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else if t.is_ident("auto") {
            (0, bc::Z_INDEX_AUTO)
        } else {
            return Err(Error::Invalid);
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::ZIndex, flags, value));
        return Ok(());
    }

    let val = parse_number_token(v, true)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::ZIndex, flags, bc::Z_INDEX_SET));
    style.push_fixed(val);
    Ok(())
}

/// `clip: rect(t, r, b, l) | auto | inherit`. Each rect component is a
/// length or `auto`.
pub(super) fn parse_clip(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else if t.is_ident("auto") {
            (0, bc::CLIP_AUTO)
        } else {
            return Err(Error::Invalid);
        };
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Clip, flags, value));
        return Ok(());
    }

    if t.ttype != TokenType::Function || t.lower_text() != "rect" {
        return Err(Error::Invalid);
    }

    let auto_bits = [
        bc::CLIP_RECT_TOP_AUTO,
        bc::CLIP_RECT_RIGHT_AUTO,
        bc::CLIP_RECT_BOTTOM_AUTO,
        bc::CLIP_RECT_LEFT_AUTO,
    ];
    let mut value = bc::CLIP_SHAPE_RECT;
    let mut lengths: Vec<(Fixed, Unit)> = Vec::new();

    for (i, auto_bit) in auto_bits.into_iter().enumerate() {
        v.skip_ws();
        if v.peek().is_some_and(|t| t.is_ident("auto")) {
            let _ = v.next();
            value |= auto_bit;
        } else {
            // rect() takes lengths only, no percentages.
            let (val, unit) = parse_length(ctx, v, false, true)?;
            lengths.push((val, unit));
        }
        v.skip_ws();
        let sep = v.next().ok_or(Error::Invalid)?;
        let want = if i < 3 { ',' } else { ')' };
        if !sep.is_char(want) {
            return Err(Error::Invalid);
        }
    }

    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::Clip, flags, value));
    for (val, unit) in lengths {
        style.push_fixed(val);
        style.push_unit(unit);
    }
    Ok(())
}
