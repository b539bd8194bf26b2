//! Paged-media properties.

use super::utils::{keyword_property, parse_important, parse_number_token, try_inherit};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};

const PAGE_BREAK_KEYWORDS: &[(&str, u16)] = &[
    ("auto", bc::PAGE_BREAK_AUTO),
    ("always", bc::PAGE_BREAK_ALWAYS),
    ("avoid", bc::PAGE_BREAK_AVOID),
    ("left", bc::PAGE_BREAK_LEFT),
    ("right", bc::PAGE_BREAK_RIGHT),
];

pub(super) fn parse_page_break_after(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::PageBreakAfter, 0, PAGE_BREAK_KEYWORDS, v, style)
}

pub(super) fn parse_page_break_before(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(Opcode::PageBreakBefore, 0, PAGE_BREAK_KEYWORDS, v, style)
}

pub(super) fn parse_page_break_inside(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::PageBreakInside,
        0,
        &[
            ("auto", bc::PAGE_BREAK_AUTO),
            ("avoid", bc::PAGE_BREAK_AVOID),
        ],
        v,
        style,
    )
}

/// Shared body for `orphans` and `widows`: a positive integer.
fn integer_property(
    op: Opcode,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(op, flags, 0));
        return Ok(());
    }

    let val = parse_number_token(v, true)?;
    if val.is_negative() {
        return Err(Error::Invalid);
    }
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(op, flags, bc::INTEGER_SET));
    style.push_fixed(val);
    Ok(())
}

pub(super) fn parse_orphans(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    integer_property(Opcode::Orphans, v, style)
}

pub(super) fn parse_widows(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    integer_property(Opcode::Widows, v, style)
}
