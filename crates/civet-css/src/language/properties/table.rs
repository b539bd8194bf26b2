//! Table properties.

use super::utils::{keyword_property, parse_important, parse_length, try_inherit};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::Result;
use crate::types::Unit;

pub(super) fn parse_border_collapse(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::BorderCollapse,
        0,
        &[
            ("collapse", bc::BORDER_COLLAPSE_COLLAPSE),
            ("separate", bc::BORDER_COLLAPSE_SEPARATE),
        ],
        v,
        style,
    )
}

pub(super) fn parse_caption_side(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::CaptionSide,
        0,
        &[
            ("top", bc::CAPTION_SIDE_TOP),
            ("bottom", bc::CAPTION_SIDE_BOTTOM),
        ],
        v,
        style,
    )
}

pub(super) fn parse_empty_cells(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::EmptyCells,
        0,
        &[
            ("show", bc::EMPTY_CELLS_SHOW),
            ("hide", bc::EMPTY_CELLS_HIDE),
        ],
        v,
        style,
    )
}

pub(super) fn parse_table_layout(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::TableLayout,
        0,
        &[
            ("auto", bc::TABLE_LAYOUT_AUTO),
            ("fixed", bc::TABLE_LAYOUT_FIXED),
        ],
        v,
        style,
    )
}

/// `border-spacing: <length> <length>? | inherit`. One length applies
/// to both axes; no percentages, no negatives.
pub(super) fn parse_border_spacing(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::BorderSpacing, flags, 0));
        return Ok(());
    }

    let (h, hu) = parse_length(ctx, v, false, false)?;
    v.skip_ws();
    let (vv, vu): (crate::fixed::Fixed, Unit) = match v.peek() {
        Some(t) if !t.is_char('!') => parse_length(ctx, v, false, false)?,
        _ => (h, hu),
    };

    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::BorderSpacing, flags, bc::BORDER_SPACING_SET));
    style.push_fixed(h);
    style.push_unit(hu);
    style.push_fixed(vv);
    style.push_unit(vu);
    Ok(())
}
