//! Background properties.

use super::utils::{
    colour_property, keyword_property, lookup_keyword, parse_colour_specifier, parse_important,
    parse_length, try_inherit, uri_property,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::tokenizer::TokenType;
use crate::types::{Colour, Unit};

pub(super) fn parse_background_attachment(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::BackgroundAttachment,
        0,
        &[
            ("fixed", bc::BACKGROUND_ATTACHMENT_FIXED),
            ("scroll", bc::BACKGROUND_ATTACHMENT_SCROLL),
        ],
        v,
        style,
    )
}

pub(super) fn parse_background_repeat(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::BackgroundRepeat,
        0,
        &[
            ("repeat", bc::BACKGROUND_REPEAT_REPEAT),
            ("repeat-x", bc::BACKGROUND_REPEAT_REPEAT_X),
            ("repeat-y", bc::BACKGROUND_REPEAT_REPEAT_Y),
            ("no-repeat", bc::BACKGROUND_REPEAT_NO_REPEAT),
        ],
        v,
        style,
    )
}

pub(super) fn parse_background_color(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    colour_property(
        Opcode::BackgroundColor,
        0,
        bc::BACKGROUND_COLOR_SET,
        &[("transparent", bc::BACKGROUND_COLOR_TRANSPARENT)],
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_background_image(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    uri_property(
        Opcode::BackgroundImage,
        bc::BACKGROUND_IMAGE_URI,
        &[("none", bc::BACKGROUND_IMAGE_NONE)],
        v,
        style,
    )
}

/// One axis of a background position.
#[derive(Clone, Copy)]
enum PositionAxis {
    Keyword(u16),
    Value(Fixed, Unit),
}

const HORZ_KEYWORDS: &[(&str, u16)] = &[
    ("left", bc::BACKGROUND_POSITION_HORZ_LEFT),
    ("right", bc::BACKGROUND_POSITION_HORZ_RIGHT),
    ("center", bc::BACKGROUND_POSITION_HORZ_CENTER),
];

const VERT_KEYWORDS: &[(&str, u16)] = &[
    ("top", bc::BACKGROUND_POSITION_VERT_TOP),
    ("bottom", bc::BACKGROUND_POSITION_VERT_BOTTOM),
    ("center", bc::BACKGROUND_POSITION_VERT_CENTER),
];

/// Parse the one- or two-value `background-position` form into
/// horizontal and vertical axes.
fn parse_position_value(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<(u16, Vec<(Fixed, Unit)>)> {
    let mut horz: Option<PositionAxis> = None;
    let mut vert: Option<PositionAxis> = None;

    for i in 0..2 {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }

        if t.ttype == TokenType::Ident {
            let name = t.lower_text();
            // 'center' is ambiguous; resolve it to whichever axis is
            // still free, horizontal first.
            if horz.is_none()
                && let Some(value) = lookup_keyword(HORZ_KEYWORDS, name)
                && (name != "center" || vert.is_some() || i == 0)
            {
                let _ = v.next();
                horz = Some(PositionAxis::Keyword(value));
                continue;
            }
            if vert.is_none() {
                if let Some(value) = lookup_keyword(VERT_KEYWORDS, name) {
                    let _ = v.next();
                    vert = Some(PositionAxis::Keyword(value));
                    continue;
                }
            }
            return Err(Error::Invalid);
        }

        let (val, unit) = parse_length(ctx, v, true, true)?;
        if horz.is_none() {
            horz = Some(PositionAxis::Value(val, unit));
        } else if vert.is_none() {
            vert = Some(PositionAxis::Value(val, unit));
        } else {
            return Err(Error::Invalid);
        }
    }

    if horz.is_none() && vert.is_none() {
        return Err(Error::Invalid);
    }

    // A single value centres the other axis.
    let horz = horz.unwrap_or(PositionAxis::Keyword(bc::BACKGROUND_POSITION_HORZ_CENTER));
    let vert = vert.unwrap_or(PositionAxis::Keyword(bc::BACKGROUND_POSITION_VERT_CENTER));

    let mut value = 0u16;
    let mut operands = Vec::new();
    match horz {
        PositionAxis::Keyword(kw) => value |= kw,
        PositionAxis::Value(val, unit) => {
            value |= bc::BACKGROUND_POSITION_HORZ_SET;
            operands.push((val, unit));
        }
    }
    match vert {
        PositionAxis::Keyword(kw) => value |= kw,
        PositionAxis::Value(val, unit) => {
            value |= bc::BACKGROUND_POSITION_VERT_SET;
            operands.push((val, unit));
        }
    }
    Ok((value, operands))
}

pub(super) fn parse_background_position(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::BackgroundPosition, flags, 0));
        return Ok(());
    }

    let (value, operands) = parse_position_value(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::BackgroundPosition, flags, value));
    for (val, unit) in operands {
        style.push_fixed(val);
        style.push_unit(unit);
    }
    Ok(())
}

/// `background` shorthand:
/// `[color || image || repeat || attachment || position] | inherit`.
pub(super) fn parse_background(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        for op in [
            Opcode::BackgroundColor,
            Opcode::BackgroundImage,
            Opcode::BackgroundRepeat,
            Opcode::BackgroundAttachment,
            Opcode::BackgroundPosition,
        ] {
            style.push_opv(Opv::new(op, flags, 0));
        }
        return Ok(());
    }

    let mut colour: Option<(u16, Option<Colour>)> = None;
    let mut image: Option<(u16, Option<civet_intern::Atom>)> = None;
    let mut repeat: Option<u16> = None;
    let mut attachment: Option<u16> = None;
    let mut position: Option<(u16, Vec<(Fixed, Unit)>)> = None;
    let mut seen_any = false;

    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }

        if t.ttype == TokenType::Ident {
            let name = t.lower_text();
            if repeat.is_none()
                && let Some(value) = lookup_keyword(
                    &[
                        ("repeat", bc::BACKGROUND_REPEAT_REPEAT),
                        ("repeat-x", bc::BACKGROUND_REPEAT_REPEAT_X),
                        ("repeat-y", bc::BACKGROUND_REPEAT_REPEAT_Y),
                        ("no-repeat", bc::BACKGROUND_REPEAT_NO_REPEAT),
                    ],
                    name,
                )
            {
                let _ = v.next();
                repeat = Some(value);
                seen_any = true;
                continue;
            }
            if attachment.is_none()
                && let Some(value) = lookup_keyword(
                    &[
                        ("fixed", bc::BACKGROUND_ATTACHMENT_FIXED),
                        ("scroll", bc::BACKGROUND_ATTACHMENT_SCROLL),
                    ],
                    name,
                )
            {
                let _ = v.next();
                attachment = Some(value);
                seen_any = true;
                continue;
            }
            if image.is_none() && name == "none" {
                let _ = v.next();
                image = Some((bc::BACKGROUND_IMAGE_NONE, None));
                seen_any = true;
                continue;
            }
            if colour.is_none() && name == "transparent" {
                let _ = v.next();
                colour = Some((bc::BACKGROUND_COLOR_TRANSPARENT, None));
                seen_any = true;
                continue;
            }
            if position.is_none()
                && (lookup_keyword(HORZ_KEYWORDS, name).is_some()
                    || lookup_keyword(VERT_KEYWORDS, name).is_some())
            {
                position = Some(parse_position_value(ctx, v)?);
                seen_any = true;
                continue;
            }
            if colour.is_none() {
                let c = parse_colour_specifier(ctx, v)?;
                colour = Some((bc::BACKGROUND_COLOR_SET, Some(c)));
                seen_any = true;
                continue;
            }
            return Err(Error::Invalid);
        }

        if t.ttype == TokenType::Uri && image.is_none() {
            let url = t.data.clone().ok_or(Error::Invalid)?;
            let _ = v.next();
            image = Some((bc::BACKGROUND_IMAGE_URI, Some(url)));
            seen_any = true;
            continue;
        }

        if position.is_none()
            && matches!(
                t.ttype,
                TokenType::Dimension | TokenType::Number | TokenType::Percentage
            )
        {
            let save = v.pos();
            match parse_position_value(ctx, v) {
                Ok(p) => {
                    position = Some(p);
                    seen_any = true;
                    continue;
                }
                Err(_) => v.set_pos(save),
            }
        }

        if colour.is_none() {
            let c = parse_colour_specifier(ctx, v)?;
            colour = Some((bc::BACKGROUND_COLOR_SET, Some(c)));
            seen_any = true;
            continue;
        }

        return Err(Error::Invalid);
    }

    if !seen_any {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    if let Some((value, c)) = colour {
        style.push_opv(Opv::new(Opcode::BackgroundColor, flags, value));
        if let Some(c) = c {
            style.push_colour(c);
        }
    }
    if let Some((value, url)) = image {
        style.push_opv(Opv::new(Opcode::BackgroundImage, flags, value));
        if let Some(url) = url {
            style.push_string(url);
        }
    }
    if let Some(value) = repeat {
        style.push_opv(Opv::new(Opcode::BackgroundRepeat, flags, value));
    }
    if let Some(value) = attachment {
        style.push_opv(Opv::new(Opcode::BackgroundAttachment, flags, value));
    }
    if let Some((value, operands)) = position {
        style.push_opv(Opv::new(Opcode::BackgroundPosition, flags, value));
        for (val, unit) in operands {
            style.push_fixed(val);
            style.push_unit(unit);
        }
    }
    Ok(())
}
