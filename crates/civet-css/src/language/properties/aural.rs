//! Aural properties.

use civet_intern::Atom;

use super::utils::{
    keyword_property, lookup_keyword, parse_angle, parse_frequency, parse_important,
    parse_number_token, parse_time_or_pct, try_inherit, uri_property,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::fixed::{Fixed, number_from_string};
use crate::tokenizer::TokenType;

pub(super) fn parse_speak(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::Speak,
        0,
        &[
            ("normal", bc::SPEAK_NORMAL),
            ("none", bc::SPEAK_NONE),
            ("spell-out", bc::SPEAK_SPELL_OUT),
        ],
        v,
        style,
    )
}

pub(super) fn parse_speak_header(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::SpeakHeader,
        0,
        &[
            ("once", bc::SPEAK_HEADER_ONCE),
            ("always", bc::SPEAK_HEADER_ALWAYS),
        ],
        v,
        style,
    )
}

pub(super) fn parse_speak_numeral(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::SpeakNumeral,
        0,
        &[
            ("digits", bc::SPEAK_NUMERAL_DIGITS),
            ("continuous", bc::SPEAK_NUMERAL_CONTINUOUS),
        ],
        v,
        style,
    )
}

pub(super) fn parse_speak_punctuation(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::SpeakPunctuation,
        0,
        &[
            ("code", bc::SPEAK_PUNCTUATION_CODE),
            ("none", bc::SPEAK_PUNCTUATION_NONE),
        ],
        v,
        style,
    )
}

/// Shared body for the bare-number aural properties (`pitch-range`,
/// `richness`, `stress`): a number from 0 to 100.
fn number_0_100(op: Opcode, v: &mut TokenCursor<'_>, style: &mut Style) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(op, flags, 0));
        return Ok(());
    }

    let val = parse_number_token(v, false)?;
    if val.is_negative() || val > Fixed::from_int(100) {
        return Err(Error::Invalid);
    }
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(op, flags, bc::INTEGER_SET));
    style.push_fixed(val);
    Ok(())
}

pub(super) fn parse_pitch_range(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    number_0_100(Opcode::PitchRange, v, style)
}

pub(super) fn parse_richness(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    number_0_100(Opcode::Richness, v, style)
}

pub(super) fn parse_stress(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    number_0_100(Opcode::Stress, v, style)
}

pub(super) fn parse_cue_after(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    uri_property(
        Opcode::CueAfter,
        bc::CUE_URI,
        &[("none", bc::CUE_NONE)],
        v,
        style,
    )
}

pub(super) fn parse_cue_before(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    uri_property(
        Opcode::CueBefore,
        bc::CUE_URI,
        &[("none", bc::CUE_NONE)],
        v,
        style,
    )
}

/// One cue component: `none` or a URI.
fn cue_component(v: &mut TokenCursor<'_>) -> Result<(u16, Option<Atom>)> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    match t.ttype {
        TokenType::Ident if t.is_ident("none") => Ok((bc::CUE_NONE, None)),
        TokenType::Uri => Ok((bc::CUE_URI, Some(t.data.clone().ok_or(Error::Invalid)?))),
        _ => Err(Error::Invalid),
    }
}

/// `cue` shorthand: one value applies to both `cue-before` and
/// `cue-after`; two apply in that order.
pub(super) fn parse_cue(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::CueBefore, flags, 0));
        style.push_opv(Opv::new(Opcode::CueAfter, flags, 0));
        return Ok(());
    }

    let before = cue_component(v)?;
    v.skip_ws();
    let after = match v.peek() {
        Some(t) if !t.is_char('!') => cue_component(v)?,
        _ => before.clone(),
    };

    let flags = parse_important(v)?;
    for (op, (value, url)) in [(Opcode::CueBefore, before), (Opcode::CueAfter, after)] {
        style.push_opv(Opv::new(op, flags, value));
        if let Some(url) = url {
            style.push_string(url);
        }
    }
    Ok(())
}

/// Shared body for `pause-before` / `pause-after`: a time or
/// percentage.
fn pause_property(
    ctx: &mut PropertyContext<'_>,
    op: Opcode,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(op, flags, 0));
        return Ok(());
    }

    let (val, unit) = parse_time_or_pct(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(op, flags, bc::PAUSE_SET));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

pub(super) fn parse_pause_before(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    pause_property(ctx, Opcode::PauseBefore, v, style)
}

pub(super) fn parse_pause_after(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    pause_property(ctx, Opcode::PauseAfter, v, style)
}

/// `pause` shorthand: one or two time/percentage values.
pub(super) fn parse_pause(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::PauseBefore, flags, 0));
        style.push_opv(Opv::new(Opcode::PauseAfter, flags, 0));
        return Ok(());
    }

    let before = parse_time_or_pct(ctx, v)?;
    v.skip_ws();
    let after = match v.peek() {
        Some(t) if !t.is_char('!') => parse_time_or_pct(ctx, v)?,
        _ => before,
    };

    let flags = parse_important(v)?;
    for (op, (val, unit)) in [
        (Opcode::PauseBefore, before),
        (Opcode::PauseAfter, after),
    ] {
        style.push_opv(Opv::new(op, flags, bc::PAUSE_SET));
        style.push_fixed(val);
        style.push_unit(unit);
    }
    Ok(())
}

pub(super) fn parse_pitch(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    if let Some(t) = v.peek()
        && t.ttype == TokenType::Ident
    {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else {
            (
                0,
                lookup_keyword(
                    &[
                        ("x-low", bc::PITCH_X_LOW),
                        ("low", bc::PITCH_LOW),
                        ("medium", bc::PITCH_MEDIUM),
                        ("high", bc::PITCH_HIGH),
                        ("x-high", bc::PITCH_X_HIGH),
                    ],
                    t.lower_text(),
                )
                .ok_or(Error::Invalid)?,
            )
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Pitch, flags, value));
        return Ok(());
    }

    let (val, unit) = parse_frequency(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::Pitch, flags, bc::PITCH_FREQUENCY));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

pub(super) fn parse_speech_rate(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    if let Some(t) = v.peek()
        && t.ttype == TokenType::Ident
    {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else {
            (
                0,
                lookup_keyword(
                    &[
                        ("x-slow", bc::SPEECH_RATE_X_SLOW),
                        ("slow", bc::SPEECH_RATE_SLOW),
                        ("medium", bc::SPEECH_RATE_MEDIUM),
                        ("fast", bc::SPEECH_RATE_FAST),
                        ("x-fast", bc::SPEECH_RATE_X_FAST),
                        ("faster", bc::SPEECH_RATE_FASTER),
                        ("slower", bc::SPEECH_RATE_SLOWER),
                    ],
                    t.lower_text(),
                )
                .ok_or(Error::Invalid)?,
            )
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::SpeechRate, flags, value));
        return Ok(());
    }

    let val = parse_number_token(v, false)?;
    if val.is_negative() {
        return Err(Error::Invalid);
    }
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::SpeechRate, flags, bc::SPEECH_RATE_SET));
    style.push_fixed(val);
    Ok(())
}

pub(super) fn parse_volume(
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
            (
                0,
                lookup_keyword(
                    &[
                        ("silent", bc::VOLUME_SILENT),
                        ("x-soft", bc::VOLUME_X_SOFT),
                        ("soft", bc::VOLUME_SOFT),
                        ("medium", bc::VOLUME_MEDIUM),
                        ("loud", bc::VOLUME_LOUD),
                        ("x-loud", bc::VOLUME_X_LOUD),
                    ],
                    t.lower_text(),
                )
                .ok_or(Error::Invalid)?,
            )
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Volume, flags, value));
        return Ok(());
    }

    if t.ttype == TokenType::Number {
        let val = parse_number_token(v, false)?;
        if val.is_negative() || val > Fixed::from_int(100) {
            return Err(Error::Invalid);
        }
        let flags = parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Volume, flags, bc::VOLUME_NUMBER));
        style.push_fixed(val);
        return Ok(());
    }

    if t.ttype == TokenType::Percentage {
        let text = t.text();
        let (val, consumed) = number_from_string(text, false);
        if consumed != text.len() || val.is_negative() {
            return Err(Error::Invalid);
        }
        let _ = v.next();
        let flags = parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Volume, flags, bc::VOLUME_DIMENSION));
        style.push_fixed(val);
        style.push_unit(crate::types::Unit::Pct);
        return Ok(());
    }

    Err(Error::Invalid)
}

const AZIMUTH_POSITIONS: &[(&str, u16)] = &[
    ("left-side", bc::AZIMUTH_LEFT_SIDE),
    ("far-left", bc::AZIMUTH_FAR_LEFT),
    ("left", bc::AZIMUTH_LEFT),
    ("center-left", bc::AZIMUTH_CENTER_LEFT),
    ("center", bc::AZIMUTH_CENTER),
    ("center-right", bc::AZIMUTH_CENTER_RIGHT),
    ("right", bc::AZIMUTH_RIGHT),
    ("far-right", bc::AZIMUTH_FAR_RIGHT),
    ("right-side", bc::AZIMUTH_RIGHT_SIDE),
];

/// `azimuth: <angle> | [position || behind] | leftwards | rightwards |
/// inherit`.
pub(super) fn parse_azimuth(
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
            style.push_opv(Opv::new(Opcode::Azimuth, flags, 0));
            return Ok(());
        }
        if t.is_ident("leftwards") || t.is_ident("rightwards") {
            let value = if t.is_ident("leftwards") {
                bc::AZIMUTH_LEFTWARDS
            } else {
                bc::AZIMUTH_RIGHTWARDS
            };
            let _ = v.next();
            let flags = parse_important(v)?;
            style.push_opv(Opv::new(Opcode::Azimuth, flags, value));
            return Ok(());
        }

        // position || behind
        let mut position: Option<u16> = None;
        let mut behind = false;
        loop {
            v.skip_ws();
            let Some(t) = v.peek() else { break };
            if t.is_char('!') {
                break;
            }
            if t.ttype != TokenType::Ident {
                return Err(Error::Invalid);
            }
            if !behind && t.is_ident("behind") {
                let _ = v.next();
                behind = true;
                continue;
            }
            if position.is_none()
                && let Some(value) = lookup_keyword(AZIMUTH_POSITIONS, t.lower_text())
            {
                let _ = v.next();
                position = Some(value);
                continue;
            }
            return Err(Error::Invalid);
        }
        if position.is_none() && !behind {
            return Err(Error::Invalid);
        }

        let mut value = position.unwrap_or(bc::AZIMUTH_CENTER);
        if behind {
            value |= bc::AZIMUTH_BEHIND;
        }
        let flags = parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Azimuth, flags, value));
        return Ok(());
    }

    let (val, unit) = parse_angle(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::Azimuth, flags, bc::AZIMUTH_ANGLE));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

/// `elevation: <angle> | below | level | above | higher | lower |
/// inherit`.
pub(super) fn parse_elevation(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    if let Some(t) = v.peek()
        && t.ttype == TokenType::Ident
    {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else {
            (
                0,
                lookup_keyword(
                    &[
                        ("below", bc::ELEVATION_BELOW),
                        ("level", bc::ELEVATION_LEVEL),
                        ("above", bc::ELEVATION_ABOVE),
                        ("higher", bc::ELEVATION_HIGHER),
                        ("lower", bc::ELEVATION_LOWER),
                    ],
                    t.lower_text(),
                )
                .ok_or(Error::Invalid)?,
            )
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::Elevation, flags, value));
        return Ok(());
    }

    let (val, unit) = parse_angle(ctx, v)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::Elevation, flags, bc::ELEVATION_ANGLE));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

/// `play-during: URI [mix || repeat]? | auto | none | inherit`.
pub(super) fn parse_play_during(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;

    match t.ttype {
        TokenType::Ident => {
            let (inherit, value) = if t.is_ident("inherit") {
                (FLAG_INHERIT, 0)
            } else if t.is_ident("auto") {
                (0, bc::PLAY_DURING_AUTO)
            } else if t.is_ident("none") {
                (0, bc::PLAY_DURING_NONE)
            } else {
                return Err(Error::Invalid);
            };
            let flags = inherit | parse_important(v)?;
            style.push_opv(Opv::new(Opcode::PlayDuring, flags, value));
            Ok(())
        }
        TokenType::Uri => {
            let url = t.data.clone().ok_or(Error::Invalid)?;
            let mut value = bc::PLAY_DURING_URI;
            loop {
                v.skip_ws();
                let Some(t) = v.peek() else { break };
                if t.is_char('!') {
                    break;
                }
                if value & bc::PLAY_DURING_MIX == 0 && t.is_ident("mix") {
                    let _ = v.next();
                    value |= bc::PLAY_DURING_MIX;
                    continue;
                }
                if value & bc::PLAY_DURING_REPEAT == 0 && t.is_ident("repeat") {
                    let _ = v.next();
                    value |= bc::PLAY_DURING_REPEAT;
                    continue;
                }
                return Err(Error::Invalid);
            }
            let flags = parse_important(v)?;
            style.push_opv(Opv::new(Opcode::PlayDuring, flags, value));
            style.push_string(url);
            Ok(())
        }
        _ => Err(Error::Invalid),
    }
}

/// One voice-family item: a generic voice, quoted name, or identifier
/// run.
fn parse_voice_item(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
) -> Result<(u16, Option<Atom>)> {
    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;
    match t.ttype {
        TokenType::String => Ok((
            bc::VOICE_FAMILY_STRING,
            Some(t.data.clone().ok_or(Error::Invalid)?),
        )),
        TokenType::Ident => {
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
            if parts.len() == 1 {
                let generic = lookup_keyword(
                    &[
                        ("male", bc::VOICE_FAMILY_MALE),
                        ("female", bc::VOICE_FAMILY_FEMALE),
                        ("child", bc::VOICE_FAMILY_CHILD),
                    ],
                    t.lower_text(),
                );
                if let Some(value) = generic {
                    return Ok((value, None));
                }
            }
            Ok((
                bc::VOICE_FAMILY_IDENT_LIST,
                Some(ctx.dict.intern(&parts.join(" "))),
            ))
        }
        _ => Err(Error::Invalid),
    }
}

/// `voice-family`: a comma-separated list terminated in the bytecode by
/// `VOICE_FAMILY_END`.
pub(super) fn parse_voice_family(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    if try_inherit(v) {
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::VoiceFamily, flags, 0));
        return Ok(());
    }

    let mut items = vec![parse_voice_item(ctx, v)?];
    loop {
        v.skip_ws();
        match v.peek() {
            Some(t) if t.is_char(',') => {
                let _ = v.next();
                items.push(parse_voice_item(ctx, v)?);
            }
            _ => break,
        }
    }

    let flags = parse_important(v)?;
    for (value, atom) in items {
        style.push_opv(Opv::new(Opcode::VoiceFamily, flags, value));
        if let Some(atom) = atom {
            style.push_string(atom);
        }
    }
    style.push_opv(Opv::new(Opcode::VoiceFamily, flags, bc::VOICE_FAMILY_END));
    Ok(())
}
