//! Per-property cascade appliers.
//!
//! [`apply`] decodes one OPV and its operands and, when the candidate
//! outranks whatever previously set that property, writes the resolved
//! value into the computed style. Operands are always consumed so the
//! bytecode cursor stays aligned whether or not the candidate wins.
//!
//! This is the enum-dispatched rendering of the per-property operation
//! table: one arm per opcode, sharing decode helpers per value shape.

use civet_intern::Atom;

use super::{CascadeCtx, prop_index};
use crate::bytecode::{self as bc, Opcode, Opv, SIDE_BOTTOM, SIDE_MASK, SIDE_RIGHT, SIDE_TOP,
    StyleIter};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::style::values::{
    AutoLength, Azimuth, AzimuthPosition, BackgroundAttachment, BackgroundPosition,
    BackgroundRepeat, BorderCollapse, BorderSpacing, BorderStyle, BorderWidth, CaptionSide,
    Clear, Clip, Content, ContentItem, Counter, CounterList, Cue, Cursor, CursorKind, Direction,
    Display, Elevation, EmptyCells, Float, FontFamily, FontSize, FontStyle, FontVariant,
    FontWeight, ImageRef, LineHeight, ListStylePosition, ListStyleType, MaxSize, OutlineColour,
    Overflow, PageBreak, PageBreakInside, Pitch, PlayDuring, Position, Quotes, Speak,
    SpeakHeader, SpeakNumeral, SpeakPunctuation, SpeechRate, Spacing, TableLayout, TextAlign,
    TextDecoration, TextTransform, UnicodeBidi, VerticalAlign, Visibility, VoiceFamily, Volume,
    WhiteSpace, ZIndex,
};
use crate::types::{Colour, Length, Unit};

fn read_fixed(iter: &mut StyleIter<'_>) -> Result<Fixed> {
    Ok(Fixed::from_raw(iter.expect_word()?))
}

fn read_length(iter: &mut StyleIter<'_>) -> Result<Length> {
    let value = read_fixed(iter)?;
    let unit = Unit::from_bits(iter.expect_word()?).ok_or(Error::Invalid)?;
    Ok(Length::new(value, unit))
}

fn read_colour(iter: &mut StyleIter<'_>) -> Result<Colour> {
    Ok(Colour(iter.expect_word()?))
}

fn read_string(iter: &mut StyleIter<'_>) -> Result<Atom> {
    let word = iter.expect_word()?;
    iter.resolve_string(word).cloned()
}

/// Decode the next list OPV and check it continues the same property.
fn next_list_opv(iter: &mut StyleIter<'_>, op: Opcode) -> Result<u16> {
    let opv = Opv::from_raw(iter.expect_word()?);
    if opv.opcode() != Some(op) {
        return Err(Error::Invalid);
    }
    Ok(opv.value())
}

fn pct(v: i32) -> Length {
    Length::new(Fixed::from_int(v), Unit::Pct)
}

/// Decode one OPV (and operands) and apply it to the computed style if
/// the candidate wins the cascade for that property.
#[allow(clippy::too_many_lines)]
pub(super) fn apply(
    op: Opcode,
    opv: Opv,
    iter: &mut StyleIter<'_>,
    ctx: &mut CascadeCtx<'_>,
) -> Result<()> {
    let value = opv.value();
    let inherit = opv.is_inherit();
    let important = opv.is_important();
    let index = prop_index(op, value);

    // Decode first — operands must be consumed even for losing
    // candidates — then consult the cascade.
    macro_rules! set {
        ($setter:ident, $decoded:expr) => {{
            let decoded = if inherit { None } else { Some($decoded) };
            if ctx.outranks(index, important) {
                ctx.computed.$setter(decoded);
            }
        }};
    }

    match op {
        Opcode::Azimuth => set!(
            set_azimuth,
            match value & 0xF {
                bc::AZIMUTH_ANGLE => Azimuth::Angle(read_length(iter)?),
                bc::AZIMUTH_LEFTWARDS => Azimuth::Leftwards,
                bc::AZIMUTH_RIGHTWARDS => Azimuth::Rightwards,
                position => Azimuth::Position {
                    position: azimuth_position(position)?,
                    behind: value & bc::AZIMUTH_BEHIND != 0,
                },
            }
        ),

        Opcode::BackgroundAttachment => set!(
            set_background_attachment,
            match value {
                bc::BACKGROUND_ATTACHMENT_FIXED => BackgroundAttachment::Fixed,
                bc::BACKGROUND_ATTACHMENT_SCROLL => BackgroundAttachment::Scroll,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::BackgroundColor => set!(
            set_background_color,
            match value {
                bc::BACKGROUND_COLOR_TRANSPARENT => Colour::TRANSPARENT,
                bc::BACKGROUND_COLOR_SET => read_colour(iter)?,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::BackgroundImage => set!(
            set_background_image,
            match value {
                bc::BACKGROUND_IMAGE_NONE => ImageRef::None,
                bc::BACKGROUND_IMAGE_URI => ImageRef::Uri(read_string(iter)?),
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::BackgroundPosition => set!(set_background_position, {
            let horz = match value & 0xF {
                bc::BACKGROUND_POSITION_HORZ_SET => read_length(iter)?,
                bc::BACKGROUND_POSITION_HORZ_LEFT => pct(0),
                bc::BACKGROUND_POSITION_HORZ_RIGHT => pct(100),
                bc::BACKGROUND_POSITION_HORZ_CENTER => pct(50),
                _ => return Err(Error::Invalid),
            };
            let vert = match value & 0xF0 {
                bc::BACKGROUND_POSITION_VERT_SET => read_length(iter)?,
                bc::BACKGROUND_POSITION_VERT_TOP => pct(0),
                bc::BACKGROUND_POSITION_VERT_BOTTOM => pct(100),
                bc::BACKGROUND_POSITION_VERT_CENTER => pct(50),
                _ => return Err(Error::Invalid),
            };
            BackgroundPosition { horz, vert }
        }),

        Opcode::BackgroundRepeat => set!(
            set_background_repeat,
            match value {
                bc::BACKGROUND_REPEAT_REPEAT => BackgroundRepeat::Repeat,
                bc::BACKGROUND_REPEAT_REPEAT_X => BackgroundRepeat::RepeatX,
                bc::BACKGROUND_REPEAT_REPEAT_Y => BackgroundRepeat::RepeatY,
                bc::BACKGROUND_REPEAT_NO_REPEAT => BackgroundRepeat::NoRepeat,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::BorderCollapse => set!(
            set_border_collapse,
            match value {
                bc::BORDER_COLLAPSE_COLLAPSE => BorderCollapse::Collapse,
                bc::BORDER_COLLAPSE_SEPARATE => BorderCollapse::Separate,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::BorderSpacing => set!(set_border_spacing, {
            debug_assert!(value == bc::BORDER_SPACING_SET);
            let horz = read_length(iter)?;
            let vert = read_length(iter)?;
            BorderSpacing { horz, vert }
        }),

        Opcode::BorderTrblColor => {
            let decoded = if inherit {
                None
            } else {
                Some(match value & !SIDE_MASK {
                    bc::BORDER_COLOR_TRANSPARENT => Colour::TRANSPARENT,
                    bc::BORDER_COLOR_SET => read_colour(iter)?,
                    _ => return Err(Error::Invalid),
                })
            };
            if ctx.outranks(index, important) {
                match value & SIDE_MASK {
                    SIDE_TOP => ctx.computed.set_border_top_color(decoded),
                    SIDE_RIGHT => ctx.computed.set_border_right_color(decoded),
                    SIDE_BOTTOM => ctx.computed.set_border_bottom_color(decoded),
                    _ => ctx.computed.set_border_left_color(decoded),
                }
            }
        }

        Opcode::BorderTrblStyle => {
            let decoded = if inherit {
                None
            } else {
                Some(border_style(value & !SIDE_MASK)?)
            };
            if ctx.outranks(index, important) {
                match value & SIDE_MASK {
                    SIDE_TOP => ctx.computed.set_border_top_style(decoded),
                    SIDE_RIGHT => ctx.computed.set_border_right_style(decoded),
                    SIDE_BOTTOM => ctx.computed.set_border_bottom_style(decoded),
                    _ => ctx.computed.set_border_left_style(decoded),
                }
            }
        }

        Opcode::BorderTrblWidth => {
            let decoded = if inherit {
                None
            } else {
                Some(border_width(value & !SIDE_MASK, iter)?)
            };
            if ctx.outranks(index, important) {
                match value & SIDE_MASK {
                    SIDE_TOP => ctx.computed.set_border_top_width(decoded),
                    SIDE_RIGHT => ctx.computed.set_border_right_width(decoded),
                    SIDE_BOTTOM => ctx.computed.set_border_bottom_width(decoded),
                    _ => ctx.computed.set_border_left_width(decoded),
                }
            }
        }

        Opcode::Bottom => set!(set_bottom, auto_length(value, iter)?),
        Opcode::Left => set!(set_left, auto_length(value, iter)?),
        Opcode::Right => set!(set_right, auto_length(value, iter)?),
        Opcode::Top => set!(set_top, auto_length(value, iter)?),

        Opcode::CaptionSide => set!(
            set_caption_side,
            match value {
                bc::CAPTION_SIDE_TOP => CaptionSide::Top,
                bc::CAPTION_SIDE_BOTTOM => CaptionSide::Bottom,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Clear => set!(
            set_clear,
            match value {
                bc::CLEAR_NONE => Clear::None,
                bc::CLEAR_LEFT => Clear::Left,
                bc::CLEAR_RIGHT => Clear::Right,
                bc::CLEAR_BOTH => Clear::Both,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Clip => set!(set_clip, {
            if value & 0xF == bc::CLIP_AUTO {
                Clip::Auto
            } else {
                let mut read_side = |bit: u16| -> Result<Option<Length>> {
                    if value & bit != 0 {
                        Ok(None)
                    } else {
                        Ok(Some(read_length(iter)?))
                    }
                };
                let top = read_side(bc::CLIP_RECT_TOP_AUTO)?;
                let right = read_side(bc::CLIP_RECT_RIGHT_AUTO)?;
                let bottom = read_side(bc::CLIP_RECT_BOTTOM_AUTO)?;
                let left = read_side(bc::CLIP_RECT_LEFT_AUTO)?;
                Clip::Rect {
                    top,
                    right,
                    bottom,
                    left,
                }
            }
        }),

        Opcode::Color => set!(set_color, {
            debug_assert!(value == bc::COLOR_SET);
            read_colour(iter)?
        }),

        Opcode::Content => set!(set_content, decode_content(value, iter)?),

        Opcode::CounterIncrement => {
            set!(set_counter_increment, decode_counters(op, value, iter)?);
        }
        Opcode::CounterReset => {
            set!(set_counter_reset, decode_counters(op, value, iter)?);
        }

        Opcode::CueAfter => set!(set_cue_after, decode_cue(value, iter)?),
        Opcode::CueBefore => set!(set_cue_before, decode_cue(value, iter)?),

        Opcode::Cursor => set!(set_cursor, {
            let mut urls = Vec::new();
            let mut kind = value;
            while kind == bc::CURSOR_URI {
                urls.push(read_string(iter)?);
                kind = next_list_opv(iter, Opcode::Cursor)?;
            }
            Cursor {
                urls,
                kind: cursor_kind(kind)?,
            }
        }),

        Opcode::Direction => set!(
            set_direction,
            match value {
                bc::DIRECTION_LTR => Direction::Ltr,
                bc::DIRECTION_RTL => Direction::Rtl,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Display => set!(set_display, display(value)?),

        Opcode::Elevation => set!(
            set_elevation,
            match value {
                bc::ELEVATION_ANGLE => Elevation::Angle(read_length(iter)?),
                bc::ELEVATION_BELOW => Elevation::Below,
                bc::ELEVATION_LEVEL => Elevation::Level,
                bc::ELEVATION_ABOVE => Elevation::Above,
                bc::ELEVATION_HIGHER => Elevation::Higher,
                bc::ELEVATION_LOWER => Elevation::Lower,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::EmptyCells => set!(
            set_empty_cells,
            match value {
                bc::EMPTY_CELLS_SHOW => EmptyCells::Show,
                bc::EMPTY_CELLS_HIDE => EmptyCells::Hide,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Float => set!(
            set_float,
            match value {
                bc::FLOAT_NONE => Float::None,
                bc::FLOAT_LEFT => Float::Left,
                bc::FLOAT_RIGHT => Float::Right,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::FontFamily => set!(set_font_family, {
            let mut families = Vec::new();
            let mut kind = value;
            while kind != bc::FONT_FAMILY_END {
                families.push(match kind {
                    bc::FONT_FAMILY_STRING | bc::FONT_FAMILY_IDENT_LIST => {
                        FontFamily::Named(read_string(iter)?)
                    }
                    bc::FONT_FAMILY_SERIF => FontFamily::Serif,
                    bc::FONT_FAMILY_SANS_SERIF => FontFamily::SansSerif,
                    bc::FONT_FAMILY_CURSIVE => FontFamily::Cursive,
                    bc::FONT_FAMILY_FANTASY => FontFamily::Fantasy,
                    bc::FONT_FAMILY_MONOSPACE => FontFamily::Monospace,
                    _ => return Err(Error::Invalid),
                });
                kind = next_list_opv(iter, Opcode::FontFamily)?;
            }
            families
        }),

        Opcode::FontSize => set!(
            set_font_size,
            match value {
                bc::FONT_SIZE_DIMENSION => FontSize::Length(read_length(iter)?),
                bc::FONT_SIZE_XX_SMALL => FontSize::XxSmall,
                bc::FONT_SIZE_X_SMALL => FontSize::XSmall,
                bc::FONT_SIZE_SMALL => FontSize::Small,
                bc::FONT_SIZE_MEDIUM => FontSize::Medium,
                bc::FONT_SIZE_LARGE => FontSize::Large,
                bc::FONT_SIZE_X_LARGE => FontSize::XLarge,
                bc::FONT_SIZE_XX_LARGE => FontSize::XxLarge,
                bc::FONT_SIZE_LARGER => FontSize::Larger,
                bc::FONT_SIZE_SMALLER => FontSize::Smaller,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::FontStyle => set!(
            set_font_style,
            match value {
                bc::FONT_STYLE_NORMAL => FontStyle::Normal,
                bc::FONT_STYLE_ITALIC => FontStyle::Italic,
                bc::FONT_STYLE_OBLIQUE => FontStyle::Oblique,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::FontVariant => set!(
            set_font_variant,
            match value {
                bc::FONT_VARIANT_NORMAL => FontVariant::Normal,
                bc::FONT_VARIANT_SMALL_CAPS => FontVariant::SmallCaps,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::FontWeight => set!(set_font_weight, font_weight(value)?),

        Opcode::Height => set!(set_height, auto_length(value, iter)?),
        Opcode::Width => set!(set_width, auto_length(value, iter)?),

        Opcode::LetterSpacing => set!(set_letter_spacing, spacing(value, iter)?),
        Opcode::WordSpacing => set!(set_word_spacing, spacing(value, iter)?),

        Opcode::LineHeight => set!(
            set_line_height,
            match value {
                bc::LINE_HEIGHT_NUMBER => LineHeight::Number(read_fixed(iter)?),
                bc::LINE_HEIGHT_DIMENSION => LineHeight::Length(read_length(iter)?),
                bc::LINE_HEIGHT_NORMAL => LineHeight::Normal,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::ListStyleImage => set!(
            set_list_style_image,
            match value {
                bc::LIST_STYLE_IMAGE_URI => ImageRef::Uri(read_string(iter)?),
                bc::LIST_STYLE_IMAGE_NONE => ImageRef::None,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::ListStylePosition => set!(
            set_list_style_position,
            match value {
                bc::LIST_STYLE_POSITION_INSIDE => ListStylePosition::Inside,
                bc::LIST_STYLE_POSITION_OUTSIDE => ListStylePosition::Outside,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::ListStyleType => set!(set_list_style_type, list_style_type(value)?),

        Opcode::MarginTrbl => {
            let decoded = if inherit {
                None
            } else if value & !SIDE_MASK == bc::MARGIN_AUTO {
                Some(AutoLength::Auto)
            } else {
                Some(AutoLength::Length(read_length(iter)?))
            };
            if ctx.outranks(index, important) {
                match value & SIDE_MASK {
                    SIDE_TOP => ctx.computed.set_margin_top(decoded),
                    SIDE_RIGHT => ctx.computed.set_margin_right(decoded),
                    SIDE_BOTTOM => ctx.computed.set_margin_bottom(decoded),
                    _ => ctx.computed.set_margin_left(decoded),
                }
            }
        }

        Opcode::PaddingTrbl => {
            let decoded = if inherit {
                None
            } else {
                debug_assert!(value & !SIDE_MASK == bc::PADDING_SET);
                Some(read_length(iter)?)
            };
            if ctx.outranks(index, important) {
                match value & SIDE_MASK {
                    SIDE_TOP => ctx.computed.set_padding_top(decoded),
                    SIDE_RIGHT => ctx.computed.set_padding_right(decoded),
                    SIDE_BOTTOM => ctx.computed.set_padding_bottom(decoded),
                    _ => ctx.computed.set_padding_left(decoded),
                }
            }
        }

        Opcode::MaxHeight => set!(set_max_height, max_size(value, iter)?),
        Opcode::MaxWidth => set!(set_max_width, max_size(value, iter)?),
        Opcode::MinHeight => set!(set_min_height, read_length(iter)?),
        Opcode::MinWidth => set!(set_min_width, read_length(iter)?),

        Opcode::Orphans => set!(set_orphans, read_fixed(iter)?.to_int()),
        Opcode::Widows => set!(set_widows, read_fixed(iter)?.to_int()),

        Opcode::OutlineColor => set!(
            set_outline_color,
            match value {
                bc::OUTLINE_COLOR_SET => OutlineColour::Colour(read_colour(iter)?),
                bc::OUTLINE_COLOR_INVERT => OutlineColour::Invert,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::OutlineStyle => set!(set_outline_style, border_style(value)?),
        Opcode::OutlineWidth => set!(set_outline_width, border_width(value, iter)?),

        Opcode::Overflow => set!(
            set_overflow,
            match value {
                bc::OVERFLOW_VISIBLE => Overflow::Visible,
                bc::OVERFLOW_HIDDEN => Overflow::Hidden,
                bc::OVERFLOW_SCROLL => Overflow::Scroll,
                bc::OVERFLOW_AUTO => Overflow::Auto,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::PageBreakAfter => set!(set_page_break_after, page_break(value)?),
        Opcode::PageBreakBefore => set!(set_page_break_before, page_break(value)?),
        Opcode::PageBreakInside => set!(
            set_page_break_inside,
            match value {
                bc::PAGE_BREAK_AUTO => PageBreakInside::Auto,
                bc::PAGE_BREAK_AVOID => PageBreakInside::Avoid,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::PauseAfter => set!(set_pause_after, read_length(iter)?),
        Opcode::PauseBefore => set!(set_pause_before, read_length(iter)?),

        Opcode::PitchRange => set!(set_pitch_range, read_fixed(iter)?),
        Opcode::Richness => set!(set_richness, read_fixed(iter)?),
        Opcode::Stress => set!(set_stress, read_fixed(iter)?),

        Opcode::Pitch => set!(
            set_pitch,
            match value {
                bc::PITCH_FREQUENCY => Pitch::Frequency(read_length(iter)?),
                bc::PITCH_X_LOW => Pitch::XLow,
                bc::PITCH_LOW => Pitch::Low,
                bc::PITCH_MEDIUM => Pitch::Medium,
                bc::PITCH_HIGH => Pitch::High,
                bc::PITCH_X_HIGH => Pitch::XHigh,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::PlayDuring => set!(
            set_play_during,
            match value & bc::PLAY_DURING_TYPE_MASK {
                bc::PLAY_DURING_URI => PlayDuring::Uri {
                    url: read_string(iter)?,
                    mix: value & bc::PLAY_DURING_MIX != 0,
                    repeat: value & bc::PLAY_DURING_REPEAT != 0,
                },
                bc::PLAY_DURING_AUTO => PlayDuring::Auto,
                bc::PLAY_DURING_NONE => PlayDuring::None,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Position => set!(
            set_position,
            match value {
                bc::POSITION_STATIC => Position::Static,
                bc::POSITION_RELATIVE => Position::Relative,
                bc::POSITION_ABSOLUTE => Position::Absolute,
                bc::POSITION_FIXED => Position::Fixed,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Quotes => set!(set_quotes, {
            let mut pairs = Vec::new();
            let mut kind = value;
            while kind == bc::QUOTES_STRING {
                let open = read_string(iter)?;
                let close = read_string(iter)?;
                pairs.push((open, close));
                kind = next_list_opv(iter, Opcode::Quotes)?;
            }
            if pairs.is_empty() {
                Quotes::None
            } else {
                Quotes::Pairs(pairs)
            }
        }),

        Opcode::Speak => set!(
            set_speak,
            match value {
                bc::SPEAK_NORMAL => Speak::Normal,
                bc::SPEAK_NONE => Speak::None,
                bc::SPEAK_SPELL_OUT => Speak::SpellOut,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::SpeakHeader => set!(
            set_speak_header,
            match value {
                bc::SPEAK_HEADER_ONCE => SpeakHeader::Once,
                bc::SPEAK_HEADER_ALWAYS => SpeakHeader::Always,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::SpeakNumeral => set!(
            set_speak_numeral,
            match value {
                bc::SPEAK_NUMERAL_DIGITS => SpeakNumeral::Digits,
                bc::SPEAK_NUMERAL_CONTINUOUS => SpeakNumeral::Continuous,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::SpeakPunctuation => set!(
            set_speak_punctuation,
            match value {
                bc::SPEAK_PUNCTUATION_CODE => SpeakPunctuation::Code,
                bc::SPEAK_PUNCTUATION_NONE => SpeakPunctuation::None,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::SpeechRate => set!(
            set_speech_rate,
            match value {
                bc::SPEECH_RATE_SET => SpeechRate::Rate(read_fixed(iter)?),
                bc::SPEECH_RATE_X_SLOW => SpeechRate::XSlow,
                bc::SPEECH_RATE_SLOW => SpeechRate::Slow,
                bc::SPEECH_RATE_MEDIUM => SpeechRate::Medium,
                bc::SPEECH_RATE_FAST => SpeechRate::Fast,
                bc::SPEECH_RATE_X_FAST => SpeechRate::XFast,
                bc::SPEECH_RATE_FASTER => SpeechRate::Faster,
                bc::SPEECH_RATE_SLOWER => SpeechRate::Slower,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::TableLayout => set!(
            set_table_layout,
            match value {
                bc::TABLE_LAYOUT_AUTO => TableLayout::Auto,
                bc::TABLE_LAYOUT_FIXED => TableLayout::Fixed,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::TextAlign => set!(
            set_text_align,
            match value {
                bc::TEXT_ALIGN_LEFT => TextAlign::Left,
                bc::TEXT_ALIGN_RIGHT => TextAlign::Right,
                bc::TEXT_ALIGN_CENTER => TextAlign::Center,
                bc::TEXT_ALIGN_JUSTIFY => TextAlign::Justify,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::TextDecoration => set!(set_text_decoration, {
            if value & bc::TEXT_DECORATION_NONE != 0 {
                TextDecoration::NONE
            } else {
                TextDecoration {
                    underline: value & bc::TEXT_DECORATION_UNDERLINE != 0,
                    overline: value & bc::TEXT_DECORATION_OVERLINE != 0,
                    line_through: value & bc::TEXT_DECORATION_LINE_THROUGH != 0,
                    blink: value & bc::TEXT_DECORATION_BLINK != 0,
                }
            }
        }),

        Opcode::TextIndent => set!(set_text_indent, read_length(iter)?),

        Opcode::TextTransform => set!(
            set_text_transform,
            match value {
                bc::TEXT_TRANSFORM_CAPITALIZE => TextTransform::Capitalize,
                bc::TEXT_TRANSFORM_UPPERCASE => TextTransform::Uppercase,
                bc::TEXT_TRANSFORM_LOWERCASE => TextTransform::Lowercase,
                bc::TEXT_TRANSFORM_NONE => TextTransform::None,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::UnicodeBidi => set!(
            set_unicode_bidi,
            match value {
                bc::UNICODE_BIDI_NORMAL => UnicodeBidi::Normal,
                bc::UNICODE_BIDI_EMBED => UnicodeBidi::Embed,
                bc::UNICODE_BIDI_BIDI_OVERRIDE => UnicodeBidi::BidiOverride,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::VerticalAlign => set!(
            set_vertical_align,
            match value {
                bc::VERTICAL_ALIGN_SET => VerticalAlign::Length(read_length(iter)?),
                bc::VERTICAL_ALIGN_BASELINE => VerticalAlign::Baseline,
                bc::VERTICAL_ALIGN_SUB => VerticalAlign::Sub,
                bc::VERTICAL_ALIGN_SUPER => VerticalAlign::Super,
                bc::VERTICAL_ALIGN_TOP => VerticalAlign::Top,
                bc::VERTICAL_ALIGN_TEXT_TOP => VerticalAlign::TextTop,
                bc::VERTICAL_ALIGN_MIDDLE => VerticalAlign::Middle,
                bc::VERTICAL_ALIGN_BOTTOM => VerticalAlign::Bottom,
                bc::VERTICAL_ALIGN_TEXT_BOTTOM => VerticalAlign::TextBottom,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::Visibility => set!(
            set_visibility,
            match value {
                bc::VISIBILITY_VISIBLE => Visibility::Visible,
                bc::VISIBILITY_HIDDEN => Visibility::Hidden,
                bc::VISIBILITY_COLLAPSE => Visibility::Collapse,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::VoiceFamily => set!(set_voice_family, {
            let mut voices = Vec::new();
            let mut kind = value;
            while kind != bc::VOICE_FAMILY_END {
                voices.push(match kind {
                    bc::VOICE_FAMILY_STRING | bc::VOICE_FAMILY_IDENT_LIST => {
                        VoiceFamily::Named(read_string(iter)?)
                    }
                    bc::VOICE_FAMILY_MALE => VoiceFamily::Male,
                    bc::VOICE_FAMILY_FEMALE => VoiceFamily::Female,
                    bc::VOICE_FAMILY_CHILD => VoiceFamily::Child,
                    _ => return Err(Error::Invalid),
                });
                kind = next_list_opv(iter, Opcode::VoiceFamily)?;
            }
            voices
        }),

        Opcode::Volume => set!(
            set_volume,
            match value {
                bc::VOLUME_NUMBER => Volume::Number(read_fixed(iter)?),
                bc::VOLUME_DIMENSION => Volume::Percent(read_length(iter)?.value),
                bc::VOLUME_SILENT => Volume::Silent,
                bc::VOLUME_X_SOFT => Volume::XSoft,
                bc::VOLUME_SOFT => Volume::Soft,
                bc::VOLUME_MEDIUM => Volume::Medium,
                bc::VOLUME_LOUD => Volume::Loud,
                bc::VOLUME_X_LOUD => Volume::XLoud,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::WhiteSpace => set!(
            set_white_space,
            match value {
                bc::WHITE_SPACE_NORMAL => WhiteSpace::Normal,
                bc::WHITE_SPACE_PRE => WhiteSpace::Pre,
                bc::WHITE_SPACE_NOWRAP => WhiteSpace::Nowrap,
                bc::WHITE_SPACE_PRE_WRAP => WhiteSpace::PreWrap,
                bc::WHITE_SPACE_PRE_LINE => WhiteSpace::PreLine,
                _ => return Err(Error::Invalid),
            }
        ),

        Opcode::ZIndex => set!(
            set_z_index,
            match value {
                bc::Z_INDEX_SET => ZIndex::Set(read_fixed(iter)?.to_int()),
                bc::Z_INDEX_AUTO => ZIndex::Auto,
                _ => return Err(Error::Invalid),
            }
        ),
    }

    Ok(())
}

/* ------------------------------------------------------------------ *
 * Shared decoders                                                    *
 * ------------------------------------------------------------------ */

fn auto_length(value: u16, iter: &mut StyleIter<'_>) -> Result<AutoLength> {
    match value {
        bc::OFFSET_SET => Ok(AutoLength::Length(read_length(iter)?)),
        bc::OFFSET_AUTO => Ok(AutoLength::Auto),
        _ => Err(Error::Invalid),
    }
}

fn max_size(value: u16, iter: &mut StyleIter<'_>) -> Result<MaxSize> {
    match value {
        bc::MAX_SIZE_SET => Ok(MaxSize::Length(read_length(iter)?)),
        bc::MAX_SIZE_NONE => Ok(MaxSize::None),
        _ => Err(Error::Invalid),
    }
}

fn spacing(value: u16, iter: &mut StyleIter<'_>) -> Result<Spacing> {
    match value {
        bc::SPACING_SET => Ok(Spacing::Length(read_length(iter)?)),
        bc::SPACING_NORMAL => Ok(Spacing::Normal),
        _ => Err(Error::Invalid),
    }
}

fn border_style(value: u16) -> Result<BorderStyle> {
    Ok(match value {
        bc::BORDER_STYLE_NONE => BorderStyle::None,
        bc::BORDER_STYLE_HIDDEN => BorderStyle::Hidden,
        bc::BORDER_STYLE_DOTTED => BorderStyle::Dotted,
        bc::BORDER_STYLE_DASHED => BorderStyle::Dashed,
        bc::BORDER_STYLE_SOLID => BorderStyle::Solid,
        bc::BORDER_STYLE_DOUBLE => BorderStyle::Double,
        bc::BORDER_STYLE_GROOVE => BorderStyle::Groove,
        bc::BORDER_STYLE_RIDGE => BorderStyle::Ridge,
        bc::BORDER_STYLE_INSET => BorderStyle::Inset,
        bc::BORDER_STYLE_OUTSET => BorderStyle::Outset,
        _ => return Err(Error::Invalid),
    })
}

fn border_width(value: u16, iter: &mut StyleIter<'_>) -> Result<BorderWidth> {
    Ok(match value {
        bc::BORDER_WIDTH_SET => BorderWidth::Length(read_length(iter)?),
        bc::BORDER_WIDTH_THIN => BorderWidth::Thin,
        bc::BORDER_WIDTH_MEDIUM => BorderWidth::Medium,
        bc::BORDER_WIDTH_THICK => BorderWidth::Thick,
        _ => return Err(Error::Invalid),
    })
}

fn display(value: u16) -> Result<Display> {
    Ok(match value {
        bc::DISPLAY_INLINE => Display::Inline,
        bc::DISPLAY_BLOCK => Display::Block,
        bc::DISPLAY_LIST_ITEM => Display::ListItem,
        bc::DISPLAY_RUN_IN => Display::RunIn,
        bc::DISPLAY_INLINE_BLOCK => Display::InlineBlock,
        bc::DISPLAY_TABLE => Display::Table,
        bc::DISPLAY_INLINE_TABLE => Display::InlineTable,
        bc::DISPLAY_TABLE_ROW_GROUP => Display::TableRowGroup,
        bc::DISPLAY_TABLE_HEADER_GROUP => Display::TableHeaderGroup,
        bc::DISPLAY_TABLE_FOOTER_GROUP => Display::TableFooterGroup,
        bc::DISPLAY_TABLE_ROW => Display::TableRow,
        bc::DISPLAY_TABLE_COLUMN_GROUP => Display::TableColumnGroup,
        bc::DISPLAY_TABLE_COLUMN => Display::TableColumn,
        bc::DISPLAY_TABLE_CELL => Display::TableCell,
        bc::DISPLAY_TABLE_CAPTION => Display::TableCaption,
        bc::DISPLAY_NONE => Display::None,
        _ => return Err(Error::Invalid),
    })
}

fn font_weight(value: u16) -> Result<FontWeight> {
    Ok(match value {
        bc::FONT_WEIGHT_NORMAL => FontWeight::Normal,
        bc::FONT_WEIGHT_BOLD => FontWeight::Bold,
        bc::FONT_WEIGHT_BOLDER => FontWeight::Bolder,
        bc::FONT_WEIGHT_LIGHTER => FontWeight::Lighter,
        bc::FONT_WEIGHT_100 => FontWeight::W100,
        bc::FONT_WEIGHT_200 => FontWeight::W200,
        bc::FONT_WEIGHT_300 => FontWeight::W300,
        bc::FONT_WEIGHT_400 => FontWeight::W400,
        bc::FONT_WEIGHT_500 => FontWeight::W500,
        bc::FONT_WEIGHT_600 => FontWeight::W600,
        bc::FONT_WEIGHT_700 => FontWeight::W700,
        bc::FONT_WEIGHT_800 => FontWeight::W800,
        bc::FONT_WEIGHT_900 => FontWeight::W900,
        _ => return Err(Error::Invalid),
    })
}

fn list_style_type(value: u16) -> Result<ListStyleType> {
    Ok(match value {
        bc::LIST_STYLE_TYPE_DISC => ListStyleType::Disc,
        bc::LIST_STYLE_TYPE_CIRCLE => ListStyleType::Circle,
        bc::LIST_STYLE_TYPE_SQUARE => ListStyleType::Square,
        bc::LIST_STYLE_TYPE_DECIMAL => ListStyleType::Decimal,
        bc::LIST_STYLE_TYPE_DECIMAL_LEADING_ZERO => ListStyleType::DecimalLeadingZero,
        bc::LIST_STYLE_TYPE_LOWER_ROMAN => ListStyleType::LowerRoman,
        bc::LIST_STYLE_TYPE_UPPER_ROMAN => ListStyleType::UpperRoman,
        bc::LIST_STYLE_TYPE_LOWER_GREEK => ListStyleType::LowerGreek,
        bc::LIST_STYLE_TYPE_LOWER_LATIN => ListStyleType::LowerLatin,
        bc::LIST_STYLE_TYPE_UPPER_LATIN => ListStyleType::UpperLatin,
        bc::LIST_STYLE_TYPE_ARMENIAN => ListStyleType::Armenian,
        bc::LIST_STYLE_TYPE_GEORGIAN => ListStyleType::Georgian,
        bc::LIST_STYLE_TYPE_LOWER_ALPHA => ListStyleType::LowerAlpha,
        bc::LIST_STYLE_TYPE_UPPER_ALPHA => ListStyleType::UpperAlpha,
        bc::LIST_STYLE_TYPE_NONE => ListStyleType::None,
        _ => return Err(Error::Invalid),
    })
}

fn page_break(value: u16) -> Result<PageBreak> {
    Ok(match value {
        bc::PAGE_BREAK_AUTO => PageBreak::Auto,
        bc::PAGE_BREAK_ALWAYS => PageBreak::Always,
        bc::PAGE_BREAK_AVOID => PageBreak::Avoid,
        bc::PAGE_BREAK_LEFT => PageBreak::Left,
        bc::PAGE_BREAK_RIGHT => PageBreak::Right,
        _ => return Err(Error::Invalid),
    })
}

fn azimuth_position(value: u16) -> Result<AzimuthPosition> {
    Ok(match value {
        bc::AZIMUTH_LEFT_SIDE => AzimuthPosition::LeftSide,
        bc::AZIMUTH_FAR_LEFT => AzimuthPosition::FarLeft,
        bc::AZIMUTH_LEFT => AzimuthPosition::Left,
        bc::AZIMUTH_CENTER_LEFT => AzimuthPosition::CenterLeft,
        bc::AZIMUTH_CENTER => AzimuthPosition::Center,
        bc::AZIMUTH_CENTER_RIGHT => AzimuthPosition::CenterRight,
        bc::AZIMUTH_RIGHT => AzimuthPosition::Right,
        bc::AZIMUTH_FAR_RIGHT => AzimuthPosition::FarRight,
        bc::AZIMUTH_RIGHT_SIDE => AzimuthPosition::RightSide,
        _ => return Err(Error::Invalid),
    })
}

fn cursor_kind(value: u16) -> Result<CursorKind> {
    Ok(match value {
        bc::CURSOR_AUTO => CursorKind::Auto,
        bc::CURSOR_CROSSHAIR => CursorKind::Crosshair,
        bc::CURSOR_DEFAULT => CursorKind::Default,
        bc::CURSOR_POINTER => CursorKind::Pointer,
        bc::CURSOR_MOVE => CursorKind::Move,
        bc::CURSOR_E_RESIZE => CursorKind::EResize,
        bc::CURSOR_NE_RESIZE => CursorKind::NeResize,
        bc::CURSOR_NW_RESIZE => CursorKind::NwResize,
        bc::CURSOR_N_RESIZE => CursorKind::NResize,
        bc::CURSOR_SE_RESIZE => CursorKind::SeResize,
        bc::CURSOR_SW_RESIZE => CursorKind::SwResize,
        bc::CURSOR_S_RESIZE => CursorKind::SResize,
        bc::CURSOR_W_RESIZE => CursorKind::WResize,
        bc::CURSOR_TEXT => CursorKind::Text,
        bc::CURSOR_WAIT => CursorKind::Wait,
        bc::CURSOR_HELP => CursorKind::Help,
        bc::CURSOR_PROGRESS => CursorKind::Progress,
        _ => return Err(Error::Invalid),
    })
}

fn decode_cue(value: u16, iter: &mut StyleIter<'_>) -> Result<Cue> {
    match value {
        bc::CUE_NONE => Ok(Cue::None),
        bc::CUE_URI => Ok(Cue::Uri(read_string(iter)?)),
        _ => Err(Error::Invalid),
    }
}

fn decode_counters(op: Opcode, value: u16, iter: &mut StyleIter<'_>) -> Result<CounterList> {
    let mut items = Vec::new();
    let mut kind = value;
    while kind == bc::COUNTER_NAMED {
        let name = read_string(iter)?;
        let delta = read_fixed(iter)?.to_int();
        items.push(Counter { name, value: delta });
        kind = next_list_opv(iter, op)?;
    }
    if items.is_empty() {
        Ok(CounterList::None)
    } else {
        Ok(CounterList::Items(items))
    }
}

fn decode_content(value: u16, iter: &mut StyleIter<'_>) -> Result<Content> {
    match value {
        bc::CONTENT_NORMAL => return Ok(Content::Normal),
        bc::CONTENT_NONE => return Ok(Content::None),
        _ => {}
    }

    let mut items = Vec::new();
    let mut kind = value;
    loop {
        match kind {
            bc::CONTENT_NORMAL => break,
            bc::CONTENT_STRING => items.push(ContentItem::Text(read_string(iter)?)),
            bc::CONTENT_URI => items.push(ContentItem::Uri(read_string(iter)?)),
            bc::CONTENT_ATTR => items.push(ContentItem::Attr(read_string(iter)?)),
            bc::CONTENT_COUNTER => {
                let name = read_string(iter)?;
                let style = list_style_type(iter.expect_word()? as u16)?;
                items.push(ContentItem::Counter { name, style });
            }
            bc::CONTENT_COUNTERS => {
                let name = read_string(iter)?;
                let separator = read_string(iter)?;
                let style = list_style_type(iter.expect_word()? as u16)?;
                items.push(ContentItem::Counters {
                    name,
                    separator,
                    style,
                });
            }
            bc::CONTENT_OPEN_QUOTE => items.push(ContentItem::OpenQuote),
            bc::CONTENT_CLOSE_QUOTE => items.push(ContentItem::CloseQuote),
            bc::CONTENT_NO_OPEN_QUOTE => items.push(ContentItem::NoOpenQuote),
            bc::CONTENT_NO_CLOSE_QUOTE => items.push(ContentItem::NoCloseQuote),
            _ => return Err(Error::Invalid),
        }
        kind = next_list_opv(iter, Opcode::Content)?;
    }
    Ok(Content::Items(items))
}
