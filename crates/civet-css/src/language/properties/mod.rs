//! Per-property value parsers.
//!
//! One recogniser per CSS 2.1 property. Each consumes tokens from a
//! shared cursor, validates the property's grammar, and appends exactly
//! one OPV (plus operand words) per longhand to the style under
//! construction. Shorthands expand to their longhands in a fixed order.
//!
//! On any invalid token the cursor is restored to its entry position and
//! everything appended to the style is rolled back, so the language
//! binding can discard the declaration without side effects.

mod aural;
mod background;
mod border;
mod boxmodel;
mod font;
mod generated;
mod page;
mod table;
mod text;
mod utils;

use civet_intern::Dictionary;
use strum_macros::EnumString;

use crate::bytecode::Style;
use crate::error::{Error, Result};
use crate::tokenizer::{Token, TokenType};

/// The recognised property names.
///
/// Unknown property names fail the lookup and the declaration is
/// discarded; this enum *is* the perfect table the language binding
/// consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum PropertyId {
    Azimuth,
    Background,
    BackgroundAttachment,
    BackgroundColor,
    BackgroundImage,
    BackgroundPosition,
    BackgroundRepeat,
    Border,
    BorderBottom,
    BorderBottomColor,
    BorderBottomStyle,
    BorderBottomWidth,
    BorderCollapse,
    BorderColor,
    BorderLeft,
    BorderLeftColor,
    BorderLeftStyle,
    BorderLeftWidth,
    BorderRight,
    BorderRightColor,
    BorderRightStyle,
    BorderRightWidth,
    BorderSpacing,
    BorderStyle,
    BorderTop,
    BorderTopColor,
    BorderTopStyle,
    BorderTopWidth,
    BorderWidth,
    Bottom,
    CaptionSide,
    Clear,
    Clip,
    Color,
    Content,
    CounterIncrement,
    CounterReset,
    Cue,
    CueAfter,
    CueBefore,
    Cursor,
    Direction,
    Display,
    Elevation,
    EmptyCells,
    Float,
    Font,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariant,
    FontWeight,
    Height,
    Left,
    LetterSpacing,
    LineHeight,
    ListStyle,
    ListStyleImage,
    ListStylePosition,
    ListStyleType,
    Margin,
    MarginBottom,
    MarginLeft,
    MarginRight,
    MarginTop,
    MaxHeight,
    MaxWidth,
    MinHeight,
    MinWidth,
    Orphans,
    Outline,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    Overflow,
    Padding,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    PageBreakAfter,
    PageBreakBefore,
    PageBreakInside,
    Pause,
    PauseAfter,
    PauseBefore,
    Pitch,
    PitchRange,
    PlayDuring,
    Position,
    Quotes,
    Richness,
    Right,
    Speak,
    SpeakHeader,
    SpeakNumeral,
    SpeakPunctuation,
    SpeechRate,
    Stress,
    TableLayout,
    TextAlign,
    TextDecoration,
    TextIndent,
    TextTransform,
    Top,
    UnicodeBidi,
    VerticalAlign,
    Visibility,
    VoiceFamily,
    Volume,
    WhiteSpace,
    Widows,
    Width,
    WordSpacing,
    ZIndex,
}

impl PropertyId {
    /// Look a property name up by its lowercased form.
    #[must_use]
    pub fn by_name(lower: &str) -> Option<PropertyId> {
        lower.parse().ok()
    }
}

/// Context shared by every property parser during one declaration.
pub(crate) struct PropertyContext<'a> {
    /// Dictionary for interning keyword-derived strings.
    pub dict: &'a Dictionary,
    /// Whether the sheet permits quirks.
    pub quirks_allowed: bool,
    /// Set when a quirk was required to parse the declaration.
    pub quirks_used: bool,
}

/// A cursor over a declaration's value tokens.
pub(crate) struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> TokenCursor<'a> {
        TokenCursor { tokens, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// The current token, without consuming it.
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Consume and return the current token.
    pub(crate) fn next(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Skip whitespace (and comment) tokens.
    pub(crate) fn skip_ws(&mut self) {
        while matches!(
            self.peek().map(|t| t.ttype),
            Some(TokenType::Whitespace | TokenType::Comment)
        ) {
            self.pos += 1;
        }
    }

    /// Whether only whitespace remains.
    pub(crate) fn exhausted(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .all(|t| matches!(t.ttype, TokenType::Whitespace | TokenType::Comment))
    }
}

/// Parse one declaration's value for `id`, appending its bytecode to
/// `style`.
///
/// On failure the cursor and style are restored to their entry state.
pub(crate) fn parse_value(
    id: PropertyId,
    ctx: &mut PropertyContext<'_>,
    cursor: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    let entry_pos = cursor.pos();
    let mark = style.mark();

    let result = dispatch(id, ctx, cursor, style);
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            cursor.set_pos(entry_pos);
            style.rollback(mark);
            Err(e)
        }
    }
}

fn dispatch(
    id: PropertyId,
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    use PropertyId as P;

    match id {
        P::Azimuth => aural::parse_azimuth(ctx, v, style),
        P::Background => background::parse_background(ctx, v, style),
        P::BackgroundAttachment => background::parse_background_attachment(ctx, v, style),
        P::BackgroundColor => background::parse_background_color(ctx, v, style),
        P::BackgroundImage => background::parse_background_image(ctx, v, style),
        P::BackgroundPosition => background::parse_background_position(ctx, v, style),
        P::BackgroundRepeat => background::parse_background_repeat(ctx, v, style),
        P::Border => border::parse_border(ctx, v, style),
        P::BorderBottom => border::parse_border_side(ctx, v, style, crate::bytecode::SIDE_BOTTOM),
        P::BorderBottomColor => {
            border::parse_border_side_color(ctx, v, style, crate::bytecode::SIDE_BOTTOM)
        }
        P::BorderBottomStyle => {
            border::parse_border_side_style(ctx, v, style, crate::bytecode::SIDE_BOTTOM)
        }
        P::BorderBottomWidth => {
            border::parse_border_side_width(ctx, v, style, crate::bytecode::SIDE_BOTTOM)
        }
        P::BorderCollapse => table::parse_border_collapse(ctx, v, style),
        P::BorderColor => border::parse_border_color(ctx, v, style),
        P::BorderLeft => border::parse_border_side(ctx, v, style, crate::bytecode::SIDE_LEFT),
        P::BorderLeftColor => {
            border::parse_border_side_color(ctx, v, style, crate::bytecode::SIDE_LEFT)
        }
        P::BorderLeftStyle => {
            border::parse_border_side_style(ctx, v, style, crate::bytecode::SIDE_LEFT)
        }
        P::BorderLeftWidth => {
            border::parse_border_side_width(ctx, v, style, crate::bytecode::SIDE_LEFT)
        }
        P::BorderRight => border::parse_border_side(ctx, v, style, crate::bytecode::SIDE_RIGHT),
        P::BorderRightColor => {
            border::parse_border_side_color(ctx, v, style, crate::bytecode::SIDE_RIGHT)
        }
        P::BorderRightStyle => {
            border::parse_border_side_style(ctx, v, style, crate::bytecode::SIDE_RIGHT)
        }
        P::BorderRightWidth => {
            border::parse_border_side_width(ctx, v, style, crate::bytecode::SIDE_RIGHT)
        }
        P::BorderSpacing => table::parse_border_spacing(ctx, v, style),
        P::BorderStyle => border::parse_border_style(ctx, v, style),
        P::BorderTop => border::parse_border_side(ctx, v, style, crate::bytecode::SIDE_TOP),
        P::BorderTopColor => {
            border::parse_border_side_color(ctx, v, style, crate::bytecode::SIDE_TOP)
        }
        P::BorderTopStyle => {
            border::parse_border_side_style(ctx, v, style, crate::bytecode::SIDE_TOP)
        }
        P::BorderTopWidth => {
            border::parse_border_side_width(ctx, v, style, crate::bytecode::SIDE_TOP)
        }
        P::BorderWidth => border::parse_border_width(ctx, v, style),
        P::Bottom => boxmodel::parse_bottom(ctx, v, style),
        P::CaptionSide => table::parse_caption_side(ctx, v, style),
        P::Clear => boxmodel::parse_clear(ctx, v, style),
        P::Clip => boxmodel::parse_clip(ctx, v, style),
        P::Color => text::parse_color(ctx, v, style),
        P::Content => generated::parse_content(ctx, v, style),
        P::CounterIncrement => generated::parse_counter_increment(ctx, v, style),
        P::CounterReset => generated::parse_counter_reset(ctx, v, style),
        P::Cue => aural::parse_cue(ctx, v, style),
        P::CueAfter => aural::parse_cue_after(ctx, v, style),
        P::CueBefore => aural::parse_cue_before(ctx, v, style),
        P::Cursor => generated::parse_cursor(ctx, v, style),
        P::Direction => boxmodel::parse_direction(ctx, v, style),
        P::Display => boxmodel::parse_display(ctx, v, style),
        P::Elevation => aural::parse_elevation(ctx, v, style),
        P::EmptyCells => table::parse_empty_cells(ctx, v, style),
        P::Float => boxmodel::parse_float(ctx, v, style),
        P::Font => font::parse_font(ctx, v, style),
        P::FontFamily => font::parse_font_family(ctx, v, style),
        P::FontSize => font::parse_font_size(ctx, v, style),
        P::FontStyle => font::parse_font_style(ctx, v, style),
        P::FontVariant => font::parse_font_variant(ctx, v, style),
        P::FontWeight => font::parse_font_weight(ctx, v, style),
        P::Height => boxmodel::parse_height(ctx, v, style),
        P::Left => boxmodel::parse_left(ctx, v, style),
        P::LetterSpacing => text::parse_letter_spacing(ctx, v, style),
        P::LineHeight => text::parse_line_height(ctx, v, style),
        P::ListStyle => generated::parse_list_style(ctx, v, style),
        P::ListStyleImage => generated::parse_list_style_image(ctx, v, style),
        P::ListStylePosition => generated::parse_list_style_position(ctx, v, style),
        P::ListStyleType => generated::parse_list_style_type(ctx, v, style),
        P::Margin => boxmodel::parse_margin(ctx, v, style),
        P::MarginBottom => boxmodel::parse_margin_side(ctx, v, style, crate::bytecode::SIDE_BOTTOM),
        P::MarginLeft => boxmodel::parse_margin_side(ctx, v, style, crate::bytecode::SIDE_LEFT),
        P::MarginRight => boxmodel::parse_margin_side(ctx, v, style, crate::bytecode::SIDE_RIGHT),
        P::MarginTop => boxmodel::parse_margin_side(ctx, v, style, crate::bytecode::SIDE_TOP),
        P::MaxHeight => boxmodel::parse_max_height(ctx, v, style),
        P::MaxWidth => boxmodel::parse_max_width(ctx, v, style),
        P::MinHeight => boxmodel::parse_min_height(ctx, v, style),
        P::MinWidth => boxmodel::parse_min_width(ctx, v, style),
        P::Orphans => page::parse_orphans(ctx, v, style),
        P::Outline => border::parse_outline(ctx, v, style),
        P::OutlineColor => border::parse_outline_color(ctx, v, style),
        P::OutlineStyle => border::parse_outline_style(ctx, v, style),
        P::OutlineWidth => border::parse_outline_width(ctx, v, style),
        P::Overflow => boxmodel::parse_overflow(ctx, v, style),
        P::Padding => boxmodel::parse_padding(ctx, v, style),
        P::PaddingBottom => {
            boxmodel::parse_padding_side(ctx, v, style, crate::bytecode::SIDE_BOTTOM)
        }
        P::PaddingLeft => boxmodel::parse_padding_side(ctx, v, style, crate::bytecode::SIDE_LEFT),
        P::PaddingRight => boxmodel::parse_padding_side(ctx, v, style, crate::bytecode::SIDE_RIGHT),
        P::PaddingTop => boxmodel::parse_padding_side(ctx, v, style, crate::bytecode::SIDE_TOP),
        P::PageBreakAfter => page::parse_page_break_after(ctx, v, style),
        P::PageBreakBefore => page::parse_page_break_before(ctx, v, style),
        P::PageBreakInside => page::parse_page_break_inside(ctx, v, style),
        P::Pause => aural::parse_pause(ctx, v, style),
        P::PauseAfter => aural::parse_pause_after(ctx, v, style),
        P::PauseBefore => aural::parse_pause_before(ctx, v, style),
        P::Pitch => aural::parse_pitch(ctx, v, style),
        P::PitchRange => aural::parse_pitch_range(ctx, v, style),
        P::PlayDuring => aural::parse_play_during(ctx, v, style),
        P::Position => boxmodel::parse_position(ctx, v, style),
        P::Quotes => generated::parse_quotes(ctx, v, style),
        P::Richness => aural::parse_richness(ctx, v, style),
        P::Right => boxmodel::parse_right(ctx, v, style),
        P::Speak => aural::parse_speak(ctx, v, style),
        P::SpeakHeader => aural::parse_speak_header(ctx, v, style),
        P::SpeakNumeral => aural::parse_speak_numeral(ctx, v, style),
        P::SpeakPunctuation => aural::parse_speak_punctuation(ctx, v, style),
        P::SpeechRate => aural::parse_speech_rate(ctx, v, style),
        P::Stress => aural::parse_stress(ctx, v, style),
        P::TableLayout => table::parse_table_layout(ctx, v, style),
        P::TextAlign => text::parse_text_align(ctx, v, style),
        P::TextDecoration => text::parse_text_decoration(ctx, v, style),
        P::TextIndent => text::parse_text_indent(ctx, v, style),
        P::TextTransform => text::parse_text_transform(ctx, v, style),
        P::Top => boxmodel::parse_top(ctx, v, style),
        P::UnicodeBidi => boxmodel::parse_unicode_bidi(ctx, v, style),
        P::VerticalAlign => text::parse_vertical_align(ctx, v, style),
        P::Visibility => boxmodel::parse_visibility(ctx, v, style),
        P::VoiceFamily => aural::parse_voice_family(ctx, v, style),
        P::Volume => aural::parse_volume(ctx, v, style),
        P::WhiteSpace => text::parse_white_space(ctx, v, style),
        P::Widows => page::parse_widows(ctx, v, style),
        P::Width => boxmodel::parse_width(ctx, v, style),
        P::WordSpacing => text::parse_word_spacing(ctx, v, style),
        P::ZIndex => boxmodel::parse_z_index(ctx, v, style),
    }?;

    if !v.exhausted() {
        return Err(Error::Invalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_resolve() {
        assert_eq!(PropertyId::by_name("color"), Some(PropertyId::Color));
        assert_eq!(
            PropertyId::by_name("border-top-width"),
            Some(PropertyId::BorderTopWidth)
        );
        assert_eq!(PropertyId::by_name("z-index"), Some(PropertyId::ZIndex));
        assert_eq!(
            PropertyId::by_name("counter-increment"),
            Some(PropertyId::CounterIncrement)
        );
        assert_eq!(PropertyId::by_name("colour"), None);
        assert_eq!(PropertyId::by_name("Color"), None);
    }
}
