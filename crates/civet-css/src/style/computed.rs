//! The computed-style record.
//!
//! Every property accessor returns `Option<T>`: `Some` is a concrete
//! resolved value, `None` is the `INHERIT` sentinel meaning "resolve
//! from the parent". Selection fills the record per node without ever
//! touching the parent; [`ComputedStyle::compose`] is the single place
//! where tree-structured inheritance is realised.
//!
//! Storage is partitioned: the frequently used properties live inline,
//! while the uncommon, paged-media, and aural properties live in blocks
//! allocated on first write.

use serde::Serialize;

use super::values::{
    AutoLength, Azimuth, BackgroundAttachment, BackgroundPosition, BackgroundRepeat,
    BorderCollapse, BorderSpacing, BorderStyle, BorderWidth, CaptionSide, Clear, Clip, Content,
    CounterList, Cue, Cursor, Direction, Display, Elevation, EmptyCells, Float, FontFamily,
    FontSize, FontStyle, FontVariant, FontWeight, ImageRef, LineHeight, ListStylePosition,
    ListStyleType, MaxSize, OutlineColour, Overflow, PageBreak, PageBreakInside, Pitch,
    PlayDuring, Position, Quotes, Speak, SpeakHeader, SpeakNumeral, SpeakPunctuation, SpeechRate,
    Spacing, TableLayout, TextAlign, TextDecoration, TextTransform, UnicodeBidi, VerticalAlign,
    Visibility, VoiceFamily, Volume, WhiteSpace, ZIndex,
};
use crate::fixed::Fixed;
use crate::types::{Colour, Length};

/// Generate getter/setter pairs for eagerly stored properties.
macro_rules! direct_accessors {
    ($( $field:ident : $ty:ty => $setter:ident ),* $(,)?) => {
        $(
            #[doc = concat!("The computed `", stringify!($field), "` value, or inherit.")]
            #[must_use]
            pub fn $field(&self) -> Option<$ty> {
                self.$field.clone()
            }

            pub(crate) fn $setter(&mut self, v: Option<$ty>) {
                self.$field = v;
            }
        )*
    };
}

/// Generate getter/setter pairs for a lazily boxed block.
macro_rules! block_accessors {
    ($block:ident, $( $field:ident : $ty:ty => $setter:ident ),* $(,)?) => {
        $(
            #[doc = concat!("The computed `", stringify!($field), "` value, or inherit.")]
            #[must_use]
            pub fn $field(&self) -> Option<$ty> {
                self.$block.as_ref().and_then(|b| b.$field.clone())
            }

            pub(crate) fn $setter(&mut self, v: Option<$ty>) {
                if v.is_none() && self.$block.is_none() {
                    return;
                }
                self.$block.get_or_insert_with(Box::default).$field = v;
            }
        )*
    };
}

/// The infrequently used properties, allocated on first write.
#[derive(Debug, Clone, Default, Serialize)]
#[allow(missing_docs)]
pub struct UncommonStyle {
    pub border_spacing: Option<BorderSpacing>,
    pub clip: Option<Clip>,
    pub content: Option<Content>,
    pub counter_increment: Option<CounterList>,
    pub counter_reset: Option<CounterList>,
    pub cursor: Option<Cursor>,
    pub letter_spacing: Option<Spacing>,
    pub outline_color: Option<OutlineColour>,
    pub outline_width: Option<BorderWidth>,
    pub quotes: Option<Quotes>,
    pub word_spacing: Option<Spacing>,
}

/// The paged-media properties, allocated on first write.
#[derive(Debug, Clone, Default, Serialize)]
#[allow(missing_docs)]
pub struct PageStyle {
    pub orphans: Option<i32>,
    pub page_break_after: Option<PageBreak>,
    pub page_break_before: Option<PageBreak>,
    pub page_break_inside: Option<PageBreakInside>,
    pub widows: Option<i32>,
}

/// The aural properties, allocated on first write.
#[derive(Debug, Clone, Default, Serialize)]
#[allow(missing_docs)]
pub struct AuralStyle {
    pub azimuth: Option<Azimuth>,
    pub cue_after: Option<Cue>,
    pub cue_before: Option<Cue>,
    pub elevation: Option<Elevation>,
    pub pause_after: Option<Length>,
    pub pause_before: Option<Length>,
    pub pitch: Option<Pitch>,
    pub pitch_range: Option<Fixed>,
    pub play_during: Option<PlayDuring>,
    pub richness: Option<Fixed>,
    pub speak: Option<Speak>,
    pub speak_header: Option<SpeakHeader>,
    pub speak_numeral: Option<SpeakNumeral>,
    pub speak_punctuation: Option<SpeakPunctuation>,
    pub speech_rate: Option<SpeechRate>,
    pub stress: Option<Fixed>,
    pub voice_family: Option<Vec<VoiceFamily>>,
    pub volume: Option<Volume>,
}

/// A computed style for one node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComputedStyle {
    background_attachment: Option<BackgroundAttachment>,
    background_color: Option<Colour>,
    background_image: Option<ImageRef>,
    background_position: Option<BackgroundPosition>,
    background_repeat: Option<BackgroundRepeat>,
    border_collapse: Option<BorderCollapse>,
    border_top_color: Option<Colour>,
    border_right_color: Option<Colour>,
    border_bottom_color: Option<Colour>,
    border_left_color: Option<Colour>,
    border_top_style: Option<BorderStyle>,
    border_right_style: Option<BorderStyle>,
    border_bottom_style: Option<BorderStyle>,
    border_left_style: Option<BorderStyle>,
    border_top_width: Option<BorderWidth>,
    border_right_width: Option<BorderWidth>,
    border_bottom_width: Option<BorderWidth>,
    border_left_width: Option<BorderWidth>,
    bottom: Option<AutoLength>,
    caption_side: Option<CaptionSide>,
    clear: Option<Clear>,
    color: Option<Colour>,
    direction: Option<Direction>,
    display: Option<Display>,
    empty_cells: Option<EmptyCells>,
    float: Option<Float>,
    font_family: Option<Vec<FontFamily>>,
    font_size: Option<FontSize>,
    font_style: Option<FontStyle>,
    font_variant: Option<FontVariant>,
    font_weight: Option<FontWeight>,
    height: Option<AutoLength>,
    left: Option<AutoLength>,
    line_height: Option<LineHeight>,
    list_style_image: Option<ImageRef>,
    list_style_position: Option<ListStylePosition>,
    list_style_type: Option<ListStyleType>,
    margin_top: Option<AutoLength>,
    margin_right: Option<AutoLength>,
    margin_bottom: Option<AutoLength>,
    margin_left: Option<AutoLength>,
    max_height: Option<MaxSize>,
    max_width: Option<MaxSize>,
    min_height: Option<Length>,
    min_width: Option<Length>,
    outline_style: Option<BorderStyle>,
    overflow: Option<Overflow>,
    padding_top: Option<Length>,
    padding_right: Option<Length>,
    padding_bottom: Option<Length>,
    padding_left: Option<Length>,
    position: Option<Position>,
    right: Option<AutoLength>,
    table_layout: Option<TableLayout>,
    text_align: Option<TextAlign>,
    text_decoration: Option<TextDecoration>,
    text_indent: Option<Length>,
    text_transform: Option<TextTransform>,
    top: Option<AutoLength>,
    unicode_bidi: Option<UnicodeBidi>,
    vertical_align: Option<VerticalAlign>,
    visibility: Option<Visibility>,
    white_space: Option<WhiteSpace>,
    width: Option<AutoLength>,
    z_index: Option<ZIndex>,

    #[serde(skip_serializing_if = "Option::is_none")]
    uncommon: Option<Box<UncommonStyle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<Box<PageStyle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aural: Option<Box<AuralStyle>>,
}

impl ComputedStyle {
    /// A style with every property set to inherit.
    #[must_use]
    pub fn new() -> ComputedStyle {
        ComputedStyle::default()
    }

    direct_accessors! {
        background_attachment: BackgroundAttachment => set_background_attachment,
        background_color: Colour => set_background_color,
        background_image: ImageRef => set_background_image,
        background_position: BackgroundPosition => set_background_position,
        background_repeat: BackgroundRepeat => set_background_repeat,
        border_collapse: BorderCollapse => set_border_collapse,
        border_top_color: Colour => set_border_top_color,
        border_right_color: Colour => set_border_right_color,
        border_bottom_color: Colour => set_border_bottom_color,
        border_left_color: Colour => set_border_left_color,
        border_top_style: BorderStyle => set_border_top_style,
        border_right_style: BorderStyle => set_border_right_style,
        border_bottom_style: BorderStyle => set_border_bottom_style,
        border_left_style: BorderStyle => set_border_left_style,
        border_top_width: BorderWidth => set_border_top_width,
        border_right_width: BorderWidth => set_border_right_width,
        border_bottom_width: BorderWidth => set_border_bottom_width,
        border_left_width: BorderWidth => set_border_left_width,
        bottom: AutoLength => set_bottom,
        caption_side: CaptionSide => set_caption_side,
        clear: Clear => set_clear,
        color: Colour => set_color,
        direction: Direction => set_direction,
        display: Display => set_display,
        empty_cells: EmptyCells => set_empty_cells,
        float: Float => set_float,
        font_family: Vec<FontFamily> => set_font_family,
        font_size: FontSize => set_font_size,
        font_style: FontStyle => set_font_style,
        font_variant: FontVariant => set_font_variant,
        font_weight: FontWeight => set_font_weight,
        height: AutoLength => set_height,
        left: AutoLength => set_left,
        line_height: LineHeight => set_line_height,
        list_style_image: ImageRef => set_list_style_image,
        list_style_position: ListStylePosition => set_list_style_position,
        list_style_type: ListStyleType => set_list_style_type,
        margin_top: AutoLength => set_margin_top,
        margin_right: AutoLength => set_margin_right,
        margin_bottom: AutoLength => set_margin_bottom,
        margin_left: AutoLength => set_margin_left,
        max_height: MaxSize => set_max_height,
        max_width: MaxSize => set_max_width,
        min_height: Length => set_min_height,
        min_width: Length => set_min_width,
        outline_style: BorderStyle => set_outline_style,
        overflow: Overflow => set_overflow,
        padding_top: Length => set_padding_top,
        padding_right: Length => set_padding_right,
        padding_bottom: Length => set_padding_bottom,
        padding_left: Length => set_padding_left,
        position: Position => set_position,
        right: AutoLength => set_right,
        table_layout: TableLayout => set_table_layout,
        text_align: TextAlign => set_text_align,
        text_decoration: TextDecoration => set_text_decoration,
        text_indent: Length => set_text_indent,
        text_transform: TextTransform => set_text_transform,
        top: AutoLength => set_top,
        unicode_bidi: UnicodeBidi => set_unicode_bidi,
        vertical_align: VerticalAlign => set_vertical_align,
        visibility: Visibility => set_visibility,
        white_space: WhiteSpace => set_white_space,
        width: AutoLength => set_width,
        z_index: ZIndex => set_z_index,
    }

    block_accessors! {
        uncommon,
        border_spacing: BorderSpacing => set_border_spacing,
        clip: Clip => set_clip,
        content: Content => set_content,
        counter_increment: CounterList => set_counter_increment,
        counter_reset: CounterList => set_counter_reset,
        cursor: Cursor => set_cursor,
        letter_spacing: Spacing => set_letter_spacing,
        outline_color: OutlineColour => set_outline_color,
        outline_width: BorderWidth => set_outline_width,
        quotes: Quotes => set_quotes,
        word_spacing: Spacing => set_word_spacing,
    }

    block_accessors! {
        page,
        orphans: i32 => set_orphans,
        page_break_after: PageBreak => set_page_break_after,
        page_break_before: PageBreak => set_page_break_before,
        page_break_inside: PageBreakInside => set_page_break_inside,
        widows: i32 => set_widows,
    }

    block_accessors! {
        aural,
        azimuth: Azimuth => set_azimuth,
        cue_after: Cue => set_cue_after,
        cue_before: Cue => set_cue_before,
        elevation: Elevation => set_elevation,
        pause_after: Length => set_pause_after,
        pause_before: Length => set_pause_before,
        pitch: Pitch => set_pitch,
        pitch_range: Fixed => set_pitch_range,
        play_during: PlayDuring => set_play_during,
        richness: Fixed => set_richness,
        speak: Speak => set_speak,
        speak_header: SpeakHeader => set_speak_header,
        speak_numeral: SpeakNumeral => set_speak_numeral,
        speak_punctuation: SpeakPunctuation => set_speak_punctuation,
        speech_rate: SpeechRate => set_speech_rate,
        stress: Fixed => set_stress,
        voice_family: Vec<VoiceFamily> => set_voice_family,
        volume: Volume => set_volume,
    }

    /// Compose a parent and child style: every child property still set
    /// to inherit takes the parent's resolved value. This is the only
    /// place CSS's tree-structured inheritance is realised.
    pub fn compose(parent: &ComputedStyle, child: &ComputedStyle, result: &mut ComputedStyle) {
        macro_rules! inherit_through {
            ($( $get:ident => $set:ident ),* $(,)?) => {
                $( result.$set(child.$get().or_else(|| parent.$get())); )*
            };
        }

        inherit_through! {
            background_attachment => set_background_attachment,
            background_color => set_background_color,
            background_image => set_background_image,
            background_position => set_background_position,
            background_repeat => set_background_repeat,
            border_collapse => set_border_collapse,
            border_top_color => set_border_top_color,
            border_right_color => set_border_right_color,
            border_bottom_color => set_border_bottom_color,
            border_left_color => set_border_left_color,
            border_top_style => set_border_top_style,
            border_right_style => set_border_right_style,
            border_bottom_style => set_border_bottom_style,
            border_left_style => set_border_left_style,
            border_top_width => set_border_top_width,
            border_right_width => set_border_right_width,
            border_bottom_width => set_border_bottom_width,
            border_left_width => set_border_left_width,
            bottom => set_bottom,
            caption_side => set_caption_side,
            clear => set_clear,
            color => set_color,
            direction => set_direction,
            display => set_display,
            empty_cells => set_empty_cells,
            float => set_float,
            font_family => set_font_family,
            font_size => set_font_size,
            font_style => set_font_style,
            font_variant => set_font_variant,
            font_weight => set_font_weight,
            height => set_height,
            left => set_left,
            line_height => set_line_height,
            list_style_image => set_list_style_image,
            list_style_position => set_list_style_position,
            list_style_type => set_list_style_type,
            margin_top => set_margin_top,
            margin_right => set_margin_right,
            margin_bottom => set_margin_bottom,
            margin_left => set_margin_left,
            max_height => set_max_height,
            max_width => set_max_width,
            min_height => set_min_height,
            min_width => set_min_width,
            outline_style => set_outline_style,
            overflow => set_overflow,
            padding_top => set_padding_top,
            padding_right => set_padding_right,
            padding_bottom => set_padding_bottom,
            padding_left => set_padding_left,
            position => set_position,
            right => set_right,
            table_layout => set_table_layout,
            text_align => set_text_align,
            text_decoration => set_text_decoration,
            text_indent => set_text_indent,
            text_transform => set_text_transform,
            top => set_top,
            unicode_bidi => set_unicode_bidi,
            vertical_align => set_vertical_align,
            visibility => set_visibility,
            white_space => set_white_space,
            width => set_width,
            z_index => set_z_index,
            border_spacing => set_border_spacing,
            clip => set_clip,
            content => set_content,
            counter_increment => set_counter_increment,
            counter_reset => set_counter_reset,
            cursor => set_cursor,
            letter_spacing => set_letter_spacing,
            outline_color => set_outline_color,
            outline_width => set_outline_width,
            quotes => set_quotes,
            word_spacing => set_word_spacing,
            orphans => set_orphans,
            page_break_after => set_page_break_after,
            page_break_before => set_page_break_before,
            page_break_inside => set_page_break_inside,
            widows => set_widows,
            azimuth => set_azimuth,
            cue_after => set_cue_after,
            cue_before => set_cue_before,
            elevation => set_elevation,
            pause_after => set_pause_after,
            pause_before => set_pause_before,
            pitch => set_pitch,
            pitch_range => set_pitch_range,
            play_during => set_play_during,
            richness => set_richness,
            speak => set_speak,
            speak_header => set_speak_header,
            speak_numeral => set_speak_numeral,
            speak_punctuation => set_speak_punctuation,
            speech_rate => set_speech_rate,
            stress => set_stress,
            voice_family => set_voice_family,
            volume => set_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unit;

    #[test]
    fn fresh_style_inherits_everything() {
        let style = ComputedStyle::new();
        assert!(style.color().is_none());
        assert!(style.display().is_none());
        assert!(style.letter_spacing().is_none());
        assert!(style.volume().is_none());
    }

    #[test]
    fn lazy_blocks_allocate_on_first_write() {
        let mut style = ComputedStyle::new();
        assert!(style.uncommon.is_none());

        // Writing inherit to an absent block stays absent.
        style.set_letter_spacing(None);
        assert!(style.uncommon.is_none());

        style.set_letter_spacing(Some(Spacing::Normal));
        assert!(style.uncommon.is_some());
        assert_eq!(style.letter_spacing(), Some(Spacing::Normal));
    }

    #[test]
    fn compose_prefers_child_values() {
        let mut parent = ComputedStyle::new();
        parent.set_color(Some(Colour::rgb(0xFF, 0, 0)));
        parent.set_display(Some(Display::Block));

        let mut child = ComputedStyle::new();
        child.set_display(Some(Display::Inline));

        let mut result = ComputedStyle::new();
        ComputedStyle::compose(&parent, &child, &mut result);

        // Child inherit resolves from the parent; child's own value
        // wins otherwise.
        assert_eq!(result.color(), Some(Colour::rgb(0xFF, 0, 0)));
        assert_eq!(result.display(), Some(Display::Inline));
    }

    #[test]
    fn compose_keeps_inherit_only_when_parent_inherits() {
        let parent = ComputedStyle::new();
        let mut child = ComputedStyle::new();
        child.set_width(Some(AutoLength::Length(Length::new(
            Fixed::from_int(10),
            Unit::Px,
        ))));

        let mut result = ComputedStyle::new();
        ComputedStyle::compose(&parent, &child, &mut result);

        assert!(result.color().is_none());
        assert!(result.width().is_some());
    }
}
