//! Per-property value discriminants and operand layouts.
//!
//! The value field of an OPV discriminates, per property, which form the
//! declaration took and therefore which operand words follow. The
//! constants here are the complete catalogue; [`skip_value`] is the
//! layout oracle — given an OPV it consumes exactly the operand words
//! that OPV declares, which is what makes bytecode decodable without any
//! out-of-band information.
//!
//! List-valued properties interleave data with further OPV words: the
//! head OPV's value gives the first item's kind, each item's operands
//! follow it, and the next OPV word gives the following item's kind.
//! A property-specific sentinel kind terminates the list.

use super::{Opcode, Opv, SIDE_MASK, StyleIter};
use crate::error::Result;

// azimuth
/// `left-side`
pub const AZIMUTH_LEFT_SIDE: u16 = 0x00;
/// `far-left`
pub const AZIMUTH_FAR_LEFT: u16 = 0x01;
/// `left`
pub const AZIMUTH_LEFT: u16 = 0x02;
/// `center-left`
pub const AZIMUTH_CENTER_LEFT: u16 = 0x03;
/// `center`
pub const AZIMUTH_CENTER: u16 = 0x04;
/// `center-right`
pub const AZIMUTH_CENTER_RIGHT: u16 = 0x05;
/// `right`
pub const AZIMUTH_RIGHT: u16 = 0x06;
/// `far-right`
pub const AZIMUTH_FAR_RIGHT: u16 = 0x07;
/// `right-side`
pub const AZIMUTH_RIGHT_SIDE: u16 = 0x08;
/// `leftwards`
pub const AZIMUTH_LEFTWARDS: u16 = 0x09;
/// `rightwards`
pub const AZIMUTH_RIGHTWARDS: u16 = 0x0A;
/// An explicit angle follows (fixed, unit).
pub const AZIMUTH_ANGLE: u16 = 0x0B;
/// `behind` modifier bit, combinable with the position keywords.
pub const AZIMUTH_BEHIND: u16 = 0x10;

// background-attachment
/// `fixed`
pub const BACKGROUND_ATTACHMENT_FIXED: u16 = 0;
/// `scroll`
pub const BACKGROUND_ATTACHMENT_SCROLL: u16 = 1;

// background-color
/// `transparent`
pub const BACKGROUND_COLOR_TRANSPARENT: u16 = 0;
/// A colour word follows.
pub const BACKGROUND_COLOR_SET: u16 = 1;

// background-image
/// `none`
pub const BACKGROUND_IMAGE_NONE: u16 = 0;
/// A string reference follows.
pub const BACKGROUND_IMAGE_URI: u16 = 1;

// background-position: horizontal kind in bits 0-3, vertical in bits 4-7
/// Horizontal operand (fixed, unit) follows.
pub const BACKGROUND_POSITION_HORZ_SET: u16 = 0x0;
/// `left`
pub const BACKGROUND_POSITION_HORZ_LEFT: u16 = 0x1;
/// `right`
pub const BACKGROUND_POSITION_HORZ_RIGHT: u16 = 0x2;
/// `center` (horizontal)
pub const BACKGROUND_POSITION_HORZ_CENTER: u16 = 0x3;
/// Vertical operand (fixed, unit) follows.
pub const BACKGROUND_POSITION_VERT_SET: u16 = 0x0 << 4;
/// `top`
pub const BACKGROUND_POSITION_VERT_TOP: u16 = 0x1 << 4;
/// `bottom`
pub const BACKGROUND_POSITION_VERT_BOTTOM: u16 = 0x2 << 4;
/// `center` (vertical)
pub const BACKGROUND_POSITION_VERT_CENTER: u16 = 0x3 << 4;

// background-repeat
/// `repeat`
pub const BACKGROUND_REPEAT_REPEAT: u16 = 0;
/// `repeat-x`
pub const BACKGROUND_REPEAT_REPEAT_X: u16 = 1;
/// `repeat-y`
pub const BACKGROUND_REPEAT_REPEAT_Y: u16 = 2;
/// `no-repeat`
pub const BACKGROUND_REPEAT_NO_REPEAT: u16 = 3;

// border-collapse
/// `collapse`
pub const BORDER_COLLAPSE_COLLAPSE: u16 = 0;
/// `separate`
pub const BORDER_COLLAPSE_SEPARATE: u16 = 1;

// border-spacing
/// Two (fixed, unit) pairs follow.
pub const BORDER_SPACING_SET: u16 = 0;

// border-{side}-color (side in bits 8-9)
/// `transparent`
pub const BORDER_COLOR_TRANSPARENT: u16 = 0;
/// A colour word follows.
pub const BORDER_COLOR_SET: u16 = 1;

// border-{side}-style / outline-style (side in bits 8-9 for borders)
/// `none`
pub const BORDER_STYLE_NONE: u16 = 0;
/// `hidden`
pub const BORDER_STYLE_HIDDEN: u16 = 1;
/// `dotted`
pub const BORDER_STYLE_DOTTED: u16 = 2;
/// `dashed`
pub const BORDER_STYLE_DASHED: u16 = 3;
/// `solid`
pub const BORDER_STYLE_SOLID: u16 = 4;
/// `double`
pub const BORDER_STYLE_DOUBLE: u16 = 5;
/// `groove`
pub const BORDER_STYLE_GROOVE: u16 = 6;
/// `ridge`
pub const BORDER_STYLE_RIDGE: u16 = 7;
/// `inset`
pub const BORDER_STYLE_INSET: u16 = 8;
/// `outset`
pub const BORDER_STYLE_OUTSET: u16 = 9;

// border-{side}-width / outline-width (side in bits 8-9 for borders)
/// A (fixed, unit) pair follows.
pub const BORDER_WIDTH_SET: u16 = 0;
/// `thin`
pub const BORDER_WIDTH_THIN: u16 = 1;
/// `medium`
pub const BORDER_WIDTH_MEDIUM: u16 = 2;
/// `thick`
pub const BORDER_WIDTH_THICK: u16 = 3;

// bottom / left / right / top / height / width and friends
/// A (fixed, unit) pair follows.
pub const OFFSET_SET: u16 = 0;
/// `auto`
pub const OFFSET_AUTO: u16 = 1;

// caption-side
/// `top`
pub const CAPTION_SIDE_TOP: u16 = 0;
/// `bottom`
pub const CAPTION_SIDE_BOTTOM: u16 = 1;

// clear
/// `none`
pub const CLEAR_NONE: u16 = 0;
/// `left`
pub const CLEAR_LEFT: u16 = 1;
/// `right`
pub const CLEAR_RIGHT: u16 = 2;
/// `both`
pub const CLEAR_BOTH: u16 = 3;

// clip
/// `auto`
pub const CLIP_AUTO: u16 = 0;
/// `rect(...)`; a (fixed, unit) pair follows for each non-auto side.
pub const CLIP_SHAPE_RECT: u16 = 1;
/// The rect's top component is `auto`.
pub const CLIP_RECT_TOP_AUTO: u16 = 1 << 4;
/// The rect's right component is `auto`.
pub const CLIP_RECT_RIGHT_AUTO: u16 = 1 << 5;
/// The rect's bottom component is `auto`.
pub const CLIP_RECT_BOTTOM_AUTO: u16 = 1 << 6;
/// The rect's left component is `auto`.
pub const CLIP_RECT_LEFT_AUTO: u16 = 1 << 7;

// color
/// A colour word follows.
pub const COLOR_SET: u16 = 0;

// content — list property; kinds below, NORMAL terminates
/// `normal`; also the list terminator.
pub const CONTENT_NORMAL: u16 = 0;
/// `none`
pub const CONTENT_NONE: u16 = 1;
/// A string reference follows.
pub const CONTENT_STRING: u16 = 2;
/// A string reference (URL) follows.
pub const CONTENT_URI: u16 = 3;
/// `attr(...)`; a string reference follows.
pub const CONTENT_ATTR: u16 = 4;
/// `counter(name)`; a string reference and a list-style-type word follow.
pub const CONTENT_COUNTER: u16 = 5;
/// `counters(name, sep)`; two string references and a style word follow.
pub const CONTENT_COUNTERS: u16 = 6;
/// `open-quote`
pub const CONTENT_OPEN_QUOTE: u16 = 7;
/// `close-quote`
pub const CONTENT_CLOSE_QUOTE: u16 = 8;
/// `no-open-quote`
pub const CONTENT_NO_OPEN_QUOTE: u16 = 9;
/// `no-close-quote`
pub const CONTENT_NO_CLOSE_QUOTE: u16 = 10;

// counter-increment / counter-reset — list property
/// `none`; also the list terminator.
pub const COUNTER_NONE: u16 = 0;
/// A (string reference, fixed) pair follows.
pub const COUNTER_NAMED: u16 = 1;

// cue-after / cue-before
/// `none`
pub const CUE_NONE: u16 = 0;
/// A string reference follows.
pub const CUE_URI: u16 = 1;

// cursor — list property; URI items continue, keyword items terminate
/// A string reference follows; another item comes after.
pub const CURSOR_URI: u16 = 0;
/// `auto`
pub const CURSOR_AUTO: u16 = 1;
/// `crosshair`
pub const CURSOR_CROSSHAIR: u16 = 2;
/// `default`
pub const CURSOR_DEFAULT: u16 = 3;
/// `pointer`
pub const CURSOR_POINTER: u16 = 4;
/// `move`
pub const CURSOR_MOVE: u16 = 5;
/// `e-resize`
pub const CURSOR_E_RESIZE: u16 = 6;
/// `ne-resize`
pub const CURSOR_NE_RESIZE: u16 = 7;
/// `nw-resize`
pub const CURSOR_NW_RESIZE: u16 = 8;
/// `n-resize`
pub const CURSOR_N_RESIZE: u16 = 9;
/// `se-resize`
pub const CURSOR_SE_RESIZE: u16 = 10;
/// `sw-resize`
pub const CURSOR_SW_RESIZE: u16 = 11;
/// `s-resize`
pub const CURSOR_S_RESIZE: u16 = 12;
/// `w-resize`
pub const CURSOR_W_RESIZE: u16 = 13;
/// `text`
pub const CURSOR_TEXT: u16 = 14;
/// `wait`
pub const CURSOR_WAIT: u16 = 15;
/// `help`
pub const CURSOR_HELP: u16 = 16;
/// `progress`
pub const CURSOR_PROGRESS: u16 = 17;

// direction
/// `ltr`
pub const DIRECTION_LTR: u16 = 0;
/// `rtl`
pub const DIRECTION_RTL: u16 = 1;

// display
/// `inline`
pub const DISPLAY_INLINE: u16 = 0;
/// `block`
pub const DISPLAY_BLOCK: u16 = 1;
/// `list-item`
pub const DISPLAY_LIST_ITEM: u16 = 2;
/// `run-in`
pub const DISPLAY_RUN_IN: u16 = 3;
/// `inline-block`
pub const DISPLAY_INLINE_BLOCK: u16 = 4;
/// `table`
pub const DISPLAY_TABLE: u16 = 5;
/// `inline-table`
pub const DISPLAY_INLINE_TABLE: u16 = 6;
/// `table-row-group`
pub const DISPLAY_TABLE_ROW_GROUP: u16 = 7;
/// `table-header-group`
pub const DISPLAY_TABLE_HEADER_GROUP: u16 = 8;
/// `table-footer-group`
pub const DISPLAY_TABLE_FOOTER_GROUP: u16 = 9;
/// `table-row`
pub const DISPLAY_TABLE_ROW: u16 = 10;
/// `table-column-group`
pub const DISPLAY_TABLE_COLUMN_GROUP: u16 = 11;
/// `table-column`
pub const DISPLAY_TABLE_COLUMN: u16 = 12;
/// `table-cell`
pub const DISPLAY_TABLE_CELL: u16 = 13;
/// `table-caption`
pub const DISPLAY_TABLE_CAPTION: u16 = 14;
/// `none`
pub const DISPLAY_NONE: u16 = 15;

// elevation
/// An angle follows (fixed, unit).
pub const ELEVATION_ANGLE: u16 = 0;
/// `below`
pub const ELEVATION_BELOW: u16 = 1;
/// `level`
pub const ELEVATION_LEVEL: u16 = 2;
/// `above`
pub const ELEVATION_ABOVE: u16 = 3;
/// `higher`
pub const ELEVATION_HIGHER: u16 = 4;
/// `lower`
pub const ELEVATION_LOWER: u16 = 5;

// empty-cells
/// `show`
pub const EMPTY_CELLS_SHOW: u16 = 0;
/// `hide`
pub const EMPTY_CELLS_HIDE: u16 = 1;

// float
/// `none`
pub const FLOAT_NONE: u16 = 0;
/// `left`
pub const FLOAT_LEFT: u16 = 1;
/// `right`
pub const FLOAT_RIGHT: u16 = 2;

// font-family — list property; END terminates
/// List terminator.
pub const FONT_FAMILY_END: u16 = 0;
/// A quoted family name; string reference follows.
pub const FONT_FAMILY_STRING: u16 = 1;
/// An unquoted family name; string reference follows.
pub const FONT_FAMILY_IDENT_LIST: u16 = 2;
/// `serif`
pub const FONT_FAMILY_SERIF: u16 = 3;
/// `sans-serif`
pub const FONT_FAMILY_SANS_SERIF: u16 = 4;
/// `cursive`
pub const FONT_FAMILY_CURSIVE: u16 = 5;
/// `fantasy`
pub const FONT_FAMILY_FANTASY: u16 = 6;
/// `monospace`
pub const FONT_FAMILY_MONOSPACE: u16 = 7;

// font-size
/// A (fixed, unit) pair follows.
pub const FONT_SIZE_DIMENSION: u16 = 0;
/// `xx-small`
pub const FONT_SIZE_XX_SMALL: u16 = 1;
/// `x-small`
pub const FONT_SIZE_X_SMALL: u16 = 2;
/// `small`
pub const FONT_SIZE_SMALL: u16 = 3;
/// `medium`
pub const FONT_SIZE_MEDIUM: u16 = 4;
/// `large`
pub const FONT_SIZE_LARGE: u16 = 5;
/// `x-large`
pub const FONT_SIZE_X_LARGE: u16 = 6;
/// `xx-large`
pub const FONT_SIZE_XX_LARGE: u16 = 7;
/// `larger`
pub const FONT_SIZE_LARGER: u16 = 8;
/// `smaller`
pub const FONT_SIZE_SMALLER: u16 = 9;

// font-style
/// `normal`
pub const FONT_STYLE_NORMAL: u16 = 0;
/// `italic`
pub const FONT_STYLE_ITALIC: u16 = 1;
/// `oblique`
pub const FONT_STYLE_OBLIQUE: u16 = 2;

// font-variant
/// `normal`
pub const FONT_VARIANT_NORMAL: u16 = 0;
/// `small-caps`
pub const FONT_VARIANT_SMALL_CAPS: u16 = 1;

// font-weight
/// `normal`
pub const FONT_WEIGHT_NORMAL: u16 = 0;
/// `bold`
pub const FONT_WEIGHT_BOLD: u16 = 1;
/// `bolder`
pub const FONT_WEIGHT_BOLDER: u16 = 2;
/// `lighter`
pub const FONT_WEIGHT_LIGHTER: u16 = 3;
/// `100`
pub const FONT_WEIGHT_100: u16 = 4;
/// `200`
pub const FONT_WEIGHT_200: u16 = 5;
/// `300`
pub const FONT_WEIGHT_300: u16 = 6;
/// `400`
pub const FONT_WEIGHT_400: u16 = 7;
/// `500`
pub const FONT_WEIGHT_500: u16 = 8;
/// `600`
pub const FONT_WEIGHT_600: u16 = 9;
/// `700`
pub const FONT_WEIGHT_700: u16 = 10;
/// `800`
pub const FONT_WEIGHT_800: u16 = 11;
/// `900`
pub const FONT_WEIGHT_900: u16 = 12;

// letter-spacing / word-spacing
/// A (fixed, unit) pair follows.
pub const SPACING_SET: u16 = 0;
/// `normal`
pub const SPACING_NORMAL: u16 = 1;

// line-height
/// A bare number follows (fixed).
pub const LINE_HEIGHT_NUMBER: u16 = 0;
/// A (fixed, unit) pair follows.
pub const LINE_HEIGHT_DIMENSION: u16 = 1;
/// `normal`
pub const LINE_HEIGHT_NORMAL: u16 = 2;

// list-style-image
/// A string reference follows.
pub const LIST_STYLE_IMAGE_URI: u16 = 0;
/// `none`
pub const LIST_STYLE_IMAGE_NONE: u16 = 1;

// list-style-position
/// `inside`
pub const LIST_STYLE_POSITION_INSIDE: u16 = 0;
/// `outside`
pub const LIST_STYLE_POSITION_OUTSIDE: u16 = 1;

// list-style-type
/// `disc`
pub const LIST_STYLE_TYPE_DISC: u16 = 0;
/// `circle`
pub const LIST_STYLE_TYPE_CIRCLE: u16 = 1;
/// `square`
pub const LIST_STYLE_TYPE_SQUARE: u16 = 2;
/// `decimal`
pub const LIST_STYLE_TYPE_DECIMAL: u16 = 3;
/// `decimal-leading-zero`
pub const LIST_STYLE_TYPE_DECIMAL_LEADING_ZERO: u16 = 4;
/// `lower-roman`
pub const LIST_STYLE_TYPE_LOWER_ROMAN: u16 = 5;
/// `upper-roman`
pub const LIST_STYLE_TYPE_UPPER_ROMAN: u16 = 6;
/// `lower-greek`
pub const LIST_STYLE_TYPE_LOWER_GREEK: u16 = 7;
/// `lower-latin`
pub const LIST_STYLE_TYPE_LOWER_LATIN: u16 = 8;
/// `upper-latin`
pub const LIST_STYLE_TYPE_UPPER_LATIN: u16 = 9;
/// `armenian`
pub const LIST_STYLE_TYPE_ARMENIAN: u16 = 10;
/// `georgian`
pub const LIST_STYLE_TYPE_GEORGIAN: u16 = 11;
/// `lower-alpha`
pub const LIST_STYLE_TYPE_LOWER_ALPHA: u16 = 12;
/// `upper-alpha`
pub const LIST_STYLE_TYPE_UPPER_ALPHA: u16 = 13;
/// `none`
pub const LIST_STYLE_TYPE_NONE: u16 = 14;

// margin (side in bits 8-9)
/// A (fixed, unit) pair follows.
pub const MARGIN_SET: u16 = 0;
/// `auto`
pub const MARGIN_AUTO: u16 = 1;

// max-height / max-width
/// A (fixed, unit) pair follows.
pub const MAX_SIZE_SET: u16 = 0;
/// `none`
pub const MAX_SIZE_NONE: u16 = 1;

// min-height / min-width
/// A (fixed, unit) pair follows.
pub const MIN_SIZE_SET: u16 = 0;

// orphans / widows / pitch-range / richness / stress
/// An integer follows (fixed).
pub const INTEGER_SET: u16 = 0;

// outline-color
/// A colour word follows.
pub const OUTLINE_COLOR_SET: u16 = 0;
/// `invert`
pub const OUTLINE_COLOR_INVERT: u16 = 1;

// overflow
/// `visible`
pub const OVERFLOW_VISIBLE: u16 = 0;
/// `hidden`
pub const OVERFLOW_HIDDEN: u16 = 1;
/// `scroll`
pub const OVERFLOW_SCROLL: u16 = 2;
/// `auto`
pub const OVERFLOW_AUTO: u16 = 3;

// padding (side in bits 8-9)
/// A (fixed, unit) pair follows.
pub const PADDING_SET: u16 = 0;

// page-break-after / page-break-before
/// `auto`
pub const PAGE_BREAK_AUTO: u16 = 0;
/// `always`
pub const PAGE_BREAK_ALWAYS: u16 = 1;
/// `avoid`
pub const PAGE_BREAK_AVOID: u16 = 2;
/// `left`
pub const PAGE_BREAK_LEFT: u16 = 3;
/// `right`
pub const PAGE_BREAK_RIGHT: u16 = 4;

// pause-after / pause-before
/// A (fixed, unit) pair follows (time or percentage).
pub const PAUSE_SET: u16 = 0;

// pitch
/// A frequency follows (fixed, unit).
pub const PITCH_FREQUENCY: u16 = 0;
/// `x-low`
pub const PITCH_X_LOW: u16 = 1;
/// `low`
pub const PITCH_LOW: u16 = 2;
/// `medium`
pub const PITCH_MEDIUM: u16 = 3;
/// `high`
pub const PITCH_HIGH: u16 = 4;
/// `x-high`
pub const PITCH_X_HIGH: u16 = 5;

// play-during: type in bits 0-4, modifier bits above
/// A string reference follows.
pub const PLAY_DURING_URI: u16 = 0;
/// `auto`
pub const PLAY_DURING_AUTO: u16 = 1;
/// `none`
pub const PLAY_DURING_NONE: u16 = 2;
/// Mask selecting the type bits.
pub const PLAY_DURING_TYPE_MASK: u16 = 0x1F;
/// `mix` modifier.
pub const PLAY_DURING_MIX: u16 = 1 << 5;
/// `repeat` modifier.
pub const PLAY_DURING_REPEAT: u16 = 1 << 6;

// position
/// `static`
pub const POSITION_STATIC: u16 = 0;
/// `relative`
pub const POSITION_RELATIVE: u16 = 1;
/// `absolute`
pub const POSITION_ABSOLUTE: u16 = 2;
/// `fixed`
pub const POSITION_FIXED: u16 = 3;

// quotes — list property; NONE terminates
/// `none`; also the list terminator.
pub const QUOTES_NONE: u16 = 0;
/// An open/close string-reference pair follows.
pub const QUOTES_STRING: u16 = 1;

// speak-header
/// `once`
pub const SPEAK_HEADER_ONCE: u16 = 0;
/// `always`
pub const SPEAK_HEADER_ALWAYS: u16 = 1;

// speak-numeral
/// `digits`
pub const SPEAK_NUMERAL_DIGITS: u16 = 0;
/// `continuous`
pub const SPEAK_NUMERAL_CONTINUOUS: u16 = 1;

// speak-punctuation
/// `code`
pub const SPEAK_PUNCTUATION_CODE: u16 = 0;
/// `none`
pub const SPEAK_PUNCTUATION_NONE: u16 = 1;

// speak
/// `normal`
pub const SPEAK_NORMAL: u16 = 0;
/// `none`
pub const SPEAK_NONE: u16 = 1;
/// `spell-out`
pub const SPEAK_SPELL_OUT: u16 = 2;

// speech-rate
/// A number follows (fixed).
pub const SPEECH_RATE_SET: u16 = 0;
/// `x-slow`
pub const SPEECH_RATE_X_SLOW: u16 = 1;
/// `slow`
pub const SPEECH_RATE_SLOW: u16 = 2;
/// `medium`
pub const SPEECH_RATE_MEDIUM: u16 = 3;
/// `fast`
pub const SPEECH_RATE_FAST: u16 = 4;
/// `x-fast`
pub const SPEECH_RATE_X_FAST: u16 = 5;
/// `faster`
pub const SPEECH_RATE_FASTER: u16 = 6;
/// `slower`
pub const SPEECH_RATE_SLOWER: u16 = 7;

// table-layout
/// `auto`
pub const TABLE_LAYOUT_AUTO: u16 = 0;
/// `fixed`
pub const TABLE_LAYOUT_FIXED: u16 = 1;

// text-align
/// `left`
pub const TEXT_ALIGN_LEFT: u16 = 0;
/// `right`
pub const TEXT_ALIGN_RIGHT: u16 = 1;
/// `center`
pub const TEXT_ALIGN_CENTER: u16 = 2;
/// `justify`
pub const TEXT_ALIGN_JUSTIFY: u16 = 3;

// text-decoration: a bitset, or NONE
/// `underline`
pub const TEXT_DECORATION_UNDERLINE: u16 = 1 << 0;
/// `overline`
pub const TEXT_DECORATION_OVERLINE: u16 = 1 << 1;
/// `line-through`
pub const TEXT_DECORATION_LINE_THROUGH: u16 = 1 << 2;
/// `blink`
pub const TEXT_DECORATION_BLINK: u16 = 1 << 3;
/// `none`
pub const TEXT_DECORATION_NONE: u16 = 1 << 4;

// text-indent
/// A (fixed, unit) pair follows.
pub const TEXT_INDENT_SET: u16 = 0;

// text-transform
/// `capitalize`
pub const TEXT_TRANSFORM_CAPITALIZE: u16 = 0;
/// `uppercase`
pub const TEXT_TRANSFORM_UPPERCASE: u16 = 1;
/// `lowercase`
pub const TEXT_TRANSFORM_LOWERCASE: u16 = 2;
/// `none`
pub const TEXT_TRANSFORM_NONE: u16 = 3;

// unicode-bidi
/// `normal`
pub const UNICODE_BIDI_NORMAL: u16 = 0;
/// `embed`
pub const UNICODE_BIDI_EMBED: u16 = 1;
/// `bidi-override`
pub const UNICODE_BIDI_BIDI_OVERRIDE: u16 = 2;

// vertical-align
/// A (fixed, unit) pair follows.
pub const VERTICAL_ALIGN_SET: u16 = 0;
/// `baseline`
pub const VERTICAL_ALIGN_BASELINE: u16 = 1;
/// `sub`
pub const VERTICAL_ALIGN_SUB: u16 = 2;
/// `super`
pub const VERTICAL_ALIGN_SUPER: u16 = 3;
/// `top`
pub const VERTICAL_ALIGN_TOP: u16 = 4;
/// `text-top`
pub const VERTICAL_ALIGN_TEXT_TOP: u16 = 5;
/// `middle`
pub const VERTICAL_ALIGN_MIDDLE: u16 = 6;
/// `bottom`
pub const VERTICAL_ALIGN_BOTTOM: u16 = 7;
/// `text-bottom`
pub const VERTICAL_ALIGN_TEXT_BOTTOM: u16 = 8;

// visibility
/// `visible`
pub const VISIBILITY_VISIBLE: u16 = 0;
/// `hidden`
pub const VISIBILITY_HIDDEN: u16 = 1;
/// `collapse`
pub const VISIBILITY_COLLAPSE: u16 = 2;

// voice-family — list property; END terminates
/// List terminator.
pub const VOICE_FAMILY_END: u16 = 0;
/// A quoted voice name; string reference follows.
pub const VOICE_FAMILY_STRING: u16 = 1;
/// An unquoted voice name; string reference follows.
pub const VOICE_FAMILY_IDENT_LIST: u16 = 2;
/// `male`
pub const VOICE_FAMILY_MALE: u16 = 3;
/// `female`
pub const VOICE_FAMILY_FEMALE: u16 = 4;
/// `child`
pub const VOICE_FAMILY_CHILD: u16 = 5;

// volume
/// A bare number follows (fixed).
pub const VOLUME_NUMBER: u16 = 0;
/// A (fixed, unit) pair follows (percentage).
pub const VOLUME_DIMENSION: u16 = 1;
/// `silent`
pub const VOLUME_SILENT: u16 = 2;
/// `x-soft`
pub const VOLUME_X_SOFT: u16 = 3;
/// `soft`
pub const VOLUME_SOFT: u16 = 4;
/// `medium`
pub const VOLUME_MEDIUM: u16 = 5;
/// `loud`
pub const VOLUME_LOUD: u16 = 6;
/// `x-loud`
pub const VOLUME_X_LOUD: u16 = 7;

// white-space
/// `normal`
pub const WHITE_SPACE_NORMAL: u16 = 0;
/// `pre`
pub const WHITE_SPACE_PRE: u16 = 1;
/// `nowrap`
pub const WHITE_SPACE_NOWRAP: u16 = 2;
/// `pre-wrap`
pub const WHITE_SPACE_PRE_WRAP: u16 = 3;
/// `pre-line`
pub const WHITE_SPACE_PRE_LINE: u16 = 4;

// z-index
/// An integer follows (fixed).
pub const Z_INDEX_SET: u16 = 0;
/// `auto`
pub const Z_INDEX_AUTO: u16 = 1;

/// Consume the operand words (and list continuation OPVs) declared by an
/// OPV, leaving the iterator on the next declaration's OPV.
///
/// # Errors
///
/// `Invalid` when the style ends inside the operands the OPV declares —
/// which a well-formed style never does.
#[allow(clippy::too_many_lines)]
pub fn skip_value(op: Opcode, opv: Opv, iter: &mut StyleIter<'_>) -> Result<()> {
    if opv.is_inherit() {
        return Ok(());
    }

    let value = opv.value();

    match op {
        // No operands ever.
        Opcode::BackgroundAttachment
        | Opcode::BackgroundRepeat
        | Opcode::BorderCollapse
        | Opcode::BorderTrblStyle
        | Opcode::CaptionSide
        | Opcode::Clear
        | Opcode::Direction
        | Opcode::Display
        | Opcode::EmptyCells
        | Opcode::Float
        | Opcode::FontStyle
        | Opcode::FontVariant
        | Opcode::FontWeight
        | Opcode::ListStylePosition
        | Opcode::ListStyleType
        | Opcode::Overflow
        | Opcode::OutlineStyle
        | Opcode::PageBreakAfter
        | Opcode::PageBreakBefore
        | Opcode::PageBreakInside
        | Opcode::Position
        | Opcode::SpeakHeader
        | Opcode::SpeakNumeral
        | Opcode::SpeakPunctuation
        | Opcode::Speak
        | Opcode::TableLayout
        | Opcode::TextAlign
        | Opcode::TextDecoration
        | Opcode::TextTransform
        | Opcode::UnicodeBidi
        | Opcode::Visibility
        | Opcode::WhiteSpace => Ok(()),

        // One colour word when set.
        Opcode::BackgroundColor => skip_if(iter, value == BACKGROUND_COLOR_SET, 1),
        Opcode::BorderTrblColor => {
            skip_if(iter, value & !SIDE_MASK == BORDER_COLOR_SET, 1)
        }
        Opcode::Color => skip_if(iter, value == COLOR_SET, 1),
        Opcode::OutlineColor => skip_if(iter, value == OUTLINE_COLOR_SET, 1),

        // One string reference when set.
        Opcode::BackgroundImage => skip_if(iter, value == BACKGROUND_IMAGE_URI, 1),
        Opcode::CueAfter | Opcode::CueBefore => skip_if(iter, value == CUE_URI, 1),
        Opcode::ListStyleImage => skip_if(iter, value == LIST_STYLE_IMAGE_URI, 1),
        Opcode::PlayDuring => {
            skip_if(iter, value & PLAY_DURING_TYPE_MASK == PLAY_DURING_URI, 1)
        }

        // One (fixed, unit) pair when set.
        Opcode::Bottom | Opcode::Left | Opcode::Right | Opcode::Top => {
            skip_if(iter, value == OFFSET_SET, 2)
        }
        Opcode::BorderTrblWidth => {
            skip_if(iter, value & !SIDE_MASK == BORDER_WIDTH_SET, 2)
        }
        Opcode::Elevation => skip_if(iter, value == ELEVATION_ANGLE, 2),
        Opcode::FontSize => skip_if(iter, value == FONT_SIZE_DIMENSION, 2),
        Opcode::Height | Opcode::Width => skip_if(iter, value == OFFSET_SET, 2),
        Opcode::LetterSpacing | Opcode::WordSpacing => {
            skip_if(iter, value == SPACING_SET, 2)
        }
        Opcode::MarginTrbl => skip_if(iter, value & !SIDE_MASK == MARGIN_SET, 2),
        Opcode::MaxHeight | Opcode::MaxWidth => skip_if(iter, value == MAX_SIZE_SET, 2),
        Opcode::MinHeight | Opcode::MinWidth => skip_if(iter, value == MIN_SIZE_SET, 2),
        Opcode::OutlineWidth => skip_if(iter, value == BORDER_WIDTH_SET, 2),
        Opcode::PaddingTrbl => skip_if(iter, value & !SIDE_MASK == PADDING_SET, 2),
        Opcode::PauseAfter | Opcode::PauseBefore => skip_if(iter, value == PAUSE_SET, 2),
        Opcode::Pitch => skip_if(iter, value == PITCH_FREQUENCY, 2),
        Opcode::TextIndent => skip_if(iter, value == TEXT_INDENT_SET, 2),
        Opcode::VerticalAlign => skip_if(iter, value == VERTICAL_ALIGN_SET, 2),
        Opcode::Azimuth => skip_if(iter, value & 0xF == AZIMUTH_ANGLE, 2),

        // One bare fixed word when set.
        Opcode::Orphans
        | Opcode::Widows
        | Opcode::PitchRange
        | Opcode::Richness
        | Opcode::Stress => skip_if(iter, value == INTEGER_SET, 1),
        Opcode::SpeechRate => skip_if(iter, value == SPEECH_RATE_SET, 1),
        Opcode::ZIndex => skip_if(iter, value == Z_INDEX_SET, 1),

        // Fixed operand counts beyond one pair.
        Opcode::BorderSpacing => skip_if(iter, value == BORDER_SPACING_SET, 4),

        Opcode::LineHeight => match value {
            LINE_HEIGHT_NUMBER => skip_n(iter, 1),
            LINE_HEIGHT_DIMENSION => skip_n(iter, 2),
            _ => Ok(()),
        },

        Opcode::Volume => match value {
            VOLUME_NUMBER => skip_n(iter, 1),
            VOLUME_DIMENSION => skip_n(iter, 2),
            _ => Ok(()),
        },

        Opcode::BackgroundPosition => {
            let mut n = 0;
            if value & 0xF == BACKGROUND_POSITION_HORZ_SET {
                n += 2;
            }
            if value & 0xF0 == BACKGROUND_POSITION_VERT_SET {
                n += 2;
            }
            skip_n(iter, n)
        }

        Opcode::Clip => {
            if value & 0xF != CLIP_SHAPE_RECT {
                return Ok(());
            }
            let mut n = 0;
            for auto_bit in [
                CLIP_RECT_TOP_AUTO,
                CLIP_RECT_RIGHT_AUTO,
                CLIP_RECT_BOTTOM_AUTO,
                CLIP_RECT_LEFT_AUTO,
            ] {
                if value & auto_bit == 0 {
                    n += 2;
                }
            }
            skip_n(iter, n)
        }

        // List properties.
        Opcode::Content => {
            let mut kind = value;
            loop {
                match kind {
                    CONTENT_NORMAL | CONTENT_NONE => return Ok(()),
                    CONTENT_STRING | CONTENT_URI | CONTENT_ATTR => skip_n(iter, 1)?,
                    CONTENT_COUNTER => skip_n(iter, 2)?,
                    CONTENT_COUNTERS => skip_n(iter, 3)?,
                    _ => {}
                }
                kind = Opv::from_raw(iter.expect_word()?).value();
            }
        }

        Opcode::CounterIncrement | Opcode::CounterReset => {
            let mut kind = value;
            while kind == COUNTER_NAMED {
                skip_n(iter, 2)?;
                kind = Opv::from_raw(iter.expect_word()?).value();
            }
            Ok(())
        }

        Opcode::Cursor => {
            let mut kind = value;
            while kind == CURSOR_URI {
                skip_n(iter, 1)?;
                kind = Opv::from_raw(iter.expect_word()?).value();
            }
            Ok(())
        }

        Opcode::FontFamily | Opcode::VoiceFamily => {
            let mut kind = value;
            while kind != FONT_FAMILY_END {
                if kind == FONT_FAMILY_STRING || kind == FONT_FAMILY_IDENT_LIST {
                    skip_n(iter, 1)?;
                }
                kind = Opv::from_raw(iter.expect_word()?).value();
            }
            Ok(())
        }

        Opcode::Quotes => {
            let mut kind = value;
            while kind == QUOTES_STRING {
                skip_n(iter, 2)?;
                kind = Opv::from_raw(iter.expect_word()?).value();
            }
            Ok(())
        }
    }
}

fn skip_n(iter: &mut StyleIter<'_>, n: usize) -> Result<()> {
    for _ in 0..n {
        let _ = iter.expect_word()?;
    }
    Ok(())
}

fn skip_if(iter: &mut StyleIter<'_>, cond: bool, n: usize) -> Result<()> {
    if cond { skip_n(iter, n) } else { Ok(()) }
}
