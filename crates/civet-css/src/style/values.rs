//! Computed value types.
//!
//! One type per property shape. Every accessor on the computed style
//! returns `Option<T>` over one of these; `None` is the `INHERIT`
//! sentinel, meaning "resolve from the parent".

use civet_intern::Atom;
use serde::Serialize;

use crate::fixed::Fixed;
use crate::types::{Colour, Length};

/// `display`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Display {
    Inline,
    Block,
    ListItem,
    RunIn,
    InlineBlock,
    Table,
    InlineTable,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableColumnGroup,
    TableColumn,
    TableCell,
    TableCaption,
    None,
}

/// `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
}

/// `float`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Float {
    None,
    Left,
    Right,
}

/// `clear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Clear {
    None,
    Left,
    Right,
    Both,
}

/// `visibility`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

/// `overflow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Overflow {
    Visible,
    Hidden,
    Scroll,
    Auto,
}

/// `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// `unicode-bidi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum UnicodeBidi {
    Normal,
    Embed,
    BidiOverride,
}

/// A length, an `auto`, for the box offsets, sizes, and margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum AutoLength {
    Auto,
    Length(Length),
}

/// `max-width` / `max-height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum MaxSize {
    None,
    Length(Length),
}

/// `z-index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum ZIndex {
    Auto,
    Set(i32),
}

/// `clip`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Clip {
    /// No clipping.
    Auto,
    /// A `rect()` shape; `None` components are `auto`.
    Rect {
        /// Top edge.
        top: Option<Length>,
        /// Right edge.
        right: Option<Length>,
        /// Bottom edge.
        bottom: Option<Length>,
        /// Left edge.
        left: Option<Length>,
    },
}

/// Border and outline line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BorderStyle {
    None,
    Hidden,
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

/// Border and outline widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BorderWidth {
    Thin,
    Medium,
    Thick,
    Length(Length),
}

/// Border and background colours; `transparent` is
/// [`Colour::TRANSPARENT`].
pub type BorderColour = Colour;

/// `outline-color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum OutlineColour {
    Invert,
    Colour(Colour),
}

/// `background-image` / `list-style-image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum ImageRef {
    None,
    Uri(Atom),
}

/// `background-attachment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BackgroundAttachment {
    Fixed,
    Scroll,
}

/// `background-repeat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BackgroundRepeat {
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// `background-position`, with keywords resolved to percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundPosition {
    /// Horizontal offset.
    pub horz: Length,
    /// Vertical offset.
    pub vert: Length,
}

/// `border-spacing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BorderSpacing {
    /// Horizontal spacing.
    pub horz: Length,
    /// Vertical spacing.
    pub vert: Length,
}

/// `font-style`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

/// `font-variant`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum FontVariant {
    Normal,
    SmallCaps,
}

/// `font-weight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum FontWeight {
    Normal,
    Bold,
    Bolder,
    Lighter,
    W100,
    W200,
    W300,
    W400,
    W500,
    W600,
    W700,
    W800,
    W900,
}

/// `font-size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum FontSize {
    XxSmall,
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    Larger,
    Smaller,
    Length(Length),
}

/// One `font-family` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Cursive,
    Fantasy,
    Monospace,
    Named(Atom),
}

/// `line-height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum LineHeight {
    Normal,
    Number(Fixed),
    Length(Length),
}

/// `letter-spacing` / `word-spacing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Spacing {
    Normal,
    Length(Length),
}

/// `text-align`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
}

/// `text-decoration`: a set of independent line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextDecoration {
    /// `underline`
    pub underline: bool,
    /// `overline`
    pub overline: bool,
    /// `line-through`
    pub line_through: bool,
    /// `blink`
    pub blink: bool,
}

impl TextDecoration {
    /// The `none` value.
    pub const NONE: TextDecoration = TextDecoration {
        underline: false,
        overline: false,
        line_through: false,
        blink: false,
    };
}

/// `text-transform`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum TextTransform {
    Capitalize,
    Uppercase,
    Lowercase,
    None,
}

/// `white-space`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum WhiteSpace {
    Normal,
    Pre,
    Nowrap,
    PreWrap,
    PreLine,
}

/// `vertical-align`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum VerticalAlign {
    Baseline,
    Sub,
    Super,
    Top,
    TextTop,
    Middle,
    Bottom,
    TextBottom,
    Length(Length),
}

/// `caption-side`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum CaptionSide {
    Top,
    Bottom,
}

/// `empty-cells`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum EmptyCells {
    Show,
    Hide,
}

/// `table-layout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum TableLayout {
    Auto,
    Fixed,
}

/// `border-collapse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BorderCollapse {
    Collapse,
    Separate,
}

/// `list-style-position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum ListStylePosition {
    Inside,
    Outside,
}

/// `list-style-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum ListStyleType {
    Disc,
    Circle,
    Square,
    Decimal,
    DecimalLeadingZero,
    LowerRoman,
    UpperRoman,
    LowerGreek,
    LowerLatin,
    UpperLatin,
    Armenian,
    Georgian,
    LowerAlpha,
    UpperAlpha,
    None,
}

/// `page-break-before` / `page-break-after`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum PageBreak {
    Auto,
    Always,
    Avoid,
    Left,
    Right,
}

/// `page-break-inside`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum PageBreakInside {
    Auto,
    Avoid,
}

/// One item of a `content` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum ContentItem {
    Text(Atom),
    Uri(Atom),
    Attr(Atom),
    Counter {
        name: Atom,
        style: ListStyleType,
    },
    Counters {
        name: Atom,
        separator: Atom,
        style: ListStyleType,
    },
    OpenQuote,
    CloseQuote,
    NoOpenQuote,
    NoCloseQuote,
}

/// `content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Content {
    Normal,
    None,
    Items(Vec<ContentItem>),
}

/// One named counter with its delta or reset value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// Counter name.
    pub name: Atom,
    /// Increment delta or reset value.
    pub value: i32,
}

/// `counter-increment` / `counter-reset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum CounterList {
    None,
    Items(Vec<Counter>),
}

/// `quotes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Quotes {
    None,
    Pairs(Vec<(Atom, Atom)>),
}

/// The keyword that terminates a `cursor` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum CursorKind {
    Auto,
    Crosshair,
    Default,
    Pointer,
    Move,
    EResize,
    NeResize,
    NwResize,
    NResize,
    SeResize,
    SwResize,
    SResize,
    WResize,
    Text,
    Wait,
    Help,
    Progress,
}

/// `cursor`: candidate URIs, then the fallback keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cursor {
    /// Candidate cursor images, in order.
    pub urls: Vec<Atom>,
    /// The mandatory fallback.
    pub kind: CursorKind,
}

/// `azimuth` position keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum AzimuthPosition {
    LeftSide,
    FarLeft,
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    FarRight,
    RightSide,
}

/// `azimuth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Azimuth {
    Angle(Length),
    Leftwards,
    Rightwards,
    Position {
        position: AzimuthPosition,
        behind: bool,
    },
}

/// `elevation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Elevation {
    Angle(Length),
    Below,
    Level,
    Above,
    Higher,
    Lower,
}

/// `cue-before` / `cue-after`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Cue {
    None,
    Uri(Atom),
}

/// `pitch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Pitch {
    Frequency(Length),
    XLow,
    Low,
    Medium,
    High,
    XHigh,
}

/// `play-during`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum PlayDuring {
    Uri {
        url: Atom,
        mix: bool,
        repeat: bool,
    },
    Auto,
    None,
}

/// `speak`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Speak {
    Normal,
    None,
    SpellOut,
}

/// `speak-header`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum SpeakHeader {
    Once,
    Always,
}

/// `speak-numeral`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum SpeakNumeral {
    Digits,
    Continuous,
}

/// `speak-punctuation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum SpeakPunctuation {
    Code,
    None,
}

/// `speech-rate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum SpeechRate {
    Rate(Fixed),
    XSlow,
    Slow,
    Medium,
    Fast,
    XFast,
    Faster,
    Slower,
}

/// `volume`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Volume {
    Number(Fixed),
    Percent(Fixed),
    Silent,
    XSoft,
    Soft,
    Medium,
    Loud,
    XLoud,
}

/// One `voice-family` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum VoiceFamily {
    Male,
    Female,
    Child,
    Named(Atom),
}
