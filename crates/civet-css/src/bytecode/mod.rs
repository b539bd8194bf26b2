//! Style bytecode.
//!
//! A parsed declaration compiles to a sequence of 32-bit words. The
//! first word of each declaration is an OPV packing the property opcode
//! (bits 0–9), flag bits (10–17), and a property-specific value
//! discriminant (18–31). The discriminant tags how — and how many —
//! operand words follow: fixed-point magnitudes, unit words, RRGGBBAA
//! colours, interned-string references, or further OPVs forming a
//! sentinel-terminated list.
//!
//! Interned strings cannot live inside a 32-bit word, so each style
//! carries a side table of [`Atom`]s and the bytecode stores indices into
//! it. The words themselves stay position-independent.

mod values;

pub use values::*;

use std::fmt;

use civet_intern::Atom;
use strum_macros::IntoStaticStr;

use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::types::{Colour, Unit};

/// `!important` was present on the declaration.
pub const FLAG_IMPORTANT: u8 = 1 << 0;
/// The declared value was `inherit`.
pub const FLAG_INHERIT: u8 = 1 << 1;

/// Property opcodes, one per supported property.
///
/// The four box sides of the border colour/style/width, margin, and
/// padding properties share an opcode, with the side carried in the value
/// discriminant (see [`SIDE_SHIFT`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Opcode {
    Azimuth = 0x000,
    BackgroundAttachment = 0x001,
    BackgroundColor = 0x002,
    BackgroundImage = 0x003,
    BackgroundPosition = 0x004,
    BackgroundRepeat = 0x005,
    BorderCollapse = 0x006,
    BorderSpacing = 0x007,
    BorderTrblColor = 0x008,
    BorderTrblStyle = 0x009,
    BorderTrblWidth = 0x00a,
    Bottom = 0x00b,
    CaptionSide = 0x00c,
    Clear = 0x00d,
    Clip = 0x00e,
    Color = 0x00f,
    Content = 0x010,
    CounterIncrement = 0x011,
    CounterReset = 0x012,
    CueAfter = 0x013,
    CueBefore = 0x014,
    Cursor = 0x015,
    Direction = 0x016,
    Display = 0x017,
    Elevation = 0x018,
    EmptyCells = 0x019,
    Float = 0x01a,
    FontFamily = 0x01b,
    FontSize = 0x01c,
    FontStyle = 0x01d,
    FontVariant = 0x01e,
    FontWeight = 0x01f,
    Height = 0x020,
    Left = 0x021,
    LetterSpacing = 0x022,
    LineHeight = 0x023,
    ListStyleImage = 0x024,
    ListStylePosition = 0x025,
    ListStyleType = 0x026,
    MarginTrbl = 0x027,
    MaxHeight = 0x028,
    MaxWidth = 0x029,
    MinHeight = 0x02a,
    MinWidth = 0x02b,
    Orphans = 0x02c,
    OutlineColor = 0x02d,
    OutlineStyle = 0x02e,
    OutlineWidth = 0x02f,
    Overflow = 0x030,
    PaddingTrbl = 0x031,
    PageBreakAfter = 0x032,
    PageBreakBefore = 0x033,
    PageBreakInside = 0x034,
    PauseAfter = 0x035,
    PauseBefore = 0x036,
    PitchRange = 0x037,
    Pitch = 0x038,
    PlayDuring = 0x039,
    Position = 0x03a,
    Quotes = 0x03b,
    Richness = 0x03c,
    Right = 0x03d,
    SpeakHeader = 0x03e,
    SpeakNumeral = 0x03f,
    SpeakPunctuation = 0x040,
    Speak = 0x041,
    SpeechRate = 0x042,
    Stress = 0x043,
    TableLayout = 0x044,
    TextAlign = 0x045,
    TextDecoration = 0x046,
    TextIndent = 0x047,
    TextTransform = 0x048,
    Top = 0x049,
    UnicodeBidi = 0x04a,
    VerticalAlign = 0x04b,
    Visibility = 0x04c,
    VoiceFamily = 0x04d,
    Volume = 0x04e,
    WhiteSpace = 0x04f,
    Widows = 0x050,
    Width = 0x051,
    WordSpacing = 0x052,
    ZIndex = 0x053,
}

/// Number of opcodes.
pub const N_OPCODES: usize = 0x054;

/// The opcodes in numeric order, for decode.
const OPCODE_TABLE: [Opcode; N_OPCODES] = [
    Opcode::Azimuth,
    Opcode::BackgroundAttachment,
    Opcode::BackgroundColor,
    Opcode::BackgroundImage,
    Opcode::BackgroundPosition,
    Opcode::BackgroundRepeat,
    Opcode::BorderCollapse,
    Opcode::BorderSpacing,
    Opcode::BorderTrblColor,
    Opcode::BorderTrblStyle,
    Opcode::BorderTrblWidth,
    Opcode::Bottom,
    Opcode::CaptionSide,
    Opcode::Clear,
    Opcode::Clip,
    Opcode::Color,
    Opcode::Content,
    Opcode::CounterIncrement,
    Opcode::CounterReset,
    Opcode::CueAfter,
    Opcode::CueBefore,
    Opcode::Cursor,
    Opcode::Direction,
    Opcode::Display,
    Opcode::Elevation,
    Opcode::EmptyCells,
    Opcode::Float,
    Opcode::FontFamily,
    Opcode::FontSize,
    Opcode::FontStyle,
    Opcode::FontVariant,
    Opcode::FontWeight,
    Opcode::Height,
    Opcode::Left,
    Opcode::LetterSpacing,
    Opcode::LineHeight,
    Opcode::ListStyleImage,
    Opcode::ListStylePosition,
    Opcode::ListStyleType,
    Opcode::MarginTrbl,
    Opcode::MaxHeight,
    Opcode::MaxWidth,
    Opcode::MinHeight,
    Opcode::MinWidth,
    Opcode::Orphans,
    Opcode::OutlineColor,
    Opcode::OutlineStyle,
    Opcode::OutlineWidth,
    Opcode::Overflow,
    Opcode::PaddingTrbl,
    Opcode::PageBreakAfter,
    Opcode::PageBreakBefore,
    Opcode::PageBreakInside,
    Opcode::PauseAfter,
    Opcode::PauseBefore,
    Opcode::PitchRange,
    Opcode::Pitch,
    Opcode::PlayDuring,
    Opcode::Position,
    Opcode::Quotes,
    Opcode::Richness,
    Opcode::Right,
    Opcode::SpeakHeader,
    Opcode::SpeakNumeral,
    Opcode::SpeakPunctuation,
    Opcode::Speak,
    Opcode::SpeechRate,
    Opcode::Stress,
    Opcode::TableLayout,
    Opcode::TextAlign,
    Opcode::TextDecoration,
    Opcode::TextIndent,
    Opcode::TextTransform,
    Opcode::Top,
    Opcode::UnicodeBidi,
    Opcode::VerticalAlign,
    Opcode::Visibility,
    Opcode::VoiceFamily,
    Opcode::Volume,
    Opcode::WhiteSpace,
    Opcode::Widows,
    Opcode::Width,
    Opcode::WordSpacing,
    Opcode::ZIndex,
];

impl Opcode {
    /// Decode an opcode number.
    #[must_use]
    pub fn from_u16(v: u16) -> Option<Opcode> {
        OPCODE_TABLE.get(v as usize).copied()
    }

    /// The opcode's name, for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// An opcode–prefix–value word.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Opv(u32);

impl Opv {
    /// Pack an OPV.
    #[must_use]
    pub fn new(op: Opcode, flags: u8, value: u16) -> Opv {
        Opv((op as u32 & 0x3ff) | (u32::from(flags) << 10) | ((u32::from(value) & 0x3fff) << 18))
    }

    /// Reinterpret a raw word.
    #[must_use]
    pub fn from_raw(raw: u32) -> Opv {
        Opv(raw)
    }

    /// The raw word.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The opcode, if the word holds a known one.
    #[must_use]
    pub fn opcode(self) -> Option<Opcode> {
        Opcode::from_u16((self.0 & 0x3ff) as u16)
    }

    /// The flag bits.
    #[must_use]
    pub fn flags(self) -> u8 {
        ((self.0 >> 10) & 0xff) as u8
    }

    /// The value discriminant.
    #[must_use]
    pub fn value(self) -> u16 {
        (self.0 >> 18) as u16
    }

    /// Whether the declaration carried `!important`.
    #[must_use]
    pub fn is_important(self) -> bool {
        self.flags() & FLAG_IMPORTANT != 0
    }

    /// Whether the declared value was `inherit`.
    #[must_use]
    pub fn is_inherit(self) -> bool {
        self.flags() & FLAG_INHERIT != 0
    }
}

impl fmt::Debug for Opv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode() {
            Some(op) => write!(
                f,
                "Opv({}, flags={:#04x}, value={:#06x})",
                op.name(),
                self.flags(),
                self.value()
            ),
            None => write!(f, "Opv(raw={:#010x})", self.0),
        }
    }
}

/// A compiled style: bytecode words plus the interned strings they
/// reference.
#[derive(Default)]
pub struct Style {
    words: Vec<u32>,
    strings: Vec<Atom>,
}

/// A saved length pair for rolling back a partially emitted declaration.
#[derive(Debug, Clone, Copy)]
pub struct StyleMark {
    words: usize,
    strings: usize,
}

impl Style {
    /// An empty style.
    #[must_use]
    pub fn new() -> Style {
        Style::default()
    }

    /// Whether no declarations were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The bytecode words.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Append an OPV word.
    pub fn push_opv(&mut self, opv: Opv) {
        self.words.push(opv.raw());
    }

    /// Append a raw operand word.
    pub fn push_word(&mut self, word: u32) {
        self.words.push(word);
    }

    /// Append a fixed-point operand.
    pub fn push_fixed(&mut self, v: Fixed) {
        self.words.push(v.raw());
    }

    /// Append a unit operand.
    pub fn push_unit(&mut self, unit: Unit) {
        self.words.push(unit.to_bits());
    }

    /// Append a colour operand.
    pub fn push_colour(&mut self, colour: Colour) {
        self.words.push(colour.0);
    }

    /// Append a string-reference operand.
    pub fn push_string(&mut self, atom: Atom) {
        let index = self.strings.len() as u32;
        self.strings.push(atom);
        self.words.push(index);
    }

    /// Resolve a string-reference operand.
    #[must_use]
    pub fn string(&self, word: u32) -> Option<&Atom> {
        self.strings.get(word as usize)
    }

    /// Save the current lengths for a possible rollback.
    #[must_use]
    pub fn mark(&self) -> StyleMark {
        StyleMark {
            words: self.words.len(),
            strings: self.strings.len(),
        }
    }

    /// Discard everything appended since `mark`.
    pub fn rollback(&mut self, mark: StyleMark) {
        self.words.truncate(mark.words);
        self.strings.truncate(mark.strings);
    }

    /// Iterate the bytecode for decoding.
    #[must_use]
    pub fn iter(&self) -> StyleIter<'_> {
        StyleIter {
            style: self,
            pos: 0,
        }
    }
}

impl fmt::Debug for Style {
    /// Structured dump of the OPV stream, one declaration per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Style ({} words) {{", self.words.len())?;
        let mut iter = self.iter();
        while let Some(word) = iter.next_word() {
            let opv = Opv::from_raw(word);
            let Some(op) = opv.opcode() else {
                writeln!(f, "  ???      {word:#010x}")?;
                continue;
            };
            let start = iter.pos;
            write!(
                f,
                "  {:22} flags={:#04x} value={:#06x}",
                op.name(),
                opv.flags(),
                opv.value()
            )?;
            if skip_value(op, opv, &mut iter).is_err() {
                writeln!(f, " <truncated>")?;
                break;
            }
            for w in &self.words[start..iter.pos] {
                write!(f, " {w:#010x}")?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// A cursor over a style's bytecode words.
pub struct StyleIter<'a> {
    style: &'a Style,
    pos: usize,
}

impl<'a> StyleIter<'a> {
    /// The next word, advancing the cursor.
    pub fn next_word(&mut self) -> Option<u32> {
        let w = self.style.words.get(self.pos).copied();
        if w.is_some() {
            self.pos += 1;
        }
        w
    }

    /// The next word, or `Invalid` on truncated bytecode.
    ///
    /// # Errors
    ///
    /// `Invalid` when the style ends before its declared operands do.
    pub fn expect_word(&mut self) -> Result<u32> {
        self.next_word().ok_or(Error::Invalid)
    }

    /// Resolve a string-reference word against the owning style.
    ///
    /// # Errors
    ///
    /// `Invalid` when the reference is out of range.
    pub fn resolve_string(&self, word: u32) -> Result<&'a Atom> {
        self.style.string(word).ok_or(Error::Invalid)
    }

    /// Whether the cursor consumed every word.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.style.words.len()
    }
}

/// Shift for the box-side bits in TRBL value discriminants.
pub const SIDE_SHIFT: u16 = 8;
/// Mask for the box-side bits.
pub const SIDE_MASK: u16 = 0x3 << SIDE_SHIFT;
/// Top side.
pub const SIDE_TOP: u16 = 0 << SIDE_SHIFT;
/// Right side.
pub const SIDE_RIGHT: u16 = 1 << SIDE_SHIFT;
/// Bottom side.
pub const SIDE_BOTTOM: u16 = 2 << SIDE_SHIFT;
/// Left side.
pub const SIDE_LEFT: u16 = 3 << SIDE_SHIFT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opv_packs_and_unpacks() {
        let opv = Opv::new(Opcode::Color, FLAG_IMPORTANT, COLOR_SET);
        assert_eq!(opv.opcode(), Some(Opcode::Color));
        assert!(opv.is_important());
        assert!(!opv.is_inherit());
        assert_eq!(opv.value(), COLOR_SET);
    }

    #[test]
    fn opcode_numbers_round_trip() {
        for (i, op) in OPCODE_TABLE.iter().enumerate() {
            assert_eq!(*op as usize, i);
            assert_eq!(Opcode::from_u16(i as u16), Some(*op));
        }
        assert_eq!(Opcode::from_u16(N_OPCODES as u16), None);
    }

    #[test]
    fn style_rollback_discards_partial_declarations() {
        let dict = civet_intern::Dictionary::new();
        let mut style = Style::new();
        style.push_opv(Opv::new(Opcode::Color, 0, COLOR_SET));
        style.push_colour(Colour::rgb(0xFF, 0, 0));
        let mark = style.mark();
        style.push_opv(Opv::new(Opcode::BackgroundImage, 0, BACKGROUND_IMAGE_URI));
        style.push_string(dict.intern("x.png"));
        style.rollback(mark);
        assert_eq!(style.words().len(), 2);
        assert!(style.string(0).is_none());
    }

    #[test]
    fn side_bits_do_not_collide_with_discriminants() {
        assert_eq!(SIDE_LEFT & 0xFF, 0);
        assert!(BORDER_WIDTH_THICK < (1 << SIDE_SHIFT));
    }
}
