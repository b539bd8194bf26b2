//! Core value types shared across the engine.

use bitflags::bitflags;
use serde::Serialize;
use strum_macros::{EnumString, IntoStaticStr};

use crate::fixed::Fixed;

/// An sRGB colour in RRGGBBAA word order.
///
/// Opaque colours carry alpha `0xFF`; `transparent` is the all-zero word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Colour(pub u32);

impl Colour {
    /// Fully transparent black, the `transparent` keyword.
    pub const TRANSPARENT: Colour = Colour(0);

    /// Build an opaque colour from components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    /// Red component.
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green component.
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue component.
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha component (255 = opaque).
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

/// A dimension's unit.
///
/// The bytecode encoding groups units by kind: lengths occupy the low
/// byte, while percentage, angle, time, and frequency units carry a group
/// bit so validity checks reduce to a mask test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// CSS pixels.
    Px,
    /// x-height of the current font.
    Ex,
    /// em square of the current font.
    Em,
    /// Inches.
    In,
    /// Centimetres.
    Cm,
    /// Millimetres.
    Mm,
    /// Points (1/72in).
    Pt,
    /// Picas (12pt).
    Pc,
    /// Percentage of a property-specific reference.
    #[strum(serialize = "%")]
    Pct,
    /// Degrees.
    Deg,
    /// Gradians.
    Grad,
    /// Radians.
    Rad,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
    /// Hertz.
    Hz,
    /// Kilohertz.
    #[strum(serialize = "khz")]
    KHz,
}

/// Group bit for percentage units in the bytecode encoding.
const UNIT_PCT: u32 = 1 << 8;
/// Group bit for angle units.
const UNIT_ANGLE: u32 = 1 << 9;
/// Group bit for time units.
const UNIT_TIME: u32 = 1 << 10;
/// Group bit for frequency units.
const UNIT_FREQ: u32 = 1 << 11;

impl Unit {
    /// The bytecode word for this unit.
    #[must_use]
    pub fn to_bits(self) -> u32 {
        match self {
            Unit::Px => 0,
            Unit::Ex => 1,
            Unit::Em => 2,
            Unit::In => 3,
            Unit::Cm => 4,
            Unit::Mm => 5,
            Unit::Pt => 6,
            Unit::Pc => 7,
            Unit::Pct => UNIT_PCT,
            Unit::Deg => UNIT_ANGLE,
            Unit::Grad => UNIT_ANGLE + 1,
            Unit::Rad => UNIT_ANGLE + 2,
            Unit::Ms => UNIT_TIME,
            Unit::S => UNIT_TIME + 1,
            Unit::Hz => UNIT_FREQ,
            Unit::KHz => UNIT_FREQ + 1,
        }
    }

    /// Decode a bytecode word back into a unit.
    #[must_use]
    pub fn from_bits(bits: u32) -> Option<Unit> {
        Some(match bits {
            0 => Unit::Px,
            1 => Unit::Ex,
            2 => Unit::Em,
            3 => Unit::In,
            4 => Unit::Cm,
            5 => Unit::Mm,
            6 => Unit::Pt,
            7 => Unit::Pc,
            b if b == UNIT_PCT => Unit::Pct,
            b if b == UNIT_ANGLE => Unit::Deg,
            b if b == UNIT_ANGLE + 1 => Unit::Grad,
            b if b == UNIT_ANGLE + 2 => Unit::Rad,
            b if b == UNIT_TIME => Unit::Ms,
            b if b == UNIT_TIME + 1 => Unit::S,
            b if b == UNIT_FREQ => Unit::Hz,
            b if b == UNIT_FREQ + 1 => Unit::KHz,
            _ => return None,
        })
    }

    /// Whether this unit measures length.
    #[must_use]
    pub fn is_length(self) -> bool {
        self.to_bits() < UNIT_PCT
    }

    /// Whether this unit is a percentage.
    #[must_use]
    pub fn is_percentage(self) -> bool {
        self == Unit::Pct
    }

    /// Whether this unit measures angle.
    #[must_use]
    pub fn is_angle(self) -> bool {
        self.to_bits() & UNIT_ANGLE != 0
    }

    /// Whether this unit measures time.
    #[must_use]
    pub fn is_time(self) -> bool {
        self.to_bits() & UNIT_TIME != 0
    }

    /// Whether this unit measures frequency.
    #[must_use]
    pub fn is_frequency(self) -> bool {
        self.to_bits() & UNIT_FREQ != 0
    }
}

/// A fixed-point value paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Length {
    /// The magnitude.
    pub value: Fixed,
    /// The unit the magnitude is expressed in.
    pub unit: Unit,
}

impl Length {
    /// Build a length.
    #[must_use]
    pub fn new(value: Fixed, unit: Unit) -> Length {
        Length { value, unit }
    }
}

/// The provenance of a stylesheet, participating in cascade ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Origin {
    /// The user agent's default sheet.
    Ua,
    /// The user's sheet.
    User,
    /// A document-supplied sheet.
    Author,
    /// A `style=""` attribute surfaced as a single-rule sheet.
    Inline,
}

/// CSS language levels. Only [`Language::Css21`] is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    /// CSS 1.
    Css1,
    /// CSS 2.
    Css2,
    /// CSS 2.1.
    Css21,
    /// CSS 3.
    Css3,
}

/// Where the parser's notion of the sheet's charset came from, in
/// ascending priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CharsetSource {
    /// Hard-wired fallback.
    Default,
    /// Referring document (e.g. the `charset` attribute of `<link>`).
    Referred,
    /// Transport metadata.
    Metadata,
    /// An accepted `@charset` rule in the sheet itself.
    Document,
    /// Dictated by the embedder; nothing overrides it.
    Dictated,
}

bitflags! {
    /// A set of media types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Media: u64 {
        /// Speech synthesisers.
        const AURAL = 1 << 0;
        /// Braille tactile devices.
        const BRAILLE = 1 << 1;
        /// Braille printers.
        const EMBOSSED = 1 << 2;
        /// Handheld devices.
        const HANDHELD = 1 << 3;
        /// Paged, printed media.
        const PRINT = 1 << 4;
        /// Projected presentations.
        const PROJECTION = 1 << 5;
        /// Colour computer screens.
        const SCREEN = 1 << 6;
        /// Speech output.
        const SPEECH = 1 << 7;
        /// Fixed-pitch character grids.
        const TTY = 1 << 8;
        /// Television-type devices.
        const TV = 1 << 9;
        /// Every media type.
        const ALL = Self::AURAL.bits()
            | Self::BRAILLE.bits()
            | Self::EMBOSSED.bits()
            | Self::HANDHELD.bits()
            | Self::PRINT.bits()
            | Self::PROJECTION.bits()
            | Self::SCREEN.bits()
            | Self::SPEECH.bits()
            | Self::TTY.bits()
            | Self::TV.bits();
    }
}

impl Media {
    /// Parse a CSS 2.1 media type name.
    #[must_use]
    pub fn from_css_name(name: &str) -> Option<Media> {
        Some(match name {
            "aural" => Media::AURAL,
            "braille" => Media::BRAILLE,
            "embossed" => Media::EMBOSSED,
            "handheld" => Media::HANDHELD,
            "print" => Media::PRINT,
            "projection" => Media::PROJECTION,
            "screen" => Media::SCREEN,
            "speech" => Media::SPEECH,
            "tty" => Media::TTY,
            "tv" => Media::TV,
            "all" => Media::ALL,
            _ => return None,
        })
    }
}

bitflags! {
    /// The dynamic pseudo-classes a host may assert for a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PseudoClassSet: u32 {
        /// `:hover`
        const HOVER = 1 << 0;
        /// `:active`
        const ACTIVE = 1 << 1;
        /// `:focus`
        const FOCUS = 1 << 2;
        /// `:link`
        const LINK = 1 << 3;
        /// `:visited`
        const VISITED = 1 << 4;
        /// `:target`
        const TARGET = 1 << 5;
        /// `:enabled`
        const ENABLED = 1 << 6;
        /// `:disabled`
        const DISABLED = 1 << 7;
        /// `:checked`
        const CHECKED = 1 << 8;
    }
}

impl PseudoClassSet {
    /// Map a pseudo-class name (lowercase, no colon) to its bit.
    #[must_use]
    pub fn from_css_name(name: &str) -> Option<PseudoClassSet> {
        Some(match name {
            "hover" => PseudoClassSet::HOVER,
            "active" => PseudoClassSet::ACTIVE,
            "focus" => PseudoClassSet::FOCUS,
            "link" => PseudoClassSet::LINK,
            "visited" => PseudoClassSet::VISITED,
            "target" => PseudoClassSet::TARGET,
            "enabled" => PseudoClassSet::ENABLED,
            "disabled" => PseudoClassSet::DISABLED,
            "checked" => PseudoClassSet::CHECKED,
        _ => return None,
        })
    }
}

/// The CSS 2.1 pseudo-elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PseudoElement {
    /// `:first-line`
    FirstLine,
    /// `:first-letter`
    FirstLetter,
    /// `:before`
    Before,
    /// `:after`
    After,
}

impl PseudoElement {
    /// Map a pseudo-element name (lowercase, no colons) to its variant.
    #[must_use]
    pub fn from_name(name: &str) -> Option<PseudoElement> {
        Some(match name {
            "first-line" => PseudoElement::FirstLine,
            "first-letter" => PseudoElement::FirstLetter,
            "before" => PseudoElement::Before,
            "after" => PseudoElement::After,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_components_unpack() {
        let c = Colour::rgb(0xFF, 0x00, 0x00);
        assert_eq!(c.0, 0xFF00_00FF);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0xFF, 0, 0, 0xFF));
    }

    #[test]
    fn unit_bits_round_trip() {
        for unit in [
            Unit::Px,
            Unit::Ex,
            Unit::Em,
            Unit::In,
            Unit::Cm,
            Unit::Mm,
            Unit::Pt,
            Unit::Pc,
            Unit::Pct,
            Unit::Deg,
            Unit::Grad,
            Unit::Rad,
            Unit::Ms,
            Unit::S,
            Unit::Hz,
            Unit::KHz,
        ] {
            assert_eq!(Unit::from_bits(unit.to_bits()), Some(unit));
        }
        assert_eq!(Unit::from_bits(0xFFFF), None);
    }

    #[test]
    fn unit_names_parse_case_insensitively() {
        assert_eq!("px".parse::<Unit>(), Ok(Unit::Px));
        assert_eq!("Em".parse::<Unit>(), Ok(Unit::Em));
        assert_eq!("kHz".parse::<Unit>(), Ok(Unit::KHz));
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn unit_groups_are_disjoint() {
        assert!(Unit::Px.is_length() && !Unit::Px.is_percentage());
        assert!(Unit::Pct.is_percentage() && !Unit::Pct.is_length());
        assert!(Unit::Deg.is_angle());
        assert!(Unit::S.is_time());
        assert!(Unit::KHz.is_frequency());
    }

    #[test]
    fn media_all_is_the_union() {
        assert!(Media::ALL.contains(Media::SCREEN | Media::PRINT));
        assert_eq!(Media::from_css_name("screen"), Some(Media::SCREEN));
        assert_eq!(Media::from_css_name("all"), Some(Media::ALL));
        assert_eq!(Media::from_css_name("webtv"), None);
    }
}
