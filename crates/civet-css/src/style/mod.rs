//! The computed-style model.
//!
//! A [`ComputedStyle`](computed::ComputedStyle) is a fixed-shape record
//! with one typed accessor per CSS 2.1 property. Storage is split into
//! an eager block for the frequently used properties and three lazily
//! allocated blocks (uncommon, page, aural) so the common case stays
//! compact.

pub mod computed;
pub mod values;

pub use computed::ComputedStyle;
