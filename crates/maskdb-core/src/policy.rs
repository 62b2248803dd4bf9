//! Masking policies.
//!
//! A policy is a total function from any string (including the empty string)
//! to its masked form. Masking is deterministic and pure: the same input
//! always produces the same output, and no input can make it fail.
//!
//! Classification and slicing operate per Unicode code point, never per
//! byte, so multi-byte text keeps the letter/digit/special contract intact.

use serde::{Deserialize, Serialize};

/// Replacement returned for values too short to partially reveal.
pub const MASK_SENTINEL: &str = "***";

/// Glyph substituted for each masked character.
pub const MASK_CHAR: char = '*';

/// Literal filler used by the fixed-affix scheme.
const AFFIX_FILLER: &str = "xxx";

/// Masking strategy applied to every designated value.
///
/// The two schemes are mutually exclusive takes on the same responsibility,
/// selected by configuration. [`MaskPolicy::LengthTiered`] is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPolicy {
    /// Length-tiered partial reveal.
    ///
    /// Values of three characters or fewer collapse to the `***` sentinel.
    /// Four- to six-character values reveal their first and last character;
    /// longer values reveal their first and last three. Interior characters
    /// become `*`, except special characters (neither letter nor digit),
    /// which pass through so structural punctuation stays recognizable.
    #[default]
    LengthTiered,

    /// Fixed three-character prefix and suffix around a literal `xxx`.
    ///
    /// Values of six characters or fewer collapse to `xxx` entirely. Unlike
    /// the tiered scheme this does not preserve length.
    FixedAffix,
}

impl MaskPolicy {
    /// Mask a single scalar value.
    pub fn mask(&self, value: &str) -> String {
        match self {
            MaskPolicy::LengthTiered => length_tiered(value),
            MaskPolicy::FixedAffix => fixed_affix(value),
        }
    }
}

/// A character is special iff it is neither a letter nor a digit.
fn is_special(c: char) -> bool {
    !c.is_alphanumeric()
}

fn length_tiered(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 3 {
        return MASK_SENTINEL.to_string();
    }

    // Reveal one character per side in the short tier, three in the long.
    let reveal = if chars.len() <= 6 { 1 } else { 3 };

    let mut masked = String::with_capacity(value.len());
    masked.extend(&chars[..reveal]);
    for &c in &chars[reveal..chars.len() - reveal] {
        masked.push(if is_special(c) { c } else { MASK_CHAR });
    }
    masked.extend(&chars[chars.len() - reveal..]);
    masked
}

fn fixed_affix(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 6 {
        return AFFIX_FILLER.to_string();
    }

    let mut masked = String::with_capacity(6 + AFFIX_FILLER.len());
    masked.extend(&chars[..3]);
    masked.push_str(AFFIX_FILLER);
    masked.extend(&chars[chars.len() - 3..]);
    masked
}
