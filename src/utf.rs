pub mod utf16sequence;

use core::fmt;

use crate::error::{Error, Result};

pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A Unicode code point, U+0000 to U+10FFFF.
///
/// Unlike `char`, surrogates (U+D800 to U+DFFF) are representable. They are
/// carried through encoding with a warning and refused by [`to_display_char`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
pub struct CodePoint(u32);

impl CodePoint {
    /// Returns `None` if `value` is above U+10FFFF.
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        if value <= MAX_CODEPOINT {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_char(value: char) -> Self {
        Self(value as u32)
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_surrogate(self) -> bool {
        matches!(self.0, 0xD800..=0xDFFF)
    }
}

/// `U+` followed by at least four uppercase hexadecimal digits, e.g. `U+1F600`.
impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

impl fmt::Debug for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<char> for CodePoint {
    fn from(value: char) -> Self {
        Self::from_char(value)
    }
}

pub(crate) const fn is_valid_codepoint(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some()
}

/// Fails with [`Error::InvalidScalar`] for surrogates.
pub fn to_display_char(codepoint: CodePoint) -> Result<char> {
    char::from_u32(codepoint.to_u32()).ok_or(Error::InvalidScalar(codepoint.to_u32()))
}

/// Every scalar value of `text` in order, one per `char`. Combining marks and
/// other grapheme parts are yielded on their own. Clone the iterator to walk
/// the text again.
pub fn scalars_of(text: &str) -> impl Iterator<Item = CodePoint> + Clone + '_ {
    text.chars().map(CodePoint::from_char)
}

/// Concatenates the display characters of `codepoints`. A `String` cannot
/// hold a surrogate, so those become U+FFFD.
pub fn render_string(codepoints: &[CodePoint]) -> String {
    codepoints
        .iter()
        .map(|&codepoint| to_display_char(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
