use core::fmt;

use itertools::{Either, Itertools};
use tracing::debug;

use crate::utf::CodePoint;

/// The textual forms a code point token may take, in matching priority.
///
/// Delimited forms come first: `&#65;` and `65` share a digit run, and a bare
/// digit run is also valid hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
    /// `U+1F600`
    UnicodeEscape,
    /// `0x1F600`
    HexLiteral,
    /// `&#x1F600;`, semicolon optional
    HexReference,
    /// `&#128512;`, semicolon optional
    DecimalReference,
    /// `128512`
    Decimal,
    /// `1F600`
    Hex,
}

impl Notation {
    pub const PRIORITY: [Notation; 6] = [
        Notation::UnicodeEscape,
        Notation::HexLiteral,
        Notation::HexReference,
        Notation::DecimalReference,
        Notation::Decimal,
        Notation::Hex,
    ];

    pub const fn radix(self) -> u32 {
        match self {
            Notation::DecimalReference | Notation::Decimal => 10,
            _ => 16,
        }
    }

    /// Returns the digit run if `token` is written in this notation.
    pub fn digits(self, token: &str) -> Option<&str> {
        let digits = match self {
            Notation::UnicodeEscape => token.strip_prefix("U+")?,
            Notation::HexLiteral => token.strip_prefix("0x")?,
            Notation::HexReference => strip_reference(token.strip_prefix("&#x")?),
            Notation::DecimalReference => strip_reference(token.strip_prefix("&#")?),
            Notation::Decimal | Notation::Hex => token,
        };
        let is_digit = match self.radix() {
            10 => u8::is_ascii_digit,
            _ => u8::is_ascii_hexdigit,
        };
        (!digits.is_empty() && digits.bytes().all(|b| is_digit(&b))).then_some(digits)
    }
}

fn strip_reference(body: &str) -> &str {
    body.strip_suffix(';').unwrap_or(body)
}

/// Why a token did not produce a code point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Unrecognized { token: String },
    OutOfRange { token: String, value: u32 },
    /// The digit run does not fit in 32 bits.
    Overflow { token: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unrecognized { token } => write!(f, "Unrecognized token: '{token}'"),
            Diagnostic::OutOfRange { token, value } => {
                write!(f, "Out of range: {token} -> {value}")
            }
            Diagnostic::Overflow { token } => write!(f, "Out of range: {token} -> overflow"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub codepoints: Vec<CodePoint>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Splits raw input on commas and whitespace, dropping empty fragments.
pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

pub fn parse_token(token: &str) -> Result<CodePoint, Diagnostic> {
    let Some((notation, digits)) = Notation::PRIORITY
        .into_iter()
        .find_map(|notation| notation.digits(token).map(|digits| (notation, digits)))
    else {
        debug!(token, "unrecognized");
        return Err(Diagnostic::Unrecognized {
            token: token.to_owned(),
        });
    };
    debug!(token, ?notation, "matched");
    let value = u32::from_str_radix(digits, notation.radix()).map_err(|_| Diagnostic::Overflow {
        token: token.to_owned(),
    })?;
    CodePoint::from_u32(value).ok_or_else(|| Diagnostic::OutOfRange {
        token: token.to_owned(),
        value,
    })
}

/// Parses every token, keeping going past failures. Both lists keep input
/// order.
pub fn parse_tokens<'a, I>(tokens: I) -> ParseOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let (codepoints, diagnostics): (Vec<_>, Vec<_>) =
        tokens.into_iter().partition_map(|token| match parse_token(token) {
            Ok(codepoint) => Either::Left(codepoint),
            Err(diagnostic) => Either::Right(diagnostic),
        });
    ParseOutcome {
        codepoints,
        diagnostics,
    }
}
