use core::fmt;

use tracing::debug;

use crate::utf::{is_valid_codepoint, CodePoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Utf16Type {
    Bmp(u16),
    Surrogate([u16; 2]),
}

/// One code point as UTF-16 code units, written out big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf16Sequence(Utf16Type);

impl Utf16Sequence {
    /// Never fails: a surrogate code point is kept as a single unit, see
    /// [`Utf16Sequence::is_lone_surrogate`].
    #[inline]
    pub const fn encode(codepoint: CodePoint) -> Self {
        let value = codepoint.to_u32();
        if value <= 0xFFFF {
            return Self(Utf16Type::Bmp(value as u16));
        }
        let offset = value - 0x10000;
        let high = 0xD800 | ((offset >> 10) & 0x3FF);
        let low = 0xDC00 | (offset & 0x3FF);
        Self(Utf16Type::Surrogate([high as u16, low as u16]))
    }

    #[inline]
    pub fn units(&self) -> &[u16] {
        match &self.0 {
            Utf16Type::Bmp(unit) => core::slice::from_ref(unit),
            Utf16Type::Surrogate(units) => units,
        }
    }

    /// High byte first for every unit, high surrogate first for pairs.
    #[inline]
    pub fn to_be_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.units().iter().flat_map(|unit| unit.to_be_bytes())
    }

    #[inline]
    pub const fn byte_len(&self) -> usize {
        match self.0 {
            Utf16Type::Bmp(_) => 2,
            Utf16Type::Surrogate(_) => 4,
        }
    }

    /// A single unit in U+D800..=U+DFFF. Not valid UTF-16, still emitted.
    #[inline]
    pub const fn is_lone_surrogate(&self) -> bool {
        matches!(self.0, Utf16Type::Bmp(0xD800..=0xDFFF))
    }

    #[inline]
    pub const fn get_codepoint(&self) -> u32 {
        match self.0 {
            Utf16Type::Bmp(unit) => unit as u32,
            Utf16Type::Surrogate([high, low]) => {
                let high = high as u32;
                let low = low as u32;
                ((high - 0xD800) * 0x400) + (low - 0xDC00) + 0x10000
            }
        }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        is_valid_codepoint(self.get_codepoint())
    }
}

/// Raised when a surrogate code point is encoded on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurrogateWarning {
    pub codepoint: CodePoint,
}

impl fmt::Display for SurrogateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is a surrogate code unit", self.codepoint)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub warnings: Vec<SurrogateWarning>,
}

/// Encodes `codepoints` in order into one UTF-16BE byte buffer.
pub fn encode_all(codepoints: &[CodePoint]) -> Encoded {
    let sequences: Vec<Utf16Sequence> = codepoints
        .iter()
        .map(|&codepoint| Utf16Sequence::encode(codepoint))
        .collect();
    let mut encoded = Encoded {
        bytes: Vec::with_capacity(sequences.iter().map(Utf16Sequence::byte_len).sum()),
        warnings: Vec::new(),
    };
    for (&codepoint, sequence) in codepoints.iter().zip(&sequences) {
        debug!(%codepoint, units = ?sequence.units(), "encoded");
        if sequence.is_lone_surrogate() {
            encoded.warnings.push(SurrogateWarning { codepoint });
        }
        encoded.bytes.extend(sequence.to_be_bytes());
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utf::to_display_char;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn c(value: u32) -> CodePoint {
        CodePoint::from_u32(value).unwrap()
    }

    fn bytes(value: u32) -> Vec<u8> {
        Utf16Sequence::encode(c(value)).to_be_bytes().collect()
    }

    #[test]
    fn bmp() {
        assert_eq!(bytes(0x0000), vec![0x00, 0x00]);
        assert_eq!(bytes(0x0041), vec![0x00, 0x41]);
        assert_eq!(bytes(0x3042), vec![0x30, 0x42]);
        assert_eq!(bytes(0xFFFF), vec![0xFF, 0xFF]);
    }

    #[test]
    fn supplementary() {
        assert_eq!(bytes(0x10000), vec![0xD8, 0x00, 0xDC, 0x00]);
        assert_eq!(bytes(0x1F600), vec![0xD8, 0x3D, 0xDE, 0x00]);
        assert_eq!(bytes(0x10FFFF), vec![0xDB, 0xFF, 0xDF, 0xFF]);
    }

    #[test]
    fn matches_std_encoder() {
        for ch in ['A', 'é', 'あ', '\u{FFFD}', '😀', '\u{10FFFF}'] {
            let expected: Vec<u8> = ch
                .encode_utf16(&mut [0; 2])
                .iter()
                .flat_map(|unit| unit.to_be_bytes())
                .collect();
            assert_eq!(bytes(ch as u32), expected);
        }
    }

    #[test]
    fn lone_surrogate() {
        for value in [0xD800, 0xDBFF, 0xDC00, 0xDFFF] {
            let sequence = Utf16Sequence::encode(c(value));
            assert!(sequence.is_lone_surrogate());
            assert!(!sequence.is_valid());
            assert_eq!(sequence.byte_len(), 2);
        }
        assert!(!Utf16Sequence::encode(c(0xD7FF)).is_lone_surrogate());
        assert!(!Utf16Sequence::encode(c(0xE000)).is_lone_surrogate());
        assert!(!Utf16Sequence::encode(c(0x1F600)).is_lone_surrogate());
    }

    #[test]
    fn encode_batch() {
        let encoded = encode_all(&[c(0x41), c(0x1F600)]);
        assert_eq!(encoded.bytes, vec![0x00, 0x41, 0xD8, 0x3D, 0xDE, 0x00]);
        assert!(encoded.warnings.is_empty());
    }

    #[test]
    fn encode_batch_warns_in_order() {
        let encoded = encode_all(&[c(0xDFFF), c(0x41), c(0xD800)]);
        assert_eq!(encoded.bytes, vec![0xDF, 0xFF, 0x00, 0x41, 0xD8, 0x00]);
        assert_eq!(
            encoded.warnings,
            vec![
                SurrogateWarning { codepoint: c(0xDFFF) },
                SurrogateWarning { codepoint: c(0xD800) },
            ]
        );
        assert_eq!(encoded.warnings[1].to_string(), "U+D800 is a surrogate code unit");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode_all(&[]), Encoded::default());
    }

    proptest! {
        #[test]
        fn bmp_scalar_round_trip(value in prop_oneof![0u32..0xD800, 0xE000u32..=0xFFFF]) {
            let sequence = Utf16Sequence::encode(c(value));
            let encoded: Vec<u8> = sequence.to_be_bytes().collect();
            prop_assert_eq!(encoded, vec![(value >> 8) as u8, (value & 0xFF) as u8]);
            prop_assert!(sequence.is_valid());
            prop_assert_eq!(sequence.get_codepoint(), value);
            let decoded = to_display_char(c(sequence.get_codepoint())).ok();
            prop_assert_eq!(decoded, char::from_u32(value));
            prop_assert!(decoded.is_some());
        }

        #[test]
        fn surrogates_pass_through(value in 0xD800u32..=0xDFFF) {
            let encoded = encode_all(&[c(value)]);
            prop_assert_eq!(encoded.bytes, vec![(value >> 8) as u8, (value & 0xFF) as u8]);
            prop_assert_eq!(encoded.warnings.len(), 1);
        }

        #[test]
        fn supplementary_pairs(value in 0x10000u32..=0x10FFFF) {
            let encoded: Vec<u8> = Utf16Sequence::encode(c(value)).to_be_bytes().collect();
            prop_assert_eq!(encoded.len(), 4);
            let high = u16::from_be_bytes([encoded[0], encoded[1]]) as u32;
            let low = u16::from_be_bytes([encoded[2], encoded[3]]) as u32;
            prop_assert!((0xD800..=0xDBFF).contains(&high));
            prop_assert!((0xDC00..=0xDFFF).contains(&low));
            prop_assert_eq!(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF), value);
        }

        #[test]
        fn batch_length(values in proptest::collection::vec(0u32..=0x10FFFF, 0..64)) {
            let codepoints: Vec<CodePoint> = values.iter().map(|&value| c(value)).collect();
            let expected: usize = values
                .iter()
                .map(|&value| if value <= 0xFFFF { 2 } else { 4 })
                .sum();
            let encoded = encode_all(&codepoints);
            prop_assert_eq!(encoded.bytes.len(), expected);
            prop_assert_eq!(encoded.bytes.len() % 2, 0);
        }
    }
}
