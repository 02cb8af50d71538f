//! 6-bit to 8-bit ASCII payload armoring.
//!
//! Binary payloads travel inside sentence fields as a string over a
//! 64-symbol alphabet: every six bits become one character. The alphabet is
//! not contiguous; values 0-39 map onto `'0'..='W'` and values 40-63 onto
//! `` '`'..='w' ``.
//!
//! ```text
//! value   0 ..  39   ->  0x30 ('0') .. 0x57 ('W')
//! value  40 ..  63   ->  0x60 ('`') .. 0x77 ('w')
//! ```

use serde::{Deserialize, Serialize};

use crate::bits::BitBuffer;
use crate::error::EncodeError;
use crate::fields::FillBits;

/// Bits carried by one armored character.
pub const BITS_PER_CHAR: usize = 6;

// ---------------------------------------------------------------------------
// ArmoredPayload
// ---------------------------------------------------------------------------

/// A bit buffer rendered over the armoring alphabet, together with the number
/// of fill bits that were appended to reach a multiple of six.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArmoredPayload {
    text: String,
    fill_bits: FillBits,
}

impl ArmoredPayload {
    /// The armored characters.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of armored characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// `true` for the armoring of an empty bit buffer.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Fill bits appended before armoring.
    pub fn fill_bits(&self) -> FillBits {
        self.fill_bits
    }
}

// ---------------------------------------------------------------------------
// Symbol mapping
// ---------------------------------------------------------------------------

/// Map a 6-bit value onto its armoring character.
///
/// # Errors
///
/// Returns [`EncodeError::FieldRange`] if `value` does not fit in six bits.
pub fn sixbit_to_char(value: u8) -> Result<char, EncodeError> {
    match value {
        0..=39 => Ok(char::from(value + 48)),
        40..=63 => Ok(char::from(value + 56)),
        other => Err(EncodeError::field_range(
            "sixbit",
            other,
            "must be between 0 and 63",
        )),
    }
}

/// Map an armoring character back onto its 6-bit value.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidAlphabet`] for characters outside
/// `'0'..='W'` and `` '`'..='w' ``.
pub fn char_to_sixbit(c: char) -> Result<u8, EncodeError> {
    match u8::try_from(c) {
        Ok(b @ b'0'..=b'W') => Ok(b - 48),
        Ok(b @ b'`'..=b'w') => Ok(b - 56),
        _ => Err(EncodeError::InvalidAlphabet { character: c }),
    }
}

/// `true` if every character of `text` belongs to the armoring alphabet.
pub fn is_armored(text: &str) -> bool {
    text.chars().all(|c| char_to_sixbit(c).is_ok())
}

// ---------------------------------------------------------------------------
// Armoring
// ---------------------------------------------------------------------------

/// Armor `bits`, padding with zero fill bits to a multiple of six.
///
/// The caller's buffer is left untouched.
///
/// # Errors
///
/// Returns [`EncodeError::InternalInvariant`] if the padded length is not a
/// multiple of six, which would indicate a defect in the padding logic.
///
/// # Examples
///
/// ```
/// use aislink_models::{armor, BitBuffer};
///
/// let armored = armor(&BitBuffer::from_bytes(&[0xFF])).unwrap();
/// assert_eq!(armored.as_str(), "wh");
/// assert_eq!(armored.fill_bits().value(), 4);
/// ```
pub fn armor(bits: &BitBuffer) -> Result<ArmoredPayload, EncodeError> {
    let fill_bits = FillBits::for_bit_len(bits.len());
    let padded_len = bits.len() + usize::from(fill_bits.value());

    if padded_len % BITS_PER_CHAR != 0 {
        return Err(EncodeError::InternalInvariant {
            reason: format!("padded length {padded_len} is not a multiple of {BITS_PER_CHAR}"),
        });
    }

    let padded: Vec<bool> = bits
        .iter()
        .chain(std::iter::repeat_n(false, usize::from(fill_bits.value())))
        .collect();

    let text = padded
        .chunks_exact(BITS_PER_CHAR)
        .map(|group| {
            let value = group
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
            sixbit_to_char(value)
        })
        .collect::<Result<String, _>>()?;

    Ok(ArmoredPayload { text, fill_bits })
}

/// Recover the payload bits from an armored string, dropping `fill_bits`
/// trailing bits.
///
/// # Errors
///
/// - [`EncodeError::InvalidAlphabet`] if `text` holds a character outside
///   the armoring alphabet.
/// - [`EncodeError::FieldRange`] if `fill_bits` exceeds the decoded length.
pub fn dearmor(text: &str, fill_bits: FillBits) -> Result<BitBuffer, EncodeError> {
    let mut bits = BitBuffer::with_capacity(text.len() * BITS_PER_CHAR);
    for c in text.chars() {
        bits.push_bits(u64::from(char_to_sixbit(c)?), 6);
    }

    let fill = usize::from(fill_bits.value());
    if fill > bits.len() {
        return Err(EncodeError::field_range(
            "fill_bit_count",
            fill,
            format!("exceeds the {} decoded bits", bits.len()),
        ));
    }

    let keep = bits.len() - fill;
    Ok(bits.iter().take(keep).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table_agrees_with_arithmetic() {
        const ALPHABET: &str =
            "0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVW`abcdefghijklmnopqrstuvw";
        for (value, expected) in (0u8..64).zip(ALPHABET.chars()) {
            assert_eq!(sixbit_to_char(value).unwrap(), expected);
            assert_eq!(char_to_sixbit(expected).unwrap(), value);
        }
        assert!(sixbit_to_char(64).is_err());
    }

    #[test]
    fn gap_characters_are_rejected() {
        for c in ['X', 'Y', 'Z', '[', '\\', ']', '^', '_', 'x', '/', ','] {
            assert_eq!(
                char_to_sixbit(c),
                Err(EncodeError::InvalidAlphabet { character: c })
            );
        }
    }

    #[test]
    fn armor_pads_to_multiple_of_six() {
        let armored = armor(&BitBuffer::from(vec![true, false, true])).unwrap();
        assert_eq!(armored.as_str(), "`");
        assert_eq!(armored.fill_bits().value(), 3);

        let zero = armor(&BitBuffer::from_bytes(&[0x00])).unwrap();
        assert_eq!(zero.as_str(), "00");
        assert_eq!(zero.fill_bits().value(), 4);
    }

    #[test]
    fn armor_without_fill() {
        let armored = armor(&BitBuffer::from_bytes(&[0x04, 0x20, 0x82])).unwrap();
        assert_eq!(armored.as_str(), "1222");
        assert_eq!(armored.fill_bits().value(), 0);
    }

    #[test]
    fn armor_empty_buffer() {
        let armored = armor(&BitBuffer::new()).unwrap();
        assert!(armored.is_empty());
        assert_eq!(armored.fill_bits().value(), 0);
    }

    #[test]
    fn armor_reference_payload() {
        let bits: BitBuffer = format!("0x{}", "0123456789ABCDEF".repeat(15)).parse().unwrap();
        assert_eq!(bits.len(), 960);

        let armored = armor(&bits).unwrap();
        assert_eq!(armored.len(), 160);
        assert_eq!(armored.fill_bits().value(), 0);
        assert_eq!(
            &armored.as_str()[..32],
            "0B=5IpVckNt18lEWRJg=sh4SAFN9btog"
        );
        assert!(is_armored(armored.as_str()));
    }

    #[test]
    fn armor_does_not_mutate_input() {
        let bits = BitBuffer::from_bytes(&[0xAB]);
        let before = bits.clone();
        armor(&bits).unwrap();
        assert_eq!(bits, before);
    }

    #[test]
    fn dearmor_drops_fill_bits() {
        let bits = dearmor("bh", FillBits::try_from(4).unwrap()).unwrap();
        assert_eq!(bits, BitBuffer::from_bytes(&[0xAB]));
    }

    #[test]
    fn dearmor_rejects_bad_input() {
        assert!(matches!(
            dearmor("0X", FillBits::default()),
            Err(EncodeError::InvalidAlphabet { character: 'X' })
        ));
        assert!(matches!(
            dearmor("", FillBits::try_from(2).unwrap()),
            Err(EncodeError::FieldRange { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fill_bits_complete_a_multiple_of_six(bits in proptest::collection::vec(any::<bool>(), 0..400)) {
                let n = bits.len();
                let armored = armor(&BitBuffer::from(bits)).unwrap();
                let fill = usize::from(armored.fill_bits().value());
                prop_assert_eq!(fill, (6 - n % 6) % 6);
                prop_assert_eq!((n + fill) % 6, 0);
                prop_assert_eq!(armored.len(), (n + fill) / 6);
            }

            #[test]
            fn dearmor_recovers_original_bits(bits in proptest::collection::vec(any::<bool>(), 0..400)) {
                let original = BitBuffer::from(bits);
                let armored = armor(&original).unwrap();
                let back = dearmor(armored.as_str(), armored.fill_bits()).unwrap();
                prop_assert_eq!(back, original);
            }
        }
    }
}
