//! Owned bit sequences used as encoder input.
//!
//! A [`BitBuffer`] holds an AIS message or ASM binary-data payload bit by bit,
//! most significant bit first, exactly as it will be armored.

use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;

// ---------------------------------------------------------------------------
// BitBuffer
// ---------------------------------------------------------------------------

/// An ordered, growable sequence of bits.
///
/// # Examples
///
/// ```
/// use aislink_models::BitBuffer;
///
/// let bits = BitBuffer::from_bytes(&[0xA5]);
/// assert_eq!(bits.len(), 8);
///
/// let parsed: BitBuffer = "0xA5".parse().unwrap();
/// assert_eq!(parsed, bits);
///
/// // Every hex digit contributes four bits, odd digit counts included.
/// let nibbles: BitBuffer = "123".parse().unwrap();
/// assert_eq!(nibbles.len(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Build a buffer from whole bytes, most significant bit first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Self::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            buffer.push_bits(u64::from(byte), 8);
        }
        buffer
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the low `width` bits of `value`, most significant first.
    ///
    /// Widths above 64 are clamped to 64.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        for i in (0..width.min(u64::BITS)).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    /// Append every bit of `other`.
    pub fn extend_from_bitbuffer(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Number of bits held.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if the buffer holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Borrow the bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitBuffer {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<&[u8]> for BitBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitBuffer {
    type Err = EncodeError;

    /// Parse a hex literal, with optional `0x` prefix and `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let mut buffer = BitBuffer::with_capacity(digits.len() * 4);
        for c in digits.chars().filter(|&c| c != '_') {
            let nibble = c.to_digit(16).ok_or_else(|| EncodeError::InvalidHex {
                value: s.to_string(),
                reason: format!("{c:?} is not a hex digit"),
            })?;
            buffer.push_bits(u64::from(nibble), 4);
        }
        Ok(buffer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
