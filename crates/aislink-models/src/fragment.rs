//! Splitting armored payloads into sentence-sized fragments.

use crate::armor::ArmoredPayload;
use crate::error::EncodeError;

/// One bounded slice of an armored payload.
///
/// `index` is 1-based and never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Position of this fragment, starting at 1.
    pub index: usize,
    /// Number of fragments the payload was split into.
    pub total: usize,
    /// The armored characters carried by this fragment.
    pub text: &'a str,
}

/// Split `armored` into chunks of at most `max_chars` characters.
///
/// Every fragment but the last holds exactly `max_chars` characters; an empty
/// payload yields no fragments.
///
/// # Errors
///
/// Returns [`EncodeError::FieldRange`] if `max_chars` is zero.
///
/// # Examples
///
/// ```
/// use aislink_models::{armor, fragment, BitBuffer};
///
/// let armored = armor(&BitBuffer::from_bytes(&[0u8; 120])).unwrap();
/// let fragments = fragment(&armored, 57).unwrap();
/// let lengths: Vec<_> = fragments.iter().map(|f| f.text.len()).collect();
/// assert_eq!(lengths, vec![57, 57, 46]);
/// ```
pub fn fragment(armored: &ArmoredPayload, max_chars: usize) -> Result<Vec<Fragment<'_>>, EncodeError> {
    if max_chars == 0 {
        return Err(EncodeError::field_range(
            "max_chars",
            max_chars,
            "must be at least 1",
        ));
    }

    let text = armored.as_str();
    let total = text.len().div_ceil(max_chars);

    // The armoring alphabet is pure ASCII, so byte offsets are char offsets.
    Ok((0..total)
        .map(|i| {
            let start = i * max_chars;
            let end = usize::min(start + max_chars, text.len());
            Fragment {
                index: i + 1,
                total,
                text: &text[start..end],
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
