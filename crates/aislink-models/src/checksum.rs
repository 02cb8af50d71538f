//! IEC 61162-1 style XOR checksum.
//!
//! The same checksum protects both the sentence body (between the `!`/`$`
//! sentinel and the `*` delimiter) and the IEC 61162-450 TAG block.

/// Compute the 8-bit XOR checksum of `data`.
///
/// A single leading `$` or `!` is ignored. `data` must not include the `*`
/// delimiter. Each character contributes the low eight bits of its code
/// point, so ASCII input hashes byte for byte.
///
/// # Examples
///
/// ```
/// use aislink_models::checksum;
///
/// assert_eq!(checksum("GPGGA"), checksum("$GPGGA"));
/// assert_eq!(checksum(""), 0);
/// ```
pub fn checksum(data: &str) -> u8 {
    let body = data
        .strip_prefix('$')
        .or_else(|| data.strip_prefix('!'))
        .unwrap_or(data);

    body.chars()
        .fold(0u8, |acc, c| acc ^ u32::from(c).to_le_bytes()[0])
}

/// Format a checksum the way it appears on the wire: two uppercase hex digits.
pub fn format_checksum(value: u8) -> String {
    format!("{value:02X}")
}

/// Append `*HH` to `body`: the framing shared by sentences and TAG blocks.
///
/// ```
/// use aislink_models::append_checksum;
///
/// assert_eq!(append_checksum("g:1-3-1,s:GR0001"), "g:1-3-1,s:GR0001*1F");
/// ```
pub fn append_checksum(body: &str) -> String {
    format!("{body}*{}", format_checksum(checksum(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(checksum(""), 0);
        assert_eq!(checksum("!"), 0);
        assert_eq!(checksum("$"), 0);
    }

    #[test]
    fn leading_sentinel_is_ignored() {
        assert_eq!(checksum("$GPGGA"), 0x56);
        assert_eq!(checksum("GPGGA"), 0x56);
        assert_eq!(checksum("!AIVDM,1,1,0,A,Beam me up - Scotty,5"), 0x3E);
    }

    #[test]
    fn only_one_sentinel_is_stripped() {
        // "$A" remains after stripping: 0x24 ^ 0x41.
        assert_eq!(checksum("$$A"), 0x65);
    }

    #[test]
    fn xor_composes_over_concatenation_without_sentinel() {
        let a = "AIBBM,1,1";
        let b = ",0,1,8,bh,4";
        let joined = format!("{a}{b}");
        assert_eq!(checksum(a) ^ checksum(b), checksum(&joined));
    }

    #[test]
    fn sentinel_breaks_composition_when_it_lands_mid_string() {
        // In the concatenation the '!' is no longer leading, so it is hashed.
        let a = "AB";
        let b = "!CD";
        let joined = format!("{a}{b}");
        assert_ne!(checksum(a) ^ checksum(b), checksum(&joined));
        assert_eq!(checksum(a) ^ checksum(b) ^ b'!', checksum(&joined));
    }

    #[test]
    fn tag_block_checksum() {
        assert_eq!(checksum("g:1-3-1,s:GR0001"), 0x1F);
    }

    #[test]
    fn non_ascii_characters_use_their_code_point() {
        assert_eq!(checksum("é"), 0xE9);
        assert_eq!(checksum("Aé"), 0x41 ^ 0xE9);
    }

    #[test]
    fn append_checksum_frames_body() {
        assert_eq!(
            append_checksum("!AIVDM,1,1,0,A,Beam me up - Scotty,5"),
            "!AIVDM,1,1,0,A,Beam me up - Scotty,5*3E"
        );
        assert_eq!(append_checksum(""), "*00");
    }

    #[test]
    fn format_is_two_uppercase_digits() {
        assert_eq!(format_checksum(0x0A), "0A");
        assert_eq!(format_checksum(0x3E), "3E");
        assert_eq!(format_checksum(0), "00");
    }
}
