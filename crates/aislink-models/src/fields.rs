//! Typed IEC 61162-1 sentence fields.
//!
//! Each field that has a restricted domain on the wire gets its own newtype
//! or enum so that out-of-range values are rejected at construction time
//! with [`EncodeError::FieldRange`] instead of producing an invalid sentence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Maximum number of sentences a single payload may span.
pub const MAX_SENTENCES: usize = 9;

/// Payload characters per BBM sentence.
///
/// 82 characters per sentence minus the worst-case width of every other BBM
/// field. Must be re-derived if talker id, message id or channel widths grow.
pub const BBM_MAX_PAYLOAD_CHARS: usize = 57;

/// Payload characters per VDM sentence, derived like [`BBM_MAX_PAYLOAD_CHARS`].
pub const VDM_MAX_PAYLOAD_CHARS: usize = 60;

// ---------------------------------------------------------------------------
// TalkerId
// ---------------------------------------------------------------------------

/// Two-character talker identifier (e.g. `"AI"` for an AIS station).
///
/// # Examples
///
/// ```
/// use aislink_models::TalkerId;
///
/// let talker: TalkerId = "AI".parse().unwrap();
/// assert_eq!(talker, TalkerId::default());
/// assert!("ais".parse::<TalkerId>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TalkerId(String);

impl TalkerId {
    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), EncodeError> {
        if s.len() != 2
            || !s
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            Err(EncodeError::field_range(
                "talker_id",
                s,
                "must be exactly 2 uppercase ASCII letters or digits",
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for TalkerId {
    fn default() -> Self {
        Self("AI".to_string())
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for TalkerId {
    type Error = EncodeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TalkerId {
    type Error = EncodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl FromStr for TalkerId {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl From<TalkerId> for String {
    fn from(value: TalkerId) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// SequentialId
// ---------------------------------------------------------------------------

/// Sequential message identifier (0-9) linking the sentences of one
/// multi-sentence payload.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct SequentialId(u8);

impl SequentialId {
    /// The identifier a fresh stream starts from.
    pub const ZERO: Self = Self(0);

    /// Return the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The identifier after this one, wrapping 9 back to 0.
    #[must_use]
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 10)
    }
}

impl fmt::Display for SequentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SequentialId {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 9 {
            return Err(EncodeError::field_range(
                "sequential_id",
                value,
                "must be between 0 and 9",
            ));
        }
        Ok(Self(value))
    }
}

impl From<SequentialId> for u8 {
    fn from(value: SequentialId) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// FillBits
// ---------------------------------------------------------------------------

/// Number of zero bits (0-5) appended to a payload before armoring.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct FillBits(u8);

impl FillBits {
    /// Fill bits needed to pad `bit_len` bits to a multiple of six.
    pub fn for_bit_len(bit_len: usize) -> Self {
        // The result is always below 6, so the narrowing cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let fill = ((6 - bit_len % 6) % 6) as u8;
        Self(fill)
    }

    /// Return the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for FillBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for FillBits {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 5 {
            return Err(EncodeError::field_range(
                "fill_bit_count",
                value,
                "must be between 0 and 5",
            ));
        }
        Ok(Self(value))
    }
}

impl From<FillBits> for u8 {
    fn from(value: FillBits) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// MessageId
// ---------------------------------------------------------------------------

/// Rec. ITU-R M.1371 message identifier (1-27), e.g. `8` for a binary
/// broadcast message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct MessageId(u8);

impl MessageId {
    /// Return the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for MessageId {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if !(1..=27).contains(&value) {
            return Err(EncodeError::field_range(
                "message_id",
                value,
                "must be between 1 and 27",
            ));
        }
        Ok(Self(value))
    }
}

impl FromStr for MessageId {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .parse()
            .map_err(|_| EncodeError::field_range("message_id", s, "must be a number"))?;
        Self::try_from(value)
    }
}

impl From<MessageId> for u8 {
    fn from(value: MessageId) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// BbmChannel
// ---------------------------------------------------------------------------

/// AIS channel selection for a BBM broadcast.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
pub enum BbmChannel {
    /// No channel preference.
    #[strum(serialize = "0")]
    NoPreference,
    /// Channel A / AIS 1.
    #[strum(serialize = "1")]
    A,
    /// Channel B / AIS 2.
    #[strum(serialize = "2")]
    B,
    /// Broadcast on both channels.
    #[strum(serialize = "3")]
    Both,
}

impl BbmChannel {
    /// The numeric code carried in the sentence.
    pub fn code(self) -> u8 {
        match self {
            Self::NoPreference => 0,
            Self::A => 1,
            Self::B => 2,
            Self::Both => 3,
        }
    }
}

impl TryFrom<u8> for BbmChannel {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoPreference),
            1 => Ok(Self::A),
            2 => Ok(Self::B),
            3 => Ok(Self::Both),
            other => Err(EncodeError::field_range(
                "channel",
                other,
                "must be between 0 and 3",
            )),
        }
    }
}

impl FromStr for BbmChannel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .parse()
            .map_err(|_| EncodeError::field_range("channel", s, "must be a number"))?;
        Self::try_from(value)
    }
}

// ---------------------------------------------------------------------------
// VdmChannel
// ---------------------------------------------------------------------------

/// AIS VHF channel a VDM sentence was received on.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum VdmChannel {
    /// AIS channel A.
    A,
    /// AIS channel B.
    B,
}

// ---------------------------------------------------------------------------
// SentenceKind
// ---------------------------------------------------------------------------

/// The sentence formatters this crate can produce.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SentenceKind {
    /// Binary broadcast message.
    Bbm,
    /// VHF data-link message.
    Vdm,
}

impl SentenceKind {
    /// The three-letter formatter code (`BBM` or `VDM`).
    pub fn formatter_code(self) -> &'static str {
        match self {
            Self::Bbm => "BBM",
            Self::Vdm => "VDM",
        }
    }

    /// Armored payload characters that fit in one sentence of this kind.
    pub fn max_payload_chars(self) -> usize {
        match self {
            Self::Bbm => BBM_MAX_PAYLOAD_CHARS,
            Self::Vdm => VDM_MAX_PAYLOAD_CHARS,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
