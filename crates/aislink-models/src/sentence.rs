//! IEC 61162-1 encapsulation sentences.
//!
//! Two formatters are supported:
//!
//! | Formatter | Type | Grammar |
//! |-----------|------|---------|
//! | `BBM` | [`BbmSentence`] | `!ttBBM,n,i,s,c,m,payload,f*HH\r\n` |
//! | `VDM` | [`VdmSentence`] | `!ttVDM,n,i,s,c,payload,f*HH\r\n` |
//!
//! Both are wrapped in the [`Sentence`] sum type which carries the shared
//! rendering and validation logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checksum::{append_checksum, checksum};
use crate::error::EncodeError;
use crate::fields::{
    BbmChannel, FillBits, MessageId, SentenceKind, SequentialId, TalkerId, VdmChannel,
    MAX_SENTENCES,
};

/// Start delimiter of encapsulation sentences.
pub const ENCAPSULATION_DELIMITER: char = '!';

/// Characters reserved by IEC 61162-1 that must never appear inside a field.
const RESERVED: &[char] = &['\r', '\n', '$', '*', ',', '!', '\\', '^', '~'];

/// `true` for printable ASCII (space included) outside the reserved set.
pub(crate) fn is_field_char(c: char) -> bool {
    (c.is_ascii_graphic() || c == ' ') && !RESERVED.contains(&c)
}

// ---------------------------------------------------------------------------
// BbmSentence
// ---------------------------------------------------------------------------

/// `BBM`: AIS broadcast binary message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BbmSentence {
    /// Talker identifier.
    pub talker_id: TalkerId,
    /// Total number of sentences carrying the payload (1-9).
    pub fragment_count: u8,
    /// Position of this sentence within the payload (1-9).
    pub fragment_index: u8,
    /// Sequential message identifier.
    pub sequential_id: SequentialId,
    /// Broadcast channel.
    pub channel: BbmChannel,
    /// ITU-R M.1371 message identifier.
    pub message_id: MessageId,
    /// Armored payload fragment.
    pub payload: String,
    /// Fill bits appended to the payload.
    pub fill_bits: FillBits,
}

// ---------------------------------------------------------------------------
// VdmSentence
// ---------------------------------------------------------------------------

/// `VDM`: AIS VHF data-link message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VdmSentence {
    /// Talker identifier.
    pub talker_id: TalkerId,
    /// Total number of sentences carrying the payload (1-9).
    pub fragment_count: u8,
    /// Position of this sentence within the payload (1-9).
    pub fragment_index: u8,
    /// Sequential message identifier.
    pub sequential_id: SequentialId,
    /// VHF channel.
    pub channel: VdmChannel,
    /// Armored payload fragment.
    pub payload: String,
    /// Fill bits appended to the payload.
    pub fill_bits: FillBits,
}

// ---------------------------------------------------------------------------
// Sentence
// ---------------------------------------------------------------------------

/// Any sentence this crate can render.
///
/// # Examples
///
/// ```
/// use aislink_models::{FillBits, SequentialId, Sentence, TalkerId, VdmChannel, VdmSentence};
///
/// let sentence = Sentence::Vdm(VdmSentence {
///     talker_id: TalkerId::default(),
///     fragment_count: 1,
///     fragment_index: 1,
///     sequential_id: SequentialId::ZERO,
///     channel: VdmChannel::A,
///     payload: "Beam me up - Scotty".into(),
///     fill_bits: FillBits::try_from(5).unwrap(),
/// });
/// assert_eq!(sentence.render(), "!AIVDM,1,1,0,A,Beam me up - Scotty,5*3E\r\n");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum Sentence {
    /// Broadcast binary message.
    Bbm(BbmSentence),
    /// VHF data-link message.
    Vdm(VdmSentence),
}

impl Sentence {
    /// Which formatter this sentence uses.
    pub fn kind(&self) -> SentenceKind {
        match self {
            Self::Bbm(_) => SentenceKind::Bbm,
            Self::Vdm(_) => SentenceKind::Vdm,
        }
    }

    /// Talker identifier.
    pub fn talker_id(&self) -> &TalkerId {
        match self {
            Self::Bbm(s) => &s.talker_id,
            Self::Vdm(s) => &s.talker_id,
        }
    }

    /// Total number of sentences carrying the payload.
    pub fn fragment_count(&self) -> u8 {
        match self {
            Self::Bbm(s) => s.fragment_count,
            Self::Vdm(s) => s.fragment_count,
        }
    }

    /// Position of this sentence within the payload.
    pub fn fragment_index(&self) -> u8 {
        match self {
            Self::Bbm(s) => s.fragment_index,
            Self::Vdm(s) => s.fragment_index,
        }
    }

    /// Sequential message identifier.
    pub fn sequential_id(&self) -> SequentialId {
        match self {
            Self::Bbm(s) => s.sequential_id,
            Self::Vdm(s) => s.sequential_id,
        }
    }

    /// Armored payload fragment.
    pub fn payload(&self) -> &str {
        match self {
            Self::Bbm(s) => &s.payload,
            Self::Vdm(s) => &s.payload,
        }
    }

    /// Fill bits appended to the payload.
    pub fn fill_bits(&self) -> FillBits {
        match self {
            Self::Bbm(s) => s.fill_bits,
            Self::Vdm(s) => s.fill_bits,
        }
    }

    /// Everything from the start delimiter up to, not including, `*`.
    pub fn body(&self) -> String {
        let head = format!(
            "{ENCAPSULATION_DELIMITER}{}{},{},{},{}",
            self.talker_id(),
            self.kind().formatter_code(),
            self.fragment_count(),
            self.fragment_index(),
            self.sequential_id(),
        );
        match self {
            Self::Bbm(s) => format!(
                "{head},{},{},{},{}",
                s.channel, s.message_id, s.payload, s.fill_bits
            ),
            Self::Vdm(s) => format!("{head},{},{},{}", s.channel, s.payload, s.fill_bits),
        }
    }

    /// Checksum over the body, start delimiter excluded.
    pub fn checksum(&self) -> u8 {
        checksum(&self.body())
    }

    /// The complete sentence, including checksum and CRLF terminator.
    pub fn render(&self) -> String {
        format!("{}\r\n", append_checksum(&self.body()))
    }

    /// Check every field against its wire domain.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FieldRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let count = self.fragment_count();
        let index = self.fragment_index();

        if count == 0 || usize::from(count) > MAX_SENTENCES {
            return Err(EncodeError::field_range(
                "fragment_count",
                count,
                format!("must be between 1 and {MAX_SENTENCES}"),
            ));
        }
        if index == 0 || index > count {
            return Err(EncodeError::field_range(
                "fragment_index",
                index,
                format!("must be between 1 and fragment_count ({count})"),
            ));
        }
        if let Some(c) = self
            .payload()
            .chars()
            .find(|&c| !is_field_char(c))
        {
            return Err(EncodeError::field_range(
                "payload",
                format!("{c:?}"),
                "reserved or non-printable character",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<BbmSentence> for Sentence {
    fn from(value: BbmSentence) -> Self {
        Self::Bbm(value)
    }
}

impl From<VdmSentence> for Sentence {
    fn from(value: VdmSentence) -> Self {
        Self::Vdm(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
