//! IEC 61162-450 sentence-encapsulating messages.
//!
//! Every [`Message`] carries exactly one TAG block and one sentence:
//!
//! ```text
//! \g:<order>-<size>-<group>,s:<source>*HH\<sentence>
//! ```
//!
//! The `g` parameter ties the sentences of one payload together. Its group
//! code rolls 1-99 and advances once per group, whatever the group size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::checksum::append_checksum;
use crate::error::EncodeError;
use crate::generator::SentenceGroup;
use crate::sentence::{is_field_char, Sentence};

/// Delimiter enclosing a TAG block.
pub const TAG_BLOCK_DELIMITER: char = '\\';

// ---------------------------------------------------------------------------
// SourceId
// ---------------------------------------------------------------------------

/// Source identification stamped in the `s` TAG parameter (e.g. `"GR0001"`).
///
/// Any non-empty run of printable ASCII is accepted, except the characters
/// IEC 61162-1 reserves as delimiters.
///
/// # Examples
///
/// ```
/// use aislink_models::SourceId;
///
/// let source: SourceId = "SI0042".parse().unwrap();
/// assert_eq!(source.as_str(), "SI0042");
/// assert_eq!(SourceId::default().as_str(), "GR0001");
/// assert!("GR\\01".parse::<SourceId>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), EncodeError> {
        if s.is_empty() {
            return Err(EncodeError::field_range("source_id", s, "must not be empty"));
        }
        if let Some(c) = s.chars().find(|&c| !is_field_char(c)) {
            return Err(EncodeError::field_range(
                "source_id",
                s,
                format!("reserved or non-printable character {c:?}"),
            ));
        }
        Ok(())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self("GR0001".to_string())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SourceId {
    type Error = EncodeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for SourceId {
    type Error = EncodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl FromStr for SourceId {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl From<SourceId> for String {
    fn from(value: SourceId) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// GroupId
// ---------------------------------------------------------------------------

/// Group code of the `g` TAG parameter (1-99).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct GroupId(u8);

impl GroupId {
    /// Return the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for GroupId {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if !(1..=99).contains(&value) {
            return Err(EncodeError::field_range(
                "group_id",
                value,
                "must be between 1 and 99",
            ));
        }
        Ok(Self(value))
    }
}

impl From<GroupId> for u8 {
    fn from(value: GroupId) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// GroupIdCounter
// ---------------------------------------------------------------------------

/// Rolling group code, starting before 1 and wrapping from 99 back to 1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupIdCounter {
    last: Option<GroupId>,
}

impl GroupIdCounter {
    /// The most recently issued group code, if any.
    pub fn last(&self) -> Option<GroupId> {
        self.last
    }

    /// Issue the group code for the next group.
    pub fn advance(&mut self) -> GroupId {
        let next = match self.last {
            None => GroupId(1),
            Some(GroupId(99)) => GroupId(1),
            Some(GroupId(n)) => GroupId(n + 1),
        };
        trace!(from = ?self.last, to = %next, "group id advanced");
        self.last = Some(next);
        next
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One TAG block plus one embedded sentence.
///
/// # Examples
///
/// ```
/// use aislink_models::{
///     FillBits, GroupId, Message, SequentialId, Sentence, SourceId, TalkerId, VdmChannel,
///     VdmSentence,
/// };
///
/// let message = Message {
///     sentence_order: 1,
///     group_size: 1,
///     group_id: GroupId::try_from(1).unwrap(),
///     source_id: SourceId::default(),
///     sentence: Sentence::Vdm(VdmSentence {
///         talker_id: TalkerId::default(),
///         fragment_count: 1,
///         fragment_index: 1,
///         sequential_id: SequentialId::ZERO,
///         channel: VdmChannel::A,
///         payload: "bh".into(),
///         fill_bits: FillBits::try_from(4).unwrap(),
///     }),
/// };
/// assert!(message.validate().is_ok());
/// assert_eq!(message.tag(), "g:1-1-1,s:GR0001");
/// assert!(message.render().starts_with("\\g:1-1-1,s:GR0001*1D\\!AIVDM"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Position of the sentence within its group, starting at 1.
    pub sentence_order: usize,
    /// Number of sentences in the group.
    pub group_size: usize,
    /// Group code shared by every message of the group.
    pub group_id: GroupId,
    /// Source identification.
    pub source_id: SourceId,
    /// The embedded sentence.
    pub sentence: Sentence,
}

impl Message {
    /// The TAG block contents, without delimiters or checksum.
    pub fn tag(&self) -> String {
        format!(
            "g:{}-{}-{},s:{}",
            self.sentence_order, self.group_size, self.group_id, self.source_id
        )
    }

    /// The complete message string.
    pub fn render(&self) -> String {
        format!(
            "{TAG_BLOCK_DELIMITER}{}{TAG_BLOCK_DELIMITER}{}",
            append_checksum(&self.tag()),
            self.sentence.render()
        )
    }

    /// Check the group position and the embedded sentence.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FieldRange`] if `sentence_order` falls outside
    /// `1..=group_size`, or the embedded sentence's own validation error.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(1..=self.group_size).contains(&self.sentence_order) {
            return Err(EncodeError::field_range(
                "sentence_order",
                self.sentence_order,
                format!("must be between 1 and group_size ({})", self.group_size),
            ));
        }
        self.sentence.validate()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ---------------------------------------------------------------------------
// TestMessage
// ---------------------------------------------------------------------------

/// A message whose string is given verbatim rather than built from fields.
///
/// Useful to inject known-good or deliberately malformed traffic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestMessage(String);

impl TestMessage {
    /// Wrap a literal message string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the message string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// MessageGenerator
// ---------------------------------------------------------------------------

/// Wraps sentence groups into messages, assigning group codes.
///
/// # Examples
///
/// ```
/// use aislink_models::{BitBuffer, MessageGenerator, SentenceGenerator, SourceId, VdmChannel};
///
/// let mut sentences = SentenceGenerator::default();
/// let mut messages = MessageGenerator::new(SourceId::default());
///
/// let group = sentences.generate_vdm(&BitBuffer::from_bytes(&[0xAB]), VdmChannel::A).unwrap();
/// let wrapped = messages.wrap(vec![group]).unwrap();
/// assert_eq!(wrapped.len(), 1);
/// assert_eq!(wrapped[0].group_id.value(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MessageGenerator {
    source_id: SourceId,
    group_ids: GroupIdCounter,
}

impl MessageGenerator {
    /// Create a generator stamping `source_id` on every message.
    pub fn new(source_id: SourceId) -> Self {
        Self {
            source_id,
            group_ids: GroupIdCounter::default(),
        }
    }

    /// The source identification stamped on every message.
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// The most recently issued group code, if any.
    pub fn last_group_id(&self) -> Option<GroupId> {
        self.group_ids.last()
    }

    /// Wrap each group in turn, issuing one group code per group.
    ///
    /// An empty group still consumes a group code.
    ///
    /// # Errors
    ///
    /// Returns the first [`Sentence::validate`] failure. Every sentence is
    /// checked before any group code is issued, so a failed call leaves the
    /// counter untouched.
    pub fn wrap(
        &mut self,
        groups: impl IntoIterator<Item = SentenceGroup>,
    ) -> Result<Vec<Message>, EncodeError> {
        let groups: Vec<SentenceGroup> = groups.into_iter().collect();
        for sentence in groups.iter().flatten() {
            sentence.validate()?;
        }

        let mut messages = Vec::with_capacity(groups.iter().map(Vec::len).sum());
        for group in groups {
            let group_id = self.group_ids.advance();
            let group_size = group.len();
            debug!(%group_id, group_size, source = %self.source_id, "wrapping sentence group");

            messages.extend(group.into_iter().enumerate().map(|(i, sentence)| Message {
                sentence_order: i + 1,
                group_size,
                group_id,
                source_id: self.source_id.clone(),
                sentence,
            }));
        }
        Ok(messages)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
