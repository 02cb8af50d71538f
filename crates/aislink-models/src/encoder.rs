//! # Payload-to-message encoder
//!
//! [`Encoder`] chains a [`SentenceGenerator`] and a [`MessageGenerator`] so
//! that a payload becomes IEC 61162-450 messages in one call, with both the
//! sequential id and the group code carried across calls.
//!
//! ```rust
//! use aislink_models::{BbmChannel, BitBuffer, Encoder, MessageId, SourceId, TalkerId};
//!
//! let mut encoder = Encoder::new(TalkerId::default(), SourceId::default());
//! let payload = BitBuffer::from_bytes(&[0xAB]);
//!
//! let messages = encoder
//!     .encode_bbm(&payload, BbmChannel::A, MessageId::try_from(8).unwrap())
//!     .unwrap();
//! assert_eq!(
//!     messages[0].to_string(),
//!     "\\g:1-1-1,s:GR0001*1D\\!AIBBM,1,1,0,1,8,bh,4*6E\r\n",
//! );
//! ```
//!
//! Sharing an encoder between threads means wrapping it in a
//! [`std::sync::Mutex`]: each call reads and advances the counters as one
//! step and must not interleave with another caller's.

use crate::bits::BitBuffer;
use crate::error::EncodeError;
use crate::fields::{BbmChannel, MessageId, TalkerId, VdmChannel};
use crate::generator::{SentenceGenerator, SentenceGroup, SentenceTarget};
use crate::message::{Message, MessageGenerator, SourceId};

/// Sentence and message generation for one output stream.
#[derive(Debug, Clone)]
pub struct Encoder {
    sentences: SentenceGenerator,
    messages: MessageGenerator,
}

impl Encoder {
    /// Create an encoder for the given talker and source identification.
    pub fn new(talker_id: TalkerId, source_id: SourceId) -> Self {
        Self {
            sentences: SentenceGenerator::new(talker_id),
            messages: MessageGenerator::new(source_id),
        }
    }

    /// The underlying sentence generator.
    pub fn sentences(&self) -> &SentenceGenerator {
        &self.sentences
    }

    /// The underlying message generator.
    pub fn messages(&self) -> &MessageGenerator {
        &self.messages
    }

    /// Encode `payload` into bare sentences, without TAG blocks.
    ///
    /// # Errors
    ///
    /// See [`SentenceGenerator::generate`].
    pub fn sentence_group(
        &mut self,
        payload: &BitBuffer,
        target: SentenceTarget,
    ) -> Result<SentenceGroup, EncodeError> {
        self.sentences.generate(payload, target)
    }

    /// Encode `payload` into one group of messages.
    ///
    /// # Errors
    ///
    /// See [`SentenceGenerator::generate`] and [`MessageGenerator::wrap`].
    pub fn encode(
        &mut self,
        payload: &BitBuffer,
        target: SentenceTarget,
    ) -> Result<Vec<Message>, EncodeError> {
        let group = self.sentences.generate(payload, target)?;
        self.messages.wrap([group])
    }

    /// Encode an ASM binary-data payload as `BBM` messages.
    ///
    /// # Errors
    ///
    /// See [`encode`](Self::encode).
    pub fn encode_bbm(
        &mut self,
        payload: &BitBuffer,
        channel: BbmChannel,
        message_id: MessageId,
    ) -> Result<Vec<Message>, EncodeError> {
        self.encode(
            payload,
            SentenceTarget::Bbm {
                channel,
                message_id,
            },
        )
    }

    /// Encode an AIS message bitstream as `VDM` messages.
    ///
    /// # Errors
    ///
    /// See [`encode`](Self::encode).
    pub fn encode_vdm(
        &mut self,
        payload: &BitBuffer,
        channel: VdmChannel,
    ) -> Result<Vec<Message>, EncodeError> {
        self.encode(payload, SentenceTarget::Vdm { channel })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::*;

    fn encoder() -> Encoder {
        Encoder::new(TalkerId::default(), SourceId::default())
    }

    #[test]
    fn counters_are_independent() {
        let mut encoder = encoder();
        let long = BitBuffer::from_bytes(&[0x12; 120]);
        let short = BitBuffer::from_bytes(&[0xAB]);

        let first = encoder.encode_vdm(&long, VdmChannel::A).unwrap();
        let second = encoder.encode_vdm(&short, VdmChannel::A).unwrap();
        let third = encoder.encode_vdm(&short, VdmChannel::A).unwrap();

        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|m| m.group_id.value() == 1));
        assert_eq!(second[0].group_id.value(), 2);
        assert_eq!(third[0].group_id.value(), 3);

        // Only the multi-sentence payload moved the sequential id.
        assert_eq!(first[0].sentence.sequential_id().value(), 0);
        assert_eq!(second[0].sentence.sequential_id().value(), 1);
        assert_eq!(third[0].sentence.sequential_id().value(), 1);
        assert_eq!(encoder.sentences().vdm_sequential_id().value(), 1);
        assert_eq!(encoder.messages().source_id().as_str(), "GR0001");
    }

    #[test]
    fn failed_encode_leaves_counters_untouched() {
        let mut encoder = encoder();
        assert!(encoder.encode_vdm(&BitBuffer::new(), VdmChannel::B).is_err());
        assert_eq!(encoder.messages().last_group_id(), None);
    }

    #[test]
    fn bare_sentence_group_does_not_touch_group_id() {
        let mut encoder = encoder();
        let group = encoder
            .sentence_group(
                &BitBuffer::from_bytes(&[0xAB]),
                SentenceTarget::Vdm {
                    channel: VdmChannel::A,
                },
            )
            .unwrap();
        assert_eq!(group[0].render(), "!AIVDM,1,1,0,A,bh,4*18\r\n");
        assert_eq!(encoder.messages().last_group_id(), None);
    }

    #[test]
    fn shared_encoder_issues_unique_ids_under_mutex() {
        let shared = Arc::new(Mutex::new(encoder()));
        let payload = Arc::new(BitBuffer::from_bytes(&[0x12; 120]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let payload = Arc::clone(&payload);
                thread::spawn(move || {
                    let mut encoder = shared.lock().unwrap();
                    let messages = encoder.encode_vdm(&payload, VdmChannel::A).unwrap();
                    (
                        messages[0].group_id.value(),
                        messages[0].sentence.sequential_id().value(),
                    )
                })
            })
            .collect();

        let ids: Vec<(u8, u8)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let groups: HashSet<u8> = ids.iter().map(|&(g, _)| g).collect();
        let sequences: HashSet<u8> = ids.iter().map(|&(_, s)| s).collect();
        assert_eq!(groups, HashSet::from([1, 2, 3, 4]));
        assert_eq!(sequences, HashSet::from([0, 1, 2, 3]));
    }
}
