//! Sentence generation with automatic sequential identifiers.
//!
//! A [`SentenceGenerator`] turns one payload into the group of sentences
//! that carries it. Multi-sentence groups must be told apart at the receiver
//! from interleaved groups of the same formatter, so every formatter keeps
//! its own [`SequentialIdCounter`] which advances only after a payload that
//! needed more than one sentence.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::armor::armor;
use crate::bits::BitBuffer;
use crate::error::EncodeError;
use crate::fields::{
    BbmChannel, MessageId, SentenceKind, SequentialId, TalkerId, VdmChannel, MAX_SENTENCES,
};
use crate::fragment::fragment;
use crate::sentence::{BbmSentence, Sentence, VdmSentence};

/// The sentences carrying one payload, in transmission order.
pub type SentenceGroup = Vec<Sentence>;

// ---------------------------------------------------------------------------
// SequentialIdCounter
// ---------------------------------------------------------------------------

/// Rolling 0-9 sequential identifier for one sentence stream.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialIdCounter {
    current: SequentialId,
}

impl SequentialIdCounter {
    /// Start a counter at `start`.
    pub fn starting_at(start: SequentialId) -> Self {
        Self { current: start }
    }

    /// The identifier the next payload will carry.
    pub fn current(&self) -> SequentialId {
        self.current
    }

    /// Advance past a payload that used `sentences` sentences.
    ///
    /// Single-sentence payloads leave the counter untouched.
    pub fn record(&mut self, sentences: usize) {
        if sentences > 1 {
            let next = self.current.next();
            trace!(from = %self.current, to = %next, "sequential id advanced");
            self.current = next;
        }
    }
}

// ---------------------------------------------------------------------------
// SentenceTarget
// ---------------------------------------------------------------------------

/// Formatter-specific addressing for a payload.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceTarget {
    /// Broadcast as an ASM through `BBM` sentences.
    Bbm {
        /// Broadcast channel.
        channel: BbmChannel,
        /// ITU-R M.1371 message identifier.
        message_id: MessageId,
    },
    /// Report as a received AIS message through `VDM` sentences.
    Vdm {
        /// VHF channel.
        channel: VdmChannel,
    },
}

impl SentenceTarget {
    /// The formatter this target produces.
    pub fn kind(&self) -> SentenceKind {
        match self {
            Self::Bbm { .. } => SentenceKind::Bbm,
            Self::Vdm { .. } => SentenceKind::Vdm,
        }
    }
}

// ---------------------------------------------------------------------------
// SentenceGenerator
// ---------------------------------------------------------------------------

/// Generates `BBM` and `VDM` sentence groups, assigning sequential ids.
///
/// `BBM` and `VDM` streams keep separate counters.
///
/// # Examples
///
/// ```
/// use aislink_models::{BbmChannel, BitBuffer, MessageId, SentenceGenerator};
///
/// let mut generator = SentenceGenerator::default();
/// let payload = BitBuffer::from_bytes(&[0x12; 120]);
/// let group = generator
///     .generate_bbm(&payload, BbmChannel::A, MessageId::try_from(8).unwrap())
///     .unwrap();
/// assert_eq!(group.len(), 3);
/// assert_eq!(generator.bbm_sequential_id().value(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SentenceGenerator {
    talker_id: TalkerId,
    bbm_sequence: SequentialIdCounter,
    vdm_sequence: SequentialIdCounter,
}

impl SentenceGenerator {
    /// Create a generator emitting sentences under `talker_id`.
    pub fn new(talker_id: TalkerId) -> Self {
        Self {
            talker_id,
            bbm_sequence: SequentialIdCounter::default(),
            vdm_sequence: SequentialIdCounter::default(),
        }
    }

    /// The talker identifier stamped on every sentence.
    pub fn talker_id(&self) -> &TalkerId {
        &self.talker_id
    }

    /// Sequential id the next multi-sentence `BBM` payload will carry.
    pub fn bbm_sequential_id(&self) -> SequentialId {
        self.bbm_sequence.current()
    }

    /// Sequential id the next multi-sentence `VDM` payload will carry.
    pub fn vdm_sequential_id(&self) -> SequentialId {
        self.vdm_sequence.current()
    }

    fn counter_mut(&mut self, kind: SentenceKind) -> &mut SequentialIdCounter {
        match kind {
            SentenceKind::Bbm => &mut self.bbm_sequence,
            SentenceKind::Vdm => &mut self.vdm_sequence,
        }
    }

    /// Encode `payload` into the sentence group described by `target`.
    ///
    /// Every sentence of the group shares the counter value read before the
    /// call and the same fill-bit count. The fill-bit count is stamped on
    /// every sentence, not only the last, to stay wire compatible with
    /// existing receivers.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FieldRange`] if the payload is empty or needs
    /// more than nine sentences. Nothing is emitted and the counter is left
    /// untouched on error.
    pub fn generate(
        &mut self,
        payload: &BitBuffer,
        target: SentenceTarget,
    ) -> Result<SentenceGroup, EncodeError> {
        let kind = target.kind();
        let armored = armor(payload)?;
        let fragments = fragment(&armored, kind.max_payload_chars())?;

        let total = fragments.len();
        if total == 0 || total > MAX_SENTENCES {
            return Err(EncodeError::field_range(
                "fragment_count",
                total,
                format!(
                    "payload of {} bits needs {total} {kind} sentences, must be between 1 and {MAX_SENTENCES}",
                    payload.len()
                ),
            ));
        }

        let sequential_id = self.counter_mut(kind).current();
        let fill_bits = armored.fill_bits();

        // Bounded by MAX_SENTENCES above.
        #[allow(clippy::cast_possible_truncation)]
        let group: SentenceGroup = fragments
            .iter()
            .map(|f| match target {
                SentenceTarget::Bbm {
                    channel,
                    message_id,
                } => Sentence::Bbm(BbmSentence {
                    talker_id: self.talker_id.clone(),
                    fragment_count: total as u8,
                    fragment_index: f.index as u8,
                    sequential_id,
                    channel,
                    message_id,
                    payload: f.text.to_string(),
                    fill_bits,
                }),
                SentenceTarget::Vdm { channel } => Sentence::Vdm(VdmSentence {
                    talker_id: self.talker_id.clone(),
                    fragment_count: total as u8,
                    fragment_index: f.index as u8,
                    sequential_id,
                    channel,
                    payload: f.text.to_string(),
                    fill_bits,
                }),
            })
            .collect();

        for sentence in &group {
            sentence.validate()?;
        }

        debug!(
            %kind,
            sentences = total,
            %sequential_id,
            %fill_bits,
            bits = payload.len(),
            "generated sentence group"
        );

        self.counter_mut(kind).record(total);
        Ok(group)
    }

    /// Encode an ASM binary-data payload into `BBM` sentences.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn generate_bbm(
        &mut self,
        payload: &BitBuffer,
        channel: BbmChannel,
        message_id: MessageId,
    ) -> Result<SentenceGroup, EncodeError> {
        self.generate(
            payload,
            SentenceTarget::Bbm {
                channel,
                message_id,
            },
        )
    }

    /// Encode an AIS message bitstream into `VDM` sentences.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn generate_vdm(
        &mut self,
        payload: &BitBuffer,
        channel: VdmChannel,
    ) -> Result<SentenceGroup, EncodeError> {
        self.generate(payload, SentenceTarget::Vdm { channel })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn msg8() -> MessageId {
        MessageId::try_from(8).unwrap()
    }

    fn reference_payload() -> BitBuffer {
        format!("0x{}", "0123456789ABCDEF".repeat(15))
            .parse()
            .unwrap()
    }

    #[test]
    fn counter_ignores_single_sentence_payloads() {
        let mut counter = SequentialIdCounter::default();
        counter.record(1);
        counter.record(1);
        assert_eq!(counter.current(), SequentialId::ZERO);
        counter.record(2);
        assert_eq!(counter.current().value(), 1);
    }

    #[test]
    fn counter_wraps_nine_to_zero() {
        let mut counter = SequentialIdCounter::starting_at(SequentialId::try_from(9).unwrap());
        counter.record(3);
        assert_eq!(counter.current(), SequentialId::ZERO);
    }

    #[test]
    fn reference_bbm_group() {
        let mut generator = SentenceGenerator::default();
        let group = generator
            .generate_bbm(&reference_payload(), BbmChannel::A, msg8())
            .unwrap();

        let rendered: Vec<String> = group.iter().map(Sentence::render).collect();
        assert_eq!(
            rendered,
            vec![
                "!AIBBM,3,1,0,1,8,0B=5IpVckNt18lEWRJg=sh4SAFN9btog0B=5IpVckNt18lEWRJg=sh4SA,0*4D\r\n",
                "!AIBBM,3,2,0,1,8,FN9btog0B=5IpVckNt18lEWRJg=sh4SAFN9btog0B=5IpVckNt18lEWRJ,0*06\r\n",
                "!AIBBM,3,3,0,1,8,g=sh4SAFN9btog0B=5IpVckNt18lEWRJg=sh4SAFN9btog,0*28\r\n",
            ]
        );
        assert_eq!(generator.bbm_sequential_id().value(), 1);
        assert_eq!(generator.vdm_sequential_id(), SequentialId::ZERO);
    }

    #[test]
    fn reference_vdm_group_uses_sixty_char_budget() {
        let mut generator = SentenceGenerator::default();
        let group = generator
            .generate_vdm(&reference_payload(), VdmChannel::A)
            .unwrap();

        assert_eq!(
            group.iter().map(|s| s.payload().len()).collect::<Vec<_>>(),
            vec![60, 60, 40]
        );
        assert_eq!(
            group[2].render(),
            "!AIVDM,3,3,0,A,AFN9btog0B=5IpVckNt18lEWRJg=sh4SAFN9btog,0*78\r\n"
        );
        assert_eq!(generator.vdm_sequential_id().value(), 1);
        assert_eq!(generator.bbm_sequential_id(), SequentialId::ZERO);
    }

    #[test]
    fn single_sentence_payloads_keep_sequential_id() {
        let mut generator = SentenceGenerator::default();
        let payload = BitBuffer::from_bytes(&[0xAB]);
        for _ in 0..3 {
            let group = generator
                .generate_bbm(&payload, BbmChannel::A, msg8())
                .unwrap();
            assert_eq!(group.len(), 1);
            assert_eq!(group[0].sequential_id(), SequentialId::ZERO);
            assert_eq!(group[0].render(), "!AIBBM,1,1,0,1,8,bh,4*6E\r\n");
        }
        assert_eq!(generator.bbm_sequential_id(), SequentialId::ZERO);
    }

    #[test]
    fn multi_sentence_payload_uses_pre_call_value_and_wraps() {
        let mut generator = SentenceGenerator::default();
        let payload = reference_payload();
        for expected in (0..10).chain(0..2) {
            let group = generator
                .generate_bbm(&payload, BbmChannel::Both, msg8())
                .unwrap();
            assert!(group.iter().all(|s| s.sequential_id().value() == expected));
        }
        assert_eq!(generator.bbm_sequential_id().value(), 2);
    }

    #[test]
    fn fill_bits_stamped_on_every_sentence() {
        let mut generator = SentenceGenerator::default();
        // 130 bytes = 1040 bits -> 4 fill bits, 174 characters, 4 BBM sentences.
        let payload = BitBuffer::from_bytes(&[0x5A; 130]);
        let group = generator
            .generate_bbm(&payload, BbmChannel::A, msg8())
            .unwrap();
        assert_eq!(group.len(), 4);
        assert!(group.iter().all(|s| s.fill_bits().value() == 4));
    }

    #[test]
    fn indices_run_one_to_count() {
        let mut generator = SentenceGenerator::default();
        let group = generator
            .generate_vdm(&reference_payload(), VdmChannel::B)
            .unwrap();
        for (i, sentence) in group.iter().enumerate() {
            assert_eq!(usize::from(sentence.fragment_index()), i + 1);
            assert_eq!(sentence.fragment_count(), 3);
        }
    }

    #[test]
    fn empty_payload_is_rejected_without_side_effects() {
        let mut generator = SentenceGenerator::default();
        let err = generator
            .generate_vdm(&BitBuffer::new(), VdmChannel::A)
            .unwrap_err();
        assert!(matches!(err, EncodeError::FieldRange { field: "fragment_count", .. }));
    }

    #[test]
    fn oversized_payload_is_rejected_without_side_effects() {
        let mut generator = SentenceGenerator::default();
        // 9 * 57 characters fit; one more bit spills into a tenth sentence.
        let fits = BitBuffer::from(vec![true; 9 * 57 * 6]);
        let spills = BitBuffer::from(vec![true; 9 * 57 * 6 + 1]);

        assert_eq!(
            generator
                .generate_bbm(&fits, BbmChannel::A, msg8())
                .unwrap()
                .len(),
            9
        );
        assert_eq!(generator.bbm_sequential_id().value(), 1);

        let err = generator
            .generate_bbm(&spills, BbmChannel::A, msg8())
            .unwrap_err();
        assert!(matches!(err, EncodeError::FieldRange { field: "fragment_count", .. }));
        assert_eq!(generator.bbm_sequential_id().value(), 1);
    }

    #[test]
    fn custom_talker_id() {
        let mut generator = SentenceGenerator::new(TalkerId::try_from("AB").unwrap());
        let group = generator
            .generate_vdm(&BitBuffer::from_bytes(&[0xAB]), VdmChannel::A)
            .unwrap();
        assert!(group[0].render().starts_with("!ABVDM,1,1,0,A,bh,4*"));
        assert_eq!(generator.talker_id().as_str(), "AB");
    }
}
