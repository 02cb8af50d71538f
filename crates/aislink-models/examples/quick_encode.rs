//! Print single sentences and the reference 120-byte BBM payload, first as
//! bare sentences and then wrapped in IEC 61162-450 messages.
//!
//! ```text
//! cargo run -p aislink-models --example quick_encode
//! ```

use aislink_models::{
    BbmChannel, BbmSentence, BitBuffer, FillBits, MessageGenerator, MessageId, Sentence,
    SentenceGenerator, SequentialId, SourceId, TalkerId, VdmChannel, VdmSentence,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vdm = Sentence::Vdm(VdmSentence {
        talker_id: TalkerId::default(),
        fragment_count: 1,
        fragment_index: 1,
        sequential_id: SequentialId::ZERO,
        channel: VdmChannel::A,
        payload: "Beam me up - Scotty".into(),
        fill_bits: FillBits::try_from(5)?,
    });
    print!("{vdm}");

    let bbm = Sentence::Bbm(BbmSentence {
        talker_id: TalkerId::default(),
        fragment_count: 1,
        fragment_index: 1,
        sequential_id: SequentialId::ZERO,
        channel: BbmChannel::A,
        message_id: MessageId::try_from(8)?,
        payload: "Beam me up - Scotty".into(),
        fill_bits: FillBits::try_from(5)?,
    });
    print!("{bbm}");

    let payload: BitBuffer = format!("0x{}", "0123456789ABCDEF".repeat(15)).parse()?;

    let mut sentences = SentenceGenerator::default();
    let group = sentences.generate_bbm(&payload, BbmChannel::A, MessageId::try_from(8)?)?;
    for sentence in &group {
        print!("{sentence}");
    }

    let mut messages = MessageGenerator::new(SourceId::default());
    for message in messages.wrap(vec![group])? {
        print!("{message}");
    }

    Ok(())
}
