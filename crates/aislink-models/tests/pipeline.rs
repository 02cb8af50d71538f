//! End-to-end encoding of the reference payloads.

use aislink_models::{
    armor, checksum, dearmor, fragment, BbmChannel, BitBuffer, Encoder, MessageGenerator,
    MessageId, SentenceGenerator, SentenceKind, SourceId, TalkerId, VdmChannel,
};

fn reference_payload() -> BitBuffer {
    format!("0x{}", "0123456789ABCDEF".repeat(15))
        .parse()
        .unwrap()
}

#[test]
fn reference_payload_armors_and_fragments() {
    let payload = reference_payload();
    assert_eq!(payload.len(), 960);

    let armored = armor(&payload).unwrap();
    assert_eq!(armored.fill_bits().value(), 0);
    assert_eq!(armored.len(), 160);

    let fragments = fragment(&armored, SentenceKind::Bbm.max_payload_chars()).unwrap();
    let lengths: Vec<usize> = fragments.iter().map(|f| f.text.len()).collect();
    assert_eq!(lengths, vec![57, 57, 46]);

    let joined: String = fragments.iter().map(|f| f.text).collect();
    assert_eq!(dearmor(&joined, armored.fill_bits()).unwrap(), payload);
}

#[test]
fn generated_sentences_carry_valid_checksums() {
    let mut generator = SentenceGenerator::default();
    let group = generator
        .generate_bbm(
            &reference_payload(),
            BbmChannel::A,
            MessageId::try_from(8).unwrap(),
        )
        .unwrap();

    for sentence in &group {
        let rendered = sentence.render();
        let line = rendered.strip_suffix("\r\n").unwrap();
        let (body, hex) = line.rsplit_once('*').unwrap();
        assert_eq!(u8::from_str_radix(hex, 16).unwrap(), checksum(body));
        assert!(line.len() <= 82, "sentence exceeds 82 characters: {line}");
    }
}

#[test]
fn messages_wrap_each_generate_call_as_one_group() {
    let mut sentences = SentenceGenerator::new(TalkerId::default());
    let mut messages = MessageGenerator::new(SourceId::default());

    let long = sentences
        .generate_bbm(
            &reference_payload(),
            BbmChannel::A,
            MessageId::try_from(8).unwrap(),
        )
        .unwrap();
    let short = sentences
        .generate_vdm(&BitBuffer::from_bytes(&[0xAB]), VdmChannel::A)
        .unwrap();

    let wrapped = messages.wrap(vec![long, short]).unwrap();
    let tags: Vec<String> = wrapped.iter().map(|m| m.tag()).collect();
    assert_eq!(
        tags,
        vec![
            "g:1-3-1,s:GR0001",
            "g:2-3-1,s:GR0001",
            "g:3-3-1,s:GR0001",
            "g:1-1-2,s:GR0001",
        ]
    );
    assert_eq!(
        wrapped[3].render(),
        "\\g:1-1-2,s:GR0001*1E\\!AIVDM,1,1,0,A,bh,4*18\r\n"
    );
}

#[test]
fn tag_block_checksum_is_valid() {
    let mut encoder = Encoder::new(TalkerId::default(), SourceId::default());
    let messages = encoder
        .encode_vdm(&reference_payload(), VdmChannel::B)
        .unwrap();

    for message in &messages {
        let rendered = message.render();
        let inner = rendered.strip_prefix('\\').unwrap();
        let (tag_block, sentence) = inner.split_once('\\').unwrap();
        let (tag, hex) = tag_block.rsplit_once('*').unwrap();
        assert_eq!(u8::from_str_radix(hex, 16).unwrap(), checksum(tag));
        assert_eq!(sentence, message.sentence.render());
    }
}
