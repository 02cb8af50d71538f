//! AISLink encoder: turns hex payloads into IEC 61162-1 sentences or
//! IEC 61162-450 messages on stdout.

use aislink_models::{
    BbmChannel, BitBuffer, Encoder, MessageId, SentenceTarget, SourceId, TalkerId, VdmChannel,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

mod config;
mod output;

use crate::config::AppConfig;
use crate::output::{Encoded, OutputFormat};

/// AIS payload encoder.
#[derive(Parser, Debug)]
#[command(
    name = "aislink",
    about = "Encode AIS payloads into IEC 61162-1 sentences and IEC 61162-450 messages"
)]
#[command(version)]
struct Cli {
    /// Talker identifier (overrides AISLINK_TALKER_ID).
    #[arg(long, global = true)]
    talker_id: Option<TalkerId>,

    /// IEC 61162-450 source identification (overrides AISLINK_SOURCE_ID).
    #[arg(long, global = true)]
    source_id: Option<SourceId>,

    /// Print bare sentences instead of TAG-block messages.
    #[arg(long, global = true)]
    raw: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Broadcast an ASM binary-data payload as BBM sentences.
    Bbm {
        /// Payload as hex (e.g. 0x0123456789ABCDEF).
        #[arg(long)]
        payload: BitBuffer,
        /// Broadcast channel: 0 none, 1 A, 2 B, 3 both.
        #[arg(long, default_value = "0")]
        channel: BbmChannel,
        /// ITU-R M.1371 message id.
        #[arg(long, default_value = "8")]
        message_id: MessageId,
        /// Encode the payload this many times.
        #[arg(long, default_value_t = 1)]
        repeat: usize,
    },
    /// Report an AIS message bitstream as VDM sentences.
    Vdm {
        /// Payload as hex.
        #[arg(long)]
        payload: BitBuffer,
        /// VHF channel (A or B).
        #[arg(long, default_value = "A")]
        channel: VdmChannel,
        /// Encode the payload this many times.
        #[arg(long, default_value_t = 1)]
        repeat: usize,
    },
}

impl Command {
    fn payload(&self) -> &BitBuffer {
        match self {
            Self::Bbm { payload, .. } | Self::Vdm { payload, .. } => payload,
        }
    }

    fn repeat(&self) -> usize {
        match self {
            Self::Bbm { repeat, .. } | Self::Vdm { repeat, .. } => *repeat,
        }
    }

    fn target(&self) -> SentenceTarget {
        match *self {
            Self::Bbm {
                channel,
                message_id,
                ..
            } => SentenceTarget::Bbm {
                channel,
                message_id,
            },
            Self::Vdm { channel, .. } => SentenceTarget::Vdm { channel },
        }
    }
}

fn run(cli: &Cli, config: AppConfig) -> anyhow::Result<Encoded> {
    let mut encoder = Encoder::new(config.talker_id, config.source_id);
    let payload = cli.command.payload();
    let target = cli.command.target();

    info!(
        kind = %target.kind(),
        bits = payload.len(),
        repeat = cli.command.repeat(),
        "encoding payload"
    );

    if cli.raw {
        let mut sentences = Vec::new();
        for _ in 0..cli.command.repeat() {
            sentences.extend(
                encoder
                    .sentence_group(payload, target)
                    .context("failed to generate sentences")?,
            );
        }
        Ok(Encoded::Sentences(sentences))
    } else {
        let mut messages = Vec::new();
        for _ in 0..cli.command.repeat() {
            messages.extend(
                encoder
                    .encode(payload, target)
                    .context("failed to generate messages")?,
            );
        }
        Ok(Encoded::Messages(messages))
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only encoded traffic.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?
        .with_overrides(cli.talker_id.clone(), cli.source_id.clone());

    let encoded = run(&cli, config)?;
    info!(lines = encoded.line_count(), "encoding complete");
    println!("{}", encoded.render(cli.format)?);

    Ok(())
}
