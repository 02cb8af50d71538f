//! Rendering encoded traffic for stdout.

use aislink_models::{Message, Sentence};
use clap::ValueEnum;

/// How encoded traffic is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One sentence or message per line.
    Text,
    /// A JSON array of structured sentences or messages.
    Json,
}

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// Bare IEC 61162-1 sentences.
    Sentences(Vec<Sentence>),
    /// IEC 61162-450 messages.
    Messages(Vec<Message>),
}

impl Encoded {
    /// Number of lines that will be written in text mode.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Sentences(s) => s.len(),
            Self::Messages(m) => m.len(),
        }
    }

    /// Render in the requested format.
    ///
    /// Text output drops the sentence CRLF in favour of the platform newline.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => {
                let lines: Vec<String> = match self {
                    Self::Sentences(s) => s.iter().map(Sentence::render).collect(),
                    Self::Messages(m) => m.iter().map(Message::render).collect(),
                };
                Ok(lines
                    .iter()
                    .map(|line| line.trim_end_matches("\r\n"))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            OutputFormat::Json => Ok(match self {
                Self::Sentences(s) => serde_json::to_string_pretty(s)?,
                Self::Messages(m) => serde_json::to_string_pretty(m)?,
            }),
        }
    }
}
