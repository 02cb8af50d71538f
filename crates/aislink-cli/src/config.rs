//! Encoder configuration.
//!
//! Station identity is read from the environment at startup and can be
//! overridden per invocation on the command line.

use aislink_models::{SourceId, TalkerId};

/// Environment variable holding the default talker identifier.
pub const TALKER_ID_VAR: &str = "AISLINK_TALKER_ID";

/// Environment variable holding the default source identification.
pub const SOURCE_ID_VAR: &str = "AISLINK_SOURCE_ID";

/// Station identity used for every sentence and message of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Talker identifier stamped on sentences.
    pub talker_id: TalkerId,
    /// Source identification stamped in TAG blocks.
    pub source_id: SourceId,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable            | Default  | Description                    |
    /// |---------------------|----------|--------------------------------|
    /// | `AISLINK_TALKER_ID` | `AI`     | Two-character talker id        |
    /// | `AISLINK_SOURCE_ID` | `GR0001` | IEC 61162-450 source id        |
    ///
    /// # Errors
    ///
    /// Fails if `AISLINK_TALKER_ID` or `AISLINK_SOURCE_ID` is set to a value
    /// its field rejects.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let talker_id = match lookup(TALKER_ID_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("{TALKER_ID_VAR}: {e}"))?,
            None => TalkerId::default(),
        };
        let source_id = match lookup(SOURCE_ID_VAR) {
            Some(raw) => SourceId::try_from(raw)
                .map_err(|e| anyhow::anyhow!("{SOURCE_ID_VAR}: {e}"))?,
            None => SourceId::default(),
        };

        Ok(Self {
            talker_id,
            source_id,
        })
    }

    /// Apply command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(mut self, talker_id: Option<TalkerId>, source_id: Option<SourceId>) -> Self {
        if let Some(talker_id) = talker_id {
            self.talker_id = talker_id;
        }
        if let Some(source_id) = source_id {
            self.source_id = source_id;
        }
        self
    }
}
