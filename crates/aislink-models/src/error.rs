//! Error types for the `aislink-models` crate.
//!
//! Every fallible constructor, `TryFrom` implementation and generator call in
//! this crate returns a variant of [`EncodeError`]. None of them are
//! transient: they signal a caller contract violation or a defect.

/// Errors produced while validating fields or encoding payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A sentence or message field was outside its declared domain.
    #[error("field {field} out of range ({value}): {reason}")]
    FieldRange {
        /// The name of the offending field.
        field: &'static str,
        /// The rejected value, as text.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A character does not belong to the 6-bit armoring alphabet.
    #[error("invalid armoring character {character:?}: must be in '0'..='W' or '`'..='w'")]
    InvalidAlphabet {
        /// The rejected character.
        character: char,
    },

    /// A hexadecimal bit-buffer literal could not be parsed.
    #[error("invalid hex payload \"{value}\": {reason}")]
    InvalidHex {
        /// The value that failed to parse.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// An internal invariant of the encoder was broken.
    #[error("internal invariant violated: {reason}")]
    InternalInvariant {
        /// Human-readable explanation.
        reason: String,
    },
}

impl EncodeError {
    /// Shorthand for building a [`EncodeError::FieldRange`].
    pub(crate) fn field_range(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::FieldRange {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
