#![deny(missing_docs)]

//! # AISLink Models
//!
//! Encoding of AIS message and ASM payloads into IEC 61162-1 sentences and
//! IEC 61162-450 messages.
//!
//! ## Pipeline
//!
//! ```text
//! BitBuffer
//! └── armor()            6-bit ASCII armoring + fill bits
//!     └── fragment()     split on the per-formatter character budget
//!         └── SentenceGenerator   BBM / VDM sentences, sequential id
//!             └── MessageGenerator   TAG block, group code
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`checksum`] | XOR checksum shared by sentences and TAG blocks |
//! | [`bits`] | `BitBuffer`, the encoder input |
//! | [`armor`] | 6-bit to 8-bit armoring and its inverse |
//! | [`fragment`] | Splitting armored payloads into fragments |
//! | [`fields`] | Validated sentence fields (`TalkerId`, `SequentialId`, channels, …) |
//! | [`sentence`] | `BBM` / `VDM` sentences and their rendering |
//! | [`generator`] | `SentenceGenerator` and the sequential id counter |
//! | [`message`] | IEC 61162-450 messages and the group code counter |
//! | [`encoder`] | `Encoder`, payload to messages in one call |

pub mod armor;
pub mod bits;
pub mod checksum;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod fragment;
pub mod generator;
pub mod message;
pub mod sentence;

// Re-export all public types at crate root for convenience.
pub use armor::*;
pub use bits::*;
pub use checksum::*;
pub use encoder::*;
pub use error::*;
pub use fields::*;
pub use fragment::*;
pub use generator::*;
pub use message::*;
pub use sentence::*;
