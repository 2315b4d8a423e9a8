//! Wire encoding for strobe quorum network commands.
//!
//! Every quorum network message payload is a length-1 list whose single
//! element is a dictionary, encoded in a canonical bencode-style format with
//! lexicographically ordered keys. Field names are single characters to keep
//! messages small; the typed payload structs in [`payload`] give them names.
//!
//! - [`bt`] — the value model and canonical encoder/decoder.
//! - [`command`] — the command taxonomy and per-command access classes.
//! - [`payload`] — typed payload codecs, one per command.

pub mod bt;
pub mod command;
pub mod error;
pub mod payload;

pub use bt::{decode, decode_payload, encode, encode_payload, BtDict, BtValue};
pub use command::{Command, CommandAccess};
pub use error::WireError;
pub use payload::{
    decode_vote, encode_vote, BlinkPayload, BlinkSignPayload, NostartPayload, ReplyPayload,
    WireSignature,
};
