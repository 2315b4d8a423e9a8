//! The opaque parsed-transaction handle.
//!
//! Transaction parsing and semantic validation belong to the surrounding
//! node (the mempool interface); the quorum network only moves transactions
//! around and signs off on the mempool's verdict. A [`Transaction`] is
//! therefore the parsed handle the pool gave back, plus the serialized form
//! the network relays.

use serde::{Deserialize, Serialize};

/// A transaction as held by the blink pipeline: the canonical serialized
/// bytes and nothing else. The mempool owns interpretation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    blob: Vec<u8>,
}

impl Transaction {
    pub fn from_blob(blob: Vec<u8>) -> Self {
        Self { blob }
    }

    /// The serialized form, exactly as relayed on the wire.
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn size(&self) -> usize {
        self.blob.len()
    }
}
