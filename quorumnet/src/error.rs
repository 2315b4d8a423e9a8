use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuorumnetError {
    #[error("{0}")]
    Wire(#[from] strobe_wire::WireError),

    #[error("too early in chain history to form a blink quorum")]
    QuorumUnavailable,

    #[error("not enough blink nodes to form a quorum ({size} at height {height})")]
    InsufficientQuorum { height: u64, size: usize },

    #[error("wrong quorum checksum: expected {expected}, received {received}")]
    ChecksumMismatch { expected: u64, received: u64 },

    #[error("configuration error: {0}")]
    Config(String),
}
