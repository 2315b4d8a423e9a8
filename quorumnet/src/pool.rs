//! The mempool admission interface.
//!
//! Transaction parsing and semantic verification live in the surrounding
//! node's mempool; the quorum network submits candidates and signs off on
//! the verdict it gets back.

use strobe_types::{QuorumVote, Transaction, TxHash};

/// The mempool's verdict on a blink candidate.
#[derive(Clone, Debug)]
pub struct BlinkVerdict {
    pub approved: bool,
    /// Diagnostics for logging; empty on approval.
    pub reason: String,
}

/// Outcome of offering a vote to the vote pool.
#[derive(Clone, Copy, Debug)]
pub struct VoteOutcome {
    /// The vote's signature and position checked out.
    pub verified: bool,
    /// The vote was not already in the pool. Only novel votes are re-relayed.
    pub newly_added: bool,
}

/// Admission interface to the surrounding node's mempool and vote pool.
pub trait TxPool: Send + Sync {
    /// Parse a serialized transaction, returning the parsed handle and its
    /// canonical hash. `None` when the blob is not a well-formed transaction.
    fn parse_tx(&self, blob: &[u8]) -> Option<(Transaction, TxHash)>;

    /// Run full blink admission on a parsed transaction.
    fn add_blink(&self, tx: &Transaction, blink_height: u64) -> BlinkVerdict;

    /// Offer a quorum vote to the vote pool.
    fn add_vote(&self, vote: &QuorumVote) -> VoteOutcome;
}
