//! Fundamental types for the strobe quorum network.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: hashes, keys and signatures, quorum vote records, and the blink
//! protocol constants.

pub mod hash;
pub mod keys;
pub mod params;
pub mod transaction;
pub mod vote;

pub use hash::{BlockHash, TxHash};
pub use keys::{KeyPair, PrivateKey, PublicKey, ServiceNodeKeys, Signature, X25519PublicKey};
pub use transaction::Transaction;
pub use vote::{QuorumVote, StateChange, VoteGroup, VotePayload, VoteType};
