//! Signed quorum vote records.
//!
//! Service nodes sitting on designated quorums produce small signed votes:
//! checkpoint votes attesting to a block hash, and obligation votes changing
//! a worker's state. Both share a common envelope and are gossiped over the
//! quorum network (the `vote` command).

use crate::hash::BlockHash;
use crate::keys::Signature;
use serde::{Deserialize, Serialize};

/// Which quorum produced the vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoteType {
    /// Worker obligation votes (deregistration and friends).
    Obligations = 0,
    /// Block checkpoint votes.
    Checkpointing = 1,
}

impl VoteType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Obligations),
            1 => Some(Self::Checkpointing),
            _ => None,
        }
    }
}

/// Which side of the quorum the voter sits on. The zero value is reserved
/// as invalid and rejected at the wire boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoteGroup {
    Validator = 1,
    Worker = 2,
}

impl VoteGroup {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Validator),
            2 => Some(Self::Worker),
            _ => None,
        }
    }
}

/// The state transition an obligations vote asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StateChange {
    Deregister = 0,
    Decommission = 1,
    Recommission = 2,
    IpChangePenalty = 3,
}

impl StateChange {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Deregister),
            1 => Some(Self::Decommission),
            2 => Some(Self::Recommission),
            3 => Some(Self::IpChangePenalty),
            _ => None,
        }
    }
}

/// The type-specific portion of a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotePayload {
    /// Checkpointing: the block hash being attested.
    Checkpoint { block_hash: BlockHash },
    /// Obligations: the worker being voted on and the requested transition.
    StateChange {
        worker_index: u16,
        state: StateChange,
    },
}

/// A signed vote from a quorum member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumVote {
    pub version: u8,
    pub vote_type: VoteType,
    /// The height whose quorum this vote belongs to.
    pub height: u64,
    pub group: VoteGroup,
    /// The voter's position within its group.
    pub index_in_group: u16,
    pub signature: Signature,
    pub payload: VotePayload,
}

impl QuorumVote {
    /// The payload must agree with the vote type; decoders enforce this.
    pub fn payload_matches_type(&self) -> bool {
        match (self.vote_type, &self.payload) {
            (VoteType::Checkpointing, VotePayload::Checkpoint { .. }) => true,
            (VoteType::Obligations, VotePayload::StateChange { .. }) => true,
            _ => false,
        }
    }
}
