//! Quorum composition, checksums, and blink subquorum assembly.
//!
//! A blink transaction is authorized by two overlapping subquorums: the
//! "base" quorum selected at the authorization height rounded down to
//! [`BLINK_QUORUM_INTERVAL`], and the "next" quorum one interval later.
//! Approval requires a signature threshold in *both*.
//!
//! Sender and receiver cross-check their view of quorum composition with a
//! cheap 64-bit checksum before exchanging anything expensive; a mismatch
//! means divergent chain state and aborts the exchange.

use crate::error::QuorumnetError;
use crate::registry::NodeRegistry;
use std::sync::Arc;
use strobe_types::params::{
    BLINK_MIN_VOTES, BLINK_QUORUM_INTERVAL, BLINK_SUBQUORUM_SIZE, NUM_BLINK_SUBQUORUMS,
};
use strobe_types::{PublicKey, VoteType};

/// Which designated quorum to fetch from the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuorumKind {
    Obligations,
    Checkpointing,
    Blink,
}

impl From<VoteType> for QuorumKind {
    fn from(t: VoteType) -> Self {
        match t {
            VoteType::Obligations => QuorumKind::Obligations,
            VoteType::Checkpointing => QuorumKind::Checkpointing,
        }
    }
}

/// An ordered sequence of validator public keys. The order is part of the
/// protocol: positions index the blink signature matrix and the relay
/// topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quorum {
    pub validators: Vec<PublicKey>,
}

impl Quorum {
    pub fn new(validators: Vec<PublicKey>) -> Self {
        Self { validators }
    }

    pub fn size(&self) -> usize {
        self.validators.len()
    }

    /// This key's position in the quorum, if it is a member.
    pub fn position_of(&self, key: &PublicKey) -> Option<usize> {
        self.validators.iter().position(|v| v == key)
    }
}

/// The two subquorums authorizing one blink height.
#[derive(Clone, Debug)]
pub struct BlinkQuorums(pub [Arc<Quorum>; 2]);

impl BlinkQuorums {
    pub fn get(&self, subquorum: u8) -> &Arc<Quorum> {
        &self.0[subquorum as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Quorum>> {
        self.0.iter()
    }

    pub fn subquorum_sizes(&self) -> [usize; 2] {
        [self.0[0].size(), self.0[1].size()]
    }
}

/// The heights whose quorums authorize `blink_height`: the interval floor
/// and the following interval.
pub fn subquorum_heights(blink_height: u64) -> [u64; 2] {
    let base = blink_height - (blink_height % BLINK_QUORUM_INTERVAL);
    [base, base + BLINK_QUORUM_INTERVAL]
}

/// Deterministic digest of a validator sequence.
///
/// Reads 8 bytes from the first pubkey starting at `offset`, 8 bytes from
/// the second starting at `offset + 1`, and so on, wrapping reads around the
/// 32-byte key boundary, interpreting each read as a little-endian u64 and
/// summing with wraparound. The rotating offset makes the digest sensitive
/// to validator order, not just membership.
pub fn quorum_checksum(validators: &[PublicKey], mut offset: usize) -> u64 {
    const KEY_BYTES: usize = 32;

    let mut sum: u64 = 0;
    for key in validators {
        offset %= KEY_BYTES;
        let bytes = key.as_bytes();
        let mut word = [0u8; 8];
        for (i, b) in word.iter_mut().enumerate() {
            *b = bytes[(offset + i) % KEY_BYTES];
        }
        sum = sum.wrapping_add(u64::from_le_bytes(word));
        offset += 1;
    }
    sum
}

/// Fetch and validate both blink subquorums for a blink height.
///
/// Each subquorum must exist and have an acceptable size
/// (`BLINK_MIN_VOTES ..= BLINK_SUBQUORUM_SIZE`). When `expected_checksum`
/// is given (a checksum received on the wire), it must match the locally
/// computed one. Returns the quorums together with the local checksum.
pub fn blink_quorums(
    registry: &dyn NodeRegistry,
    blink_height: u64,
    expected_checksum: Option<u64>,
) -> Result<(BlinkQuorums, u64), QuorumnetError> {
    let heights = subquorum_heights(blink_height);

    let mut local_checksum: u64 = 0;
    let mut quorums = Vec::with_capacity(NUM_BLINK_SUBQUORUMS as usize);
    for (qi, &height) in heights.iter().enumerate() {
        let quorum = registry
            .quorum(QuorumKind::Blink, height)
            .ok_or(QuorumnetError::QuorumUnavailable)?;
        let size = quorum.size();
        if size < BLINK_MIN_VOTES || size > BLINK_SUBQUORUM_SIZE {
            return Err(QuorumnetError::InsufficientQuorum { height, size });
        }
        local_checksum = local_checksum.wrapping_add(quorum_checksum(
            &quorum.validators,
            qi * BLINK_SUBQUORUM_SIZE,
        ));
        quorums.push(quorum);
    }

    if let Some(received) = expected_checksum {
        if received != local_checksum {
            return Err(QuorumnetError::ChecksumMismatch {
                expected: local_checksum,
                received,
            });
        }
    }

    let quorums: [Arc<Quorum>; 2] = match quorums.try_into() {
        Ok(pair) => pair,
        Err(_) => unreachable!("exactly NUM_BLINK_SUBQUORUMS quorums are collected"),
    };
    Ok((BlinkQuorums(quorums), local_checksum))
}
