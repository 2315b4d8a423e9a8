//! Per-transaction blink signature state.
//!
//! A [`BlinkTx`] accumulates validator signatures in a 2 × subquorum-size
//! matrix. Each cell transitions at most once, from empty to approved or
//! rejected; tallies are maintained under the same write lock, so the
//! [`approved`](SignatureSlots::approved) and
//! [`rejected`](SignatureSlots::rejected) predicates always see a consistent
//! snapshot. Both predicates are monotonic: once true, they stay true.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use strobe_crypto::blake2b_256_multi;
use strobe_types::params::BLINK_MIN_VOTES;
use strobe_types::{Signature, Transaction, TxHash};

/// Domain tags keeping approval and rejection signatures distinct: a
/// rejection signature can never be replayed as an approval.
const APPROVE_DOMAIN: &[u8] = b"strobe-blink-approve";
const REJECT_DOMAIN: &[u8] = b"strobe-blink-reject";

/// The state of one signature cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureStatus {
    None,
    Approved,
    Rejected,
}

#[derive(Clone, Copy)]
struct Cell {
    approval: bool,
    signature: Signature,
}

/// The lock-guarded signature matrix of a [`BlinkTx`].
pub struct SignatureSlots {
    /// `cells[subquorum][position]`, sized by the actual quorums.
    cells: [Vec<Option<Cell>>; 2],
    approvals: [usize; 2],
    rejections: [usize; 2],
}

impl SignatureSlots {
    fn new(subquorum_sizes: [usize; 2]) -> Self {
        Self {
            cells: [
                vec![None; subquorum_sizes[0]],
                vec![None; subquorum_sizes[1]],
            ],
            approvals: [0; 2],
            rejections: [0; 2],
        }
    }

    pub fn subquorum_size(&self, subquorum: u8) -> usize {
        self.cells[subquorum as usize].len()
    }

    pub fn status(&self, subquorum: u8, position: usize) -> SignatureStatus {
        match self.cells[subquorum as usize][position] {
            None => SignatureStatus::None,
            Some(Cell { approval: true, .. }) => SignatureStatus::Approved,
            Some(Cell { approval: false, .. }) => SignatureStatus::Rejected,
        }
    }

    /// Record a signature that already passed range checks and cryptographic
    /// verification. Returns `false` if the cell is already occupied (a
    /// concurrent writer got there first); the cell value never changes once
    /// set.
    pub fn add_prechecked(
        &mut self,
        subquorum: u8,
        position: usize,
        approval: bool,
        signature: Signature,
    ) -> bool {
        let qi = subquorum as usize;
        let cell = &mut self.cells[qi][position];
        if cell.is_some() {
            return false;
        }
        *cell = Some(Cell {
            approval,
            signature,
        });
        if approval {
            self.approvals[qi] += 1;
        } else {
            self.rejections[qi] += 1;
        }
        true
    }

    /// Approved: every subquorum reached the approval threshold.
    pub fn approved(&self) -> bool {
        self.approvals.iter().all(|&a| a >= BLINK_MIN_VOTES)
    }

    /// Rejected: some subquorum has collected enough rejections that its
    /// approval threshold is unreachable.
    pub fn rejected(&self) -> bool {
        self.rejections
            .iter()
            .zip(self.cells.iter())
            .any(|(&r, cells)| r + BLINK_MIN_VOTES > cells.len())
    }

    /// The stored signature at a cell, if any.
    pub fn signature_at(&self, subquorum: u8, position: usize) -> Option<Signature> {
        self.cells[subquorum as usize][position].map(|c| c.signature)
    }

    /// Compact `[A R - …] [- - …]` rendering of the matrix for trace logs.
    pub fn grid(&self) -> String {
        let mut out = String::new();
        for (qi, cells) in self.cells.iter().enumerate() {
            if qi > 0 {
                out.push(' ');
            }
            out.push('[');
            for (p, cell) in cells.iter().enumerate() {
                if p > 0 {
                    out.push(' ');
                }
                out.push(match cell {
                    None => '-',
                    Some(Cell { approval: true, .. }) => 'A',
                    Some(Cell { approval: false, .. }) => 'R',
                });
            }
            out.push(']');
        }
        out
    }
}

/// One blink transaction with its signature matrix.
pub struct BlinkTx {
    blink_height: u64,
    tx: Transaction,
    tx_hash: TxHash,
    slots: RwLock<SignatureSlots>,
}

impl BlinkTx {
    pub fn new(
        blink_height: u64,
        tx: Transaction,
        tx_hash: TxHash,
        subquorum_sizes: [usize; 2],
    ) -> Self {
        Self {
            blink_height,
            tx,
            tx_hash,
            slots: RwLock::new(SignatureSlots::new(subquorum_sizes)),
        }
    }

    pub fn blink_height(&self) -> u64 {
        self.blink_height
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Shared access to the signature matrix (status reads, tallies).
    pub fn slots(&self) -> RwLockReadGuard<'_, SignatureSlots> {
        self.slots.read().expect("blink tx lock poisoned")
    }

    /// Exclusive access to the signature matrix (signature commits).
    pub fn slots_mut(&self) -> RwLockWriteGuard<'_, SignatureSlots> {
        self.slots.write().expect("blink tx lock poisoned")
    }

    /// The message a quorum member signs for this tx. Approval and rejection
    /// sign different messages.
    pub fn signing_hash(&self, approval: bool) -> [u8; 32] {
        let domain = if approval {
            APPROVE_DOMAIN
        } else {
            REJECT_DOMAIN
        };
        blake2b_256_multi(&[
            domain,
            &self.blink_height.to_le_bytes(),
            self.tx_hash.as_bytes(),
        ])
    }

    pub fn approved(&self) -> bool {
        self.slots().approved()
    }

    pub fn rejected(&self) -> bool {
        self.slots().rejected()
    }
}
