//! Tracking of in-flight blink transactions.
//!
//! The store holds per-`(height, tx_hash)` metadata for every blink this
//! node has heard about, whether or not the transaction body has arrived
//! yet: signatures can race ahead of the tx on the gossip overlay, in which
//! case they are buffered here and drained the moment the tx lands.
//!
//! The store is kept deliberately more liberal than the mempool: even
//! unsigned or ultimately-rejected blinks stay tracked until their height
//! is swept, so duplicate forwards and late signatures can be recognized.

use crate::blink_tx::BlinkTx;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};
use strobe_types::{Signature, TxHash, X25519PublicKey};
use strobe_wire::WireSignature;
use tracing::debug;

/// A signature waiting for its transaction, or in transit through the
/// signature processor. Hash-based equality collapses duplicates that
/// arrive via different gossip paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PendingSignature {
    pub approval: bool,
    pub subquorum: u8,
    pub position: u16,
    pub signature: Signature,
}

impl From<WireSignature> for PendingSignature {
    fn from(w: WireSignature) -> Self {
        Self {
            approval: w.approval,
            subquorum: w.subquorum,
            position: w.position,
            signature: w.signature,
        }
    }
}

impl From<PendingSignature> for WireSignature {
    fn from(p: PendingSignature) -> Self {
        Self {
            approval: p.approval,
            subquorum: p.subquorum,
            position: p.position,
            signature: p.signature,
        }
    }
}

/// Everything known about one in-flight blink.
#[derive(Default)]
pub struct BlinkMetadata {
    /// The transaction state, absent while only signatures have arrived.
    pub btx: Option<Arc<BlinkTx>>,
    /// Signatures that arrived before the transaction body.
    pub pending_sigs: HashSet<PendingSignature>,
    /// Where to send `bl_good`/`bl_bad`; zero tag means nobody is waiting.
    pub reply_tag: u64,
    pub reply_to: Option<X25519PublicKey>,
}

/// Outcome of [`BlinkStore::install_tx`].
pub enum InstallOutcome {
    /// The tx was installed; any buffered signatures are handed back.
    Installed { pending: Vec<PendingSignature> },
    /// A tx was already installed for this `(height, hash)`.
    Duplicate,
}

/// Reply coordinates plus (maybe) the tx, for the signature ingest path.
pub struct SignatureTarget {
    pub btx: Option<Arc<BlinkTx>>,
    pub reply_tag: u64,
    pub reply_to: Option<X25519PublicKey>,
}

/// Mutex-guarded map of `height → tx_hash → BlinkMetadata`.
///
/// Read paths (duplicate detection, signature-target lookup) take the shared
/// lock; entry creation, pending-signature mutation, and reply-coordinate
/// mutation take the unique lock. Per-tx signature state has its own lock
/// inside [`BlinkTx`]; this lock is never held across signature processing.
#[derive(Default)]
pub struct BlinkStore {
    inner: RwLock<BTreeMap<u64, HashMap<TxHash, BlinkMetadata>>>,
}

impl BlinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transaction body is already installed for this key.
    pub fn has_tx(&self, height: u64, hash: &TxHash) -> bool {
        let inner = self.inner.read().expect("blink store lock poisoned");
        inner
            .get(&height)
            .and_then(|m| m.get(hash))
            .is_some_and(|meta| meta.btx.is_some())
    }

    /// The installed transaction state, if any.
    pub fn find_tx(&self, height: u64, hash: &TxHash) -> Option<Arc<BlinkTx>> {
        let inner = self.inner.read().expect("blink store lock poisoned");
        inner.get(&height)?.get(hash)?.btx.clone()
    }

    /// Set reply coordinates if none are recorded yet. Used when a duplicate
    /// forward turns out to be the originator's own submission. Returns
    /// `true` if the coordinates were recorded.
    pub fn set_reply_if_unset(
        &self,
        height: u64,
        hash: &TxHash,
        tag: u64,
        reply_to: X25519PublicKey,
    ) -> bool {
        if tag == 0 {
            return false;
        }
        let mut inner = self.inner.write().expect("blink store lock poisoned");
        let Some(meta) = inner.get_mut(&height).and_then(|m| m.get_mut(hash)) else {
            return false;
        };
        if meta.reply_tag != 0 {
            return false;
        }
        meta.reply_tag = tag;
        meta.reply_to = Some(reply_to);
        true
    }

    /// Atomically install a transaction: create the metadata if missing,
    /// fail with [`InstallOutcome::Duplicate`] if a tx is already present,
    /// otherwise store it, drain any buffered signatures, and latch reply
    /// coordinates when the submission carried a nonzero tag.
    pub fn install_tx(
        &self,
        height: u64,
        hash: TxHash,
        btx: Arc<BlinkTx>,
        tag: u64,
        reply_to: Option<X25519PublicKey>,
    ) -> InstallOutcome {
        let mut inner = self.inner.write().expect("blink store lock poisoned");
        let meta = inner.entry(height).or_default().entry(hash).or_default();
        if meta.btx.is_some() {
            return InstallOutcome::Duplicate;
        }
        meta.btx = Some(btx);
        let pending: Vec<PendingSignature> = meta.pending_sigs.drain().collect();
        if tag != 0 && meta.reply_tag == 0 {
            meta.reply_tag = tag;
            meta.reply_to = reply_to;
        }
        InstallOutcome::Installed { pending }
    }

    /// Buffer signatures that arrived before the transaction body, creating
    /// the metadata entry if needed.
    pub fn deposit_pending_sigs(
        &self,
        height: u64,
        hash: TxHash,
        sigs: impl IntoIterator<Item = PendingSignature>,
    ) {
        let mut inner = self.inner.write().expect("blink store lock poisoned");
        let meta = inner.entry(height).or_default().entry(hash).or_default();
        meta.pending_sigs.extend(sigs);
    }

    /// Drain and return the buffered signatures for a key.
    pub fn take_pending_sigs(&self, height: u64, hash: &TxHash) -> Vec<PendingSignature> {
        let mut inner = self.inner.write().expect("blink store lock poisoned");
        match inner.get_mut(&height).and_then(|m| m.get_mut(hash)) {
            Some(meta) => meta.pending_sigs.drain().collect(),
            None => Vec::new(),
        }
    }

    /// Look up what the signature ingest path needs in one shared-lock
    /// acquisition: the tx (if installed) and the reply coordinates.
    pub fn signature_target(&self, height: u64, hash: &TxHash) -> Option<SignatureTarget> {
        let inner = self.inner.read().expect("blink store lock poisoned");
        let meta = inner.get(&height)?.get(hash)?;
        Some(SignatureTarget {
            btx: meta.btx.clone(),
            reply_tag: meta.reply_tag,
            reply_to: meta.reply_to,
        })
    }

    /// Drop every entry below `min_height`. Returns the number of blinks
    /// removed. Callers must keep `min_height` at or below the blink
    /// acceptance window's lower edge.
    pub fn prune_before(&self, min_height: u64) -> usize {
        let mut inner = self.inner.write().expect("blink store lock poisoned");
        let keep = inner.split_off(&min_height);
        let removed: usize = inner.values().map(HashMap::len).sum();
        *inner = keep;
        if removed > 0 {
            debug!(min_height, removed, "swept expired blink txs");
        }
        removed
    }

    /// Number of tracked blinks across all heights.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("blink store lock poisoned");
        inner.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
