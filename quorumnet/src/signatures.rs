//! Blink signature processing.
//!
//! Every batch of inbound signatures — whether carried by a `blink_sign`
//! relay, drained from the pending buffer when a tx lands, or produced by
//! this node's own verification — funnels through
//! [`process_blink_signatures`]. The batch is processed in three passes so
//! the per-tx lock is never held across signature verification:
//!
//! 1. under the shared lock, drop out-of-range positions and cells that are
//!    already occupied, and snapshot the approved/rejected predicates;
//! 2. with no lock held, verify the remaining signatures cryptographically;
//! 3. under the unique lock, commit the survivors (losing a commit race
//!    just drops the entry) and re-read the predicates.
//!
//! Whatever survives pass 3 is new information, and only that delta is
//! relayed onward — re-delivered signatures die in pass 1, which is what
//! makes the gossip converge. A false→true transition of either predicate
//! sends the originator its one `bl_good` or `bl_bad`.

use crate::blink_tx::{BlinkTx, SignatureStatus};
use crate::context::QnetContext;
use crate::peers::resolve_quorum_peers;
use crate::quorum::BlinkQuorums;
use crate::store::PendingSignature;
use crate::transport::Delivery;
use std::collections::HashSet;
use std::sync::Arc;
use strobe_crypto::verify_signature;
use strobe_types::X25519PublicKey;
use strobe_wire::{BlinkSignPayload, Command, ReplyPayload};
use tracing::{debug, info, trace, warn};

/// Validate, record, and propagate a batch of blink signatures.
///
/// `reply_tag`/`reply_to` are the originator's coordinates (zero tag: no
/// originator is waiting). `received_from` is the transport identity of the
/// peer that delivered the batch, excluded from the relay set; `None` for
/// locally produced signatures.
#[allow(clippy::too_many_arguments)]
pub fn process_blink_signatures(
    ctx: &Arc<QnetContext>,
    btx: &Arc<BlinkTx>,
    quorums: &BlinkQuorums,
    checksum: u64,
    mut signatures: Vec<PendingSignature>,
    reply_tag: u64,
    reply_to: Option<X25519PublicKey>,
    received_from: Option<X25519PublicKey>,
) {
    let already_approved;
    let already_rejected;
    {
        // Pass 1: cheap filtering. Shared lock only; don't take the heavier
        // unique lock until we know we need it.
        let slots = btx.slots();
        signatures.retain(|sig| {
            let position = sig.position as usize;
            if position >= quorums.get(sig.subquorum).size() {
                warn!(
                    subquorum = sig.subquorum,
                    position, "invalid blink signature: position out of range"
                );
                return false;
            }
            slots.status(sig.subquorum, position) == SignatureStatus::None
        });
        already_approved = slots.approved();
        already_rejected = slots.rejected();
    }
    if signatures.is_empty() {
        return;
    }

    // Pass 2: cryptographic verification, lock-free.
    signatures.retain(|sig| {
        let signer = &quorums.get(sig.subquorum).validators[sig.position as usize];
        let valid = verify_signature(
            &btx.signing_hash(sig.approval),
            &sig.signature,
            signer,
        );
        if !valid {
            warn!(
                subquorum = sig.subquorum,
                position = sig.position,
                "invalid blink signature: verification failed"
            );
        }
        valid
    });
    if signatures.is_empty() {
        return;
    }

    let now_approved;
    let now_rejected;
    {
        // Pass 3: commit under the unique lock. A false return means another
        // thread stored that cell between passes; the entry is no longer new.
        let mut slots = btx.slots_mut();
        trace!(grid = %slots.grid(), "existing signatures before commit");
        signatures.retain(|sig| {
            slots.add_prechecked(
                sig.subquorum,
                sig.position as usize,
                sig.approval,
                sig.signature,
            )
        });
        now_approved = slots.approved();
        now_rejected = slots.rejected();
        if !signatures.is_empty() {
            debug!(count = signatures.len(), grid = %slots.grid(), "stored blink signatures");
        }
    }
    if signatures.is_empty() {
        return;
    }
    ctx.metrics.signatures_stored.inc_by(signatures.len() as u64);
    if now_approved && !already_approved {
        ctx.metrics.blinks_approved.inc();
    }
    if now_rejected && !already_rejected {
        ctx.metrics.blinks_rejected.inc();
    }

    // Relay the delta to blink peers, skipping whoever just sent it to us.
    let mut exclude = HashSet::new();
    if let Some(from) = received_from {
        if let Some(pubkey) = ctx.registry.lookup_by_x25519(&from) {
            exclude.insert(pubkey);
        }
    }
    let peers = resolve_quorum_peers(
        ctx.registry.as_ref(),
        &ctx.keys.pubkey,
        &quorums.0,
        true,
        &exclude,
    );
    let payload = BlinkSignPayload {
        blink_height: btx.blink_height(),
        tx_hash: btx.tx_hash(),
        checksum,
        signatures: signatures.iter().map(|s| (*s).into()).collect(),
    }
    .encode();
    debug!(
        count = signatures.len(),
        strong = peers.strong_count(),
        opportunistic = peers.peer_count() - peers.strong_count(),
        "relaying blink signatures"
    );
    peers.relay_to_peers(ctx.transport.as_ref(), Command::BlinkSign, &payload);

    // Tell the originator the moment a predicate turns true. The predicates
    // are monotonic, so each branch fires at most once per blink tx.
    if reply_tag != 0 {
        if let Some(reply_to) = reply_to {
            let reply = ReplyPayload { tag: reply_tag }.encode();
            if now_approved && !already_approved {
                info!(tx_hash = %btx.tx_hash(), "blink tx approved; notifying originator");
                ctx.transport
                    .send(&reply_to, Command::BlGood, &reply, Delivery::Optional);
            } else if now_rejected && !already_rejected {
                info!(tx_hash = %btx.tx_hash(), "blink tx rejected; notifying originator");
                ctx.transport
                    .send(&reply_to, Command::BlBad, &reply, Delivery::Optional);
            }
        }
    }
}
