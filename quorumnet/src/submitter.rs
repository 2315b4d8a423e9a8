//! Originator-side blink submission.
//!
//! [`submit_blink`] parses the transaction, fans it out to a random handful
//! of blink quorum members, and returns a oneshot receiver that resolves
//! when a majority of the contacted members agrees on an outcome — or when
//! the 30-second window closes.
//!
//! Each pending submission is keyed by a random nonzero 64-bit tag echoed
//! back in `bl_nostart` / `bl_bad` / `bl_good` responses. Per-category
//! response counters are atomic; a category crossing `remote_count / 2`
//! resolves the promise. The oneshot sender is consumed exactly once, so a
//! submission can never resolve twice.

use crate::context::QnetContext;
use crate::quorum::blink_quorums;
use crate::transport::{Delivery, IncomingMessage};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use strobe_types::TxHash;
use strobe_wire::{BlinkPayload, Command, NostartPayload, ReplyPayload};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Final outcome of a blink submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkStatus {
    Accepted,
    Rejected,
    Timeout,
}

/// Outcome plus a human-readable message (empty on acceptance).
pub type BlinkResult = (BlinkStatus, String);

/// Which response category a quorum entry point reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResponseKind {
    Nostart,
    Bad,
    Good,
}

struct PendingBlinkResult {
    tx_hash: TxHash,
    /// Consumed on resolution; the `Mutex<Option<…>>` makes "resolve at
    /// most once" structural.
    sender: Mutex<Option<oneshot::Sender<BlinkResult>>>,
    expires_at: Instant,
    /// Number of quorum members the submission was sent to. Written once,
    /// before any send happens.
    remote_count: AtomicUsize,
    nostart_count: AtomicUsize,
    bad_count: AtomicUsize,
    good_count: AtomicUsize,
}

impl PendingBlinkResult {
    fn counter(&self, kind: ResponseKind) -> &AtomicUsize {
        match kind {
            ResponseKind::Nostart => &self.nostart_count,
            ResponseKind::Bad => &self.bad_count,
            ResponseKind::Good => &self.good_count,
        }
    }

    fn resolve(&self, result: BlinkResult) -> bool {
        match self.sender.lock().expect("sender lock poisoned").take() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

/// The pending-result map. One per process, owned by the context.
#[derive(Default)]
pub struct BlinkSubmitter {
    pending: RwLock<HashMap<u64, PendingBlinkResult>>,
}

impl BlinkSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.pending.read().expect("submitter lock poisoned").len()
    }

    /// Resolve and drop every entry whose window has closed.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let mut pending = self.pending.write().expect("submitter lock poisoned");
        let expired: Vec<u64> = pending
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(tag, _)| *tag)
            .collect();
        for tag in &expired {
            if let Some(entry) = pending.remove(tag) {
                entry.resolve((BlinkStatus::Timeout, "Blink quorum timeout".into()));
            }
        }
        expired.len()
    }

    /// Sweep, then install a new pending entry under a fresh random tag.
    ///
    /// Refuses duplicates of a still-pending tx hash and refuses outright
    /// when `max_active` submissions are already in flight.
    fn install(
        &self,
        tx_hash: TxHash,
        now: Instant,
        timeout: Duration,
        max_active: usize,
    ) -> Result<(u64, oneshot::Receiver<BlinkResult>), BlinkResult> {
        self.sweep_expired(now);

        let mut pending = self.pending.write().expect("submitter lock poisoned");
        if pending.values().any(|entry| entry.tx_hash == tx_hash) {
            return Err((
                BlinkStatus::Rejected,
                "Transaction was already submitted".into(),
            ));
        }
        if pending.len() >= max_active {
            return Err((BlinkStatus::Rejected, "Node is busy, try again later".into()));
        }

        // Random nonzero tag, rerolled on collision, so the tag value gives
        // nothing away about submission order.
        let mut tag: u64 = rand::random();
        while tag == 0 || pending.contains_key(&tag) {
            tag = rand::random();
        }

        let (tx, rx) = oneshot::channel();
        pending.insert(
            tag,
            PendingBlinkResult {
                tx_hash,
                sender: Mutex::new(Some(tx)),
                expires_at: now + timeout,
                remote_count: AtomicUsize::new(0),
                nostart_count: AtomicUsize::new(0),
                bad_count: AtomicUsize::new(0),
                good_count: AtomicUsize::new(0),
            },
        );
        Ok((tag, rx))
    }

    fn set_remote_count(&self, tag: u64, count: usize) {
        let pending = self.pending.read().expect("submitter lock poisoned");
        if let Some(entry) = pending.get(&tag) {
            entry.remote_count.store(count, Ordering::SeqCst);
        }
    }

    /// Resolve a pending entry immediately (setup failure path).
    fn resolve_now(&self, tag: u64, result: BlinkResult) {
        let mut pending = self.pending.write().expect("submitter lock poisoned");
        if let Some(entry) = pending.remove(&tag) {
            entry.resolve(result);
        }
    }

    /// The shared reducer behind the three response handlers.
    ///
    /// Counts the response in its category; when a category's count exceeds
    /// half the contacted members, the promise resolves with `result` and
    /// the entry is removed. Unknown tags (already resolved, or never ours)
    /// are dropped — that is the steady state once a majority has answered.
    fn record_response(&self, tag: u64, kind: ResponseKind, result: BlinkResult) -> bool {
        let resolved = {
            let pending = self.pending.read().expect("submitter lock poisoned");
            let Some(entry) = pending.get(&tag) else {
                return false;
            };
            let count = entry.counter(kind).fetch_add(1, Ordering::SeqCst) + 1;
            if count > entry.remote_count.load(Ordering::SeqCst) / 2 {
                entry.resolve(result)
            } else {
                false
            }
        };

        if resolved {
            let mut pending = self.pending.write().expect("submitter lock poisoned");
            pending.remove(&tag);
        }
        resolved
    }
}

/// Submit a transaction for blink approval.
///
/// The returned receiver resolves exactly once: accepted or rejected when a
/// majority of the contacted quorum members says so, or timeout.
pub fn submit_blink(ctx: &Arc<QnetContext>, tx_blob: Vec<u8>) -> oneshot::Receiver<BlinkResult> {
    let submitter = &ctx.submitter;

    let Some((_tx, tx_hash)) = ctx.pool.parse_tx(&tx_blob) else {
        let (tx_sender, rx) = oneshot::channel();
        let _ = tx_sender.send((
            BlinkStatus::Rejected,
            "Could not parse transaction data".into(),
        ));
        return rx;
    };

    let timeout = Duration::from_secs(ctx.config.submit_timeout_secs);
    let (tag, rx) = match submitter.install(
        tx_hash,
        Instant::now(),
        timeout,
        ctx.config.max_active_promises,
    ) {
        Ok(installed) => installed,
        Err(refusal) => {
            let (tx_sender, rx) = oneshot::channel();
            let _ = tx_sender.send(refusal);
            return rx;
        }
    };
    ctx.metrics
        .pending_submissions
        .set(submitter.active_count() as i64);

    let height = ctx.chain.current_height();
    let (quorums, checksum) = match blink_quorums(ctx.registry.as_ref(), height, None) {
        Ok(assembled) => assembled,
        Err(e) => {
            warn!(height, error = %e, "cannot submit blink");
            submitter.resolve_now(tag, (BlinkStatus::Rejected, e.to_string()));
            return rx;
        }
    };

    // Collect every active quorum member with full connection details, then
    // pick a random handful as entry points.
    let mut remotes = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for quorum in quorums.iter() {
        for validator in &quorum.validators {
            if !seen.insert(*validator) {
                continue;
            }
            let Some(contact) = ctx
                .registry
                .resolve(validator)
                .and_then(|entry| entry.contact())
            else {
                continue;
            };
            remotes.push(contact);
        }
    }
    remotes.shuffle(&mut rand::thread_rng());
    remotes.truncate(ctx.config.submit_fanout);
    submitter.set_remote_count(tag, remotes.len());

    let payload = BlinkPayload {
        tag,
        blink_height: height,
        checksum,
        tx_blob,
        tx_hash,
    }
    .encode();

    info!(%tx_hash, tag, entry_points = remotes.len(), "submitting blink tx");
    for (x25519, route) in remotes {
        ctx.transport
            .send(&x25519, Command::Blink, &payload, Delivery::Strong(Some(route)));
    }

    rx
}

// ── Response handlers ──────────────────────────────────────────────────

/// `bl_nostart`: the entry point refused to start verification.
pub fn handle_blink_not_started(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let payload = match NostartPayload::decode(&msg.payload) {
        Ok(payload) => payload,
        Err(e) => {
            info!(error = %e, "bad blink not-started response");
            return;
        }
    };
    info!(error = %payload.error, "received no-start blink response");
    ctx.submitter.record_response(
        payload.tag,
        ResponseKind::Nostart,
        (BlinkStatus::Rejected, payload.error),
    );
}

/// `bl_bad`: enough of the quorum rejected the tx.
pub fn handle_blink_failure(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let payload = match ReplyPayload::decode(&msg.payload) {
        Ok(payload) => payload,
        Err(e) => {
            info!(error = %e, "blink failure message not understood");
            return;
        }
    };
    debug!(tag = payload.tag, "received blink failure response");
    ctx.submitter.record_response(
        payload.tag,
        ResponseKind::Bad,
        (BlinkStatus::Rejected, "Transaction rejected by quorum".into()),
    );
}

/// `bl_good`: enough of the quorum approved the tx.
pub fn handle_blink_success(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let payload = match ReplyPayload::decode(&msg.payload) {
        Ok(payload) => payload,
        Err(e) => {
            info!(error = %e, "blink success message not understood");
            return;
        }
    };
    debug!(tag = payload.tag, "received blink success response");
    ctx.submitter.record_response(
        payload.tag,
        ResponseKind::Good,
        (BlinkStatus::Accepted, String::new()),
    );
}
