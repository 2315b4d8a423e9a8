//! Prometheus metrics for the quorum network core.
//!
//! [`QuorumnetMetrics`] owns a dedicated [`Registry`] that the surrounding
//! node's `/metrics` endpoint can encode into the Prometheus text
//! exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Central collection of quorum-network metrics.
pub struct QuorumnetMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Blink submissions/forwards that passed the entry gates and were
    /// accepted for verification.
    pub blinks_received: IntCounter,
    /// Blink signatures validated and stored into a signature matrix.
    pub signatures_stored: IntCounter,
    /// Blink transactions that crossed the approval threshold locally.
    pub blinks_approved: IntCounter,
    /// Blink transactions that became unapprovable locally.
    pub blinks_rejected: IntCounter,
    /// Quorum votes received from peers.
    pub votes_received: IntCounter,
    /// Quorum votes relayed onward (novel votes only).
    pub votes_relayed: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Blink transactions currently tracked by the store.
    pub tracked_blinks: IntGauge,
    /// Local submissions awaiting a quorum verdict.
    pub pending_submissions: IntGauge,
}

impl QuorumnetMetrics {
    /// Create a fresh set of metrics registered under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let blinks_received = register_int_counter_with_registry!(
            Opts::new(
                "strobe_blinks_received_total",
                "Blink txs accepted for verification"
            ),
            registry
        )
        .expect("failed to register blinks_received counter");

        let signatures_stored = register_int_counter_with_registry!(
            Opts::new(
                "strobe_blink_signatures_stored_total",
                "Blink signatures validated and stored"
            ),
            registry
        )
        .expect("failed to register signatures_stored counter");

        let blinks_approved = register_int_counter_with_registry!(
            Opts::new(
                "strobe_blinks_approved_total",
                "Blink txs that reached the approval threshold"
            ),
            registry
        )
        .expect("failed to register blinks_approved counter");

        let blinks_rejected = register_int_counter_with_registry!(
            Opts::new(
                "strobe_blinks_rejected_total",
                "Blink txs that became unapprovable"
            ),
            registry
        )
        .expect("failed to register blinks_rejected counter");

        let votes_received = register_int_counter_with_registry!(
            Opts::new("strobe_votes_received_total", "Quorum votes received"),
            registry
        )
        .expect("failed to register votes_received counter");

        let votes_relayed = register_int_counter_with_registry!(
            Opts::new("strobe_votes_relayed_total", "Quorum votes relayed onward"),
            registry
        )
        .expect("failed to register votes_relayed counter");

        let tracked_blinks = register_int_gauge_with_registry!(
            Opts::new("strobe_tracked_blinks", "Blink txs tracked by the store"),
            registry
        )
        .expect("failed to register tracked_blinks gauge");

        let pending_submissions = register_int_gauge_with_registry!(
            Opts::new(
                "strobe_pending_submissions",
                "Local blink submissions awaiting a verdict"
            ),
            registry
        )
        .expect("failed to register pending_submissions gauge");

        Self {
            registry,
            blinks_received,
            signatures_stored,
            blinks_approved,
            blinks_rejected,
            votes_received,
            votes_relayed,
            tracked_blinks,
            pending_submissions,
        }
    }
}

impl Default for QuorumnetMetrics {
    fn default() -> Self {
        Self::new()
    }
}
