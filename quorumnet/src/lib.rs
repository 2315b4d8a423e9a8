//! Quorum-network coordination core.
//!
//! Service nodes cooperate through two overlays built on the same relay
//! topology:
//!
//! - **Blink** — fast-finality transaction approval: a submitted tx is
//!   fanned out to two subquorums, every member verifies and signs an
//!   approval or rejection, and the originator learns the outcome within
//!   seconds, long before the tx is mined.
//! - **Vote relay** — gossip of small signed votes (checkpoints, worker
//!   obligations) between members of designated quorums.
//!
//! ## Module overview
//!
//! - [`topology`] — intra-quorum relay links (power-of-two offsets).
//! - [`quorum`] — quorum composition, checksums, blink subquorum assembly.
//! - [`peers`] — strong/opportunistic peer resolution with inter-quorum
//!   bridging.
//! - [`blink_tx`] — the per-tx signature matrix and approval predicates.
//! - [`store`] — in-flight blink tracking, including signatures that
//!   arrive before their tx.
//! - [`signatures`] — the three-pass signature processor.
//! - [`blink_handler`] — inbound `blink` / `blink_sign` handling.
//! - [`submitter`] — originator-side submission and promise tracking.
//! - [`vote_relay`] — vote gossip.
//! - [`registry`], [`pool`], [`transport`] — interfaces consumed from the
//!   surrounding node.
//! - [`context`] — the shared process-wide state handlers operate on.
//! - [`config`], [`logging`], [`metrics`], [`error`] — ambient concerns.

pub mod blink_handler;
pub mod blink_tx;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod peers;
pub mod pool;
pub mod quorum;
pub mod registry;
pub mod signatures;
pub mod store;
pub mod submitter;
pub mod topology;
pub mod transport;
pub mod vote_relay;

pub use blink_tx::{BlinkTx, SignatureStatus};
pub use config::QuorumnetConfig;
pub use context::QnetContext;
pub use error::QuorumnetError;
pub use logging::init_logging;
pub use metrics::QuorumnetMetrics;
pub use peers::{resolve_quorum_peers, ResolvedPeers};
pub use pool::{BlinkVerdict, TxPool, VoteOutcome};
pub use quorum::{blink_quorums, quorum_checksum, BlinkQuorums, Quorum, QuorumKind};
pub use registry::{ChainView, NodeEntry, NodeRegistry, RouteHint};
pub use store::{BlinkStore, PendingSignature};
pub use submitter::{submit_blink, BlinkResult, BlinkStatus, BlinkSubmitter};
pub use transport::{CommandRegistry, Delivery, IncomingMessage, Transport};
pub use vote_relay::{handle_vote, relay_vote};

use strobe_wire::Command;

/// Register every quorum network command handler. Called once at startup,
/// after the transport is up and before any message is dispatched.
pub fn register_core_handlers(registry: &mut CommandRegistry) {
    // A new blink tx submission from an external node, or a forward from
    // other quorum members who received it from an external node.
    registry.register(Command::Blink, blink_handler::handle_blink);

    // Blink signatures or rejections between quorum members (original or
    // forwarded); propagated by the receiver if new.
    registry.register(Command::BlinkSign, blink_handler::handle_blink_sign);

    // Submitter-side responses from quorum entry points. `bl_nostart` means
    // verification never started on that node; `bl_bad`/`bl_good` carry the
    // quorum's verdict.
    registry.register(Command::BlNostart, submitter::handle_blink_not_started);
    registry.register(Command::BlBad, submitter::handle_blink_failure);
    registry.register(Command::BlGood, submitter::handle_blink_success);

    // Relayed quorum votes.
    registry.register(Command::Vote, vote_relay::handle_vote);
}
