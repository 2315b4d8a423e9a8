//! The service node registry interface.
//!
//! The surrounding node owns the registry (stake state, uptime proofs,
//! quorum selection); the quorum network only reads it. The trait keeps the
//! core testable with in-memory registries.

use crate::quorum::{Quorum, QuorumKind};
use std::sync::Arc;
use strobe_types::{PublicKey, X25519PublicKey};

/// Transport routing hint, e.g. `"tcp://203.0.113.7:22020"`. A peer with a
/// known hint can be connected to on demand; without one it can only be
/// reached over an already-open connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteHint(pub String);

/// What the registry knows about one service node.
#[derive(Clone, Debug)]
pub struct NodeEntry {
    /// Whether the node is currently active (staked, not decommissioned).
    pub active: bool,
    /// The X25519 key the node listens under, from its last uptime proof.
    pub x25519_pubkey: Option<X25519PublicKey>,
    /// Where to reach the node, from its last uptime proof.
    pub route: Option<RouteHint>,
}

impl NodeEntry {
    /// The transport coordinates of a usable relay target. `None` unless
    /// the node is active and its proof carried both a transport identity
    /// and an address.
    pub fn contact(&self) -> Option<(X25519PublicKey, RouteHint)> {
        if !self.active {
            return None;
        }
        Some((self.x25519_pubkey?, self.route.clone()?))
    }
}

/// Read access to the service node registry.
pub trait NodeRegistry: Send + Sync {
    /// Look up a service node by its primary public key.
    fn resolve(&self, pubkey: &PublicKey) -> Option<NodeEntry>;

    /// Reverse-map a transport identity to the primary public key.
    fn lookup_by_x25519(&self, x25519: &X25519PublicKey) -> Option<PublicKey>;

    /// The designated quorum of the given kind at a height, if the chain is
    /// long enough to have one.
    fn quorum(&self, kind: QuorumKind, height: u64) -> Option<Arc<Quorum>>;
}

/// Read access to the local chain tip.
pub trait ChainView: Send + Sync {
    fn current_height(&self) -> u64;
}
