//! Quorum peer resolution and relay.
//!
//! Given this node's position in one or more (sub)quorums, work out who it
//! should relay to. Targets come in two strengths:
//!
//! - **strong** — must receive the message; the transport opens a connection
//!   using the resolved routing hint if none exists. All outgoing-topology
//!   targets are strong.
//! - **opportunistic (weak)** — receive the message only over an
//!   already-open connection. Incoming-topology sources are weak: they
//!   usually have a connection open toward us already.
//!
//! When relaying across two adjacent subquorums and this node sits in only
//! one of them, inter-quorum bridge links are added so messages cross the
//! boundary: the second half of Q bridges forward (strong), the first half
//! of Q' bridges back (weak). Nodes in both subquorums already reach both
//! sides through the intra-quorum topology and skip bridging.

use crate::quorum::Quorum;
use crate::registry::{NodeRegistry, RouteHint};
use crate::topology::{incoming_links, outgoing_links};
use crate::transport::{Delivery, Transport};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use strobe_types::{PublicKey, X25519PublicKey};
use strobe_wire::Command;
use tracing::trace;

/// The relay target set for a set of quorums, plus this node's positions.
pub struct ResolvedPeers {
    /// Position per quorum, `None` where this node is not a member.
    my_positions: Vec<Option<usize>>,
    my_position_count: usize,
    /// Registry data for every candidate target that turned out reachable.
    remotes: HashMap<PublicKey, (X25519PublicKey, RouteHint)>,
    /// Final target set: route hint present ⇔ strong.
    peers: HashMap<X25519PublicKey, Option<RouteHint>>,
    strong_peers: usize,
}

impl ResolvedPeers {
    pub fn my_position(&self, quorum_index: usize) -> Option<usize> {
        self.my_positions.get(quorum_index).copied().flatten()
    }

    /// In how many of the given quorums this node holds a position.
    pub fn my_position_count(&self) -> usize {
        self.my_position_count
    }

    pub fn strong_count(&self) -> usize {
        self.strong_peers
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    pub fn contains(&self, peer: &X25519PublicKey) -> bool {
        self.peers.contains_key(peer)
    }

    /// Whether a contained peer is strong (has a routing hint).
    pub fn is_strong(&self, peer: &X25519PublicKey) -> bool {
        self.peers.get(peer).is_some_and(Option::is_some)
    }

    /// Send one command to every resolved peer: strong peers with their
    /// routing hint, weak peers only if already connected.
    pub fn relay_to_peers(&self, transport: &dyn Transport, command: Command, payload: &[u8]) {
        for (peer, hint) in &self.peers {
            trace!(%command, ?peer, strong = hint.is_some(), "relaying to quorum peer");
            let delivery = match hint {
                Some(hint) => Delivery::Strong(Some(hint.clone())),
                None => Delivery::Optional,
            };
            transport.send(peer, command, payload, delivery);
        }
    }

    /// Insert or upgrade a target. Strong always wins: a peer already
    /// present as weak is upgraded when added strong; the reverse never
    /// happens. Unresolvable pubkeys are ignored.
    fn add_peer(&mut self, pubkey: &PublicKey, strong: bool) -> bool {
        let Some((x25519, route)) = self.remotes.get(pubkey) else {
            return false;
        };
        match self.peers.entry(*x25519) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(strong.then(|| route.clone()));
                if strong {
                    self.strong_peers += 1;
                }
                true
            }
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                if strong && entry.get().is_none() {
                    entry.insert(Some(route.clone()));
                    self.strong_peers += 1;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Resolve the relay targets for `quorums`, excluding `exclude` and this
/// node itself.
///
/// `opportunistic` additionally includes incoming-topology sources as weak
/// targets (used for gossip where re-offering to likely-already-informed
/// peers is cheap).
pub fn resolve_quorum_peers(
    registry: &dyn NodeRegistry,
    self_pubkey: &PublicKey,
    quorums: &[Arc<Quorum>],
    opportunistic: bool,
    exclude: &HashSet<PublicKey>,
) -> ResolvedPeers {
    let my_positions: Vec<Option<usize>> = quorums
        .iter()
        .map(|q| q.position_of(self_pubkey))
        .collect();
    let my_position_count = my_positions.iter().flatten().count();

    // First sweep: collect every pubkey we might relay to, so the registry
    // lookup happens in a single pass.
    let mut candidates: HashSet<PublicKey> = HashSet::new();
    for (i, quorum) in quorums.iter().enumerate() {
        let Some(p) = my_positions[i] else { continue };
        let validators = &quorum.validators;

        for j in outgoing_links(p, validators.len()) {
            candidates.insert(validators[j]);
        }
        if opportunistic {
            for j in incoming_links(p, validators.len()) {
                candidates.insert(validators[j]);
            }
        }
        for target in bridge_targets(quorums, &my_positions, i) {
            candidates.insert(target.0);
        }
    }
    candidates.remove(self_pubkey);
    for excluded in exclude {
        candidates.remove(excluded);
    }

    let mut remotes = HashMap::with_capacity(candidates.len());
    for pubkey in &candidates {
        let Some(contact) = registry.resolve(pubkey).and_then(|entry| entry.contact()) else {
            continue;
        };
        remotes.insert(*pubkey, contact);
    }

    let mut resolved = ResolvedPeers {
        my_positions,
        my_position_count,
        remotes,
        peers: HashMap::new(),
        strong_peers: 0,
    };

    // Second sweep: build the target set.
    for (i, quorum) in quorums.iter().enumerate() {
        let Some(p) = resolved.my_positions[i] else {
            trace!(quorum = i, "not a member of this subquorum");
            continue;
        };
        let validators = &quorum.validators;

        // Intra-quorum: push targets strong, pull sources weak.
        for j in outgoing_links(p, validators.len()) {
            resolved.add_peer(&validators[j], true);
        }
        if opportunistic {
            for j in incoming_links(p, validators.len()) {
                resolved.add_peer(&validators[j], false);
            }
        }

        for (target, strong) in bridge_targets(quorums, &resolved.my_positions, i) {
            if resolved.add_peer(&target, strong) {
                trace!(quorum = i, strong, "added inter-quorum bridge peer");
            }
        }
    }

    resolved
}

/// Inter-quorum bridge targets for the member of quorum `i`, as
/// `(pubkey, strong)` pairs.
///
/// Forward (Q → Q'): a node in the second `half` of Q that is not in Q'
/// relays strongly to `Q[p - half]`. Reverse (Q' → Q): a node in the first
/// `half` of Q' that is not in Q relays weakly to `Q[half + p]`. `half` is
/// half the smaller quorum's size; with odd sizes the last position sits
/// out.
fn bridge_targets(
    quorums: &[Arc<Quorum>],
    my_positions: &[Option<usize>],
    i: usize,
) -> Vec<(PublicKey, bool)> {
    let Some(p) = my_positions[i] else {
        return Vec::new();
    };
    let mut targets = Vec::new();

    if i + 1 < quorums.len() && my_positions[i + 1].is_none() {
        let half = quorums[i].size().min(quorums[i + 1].size()) / 2;
        if p >= half && p < 2 * half {
            targets.push((quorums[i].validators[p - half], true));
        }
    }

    if i > 0 && my_positions[i - 1].is_none() {
        let prev = &quorums[i - 1];
        let half = quorums[i].size().min(prev.size()) / 2;
        if p < half {
            targets.push((prev.validators[half + p], false));
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quorum::QuorumKind;
    use crate::registry::NodeEntry;

    fn key(n: u8) -> PublicKey {
        PublicKey([n; 32])
    }

    fn x25519_of(n: u8) -> X25519PublicKey {
        X25519PublicKey([n ^ 0x80; 32])
    }

    /// Registry where node `n` resolves unless listed as dark.
    struct TestRegistry {
        inactive: HashSet<PublicKey>,
        routeless: HashSet<PublicKey>,
    }

    impl TestRegistry {
        fn full() -> Self {
            Self {
                inactive: HashSet::new(),
                routeless: HashSet::new(),
            }
        }
    }

    impl NodeRegistry for TestRegistry {
        fn resolve(&self, pubkey: &PublicKey) -> Option<NodeEntry> {
            let n = pubkey.as_bytes()[0];
            Some(NodeEntry {
                active: !self.inactive.contains(pubkey),
                x25519_pubkey: Some(x25519_of(n)),
                route: if self.routeless.contains(pubkey) {
                    None
                } else {
                    Some(RouteHint(format!("tcp://10.0.0.{n}:22020")))
                },
            })
        }

        fn lookup_by_x25519(&self, x25519: &X25519PublicKey) -> Option<PublicKey> {
            Some(key(x25519.as_bytes()[0] ^ 0x80))
        }

        fn quorum(&self, _kind: QuorumKind, _height: u64) -> Option<Arc<Quorum>> {
            None
        }
    }

    fn quorum(range: std::ops::Range<u8>) -> Arc<Quorum> {
        Arc::new(Quorum::new(range.map(key).collect()))
    }

    #[test]
    fn outgoing_targets_are_strong() {
        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(0),
            &[q],
            false,
            &HashSet::new(),
        );
        assert_eq!(resolved.my_position(0), Some(0));
        assert_eq!(resolved.my_position_count(), 1);
        // Outgoing links of position 0 in a 10-quorum: 1, 2, 4, 8.
        assert_eq!(resolved.peer_count(), 4);
        assert_eq!(resolved.strong_count(), 4);
        for n in [1u8, 2, 4, 8] {
            assert!(resolved.is_strong(&x25519_of(n)));
        }
    }

    #[test]
    fn opportunistic_adds_weak_sources() {
        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(0),
            &[q],
            true,
            &HashSet::new(),
        );
        // Incoming of 0: 9, 8, 6, 2. Positions 2 and 8 are also outgoing,
        // so they stay strong; 9 and 6 come in weak.
        assert_eq!(resolved.peer_count(), 6);
        assert_eq!(resolved.strong_count(), 4);
        assert!(resolved.contains(&x25519_of(9)));
        assert!(!resolved.is_strong(&x25519_of(9)));
        assert!(resolved.is_strong(&x25519_of(2)));
        assert!(resolved.is_strong(&x25519_of(8)));
    }

    #[test]
    fn weak_never_downgrades_strong() {
        // Same overlap as above: the strong outgoing insert happens first,
        // the weak incoming insert for the same peer is a no-op.
        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(0),
            &[q],
            true,
            &HashSet::new(),
        );
        let strong_hints = (0..10u8)
            .filter(|n| resolved.is_strong(&x25519_of(*n)))
            .count();
        assert_eq!(strong_hints, resolved.strong_count());
    }

    #[test]
    fn excluded_and_self_are_absent() {
        let q = quorum(0..10);
        let exclude: HashSet<PublicKey> = [key(1)].into_iter().collect();
        let resolved =
            resolve_quorum_peers(&TestRegistry::full(), &key(0), &[q], true, &exclude);
        assert!(!resolved.contains(&x25519_of(1)));
        assert!(!resolved.contains(&x25519_of(0)));
    }

    #[test]
    fn unreachable_nodes_are_dropped() {
        let mut registry = TestRegistry::full();
        registry.inactive.insert(key(1));
        registry.routeless.insert(key(2));
        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(&registry, &key(0), &[q], false, &HashSet::new());
        // Of outgoing 1, 2, 4, 8 only 4 and 8 survive.
        assert_eq!(resolved.peer_count(), 2);
        assert!(resolved.contains(&x25519_of(4)));
        assert!(resolved.contains(&x25519_of(8)));
    }

    #[test]
    fn non_member_resolves_nothing() {
        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(99),
            &[q],
            true,
            &HashSet::new(),
        );
        assert_eq!(resolved.my_position_count(), 0);
        assert_eq!(resolved.peer_count(), 0);
    }

    #[test]
    fn forward_bridge_from_second_half() {
        // Disjoint quorums: 0..10 and 10..20. Node 6 is in Q at position 6
        // (second half, half = 5) and not in Q', so it bridges strongly to
        // Q[6 - 5] = node 1.
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(6),
            &[quorum(0..10), quorum(10..20)],
            false,
            &HashSet::new(),
        );
        assert!(resolved.is_strong(&x25519_of(1)));
    }

    #[test]
    fn no_forward_bridge_from_first_half() {
        // Node 2 is in the first half of Q: no forward bridge. Its outgoing
        // links are 3, 4, 6, 0 — node 7 must not appear via bridging.
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(2),
            &[quorum(0..10), quorum(10..20)],
            false,
            &HashSet::new(),
        );
        assert_eq!(resolved.peer_count(), 4);
        assert!(!resolved.contains(&x25519_of(7)));
    }

    #[test]
    fn reverse_bridge_is_weak() {
        // Node 12 is in Q' at position 2 (< half) and not in Q, so it
        // bridges weakly to Q[5 + 2] = node 7.
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(12),
            &[quorum(0..10), quorum(10..20)],
            false,
            &HashSet::new(),
        );
        assert!(resolved.contains(&x25519_of(7)));
        assert!(!resolved.is_strong(&x25519_of(7)));
    }

    #[test]
    fn member_of_both_quorums_skips_bridges() {
        // Overlapping quorums: 0..10 and 5..15. Node 6 sits in both, so no
        // bridge links are added; every peer is an intra-quorum link.
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(6),
            &[quorum(0..10), quorum(5..15)],
            false,
            &HashSet::new(),
        );
        assert_eq!(resolved.my_position_count(), 2);
        // Q position 6 → outgoing 7, 8, 0, 4; Q' position 1 → outgoing
        // validators 7, 8, 10, 14 (offsets 1, 2, 4, 8 from index 1).
        // Bridge target for Q would have been Q[1]; it must not be present.
        assert!(!resolved.contains(&x25519_of(1)));
    }

    #[test]
    fn relay_uses_hint_strength() {
        use std::sync::Mutex;

        #[derive(Default)]
        struct RecordingTransport {
            sent: Mutex<Vec<(X25519PublicKey, Command, Delivery)>>,
        }

        impl Transport for RecordingTransport {
            fn send(
                &self,
                to: &X25519PublicKey,
                command: Command,
                _payload: &[u8],
                delivery: Delivery,
            ) {
                self.sent.lock().unwrap().push((*to, command, delivery));
            }
        }

        let q = quorum(0..10);
        let resolved = resolve_quorum_peers(
            &TestRegistry::full(),
            &key(0),
            &[q],
            true,
            &HashSet::new(),
        );
        let transport = RecordingTransport::default();
        resolved.relay_to_peers(&transport, Command::BlinkSign, b"payload");

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), resolved.peer_count());
        for (peer, command, delivery) in sent.iter() {
            assert_eq!(*command, Command::BlinkSign);
            match delivery {
                Delivery::Strong(hint) => {
                    assert!(hint.is_some());
                    assert!(resolved.is_strong(peer));
                }
                Delivery::Optional => assert!(!resolved.is_strong(peer)),
            }
        }
    }
}
