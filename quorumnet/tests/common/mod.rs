//! In-memory cluster harness for quorum network integration tests.
#![allow(dead_code)] // each test binary uses a different slice of the harness
//!
//! Wires real contexts and handlers together over fake implementations of
//! the consumed interfaces: a shared service node directory, a queue-based
//! transport that delivers messages when the test pumps it, and a mempool
//! that parses any non-empty blob and approves or rejects per test setup.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use strobe_crypto::{keypair_from_seed, tx_hash};
use strobe_quorumnet::{
    register_core_handlers, BlinkVerdict, ChainView, CommandRegistry, Delivery, IncomingMessage,
    NodeEntry, NodeRegistry, QnetContext, Quorum, QuorumKind, QuorumnetConfig, RouteHint,
    Transport, TxPool, VoteOutcome,
};
use strobe_types::{
    PublicKey, QuorumVote, ServiceNodeKeys, Transaction, TxHash, X25519PublicKey,
};
use strobe_wire::Command;

pub const NUM_SERVICE_NODES: u8 = 10;

/// One queued message in flight between nodes.
struct Envelope {
    from: X25519PublicKey,
    to: X25519PublicKey,
    command: Command,
    payload: Vec<u8>,
}

/// The shared "wire": a FIFO of undelivered messages plus a log of every
/// message ever sent, for assertions.
#[derive(Default)]
pub struct Net {
    queue: Mutex<VecDeque<Envelope>>,
    log: Mutex<Vec<Command>>,
}

impl Net {
    pub fn sent_count(&self, command: Command) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == command)
            .count()
    }
}

/// Transport bound to one node: pushes onto the shared queue.
struct QueueTransport {
    self_x25519: X25519PublicKey,
    net: Arc<Net>,
}

impl Transport for QueueTransport {
    fn send(&self, to: &X25519PublicKey, command: Command, payload: &[u8], _delivery: Delivery) {
        // The in-memory wire treats every peer as connected, so strong and
        // optional deliveries both go through.
        self.net.log.lock().unwrap().push(command);
        self.net.queue.lock().unwrap().push_back(Envelope {
            from: self.self_x25519,
            to: *to,
            command,
            payload: payload.to_vec(),
        });
    }
}

/// The shared view of who the service nodes are and which quorums exist.
///
/// Blink quorums are the full node set rotated by a height-derived offset
/// (plus the directory's own `rotation_skew`, which tests use to give one
/// node a divergent view and force checksum mismatches).
pub struct Directory {
    validators: Vec<PublicKey>,
    x25519_by_pubkey: HashMap<PublicKey, X25519PublicKey>,
    pubkey_by_x25519: HashMap<X25519PublicKey, PublicKey>,
    rotation_skew: u64,
}

impl Directory {
    pub fn new(rotation_skew: u64) -> Self {
        let mut x25519_by_pubkey = HashMap::new();
        let mut pubkey_by_x25519 = HashMap::new();
        let validators = (0..NUM_SERVICE_NODES)
            .map(|seed| {
                let kp = keypair_from_seed(&[seed; 32]);
                let x = X25519PublicKey([seed; 32]);
                x25519_by_pubkey.insert(kp.public, x);
                pubkey_by_x25519.insert(x, kp.public);
                kp.public
            })
            .collect();
        Self {
            validators,
            x25519_by_pubkey,
            pubkey_by_x25519,
            rotation_skew,
        }
    }
}

impl NodeRegistry for Directory {
    fn resolve(&self, pubkey: &PublicKey) -> Option<NodeEntry> {
        let x25519 = self.x25519_by_pubkey.get(pubkey)?;
        Some(NodeEntry {
            active: true,
            x25519_pubkey: Some(*x25519),
            route: Some(RouteHint(format!("tcp://10.7.0.{}:22020", x25519.0[0]))),
        })
    }

    fn lookup_by_x25519(&self, x25519: &X25519PublicKey) -> Option<PublicKey> {
        self.pubkey_by_x25519.get(x25519).copied()
    }

    fn quorum(&self, _kind: QuorumKind, height: u64) -> Option<Arc<Quorum>> {
        let n = self.validators.len() as u64;
        let offset = ((height + self.rotation_skew) % n) as usize;
        let mut rotated = self.validators.clone();
        rotated.rotate_left(offset);
        Some(Arc::new(Quorum::new(rotated)))
    }
}

pub struct TestChain(AtomicU64);

impl ChainView for TestChain {
    fn current_height(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Parses any non-empty blob; blink verdict is a per-node switch; votes are
/// verified and deduplicated by (height, signature).
pub struct TestPool {
    approve: AtomicBool,
    votes_seen: Mutex<Vec<QuorumVote>>,
}

impl TestPool {
    pub fn set_approve(&self, approve: bool) {
        self.approve.store(approve, Ordering::SeqCst);
    }

    pub fn has_vote(&self, vote: &QuorumVote) -> bool {
        self.votes_seen.lock().unwrap().contains(vote)
    }
}

impl TxPool for TestPool {
    fn parse_tx(&self, blob: &[u8]) -> Option<(Transaction, TxHash)> {
        if blob.is_empty() {
            return None;
        }
        Some((Transaction::from_blob(blob.to_vec()), tx_hash(blob)))
    }

    fn add_blink(&self, _tx: &Transaction, _blink_height: u64) -> BlinkVerdict {
        if self.approve.load(Ordering::SeqCst) {
            BlinkVerdict {
                approved: true,
                reason: String::new(),
            }
        } else {
            BlinkVerdict {
                approved: false,
                reason: "conflicts with an existing transaction".into(),
            }
        }
    }

    fn add_vote(&self, vote: &QuorumVote) -> VoteOutcome {
        let mut seen = self.votes_seen.lock().unwrap();
        let newly_added = !seen.contains(vote);
        if newly_added {
            seen.push(*vote);
        }
        VoteOutcome {
            verified: true,
            newly_added,
        }
    }
}

pub struct TestNode {
    pub ctx: Arc<QnetContext>,
    pub commands: CommandRegistry,
    pub x25519: X25519PublicKey,
    pub chain: Arc<TestChain>,
    pub pool: Arc<TestPool>,
}

pub struct Cluster {
    pub net: Arc<Net>,
    pub nodes: Vec<TestNode>,
    by_x25519: HashMap<X25519PublicKey, usize>,
    sn_identities: Vec<X25519PublicKey>,
}

impl Cluster {
    /// Build the ten service nodes (seeds `0..NUM_SERVICE_NODES`) at the
    /// given chain height, all sharing one directory view.
    pub fn new(height: u64) -> Self {
        let net = Arc::new(Net::default());
        let mut cluster = Self {
            net,
            nodes: Vec::new(),
            by_x25519: HashMap::new(),
            sn_identities: Vec::new(),
        };
        for seed in 0..NUM_SERVICE_NODES {
            cluster.add_node(seed, height, 0);
            cluster
                .sn_identities
                .push(X25519PublicKey([seed; 32]));
        }
        cluster
    }

    /// Add one more node (e.g. an originator outside the quorums). A
    /// nonzero `rotation_skew` gives the node a divergent quorum view.
    pub fn add_node(&mut self, seed: u8, height: u64, rotation_skew: u64) -> usize {
        let x25519 = X25519PublicKey([seed; 32]);
        let kp = keypair_from_seed(&[seed; 32]);
        let chain = Arc::new(TestChain(AtomicU64::new(height)));
        let pool = Arc::new(TestPool {
            approve: AtomicBool::new(true),
            votes_seen: Mutex::new(Vec::new()),
        });
        let ctx = QnetContext::new(
            QuorumnetConfig::default(),
            ServiceNodeKeys {
                pubkey: kp.public,
                x25519_pubkey: x25519,
            },
            kp.private,
            Arc::new(Directory::new(rotation_skew)),
            Arc::clone(&chain) as Arc<dyn ChainView>,
            Arc::clone(&pool) as Arc<dyn TxPool>,
            Arc::new(QueueTransport {
                self_x25519: x25519,
                net: Arc::clone(&self.net),
            }),
        );
        let mut commands = CommandRegistry::new();
        register_core_handlers(&mut commands);

        let index = self.nodes.len();
        self.by_x25519.insert(x25519, index);
        self.nodes.push(TestNode {
            ctx,
            commands,
            x25519,
            chain,
            pool,
        });
        index
    }

    pub fn node(&self, index: usize) -> &TestNode {
        &self.nodes[index]
    }

    /// Flip every service node's blink verdict.
    pub fn set_all_approve(&self, approve: bool) {
        for node in &self.nodes {
            node.pool.set_approve(approve);
        }
    }

    /// Deliver queued messages until the network is quiet.
    pub fn pump(&self) {
        for _ in 0..100_000 {
            let Some(envelope) = self.net.queue.lock().unwrap().pop_front() else {
                return;
            };
            let Some(&index) = self.by_x25519.get(&envelope.to) else {
                continue; // addressee not in this cluster
            };
            let node = &self.nodes[index];
            let msg = IncomingMessage {
                from: envelope.from,
                from_service_node: self.sn_identities.contains(&envelope.from),
                payload: envelope.payload,
            };
            node.commands
                .dispatch(&node.ctx, envelope.command.as_str(), &msg);
        }
        panic!("network did not quiesce");
    }
}
