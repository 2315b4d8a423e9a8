//! Process-wide quorum network state.
//!
//! [`QnetContext`] bundles everything the command handlers need: the node's
//! identity, the consumed interfaces from the surrounding node (registry,
//! chain view, mempool, transport), and the two pieces of mutable state the
//! core owns — the blink store and the submitter's pending-result map. One
//! context is constructed at startup and shared (`Arc`) with every handler;
//! there are no globals.

use crate::config::QuorumnetConfig;
use crate::metrics::QuorumnetMetrics;
use crate::pool::TxPool;
use crate::registry::{ChainView, NodeRegistry};
use crate::store::BlinkStore;
use crate::submitter::BlinkSubmitter;
use crate::transport::Transport;
use std::sync::Arc;
use strobe_crypto::sign_message;
use strobe_types::{PrivateKey, ServiceNodeKeys, Signature};

pub struct QnetContext {
    pub config: QuorumnetConfig,
    /// This node's public identity (primary + transport key).
    pub keys: ServiceNodeKeys,
    signing_key: PrivateKey,

    pub registry: Arc<dyn NodeRegistry>,
    pub chain: Arc<dyn ChainView>,
    pub pool: Arc<dyn TxPool>,
    pub transport: Arc<dyn Transport>,

    pub blinks: BlinkStore,
    pub submitter: BlinkSubmitter,
    pub metrics: QuorumnetMetrics,
}

impl QnetContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: QuorumnetConfig,
        keys: ServiceNodeKeys,
        signing_key: PrivateKey,
        registry: Arc<dyn NodeRegistry>,
        chain: Arc<dyn ChainView>,
        pool: Arc<dyn TxPool>,
        transport: Arc<dyn Transport>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            keys,
            signing_key,
            registry,
            chain,
            pool,
            transport,
            blinks: BlinkStore::new(),
            submitter: BlinkSubmitter::new(),
            metrics: QuorumnetMetrics::new(),
        })
    }

    /// Sign a message with this node's primary key. The secret never leaves
    /// the context.
    pub fn sign(&self, message: &[u8]) -> Signature {
        sign_message(message, &self.signing_key)
    }
}
