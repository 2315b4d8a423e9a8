//! The transport interface and command dispatch.
//!
//! The actual peer-to-peer layer (authenticated, encrypted, pubkey-addressed
//! messaging) lives outside this crate. The core only needs to send a named
//! command to an X25519 identity — either *strongly* (deliver, opening a
//! connection via the routing hint if necessary) or *optionally* (deliver
//! only over an already-open connection) — and to receive inbound commands
//! dispatched by name.

use crate::context::QnetContext;
use crate::registry::RouteHint;
use std::collections::HashMap;
use std::sync::Arc;
use strobe_types::X25519PublicKey;
use strobe_wire::{Command, CommandAccess};
use tracing::{debug, warn};

/// How hard the transport should try to deliver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Must-deliver: open a connection using the hint if none is open.
    Strong(Option<RouteHint>),
    /// Send only if a connection to the peer already exists.
    Optional,
}

/// Outbound half of the transport.
pub trait Transport: Send + Sync {
    fn send(&self, to: &X25519PublicKey, command: Command, payload: &[u8], delivery: Delivery);
}

/// An inbound command as handed to the core by the transport.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    /// The sender's transport identity.
    pub from: X25519PublicKey,
    /// Whether the transport authenticated the sender as a registered
    /// service node (as opposed to an anonymous client connection).
    pub from_service_node: bool,
    /// The raw payload bytes (a bt-encoded envelope).
    pub payload: Vec<u8>,
}

type Handler = Box<dyn Fn(&Arc<QnetContext>, &IncomingMessage) + Send + Sync>;

/// Maps command names to handler functions. Populated once at startup
/// (see [`crate::register_core_handlers`]), then read-only.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<Command, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, command: Command, handler: F)
    where
        F: Fn(&Arc<QnetContext>, &IncomingMessage) + Send + Sync + 'static,
    {
        self.handlers.insert(command, Box::new(handler));
    }

    pub fn is_registered(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Dispatch an inbound message by command name.
    ///
    /// Unknown commands are dropped. Quorum-only commands from senders the
    /// transport did not authenticate as service nodes are dropped. The one
    /// public-ingress command is additionally subject to the node's client
    /// submission policy.
    pub fn dispatch(&self, ctx: &Arc<QnetContext>, command_name: &str, msg: &IncomingMessage) {
        let Some(command) = Command::from_str(command_name) else {
            debug!(command = command_name, "ignoring unknown command");
            return;
        };

        match command.access() {
            CommandAccess::QuorumOnly if !msg.from_service_node => {
                warn!(%command, from = ?msg.from, "dropping quorum command from non-SN sender");
                return;
            }
            CommandAccess::PublicIngress
                if !msg.from_service_node && !ctx.config.accept_client_submissions =>
            {
                debug!(%command, from = ?msg.from, "client submissions disabled; dropping");
                return;
            }
            _ => {}
        }

        match self.handlers.get(&command) {
            Some(handler) => handler(ctx, msg),
            None => debug!(%command, "no handler registered"),
        }
    }
}
