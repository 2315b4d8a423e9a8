//! Gossip of signed quorum votes (checkpoints, obligations).
//!
//! Votes travel over the same quorum relay topology as blink data: strong
//! links to outgoing-topology targets, opportunistic links back to incoming
//! sources. A vote is re-relayed exactly once — when the vote pool reports
//! it as both verified and novel — so gossip converges instead of echoing.

use crate::context::QnetContext;
use crate::peers::resolve_quorum_peers;
use crate::quorum::QuorumKind;
use crate::transport::IncomingMessage;
use std::collections::HashSet;
use std::sync::Arc;
use strobe_types::{QuorumVote, VoteType};
use strobe_wire::{decode_vote, encode_vote, Command};
use tracing::{debug, info, warn};

/// Minimum validators a vote quorum needs before votes on it are worth
/// relaying; below this the quorum can never reach its own vote threshold.
const OBLIGATIONS_MIN_VOTES: usize = 7;
const CHECKPOINT_MIN_VOTES: usize = 13;

fn min_votes(vote_type: VoteType) -> usize {
    match vote_type {
        VoteType::Obligations => OBLIGATIONS_MIN_VOTES,
        VoteType::Checkpointing => CHECKPOINT_MIN_VOTES,
    }
}

/// Relay a vote to this node's peers in the vote's quorum.
///
/// Used both for locally produced votes and for re-relaying novel votes
/// received from peers. Drops the vote when the quorum cannot be fetched,
/// is too small to ever confirm anything, or does not include this node.
pub fn relay_vote(ctx: &Arc<QnetContext>, vote: &QuorumVote) {
    let Some(quorum) = ctx
        .registry
        .quorum(QuorumKind::from(vote.vote_type), vote.height)
    else {
        warn!(
            vote_type = ?vote.vote_type,
            height = vote.height,
            "unable to relay vote: no quorum for this height"
        );
        return;
    };
    if quorum.size() < min_votes(vote.vote_type) {
        warn!(
            vote_type = ?vote.vote_type,
            height = vote.height,
            size = quorum.size(),
            "unable to relay vote: quorum too small to reach its vote threshold"
        );
        return;
    }

    let peers = resolve_quorum_peers(
        ctx.registry.as_ref(),
        &ctx.keys.pubkey,
        &[quorum],
        true,
        &HashSet::new(),
    );
    if peers.my_position_count() == 0 {
        warn!("vote to relay does not include this service node");
        return;
    }

    debug!(
        vote_type = ?vote.vote_type,
        height = vote.height,
        peers = peers.peer_count(),
        "relaying vote"
    );
    peers.relay_to_peers(ctx.transport.as_ref(), Command::Vote, &encode_vote(vote));
    ctx.metrics.votes_relayed.inc();
}

/// Handler for the `vote` command.
pub fn handle_vote(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let vote = match decode_vote(&msg.payload) {
        Ok(vote) => vote,
        Err(e) => {
            info!(error = %e, "ignoring malformed vote");
            return;
        }
    };
    ctx.metrics.votes_received.inc();

    if vote.height > ctx.chain.current_height() {
        debug!(
            height = vote.height,
            "ignoring vote: block height is too high"
        );
        return;
    }

    let outcome = ctx.pool.add_vote(&vote);
    if !outcome.verified {
        warn!("vote verification failed; ignoring vote");
        return;
    }
    if outcome.newly_added {
        relay_vote(ctx, &vote);
    }
}
