//! Inbound blink handling: tx submissions/forwards and signature relays.
//!
//! `blink` carries a transaction into the quorum, either from the
//! originator (tagged, expecting a response) or from a fellow quorum member
//! (untagged forward). The handler gates on height and quorum agreement,
//! relays the tx onward *before* verifying it locally — peers verify in
//! parallel, which is where blink latency comes from — then verifies, signs
//! the verdict, and feeds its own signature through the signature
//! processor.
//!
//! `blink_sign` carries signature batches between quorum members. If the
//! referenced tx is not known yet the signatures are buffered; the `blink`
//! handler drains the buffer when the tx arrives.

use crate::blink_tx::BlinkTx;
use crate::context::QnetContext;
use crate::peers::resolve_quorum_peers;
use crate::quorum::blink_quorums;
use crate::signatures::process_blink_signatures;
use crate::store::{InstallOutcome, PendingSignature, SignatureTarget};
use crate::transport::{Delivery, IncomingMessage};
use std::collections::HashSet;
use std::sync::Arc;
use strobe_types::params::BLINK_HEIGHT_WINDOW;
use strobe_types::TxHash;
use strobe_wire::payload::{dict_bytes, dict_u64, dict_u64_or};
use strobe_wire::{decode_payload, BlinkPayload, BlinkSignPayload, Command, NostartPayload};
use tracing::{debug, info, trace, warn};

/// Send `bl_nostart` back to the submitter, if the submission carried a tag.
/// Forwards (no tag) are dropped silently.
fn reply_nostart(ctx: &QnetContext, msg: &IncomingMessage, tag: u64, error: &str) {
    if tag == 0 {
        return;
    }
    let payload = NostartPayload {
        tag,
        error: error.to_string(),
    }
    .encode();
    ctx.transport
        .send(&msg.from, Command::BlNostart, &payload, Delivery::Optional);
}

/// Handler for the `blink` command.
pub fn handle_blink(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let dict = match decode_payload(&msg.payload) {
        Ok(dict) => dict,
        Err(e) => {
            info!(error = %e, "rejecting blink message: bad payload");
            return;
        }
    };
    let tag = dict_u64_or(&dict, "!", 0);

    // Without a height we cannot even pick the right quorum to complain to.
    let Ok(blink_height) = dict_u64(&dict, "h") else {
        info!("rejecting blink tx: no blink height included");
        return;
    };
    let local_height = ctx.chain.current_height();
    if blink_height + BLINK_HEIGHT_WINDOW < local_height
        || blink_height > local_height + BLINK_HEIGHT_WINDOW
    {
        info!(
            blink_height,
            local_height, "rejecting blink tx: auth height out of window"
        );
        reply_nostart(ctx, msg, tag, "Invalid blink authorization height");
        return;
    }
    trace!(blink_height, local_height, "blink tx auth height is valid");

    let Ok(tx_blob) = dict_bytes(&dict, "t") else {
        info!("rejecting blink tx: no tx data included in request");
        reply_nostart(ctx, msg, tag, "No transaction included in blink request");
        return;
    };

    // The supplied hash lets us short-circuit on a duplicate before paying
    // for parsing; it is cross-checked against the parsed tx below.
    let tx_hash = match dict_bytes(&dict, "#").ok().and_then(TxHash::from_slice) {
        Some(hash) => hash,
        None => {
            info!("rejecting blink tx: invalid tx hash included in request");
            reply_nostart(ctx, msg, tag, "Invalid transaction hash");
            return;
        }
    };
    if ctx.blinks.has_tx(blink_height, &tx_hash) {
        debug!(%tx_hash, "already seen and forwarded this blink tx, ignoring it");
        if tag != 0 {
            // We got the tx from a quorum peer before the originator's own
            // submission arrived; the originator still wants its reply.
            ctx.blinks
                .set_reply_if_unset(blink_height, &tx_hash, tag, msg.from);
        }
        return;
    }

    let Ok(checksum) = dict_u64(&dict, "q") else {
        info!("rejecting blink tx: no quorum checksum included");
        return;
    };
    let (quorums, _) = match blink_quorums(ctx.registry.as_ref(), blink_height, Some(checksum)) {
        Ok(assembled) => assembled,
        Err(e) => {
            info!(error = %e, "rejecting blink tx");
            reply_nostart(
                ctx,
                msg,
                tag,
                &format!("Unable to retrieve blink quorum: {e}"),
            );
            return;
        }
    };

    // Exclude the peer that just sent it to us from the relay set.
    let mut exclude = HashSet::new();
    if let Some(sender) = ctx.registry.lookup_by_x25519(&msg.from) {
        exclude.insert(sender);
    }
    let peers = resolve_quorum_peers(
        ctx.registry.as_ref(),
        &ctx.keys.pubkey,
        &quorums.0,
        true,
        &exclude,
    );

    if peers.my_position_count() == 0 {
        info!("rejecting blink tx: this service node is not a blink quorum member");
        reply_nostart(ctx, msg, tag, "Blink tx relayed to non-blink quorum member");
        return;
    }
    trace!(
        subquorums = peers.my_position_count(),
        "found this service node in the blink quorums"
    );

    let Some((tx, actual_hash)) = ctx.pool.parse_tx(tx_blob) else {
        info!("rejecting blink tx: failed to parse transaction data");
        reply_nostart(ctx, msg, tag, "Failed to parse transaction data");
        return;
    };
    if actual_hash != tx_hash {
        info!(supplied = %tx_hash, actual = %actual_hash, "rejecting blink tx: hash mismatch");
        reply_nostart(ctx, msg, tag, "Invalid transaction hash");
        return;
    }

    // A node with no reachable quorum peers cannot start the exchange: its
    // signature could never spread. Only happens to brand-new nodes that
    // have not seen uptime proofs yet.
    if peers.strong_count() == 0 {
        warn!("no connection info for any blink quorum peer; aborting blink tx");
        reply_nostart(ctx, msg, tag, "No quorum peers are currently reachable");
        return;
    }

    let btx = Arc::new(BlinkTx::new(
        blink_height,
        tx,
        tx_hash,
        quorums.subquorum_sizes(),
    ));
    let mut signatures = match ctx.blinks.install_tx(
        blink_height,
        tx_hash,
        Arc::clone(&btx),
        tag,
        Some(msg.from),
    ) {
        InstallOutcome::Installed { pending } => pending,
        InstallOutcome::Duplicate => {
            debug!(%tx_hash, "lost the install race, ignoring duplicate blink tx");
            return;
        }
    };
    ctx.metrics.blinks_received.inc();
    ctx.metrics.tracked_blinks.set(ctx.blinks.len() as i64);

    // Distribute before verifying: quorum peers should start their own
    // verification as early as possible, and they may succeed where this
    // node fails. The gates above are the ones that had to come first —
    // failing them means we would disagree about the quorum itself.
    let forward = BlinkPayload {
        tag: 0,
        blink_height,
        checksum,
        tx_blob: tx_blob.to_vec(),
        tx_hash,
    }
    .encode();
    debug!(
        strong = peers.strong_count(),
        opportunistic = peers.peer_count() - peers.strong_count(),
        "relaying blink tx to quorum peers"
    );
    peers.relay_to_peers(ctx.transport.as_ref(), Command::Blink, &forward);

    let verdict = ctx.pool.add_blink(btx.tx(), blink_height);
    if verdict.approved {
        info!(%tx_hash, "blink tx approved and added to mempool");
    } else {
        info!(%tx_hash, reason = %verdict.reason, "blink tx rejected");
    }

    // Sign the verdict for every subquorum seat this node holds, then push
    // our signature(s) plus anything that was buffered through the
    // processor — which also relays them.
    let signature = ctx.sign(&btx.signing_hash(verdict.approved));
    for subquorum in 0..2u8 {
        if let Some(position) = peers.my_position(subquorum as usize) {
            signatures.push(PendingSignature {
                approval: verdict.approved,
                subquorum,
                position: position as u16,
                signature,
            });
        }
    }
    process_blink_signatures(
        ctx,
        &btx,
        &quorums,
        checksum,
        signatures,
        tag,
        Some(msg.from),
        None,
    );
}

/// Handler for the `blink_sign` command.
pub fn handle_blink_sign(ctx: &Arc<QnetContext>, msg: &IncomingMessage) {
    let payload = match BlinkSignPayload::decode(&msg.payload) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "invalid blink signature data");
            return;
        }
    };

    let (quorums, _) = match blink_quorums(
        ctx.registry.as_ref(),
        payload.blink_height,
        Some(payload.checksum),
    ) {
        Ok(assembled) => assembled,
        Err(e) => {
            warn!(error = %e, "dropping blink signatures");
            return;
        }
    };

    let signatures: Vec<PendingSignature> =
        payload.signatures.into_iter().map(Into::into).collect();

    match ctx
        .blinks
        .signature_target(payload.blink_height, &payload.tx_hash)
    {
        Some(SignatureTarget {
            btx: Some(btx),
            reply_tag,
            reply_to,
        }) => {
            debug!(tx_hash = %payload.tx_hash, "found blink tx in local cache");
            process_blink_signatures(
                ctx,
                &btx,
                &quorums,
                payload.checksum,
                signatures,
                reply_tag,
                reply_to,
                Some(msg.from),
            );
        }
        _ => {
            info!(
                tx_hash = %payload.tx_hash,
                "blink tx not yet known; delaying signature verification"
            );
            ctx.blinks
                .deposit_pending_sigs(payload.blink_height, payload.tx_hash, signatures);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink_tx::SignatureStatus;
    use crate::config::QuorumnetConfig;
    use crate::pool::{BlinkVerdict, TxPool, VoteOutcome};
    use crate::quorum::{Quorum, QuorumKind};
    use crate::registry::{ChainView, NodeEntry, NodeRegistry, RouteHint};
    use crate::transport::Transport;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use strobe_crypto::{keypair_from_seed, sign_message, tx_hash as hash_blob};
    use strobe_types::{
        PublicKey, QuorumVote, ServiceNodeKeys, Transaction, X25519PublicKey,
    };
    use strobe_wire::WireSignature;

    const ORIGINATOR: X25519PublicKey = X25519PublicKey([0xEE; 32]);

    struct TestNet {
        quorums: HashMap<u64, Arc<Quorum>>,
        x25519_by_pubkey: HashMap<PublicKey, X25519PublicKey>,
        pubkey_by_x25519: HashMap<X25519PublicKey, PublicKey>,
    }

    impl TestNet {
        /// Quorums at heights 95/100 (seeds 0..10) and 105 (seeds 10..20).
        fn new() -> Arc<Self> {
            let mut x25519_by_pubkey = HashMap::new();
            let mut pubkey_by_x25519 = HashMap::new();
            let mut make = |range: std::ops::Range<u8>| {
                let validators: Vec<PublicKey> = range
                    .map(|seed| {
                        let kp = keypair_from_seed(&[seed; 32]);
                        let x = X25519PublicKey([seed; 32]);
                        x25519_by_pubkey.insert(kp.public, x);
                        pubkey_by_x25519.insert(x, kp.public);
                        kp.public
                    })
                    .collect();
                Arc::new(Quorum::new(validators))
            };
            let base = make(0..10);
            let next = make(10..20);
            let mut quorums = HashMap::new();
            quorums.insert(95, Arc::clone(&base));
            quorums.insert(100, base);
            quorums.insert(105, next);
            Arc::new(Self {
                quorums,
                x25519_by_pubkey,
                pubkey_by_x25519,
            })
        }
    }

    struct NetRegistry(Arc<TestNet>);

    impl NodeRegistry for NetRegistry {
        fn resolve(&self, pubkey: &PublicKey) -> Option<NodeEntry> {
            let x25519 = self.0.x25519_by_pubkey.get(pubkey)?;
            Some(NodeEntry {
                active: true,
                x25519_pubkey: Some(*x25519),
                route: Some(RouteHint(format!("tcp://10.0.0.{}:22020", x25519.0[0]))),
            })
        }
        fn lookup_by_x25519(&self, x25519: &X25519PublicKey) -> Option<PublicKey> {
            self.0.pubkey_by_x25519.get(x25519).copied()
        }
        fn quorum(&self, _kind: QuorumKind, height: u64) -> Option<Arc<Quorum>> {
            self.0.quorums.get(&height).cloned()
        }
    }

    struct FixedChain(u64);

    impl ChainView for FixedChain {
        fn current_height(&self) -> u64 {
            self.0
        }
    }

    /// Parses any non-empty blob; verdict is fixed at construction.
    struct HashPool {
        approve: bool,
    }

    impl TxPool for HashPool {
        fn parse_tx(&self, blob: &[u8]) -> Option<(Transaction, strobe_types::TxHash)> {
            if blob.is_empty() {
                return None;
            }
            Some((Transaction::from_blob(blob.to_vec()), hash_blob(blob)))
        }
        fn add_blink(&self, _tx: &Transaction, _height: u64) -> BlinkVerdict {
            BlinkVerdict {
                approved: self.approve,
                reason: if self.approve {
                    String::new()
                } else {
                    "double spend".into()
                },
            }
        }
        fn add_vote(&self, _vote: &QuorumVote) -> VoteOutcome {
            VoteOutcome {
                verified: false,
                newly_added: false,
            }
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(X25519PublicKey, Command, Vec<u8>)>>,
    }

    impl RecordingTransport {
        fn count(&self, command: Command) -> usize {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, c, _)| *c == command)
                .count()
        }

        fn nostart_errors(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, c, _)| *c == Command::BlNostart)
                .map(|(_, _, p)| NostartPayload::decode(p).unwrap().error)
                .collect()
        }
    }

    impl Transport for RecordingTransport {
        fn send(
            &self,
            to: &X25519PublicKey,
            command: Command,
            payload: &[u8],
            _delivery: Delivery,
        ) {
            self.sent
                .lock()
                .unwrap()
                .push((*to, command, payload.to_vec()));
        }
    }

    struct Fixture {
        ctx: Arc<QnetContext>,
        transport: Arc<RecordingTransport>,
        net: Arc<TestNet>,
    }

    fn fixture(self_seed: u8, local_height: u64, approve: bool) -> Fixture {
        let net = TestNet::new();
        let transport = Arc::new(RecordingTransport::default());
        let kp = keypair_from_seed(&[self_seed; 32]);
        let ctx = QnetContext::new(
            QuorumnetConfig::default(),
            ServiceNodeKeys {
                pubkey: kp.public,
                x25519_pubkey: X25519PublicKey([self_seed; 32]),
            },
            kp.private,
            Arc::new(NetRegistry(Arc::clone(&net))),
            Arc::new(FixedChain(local_height)),
            Arc::new(HashPool { approve }),
            Arc::clone(&transport) as Arc<dyn Transport>,
        );
        Fixture {
            ctx,
            transport,
            net,
        }
    }

    fn local_checksum(f: &Fixture, blink_height: u64) -> u64 {
        blink_quorums(f.ctx.registry.as_ref(), blink_height, None)
            .unwrap()
            .1
    }

    fn blink_msg(f: &Fixture, tag: u64, blink_height: u64, blob: &[u8]) -> IncomingMessage {
        IncomingMessage {
            from: ORIGINATOR,
            from_service_node: false,
            payload: BlinkPayload {
                tag,
                blink_height,
                checksum: local_checksum(f, blink_height),
                tx_blob: blob.to_vec(),
                tx_hash: hash_blob(blob),
            }
            .encode(),
        }
    }

    #[test]
    fn in_window_submission_is_accepted_and_relayed() {
        let f = fixture(0, 100, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-bytes"));

        assert!(f.transport.nostart_errors().is_empty());
        assert!(f.transport.count(Command::Blink) > 0);
        assert!(f.transport.count(Command::BlinkSign) > 0);
        assert!(f.ctx.blinks.has_tx(100, &hash_blob(b"tx-bytes")));
        assert_eq!(f.ctx.metrics.blinks_received.get(), 1);
    }

    #[test]
    fn height_window_boundaries() {
        // local height 102: blink height 100 is exactly −2 and accepted.
        let f = fixture(0, 102, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-low"));
        assert!(f.transport.nostart_errors().is_empty());

        // local height 98: blink height 100 is exactly +2 and accepted.
        let f = fixture(0, 98, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-high"));
        assert!(f.transport.nostart_errors().is_empty());

        // local height 103: −3 is out of the window.
        let f = fixture(0, 103, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-stale"));
        assert_eq!(
            f.transport.nostart_errors(),
            vec!["Invalid blink authorization height".to_string()]
        );

        // local height 97: +3 is out of the window.
        let f = fixture(0, 97, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-early"));
        assert_eq!(
            f.transport.nostart_errors(),
            vec!["Invalid blink authorization height".to_string()]
        );
    }

    #[test]
    fn untagged_out_of_window_forward_is_dropped_silently() {
        let f = fixture(0, 103, true);
        handle_blink(&f.ctx, &blink_msg(&f, 0, 100, b"tx"));
        assert_eq!(f.transport.count(Command::BlNostart), 0);
    }

    #[test]
    fn checksum_mismatch_sends_nostart() {
        let f = fixture(0, 100, true);
        let blob = b"tx-bytes";
        let mut msg = blink_msg(&f, 7, 100, blob);
        msg.payload = BlinkPayload {
            tag: 7,
            blink_height: 100,
            checksum: local_checksum(&f, 100).wrapping_add(1),
            tx_blob: blob.to_vec(),
            tx_hash: hash_blob(blob),
        }
        .encode();
        handle_blink(&f.ctx, &msg);

        let errors = f.transport.nostart_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Unable to retrieve blink quorum"));
        // Nothing was stored or relayed.
        assert!(!f.ctx.blinks.has_tx(100, &hash_blob(blob)));
        assert_eq!(f.transport.count(Command::Blink), 0);
    }

    #[test]
    fn non_member_sends_nostart() {
        let f = fixture(99, 100, true);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"tx-bytes"));
        assert_eq!(
            f.transport.nostart_errors(),
            vec!["Blink tx relayed to non-blink quorum member".to_string()]
        );
    }

    #[test]
    fn hash_mismatch_sends_nostart() {
        let f = fixture(0, 100, true);
        let mut payload = BlinkPayload {
            tag: 7,
            blink_height: 100,
            checksum: local_checksum(&f, 100),
            tx_blob: b"tx-bytes".to_vec(),
            tx_hash: hash_blob(b"different-tx"),
        };
        let msg = IncomingMessage {
            from: ORIGINATOR,
            from_service_node: false,
            payload: payload.encode(),
        };
        handle_blink(&f.ctx, &msg);
        assert_eq!(
            f.transport.nostart_errors(),
            vec!["Invalid transaction hash".to_string()]
        );

        // A malformed (non-32-byte) hash is caught even earlier.
        payload.tx_blob = b"tx-bytes".to_vec();
        let mut dict = decode_payload(&payload.encode()).unwrap();
        dict.insert("#".into(), strobe_wire::BtValue::Bytes(vec![1, 2, 3]));
        let msg = IncomingMessage {
            from: ORIGINATOR,
            from_service_node: false,
            payload: strobe_wire::encode_payload(dict),
        };
        handle_blink(&f.ctx, &msg);
        assert_eq!(f.transport.nostart_errors().len(), 2);
    }

    #[test]
    fn unparseable_tx_sends_nostart() {
        let f = fixture(0, 100, true);
        let msg = IncomingMessage {
            from: ORIGINATOR,
            from_service_node: false,
            payload: BlinkPayload {
                tag: 7,
                blink_height: 100,
                checksum: local_checksum(&f, 100),
                tx_blob: Vec::new(),
                tx_hash: hash_blob(b""),
            }
            .encode(),
        };
        handle_blink(&f.ctx, &msg);
        assert_eq!(
            f.transport.nostart_errors(),
            vec!["Failed to parse transaction data".to_string()]
        );
    }

    #[test]
    fn duplicate_forward_latches_reply_coords_without_rerelay() {
        let f = fixture(0, 100, true);
        let blob = b"tx-bytes";

        // First delivery: an untagged quorum forward.
        handle_blink(&f.ctx, &blink_msg(&f, 0, 100, blob));
        let relays = f.transport.count(Command::Blink);
        assert!(relays > 0);

        // Second delivery: the originator's own tagged submission.
        handle_blink(&f.ctx, &blink_msg(&f, 42, 100, blob));
        let target = f
            .ctx
            .blinks
            .signature_target(100, &hash_blob(blob))
            .unwrap();
        assert_eq!(target.reply_tag, 42);
        assert_eq!(target.reply_to, Some(ORIGINATOR));
        // No re-propagation of the duplicate.
        assert_eq!(f.transport.count(Command::Blink), relays);
    }

    #[test]
    fn rejected_tx_still_relays_and_signs_rejection() {
        let f = fixture(0, 100, false);
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, b"bad-tx"));

        // The tx is relayed regardless of the local verdict, and the node's
        // own rejection signature lands in its seat.
        assert!(f.transport.count(Command::Blink) > 0);
        let btx = f.ctx.blinks.find_tx(100, &hash_blob(b"bad-tx")).unwrap();
        let position = f.net.quorums[&100]
            .position_of(&f.ctx.keys.pubkey)
            .unwrap();
        assert_eq!(
            btx.slots().status(0, position),
            SignatureStatus::Rejected
        );
    }

    #[test]
    fn signatures_before_tx_are_buffered_then_drained() {
        let f = fixture(0, 100, true);
        let blob = b"tx-bytes";
        let tx_hash = hash_blob(blob);
        let checksum = local_checksum(&f, 100);

        // Validator seed 3 (subquorum 0, position 3) signs approval before
        // this node has the tx. The signing hash depends only on the height
        // and tx hash, so the remote can compute it without us.
        let reference = BlinkTx::new(
            100,
            Transaction::from_blob(blob.to_vec()),
            tx_hash,
            [10, 10],
        );
        let signer = keypair_from_seed(&[3u8; 32]);
        let early_sig = sign_message(&reference.signing_hash(true), &signer.private);

        let sign_msg = IncomingMessage {
            from: X25519PublicKey([3; 32]),
            from_service_node: true,
            payload: BlinkSignPayload {
                blink_height: 100,
                tx_hash,
                checksum,
                signatures: vec![WireSignature {
                    approval: true,
                    subquorum: 0,
                    position: 3,
                    signature: early_sig,
                }],
            }
            .encode(),
        };
        handle_blink_sign(&f.ctx, &sign_msg);

        // Buffered, not yet applied or relayed.
        assert!(f.ctx.blinks.find_tx(100, &tx_hash).is_none());
        assert_eq!(f.transport.count(Command::BlinkSign), 0);

        // The tx arrives: the buffered signature is drained, verified, and
        // stored alongside this node's own signature in one batch.
        handle_blink(&f.ctx, &blink_msg(&f, 7, 100, blob));
        let btx = f.ctx.blinks.find_tx(100, &tx_hash).unwrap();
        assert_eq!(btx.slots().status(0, 3), SignatureStatus::Approved);
        assert_eq!(btx.slots().status(0, 0), SignatureStatus::Approved);
    }

    #[test]
    fn blink_sign_checksum_mismatch_is_dropped() {
        let f = fixture(0, 100, true);
        let msg = IncomingMessage {
            from: X25519PublicKey([3; 32]),
            from_service_node: true,
            payload: BlinkSignPayload {
                blink_height: 100,
                tx_hash: hash_blob(b"x"),
                checksum: local_checksum(&f, 100).wrapping_add(1),
                signatures: vec![WireSignature {
                    approval: true,
                    subquorum: 0,
                    position: 3,
                    signature: strobe_types::Signature([1u8; 64]),
                }],
            }
            .encode(),
        };
        handle_blink_sign(&f.ctx, &msg);
        // Nothing buffered under a disagreed quorum view.
        assert!(f.ctx.blinks.is_empty());
    }
}
