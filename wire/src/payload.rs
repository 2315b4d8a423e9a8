//! Typed payload codecs for each quorum network command.
//!
//! Field names on the wire are single characters (see the field tables in
//! each struct's docs). Decoders are strict about sizes, enum ranges, and
//! list-length agreement; anything off-contract is a [`WireError`] and the
//! message is dropped by the caller.

use crate::bt::{encode_payload, BtDict, BtValue};
use crate::error::WireError;
use strobe_types::params::{BLINK_SUBQUORUM_SIZE, NUM_BLINK_SUBQUORUMS};
use strobe_types::{
    BlockHash, QuorumVote, Signature, StateChange, TxHash, VoteGroup, VotePayload, VoteType,
};

// ── Dictionary accessors ───────────────────────────────────────────────

/// Required unsigned integer field.
pub fn dict_u64(d: &BtDict, key: &'static str) -> Result<u64, WireError> {
    d.get(key)
        .ok_or(WireError::MissingField(key))?
        .int()
        .ok_or(WireError::WrongType(key))
}

/// Optional unsigned integer field; `fallback` when absent or mistyped.
pub fn dict_u64_or(d: &BtDict, key: &'static str, fallback: u64) -> u64 {
    d.get(key).and_then(BtValue::int).unwrap_or(fallback)
}

/// Required byte string field.
pub fn dict_bytes<'a>(d: &'a BtDict, key: &'static str) -> Result<&'a [u8], WireError> {
    d.get(key)
        .ok_or(WireError::MissingField(key))?
        .bytes()
        .ok_or(WireError::WrongType(key))
}

fn dict_list<'a>(d: &'a BtDict, key: &'static str) -> Result<&'a [BtValue], WireError> {
    d.get(key)
        .ok_or(WireError::MissingField(key))?
        .list()
        .ok_or(WireError::WrongType(key))
}

// ── blink ──────────────────────────────────────────────────────────────

/// `blink` payload — submission from an originator, or SN-to-SN forward.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `!` | u64 reply tag; present only on originator submissions |
/// | `h` | blink authorization height |
/// | `q` | quorum checksum |
/// | `t` | serialized transaction |
/// | `#` | 32-byte tx hash |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlinkPayload {
    /// Zero means "no tag": no response is expected (SN-to-SN forward).
    pub tag: u64,
    pub blink_height: u64,
    pub checksum: u64,
    pub tx_blob: Vec<u8>,
    pub tx_hash: TxHash,
}

impl BlinkPayload {
    pub fn to_dict(&self) -> BtDict {
        let mut d = BtDict::new();
        if self.tag != 0 {
            d.insert("!".into(), BtValue::Int(self.tag));
        }
        d.insert("h".into(), BtValue::Int(self.blink_height));
        d.insert("q".into(), BtValue::Int(self.checksum));
        d.insert("t".into(), BtValue::Bytes(self.tx_blob.clone()));
        d.insert("#".into(), BtValue::Bytes(self.tx_hash.as_bytes().to_vec()));
        d
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_payload(self.to_dict())
    }

    pub fn from_dict(d: &BtDict) -> Result<Self, WireError> {
        let tag = dict_u64_or(d, "!", 0);
        let blink_height = dict_u64(d, "h")?;
        let checksum = dict_u64(d, "q")?;
        let tx_blob = dict_bytes(d, "t")?.to_vec();
        let tx_hash = TxHash::from_slice(dict_bytes(d, "#")?).ok_or(WireError::InvalidValue {
            field: "#",
            reason: "tx hash must be 32 bytes",
        })?;
        Ok(Self {
            tag,
            blink_height,
            checksum,
            tx_blob,
            tx_hash,
        })
    }
}

// ── blink_sign ─────────────────────────────────────────────────────────

/// One signature as carried by a `blink_sign` batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WireSignature {
    pub approval: bool,
    pub subquorum: u8,
    pub position: u16,
    pub signature: Signature,
}

/// `blink_sign` payload — signature batch relay between quorum members.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `h` | blink authorization height |
/// | `#` | 32-byte tx hash |
/// | `q` | quorum checksum |
/// | `i` | list: subquorum index (< 2) |
/// | `p` | list: subquorum position |
/// | `r` | list: 1 approval / 0 rejection |
/// | `s` | list: 64-byte non-zero signature |
///
/// The four lists must have identical lengths; entry *k* of each list
/// describes the *k*-th signature. Unknown keys reject the whole payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlinkSignPayload {
    pub blink_height: u64,
    pub tx_hash: TxHash,
    pub checksum: u64,
    pub signatures: Vec<WireSignature>,
}

impl BlinkSignPayload {
    pub fn to_dict(&self) -> BtDict {
        let mut i_list = Vec::with_capacity(self.signatures.len());
        let mut p_list = Vec::with_capacity(self.signatures.len());
        let mut r_list = Vec::with_capacity(self.signatures.len());
        let mut s_list = Vec::with_capacity(self.signatures.len());
        for sig in &self.signatures {
            i_list.push(BtValue::Int(u64::from(sig.subquorum)));
            p_list.push(BtValue::Int(u64::from(sig.position)));
            r_list.push(BtValue::Int(u64::from(sig.approval)));
            s_list.push(BtValue::Bytes(sig.signature.as_bytes().to_vec()));
        }

        let mut d = BtDict::new();
        d.insert("h".into(), BtValue::Int(self.blink_height));
        d.insert("#".into(), BtValue::Bytes(self.tx_hash.as_bytes().to_vec()));
        d.insert("q".into(), BtValue::Int(self.checksum));
        d.insert("i".into(), BtValue::List(i_list));
        d.insert("p".into(), BtValue::List(p_list));
        d.insert("r".into(), BtValue::List(r_list));
        d.insert("s".into(), BtValue::List(s_list));
        d
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_payload(self.to_dict())
    }

    pub fn from_dict(d: &BtDict) -> Result<Self, WireError> {
        for key in d.keys() {
            if !matches!(key.as_str(), "h" | "#" | "q" | "i" | "p" | "r" | "s") {
                return Err(WireError::UnknownKey(key.clone()));
            }
        }

        let blink_height = dict_u64(d, "h")?;
        let tx_hash = TxHash::from_slice(dict_bytes(d, "#")?).ok_or(WireError::InvalidValue {
            field: "#",
            reason: "tx hash must be 32 bytes",
        })?;
        let checksum = dict_u64(d, "q")?;

        let i_list = dict_list(d, "i")?;
        let p_list = dict_list(d, "p")?;
        let r_list = dict_list(d, "r")?;
        let s_list = dict_list(d, "s")?;

        let n = i_list.len();
        if n == 0 {
            return Err(WireError::InvalidValue {
                field: "i",
                reason: "no signatures sent",
            });
        }
        if p_list.len() != n || r_list.len() != n || s_list.len() != n {
            return Err(WireError::MismatchedLists);
        }

        let mut signatures = Vec::with_capacity(n);
        for k in 0..n {
            let subquorum = i_list[k].int().ok_or(WireError::WrongType("i"))?;
            if subquorum >= u64::from(NUM_BLINK_SUBQUORUMS) {
                return Err(WireError::InvalidValue {
                    field: "i",
                    reason: "invalid subquorum index",
                });
            }
            let position = p_list[k].int().ok_or(WireError::WrongType("p"))?;
            if position >= BLINK_SUBQUORUM_SIZE as u64 {
                return Err(WireError::InvalidValue {
                    field: "p",
                    reason: "invalid subquorum position",
                });
            }
            let approval = match r_list[k].int().ok_or(WireError::WrongType("r"))? {
                0 => false,
                1 => true,
                _ => {
                    return Err(WireError::InvalidValue {
                        field: "r",
                        reason: "approval flag must be 0 or 1",
                    })
                }
            };
            let signature = Signature::from_slice(s_list[k].bytes().ok_or(WireError::WrongType("s"))?)
                .ok_or(WireError::InvalidValue {
                    field: "s",
                    reason: "signature must be 64 bytes",
                })?;
            if signature.is_zero() {
                return Err(WireError::InvalidValue {
                    field: "s",
                    reason: "null signature",
                });
            }
            signatures.push(WireSignature {
                approval,
                subquorum: subquorum as u8,
                position: position as u16,
                signature,
            });
        }

        Ok(Self {
            blink_height,
            tx_hash,
            checksum,
            signatures,
        })
    }

    pub fn decode(input: &[u8]) -> Result<Self, WireError> {
        Self::from_dict(&crate::bt::decode_payload(input)?)
    }
}

// ── bl_nostart / bl_bad / bl_good ──────────────────────────────────────

/// `bl_nostart` payload: the echoed tag plus a human-readable error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NostartPayload {
    pub tag: u64,
    pub error: String,
}

impl NostartPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut d = BtDict::new();
        d.insert("!".into(), BtValue::Int(self.tag));
        d.insert("e".into(), BtValue::Bytes(self.error.as_bytes().to_vec()));
        encode_payload(d)
    }

    pub fn decode(input: &[u8]) -> Result<Self, WireError> {
        let d = crate::bt::decode_payload(input)?;
        let tag = dict_u64(&d, "!")?;
        let error = String::from_utf8(dict_bytes(&d, "e")?.to_vec()).map_err(|_| {
            WireError::InvalidValue {
                field: "e",
                reason: "error message must be utf-8",
            }
        })?;
        Ok(Self { tag, error })
    }
}

/// `bl_bad` / `bl_good` payload: just the echoed tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplyPayload {
    pub tag: u64,
}

impl ReplyPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut d = BtDict::new();
        d.insert("!".into(), BtValue::Int(self.tag));
        encode_payload(d)
    }

    pub fn decode(input: &[u8]) -> Result<Self, WireError> {
        let d = crate::bt::decode_payload(input)?;
        Ok(Self {
            tag: dict_u64(&d, "!")?,
        })
    }
}

// ── vote ───────────────────────────────────────────────────────────────

/// Serialize a quorum vote to its wire dictionary.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `v` | version |
/// | `t` | vote type |
/// | `h` | height |
/// | `g` | group (nonzero) |
/// | `i` | index in group |
/// | `s` | 64-byte signature |
/// | `bh` | block hash (checkpointing only) |
/// | `wi` | worker index (obligations only) |
/// | `sc` | state change (obligations only) |
pub fn encode_vote(vote: &QuorumVote) -> Vec<u8> {
    let mut d = BtDict::new();
    d.insert("v".into(), BtValue::Int(u64::from(vote.version)));
    d.insert("t".into(), BtValue::Int(vote.vote_type as u64));
    d.insert("h".into(), BtValue::Int(vote.height));
    d.insert("g".into(), BtValue::Int(vote.group as u64));
    d.insert("i".into(), BtValue::Int(u64::from(vote.index_in_group)));
    d.insert(
        "s".into(),
        BtValue::Bytes(vote.signature.as_bytes().to_vec()),
    );
    match vote.payload {
        VotePayload::Checkpoint { block_hash } => {
            d.insert("bh".into(), BtValue::Bytes(block_hash.as_bytes().to_vec()));
        }
        VotePayload::StateChange {
            worker_index,
            state,
        } => {
            d.insert("wi".into(), BtValue::Int(u64::from(worker_index)));
            d.insert("sc".into(), BtValue::Int(state as u64));
        }
    }
    encode_payload(d)
}

fn dict_u8(d: &BtDict, key: &'static str) -> Result<u8, WireError> {
    u8::try_from(dict_u64(d, key)?).map_err(|_| WireError::InvalidValue {
        field: key,
        reason: "value out of range",
    })
}

fn dict_u16(d: &BtDict, key: &'static str) -> Result<u16, WireError> {
    u16::try_from(dict_u64(d, key)?).map_err(|_| WireError::InvalidValue {
        field: key,
        reason: "value out of range",
    })
}

/// Deserialize a quorum vote from wire bytes.
pub fn decode_vote(input: &[u8]) -> Result<QuorumVote, WireError> {
    let d = crate::bt::decode_payload(input)?;

    let version = dict_u8(&d, "v")?;
    let vote_type = VoteType::from_u8(dict_u8(&d, "t")?).ok_or(WireError::InvalidValue {
        field: "t",
        reason: "unknown vote type",
    })?;
    let height = dict_u64(&d, "h")?;
    let group = VoteGroup::from_u8(dict_u8(&d, "g")?).ok_or(WireError::InvalidValue {
        field: "g",
        reason: "invalid vote group",
    })?;
    let index_in_group = dict_u16(&d, "i")?;
    let signature =
        Signature::from_slice(dict_bytes(&d, "s")?).ok_or(WireError::InvalidValue {
            field: "s",
            reason: "signature must be 64 bytes",
        })?;

    let payload = match vote_type {
        VoteType::Checkpointing => {
            let block_hash =
                BlockHash::from_slice(dict_bytes(&d, "bh")?).ok_or(WireError::InvalidValue {
                    field: "bh",
                    reason: "block hash must be 32 bytes",
                })?;
            VotePayload::Checkpoint { block_hash }
        }
        VoteType::Obligations => {
            let worker_index = dict_u16(&d, "wi")?;
            let state =
                StateChange::from_u8(dict_u8(&d, "sc")?).ok_or(WireError::InvalidValue {
                    field: "sc",
                    reason: "unknown state change",
                })?;
            VotePayload::StateChange {
                worker_index,
                state,
            }
        }
    };

    Ok(QuorumVote {
        version,
        vote_type,
        height,
        group,
        index_in_group,
        signature,
        payload,
    })
}
