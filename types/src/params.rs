//! Blink protocol constants.
//!
//! These values are part of the wire contract: every service node must agree
//! on them or quorum checksums (and therefore blink exchanges) will fail.

/// Number of subquorums covering a blink authorization height (Q and Q').
pub const NUM_BLINK_SUBQUORUMS: u8 = 2;

/// Maximum validators per blink subquorum.
pub const BLINK_SUBQUORUM_SIZE: usize = 10;

/// Approval signatures required in *each* subquorum for a blink to be
/// accepted.
pub const BLINK_MIN_VOTES: usize = 7;

/// Blink quorums rotate every this many heights: the base subquorum is
/// selected at the authorization height rounded down to this interval, the
/// next subquorum one interval later.
pub const BLINK_QUORUM_INTERVAL: u64 = 5;

/// A blink submission is accepted only when its authorization height is
/// within this many heights of the local chain tip (in either direction).
pub const BLINK_HEIGHT_WINDOW: u64 = 2;

/// Minimum number of heights the blink store retains before pruning.
/// Must cover the acceptance window so in-flight exchanges survive a sweep.
pub const BLINK_EXPIRY_HEIGHTS: u64 = 5;
