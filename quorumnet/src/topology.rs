//! Intra-quorum relay topology.
//!
//! Each quorum member relays to the members at power-of-two offsets from its
//! own position: `p+1, p+2, p+4, …` modulo the quorum size. Any relayed
//! message therefore reaches every member in O(log n) hops even when some
//! links are down, without anyone maintaining a full mesh.
//!
//! `incoming_links` is the exact mirror: `q` appears in
//! `outgoing_links(p, n)` if and only if `p` appears in
//! `incoming_links(q, n)`.

/// Positions this member pushes messages to (connecting if necessary).
pub fn outgoing_links(position: usize, size: usize) -> Vec<usize> {
    offsets(size)
        .map(|offset| (position + offset) % size)
        .collect()
}

/// Positions this member expects pushes from. Used for opportunistic
/// relaying back along already-open connections.
pub fn incoming_links(position: usize, size: usize) -> Vec<usize> {
    offsets(size)
        .map(|offset| (position + size - offset) % size)
        .collect()
}

/// Power-of-two offsets strictly inside the quorum: 1, 2, 4, … < size.
/// Distinct modulo `size`, and never 0, so a member never links to itself.
fn offsets(size: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(1usize), |o| o.checked_mul(2)).take_while(move |o| *o < size)
}
