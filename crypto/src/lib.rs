//! Hashing, signing, and key generation for the strobe quorum network.

pub mod hash;
pub mod keys;
pub mod sign;
pub mod x25519;

pub use hash::{blake2b_256, blake2b_256_multi, tx_hash};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
pub use x25519::{x25519_keypair_from_seed, X25519KeyPair};
