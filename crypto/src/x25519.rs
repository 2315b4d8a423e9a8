//! X25519 transport identity keys.
//!
//! Service nodes are addressed on the quorum network by an X25519 public key
//! (the transport layer encrypts to it). The quorum core itself never does
//! key exchange; it only needs to mint identities and publish the public
//! half through the registry.

use strobe_types::X25519PublicKey;
use x25519_dalek::{PublicKey as DalekPublic, StaticSecret};

/// An X25519 static key pair used as a node's transport identity.
pub struct X25519KeyPair {
    pub public: X25519PublicKey,
    secret: StaticSecret,
}

impl X25519KeyPair {
    /// Generate a fresh transport identity.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(rand::rngs::OsRng);
        let public = X25519PublicKey(DalekPublic::from(&secret).to_bytes());
        Self { public, secret }
    }

    /// The raw secret bytes, for handing to the transport implementation.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }
}

/// Derive an X25519 key pair deterministically from a 32-byte seed.
pub fn x25519_keypair_from_seed(seed: [u8; 32]) -> X25519KeyPair {
    let secret = StaticSecret::from(seed);
    let public = X25519PublicKey(DalekPublic::from(&secret).to_bytes());
    X25519KeyPair { public, secret }
}
