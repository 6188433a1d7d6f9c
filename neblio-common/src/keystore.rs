//! Key presence interface
//!
//! The staking code only needs to know whether the wallet can sign for a
//! key and, for pay-to-pubkey-hash kernels, which public key hides behind the
//! hash. Private keys never cross this boundary.

use bitcoin::{PubkeyHash, PublicKey};
use std::collections::HashMap;

/// Read-only view of the wallet's signing keys
pub trait KeyStore {
    /// Does the wallet hold the private key for this key hash?
    fn have_key(&self, hash: &PubkeyHash) -> bool;

    /// Public key for a key hash, if the wallet holds it
    fn get_pub_key(&self, hash: &PubkeyHash) -> Option<PublicKey>;
}

/// In-memory key store holding public keys of keys the wallet can sign with
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<PubkeyHash, PublicKey>,
}

impl MemoryKeyStore {
    /// Create an empty key store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key the wallet can sign with
    ///
    /// # Returns
    /// * true if the key was added, false if it was already present
    pub fn add_key(&mut self, key: PublicKey) -> bool {
        self.keys.insert(key.pubkey_hash(), key).is_none()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyStore for MemoryKeyStore {
    fn have_key(&self, hash: &PubkeyHash) -> bool {
        self.keys.contains_key(hash)
    }

    fn get_pub_key(&self, hash: &PubkeyHash) -> Option<PublicKey> {
        self.keys.get(hash).copied()
    }
}

impl FromIterator<PublicKey> for MemoryKeyStore {
    fn from_iter<I: IntoIterator<Item = PublicKey>>(iter: I) -> Self {
        let mut store = Self::new();
        for key in iter {
            store.add_key(key);
        }
        store
    }
}
