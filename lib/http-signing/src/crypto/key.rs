use super::KeyPair;
use crate::algorithm::KeyAlgorithm;
use ring::signature::{Ed25519KeyPair, RsaKeyPair};
use std::sync::Arc;

/// Enum dispatch over the private keys `ring` can sign with
#[derive(Clone)]
#[non_exhaustive]
pub enum PrivateKey {
    /// Ed25519
    Ed25519(Arc<Ed25519KeyPair>),

    /// RSA
    Rsa(Arc<RsaKeyPair>),
}

impl From<Ed25519KeyPair> for PrivateKey {
    fn from(value: Ed25519KeyPair) -> Self {
        Self::Ed25519(Arc::new(value))
    }
}

impl From<RsaKeyPair> for PrivateKey {
    fn from(value: RsaKeyPair) -> Self {
        Self::Rsa(Arc::new(value))
    }
}

/// Private key paired with the algorithm it was declared for
#[derive(Clone)]
pub struct RingKeyPair {
    private_key: PrivateKey,
    algorithm: KeyAlgorithm,
}

impl RingKeyPair {
    /// Pair the private key with its algorithm metadata
    #[must_use]
    pub fn new(private_key: impl Into<PrivateKey>, algorithm: KeyAlgorithm) -> Self {
        Self {
            private_key: private_key.into(),
            algorithm,
        }
    }
}

impl KeyPair for RingKeyPair {
    type PrivateKey = PrivateKey;

    fn private_key(&self) -> &Self::PrivateKey {
        &self.private_key
    }

    fn algorithm(&self) -> &KeyAlgorithm {
        &self.algorithm
    }
}
