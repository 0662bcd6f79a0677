//!
//! Common cryptographic operations
//!
//! The signing primitive is a capability handed into [`sign`](crate::sign).
//! [`RingSigner`] is the implementation backed by `ring`.
//!

use crate::algorithm::KeyAlgorithm;
use std::future::Future;

mod key;
mod sign;

pub mod parse;

pub use self::key::{PrivateKey, RingKeyPair};
pub use self::sign::{RingSigner, SignError};

/// Key pair handle
pub trait KeyPair {
    /// Private half of the key pair, as understood by the signing capability
    type PrivateKey: ?Sized;

    /// Private key to sign with
    fn private_key(&self) -> &Self::PrivateKey;

    /// Declared algorithm metadata of the key pair
    fn algorithm(&self) -> &KeyAlgorithm;
}

impl<K> KeyPair for &K
where
    K: KeyPair + ?Sized,
{
    type PrivateKey = K::PrivateKey;

    #[inline]
    fn private_key(&self) -> &Self::PrivateKey {
        (**self).private_key()
    }

    #[inline]
    fn algorithm(&self) -> &KeyAlgorithm {
        (**self).algorithm()
    }
}

/// Asymmetric signing primitive
pub trait SigningCapability<P>
where
    P: ?Sized,
{
    /// Error the primitive fails with
    type Error: Into<crate::BoxError>;

    /// Sign the message with the private key
    ///
    /// `algorithm` is the algorithm metadata of the key, not the announced cavage name.
    /// `salt_length` only matters for padding schemes that take a salt.
    fn sign(
        &self,
        algorithm: &KeyAlgorithm,
        private_key: &P,
        msg: &[u8],
        salt_length: usize,
    ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}
