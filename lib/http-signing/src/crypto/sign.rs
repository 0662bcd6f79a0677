use super::{PrivateKey, SigningCapability};
use crate::algorithm::KeyAlgorithm;
use miette::Diagnostic;
use ring::{
    rand::SystemRandom,
    signature::{
        RsaEncoding, RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512, RSA_PSS_SHA256,
        RSA_PSS_SHA384, RSA_PSS_SHA512,
    },
};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::{future::Future, sync::LazyLock};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, debug_span, Instrument};

static POOL: LazyLock<Result<ThreadPool, ThreadPoolBuildError>> = LazyLock::new(|| {
    ThreadPoolBuilder::new()
        .thread_name(|idx| format!("ring-signer-{idx}"))
        .build()
});

/// Signing error
#[derive(Debug, Diagnostic, Error)]
pub enum SignError {
    /// Signing thread went away without sending back a result
    #[error(transparent)]
    Blocking(#[from] oneshot::error::RecvError),

    /// Private key belongs to a different family than the algorithm
    #[error("Private key doesn't match the key algorithm")]
    KeyMismatch,

    /// Salt length can't be honoured
    #[error("Unsupported salt length {salt_length} (ring uses {digest_len} bytes)")]
    SaltLength {
        /// Requested salt length
        salt_length: usize,

        /// Length of the digest, which ring uses as the salt length
        digest_len: usize,
    },

    /// Signing thread pool couldn't be started
    #[error("Failed to build the signing thread pool")]
    ThreadPool,

    /// Signing failed inside of ring
    #[error(transparent)]
    Unspecified(#[from] ring::error::Unspecified),

    /// Key algorithm metadata doesn't map onto a ring algorithm
    #[error("Unsupported key algorithm {0:?}")]
    UnsupportedAlgorithm(KeyAlgorithm),
}

#[derive(Clone, Copy, Debug)]
enum RsaPadding {
    Pkcs1Sha256,
    Pkcs1Sha384,
    Pkcs1Sha512,
    PssSha256,
    PssSha384,
    PssSha512,
}

impl RsaPadding {
    fn encoding(self) -> &'static dyn RsaEncoding {
        match self {
            Self::Pkcs1Sha256 => &RSA_PKCS1_SHA256,
            Self::Pkcs1Sha384 => &RSA_PKCS1_SHA384,
            Self::Pkcs1Sha512 => &RSA_PKCS1_SHA512,
            Self::PssSha256 => &RSA_PSS_SHA256,
            Self::PssSha384 => &RSA_PSS_SHA384,
            Self::PssSha512 => &RSA_PSS_SHA512,
        }
    }

    /// ring always salts PSS signatures with as many bytes as the digest has
    fn salt_length(self) -> Option<usize> {
        match self {
            Self::Pkcs1Sha256 | Self::Pkcs1Sha384 | Self::Pkcs1Sha512 => None,
            Self::PssSha256 => Some(32),
            Self::PssSha384 => Some(48),
            Self::PssSha512 => Some(64),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Scheme {
    Ed25519,
    Rsa(RsaPadding),
}

impl Scheme {
    fn resolve(algorithm: &KeyAlgorithm, salt_length: usize) -> Result<Self, SignError> {
        let padding = match (&*algorithm.name, algorithm.hash.as_deref()) {
            ("Ed25519", None) => return Ok(Self::Ed25519),
            ("RSASSA-PKCS1-v1_5", Some("SHA-256")) => RsaPadding::Pkcs1Sha256,
            ("RSASSA-PKCS1-v1_5", Some("SHA-384")) => RsaPadding::Pkcs1Sha384,
            ("RSASSA-PKCS1-v1_5", Some("SHA-512")) => RsaPadding::Pkcs1Sha512,
            ("RSA-PSS", Some("SHA-256")) => RsaPadding::PssSha256,
            ("RSA-PSS", Some("SHA-384")) => RsaPadding::PssSha384,
            ("RSA-PSS", Some("SHA-512")) => RsaPadding::PssSha512,
            _ => return Err(SignError::UnsupportedAlgorithm(algorithm.clone())),
        };

        if let Some(digest_len) = padding.salt_length() {
            if salt_length != 0 && salt_length != digest_len {
                return Err(SignError::SaltLength {
                    salt_length,
                    digest_len,
                });
            }
        }

        Ok(Self::Rsa(padding))
    }

    fn sign(self, key: &PrivateKey, msg: &[u8]) -> Result<Vec<u8>, SignError> {
        match (self, key) {
            (Self::Ed25519, PrivateKey::Ed25519(key)) => Ok(key.sign(msg).as_ref().to_vec()),
            (Self::Rsa(padding), PrivateKey::Rsa(key)) => {
                let mut buf = vec![0; key.public().modulus_len()];
                key.sign(padding.encoding(), &SystemRandom::new(), msg, &mut buf)?;

                Ok(buf)
            }
            _ => Err(SignError::KeyMismatch),
        }
    }
}

async fn run_blocking<F, O>(func: F) -> Result<O, SignError>
where
    F: FnOnce() -> O + Send + 'static,
    O: Send + 'static,
{
    let pool = POOL.as_ref().map_err(|_| SignError::ThreadPool)?;
    let (sender, receiver) = oneshot::channel();

    pool.spawn(move || {
        if sender.send(func()).is_err() {
            debug!("signature receiver dropped before completion");
        }
    });

    Ok(receiver.await?)
}

/// Signing capability backed by `ring`
///
/// Supports `RSASSA-PKCS1-v1_5` and `RSA-PSS` with SHA-256/384/512, and Ed25519.
/// The signature gets created on a dedicated `rayon` pool, so any executor can drive the future.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingSigner;

impl SigningCapability<PrivateKey> for RingSigner {
    type Error = SignError;

    fn sign(
        &self,
        algorithm: &KeyAlgorithm,
        private_key: &PrivateKey,
        msg: &[u8],
        salt_length: usize,
    ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        let span = debug_span!("ring_sign", algorithm = %algorithm.name);
        let scheme = Scheme::resolve(algorithm, salt_length);
        let private_key = private_key.clone();
        let msg = msg.to_vec();

        async move {
            let scheme = scheme?;
            let signature = run_blocking(move || scheme.sign(&private_key, &msg)).await??;
            debug!(len = signature.len(), "created signature");

            Ok::<_, SignError>(signature)
        }
        .instrument(span)
    }
}

#[cfg(test)]
mod test {
    use super::{Scheme, SignError};
    use crate::algorithm::KeyAlgorithm;

    #[test]
    fn pss_salt_length() {
        assert!(Scheme::resolve(&KeyAlgorithm::RSA_PSS_SHA256, 0).is_ok());
        assert!(Scheme::resolve(&KeyAlgorithm::RSA_PSS_SHA256, 32).is_ok());
        assert!(matches!(
            Scheme::resolve(&KeyAlgorithm::RSA_PSS_SHA256, 20),
            Err(SignError::SaltLength {
                salt_length: 20,
                digest_len: 32
            })
        ));
    }

    #[test]
    fn pkcs1_ignores_salt_length() {
        assert!(Scheme::resolve(&KeyAlgorithm::RSASSA_PKCS1_V1_5_SHA512, 20).is_ok());
    }

    #[test]
    fn unknown_metadata() {
        let algorithm = KeyAlgorithm::from_static("ECDSA", Some("SHA-256"));
        assert!(matches!(
            Scheme::resolve(&algorithm, 0),
            Err(SignError::UnsupportedAlgorithm(_))
        ));
    }
}
