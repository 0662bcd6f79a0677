use crate::{
    algorithm::Algorithm,
    crypto::{KeyPair, SigningCapability},
    header::{self, SignatureHeader},
    signature_string, Error, Result,
};
use derive_builder::Builder;
use http::{HeaderMap, Method};
use tracing::{debug, instrument};

/// Everything needed to sign one request
///
/// All fields are borrowed from the caller and stay untouched while signing
#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct SignRequest<'a, K> {
    /// HTTP method. Treated as `get` if absent
    #[builder(default, setter(strip_option))]
    pub method: Option<Method>,

    /// Absolute URL of the request
    #[builder(default, setter(strip_option))]
    pub url: Option<&'a str>,

    /// HTTP version token (`HTTP/1.1` etc.)
    #[builder(default, setter(strip_option))]
    pub http_version: Option<&'a str>,

    /// Headers of the request
    #[builder(default, setter(strip_option))]
    pub headers: Option<&'a HeaderMap>,

    /// Identifier of the key, echoed into the signature header
    pub key_id: &'a str,

    /// Key pair the signature is created with
    pub key: K,

    /// Explicit algorithm identifier. Derived from the key if absent
    #[builder(default, setter(strip_option))]
    pub algorithm: Option<&'a str>,

    /// Salt length for padding schemes that take one
    #[builder(default)]
    pub salt_length: usize,

    /// Covered components, in signing order
    #[builder(default, setter(each(name = "include_component")))]
    pub include: Vec<&'a str>,
}

impl<'a, K> SignRequest<'a, K> {
    /// Return a builder for the sign request
    #[must_use]
    pub fn builder() -> SignRequestBuilder<'a, K> {
        SignRequestBuilder::default()
    }
}

/// Sign a request and return the value of its `Signature` header
///
/// Fails before the signing capability gets invoked if the signing string can't be constructed or the algorithm isn't supported
#[instrument(skip_all, fields(key_id = request.key_id))]
pub async fn sign<K, S>(request: &SignRequest<'_, K>, signer: &S) -> Result<String>
where
    K: KeyPair,
    S: SigningCapability<K::PrivateKey>,
{
    let signature_string = signature_string::construct(request)?;
    let algorithm = Algorithm::resolve(request.algorithm, request.key.algorithm())?;
    debug!(%algorithm, components = request.include.len(), "constructed signing string");

    let signature = signer
        .sign(
            request.key.algorithm(),
            request.key.private_key(),
            signature_string.as_bytes(),
            request.salt_length,
        )
        .await
        .map_err(|err| Error::SigningFailed(err.into()))?;
    let signature = base64_simd::STANDARD.encode_to_string(signature);

    let signature_header = SignatureHeader {
        key_id: request.key_id,
        algorithm: Some(algorithm.as_str()),
        headers: request.include.iter().copied(),
        signature: signature.as_str(),
    };

    Ok(header::serialise(signature_header))
}
