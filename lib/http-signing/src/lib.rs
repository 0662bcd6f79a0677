//!
//! Construction of cavage-style HTTP message signatures
//!
//! Builds the signing string out of the covered components of a request, signs it through a
//! pluggable [`crypto::SigningCapability`] and serialises the result into a `Signature` header value.
//!
//! Only asymmetric RSA schemes are emitted (`rsa-sha256`, `rsa-sha384`, `rsa-sha512`)
//!

pub use self::error::Error;
pub use self::sign::{sign, SignRequest, SignRequestBuilder, SignRequestBuilderError};

pub mod algorithm;
pub mod component;
pub mod crypto;
pub mod header;
pub mod signature_string;

mod error;
mod sign;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias defaulting to the crate-wide [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
