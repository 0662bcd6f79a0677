use crate::{algorithm::SUPPORTED_ALGORITHMS, BoxError};
use miette::Diagnostic;
use thiserror::Error;

/// Signing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Header requested as a component isn't present on the request
    #[error("Header \"{0}\" is missing from the request")]
    HeaderNotFound(String),

    /// Key algorithm metadata can't be turned into a signature algorithm (no hash)
    #[error("Key algorithm doesn't declare a hash")]
    #[diagnostic(help("only RSA keys with an associated hash can be used to derive the algorithm"))]
    InvalidAlgorithm,

    /// Header value isn't valid UTF-8
    #[error(transparent)]
    InvalidHeaderValue(#[from] std::str::Utf8Error),

    /// URL of the request failed to parse
    #[error(transparent)]
    InvalidUrl(#[from] http::uri::InvalidUri),

    /// Request field required by a component is absent
    #[error("Missing {0} required by the covered components")]
    MissingContext(&'static str),

    /// Signing capability reported a failure
    #[error("Failed to sign the signing string")]
    SigningFailed(#[source] BoxError),

    /// Algorithm identifier outside of the supported set
    #[error("Unsupported algorithm \"{algorithm}\". Valid algorithms: {supported}", supported = SUPPORTED_ALGORITHMS.join(", "))]
    UnsupportedAlgorithm {
        /// Offending algorithm identifier
        algorithm: String,
    },
}
