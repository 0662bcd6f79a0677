//!
//! Signature algorithm identifiers and their derivation from key metadata
//!

use crate::{Error, Result};
use std::{borrow::Cow, fmt, str::FromStr};

/// Algorithm identifiers accepted in the `algorithm` field of the signature header
pub const SUPPORTED_ALGORITHMS: &[&str] = &["rsa-sha256", "rsa-sha384", "rsa-sha512"];

/// Signature algorithm announced in the signature header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// RSA with SHA-256
    RsaSha256,

    /// RSA with SHA-384
    RsaSha384,

    /// RSA with SHA-512
    RsaSha512,
}

impl Algorithm {
    /// Cavage name of the algorithm
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RsaSha256 => "rsa-sha256",
            Self::RsaSha384 => "rsa-sha384",
            Self::RsaSha512 => "rsa-sha512",
        }
    }

    /// Resolve the algorithm to announce
    ///
    /// An explicit override wins. Otherwise the name is derived from the key metadata.
    /// Both paths have to land inside of [`SUPPORTED_ALGORITHMS`].
    pub fn resolve(r#override: Option<&str>, key_algorithm: &KeyAlgorithm) -> Result<Self> {
        match r#override {
            Some(algorithm) => algorithm.parse(),
            None => key_algorithm.signature_algorithm_name()?.parse(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let algorithm = match s {
            "rsa-sha256" => Self::RsaSha256,
            "rsa-sha384" => Self::RsaSha384,
            "rsa-sha512" => Self::RsaSha512,
            other => {
                return Err(Error::UnsupportedAlgorithm {
                    algorithm: other.to_owned(),
                })
            }
        };

        Ok(algorithm)
    }
}

/// Declared algorithm metadata of a key pair
///
/// Uses the WebCrypto naming (`RSASSA-PKCS1-v1_5`, `RSA-PSS`, `SHA-256`, ..).
/// This is also the identifier the signing capability receives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyAlgorithm {
    /// Name of the key algorithm
    pub name: Cow<'static, str>,

    /// Name of the associated hash, if the key type has one
    pub hash: Option<Cow<'static, str>>,
}

impl KeyAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256
    pub const RSASSA_PKCS1_V1_5_SHA256: Self =
        Self::from_static("RSASSA-PKCS1-v1_5", Some("SHA-256"));

    /// RSASSA-PKCS1-v1_5 with SHA-384
    pub const RSASSA_PKCS1_V1_5_SHA384: Self =
        Self::from_static("RSASSA-PKCS1-v1_5", Some("SHA-384"));

    /// RSASSA-PKCS1-v1_5 with SHA-512
    pub const RSASSA_PKCS1_V1_5_SHA512: Self =
        Self::from_static("RSASSA-PKCS1-v1_5", Some("SHA-512"));

    /// RSA-PSS with SHA-256
    pub const RSA_PSS_SHA256: Self = Self::from_static("RSA-PSS", Some("SHA-256"));

    /// RSA-PSS with SHA-384
    pub const RSA_PSS_SHA384: Self = Self::from_static("RSA-PSS", Some("SHA-384"));

    /// RSA-PSS with SHA-512
    pub const RSA_PSS_SHA512: Self = Self::from_static("RSA-PSS", Some("SHA-512"));

    /// Ed25519. Carries no hash
    pub const ED25519: Self = Self::from_static("Ed25519", None);

    /// Construct key metadata from static strings
    #[must_use]
    pub const fn from_static(name: &'static str, hash: Option<&'static str>) -> Self {
        let hash = match hash {
            Some(hash) => Some(Cow::Borrowed(hash)),
            None => None,
        };

        Self {
            name: Cow::Borrowed(name),
            hash,
        }
    }

    /// Construct key metadata without a hash
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            hash: None,
        }
    }

    /// Attach a hash to the key metadata
    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<Cow<'static, str>>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Derive the cavage algorithm name (`rsa-sha256` etc.) from the metadata
    ///
    /// The first hyphen-delimited token of the key algorithm names the signature type.
    /// The "SSA" (signature scheme with appendix) suffix is dropped from it, so `RSASSA-PKCS1-v1_5` and `RSA-PSS` both yield `RSA`.
    /// The hash loses its hyphens (`SHA-256` -> `SHA256`), and both parts are joined and lower-cased.
    ///
    /// The result isn't validated against [`SUPPORTED_ALGORITHMS`] here.
    pub fn signature_algorithm_name(&self) -> Result<String> {
        let hash = self.hash.as_deref().ok_or(Error::InvalidAlgorithm)?;

        let signature_type = self.name.split('-').next().unwrap_or_default();
        let signature_type = signature_type
            .strip_suffix("SSA")
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(signature_type);

        let hash = hash.replace('-', "");

        Ok(format!("{signature_type}-{hash}").to_lowercase())
    }
}

#[cfg(test)]
mod test {
    use super::{Algorithm, KeyAlgorithm, SUPPORTED_ALGORITHMS};
    use crate::Error;

    #[test]
    fn derive_pkcs1() {
        let name = KeyAlgorithm::RSASSA_PKCS1_V1_5_SHA256
            .signature_algorithm_name()
            .unwrap();

        assert_eq!(name, "rsa-sha256");
    }

    #[test]
    fn derive_pss() {
        let name = KeyAlgorithm::RSA_PSS_SHA512
            .signature_algorithm_name()
            .unwrap();

        assert_eq!(name, "rsa-sha512");
    }

    #[test]
    fn derive_from_owned_metadata() {
        let key_algorithm = KeyAlgorithm::new(String::from("RSASSA-PKCS1-v1_5")).with_hash("SHA-384");
        assert_eq!(
            key_algorithm.signature_algorithm_name().unwrap(),
            "rsa-sha384"
        );
    }

    #[test]
    fn derive_without_hash() {
        assert!(matches!(
            KeyAlgorithm::ED25519.signature_algorithm_name(),
            Err(Error::InvalidAlgorithm)
        ));
    }

    #[test]
    fn derived_names_outside_the_set_are_rejected() {
        let key_algorithm = KeyAlgorithm::from_static("ECDSA", Some("SHA-256"));
        let err = Algorithm::resolve(None, &key_algorithm).unwrap_err();

        assert!(matches!(
            err,
            Error::UnsupportedAlgorithm { ref algorithm } if algorithm == "ecdsa-sha256"
        ));
    }

    #[test]
    fn override_takes_precedence() {
        let algorithm =
            Algorithm::resolve(Some("rsa-sha512"), &KeyAlgorithm::RSASSA_PKCS1_V1_5_SHA256)
                .unwrap();

        assert_eq!(algorithm, Algorithm::RsaSha512);
    }

    #[test]
    fn override_skips_derivation() {
        let algorithm = Algorithm::resolve(Some("rsa-sha256"), &KeyAlgorithm::ED25519).unwrap();
        assert_eq!(algorithm, Algorithm::RsaSha256);
    }

    #[test]
    fn unsupported_override() {
        let err = Algorithm::resolve(Some("rsa-md5"), &KeyAlgorithm::RSASSA_PKCS1_V1_5_SHA256)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unsupported algorithm \"rsa-md5\". Valid algorithms: rsa-sha256, rsa-sha384, rsa-sha512"
        );
    }

    #[test]
    fn names_round_trip_through_the_supported_set() {
        for name in SUPPORTED_ALGORITHMS {
            let algorithm: Algorithm = name.parse().unwrap();
            assert_eq!(algorithm.as_str(), *name);
        }
    }
}
