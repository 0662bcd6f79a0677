use clap::{Args, Parser, Subcommand, ValueEnum};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use http_signing::{algorithm::KeyAlgorithm, SignRequest, SignRequestBuilder};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
pub enum KeyType {
    /// RSASSA-PKCS1-v1_5
    Pkcs1,

    /// RSA-PSS
    Pss,

    /// Ed25519 (requires an explicit algorithm)
    Ed25519,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| "expected a header in the form of `Name: value`".to_string())?;

    let name = HeaderName::try_from(name.trim()).map_err(|err| err.to_string())?;
    let value = HeaderValue::try_from(value.trim()).map_err(|err| err.to_string())?;

    Ok((name, value))
}

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method of the request (defaults to GET)
    #[arg(long, short = 'X')]
    pub method: Option<Method>,

    /// Absolute URL of the request
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP version of the request (e.g. "HTTP/1.1")
    #[arg(long)]
    pub http_version: Option<String>,

    /// Header of the request in the form of `Name: value`. Can be repeated
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,

    /// Component to cover. Can be repeated, the order is kept
    #[arg(long = "include", short)]
    pub include: Vec<String>,
}

impl RequestArgs {
    pub fn header_map(&self) -> Option<HeaderMap> {
        (!self.headers.is_empty()).then(|| self.headers.iter().cloned().collect())
    }

    pub fn request_builder<'a, K>(
        &'a self,
        headers: Option<&'a HeaderMap>,
    ) -> SignRequestBuilder<'a, K> {
        let mut builder =
            SignRequest::builder().include(self.include.iter().map(String::as_str).collect());

        if let Some(method) = self.method.clone() {
            builder = builder.method(method);
        }
        if let Some(url) = self.url.as_deref() {
            builder = builder.url(url);
        }
        if let Some(http_version) = self.http_version.as_deref() {
            builder = builder.http_version(http_version);
        }
        if let Some(headers) = headers {
            builder = builder.headers(headers);
        }

        builder
    }
}

#[derive(Args)]
pub struct SignArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Identifier of the key
    #[arg(long)]
    pub key_id: String,

    /// Path to the PKCS#8 PEM encoded private key
    #[arg(long)]
    pub private_key: PathBuf,

    /// Algorithm the key is meant for
    #[arg(default_value_t = KeyType::Pkcs1, long, value_enum)]
    pub key_type: KeyType,

    /// Hash the key is meant for
    #[arg(default_value_t = HashAlgorithm::Sha256, long, value_enum)]
    pub hash: HashAlgorithm,

    /// Announce this algorithm instead of deriving it from the key
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Salt length for RSA-PSS
    #[arg(default_value_t = 0, long)]
    pub salt_length: usize,
}

impl SignArgs {
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self.key_type {
            KeyType::Pkcs1 => {
                KeyAlgorithm::new("RSASSA-PKCS1-v1_5").with_hash(self.hash.as_str())
            }
            KeyType::Pss => KeyAlgorithm::new("RSA-PSS").with_hash(self.hash.as_str()),
            KeyType::Ed25519 => KeyAlgorithm::ED25519,
        }
    }
}

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the HTTP Signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Sign a request and print the value of its Signature header
    Sign(SignArgs),

    /// Print the signing string of a request
    SigningString(RequestArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
