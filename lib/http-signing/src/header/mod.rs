//!
//! The `Signature` header envelope
//!

mod parse;
mod serialise;

pub use self::parse::{parse, ParseError};
pub use self::serialise::serialise;

/// Authentication scheme token leading the header value
pub const SCHEME: &str = "Signature";

/// Fields of the `Signature` header
#[derive(Clone)]
pub struct SignatureHeader<'a, I> {
    /// Identifier of the key the signature was created with
    pub key_id: &'a str,

    /// Announced signature algorithm
    pub algorithm: Option<&'a str>,

    /// Covered components, in signing order
    pub headers: I,

    /// Base64-encoded signature
    pub signature: &'a str,
}
