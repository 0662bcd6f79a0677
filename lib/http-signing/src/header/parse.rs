use super::{SignatureHeader, SCHEME};
use logos::{Logos, Span, SpannedIter};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Signature header parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// Field required by the envelope is absent
    #[error("Missing field \"{0}\"")]
    MissingField(&'static str),

    /// Input ended in the middle of a key/value pair
    #[error("Unexpected end of input")]
    #[diagnostic(help("the header has to consist of comma-separated `key=\"value\"` pairs"))]
    UnexpectedEnd,

    /// Token isn't allowed at this position
    #[error("Unexpected token")]
    #[diagnostic(help("the header has to consist of comma-separated `key=\"value\"` pairs"))]
    UnexpectedToken {
        /// Location of the token
        #[label("this token")]
        span: SourceSpan,
    },

    /// Key isn't part of the envelope
    #[error("Unknown field")]
    UnknownField {
        /// Location of the key
        #[label("unknown field")]
        span: SourceSpan,
    },
}

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"\w+", priority = 3)]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    QuotedValue,

    #[regex(r#"[^",=\s]+"#)]
    BareValue,

    #[token(",")]
    Comma,
}

macro_rules! ensure {
    ($self:expr, $token:expr, $pattern:pat) => {{
        let Some((ty, span)) = $token else {
            $self.is_broken = true;
            return Some(Err(ParseError::UnexpectedEnd));
        };

        if !matches!(ty, Ok($pattern)) {
            $self.is_broken = true;
            return Some(Err(ParseError::UnexpectedToken {
                span: $self.source_span(&span),
            }));
        }

        span
    }};
}

struct ParseIter<'a> {
    /// Stream of tokens and their locations
    inner: SpannedIter<'a, TokenTy>,

    /// Reference to the input that was fed to the lexer
    input: &'a str,

    /// Offset of the lexer input inside of the original header value
    offset: usize,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl ParseIter<'_> {
    fn source_span(&self, span: &Span) -> SourceSpan {
        (self.offset + span.start, span.len()).into()
    }
}

impl<'a> Iterator for ParseIter<'a> {
    type Item = Result<(&'a str, SourceSpan, &'a str), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let first = self.inner.next()?;
        let key = ensure!(self, Some(first), TokenTy::Key);
        ensure!(self, self.inner.next(), TokenTy::Equals);
        let value = ensure!(
            self,
            self.inner.next(),
            TokenTy::QuotedValue | TokenTy::BareValue | TokenTy::Key
        );

        if let Some(next) = self.inner.next() {
            ensure!(self, Some(next), TokenTy::Comma);
        }

        let key_span = self.source_span(&key);
        let key = &self.input[key];
        let value = self.input[value].trim_matches('"');

        Some(Ok((key, key_span, value)))
    }
}

/// Parse a `Signature` header value into its fields
///
/// Accepts the output of [`serialise`](super::serialise) as well as the fully quoted form without the leading scheme token
///
/// Unquoted values end at the first `,`, `=` or whitespace. A key ID containing any of these only
/// parses back if it's quoted, which [`serialise`](super::serialise) never does.
#[inline]
pub fn parse(
    input: &str,
) -> Result<SignatureHeader<'_, impl Iterator<Item = &str> + Clone>, ParseError> {
    let (offset, fields) = input
        .strip_prefix(SCHEME)
        .and_then(|rest| rest.strip_prefix(' '))
        .map_or((0, input), |rest| (input.len() - rest.len(), rest));

    let kv_iter = ParseIter {
        inner: TokenTy::lexer(fields).spanned(),
        input: fields,
        offset,
        is_broken: false,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for kv in kv_iter {
        let (key, span, value) = kv?;

        match key {
            "keyId" => key_id = Some(value),
            "algorithm" => algorithm = Some(value),
            "headers" => headers = Some(value.split_whitespace()),
            "signature" => signature = Some(value),
            _ => return Err(ParseError::UnknownField { span }),
        }
    }

    Ok(SignatureHeader {
        key_id: key_id.ok_or(ParseError::MissingField("keyId"))?,
        algorithm,
        headers: headers.ok_or(ParseError::MissingField("headers"))?,
        signature: signature.ok_or(ParseError::MissingField("signature"))?,
    })
}
