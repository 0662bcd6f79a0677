//!
//! Covered components and their canonical signing string lines
//!

use crate::{Error, Result, SignRequest};
use http::Uri;

/// Method used when the request doesn't specify one
const DEFAULT_METHOD: &str = "get";

/// Component of the signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component<'a> {
    /// Request line (`<method> <path> <version>`)
    RequestLine,

    /// Request target (`(request-target): <method> <path>`)
    RequestTarget,

    /// Header of the request, in the casing it was requested with
    Header(&'a str),
}

impl<'a> Component<'a> {
    /// Parse a component from its name. Anything that isn't a pseudo-header is a header name
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw {
            "request-line" => Self::RequestLine,
            "(request-target)" => Self::RequestTarget,
            header => Self::Header(header),
        }
    }

    /// Name of the component as it appears in the `headers` field
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::RequestLine => "request-line",
            Self::RequestTarget => "(request-target)",
            Self::Header(header) => header,
        }
    }

    /// Resolve the component into its line of the signing string
    pub fn resolve<K>(&self, request: &SignRequest<'_, K>) -> Result<String> {
        let line = match self {
            Self::RequestLine => {
                let url = request.url.ok_or(Error::MissingContext("url"))?;
                let http_version = request
                    .http_version
                    .ok_or(Error::MissingContext("http version"))?;

                format!("{} {} {http_version}", method(request), path(url)?)
            }
            Self::RequestTarget => {
                let url = request.url.ok_or(Error::MissingContext("url"))?;
                format!("(request-target): {} {}", method(request), path(url)?)
            }
            Self::Header(name) => {
                let headers = request.headers.ok_or(Error::MissingContext("headers"))?;
                let value = headers
                    .get(*name)
                    .ok_or_else(|| Error::HeaderNotFound((*name).to_owned()))?;
                let value = std::str::from_utf8(value.as_bytes())?;

                format!("{name}: {value}")
            }
        };

        Ok(line)
    }
}

#[inline]
fn method<K>(request: &SignRequest<'_, K>) -> String {
    request.method.as_ref().map_or_else(
        || DEFAULT_METHOD.to_owned(),
        |method| method.as_str().to_lowercase(),
    )
}

/// Path of the URL, without the query
#[inline]
fn path(url: &str) -> Result<String> {
    let uri: Uri = url.parse()?;
    Ok(uri.path().to_owned())
}

#[cfg(test)]
mod test {
    use super::Component;
    use crate::{Error, SignRequest};
    use http::{HeaderMap, HeaderValue, Method};

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("example.com"));
        headers.insert("x-padded", HeaderValue::from_static("  spaced  value"));
        headers
    }

    #[test]
    fn parse_components() {
        assert_eq!(Component::parse("request-line"), Component::RequestLine);
        assert_eq!(Component::parse("(request-target)"), Component::RequestTarget);
        assert_eq!(Component::parse("Host"), Component::Header("Host"));
        assert_eq!(Component::parse("Host").as_str(), "Host");
    }

    #[test]
    fn request_line() {
        let request = SignRequest::builder()
            .method(Method::PUT)
            .url("https://example.com/foo/bar?q=1")
            .http_version("HTTP/1.1")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::RequestLine.resolve(&request).unwrap();
        assert_eq!(line, "put /foo/bar HTTP/1.1");
    }

    #[test]
    fn request_line_requires_version() {
        let request = SignRequest::builder()
            .url("https://example.com/foo")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::RequestLine.resolve(&request),
            Err(Error::MissingContext(_))
        ));
    }

    #[test]
    fn request_line_requires_url() {
        let request = SignRequest::builder()
            .http_version("HTTP/1.1")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::RequestLine.resolve(&request),
            Err(Error::MissingContext(_))
        ));
    }

    #[test]
    fn request_target_requires_url() {
        let request = SignRequest::builder()
            .method(Method::POST)
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::RequestTarget.resolve(&request),
            Err(Error::MissingContext("url"))
        ));
    }

    #[test]
    fn request_target_defaults_to_get() {
        let request = SignRequest::builder()
            .url("https://example.com/inbox")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::RequestTarget.resolve(&request).unwrap();
        assert_eq!(line, "(request-target): get /inbox");
    }

    #[test]
    fn request_target_of_bare_origin() {
        let request = SignRequest::builder()
            .method(Method::POST)
            .url("https://example.com")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::RequestTarget.resolve(&request).unwrap();
        assert_eq!(line, "(request-target): post /");
    }

    #[test]
    fn invalid_url() {
        let request = SignRequest::builder()
            .url("https://exa mple.com/")
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::RequestTarget.resolve(&request),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn header_keeps_requested_casing() {
        let headers = headers();
        let request = SignRequest::builder()
            .headers(&headers)
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::Header("Host").resolve(&request).unwrap();
        assert_eq!(line, "Host: example.com");
    }

    #[test]
    fn header_value_is_verbatim() {
        let headers = headers();
        let request = SignRequest::builder()
            .headers(&headers)
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::Header("x-padded").resolve(&request).unwrap();
        assert_eq!(line, "x-padded:   spaced  value");
    }

    #[test]
    fn header_value_beyond_ascii() {
        let mut headers = headers();
        headers.insert("x-name", HeaderValue::from_bytes("café".as_bytes()).unwrap());
        headers.insert("x-binary", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        let request = SignRequest::builder()
            .headers(&headers)
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        let line = Component::Header("x-name").resolve(&request).unwrap();
        assert_eq!(line, "x-name: café");

        assert!(matches!(
            Component::Header("x-binary").resolve(&request),
            Err(Error::InvalidHeaderValue(_))
        ));
    }

    #[test]
    fn header_not_found() {
        let headers = headers();
        let request = SignRequest::builder()
            .headers(&headers)
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::Header("date").resolve(&request),
            Err(Error::HeaderNotFound(ref name)) if name == "date"
        ));
    }

    #[test]
    fn header_without_header_map() {
        let request = SignRequest::builder()
            .key_id("Test")
            .key(())
            .build()
            .unwrap();

        assert!(matches!(
            Component::Header("host").resolve(&request),
            Err(Error::MissingContext(_))
        ));
    }
}
