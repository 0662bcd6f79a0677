use super::{SignatureHeader, SCHEME};
use std::fmt::Write;

/// Serialise the header fields into the value of a `Signature` header
///
/// `Signature keyId=<key id>,algorithm="<algorithm>",headers="<components>",signature="<signature>"`
///
/// The key ID is written unquoted and unescaped.
#[inline]
pub fn serialise<'a, I>(header: SignatureHeader<'_, I>) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut buffer = String::new();

    let _ = write!(buffer, "{SCHEME} keyId={}", header.key_id);

    if let Some(algorithm) = header.algorithm {
        let _ = write!(buffer, ",algorithm=\"{algorithm}\"");
    }

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header.headers, " ") {
        buffer.push_str(item);
    }
    buffer.push('"');

    let _ = write!(buffer, ",signature=\"{}\"", header.signature);

    buffer
}

#[cfg(test)]
mod test {
    use super::serialise;
    use crate::header::SignatureHeader;

    #[test]
    fn serialise_header() {
        let header = SignatureHeader {
            key_id: "Test",
            algorithm: Some("rsa-sha256"),
            headers: ["(request-target)", "host", "date"].into_iter(),
            signature: "3q2+7w==",
        };

        assert_eq!(
            serialise(header),
            r#"Signature keyId=Test,algorithm="rsa-sha256",headers="(request-target) host date",signature="3q2+7w==""#
        );
    }

    #[test]
    fn serialise_without_components() {
        let header = SignatureHeader {
            key_id: "https://example.com/users/test#main-key",
            algorithm: Some("rsa-sha512"),
            headers: std::iter::empty(),
            signature: "",
        };

        assert_eq!(
            serialise(header),
            r#"Signature keyId=https://example.com/users/test#main-key,algorithm="rsa-sha512",headers="",signature="""#
        );
    }
}
