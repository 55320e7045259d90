use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

const EXTERNAL_PREFIX: &str = "mp:external";
const QUERY_MARKER: &str = "%3Furl%3Dhttps";
const PATH_MARKER: &str = "/https/";

fn encoded_query_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"%3Furl%3D(https%3A(?:[^%&]|%[0-9A-Fa-f]{2})*)(?:&|$)")
            .expect("invalid encoded query url regex")
    })
}

/// Whether the descriptor points at an image proxied through the external media pipeline.
pub fn is_external_descriptor(descriptor: &str) -> bool {
    descriptor.starts_with(EXTERNAL_PREFIX)
}

/// Extract and percent-decode the target URL carried in an encoded `?url=https...` query.
///
/// The encoded value runs from the marker up to the next `&` or the end of the descriptor.
/// Returns `None` when the marker is missing, the pattern does not match, any `%` in the
/// captured value is not followed by two hex digits, or the decoded bytes are not UTF-8.
pub fn decode_query_url(descriptor: &str) -> Option<String> {
    if !descriptor.contains(QUERY_MARKER) {
        return None;
    }

    let encoded = encoded_query_url().captures(descriptor)?.get(1)?.as_str();
    urlencoding::decode(encoded).ok().map(Cow::into_owned)
}

/// Rebuild a URL whose scheme separator was flattened into a `/https/` path segment.
///
/// Only the first occurrence of the segment is used; any later `/https/` is kept verbatim.
pub fn unflatten_path_url(descriptor: &str) -> Option<String> {
    descriptor
        .split_once(PATH_MARKER)
        .map(|(_, rest)| format!("https://{rest}"))
}

#[cfg(test)]
mod tests {
    use super::{decode_query_url, is_external_descriptor, unflatten_path_url};

    #[test]
    fn recognises_external_prefix() {
        assert!(is_external_descriptor("mp:external/abc/https/example.com/a.png"));
        assert!(!is_external_descriptor("spotify:abc"));
        assert!(!is_external_descriptor("MP:EXTERNAL/abc"));
    }

    #[test]
    fn decodes_query_url_up_to_ampersand() {
        let descriptor =
            "mp:external/abc/https/media.example/proxy%3Furl%3Dhttps%3A%2F%2Fimg.example%2Fa.png&width=80";
        assert_eq!(
            decode_query_url(descriptor).as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[test]
    fn query_marker_without_encoded_scheme_is_a_miss() {
        assert_eq!(decode_query_url("mp:external/x%3Furl%3Dhttps//plain"), None);
        assert_eq!(decode_query_url("mp:external/x/https/plain.example/a.png"), None);
    }

    #[test]
    fn invalid_percent_encoding_is_a_miss() {
        assert_eq!(
            decode_query_url("mp:external/x%3Furl%3Dhttps%3A%2F%2Fbad%FF%FE.png"),
            None
        );
        assert_eq!(
            decode_query_url("mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa%ZZ.png"),
            None
        );
        assert_eq!(
            decode_query_url("mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa%.png"),
            None
        );
        assert_eq!(
            decode_query_url("mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa.png%"),
            None
        );
        assert_eq!(
            decode_query_url("mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa%ZZ.png&w=1"),
            None
        );
    }

    #[test]
    fn unflattens_on_first_segment_only() {
        assert_eq!(
            unflatten_path_url("mp:external/a/https/host.example/https/b.png").as_deref(),
            Some("https://host.example/https/b.png")
        );
        assert_eq!(unflatten_path_url("mp:external/a/http/host.example"), None);
    }
}
