//! URL component encoding with `encodeURIComponent` semantics.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Result, RouterError};

/// Bytes escaped in a URL component: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use as a single URL component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decodes a percent-encoded URL component.
///
/// Strict: a `%` not followed by two hex digits, or bytes that are not UTF-8
/// after decoding, are errors. `+` is left as is.
pub fn decode_component(value: &str) -> Result<String> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(RouterError::InvalidEncoding(value.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(value)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| RouterError::InvalidEncoding(value.to_string()))
}

/// Decodes a query-string key or value: `+` is a space and malformed
/// sequences are kept literally.
pub fn decode_query_value(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("/dashboard"), "%2Fdashboard");
        assert_eq!(
            encode_component("/events?id=4&tab=info"),
            "%2Fevents%3Fid%3D4%26tab%3Dinfo"
        );
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("it's-(ok)_!*~."), "it's-(ok)_!*~.");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("%2Fdashboard").unwrap(), "/dashboard");
        assert_eq!(decode_component("/plain").unwrap(), "/plain");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
        assert_eq!(decode_component("%C3%A9").unwrap(), "é");
    }

    #[test]
    fn test_decode_component_rejects_malformed_input() {
        assert!(decode_component("%").is_err());
        assert!(decode_component("%2").is_err());
        assert!(decode_component("%zz").is_err());
        assert!(decode_component("%C3").is_err());
    }

    #[test]
    fn test_decode_query_value() {
        assert_eq!(decode_query_value("John+Doe"), "John Doe");
        assert_eq!(decode_query_value("New%20York"), "New York");
        assert_eq!(decode_query_value("100%"), "100%");
    }

    #[test]
    fn test_round_trip_of_redirect_target() {
        let target = "/events/42?ref=home page";
        assert_eq!(decode_component(&encode_component(target)).unwrap(), target);
    }
}
