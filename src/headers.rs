use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::StepError;

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), StepError> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|err| StepError::InvalidHeader {
            name: name.to_string(),
            reason: err.to_string(),
        })?;
    let header_value = HeaderValue::from_str(value).map_err(|err| StepError::InvalidHeader {
        name: name.to_string(),
        reason: err.to_string(),
    })?;
    Ok((header_name, header_value))
}

/// First value stored under `name`, matched case-insensitively.
///
/// Values that are not visible ASCII are reported as absent; use
/// [`first_bytes`] to compare them.
pub(crate) fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Raw bytes of the first value stored under `name`.
pub(crate) fn first_bytes<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a [u8]> {
    headers.get(name).map(HeaderValue::as_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_normalizes_names() {
        let (name, value) = parse_header("X-Request-Id", "42").unwrap();
        assert_eq!(name.as_str(), "x-request-id");
        assert_eq!(value, "42");
    }

    #[test]
    fn parse_header_rejects_invalid_names() {
        let err = parse_header("bad header", "value").unwrap_err();
        assert!(matches!(err, StepError::InvalidHeader { ref name, .. } if name == "bad header"));
    }

    #[test]
    fn parse_header_rejects_control_characters_in_values() {
        assert!(parse_header("x-test", "line\nbreak").is_err());
    }

    #[test]
    fn first_value_ignores_name_case() {
        let mut headers = HeaderMap::new();
        headers.append("content-type", HeaderValue::from_static("application/json"));
        headers.append("content-type", HeaderValue::from_static("text/plain"));

        assert_eq!(first_value(&headers, "Content-Type"), Some("application/json"));
        assert_eq!(first_value(&headers, "x-missing"), None);
    }

    #[test]
    fn first_bytes_keeps_non_ascii_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-name"),
            HeaderValue::from_bytes("café".as_bytes()).unwrap(),
        );
        assert_eq!(first_value(&headers, "X-Name"), None);
        assert_eq!(first_bytes(&headers, "X-Name"), Some("café".as_bytes()));
    }
}
