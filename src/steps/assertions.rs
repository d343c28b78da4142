use serde::de::IgnoredAny;
use tracing::debug;

use crate::{context::ScenarioContext, error::StepError};

use super::StepResult;

/// `the response code equals <N>`
pub fn response_code_equals(context: ScenarioContext, expected: u16) -> StepResult {
    let actual = context.response()?.status();
    if actual != expected {
        return Err(StepError::StatusMismatch { expected, actual });
    }
    debug!(status = actual, "status code matched");
    Ok(context)
}

/// `the response contains a valid JSON`
///
/// Checks syntax only.
pub fn valid_json(context: ScenarioContext) -> StepResult {
    let response = context.response()?;
    serde_json::from_slice::<IgnoredAny>(response.body())
        .map_err(|source| StepError::InvalidJson { source })?;
    debug!(body_bytes = response.body().len(), "response body is valid JSON");
    Ok(context)
}

/// `the response is "<TEXT>"`
///
/// Byte-for-byte comparison, no normalization.
pub fn response_is(context: ScenarioContext, expected: &str) -> StepResult {
    let response = context.response()?;
    if response.body().as_ref() != expected.as_bytes() {
        return Err(StepError::BodyMismatch {
            expected: expected.to_string(),
            actual: response.text().into_owned(),
        });
    }
    Ok(context)
}

/// `the response header "<NAME>" equals "<VALUE>"`
pub fn response_header_equals(context: ScenarioContext, name: &str, expected: &str) -> StepResult {
    // an absent header reads as the empty string
    let actual = context.response()?.header_bytes(name);
    if actual.unwrap_or_default() != expected.as_bytes() {
        return Err(StepError::HeaderMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            actual: actual.map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        });
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Slot, response::ResponseDescriptor};
    use reqwest::header::{HeaderName, HeaderValue};

    fn context_with(response: ResponseDescriptor) -> ScenarioContext {
        ScenarioContext::new().with_response(response)
    }

    #[test]
    fn status_code_mismatch_mentions_both_codes() {
        let context = context_with(ResponseDescriptor::new(404));

        let err = response_code_equals(context.clone(), 200).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("404"), "{message}");
        assert!(message.contains("200"), "{message}");

        assert!(response_code_equals(context, 404).is_ok());
    }

    #[test]
    fn status_code_on_fresh_context_is_a_precondition_error() {
        let err = response_code_equals(ScenarioContext::new(), 200).unwrap_err();
        assert!(matches!(err, StepError::MissingPrecondition(Slot::Response)));
    }

    #[test]
    fn valid_json_checks_syntax_only() {
        let valid = context_with(ResponseDescriptor::new(200).with_body(r#"{"a":1}"#));
        assert!(valid_json(valid).is_ok());

        let scalar = context_with(ResponseDescriptor::new(200).with_body("42"));
        assert!(valid_json(scalar).is_ok());

        let unquoted = context_with(ResponseDescriptor::new(200).with_body("{a:1}"));
        assert!(matches!(
            valid_json(unquoted),
            Err(StepError::InvalidJson { .. })
        ));

        let empty = context_with(ResponseDescriptor::new(200));
        assert!(valid_json(empty).is_err());
    }

    #[test]
    fn body_survives_failed_and_passed_assertions() {
        let context = context_with(ResponseDescriptor::new(200).with_body(r#"{"ok":true}"#));

        let err = response_is(context.clone(), "something else").unwrap_err();
        assert!(matches!(
            err,
            StepError::BodyMismatch { ref actual, .. } if actual == r#"{"ok":true}"#
        ));

        let context = valid_json(context).unwrap();
        let context = response_is(context, r#"{"ok":true}"#).unwrap();
        let context = response_is(context, r#"{"ok":true}"#).unwrap();
        assert_eq!(context.response().unwrap().body().len(), 11);
    }

    #[test]
    fn response_is_compares_bytes_exactly() {
        let context = context_with(ResponseDescriptor::new(200).with_body("hello\n"));
        assert!(response_is(context.clone(), "hello").is_err());
        assert!(response_is(context, "hello\n").is_ok());
    }

    #[test]
    fn header_assertion_ignores_name_case() {
        let context = context_with(ResponseDescriptor::new(200).with_header(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        ));

        assert!(response_header_equals(context.clone(), "content-type", "application/json").is_ok());
        assert!(response_header_equals(context.clone(), "Content-Type", "application/json").is_ok());

        let err = response_header_equals(context, "Content-Type", "text/plain").unwrap_err();
        assert!(matches!(
            err,
            StepError::HeaderMismatch { actual: Some(ref value), .. } if value == "application/json"
        ));
    }

    #[test]
    fn header_assertion_uses_the_first_value() {
        let mut response = ResponseDescriptor::new(200);
        response.append_header("x-tag", "first").unwrap();
        response.append_header("x-tag", "second").unwrap();
        let context = context_with(response);

        assert!(response_header_equals(context.clone(), "X-Tag", "first").is_ok());
        assert!(response_header_equals(context, "X-Tag", "second").is_err());
    }

    #[test]
    fn missing_header_is_reported() {
        let context = context_with(ResponseDescriptor::new(200));
        let err = response_header_equals(context, "x-trace", "abc").unwrap_err();
        assert!(matches!(err, StepError::HeaderMismatch { actual: None, .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn non_ascii_header_values_compare_byte_for_byte() {
        let context = context_with(ResponseDescriptor::new(200).with_header(
            HeaderName::from_static("x-name"),
            HeaderValue::from_bytes("café".as_bytes()).unwrap(),
        ));

        assert!(response_header_equals(context.clone(), "X-Name", "café").is_ok());

        let err = response_header_equals(context.clone(), "X-Name", "").unwrap_err();
        assert!(matches!(
            err,
            StepError::HeaderMismatch { actual: Some(ref value), .. } if value == "café"
        ));
        assert!(response_header_equals(context, "X-Name", "cafe").is_err());
    }

    #[test]
    fn missing_header_equals_the_empty_string() {
        let context = context_with(ResponseDescriptor::new(200));
        assert!(response_header_equals(context, "x-trace", "").is_ok());
    }
}
