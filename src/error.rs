use std::fmt;

use thiserror::Error;

/// Named position in a [`ScenarioContext`](crate::context::ScenarioContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Request,
    Response,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Request => f.write_str("request"),
            Slot::Response => f.write_str("response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("sending {method} {url}: {source}")]
    Send {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("reading response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("no {0} in the scenario context, a previous step has to create it")]
    MissingPrecondition(Slot),
    #[error("unsupported HTTP method {0:?}")]
    InvalidMethod(String),
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("invalid step argument {value:?}: {reason}")]
    InvalidArgument { value: String, reason: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("expected status code: {expected} but {actual} given")]
    StatusMismatch { expected: u16, actual: u16 },
    #[error(
        "expected response header {name:?} to equal {expected:?} but {}",
        describe_header(.actual)
    )]
    HeaderMismatch {
        name: String,
        expected: String,
        actual: Option<String>,
    },
    #[error("expected response body {expected:?} but got {actual:?}")]
    BodyMismatch { expected: String, actual: String },
    #[error("the response body is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("no step definition matches {0:?}")]
    UndefinedStep(String),
}

fn describe_header(actual: &Option<String>) -> String {
    match actual {
        Some(value) => format!("{value:?} given"),
        None => "the header is missing".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid step pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("step pattern {0:?} is already registered")]
    DuplicatePattern(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mismatch_names_both_codes() {
        let err = StepError::StatusMismatch {
            expected: 200,
            actual: 404,
        };
        let message = err.to_string();
        assert!(message.contains("200"));
        assert!(message.contains("404"));
    }

    #[test]
    fn header_mismatch_reports_missing_header() {
        let err = StepError::HeaderMismatch {
            name: "x-trace".to_string(),
            expected: "abc".to_string(),
            actual: None,
        };
        assert!(err.to_string().contains("the header is missing"));

        let err = StepError::HeaderMismatch {
            name: "x-trace".to_string(),
            expected: "abc".to_string(),
            actual: Some("def".to_string()),
        };
        assert!(err.to_string().contains("\"def\" given"));
    }

    #[test]
    fn missing_precondition_names_the_slot() {
        let err = StepError::MissingPrecondition(Slot::Response);
        assert!(err.to_string().contains("no response"));
    }
}
