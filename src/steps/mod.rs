//! Handlers behind the HTTP step patterns.
//!
//! Every handler takes the incoming [`ScenarioContext`] by value plus the
//! arguments captured from the step line, and returns the context the next
//! step should see.

mod assertions;
mod execution;
mod request;

use std::{fmt, sync::Arc};

use url::Url;

use crate::{context::ScenarioContext, error::StepError, transport::RoundTrip};

pub use assertions::{response_code_equals, response_header_equals, response_is, valid_json};
pub use request::{have_request, set_request_body, set_request_header};

pub type StepResult = Result<ScenarioContext, StepError>;

/// Shared state for the steps that build URLs or talk to the network.
#[derive(Clone)]
pub struct HttpSteps {
    round_trip: Arc<dyn RoundTrip>,
    base_url: Option<Url>,
}

impl HttpSteps {
    pub fn new(round_trip: Arc<dyn RoundTrip>) -> Self {
        Self {
            round_trip,
            base_url: None,
        }
    }

    /// Resolve relative step URLs such as `/health` against `base_url`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

impl fmt::Debug for HttpSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSteps")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}
