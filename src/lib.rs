//! HTTP step definitions for behaviour-driven API tests.
//!
//! Scenarios thread a [`ScenarioContext`] through their steps. The request
//! steps build a [`RequestDescriptor`], the execution steps send it through a
//! [`RoundTrip`] and store the [`ResponseDescriptor`], and the assertion
//! steps check that response. [`StepTable`] maps step text to handlers.

pub mod config;
pub mod context;
pub mod env;
pub mod error;
mod headers;
pub mod registry;
#[cfg(feature = "cli")]
pub mod report;
pub mod request;
pub mod response;
pub mod scenario;
pub mod steps;
pub mod transport;

pub use context::ScenarioContext;
pub use error::{RegistryError, Slot, StepError, TransportError};
pub use registry::{register_http_steps, StepRegistry, StepTable};
pub use request::{Method, RequestDescriptor};
pub use response::ResponseDescriptor;
pub use steps::{HttpSteps, StepResult};
pub use transport::{HandlerRoundTrip, ReqwestRoundTrip, RoundTrip, TransportOptions};
