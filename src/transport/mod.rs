mod handler;
mod reqwest_client;

use async_trait::async_trait;

use crate::{error::TransportError, request::RequestDescriptor, response::ResponseDescriptor};

pub use handler::HandlerRoundTrip;
pub use reqwest_client::{ReqwestRoundTrip, TransportOptions};

/// Sends one request and buffers the whole response.
///
/// Timeouts, connection reuse and TLS are the implementation's concern.
#[async_trait]
pub trait RoundTrip: Send + Sync {
    async fn execute(&self, request: RequestDescriptor)
        -> Result<ResponseDescriptor, TransportError>;
}
