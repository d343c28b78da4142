use async_trait::async_trait;
use tracing::debug;

use crate::{error::TransportError, request::RequestDescriptor, response::ResponseDescriptor};

use super::RoundTrip;

/// Serves requests from an in-process handler instead of the network.
pub struct HandlerRoundTrip<F> {
    handler: F,
}

impl<F> HandlerRoundTrip<F>
where
    F: Fn(&RequestDescriptor) -> ResponseDescriptor + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F> RoundTrip for HandlerRoundTrip<F>
where
    F: Fn(&RequestDescriptor) -> ResponseDescriptor + Send + Sync,
{
    async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor, TransportError> {
        let response = (self.handler)(&request);
        debug!(
            method = %request.method(),
            url = %request.url(),
            status = response.status(),
            "handled request in process"
        );
        Ok(response)
    }
}
