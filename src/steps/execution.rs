use tracing::debug;

use crate::{context::ScenarioContext, request::RequestDescriptor};

use super::{HttpSteps, StepResult};

impl HttpSteps {
    /// `I have a <METHOD> request "<URL>"`, resolved against the base URL.
    pub fn have_request(&self, context: ScenarioContext, method: &str, url: &str) -> StepResult {
        super::have_request(context, method, url, self.base_url())
    }

    /// `I make the request`
    ///
    /// Sends the stored request. The request stays in its slot, so a
    /// scenario can send it again.
    pub async fn make_the_request(&self, context: ScenarioContext) -> StepResult {
        let request = context.request()?.clone();
        self.send(context, request).await
    }

    /// `I make a <METHOD> request to "<URL>"`
    ///
    /// Builds an empty request inline and ignores the request slot.
    pub async fn make_request(
        &self,
        context: ScenarioContext,
        method: &str,
        url: &str,
    ) -> StepResult {
        let request = RequestDescriptor::parse(method, url, self.base_url())?;
        self.send(context, request).await
    }

    async fn send(&self, context: ScenarioContext, request: RequestDescriptor) -> StepResult {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.round_trip.execute(request).await?;
        debug!(status = response.status(), "response stored");
        Ok(context.with_response(response))
    }
}
