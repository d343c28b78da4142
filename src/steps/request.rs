use tracing::debug;
use url::Url;

use crate::{context::ScenarioContext, request::RequestDescriptor};

use super::StepResult;

/// `I have a <METHOD> request "<URL>"`
pub fn have_request(
    context: ScenarioContext,
    method: &str,
    url: &str,
    base_url: Option<&Url>,
) -> StepResult {
    let request = RequestDescriptor::parse(method, url, base_url)?;
    debug!(method = %request.method(), url = %request.url(), "request prepared");
    Ok(context.with_request(request))
}

/// `I set request header "<NAME>" to "<VALUE>"`
pub fn set_request_header(context: ScenarioContext, name: &str, value: &str) -> StepResult {
    debug!(header = name, "appending request header");
    context.update_request(|request| request.append_header(name, value))
}

/// `I set request body to "<BODY>"` and `the request has body "<BODY>"`
pub fn set_request_body(context: ScenarioContext, body: &str) -> StepResult {
    debug!(body_bytes = body.len(), "replacing request body");
    context.update_request(|request| {
        request.set_body(body.to_string());
        Ok(())
    })
}
