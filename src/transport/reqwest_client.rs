use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use tracing::debug;

use crate::{
    error::{StepError, TransportError},
    headers::parse_header,
    request::RequestDescriptor,
    response::ResponseDescriptor,
};

use super::RoundTrip;

/// Client settings applied to every request sent by [`ReqwestRoundTrip`].
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub default_headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestRoundTrip {
    client: Client,
}

impl ReqwestRoundTrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn from_options(options: &TransportOptions) -> Result<Self, StepError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &options.default_headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.append(name, value);
        }

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RoundTrip for ReqwestRoundTrip {
    async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor, TransportError> {
        let (method, url, headers, body) = request.into_parts();
        let target = url.to_string();

        let mut request_builder = self
            .client
            .request(method.into(), url)
            .headers(headers);
        if !body.is_empty() {
            request_builder = request_builder.body(body);
        }

        let start = Instant::now();
        let response = request_builder
            .send()
            .await
            .map_err(|source| TransportError::Send {
                method: method.to_string(),
                url: target.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let header_map = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Body {
                url: target.clone(),
                source,
            })?;

        debug!(
            %method,
            url = %target,
            status,
            body_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "round trip finished"
        );

        Ok(ResponseDescriptor::from_parts(status, header_map, bytes))
    }
}
