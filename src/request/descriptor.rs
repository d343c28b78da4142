use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::{error::StepError, headers::parse_header};

use super::Method;

/// Outgoing request assembled by the request steps.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestDescriptor {
    /// Request with no headers and an empty body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Parses the textual method and URL captured from a step line.
    ///
    /// Relative URLs such as `/users` are joined onto `base` when one is
    /// given and rejected otherwise.
    pub fn parse(method: &str, url: &str, base: Option<&Url>) -> Result<Self, StepError> {
        let method = method.parse::<Method>()?;
        let url = resolve_url(url, base)?;
        Ok(Self::new(method, url))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Adds a value for `name`, keeping any values already present.
    pub fn append_header(&mut self, name: &str, value: &str) -> Result<(), StepError> {
        let (name, value) = parse_header(name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub fn into_parts(self) -> (Method, Url, HeaderMap, Bytes) {
        (self.method, self.url, self.headers, self.body)
    }
}

fn resolve_url(raw: &str, base: Option<&Url>) -> Result<Url, StepError> {
    let invalid = |source| StepError::InvalidUrl {
        url: raw.to_string(),
        source,
    };

    match (Url::parse(raw), base) {
        (Ok(url), _) => Ok(url),
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => {
            base.join(raw).map_err(invalid)
        }
        (Err(source), _) => Err(invalid(source)),
    }
}
