use std::borrow::Cow;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{error::StepError, headers};

/// Response captured by the execution steps.
///
/// The body is an owned buffer, so any number of assertion steps can read
/// it without draining it.
#[derive(Debug, Clone)]
pub struct ResponseDescriptor {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl ResponseDescriptor {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn from_parts(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn append_header(&mut self, name: &str, value: &str) -> Result<(), StepError> {
        let (name, value) = headers::parse_header(name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of `name`; the lookup ignores case.
    pub fn header(&self, name: &str) -> Option<&str> {
        headers::first_value(&self.headers, name)
    }

    /// Raw bytes of the first value of `name`, whatever their encoding.
    pub fn header_bytes(&self, name: &str) -> Option<&[u8]> {
        headers::first_bytes(&self.headers, name)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
