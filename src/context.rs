use crate::{
    error::{Slot, StepError},
    request::RequestDescriptor,
    response::ResponseDescriptor,
};

/// Value threaded from one step to the next within a scenario.
///
/// Steps never mutate the context they receive. They read the slots they
/// need and hand back an updated context, so a failing step leaves its
/// caller's context untouched.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    request: Option<RequestDescriptor>,
    response: Option<ResponseDescriptor>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request under construction.
    ///
    /// # Errors
    /// [`StepError::MissingPrecondition`] when no step has created a request.
    pub fn request(&self) -> Result<&RequestDescriptor, StepError> {
        self.request
            .as_ref()
            .ok_or(StepError::MissingPrecondition(Slot::Request))
    }

    /// The most recently received response.
    ///
    /// # Errors
    /// [`StepError::MissingPrecondition`] when no request has been made.
    pub fn response(&self) -> Result<&ResponseDescriptor, StepError> {
        self.response
            .as_ref()
            .ok_or(StepError::MissingPrecondition(Slot::Response))
    }

    pub fn with_request(mut self, request: RequestDescriptor) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_response(mut self, response: ResponseDescriptor) -> Self {
        self.response = Some(response);
        self
    }

    /// Applies `update` to a copy of the stored request and stores the result.
    pub fn update_request<F>(self, update: F) -> Result<Self, StepError>
    where
        F: FnOnce(&mut RequestDescriptor) -> Result<(), StepError>,
    {
        let mut request = self.request()?.clone();
        update(&mut request)?;
        Ok(self.with_request(request))
    }
}
