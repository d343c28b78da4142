use std::{fmt::Display, str::FromStr};

use regex::Captures;

use crate::error::StepError;

/// Arguments captured from a step line, in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs(Vec<String>);

impl StepArgs {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Groups that did not participate in the match become empty strings.
    pub fn from_captures(captures: &Captures<'_>) -> Self {
        Self(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn str(&self, index: usize) -> Result<&str, StepError> {
        self.0
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| StepError::InvalidArgument {
                value: format!("#{index}"),
                reason: format!("the step captured only {} argument(s)", self.0.len()),
            })
    }

    pub fn parse<T>(&self, index: usize) -> Result<T, StepError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.str(index)?;
        raw.parse().map_err(|err: T::Err| StepError::InvalidArgument {
            value: raw.to_string(),
            reason: err.to_string(),
        })
    }
}
