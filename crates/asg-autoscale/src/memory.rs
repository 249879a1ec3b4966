//! In-memory [`AutoScalingApi`] for tests and offline runs.
//!
//! Serves a fixed list of group descriptions and records every
//! set-desired-capacity call instead of sending it anywhere.

use std::sync::Mutex;

use asg_core::{AsgError, GroupDescription};

use crate::api::{ApiFuture, AutoScalingApi, SetDesiredCapacity};

#[derive(Debug, Default)]
pub struct InMemoryAutoScaling {
    groups: Vec<GroupDescription>,
    describe_error: Option<String>,
    set_error: Option<String>,
    describe_calls: Mutex<Vec<(String, i32)>>,
    set_calls: Mutex<Vec<SetDesiredCapacity>>,
}

impl InMemoryAutoScaling {
    pub fn new(groups: Vec<GroupDescription>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    /// Make every describe call fail with `message`.
    pub fn with_describe_error(mut self, message: &str) -> Self {
        self.describe_error = Some(message.to_string());
        self
    }

    /// Make every set-desired-capacity call fail with `message`.
    pub fn with_set_error(mut self, message: &str) -> Self {
        self.set_error = Some(message.to_string());
        self
    }

    /// Recorded describe calls as (group name, limit).
    pub fn describe_calls(&self) -> Vec<(String, i32)> {
        self.describe_calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Recorded set-desired-capacity calls, including failed ones.
    pub fn set_calls(&self) -> Vec<SetDesiredCapacity> {
        self.set_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl AutoScalingApi for InMemoryAutoScaling {
    fn describe_groups<'a>(
        &'a self,
        group_name: &'a str,
        limit: i32,
    ) -> ApiFuture<'a, Vec<GroupDescription>> {
        Box::pin(async move {
            if let Ok(mut calls) = self.describe_calls.lock() {
                calls.push((group_name.to_string(), limit));
            }
            if let Some(message) = &self.describe_error {
                return Err(AsgError::Fetch(message.clone()));
            }
            // Fixtures are served as-is, like a provider ignoring the name
            // filter; only the record limit is applied.
            let limit = usize::try_from(limit).unwrap_or(0);
            Ok(self.groups.iter().take(limit).cloned().collect())
        })
    }

    fn set_desired_capacity<'a>(&'a self, request: &'a SetDesiredCapacity) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            if let Ok(mut calls) = self.set_calls.lock() {
                calls.push(request.clone());
            }
            match &self.set_error {
                Some(message) => Err(AsgError::SetCapacity {
                    group: request.group_name.clone(),
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        })
    }
}
