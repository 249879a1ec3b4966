//! Provider API seam.
//!
//! The pipeline only ever makes two remote calls. Both go through
//! [`AutoScalingApi`], implemented by [`crate::AwsAutoScaling`] for real
//! accounts and [`crate::InMemoryAutoScaling`] for tests.

use std::future::Future;
use std::pin::Pin;

use asg_core::{AsgResult, GroupDescription};
use serde::{Deserialize, Serialize};

/// Boxed future alias for provider calls.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = AsgResult<T>> + Send + 'a>>;

/// Arguments of a set-desired-capacity call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDesiredCapacity {
    pub group_name: String,
    pub desired_capacity: i32,
    pub honor_cooldown: bool,
}

/// The two auto scaling operations the pipeline needs.
pub trait AutoScalingApi: Send + Sync {
    /// Describe groups filtered by name, returning at most `limit` records.
    ///
    /// Errors come back as [`asg_core::AsgError::Fetch`]. No retries, and
    /// only the first page is read.
    fn describe_groups<'a>(
        &'a self,
        group_name: &'a str,
        limit: i32,
    ) -> ApiFuture<'a, Vec<GroupDescription>>;

    /// Set a group's desired capacity.
    ///
    /// Errors come back as [`asg_core::AsgError::SetCapacity`].
    fn set_desired_capacity<'a>(&'a self, request: &'a SetDesiredCapacity) -> ApiFuture<'a, ()>;
}
