//! asg-autoscale — describe one auto scaling group and scale it out by one.
//!
//! # Pipeline
//!
//! ```text
//! fetch      DescribeAutoScalingGroups(name, MaxRecords = limit)
//! transform  GroupDescription -> AutoScaleGroup, keyed by ARN
//! decide     new = desired + 1
//!            new > max  -> MaxSizeExceeded
//!            new < min  -> MinSizeViolated
//! act        SetDesiredCapacity(group.name, new, HonorCooldown = true)
//! report     one outcome per group
//! ```
//!
//! `describe` mode stops after transform. The provider sits behind
//! [`AutoScalingApi`] so the pipeline runs unchanged against
//! [`InMemoryAutoScaling`] in tests.

pub mod api;
pub mod aws;
pub mod memory;
pub mod pipeline;
pub mod report;
pub mod scaler;
pub mod transform;

pub use api::{AutoScalingApi, SetDesiredCapacity};
pub use aws::AwsAutoScaling;
pub use memory::InMemoryAutoScaling;
pub use pipeline::{fetch, run};
pub use report::{GroupOutcome, Outcome, RunReport, format_report};
pub use scaler::{plan_scale_out, scale_out};
pub use transform::transform;
