//! Scale-out decision and action.
//!
//! The decision is a pure bounds check on `desired + 1`. The action sends
//! the new value with cooldown honored, addressed to the group's own name.

use tracing::{debug, info};

use asg_core::{AsgError, AsgResult, AutoScaleGroup};

use crate::api::{AutoScalingApi, SetDesiredCapacity};

/// Compute the desired capacity one step above the current one.
///
/// Fails with [`AsgError::MaxSizeExceeded`] when the result would pass
/// `max_size` (including integer overflow), and with
/// [`AsgError::MinSizeViolated`] when it would still be under `min_size`.
/// The latter only happens for snapshots that already break
/// `min <= desired`.
pub fn plan_scale_out(group: &AutoScaleGroup) -> AsgResult<i32> {
    let max_exceeded = || AsgError::MaxSizeExceeded {
        group: group.name.clone(),
        desired: group.desired_size.saturating_add(1),
        max: group.max_size,
    };

    let desired = group.desired_size.checked_add(1).ok_or_else(max_exceeded)?;

    if desired > group.max_size {
        return Err(max_exceeded());
    }

    if desired < group.min_size {
        return Err(AsgError::MinSizeViolated {
            group: group.name.clone(),
            desired,
            min: group.min_size,
        });
    }

    Ok(desired)
}

/// Raise the group's desired capacity by one.
///
/// Returns the new desired capacity. Bounds rejections make no API call.
pub async fn scale_out(api: &dyn AutoScalingApi, group: &AutoScaleGroup) -> AsgResult<i32> {
    let desired = plan_scale_out(group)?;

    debug!(
        group = %group.name,
        from = group.desired_size,
        to = desired,
        min = group.min_size,
        max = group.max_size,
        "scale-out approved"
    );

    let request = SetDesiredCapacity {
        group_name: group.name.clone(),
        desired_capacity: desired,
        honor_cooldown: true,
    };
    api.set_desired_capacity(&request).await?;

    info!(group = %group.name, desired, "new desired capacity set");
    Ok(desired)
}
