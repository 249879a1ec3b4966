//! Fetch → transform → (scale out) → report.
//!
//! Fetch and transform failures end the run with an error. Per-group
//! failures are recorded in the [`RunReport`]; the configured
//! [`ErrorPolicy`] decides whether the remaining groups still run.

use tracing::{error, info, warn};

use asg_core::{AsgConfig, AsgResult, AutoScaleGroup, ErrorPolicy, GroupDescription, Mode};

use crate::api::AutoScalingApi;
use crate::report::{GroupOutcome, Outcome, RunReport};
use crate::scaler::scale_out;
use crate::transform::transform;

/// Describe the configured group, limited to `result_limit` records.
pub async fn fetch(
    api: &dyn AutoScalingApi,
    config: &AsgConfig,
) -> AsgResult<Vec<GroupDescription>> {
    let groups = api
        .describe_groups(&config.group_name, config.result_limit)
        .await?;
    info!(
        group = %config.group_name,
        limit = config.result_limit,
        found = groups.len(),
        "described auto scaling groups"
    );
    Ok(groups)
}

/// Run the pipeline once in the configured mode.
pub async fn run(api: &dyn AutoScalingApi, config: &AsgConfig) -> AsgResult<RunReport> {
    config.validate()?;

    let descriptions = fetch(api, config).await?;
    let groups = transform(descriptions, config.mode, config.missing_fields)?;

    let mut report = RunReport::new(config.mode);
    let total = groups.len();

    for (arn, group) in groups {
        info!(group = %group.name, "processing group");

        let outcome = match config.mode {
            Mode::Describe => describe(&group, config),
            Mode::ScaleOut => {
                info!(group = %group.name, "Trying to scale out ASG ...");
                match scale_out(api, &group).await {
                    Ok(to) => {
                        info!(group = %group.name, "Scale out was successfully completed");
                        Outcome::ScaledOut {
                            from: group.desired_size,
                            to,
                        }
                    }
                    Err(e) => {
                        error!(group = %group.name, error = %e, "Error: could not scale out ASG");
                        Outcome::Failed {
                            error: e.to_string(),
                        }
                    }
                }
            }
        };

        let failed = matches!(outcome, Outcome::Failed { .. });
        report.groups.push(GroupOutcome {
            arn,
            name: group.name,
            outcome,
        });

        if failed && config.on_error == ErrorPolicy::Halt {
            report.skipped = total - report.groups.len();
            if report.skipped > 0 {
                warn!(skipped = report.skipped, "halting after first failure");
            }
            break;
        }
    }

    Ok(report)
}

fn describe(group: &AutoScaleGroup, config: &AsgConfig) -> Outcome {
    let tag_match = group.tag(config.tag_filter_key()) == Some(config.tag_value.as_str());
    let matching_instances = group
        .instances
        .iter()
        .filter(|i| i.in_state(&config.state_filter))
        .map(|i| i.instance_id.clone())
        .collect();

    Outcome::Described {
        group: group.clone(),
        tag_match,
        matching_instances,
    }
}
