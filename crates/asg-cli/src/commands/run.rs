use anyhow::{Context, bail};
use tracing::info;

use asg_autoscale::{AutoScalingApi, AwsAutoScaling, RunReport, format_report};
use asg_core::AsgConfig;

/// Connect to AWS and run the pipeline in the configured mode.
///
/// Exits non-zero if any step failed, including bounds rejections.
pub async fn run(config: &AsgConfig, format: &str) -> anyhow::Result<()> {
    config.validate().context("Error: invalid configuration")?;

    let api = AwsAutoScaling::connect(config)
        .await
        .context("Error: can not create new session")?;

    execute(&api, config, format).await
}

/// Run against any provider and print the report.
pub async fn execute(
    api: &dyn AutoScalingApi,
    config: &AsgConfig,
    format: &str,
) -> anyhow::Result<()> {
    info!(mode = %config.mode, group = %config.group_name, region = %config.region, "starting run");

    let report = asg_autoscale::run(api, config)
        .await
        .with_context(|| format!("Error: {} failed for {}", config.mode, config.group_name))?;

    print!("{}", render(&report, format)?);

    if !report.is_success() {
        bail!("{} group(s) failed", report.failures());
    }
    Ok(())
}

fn render(report: &RunReport, format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        _ => Ok(format_report(report)),
    }
}
