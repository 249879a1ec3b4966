//! AWS implementation of [`AutoScalingApi`] on top of `aws-sdk-autoscaling`.

use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_autoscaling::Client;
use aws_sdk_autoscaling::config::Region;
use aws_sdk_autoscaling::error::DisplayErrorContext;
use aws_sdk_autoscaling::types::{AutoScalingGroup, Instance, TagDescription};
use tracing::debug;

use asg_core::{
    AsgConfig, AsgError, AsgResult, GroupDescription, GroupInstance, GroupTag, LaunchTemplateRef,
};

use crate::api::{ApiFuture, AutoScalingApi, SetDesiredCapacity};

/// Auto scaling client bound to one region and credential profile.
#[derive(Debug, Clone)]
pub struct AwsAutoScaling {
    client: Client,
}

impl AwsAutoScaling {
    /// Build a client from the configured profile and region.
    pub async fn connect(config: &AsgConfig) -> AsgResult<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&config.profile)
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        // Resolve once here so a bad profile fails as a client error, not
        // on the first describe call.
        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            AsgError::Client(format!("no credentials provider for profile {}", config.profile))
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| AsgError::Client(DisplayErrorContext(&e).to_string()))?;

        debug!(profile = %config.profile, region = %config.region, "aws client configured");
        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

impl AutoScalingApi for AwsAutoScaling {
    fn describe_groups<'a>(
        &'a self,
        group_name: &'a str,
        limit: i32,
    ) -> ApiFuture<'a, Vec<GroupDescription>> {
        Box::pin(async move {
            let output = self
                .client
                .describe_auto_scaling_groups()
                .auto_scaling_group_names(group_name)
                .max_records(limit)
                .send()
                .await
                .map_err(|e| AsgError::Fetch(DisplayErrorContext(&e).to_string()))?;

            Ok(output
                .auto_scaling_groups()
                .iter()
                .map(describe_group)
                .collect())
        })
    }

    fn set_desired_capacity<'a>(&'a self, request: &'a SetDesiredCapacity) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.client
                .set_desired_capacity()
                .auto_scaling_group_name(&request.group_name)
                .desired_capacity(request.desired_capacity)
                .honor_cooldown(request.honor_cooldown)
                .send()
                .await
                .map_err(|e| AsgError::SetCapacity {
                    group: request.group_name.clone(),
                    message: DisplayErrorContext(&e).to_string(),
                })?;
            Ok(())
        })
    }
}

// ── SDK → wire conversion ──────────────────────────────────────────

fn describe_group(group: &AutoScalingGroup) -> GroupDescription {
    GroupDescription {
        arn: group.auto_scaling_group_arn().map(str::to_string),
        name: group.auto_scaling_group_name().map(str::to_string),
        launch_template: group.launch_template().map(|lt| LaunchTemplateRef {
            id: lt.launch_template_id().map(str::to_string),
            name: lt.launch_template_name().map(str::to_string),
            version: lt.version().map(str::to_string),
        }),
        target_group_arns: group.target_group_arns.clone(),
        min_size: group.min_size(),
        max_size: group.max_size(),
        desired_capacity: group.desired_capacity(),
        service_linked_role_arn: group.service_linked_role_arn().map(str::to_string),
        instances: group
            .instances
            .as_ref()
            .map(|list| list.iter().map(describe_instance).collect()),
        tags: group
            .tags
            .as_ref()
            .map(|list| list.iter().map(describe_tag).collect()),
    }
}

fn describe_instance(instance: &Instance) -> GroupInstance {
    GroupInstance {
        instance_id: instance.instance_id().unwrap_or_default().to_string(),
        lifecycle_state: instance
            .lifecycle_state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        health_status: instance.health_status().unwrap_or_default().to_string(),
        availability_zone: instance.availability_zone().unwrap_or_default().to_string(),
    }
}

fn describe_tag(tag: &TagDescription) -> GroupTag {
    GroupTag {
        key: tag.key().unwrap_or_default().to_string(),
        value: tag.value().unwrap_or_default().to_string(),
    }
}
