//! Map provider group descriptions onto local [`AutoScaleGroup`] records.
//!
//! Which absent fields are fatal depends on the mode: describe only needs
//! identity and the launch template, scale-out also needs capacity and
//! the service-linked role. List fields are never required.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use asg_core::{
    AsgError, AsgResult, AutoScaleGroup, GroupArn, GroupDescription, MissingFieldPolicy, Mode,
};

/// Build one record per description, keyed by group ARN.
///
/// Values are copied verbatim. Nothing is clamped or coerced.
pub fn transform(
    descriptions: Vec<GroupDescription>,
    mode: Mode,
    policy: MissingFieldPolicy,
) -> AsgResult<BTreeMap<GroupArn, AutoScaleGroup>> {
    let mut groups = BTreeMap::new();

    for (index, desc) in descriptions.into_iter().enumerate() {
        let group = map_group(index, desc, mode, policy)?;
        if groups.contains_key(&group.arn) {
            warn!(arn = %group.arn, "duplicate group ARN in response, keeping last");
        }
        groups.insert(group.arn.clone(), group);
    }

    Ok(groups)
}

fn map_group(
    index: usize,
    desc: GroupDescription,
    mode: Mode,
    policy: MissingFieldPolicy,
) -> AsgResult<AutoScaleGroup> {
    // Best label available for error messages before identity is known.
    let label = desc
        .name
        .clone()
        .or_else(|| desc.arn.clone())
        .unwrap_or_else(|| format!("#{index}"));

    let arn = desc.arn.ok_or_else(|| AsgError::MissingField {
        group: label.clone(),
        field: "AutoScalingGroupARN",
    })?;
    let name = desc.name.ok_or_else(|| AsgError::MissingField {
        group: label.clone(),
        field: "AutoScalingGroupName",
    })?;

    let fields = Fields {
        group: &name,
        policy,
    };
    let scale_out = mode == Mode::ScaleOut;

    Ok(AutoScaleGroup {
        launch_template: fields.get(desc.launch_template, "LaunchTemplate", true)?,
        target_group_arns: desc.target_group_arns.unwrap_or_default(),
        min_size: fields.get(desc.min_size, "MinSize", scale_out)?,
        max_size: fields.get(desc.max_size, "MaxSize", scale_out)?,
        desired_size: fields.get(desc.desired_capacity, "DesiredCapacity", scale_out)?,
        service_linked_role_arn: fields.get(
            desc.service_linked_role_arn,
            "ServiceLinkedRoleARN",
            scale_out,
        )?,
        instances: desc.instances.unwrap_or_default(),
        tags: desc.tags.unwrap_or_default(),
        name,
        arn,
    })
}

struct Fields<'a> {
    group: &'a str,
    policy: MissingFieldPolicy,
}

impl Fields<'_> {
    /// Unwrap a wire field. Optional fields and the `default` policy
    /// fall back to the type's sentinel.
    fn get<T: Default>(&self, value: Option<T>, field: &'static str, required: bool) -> AsgResult<T> {
        match value {
            Some(v) => Ok(v),
            None if !required => Ok(T::default()),
            None => match self.policy {
                MissingFieldPolicy::Abort => Err(AsgError::MissingField {
                    group: self.group.to_string(),
                    field,
                }),
                MissingFieldPolicy::Default => {
                    debug!(group = %self.group, field, "required field missing, using default");
                    Ok(T::default())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asg_core::{GroupInstance, LaunchTemplateRef};

    fn full_description(name: &str, min: i32, max: i32, desired: i32) -> GroupDescription {
        GroupDescription {
            arn: Some(format!("arn:aws:autoscaling:us-east-1:123:autoScalingGroup:{name}")),
            name: Some(name.to_string()),
            launch_template: Some(LaunchTemplateRef {
                id: Some("lt-0a1".to_string()),
                name: Some("etcd".to_string()),
                version: Some("$Default".to_string()),
            }),
            target_group_arns: Some(vec!["arn:tg/b".to_string(), "arn:tg/a".to_string()]),
            min_size: Some(min),
            max_size: Some(max),
            desired_capacity: Some(desired),
            service_linked_role_arn: Some("arn:aws:iam::123:role/asg".to_string()),
            instances: Some(vec![GroupInstance {
                instance_id: "i-1".to_string(),
                lifecycle_state: "InService".to_string(),
                health_status: "Healthy".to_string(),
                availability_zone: "us-east-1a".to_string(),
            }]),
            tags: None,
        }
    }

    #[test]
    fn one_entry_per_description_keyed_by_arn() {
        let descs = vec![
            full_description("GOOD-ASG", 2, 5, 4),
            full_description("OTHER-ASG", 1, 3, 1),
        ];

        let groups = transform(descs, Mode::ScaleOut, MissingFieldPolicy::Abort).unwrap();
        assert_eq!(groups.len(), 2);
        let good = &groups["arn:aws:autoscaling:us-east-1:123:autoScalingGroup:GOOD-ASG"];
        assert_eq!(good.name, "GOOD-ASG");
    }

    #[test]
    fn fields_copied_verbatim() {
        let desc = full_description("GOOD-ASG", 2, 5, 4);
        let expected_lt = desc.launch_template.clone().unwrap();
        let expected_instances = desc.instances.clone().unwrap();

        let groups = transform(vec![desc], Mode::ScaleOut, MissingFieldPolicy::Abort).unwrap();
        let group = groups.values().next().unwrap();

        assert_eq!(group.min_size, 2);
        assert_eq!(group.max_size, 5);
        assert_eq!(group.desired_size, 4);
        assert_eq!(group.launch_template, expected_lt);
        // Order preserved, not sorted.
        assert_eq!(group.target_group_arns, vec!["arn:tg/b", "arn:tg/a"]);
        assert_eq!(group.service_linked_role_arn, "arn:aws:iam::123:role/asg");
        assert_eq!(group.instances, expected_instances);
        assert!(group.tags.is_empty());
    }

    #[test]
    fn out_of_bounds_values_are_not_clamped() {
        let desc = full_description("ODD-ASG", 3, 2, 9);
        let groups = transform(vec![desc], Mode::ScaleOut, MissingFieldPolicy::Abort).unwrap();
        let group = groups.values().next().unwrap();
        assert_eq!((group.min_size, group.max_size, group.desired_size), (3, 2, 9));
    }

    #[test]
    fn empty_response_yields_empty_map() {
        let groups = transform(Vec::new(), Mode::ScaleOut, MissingFieldPolicy::Abort).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn missing_capacity_aborts_in_scale_out() {
        let mut desc = full_description("GOOD-ASG", 2, 5, 4);
        desc.max_size = None;

        let err = transform(vec![desc], Mode::ScaleOut, MissingFieldPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            AsgError::MissingField { ref group, field: "MaxSize" } if group == "GOOD-ASG"
        ));
    }

    #[test]
    fn missing_capacity_is_fine_in_describe() {
        let mut desc = full_description("GOOD-ASG", 2, 5, 4);
        desc.max_size = None;
        desc.service_linked_role_arn = None;

        let groups = transform(vec![desc], Mode::Describe, MissingFieldPolicy::Abort).unwrap();
        let group = groups.values().next().unwrap();
        assert_eq!(group.max_size, 0);
        assert_eq!(group.service_linked_role_arn, "");
    }

    #[test]
    fn missing_launch_template_aborts_in_describe() {
        let mut desc = full_description("GOOD-ASG", 2, 5, 4);
        desc.launch_template = None;

        let err = transform(vec![desc], Mode::Describe, MissingFieldPolicy::Abort).unwrap_err();
        assert!(matches!(err, AsgError::MissingField { field: "LaunchTemplate", .. }));
    }

    #[test]
    fn default_policy_substitutes_sentinels() {
        let mut desc = full_description("GOOD-ASG", 2, 5, 4);
        desc.desired_capacity = None;
        desc.launch_template = None;

        let groups = transform(vec![desc], Mode::ScaleOut, MissingFieldPolicy::Default).unwrap();
        let group = groups.values().next().unwrap();
        assert_eq!(group.desired_size, 0);
        assert_eq!(group.launch_template, LaunchTemplateRef::default());
    }

    #[test]
    fn identity_fields_always_abort() {
        let mut no_arn = full_description("GOOD-ASG", 2, 5, 4);
        no_arn.arn = None;
        let err = transform(vec![no_arn], Mode::Describe, MissingFieldPolicy::Default).unwrap_err();
        assert!(matches!(
            err,
            AsgError::MissingField { ref group, field: "AutoScalingGroupARN" } if group == "GOOD-ASG"
        ));

        let mut no_name = full_description("GOOD-ASG", 2, 5, 4);
        no_name.name = None;
        let err = transform(vec![no_name], Mode::Describe, MissingFieldPolicy::Default).unwrap_err();
        assert!(matches!(err, AsgError::MissingField { field: "AutoScalingGroupName", .. }));

        let anonymous = GroupDescription::default();
        let err = transform(vec![anonymous], Mode::Describe, MissingFieldPolicy::Default).unwrap_err();
        assert!(matches!(err, AsgError::MissingField { ref group, .. } if group == "#0"));
    }
}
