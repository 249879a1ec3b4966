//! Shared types used across asgctl crates.
//!
//! [`GroupDescription`] mirrors what the provider returns for one group,
//! with every field optional. [`AutoScaleGroup`] is the local snapshot the
//! pipeline works on once the required fields have been checked.

use serde::{Deserialize, Serialize};

/// Unique identifier for a group: its ARN.
pub type GroupArn = String;

// ── Wire shape ─────────────────────────────────────────────────────

/// One group as described by the provider.
///
/// Nothing here is guaranteed to be present; the transform step decides
/// which absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupDescription {
    pub arn: Option<String>,
    pub name: Option<String>,
    pub launch_template: Option<LaunchTemplateRef>,
    pub target_group_arns: Option<Vec<String>>,
    pub min_size: Option<i32>,
    pub max_size: Option<i32>,
    pub desired_capacity: Option<i32>,
    pub service_linked_role_arn: Option<String>,
    pub instances: Option<Vec<GroupInstance>>,
    pub tags: Option<Vec<GroupTag>>,
}

// ── Local record ───────────────────────────────────────────────────

/// Snapshot of one auto scaling group at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoScaleGroup {
    pub arn: GroupArn,
    pub name: String,
    /// Launch template reference, passed through untouched.
    pub launch_template: LaunchTemplateRef,
    pub target_group_arns: Vec<String>,
    pub min_size: i32,
    pub max_size: i32,
    pub desired_size: i32,
    pub service_linked_role_arn: String,
    pub instances: Vec<GroupInstance>,
    pub tags: Vec<GroupTag>,
}

impl AutoScaleGroup {
    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

/// Launch template reference attached to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTemplateRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl LaunchTemplateRef {
    /// Human-readable label: name, falling back to id, plus version.
    pub fn label(&self) -> String {
        let base = self
            .name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("-");
        match &self.version {
            Some(v) => format!("{base} ({v})"),
            None => base.to_string(),
        }
    }
}

/// One instance currently in the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInstance {
    pub instance_id: String,
    /// Lifecycle state as reported, e.g. "InService" or "Warmed:Stopped".
    pub lifecycle_state: String,
    pub health_status: String,
    pub availability_zone: String,
}

impl GroupInstance {
    /// Case-insensitive state match. "stopped" matches "Warmed:Stopped".
    pub fn in_state(&self, state: &str) -> bool {
        let actual = self.lifecycle_state.as_str();
        actual.eq_ignore_ascii_case(state)
            || actual
                .rsplit_once(':')
                .is_some_and(|(_, last)| last.eq_ignore_ascii_case(state))
    }
}

/// A key/value tag on a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTag {
    pub key: String,
    pub value: String,
}
