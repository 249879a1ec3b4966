//! Run report and its human-readable rendering.

use serde::Serialize;

use asg_core::{AutoScaleGroup, Mode};

/// Everything a run did, one entry per processed group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub groups: Vec<GroupOutcome>,
    /// Groups left unprocessed after a failure under the `halt` policy.
    pub skipped: usize,
}

impl RunReport {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            groups: Vec::new(),
            skipped: 0,
        }
    }

    pub fn failures(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g.outcome, Outcome::Failed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOutcome {
    pub arn: String,
    pub name: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Describe mode: the snapshot plus the filter annotations.
    Described {
        group: AutoScaleGroup,
        /// Whether the group carries the configured tag.
        tag_match: bool,
        /// Instances in the configured lifecycle state.
        matching_instances: Vec<String>,
    },
    ScaledOut { from: i32, to: i32 },
    Failed { error: String },
}

/// Render a report the way it is printed to stdout.
pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();

    if report.groups.is_empty() {
        out.push_str("No auto scaling groups found\n");
        return out;
    }

    for entry in &report.groups {
        out.push_str(&format!("ASG name: {}\n", entry.name));
        match &entry.outcome {
            Outcome::Described {
                group,
                tag_match,
                matching_instances,
            } => {
                out.push_str(&format!("  ARN:             {}\n", group.arn));
                out.push_str(&format!(
                    "  Launch template: {}\n",
                    group.launch_template.label()
                ));
                let tgs = if group.target_group_arns.is_empty() {
                    "-".to_string()
                } else {
                    group.target_group_arns.join(", ")
                };
                out.push_str(&format!("  Target groups:   {tgs}\n"));
                out.push_str(&format!(
                    "  Capacity:        min {} / desired {} / max {}\n",
                    group.min_size, group.desired_size, group.max_size
                ));
                out.push_str(&format!("  Instances:       {}\n", group.instances.len()));
                out.push_str(&format!(
                    "  Tag match:       {}\n",
                    if *tag_match { "yes" } else { "no" }
                ));
                if !matching_instances.is_empty() {
                    out.push_str(&format!(
                        "  In state:        {}\n",
                        matching_instances.join(", ")
                    ));
                }
            }
            Outcome::ScaledOut { from, to } => {
                out.push_str(&format!(
                    "Scale out was successfully completed: desired {from} -> {to}\n"
                ));
            }
            Outcome::Failed { error } => {
                out.push_str(&format!("Error: {error}\n"));
            }
        }
    }

    if report.skipped > 0 {
        out.push_str(&format!(
            "Error: stopped after first failure, {} group(s) not processed\n",
            report.skipped
        ));
    }

    out
}
