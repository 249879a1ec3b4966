//! Error types for asgctl.

use thiserror::Error;

/// Result type alias for asgctl operations.
pub type AsgResult<T> = Result<T, AsgError>;

/// Errors that can occur while describing or scaling a group.
#[derive(Debug, Error)]
pub enum AsgError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("can not create AWS client: {0}")]
    Client(String),

    #[error("describe auto scaling groups failed: {0}")]
    Fetch(String),

    #[error("group {group}: required field `{field}` missing from response")]
    MissingField { group: String, field: &'static str },

    #[error("ASG can not be scaled out -> ASG max size exceeded ({group}: desired {desired}, max {max})")]
    MaxSizeExceeded { group: String, desired: i32, max: i32 },

    #[error("ASG can not be scaled out -> ASG min size bigger ({group}: desired {desired}, min {min})")]
    MinSizeViolated { group: String, desired: i32, min: i32 },

    #[error("set desired capacity failed for {group}: {message}")]
    SetCapacity { group: String, message: String },
}

impl AsgError {
    /// Whether this error is a capacity-bounds rejection (no API call was made).
    pub fn is_bounds_rejection(&self) -> bool {
        matches!(
            self,
            AsgError::MaxSizeExceeded { .. } | AsgError::MinSizeViolated { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_rejections_are_classified() {
        let max = AsgError::MaxSizeExceeded {
            group: "GOOD-ASG".to_string(),
            desired: 6,
            max: 5,
        };
        let fetch = AsgError::Fetch("throttled".to_string());

        assert!(max.is_bounds_rejection());
        assert!(!fetch.is_bounds_rejection());
        assert!(max.to_string().contains("max size exceeded"));
    }
}
