pub mod config;
pub mod error;
pub mod types;

pub use config::{AsgConfig, ConfigOverrides, ErrorPolicy, MissingFieldPolicy, Mode};
pub use error::{AsgError, AsgResult};
pub use types::*;
