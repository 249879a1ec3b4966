//! asgctl — describe an AWS Auto Scaling Group and scale it out by one.
//!
//! # Usage
//!
//! ```text
//! asgctl scale-out --group-name GOOD-ASG --profile private --region us-east-1
//! asgctl describe --config asgctl.toml --format json
//! asgctl config --write asgctl.toml
//! ```
//!
//! Settings come from defaults, then `--config`, then `ASGCTL_*`
//! environment variables and flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use asg_core::{AsgConfig, ConfigOverrides, ErrorPolicy, MissingFieldPolicy, Mode};

mod commands;

#[derive(Parser)]
#[command(
    name = "asgctl",
    about = "Describe an AWS Auto Scaling Group and scale it out by one",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    opts: GlobalOpts,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the group's current state without changing it
    Describe,
    /// Raise the group's desired capacity by one, within its bounds
    ScaleOut,
    /// Print the effective configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

#[derive(Args)]
struct GlobalOpts {
    /// Path to an asgctl.toml file
    #[arg(short, long, global = true, env = "ASGCTL_CONFIG")]
    config: Option<PathBuf>,

    /// AWS credential profile
    #[arg(long, global = true, env = "ASGCTL_PROFILE")]
    profile: Option<String>,

    /// AWS region
    #[arg(long, global = true, env = "ASGCTL_REGION")]
    region: Option<String>,

    /// Tag key checked in describe mode ("tag:" prefix accepted)
    #[arg(long, global = true, env = "ASGCTL_TAG_KEY")]
    tag_key: Option<String>,

    /// Tag value checked in describe mode
    #[arg(long, global = true, env = "ASGCTL_TAG_VALUE")]
    tag_value: Option<String>,

    /// Instance lifecycle state listed in describe mode
    #[arg(long, global = true, env = "ASGCTL_STATE_FILTER")]
    state_filter: Option<String>,

    /// Auto scaling group name
    #[arg(short, long, global = true, env = "ASGCTL_GROUP_NAME")]
    group_name: Option<String>,

    /// MaxRecords for the describe call (1-100)
    #[arg(long, global = true, env = "ASGCTL_RESULT_LIMIT")]
    result_limit: Option<i32>,

    /// Mode when no subcommand is given: describe or scale-out
    #[arg(long, global = true, env = "ASGCTL_MODE")]
    mode: Option<Mode>,

    /// Missing required response fields: abort or default
    #[arg(long, global = true, env = "ASGCTL_MISSING_FIELDS")]
    missing_fields: Option<MissingFieldPolicy>,

    /// After a failed group: halt or continue
    #[arg(long, global = true, env = "ASGCTL_ON_ERROR")]
    on_error: Option<ErrorPolicy>,

    /// Report format: text or json
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Log format: text or json
    #[arg(
        long,
        global = true,
        default_value = "text",
        env = "ASGCTL_LOG_FORMAT",
        value_parser = ["text", "json"],
    )]
    log_format: String,
}

impl GlobalOpts {
    fn overrides(&self, mode: Option<Mode>) -> ConfigOverrides {
        ConfigOverrides {
            profile: self.profile.clone(),
            region: self.region.clone(),
            tag_key: self.tag_key.clone(),
            tag_value: self.tag_value.clone(),
            state_filter: self.state_filter.clone(),
            group_name: self.group_name.clone(),
            result_limit: self.result_limit,
            mode: mode.or(self.mode),
            missing_fields: self.missing_fields,
            on_error: self.on_error,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.opts.log_format)?;

    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Config { write }) => commands::config::show(&config, write.as_deref()),
        _ => commands::run::run(&config, &cli.opts.format).await,
    }
}

/// Defaults, then the config file, then env vars and flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<AsgConfig> {
    // A subcommand pins the mode over --mode and the config file.
    let mode = match &cli.command {
        Some(Commands::Describe) => Some(Mode::Describe),
        Some(Commands::ScaleOut) => Some(Mode::ScaleOut),
        Some(Commands::Config { .. }) | None => None,
    };

    Ok(AsgConfig::load(cli.opts.config.as_deref())?.with_overrides(cli.opts.overrides(mode)))
}

fn init_tracing(log_format: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("asgctl=info".parse()?)
        .add_directive("asg_autoscale=info".parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match log_format {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}
