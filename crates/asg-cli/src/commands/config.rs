use std::path::Path;

use asg_core::AsgConfig;

/// Print the effective configuration, or write it to `write`.
pub fn show(config: &AsgConfig, write: Option<&Path>) -> anyhow::Result<()> {
    let rendered = config.to_toml_string()?;

    match write {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asg_core::Mode;

    #[test]
    fn written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asgctl.toml");

        let mut config = AsgConfig::default();
        config.mode = Mode::Describe;
        config.group_name = "web-asg".to_string();
        show(&config, Some(&path)).unwrap();

        let loaded = AsgConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
