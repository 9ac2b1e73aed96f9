//! CLI handler for inspecting configuration.

use crate::config::Config;
use anyhow::Result;
use std::path::Path;

use super::args::{ConfigCliArgs, ConfigCommand};

const REDACTED: &str = "********";

pub fn handle_config_command(
    config: &Config,
    config_path: &Path,
    args: ConfigCliArgs,
) -> Result<()> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Show => {
            let redacted = redact(config);
            println!("{}", toml::to_string_pretty(&redacted)?);
            if config.zoom.credentials().is_none() {
                eprintln!(
                    "Zoom credentials are incomplete: set account_id, client_id and client_secret."
                );
            }
        }
    }

    Ok(())
}

fn redact(config: &Config) -> Config {
    let mut redacted = config.clone();
    for secret in [
        &mut redacted.zoom.client_secret,
        &mut redacted.access.access_key,
    ] {
        if !secret.is_empty() {
            *secret = REDACTED.to_string();
        }
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_secrets_only() {
        let mut config = Config::default();
        config.zoom.client_id = "client".to_string();
        config.zoom.client_secret = "hunter2".to_string();

        let redacted = redact(&config);
        assert_eq!(redacted.zoom.client_id, "client");
        assert_eq!(redacted.zoom.client_secret, REDACTED);
        assert_eq!(redacted.access.access_key, "");
    }
}
