//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::CliConfig;
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Dumps the configuration as TOML with literal secrets masked.
pub fn dump(config: &CliConfig, path: &Path, out: &mut impl Write) -> ClientResult<()> {
    let mut masked = config.clone();
    let credentials = &mut masked.credentials;
    for value in [
        &mut credentials.client_secret,
        &mut credentials.access_token,
        &mut credentials.refresh_token,
    ] {
        mask(value);
    }

    let toml_str = toml::to_string_pretty(&masked).map_err(|e| {
        ClientError::Config(format!("failed to serialize config: {}", e))
    })?;
    writeln!(out, "# config.toml ({})", path.display())?;
    writeln!(out, "{}", toml_str)?;
    Ok(())
}

fn mask(value: &mut Option<String>) {
    if let Some(v) = value
        && !secret::is_reference(v)
    {
        *v = "********".to_string();
    }
}

/// Validates the configuration, resolving secret references.
pub fn validate(config: &CliConfig, out: &mut impl Write) -> ClientResult<()> {
    config.validate()?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Shows the configuration file path.
pub fn path(path: &Path, out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "config: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_masks_literal_secrets() {
        let config = CliConfig::parse(concat!(
            "[credentials]\n",
            "client_id = \"cid\"\n",
            "client_secret = \"plain\"\n",
            "access_token = \"tok\"\n",
            "refresh_token = \"env::REFRESH\"\n",
        ))
        .unwrap();

        let mut out = Vec::new();
        dump(&config, Path::new("/tmp/config.toml"), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.starts_with("# config.toml (/tmp/config.toml)"));
        assert!(printed.contains("client_id = \"cid\""));
        assert!(!printed.contains("plain"));
        assert!(!printed.contains("\"tok\""));
        assert!(printed.contains("env::REFRESH"));
    }

    #[test]
    fn validate_reports_missing_credentials() {
        let config = CliConfig::default();
        assert!(validate(&config, &mut Vec::new()).is_err());

        let config =
            CliConfig::parse("[credentials]\nclient_id = \"i\"\nclient_secret = \"s\"\n").unwrap();
        let mut out = Vec::new();
        validate(&config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Configuration is valid.\n");
    }
}
