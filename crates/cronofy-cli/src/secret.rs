//! Secret reference resolver.
//!
//! Credential values in `config.toml` can point at secrets kept outside the
//! file:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and takes the first line
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is used as written

/// Resolves a value that may carry a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

/// Returns true when `value` is a reference rather than a literal secret.
pub fn is_reference(value: &str) -> bool {
    value.starts_with("pass::") || value.starts_with("env::")
}

fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(resolve("").unwrap(), "");
        let name = "CRONOFY_CLIENT_SECRET";
        assert_eq!(resolve(name).unwrap(), name);
        assert!(!is_reference("sk_live_123"));
    }

    #[test]
    fn env_prefix_resolves() {
        unsafe {
            std::env::set_var("_CRONOFY_TEST_SECRET", "s3cr3t");
        }
        assert!(is_reference("env::_CRONOFY_TEST_SECRET"));
        assert_eq!(resolve("env::_CRONOFY_TEST_SECRET").unwrap(), "s3cr3t");
        unsafe {
            std::env::remove_var("_CRONOFY_TEST_SECRET");
        }
    }

    #[test]
    fn env_prefix_missing_var_errors() {
        let err = resolve("env::_CRONOFY_UNSET_VAR_98765").unwrap_err();
        assert!(err.contains("not set"));
    }

    #[test]
    fn pass_prefix_unknown_entry_errors() {
        assert!(resolve("pass::cronofy/no/such/entry/98765").is_err());
    }
}
