use anyhow::{Result, bail};

/// Validate a namespace name given on the command line or in the config file.
/// Namespaces are DNS labels: lowercase `[a-z0-9-]`, max 63 chars,
/// no leading/trailing hyphens.
pub fn validate_namespace(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("namespace must not be empty");
    }
    if name.len() > 63 {
        bail!("namespace '{}' exceeds 63 characters (got {})", name, name.len());
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("namespace '{}' must not start or end with a hyphen", name);
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        bail!(
            "namespace '{}' contains '{}'; only lowercase letters, digits, and hyphens [a-z0-9-] are allowed",
            name,
            bad
        );
    }
    Ok(())
}
