//! Filesystem path constants.

// ─── Kubeconfig ───────────────────────────────────────────────────────────

/// Environment variable that overrides the kubeconfig location.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Kubeconfig path relative to the user's home directory.
pub const DEFAULT_KUBECONFIG_RELATIVE: &str = ".kube/config";

// ─── Tool config ──────────────────────────────────────────────────────────

/// Config file path relative to the user's config directory
/// (`~/.config` on Linux).
pub const DEFAULT_CONFIG_RELATIVE: &str = "kube-nsusage/config.yaml";
