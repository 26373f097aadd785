use anyhow::{Context, Result};
use clap::Parser;
use pkg_constants::cluster::DEFAULT_CONCURRENCY;
use pkg_constants::paths::{DEFAULT_CONFIG_RELATIVE, DEFAULT_KUBECONFIG_RELATIVE, KUBECONFIG_ENV};
use pkg_constants::report::{DEFAULT_MIN_VALUE_WIDTH, DEFAULT_PADDING};
use pkg_types::config::{ColorChoice, ReportConfigFile};
use pkg_types::validate::validate_namespace;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kube-nsusage",
    version,
    about = "Per-namespace CPU and memory requests/limits"
)]
pub struct Cli {
    /// Path to YAML config file [default: ~/.config/kube-nsusage/config.yaml]
    #[arg(long, short)]
    pub config: Option<String>,

    /// Kubeconfig to use instead of $KUBECONFIG or ~/.kube/config
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Report only this namespace (repeatable, kept in the given order)
    #[arg(long = "namespace", short = 'n')]
    pub namespaces: Vec<String>,

    /// Namespaces queried at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Spaces after the widest name and value
    #[arg(long)]
    pub padding: Option<usize>,

    /// Narrowest value column
    #[arg(long)]
    pub min_width: Option<usize>,

    /// Colorize output: auto, always or never
    #[arg(long)]
    pub color: Option<ColorChoice>,

    /// Show pod and container counts per namespace
    #[arg(long)]
    pub summary: bool,

    /// Log debug output to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Effective settings after merging CLI args, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespaces: Vec<String>,
    pub concurrency: usize,
    pub padding: usize,
    pub min_width: usize,
    pub color: ColorChoice,
    pub summary: bool,
}

impl Settings {
    /// Merge: CLI args > config file > defaults.
    pub fn merge(cli: Cli, file: ReportConfigFile) -> Result<Self> {
        let namespaces = if cli.namespaces.is_empty() {
            file.namespaces
        } else {
            cli.namespaces
        };
        for ns in &namespaces {
            validate_namespace(ns).with_context(|| format!("Invalid namespace '{}'", ns))?;
        }

        let kubeconfig = cli
            .kubeconfig
            .or(file.kubeconfig)
            .map(PathBuf::from)
            .or_else(default_kubeconfig);

        Ok(Self {
            kubeconfig,
            context: cli.context.or(file.context),
            namespaces,
            concurrency: cli
                .concurrency
                .or(file.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            padding: cli.padding.or(file.padding).unwrap_or(DEFAULT_PADDING),
            min_width: cli
                .min_width
                .or(file.min_width)
                .unwrap_or(DEFAULT_MIN_VALUE_WIDTH),
            color: cli.color.or(file.color).unwrap_or_default(),
            summary: cli.summary || file.summary.unwrap_or(false),
        })
    }
}

/// `~/.config/kube-nsusage/config.yaml`, or a relative path when there is no
/// config directory.
pub fn default_config_path() -> String {
    dirs::config_dir()
        .map(|dir| dir.join(DEFAULT_CONFIG_RELATIVE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_RELATIVE))
        .to_string_lossy()
        .into_owned()
}

/// `$KUBECONFIG` if set, else `~/.kube/config` if it exists. `None` leaves
/// the choice to client inference (including in-cluster config).
fn default_kubeconfig() -> Option<PathBuf> {
    resolve_kubeconfig(std::env::var_os(KUBECONFIG_ENV), dirs::home_dir())
}

fn resolve_kubeconfig(env: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        // May hold several paths; inference merges them.
        if std::env::split_paths(&path).count() == 1 {
            return Some(PathBuf::from(path));
        }
        return None;
    }
    home.map(|home| home.join(DEFAULT_KUBECONFIG_RELATIVE))
        .filter(|path| path.exists())
}
