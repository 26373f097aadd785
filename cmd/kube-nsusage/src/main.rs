mod settings;

use clap::Parser;
use pkg_cluster::{KubeSource, collect};
use pkg_report::{RenderConfig, render};
use pkg_types::config::{ColorChoice, ReportConfigFile, load_config_file};
use settings::{Cli, Settings, default_config_path};
use std::io::IsTerminal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config file (returns defaults if file not found)
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let file_cfg: ReportConfigFile = load_config_file(&config_path)?;
    info!("Config file: {}", config_path);

    let settings = Settings::merge(cli, file_cfg)?;
    debug!("Settings: {:?}", settings);

    let source = KubeSource::connect(settings.kubeconfig.as_deref(), settings.context.as_deref())
        .await?;
    let reports = collect(&source, &settings.namespaces, settings.concurrency).await?;

    let config = RenderConfig {
        padding: settings.padding,
        min_value_width: settings.min_width,
        color: use_color(settings.color),
        summary: settings.summary,
        ..RenderConfig::default()
    };
    print!("{}", render(&reports, &config));

    Ok(())
}
