use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webshell::dialog::{self, MessageLevel};
use webshell::runtime::{missing_runtime_message, RUNTIME_MISSING_TITLE};
use webshell::{paths, LaunchPlan, ShellConfig, ShellError};

#[derive(Parser)]
#[command(name = "webshell")]
#[command(about = "Host a local web UI in a native window", long_about = None)]
struct Cli {
    /// Config file or directory containing shell.toml (default: next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entry page relative to the working directory, overrides [webview] entry
    #[arg(short, long)]
    entry: Option<PathBuf>,

    /// Window title, overrides [window] title
    #[arg(long)]
    title: Option<String>,

    /// Enable or disable devtools, overrides [webview] devtools
    #[arg(long)]
    devtools: Option<bool>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match launch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell failed to start");
            match e {
                ShellError::RuntimeUnavailable(_) => {
                    dialog::show(RUNTIME_MISSING_TITLE, &missing_runtime_message(), MessageLevel::Error)
                }
                other => dialog::show("Error", &other.to_string(), MessageLevel::Error),
            }
            ExitCode::FAILURE
        }
    }
}

fn launch(cli: Cli) -> webshell::Result<()> {
    let base = paths::exe_dir()?;
    let mut config = match cli.config {
        Some(path) => ShellConfig::load_file(&path)?,
        None => ShellConfig::load(&base)?,
    };
    if let Some(entry) = cli.entry {
        config.webview.entry = std::env::current_dir()?.join(entry).to_string_lossy().into_owned();
    }
    if let Some(title) = cli.title {
        config.window.title = title;
    }
    if let Some(devtools) = cli.devtools {
        config.webview.devtools = devtools;
    }

    let plan = LaunchPlan::from_config(&config, &base)?;
    webshell::run(plan)
}
