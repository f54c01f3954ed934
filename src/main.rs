use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use sftp_deploy::config::DeployConfig;
use sftp_deploy::deploy::DeployEngine;
use sftp_deploy::report::ConsoleReporter;
use sftp_deploy::store::SftpConnector;

/// Mirror a local build directory onto a remote server over SFTP.
///
/// The remote target directory is cleared and fully repopulated on every
/// run; treat any failed run as "state unknown, re-run from scratch".
#[derive(Debug, Parser)]
#[command(name = "sftp-deploy", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "deploy.toml")]
    config: PathBuf,

    /// Local source directory override.
    #[arg(long)]
    local_dir: Option<String>,

    /// Remote target directory override.
    #[arg(long)]
    remote_dir: Option<String>,

    /// Remote host override.
    #[arg(long)]
    host: Option<String>,

    /// Remote port override.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        DeployConfig::from_file(&cli.config)?
    } else {
        DeployConfig::default()
    };

    if let Some(local_dir) = cli.local_dir {
        config.local_dir = local_dir;
    }
    if let Some(remote_dir) = cli.remote_dir {
        config.remote_dir = remote_dir;
    }
    if let Some(host) = cli.host {
        config.connection.host = host;
    }
    if let Some(port) = cli.port {
        config.connection.port = port;
    }

    let connector = Arc::new(SftpConnector::new(config.connection.clone()));
    let reporter = Arc::new(ConsoleReporter::new());

    let mut engine = DeployEngine::new(config, connector, reporter);

    // The engine already reported the failure; only the exit code is left
    if engine.run().await.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
