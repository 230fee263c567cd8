//! pipeline-acl server binary

#![allow(missing_docs)]

use clap::Parser;
use pipeline_acl::config::Config;
use pipeline_acl::utils::init_logging;
use pipeline_acl::{Result, build_info, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Pipeline ACL service
#[derive(Debug, Parser)]
#[command(name = "acl-server", version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "ACL_CONFIG", default_value = "config/acl.yaml")]
    config: PathBuf,

    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

async fn load_config(args: &Args) -> Result<(Config, bool)> {
    let from_file = args.config.exists();
    let mut config = if from_file {
        Config::from_file(&args.config).await?
    } else {
        Config::default()
    };

    config = config.apply_env()?;
    if let Some(host) = &args.host {
        config.service.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.service.server.port = port;
    }
    config.validate()?;
    Ok((config, from_file))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (config, from_file) = match load_config(&args).await {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let build = build_info();
    info!(
        version = build.version,
        git_hash = build.git_hash,
        "pipeline-acl starting"
    );
    if !from_file {
        warn!(
            "Configuration file {} not found, using defaults",
            args.config.display()
        );
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
