//! Deploy Hook - webhook 部署触发器
//!
//! Usage:
//! - Normal mode: `deploy-hook`
//! - With custom port: `deploy-hook --port 19000`
//! - Verbose logs: `deploy-hook --log-level deploy_hook=debug,tower_http=debug`

use clap::Parser;
use deploy_hook::config::env::constants::DEFAULT_LOG_FILTER;
use deploy_hook::RuntimeConfig;

/// Webhook listener that pulls a working copy and restarts a pm2 process
#[derive(Parser, Debug)]
#[command(name = "deploy-hook", version, about)]
struct Args {
    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "deploy_hook=debug,tower_http=info")
    #[arg(short, long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    deploy_hook::init_tracing(&args.log_level);

    let config = RuntimeConfig {
        port_override: args.port,
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let result = rt.block_on(deploy_hook::init_and_run_agent_with_config(config));

    if let Err(e) = result {
        tracing::error!(error = %e, "Deploy hook exited with error");
        std::process::exit(1);
    }
}
