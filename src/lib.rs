//! Deploy Hook - webhook 部署触发器
//!
//! 监听 HTTP 请求，收到 POST 时在后台执行 `git pull && pm2 restart <name>`，
//! 所有请求都立即返回 `Webhook received`。

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod server;
pub mod services;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::env::constants::{DEFAULT_LOG_FILTER, VERSION};
use crate::config::EnvConfig;
use crate::error::AgentResult;
use crate::state::{get_shutdown_token, AppState};

pub use crate::error::AgentError;

/// 命令行传入的运行时配置
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// 覆盖环境变量中的端口
    pub port_override: Option<u16>,
}

/// 初始化日志，过滤表达式无效时退回默认值
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 合并环境变量和命令行配置
pub fn load_config(runtime: &RuntimeConfig) -> EnvConfig {
    let mut config = EnvConfig::from_env();
    if let Some(port) = runtime.port_override {
        config.port = port;
    }
    config
}

/// 启动服务，直到收到退出信号
pub async fn init_and_run_agent_with_config(runtime: RuntimeConfig) -> AgentResult<()> {
    let config = load_config(&runtime);

    info!(
        version = VERSION,
        work_dir = %config.deploy.work_dir,
        restart_target = %config.deploy.restart_target,
        "Starting deploy hook"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = server::bind(addr).await?;

    let state = Arc::new(AppState::new(config));

    let shutdown = get_shutdown_token();
    tokio::spawn(server::shutdown_signal());

    server::serve(listener, state, async move { shutdown.cancelled().await }).await
}
