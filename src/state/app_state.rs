//! 应用状态

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::EnvConfig;
use crate::services::deploy::{DeployLauncher, DeployTarget, ShellTarget};

/// 全局 shutdown token，用于优雅关闭 HTTP 服务
static GLOBAL_SHUTDOWN: std::sync::OnceLock<CancellationToken> = std::sync::OnceLock::new();

/// 获取全局 shutdown token
pub fn get_shutdown_token() -> CancellationToken {
    GLOBAL_SHUTDOWN
        .get_or_init(CancellationToken::new)
        .clone()
}

/// 触发全局 shutdown
pub fn trigger_shutdown() {
    if let Some(token) = GLOBAL_SHUTDOWN.get() {
        token.cancel();
    }
}

/// 应用状态
///
/// handler 之间没有共享的可变状态，部署之间互不等待
pub struct AppState {
    /// 环境配置
    pub config: EnvConfig,
    /// 部署启动器
    pub launcher: DeployLauncher,
}

impl AppState {
    /// 使用 shell 部署目标创建状态
    pub fn new(config: EnvConfig) -> Self {
        let target = ShellTarget::from_config(&config.deploy);
        debug!(
            command = target.command(),
            work_dir = %target.work_dir().display(),
            "Deploy target configured"
        );
        Self::with_target(config, Arc::new(target))
    }

    /// 使用自定义部署目标创建状态
    pub fn with_target(config: EnvConfig, target: Arc<dyn DeployTarget>) -> Self {
        Self {
            config,
            launcher: DeployLauncher::new(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_defaults() {
        let state = AppState::new(EnvConfig::default());
        assert_eq!(state.config.port, 9000);
        assert_eq!(state.config.deploy.restart_target, "stockaffirm");
    }

    #[tokio::test]
    async fn test_with_target_wires_launcher() {
        use crate::domain::DeployOutcome;
        use async_trait::async_trait;
        use chrono::Utc;

        struct Noop;

        #[async_trait]
        impl DeployTarget for Noop {
            async fn deploy(&self) -> DeployOutcome {
                DeployOutcome::completed("noop".into(), String::new(), Some(0), Utc::now())
            }
        }

        let state = AppState::with_target(EnvConfig::default(), Arc::new(Noop));
        let mut rx = state.launcher.subscribe();
        state.launcher.trigger().await.unwrap();

        assert_eq!(rx.recv().await.unwrap().stdout, "noop");
    }
}
