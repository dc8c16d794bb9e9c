//! 环境变量配置加载

use std::env;
use std::path::PathBuf;
use tracing::warn;

use self::constants::{DEFAULT_PORT, DEFAULT_RESTART_TARGET, DEFAULT_WORK_DIR};

/// 环境配置
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// 服务监听端口
    pub port: u16,
    /// 部署命令配置
    pub deploy: DeployConfig,
}

/// 部署命令配置
#[derive(Clone, Debug, PartialEq)]
pub struct DeployConfig {
    /// 工作目录，可以 `~` 开头
    pub work_dir: String,
    /// pm2 中要重启的进程名
    pub restart_target: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Port - 兼容通用的 PORT
        let port = match load_with_fallback(&lookup, "DEPLOY_HOOK_PORT", "PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "Invalid port, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let work_dir = lookup("DEPLOY_HOOK_WORK_DIR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_WORK_DIR.to_string());

        let restart_target = lookup("DEPLOY_HOOK_RESTART_TARGET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RESTART_TARGET.to_string());

        Self {
            port,
            deploy: DeployConfig {
                work_dir,
                restart_target,
            },
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl DeployConfig {
    /// 部署命令：拉取最新代码并重启 pm2 进程
    pub fn command(&self) -> String {
        format!("git pull && pm2 restart {}", self.restart_target)
    }

    /// 展开 `~` 后的工作目录
    pub fn resolved_work_dir(&self) -> PathBuf {
        expand_home(&self.work_dir, home::home_dir())
    }
}

/// 把开头的 `~` 替换为 home 目录；找不到 home 时原样返回
fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// 加载配置项，支持 fallback
fn load_with_fallback(
    lookup: &impl Fn(&str) -> Option<String>,
    primary: &str,
    fallback: &str,
) -> Option<String> {
    lookup(primary).or_else(|| lookup(fallback))
}

/// 常量
pub mod constants {
    /// 默认监听端口
    pub const DEFAULT_PORT: u16 = 9000;

    /// 默认工作目录
    pub const DEFAULT_WORK_DIR: &str = "~/stockaffirm-agent";

    /// 默认 pm2 进程名
    pub const DEFAULT_RESTART_TARGET: &str = "stockaffirm";

    /// 默认日志过滤
    pub const DEFAULT_LOG_FILTER: &str = "deploy_hook=info,tower_http=info";

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
