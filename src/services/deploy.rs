//! Deploy execution
//!
//! `DeployTarget` 抽象被部署的对象（工作目录 + pm2 进程），
//! `DeployLauncher` 负责把一次部署交给后台任务并在完成后记录输出。
//!
//! 没有并发保护：每次 trigger 都是独立的 tokio 任务，多个部署可以同时运行。

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::DeployConfig;
use crate::domain::deploy::{DeployOutcome, LogOutput};
use crate::infra::CommandRunner;

/// 完成通知通道容量
const REPORT_CHANNEL_CAPACITY: usize = 64;

/// 部署目标
///
/// 执行一次完整的部署并返回结果。失败也通过 `DeployOutcome` 表达，不返回错误。
#[async_trait]
pub trait DeployTarget: Send + Sync {
    async fn deploy(&self) -> DeployOutcome;
}

/// 通过 shell 执行部署命令
#[derive(Clone, Debug)]
pub struct ShellTarget {
    command: String,
    work_dir: PathBuf,
}

impl ShellTarget {
    pub fn new(command: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            work_dir: work_dir.into(),
        }
    }

    /// `git pull && pm2 restart <name>`，在配置的工作目录中执行
    pub fn from_config(config: &DeployConfig) -> Self {
        Self::new(config.command(), config.resolved_work_dir())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn work_dir(&self) -> &std::path::Path {
        &self.work_dir
    }
}

#[async_trait]
impl DeployTarget for ShellTarget {
    async fn deploy(&self) -> DeployOutcome {
        let started_at = Utc::now();

        match CommandRunner::run_shell(&self.command, &self.work_dir).await {
            Ok(output) => DeployOutcome::completed(
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
                output.status.code(),
                started_at,
            ),
            Err(e) => DeployOutcome::launch_failed(e, started_at),
        }
    }
}

/// 部署启动器
///
/// `trigger` 立即返回；部署在后台任务中运行，完成后写日志并广播结果。
#[derive(Clone)]
pub struct DeployLauncher {
    target: Arc<dyn DeployTarget>,
    reports: broadcast::Sender<DeployOutcome>,
}

impl DeployLauncher {
    pub fn new(target: Arc<dyn DeployTarget>) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
        Self { target, reports }
    }

    /// 在后台启动一次部署
    pub fn trigger(&self) -> JoinHandle<()> {
        let target = self.target.clone();
        let reports = self.reports.clone();

        debug!("Launching deploy command");
        tokio::spawn(async move {
            let outcome = target.deploy().await;
            log_outcome(&outcome);
            // 没有订阅者时发送失败，忽略
            let _ = reports.send(outcome);
        })
    }

    /// 订阅部署完成通知
    pub fn subscribe(&self) -> broadcast::Receiver<DeployOutcome> {
        self.reports.subscribe()
    }
}

/// stdout 优先，其次 stderr，都为空则不输出
fn log_outcome(outcome: &DeployOutcome) {
    match outcome.log_output() {
        Some(out @ LogOutput::Stdout(_)) => info!("{}", out.text()),
        Some(out @ LogOutput::Stderr(_)) => warn!("{}", out.text()),
        None => {}
    }

    debug!(
        exit_code = ?outcome.exit_code,
        duration_ms = outcome.duration_ms(),
        "Deploy command finished"
    );
}
