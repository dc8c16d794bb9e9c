//! 部署相关领域模型

use chrono::{DateTime, Utc};

/// 单次部署命令的执行结果
///
/// 命令启动失败时，错误信息写入 `stderr`，`exit_code` 为 `None`
#[derive(Clone, Debug, PartialEq)]
pub struct DeployOutcome {
    /// 捕获的标准输出
    pub stdout: String,
    /// 捕获的标准错误
    pub stderr: String,
    /// 退出码（被信号终止或启动失败时为 None）
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// 应写入日志的输出
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogOutput<'a> {
    Stdout(&'a str),
    Stderr(&'a str),
}

impl LogOutput<'_> {
    /// 去掉行尾换行符后的文本
    pub fn text(&self) -> &str {
        let raw = match self {
            LogOutput::Stdout(s) | LogOutput::Stderr(s) => s,
        };
        raw.trim_end_matches(['\r', '\n'])
    }
}

impl DeployOutcome {
    /// 命令正常结束
    pub fn completed(
        stdout: String,
        stderr: String,
        exit_code: Option<i32>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// 命令未能启动或等待失败
    pub fn launch_failed(error: impl std::fmt::Display, started_at: DateTime<Utc>) -> Self {
        Self {
            stdout: String::new(),
            stderr: error.to_string(),
            exit_code: None,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// stdout 非空时取 stdout，否则取非空的 stderr，两者都为空时不记录
    pub fn log_output(&self) -> Option<LogOutput<'_>> {
        if !self.stdout.is_empty() {
            Some(LogOutput::Stdout(&self.stdout))
        } else if !self.stderr.is_empty() {
            Some(LogOutput::Stderr(&self.stderr))
        } else {
            None
        }
    }

    /// 是否成功（退出码为 0）
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 持续时间（毫秒）
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
