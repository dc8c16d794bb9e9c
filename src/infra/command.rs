//! 命令执行器
//!
//! 启动子进程并捕获 stdout/stderr。不设超时，不支持取消：
//! 命令一旦启动就运行到结束。

use std::path::Path;
use std::process::{Output, Stdio};
use thiserror::Error;
use tokio::process::Command;

/// 命令执行器
pub struct CommandRunner;

/// 命令执行错误
#[derive(Debug, Error)]
pub enum CommandError {
    /// 命令启动失败（shell 不存在、工作目录不存在等）
    #[error("Failed to spawn command: {0}")]
    SpawnFailed(#[source] std::io::Error),
    /// 等待命令完成失败
    #[error("Failed to wait for command: {0}")]
    WaitFailed(#[source] std::io::Error),
}

impl CommandRunner {
    /// 执行命令并捕获全部输出
    ///
    /// # Arguments
    /// * `program` - 要执行的程序
    /// * `args` - 命令行参数
    /// * `work_dir` - 工作目录
    pub async fn run(
        program: &str,
        args: &[&str],
        work_dir: &Path,
    ) -> Result<Output, CommandError> {
        let child = Command::new(program)
            .args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(CommandError::SpawnFailed)?;

        child
            .wait_with_output()
            .await
            .map_err(CommandError::WaitFailed)
    }

    /// 执行 shell 命令
    ///
    /// 使用 sh -c 执行命令字符串
    pub async fn run_shell(command: &str, work_dir: &Path) -> Result<Output, CommandError> {
        Self::run("sh", &["-c", command], work_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_success() {
        let dir = tempfile::tempdir().unwrap();
        let output = CommandRunner::run("echo", &["hello"], dir.path()).await.unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_shell_separates_streams() {
        let dir = tempfile::tempdir().unwrap();
        let output = CommandRunner::run_shell("echo out && echo err >&2 && exit 3", dir.path())
            .await
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout), "out\n");
        assert_eq!(String::from_utf8_lossy(&output.stderr), "err\n");
    }

    #[tokio::test]
    async fn test_run_shell_uses_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let output = CommandRunner::run_shell("cat marker.txt", dir.path()).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "here");
    }

    #[tokio::test]
    async fn test_run_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = CommandRunner::run("nonexistent_command_12345", &[], dir.path()).await;

        assert!(matches!(result, Err(CommandError::SpawnFailed(_))));
    }

    #[tokio::test]
    async fn test_missing_work_dir_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = CommandRunner::run_shell("true", &missing).await;

        let err = result.unwrap_err();
        assert!(matches!(err, CommandError::SpawnFailed(_)));
        assert!(err.to_string().starts_with("Failed to spawn command"));
    }
}
