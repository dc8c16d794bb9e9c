//! 统一错误处理
//!
//! 只有启动和运行 HTTP 服务会产生错误；部署命令的失败只写入日志，不会到达调用方

use std::net::SocketAddr;
use thiserror::Error;

/// 服务错误
#[derive(Debug, Error)]
pub enum AgentError {
    /// 端口被占用或权限不足，启动失败，不重试
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// 服务运行中出错
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// 便捷类型别名
pub type AgentResult<T> = Result<T, AgentError>;
