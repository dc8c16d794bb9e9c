//! HTTP 服务启动
//!
//! 绑定端口失败是致命错误，直接返回给调用方，不尝试其他端口。

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api;
use crate::error::{AgentError, AgentResult};
use crate::state::{trigger_shutdown, AppState};

/// 绑定监听地址，成功后输出一行就绪日志
pub async fn bind(addr: SocketAddr) -> AgentResult<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AgentError::Bind { addr, source })?;

    let port = listener.local_addr().map(|a| a.port()).unwrap_or(addr.port());
    info!("🚀 Webhook server listening on port {}", port);

    Ok(listener)
}

/// 在已绑定的 listener 上提供服务，直到 `shutdown` 完成
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> AgentResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = api::router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(AgentError::Serve)
}

/// 等待 Ctrl-C 或 SIGTERM，然后触发全局 shutdown
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
    trigger_shutdown();
}
