//! API 模块
//!
//! HTTP handlers 和路由组装

pub mod webhook;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 构建完整的 API 路由
///
/// 没有具体路由：任何方法、任何路径都由 webhook handler 处理
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(webhook::receive)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
