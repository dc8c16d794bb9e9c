//! Webhook 接收
//!
//! 只检查请求方法：POST 触发部署，其余方法只返回确认。
//! 请求体、header、路径和 query 都不读取，也没有认证。

use axum::{extract::State, http::Method};
use std::sync::Arc;

use crate::state::AppState;

/// 固定的响应内容
pub const ACK_BODY: &str = "Webhook received";

/// 接收 webhook
///
/// ANY /*
/// 不等待部署完成，部署结果也不影响响应
pub async fn receive(State(state): State<Arc<AppState>>, method: Method) -> &'static str {
    if method == Method::POST {
        // 后台运行，handle 直接丢弃
        drop(state.launcher.trigger());
    }

    ACK_BODY
}
