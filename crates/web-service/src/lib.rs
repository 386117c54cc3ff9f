//! Web服务模块
//!
//! 提供进度表单的 HTTP API、单页表单和在线文档

use color_eyre::Result;
use database::{LogEntryRepositoryTrait, ProjectRegistryTrait};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

pub use services::{FormController, SubmissionPolicies};

/// 应用共享状态
///
/// 服务端不保存会话，这里只放控制器（内部持有日志仓库和注册表）
pub struct AppState<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait> {
    pub controller: Arc<FormController<LR, PR>>,
}

// 手动实现，避免 derive 给 LR/PR 加上 Clone 约束
impl<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait> Clone for AppState<LR, PR> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

/// 启动 Web 服务
pub async fn start_web_service<LR, PR>(
    state: AppState<LR, PR>,
    bind_addr: &str,
    mut shutdown_rx: Receiver<bool>,
) -> Result<()>
where
    LR: LogEntryRepositoryTrait,
    PR: ProjectRegistryTrait,
{
    let router = routes::create_app_router(state);

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃时同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
