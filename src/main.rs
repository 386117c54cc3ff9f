use color_eyre::Result;
use database::{CachedProjectRegistry, LogEntryRepository, SheetProjectSource};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use web_service::{AppState, FormController, SubmissionPolicies};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;

    let pool = database::initialize_database(&config).await?;
    let repository = Arc::new(LogEntryRepository::new(pool));
    let registry = Arc::new(CachedProjectRegistry::new(
        SheetProjectSource::new(config.registry.clone())?,
        config.registry.ttl,
        config.registry.timeout,
    ));

    let controller = FormController::new(
        repository,
        registry,
        SubmissionPolicies::from(&config.retry),
        config.escalation_contact.clone(),
    );
    let state = AppState {
        controller: Arc::new(controller),
    };

    // Ctrl-C 后通知 Web 服务优雅退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("❌ 监听退出信号失败: {}", e);
            // 保留发送端，避免服务被误关闭
            std::future::pending::<()>().await;
        }
        info!("📴 收到退出信号");
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(state, &config.bind_addr, shutdown_rx).await?;

    info!("👋 服务已退出");
    Ok(())
}
