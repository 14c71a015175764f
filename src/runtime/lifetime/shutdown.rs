use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，返回后由 main 中的 select 结束服务
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping school server...");
}
