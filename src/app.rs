use crate::api::{self, AppState};
use crate::config::Config;
use crate::utils::logging::{log_shutdown, log_startup};
use anyhow::{Context, Result};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        if !Path::new(&config.static_folder).is_dir() {
            warn!(
                "⚠️ 静态资源目录不存在: {}，页面请求将返回 404",
                config.static_folder
            );
        }

        let state = Arc::new(AppState::new(config.clone()));
        let router = api::router(state);

        Ok(Self { config, router })
    }

    /// 运行应用主逻辑，收到 Ctrl-C 后优雅退出
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法监听地址: {}", self.config.bind_addr))?;

        info!("✓ 服务已就绪: http://{}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        log_shutdown();
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在停止服务...");
}
