//! HTTP 接口层
//!
//! - `POST /api/exam/upload` 上传试卷（按扩展名识别纯文本或 Word 文档）
//! - `POST /api/exam/upload/docx` 上传试卷（只接受 Word 文档）
//! - `POST /api/exam/submit` 提交答卷并计分
//! - 其余路径返回静态资源，找不到时回退到 `index.html`

pub mod exam;
pub mod response;

use crate::config::Config;
use crate::services::ExamService;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// 请求间共享的只读状态
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub exam_service: ExamService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let exam_service = ExamService::new(&config);
        Self {
            config,
            exam_service,
        }
    }
}

/// 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();
    let index_file = Path::new(&config.static_folder).join("index.html");
    let static_files = ServeDir::new(&config.static_folder).fallback(ServeFile::new(index_file));

    let router = Router::new()
        .route("/api/exam/upload", post(exam::upload_exam))
        .route("/api/exam/upload/docx", post(exam::upload_word_exam))
        .route("/api/exam/submit", post(exam::submit_exam))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
