use super::AppState;
use crate::error::{AppError, AppResult};
use crate::models::submission::{SubmitRequest, SubmitResponse, UploadResponse};
use crate::services::{UploadRoute, UploadedFile};
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;

/// 上传表单中的文件字段名
pub const FILE_FIELD: &str = "file";

/// 上传试卷，按扩展名识别格式
pub async fn upload_exam(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    handle_upload(&state, multipart, UploadRoute::Auto).await
}

/// 上传试卷，只接受 Word 文档
pub async fn upload_word_exam(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    handle_upload(&state, multipart, UploadRoute::WordOnly).await
}

async fn handle_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    route: UploadRoute,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let questions = state.exam_service.parse_upload(upload, route).await?;
    Ok(Json(UploadResponse::new(questions)))
}

/// 从表单中读取 `file` 字段
async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> AppResult<UploadedFile> {
    let mut multipart = multipart.map_err(|e| {
        debug!("无法读取上传表单: {}", e);
        AppError::InputMissing("没有文件被上传".to_string())
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(AppError::upload_failed)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(AppError::upload_failed)?;
        return Ok(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::InputMissing("没有文件被上传".to_string()))
}

/// 提交答卷并计分
///
/// 请求体在这里解码，题目记录缺少必填字段时按提交处理失败返回。
pub async fn submit_exam(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, AppError> {
    let request: SubmitRequest = serde_json::from_slice(&body)?;
    let answers = request.answers();
    debug!(
        "收到答卷: {} 道题目, {} 个答案",
        request.questions.len(),
        answers.len()
    );

    let summary = state.exam_service.score(&request.questions, &answers);
    Ok(Json(summary.into()))
}
