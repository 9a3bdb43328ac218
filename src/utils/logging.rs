/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::models::question::Question;
use crate::models::submission::SubmissionSummary;
use crate::services::scoring_service::total_points;
use tracing::{debug, info};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 启动配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 在线考试服务启动");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("📁 静态资源目录: {}", config.static_folder);
    info!(
        "📦 上传大小上限: {} KB",
        config.max_upload_bytes / 1024
    );
    if config.strict_decode {
        info!("🔒 严格解码模式：Word 文档无法解析时直接报错");
    }
    info!("{}", "=".repeat(60));
}

/// 记录服务关闭信息
pub fn log_shutdown() {
    info!("\n{}", "─".repeat(60));
    info!(
        "👋 服务已停止: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 记录题目解析结果
pub fn log_parse_complete(questions: &[Question]) {
    info!(
        "✓ 解析完成，共 {} 道题目，总分 {}",
        questions.len(),
        total_points(questions)
    );
}

/// 记录单道题目的预览
pub fn log_question_preview(question: &Question) {
    debug!("  {}", question);
}

/// 记录评分结果
pub fn log_submit_complete(summary: &SubmissionSummary) {
    info!(
        "📊 评分完成: 得分 {}/{}，答对 {}/{}，正确率 {:.1}%",
        summary.total_score,
        summary.max_score,
        summary.correct_count,
        summary.total_questions,
        summary.accuracy_rate
    );
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
