//! # Exam Grader
//!
//! 在线考试服务：上传试卷文档，解析出结构化题目，接收答卷并计分
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - 题目、评分结果与请求响应结构
//!
//! ### ② 业务能力层（Services）
//! - `ParagraphSource` - 从纯文本或 Word 文档中提取段落
//! - `QuestionParser` - 单次扫描段落，构建题目列表
//! - `score_submission` - 标准化答案并逐题计分
//! - `ExamService` - 串联以上能力，负责临时文件的生命周期
//!
//! ### ③ 接口层（API）
//! - `api/` - axum 路由：上传、提交、静态资源
//!
//! ### ④ 启动层（App）
//! - `App` - 加载配置、绑定端口、优雅退出
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Question, QuestionType, ScoringResult, SubmissionSummary};
pub use services::{parse_document, score_submission, ExamService, FallbackPolicy, QuestionParser};
