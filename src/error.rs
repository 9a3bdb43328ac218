use thiserror::Error;

/// 处理阶段，用于拼接边界错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 上传解析
    Upload,
    /// 提交计分
    Submit,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Upload => "文件处理",
            Stage::Submit => "提交处理",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 没有上传文件或没有选择文件
    #[error("{0}")]
    InputMissing(String),

    /// 上传的文件格式不受支持
    #[error("{0}")]
    UnsupportedFormat(String),

    /// 文档无法解压或 XML 无法解析
    #[error("文件处理失败: 文档解码失败: {0}")]
    DecodeFailure(String),

    /// 解析或计分过程中的其他意外错误
    #[error("{stage}失败: {message}")]
    ProcessingFailure { stage: Stage, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写错误
    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),
}

// ========== 从常见错误类型转换 ==========

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::DecodeFailure(err.to_string())
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::DecodeFailure(format!("XML解析失败: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::submit_failed(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(format!("TOML解析失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建上传处理失败错误
    pub fn upload_failed(source: impl std::fmt::Display) -> Self {
        AppError::ProcessingFailure {
            stage: Stage::Upload,
            message: source.to_string(),
        }
    }

    /// 创建提交处理失败错误
    pub fn submit_failed(source: impl std::fmt::Display) -> Self {
        AppError::ProcessingFailure {
            stage: Stage::Submit,
            message: source.to_string(),
        }
    }

    /// 是否属于调用方输入问题（而非服务端故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InputMissing(_) | AppError::UnsupportedFormat(_) | AppError::DecodeFailure(_)
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
