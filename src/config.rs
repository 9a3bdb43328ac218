use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 配置文件路径所在的环境变量
pub const CONFIG_FILE_ENV: &str = "EXAM_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub bind_addr: String,
    /// 静态资源目录
    pub static_folder: String,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// Word 文档无法解码时是否报错（否则按空文档处理）
    pub strict_decode: bool,
    /// 是否允许跨域请求
    pub cors_enabled: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            static_folder: "static".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            strict_decode: false,
            cors_enabled: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// 加载配置：设置了 `EXAM_CONFIG` 时先读取该文件，再应用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        Self::load_with(env_lookup)
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env_lookup)
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let base = match lookup(CONFIG_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_toml_file(path.trim())?,
            _ => Self::default(),
        };
        Ok(base.with_overrides(lookup))
    }

    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(self.bind_addr),
            static_folder: lookup("STATIC_FOLDER").unwrap_or(self.static_folder),
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES")
                .unwrap_or(self.max_upload_bytes),
            strict_decode: parse_var(&lookup, "STRICT_DECODE").unwrap_or(self.strict_decode),
            cors_enabled: parse_var(&lookup, "CORS_ENABLED").unwrap_or(self.cors_enabled),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING")
                .unwrap_or(self.verbose_logging),
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
