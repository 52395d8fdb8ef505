use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 后端地址（不含 `/api` 前缀）
    pub api_base_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 请求超时（秒），None 表示使用传输层默认值
    pub request_timeout_secs: Option<u64>,
    /// MCQ 编辑表单默认的选项行数
    pub default_mcq_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            verbose_logging: false,
            request_timeout_secs: None,
            default_mcq_rows: 4,
        }
    }
}

/// TOML 配置文件的结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    verbose_logging: Option<bool>,
    request_timeout_secs: Option<u64>,
    default_mcq_rows: Option<usize>,
}

impl Config {
    /// 在默认值之上叠加环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺失字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::TomlParseFailed { message, .. } => ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: String::new(),
            message: e.to_string(),
        })?;

        let default = Self::default();
        let config = Self {
            api_base_url: file.api_base_url.unwrap_or(default.api_base_url),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            request_timeout_secs: file.request_timeout_secs.or(default.request_timeout_secs),
            default_mcq_rows: file.default_mcq_rows.unwrap_or(default.default_mcq_rows),
        };
        config.validate()?;
        Ok(config)
    }

    /// 读取 `QUIZ_CONFIG` 指定的文件（若有），再叠加环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("QUIZ_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(path)?,
            _ => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(self.api_base_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            request_timeout_secs: std::env::var("QUIZ_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(self.request_timeout_secs),
            default_mcq_rows: std::env::var("QUIZ_DEFAULT_MCQ_ROWS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.default_mcq_rows),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
            });
        }
        if self.default_mcq_rows < 2 {
            return Err(ConfigError::InvalidValue {
                field: "default_mcq_rows".to_string(),
                value: self.default_mcq_rows.to_string(),
            });
        }
        Ok(())
    }
}
