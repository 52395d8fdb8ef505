use thiserror::Error;

use crate::models::QuestionId;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Request(#[from] RequestError),
    /// 客户端校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 题目编辑流程错误
    #[error("编辑错误: {0}")]
    Authoring(#[from] AuthoringError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 一次请求失败：非 2xx 响应、网络不可达或响应体无法解析
///
/// `status` 为 None 表示请求没有拿到 HTTP 响应（或响应体解析失败）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API请求失败 ({endpoint}): status={status:?}, message={message}")]
pub struct RequestError {
    pub endpoint: String,
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    /// 服务端返回了错误状态码
    pub fn status(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// 传输层失败（连接失败、超时等）
    pub fn transport(endpoint: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: None,
            message: source.to_string(),
        }
    }

    /// 响应体无法解码为预期类型
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: None,
            message: format!("响应解析失败: {}", source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// 客户端校验失败，发生在任何网络请求之前
///
/// Display 文本直接作为界面上的提示语。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Quiz title is required")]
    BlankTitle,
    #[error("Question text is required")]
    BlankQuestionText,
    #[error("Option text is required")]
    BlankOptionText,
    #[error("MCQ questions need at least {required} non-empty options (got {found})")]
    TooFewOptions { found: usize, required: usize },
}

/// 题目编辑流程（题目 + 选项的多步创建）的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    /// 创建题目本身失败，服务端没有留下任何数据
    #[error("创建题目失败: {0}")]
    QuestionCreateFailed(RequestError),
    /// 题目已创建，选项创建中途失败
    ///
    /// `compensated` 为 true 表示题目已被删除；为 false 表示题目连同
    /// 已创建的前 `created` 个选项仍留在服务端，需要手动修复。
    #[error("题目 {question_id} 的选项创建失败 ({created}/{expected}), 已回滚: {compensated}: {source}")]
    OptionsIncomplete {
        question_id: QuestionId,
        created: usize,
        expected: usize,
        compensated: bool,
        source: RequestError,
    },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({path}): {message}")]
    ReadFailed { path: String, message: String },
    #[error("TOML解析失败 ({path}): {message}")]
    TomlParseFailed { path: String, message: String },
    #[error("配置项 {field} 的值无效: '{value}'")]
    InvalidValue { field: String, value: String },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
