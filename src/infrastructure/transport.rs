//! 传输抽象 - 基础设施层
//!
//! 上层只认识"发一个 JSON 请求、拿回一个 JSON 响应"这一能力，
//! 测试中可以用内存实现替换真实的 HTTP 客户端。

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::RequestError;

/// 一次 API 请求
///
/// `path` 不含 `/api` 前缀，例如 `/quizzes/3/questions`。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, RequestError> {
        Self::with_body(Method::POST, path.into(), body)
    }

    pub fn put(path: impl Into<String>, body: &impl Serialize) -> Result<Self, RequestError> {
        Self::with_body(Method::PUT, path.into(), body)
    }

    fn with_body(method: Method, path: String, body: &impl Serialize) -> Result<Self, RequestError> {
        let body = serde_json::to_value(body).map_err(|e| RequestError {
            endpoint: format!("{} {}", method, path),
            status: None,
            message: format!("请求体序列化失败: {}", e),
        })?;
        Ok(Self {
            method,
            path,
            body: Some(body),
        })
    }

    /// 日志和错误中使用的端点描述，如 `POST /quizzes`
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// 传输层
///
/// 职责：
/// - 发出请求，返回响应体（空响应体返回 `null`）
/// - 把非 2xx 状态和网络错误统一映射为 `RequestError`
/// - 不重试，不认识 Quiz / Question
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<JsonValue, RequestError>;
}
