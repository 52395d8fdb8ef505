//! HTTP 客户端 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client` 和后端地址，只暴露"发请求"的能力

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RequestError;
use crate::infrastructure::transport::{ApiRequest, Transport};

/// 所有接口路径的公共前缀
pub const API_PREFIX: &str = "/api";

/// HTTP 客户端
///
/// 职责：
/// - 持有连接池和后端地址
/// - 拼接 URL、发送 JSON 请求
/// - 不认识 Quiz / Question，不处理业务流程
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// 创建新的 HTTP 客户端
    ///
    /// 只有显式配置了超时才设置超时，否则使用 reqwest 的默认行为。
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| RequestError::transport("client init", e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 完整 URL，如 `http://localhost:8080/api/quizzes`
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<JsonValue, RequestError> {
        let endpoint = request.endpoint();
        let url = self.url_for(&request.path);
        debug!("➡️ {} ({})", endpoint, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("请求发送失败 {}: {}", endpoint, e);
            RequestError::transport(&endpoint, e)
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::transport(&endpoint, e))?;

        debug!("⬅️ {} -> {}", endpoint, status);

        if !status.is_success() {
            return Err(RequestError::status(
                endpoint,
                status.as_u16(),
                error_message(status, &text),
            ));
        }

        parse_body(&endpoint, &text)
    }
}

/// 解析成功响应体，空响应体（如 204）视为 `null`
fn parse_body(endpoint: &str, text: &str) -> Result<JsonValue, RequestError> {
    if text.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(text).map_err(|e| RequestError::decode(endpoint, e))
}

/// 从错误响应中提取提示信息
///
/// 后端的错误体形如 `{"status":404,"error":"Not Found","message":"..."}`；
/// 取不到 `message` 时退回原始响应体，再退回状态码的标准描述。
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            if !message.trim().is_empty() {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
