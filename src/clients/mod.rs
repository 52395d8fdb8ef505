//! 资源客户端
//!
//! 每个 REST 资源一个客户端，每个操作恰好发出一次请求并解码响应。
//! 不重试、不批量，也不在本地修补状态。

pub mod option_client;
pub mod question_client;
pub mod quiz_client;
pub mod submission_client;

pub use option_client::OptionClient;
pub use question_client::QuestionClient;
pub use quiz_client::QuizClient;
pub use submission_client::SubmissionClient;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::Config;
use crate::error::RequestError;
use crate::infrastructure::{ApiRequest, HttpClient, Transport};

/// 全部资源客户端的集合，共享同一个传输层
#[derive(Clone)]
pub struct QuizApi {
    pub quizzes: QuizClient,
    pub questions: QuestionClient,
    pub options: OptionClient,
    pub submissions: SubmissionClient,
}

impl QuizApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            quizzes: QuizClient::new(transport.clone()),
            questions: QuestionClient::new(transport.clone()),
            options: OptionClient::new(transport.clone()),
            submissions: SubmissionClient::new(transport),
        }
    }

    /// 使用真实 HTTP 传输创建
    pub fn from_config(config: &Config) -> Result<Self, RequestError> {
        let http = HttpClient::new(config)?;
        Ok(Self::new(Arc::new(http)))
    }
}

/// 发送请求并把响应体解码为 `T`
async fn call<T: DeserializeOwned>(transport: &dyn Transport, request: ApiRequest) -> Result<T, RequestError> {
    let endpoint = request.endpoint();
    let body = transport.send(request).await?;
    serde_json::from_value(body).map_err(|e| RequestError::decode(endpoint, e))
}

/// 发送请求并丢弃响应体
async fn call_unit(transport: &dyn Transport, request: ApiRequest) -> Result<(), RequestError> {
    transport.send(request).await.map(|_| ())
}
