/// 测验资源客户端
///
/// 对应 `/quizzes` 下的全部接口
use std::sync::Arc;
use tracing::debug;

use super::{call, call_unit};
use crate::error::RequestError;
use crate::infrastructure::{ApiRequest, Transport};
use crate::models::{Quiz, QuizId, QuizPayload};

#[derive(Clone)]
pub struct QuizClient {
    transport: Arc<dyn Transport>,
}

impl QuizClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 获取全部测验（含嵌套题目）
    pub async fn list(&self) -> Result<Vec<Quiz>, RequestError> {
        debug!("获取测验列表");
        call(self.transport.as_ref(), ApiRequest::get("/quizzes")).await
    }

    /// 按 ID 获取测验（含题目和选项）
    pub async fn get(&self, id: QuizId) -> Result<Quiz, RequestError> {
        debug!("获取测验 {}", id);
        call(self.transport.as_ref(), ApiRequest::get(format!("/quizzes/{}", id))).await
    }

    /// 创建测验
    pub async fn create(&self, title: &str, description: &str) -> Result<Quiz, RequestError> {
        debug!("创建测验: {}", title);
        let payload = QuizPayload {
            title: title.to_string(),
            description: description.to_string(),
        };
        call(self.transport.as_ref(), ApiRequest::post("/quizzes", &payload)?).await
    }

    /// 更新测验标题和描述
    ///
    /// 界面上没有入口，但接口保留。
    pub async fn update(&self, id: QuizId, title: &str, description: &str) -> Result<Quiz, RequestError> {
        debug!("更新测验 {}", id);
        let payload = QuizPayload {
            title: title.to_string(),
            description: description.to_string(),
        };
        call(
            self.transport.as_ref(),
            ApiRequest::put(format!("/quizzes/{}", id), &payload)?,
        )
        .await
    }

    /// 删除测验
    pub async fn delete(&self, id: QuizId) -> Result<(), RequestError> {
        debug!("删除测验 {}", id);
        call_unit(self.transport.as_ref(), ApiRequest::delete(format!("/quizzes/{}", id))).await
    }
}
