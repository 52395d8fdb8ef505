/// 提交资源客户端
use std::sync::Arc;
use tracing::debug;

use super::call;
use crate::error::RequestError;
use crate::infrastructure::{ApiRequest, Transport};
use crate::models::{AnswerInput, QuizId, SubmissionId, SubmissionReceipt, SubmissionRequest, SubmissionResult};

#[derive(Clone)]
pub struct SubmissionClient {
    transport: Arc<dyn Transport>,
}

impl SubmissionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 一次性提交整份答卷，返回提交 ID
    pub async fn submit(&self, quiz_id: QuizId, answers: Vec<AnswerInput>) -> Result<SubmissionId, RequestError> {
        debug!("提交测验 {}，共 {} 个答案", quiz_id, answers.len());
        let payload = SubmissionRequest { quiz_id, answers };
        let receipt: SubmissionReceipt =
            call(self.transport.as_ref(), ApiRequest::post("/submissions", &payload)?).await?;
        Ok(receipt.submission_id)
    }

    /// 获取评分后的提交记录
    pub async fn get_results(&self, submission_id: SubmissionId) -> Result<SubmissionResult, RequestError> {
        debug!("获取提交结果 {}", submission_id);
        call(
            self.transport.as_ref(),
            ApiRequest::get(format!("/submissions/{}", submission_id)),
        )
        .await
    }
}
