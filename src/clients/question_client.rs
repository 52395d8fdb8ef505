/// 题目资源客户端
use std::sync::Arc;
use tracing::debug;

use super::{call, call_unit};
use crate::error::RequestError;
use crate::infrastructure::{ApiRequest, Transport};
use crate::models::{NewQuestion, Question, QuestionId, QuestionTextPayload, QuestionType, QuizId};
use crate::utils::truncate_text;

#[derive(Clone)]
pub struct QuestionClient {
    transport: Arc<dyn Transport>,
}

impl QuestionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 向测验添加题目，返回带生成 ID 的题目
    ///
    /// 选项需要之后单独创建。
    pub async fn add(
        &self,
        quiz_id: QuizId,
        question_type: QuestionType,
        question_text: &str,
    ) -> Result<Question, RequestError> {
        debug!(
            "测验 {} 添加 {} 题目: {}",
            quiz_id,
            question_type,
            truncate_text(question_text, 40)
        );
        let payload = NewQuestion {
            question_type,
            question_text: question_text.to_string(),
        };
        call(
            self.transport.as_ref(),
            ApiRequest::post(format!("/quizzes/{}/questions", quiz_id), &payload)?,
        )
        .await
    }

    /// 更新题目文本
    pub async fn update(
        &self,
        quiz_id: QuizId,
        question_id: QuestionId,
        question_text: &str,
    ) -> Result<Question, RequestError> {
        debug!("更新题目 {}/{}", quiz_id, question_id);
        let payload = QuestionTextPayload {
            question_text: question_text.to_string(),
        };
        call(
            self.transport.as_ref(),
            ApiRequest::put(format!("/quizzes/{}/questions/{}", quiz_id, question_id), &payload)?,
        )
        .await
    }

    /// 删除题目（连同其选项）
    pub async fn delete(&self, quiz_id: QuizId, question_id: QuestionId) -> Result<(), RequestError> {
        debug!("删除题目 {}/{}", quiz_id, question_id);
        call_unit(
            self.transport.as_ref(),
            ApiRequest::delete(format!("/quizzes/{}/questions/{}", quiz_id, question_id)),
        )
        .await
    }
}
