/// 选项资源客户端
use std::sync::Arc;
use tracing::debug;

use super::{call, call_unit};
use crate::error::RequestError;
use crate::infrastructure::{ApiRequest, Transport};
use crate::models::{AnswerOption, NewOption, OptionId, OptionUpdate, QuestionId};

/// 单独追加选项时使用的默认排序值
pub const DEFAULT_OPTION_ORDER: i32 = 0;

#[derive(Clone)]
pub struct OptionClient {
    transport: Arc<dyn Transport>,
}

impl OptionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 为题目添加选项
    pub async fn add(
        &self,
        question_id: QuestionId,
        option_text: &str,
        is_correct: bool,
        option_order: i32,
    ) -> Result<AnswerOption, RequestError> {
        debug!(
            "题目 {} 添加选项 #{}: {} (正确: {})",
            question_id, option_order, option_text, is_correct
        );
        let payload = NewOption {
            option_text: option_text.to_string(),
            is_correct,
            option_order,
        };
        call(
            self.transport.as_ref(),
            ApiRequest::post(format!("/questions/{}/options", question_id), &payload)?,
        )
        .await
    }

    /// 更新选项文本和正确性
    pub async fn update(
        &self,
        question_id: QuestionId,
        option_id: OptionId,
        option_text: &str,
        is_correct: bool,
    ) -> Result<AnswerOption, RequestError> {
        debug!("更新选项 {}/{}", question_id, option_id);
        let payload = OptionUpdate {
            option_text: option_text.to_string(),
            is_correct,
        };
        call(
            self.transport.as_ref(),
            ApiRequest::put(format!("/questions/{}/options/{}", question_id, option_id), &payload)?,
        )
        .await
    }

    /// 删除选项
    pub async fn delete(&self, question_id: QuestionId, option_id: OptionId) -> Result<(), RequestError> {
        debug!("删除选项 {}/{}", question_id, option_id);
        call_unit(
            self.transport.as_ref(),
            ApiRequest::delete(format!("/questions/{}/options/{}", question_id, option_id)),
        )
        .await
    }
}
