use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::{OptionId, QuestionId, QuizId, SubmissionId};
use super::quiz::QuestionType;

/// 参与者对一道题的作答
///
/// 选择题记录所选选项的 ID，简答题记录原文。上线时统一转成字符串
/// （选项 ID 的十进制形式），由服务端按题型解释。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Choice(OptionId),
    Text(String),
}

impl AnswerValue {
    /// 是否算作"已作答"
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Choice(_) => true,
            AnswerValue::Text(text) => !text.is_empty(),
        }
    }

    /// 转成 `userAnswer` 字段
    pub fn to_wire(&self) -> String {
        match self {
            AnswerValue::Choice(id) => id.to_string(),
            AnswerValue::Text(text) => text.clone(),
        }
    }

    pub fn selected_option(&self) -> Option<OptionId> {
        match self {
            AnswerValue::Choice(id) => Some(*id),
            AnswerValue::Text(_) => None,
        }
    }
}

/// 提交中的单题答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: QuestionId,
    pub user_answer: String,
}

/// 提交请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub quiz_id: QuizId,
    pub answers: Vec<AnswerInput>,
}

/// 提交成功后的回执，只关心生成的提交 ID
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
}

/// 已评分的提交记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<SubmissionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<QuizId>,
    pub score: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub submitted_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub answers: Vec<GradedAnswer>,
}

/// 单题评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}
