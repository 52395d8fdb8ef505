use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{OptionId, QuestionId, QuizId};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// 单选/多选题，选项由出题人定义
    Mcq,
    /// 判断题，固定 True / False 两个选项
    TrueFalse,
    /// 简答题，由服务端比对答案
    Text,
}

impl QuestionType {
    /// 线上传输使用的名称
    pub fn wire_name(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::Text => "TEXT",
        }
    }

    /// 作答时是否以选项形式呈现
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::TrueFalse)
    }

    pub const ALL: [QuestionType; 3] = [QuestionType::Mcq, QuestionType::TrueFalse, QuestionType::Text];
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// 测验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|q| q.id)
    }
}

/// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    /// 嵌套在测验中返回时后端不带此字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<QuizId>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_order: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// 标记为正确的选项（MCQ 可能有多个）
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> + '_ {
        self.options.iter().filter(|o| o.is_correct)
    }
}

/// 题目的候选答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: OptionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub option_order: i32,
}

// ========== 请求体 ==========

/// 创建/更新测验
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizPayload {
    pub title: String,
    pub description: String,
}

/// 创建题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question_text: String,
}

/// 更新题目文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTextPayload {
    pub question_text: String,
}

/// 创建选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOption {
    pub option_text: String,
    pub is_correct: bool,
    pub option_order: i32,
}

/// 更新选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionUpdate {
    pub option_text: String,
    pub is_correct: bool,
}

/// 后端会把空列表序列化成 null
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_type_wire_names() {
        for qt in QuestionType::ALL {
            let encoded = serde_json::to_value(qt).unwrap();
            assert_eq!(encoded, json!(qt.wire_name()));
        }
        let tf: QuestionType = serde_json::from_value(json!("TRUE_FALSE")).unwrap();
        assert_eq!(tf, QuestionType::TrueFalse);
    }

    #[test]
    fn test_quiz_decodes_backend_shape() {
        let quiz: Quiz = serde_json::from_value(json!({
            "id": 3,
            "title": "Capitals",
            "description": null,
            "createdAt": "2024-05-01T10:15:30.123",
            "questions": [{
                "id": 10,
                "type": "MCQ",
                "questionText": "Capital of Italy?",
                "questionOrder": 1,
                "options": [
                    {"id": 100, "optionText": "Rome", "isCorrect": true, "optionOrder": 1},
                    {"id": 101, "optionText": "Milan", "isCorrect": false, "optionOrder": 2}
                ]
            }, {
                "id": 11,
                "type": "TEXT",
                "questionText": "Capital of France?",
                "options": null
            }]
        }))
        .unwrap();

        assert_eq!(quiz.questions.len(), 2);
        assert!(quiz.created_at.is_some());
        assert_eq!(quiz.questions[0].correct_options().count(), 1);
        assert!(quiz.questions[1].options.is_empty());
        assert_eq!(quiz.questions[1].quiz_id, None);
    }

    #[test]
    fn test_quiz_without_questions_field() {
        let quiz: Quiz = serde_json::from_value(json!({"id": 1, "title": "Empty"})).unwrap();
        assert!(quiz.questions.is_empty());
        assert_eq!(quiz.description, None);
    }

    #[test]
    fn test_payloads_use_backend_field_names() {
        let body = serde_json::to_value(NewQuestion {
            question_type: QuestionType::TrueFalse,
            question_text: "The sky is blue".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"type": "TRUE_FALSE", "questionText": "The sky is blue"}));

        let body = serde_json::to_value(NewOption {
            option_text: "True".to_string(),
            is_correct: true,
            option_order: 1,
        })
        .unwrap();
        assert_eq!(body, json!({"optionText": "True", "isCorrect": true, "optionOrder": 1}));
    }
}
