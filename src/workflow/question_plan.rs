//! 题目创建计划
//!
//! 把编辑表单转换成"一道题 + 有序选项列表"，所有校验在这里完成，
//! 计划一旦构造成功就不会再因为客户端校验失败。

use crate::error::ValidationError;
use crate::models::QuestionType;

/// MCQ 至少需要的非空选项数
pub const MIN_MCQ_OPTIONS: usize = 2;

/// 判断题固定选项文本
pub const TRUE_LABEL: &str = "True";
pub const FALSE_LABEL: &str = "False";

/// MCQ 表单中的一行选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McqRow {
    pub text: String,
    pub is_correct: bool,
}

impl McqRow {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 待创建的选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOption {
    pub text: String,
    pub is_correct: bool,
    pub order: i32,
}

/// 已校验的题目创建计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPlan {
    pub question_type: QuestionType,
    pub question_text: String,
    pub options: Vec<PlannedOption>,
}

impl QuestionPlan {
    /// 简答题：没有选项
    pub fn text(question_text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            question_type: QuestionType::Text,
            question_text: require_text(question_text)?,
            options: Vec::new(),
        })
    }

    /// 判断题：固定 True(1) / False(2)，恰好一个正确
    pub fn true_false(question_text: &str, answer_is_true: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            question_type: QuestionType::TrueFalse,
            question_text: require_text(question_text)?,
            options: vec![
                PlannedOption {
                    text: TRUE_LABEL.to_string(),
                    is_correct: answer_is_true,
                    order: 1,
                },
                PlannedOption {
                    text: FALSE_LABEL.to_string(),
                    is_correct: !answer_is_true,
                    order: 2,
                },
            ],
        })
    }

    /// 选择题：丢弃空行，至少保留两项，从 1 开始按显示顺序编号
    ///
    /// 不限制正确选项的数量。
    pub fn mcq(question_text: &str, rows: &[McqRow]) -> Result<Self, ValidationError> {
        let question_text = require_text(question_text)?;

        let options: Vec<PlannedOption> = rows
            .iter()
            .filter(|row| !row.is_blank())
            .enumerate()
            .map(|(index, row)| PlannedOption {
                text: row.text.clone(),
                is_correct: row.is_correct,
                order: index as i32 + 1,
            })
            .collect();

        if options.len() < MIN_MCQ_OPTIONS {
            return Err(ValidationError::TooFewOptions {
                found: options.len(),
                required: MIN_MCQ_OPTIONS,
            });
        }

        Ok(Self {
            question_type: QuestionType::Mcq,
            question_text,
            options,
        })
    }
}

fn require_text(text: &str) -> Result<String, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::BlankQuestionText);
    }
    Ok(text.to_string())
}
