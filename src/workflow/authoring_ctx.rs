//! 题目编辑上下文
//!
//! 封装"我正在给哪个测验添加哪种题目"这一信息

use std::fmt::Display;

use crate::models::{QuestionType, QuizId};

/// 题目编辑上下文，只用于日志前缀
#[derive(Debug, Clone, Copy)]
pub struct AuthoringCtx {
    pub quiz_id: QuizId,
    pub question_type: QuestionType,
}

impl AuthoringCtx {
    pub fn new(quiz_id: QuizId, question_type: QuestionType) -> Self {
        Self {
            quiz_id,
            question_type,
        }
    }
}

impl Display for AuthoringCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[测验 #{} {}]", self.quiz_id, self.question_type)
    }
}
