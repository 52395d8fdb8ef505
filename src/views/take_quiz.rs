//! 答题页
//!
//! 每道题一个作答控件：选择题单选（记录选项 ID），简答题自由输入。
//! 所有题目都有非空答案后才允许提交；提交成功后跳转到结果页。
//! 答案只保存在内存中，离开页面即丢弃。

use std::collections::BTreeMap;
use tracing::{error, info, warn};

use crate::clients::QuizApi;
use crate::models::{AnswerInput, AnswerValue, OptionId, QuestionId, Quiz, QuizId, SubmissionId};
use crate::views::Route;

pub const MSG_LOAD_FAILED: &str = "Failed to load quiz";
pub const MSG_SUBMIT_FAILED: &str = "Failed to submit quiz";
pub const MSG_NOT_READY: &str = "Please answer all questions before submitting";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TakeQuizState {
    pub quiz: Option<Quiz>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub answers: BTreeMap<QuestionId, AnswerValue>,
    pub submitted: Option<SubmissionId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TakeQuizEvent {
    LoadStarted,
    Loaded(Quiz),
    LoadFailed,
    OptionSelected { question_id: QuestionId, option_id: OptionId },
    TextEntered { question_id: QuestionId, text: String },
    SubmitRejected,
    SubmitStarted,
    Submitted(SubmissionId),
    SubmitFailed,
}

impl TakeQuizState {
    pub fn apply(self, event: TakeQuizEvent) -> Self {
        match event {
            TakeQuizEvent::LoadStarted => Self { loading: true, ..self },
            TakeQuizEvent::Loaded(quiz) => Self {
                quiz: Some(quiz),
                loading: false,
                error: None,
                ..self
            },
            TakeQuizEvent::LoadFailed => Self {
                loading: false,
                error: Some(MSG_LOAD_FAILED.to_string()),
                ..self
            },
            TakeQuizEvent::OptionSelected {
                question_id,
                option_id,
            } => {
                // 只接受属于该选择题的选项
                let valid = self
                    .quiz
                    .as_ref()
                    .and_then(|quiz| quiz.question(question_id))
                    .map_or(false, |q| q.question_type.is_choice() && q.option(option_id).is_some());
                if !valid {
                    warn!("忽略无效的选择: 题目 {} 选项 {}", question_id, option_id);
                    return self;
                }
                let mut answers = self.answers;
                answers.insert(question_id, AnswerValue::Choice(option_id));
                Self { answers, ..self }
            }
            TakeQuizEvent::TextEntered { question_id, text } => {
                let valid = self
                    .quiz
                    .as_ref()
                    .and_then(|quiz| quiz.question(question_id))
                    .map_or(false, |q| !q.question_type.is_choice());
                if !valid {
                    warn!("忽略无效的文本作答: 题目 {}", question_id);
                    return self;
                }
                let mut answers = self.answers;
                answers.insert(question_id, AnswerValue::Text(text));
                Self { answers, ..self }
            }
            TakeQuizEvent::SubmitRejected => Self {
                error: Some(MSG_NOT_READY.to_string()),
                ..self
            },
            TakeQuizEvent::SubmitStarted => Self {
                submitting: true,
                error: None,
                ..self
            },
            TakeQuizEvent::Submitted(submission_id) => Self {
                submitting: false,
                submitted: Some(submission_id),
                ..self
            },
            TakeQuizEvent::SubmitFailed => Self {
                submitting: false,
                error: Some(MSG_SUBMIT_FAILED.to_string()),
                ..self
            },
        }
    }

    /// 测验中每道题都有非空答案
    pub fn is_ready(&self) -> bool {
        match &self.quiz {
            Some(quiz) => quiz.question_ids().all(|id| {
                self.answers
                    .get(&id)
                    .map_or(false, AnswerValue::is_answered)
            }),
            None => false,
        }
    }

    /// 提交按钮是否可用，提交成功后不再可用
    pub fn can_submit(&self) -> bool {
        self.is_ready() && !self.submitting && self.submitted.is_none()
    }

    pub fn answer(&self, question_id: QuestionId) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    /// 单选控件的选中状态
    pub fn is_selected(&self, question_id: QuestionId, option_id: OptionId) -> bool {
        self.answer(question_id).and_then(AnswerValue::selected_option) == Some(option_id)
    }

    /// 按测验中的题目顺序组装提交答案，每题一条
    pub fn build_answers(&self) -> Vec<AnswerInput> {
        let Some(quiz) = &self.quiz else {
            return Vec::new();
        };
        quiz.question_ids()
            .map(|question_id| AnswerInput {
                question_id,
                user_answer: self
                    .answers
                    .get(&question_id)
                    .map(AnswerValue::to_wire)
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// 答题页面
pub struct TakeQuizView {
    api: QuizApi,
    quiz_id: QuizId,
    state: TakeQuizState,
}

impl TakeQuizView {
    pub fn new(api: QuizApi, quiz_id: QuizId) -> Self {
        Self {
            api,
            quiz_id,
            state: TakeQuizState::default(),
        }
    }

    pub fn state(&self) -> &TakeQuizState {
        &self.state
    }

    pub fn dispatch(&mut self, event: TakeQuizEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    pub async fn load(&mut self) {
        self.dispatch(TakeQuizEvent::LoadStarted);
        match self.api.quizzes.get(self.quiz_id).await {
            Ok(quiz) => {
                info!("✓ 测验 {} 加载完成，共 {} 题", quiz.id, quiz.questions.len());
                self.dispatch(TakeQuizEvent::Loaded(quiz));
            }
            Err(e) => {
                error!("加载测验 {} 失败: {}", self.quiz_id, e);
                self.dispatch(TakeQuizEvent::LoadFailed);
            }
        }
    }

    pub fn select_option(&mut self, question_id: QuestionId, option_id: OptionId) {
        self.dispatch(TakeQuizEvent::OptionSelected {
            question_id,
            option_id,
        });
    }

    pub fn enter_text(&mut self, question_id: QuestionId, text: impl Into<String>) {
        self.dispatch(TakeQuizEvent::TextEntered {
            question_id,
            text: text.into(),
        });
    }

    /// 提交答卷，成功时返回结果页路由
    pub async fn submit(&mut self) -> Option<Route> {
        if let Some(submission_id) = self.state.submitted {
            warn!("测验 {} 已提交过 (提交 ID: {})", self.quiz_id, submission_id);
            return Some(Route::Results(submission_id));
        }
        if !self.state.can_submit() {
            self.dispatch(TakeQuizEvent::SubmitRejected);
            return None;
        }

        let answers = self.state.build_answers();
        self.dispatch(TakeQuizEvent::SubmitStarted);

        match self.api.submissions.submit(self.quiz_id, answers).await {
            Ok(submission_id) => {
                info!("✓ 测验 {} 已提交 (提交 ID: {})", self.quiz_id, submission_id);
                self.dispatch(TakeQuizEvent::Submitted(submission_id));
                Some(Route::Results(submission_id))
            }
            Err(e) => {
                error!("提交测验 {} 失败: {}", self.quiz_id, e);
                self.dispatch(TakeQuizEvent::SubmitFailed);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, Question, QuestionType};

    fn sample_quiz() -> Quiz {
        Quiz {
            id: QuizId(1),
            title: "Mixed".into(),
            description: None,
            created_at: None,
            questions: vec![
                Question {
                    id: QuestionId(10),
                    quiz_id: None,
                    question_type: QuestionType::TrueFalse,
                    question_text: "Water is wet".into(),
                    question_order: None,
                    options: vec![
                        AnswerOption {
                            id: OptionId(100),
                            question_id: None,
                            option_text: "True".into(),
                            is_correct: true,
                            option_order: 1,
                        },
                        AnswerOption {
                            id: OptionId(101),
                            question_id: None,
                            option_text: "False".into(),
                            is_correct: false,
                            option_order: 2,
                        },
                    ],
                },
                Question {
                    id: QuestionId(11),
                    quiz_id: None,
                    question_type: QuestionType::Text,
                    question_text: "Capital of France?".into(),
                    question_order: None,
                    options: Vec::new(),
                },
            ],
        }
    }

    fn loaded() -> TakeQuizState {
        TakeQuizState::default().apply(TakeQuizEvent::Loaded(sample_quiz()))
    }

    #[test]
    fn test_ready_only_when_all_answered() {
        let state = loaded();
        assert!(!state.is_ready());

        let state = state.apply(TakeQuizEvent::OptionSelected {
            question_id: QuestionId(10),
            option_id: OptionId(101),
        });
        assert!(!state.is_ready());

        let state = state.apply(TakeQuizEvent::TextEntered {
            question_id: QuestionId(11),
            text: "Paris".into(),
        });
        assert!(state.is_ready());

        let state = state.apply(TakeQuizEvent::TextEntered {
            question_id: QuestionId(11),
            text: String::new(),
        });
        assert!(!state.is_ready());
    }

    #[test]
    fn test_selection_is_exclusive_per_question() {
        let state = loaded()
            .apply(TakeQuizEvent::OptionSelected {
                question_id: QuestionId(10),
                option_id: OptionId(100),
            })
            .apply(TakeQuizEvent::OptionSelected {
                question_id: QuestionId(10),
                option_id: OptionId(101),
            });
        assert!(state.is_selected(QuestionId(10), OptionId(101)));
        assert!(!state.is_selected(QuestionId(10), OptionId(100)));
    }

    #[test]
    fn test_foreign_option_is_ignored() {
        let state = loaded().apply(TakeQuizEvent::OptionSelected {
            question_id: QuestionId(10),
            option_id: OptionId(999),
        });
        assert!(state.answers.is_empty());

        let state = state.apply(TakeQuizEvent::TextEntered {
            question_id: QuestionId(10),
            text: "True".into(),
        });
        assert!(state.answers.is_empty());
    }

    #[test]
    fn test_build_answers_in_question_order() {
        let state = loaded()
            .apply(TakeQuizEvent::TextEntered {
                question_id: QuestionId(11),
                text: "Paris".into(),
            })
            .apply(TakeQuizEvent::OptionSelected {
                question_id: QuestionId(10),
                option_id: OptionId(100),
            });
        let answers = state.build_answers();
        assert_eq!(
            answers,
            vec![
                AnswerInput {
                    question_id: QuestionId(10),
                    user_answer: "100".into()
                },
                AnswerInput {
                    question_id: QuestionId(11),
                    user_answer: "Paris".into()
                },
            ]
        );
    }

    #[test]
    fn test_not_ready_before_load() {
        assert!(!TakeQuizState::default().is_ready());
    }

    #[test]
    fn test_submitted_form_is_closed() {
        let state = loaded()
            .apply(TakeQuizEvent::OptionSelected {
                question_id: QuestionId(10),
                option_id: OptionId(100),
            })
            .apply(TakeQuizEvent::TextEntered {
                question_id: QuestionId(11),
                text: "Paris".into(),
            })
            .apply(TakeQuizEvent::SubmitStarted);
        assert!(!state.can_submit());

        let state = state.apply(TakeQuizEvent::Submitted(SubmissionId(7)));
        assert!(state.is_ready());
        assert!(!state.submitting);
        assert!(!state.can_submit());
    }

    #[test]
    fn test_submit_failure_reenables_form() {
        let state = loaded()
            .apply(TakeQuizEvent::SubmitStarted)
            .apply(TakeQuizEvent::SubmitFailed);
        assert!(!state.submitting);
        assert_eq!(state.error.as_deref(), Some(MSG_SUBMIT_FAILED));
    }
}
