//! 结果页
//!
//! 拉取评分后的提交记录，计算百分比和评语档位，逐题显示对错。

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::clients::QuizApi;
use crate::models::{percentage, GradedAnswer, ScoreBand, SubmissionId, SubmissionResult};

pub const MSG_LOAD_FAILED: &str = "Failed to load results";
pub const NO_ANSWER: &str = "(No answer)";
pub const NO_CORRECT_ANSWER: &str = "N/A";

/// 单题回顾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    /// 从 1 开始
    pub number: usize,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerReview {
    fn from_graded(number: usize, answer: &GradedAnswer) -> Self {
        let user_answer = match answer.user_answer.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_ANSWER.to_string(),
        };
        Self {
            number,
            question_text: answer.question_text.clone(),
            user_answer,
            correct_answer: answer
                .correct_answer
                .clone()
                .unwrap_or_else(|| NO_CORRECT_ANSWER.to_string()),
            is_correct: answer.is_correct,
        }
    }

    pub fn marker(&self) -> &'static str {
        if self.is_correct {
            "✓"
        } else {
            "✗"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsState {
    pub result: Option<SubmissionResult>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsEvent {
    LoadStarted,
    Loaded(SubmissionResult),
    LoadFailed,
}

impl ResultsState {
    pub fn apply(self, event: ResultsEvent) -> Self {
        match event {
            ResultsEvent::LoadStarted => Self { loading: true, ..self },
            ResultsEvent::Loaded(result) => Self {
                result: Some(result),
                loading: false,
                error: None,
            },
            ResultsEvent::LoadFailed => Self {
                loading: false,
                error: Some(MSG_LOAD_FAILED.to_string()),
                ..self
            },
        }
    }

    pub fn percentage(&self) -> Option<u32> {
        self.result
            .as_ref()
            .map(|r| percentage(r.score, r.total_questions))
    }

    pub fn band(&self) -> Option<ScoreBand> {
        self.percentage().map(ScoreBand::from_percentage)
    }

    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.result.as_ref().and_then(|r| r.submitted_at)
    }

    pub fn reviews(&self) -> Vec<AnswerReview> {
        self.result
            .as_ref()
            .map(|r| {
                r.answers
                    .iter()
                    .enumerate()
                    .map(|(i, a)| AnswerReview::from_graded(i + 1, a))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 结果页面
pub struct ResultsView {
    api: QuizApi,
    submission_id: SubmissionId,
    state: ResultsState,
}

impl ResultsView {
    pub fn new(api: QuizApi, submission_id: SubmissionId) -> Self {
        Self {
            api,
            submission_id,
            state: ResultsState::default(),
        }
    }

    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    pub fn dispatch(&mut self, event: ResultsEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    pub async fn load(&mut self) {
        self.dispatch(ResultsEvent::LoadStarted);
        match self.api.submissions.get_results(self.submission_id).await {
            Ok(result) => {
                info!(
                    "✓ 提交 {} 得分 {}/{}",
                    self.submission_id, result.score, result.total_questions
                );
                self.dispatch(ResultsEvent::Loaded(result));
            }
            Err(e) => {
                error!("加载提交结果 {} 失败: {}", self.submission_id, e);
                self.dispatch(ResultsEvent::LoadFailed);
            }
        }
    }
}
