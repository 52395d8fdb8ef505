//! 测验编辑页（题目 / 选项编辑器）
//!
//! 添加题目时按题型走不同的子表单：
//! - TEXT：只有题干
//! - TRUE_FALSE：选择 True 或 False 为正确答案
//! - MCQ：可增减的选项行（默认 4 行），每行有文本和"正确"勾选
//!
//! 另有一个独立的"追加选项"面板，可以给已有题目单独加选项（排序值为 0，
//! 不重新编号）。同一时间只有一个题目的面板是打开的。

use tracing::{error, info, warn};

use crate::clients::option_client::DEFAULT_OPTION_ORDER;
use crate::clients::QuizApi;
use crate::error::{AuthoringError, ValidationError};
use crate::models::{OptionId, QuestionId, QuestionType, Quiz, QuizId};
use crate::views::banner::Banner;
use crate::workflow::{McqRow, QuestionFlow, QuestionPlan};

pub const MSG_LOAD_FAILED: &str = "Failed to load quiz";
pub const MSG_QUESTION_ADDED: &str = "Question added!";
pub const MSG_QUESTION_FAILED: &str = "Failed to add question";
pub const MSG_OPTIONS_ROLLED_BACK: &str = "Failed to add options. The question was removed, please try again.";
pub const MSG_OPTION_ADDED: &str = "Option added!";
pub const MSG_OPTION_FAILED: &str = "Failed to add option";
pub const MSG_QUESTION_DELETED: &str = "Question deleted";
pub const MSG_QUESTION_DELETE_FAILED: &str = "Failed to delete question";
pub const MSG_OPTION_DELETED: &str = "Option deleted";
pub const MSG_OPTION_DELETE_FAILED: &str = "Failed to delete option";

/// 新题目表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question_type: QuestionType,
    pub text: String,
    /// 判断题的正确答案是否为 True
    pub true_false_answer: bool,
    pub mcq_rows: Vec<McqRow>,
    default_rows: usize,
}

impl QuestionDraft {
    pub fn new(default_rows: usize) -> Self {
        Self {
            question_type: QuestionType::Mcq,
            text: String::new(),
            true_false_answer: true,
            mcq_rows: vec![McqRow::default(); default_rows],
            default_rows,
        }
    }

    /// 清空后的表单，保留默认行数
    pub fn reset(&self) -> Self {
        Self::new(self.default_rows)
    }

    /// 按当前题型生成创建计划
    pub fn to_plan(&self) -> Result<QuestionPlan, ValidationError> {
        match self.question_type {
            QuestionType::Text => QuestionPlan::text(&self.text),
            QuestionType::TrueFalse => QuestionPlan::true_false(&self.text, self.true_false_answer),
            QuestionType::Mcq => QuestionPlan::mcq(&self.text, &self.mcq_rows),
        }
    }
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new(4)
    }
}

/// 追加选项表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizEditorState {
    pub quiz: Option<Quiz>,
    pub loading: bool,
    pub banner: Banner,
    pub draft: QuestionDraft,
    /// 当前打开"追加选项"面板的题目
    pub editing_target: Option<QuestionId>,
    pub option_draft: OptionDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizEditorEvent {
    LoadStarted,
    Loaded(Quiz),
    LoadFailed,
    TypeSelected(QuestionType),
    TextEdited(String),
    TrueFalseAnswerSelected(bool),
    McqRowAdded,
    McqRowRemoved(usize),
    McqRowTextEdited { index: usize, text: String },
    McqRowCorrectToggled { index: usize, is_correct: bool },
    ValidationFailed(ValidationError),
    QuestionAdded,
    ActionFailed(String),
    OptionPanelOpened(QuestionId),
    OptionPanelClosed,
    OptionTextEdited(String),
    OptionCorrectToggled(bool),
    OptionAdded,
    QuestionDeleted,
    OptionDeleted,
}

impl QuizEditorState {
    pub fn new(default_mcq_rows: usize) -> Self {
        Self {
            draft: QuestionDraft::new(default_mcq_rows),
            ..Self::default()
        }
    }

    pub fn apply(self, event: QuizEditorEvent) -> Self {
        match event {
            QuizEditorEvent::LoadStarted => Self { loading: true, ..self },
            QuizEditorEvent::Loaded(quiz) => {
                // 题目被删掉后关闭它的面板
                let editing_target = self
                    .editing_target
                    .filter(|id| quiz.question(*id).is_some());
                Self {
                    quiz: Some(quiz),
                    loading: false,
                    editing_target,
                    banner: self.banner.clear_error(),
                    ..self
                }
            }
            QuizEditorEvent::LoadFailed => Self {
                loading: false,
                banner: Banner::error(MSG_LOAD_FAILED),
                ..self
            },
            QuizEditorEvent::TypeSelected(question_type) => Self {
                draft: QuestionDraft {
                    question_type,
                    ..self.draft
                },
                ..self
            },
            QuizEditorEvent::TextEdited(text) => Self {
                draft: QuestionDraft { text, ..self.draft },
                ..self
            },
            QuizEditorEvent::TrueFalseAnswerSelected(answer) => Self {
                draft: QuestionDraft {
                    true_false_answer: answer,
                    ..self.draft
                },
                ..self
            },
            QuizEditorEvent::McqRowAdded => {
                let mut draft = self.draft;
                draft.mcq_rows.push(McqRow::default());
                Self { draft, ..self }
            }
            QuizEditorEvent::McqRowRemoved(index) => {
                let mut draft = self.draft;
                if index < draft.mcq_rows.len() {
                    draft.mcq_rows.remove(index);
                }
                Self { draft, ..self }
            }
            QuizEditorEvent::McqRowTextEdited { index, text } => {
                let mut draft = self.draft;
                if let Some(row) = draft.mcq_rows.get_mut(index) {
                    row.text = text;
                }
                Self { draft, ..self }
            }
            QuizEditorEvent::McqRowCorrectToggled { index, is_correct } => {
                let mut draft = self.draft;
                if let Some(row) = draft.mcq_rows.get_mut(index) {
                    row.is_correct = is_correct;
                }
                Self { draft, ..self }
            }
            QuizEditorEvent::ValidationFailed(e) => Self {
                banner: Banner::error(e.to_string()),
                ..self
            },
            QuizEditorEvent::QuestionAdded => Self {
                draft: self.draft.reset(),
                banner: Banner::success(MSG_QUESTION_ADDED),
                ..self
            },
            QuizEditorEvent::ActionFailed(message) => Self {
                banner: Banner::Error(message),
                ..self
            },
            QuizEditorEvent::OptionPanelOpened(question_id) => Self {
                editing_target: Some(question_id),
                option_draft: OptionDraft::default(),
                ..self
            },
            QuizEditorEvent::OptionPanelClosed => Self {
                editing_target: None,
                option_draft: OptionDraft::default(),
                ..self
            },
            QuizEditorEvent::OptionTextEdited(text) => Self {
                option_draft: OptionDraft {
                    text,
                    ..self.option_draft
                },
                ..self
            },
            QuizEditorEvent::OptionCorrectToggled(is_correct) => Self {
                option_draft: OptionDraft {
                    is_correct,
                    ..self.option_draft
                },
                ..self
            },
            QuizEditorEvent::OptionAdded => Self {
                option_draft: OptionDraft::default(),
                banner: Banner::success(MSG_OPTION_ADDED),
                ..self
            },
            QuizEditorEvent::QuestionDeleted => Self {
                banner: Banner::success(MSG_QUESTION_DELETED),
                ..self
            },
            QuizEditorEvent::OptionDeleted => Self {
                banner: Banner::success(MSG_OPTION_DELETED),
                ..self
            },
        }
    }

    /// 某个题目的"追加选项"按钮是否可用
    pub fn can_open_option_panel(&self, question_id: QuestionId) -> bool {
        self.editing_target.map_or(true, |target| target == question_id)
    }
}

/// 测验编辑页面
pub struct QuizEditorView {
    api: QuizApi,
    flow: QuestionFlow,
    quiz_id: QuizId,
    state: QuizEditorState,
}

impl QuizEditorView {
    pub fn new(api: QuizApi, quiz_id: QuizId, default_mcq_rows: usize) -> Self {
        Self {
            flow: QuestionFlow::new(api.clone()),
            api,
            quiz_id,
            state: QuizEditorState::new(default_mcq_rows),
        }
    }

    pub fn state(&self) -> &QuizEditorState {
        &self.state
    }

    pub fn dispatch(&mut self, event: QuizEditorEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    /// 重新拉取整个测验
    pub async fn load(&mut self) {
        self.dispatch(QuizEditorEvent::LoadStarted);
        match self.api.quizzes.get(self.quiz_id).await {
            Ok(quiz) => self.dispatch(QuizEditorEvent::Loaded(quiz)),
            Err(e) => {
                error!("加载测验 {} 失败: {}", self.quiz_id, e);
                self.dispatch(QuizEditorEvent::LoadFailed);
            }
        }
    }

    /// 提交新题目表单，返回是否成功
    pub async fn submit_question(&mut self) -> bool {
        let plan = match self.state.draft.to_plan() {
            Ok(plan) => plan,
            Err(e) => {
                self.dispatch(QuizEditorEvent::ValidationFailed(e));
                return false;
            }
        };

        match self.flow.run(self.quiz_id, &plan).await {
            Ok(authored) => {
                info!(
                    "✓ 题目 {} 已添加，{} 个选项",
                    authored.question.id,
                    authored.options.len()
                );
                self.dispatch(QuizEditorEvent::QuestionAdded);
                self.load().await;
                true
            }
            Err(AuthoringError::QuestionCreateFailed(e)) => {
                error!("添加题目失败: {}", e);
                self.dispatch(QuizEditorEvent::ActionFailed(MSG_QUESTION_FAILED.to_string()));
                false
            }
            Err(AuthoringError::OptionsIncomplete {
                question_id,
                created,
                expected,
                compensated,
                source,
            }) => {
                error!(
                    "题目 {} 的选项创建失败 ({}/{}): {}",
                    question_id, created, expected, source
                );
                let message = if compensated {
                    MSG_OPTIONS_ROLLED_BACK.to_string()
                } else {
                    format!(
                        "Failed to add options. Question #{} was left with {} of {} options, please delete or fix it.",
                        question_id, created, expected
                    )
                };
                // 服务端状态可能已变化，先重新拉取再显示错误
                self.load().await;
                self.dispatch(QuizEditorEvent::ActionFailed(message));
                false
            }
        }
    }

    /// 打开某题的"追加选项"面板，同时关闭其他面板
    pub fn open_option_panel(&mut self, question_id: QuestionId) {
        self.dispatch(QuizEditorEvent::OptionPanelOpened(question_id));
    }

    pub fn close_option_panel(&mut self) {
        self.dispatch(QuizEditorEvent::OptionPanelClosed);
    }

    /// 给当前面板对应的题目追加一个选项
    pub async fn add_option(&mut self) -> bool {
        let Some(question_id) = self.state.editing_target else {
            warn!("没有打开的选项面板");
            return false;
        };

        let draft = self.state.option_draft.clone();
        if draft.text.trim().is_empty() {
            self.dispatch(QuizEditorEvent::ValidationFailed(ValidationError::BlankOptionText));
            return false;
        }

        match self
            .api
            .options
            .add(question_id, &draft.text, draft.is_correct, DEFAULT_OPTION_ORDER)
            .await
        {
            Ok(option) => {
                info!("✓ 题目 {} 追加选项 {}", question_id, option.id);
                self.dispatch(QuizEditorEvent::OptionAdded);
                self.load().await;
                true
            }
            Err(e) => {
                error!("追加选项失败: {}", e);
                self.dispatch(QuizEditorEvent::ActionFailed(MSG_OPTION_FAILED.to_string()));
                false
            }
        }
    }

    /// 删除题目，`confirm` 返回 false 时不发请求
    pub async fn delete_question(
        &mut self,
        question_id: QuestionId,
        confirm: impl FnOnce(QuestionId) -> bool,
    ) -> bool {
        if !confirm(question_id) {
            return false;
        }

        match self.api.questions.delete(self.quiz_id, question_id).await {
            Ok(()) => {
                info!("✓ 题目 {} 已删除", question_id);
                self.dispatch(QuizEditorEvent::QuestionDeleted);
                self.load().await;
                true
            }
            Err(e) => {
                error!("删除题目 {} 失败: {}", question_id, e);
                self.dispatch(QuizEditorEvent::ActionFailed(
                    MSG_QUESTION_DELETE_FAILED.to_string(),
                ));
                false
            }
        }
    }

    /// 删除选项
    pub async fn delete_option(&mut self, question_id: QuestionId, option_id: OptionId) -> bool {
        match self.api.options.delete(question_id, option_id).await {
            Ok(()) => {
                info!("✓ 选项 {} 已删除", option_id);
                self.dispatch(QuizEditorEvent::OptionDeleted);
                self.load().await;
                true
            }
            Err(e) => {
                error!("删除选项 {} 失败: {}", option_id, e);
                self.dispatch(QuizEditorEvent::ActionFailed(MSG_OPTION_DELETE_FAILED.to_string()));
                false
            }
        }
    }
}
