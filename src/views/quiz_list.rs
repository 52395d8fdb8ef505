//! 管理端测验列表
//!
//! 进入页面拉取全部测验；创建前校验标题非空，成功后清空并收起表单、
//! 重新拉取列表；删除需要确认，删除后重新拉取。

use tracing::{error, info, warn};

use crate::clients::QuizApi;
use crate::error::ValidationError;
use crate::models::{Quiz, QuizId};
use crate::views::banner::Banner;
use crate::views::Route;

pub const MSG_LOAD_FAILED: &str = "Failed to load quizzes. Make sure the backend is running.";
pub const MSG_CREATED: &str = "Quiz created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create quiz";
pub const MSG_DELETED: &str = "Quiz deleted successfully!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete quiz";
pub const MSG_EMPTY: &str = "No quizzes yet. Create one to get started!";

/// 创建测验表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateQuizForm {
    pub open: bool,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizListState {
    pub quizzes: Vec<Quiz>,
    pub loading: bool,
    pub banner: Banner,
    pub form: CreateQuizForm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizListEvent {
    LoadStarted,
    Loaded(Vec<Quiz>),
    LoadFailed,
    FormOpened,
    FormClosed,
    TitleEdited(String),
    DescriptionEdited(String),
    ValidationFailed(ValidationError),
    Created,
    CreateFailed,
    Deleted,
    DeleteFailed,
}

impl QuizListState {
    pub fn apply(self, event: QuizListEvent) -> Self {
        match event {
            QuizListEvent::LoadStarted => Self { loading: true, ..self },
            QuizListEvent::Loaded(quizzes) => Self {
                quizzes,
                loading: false,
                banner: self.banner.clear_error(),
                ..self
            },
            QuizListEvent::LoadFailed => Self {
                loading: false,
                banner: Banner::error(MSG_LOAD_FAILED),
                ..self
            },
            QuizListEvent::FormOpened => Self {
                form: CreateQuizForm { open: true, ..self.form },
                ..self
            },
            QuizListEvent::FormClosed => Self {
                form: CreateQuizForm { open: false, ..self.form },
                ..self
            },
            QuizListEvent::TitleEdited(title) => Self {
                form: CreateQuizForm { title, ..self.form },
                ..self
            },
            QuizListEvent::DescriptionEdited(description) => Self {
                form: CreateQuizForm { description, ..self.form },
                ..self
            },
            QuizListEvent::ValidationFailed(e) => Self {
                banner: Banner::error(e.to_string()),
                ..self
            },
            QuizListEvent::Created => Self {
                form: CreateQuizForm::default(),
                banner: Banner::success(MSG_CREATED),
                ..self
            },
            QuizListEvent::CreateFailed => Self {
                banner: Banner::error(MSG_CREATE_FAILED),
                ..self
            },
            QuizListEvent::Deleted => Self {
                banner: Banner::success(MSG_DELETED),
                ..self
            },
            QuizListEvent::DeleteFailed => Self {
                banner: Banner::error(MSG_DELETE_FAILED),
                ..self
            },
        }
    }

    /// 列表为空且不在加载中时显示空状态
    pub fn shows_empty_state(&self) -> bool {
        !self.loading && self.quizzes.is_empty()
    }

    pub fn quiz(&self, id: QuizId) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    /// 列表项的"编辑"入口，只对列表中的测验有效
    pub fn edit_route(&self, id: QuizId) -> Option<Route> {
        self.quiz(id).map(|q| Route::EditQuiz(q.id))
    }

    /// 列表项的"开始答题"入口
    pub fn take_route(&self, id: QuizId) -> Option<Route> {
        self.quiz(id).map(|q| Route::TakeQuiz(q.id))
    }

    /// 提交前的标题校验
    pub fn validate_form(&self) -> Result<(), ValidationError> {
        if self.form.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// 测验列表页面
pub struct QuizListView {
    api: QuizApi,
    state: QuizListState,
}

impl QuizListView {
    pub fn new(api: QuizApi) -> Self {
        Self {
            api,
            state: QuizListState::default(),
        }
    }

    pub fn state(&self) -> &QuizListState {
        &self.state
    }

    pub fn dispatch(&mut self, event: QuizListEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    /// 拉取全部测验
    pub async fn load(&mut self) {
        self.dispatch(QuizListEvent::LoadStarted);
        match self.api.quizzes.list().await {
            Ok(quizzes) => {
                info!("✓ 加载了 {} 个测验", quizzes.len());
                self.dispatch(QuizListEvent::Loaded(quizzes));
            }
            Err(e) => {
                error!("加载测验列表失败: {}", e);
                self.dispatch(QuizListEvent::LoadFailed);
            }
        }
    }

    /// 提交创建表单，返回是否创建成功
    pub async fn submit_create(&mut self) -> bool {
        if let Err(e) = self.state.validate_form() {
            self.dispatch(QuizListEvent::ValidationFailed(e));
            return false;
        }

        let form = self.state.form.clone();
        match self.api.quizzes.create(&form.title, &form.description).await {
            Ok(quiz) => {
                info!("✓ 测验已创建: {} (ID: {})", quiz.title, quiz.id);
                self.dispatch(QuizListEvent::Created);
                self.load().await;
                true
            }
            Err(e) => {
                error!("创建测验失败: {}", e);
                self.dispatch(QuizListEvent::CreateFailed);
                false
            }
        }
    }

    /// 删除测验，`confirm` 返回 false 时不发请求
    pub async fn delete(&mut self, id: QuizId, confirm: impl FnOnce(QuizId) -> bool) -> bool {
        if !confirm(id) {
            info!("取消删除测验 {}", id);
            return false;
        }

        match self.api.quizzes.delete(id).await {
            Ok(()) => {
                info!("✓ 测验 {} 已删除", id);
                self.dispatch(QuizListEvent::Deleted);
                self.load().await;
                true
            }
            Err(e) => {
                warn!("删除测验 {} 失败: {}", id, e);
                self.dispatch(QuizListEvent::DeleteFailed);
                false
            }
        }
    }
}
