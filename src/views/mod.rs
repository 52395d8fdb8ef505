//! 界面状态层
//!
//! 每个页面一个状态容器：
//! - `*State` 是不可变快照，`apply(event)` 是纯函数，返回新快照
//! - `*View` 持有资源客户端和当前快照，负责发请求并把结果转成事件
//! - 任何写操作之后都重新拉取所属资源，不在本地修补
//!
//! 页面之间不共享可变状态，离开页面即丢弃。

pub mod banner;
pub mod quiz_editor;
pub mod quiz_list;
pub mod results;
pub mod take_quiz;
pub mod text;

pub use banner::Banner;
pub use quiz_editor::{OptionDraft, QuestionDraft, QuizEditorEvent, QuizEditorState, QuizEditorView};
pub use quiz_list::{CreateQuizForm, QuizListEvent, QuizListState, QuizListView};
pub use results::{AnswerReview, ResultsEvent, ResultsState, ResultsView};
pub use take_quiz::{TakeQuizEvent, TakeQuizState, TakeQuizView};

use crate::models::{QuizId, SubmissionId};

/// 页面跳转目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    QuizList,
    EditQuiz(QuizId),
    TakeQuiz(QuizId),
    Results(SubmissionId),
}

impl Route {
    /// 页面上"返回"按钮的目标，列表页没有上一级
    pub fn back(self) -> Option<Route> {
        match self {
            Route::QuizList => None,
            Route::EditQuiz(_) | Route::TakeQuiz(_) | Route::Results(_) => Some(Route::QuizList),
        }
    }
}
