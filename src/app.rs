use anyhow::{bail, Context, Result};
use tracing::info;

use crate::clients::QuizApi;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{QuizId, SubmissionId};
use crate::utils::logging::log_startup;
use crate::views::text::{render_quiz, render_quiz_list, render_results};
use crate::views::{QuizEditorView, QuizListView, ResultsView};

const USAGE: &str = "用法: quiz_client <list | show <quizId> | results <submissionId>>";

/// 命令行命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 列出全部测验
    List,
    /// 显示测验的题目和选项
    Show(QuizId),
    /// 显示提交结果
    Results(SubmissionId),
}

impl Command {
    /// 解析命令行参数（不含程序名）
    pub fn parse(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Command::List),
            [cmd] if cmd == "list" => Ok(Command::List),
            [cmd, id] if cmd == "show" => Ok(Command::Show(
                id.parse().with_context(|| format!("无效的测验ID: {}", id))?,
            )),
            [cmd, id] if cmd == "results" => Ok(Command::Results(
                id.parse().with_context(|| format!("无效的提交ID: {}", id))?,
            )),
            _ => bail!("{}", USAGE),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Show(_) => "show",
            Command::Results(_) => "results",
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    api: QuizApi,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        let api = QuizApi::from_config(&config)?;
        Ok(Self { config, api })
    }

    pub fn with_api(config: Config, api: QuizApi) -> Self {
        Self { config, api }
    }

    /// 执行命令，返回要输出的文本
    pub async fn run(&self, command: Command) -> Result<String> {
        log_startup(&self.config.api_base_url, command.name());

        match command {
            Command::List => {
                let mut view = QuizListView::new(self.api.clone());
                view.load().await;
                let output = render_quiz_list(view.state());
                if view.state().banner.is_error() {
                    bail!("{}", output.trim_end());
                }
                Ok(output)
            }
            Command::Show(quiz_id) => {
                let mut view =
                    QuizEditorView::new(self.api.clone(), quiz_id, self.config.default_mcq_rows);
                view.load().await;
                match &view.state().quiz {
                    Some(quiz) => Ok(render_quiz(quiz)),
                    None => bail!("Quiz not found"),
                }
            }
            Command::Results(submission_id) => {
                let mut view = ResultsView::new(self.api.clone(), submission_id);
                view.load().await;
                if let Some(error) = &view.state().error {
                    bail!("{}", error);
                }
                info!("✓ 结果加载完成");
                Ok(render_results(view.state()))
            }
        }
    }
}
