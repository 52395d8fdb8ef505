//! # Quiz Client
//!
//! 测验创建与答题应用的客户端核心：REST 客户端 + 页面状态管理
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有唯一的 HTTP 连接，只暴露"发请求"能力
//! - `Transport` - 传输抽象，测试中可替换为内存实现
//!
//! ### ② 资源客户端层（Clients）
//! - `clients/` - 每个 REST 资源一个客户端，一次操作一次请求
//! - `QuizApi` - 测验 / 题目 / 选项 / 提交 四个客户端的集合
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - "添加一道题 + 其选项"的多步流程
//! - `QuestionPlan` - 表单校验后的创建计划
//! - `QuestionFlow` - 逐个创建选项，失败时删除题目作为补偿
//!
//! ### ④ 页面层（Views）
//! - `views/` - 每个页面一个不可变状态快照 + 纯函数状态转换
//! - 任何写操作之后都重新拉取服务端数据
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod utils;
pub mod views;
pub mod workflow;

// 重新导出常用类型
pub use clients::QuizApi;
pub use config::Config;
pub use error::{AppError, AppResult, AuthoringError, ConfigError, RequestError, ValidationError};
pub use infrastructure::{ApiRequest, HttpClient, Transport};
pub use models::{AnswerValue, QuestionType, Quiz, ScoreBand};
pub use views::Route;
pub use workflow::{QuestionFlow, QuestionPlan};
