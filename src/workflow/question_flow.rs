//! 题目创建流程 - 流程层
//!
//! 核心职责：定义"添加一道题"的完整流程
//!
//! 流程顺序：
//! 1. 创建题目（只带题型和题干）
//! 2. 按显示顺序逐个创建选项，前一个完成后才发下一个
//! 3. 任一选项创建失败 → 补偿：删除已创建的题目
//!
//! 后端没有"题目 + 选项"的原子接口，所以这里显式地把多步请求当作
//! 一个带补偿步骤的事务处理。补偿本身失败时，服务端会留下题目和
//! 已创建的前缀选项，错误中会带上题目 ID 供管理员手动修复。

use tracing::{error, info, warn};

use crate::clients::QuizApi;
use crate::error::AuthoringError;
use crate::models::{AnswerOption, Question, QuizId};
use crate::utils::truncate_text;
use crate::workflow::authoring_ctx::AuthoringCtx;
use crate::workflow::question_plan::QuestionPlan;

/// 流程成功后的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredQuestion {
    pub question: Question,
    pub options: Vec<AnswerOption>,
}

/// 题目创建流程
///
/// - 只依赖资源客户端，不持有界面状态
/// - 不重试
pub struct QuestionFlow {
    api: QuizApi,
}

impl QuestionFlow {
    pub fn new(api: QuizApi) -> Self {
        Self { api }
    }

    pub async fn run(&self, quiz_id: QuizId, plan: &QuestionPlan) -> Result<AuthoredQuestion, AuthoringError> {
        let ctx = AuthoringCtx::new(quiz_id, plan.question_type);
        info!("{} 📝 添加题目: {}", ctx, truncate_text(&plan.question_text, 60));

        // ========== 步骤 1: 创建题目 ==========
        let question = self
            .api
            .questions
            .add(quiz_id, plan.question_type, &plan.question_text)
            .await
            .map_err(|e| {
                warn!("{} ⚠️ 创建题目失败: {}", ctx, e);
                AuthoringError::QuestionCreateFailed(e)
            })?;

        info!("{} ✓ 题目已创建 (ID: {})", ctx, question.id);

        // ========== 步骤 2: 逐个创建选项 ==========
        let mut options = Vec::with_capacity(plan.options.len());
        for planned in &plan.options {
            match self
                .api
                .options
                .add(question.id, &planned.text, planned.is_correct, planned.order)
                .await
            {
                Ok(option) => options.push(option),
                Err(e) => {
                    warn!(
                        "{} ⚠️ 第 {}/{} 个选项创建失败: {}",
                        ctx,
                        options.len() + 1,
                        plan.options.len(),
                        e
                    );
                    let compensated = self.compensate(&ctx, &question).await;
                    return Err(AuthoringError::OptionsIncomplete {
                        question_id: question.id,
                        created: options.len(),
                        expected: plan.options.len(),
                        compensated,
                        source: e,
                    });
                }
            }
        }

        if !options.is_empty() {
            info!("{} ✓ 已创建 {} 个选项", ctx, options.len());
        }

        Ok(AuthoredQuestion { question, options })
    }

    /// 补偿步骤：删除已创建的题目，返回是否删除成功
    async fn compensate(&self, ctx: &AuthoringCtx, question: &Question) -> bool {
        info!("{} ↩️ 回滚: 删除题目 {}", ctx, question.id);
        match self.api.questions.delete(ctx.quiz_id, question.id).await {
            Ok(()) => {
                info!("{} ✓ 回滚完成", ctx);
                true
            }
            Err(e) => {
                error!(
                    "{} ❌ 回滚失败，题目 {} 残留在服务端，需要手动删除: {}",
                    ctx, question.id, e
                );
                false
            }
        }
    }
}
