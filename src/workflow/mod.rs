pub mod authoring_ctx;
pub mod question_flow;
pub mod question_plan;

pub use authoring_ctx::AuthoringCtx;
pub use question_flow::{AuthoredQuestion, QuestionFlow};
pub use question_plan::{McqRow, PlannedOption, QuestionPlan, MIN_MCQ_OPTIONS};
