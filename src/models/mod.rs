pub mod ids;
pub mod quiz;
pub mod score;
pub mod submission;

pub use ids::{OptionId, QuestionId, QuizId, SubmissionId};
pub use quiz::{
    AnswerOption, NewOption, NewQuestion, OptionUpdate, Question, QuestionTextPayload, QuestionType, Quiz,
    QuizPayload,
};
pub use score::{percentage, ScoreBand};
pub use submission::{
    AnswerInput, AnswerValue, GradedAnswer, SubmissionReceipt, SubmissionRequest, SubmissionResult,
};
