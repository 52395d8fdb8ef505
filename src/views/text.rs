//! 终端文本渲染
//!
//! 把页面状态渲染成纯文本，供命令行输出使用。

use std::fmt::Write;

use crate::models::Quiz;
use crate::views::banner::Banner;
use crate::views::quiz_list::{QuizListState, MSG_EMPTY};
use crate::views::results::ResultsState;

fn push_banner(out: &mut String, banner: &Banner) {
    match banner {
        Banner::Error(m) => {
            let _ = writeln!(out, "[error] {}", m);
        }
        Banner::Success(m) => {
            let _ = writeln!(out, "[ok] {}", m);
        }
        Banner::None => {}
    }
}

/// 测验列表
pub fn render_quiz_list(state: &QuizListState) -> String {
    let mut out = String::new();
    push_banner(&mut out, &state.banner);

    if state.shows_empty_state() {
        if !state.banner.is_error() {
            out.push_str(MSG_EMPTY);
            out.push('\n');
        }
        return out;
    }

    for quiz in &state.quizzes {
        let _ = writeln!(
            out,
            "#{:<4} {} ({} questions)",
            quiz.id,
            quiz.title,
            quiz.questions.len()
        );
        if let Some(description) = quiz.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "      {}", description);
        }
    }
    out
}

/// 单个测验的题目和选项
pub fn render_quiz(quiz: &Quiz) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", quiz.title, quiz.id);
    if let Some(description) = quiz.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{}", description);
    }

    if quiz.questions.is_empty() {
        out.push_str("No questions yet\n");
        return out;
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "\nQ{}: {} [{}]",
            index + 1,
            question.question_text,
            question.question_type
        );
        if question.options.is_empty() {
            out.push_str("   No options yet\n");
        }
        for option in &question.options {
            let marker = if option.is_correct { " ✓" } else { "" };
            let _ = writeln!(out, "   - {}{} (#{})", option.option_text, marker, option.id);
        }
    }
    out
}

/// 结果页
pub fn render_results(state: &ResultsState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "[error] {}", error);
    }
    let (Some(result), Some(percentage), Some(band)) = (&state.result, state.percentage(), state.band())
    else {
        return out;
    };

    let _ = writeln!(out, "{} / {}", result.score, result.total_questions);
    let _ = writeln!(out, "{}%", percentage);
    let _ = writeln!(out, "{}", band.banner());
    if let Some(at) = result.submitted_at {
        let _ = writeln!(out, "Submitted: {}", at.format("%Y-%m-%d %H:%M:%S"));
    }

    out.push_str("\nAnswer Review\n");
    for review in state.reviews() {
        let _ = writeln!(out, "{} Q{}: {}", review.marker(), review.number, review.question_text);
        let _ = writeln!(out, "   Your answer: {}", review.user_answer);
        let _ = writeln!(out, "   Correct answer: {}", review.correct_answer);
    }
    out
}
