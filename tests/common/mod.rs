//! 测试用的内存后端
//!
//! 按 方法 + 路径 路由，行为与真实后端一致：
//! - 删除题目会连同选项一起删除，删除测验会连同题目一起删除
//! - 选择题按第一个正确选项的 ID 判分，简答题与正确选项文本比较（去空白、忽略大小写）
//! - 可以注入失败：某个端点在成功若干次之后返回错误状态码

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use quiz_client::clients::QuizApi;
use quiz_client::infrastructure::{ApiRequest, Transport};
use quiz_client::models::{
    AnswerOption, GradedAnswer, OptionId, Question, QuestionId, QuestionType, Quiz, QuizId, SubmissionId,
    SubmissionResult,
};
use quiz_client::RequestError;
use reqwest::Method;
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

struct FailRule {
    method: Method,
    path_contains: String,
    successes_left: usize,
    status: u16,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    quizzes: BTreeMap<i64, Quiz>,
    submissions: BTreeMap<i64, SubmissionResult>,
    requests: Vec<String>,
    failures: Vec<FailRule>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn find_question_mut(&mut self, question_id: i64) -> Option<&mut Question> {
        self.quizzes
            .values_mut()
            .flat_map(|quiz| quiz.questions.iter_mut())
            .find(|q| q.id == QuestionId(question_id))
    }
}

pub struct FakeBackend {
    inner: Mutex<Inner>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner::default()),
        })
    }

    pub fn api(self: &Arc<Self>) -> QuizApi {
        QuizApi::new(self.clone())
    }

    /// `method` 请求路径包含 `path_contains` 时，先成功 `successes` 次，之后一律返回 `status`
    pub fn fail_after(&self, method: Method, path_contains: &str, successes: usize, status: u16) {
        self.inner.lock().unwrap().failures.push(FailRule {
            method,
            path_contains: path_contains.to_string(),
            successes_left: successes,
            status,
        });
    }

    pub fn clear_failures(&self) {
        self.inner.lock().unwrap().failures.clear();
    }

    /// 已收到的请求，形如 `POST /quizzes`
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn quiz(&self, id: QuizId) -> Option<Quiz> {
        self.inner.lock().unwrap().quizzes.get(&id.get()).cloned()
    }

    pub fn question_count(&self, id: QuizId) -> usize {
        self.quiz(id).map_or(0, |q| q.questions.len())
    }

    fn check_failures(inner: &mut Inner, request: &ApiRequest) -> Option<u16> {
        for rule in inner.failures.iter_mut() {
            if rule.method == request.method && request.path.contains(&rule.path_contains) {
                if rule.successes_left == 0 {
                    return Some(rule.status);
                }
                rule.successes_left -= 1;
            }
        }
        None
    }
}

fn not_found(endpoint: &str, what: &str, id: i64) -> RequestError {
    RequestError::status(endpoint, 404, format!("{} not found with id: {}", what, id))
}

fn bad_request(endpoint: &str, message: &str) -> RequestError {
    RequestError::status(endpoint, 400, message)
}

fn parse_id(endpoint: &str, raw: &str) -> Result<i64, RequestError> {
    raw.parse().map_err(|_| bad_request(endpoint, "invalid id"))
}

fn body_str(body: &Option<JsonValue>, key: &str) -> Option<String> {
    body.as_ref()
        .and_then(|b| b.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn grade(question: &Question, user_answer: &str) -> bool {
    if user_answer.trim().is_empty() {
        return false;
    }
    let Some(correct) = question.options.iter().find(|o| o.is_correct) else {
        return false;
    };
    match question.question_type {
        QuestionType::Mcq | QuestionType::TrueFalse => user_answer
            .parse::<i64>()
            .map_or(false, |id| correct.id == OptionId(id)),
        QuestionType::Text => user_answer
            .trim()
            .eq_ignore_ascii_case(correct.option_text.trim()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).expect("serialize fake response")
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<JsonValue, RequestError> {
        let endpoint = request.endpoint();
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(endpoint.clone());

        if let Some(status) = Self::check_failures(&mut inner, &request) {
            return Err(RequestError::status(&endpoint, status, "injected failure"));
        }

        let segments: Vec<&str> = request.path.split('/').filter(|s| !s.is_empty()).collect();
        let body = &request.body;

        match (request.method.as_str(), segments.as_slice()) {
            // ========== 测验 ==========
            ("GET", ["quizzes"]) => Ok(to_json(&inner.quizzes.values().collect::<Vec<_>>())),
            ("POST", ["quizzes"]) => {
                let id = inner.next_id();
                let quiz = Quiz {
                    id: QuizId(id),
                    title: body_str(body, "title").unwrap_or_default(),
                    description: body_str(body, "description"),
                    created_at: None,
                    questions: Vec::new(),
                };
                inner.quizzes.insert(id, quiz.clone());
                Ok(to_json(&quiz))
            }
            ("GET", ["quizzes", id]) => {
                let id = parse_id(&endpoint, id)?;
                inner
                    .quizzes
                    .get(&id)
                    .map(to_json)
                    .ok_or_else(|| not_found(&endpoint, "Quiz", id))
            }
            ("PUT", ["quizzes", id]) => {
                let id = parse_id(&endpoint, id)?;
                let quiz = inner
                    .quizzes
                    .get_mut(&id)
                    .ok_or_else(|| not_found(&endpoint, "Quiz", id))?;
                quiz.title = body_str(body, "title").unwrap_or_default();
                quiz.description = body_str(body, "description");
                Ok(to_json(&*quiz))
            }
            ("DELETE", ["quizzes", id]) => {
                let id = parse_id(&endpoint, id)?;
                inner
                    .quizzes
                    .remove(&id)
                    .map(|_| JsonValue::Null)
                    .ok_or_else(|| not_found(&endpoint, "Quiz", id))
            }

            // ========== 题目 ==========
            ("POST", ["quizzes", quiz_id, "questions"]) => {
                let quiz_id = parse_id(&endpoint, quiz_id)?;
                let question_type: QuestionType = body
                    .as_ref()
                    .and_then(|b| b.get("type").cloned())
                    .and_then(|t| serde_json::from_value(t).ok())
                    .ok_or_else(|| bad_request(&endpoint, "invalid type"))?;
                let id = inner.next_id();
                let quiz = inner
                    .quizzes
                    .get_mut(&quiz_id)
                    .ok_or_else(|| not_found(&endpoint, "Quiz", quiz_id))?;
                let question = Question {
                    id: QuestionId(id),
                    quiz_id: None,
                    question_type,
                    question_text: body_str(body, "questionText").unwrap_or_default(),
                    question_order: Some(quiz.questions.len() as i32 + 1),
                    options: Vec::new(),
                };
                quiz.questions.push(question.clone());
                Ok(to_json(&Question {
                    quiz_id: Some(QuizId(quiz_id)),
                    ..question
                }))
            }
            ("PUT", ["quizzes", _, "questions", id]) => {
                let id = parse_id(&endpoint, id)?;
                let question = inner
                    .find_question_mut(id)
                    .ok_or_else(|| not_found(&endpoint, "Question", id))?;
                question.question_text = body_str(body, "questionText").unwrap_or_default();
                Ok(to_json(&*question))
            }
            ("DELETE", ["quizzes", quiz_id, "questions", id]) => {
                let quiz_id = parse_id(&endpoint, quiz_id)?;
                let id = parse_id(&endpoint, id)?;
                let quiz = inner
                    .quizzes
                    .get_mut(&quiz_id)
                    .ok_or_else(|| not_found(&endpoint, "Quiz", quiz_id))?;
                let before = quiz.questions.len();
                quiz.questions.retain(|q| q.id != QuestionId(id));
                if quiz.questions.len() == before {
                    return Err(not_found(&endpoint, "Question", id));
                }
                Ok(JsonValue::Null)
            }

            // ========== 选项 ==========
            ("POST", ["questions", question_id, "options"]) => {
                let question_id = parse_id(&endpoint, question_id)?;
                let id = inner.next_id();
                let question = inner
                    .find_question_mut(question_id)
                    .ok_or_else(|| not_found(&endpoint, "Question", question_id))?;
                let option = AnswerOption {
                    id: OptionId(id),
                    question_id: None,
                    option_text: body_str(body, "optionText").unwrap_or_default(),
                    is_correct: body
                        .as_ref()
                        .and_then(|b| b.get("isCorrect"))
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false),
                    option_order: body
                        .as_ref()
                        .and_then(|b| b.get("optionOrder"))
                        .and_then(|v| v.as_i64())
                        .unwrap_or(0) as i32,
                };
                question.options.push(option.clone());
                Ok(to_json(&AnswerOption {
                    question_id: Some(QuestionId(question_id)),
                    ..option
                }))
            }
            ("PUT", ["questions", question_id, "options", id]) => {
                let question_id = parse_id(&endpoint, question_id)?;
                let id = parse_id(&endpoint, id)?;
                let question = inner
                    .find_question_mut(question_id)
                    .ok_or_else(|| not_found(&endpoint, "Question", question_id))?;
                let option = question
                    .options
                    .iter_mut()
                    .find(|o| o.id == OptionId(id))
                    .ok_or_else(|| not_found(&endpoint, "Option", id))?;
                option.option_text = body_str(body, "optionText").unwrap_or_default();
                option.is_correct = body
                    .as_ref()
                    .and_then(|b| b.get("isCorrect"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                Ok(to_json(&*option))
            }
            ("DELETE", ["questions", question_id, "options", id]) => {
                let question_id = parse_id(&endpoint, question_id)?;
                let id = parse_id(&endpoint, id)?;
                let question = inner
                    .find_question_mut(question_id)
                    .ok_or_else(|| not_found(&endpoint, "Question", question_id))?;
                let before = question.options.len();
                question.options.retain(|o| o.id != OptionId(id));
                if question.options.len() == before {
                    return Err(not_found(&endpoint, "Option", id));
                }
                Ok(JsonValue::Null)
            }

            // ========== 提交 ==========
            ("POST", ["submissions"]) => {
                let quiz_id = body
                    .as_ref()
                    .and_then(|b| b.get("quizId"))
                    .and_then(|v| v.as_i64())
                    .ok_or_else(|| bad_request(&endpoint, "quizId is required"))?;
                let quiz = inner
                    .quizzes
                    .get(&quiz_id)
                    .cloned()
                    .ok_or_else(|| not_found(&endpoint, "Quiz", quiz_id))?;

                let mut given: BTreeMap<i64, String> = BTreeMap::new();
                if let Some(answers) = body.as_ref().and_then(|b| b.get("answers")).and_then(|v| v.as_array()) {
                    for answer in answers {
                        if let (Some(qid), Some(text)) = (
                            answer.get("questionId").and_then(|v| v.as_i64()),
                            answer.get("userAnswer").and_then(|v| v.as_str()),
                        ) {
                            given.insert(qid, text.to_string());
                        }
                    }
                }

                let graded: Vec<GradedAnswer> = quiz
                    .questions
                    .iter()
                    .map(|question| {
                        let user_answer = given.get(&question.id.get()).cloned().unwrap_or_default();
                        GradedAnswer {
                            question_id: Some(question.id),
                            question_text: question.question_text.clone(),
                            question_type: Some(question.question_type),
                            is_correct: grade(question, &user_answer),
                            user_answer: Some(user_answer),
                            correct_answer: Some(
                                question
                                    .options
                                    .iter()
                                    .find(|o| o.is_correct)
                                    .map(|o| o.option_text.clone())
                                    .unwrap_or_else(|| "N/A".to_string()),
                            ),
                        }
                    })
                    .collect();

                let id = inner.next_id();
                let result = SubmissionResult {
                    submission_id: Some(SubmissionId(id)),
                    quiz_id: Some(QuizId(quiz_id)),
                    score: graded.iter().filter(|a| a.is_correct).count() as u32,
                    total_questions: quiz.questions.len() as u32,
                    submitted_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                        .and_then(|d| d.and_hms_opt(10, 0, 0)),
                    answers: graded,
                };
                inner.submissions.insert(id, result.clone());
                Ok(to_json(&result))
            }
            ("GET", ["submissions", id]) => {
                let id = parse_id(&endpoint, id)?;
                inner
                    .submissions
                    .get(&id)
                    .map(to_json)
                    .ok_or_else(|| RequestError::status(&endpoint, 500, "Submission not found"))
            }

            _ => Err(RequestError::status(&endpoint, 404, json!({"path": request.path}).to_string())),
        }
    }
}
