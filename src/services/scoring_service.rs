//! 计分服务
//!
//! 按位置对照题目与用户答案逐题评分并汇总。缺少的答案视为空字符串。

use crate::models::question::{Question, QuestionType};
use crate::models::submission::{ScoringResult, SubmissionSummary};
use crate::services::answer_normalizer::{canonicalize_multiple, normalize_judge_strict};

/// 对整份答卷评分
pub fn score_submission(questions: &[Question], user_answers: &[String]) -> SubmissionSummary {
    let results: Vec<ScoringResult> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let user_answer = user_answers.get(i).map(String::as_str).unwrap_or("");
            grade_question(question, user_answer)
        })
        .collect();

    // 单题分值来自客户端，按 u64 累加避免溢出
    let total_score = results.iter().map(|r| u64::from(r.score)).sum();
    let max_score = total_points(questions);
    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let total_questions = questions.len();

    SubmissionSummary {
        results,
        total_score,
        max_score,
        correct_count,
        total_questions,
        accuracy_rate: accuracy_rate(correct_count, total_questions),
    }
}

/// 题目分值合计
pub fn total_points(questions: &[Question]) -> u64 {
    questions.iter().map(|q| u64::from(q.score)).sum()
}

/// 正确率（百分比），没有题目时为 0
pub fn accuracy_rate(correct_count: usize, total_questions: usize) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    correct_count as f64 / total_questions as f64 * 100.0
}

/// 对单道题评分
pub fn grade_question(question: &Question, user_answer: &str) -> ScoringResult {
    let (user_answer, correct_answer) = match question.question_type {
        QuestionType::Judge => {
            // 空白视为未作答，不参与判断题标准化
            let user = if user_answer.trim().is_empty() {
                String::new()
            } else {
                normalize_judge_strict(user_answer).to_string()
            };
            (user, normalize_judge_strict(&question.answer).to_string())
        }
        QuestionType::Multiple => (
            canonicalize_multiple(user_answer),
            canonicalize_multiple(&question.answer),
        ),
        QuestionType::Single => (user_answer.to_string(), question.answer.clone()),
    };

    let is_correct = user_answer == correct_answer;

    ScoringResult {
        question_id: question.id,
        user_answer,
        correct_answer,
        is_correct,
        score: if is_correct { question.score } else { 0 },
        max_score: question.score,
        explanation: question.explanation.clone(),
    }
}
