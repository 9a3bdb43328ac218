use super::question::Question;
use crate::services::scoring_service::total_points;
use serde::{Deserialize, Serialize};

/// 单题评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub question_id: u32,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub score: u32,
    pub max_score: u32,
    pub explanation: String,
}

/// 整份答卷的评分汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub results: Vec<ScoringResult>,
    pub total_score: u64,
    pub max_score: u64,
    pub correct_count: usize,
    pub total_questions: usize,
    /// 正确率（百分比），没有题目时为 0
    pub accuracy_rate: f64,
}

/// 提交答卷请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub user_answers: Vec<SubmittedAnswer>,
}

impl SubmitRequest {
    /// 取出用户答案文本，与题目按位置一一对应
    pub fn answers(&self) -> Vec<String> {
        self.user_answers.iter().map(|a| a.0.clone()).collect()
    }
}

/// 用户提交的单个答案
///
/// 前端通常提交字符串；`null` 视为未作答，数字与布尔值按文本处理，
/// 字符串数组（多选题逐项提交）按顺序拼接。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedAnswer(pub String);

impl<'de> Deserialize<'de> for SubmittedAnswer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{SeqAccess, Visitor};
        use std::fmt;

        struct AnswerVisitor;

        impl<'de> Visitor<'de> for AnswerVisitor {
            type Value = SubmittedAnswer;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, null, number, boolean or list of strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer::default())
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SubmittedAnswer(value.to_string()))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut joined = String::new();
                while let Some(part) = seq.next_element::<String>()? {
                    joined.push_str(&part);
                }
                Ok(SubmittedAnswer(joined))
            }
        }

        deserializer.deserialize_any(AnswerVisitor)
    }
}

/// 上传解析成功的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub total_score: u64,
}

impl UploadResponse {
    pub fn new(questions: Vec<Question>) -> Self {
        let total_score = total_points(&questions);
        Self {
            success: true,
            total_questions: questions.len(),
            total_score,
            questions,
        }
    }
}

/// 提交答卷成功的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: SubmissionSummary,
}

impl From<SubmissionSummary> for SubmitResponse {
    fn from(summary: SubmissionSummary) -> Self {
        Self {
            success: true,
            summary,
        }
    }
}
