use crate::utils::truncate_text;
use serde::{Deserialize, Serialize};

/// 判断题的固定选项
pub const JUDGE_OPTIONS: [&str; 2] = ["正确", "错误"];

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 判断题
    Judge,
}

impl QuestionType {
    /// 按匹配优先级排列的全部题型
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Single,
        QuestionType::Multiple,
        QuestionType::Judge,
    ];

    /// 该题型的满分
    pub fn full_score(self) -> u32 {
        match self {
            QuestionType::Single => 10,
            QuestionType::Multiple => 20,
            QuestionType::Judge => 5,
        }
    }

    /// 题型标记（简体与繁体写法）
    pub fn marker_tokens(self) -> &'static [&'static str] {
        match self {
            QuestionType::Single => &["单选题", "單選題"],
            QuestionType::Multiple => &["多选题", "多選題"],
            QuestionType::Judge => &["判断题", "判斷題"],
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multiple => "多选题",
            QuestionType::Judge => "判断题",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 解析出的题目
///
/// 序列化字段名与前端保持一致：题干以 `question` 字段输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    pub score: u32,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// 创建一道尚未读取到答案的新题目
    ///
    /// 判断题的选项固定为 `正确` / `错误`。
    pub fn new(id: u32, question_type: QuestionType, text: impl Into<String>) -> Self {
        let options = match question_type {
            QuestionType::Judge => JUDGE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            _ => Vec::new(),
        };

        Self {
            id,
            question_type,
            text: text.into(),
            options,
            answer: String::new(),
            score: 0,
            explanation: String::new(),
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} [{}] {} (选项 {} 个, 答案: {:?}, {} 分)",
            self.id,
            self.question_type,
            truncate_text(&self.text, 40),
            self.options.len(),
            self.answer,
            self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_uses_client_field_names() {
        let question = Question::new(2, QuestionType::Judge, "2.天空是蓝色的吗?");
        let value = serde_json::to_value(&question).unwrap();

        assert_eq!(value["type"], "judge");
        assert_eq!(value["question"], "2.天空是蓝色的吗?");
        assert_eq!(value["options"], json!(["正确", "错误"]));
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_deserialize_accepts_text_alias_and_defaults() {
        let question: Question = serde_json::from_value(json!({
            "id": 1,
            "type": "multiple",
            "text": "1.以下正确的是",
            "answer": "AC",
            "score": 20
        }))
        .unwrap();

        assert_eq!(question.question_type, QuestionType::Multiple);
        assert_eq!(question.text, "1.以下正确的是");
        assert!(question.options.is_empty());
        assert_eq!(question.explanation, "");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<Question, _> = serde_json::from_value(json!({
            "id": 1,
            "type": "essay",
            "question": "1.作文",
            "answer": "",
            "score": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_full_scores() {
        assert_eq!(QuestionType::Single.full_score(), 10);
        assert_eq!(QuestionType::Multiple.full_score(), 20);
        assert_eq!(QuestionType::Judge.full_score(), 5);
    }
}
