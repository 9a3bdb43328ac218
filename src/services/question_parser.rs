//! 题目解析器
//!
//! 单次顺序扫描段落，按行分类构建题目列表。每行按以下优先级归类（先命中者生效）：
//!
//! 1. 题型标记行：包含 `单选题` / `多选题` / `判断题`（含繁体写法）
//! 2. 题目起始行：第一个 `.` 之前全部是数字，且不含 `答案:` / `答案：`
//! 3. 选项行：当前题目接受选项时，以 `A、` ~ `F、` 或 `A.` ~ `F.` 开头
//! 4. 答案行：以 `答案:` 或 `答案：` 开头
//! 5. 解析行：以 `解析:` 开头
//!
//! 其余行忽略。解析器从不报错，缺失的行只会让对应字段保持为空。

use crate::models::question::{Question, QuestionType};
use crate::services::answer_normalizer::normalize_judge_answer;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const ANSWER_PREFIXES: [&str; 2] = ["答案:", "答案："];
const EXPLANATION_PREFIX: &str = "解析:";

/// 题目起始：第一个 `.` 之前（没有 `.` 时为整行）全部是数字
///
/// 数字包括十进制数字（含全角）以及上标、下标、圈号等数位字符，如 `²`、`①`、`⑴`、`⒈`。
static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[\d\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}\x{2070}\x{2074}-\x{2079}",
        r"\x{2080}-\x{2089}\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}",
        r"\x{24EA}\x{24F5}-\x{24FD}\x{24FF}\x{2776}-\x{277E}\x{2780}-\x{2788}",
        r"\x{278A}-\x{2792}\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}",
        r"\x{1F100}-\x{1F10A}]+(?:\.|$)",
    ))
    .expect("题目起始正则无效")
});

/// 选项前缀：A ~ F 后接 `、` 或 `.`
static OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-F][、.]").expect("选项前缀正则无效"));

/// 没有题型标记时的题型推断策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// 固定题型（纯文本文档默认为单选题）
    Fixed(QuestionType),
    /// 根据题干内容推断（Word 文档）
    ContentHeuristic,
}

impl FallbackPolicy {
    /// 推断没有题型标记的题目类型
    pub fn infer(self, line: &str) -> QuestionType {
        match self {
            FallbackPolicy::Fixed(question_type) => question_type,
            FallbackPolicy::ContentHeuristic => infer_from_content(line),
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Fixed(QuestionType::Single)
    }
}

/// Word 文档的题型推断
///
/// 题干含 `以下` 与 `正确` 时为多选题；含 `是否` / `对错` 时为判断题；
/// 其余无法判断的也按判断题处理，这类文档里的无标记题目通常没有选项。
fn infer_from_content(line: &str) -> QuestionType {
    let mentions_correct = line.contains("正确") || line.contains("正確");
    let asks_true_false = ["是否", "对错", "對錯"].iter().any(|t| line.contains(t));

    if line.contains("以下") && mentions_correct {
        return QuestionType::Multiple;
    }
    if asks_true_false {
        return QuestionType::Judge;
    }
    QuestionType::Judge
}

/// 单行的分类结果
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    TypeMarker(QuestionType),
    QuestionStart,
    Option,
    Answer(&'a str),
    Explanation(&'a str),
    Other,
}

fn type_marker(line: &str) -> Option<QuestionType> {
    QuestionType::ALL.into_iter().find(|question_type| {
        question_type
            .marker_tokens()
            .iter()
            .any(|token| line.contains(token))
    })
}

fn is_question_start(line: &str) -> bool {
    QUESTION_START.is_match(line) && !ANSWER_PREFIXES.iter().any(|p| line.contains(p))
}

fn strip_answer_prefix(line: &str) -> Option<&str> {
    ANSWER_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(str::trim)
}

/// 题目解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionParser {
    fallback: FallbackPolicy,
}

impl QuestionParser {
    /// 创建新的解析器
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// 将段落序列解析为题目列表
    pub fn parse<I, S>(&self, lines: I) -> Vec<Question>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParseState::new(self.fallback);
        for line in lines {
            let text = line.as_ref().trim();
            if text.is_empty() {
                continue;
            }
            state.consume(text);
        }
        state.finish()
    }
}

/// 使用指定推断策略解析段落
pub fn parse_document<I, S>(paragraphs: I, fallback: FallbackPolicy) -> Vec<Question>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    QuestionParser::new(fallback).parse(paragraphs)
}

/// 扫描过程中的状态
struct ParseState {
    fallback: FallbackPolicy,
    questions: Vec<Question>,
    current: Option<Question>,
    type_marker: Option<QuestionType>,
    options_open: bool,
}

impl ParseState {
    fn new(fallback: FallbackPolicy) -> Self {
        Self {
            fallback,
            questions: Vec::new(),
            current: None,
            type_marker: None,
            options_open: false,
        }
    }

    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(question_type) = type_marker(line) {
            return LineKind::TypeMarker(question_type);
        }
        if is_question_start(line) {
            return LineKind::QuestionStart;
        }
        if self.options_open && self.current.is_some() && OPTION_PREFIX.is_match(line) {
            return LineKind::Option;
        }
        if let Some(answer) = strip_answer_prefix(line) {
            return LineKind::Answer(answer);
        }
        if let Some(explanation) = line.strip_prefix(EXPLANATION_PREFIX) {
            return LineKind::Explanation(explanation.trim());
        }
        LineKind::Other
    }

    fn consume(&mut self, line: &str) {
        match self.classify(line) {
            LineKind::TypeMarker(question_type) => {
                debug!("题型标记: {}", question_type);
                self.type_marker = Some(question_type);
            }
            LineKind::QuestionStart => self.start_question(line),
            LineKind::Option => {
                if let Some(question) = self.current.as_mut() {
                    question.options.push(line.to_string());
                }
            }
            LineKind::Answer(answer) => self.apply_answer(answer),
            LineKind::Explanation(explanation) => {
                if let Some(question) = self.current.as_mut() {
                    question.explanation = explanation.to_string();
                }
            }
            LineKind::Other => {}
        }
    }

    fn start_question(&mut self, line: &str) {
        if let Some(question) = self.current.take() {
            self.questions.push(question);
        }

        let question_type = self
            .type_marker
            .unwrap_or_else(|| self.fallback.infer(line));
        let id = (self.questions.len() + 1) as u32;

        self.options_open = question_type != QuestionType::Judge;
        self.current = Some(Question::new(id, question_type, line));
    }

    fn apply_answer(&mut self, answer: &str) {
        let Some(question) = self.current.as_mut() else {
            return;
        };

        question.answer = match question.question_type {
            QuestionType::Judge => normalize_judge_answer(answer),
            _ => answer.to_string(),
        };
        question.score = question.question_type.full_score();
        self.options_open = false;
    }

    fn finish(mut self) -> Vec<Question> {
        if let Some(question) = self.current.take() {
            self.questions.push(question);
        }
        self.questions
    }
}
