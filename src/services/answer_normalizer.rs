//! 答案标准化
//!
//! 判断题答案在解析和计分两个阶段使用同一组词表，但对无法识别的文本处理不同：
//! - 解析阶段：既不是肯定词也不是否定词时保留原文
//! - 计分阶段：不是肯定词一律视为 `错误`

use phf::phf_set;

/// 判断题标准答案：正确
pub const JUDGE_TRUE: &str = "正确";
/// 判断题标准答案：错误
pub const JUDGE_FALSE: &str = "错误";

/// 肯定词（已转为小写）
static POSITIVE_TOKENS: phf::Set<&'static str> = phf_set! {
    "正确", "正確", "true", "t", "对", "對",
};

/// 否定词（已转为小写）
static NEGATIVE_TOKENS: phf::Set<&'static str> = phf_set! {
    "错误", "錯誤", "false", "f", "错", "錯",
};

fn normalized_key(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn is_positive(text: &str) -> bool {
    POSITIVE_TOKENS.contains(normalized_key(text).as_str())
}

pub fn is_negative(text: &str) -> bool {
    NEGATIVE_TOKENS.contains(normalized_key(text).as_str())
}

/// 解析阶段的判断题答案标准化
///
/// 无法识别的答案原样保留。
pub fn normalize_judge_answer(text: &str) -> String {
    if is_positive(text) {
        JUDGE_TRUE.to_string()
    } else if is_negative(text) {
        JUDGE_FALSE.to_string()
    } else {
        text.to_string()
    }
}

/// 计分阶段的判断题答案标准化，结果只可能是 `正确` 或 `错误`
pub fn normalize_judge_strict(text: &str) -> &'static str {
    if is_positive(text) {
        JUDGE_TRUE
    } else {
        JUDGE_FALSE
    }
}

/// 多选题答案规范化：按字符排序，忽略选项顺序
pub fn canonicalize_multiple(text: &str) -> String {
    let mut letters: Vec<char> = text.chars().collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_tokens_case_insensitive() {
        for token in ["正确", "正確", "true", "TRUE", "True", "t", "T", "对", "對"] {
            assert_eq!(normalize_judge_answer(token), "正确", "token: {}", token);
            assert_eq!(normalize_judge_strict(token), "正确", "token: {}", token);
        }
    }

    #[test]
    fn test_negative_tokens() {
        for token in ["错误", "錯誤", "false", "FALSE", "f", "F", "错", "錯"] {
            assert_eq!(normalize_judge_answer(token), "错误", "token: {}", token);
            assert_eq!(normalize_judge_strict(token), "错误", "token: {}", token);
        }
    }

    #[test]
    fn test_parse_time_keeps_unrecognised_text() {
        // 已知的不一致：解析阶段保留原文，计分阶段视为错误
        assert_eq!(normalize_judge_answer("不确定"), "不确定");
        assert_eq!(normalize_judge_strict("不确定"), "错误");
        assert_eq!(normalize_judge_answer(""), "");
    }

    #[test]
    fn test_strict_is_two_valued() {
        for input in ["", " ", "yes", "no", "A", "正确的", "1", "0", "对 ", "\t真"] {
            let result = normalize_judge_strict(input);
            assert!(result == JUDGE_TRUE || result == JUDGE_FALSE, "input: {:?}", input);
        }
    }

    #[test]
    fn test_canonicalize_multiple_sorts_letters() {
        assert_eq!(canonicalize_multiple("DB"), "BD");
        assert_eq!(canonicalize_multiple("CAB"), "ABC");
        assert_eq!(canonicalize_multiple(""), "");
    }
}
