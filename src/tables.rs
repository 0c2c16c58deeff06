//! Lookup Tables Module
//!
//! 解答ラベル、選択肢マーカー、文字→番号の対応表など、
//! パーサーが参照する固定の表をまとめたモジュール。

use regex::Regex;
use std::sync::LazyLock;

/// 1問あたりの選択肢スロット数
pub const OPTION_SLOTS: usize = 5;

/// 出力表の列数（問題文・種類・選択肢5つ・正解）
pub const COLUMN_COUNT: usize = OPTION_SLOTS + 3;

/// 出力表のヘッダー（列順はレコードのフィールド順と一致）
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Question Text",
    "Question Type",
    "Option 1",
    "Option 2",
    "Option 3",
    "Option 4",
    "Option 5",
    "Correct Answer",
];

/// 解答行のラベル（小文字）
///
/// 長いラベルを先に置く。`правильный ответ`が`ответ`より先に評価される必要がある。
pub(crate) static ANSWER_LABELS: [&str; 3] = ["правильный ответ", "ответ", "answer"];

/// 選択肢マーカー文字と1始まりの番号の対応表
///
/// キリル文字とラテン文字の並びは同じ位置を指す（а/a → 1, б/b → 2, ...）。
pub(crate) static LETTER_INDEX: [(char, u32); 10] = [
    ('а', 1),
    ('б', 2),
    ('в', 3),
    ('г', 4),
    ('д', 5),
    ('a', 1),
    ('b', 2),
    ('c', 3),
    ('d', 4),
    ('e', 5),
];

static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let labels = ANSWER_LABELS
        .iter()
        .map(|label| label.split_whitespace().collect::<Vec<_>>().join(r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{})(?:\s*[:\-]|\s|$)", labels)).expect("valid regex")
});

static OPTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    let letters: String = LETTER_INDEX.iter().map(|(c, _)| *c).collect();
    Regex::new(&format!(r"(?i)^[{}]\)\s*", letters)).expect("valid regex")
});

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]").expect("valid regex"));

static ANSWER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("valid regex"));

/// 1文字のトークンを選択肢番号に変換する
///
/// 大文字小文字は区別しない。表にない文字や2文字以上のトークンは`None`。
pub fn letter_index(token: &str) -> Option<u32> {
    let mut chars = token.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    c.to_lowercase().find_map(|lower| {
        LETTER_INDEX
            .iter()
            .find(|(letter, _)| *letter == lower)
            .map(|(_, index)| *index)
    })
}

/// 解答行であれば解答部分（`correct_raw`）を返す
///
/// 行内に`:`があれば最初の`:`以降、なければラベル（と区切りの`-`）以降を返す。
/// 入力は前後の空白を除去済みの行であること。
pub(crate) fn match_answer_line(line: &str) -> Option<&str> {
    let m = ANSWER_LINE.find(line)?;
    let rest = match line.find(':') {
        Some(pos) => &line[pos + 1..],
        None => &line[m.end()..],
    };
    Some(rest.trim())
}

/// 選択肢マーカー（`а)`, `B)` など）で始まる行であれば、マーカー以降の本文を返す
pub(crate) fn strip_option_marker(line: &str) -> Option<&str> {
    OPTION_MARKER.find(line).map(|m| &line[m.end()..])
}

/// 行頭が番号（`1.`, `12)`）かどうか
pub(crate) fn has_ordinal_prefix(line: &str) -> bool {
    ORDINAL_PREFIX.is_match(line)
}

/// 解答文字列をカンマ・空白で分割する（空トークンは除外）
pub(crate) fn split_answer(raw: &str) -> impl Iterator<Item = &str> {
    ANSWER_SEPARATOR.split(raw).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index_cyrillic_and_latin() {
        assert_eq!(letter_index("а"), Some(1));
        assert_eq!(letter_index("б"), Some(2));
        assert_eq!(letter_index("в"), Some(3));
        assert_eq!(letter_index("г"), Some(4));
        assert_eq!(letter_index("д"), Some(5));
        assert_eq!(letter_index("a"), Some(1));
        assert_eq!(letter_index("b"), Some(2));
        assert_eq!(letter_index("c"), Some(3));
        assert_eq!(letter_index("d"), Some(4));
        assert_eq!(letter_index("e"), Some(5));
    }

    #[test]
    fn test_letter_index_case_insensitive() {
        assert_eq!(letter_index("В"), Some(3));
        assert_eq!(letter_index("D"), Some(4));
    }

    #[test]
    fn test_letter_index_rejects_unknown() {
        assert_eq!(letter_index(""), None);
        assert_eq!(letter_index("f"), None);
        assert_eq!(letter_index("е"), None); // キリル文字のе
        assert_eq!(letter_index("ab"), None);
        assert_eq!(letter_index("1"), None);
    }

    #[test]
    fn test_match_answer_line_labels() {
        assert_eq!(match_answer_line("Ответ: в"), Some("в"));
        assert_eq!(match_answer_line("ответ:в"), Some("в"));
        assert_eq!(match_answer_line("Правильный ответ: а, б"), Some("а, б"));
        assert_eq!(match_answer_line("ПРАВИЛЬНЫЙ   ОТВЕТ: г"), Some("г"));
        assert_eq!(match_answer_line("Answer: b"), Some("b"));
        assert_eq!(match_answer_line("ANSWER - c"), Some("c"));
        assert_eq!(match_answer_line("Ответ в"), Some("в"));
        assert_eq!(match_answer_line("Ответ"), Some(""));
    }

    #[test]
    fn test_match_answer_line_uses_first_colon() {
        assert_eq!(match_answer_line("Ответ: 10:30"), Some("10:30"));
        assert_eq!(match_answer_line("Answer - a: b"), Some("b"));
    }

    #[test]
    fn test_match_answer_line_rejects_other_words() {
        assert_eq!(match_answer_line("Ответы разные"), None);
        assert_eq!(match_answer_line("Answering machine"), None);
        assert_eq!(match_answer_line("Мой ответ: а"), None);
    }

    #[test]
    fn test_strip_option_marker() {
        assert_eq!(strip_option_marker("а) Чехов"), Some("Чехов"));
        assert_eq!(strip_option_marker("Б)Пушкин"), Some("Пушкин"));
        assert_eq!(strip_option_marker("e) five"), Some("five"));
        assert_eq!(strip_option_marker("д)"), Some(""));
        assert_eq!(strip_option_marker("f) six"), None);
        assert_eq!(strip_option_marker("а. Чехов"), None);
        assert_eq!(strip_option_marker("ab) Чехов"), None);
        assert_eq!(strip_option_marker("Чехов а) Толстой"), None);
    }

    #[test]
    fn test_has_ordinal_prefix() {
        assert!(has_ordinal_prefix("1. Вопрос"));
        assert!(has_ordinal_prefix("12) Вопрос"));
        assert!(!has_ordinal_prefix("а) Чехов"));
        assert!(!has_ordinal_prefix("Вопрос 1."));
        assert!(!has_ordinal_prefix("1 Вопрос"));
    }

    #[test]
    fn test_split_answer() {
        let tokens: Vec<&str> = split_answer(" а, б  в,,г ").collect();
        assert_eq!(tokens, vec!["а", "б", "в", "г"]);
        assert_eq!(split_answer("").count(), 0);
    }

    #[test]
    fn test_header_shape() {
        assert_eq!(HEADER.len(), COLUMN_COUNT);
        assert_eq!(HEADER[0], "Question Text");
        assert_eq!(HEADER[7], "Correct Answer");
    }
}
