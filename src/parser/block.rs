//! Block Classification
//!
//! 1つのブロックを行単位で分類し、正規化された`QuestionRecord`を組み立てる。

use crate::api::{DropPolicy, QuestionType};
use crate::tables::{
    letter_index, match_answer_line, split_answer, strip_option_marker, OPTION_SLOTS,
};
use crate::types::{LineKind, QuestionRecord, RawBlock};
use tracing::{debug, trace};

/// 問題文以外の1行を分類する
///
/// 優先順位は 解答行 → マーカー付き選択肢 → マーカーなし選択肢。
/// 空行は`None`。
pub(crate) fn classify_line(line: &str) -> Option<LineKind<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(raw) = match_answer_line(trimmed) {
        return Some(LineKind::Answer(raw));
    }

    if let Some(text) = strip_option_marker(trimmed) {
        return Some(LineKind::Option(text));
    }

    Some(LineKind::Option(trimmed))
}

/// 解答文字列が複数の解答を含むかどうか
///
/// カンマを含む、または空白区切りで2トークン以上ある場合に複数とみなす。
pub(crate) fn is_multi_token(raw: &str) -> bool {
    raw.contains(',') || split_answer(raw).nth(1).is_some()
}

/// 解答文字列を選択肢番号のカンマ区切り文字列に正規化する
///
/// 文字トークンは対応表で番号に変換し、数字トークンはそのまま使う。
/// どちらでもないトークンは捨てる（他のトークンの位置には影響しない）。
pub(crate) fn normalize_answer(raw: &str) -> String {
    split_answer(raw)
        .filter_map(|token| {
            let lower = token.to_lowercase();
            match letter_index(&lower) {
                Some(index) => Some(index.to_string()),
                None => numeric_token(token).map(str::to_string),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// ASCII数字のみのトークンを正の整数の10進表記にする
///
/// 先頭の0は取り除く。桁数に上限はない。値が0のトークンは`None`。
fn numeric_token(token: &str) -> Option<&str> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = token.trim_start_matches('0');
    (!digits.is_empty()).then_some(digits)
}

/// ブロックから1問分のレコードを組み立てる
///
/// 出力しないブロック（問題文・選択肢・解答がすべてない、
/// または`DropPolicy::DropBare`で選択肢も解答もない）は`None`。
pub(crate) fn build_record(block: &RawBlock<'_>, drop_policy: DropPolicy) -> Option<QuestionRecord> {
    let mut lines = block
        .lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty());

    let Some(stem) = lines.next() else {
        debug!(line = block.line_no, "dropping block without content");
        return None;
    };

    let mut options: Vec<&str> = Vec::new();
    let mut correct_raw = "";

    for line in lines {
        match classify_line(line) {
            // 解答行が複数ある場合は最後のものを採用
            Some(LineKind::Answer(raw)) => correct_raw = raw,
            Some(LineKind::Option(text)) => options.push(text),
            None => {}
        }
    }

    let has_options = !options.is_empty();
    let has_answer = !correct_raw.is_empty();

    if !has_options && !has_answer && drop_policy == DropPolicy::DropBare {
        debug!(line = block.line_no, stem, "dropping block without options or answer");
        return None;
    }

    if options.len() > OPTION_SLOTS {
        debug!(
            line = block.line_no,
            count = options.len(),
            "discarding options beyond slot {}",
            OPTION_SLOTS
        );
    }

    let question_type = QuestionType::infer(has_options, has_answer, is_multi_token(correct_raw));

    let mut slots: [String; OPTION_SLOTS] = Default::default();
    for (slot, text) in slots.iter_mut().zip(&options) {
        *slot = (*text).to_string();
    }

    let record = QuestionRecord {
        stem: stem.to_string(),
        question_type,
        options: slots,
        answer_key: normalize_answer(correct_raw),
    };

    trace!(line = block.line_no, question_type = %record.question_type, "parsed question");

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&'static str]) -> RawBlock<'static> {
        RawBlock {
            line_no: 1,
            lines: lines.to_vec(),
        }
    }

    #[test]
    fn test_classify_line_priority() {
        assert_eq!(classify_line("Ответ: а"), Some(LineKind::Answer("а")));
        assert_eq!(classify_line("а) Ответ: нет"), Some(LineKind::Option("Ответ: нет")));
        assert_eq!(classify_line("  б)  Пушкин "), Some(LineKind::Option("Пушкин")));
        assert_eq!(classify_line("Пушкин"), Some(LineKind::Option("Пушкин")));
        assert_eq!(classify_line("   "), None);
    }

    #[test]
    fn test_is_multi_token() {
        assert!(is_multi_token("а,б"));
        assert!(is_multi_token("а б"));
        assert!(is_multi_token("а,"));
        assert!(!is_multi_token("а"));
        assert!(!is_multi_token("текст"));
        assert!(!is_multi_token(""));
    }

    #[test]
    fn test_normalize_answer_letters_and_digits() {
        assert_eq!(normalize_answer("в"), "3");
        assert_eq!(normalize_answer("А, Б"), "1,2");
        assert_eq!(normalize_answer("a c e"), "1,3,5");
        assert_eq!(normalize_answer("2, 4"), "2,4");
        assert_eq!(normalize_answer("б,7"), "2,7");
        assert_eq!(normalize_answer("007"), "7");
    }

    #[test]
    fn test_normalize_answer_keeps_large_numbers() {
        assert_eq!(normalize_answer("99999999999"), "99999999999");
        assert_eq!(
            normalize_answer("а 123456789012345678901234567890"),
            "1,123456789012345678901234567890"
        );
    }

    #[test]
    fn test_normalize_answer_discards_unknown_tokens() {
        assert_eq!(normalize_answer("текст"), "");
        assert_eq!(normalize_answer("а, x, в"), "1,3");
        assert_eq!(normalize_answer("0, +2, -1, 1.5, 000"), "");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn test_build_record_multiple_choice() {
        let record = build_record(
            &block(&["Вопрос?", "а) X", "б) Y", "Ответ: б"]),
            DropPolicy::KeepOpenEnded,
        )
        .unwrap();
        assert_eq!(record.stem, "Вопрос?");
        assert_eq!(record.question_type, QuestionType::MultipleChoice);
        assert_eq!(record.options, ["X", "Y", "", "", ""].map(String::from));
        assert_eq!(record.answer_key, "2");
    }

    #[test]
    fn test_build_record_last_answer_wins() {
        let record = build_record(
            &block(&["Q", "а) X", "Ответ: а", "б) Y", "Ответ: б"]),
            DropPolicy::KeepOpenEnded,
        )
        .unwrap();
        assert_eq!(record.answer_key, "2");
        assert_eq!(record.option_count(), 2);
    }

    #[test]
    fn test_build_record_truncates_options() {
        let record = build_record(
            &block(&["Q", "1", "2", "3", "4", "5", "6", "7", "8"]),
            DropPolicy::KeepOpenEnded,
        )
        .unwrap();
        assert_eq!(record.options, ["1", "2", "3", "4", "5"].map(String::from));
        assert_eq!(record.question_type, QuestionType::Poll);
    }

    #[test]
    fn test_build_record_drop_policy() {
        let bare = block(&["Просто вопрос"]);
        let kept = build_record(&bare, DropPolicy::KeepOpenEnded).unwrap();
        assert_eq!(kept.question_type, QuestionType::OpenEnded);
        assert!(build_record(&bare, DropPolicy::DropBare).is_none());

        // 解答がある場合はDropBareでも出力される
        let fill = block(&["Столица Франции", "Ответ: Париж"]);
        let record = build_record(&fill, DropPolicy::DropBare).unwrap();
        assert_eq!(record.question_type, QuestionType::FillInTheBlank);
    }

    #[test]
    fn test_build_record_empty_block() {
        assert!(build_record(&block(&["  ", ""]), DropPolicy::KeepOpenEnded).is_none());
    }
}
