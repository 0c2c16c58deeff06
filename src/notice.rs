//! Client Notices
//!
//! チャットの利用者に表示する定型メッセージ。

use crate::error::QuizSheetError;
use crate::session::FinishOutcome;

/// 入力形式の例
pub const FORMAT_EXAMPLE: &str = "1. Кто написал «Войну и мир»?\n\
а) Чехов\n\
б) Пушкин\n\
в) Толстой\n\
г) Достоевский\n\
Ответ: в";

/// 利用者向けの定型メッセージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// 開始時の案内（入力例付き）
    Greeting,

    /// 空のバッファで終了が要求された
    EmptyBuffer,

    /// 問題を認識できなかった（入力例付き）
    ParseFailure,

    /// ファイルの準備ができた
    Ready,
}

impl Notice {
    /// 表示するテキスト
    pub fn text(&self) -> String {
        match self {
            Notice::Greeting => format!(
                "Привет! 👋 Отправь текст с вопросами, например:\n\n{}\n\n\
                 Я пришлю тебе Excel-файл для Quizizz 📄",
                FORMAT_EXAMPLE
            ),
            Notice::EmptyBuffer => {
                "⚠️ Ты ещё не отправил ни одного вопроса. Пришли текст теста и попробуй снова."
                    .to_string()
            }
            Notice::ParseFailure => format!(
                "❌ Не удалось распознать тест.\n\n\
                 Пожалуйста, используй формат, как в примере:\n\n{}",
                FORMAT_EXAMPLE
            ),
            Notice::Ready => "✅ Ваш тест готов!".to_string(),
        }
    }

    /// `finish`の結果に対応するメッセージ
    pub fn for_outcome(outcome: &FinishOutcome) -> Self {
        match outcome {
            FinishOutcome::Empty => Notice::EmptyBuffer,
            FinishOutcome::Unrecognized => Notice::ParseFailure,
            FinishOutcome::Parsed(_) => Notice::Ready,
        }
    }

    /// 変換エラーに対応するメッセージ（利用者向けの表示がないエラーは`None`）
    pub fn for_error(error: &QuizSheetError) -> Option<Self> {
        match error {
            QuizSheetError::EmptyInput => Some(Notice::EmptyBuffer),
            QuizSheetError::NoQuestions => Some(Notice::ParseFailure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::QuizParser;

    #[test]
    fn test_format_example_parses_as_advertised() {
        let records = QuizParser::new().parse(FORMAT_EXAMPLE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer_key, "3");
    }

    #[test]
    fn test_guidance_contains_example() {
        assert!(Notice::Greeting.text().contains(FORMAT_EXAMPLE));
        assert!(Notice::ParseFailure.text().contains(FORMAT_EXAMPLE));
        assert!(!Notice::EmptyBuffer.text().contains(FORMAT_EXAMPLE));
    }

    #[test]
    fn test_for_outcome() {
        assert_eq!(Notice::for_outcome(&FinishOutcome::Empty), Notice::EmptyBuffer);
        assert_eq!(
            Notice::for_outcome(&FinishOutcome::Unrecognized),
            Notice::ParseFailure
        );
        assert_eq!(
            Notice::for_outcome(&FinishOutcome::Parsed(Vec::new())),
            Notice::Ready
        );
    }

    #[test]
    fn test_for_error() {
        assert_eq!(
            Notice::for_error(&QuizSheetError::EmptyInput),
            Some(Notice::EmptyBuffer)
        );
        assert_eq!(
            Notice::for_error(&QuizSheetError::NoQuestions),
            Some(Notice::ParseFailure)
        );
        assert_eq!(
            Notice::for_error(&QuizSheetError::Config("x".to_string())),
            None
        );
    }
}
