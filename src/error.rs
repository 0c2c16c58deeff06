//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! パーサー本体（`QuizParser::parse`）はエラーを返さない。
//! このエラー型は入出力・設定・セッション管理など周辺レイヤーでのみ使用される。

use thiserror::Error;

/// quizsheetクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Utf8`: 入力テキストがUTF-8として不正
/// - `Xlsx`: XLSX出力の生成に失敗したエラー（rust_xlsxwriter由来）
/// - `Json`: JSON出力のシリアライズに失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `EmptyInput`: 入力が空（空白のみを含む）
/// - `NoQuestions`: 空でない入力から1件も問題を認識できなかった
/// - `InputTooLarge`: 入力サイズ制限に違反した
/// - `SessionNotStarted`: 収集を開始していないセッションへの追記
///
/// # 使用例
///
/// ```rust
/// use quizsheet::{ConverterBuilder, QuizSheetError};
///
/// let converter = ConverterBuilder::new().build().unwrap();
///
/// match converter.convert_str("   ") {
///     Err(QuizSheetError::EmptyInput) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum QuizSheetError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8文字列の変換エラー
    ///
    /// 入力バイト列をテキストとして解釈できなかった場合に発生します。
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// XLSXワークブックの生成エラー
    #[error("Failed to write XLSX workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSONシリアライズのエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、シート名が空、31文字を超える、
    /// Excelで使用できない文字を含む場合などです。
    ///
    /// # 例
    ///
    /// ```rust
    /// use quizsheet::{ConverterBuilder, QuizSheetError};
    ///
    /// let result = ConverterBuilder::new().with_sheet_name("a/b").build();
    ///
    /// match result {
    ///     Err(QuizSheetError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => panic!("Expected Config error"),
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力が空、または空白文字のみで構成されている
    #[error("Input is empty")]
    EmptyInput,

    /// 空でない入力から問題を1件も認識できなかった
    ///
    /// `EmptyInput`とは区別されます。呼び出し側はこの場合に
    /// 入力形式のガイダンスを表示することが想定されています。
    #[error("No questions could be recognized in the input")]
    NoQuestions,

    /// 入力サイズの上限を超えた
    #[error("Input size exceeds maximum: {size} bytes (max: {max} bytes)")]
    InputTooLarge {
        /// 実際のサイズ（バイト）
        size: usize,
        /// 許容される最大サイズ（バイト）
        max: usize,
    },

    /// 収集を開始していないセッションにテキストが追記された
    #[error("Session has not been started")]
    SessionNotStarted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: QuizSheetError = io_err.into();

        match error {
            QuizSheetError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let error: QuizSheetError = bad.into();
        assert!(matches!(error, QuizSheetError::Utf8(_)));
        assert!(error.to_string().starts_with("UTF-8 conversion error"));
    }

    #[test]
    fn test_config_error_display() {
        let error = QuizSheetError::Config("Sheet name must not be empty".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("Sheet name must not be empty"));
    }

    #[test]
    fn test_input_too_large_display() {
        let error = QuizSheetError::InputTooLarge { size: 20, max: 10 };
        assert_eq!(
            error.to_string(),
            "Input size exceeds maximum: 20 bytes (max: 10 bytes)"
        );
    }

    // 空入力と認識失敗は別のメッセージになること
    #[test]
    fn test_empty_and_no_questions_are_distinct() {
        let empty = QuizSheetError::EmptyInput.to_string();
        let none = QuizSheetError::NoQuestions.to_string();
        assert_ne!(empty, none);
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), QuizSheetError> {
            let _file = std::fs::File::open("nonexistent_quiz_file.txt")?;
            Ok(())
        }

        match io_operation() {
            Err(QuizSheetError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }
}
