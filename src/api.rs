//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::Serialize;
use std::fmt;

/// 問題の種類
///
/// 利用者が指定するものではなく、選択肢と解答行の有無から常に導出されます。
/// 導出規則は`QuestionType::infer`を参照してください。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuestionType {
    /// 選択肢あり・正解なし（アンケート）
    Poll,

    /// 選択肢あり・正解が1つ
    MultipleChoice,

    /// 選択肢あり・正解が複数
    Checkbox,

    /// 選択肢なし・正解あり（穴埋め）
    FillInTheBlank,

    /// 選択肢なし・正解なし（自由記述）
    OpenEnded,
}

impl QuestionType {
    /// 分類結果から問題の種類を決定する
    ///
    /// | 選択肢 | 解答 | 複数トークン | 種類 |
    /// |---|---|---|---|
    /// | なし | なし | — | `OpenEnded` |
    /// | なし | あり | — | `FillInTheBlank` |
    /// | あり | あり | はい | `Checkbox` |
    /// | あり | あり | いいえ | `MultipleChoice` |
    /// | あり | なし | — | `Poll` |
    pub fn infer(has_options: bool, has_answer: bool, multi_token: bool) -> Self {
        match (has_options, has_answer, multi_token) {
            (false, false, _) => QuestionType::OpenEnded,
            (false, true, _) => QuestionType::FillInTheBlank,
            (true, true, true) => QuestionType::Checkbox,
            (true, true, false) => QuestionType::MultipleChoice,
            (true, false, _) => QuestionType::Poll,
        }
    }

    /// 列挙子名そのままのラベル（例: `MultipleChoice`）
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Poll => "Poll",
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::Checkbox => "Checkbox",
            QuestionType::FillInTheBlank => "FillInTheBlank",
            QuestionType::OpenEnded => "OpenEnded",
        }
    }

    /// 指定されたラベル方式でのセル表記
    pub fn label(&self, labels: TypeLabels) -> &'static str {
        match labels {
            TypeLabels::Canonical => self.as_str(),
            TypeLabels::Quizizz => match self {
                QuestionType::Poll => "Poll",
                QuestionType::MultipleChoice => "Multiple Choice",
                QuestionType::Checkbox => "Checkbox",
                QuestionType::FillInTheBlank => "Fill-in-the-Blank",
                QuestionType::OpenEnded => "Open-Ended",
            },
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 問題ブロックの区切り方式
///
/// 2つの方式は番号付きの複数行の問題文を空行で区切った入力で結果が異なるため、
/// パーサーごとにどちらか一方のみが有効になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Segmentation {
    /// 1行以上の空行（空白のみの行を含む）で区切る（デフォルト）
    ///
    /// ```text
    /// 1. 問題A
    /// а) ...
    ///
    /// 2. 問題B
    /// ```
    #[default]
    BlankLine,

    /// 行頭の番号（`1.` や `2)`）で新しいブロックを開始する
    ///
    /// 最初の番号行より前のテキストは独立したブロックになります。
    /// ブロック内の空行は無視されます。
    Ordinal,
}

/// 選択肢も解答もないブロックの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DropPolicy {
    /// `OpenEnded`として出力する（デフォルト）
    #[default]
    KeepOpenEnded,

    /// 出力しない
    DropBare,
}

/// `Question Type`列の表記方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TypeLabels {
    /// 列挙子名（`MultipleChoice`, `FillInTheBlank`, ...）
    #[default]
    Canonical,

    /// Quizizzのインポート表記（`Multiple Choice`, `Fill-in-the-Blank`, ...）
    Quizizz,
}

/// 出力フォーマット
///
/// 問題レコードを表形式で出力する際の形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// XLSXワークブック（デフォルト）
    ///
    /// 1シートのみ。ヘッダー行の後に1問1行で出力します。
    #[default]
    Xlsx,

    /// CSV形式
    ///
    /// ```csv
    /// Question Text,Question Type,Option 1,...
    /// Вопрос?,MultipleChoice,X,...
    /// ```
    Csv,

    /// JSON形式（ヘッダー名をキーとするオブジェクトの配列）
    Json,

    /// Markdownテーブル（チャットでのプレビュー用）
    Markdown,
}

impl OutputFormat {
    /// 出力ファイルの拡張子
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    /// 出力のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Markdown => "text/markdown",
        }
    }

    /// 送信用のファイル名（例: `quiz.xlsx`）
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.file_extension())
    }
}
