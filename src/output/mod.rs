//! Output Format Module
//!
//! Strategy Patternによる表形式出力の抽象化を提供するモジュール。
//! どの形式でも、ヘッダー行の後に1問1行をレコード順に出力する。
//! 列の並べ替え・絞り込み・装飾は行わない。

mod formatters;

use crate::api::{OutputFormat, TypeLabels};
use crate::error::QuizSheetError;
use crate::types::QuestionRecord;
use std::io::Write;

pub(crate) use formatters::*;

/// 出力時のシート設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetLayout {
    /// ワークシート名（XLSXのみ使用）
    pub sheet_name: String,

    /// `Question Type`列の表記方式
    pub type_labels: TypeLabels,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Quiz".to_string(),
            type_labels: TypeLabels::Canonical,
        }
    }
}

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（XLSX, CSV, JSON, Markdown）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Xlsx,
    Csv,
    Json,
    Markdown,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => OutputFormatter::Xlsx,
            OutputFormat::Csv => OutputFormatter::Csv,
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Markdown => OutputFormatter::Markdown,
        }
    }

    /// レコードを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `records` - 出力するレコード（この順序で行になる）
    /// * `writer` - 出力先のライター
    /// * `layout` - シート名・種類ラベルの設定
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        writer: &mut W,
        layout: &SheetLayout,
    ) -> Result<(), QuizSheetError> {
        match self {
            OutputFormatter::Xlsx => XlsxFormatter.render(records, writer, layout),
            OutputFormatter::Csv => CsvFormatter.render(records, writer, layout),
            OutputFormatter::Json => JsonFormatter.render(records, writer, layout),
            OutputFormatter::Markdown => MarkdownFormatter.render(records, writer, layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuestionType;

    fn records() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord {
                stem: "Вопрос, с запятой".to_string(),
                question_type: QuestionType::MultipleChoice,
                options: ["X", "Y", "", "", ""].map(String::from),
                answer_key: "2".to_string(),
            },
            QuestionRecord {
                stem: "Эссе".to_string(),
                question_type: QuestionType::OpenEnded,
                options: Default::default(),
                answer_key: String::new(),
            },
        ]
    }

    fn render_to_string(format: OutputFormat, layout: &SheetLayout) -> String {
        let mut out = Vec::new();
        OutputFormatter::from_format(format)
            .render(&records(), &mut out, layout)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let csv = render_to_string(OutputFormat::Csv, &SheetLayout::default());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Question Text,Question Type,Option 1,Option 2,Option 3,Option 4,Option 5,Correct Answer"
        );
        assert_eq!(lines[1], "\"Вопрос, с запятой\",MultipleChoice,X,Y,,,,2");
        assert_eq!(lines[2], "Эссе,OpenEnded,,,,,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_output_keeps_column_order() {
        let json = render_to_string(OutputFormat::Json, &SheetLayout::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Question Text"], "Вопрос, с запятой");
        assert_eq!(rows[0]["Option 2"], "Y");
        assert_eq!(rows[1]["Question Type"], "OpenEnded");

        let text_pos = json.find("Question Text").unwrap();
        let answer_pos = json.find("Correct Answer").unwrap();
        assert!(text_pos < answer_pos);
    }

    #[test]
    fn test_json_output_empty() {
        let mut out = Vec::new();
        OutputFormatter::Json
            .render(&[], &mut out, &SheetLayout::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn test_markdown_output() {
        let layout = SheetLayout {
            type_labels: TypeLabels::Quizizz,
            ..SheetLayout::default()
        };
        let md = render_to_string(OutputFormat::Markdown, &layout);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Question Text"));
        assert!(lines[1].starts_with("|---"));
        assert!(lines[2].contains("Multiple Choice"));
        assert!(lines[3].contains("Open-Ended"));
    }

    #[test]
    fn test_xlsx_output_is_zip() {
        let mut out = Vec::new();
        OutputFormatter::Xlsx
            .render(&records(), &mut out, &SheetLayout::default())
            .unwrap();
        // XLSXはZIPアーカイブ
        assert!(out.starts_with(b"PK"));
    }
}
