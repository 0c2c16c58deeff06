//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use super::SheetLayout;
use crate::error::QuizSheetError;
use crate::tables::{COLUMN_COUNT, HEADER};
use crate::types::QuestionRecord;
use rust_xlsxwriter::Workbook;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// XLSX形式のフォーマッター
///
/// 1枚のワークシートにヘッダー行とレコード行を書き込み、
/// ワークブック全体をメモリ上で生成してから出力します。
pub struct XlsxFormatter;

impl XlsxFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        writer: &mut W,
        layout: &SheetLayout,
    ) -> Result<(), QuizSheetError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout.sheet_name.as_str())?;

        for (col, title) in HEADER.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, value) in record.to_row(layout.type_labels).iter().enumerate() {
                // 空のセルは書き込まない（空白セルのまま）
                if value.is_empty() {
                    continue;
                }
                worksheet.write_string(row, col as u16, value.as_str())?;
            }
        }

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        writer.flush()?;

        Ok(())
    }
}

/// CSV形式のフォーマッター
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        writer: &mut W,
        layout: &SheetLayout,
    ) -> Result<(), QuizSheetError> {
        write_csv_line(writer, HEADER.iter().copied())?;

        for record in records {
            let row = record.to_row(layout.type_labels);
            write_csv_line(writer, row.iter().map(String::as_str))?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn write_csv_line<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> Result<(), QuizSheetError> {
    let mut first = true;
    for field in fields {
        if !first {
            write!(writer, ",")?;
        }
        first = false;
        write!(writer, "{}", escape_csv(field))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// JSON形式のフォーマッター
///
/// ヘッダー名をキーとするオブジェクトの配列を出力します。
/// キーの順序は列順と同じです。
pub struct JsonFormatter;

/// ヘッダー順を保ったまま1行をJSONオブジェクトとしてシリアライズする
struct JsonRow([String; COLUMN_COUNT]);

impl Serialize for JsonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COLUMN_COUNT))?;
        for (key, value) in HEADER.iter().zip(self.0.iter()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        writer: &mut W,
        layout: &SheetLayout,
    ) -> Result<(), QuizSheetError> {
        let rows: Vec<JsonRow> = records
            .iter()
            .map(|record| JsonRow(record.to_row(layout.type_labels)))
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

/// Markdown形式のフォーマッター
///
/// チャットでのプレビュー用。全角文字を含むセルも表示幅で揃えます。
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        writer: &mut W,
        layout: &SheetLayout,
    ) -> Result<(), QuizSheetError> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);
        rows.push(HEADER.iter().map(|h| h.to_string()).collect());
        for record in records {
            rows.push(
                record
                    .to_row(layout.type_labels)
                    .iter()
                    .map(|cell| escape_markdown(cell))
                    .collect(),
            );
        }

        // 最小幅は3文字（区切り行の最小幅）
        let mut widths = vec![3; COLUMN_COUNT];
        for row in &rows {
            for (col_idx, cell) in row.iter().enumerate() {
                widths[col_idx] = widths[col_idx].max(cell.width());
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            write!(writer, "|")?;
            for (col_idx, cell) in row.iter().enumerate() {
                let padding = widths[col_idx].saturating_sub(cell.width());
                write!(writer, " {}{} |", cell, " ".repeat(padding))?;
            }
            writeln!(writer)?;

            if row_idx == 0 {
                let separator: String = widths
                    .iter()
                    .map(|w| format!("{}|", "-".repeat(w + 2)))
                    .collect();
                writeln!(writer, "|{}", separator)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Markdownテーブル内で区切り文字と解釈される`|`をエスケープ
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
}
