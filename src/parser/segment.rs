//! Block Segmentation
//!
//! 入力テキストを1問ごとのブロック（`RawBlock`）に分割する。

use crate::api::Segmentation;
use crate::tables::has_ordinal_prefix;
use crate::types::RawBlock;

/// 指定された方式でテキストをブロックに分割する
///
/// 空白を除いて空になるブロックは結果に含まれません。
pub(crate) fn split_blocks(text: &str, segmentation: Segmentation) -> Vec<RawBlock<'_>> {
    let blocks = match segmentation {
        Segmentation::BlankLine => split_on_blank_lines(text),
        Segmentation::Ordinal => split_on_ordinals(text),
    };

    blocks.into_iter().filter(|b| !b.is_blank()).collect()
}

/// 空行（空白のみの行を含む）でブロックを区切る
fn split_on_blank_lines(text: &str) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<RawBlock<'_>> = None;

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        current
            .get_or_insert_with(|| RawBlock {
                line_no: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

/// 行頭の番号でブロックを区切る
///
/// 空行はブロックの区切りにならず、単に読み飛ばされます。
fn split_on_ordinals(text: &str) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<RawBlock<'_>> = None;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if has_ordinal_prefix(trimmed) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
        }

        current
            .get_or_insert_with(|| RawBlock {
                line_no: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}
