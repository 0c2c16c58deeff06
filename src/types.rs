//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use crate::api::{QuestionType, TypeLabels};
use crate::tables::{COLUMN_COUNT, OPTION_SLOTS};
use serde::Serialize;

/// 1問分の記述とみなされる入力テキストの連続した範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// ブロック先頭の行番号（1始まり）
    pub line_no: usize,

    /// ブロックに含まれる行（前後の空白は未処理）
    pub lines: Vec<&'a str>,
}

impl<'a> RawBlock<'a> {
    /// 空白を除いた内容が空かどうか
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// ブロック内の1行の分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// 解答行（ラベル以降の解答部分）
    Answer(&'a str),

    /// 選択肢（マーカー除去済み、またはマーカーなしの行そのもの）
    Option(&'a str),
}

/// 正規化された1問分の出力レコード
///
/// `options`は常にちょうど5要素です。未使用のスロットは空文字列になります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// 問題文（ブロックの1行目、番号は除去しない）
    pub stem: String,

    /// 問題の種類
    pub question_type: QuestionType,

    /// 選択肢1〜5
    pub options: [String; OPTION_SLOTS],

    /// 正解の選択肢番号をカンマで連結した文字列（例: `"1,2"`）。該当なしは空文字列
    pub answer_key: String,
}

impl QuestionRecord {
    /// 空でない選択肢の数
    pub fn option_count(&self) -> usize {
        self.options.iter().filter(|o| !o.is_empty()).count()
    }

    /// `answer_key`を番号の列として取得
    ///
    /// `u32`に収まらない番号は含まれません。
    pub fn answer_indices(&self) -> Vec<u32> {
        self.answer_key
            .split(',')
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    /// ヘッダーと同じ列順の1行に変換する
    pub fn to_row(&self, labels: TypeLabels) -> [String; COLUMN_COUNT] {
        let [o1, o2, o3, o4, o5] = self.options.clone();
        [
            self.stem.clone(),
            self.question_type.label(labels).to_string(),
            o1,
            o2,
            o3,
            o4,
            o5,
            self.answer_key.clone(),
        ]
    }
}
