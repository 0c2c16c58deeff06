//! Parser Module
//!
//! 自由記述のクイズテキストを正規化された問題レコードの列に変換する。
//!
//! 処理は入力文字列に対する純粋な関数であり、I/Oや共有状態を持たない。
//! 同じ`QuizParser`を複数スレッドから同時に使用できる。

mod block;
mod segment;

use crate::api::{DropPolicy, Segmentation};
use crate::types::{QuestionRecord, RawBlock};
use rayon::prelude::*;
use tracing::debug;

/// クイズテキストのパーサー
///
/// 不正な形式のブロックはエラーにせず、結果から除外します。
///
/// # 使用例
///
/// ```rust
/// use quizsheet::{QuestionType, QuizParser};
///
/// let parser = QuizParser::new();
/// let records = parser.parse("Вопрос?\nа) X\nб) Y\nОтвет: а,б");
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].question_type, QuestionType::Checkbox);
/// assert_eq!(records[0].answer_key, "1,2");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizParser {
    segmentation: Segmentation,
    drop_policy: DropPolicy,
}

impl QuizParser {
    /// デフォルト設定（空行区切り・`OpenEnded`を出力）のパーサーを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定を段階的に指定するビルダーを返す
    pub fn builder() -> QuizParserBuilder {
        QuizParserBuilder::new()
    }

    /// ブロックの区切り方式
    pub fn segmentation(&self) -> Segmentation {
        self.segmentation
    }

    /// 選択肢も解答もないブロックの扱い
    pub fn drop_policy(&self) -> DropPolicy {
        self.drop_policy
    }

    /// テキストを問題レコードの列に変換する
    ///
    /// 空または空白のみの入力は空の列を返します。
    /// 出力順は入力中のブロックの出現順です。
    pub fn parse(&self, text: &str) -> Vec<QuestionRecord> {
        let blocks = self.segment(text);
        let total = blocks.len();

        let records: Vec<QuestionRecord> = blocks
            .iter()
            .filter_map(|block| self.parse_block(block))
            .collect();

        debug!(
            blocks = total,
            records = records.len(),
            "parsed quiz text"
        );

        records
    }

    /// 独立した複数のテキストを並列に変換する
    ///
    /// 結果は入力と同じ順序で返されます。
    pub fn parse_many<S>(&self, texts: &[S]) -> Vec<Vec<QuestionRecord>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.parse(text.as_ref()))
            .collect()
    }

    /// テキストをブロックに分割する（空のブロックは除外）
    pub fn segment<'a>(&self, text: &'a str) -> Vec<RawBlock<'a>> {
        segment::split_blocks(text, self.segmentation)
    }

    /// 1ブロックを分類・正規化してレコードにする
    ///
    /// ブロックが出力対象外の場合は`None`を返します。
    pub fn parse_block(&self, block: &RawBlock<'_>) -> Option<QuestionRecord> {
        block::build_record(block, self.drop_policy)
    }
}

/// `QuizParser`のビルダー
///
/// # 使用例
///
/// ```rust
/// use quizsheet::{DropPolicy, QuizParser, Segmentation};
///
/// let parser = QuizParser::builder()
///     .with_segmentation(Segmentation::Ordinal)
///     .with_drop_policy(DropPolicy::DropBare)
///     .build();
///
/// assert_eq!(parser.segmentation(), Segmentation::Ordinal);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuizParserBuilder {
    parser: QuizParser,
}

impl QuizParserBuilder {
    /// デフォルト設定のビルダーを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// ブロックの区切り方式を指定する
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.parser.segmentation = segmentation;
        self
    }

    /// 選択肢も解答もないブロックの扱いを指定する
    pub fn with_drop_policy(mut self, policy: DropPolicy) -> Self {
        self.parser.drop_policy = policy;
        self
    }

    /// パーサーを生成する
    pub fn build(self) -> QuizParser {
        self.parser
    }
}
