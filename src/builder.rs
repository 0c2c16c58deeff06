//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{DropPolicy, OutputFormat, Segmentation, TypeLabels};
use crate::error::QuizSheetError;
use crate::limits::InputLimits;
use crate::output::{OutputFormatter, SheetLayout};
use crate::parser::QuizParser;
use crate::types::QuestionRecord;
use std::io::{BufWriter, Read, Write};
use tracing::{debug, info};

/// Excelのシート名に使用できない文字
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Excelのシート名の最大文字数
const MAX_SHEET_NAME_CHARS: usize = 31;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// ブロックの区切り方式
    pub segmentation: Segmentation,

    /// 選択肢も解答もないブロックの扱い
    pub drop_policy: DropPolicy,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// シート名と種類ラベル
    pub layout: SheetLayout,

    /// 入力サイズの制限
    pub limits: InputLimits,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            segmentation: Segmentation::BlankLine,
            drop_policy: DropPolicy::KeepOpenEnded,
            output_format: OutputFormat::Xlsx,
            layout: SheetLayout::default(),
            limits: InputLimits::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use quizsheet::{ConverterBuilder, OutputFormat, Segmentation};
///
/// # fn main() -> Result<(), quizsheet::QuizSheetError> {
/// let converter = ConverterBuilder::new()
///     .with_segmentation(Segmentation::Ordinal)
///     .with_output_format(OutputFormat::Csv)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 区切り方式: 空行
    /// - 選択肢も解答もないブロック: `OpenEnded`として出力
    /// - 出力フォーマット: XLSX
    /// - シート名: `Quiz`
    /// - 種類ラベル: 列挙子名
    /// - 入力サイズ上限: 1MiB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// ブロックの区切り方式を指定する
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.config.segmentation = segmentation;
        self
    }

    /// 選択肢も解答もないブロックの扱いを指定する
    pub fn with_drop_policy(mut self, policy: DropPolicy) -> Self {
        self.config.drop_policy = policy;
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use quizsheet::{ConverterBuilder, OutputFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// `Question Type`列の表記方式を指定する
    pub fn with_type_labels(mut self, labels: TypeLabels) -> Self {
        self.config.layout.type_labels = labels;
        self
    }

    /// ワークシート名を指定する（XLSX出力のみ使用）
    ///
    /// # 制約
    ///
    /// * 1〜31文字
    /// * `[ ] : * ? / \` を含まない
    /// * 制約違反の場合、`build()`時に`QuizSheetError::Config`を返す
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.layout.sheet_name = name.into();
        self
    }

    /// 入力サイズの上限（バイト）を指定する
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.config.limits = InputLimits::new(max);
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `QuizSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * シート名が空、または31文字を超える
    ///   * シート名に使用できない文字が含まれる
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, QuizSheetError> {
        // 1. シート名の検証
        let name = &self.config.layout.sheet_name;
        if name.trim().is_empty() {
            return Err(QuizSheetError::Config(
                "Sheet name must not be empty".to_string(),
            ));
        }

        let char_count = name.chars().count();
        if char_count > MAX_SHEET_NAME_CHARS {
            return Err(QuizSheetError::Config(format!(
                "Sheet name is too long: {} characters (max: {})",
                char_count, MAX_SHEET_NAME_CHARS
            )));
        }

        if let Some(c) = name.chars().find(|c| INVALID_SHEET_CHARS.contains(c)) {
            return Err(QuizSheetError::Config(format!(
                "Invalid character '{}' in sheet name: '{}'",
                c, name
            )));
        }

        // 2. サイズ上限の検証
        if self.config.limits.max_input_bytes == 0 {
            return Err(QuizSheetError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        // 3. Converterインスタンス生成
        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// クイズテキストを表形式に変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust
/// use quizsheet::ConverterBuilder;
///
/// # fn main() -> Result<(), quizsheet::QuizSheetError> {
/// let converter = ConverterBuilder::new().build()?;
/// let xlsx = converter.convert_str("Вопрос?\nа) X\nб) Y\nОтвет: а")?;
/// assert!(!xlsx.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// パーサー
    parser: QuizParser,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        let parser = QuizParser::builder()
            .with_segmentation(config.segmentation)
            .with_drop_policy(config.drop_policy)
            .build();
        Self { config, parser }
    }

    /// 設定済みのパーサー
    pub fn parser(&self) -> &QuizParser {
        &self.parser
    }

    /// 出力フォーマット
    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }

    /// 入力サイズの制限
    pub fn limits(&self) -> InputLimits {
        self.config.limits
    }

    /// テキストを問題レコードの列に変換する（出力は行わない）
    pub fn parse(&self, text: &str) -> Vec<QuestionRecord> {
        self.parser.parse(text)
    }

    /// クイズテキストを読み込み、表形式で出力する
    ///
    /// # 引数
    ///
    /// * `input` - UTF-8テキストを読み込むためのリーダー
    /// * `output` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 出力した問題数
    /// * `Err(QuizSheetError)` - エラーが発生した場合
    ///
    /// # 処理フロー
    ///
    /// 1. 入力の読み込み（サイズ上限を検証）
    /// 2. 空入力の判定
    /// 3. 解析（0件の場合は`NoQuestions`）
    /// 4. 出力フォーマットに応じた書き込み
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<usize, QuizSheetError> {
        // 1. 上限+1バイトまで読み込み、超過を検出する
        let limit = self.config.limits.max_input_bytes;
        let mut bytes = Vec::new();
        input
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut bytes)?;
        self.config.limits.check(bytes.len())?;

        let text = String::from_utf8(bytes)?;

        // 2-4
        let records = self.records_for(&text)?;
        let mut writer = BufWriter::new(&mut output);
        self.render(&records, &mut writer)?;
        writer.flush()?;

        info!(
            records = records.len(),
            format = ?self.config.output_format,
            "quiz converted"
        );

        Ok(records.len())
    }

    /// 文字列を変換し、出力のバイト列を返す
    pub fn convert_str(&self, text: &str) -> Result<Vec<u8>, QuizSheetError> {
        self.config.limits.check(text.len())?;

        let records = self.records_for(text)?;
        let mut buffer = Vec::new();
        self.render(&records, &mut buffer)?;

        info!(
            records = records.len(),
            bytes = buffer.len(),
            "quiz converted"
        );

        Ok(buffer)
    }

    /// 解析済みのレコードを設定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        records: &[QuestionRecord],
        mut output: W,
    ) -> Result<(), QuizSheetError> {
        let formatter = OutputFormatter::from_format(self.config.output_format);
        formatter.render(records, &mut output, &self.config.layout)
    }

    /// 空入力と認識失敗を区別して解析する
    fn records_for(&self, text: &str) -> Result<Vec<QuestionRecord>, QuizSheetError> {
        if text.trim().is_empty() {
            debug!("empty input");
            return Err(QuizSheetError::EmptyInput);
        }

        let records = self.parser.parse(text);
        if records.is_empty() {
            debug!(bytes = text.len(), "no questions recognized");
            return Err(QuizSheetError::NoQuestions);
        }

        Ok(records)
    }
}
