//! quizsheet - Free-text quiz parser and spreadsheet exporter
//!
//! チャットで入力された自由形式のクイズテキストを解析し、
//! クイズプラットフォームへ一括インポートできる表形式（XLSXなど）に変換するクレートです。
//!
//! # Quick Start
//!
//! ```rust
//! use quizsheet::{QuestionType, QuizParser};
//!
//! let text = "1. Кто написал «Войну и мир»?\n\
//!             а) Чехов\n\
//!             б) Пушкин\n\
//!             в) Толстой\n\
//!             г) Достоевский\n\
//!             Ответ: в";
//!
//! let records = QuizParser::new().parse(text);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].stem, "1. Кто написал «Войну и мир»?");
//! assert_eq!(records[0].question_type, QuestionType::MultipleChoice);
//! assert_eq!(records[0].options[2], "Толстой");
//! assert_eq!(records[0].answer_key, "3");
//! ```
//!
//! # Spreadsheet Output
//!
//! ```rust,no_run
//! use std::fs::File;
//! use quizsheet::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("quiz.txt")?;
//!     let output = File::create("quiz.xlsx")?;
//!
//!     let count = converter.convert(input, output)?;
//!     println!("{} questions", count);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Incremental Input
//!
//! テキストが複数のメッセージに分かれて届く場合は`SessionStore`で連結してから解析します。
//!
//! ```rust
//! use quizsheet::{FinishOutcome, Notice, QuizParser, SessionStore};
//!
//! let store = SessionStore::new();
//! let parser = QuizParser::new();
//!
//! store.start("chat-1");
//! let outcome = store.finish(&"chat-1", &parser);
//!
//! assert_eq!(outcome, FinishOutcome::Empty);
//! assert_eq!(Notice::for_outcome(&outcome), Notice::EmptyBuffer);
//! ```

mod api;
mod builder;
mod error;
mod limits;
mod notice;
mod output;
mod parser;
mod session;
mod tables;
mod types;

// 公開API
pub use api::{DropPolicy, OutputFormat, QuestionType, Segmentation, TypeLabels};
pub use builder::{Converter, ConverterBuilder};
pub use error::QuizSheetError;
pub use limits::{InputLimits, DEFAULT_MAX_INPUT_BYTES};
pub use notice::{Notice, FORMAT_EXAMPLE};
pub use parser::{QuizParser, QuizParserBuilder};
pub use session::{FinishOutcome, SessionStore};
pub use tables::{letter_index, COLUMN_COUNT, HEADER, OPTION_SLOTS};
pub use types::{QuestionRecord, RawBlock};
