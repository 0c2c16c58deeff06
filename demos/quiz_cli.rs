//! quiz_cli - クイズテキストをファイルに変換するコマンドラインツール
//!
//! 各入力ファイルをチャットの1メッセージとして扱い、セッションに連結してから解析します。
//! 入力ファイルを指定しない場合は標準入力を1メッセージとして読み込みます。
//!
//! ```text
//! cargo run --example quiz_cli -- part1.txt part2.txt -o quiz.xlsx
//! RUST_LOG=quizsheet=debug cargo run --example quiz_cli -- --format markdown < quiz.txt
//! ```

use clap::{Parser, ValueEnum};
use quizsheet::{
    ConverterBuilder, DropPolicy, FinishOutcome, Notice, OutputFormat, SessionStore,
    Segmentation, TypeLabels,
};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SegmentationArg {
    /// 空行で区切る
    Blank,
    /// 番号付きの行で区切る
    Ordinal,
}

#[derive(Parser, Debug)]
#[command(version, about = "Convert free-text quizzes into spreadsheet rows")]
struct Args {
    /// Message files, concatenated in order. Reads stdin when empty.
    inputs: Vec<PathBuf>,

    /// Output path. Defaults to quiz.<ext>; use "-" for stdout.
    #[arg(short, long)]
    output: Option<String>,

    #[arg(short, long, value_enum, default_value_t = FormatArg::Xlsx)]
    format: FormatArg,

    #[arg(short, long, value_enum, default_value_t = SegmentationArg::Blank)]
    segmentation: SegmentationArg,

    /// Drop blocks that have neither options nor an answer line.
    #[arg(long)]
    drop_bare: bool,

    /// Write Quizizz display labels in the type column.
    #[arg(long)]
    quizizz_labels: bool,

    /// Maximum accumulated input size in bytes.
    #[arg(long)]
    max_input_bytes: Option<usize>,

    /// Print the greeting with the format example and exit.
    #[arg(long)]
    example: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "quizsheet=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.example {
        println!("{}", Notice::Greeting.text());
        return Ok(());
    }

    let format = OutputFormat::from(args.format);
    let mut builder = ConverterBuilder::new()
        .with_output_format(format)
        .with_segmentation(match args.segmentation {
            SegmentationArg::Blank => Segmentation::BlankLine,
            SegmentationArg::Ordinal => Segmentation::Ordinal,
        });
    if args.drop_bare {
        builder = builder.with_drop_policy(DropPolicy::DropBare);
    }
    if args.quizizz_labels {
        builder = builder.with_type_labels(TypeLabels::Quizizz);
    }
    if let Some(max) = args.max_input_bytes {
        builder = builder.with_max_input_bytes(max);
    }
    let converter = builder.build()?;

    let store = SessionStore::with_limits(converter.limits());
    let session = "cli";
    store.start(session);

    if args.inputs.is_empty() {
        let mut message = String::new();
        io::stdin().read_to_string(&mut message)?;
        store.append(&session, &message)?;
    } else {
        for path in &args.inputs {
            let message = std::fs::read_to_string(path)?;
            store.append(&session, &message)?;
            info!(path = %path.display(), bytes = message.len(), "message appended");
        }
    }

    let outcome = store.finish(&session, converter.parser());
    let notice = Notice::for_outcome(&outcome);

    let FinishOutcome::Parsed(records) = outcome else {
        eprintln!("{}", notice.text());
        std::process::exit(1);
    };

    let output = args
        .output
        .unwrap_or_else(|| format.file_name("quiz"));
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        converter.render(&records, &mut handle)?;
        handle.flush()?;
    } else {
        converter.render(&records, File::create(&output)?)?;
        info!(path = %output, questions = records.len(), "file written");
    }

    eprintln!("{}", notice.text());
    Ok(())
}
