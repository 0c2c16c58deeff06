//! Session Buffer Module
//!
//! チャットから複数回に分けて届くテキストを、会話セッションごとに1つの
//! バッファへ連結するためのストア。
//!
//! ストアはトランスポート層が所有し、パーサーには最終的な文字列だけを渡す。
//! セッションごとに専用のロックを持つため、同一セッションへの追記は到着順に
//! 直列化され、異なるセッション同士がバッファを共有することはない。

use crate::error::QuizSheetError;
use crate::limits::InputLimits;
use crate::parser::QuizParser;
use crate::types::QuestionRecord;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, trace};

/// 1セッション分のバッファ
#[derive(Debug, Default)]
struct SessionBuffer {
    text: String,
    chunks: usize,
}

/// `finish`の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    /// バッファが空（空白のみを含む）だったため、解析は行っていない
    Empty,

    /// 解析したが問題を1件も認識できなかった
    Unrecognized,

    /// 解析結果
    Parsed(Vec<QuestionRecord>),
}

/// セッションIDをキーとするテキストバッファのストア
///
/// # 使用例
///
/// ```rust
/// use quizsheet::{FinishOutcome, QuizParser, SessionStore};
///
/// let store = SessionStore::new();
/// let parser = QuizParser::new();
///
/// store.start(42_i64);
/// store.append(&42, "Вопрос?\nа) X").unwrap();
/// store.append(&42, "б) Y\nОтвет: б").unwrap();
///
/// match store.finish(&42, &parser) {
///     FinishOutcome::Parsed(records) => assert_eq!(records[0].answer_key, "2"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub struct SessionStore<K> {
    sessions: RwLock<HashMap<K, Mutex<SessionBuffer>>>,
    limits: InputLimits,
}

impl<K> Default for SessionStore<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SessionStore<K>
where
    K: Eq + Hash,
{
    /// デフォルトのサイズ制限でストアを生成する
    pub fn new() -> Self {
        Self::with_limits(InputLimits::default())
    }

    /// サイズ制限を指定してストアを生成する
    pub fn with_limits(limits: InputLimits) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            limits,
        }
    }

    /// 収集を開始する（既存のバッファは空にする）
    pub fn start(&self, key: K) {
        let mut sessions = self.sessions.write();
        sessions.insert(key, Mutex::new(SessionBuffer::default()));
        trace!(sessions = sessions.len(), "session started");
    }

    /// テキストをバッファに追記する
    ///
    /// 既存の内容がある場合は改行で区切ります。
    ///
    /// # 発生し得るエラー
    ///
    /// * `QuizSheetError::SessionNotStarted` - `start`されていないセッション
    /// * `QuizSheetError::InputTooLarge` - 追記後のサイズが上限を超える（バッファは変更されない）
    pub fn append(&self, key: &K, chunk: &str) -> Result<(), QuizSheetError> {
        self.with_buffer(key, |buffer| {
            let separator = usize::from(!buffer.text.is_empty());
            self.limits
                .check(buffer.text.len() + separator + chunk.len())?;

            if separator == 1 {
                buffer.text.push('\n');
            }
            buffer.text.push_str(chunk);
            buffer.chunks += 1;

            trace!(
                chunks = buffer.chunks,
                bytes = buffer.text.len(),
                "chunk appended"
            );
            Ok(())
        })
        .ok_or(QuizSheetError::SessionNotStarted)?
    }

    /// バッファを空にする（収集は継続）
    pub fn reset(&self, key: &K) -> Result<(), QuizSheetError> {
        self.with_buffer(key, |buffer| {
            buffer.text.clear();
            buffer.chunks = 0;
            trace!("session buffer reset");
        })
        .ok_or(QuizSheetError::SessionNotStarted)
    }

    /// 収集を終了し、バッファを解析する
    ///
    /// セッションはストアから削除されます。バッファが空、または
    /// 開始されていないセッションの場合は解析を行わず`FinishOutcome::Empty`を返します。
    pub fn finish(&self, key: &K, parser: &QuizParser) -> FinishOutcome {
        let removed = self.sessions.write().remove(key);
        let Some(buffer) = removed else {
            return FinishOutcome::Empty;
        };

        let text = buffer.into_inner().text;
        if text.trim().is_empty() {
            debug!("finish requested with empty buffer");
            return FinishOutcome::Empty;
        }

        let records = parser.parse(&text);
        if records.is_empty() {
            debug!(bytes = text.len(), "no questions recognized in session buffer");
            return FinishOutcome::Unrecognized;
        }

        debug!(records = records.len(), "session finished");
        FinishOutcome::Parsed(records)
    }

    /// セッションを破棄する。存在した場合は`true`
    pub fn discard(&self, key: &K) -> bool {
        self.sessions.write().remove(key).is_some()
    }

    /// セッションが収集中かどうか
    pub fn is_collecting(&self, key: &K) -> bool {
        self.sessions.read().contains_key(key)
    }

    /// 現在のバッファ内容のコピー
    pub fn snapshot(&self, key: &K) -> Option<String> {
        self.with_buffer(key, |buffer| buffer.text.clone())
    }

    /// `start`または`reset`以降に追記されたメッセージ数
    pub fn chunk_count(&self, key: &K) -> Option<usize> {
        self.with_buffer(key, |buffer| buffer.chunks)
    }

    /// 収集中のセッション数
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// 収集中のセッションがないかどうか
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// マップの読み取りロックを保持したままバッファを操作する
    ///
    /// ロック順は常にマップ → バッファ。`start`/`finish`は書き込みロックを取るため、
    /// 操作中のバッファが差し替え・削除されることはない。
    fn with_buffer<T>(&self, key: &K, f: impl FnOnce(&mut SessionBuffer) -> T) -> Option<T> {
        let sessions = self.sessions.read();
        let mut buffer = sessions.get(key)?.lock();
        Some(f(&mut *buffer))
    }
}
