//! Input Limits Module
//!
//! 入力テキストとセッションバッファのサイズ制限を定義するモジュール。
//! 想定する入力は数百行程度の手入力テキストであり、上限はそれを十分に上回る値とする。

use crate::error::QuizSheetError;

/// デフォルトの上限（1MiB）
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1_048_576;

/// 入力サイズの制限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// 1回の変換、または1セッションのバッファの最大サイズ（バイト）
    /// デフォルト: 1MiB (1_048_576 bytes)
    pub max_input_bytes: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl InputLimits {
    /// 指定した上限で制限を作成
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }

    /// サイズが上限以内かを検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(QuizSheetError::InputTooLarge)` - 上限を超えた場合
    pub fn check(&self, size: usize) -> Result<(), QuizSheetError> {
        if size > self.max_input_bytes {
            return Err(QuizSheetError::InputTooLarge {
                size,
                max: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(InputLimits::default().max_input_bytes, 1_048_576);
    }

    #[test]
    fn test_check_within_limit() {
        let limits = InputLimits::new(10);
        assert!(limits.check(0).is_ok());
        assert!(limits.check(10).is_ok());
    }

    #[test]
    fn test_check_over_limit() {
        let limits = InputLimits::new(10);
        match limits.check(11) {
            Err(QuizSheetError::InputTooLarge { size, max }) => {
                assert_eq!(size, 11);
                assert_eq!(max, 10);
            }
            other => panic!("Expected InputTooLarge, got {:?}", other),
        }
    }
}
