//! エラーの深刻度分類
//!
//! 呼び出し側がエラーを「入力を直せば解決するもの」「設定を見直すべきもの」
//! 「リモート側・ネットワーク側の問題」に振り分けるための分類。
//!
//! **依存方向の原則:**
//! - domain, api, config の各層はこのモジュールに依存してOK
//! - このモジュールは他のモジュールに依存しない（独立）

use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// 呼び出し側の入力エラー
    ///
    /// 未対応のコンテンツレーティング、存在しないファイルなど。
    /// リクエストは一切送信されていない。
    InvalidInput,

    /// 設定エラー
    ///
    /// アカウントIDやクライアント認証情報の欠落、設定ファイルの破損など。
    Configuration,

    /// リモートエラー
    ///
    /// ネットワーク障害、タイムアウト、レスポンスの解釈失敗など、
    /// 呼び出し側の引数では直せない外部要因。
    Remote,
}

impl ErrorSeverity {
    /// 同じ引数で再実行すれば成功する可能性があるか
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Remote)
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::Configuration => write!(f, "configuration error"),
            Self::Remote => write!(f, "remote error"),
        }
    }
}
