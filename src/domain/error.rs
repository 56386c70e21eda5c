/// ドメイン層のエラー定義
///
/// リクエスト送信前に検出できる制約違反を構造化して定義。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// 未対応のコンテンツレーティング
    #[error("unsupported content rating: '{rating}' (expected: {expected})")]
    UnsupportedContentRating { rating: String, expected: String },

    /// アカウントIDが未設定
    #[error("account id is required for {operation}")]
    MissingAccountId { operation: String },

    /// アップロード用のクライアント認証情報が未設定
    #[error("client id and client secret are required for {operation}")]
    UploadCredentialsMissing { operation: String },

    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ファイルが空
    #[error("file is empty: {path}")]
    EmptyFile { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },
}

impl DomainError {
    /// 未対応レーティングエラーを生成
    pub fn unsupported_content_rating(rating: impl Into<String>, supported: &[&str]) -> Self {
        Self::UnsupportedContentRating {
            rating: rating.into(),
            expected: format!("one of: {}", supported.join(", ")),
        }
    }

    pub fn missing_account_id(operation: impl Into<String>) -> Self {
        Self::MissingAccountId {
            operation: operation.into(),
        }
    }

    pub fn upload_credentials_missing(operation: impl Into<String>) -> Self {
        Self::UploadCredentialsMissing {
            operation: operation.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsupportedContentRating { .. }
            | Self::FileNotFound { .. }
            | Self::EmptyFile { .. }
            | Self::NotAFile { .. } => ErrorSeverity::InvalidInput,
            Self::MissingAccountId { .. } | Self::UploadCredentialsMissing { .. } => {
                ErrorSeverity::Configuration
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::UnsupportedContentRating { .. } => Some(
                "Use violence, drugs, language, nudity, advertisement, safe or unrated.",
            ),
            Self::MissingAccountId { .. } => {
                Some("Set the numeric account id with ClientConfig::with_account_id.")
            }
            Self::UploadCredentialsMissing { .. } => {
                Some("Set client_id and client_secret from the Vimeo Developer Dashboard.")
            }
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::EmptyFile { .. } => Some("The file appears to be empty or corrupted."),
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
        }
    }
}
