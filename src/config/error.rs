/// Config層のエラー定義
///
/// 認証情報ファイルの読み込みとパース、検証に関するエラーを構造化して定義。
/// 外部エラー(std::io::Error, toml::de::Error)の発信元を #[source] で保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// 設定ディレクトリの取得失敗
    #[error("failed to get config directory: {message}")]
    DirectoryNotFound { message: String },

    /// ファイルシステムエラー
    #[error("file system error: {context}")]
    FileSystem {
        context: String,
        #[source]
        source: io::Error,
    },

    /// 設定ファイルのパースエラー
    #[error("failed to parse config file: {context}")]
    ParseError {
        context: String,
        #[source]
        source: toml::de::Error,
    },

    /// 設定の検証エラー
    #[error("configuration validation failed: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    pub fn directory_not_found(message: impl Into<String>) -> Self {
        Self::DirectoryNotFound {
            message: message.into(),
        }
    }

    pub fn file_system(context: impl Into<String>, source: io::Error) -> Self {
        Self::FileSystem {
            context: context.into(),
            source,
        }
    }

    pub fn parse_error(context: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ParseError {
            context: context.into(),
            source,
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileSystem { .. } => ErrorSeverity::Remote,
            Self::DirectoryNotFound { .. }
            | Self::ParseError { .. }
            | Self::ValidationError { .. } => ErrorSeverity::Configuration,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::DirectoryNotFound { .. } => {
                Some("Unable to locate the configuration directory. Pass an explicit config path instead.")
            }
            Self::FileSystem { .. } => {
                Some("Check that the credentials file exists and is readable.")
            }
            Self::ParseError { .. } => {
                Some("The credentials file must be valid TOML with an access_token entry.")
            }
            Self::ValidationError { .. } => {
                Some("Create an app in the Vimeo Developer Dashboard to obtain valid credentials.")
            }
        }
    }
}
