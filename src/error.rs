/// クレート全体のエラー型
///
/// 各層のエラーを #[from] で集約する。呼び出し側は `severity()` と `hint()` で
/// エラーの種類を判定できる。
use crate::api::error::InfraError;
use crate::config::error::ConfigError;
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Domain(e) => e.severity(),
            Self::Infra(e) => e.severity(),
            Self::Config(e) => e.severity(),
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Domain(e) => e.hint(),
            Self::Config(e) => e.hint(),
            Self::Infra(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Infra(InfraError::Io(e))
    }
}
