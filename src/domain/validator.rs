/// ドメインサービス: 入力バリデーション
///
/// リクエストを送る前に、コンテンツレーティングとアップロード対象ファイルを検証する。
use crate::domain::error::DomainError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Vimeoが受け付けるコンテンツレーティング
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentRating {
    Violence,
    Drugs,
    Language,
    Nudity,
    Advertisement,
    #[default]
    Safe,
    Unrated,
}

impl ContentRating {
    pub const ALL: [ContentRating; 7] = [
        Self::Violence,
        Self::Drugs,
        Self::Language,
        Self::Nudity,
        Self::Advertisement,
        Self::Safe,
        Self::Unrated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Violence => "violence",
            Self::Drugs => "drugs",
            Self::Language => "language",
            Self::Nudity => "nudity",
            Self::Advertisement => "advertisement",
            Self::Safe => "safe",
            Self::Unrated => "unrated",
        }
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentRating {
    type Err = DomainError;

    /// 大文字小文字を区別して照合する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|r| r.as_str()).collect();
                DomainError::unsupported_content_rating(s, &supported)
            })
    }
}

/// ファイルのバリデーション結果
#[derive(Debug)]
pub struct ValidationResult {
    pub path: String,
    pub size: u64,
}

/// アップロード対象のファイルをバリデーションする
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
/// - ファイルが空
pub fn validate_upload_file(file_path: &Path) -> Result<ValidationResult, DomainError> {
    let display = file_path.display().to_string();

    let metadata = std::fs::metadata(file_path).map_err(|_| DomainError::FileNotFound {
        path: display.clone(),
    })?;

    if metadata.is_dir() {
        return Err(DomainError::NotAFile { path: display });
    }

    let size = metadata.len();
    if size == 0 {
        return Err(DomainError::EmptyFile { path: display });
    }

    Ok(ValidationResult {
        path: display,
        size,
    })
}
