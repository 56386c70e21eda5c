/// ユーザー設定モジュール
///
/// 認証情報ファイル(TOML)から ClientConfig を組み立てます。
/// 既定の配置先:
/// Windows: C:\Users\<User>\AppData\Roaming\vimeo-kit\config.toml
/// macOS:   /Users/<User>/Library/Application Support/vimeo-kit/config.toml
/// Linux:   /home/<user>/.config/vimeo-kit/config.toml
use crate::config::client::ClientConfig;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ユーザー設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// APIアクセストークン
    pub access_token: String,

    /// クライアントID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// クライアントシークレット
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// 数値のユーザーID（フォルダ作成に使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl UserConfig {
    /// 既定の設定ファイルパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("vimeo-kit").join("config.toml"))
    }

    /// 既定のパスから設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定したパスから設定を読み込む
    ///
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    ///
    /// # Errors
    /// 読み込み、パース、または検証に失敗した場合に ConfigError を返します。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { source, .. } => ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                source,
            ),
            other => other,
        })
    }

    /// TOML文字列から設定を読み込み、検証する
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::parse_error("Failed to parse config", e))?;

        config.validate()?;

        Ok(config)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - access_token: 空文字列でないこと
    /// - client_id / client_secret: 両方指定するか、両方省略すること
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::validation_error(
                "access_token cannot be empty",
            ));
        }

        match (&self.client_id, &self.client_secret) {
            (Some(_), None) => Err(ConfigError::validation_error(
                "client_id is set but client_secret is missing",
            )),
            (None, Some(_)) => Err(ConfigError::validation_error(
                "client_secret is set but client_id is missing",
            )),
            _ => Ok(()),
        }
    }

    /// クライアント設定に変換
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            access_token: self.access_token.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            account_id: self.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = UserConfig::parse(
            r#"
access_token = "abc"
client_id = "id"
client_secret = "secret"
user_id = 123456789
"#,
        )
        .expect("config should parse");

        let client_config = config.to_client_config();
        assert_eq!(client_config.access_token, "abc");
        assert_eq!(client_config.account_id, Some(123456789));
        assert!(client_config.has_upload_credentials());
    }

    #[test]
    fn test_parse_token_only() {
        let config = UserConfig::parse(r#"access_token = "abc""#).unwrap();
        assert!(config.client_id.is_none());
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let result = UserConfig::parse(r#"access_token = "  ""#);
        if let Err(ConfigError::ValidationError { message }) = result {
            assert!(message.contains("access_token"));
        } else {
            panic!("Expected ValidationError for empty access_token");
        }
    }

    #[test]
    fn test_validate_rejects_half_credentials() {
        let result = UserConfig::parse(
            r#"
access_token = "abc"
client_id = "id"
"#,
        );
        if let Err(ConfigError::ValidationError { message }) = result {
            assert!(message.contains("client_secret"));
        } else {
            panic!("Expected ValidationError for missing client_secret");
        }
    }

    #[test]
    fn test_parse_error() {
        let result = UserConfig::parse("access_token = ");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"access_token = "from_file""#).unwrap();

        let config = UserConfig::load_from(file.path()).unwrap();
        assert_eq!(config.access_token, "from_file");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = UserConfig::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::FileSystem { .. })));
    }

    #[test]
    fn test_config_path() {
        if let Ok(path) = UserConfig::config_path() {
            assert!(path.to_string_lossy().contains("vimeo-kit"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
