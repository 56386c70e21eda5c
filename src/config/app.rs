/// アプリケーション設定モジュール
///
/// コンパイル時定数として埋め込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。

/// ライブラリ全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// Vimeo API のベースURL
    pub endpoint: &'static str,

    /// Acceptヘッダーで固定するAPIバージョン
    pub version: &'static str,

    /// APIリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// tusアップロードのチャンクサイズ (バイト)
    pub chunk_size: u64,

    /// チャンク送信が連続して失敗した場合のオフセット再取得回数の上限
    pub max_resume_attempts: u32,

    /// tusプロトコルのバージョン
    pub tus_version: &'static str,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG が未設定の場合に使うログレベル
    pub default_level: &'static str,
}

impl ApiConfig {
    /// Acceptヘッダーの値を返す
    pub fn accept_header(&self) -> String {
        format!("application/vnd.vimeo.*+json;version={}", self.version)
    }
}

pub const BYTES_PER_MB: u64 = 1024 * 1024;

pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://api.vimeo.com",
        version: "3.4",
        timeout_seconds: 300,
    },
    upload: UploadConfig {
        chunk_size: 128 * BYTES_PER_MB,
        max_resume_attempts: 3,
        tus_version: "1.0.0",
    },
    logging: LoggingConfig {
        default_level: "info",
    },
};
