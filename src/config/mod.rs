/// 設定管理モジュール
///
/// このモジュールは3つの設定を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に認証情報ファイルから読み込まれる動的設定
/// 3. ClientConfig - VideoHostClient に渡す不変の接続設定
///
/// # 使用例
///
/// ```no_run
/// use vimeo_kit::config::{APP_CONFIG, UserConfig};
///
/// let endpoint = APP_CONFIG.api.endpoint;
/// let client_config = UserConfig::load()?.to_client_config();
/// # Ok::<(), vimeo_kit::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod client;
pub mod error;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use client::ClientConfig;
pub use user::UserConfig;
