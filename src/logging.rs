//! tracing サブスクライバーの初期化
//!
//! ライブラリ自体はイベントを発行するだけで、出力先の設定は利用側に任せる。
//! 手早く出力を見たい場合のために fmt サブスクライバーの初期化を用意している。

use crate::config::APP_CONFIG;
use tracing_subscriber::EnvFilter;

/// fmt サブスクライバーをグローバルに設定する
///
/// `RUST_LOG` が設定されていればそちらを優先し、無ければ `level` を使う。
/// 既に別のサブスクライバーが設定済みの場合は何もせず false を返す。
pub fn init(level: Option<&str>) -> bool {
    let level = level.unwrap_or(APP_CONFIG.logging.default_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
