/// アップロードバックエンド
///
/// 再開可能な動画アップロードとサムネイル画像アップロードの2操作だけを担当する。
/// VideoHostClient は生成時にこのトレイトの実装を受け取り、以後それを使い続ける。
use crate::api::types::PictureUpload;
use crate::error::Result;
use serde_json::Value;
use std::future::Future;
use std::path::Path;

pub mod tus;

pub use tus::TusUploader;

pub trait UploadSdk {
    /// ローカルファイルを動画としてアップロードし、作成された動画URIを返す
    ///
    /// `body` は `POST /me/videos` に渡す動画メタデータ。
    /// 実装は `upload` フィールドだけを自身で設定する。
    fn upload_video(
        &self,
        file_path: &Path,
        body: Value,
    ) -> impl Future<Output = Result<String>> + Send;

    /// 既存の動画にサムネイル画像をアップロードする
    fn upload_picture(
        &self,
        video_uri: &str,
        file_path: &Path,
        activate: bool,
    ) -> impl Future<Output = Result<PictureUpload>> + Send;
}
