/// API通信用の型定義
///
/// Vimeo APIへのリクエスト結果と、レスポンスから取り出す構造体を定義します。
use serde::{Deserialize, Deserializer, Serialize};

/// 1回の操作の結果
///
/// 値と、最後に完了したリクエストのHTTPステータスをまとめて返す。
/// ステータスが非2xxでもエラーにはならず、ここに記録される。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub value: T,
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub fn new(value: T, status: Option<u16>) -> Self {
        Self { value, status }
    }

    /// ステータスが2xxか
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|code| (200..300).contains(&code))
    }

    /// 値を変換
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            status: self.status,
        }
    }
}

/// 動画の主要情報
///
/// 処理中の動画では値が null のことがあるため、各フィールドは Option。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonVideoInformation {
    /// トランスコード状態（"complete", "in_progress" など）
    pub status: Option<String>,
    pub is_playable: Option<bool>,
    /// 動画ページのURL（例: https://vimeo.com/123456789）
    pub link: Option<String>,
    /// 再生時間（秒）
    pub duration: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

/// 動画レコードから CommonVideoInformation を取り出すための中間型
///
/// キーが無い場合はエラー、値が null の場合は None になる。
#[derive(Debug, Deserialize)]
pub(crate) struct VideoRecord {
    pub transcode: Transcode,
    #[serde(deserialize_with = "nullable")]
    pub is_playable: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub link: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub duration: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub width: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub height: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Transcode {
    #[serde(deserialize_with = "nullable")]
    pub status: Option<String>,
}

/// `Option` の欠落時デフォルトを無効にし、キーの存在だけを要求する
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl From<VideoRecord> for CommonVideoInformation {
    fn from(record: VideoRecord) -> Self {
        Self {
            status: record.transcode.status,
            is_playable: record.is_playable,
            link: record.link,
            duration: record.duration,
            width: record.width,
            height: record.height,
        }
    }
}

/// サムネイル画像のアップロード結果
///
/// 例:
/// ```json
/// {
///   "uri": "/videos/658371443/pictures/1329492536",
///   "link": "https://i.vimeocdn.com/video/1329492536",
///   "active": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureUpload {
    pub uri: String,
    pub link: String,
    #[serde(default)]
    pub active: bool,
}

/// リソースURIの末尾セグメントを取り出す
///
/// "/videos/123456789" → "123456789"
pub fn trailing_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}
