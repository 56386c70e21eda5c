/// Vimeo クライアント
///
/// 各操作を1つのエンドポイント（またはアップロードバックエンドの1呼び出し）に対応付け、
/// 結果とHTTPステータスを ApiResponse にまとめて返します。
/// クライアント自体は可変状態を持たないため、複数タスクから同時に使えます。
use crate::api::auth::RequestHeaders;
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::types::{
    ApiResponse, CommonVideoInformation, PictureUpload, VideoRecord, trailing_id,
};
use crate::config::{APP_CONFIG, ClientConfig};
use crate::domain::embed::extract_video_hash;
use crate::domain::error::DomainError;
use crate::domain::settings;
use crate::domain::validator::ContentRating;
use crate::error::Result;
use crate::sdk::{TusUploader, UploadSdk};
use reqwest::Response;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Vimeo API クライアント
#[derive(Debug)]
pub struct VideoHostClient<S = TusUploader> {
    config: ClientConfig,
    api: ApiClient,
    uploader: Option<S>,
}

impl VideoHostClient<TusUploader> {
    /// プロダクション環境 (https://api.vimeo.com) 向けのクライアントを作成
    ///
    /// クライアントIDとシークレットが揃っている場合だけ、アップロードバックエンドを
    /// この時点で生成します。
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_base_url(config, APP_CONFIG.api.endpoint)
    }

    /// 任意のベースURL向けのクライアントを作成
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let headers = RequestHeaders::from_token(&config.access_token)?;
        let api = ApiClient::new(base_url, headers)?;

        let uploader = config
            .has_upload_credentials()
            .then(|| TusUploader::new(api.clone()));

        Ok(Self {
            config,
            api,
            uploader,
        })
    }
}

impl<S> VideoHostClient<S> {
    /// アップロードバックエンドを差し替える
    pub fn with_uploader<U: UploadSdk>(self, uploader: U) -> VideoHostClient<U> {
        VideoHostClient {
            config: self.config,
            api: self.api,
            uploader: Some(uploader),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_uploader(&self) -> bool {
        self.uploader.is_some()
    }
}

impl<S: UploadSdk> VideoHostClient<S> {
    fn uploader(&self, operation: &str) -> Result<&S> {
        self.uploader
            .as_ref()
            .ok_or_else(|| DomainError::upload_credentials_missing(operation).into())
    }

    /// ローカルファイルを動画としてアップロード
    ///
    /// # Arguments
    /// * `file_path` - 動画ファイルのパス
    /// * `name` - Vimeo上の動画名
    /// * `description` - Vimeo上の説明文
    /// * `settings` - 指定した場合は既定の公開設定を含むボディ全体を置き換える
    ///
    /// # Returns
    /// 動画URI（例: "/videos/123456789"）。URIが得られた場合のみ status は 200。
    pub async fn upload_video(
        &self,
        file_path: impl AsRef<Path>,
        name: Option<&str>,
        description: Option<&str>,
        settings: Option<Value>,
    ) -> Result<ApiResponse<Option<String>>> {
        let uploader = self.uploader("upload_video")?;
        let body = settings::resolve(settings, || settings::upload_defaults(name, description));

        let uri = uploader.upload_video(file_path.as_ref(), body).await?;
        let uri = Some(uri).filter(|uri| !uri.is_empty());
        let status = uri.as_ref().map(|_| 200);

        Ok(ApiResponse::new(uri, status))
    }

    /// 既存の動画にサムネイル画像をアップロードして有効化
    ///
    /// `source` が "http" で始まる場合は一時ファイルにダウンロードしてからアップロードする。
    /// 一時ファイルはアップロードの成否にかかわらず削除される。
    pub async fn upload_picture(
        &self,
        video_uri: &str,
        source: &str,
    ) -> Result<ApiResponse<PictureUpload>> {
        let uploader = self.uploader("upload_picture")?;

        let downloaded = if source.starts_with("http") {
            Some(self.download_to_temp(source).await?)
        } else {
            None
        };
        let file_path = downloaded
            .as_ref()
            .map(|file| file.path().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(source));

        let result = uploader.upload_picture(video_uri, &file_path, true).await;
        drop(downloaded);

        Ok(ApiResponse::new(result?, Some(200)))
    }

    /// 動画レコードを取得
    ///
    /// キャッシュはせず、毎回 `GET /videos/{id}` を送信する。
    pub async fn get_video(&self, video_uri: &str) -> Result<ApiResponse<Value>> {
        let endpoint = format!("/videos/{}", trailing_id(video_uri));
        let response = self.api.get(&endpoint).await?;

        Self::json_response(response, &endpoint).await
    }

    /// 動画の状態、再生可否、URL、再生時間、幅、高さを取得
    ///
    /// # Errors
    /// レコードに必要なフィールドが無い場合は InfraError::Decode を返します。
    pub async fn get_common_video_information(
        &self,
        video_uri: &str,
    ) -> Result<ApiResponse<CommonVideoInformation>> {
        let video = self.get_video(video_uri).await?;

        let record: VideoRecord = serde_json::from_value(video.value)
            .map_err(|e| InfraError::decode(video_uri, e))?;

        Ok(ApiResponse::new(record.into(), video.status))
    }

    /// コンテンツレーティングを変更
    ///
    /// `rating` は violence, drugs, language, nudity, advertisement, safe, unrated のいずれか。
    /// それ以外はリクエストを送らずに DomainError::UnsupportedContentRating を返す。
    pub async fn change_video_content_rating(
        &self,
        video_uri: &str,
        rating: &str,
    ) -> Result<ApiResponse<Value>> {
        let rating: ContentRating = rating.parse()?;

        let endpoint = format!("/videos/{}", trailing_id(video_uri));
        let body = json!({ "content_rating": [rating.as_str()] });
        let response = self.api.patch(&endpoint, &body).await?;

        Self::json_response(response, &endpoint).await
    }

    /// URLの動画をVimeo側に取り込ませる（pullアップロード）
    ///
    /// `file_size` を省略した場合のみ HEAD リクエストで Content-Length を調べる。
    /// ヘッダーが無い、または数値でない場合はサイズ 0 として送る。
    ///
    /// # Returns
    /// 作成された動画URI。レスポンスに "uri" が無ければ None。
    pub async fn pull_video_from_url(
        &self,
        download_url: &str,
        name: &str,
        folder_uri: Option<&str>,
        file_size: Option<u64>,
        settings: Option<Value>,
        logo_link: Option<&str>,
    ) -> Result<ApiResponse<Option<String>>> {
        let size = match file_size {
            Some(size) => size,
            None => self.remote_content_length(download_url).await?,
        };

        let body = settings::resolve(settings, || {
            settings::pull_defaults(name, download_url, size, folder_uri, logo_link)
        });

        let endpoint = "/me/videos";
        let response = self.api.post(endpoint, &body).await?;

        Self::uri_response(response, endpoint).await
    }

    /// 動画タイトルを変更
    pub async fn update_video_title(&self, video_uri: &str, title: &str) -> Result<ApiResponse<()>> {
        let response = self.api.patch(video_uri, &json!({ "name": title })).await?;
        Ok(Self::status_response(&response))
    }

    /// 動画を削除
    pub async fn delete_video(&self, video_uri: &str) -> Result<ApiResponse<()>> {
        let response = self.api.delete(video_uri).await?;
        Ok(Self::status_response(&response))
    }

    /// フォルダ（プロジェクト）を作成
    ///
    /// アカウントIDが未設定の場合はリクエストを送らずに DomainError::MissingAccountId を返す。
    ///
    /// # Returns
    /// フォルダURI（例: "/users/123456789/projects/90210"）
    pub async fn create_folder(&self, folder_name: &str) -> Result<ApiResponse<Option<String>>> {
        let account_id = self
            .config
            .account_id
            .ok_or_else(|| DomainError::missing_account_id("create_folder"))?;

        let endpoint = format!("/users/{}/projects", account_id);
        let response = self
            .api
            .post(&endpoint, &json!({ "name": folder_name }))
            .await?;

        Self::uri_response(response, &endpoint).await
    }

    /// フォルダ名を変更し、渡されたフォルダURIをそのまま返す
    pub async fn update_folder_name(
        &self,
        folder_uri: &str,
        new_folder_name: &str,
    ) -> Result<ApiResponse<String>> {
        let response = self
            .api
            .patch(folder_uri, &json!({ "name": new_folder_name }))
            .await?;

        Ok(Self::status_response(&response).map(|_| folder_uri.to_string()))
    }

    /// フォルダを削除し、渡されたフォルダURIをそのまま返す
    ///
    /// `delete_all_videos_in_folder` が true の場合はフォルダ内の動画も削除される。
    pub async fn delete_folder(
        &self,
        folder_uri: &str,
        delete_all_videos_in_folder: bool,
    ) -> Result<ApiResponse<String>> {
        let body = json!({ "should_delete_clips": delete_all_videos_in_folder });
        let response = self.api.delete_with_body(folder_uri, &body).await?;

        Ok(Self::status_response(&response).map(|_| folder_uri.to_string()))
    }

    /// 動画をフォルダから外す（動画自体は削除しない）
    pub async fn remove_video_from_folder(
        &self,
        folder_uri: &str,
        video_uri: &str,
    ) -> Result<ApiResponse<String>> {
        let endpoint = format!("{}/videos/{}", folder_uri, trailing_id(video_uri));
        let response = self.api.delete(&endpoint).await?;

        Ok(Self::status_response(&response).map(|_| folder_uri.to_string()))
    }

    /// 動画をフォルダに追加
    pub async fn add_video_to_folder(
        &self,
        folder_uri: &str,
        video_uri: &str,
    ) -> Result<ApiResponse<()>> {
        let endpoint = format!("{}/videos/{}", folder_uri, trailing_id(video_uri));
        let response = self.api.put(&endpoint).await?;

        Ok(Self::status_response(&response))
    }

    /// 動画にタグを付ける
    pub async fn tag_video(&self, video_uri: &str, tag: &str) -> Result<ApiResponse<()>> {
        let endpoint = format!("/videos/{}/tags/{}", trailing_id(video_uri), tag);
        let response = self.api.put(&endpoint).await?;

        Ok(Self::status_response(&response))
    }

    /// 動画からタグを外す
    pub async fn remove_tag_from_video(
        &self,
        video_uri: &str,
        tag: &str,
    ) -> Result<ApiResponse<()>> {
        let endpoint = format!("/videos/{}/tags/{}", trailing_id(video_uri), tag);
        let response = self.api.delete(&endpoint).await?;

        Ok(Self::status_response(&response))
    }

    /// 埋め込みを許可するドメインを追加
    ///
    /// # Arguments
    /// * `domain` - "example.com" や "localhost:8000" など
    pub async fn domain_whitelist_video(
        &self,
        video_uri: &str,
        domain: &str,
    ) -> Result<ApiResponse<()>> {
        let endpoint = format!(
            "/videos/{}/privacy/domains/{}",
            trailing_id(video_uri),
            domain
        );
        let response = self.api.put(&endpoint).await?;

        Ok(Self::status_response(&response))
    }

    /// 限定公開動画の埋め込みハッシュ（`?h=` の値）を取得
    ///
    /// 埋め込みHTMLが無い・壊れている・`h` が無い場合はエラーにせず None を返す。
    pub async fn get_video_hash(&self, video_uri: &str) -> Result<ApiResponse<Option<String>>> {
        let video = self.get_video(video_uri).await?;

        let hash = extract_video_hash(&video.value);
        if hash.is_none() {
            debug!(video_uri, "no embed hash found");
        }

        Ok(ApiResponse::new(hash, video.status))
    }

    /// 外部URLのContent-Lengthを取得（無ければ0）
    async fn remote_content_length(&self, url: &str) -> Result<u64> {
        let response = self.api.head_url(url, HeaderMap::new()).await?;

        let size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0);

        debug!(url, size, "detected remote file size");
        Ok(size)
    }

    /// 画像を一時ファイルにダウンロード
    ///
    /// 返り値をドロップすると一時ファイルは削除される。
    async fn download_to_temp(&self, url: &str) -> Result<NamedTempFile> {
        let suffix = remote_extension(url)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let file = tempfile::Builder::new()
            .prefix("vimeo-picture-")
            .suffix(&suffix)
            .tempfile()?;

        let response = self.api.download(url).await?;
        let response = ApiClient::check_response(response, url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| InfraError::network(format!("Failed to download {}: {}", url, e)))?;

        tokio::fs::write(file.path(), &bytes).await?;
        info!(url, size = bytes.len(), "downloaded picture");

        Ok(file)
    }

    fn status_response(response: &Response) -> ApiResponse<()> {
        ApiResponse::new((), Some(response.status().as_u16()))
    }

    async fn json_response(response: Response, endpoint: &str) -> Result<ApiResponse<Value>> {
        let status = Some(response.status().as_u16());
        let body = ApiClient::read_json(response, endpoint).await?;

        Ok(ApiResponse::new(body, status))
    }

    async fn uri_response(response: Response, endpoint: &str) -> Result<ApiResponse<Option<String>>> {
        let body = Self::json_response(response, endpoint).await?;

        Ok(body.map(|value| {
            value
                .get("uri")
                .and_then(Value::as_str)
                .map(str::to_string)
        }))
    }
}

/// URLのパス末尾から拡張子を取り出す
fn remote_extension(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let file_name = parsed.path_segments()?.next_back()?;
    let (_, ext) = file_name.rsplit_once('.')?;

    (!ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())).then(|| ext.to_string())
}
