/// tusプロトコルによるアップロード
///
/// 1. `POST /me/videos` に `upload: {approach: "tus", size}` を付けて動画を作成
/// 2. 返された `upload.upload_link` へ PATCH でチャンクを送信
/// 3. サーバーが返す `Upload-Offset` がファイルサイズに達するまで繰り返す
///
/// チャンクが拒否された場合は HEAD で現在のオフセットを取り直して再開する。
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::types::PictureUpload;
use crate::config::APP_CONFIG;
use crate::domain::validator::validate_upload_file;
use crate::error::Result;
use crate::sdk::UploadSdk;
use reqwest::Response;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value, json};
use std::io::SeekFrom;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{info, warn};

const TUS_RESUMABLE: &str = "tus-resumable";
const UPLOAD_OFFSET: &str = "upload-offset";

const CREATE_VIDEO_ENDPOINT: &str = "/me/videos";

/// tusアップローダー
#[derive(Debug, Clone)]
pub struct TusUploader {
    api: ApiClient,
    chunk_size: u64,
    max_resume_attempts: u32,
}

impl TusUploader {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            chunk_size: APP_CONFIG.upload.chunk_size,
            max_resume_attempts: APP_CONFIG.upload.max_resume_attempts,
        }
    }

    /// チャンクサイズを変更（0は1として扱う）
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_max_resume_attempts(mut self, attempts: u32) -> Self {
        self.max_resume_attempts = attempts;
        self
    }

    /// 動画を作成し、(動画URI, アップロード先URL) を返す
    async fn create_video(&self, body: Value, size: u64) -> Result<(String, String)> {
        let mut body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.insert(
            "upload".to_string(),
            json!({"approach": "tus", "size": size}),
        );

        let response = self.api.post(CREATE_VIDEO_ENDPOINT, &body).await?;
        let response = ApiClient::check_response(response, CREATE_VIDEO_ENDPOINT).await?;
        let created = ApiClient::read_json(response, CREATE_VIDEO_ENDPOINT).await?;

        let uri = created
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| InfraError::missing_field(CREATE_VIDEO_ENDPOINT, "uri"))?;
        let upload_link = created
            .get("upload")
            .and_then(|upload| upload.get("upload_link"))
            .and_then(Value::as_str)
            .ok_or_else(|| InfraError::missing_field(CREATE_VIDEO_ENDPOINT, "upload.upload_link"))?;

        Ok((uri.to_string(), upload_link.to_string()))
    }

    /// ファイル全体をチャンクに分けて送信
    async fn send_chunks(&self, upload_link: &str, file_path: &Path, size: u64) -> Result<()> {
        let mut file = tokio::fs::File::open(file_path).await?;
        let mut offset = 0u64;
        let mut failures = 0u32;

        while offset < size {
            let chunk_len = self.chunk_size.min(size - offset);
            file.seek(SeekFrom::Start(offset)).await?;
            let mut chunk = vec![0u8; chunk_len as usize];
            file.read_exact(&mut chunk).await?;

            let response = self
                .api
                .patch_bytes(upload_link, chunk, patch_headers(offset))
                .await?;
            let status = response.status();

            if status.is_success() {
                let next = parse_offset(&response).unwrap_or(offset + chunk_len);
                if next > offset {
                    offset = next;
                    failures = 0;
                    continue;
                }
            }

            failures += 1;
            if failures > self.max_resume_attempts {
                return Err(InfraError::api(
                    upload_link,
                    format!("upload stalled at offset {} of {}", offset, size),
                    Some(status.as_u16()),
                )
                .into());
            }

            warn!(
                offset,
                status = status.as_u16(),
                attempt = failures,
                "chunk rejected, resuming from server offset"
            );
            offset = self.server_offset(upload_link).await?;
        }

        Ok(())
    }

    /// サーバー側で受信済みのオフセットを取得
    async fn server_offset(&self, upload_link: &str) -> Result<u64> {
        let mut headers = HeaderMap::new();
        headers.insert(
            TUS_RESUMABLE,
            HeaderValue::from_static(APP_CONFIG.upload.tus_version),
        );

        let response = self.api.head_url(upload_link, headers).await?;
        let response = ApiClient::check_response(response, upload_link).await?;

        parse_offset(&response)
            .ok_or_else(|| InfraError::missing_field(upload_link, "Upload-Offset").into())
    }
}

impl UploadSdk for TusUploader {
    async fn upload_video(&self, file_path: &Path, body: Value) -> Result<String> {
        let file = validate_upload_file(file_path)?;

        let (uri, upload_link) = self.create_video(body, file.size).await?;
        self.send_chunks(&upload_link, file_path, file.size).await?;

        info!(uri = %uri, path = %file.path, size = file.size, "video uploaded");
        Ok(uri)
    }

    async fn upload_picture(
        &self,
        video_uri: &str,
        file_path: &Path,
        activate: bool,
    ) -> Result<PictureUpload> {
        validate_upload_file(file_path)?;

        let endpoint = format!("{}/pictures", video_uri);
        let response = self.api.post(&endpoint, &json!({})).await?;
        let response = ApiClient::check_response(response, &endpoint).await?;
        let created = ApiClient::read_json(response, &endpoint).await?;
        let mut picture: PictureUpload =
            serde_json::from_value(created).map_err(|e| InfraError::decode(&endpoint, e))?;

        let bytes = tokio::fs::read(file_path).await?;
        let response = self
            .api
            .put_bytes(&picture.link, bytes, picture_content_type(file_path))
            .await?;
        ApiClient::check_response(response, &picture.link).await?;

        if activate {
            let response = self
                .api
                .patch(&picture.uri, &json!({"active": true}))
                .await?;
            ApiClient::check_response(response, &picture.uri).await?;
            picture.active = true;
        }

        info!(uri = %picture.uri, active = picture.active, "picture uploaded");
        Ok(picture)
    }
}

fn patch_headers(offset: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        TUS_RESUMABLE,
        HeaderValue::from_static(APP_CONFIG.upload.tus_version),
    );
    headers.insert(UPLOAD_OFFSET, HeaderValue::from(offset));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/offset+octet-stream"),
    );
    headers
}

fn parse_offset(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(UPLOAD_OFFSET)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn picture_content_type(file_path: &Path) -> &'static str {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::RequestHeaders;
    use crate::error::Error;
    use std::io::Write;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn uploader(server: &MockServer) -> TusUploader {
        let headers = RequestHeaders::from_token("test_token").unwrap();
        TusUploader::new(ApiClient::new(server.uri(), headers).unwrap())
    }

    fn video_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    async fn mount_create(server: &MockServer, size: u64) {
        Mock::given(method("POST"))
            .and(path("/me/videos"))
            .and(body_partial_json(json!({
                "name": "Demo",
                "upload": {"approach": "tus", "size": size}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uri": "/videos/42",
                "upload": {"upload_link": format!("{}/tus/42", server.uri())}
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn accepted(offset: u64) -> ResponseTemplate {
        ResponseTemplate::new(204).insert_header("Upload-Offset", offset.to_string().as_str())
    }

    #[tokio::test]
    async fn test_upload_in_chunks() {
        let server = MockServer::start().await;
        mount_create(&server, 10).await;

        for (sent, next) in [(0u64, 4u64), (4, 8), (8, 10)] {
            Mock::given(method("PATCH"))
                .and(path("/tus/42"))
                .and(header("Tus-Resumable", "1.0.0"))
                .and(header("Upload-Offset", sent.to_string().as_str()))
                .and(header("Content-Type", "application/offset+octet-stream"))
                .respond_with(accepted(next))
                .expect(1)
                .mount(&server)
                .await;
        }

        let file = video_file(b"0123456789");
        let uri = uploader(&server)
            .with_chunk_size(4)
            .upload_video(file.path(), json!({"name": "Demo"}))
            .await
            .unwrap();

        assert_eq!(uri, "/videos/42");
    }

    #[tokio::test]
    async fn test_resume_after_rejected_chunk() {
        let server = MockServer::start().await;
        mount_create(&server, 6).await;

        Mock::given(method("PATCH"))
            .and(header("Upload-Offset", "0"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/tus/42"))
            .respond_with(ResponseTemplate::new(200).insert_header("Upload-Offset", "3"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(header("Upload-Offset", "3"))
            .respond_with(accepted(6))
            .expect(1)
            .mount(&server)
            .await;

        let file = video_file(b"abcdef");
        let uri = uploader(&server)
            .upload_video(file.path(), json!({"name": "Demo"}))
            .await
            .unwrap();

        assert_eq!(uri, "/videos/42");
    }

    #[tokio::test]
    async fn test_gives_up_after_resume_attempts() {
        let server = MockServer::start().await;
        mount_create(&server, 4).await;

        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).insert_header("Upload-Offset", "0"))
            .mount(&server)
            .await;

        let file = video_file(b"abcd");
        let result = uploader(&server)
            .with_max_resume_attempts(2)
            .upload_video(file.path(), json!({"name": "Demo"}))
            .await;

        assert!(matches!(
            result,
            Err(Error::Infra(InfraError::Api {
                status_code: Some(500),
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_empty_file_rejected_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let file = video_file(b"");
        let result = uploader(&server)
            .upload_video(file.path(), json!({"name": "Demo"}))
            .await;

        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[tokio::test]
    async fn test_upload_picture_and_activate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos/42/pictures"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uri": "/videos/42/pictures/7",
                "link": format!("{}/upload/7", server.uri()),
                "active": false
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/upload/7"))
            .and(header("Content-Type", "image/png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/videos/42/pictures/7"))
            .and(body_partial_json(json!({"active": true})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        image.write_all(b"\x89PNG").unwrap();

        let picture = uploader(&server)
            .upload_picture("/videos/42", image.path(), true)
            .await
            .unwrap();

        assert_eq!(picture.uri, "/videos/42/pictures/7");
        assert!(picture.active);
    }

    #[test]
    fn test_picture_content_type() {
        assert_eq!(picture_content_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(picture_content_type(Path::new("a.png")), "image/png");
        assert_eq!(
            picture_content_type(Path::new("a")),
            "application/octet-stream"
        );
    }
}
