/// HTTPクライアント
///
/// Vimeo API との通信を担当するHTTPクライアント。
/// タイムアウト、エラーハンドリング、共通ヘッダーの付与を含みます。
use crate::api::auth::RequestHeaders;
use crate::api::error::InfraError;
use crate::config::APP_CONFIG;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
///
/// `reqwest::Client` は内部で Arc を共有するため、clone は安価です。
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    headers: RequestHeaders,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - APIのベースURL（例: "https://api.vimeo.com"）
    /// * `headers` - 全APIリクエストに付与する共通ヘッダー
    pub fn new(base_url: impl Into<String>, headers: RequestHeaders) -> ApiResult<Self> {
        let timeout = Duration::from_secs(APP_CONFIG.api.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/videos/123456789"）
    pub async fn get(&self, endpoint: &str) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.get(&url));

        Self::send_with_error_handling(request, endpoint, "GET").await
    }

    /// POSTリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/me/videos"）
    /// * `body` - リクエストボディ（JSON）
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.post(&url).json(body));

        Self::send_with_error_handling(request, endpoint, "POST").await
    }

    /// PATCHリクエストを送信
    pub async fn patch<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.patch(&url).json(body));

        Self::send_with_error_handling(request, endpoint, "PATCH").await
    }

    /// ボディなしのPUTリクエストを送信
    pub async fn put(&self, endpoint: &str) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.put(&url));

        Self::send_with_error_handling(request, endpoint, "PUT").await
    }

    /// DELETEリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/videos/123456789"）
    pub async fn delete(&self, endpoint: &str) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.delete(&url));

        Self::send_with_error_handling(request, endpoint, "DELETE").await
    }

    /// JSONボディ付きのDELETEリクエストを送信
    pub async fn delete_with_body<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.headers.apply(self.client.delete(&url).json(body));

        Self::send_with_error_handling(request, endpoint, "DELETE").await
    }

    /// 外部URLへのHEADリクエスト（共通ヘッダーなし、リダイレクト追従）
    ///
    /// # Arguments
    /// * `url` - 完全なURL
    /// * `extra_headers` - 追加で付与するヘッダー
    pub async fn head_url(&self, url: &str, extra_headers: HeaderMap) -> ApiResult<Response> {
        let request = self.client.head(url).headers(extra_headers);

        Self::send_with_error_handling(request, url, "HEAD").await
    }

    /// 外部URLからのダウンロード（共通ヘッダーなし）
    pub async fn download(&self, url: &str) -> ApiResult<Response> {
        let request = self.client.get(url);

        Self::send_with_error_handling(request, url, "GET").await
    }

    /// PUTリクエストを送信（ファイルアップロード用）
    ///
    /// # Arguments
    /// * `url` - 完全なURL（Vimeoが発行したアップロード先）
    /// * `body` - アップロードするデータ（バイト列）
    /// * `content_type` - Content-Typeヘッダー
    pub async fn put_bytes(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<Response> {
        let request = self
            .client
            .put(url)
            .header("Content-Type", content_type)
            .body(body);

        Self::send_with_error_handling(request, url, "PUT").await
    }

    /// PATCHリクエストでバイト列を送信（tusのチャンク送信用）
    pub async fn patch_bytes(
        &self,
        url: &str,
        body: Vec<u8>,
        extra_headers: HeaderMap,
    ) -> ApiResult<Response> {
        let request = self.client.patch(url).headers(extra_headers).body(body);

        Self::send_with_error_handling(request, url, "PATCH").await
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// リクエストを送信し、エラーハンドリングを行う
    async fn send_with_error_handling(
        request: reqwest::RequestBuilder,
        endpoint: &str,
        method: &str,
    ) -> ApiResult<Response> {
        debug!(method, endpoint, "sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(format!("{} {}", method, endpoint))
            } else if e.is_connect() {
                InfraError::network(format!(
                    "Connection failed for {} {}: {}",
                    method, endpoint, e
                ))
            } else {
                InfraError::network(format!(
                    "Request failed for {} {}: {}",
                    method, endpoint, e
                ))
            }
        })?;

        debug!(
            method,
            endpoint,
            status = response.status().as_u16(),
            "received response"
        );

        Ok(response)
    }

    /// レスポンスをチェックしてエラーを返す
    ///
    /// # Arguments
    /// * `response` - HTTPレスポンス
    /// * `endpoint` - エンドポイント名（エラーメッセージ用）
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(InfraError::api(endpoint, error_body, Some(status_code)))
    }

    /// JSONレスポンスをデシリアライズ
    ///
    /// ボディが空（204 No Content など）の場合は `Value::Null` を返します。
    pub async fn read_json(response: Response, endpoint: &str) -> ApiResult<Value> {
        let body = response.text().await.map_err(|e| {
            InfraError::network(format!("Failed to read response body: {}", e))
        })?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| InfraError::decode(endpoint, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn headers() -> RequestHeaders {
        RequestHeaders::from_token("test_token").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://api.vimeo.com/", headers()).unwrap();
        assert_eq!(client.base_url(), "https://api.vimeo.com");
    }

    #[tokio::test]
    async fn test_common_headers_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/1"))
            .and(header("Authorization", "bearer test_token"))
            .and(header("Accept", "application/vnd.vimeo.*+json;version=3.4"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), headers()).unwrap();
        let response = client.get("/videos/1").await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_read_json_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), headers()).unwrap();
        let response = client.patch("/videos/1", &serde_json::json!({})).await.unwrap();
        let body = ApiClient::read_json(response, "/videos/1").await.unwrap();
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_read_json_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), headers()).unwrap();
        let response = client.get("/videos/1").await.unwrap();
        let result = ApiClient::read_json(response, "/videos/1").await;
        assert!(matches!(result, Err(InfraError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_check_response_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), headers()).unwrap();
        let response = client.get("/videos/1").await.unwrap();
        let result = ApiClient::check_response(response, "/videos/1").await;

        match result {
            Err(InfraError::Api {
                status_code,
                message,
                ..
            }) => {
                assert_eq!(status_code, Some(404));
                assert_eq!(message, "not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let client = ApiClient::new("http://127.0.0.1:1", headers()).unwrap();
        let result = client.get("/videos/1").await;
        assert!(matches!(result, Err(InfraError::Network { .. })));
    }
}
