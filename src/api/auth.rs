/// 認証ヘッダー
///
/// Vimeo API の Bearer 認証を管理します。
/// アクセストークンから全リクエスト共通のヘッダーを一度だけ生成します。
use crate::api::error::InfraError;
use crate::config::APP_CONFIG;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

/// 全APIリクエストに付与する固定ヘッダー
///
/// {Authorization, Content-Type, Accept} の3つ。生成後は変更されない。
#[derive(Debug, Clone)]
pub struct RequestHeaders {
    headers: HeaderMap,
}

impl RequestHeaders {
    /// アクセストークンからヘッダーを生成
    ///
    /// # Errors
    /// トークンにヘッダー値として使えない文字が含まれる場合に
    /// InfraError::InvalidHeader を返します。
    pub fn from_token(access_token: &str) -> Result<Self, InfraError> {
        let mut headers = HeaderMap::new();

        let mut authorization = HeaderValue::from_str(&format!("bearer {}", access_token))
            .map_err(|_| InfraError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            })?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let accept = HeaderValue::from_str(&APP_CONFIG.api.accept_header()).map_err(|_| {
            InfraError::InvalidHeader {
                name: ACCEPT.to_string(),
            }
        })?;
        headers.insert(ACCEPT, accept);

        Ok(Self { headers })
    }

    /// 生成済みのヘッダーマップ
    pub fn as_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// リクエストにヘッダーを付与
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.headers(self.headers.clone())
    }
}

/// トークンをマスキングして表示
///
/// 9文字以上なら先頭4文字と末尾4文字だけを残す。
pub fn masked_token(access_token: &str) -> String {
    let len = access_token.chars().count();
    if len <= 8 {
        "*".repeat(len)
    } else {
        let head: String = access_token.chars().take(4).collect();
        let tail: String = access_token.chars().skip(len - 4).collect();
        format!("{}***{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers() {
        let headers = RequestHeaders::from_token("my_token").unwrap();
        let map = headers.as_map();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(AUTHORIZATION).unwrap(), "bearer my_token");
        assert_eq!(map.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(
            map.get(ACCEPT).unwrap(),
            "application/vnd.vimeo.*+json;version=3.4"
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = RequestHeaders::from_token("bad\ntoken");
        assert!(matches!(result, Err(InfraError::InvalidHeader { .. })));
    }

    #[test]
    fn test_token_masking() {
        let masked = masked_token("abcdef123456789");
        assert_eq!(masked, "abcd***6789");
        assert!(!masked.contains("ef12345"));
    }

    #[test]
    fn test_short_token_masking() {
        assert_eq!(masked_token("short"), "*****");
    }
}
