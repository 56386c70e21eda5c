use crate::api::auth::masked_token;
use std::fmt;

/// クライアント設定
///
/// VideoHostClient の生成時に一度だけ渡され、以後は変更されない。
/// アクセストークン、クライアントID、シークレットは Vimeo Developer Dashboard で
/// アプリを作成すると発行されます。
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// APIアクセストークン
    pub access_token: String,

    /// クライアントID（アップロード時に必要）
    pub client_id: Option<String>,

    /// クライアントシークレット（アップロード時に必要）
    pub client_secret: Option<String>,

    /// 数値のアカウントID（フォルダ作成時に必要）
    pub account_id: Option<u64>,
}

impl ClientConfig {
    /// アクセストークンのみの設定を作成
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_id: None,
            client_secret: None,
            account_id: None,
        }
    }

    /// クライアントIDとシークレットを設定
    pub fn with_app_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// アカウントIDを設定
    pub fn with_account_id(mut self, account_id: u64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// アップロードに必要なクライアント認証情報が揃っているか
    pub fn has_upload_credentials(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }
}

// トークンとシークレットはログに出さない
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &masked_token(&self.access_token))
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_deref().map(masked_token),
            )
            .field("account_id", &self.account_id)
            .finish()
    }
}
