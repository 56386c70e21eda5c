/// 動画作成時のリクエストボディ
///
/// 呼び出し側が設定を渡した場合は、その値でボディ全体を置き換える（マージしない）。
/// 空のオブジェクトと null は「指定なし」として扱う。
use serde_json::{Value, json};

/// 呼び出し側の設定があればそれを、無ければ既定ボディを返す
pub fn resolve(settings: Option<Value>, default: impl FnOnce() -> Value) -> Value {
    match settings {
        Some(value) if !is_blank(&value) => value,
        _ => default(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// アップロード時の既定ボディ
pub fn upload_defaults(name: Option<&str>, description: Option<&str>) -> Value {
    json!({
        "name": name,
        "description": description,
        "content_rating": ["safe"],
        "privacy": {
            "download": false,
            "embed": "whitelist",
            "comments": "nobody",
            "view": "disable",
        },
        "review_page": {
            "active": false,
        },
    })
}

/// URLからの取り込み（pull）時の既定ボディ
pub fn pull_defaults(
    name: &str,
    download_url: &str,
    size: u64,
    folder_uri: Option<&str>,
    logo_link: Option<&str>,
) -> Value {
    let logo_link = logo_link.filter(|link| !link.is_empty());
    let folder_uri = folder_uri.filter(|uri| !uri.is_empty());

    json!({
        "name": name,
        "description": "",
        "upload": {
            "approach": "pull",
            "size": size,
            "link": download_url,
        },
        "content_rating": ["safe"],
        "privacy": {
            "download": false,
            "embed": "whitelist",
            "comments": "nobody",
            "view": "disable",
        },
        "review_page": {
            "active": false,
        },
        "embed": {
            "buttons": {
                "embed": false,
                "fullscreen": true,
                "hd": true,
                "share": false,
                "watchlater": false,
            },
            "color": "#feeff0",
            "logos": {
                "custom": {
                    "active": true,
                    "link": logo_link,
                    "sticky": true,
                },
                "vimeo": false,
            },
            "playbar": true,
            "title": {
                "name": "hide",
                "owner": "hide",
                "portrait": "hide",
            },
            "volume": true,
        },
        "folder_uri": folder_uri,
    })
}
