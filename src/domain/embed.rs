/// 埋め込みコードからの動画ハッシュ抽出
///
/// 限定公開(Unlisted)動画の埋め込みURLには `?h=` クエリが付く。
/// 動画レコードの `embed.html` を HTML として解析し、iframe の src からこの値を取り出す。
use select::document::Document;
use select::predicate::Name;
use serde_json::Value;
use url::Url;

/// プロトコル相対・パス相対の src を解決するための基準URL
const PLAYER_BASE: &str = "https://player.vimeo.com/";

/// 動画レコードからハッシュを取り出す
///
/// フィールド欠落、iframe 無し、src 無し、URL不正、`h` 無しのいずれでも None。
pub fn extract_video_hash(video: &Value) -> Option<String> {
    let html = video.get("embed")?.get("html")?.as_str()?;
    hash_from_embed_html(html)
}

/// 埋め込みHTMLから `h` クエリを取り出す
pub fn hash_from_embed_html(html: &str) -> Option<String> {
    let document = Document::from(html);
    let iframe = document.find(Name("iframe")).next()?;
    let src = iframe.attr("src")?.replace("&amp;", "&");

    let url = Url::parse(PLAYER_BASE).ok()?.join(&src).ok()?;

    url.query_pairs()
        .find(|(key, value)| key == "h" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EMBED: &str = r#"<iframe src="https://player.vimeo.com/video/42?h=d1c2b3a4&amp;badge=0&amp;autopause=0" width="1920" height="1080" frameborder="0" allowfullscreen title="Demo"></iframe>"#;

    #[test]
    fn test_extract_hash() {
        let video = json!({"embed": {"html": EMBED}});
        assert_eq!(extract_video_hash(&video).as_deref(), Some("d1c2b3a4"));
    }

    #[test]
    fn test_hash_not_first_param() {
        let html = r#"<iframe src="https://player.vimeo.com/video/42?badge=0&amp;h=abc"></iframe>"#;
        assert_eq!(hash_from_embed_html(html).as_deref(), Some("abc"));
    }

    #[test]
    fn test_protocol_relative_src() {
        let html = r#"<iframe src="//player.vimeo.com/video/42?h=abc"></iframe>"#;
        assert_eq!(hash_from_embed_html(html).as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(extract_video_hash(&json!({})), None);
        assert_eq!(extract_video_hash(&json!({"embed": {}})), None);
        assert_eq!(extract_video_hash(&json!({"embed": {"html": null}})), None);
        assert_eq!(extract_video_hash(&json!({"embed": {"html": 5}})), None);
        assert_eq!(extract_video_hash(&Value::Null), None);
    }

    #[test]
    fn test_malformed_html() {
        assert_eq!(hash_from_embed_html(""), None);
        assert_eq!(hash_from_embed_html("<div><iframe"), None);
        assert_eq!(hash_from_embed_html("<<<>>>"), None);
        assert_eq!(hash_from_embed_html("<div>no player</div>"), None);
    }

    #[test]
    fn test_iframe_without_src_or_hash() {
        assert_eq!(hash_from_embed_html("<iframe></iframe>"), None);
        assert_eq!(
            hash_from_embed_html(r#"<iframe src="https://player.vimeo.com/video/42?badge=0"></iframe>"#),
            None
        );
        assert_eq!(
            hash_from_embed_html(r#"<iframe src="https://player.vimeo.com/video/42?h="></iframe>"#),
            None
        );
    }
}
