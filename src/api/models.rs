use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One playable entry of the catalog, as served by the backend.
///
/// `size` and `mtime` are opaque cache-busting tokens; they are only ever
/// rendered back into the cover URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    pub url: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub mtime: Option<Value>,
}

impl Track {
    /// Title, then path, then a synthesized `Track N` (1-based).
    pub fn display_name(&self, index: usize) -> String {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.path.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Track {}", index + 1))
    }

    pub fn ext_label(&self) -> String {
        match non_empty(self.ext.as_deref()) {
            Some(ext) => format!(".{ext}"),
            None => String::new(),
        }
    }

    pub fn cache_token(&self) -> String {
        format!(
            "{}-{}",
            token_part(self.size.as_ref()),
            token_part(self.mtime.as_ref())
        )
    }

    /// Cover URL with the cache-busting query appended, if the track has one.
    pub fn cover_url(&self) -> Option<String> {
        let cover = non_empty(self.cover.as_deref())?;
        Some(format!(
            "{cover}?v={}",
            urlencoding::encode(&self.cache_token())
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// Falsy scalars render as "0".
fn token_part(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => number.to_string(),
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => "0".to_string(),
    }
}

/// Body of the catalog endpoint. Extra fields such as `count` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct SongsResponse {
    #[serde(default)]
    pub songs: Option<Vec<Track>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(value: Value) -> Track {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn display_name_falls_back_from_title_to_path_to_index() {
        let full = track(json!({"url": "/a.mp3", "title": "Intro", "path": "x/a.mp3"}));
        assert_eq!(full.display_name(0), "Intro");

        let path_only = track(json!({"url": "/a.mp3", "title": "", "path": "x/a.mp3"}));
        assert_eq!(path_only.display_name(0), "x/a.mp3");

        let bare = track(json!({"url": "/a.mp3"}));
        assert_eq!(bare.display_name(2), "Track 3");
    }

    #[test]
    fn ext_label_is_dotted_or_empty() {
        assert_eq!(track(json!({"url": "u", "ext": "flac"})).ext_label(), ".flac");
        assert_eq!(track(json!({"url": "u"})).ext_label(), "");
    }

    #[test]
    fn cover_url_carries_encoded_size_and_mtime() {
        let t = track(json!({
            "url": "/s/a.mp3",
            "cover": "/max_playerok/cover/a.mp3",
            "size": 1234,
            "mtime": 1700000000
        }));
        assert_eq!(
            t.cover_url().as_deref(),
            Some("/max_playerok/cover/a.mp3?v=1234-1700000000")
        );
    }

    #[test]
    fn cover_token_treats_missing_values_as_zero() {
        let t = track(json!({"url": "u", "cover": "/c", "size": null}));
        assert_eq!(t.cache_token(), "0-0");
        assert_eq!(t.cover_url().as_deref(), Some("/c?v=0-0"));
    }

    #[test]
    fn cover_token_is_percent_encoded() {
        let t = track(json!({"url": "u", "cover": "/c", "size": "a b", "mtime": 2}));
        assert_eq!(t.cover_url().as_deref(), Some("/c?v=a%20b-2"));
    }

    #[test]
    fn no_cover_means_no_cover_url() {
        assert_eq!(track(json!({"url": "u"})).cover_url(), None);
        assert_eq!(track(json!({"url": "u", "cover": ""})).cover_url(), None);
    }
}
