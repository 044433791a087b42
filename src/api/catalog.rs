use crate::api::models::{SongsResponse, Track};
#[cfg(target_arch = "wasm32")]
use crate::config::PlayerConfig;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("malformed track list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Ordered, immutable list of tracks. Row position is the track identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

/// Outcome of the single catalog load attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Empty,
    Failed(String),
}

pub fn check_status(status: u16) -> Result<(), CatalogError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(CatalogError::Status(status))
    }
}

pub fn parse_catalog(body: &str) -> Result<Vec<Track>, CatalogError> {
    let response: SongsResponse = serde_json::from_str(body)?;
    Ok(response.songs.unwrap_or_default())
}

/// Fetch the track list once. There is no retry.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_catalog(config: &PlayerConfig) -> Result<Vec<Track>, CatalogError> {
    let url = config.songs_endpoint.as_str();
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()));
    finish_fetch(url, status, body)
}

/// Status first, then the body read, then decoding.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn finish_fetch(
    url: &str,
    status: u16,
    body: Result<String, CatalogError>,
) -> Result<Vec<Track>, CatalogError> {
    let result = check_status(status)
        .and(body)
        .and_then(|body| parse_catalog(&body));
    match &result {
        Ok(tracks) => info!(url, count = tracks.len(), "catalog loaded"),
        Err(err) => warn!(url, %err, "catalog load failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_server_order() {
        let tracks = parse_catalog(
            r#"{"count": 2, "songs": [{"url": "/b.mp3", "title": "B"}, {"url": "/a.mp3", "title": "A"}]}"#,
        )
        .unwrap();
        let titles: Vec<_> = tracks.iter().map(|t| t.display_name(0)).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn missing_or_null_songs_field_is_an_empty_catalog() {
        assert!(parse_catalog("{}").unwrap().is_empty());
        assert!(parse_catalog(r#"{"songs": null}"#).unwrap().is_empty());
        assert!(parse_catalog(r#"{"songs": []}"#).unwrap().is_empty());
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(
            parse_catalog("<html>oops</html>"),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn non_success_status_is_rejected() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        assert!(matches!(check_status(404), Err(CatalogError::Status(404))));
        assert!(matches!(check_status(500), Err(CatalogError::Status(500))));
    }

    #[test]
    fn status_failure_wins_over_body() {
        let result = finish_fetch("/songs", 503, Ok(r#"{"songs": []}"#.to_string()));
        assert!(matches!(result, Err(CatalogError::Status(503))));
    }

    #[test]
    fn unreadable_body_surfaces_as_transport_error() {
        let result = finish_fetch(
            "/songs",
            200,
            Err(CatalogError::Transport("connection reset".to_string())),
        );
        match result {
            Err(err @ CatalogError::Transport(_)) => {
                assert_eq!(err.to_string(), "request failed: connection reset");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn status_failure_wins_over_unreadable_body() {
        let result = finish_fetch(
            "/songs",
            404,
            Err(CatalogError::Transport("connection reset".to_string())),
        );
        assert!(matches!(result, Err(CatalogError::Status(404))));
    }

    #[test]
    fn successful_status_decodes_the_body() {
        let tracks = finish_fetch(
            "/songs",
            200,
            Ok(r#"{"songs": [{"url": "/a.mp3", "title": "A"}]}"#.to_string()),
        )
        .unwrap();
        assert_eq!(tracks.len(), 1);

        let result = finish_fetch("/songs", 200, Ok("<html>oops</html>".to_string()));
        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[test]
    fn catalog_lookup_is_bounds_checked() {
        let catalog = Catalog::new(parse_catalog(r#"{"songs": [{"url": "/a.mp3"}]}"#).unwrap());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(0).is_some());
        assert!(catalog.get(1).is_none());
    }
}
