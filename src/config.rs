use serde::Deserialize;
use tracing::warn;

/// Runtime configuration for the player.
///
/// The page may embed a JSON object with any subset of these fields; anything
/// missing keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Catalog URL, resolved against the page origin.
    pub songs_endpoint: String,
    pub placeholder_cover: String,
    pub storage_namespace: String,
    pub seek_step_secs: f64,
    pub volume_step: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            songs_endpoint: "/max_playerok/api/songs".to_string(),
            placeholder_cover: "/max_playerok/static/cover.svg".to_string(),
            storage_namespace: "maxplayer".to_string(),
            seek_step_secs: 5.0,
            volume_step: 0.05,
        }
    }
}

impl PlayerConfig {
    pub fn from_json_or_default(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "ignoring malformed player config");
                Self::default()
            }
        }
    }

    pub fn storage_key(&self, field: &str) -> String {
        format!("{}.{}", self.storage_namespace, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let config = PlayerConfig::from_json_or_default(r#"{"seek_step_secs": 10}"#);
        assert_eq!(config.seek_step_secs, 10.0);
        assert_eq!(config.volume_step, 0.05);
        assert_eq!(config.storage_namespace, "maxplayer");
    }

    #[test]
    fn malformed_or_blank_config_falls_back_to_default() {
        assert_eq!(
            PlayerConfig::from_json_or_default("{not json"),
            PlayerConfig::default()
        );
        assert_eq!(PlayerConfig::from_json_or_default("  "), PlayerConfig::default());
    }

    #[test]
    fn storage_keys_are_namespaced() {
        let config = PlayerConfig::default();
        assert_eq!(config.storage_key("index"), "maxplayer.index");
    }

    #[test]
    fn endpoint_override_replaces_the_default_path() {
        let config =
            PlayerConfig::from_json_or_default(r#"{"songs_endpoint": "/music/api/songs"}"#);
        assert_eq!(config.songs_endpoint, "/music/api/songs");
        assert_eq!(config.placeholder_cover, "/max_playerok/static/cover.svg");
    }
}
