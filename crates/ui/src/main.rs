mod app;
mod bridge;
mod widgets;

use app::AppState;
use selection::SelectionConfig;
use tracing::warn;

fn main() -> iced::Result {
    init_tracing();
    let config = load_config();

    iced::application("Video Streaming App", AppState::update, AppState::view)
        .subscription(AppState::subscription)
        .run_with(move || AppState::boot(config))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// Reads the optional config path argument, then applies environment overrides.
///
/// An unreadable file falls back to the defaults; invalid overrides keep
/// whatever the previous stage produced.
fn load_config() -> SelectionConfig {
    let base = match std::env::args_os().nth(1) {
        Some(path) => SelectionConfig::load(&path).unwrap_or_else(|error| {
            warn!(%error, "config file unusable, using defaults");
            SelectionConfig::default()
        }),
        None => SelectionConfig::default(),
    };
    layer_overrides(base, |key| std::env::var(key).ok())
}

fn layer_overrides<F>(base: SelectionConfig, lookup: F) -> SelectionConfig
where
    F: Fn(&str) -> Option<String>,
{
    match base.clone().apply_overrides(lookup) {
        Ok(config) => config,
        Err(error) => {
            warn!(%error, "environment overrides ignored, keeping loaded config");
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use selection::SelectionConfig;
    use selection::config::{ENV_BASE_ENDPOINT, ENV_DEFAULT_VIDEO_ID};

    use super::layer_overrides;

    fn file_config() -> SelectionConfig {
        SelectionConfig::from_json_str(
            r#"{ "base_endpoint": "http://media.internal:9000", "default_video_id": "from-file" }"#,
        )
        .expect("file config")
    }

    #[test]
    fn invalid_endpoint_override_keeps_file_config() {
        let config = layer_overrides(file_config(), |key| match key {
            ENV_BASE_ENDPOINT => Some(String::from("http://")),
            ENV_DEFAULT_VIDEO_ID => Some(String::from("from-env")),
            _ => None,
        });

        assert_eq!(config.base_endpoint, "http://media.internal:9000");
        assert_eq!(config.default_video_id, "from-file");
    }

    #[test]
    fn valid_override_replaces_file_values() {
        let config = layer_overrides(file_config(), |key| {
            (key == ENV_BASE_ENDPOINT).then(|| String::from("https://cdn.example/"))
        });

        assert_eq!(config.base_endpoint, "https://cdn.example");
        assert_eq!(config.default_video_id, "from-file");
    }
}
