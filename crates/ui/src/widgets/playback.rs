use iced::widget::{column, container, text};
use iced::{Element, Length};
use selection::PlaybackSurface;
use tracing::debug;

/// Playback area fed with manifest URLs by the selection controller.
///
/// Streaming itself is left to the player behind this panel; the panel only
/// tracks what it was asked to play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackPanel {
    source: Option<String>,
    loads: u64,
}

impl PlaybackPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manifest URL currently loaded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Number of load requests received so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Renders the playback area.
    pub fn view<'a, Message>(&'a self) -> Element<'a, Message>
    where
        Message: 'a,
    {
        let body: Element<'a, Message> = match &self.source {
            Some(url) => column![
                text(url.as_str()).size(14),
                text(format!("Loads: {}", self.loads)).size(12),
            ]
            .spacing(6)
            .into(),
            None => text("No video selected").into(),
        };

        container(column![text("Playing Video").size(20), body].spacing(12))
            .padding(16)
            .width(Length::Fill)
            .into()
    }
}

impl PlaybackSurface for PlaybackPanel {
    fn load(&mut self, manifest_url: &str) {
        debug!(manifest_url, "playback source loaded");
        self.source = Some(manifest_url.to_owned());
        self.loads += 1;
    }
}

#[cfg(test)]
mod tests {
    use selection::PlaybackSurface;

    use super::PlaybackPanel;

    #[test]
    fn starts_without_source() {
        let panel = PlaybackPanel::new();

        assert_eq!(panel.source(), None);
        assert_eq!(panel.loads(), 0);
    }

    #[test]
    fn load_replaces_source_and_counts_reloads_of_same_url() {
        let mut panel = PlaybackPanel::new();

        panel.load("http://localhost:8080/api/v1/videos/a/master.m3u8");
        panel.load("http://localhost:8080/api/v1/videos/a/master.m3u8");

        assert_eq!(
            panel.source(),
            Some("http://localhost:8080/api/v1/videos/a/master.m3u8")
        );
        assert_eq!(panel.loads(), 2);
    }
}
