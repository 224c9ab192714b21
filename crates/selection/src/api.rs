use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::config::SelectionConfig;
use crate::notify::Subscribers;
use crate::playback::manifest_url;

/// Commands accepted by the selection controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replaces the draft identifier with `text`, verbatim.
    SetDraft { text: String },
    /// Commits the current draft as the active identifier.
    ConfirmSelection,
    /// Dispatched by the upload surface once the backend created a video.
    ///
    /// Sets the active identifier directly; the draft is left untouched.
    ///
    /// # Example
    /// ```
    /// use selection::{Command, SelectionConfig, SelectionController};
    ///
    /// let mut controller = SelectionController::new(SelectionConfig::default());
    /// controller.handle_command(Command::VideoCreated {
    ///     video_id: "new-vid-42".to_owned(),
    /// });
    ///
    /// assert_eq!(controller.active_id(), "new-vid-42");
    /// assert_eq!(controller.draft(), "");
    /// ```
    VideoCreated { video_id: String },
}

/// Events emitted by the controller after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DraftChanged { draft: String },
    SelectionChanged(SelectionSnapshot),
}

/// Immutable view of the controller state consumed by presentation surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub draft: String,
    pub active_id: String,
    pub playback_url: String,
}

/// Single source of truth for which video is selected for playback.
///
/// Holds the draft identifier typed by the user and the active identifier used
/// to derive the manifest URL. No identifier is ever validated.
#[derive(Debug)]
pub struct SelectionController {
    base_endpoint: String,
    draft: String,
    active_id: String,
    subscribers: Subscribers<Event>,
}

impl SelectionController {
    /// Creates a controller with an empty draft and the configured default video active.
    pub fn new(config: SelectionConfig) -> Self {
        let SelectionConfig {
            base_endpoint,
            default_video_id,
        } = config;
        Self {
            base_endpoint,
            draft: String::new(),
            active_id: default_video_id,
            subscribers: Subscribers::default(),
        }
    }

    /// Applies one command, publishes the emitted events and returns them.
    pub fn handle_command(&mut self, command: Command) -> Vec<Event> {
        debug!(?command, "selection command");
        let events = match command {
            Command::SetDraft { text } => self.set_draft(text),
            Command::ConfirmSelection => self.confirm_selection(),
            Command::VideoCreated { video_id } => self.on_upload_complete(video_id),
        };
        self.subscribers.publish(&events);
        events
    }

    /// Registers a subscriber notified of every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        self.subscribers.subscribe()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Manifest URL for the active identifier, derived on every call.
    pub fn playback_url(&self) -> String {
        manifest_url(&self.base_endpoint, &self.active_id)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            draft: self.draft.clone(),
            active_id: self.active_id.clone(),
            playback_url: self.playback_url(),
        }
    }

    fn set_draft(&mut self, text: String) -> Vec<Event> {
        self.draft = text;
        vec![Event::DraftChanged {
            draft: self.draft.clone(),
        }]
    }

    fn confirm_selection(&mut self) -> Vec<Event> {
        self.active_id = self.draft.clone();
        info!(active_id = %self.active_id, "selection confirmed from draft");
        vec![Event::SelectionChanged(self.snapshot())]
    }

    fn on_upload_complete(&mut self, video_id: String) -> Vec<Event> {
        self.active_id = video_id;
        info!(active_id = %self.active_id, "selection set from completed upload");
        vec![Event::SelectionChanged(self.snapshot())]
    }
}
