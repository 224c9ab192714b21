use std::sync::mpsc::TrySendError;

use iced::widget::{button, column, row, text, text_input};
use iced::{Alignment, Element, Length, Subscription, Task};
use selection::{
    Command, Event, PlaybackSurface, SelectionConfig, SelectionController, UploadRequest,
};

use crate::bridge::{UploadEvent, UploadJobSender, upload_subscription};
use crate::widgets::playback::PlaybackPanel;
use crate::widgets::upload::{UploadForm, UploadFormMessage};

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    DraftChanged(String),
    PlayPressed,
    UploadForm(UploadFormMessage),
    Upload(UploadEvent),
}

/// Root UI state: the selection controller plus its three surfaces.
pub struct AppState {
    controller: SelectionController,
    upload_url: String,
    playback: PlaybackPanel,
    upload_form: UploadForm,
    upload_tx: Option<UploadJobSender>,
    status: String,
}

impl AppState {
    /// Boots the app and starts playback of the configured default video.
    pub fn boot(config: SelectionConfig) -> (Self, Task<Message>) {
        (Self::from_config(config, None), Task::none())
    }

    fn from_config(config: SelectionConfig, upload_tx: Option<UploadJobSender>) -> Self {
        let upload_url = config.videos_url();
        let controller = SelectionController::new(config);
        let mut playback = PlaybackPanel::new();
        playback.load(&controller.playback_url());

        Self {
            controller,
            upload_url,
            playback,
            upload_form: UploadForm::new(),
            upload_tx,
            status: String::from("starting upload worker"),
        }
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DraftChanged(text) => self.apply(Command::SetDraft { text }),
            Message::PlayPressed => self.apply(Command::ConfirmSelection),
            Message::UploadForm(form_message) => {
                if let Some(request) = self.upload_form.update(form_message) {
                    self.send_upload(request);
                }
            }
            Message::Upload(UploadEvent::Ready(sender)) => {
                self.upload_tx = Some(sender);
                self.status = String::from("upload worker ready");
            }
            Message::Upload(UploadEvent::Finished(video)) => {
                self.upload_form.finish(&video);
                self.status = format!("playing uploaded video {}", video.video_id);
                self.apply(video.into_command());
            }
            Message::Upload(UploadEvent::Failed(message)) => {
                self.upload_form.fail(&message);
                self.status = format!("error: {message}");
            }
            Message::Upload(UploadEvent::Disconnected) => {
                self.upload_tx = None;
                if self.upload_form.is_in_flight() {
                    self.upload_form.fail("upload worker stopped");
                }
                self.status = String::from("upload worker stopped");
            }
        }

        Task::none()
    }

    fn apply(&mut self, command: Command) {
        for event in self.controller.handle_command(command) {
            match event {
                Event::SelectionChanged(snapshot) => self.playback.load(&snapshot.playback_url),
                Event::DraftChanged { .. } => {}
            }
        }
    }

    fn send_upload(&mut self, request: UploadRequest) {
        let Some(sender) = &self.upload_tx else {
            self.upload_form.fail("upload worker is not ready");
            return;
        };
        match sender.try_send(request) {
            Ok(()) => self.upload_form.mark_in_flight(),
            Err(TrySendError::Full(_)) => {
                self.upload_form.fail("upload queue is full");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.upload_tx = None;
                self.upload_form.fail("upload worker stopped");
            }
        }
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let surfaces = row![
            self.playback.view::<Message>(),
            self.upload_form.view().map(Message::UploadForm),
        ]
        .spacing(16)
        .width(Length::Fill);

        let selector = row![
            text_input("Enter video ID here", self.controller.draft())
                .on_input(Message::DraftChanged)
                .on_submit(Message::PlayPressed),
            button("Play").on_press(Message::PlayPressed),
        ]
        .spacing(12)
        .width(Length::Fixed(480.0));

        column![
            text("Video Streaming App").size(28),
            surfaces,
            selector,
            text(format!("Status: {}", self.status)),
        ]
        .spacing(24)
        .padding(24)
        .align_x(Alignment::Center)
        .into()
    }

    /// Subscribes to the upload worker.
    pub fn subscription(&self) -> Subscription<Message> {
        upload_subscription(self.upload_url.clone()).map(Message::Upload)
    }
}
