use iced::widget::{button, column, container, text, text_input};
use iced::{Element, Length};
use selection::{UploadRequest, UploadedVideo};

/// Interactions raised by the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFormMessage {
    PathChanged(String),
    TitleChanged(String),
    DescriptionChanged(String),
    SubmitPressed,
}

/// State of the upload panel.
///
/// Only one upload is in flight at a time; its outcome never touches the
/// selection directly, the app forwards created videos to the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    path: String,
    title: String,
    description: String,
    in_flight: bool,
    status: String,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one form message; returns a request when the user submitted a valid form.
    pub fn update(&mut self, message: UploadFormMessage) -> Option<UploadRequest> {
        match message {
            UploadFormMessage::PathChanged(path) => self.path = path,
            UploadFormMessage::TitleChanged(title) => self.title = title,
            UploadFormMessage::DescriptionChanged(description) => self.description = description,
            UploadFormMessage::SubmitPressed => return self.submit(),
        }
        None
    }

    /// Marks the pending upload as sent to the worker.
    pub fn mark_in_flight(&mut self) {
        self.in_flight = true;
        self.status = format!("uploading {}", self.path.trim());
    }

    /// Records a successful upload and clears the form.
    pub fn finish(&mut self, video: &UploadedVideo) {
        self.path.clear();
        self.title.clear();
        self.description.clear();
        self.in_flight = false;
        self.status = format!("uploaded video {}", video.video_id);
    }

    /// Records a failed upload, keeping the inputs for another attempt.
    pub fn fail(&mut self, message: &str) {
        self.in_flight = false;
        self.status = format!("upload failed: {message}");
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn submit(&mut self) -> Option<UploadRequest> {
        if self.in_flight {
            self.status = String::from("an upload is already running");
            return None;
        }
        let request = UploadRequest::new(
            self.path.trim(),
            self.title.clone(),
            self.description.clone(),
        );
        match request.validate() {
            Ok(()) => Some(request),
            Err(error) => {
                self.status = error.to_string();
                None
            }
        }
    }

    /// Renders the upload panel.
    pub fn view(&self) -> Element<'_, UploadFormMessage> {
        let submit = button("Upload");
        let submit = if self.in_flight {
            submit
        } else {
            submit.on_press(UploadFormMessage::SubmitPressed)
        };

        container(
            column![
                text("Upload Video").size(20),
                text_input("video file path", &self.path).on_input(UploadFormMessage::PathChanged),
                text_input("title", &self.title).on_input(UploadFormMessage::TitleChanged),
                text_input("description", &self.description)
                    .on_input(UploadFormMessage::DescriptionChanged),
                submit,
                text(self.status.as_str()).size(12),
            ]
            .spacing(10),
        )
        .padding(16)
        .width(Length::Fill)
        .into()
    }
}
