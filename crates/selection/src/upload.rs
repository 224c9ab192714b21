use std::path::{Path, PathBuf};

use reqwest::blocking::{Client, multipart};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::Command;
use crate::error::{Result, SelectionError};

/// One video submission for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub title: String,
    pub description: String,
}

impl UploadRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Checks the request before any bytes are sent.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SelectionError::InvalidUpload {
                reason: String::from("title is empty"),
            });
        }
        if !self.path.is_file() {
            return Err(SelectionError::InvalidUpload {
                reason: format!("not a file: {}", self.path.display()),
            });
        }
        Ok(())
    }
}

/// Video record returned by the backend after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedVideo {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl UploadedVideo {
    /// The completion event handed to the selection controller.
    pub fn into_command(self) -> Command {
        Command::VideoCreated {
            video_id: self.video_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BackendMessage {
    #[serde(default)]
    message: Option<String>,
}

/// Interprets the backend reply to a multipart upload.
///
/// # Example
/// ```
/// use selection::upload::parse_upload_response;
///
/// let video = parse_upload_response(200, r#"{ "videoId": "new-vid-42", "title": "demo" }"#)
///     .expect("accepted upload");
/// assert_eq!(video.video_id, "new-vid-42");
/// ```
pub fn parse_upload_response(status: u16, body: &str) -> Result<UploadedVideo> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|source| SelectionError::UploadResponse { status, source });
    }

    Err(SelectionError::UploadRejected {
        status,
        message: rejection_message(body),
    })
}

/// Message of a non-2xx reply: the backend's `message` field, or the raw body.
pub(crate) fn rejection_message(body: &str) -> String {
    serde_json::from_str::<BackendMessage>(body)
        .ok()
        .and_then(|reply| reply.message)
        .unwrap_or_else(|| body.trim().to_owned())
}

/// Upload surface backend: turns a request into a created video.
pub trait Uploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadedVideo>;
}

/// Client of the `/api/v1/videos` collection: multipart `POST` uploads and
/// `GET` listing.
///
/// Uses the blocking reqwest client, so it must be constructed and used off
/// any async runtime thread.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    pub(crate) client: Client,
    pub(crate) videos_url: String,
}

impl HttpUploader {
    pub fn new(videos_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            videos_url: videos_url.into(),
        })
    }

    fn build_form(request: &UploadRequest) -> Result<multipart::Form> {
        multipart::Form::new()
            .text("title", request.title.clone())
            .text("description", request.description.clone())
            .file("file", &request.path)
            .map_err(|source| SelectionError::UploadIo {
                path: request.path.clone(),
                source,
            })
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadedVideo> {
        request.validate()?;
        let form = Self::build_form(request)?;

        let response = self.client.post(&self.videos_url).multipart(form).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        match parse_upload_response(status, &body) {
            Ok(video) => {
                info!(
                    video_id = %video.video_id,
                    path = %display_name(&request.path),
                    "upload accepted"
                );
                Ok(video)
            }
            Err(error) => {
                warn!(status, %error, "upload failed");
                Err(error)
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
