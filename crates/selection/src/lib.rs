//! UI-agnostic video selection state for the HLS playback client.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod playback;
pub mod upload;

pub use api::{Command, Event, SelectionController, SelectionSnapshot};
pub use catalog::VideoCatalog;
pub use config::SelectionConfig;
pub use error::{Result, SelectionError};
pub use playback::{PlaybackSurface, manifest_url};
pub use upload::{HttpUploader, UploadRequest, UploadedVideo, Uploader};
