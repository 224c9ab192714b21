use tracing::{debug, warn};

use crate::error::{Result, SelectionError};
use crate::upload::{HttpUploader, UploadedVideo, rejection_message};

/// Source of the videos known to the backend, used to pick a selection.
pub trait VideoCatalog {
    fn list_videos(&self) -> Result<Vec<UploadedVideo>>;
}

/// Interprets the backend reply to `GET /api/v1/videos`.
///
/// # Example
/// ```
/// use selection::catalog::parse_video_list;
///
/// let videos = parse_video_list(200, r#"[{ "videoId": "a" }, { "videoId": "b" }]"#)
///     .expect("video list");
/// assert_eq!(videos.len(), 2);
/// ```
pub fn parse_video_list(status: u16, body: &str) -> Result<Vec<UploadedVideo>> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|source| SelectionError::ListResponse { status, source });
    }

    Err(SelectionError::ListRejected {
        status,
        message: rejection_message(body),
    })
}

impl VideoCatalog for HttpUploader {
    fn list_videos(&self) -> Result<Vec<UploadedVideo>> {
        let response = self.client.get(&self.videos_url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        match parse_video_list(status, &body) {
            Ok(videos) => {
                debug!(count = videos.len(), "videos listed");
                Ok(videos)
            }
            Err(error) => {
                warn!(status, %error, "video listing failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SelectionError;

    use super::parse_video_list;

    #[test]
    fn list_body_decodes_every_record_in_order() {
        let body = r#"[
            { "videoId": "first", "title": "Intro", "contentType": "video/mp4" },
            { "videoId": "second", "title": null }
        ]"#;

        let videos = parse_video_list(200, body).expect("video list");

        let ids: Vec<&str> = videos.iter().map(|video| video.video_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(videos[0].title.as_deref(), Some("Intro"));
        assert!(videos[1].title.is_none());
    }

    #[test]
    fn empty_list_is_accepted() {
        assert!(parse_video_list(200, "[]").expect("empty list").is_empty());
    }

    #[test]
    fn object_body_on_success_status_is_a_decode_error() {
        let result = parse_video_list(200, r#"{ "videoId": "not-a-list" }"#);

        assert!(matches!(
            result,
            Err(SelectionError::ListResponse { status: 200, .. })
        ));
    }

    #[test]
    fn error_status_reports_backend_message() {
        let result = parse_video_list(503, r#"{ "message": "store offline", "success": false }"#);

        let Err(SelectionError::ListRejected { status, message }) = result else {
            panic!("expected ListRejected");
        };
        assert_eq!(status, 503);
        assert_eq!(message, "store offline");
    }
}
