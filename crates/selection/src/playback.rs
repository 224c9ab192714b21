//! Backend route derivation for the HLS playback endpoints.

/// Path prefix of the video resource on the backend.
pub const VIDEOS_PATH: &str = "/api/v1/videos";

/// File name of the adaptive-streaming master playlist.
pub const MASTER_PLAYLIST: &str = "master.m3u8";

/// Consumer of manifest URLs, implemented by whatever renders the stream.
///
/// The surface owns fetching, buffering and error reporting. It receives the
/// URL verbatim, including URLs built from empty or malformed identifiers.
pub trait PlaybackSurface {
    /// Starts (or restarts) playback of the given manifest.
    fn load(&mut self, manifest_url: &str);
}

/// Builds the master playlist URL for `video_id`.
///
/// The identifier is inserted raw; no escaping is applied.
///
/// # Example
/// ```
/// use selection::playback::manifest_url;
///
/// assert_eq!(
///     manifest_url("http://localhost:8080", "abc-123"),
///     "http://localhost:8080/api/v1/videos/abc-123/master.m3u8"
/// );
/// ```
pub fn manifest_url(base_endpoint: &str, video_id: &str) -> String {
    format!("{base_endpoint}{VIDEOS_PATH}/{video_id}/{MASTER_PLAYLIST}")
}

/// Builds the video collection endpoint used for uploads and listing.
pub fn videos_url(base_endpoint: &str) -> String {
    format!("{base_endpoint}{VIDEOS_PATH}")
}
