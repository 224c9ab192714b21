use std::sync::mpsc;
use std::thread;

use iced::futures::{SinkExt, StreamExt, channel::mpsc as futures_mpsc, executor};
use iced::{Subscription, stream};
use selection::{HttpUploader, UploadRequest, UploadedVideo, Uploader};
use tracing::{debug, warn};

const JOB_CHANNEL_CAPACITY: usize = 4;
const EVENT_CHANNEL_CAPACITY: usize = 8;
const SUBSCRIPTION_CHANNEL_CAPACITY: usize = 16;

/// Sender used by the UI thread to hand upload requests to the worker thread.
pub type UploadJobSender = mpsc::SyncSender<UploadRequest>;

/// Receiver used to read results produced by the worker thread.
pub type UploadEventReceiver = mpsc::Receiver<UploadEvent>;

/// Messages emitted by the upload worker subscription.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    Ready(UploadJobSender),
    Finished(UploadedVideo),
    Failed(String),
    Disconnected,
}

/// Builds a subscription that starts the upload worker for `upload_url`.
pub fn upload_subscription(upload_url: String) -> Subscription<UploadEvent> {
    Subscription::run_with_id(upload_url.clone(), upload_worker_stream(upload_url))
}

fn upload_worker_stream(upload_url: String) -> impl iced::futures::Stream<Item = UploadEvent> {
    upload_worker_stream_with(move || spawn_upload_worker(move || HttpUploader::new(upload_url)))
}

fn upload_worker_stream_with<S>(spawn_worker: S) -> impl iced::futures::Stream<Item = UploadEvent>
where
    S: FnOnce() -> (UploadJobSender, UploadEventReceiver) + Send + 'static,
{
    stream::channel(
        SUBSCRIPTION_CHANNEL_CAPACITY,
        move |mut output| async move {
            let (job_tx, event_rx) = spawn_worker();
            let _ = output.send(UploadEvent::Ready(job_tx)).await;

            let (forward_tx, mut forward_rx) =
                futures_mpsc::channel::<UploadEvent>(SUBSCRIPTION_CHANNEL_CAPACITY);

            thread::spawn(move || {
                let mut forward_tx = forward_tx;
                while let Ok(event) = event_rx.recv() {
                    if executor::block_on(forward_tx.send(event)).is_err() {
                        return;
                    }
                }
                let _ = executor::block_on(forward_tx.send(UploadEvent::Disconnected));
            });

            while let Some(event) = forward_rx.next().await {
                if output.send(event).await.is_err() {
                    break;
                }
            }
        },
    )
}

/// Spawns a worker thread that runs uploads one at a time.
///
/// `make_uploader` runs on the worker thread, so blocking clients are never
/// created on the async runtime.
pub fn spawn_upload_worker<U, F>(make_uploader: F) -> (UploadJobSender, UploadEventReceiver)
where
    U: Uploader,
    F: FnOnce() -> selection::Result<U> + Send + 'static,
{
    let (job_tx, job_rx) = mpsc::sync_channel::<UploadRequest>(JOB_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::sync_channel::<UploadEvent>(EVENT_CHANNEL_CAPACITY);

    thread::spawn(move || {
        let uploader = match make_uploader() {
            Ok(uploader) => uploader,
            Err(error) => {
                warn!(%error, "upload worker failed to start");
                let _ = event_tx.send(UploadEvent::Failed(error.to_string()));
                return;
            }
        };

        while let Ok(request) = job_rx.recv() {
            debug!(path = %request.path.display(), "upload started");
            let event = match uploader.upload(&request) {
                Ok(video) => UploadEvent::Finished(video),
                Err(error) => UploadEvent::Failed(error.to_string()),
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
    });

    (job_tx, event_rx)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use iced::futures::{StreamExt, executor, pin_mut};
    use selection::{SelectionError, UploadRequest, UploadedVideo, Uploader};

    use super::{UploadEvent, spawn_upload_worker, upload_worker_stream_with};

    #[derive(Debug, Clone, Copy)]
    struct MockUploader;

    impl Uploader for MockUploader {
        fn upload(&self, request: &UploadRequest) -> selection::Result<UploadedVideo> {
            if request.title == "reject" {
                return Err(SelectionError::UploadRejected {
                    status: 500,
                    message: String::from("Video not uploaded"),
                });
            }
            Ok(UploadedVideo {
                video_id: format!("created-{}", request.title),
                title: Some(request.title.clone()),
                description: Some(request.description.clone()),
                content_type: Some(String::from("video/mp4")),
                file_path: None,
            })
        }
    }

    fn request(title: &str) -> UploadRequest {
        UploadRequest::new("clip.mp4", title, "")
    }

    #[test]
    fn worker_reports_created_video() {
        let (job_tx, event_rx) = spawn_upload_worker(|| Ok(MockUploader));

        job_tx.send(request("intro")).expect("send upload job");

        let event = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("upload event");
        let UploadEvent::Finished(video) = event else {
            panic!("expected UploadEvent::Finished");
        };
        assert_eq!(video.video_id, "created-intro");
    }

    #[test]
    fn worker_reports_rejected_upload_as_failure() {
        let (job_tx, event_rx) = spawn_upload_worker(|| Ok(MockUploader));

        job_tx.send(request("reject")).expect("send upload job");

        let event = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("upload event");
        let UploadEvent::Failed(message) = event else {
            panic!("expected UploadEvent::Failed");
        };
        assert!(message.contains("Video not uploaded"));
    }

    #[test]
    fn worker_reports_startup_failure_and_stops() {
        let (job_tx, event_rx) = spawn_upload_worker(|| -> selection::Result<MockUploader> {
            Err(SelectionError::InvalidConfig {
                reason: String::from("no client"),
            })
        });

        let event = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("startup failure event");
        assert!(matches!(event, UploadEvent::Failed(message) if message.contains("no client")));
        assert!(event_rx.recv_timeout(Duration::from_secs(1)).is_err());
        drop(job_tx);
    }

    #[test]
    fn worker_stream_emits_ready_forwards_results_and_disconnected() {
        let (bridge_tx, bridge_rx) = mpsc::channel::<UploadEvent>();

        thread::spawn(move || {
            let stream = upload_worker_stream_with(|| spawn_upload_worker(|| Ok(MockUploader)));
            executor::block_on(async move {
                pin_mut!(stream);
                for _ in 0..3 {
                    let Some(event) = stream.next().await else {
                        break;
                    };
                    if bridge_tx.send(event).is_err() {
                        break;
                    }
                }
            });
        });

        let ready = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("ready event");
        let UploadEvent::Ready(job_tx) = ready else {
            panic!("expected UploadEvent::Ready");
        };

        job_tx.send(request("demo")).expect("send upload job");

        let finished = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("forwarded result");
        assert!(matches!(
            finished,
            UploadEvent::Finished(ref video) if video.video_id == "created-demo"
        ));

        drop(job_tx);

        let disconnected = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("disconnected event");
        assert!(matches!(disconnected, UploadEvent::Disconnected));
    }
}
