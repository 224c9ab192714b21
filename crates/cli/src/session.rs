use std::fmt::{Display, Formatter};
use std::sync::mpsc::Receiver;

use selection::{
    Command, Event, SelectionConfig, SelectionController, UploadRequest, UploadedVideo, Uploader,
    VideoCatalog,
};
use tracing::debug;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Draft(String),
    Play,
    Created(String),
    Upload(UploadRequest),
    List,
    Pick(usize),
    Url,
    State,
    Quit,
}

/// Input line that is not part of the command set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
    InvalidIndex(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(command) => write!(f, "unknown command: {command}"),
            Self::MissingArgument { command, usage } => {
                write!(f, "missing argument for {command}, usage: {usage}")
            }
            Self::InvalidIndex(index) => write!(f, "invalid list index: {index:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one line; blank lines yield `None`.
///
/// Leading whitespace before the command word is ignored. Arguments of
/// `draft` and `created` are the rest of the line after one separating
/// whitespace character, kept verbatim.
pub fn parse_line(line: &str) -> Result<Option<Request>, ParseError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let line = line.trim_start();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };

    let request = match command {
        "draft" => Request::Draft(rest.to_owned()),
        "play" => Request::Play,
        "created" => Request::Created(rest.to_owned()),
        "upload" => {
            let mut parts = rest.split_whitespace();
            let (Some(path), Some(title)) = (parts.next(), parts.next()) else {
                return Err(ParseError::MissingArgument {
                    command: "upload",
                    usage: "upload <path> <title> [description...]",
                });
            };
            let description = parts.collect::<Vec<_>>().join(" ");
            Request::Upload(UploadRequest::new(path, title, description))
        }
        "list" => Request::List,
        "pick" => {
            let index = rest.trim();
            if index.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "pick",
                    usage: "pick <number from list>",
                });
            }
            match index.parse::<usize>() {
                Ok(number) if number > 0 => Request::Pick(number),
                _ => return Err(ParseError::InvalidIndex(index.to_owned())),
            }
        }
        "url" => Request::Url,
        "state" => Request::State,
        "quit" | "exit" => Request::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(request))
}

/// Selection controller driven from text input, with events rendered as lines.
pub struct Session<U> {
    controller: SelectionController,
    events: Receiver<Event>,
    uploader: U,
    listed: Vec<UploadedVideo>,
}

impl<U> Session<U>
where
    U: Uploader + VideoCatalog,
{
    pub fn new(config: SelectionConfig, uploader: U) -> Self {
        let mut controller = SelectionController::new(config);
        let events = controller.subscribe();
        Self {
            controller,
            events,
            uploader,
            listed: Vec::new(),
        }
    }

    /// Executes one request and returns the lines to print.
    pub fn handle(&mut self, request: Request) -> Vec<String> {
        debug!(?request, "cli request");
        match request {
            Request::Draft(text) => {
                self.controller.handle_command(Command::SetDraft { text });
            }
            Request::Play => {
                self.controller.handle_command(Command::ConfirmSelection);
            }
            Request::Created(video_id) => {
                self.controller
                    .handle_command(Command::VideoCreated { video_id });
            }
            Request::Upload(upload) => match self.uploader.upload(&upload) {
                Ok(video) => {
                    self.controller.handle_command(video.into_command());
                }
                Err(error) => return vec![format!("error: {error}")],
            },
            Request::List => return self.list(),
            Request::Pick(number) => {
                let Some(video) = self.listed.get(number - 1) else {
                    return vec![format!(
                        "error: no video #{number}, run list first ({} listed)",
                        self.listed.len()
                    )];
                };
                let video_id = video.video_id.clone();
                self.controller
                    .handle_command(Command::SetDraft { text: video_id });
                self.controller.handle_command(Command::ConfirmSelection);
            }
            Request::Url => return vec![self.controller.playback_url()],
            Request::State => {
                let snapshot = self.controller.snapshot();
                return vec![
                    format!("draft: {:?}", snapshot.draft),
                    format!("active: {:?}", snapshot.active_id),
                    format!("url: {}", snapshot.playback_url),
                ];
            }
            Request::Quit => return Vec::new(),
        }
        self.drain_events()
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    fn list(&mut self) -> Vec<String> {
        match self.uploader.list_videos() {
            Ok(videos) => {
                self.listed = videos;
                if self.listed.is_empty() {
                    return vec![String::from("no videos")];
                }
                self.listed
                    .iter()
                    .enumerate()
                    .map(|(index, video)| {
                        format!(
                            "{}. {} {}",
                            index + 1,
                            video.video_id,
                            video.title.as_deref().unwrap_or("(untitled)")
                        )
                    })
                    .collect()
            }
            Err(error) => vec![format!("error: {error}")],
        }
    }

    fn drain_events(&self) -> Vec<String> {
        self.events.try_iter().map(|event| render_event(&event)).collect()
    }
}

fn render_event(event: &Event) -> String {
    match event {
        Event::DraftChanged { draft } => format!("draft changed: {draft:?}"),
        Event::SelectionChanged(snapshot) => {
            format!("playing {} -> {}", snapshot.active_id, snapshot.playback_url)
        }
    }
}
