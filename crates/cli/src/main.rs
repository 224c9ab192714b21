mod session;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use selection::{HttpUploader, SelectionConfig};
use session::{Request, Session, parse_line};
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            error!(%error, "failed to load config");
            return ExitCode::FAILURE;
        }
    };
    let uploader = match HttpUploader::new(config.videos_url()) {
        Ok(uploader) => uploader,
        Err(error) => {
            error!(%error, "failed to build upload client");
            return ExitCode::FAILURE;
        }
    };

    match run(Session::new(config, uploader)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "terminal i/o failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_writer(io::stderr).try_init();
}

fn load_config() -> selection::Result<SelectionConfig> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => SelectionConfig::load(path)?,
        None => SelectionConfig::default(),
    };
    config.apply_env()
}

fn run(mut session: Session<HttpUploader>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", session.controller().playback_url())?;

    for line in stdin.lock().lines() {
        let line = line?;
        let request = match parse_line(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(error) => {
                writeln!(stdout, "error: {error}")?;
                continue;
            }
        };
        if request == Request::Quit {
            break;
        }
        for output in session.handle(request) {
            writeln!(stdout, "{output}")?;
        }
    }
    Ok(())
}
