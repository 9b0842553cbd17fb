use clap::Parser;
use cli::commands::{self, Command};
use events::eventfinda::{Credentials, EventfindaClient};
use events::memory::InMemoryEventSource;
use events::source::EventSource;
use map::models::GroupingPolicy;
use session::handlers::SessionHandler;
use session::message_types::SurfaceCommand;
use session::models::SessionState;
use std::io;
use std::time::Duration;
use surface::{JsonLinesSurface, RenderSurface};
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;
mod error;
mod events;
mod logging;
mod map;
mod navigation;
mod session;
mod surface;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    logging::init();
    events::init(&args);

    let state = SessionState::new(
        args.query.clone(),
        args.filters(),
        GroupingPolicy::from_decimals(args.group_decimals),
    );
    let surface = JsonLinesSurface::new(io::stdout());
    let result = match &args.events_file {
        Some(path) => {
            let source =
                InMemoryEventSource::from_ndjson(path).expect("Failed to load the events file.");
            run(SessionHandler::new(source, state), surface).await
        }
        None => {
            let source = EventfindaClient::new(
                args.api_url.clone(),
                Credentials::from_env(),
                Duration::from_secs(args.request_timeout_secs),
            )
            .expect("Failed to build the HTTP client.");
            run(SessionHandler::new(source, state), surface).await
        }
    };
    if let Err(e) = result {
        tracing::error!(task = "session", error = %e, "Session ended abnormally.");
        std::process::exit(1);
    }
}

/// Feeds stdin lines to the session until `quit` or end of input.
async fn run<ES, RS>(mut handler: SessionHandler<ES>, mut surface: RS) -> error::Result<()>
where
    ES: EventSource,
    RS: RenderSurface,
{
    match handler.start().await {
        Ok(commands) => apply_all(&mut surface, &commands)?,
        Err(e) => tracing::error!(task = "session", error = %e, "Initial search failed."),
    }
    tracing::info!(
        task = "session",
        points = handler.state().points.len(),
        "Session ready, reading commands from stdin."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Event(event))) => {
                // Failures are logged by the handler; the session keeps going.
                if let Ok(commands) = handler.dispatch(event).await {
                    apply_all(&mut surface, &commands)?;
                }
            }
            Err(e) => tracing::warn!(task = "command", error = %e, "Ignoring input line."),
        }
    }
    Ok(())
}

fn apply_all<RS: RenderSurface>(surface: &mut RS, commands: &[SurfaceCommand]) -> io::Result<()> {
    for command in commands {
        surface.apply(command)?;
    }
    Ok(())
}
