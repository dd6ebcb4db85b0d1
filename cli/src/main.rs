use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::{Parser, Subcommand};

use board::mode::Mode;
use board::surface::NullSurface;
use client::config::ClientConfig;
use client::net::{ClientEvent, RelayClient};
use client::session::BoardSession;
use wire::{Envelope, Event, Point};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error(transparent)]
    Connect(#[from] client::net::ClientError),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid point line: {0:?} (expected `x y`)")]
    InvalidPoint(String),
}

#[derive(Parser, Debug)]
#[command(name = "scrawl", about = "Scrawl shared-board CLI participant")]
struct Cli {
    /// Relay base URL; ws:// is derived from it for the socket.
    #[arg(long, env = "SCRAWL_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the relay's liveness endpoint.
    Ping,
    /// Connect and print every relayed event.
    Watch {
        /// Stop after this many events.
        #[arg(long)]
        count: Option<usize>,
    },
    /// Broadcast a full replacement of the shared text.
    Text { value: String },
    /// Wipe every participant's drawing surface.
    Clear,
    /// Broadcast a display-only selection over the shared text.
    Select {
        start: usize,
        end: usize,
        /// Set the shared text first, so peers see what the offsets cover.
        #[arg(long)]
        text: Option<String>,
    },
    /// Stream stroke points from a file (or stdin) as freehand drawing.
    /// One `x y` pair per line; a blank line lifts the pen.
    Draw {
        #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.url).await,
        Command::Watch { count } => run_watch(&cli.url, count).await,
        Command::Text { value } => run_text(&cli.url, value).await,
        Command::Clear => run_clear(&cli.url).await,
        Command::Select { start, end, text } => run_select(&cli.url, start, end, text).await,
        Command::Draw { input } => run_draw(&cli.url, &input).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_watch(base_url: &str, count: Option<usize>) -> Result<(), CliError> {
    let config = ClientConfig::new(ws_url(base_url)?);
    let (client, mut events) = RelayClient::connect(config).await?;

    let mut seen = 0_usize;
    while let Some(event) = events.recv().await {
        match event {
            ClientEvent::Inbound(envelope) => {
                println!("{}", render_envelope(&envelope));
                seen += 1;
                if count.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
            ClientEvent::Disconnected => eprintln!("connection lost; reconnecting..."),
            ClientEvent::Reconnected => eprintln!("reconnected"),
            ClientEvent::Exhausted => {
                eprintln!("gave up reconnecting");
                break;
            }
        }
    }

    client.close().await;
    Ok(())
}

async fn run_text(base_url: &str, value: String) -> Result<(), CliError> {
    let mut session = connect_session(base_url).await?;
    session.set_mode(Mode::Text);
    session.edit_text(value);
    session.close().await;
    Ok(())
}

async fn run_clear(base_url: &str) -> Result<(), CliError> {
    let mut session = connect_session(base_url).await?;
    session.clear();
    session.close().await;
    Ok(())
}

async fn run_select(
    base_url: &str,
    start: usize,
    end: usize,
    text: Option<String>,
) -> Result<(), CliError> {
    let mut session = connect_session(base_url).await?;
    session.set_mode(Mode::Text);
    if let Some(text) = text {
        session.edit_text(text);
    }
    session.select_text(start, end);
    session.close().await;
    Ok(())
}

async fn run_draw(base_url: &str, input: &str) -> Result<(), CliError> {
    let mut session = connect_session(base_url).await?;

    let mut reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };

    let mut drawing = false;
    let mut segments = 0_usize;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        match parse_point_line(&line)? {
            Some(point) if drawing => {
                session.pointer_move(point);
                segments += 1;
            }
            Some(point) => {
                session.pointer_down(point);
                drawing = true;
            }
            None => {
                session.pointer_up();
                drawing = false;
            }
        }
    }
    session.pointer_up();
    session.close().await;

    eprintln!("draw complete: {segments} segments");
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

async fn connect_session(base_url: &str) -> Result<BoardSession<NullSurface>, CliError> {
    let config = ClientConfig::new(ws_url(base_url)?);
    let (client, _events) = RelayClient::connect(config).await?;
    Ok(BoardSession::new(NullSurface, client))
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{}/ws", rest.trim_end_matches('/')));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{}/ws", rest.trim_end_matches('/')));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

fn render_envelope(envelope: &Envelope) -> String {
    let from = envelope
        .from
        .map_or_else(|| "relay".to_owned(), |id| id.to_string());
    match &envelope.event {
        Event::Draw(s) => format!(
            "[{from}] draw ({}, {}) -> ({}, {})",
            s.last_pos.x, s.last_pos.y, s.x, s.y
        ),
        Event::Text(t) => format!("[{from}] text {t:?}"),
        Event::Clear => format!("[{from}] clear"),
        Event::SharedSelection(sel) => format!(
            "[{from}] selection {:?} [{}..{}]",
            sel.selected_text, sel.range.start, sel.range.end
        ),
        Event::Connected { client_id } => format!("connected as {client_id}"),
        Event::PeerJoined { client_id } => format!("peer joined: {client_id}"),
        Event::PeerLeft { client_id } => format!("peer left: {client_id}"),
        Event::Error { message } => format!("relay error: {message}"),
    }
}

fn parse_point_line(line: &str) -> Result<Option<Point>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut parts = trimmed.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CliError::InvalidPoint(trimmed.to_owned()));
    };
    let (Ok(x), Ok(y)) = (x.parse::<f64>(), y.parse::<f64>()) else {
        return Err(CliError::InvalidPoint(trimmed.to_owned()));
    };
    Ok(Some(Point::new(x, y)))
}
