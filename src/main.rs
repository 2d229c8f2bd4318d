//! Terminal Tetris runner (default binary).
//!
//! Runs the frame loop: poll crossterm input, step the application once, swap
//! the framebuffer to the terminal. The opponent link runs on its own tokio
//! runtime in the background.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::error;
use tracing_subscriber::EnvFilter;

use tasktris::core::{Offline, OpponentPort};
use tasktris::engine::{App, FrameOutcome, Settings};
use tasktris::input::InputPoller;
use tasktris::opponent::{LinkConfig, OpponentLink};
use tasktris::term::{TerminalCanvas, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "tasktris", about = "Terminal Tetris with a networked opponent mode")]
struct Cli {
    /// Resource directory holding `images/*.png`
    #[arg(long, default_value = "resources")]
    resources: PathBuf,

    /// JSON file overriding timing settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Opponent host [env: TASKTRIS_OPPONENT_HOST]
    #[arg(long)]
    opponent_host: Option<String>,

    /// Local port opponent datagrams arrive on [env: TASKTRIS_RECV_PORT]
    #[arg(long)]
    recv_port: Option<u16>,

    /// Opponent port datagrams are sent to [env: TASKTRIS_SEND_PORT]
    #[arg(long)]
    send_port: Option<u16>,

    /// Run without the opponent link (2-player mode never connects)
    /// [env: TASKTRIS_OPPONENT_DISABLED]
    #[arg(long)]
    no_opponent: bool,
}

impl Cli {
    /// Environment first, flags on top.
    fn link_config(&self) -> LinkConfig {
        let mut config = LinkConfig::from_env();
        if let Some(host) = &self.opponent_host {
            config.host = host.clone();
        }
        if let Some(port) = self.recv_port {
            config.recv_port = port;
        }
        if let Some(port) = self.send_port {
            config.send_port = port;
        }
        config.disabled |= self.no_opponent;
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_file.as_ref()) {
        eprintln!("tasktris: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("tasktris: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let link_config = cli.link_config();
    let mut link: Box<dyn OpponentPort> = if link_config.disabled {
        Box::new(Offline)
    } else {
        Box::new(OpponentLink::start(&link_config)?)
    };

    let mut canvas = TerminalCanvas::new();
    let app = App::new(settings, rand::random(), &mut canvas, &cli.resources)
        .with_context(|| format!("load resources from {}", cli.resources.display()))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = frame_loop(app, settings, &mut canvas, &mut term, link.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn frame_loop(
    mut app: App,
    settings: Settings,
    canvas: &mut TerminalCanvas,
    term: &mut TerminalRenderer,
    link: &mut dyn OpponentPort,
) -> Result<()> {
    let frame = Duration::from_millis(u64::from(settings.frame_ms));
    let started = Instant::now();
    let mut poller = InputPoller::new();

    loop {
        let frame_start = Instant::now();

        // Input until the frame is due.
        while let Some(timeout) = frame.checked_sub(frame_start.elapsed()) {
            if !event::poll(timeout)? {
                break;
            }
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                term.invalidate();
            }
            poller.handle_event(&ev, Instant::now());
        }
        if poller.interrupted() {
            return Ok(());
        }
        let now = Instant::now();
        poller.expire(now);

        let now_ms = now.duration_since(started).as_millis() as u64;
        if app.frame(poller.state_mut(), now_ms, canvas, link) == FrameOutcome::Quit {
            return Ok(());
        }
        term.draw_swap(canvas.framebuffer_mut())?;
    }
}
