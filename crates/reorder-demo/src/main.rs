#![forbid(unsafe_code)]

//! Reorder demo binary entry point.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use reorder_demo::app::App;
use reorder_demo::cli;
use reorder_demo::render;
use reorder_demo::session::TerminalSession;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Route logs to the file named by `REORDER_LOG`; stdout belongs to the UI.
fn init_logging() {
    let Ok(path) = std::env::var("REORDER_LOG") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {path}: {e}");
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}

fn run(opts: &cli::Opts) -> io::Result<()> {
    let session = TerminalSession::new()?;
    let (mut cols, mut rows) = session.size()?;
    let mut app = App::new(opts, cols, rows);
    let mut stdout = io::stdout();
    info!(lists = opts.lists, items = opts.items, handle = opts.handle, "demo started");

    loop {
        render::draw(&app, cols, rows).flush(&mut stdout)?;
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize(c, r) => {
                (cols, rows) = (c, r);
                app.resize(cols, rows);
            }
            _ => {}
        }
        if app.should_quit() {
            break;
        }
    }
    stdout.flush()
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    if let Err(e) = run(&opts) {
        error!(%e, "demo failed");
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
