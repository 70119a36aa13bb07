#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `REORDER_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Reorder Demo: drag items between lists with the mouse

USAGE:
    reorder-demo [OPTIONS]

OPTIONS:
    --lists=N        Number of lists, 1 to 4 (default: 2)
    --items=N        Items per list (default: 5)
    --handle         Only drag from the handle glyph
    --symbol=S       Handle glyph (default: ✥)
    --help, -h       Show this help message
    --version, -V    Show version

KEYBINDINGS:
    a               Append a new item to the first list
    r               Re-discover lists and handles
    Esc             Cancel the current drag (drops outside)
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    REORDER_DEMO_LISTS    Override --lists
    REORDER_DEMO_ITEMS    Override --items
    REORDER_DEMO_HANDLE   Set to 1 to enable --handle
    REORDER_LOG           Write debug logs to this file (filter via RUST_LOG)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Number of lists.
    pub lists: usize,
    /// Items created per list.
    pub items: usize,
    /// Restrict drags to handles.
    pub handle: bool,
    /// Handle glyph.
    pub symbol: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            lists: 2,
            items: 5,
            handle: false,
            symbol: "✥".into(),
        }
    }
}

/// Outcome of parsing that should end the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Print to stdout and exit successfully.
    Info(String),
    /// Print to stderr and exit with failure.
    Usage(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting the
    /// process on `--help`, `--version`, or bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(Exit::Info(text)) => {
                println!("{text}");
                process::exit(0);
            }
            Err(Exit::Usage(text)) => {
                eprintln!("{text}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit arguments and an environment lookup.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from(
        args: &[String],
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Exit> {
        let mut opts = Self::default();

        if let Some(val) = var("REORDER_DEMO_LISTS")
            && let Ok(n) = val.parse()
        {
            opts.lists = n;
        }
        if let Some(val) = var("REORDER_DEMO_ITEMS")
            && let Ok(n) = val.parse()
        {
            opts.items = n;
        }
        if var("REORDER_DEMO_HANDLE").is_some_and(|v| v == "1") {
            opts.handle = true;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Err(Exit::Info(HELP_TEXT.to_string())),
                "--version" | "-V" => return Err(Exit::Info(format!("reorder-demo {VERSION}"))),
                "--handle" => opts.handle = true,
                other => {
                    if let Some(val) = other.strip_prefix("--lists=") {
                        opts.lists = val
                            .parse()
                            .map_err(|_| Exit::Usage(format!("Invalid --lists value: {val}")))?;
                    } else if let Some(val) = other.strip_prefix("--items=") {
                        opts.items = val
                            .parse()
                            .map_err(|_| Exit::Usage(format!("Invalid --items value: {val}")))?;
                    } else if let Some(val) = other.strip_prefix("--symbol=") {
                        opts.symbol = val.to_string();
                    } else {
                        return Err(Exit::Usage(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        if !(1..=4).contains(&opts.lists) {
            return Err(Exit::Usage(format!(
                "--lists must be between 1 and 4, got {}",
                opts.lists
            )));
        }
        Ok(opts)
    }
}
