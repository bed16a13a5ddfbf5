//! Tab focus toggle headless host harness.
//!
//! Runs the toggle controller against in-memory stand-ins for the host's badge
//! and style APIs, driven by host events read from stdin (one JSON object per
//! line).  Useful for exercising the state machine end to end without a
//! browser.
//!
//! # Usage
//!
//! ```text
//! focus-toggle [OPTIONS] < events.jsonl
//!
//! Options:
//!   --config    <PATH>   TOML configuration file [default: focus-toggle.toml]
//!   --log-level <LEVEL>  Log level when RUST_LOG is unset [default: from config]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Default              | Description               |
//! |-----------------------|----------------------|---------------------------|
//! | `FOCUS_TOGGLE_CONFIG` | `focus-toggle.toml`  | Configuration file path   |
//! | `FOCUS_TOGGLE_LOG`    | config `log_level`   | Log level                 |
//! | `RUST_LOG`            | unset                | Full `tracing` filter     |
//!
//! # Example session
//!
//! ```text
//! {"type":"installed"}
//! {"type":"trigger","tabId":7,"url":"https://developer.chrome.com/docs/extensions/mv3/"}
//! {"type":"trigger","tabId":7,"url":"https://developer.chrome.com/docs/extensions/mv3/","source":"shortcut"}
//! {"type":"tabClosed","tabId":7}
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use focus_toggle::application::ToggleFocusUseCase;
use focus_toggle::infrastructure::storage::config::{load_config, AppConfig};
use focus_toggle::infrastructure::{
    run_session, BadgeStateStore, EventDispatcher, InMemoryStyleInjector,
};

/// Capacity of the channel between the stdin pump and the dispatcher.
const EVENT_CHANNEL_DEPTH: usize = 64;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Per-tab focus mode toggle, driven by host events on stdin.
#[derive(Debug, Parser)]
#[command(
    name = "focus-toggle",
    about = "Per-tab focus mode toggle controller (headless host harness)",
    version
)]
struct Cli {
    /// TOML configuration file.
    ///
    /// A missing file is not an error; built-in defaults are used instead.
    #[arg(long, default_value = "focus-toggle.toml", env = "FOCUS_TOGGLE_CONFIG")]
    config: PathBuf,

    /// Log level used when `RUST_LOG` is unset.  Overrides the config file.
    #[arg(long, env = "FOCUS_TOGGLE_LOG")]
    log_level: Option<String>,
}

impl Cli {
    /// The log level to fall back on when `RUST_LOG` is unset.
    fn effective_log_level(&self, config: &AppConfig) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config.log_level.clone())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    // `RUST_LOG` wins; otherwise the CLI/config level applies.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.effective_log_level(&config))),
        )
        .init();

    let settings = config.validate().context("invalid configuration")?;
    info!(
        "focus toggle starting: {} allowed prefix(es), style={}, shortcut={} ({})",
        settings.prefixes.len(),
        settings.style,
        config.shortcut.default_key,
        config.shortcut.command
    );

    // ── Wiring ────────────────────────────────────────────────────────────────
    let store = Arc::new(BadgeStateStore::new());
    let styles = Arc::new(InMemoryStyleInjector::new());
    let use_case = Arc::new(ToggleFocusUseCase::new(
        settings.prefixes,
        settings.style,
        Arc::clone(&store) as _,
        Arc::clone(&styles) as _,
    ));

    // ── Session ───────────────────────────────────────────────────────────────
    //
    // Ends on EOF, a read error, or Ctrl+C; queued events are always drained
    // before any pump error is reported.
    let stdin = BufReader::new(tokio::io::stdin());
    let report = run_session(
        stdin,
        EventDispatcher::new(use_case),
        EVENT_CHANNEL_DEPTH,
        ctrl_c(),
    )
    .await
    .context("dispatcher task failed")?;

    info!(
        "focus toggle stopped: toggled={}, skipped={}, failed={}",
        report.dispatch.toggled, report.dispatch.skipped, report.dispatch.failed
    );
    if let Some(pumped) = report.pump {
        let pumped = pumped.context("reading host events from stdin")?;
        info!(
            forwarded = pumped.forwarded,
            rejected = pumped.rejected,
            "end of host events"
        );
    }
    Ok(())
}

/// Resolves on Ctrl+C.  If the handler cannot be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
