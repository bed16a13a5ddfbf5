//! JSON-lines host event source.
//!
//! Reads one [`HostEvent`] per line from any async reader (stdin in the
//! harness binary) and forwards it to the dispatcher's channel.  Blank lines
//! are ignored; malformed lines (bad JSON or bad UTF-8) are logged and
//! skipped so a single bad line never stops the pump.
//!
//! [`run_session`] ties the pump to an [`EventDispatcher`] and always lets the
//! dispatcher drain, however the pump ends.

use std::future::Future;

use focus_core::{decode_event, HostEvent, ProtocolError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::infrastructure::dispatch::{DispatchSummary, EventDispatcher};

/// Counts reported when the pump stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Events handed to the dispatcher.
    pub forwarded: u64,
    /// Lines that could not be decoded.
    pub rejected: u64,
}

/// Forwards decoded events from `reader` to `events` until EOF.
///
/// Stops early (without error) if the receiving side of `events` is dropped.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.  Content errors,
/// including lines that are not valid UTF-8, are counted in
/// [`PumpSummary::rejected`] instead.
pub async fn pump_events<R>(
    mut reader: R,
    events: mpsc::Sender<HostEvent>,
) -> std::io::Result<PumpSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = PumpSummary::default();
    let mut buf = Vec::new();
    let mut line_no: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = line_no, "skipping host event: not UTF-8: {e}");
                summary.rejected += 1;
                continue;
            }
        };

        match decode_event(line) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    debug!("event receiver dropped; stopping pump at line {line_no}");
                    break;
                }
                summary.forwarded += 1;
            }
            Err(ProtocolError::Empty) => {}
            Err(e) => {
                warn!(line = line_no, "skipping host event: {e}");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

/// How a host session ended.
#[derive(Debug)]
pub struct SessionReport {
    /// The pump's result, or `None` if `shutdown` fired first.
    pub pump: Option<std::io::Result<PumpSummary>>,
    /// Counters of the drained dispatcher.
    pub dispatch: DispatchSummary,
}

/// Pumps `reader` into `dispatcher` until EOF, a read error, or `shutdown`.
///
/// Whichever comes first, the channel is closed and the dispatcher finishes
/// every queued event before this returns.
///
/// # Errors
///
/// Returns the [`JoinError`] if the dispatcher task panicked.
pub async fn run_session<R, S>(
    reader: R,
    dispatcher: EventDispatcher,
    channel_depth: usize,
    shutdown: S,
) -> Result<SessionReport, JoinError>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let (tx, rx) = mpsc::channel(channel_depth.max(1));
    let dispatcher = tokio::spawn(dispatcher.run(rx));

    // Dropping the pump drops the sender, which closes the channel.
    let pump = tokio::select! {
        result = pump_events(reader, tx) => Some(result),
        () = shutdown => {
            info!("shutdown requested, draining pending events");
            None
        }
    };

    let dispatch = dispatcher.await?;
    Ok(SessionReport { pump, dispatch })
}
