//! Terminal progress feedback while a competitor lookup is pending.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

/// One braille cell per frame.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between redraws.
const INTERVAL: Duration = Duration::from_millis(80);

/// Lookups fan out to many upstream calls; show elapsed time once they run long.
const SHOW_ELAPSED_AFTER: Duration = Duration::from_secs(2);

/// Progress indicator for a pending competitor lookup.
///
/// Drawn on stderr by a background task; the results table goes to stdout.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Begin redrawing `message` until [`Spinner::stop`] is called.
    pub fn start(message: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut i = 0;
            loop {
                let line = frame_line(i, &message, started.elapsed());
                // erase line, carriage return
                eprint!("\x1b[2K\r{line}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Wait for the redraw task to exit, leaving the line blank.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

fn frame_line(i: usize, message: &str, elapsed: Duration) -> String {
    let frame = FRAMES[i % FRAMES.len()];
    if elapsed >= SHOW_ELAPSED_AFTER {
        format!("{frame} {message} {}s", elapsed.as_secs())
    } else {
        format!("{frame} {message}")
    }
}
