//! `serve` subcommand: line-oriented request transport over stdin/stdout.

use std::io::{BufRead, BufWriter, Write};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use super::{Config, Lights, RUNNING, Result, protocol};

/// How long the loop waits for a request before re-checking `RUNNING`.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Read stdin on a worker thread so an idle transport still notices Ctrl+C.
/// The channel disconnects at EOF.
fn spawn_line_reader() -> Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub(super) fn cmd_serve(config: Config) -> Result<()> {
    let lights = Lights::from_config(&config)?;
    log::info!(
        "serving {} lights on {} (blink attempts {}, settle {}ms)",
        config.lights.len(),
        config.led_path,
        config.blink_attempts,
        config.blink_settle_ms
    );

    let requests = spawn_line_reader();
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut handled = 0u64;

    while RUNNING.load(Ordering::SeqCst) {
        let line = match requests.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        let response = protocol::handle_line(&lights, &line);
        writeln!(out, "{}", protocol::encode_response(&response))?;
        out.flush()?;
        handled += 1;
    }

    if !RUNNING.load(Ordering::SeqCst) {
        log::info!("interrupted");
    }
    log::info!("transport closed after {handled} requests");
    Ok(())
}
