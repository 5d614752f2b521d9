//! Progress line drawn on stderr while a backend call is in flight

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);
/// Report fetches can take several seconds; past this the wait is shown
const SHOW_ELAPSED_AFTER: Duration = Duration::from_secs(3);

/// Await `future`, animating `message` until it resolves.
///
/// Output goes to stderr so tables and CSV on stdout stay clean. Nothing is
/// drawn when stderr is not a terminal.
pub async fn with_spinner<F, T>(message: impl Into<String>, future: F) -> T
where
    F: Future<Output = T>,
{
    let mut stderr = io::stderr();
    if !stderr.is_terminal() {
        return future.await;
    }

    let message = message.into();
    let started = Instant::now();
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    let mut frame = 0;
    tokio::pin!(future);

    let output = loop {
        tokio::select! {
            biased;
            output = &mut future => break output,
            _ = ticker.tick() => {
                let _ = write!(stderr, "\r{}", frame_line(frame, &message, started.elapsed()));
                let _ = stderr.flush();
                frame += 1;
            }
        }
    };

    let _ = write!(stderr, "\r\x1b[K");
    let _ = stderr.flush();
    output
}

fn frame_line(frame: usize, message: &str, elapsed: Duration) -> String {
    let glyph = FRAMES[frame % FRAMES.len()];
    if elapsed >= SHOW_ELAPSED_AFTER {
        format!("{} {} ({}s)", glyph, message, elapsed.as_secs())
    } else {
        format!("{} {}", glyph, message)
    }
}
