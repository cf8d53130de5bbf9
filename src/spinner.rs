//! Background spinner for long-running work.
//!
//! The spinner owns a thread that redraws `frame message` on one line every
//! tick until it is stopped. It never reads input, so it can run while the
//! caller blocks on something else.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{cursor, terminal, QueueableCommand};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;

/// Frame sets for [`Spinner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    Line,
    #[default]
    Dots,
    MiniDots,
    Arc,
    Points,
}

impl SpinnerStyle {
    pub const ALL: [SpinnerStyle; 5] = [
        SpinnerStyle::Line,
        SpinnerStyle::Dots,
        SpinnerStyle::MiniDots,
        SpinnerStyle::Arc,
        SpinnerStyle::Points,
    ];

    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Line => &["|", "/", "-", "\\"],
            SpinnerStyle::Dots => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            SpinnerStyle::MiniDots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::Arc => &["◜", "◠", "◝", "◞", "◡", "◟"],
            SpinnerStyle::Points => &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"],
        }
    }

    /// Tick length that looks right for this frame set.
    pub fn default_interval(self) -> Duration {
        match self {
            SpinnerStyle::Line | SpinnerStyle::Dots => Duration::from_millis(100),
            SpinnerStyle::MiniDots => Duration::from_millis(80),
            SpinnerStyle::Arc => Duration::from_millis(120),
            SpinnerStyle::Points => Duration::from_millis(140),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpinnerStyle::Line => "line",
            SpinnerStyle::Dots => "dots",
            SpinnerStyle::MiniDots => "mini-dots",
            SpinnerStyle::Arc => "arc",
            SpinnerStyle::Points => "points",
        }
    }
}

impl FromStr for SpinnerStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SpinnerStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = SpinnerStyle::ALL.iter().map(|s| s.name()).collect();
                format!("unknown spinner style '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

struct SpinnerState {
    frame: usize,
    message: String,
    stopped: bool,
}

/// A running spinner. Stop it with [`Spinner::stop`]; dropping it stops it
/// without a final message.
pub struct Spinner {
    style: SpinnerStyle,
    state: Arc<Mutex<SpinnerState>>,
    sink: Sink,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning on stdout.
    pub fn start(message: impl Into<String>, style: SpinnerStyle, interval: Duration) -> Result<Self> {
        Self::start_with_writer(message, style, interval, io::stdout())
    }

    /// Start spinning on any writer.
    pub fn start_with_writer(
        message: impl Into<String>,
        style: SpinnerStyle,
        interval: Duration,
        writer: impl Write + Send + 'static,
    ) -> Result<Self> {
        let state = Arc::new(Mutex::new(SpinnerState {
            frame: 0,
            message: message.into(),
            stopped: false,
        }));
        let sink: Sink = Arc::new(Mutex::new(Box::new(writer)));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = if interval.is_zero() {
            style.default_interval()
        } else {
            interval
        };

        {
            let mut sink = sink.lock();
            sink.queue(cursor::Hide)?;
            sink.flush()?;
        }

        let thread_state = Arc::clone(&state);
        let thread_sink = Arc::clone(&sink);
        let handle = thread::Builder::new()
            .name("rawprompt-spinner".into())
            .spawn(move || {
                let frames = style.frames();
                loop {
                    let line = {
                        let state = thread_state.lock();
                        if state.stopped {
                            break;
                        }
                        format!("{} {}", frames[state.frame % frames.len()], state.message)
                    };
                    if let Err(e) = draw(&mut *thread_sink.lock(), &line) {
                        debug!(error = %e, "spinner write failed, stopping");
                        break;
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let mut state = thread_state.lock();
                            state.frame = (state.frame + 1) % frames.len();
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        debug!(style = style.name(), ?interval, "spinner started");

        Ok(Spinner {
            style,
            state,
            sink,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn style(&self) -> SpinnerStyle {
        self.style
    }

    /// Index of the frame currently shown.
    pub fn frame(&self) -> usize {
        self.state.lock().frame
    }

    pub fn is_running(&self) -> bool {
        !self.state.lock().stopped
    }

    /// Replace the text shown next to the frame from the next tick on.
    pub fn set_message(&self, message: impl Into<String>) {
        self.state.lock().message = message.into();
    }

    /// Stop the thread, clear the spinner line and print `final_message` in
    /// its place if given. Stopping an already stopped spinner does nothing.
    pub fn stop(&mut self, final_message: Option<&str>) -> Result<()> {
        {
            let mut state = self.state.lock();
            if state.stopped {
                return Ok(());
            }
            state.stopped = true;
        }
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already have exited on a write error.
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("spinner thread panicked");
            }
        }

        let mut sink = self.sink.lock();
        sink.queue(cursor::MoveToColumn(0))?
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        if let Some(message) = final_message {
            writeln!(sink, "{message}")?;
        }
        sink.queue(cursor::Show)?;
        sink.flush()?;
        debug!("spinner stopped");
        Ok(())
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Err(e) = self.stop(None) {
            warn!(error = %e, "failed to stop spinner");
        }
    }
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Spinner")
            .field("style", &self.style)
            .field("frame", &state.frame)
            .field("message", &state.message)
            .field("stopped", &state.stopped)
            .finish_non_exhaustive()
    }
}

fn draw(out: &mut impl Write, line: &str) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?
        .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.write_all(line.as_bytes())?;
    out.flush()
}
