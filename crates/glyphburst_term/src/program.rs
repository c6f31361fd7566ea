//! The interactive terminal program.
//!
//! Sets the terminal up (raw mode, optional alternate screen, hidden cursor,
//! mouse capture), then runs a loop that waits for input until the engine's
//! next frame is due:
//!
//! - mouse events are forwarded to the engine,
//! - a resize restarts the engine on the new grid,
//! - `q`, `Esc` or `Ctrl+C` quit,
//! - a due frame is run and the changed cells are flushed.
//!
//! The terminal is restored on the way out whether the loop succeeded or not.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use glyphburst::{Clock, Engine, FrameRequest};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{from_crossterm_mouse, is_quit};
use crate::surface::TerminalSurface;

/// How long to wait for input while no frame is scheduled (zero-sized grid).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered.
    pub frames: u64,
    /// Times the engine was (re)started.
    pub starts: u32,
    /// Particles triggered by input.
    pub triggered: usize,
}

/// The terminal host.
#[derive(Debug, Clone)]
pub struct Program {
    config: Config,
}

impl Program {
    /// Creates a program from a resolved config.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs on stdout until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, polled or
    /// written to.
    pub fn run(self) -> Result<RunSummary> {
        self.run_with_writer(io::stdout())
    }

    /// Runs with a custom writer.
    ///
    /// # Errors
    ///
    /// See [`Program::run`].
    pub fn run_with_writer<W: Write>(self, mut writer: W) -> Result<RunSummary> {
        let alt_screen = self.config.terminal.alt_screen;

        let result = setup_terminal(&mut writer, alt_screen).and_then(|()| self.event_loop(&mut writer));
        restore_terminal(&mut writer, alt_screen);

        result
    }

    fn event_loop<W: Write>(&self, writer: &mut W) -> Result<RunSummary> {
        let (columns, rows) = terminal::size()?;
        let mut surface = TerminalSurface::new(columns, rows, self.config.terminal.cell);
        let mut engine = Engine::new(self.config.engine.clone())?.with_theme(self.config.theme);
        let mut summary = RunSummary::default();

        let mut pending = engine.start(&mut surface);
        if pending.is_some() {
            summary.starts += 1;
        }
        info!(columns, rows, seed = engine.seed(), "terminal program started");

        loop {
            let wait = pending.map_or(IDLE_POLL, |req: FrameRequest| req.wait_from(engine.clock().now()));

            if event::poll(wait).map_err(Error::EventPoll)? {
                match event::read().map_err(Error::EventPoll)? {
                    Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(&key) => {
                        debug!(code = ?key.code, "quit requested");
                        break;
                    }
                    Event::Mouse(mouse) => {
                        if let Some(input) = from_crossterm_mouse(mouse, surface.cell_size()) {
                            summary.triggered += engine.handle_input(&input);
                        }
                    }
                    Event::Resize(columns, rows) => {
                        debug!(columns, rows, "terminal resized");
                        surface.resize(columns, rows);
                        pending = engine.start(&mut surface);
                        if pending.is_some() {
                            summary.starts += 1;
                        }
                    }
                    _ => {}
                }
            }

            let due = pending.filter(|req| req.due <= engine.clock().now());
            if let Some(req) = due {
                pending = engine.run_frame(req.token, &mut surface);
                surface.flush(writer).map_err(Error::Render)?;
                summary.frames += 1;

                if self.config.terminal.max_frames.is_some_and(|max| summary.frames >= max) {
                    debug!(frames = summary.frames, "frame limit reached");
                    break;
                }
            }
        }

        engine.stop();
        Ok(summary)
    }
}

fn setup_terminal<W: Write>(writer: &mut W, alt_screen: bool) -> Result<()> {
    enable_raw_mode().map_err(|source| Error::RawModeFailure {
        action: "enable",
        source,
    })?;
    if alt_screen {
        execute!(writer, EnterAlternateScreen).map_err(|source| Error::AltScreenFailure {
            action: "enter",
            source,
        })?;
    }
    execute!(writer, Hide, EnableMouseCapture)?;
    Ok(())
}

// Best effort: every step runs even if an earlier one failed.
fn restore_terminal<W: Write>(writer: &mut W, alt_screen: bool) {
    let _ = execute!(writer, DisableMouseCapture, Show);
    if alt_screen {
        let _ = execute!(writer, LeaveAlternateScreen);
    }
    let _ = disable_raw_mode();
}
