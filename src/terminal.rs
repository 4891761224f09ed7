use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crate::error::{ClockError, Result};
use crate::render::Frame;

/// What the hosting loop saw while waiting for the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// Nothing of interest; keep ticking.
    Continue,
    /// The screen changed and must be drawn again.
    Redraw,
    /// The user asked to quit.
    Close,
}

/// Owns the screen and the event loop the ticker runs in.
pub trait Host {
    /// Width and height in cells.
    fn dimensions(&self) -> Result<(usize, usize)>;

    /// Blocks for at most `timeout`.
    fn wait(&mut self, timeout: Duration) -> Result<HostEvent>;

    fn present(&mut self, frame: &Frame) -> Result<()>;
}

pub fn terminal_dimensions() -> Result<(usize, usize)> {
    term_size::dimensions().ok_or(ClockError::TerminalSize)
}

/// Full-screen terminal session. Raw mode and the alternate screen are
/// left again when the host is dropped.
pub struct TerminalHost {
    stdout: Stdout,
}

impl TerminalHost {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Err(error) = execute!(self.stdout, cursor::Show, LeaveAlternateScreen) {
            warn!("failed to leave the alternate screen: {}", error);
        }
        if let Err(error) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {}", error);
        }
    }
}

fn is_close_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Host for TerminalHost {
    fn dimensions(&self) -> Result<(usize, usize)> {
        terminal_dimensions()
    }

    fn wait(&mut self, timeout: Duration) -> Result<HostEvent> {
        if !event::poll(timeout)? {
            return Ok(HostEvent::Continue);
        }
        Ok(match event::read()? {
            Event::Key(key) if is_close_key(key) => HostEvent::Close,
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                HostEvent::Redraw
            }
            _ => HostEvent::Continue,
        })
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, 0))?;
        frame.write_to(&mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_close_the_host() {
        let key = |code, modifiers| KeyEvent { code, modifiers };
        assert!(is_close_key(key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_close_key(key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_close_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_close_key(key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_close_key(key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
