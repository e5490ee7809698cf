//! Crossterm-backed key poller
//!
//! All raw-mode toggling for the clock happens here. Raw mode is held only
//! for the duration of a single poll.

use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use deskutils_core::terminal::CTRL_C;
use deskutils_core::{CoreError, KeyPoller, Result};
use tracing::warn;

use crate::raw_mode::RawModeGuard;

/// Polls the real terminal for single key presses
pub struct CrosstermKeys {
    /// Set once raw mode turned out to be unavailable (e.g. piped stdin)
    fallback: bool,
}

impl CrosstermKeys {
    pub fn new() -> Self {
        Self { fallback: false }
    }
}

impl Default for CrosstermKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyPoller for CrosstermKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>> {
        if self.fallback {
            thread::sleep(timeout);
            return Ok(None);
        }

        let _guard = match RawModeGuard::enable() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Raw mode not available: {}. Key controls disabled.", e);
                self.fallback = true;
                thread::sleep(timeout);
                return Ok(None);
            }
        };

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining).map_err(terminal_error)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read().map_err(terminal_error)? {
                if key.kind == KeyEventKind::Press {
                    if let Some(c) = key_to_char(key) {
                        return Ok(Some(c));
                    }
                }
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }
}

/// Map a key event to the character the clock cares about
fn key_to_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(CTRL_C),
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

fn terminal_error(err: std::io::Error) -> CoreError {
    CoreError::Terminal(err.to_string())
}
