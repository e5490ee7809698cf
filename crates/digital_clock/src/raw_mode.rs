//! Raw mode terminal guard for crossterm
//!
//! Restores normal mode on drop, including when unwinding from a panic.

use crossterm::terminal;

/// Raw mode held for the lifetime of the guard.
///
/// Scope one guard to a single key poll, never to the whole clock loop.
/// In raw mode `\n` no longer returns the carriage, so frames must be
/// printed with the terminal back in line mode. Ctrl+C only arrives as a
/// signal outside raw mode, so between polls the process stays killable.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Switch the terminal to raw mode: unbuffered, no echo, no signals
    pub fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort restore - ignore errors during cleanup
        let _ = terminal::disable_raw_mode();
    }
}
