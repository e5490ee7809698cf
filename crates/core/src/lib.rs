//! Deskutils Core - Shared plumbing for the desk utilities
//!
//! This crate provides:
//! - Error types
//! - Logging bootstrap
//! - Line-oriented prompt reader for menu loops
//! - Key polling abstraction for raw-mode keyboard input
//! - Lenient text file reading

pub mod error;
pub mod logging;
pub mod prompt;
pub mod terminal;
pub mod text;

// Re-export common types
pub use error::{CoreError, Result};
pub use prompt::Prompter;
pub use terminal::{KeyPoller, ScriptedKeys};
pub use text::read_lossy;
