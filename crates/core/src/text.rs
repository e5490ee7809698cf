//! Lenient text file reading
//!
//! Data files are hand-edited and may carry Latin-1 bytes. Invalid UTF-8 is
//! replaced with U+FFFD instead of failing the whole load.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Read `path` as text, replacing invalid UTF-8 sequences
///
/// # Errors
/// - `Io` when the file is missing or unreadable
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8_lossy(&bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!("{} is not valid UTF-8; replaced invalid bytes", path.display());
            text
        }
    };
    Ok(text)
}
