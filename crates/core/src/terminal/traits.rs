//! Key poller trait

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{CoreError, Result};

/// Character reported for Ctrl+C while the terminal is in raw mode
pub const CTRL_C: char = '\u{3}';

/// Non-blocking single-keypress source
pub trait KeyPoller {
    /// Wait at most `timeout` for one key press
    ///
    /// Returns `Ok(None)` once the timeout elapsed without input. A key may
    /// be returned early, before the full timeout.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>>;
}

/// Scripted key poller for testing
///
/// Each poll pops the next scripted outcome without sleeping. Running past
/// the end of the script is reported as `EndOfInput` so a loop under test
/// can never spin forever.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<char>>,
    timeouts: Vec<Duration>,
}

impl ScriptedKeys {
    /// Create poller from a list of poll outcomes
    pub fn new(script: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            timeouts: Vec::new(),
        }
    }

    /// Timeouts passed to each poll so far
    pub fn timeouts(&self) -> &[Duration] {
        &self.timeouts
    }

    /// Number of scripted outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeyPoller for ScriptedKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>> {
        self.timeouts.push(timeout);
        self.script.pop_front().ok_or(CoreError::EndOfInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_keys() {
        let mut keys = ScriptedKeys::new([None, Some('h'), Some('q')]);
        let tick = Duration::from_millis(1000);
        assert_eq!(keys.poll_key(tick).unwrap(), None);
        assert_eq!(keys.poll_key(tick).unwrap(), Some('h'));
        assert_eq!(keys.remaining(), 1);
        assert_eq!(keys.poll_key(tick).unwrap(), Some('q'));
        assert_eq!(keys.timeouts().len(), 3);
    }

    #[test]
    fn test_exhausted_script() {
        let mut keys = ScriptedKeys::new([]);
        let result = keys.poll_key(Duration::ZERO);
        assert!(matches!(result, Err(CoreError::EndOfInput)));
    }
}
