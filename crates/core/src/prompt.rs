//! Line-oriented prompt reader for menu-driven tools
//!
//! Wraps an input/output pair so menu loops can be driven by real stdin or
//! by an in-memory cursor in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::error::{CoreError, Result};

/// Prompt helper over any `BufRead` input and `Write` output
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create new prompter from an input/output pair
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Output sink, for `writeln!` from menu code
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter and hand back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a prompt without newline and flush so it shows before input
    pub fn prompt(&mut self, msg: impl Display) -> Result<()> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line with the line terminator stripped
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD, so a stray Latin-1
    /// byte reaches the caller as ordinary (unparsable) text.
    ///
    /// # Errors
    /// - `EndOfInput` once the input is exhausted
    pub fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(CoreError::EndOfInput);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("Input line is not valid UTF-8; replacing invalid bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(line)
    }

    /// Prompt, then read one raw line
    pub fn ask_line(&mut self, msg: impl Display) -> Result<String> {
        self.prompt(msg)?;
        self.read_line()
    }

    /// Prompt, then parse a single whitespace-separated value
    pub fn ask<T: FromStr>(&mut self, msg: impl Display) -> Result<T> {
        self.prompt(msg)?;
        let mut values = self.read_values::<T>(1)?;
        values.pop().ok_or_else(|| CoreError::InvalidInput(String::new()))
    }

    /// Prompt, then parse two whitespace-separated values
    pub fn ask_pair<T: FromStr>(&mut self, msg: impl Display) -> Result<(T, T)> {
        self.prompt(msg)?;
        let mut values = self.read_values::<T>(2)?.into_iter();
        match (values.next(), values.next()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(CoreError::InvalidInput(String::new())),
        }
    }

    /// Read `count` values, spanning lines if needed
    ///
    /// Blank lines are skipped. Extra tokens on the last line read are
    /// discarded so the next prompt starts on a fresh line.
    pub fn read_values<T: FromStr>(&mut self, count: usize) -> Result<Vec<T>> {
        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            let line = self.read_line()?;
            for token in line.split_whitespace() {
                if values.len() == count {
                    break;
                }
                let value = token
                    .parse::<T>()
                    .map_err(|_| CoreError::InvalidInput(token.to_string()))?;
                values.push(value);
            }
        }
        Ok(values)
    }
}
