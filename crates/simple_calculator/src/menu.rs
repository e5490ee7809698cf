//! Calculator menu loop

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use deskutils_core::{CoreError, Prompter, Result};
use tracing::{info, warn};

use crate::history::{History, DEFAULT_HISTORY_FILE};
use crate::operation::Operation;

/// Calculator configuration
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// History log location
    pub history_path: PathBuf,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }
}

impl CalculatorConfig {
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }
}

const MENU: &str = "\n====== CLI Calculator ======\n\
1. Addition (+)\n\
2. Subtraction (-)\n\
3. Multiplication (*)\n\
4. Division (/)\n\
5. Modulo (%)\n\
6. Square Root (√)\n\
7. Power (x^y)\n\
8. Clear History\n\
9. View History\n\
0. Exit\n\
============================";

/// Run the menu until `0` or end of input
pub fn run<R, W, F>(prompter: &mut Prompter<R, W>, history: &History, mut now: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> NaiveDateTime,
{
    loop {
        writeln!(prompter.out(), "{}", MENU)?;
        let choice = match prompter.ask::<u32>("\nEnter your choice (0 to exit): ") {
            Ok(choice) => choice,
            Err(CoreError::EndOfInput) => break,
            Err(CoreError::InvalidInput(_)) => {
                writeln!(prompter.out(), "Invalid choice!")?;
                continue;
            }
            Err(e) => return Err(e),
        };

        let outcome = match choice {
            0 => break,
            8 => clear_history(prompter, history),
            9 => view_history(prompter, history),
            n => calculate(prompter, history, n, &mut now),
        };

        match outcome {
            Ok(()) => {}
            Err(CoreError::EndOfInput) => break,
            Err(e) => return Err(e),
        }
    }

    writeln!(prompter.out(), "Calculator closed.")?;
    Ok(())
}

/// Read operands for menu entry `choice`, or `None` for an unknown entry
fn read_operation<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, choice: u32) -> Result<Option<Operation>> {
    let op = match choice {
        1 => {
            let (a, b) = prompter.ask_pair("Enter two numbers: ")?;
            Operation::Addition(a, b)
        }
        2 => {
            let (a, b) = prompter.ask_pair("Enter two numbers: ")?;
            Operation::Subtraction(a, b)
        }
        3 => {
            let (a, b) = prompter.ask_pair("Enter two numbers: ")?;
            Operation::Multiplication(a, b)
        }
        4 => {
            let (a, b) = prompter.ask_pair("Enter dividend and divisor: ")?;
            Operation::Division(a, b)
        }
        5 => {
            let (x, y) = prompter.ask_pair("Enter two integers: ")?;
            Operation::Modulo(x, y)
        }
        6 => Operation::SquareRoot(prompter.ask("Enter number: ")?),
        7 => {
            let (a, b) = prompter.ask_pair("Enter base and exponent: ")?;
            Operation::Power(a, b)
        }
        _ => return Ok(None),
    };
    Ok(Some(op))
}

fn calculate<R, W, F>(prompter: &mut Prompter<R, W>, history: &History, choice: u32, now: &mut F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> NaiveDateTime,
{
    let op = match read_operation(prompter, choice) {
        Ok(Some(op)) => op,
        Ok(None) => {
            writeln!(prompter.out(), "Invalid choice!")?;
            return Ok(());
        }
        Err(CoreError::InvalidInput(token)) => {
            warn!("Rejected operand {:?}", token);
            writeln!(prompter.out(), "Invalid input!")?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let calc = match op.evaluate() {
        Ok(calc) => calc,
        Err(e @ (CoreError::DivisionByZero | CoreError::NegativeSquareRoot)) => {
            writeln!(prompter.out(), "Error: {}", e)?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    writeln!(prompter.out(), "{}", calc.display)?;
    if let Err(e) = history.append(&calc.entry, &now()) {
        warn!("Failed to append to {}: {}", history.path().display(), e);
        writeln!(prompter.out(), "Error: Could not open log file!")?;
    }
    Ok(())
}

fn clear_history<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, history: &History) -> Result<()> {
    match history.clear() {
        Ok(()) => {
            info!("History cleared");
            writeln!(prompter.out(), "History cleared successfully.")?;
        }
        Err(e) => {
            warn!("Failed to clear {}: {}", history.path().display(), e);
            writeln!(prompter.out(), "Error: Could not clear history!")?;
        }
    }
    Ok(())
}

fn view_history<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, history: &History) -> Result<()> {
    let lines = match history.read() {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Failed to read {}: {}", history.path().display(), e);
            writeln!(prompter.out(), "Error: Could not open history file.")?;
            return Ok(());
        }
    };

    let out = prompter.out();
    writeln!(out, "\n------ Calculation History ------")?;
    if lines.is_empty() {
        writeln!(out, "No history found.")?;
    }
    for line in &lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "\n---------------------------------")?;
    Ok(())
}
