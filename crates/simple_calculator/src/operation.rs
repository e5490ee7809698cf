//! Arithmetic operations and their history entries

use deskutils_core::{CoreError, Result};

/// One calculator operation with its operands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Addition(f64, f64),
    Subtraction(f64, f64),
    Multiplication(f64, f64),
    Division(f64, f64),
    /// Integer remainder, truncating toward zero
    Modulo(i64, i64),
    SquareRoot(f64),
    Power(f64, f64),
}

/// Outcome of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// Console line, e.g. `Result: 7.00`
    pub display: String,
    /// History entry without timestamp, e.g. `Addition: 3.00 + 4.00 = 7.00`
    pub entry: String,
}

impl Calculation {
    fn result(value: String, entry: String) -> Self {
        Self {
            display: format!("Result: {}", value),
            entry,
        }
    }
}

impl Operation {
    /// Evaluate the operation
    ///
    /// # Errors
    /// - `DivisionByZero` for division or modulo with a zero divisor
    /// - `NegativeSquareRoot` for square root of a negative number
    pub fn evaluate(&self) -> Result<Calculation> {
        let calc = match *self {
            Operation::Addition(a, b) => {
                let r = a + b;
                Calculation::result(format!("{:.2}", r), format!("Addition: {:.2} + {:.2} = {:.2}", a, b, r))
            }
            Operation::Subtraction(a, b) => {
                let r = a - b;
                Calculation::result(format!("{:.2}", r), format!("Subtraction: {:.2} - {:.2} = {:.2}", a, b, r))
            }
            Operation::Multiplication(a, b) => {
                let r = a * b;
                Calculation::result(format!("{:.2}", r), format!("Multiplication: {:.2} * {:.2} = {:.2}", a, b, r))
            }
            Operation::Division(a, b) => {
                if b == 0.0 {
                    return Err(CoreError::DivisionByZero);
                }
                let r = a / b;
                Calculation::result(format!("{:.2}", r), format!("Division: {:.2} / {:.2} = {:.2}", a, b, r))
            }
            Operation::Modulo(x, y) => {
                if y == 0 {
                    return Err(CoreError::DivisionByZero);
                }
                // i64::MIN % -1 overflows; the mathematical answer is 0
                let r = x.wrapping_rem(y);
                Calculation::result(r.to_string(), format!("Modulo: {} % {} = {}", x, y, r))
            }
            Operation::SquareRoot(a) => {
                if a < 0.0 {
                    return Err(CoreError::NegativeSquareRoot);
                }
                let r = a.sqrt();
                Calculation {
                    display: format!("Square root: {:.2}", r),
                    entry: format!("Square Root: √{:.2} = {:.2}", a, r),
                }
            }
            Operation::Power(a, b) => {
                let r = a.powf(b);
                Calculation::result(format!("{:.2}", r), format!("Power: {:.2} ^ {:.2} = {:.2}", a, b, r))
            }
        };
        Ok(calc)
    }
}
