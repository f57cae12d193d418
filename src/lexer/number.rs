//! Conversion of `Number` lexemes for consumers.
//!
//! The lexer emits numeric text verbatim; this is where a consumer turns it
//! into a value and gets a diagnostic when the shape does not describe one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::ErrorImpl;

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?[0-9]+(\.[0-9]*)?$").unwrap();
    static ref HEXADECIMAL: Regex = Regex::new(r"^([+-]?)0[xX]([0-9a-fA-F]+)$").unwrap();
}

/// Converts a `Number` lexeme into its value.
///
/// Decimal lexemes may carry a fraction; hexadecimal lexemes must be whole.
/// Either shape fails when its value does not fit in a finite `f64`.
pub fn parse_number(lexeme: &str) -> Result<f64, ErrorImpl> {
    let invalid = || ErrorImpl::NumberParseError {
        token: String::from(lexeme),
    };

    let value = if let Some(captures) = HEXADECIMAL.captures(lexeme) {
        let magnitude = captures[2]
            .chars()
            .filter_map(|digit| digit.to_digit(16))
            .fold(0.0, |value, digit| value * 16.0 + f64::from(digit));
        if &captures[1] == "-" {
            -magnitude
        } else {
            magnitude
        }
    } else if DECIMAL.is_match(lexeme) {
        lexeme.parse::<f64>().map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}
