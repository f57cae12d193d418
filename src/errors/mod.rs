//! Error types and error handling for the lexer.
//!
//! This module defines the error types raised while reading and classifying
//! input. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for I/O, decoding and lexical failures
//! - Conversion of a failure into the terminal `Error` token
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
