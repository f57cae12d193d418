//! Utility macros for the lexer.
//!
//! This module defines helper macros used by the recognizers:
//!
//! - `MK_STEP!` - Creates a step that emits nothing and moves to a state
//! - `MK_EMIT!` - Creates a step that emits a token and returns to dispatch
//! - `MK_HALT!` - Creates a step that emits a terminal token and stops
//!
//! These macros reduce boilerplate in the state machine.

/// Creates a step that emits no token.
///
/// # Arguments
///
/// * `$next` - The state to run next
///
/// # Example
///
/// ```ignore
/// return Ok(MK_STEP!(State::Start));
/// ```
#[macro_export]
macro_rules! MK_STEP {
    ($next:expr) => {
        $crate::lexer::lexer::Step {
            token: None,
            next: Some($next),
        }
    };
}

/// Creates a step that emits `$token` and hands control back to dispatch.
///
/// # Example
///
/// ```ignore
/// return Ok(MK_EMIT!(Token::Number { lexeme }));
/// ```
#[macro_export]
macro_rules! MK_EMIT {
    ($token:expr) => {
        $crate::lexer::lexer::Step {
            token: Some($token),
            next: Some($crate::lexer::lexer::State::Start),
        }
    };
}

/// Creates a step that emits `$token` and stops the machine.
#[macro_export]
macro_rules! MK_HALT {
    ($token:expr) => {
        $crate::lexer::lexer::Step {
            token: Some($token),
            next: None,
        }
    };
}
