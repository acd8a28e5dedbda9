// Computation Errors
// Typed failures for degenerate inputs (zero divisors, out-of-range values).
//
// Every error here is a local, synchronous computation failure: the input is
// wrong or degenerate, not transient. Retrying never helps. Callers choose
// the fallback display ("N/A" vs 0%); the engine never picks one.

use std::fmt;

// ============================================================================
// ENGINE ERROR
// ============================================================================

/// Errors produced by the progress & urgency engine and the report layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A ratio was requested against a zero (or negative) denominator.
    /// Example: a credit facility with `limit == 0`, a goal with
    /// `target_amount == 0`, a savings rate over zero income.
    DivisionByZero {
        /// What was being divided (e.g., "credit facility limit")
        what: &'static str,
    },

    /// A field value falls outside its valid range, or a date failed to
    /// parse. Example: negative `amount`, `target_amount <= 0`.
    InvalidRange {
        /// Field that failed (e.g., "amount")
        field: &'static str,
        /// Human-readable description of the violation
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DivisionByZero { what } => {
                write!(f, "division by zero: {} is zero", what)
            }
            EngineError::InvalidRange { field, message } => {
                write!(f, "invalid range for {}: {}", field, message)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result alias for engine computations.
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// CHAT ERROR
// ============================================================================

/// Errors produced by the chat conversation state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// An event arrived that the current state does not accept.
    InvalidTransition {
        /// State the conversation was in
        state: &'static str,
        /// Event that was attempted
        event: &'static str,
    },

    /// A message submission with no visible content.
    EmptyMessage,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::InvalidTransition { state, event } => {
                write!(f, "invalid chat transition: {} not accepted in state {}", event, state)
            }
            ChatError::EmptyMessage => write!(f, "message content is empty"),
        }
    }
}

impl std::error::Error for ChatError {}

// ============================================================================
// TESTS
// ============================================================================
