//! The crate's error taxonomy.
//!
//! Four variants, matching the four ways a solve attempt can fail to
//! produce the success output in [`crate::solver`]: a malformed puzzle
//! file, a syntactically valid but semantically inconsistent one, a puzzle
//! the search engine exhausts without finding a goal, and a broken internal
//! invariant (a bug, not a user-facing condition).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed puzzle input: {0}")]
    InputMalformed(String),

    #[error("inconsistent puzzle input: {0}")]
    InputInconsistent(String),

    #[error("no solution found within the search limit")]
    Unsolvable,

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Log `message` at error level as an `InternalInvariant`, then panic. Every
/// call site reaches this from a branch that can only execute on programmer
/// error (e.g. `board_state::apply_action` dispatching an `Action` its own
/// `neighbors()` would never produce), so unwinding is always the right
/// response — the `tracing::error!` just leaves a trace of what was
/// violated before the process goes down.
macro_rules! bail_internal {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        let err = crate::error::GameError::InternalInvariant(msg);
        tracing::error!("{err}");
        panic!("{err}");
    }};
}

pub(crate) use bail_internal;
