use thiserror::Error;

/// Every fallible operation of the engine returns this `Result`.
pub type Result<T> = std::result::Result<T, GameError>;

/// Failures raised by the engine.
///
/// None of them are recovered from internally: a transition either succeeds and returns a
/// brand new state, or fails and leaves the state it was called on untouched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GameError {
    /// A precondition was violated, e.g. a multiset of the wrong size, or an action that the
    /// current state forbids.
    #[error("{0}")]
    InvalidArgument(String),
    /// A slot or a station id outside of its valid domain.
    #[error("Index {index} is out of range (size {len}).")]
    IndexOutOfRange { index: usize, len: usize },
    /// The external player capability could not answer.
    #[error(transparent)]
    Player(#[from] PlayerError),
}

impl GameError {
    #[inline]
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GameError::InvalidArgument(reason.into())
    }
}

/// Failures of a [`crate::player::Player`] implementation.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum PlayerError {
    #[error("The player disconnected before answering.")]
    Disconnected,
    #[error("The player answered with a response that does not match the request.")]
    UnexpectedResponse,
}

/// Fails with [`GameError::IndexOutOfRange`] unless `index < len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(GameError::IndexOutOfRange { index, len })
    }
}
