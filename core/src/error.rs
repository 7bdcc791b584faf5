use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Please enter a valid number between 1 and 100")]
    InvalidGuess,
    #[error("Please wait for the current request to finish")]
    Busy,
    #[error("No active game. Start a new game first.")]
    NoActiveGame,
    #[error("A game is already in progress")]
    AlreadyActive,
    #[error("{0}")]
    Service(String),
    #[error("Failed to connect to server")]
    Transport,
}

impl ClientError {
    /// Errors that came back from (or on the way to) the scoring service.
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Transport)
    }
}

pub type Result<T> = core::result::Result<T, ClientError>;
