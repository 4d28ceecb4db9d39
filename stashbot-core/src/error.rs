use thiserror::Error;

#[derive(Error, Debug)]
pub enum StashError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StashError>;
