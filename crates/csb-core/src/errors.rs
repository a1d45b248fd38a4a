/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type. Command handlers never
/// surface these to users verbatim; each failure collapses into one canned reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
