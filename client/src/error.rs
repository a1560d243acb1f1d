use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with `success: false`; carries its message.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
}
