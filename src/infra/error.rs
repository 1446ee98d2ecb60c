use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("session expired or missing; sign in again")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 422 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            _ => ApiError::Api { status, message },
        }
    }
}
