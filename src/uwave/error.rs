use url::Url;

/// Failures talking to the uWave feed. None of these are retried.
#[derive(thiserror::Error, Debug)]
pub enum UwaveError {
    #[error("Bad client configuration: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{1} answered {0}")]
    Status(u16, Url),

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: Url,
        source: serde_json::Error,
    },
}

impl From<UwaveError> for std::io::Error {
    fn from(e: UwaveError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, e)
    }
}

pub type UwaveResult<T> = Result<T, UwaveError>;
