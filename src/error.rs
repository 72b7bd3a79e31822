use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("`{url}` returned status {status}")]
    Api { status: u16, url: String },
    #[error("could not decode response from `{url}`: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not render report: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
