use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("event API responded with status {status}")]
    Api { status: u16 },

    #[error("failed to decode event payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("page {page} is beyond the addressable result range")]
    PageOutOfRange { page: usize },

    #[error("invalid coordinate: lat={lat:?}, lng={lng:?}")]
    InvalidCoordinate { lat: String, lng: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
