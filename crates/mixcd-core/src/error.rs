use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid release date: {0:?}")]
    InvalidReleaseDate(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
