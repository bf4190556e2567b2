use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bad buffer layout: {0}")]
    Layout(String),
    #[error("bad patch geometry: {0}")]
    Geometry(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
