#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid mac address: {0}")]
    InvalidMacAddress(String),
}

pub type Result<T> = std::result::Result<T, Error>;
