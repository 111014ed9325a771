use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("reaction watcher lookup failed: {0}")]
    Store(#[from] minilla_store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
