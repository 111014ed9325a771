use thiserror::Error;

use crate::params::ParamType;

#[derive(Debug, Error)]
pub enum Error {
    /// A value was supplied for a name the command never declared.
    #[error("parameter {name:?} is not declared by this command")]
    UndeclaredParameter { name: String },

    #[error("parameter {name:?} expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ParamType,
        actual: ParamType,
    },

    #[error("parameter {name:?} has no value")]
    MissingParameter { name: String },

    #[error("parameter {name:?} is declared twice on {keyword:?}")]
    DuplicateParameter { keyword: String, name: String },
}

impl Error {
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
