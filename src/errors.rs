use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("secret name must not be empty")]
    EmptyName,
    #[error("flavor `{flavor}` is already bound to a different constructor")]
    DuplicateFlavor { flavor: String },
    #[error("flavor `{flavor}` is not registered")]
    UnknownFlavor { flavor: String },
    #[error("stored entry for secret `{name}` is corrupt: {reason}")]
    CorruptEntry { name: String, reason: String },
    #[error("secret `{name}` already exists")]
    SecretAlreadyExists { name: String },
    #[error("secret `{name}` not found")]
    SecretNotFound { name: String },
    #[error("invalid content for secret `{name}`: {reason}")]
    InvalidContent { name: String, reason: String },
    #[error("storage error: {0}")]
    Storage(String),
}
