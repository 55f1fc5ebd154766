use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures surfaced by catalog collaborators. The filter engine itself has
/// no error path.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Collaborator error: {0}")]
    Transport(anyhow::Error),
}

impl CatalogError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Recover a `CatalogError` carried inside an `anyhow::Error`, wrapping
    /// anything else as a transport failure.
    #[must_use]
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(catalog) => catalog,
            Err(other) => Self::Transport(other),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
