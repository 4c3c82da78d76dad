use thiserror::Error;

use crate::spec::component::Role;

/// Declared input that cannot produce a well-formed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{what} must not be empty")]
    EmptyList { what: &'static str },
    #[error("duplicate key '{key}' under '{parent}'")]
    DuplicateKey { parent: String, key: String },
    #[error("invalid key '{key}'")]
    InvalidKey { key: String },
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
    #[error("value of '{field}' is out of range")]
    OutOfRange { field: &'static str },
}

/// Builder API misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("cannot add a child to leaf component with role '{role}'")]
    ChildOnLeaf { role: Role },
}

/// Error returned by every fallible build call. A build that fails never
/// hands back a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
}

impl BuildError {
    pub(crate) fn empty(what: &'static str) -> Self {
        ConfigurationError::EmptyList { what }.into()
    }

    pub fn is_usage_error(&self) -> bool {
        matches!(self, BuildError::Usage(_))
    }
}
