//! Pseudo-state error types

use thiserror::Error;

use crate::pseudo::PseudoState;

/// A pseudo-state that is not recognized, or not registered in the registry
/// it was looked up in
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pseudo-state `{identifier}`")]
pub struct UnknownStateError {
    pub identifier: String,
}

impl UnknownStateError {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl From<PseudoState> for UnknownStateError {
    fn from(state: PseudoState) -> Self {
        Self::new(state.identifier())
    }
}

/// A registry that cannot be built as configured
#[derive(Error, Debug)]
pub enum RegistryConfigurationError {
    /// Two states would tie in the cascade
    #[error("pseudo-states `{first}` and `{second}` share priority {priority}")]
    DuplicatePriority {
        priority: u32,
        first: PseudoState,
        second: PseudoState,
    },

    /// The same state was registered twice
    #[error("pseudo-state `{0}` is registered more than once")]
    DuplicateState(PseudoState),

    /// Priorities must be positive
    #[error("pseudo-state `{0}` has priority 0, priorities must be positive")]
    ZeroPriority(PseudoState),

    /// External names map one-to-one onto states
    #[error("pseudo-states `{first}` and `{second}` share external name `{name}`")]
    DuplicateName {
        name: String,
        first: PseudoState,
        second: PseudoState,
    },

    /// External names must be non-empty
    #[error("pseudo-state `{0}` has an empty external name")]
    EmptyName(PseudoState),

    /// A registry must describe at least one state
    #[error("pseudo-state registry has no states")]
    Empty,

    /// Malformed TOML configuration
    #[error("invalid registry configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors surfaced by style resolution and registry setup
#[derive(Error, Debug)]
pub enum StyleError {
    #[error(transparent)]
    UnknownState(#[from] UnknownStateError),

    #[error(transparent)]
    RegistryConfiguration(#[from] RegistryConfigurationError),
}

/// Result type for style operations
pub type Result<T> = std::result::Result<T, StyleError>;
