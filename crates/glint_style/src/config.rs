//! Pseudo-state registry configuration
//!
//! Products that need a different cascade can describe it in TOML instead of
//! code:
//!
//! ```toml
//! [[states]]
//! identifier = "hoverStyle"
//! priority = 1
//!
//! [[states]]
//! identifier = "pressStyle"
//! name = "active"
//! priority = 2
//! ```
//!
//! The configuration is validated exactly like [`PseudoRegistryBuilder`];
//! any problem is returned at startup rather than resolved silently.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RegistryConfigurationError, Result};
use crate::pseudo::{PseudoRegistry, PseudoRegistryBuilder, PseudoState};

/// Top-level registry configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub states: Vec<StateConfig>,
}

/// One `[[states]]` entry
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Internal identifier, e.g. `focusStyle`
    pub identifier: String,
    /// External name; defaults to the state's canonical name
    #[serde(default)]
    pub name: Option<String>,
    pub priority: u32,
}

impl RegistryConfig {
    /// Parse a TOML document
    pub fn parse(src: &str) -> std::result::Result<Self, RegistryConfigurationError> {
        Ok(toml::from_str(src)?)
    }

    /// Configuration equivalent to [`PseudoRegistry::standard`]
    pub fn standard() -> Self {
        let states = PseudoRegistry::standard()
            .ordered()
            .map(|descriptor| StateConfig {
                identifier: descriptor.identifier().to_string(),
                name: Some(descriptor.name.clone()),
                priority: descriptor.priority,
            })
            .collect();
        Self { states }
    }

    /// Validate and build the registry
    pub fn build(&self) -> Result<PseudoRegistry> {
        self.builder()
            .and_then(|builder| Ok(builder.build()?))
            .map_err(|err| {
                warn!(error = %err, "rejected pseudo-state registry configuration");
                err
            })
    }

    fn builder(&self) -> Result<PseudoRegistryBuilder> {
        let mut builder = PseudoRegistryBuilder::new();
        for entry in &self.states {
            let state = PseudoState::from_identifier(&entry.identifier)?;
            let name = entry
                .name
                .clone()
                .unwrap_or_else(|| state.default_name().to_string());
            builder = builder.named(state, name, entry.priority);
        }
        Ok(builder)
    }
}

impl PseudoRegistry {
    /// Build a registry from a TOML configuration document
    pub fn from_toml_str(src: &str) -> Result<Self> {
        RegistryConfig::parse(src)?.build()
    }
}
