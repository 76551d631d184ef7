//! Glint pseudo-state styling
//!
//! Interactive components can be hovered, pressed and focused at the same
//! time, and each of those pseudo-states may override the same style
//! property. This crate provides:
//!
//! - **Priority registry**: [`PseudoRegistry`] ranks the pseudo-states
//!   (hover < press < focus by default), built once at startup from code or
//!   TOML and shared read-only
//! - **Conflict resolution**: [`PseudoRegistry::resolve_conflict`] picks the
//!   winning value, [`StateStyles`] layers overrides over a base style
//! - **Interaction state**: [`Interaction`] turns pointer/focus events into
//!   coalesced [`InteractionState`] updates
//!
//! # Example
//!
//! ```rust
//! use glint_core::events::event_types::*;
//! use glint_style::{Interaction, PseudoRegistry, PseudoState, StateStyles};
//!
//! let registry = PseudoRegistry::standard();
//! let styles = StateStyles::new()
//!     .base("backgroundColor", "$background")
//!     .on(PseudoState::Hover, "backgroundColor", "$backgroundHover")
//!     .on(PseudoState::Press, "backgroundColor", "$backgroundPress");
//!
//! let mut button = Interaction::new();
//! button.handle_event(POINTER_ENTER);
//! button.handle_event(POINTER_DOWN);
//!
//! // Press outranks hover
//! let bg = styles
//!     .resolve_property(&registry, button.active_states(), "backgroundColor")
//!     .unwrap();
//! assert_eq!(bg, Some(&"$backgroundPress"));
//!
//! // A redundant event changes nothing
//! assert!(!button.handle_event(POINTER_DOWN));
//! ```

pub mod config;
pub mod error;
pub mod interaction;
pub mod pseudo;
pub mod resolve;

pub use config::{RegistryConfig, StateConfig};
pub use error::{RegistryConfigurationError, Result, StyleError, UnknownStateError};
pub use interaction::{interaction_patch, Interaction, InteractionState, InteractionStatePatch};
pub use pseudo::{
    ActiveStateSet, PseudoRegistry, PseudoRegistryBuilder, PseudoState, PseudoStateDescriptor,
};
pub use resolve::StateStyles;
