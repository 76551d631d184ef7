//! Glint Core Runtime
//!
//! This crate provides the state primitives every interactive Glint
//! component runs on each pointer or focus event:
//!
//! - **Shallow comparison**: [`ShallowEq`] compares scalars by value and
//!   shared composites by identity
//! - **Partial updates**: [`Coalesce`] merges a patch into a state shape,
//!   usually generated with `#[derive(ShallowState)]`
//! - **Coalesced state**: [`CoalescedState`] replaces its state object only
//!   when a patch actually changes something
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glint_core::{CoalescedState, ShallowState};
//!
//! #[derive(Clone, Debug, Default, PartialEq, ShallowState)]
//! struct Flags {
//!     hover: bool,
//!     pressed: bool,
//! }
//!
//! let mut state = CoalescedState::new(Flags::default());
//! let before = state.snapshot();
//!
//! // Nothing differs: same object, no listeners run
//! state.apply(&FlagsPatch::new().with_hover(false));
//! assert!(Arc::ptr_eq(&before, state.current()));
//!
//! // Real change: a fresh object is committed
//! state.apply(&FlagsPatch::new().with_hover(true));
//! assert!(!Arc::ptr_eq(&before, state.current()));
//! assert!(state.get().hover);
//! ```

// Lets #[derive(ShallowState)] name `::glint_core` from inside this crate
extern crate self as glint_core;

pub mod coalesce;
pub mod events;
pub mod state;

pub use coalesce::{Coalesce, ShallowEq};
pub use events::EventType;
pub use state::{ChangeListener, CoalescedState, ListenerId};

#[cfg(feature = "derive")]
pub use glint_macros::ShallowState;
