//! Pseudo-state priority registry
//!
//! Interaction states (hover, press, focus) can be active at the same time
//! and each may assert a value for the same style property. The registry
//! ranks them once so every component resolves the conflict the same way:
//! a pressed and hovered control looks pressed, a focused and pressed
//! control keeps its focus treatment.
//!
//! | state   | identifier   | external name | priority |
//! |---------|--------------|---------------|----------|
//! | `Hover` | `hoverStyle` | `hover`       | 1        |
//! | `Press` | `pressStyle` | `active`      | 2        |
//! | `Focus` | `focusStyle` | `focus`       | 3        |
//!
//! A registry is built once at startup (see [`PseudoRegistry::standard`],
//! [`PseudoRegistry::builder`] or `PseudoRegistry::from_toml_str`) and then
//! only read; share it by reference or `Arc`.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{RegistryConfigurationError, UnknownStateError};

/// A recognized interaction state
///
/// States have no intrinsic order; rank them through a [`PseudoRegistry`].
///
/// ```compile_fail
/// use glint_style::PseudoState;
///
/// let _ = PseudoState::Hover < PseudoState::Focus;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoState {
    /// Pointer over the element
    Hover,
    /// Pointer or key held down on the element (`:active`)
    Press,
    /// Element has input focus
    Focus,
}

impl PseudoState {
    /// Every recognized state, in reference declaration order
    pub const ALL: [PseudoState; 3] = [PseudoState::Hover, PseudoState::Press, PseudoState::Focus];

    pub(crate) const COUNT: usize = Self::ALL.len();

    /// Stable internal key, e.g. `hoverStyle`
    pub const fn identifier(self) -> &'static str {
        match self {
            PseudoState::Hover => "hoverStyle",
            PseudoState::Press => "pressStyle",
            PseudoState::Focus => "focusStyle",
        }
    }

    /// Canonical CSS-facing name, e.g. `active` for [`PseudoState::Press`]
    pub const fn default_name(self) -> &'static str {
        match self {
            PseudoState::Hover => "hover",
            PseudoState::Press => "active",
            PseudoState::Focus => "focus",
        }
    }

    /// Parse an internal identifier (`hoverStyle`, `pressStyle`, `focusStyle`)
    pub fn from_identifier(identifier: &str) -> Result<Self, UnknownStateError> {
        Self::ALL
            .into_iter()
            .find(|state| state.identifier() == identifier)
            .ok_or_else(|| UnknownStateError::new(identifier))
    }

    /// Parse a pseudo-class name (`hover`, `active`, `focus`), ignoring case
    pub fn from_external_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.default_name().eq_ignore_ascii_case(name))
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            PseudoState::Hover => 0,
            PseudoState::Press => 1,
            PseudoState::Focus => 2,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for PseudoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for PseudoState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s)
    }
}

/// The set of pseudo-states currently true for one element
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActiveStateSet {
    bits: u8,
}

impl ActiveStateSet {
    pub const EMPTY: ActiveStateSet = ActiveStateSet { bits: 0 };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Return a copy of this set with `state` added
    #[must_use]
    pub const fn with(self, state: PseudoState) -> Self {
        Self {
            bits: self.bits | state.bit(),
        }
    }

    pub fn insert(&mut self, state: PseudoState) {
        self.bits |= state.bit();
    }

    pub fn remove(&mut self, state: PseudoState) {
        self.bits &= !state.bit();
    }

    /// Set or clear `state` depending on `active`
    pub fn set(&mut self, state: PseudoState, active: bool) {
        if active {
            self.insert(state);
        } else {
            self.remove(state);
        }
    }

    pub const fn contains(&self, state: PseudoState) -> bool {
        self.bits & state.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = PseudoState> + '_ {
        PseudoState::ALL
            .into_iter()
            .filter(move |state| self.contains(*state))
    }
}

impl FromIterator<PseudoState> for ActiveStateSet {
    fn from_iter<I: IntoIterator<Item = PseudoState>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl fmt::Debug for ActiveStateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One registered pseudo-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoStateDescriptor {
    pub state: PseudoState,
    /// External (CSS-facing) name
    pub name: String,
    /// Cascade priority; higher wins
    pub priority: u32,
}

impl PseudoStateDescriptor {
    /// Stable internal key, e.g. `pressStyle`
    pub fn identifier(&self) -> &'static str {
        self.state.identifier()
    }
}

/// Immutable, priority-ordered pseudo-state table
#[derive(Debug, Clone)]
pub struct PseudoRegistry {
    /// Sorted by ascending priority
    descriptors: SmallVec<[PseudoStateDescriptor; 3]>,
    /// Position in `descriptors` for each state, by `PseudoState::index`
    slots: [Option<usize>; PseudoState::COUNT],
}

impl PseudoRegistry {
    /// The reference ordering: hover < press < focus
    pub fn standard() -> Self {
        let descriptors: SmallVec<[PseudoStateDescriptor; 3]> = PseudoState::ALL
            .into_iter()
            .zip(1u32..)
            .map(|(state, priority)| PseudoStateDescriptor {
                state,
                name: state.default_name().to_string(),
                priority,
            })
            .collect();
        Self::from_sorted(descriptors)
    }

    /// Start building a custom registry
    pub fn builder() -> PseudoRegistryBuilder {
        PseudoRegistryBuilder::new()
    }

    fn from_sorted(descriptors: SmallVec<[PseudoStateDescriptor; 3]>) -> Self {
        let mut slots = [None; PseudoState::COUNT];
        for (position, descriptor) in descriptors.iter().enumerate() {
            slots[descriptor.state.index()] = Some(position);
        }
        Self { descriptors, slots }
    }

    /// Look up a registered state
    pub fn describe(
        &self,
        state: PseudoState,
    ) -> Result<&PseudoStateDescriptor, UnknownStateError> {
        self.slots[state.index()]
            .map(|position| &self.descriptors[position])
            .ok_or_else(|| UnknownStateError::from(state))
    }

    /// Look up a registered state by its internal identifier
    pub fn describe_identifier(
        &self,
        identifier: &str,
    ) -> Result<&PseudoStateDescriptor, UnknownStateError> {
        self.describe(PseudoState::from_identifier(identifier)?)
    }

    /// Look up a registered state by its external name (e.g. `active`)
    pub fn describe_name(&self, name: &str) -> Result<&PseudoStateDescriptor, UnknownStateError> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownStateError::new(name))
    }

    /// Cascade priority of a registered state
    pub fn priority(&self, state: PseudoState) -> Result<u32, UnknownStateError> {
        self.describe(state).map(|descriptor| descriptor.priority)
    }

    pub fn contains(&self, state: PseudoState) -> bool {
        self.slots[state.index()].is_some()
    }

    /// Registered states, lowest priority first
    pub fn ordered(&self) -> impl Iterator<Item = &PseudoStateDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The highest-priority member of `active`, if any.
    ///
    /// Fails if `active` contains a state this registry does not describe.
    pub fn highest(
        &self,
        active: ActiveStateSet,
    ) -> Result<Option<PseudoState>, UnknownStateError> {
        let mut best: Option<(u32, PseudoState)> = None;
        for state in active.iter() {
            let priority = self.priority(state)?;
            if best.map_or(true, |(current, _)| priority > current) {
                best = Some((priority, state));
            }
        }
        Ok(best.map(|(_, state)| state))
    }
}

impl Default for PseudoRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for custom registries
///
/// ```rust
/// use glint_style::{PseudoRegistry, PseudoState};
///
/// // Focus below press for a touch-first product
/// let registry = PseudoRegistry::builder()
///     .state(PseudoState::Hover, 1)
///     .state(PseudoState::Focus, 2)
///     .state(PseudoState::Press, 3)
///     .build()
///     .unwrap();
///
/// let press = registry.priority(PseudoState::Press).unwrap();
/// let focus = registry.priority(PseudoState::Focus).unwrap();
/// assert!(press > focus);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PseudoRegistryBuilder {
    entries: Vec<PseudoStateDescriptor>,
}

impl PseudoRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state under its canonical external name
    pub fn state(self, state: PseudoState, priority: u32) -> Self {
        self.named(state, state.default_name(), priority)
    }

    /// Register a state under a custom external name
    pub fn named(mut self, state: PseudoState, name: impl Into<String>, priority: u32) -> Self {
        self.entries.push(PseudoStateDescriptor {
            state,
            name: name.into(),
            priority,
        });
        self
    }

    /// Validate and freeze the registry.
    ///
    /// Rejects empty registries, zero priorities, empty or shared names,
    /// repeated states and shared priorities; ties are never resolved
    /// silently. Names are compared ignoring ASCII case, as
    /// [`PseudoRegistry::describe_name`] looks them up.
    pub fn build(self) -> Result<PseudoRegistry, RegistryConfigurationError> {
        if self.entries.is_empty() {
            return Err(RegistryConfigurationError::Empty);
        }

        let mut seen = [false; PseudoState::COUNT];
        for descriptor in &self.entries {
            if descriptor.priority == 0 {
                return Err(RegistryConfigurationError::ZeroPriority(descriptor.state));
            }
            if descriptor.name.trim().is_empty() {
                return Err(RegistryConfigurationError::EmptyName(descriptor.state));
            }
            let slot = &mut seen[descriptor.state.index()];
            if *slot {
                return Err(RegistryConfigurationError::DuplicateState(descriptor.state));
            }
            *slot = true;
        }

        for (position, descriptor) in self.entries.iter().enumerate() {
            if let Some(earlier) = self.entries[..position]
                .iter()
                .find(|earlier| earlier.name.eq_ignore_ascii_case(&descriptor.name))
            {
                return Err(RegistryConfigurationError::DuplicateName {
                    name: descriptor.name.clone(),
                    first: earlier.state,
                    second: descriptor.state,
                });
            }
        }

        let mut descriptors: SmallVec<[PseudoStateDescriptor; 3]> =
            self.entries.into_iter().collect();
        descriptors.sort_by_key(|descriptor| descriptor.priority);

        if let Some(pair) = descriptors
            .windows(2)
            .find(|pair| pair[0].priority == pair[1].priority)
        {
            return Err(RegistryConfigurationError::DuplicatePriority {
                priority: pair[0].priority,
                first: pair[0].state,
                second: pair[1].state,
            });
        }

        let registry = PseudoRegistry::from_sorted(descriptors);
        debug!(
            states = ?registry.ordered().map(|d| (d.state, d.priority)).collect::<Vec<_>>(),
            "pseudo-state registry built"
        );
        Ok(registry)
    }
}
