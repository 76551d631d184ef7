//! Pseudo-state conflict resolution
//!
//! When several active pseudo-states assert a value for the same property,
//! the one with the highest registry priority wins. Properties no active
//! state asserts fall back to the element's base style.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::UnknownStateError;
use crate::pseudo::{ActiveStateSet, PseudoRegistry, PseudoState};

impl PseudoRegistry {
    /// Pick the value for `property` among the active states that assert it.
    ///
    /// - No active state asserts the property: `Ok(None)`, the caller falls
    ///   back to its base value.
    /// - Exactly one does: its value, without consulting priority.
    /// - Several do: the value of the highest-priority state. Every
    ///   competing state must be registered.
    ///
    /// Entries for inactive states are ignored. If the same state appears
    /// more than once, its last entry is used and it still counts as a
    /// single asserting state.
    pub fn resolve_conflict<'v, V, I>(
        &self,
        active: ActiveStateSet,
        property: &str,
        values_by_state: I,
    ) -> Result<Option<&'v V>, UnknownStateError>
    where
        I: IntoIterator<Item = (PseudoState, &'v V)>,
    {
        // Last entry per state, in declaration order
        let mut latest: [Option<&'v V>; PseudoState::COUNT] = [None; PseudoState::COUNT];
        for (state, value) in values_by_state {
            if active.contains(state) {
                latest[state.index()] = Some(value);
            }
        }
        let asserting: SmallVec<[(PseudoState, &'v V); 3]> = PseudoState::ALL
            .into_iter()
            .filter_map(|state| latest[state.index()].map(|value| (state, value)))
            .collect();

        match asserting.as_slice() {
            [] => Ok(None),
            [(_, value)] => Ok(Some(*value)),
            contested => {
                let mut winner: Option<(u32, PseudoState, &'v V)> = None;
                for &(state, value) in contested {
                    let priority = self.priority(state)?;
                    if winner.map_or(true, |(best, _, _)| priority > best) {
                        winner = Some((priority, state, value));
                    }
                }
                Ok(winner.map(|(priority, state, value)| {
                    trace!(property, winner = %state, priority, "pseudo-state conflict resolved");
                    value
                }))
            }
        }
    }
}

/// Base style plus per-pseudo-state overrides for one element
///
/// ```rust
/// use glint_style::{ActiveStateSet, PseudoRegistry, PseudoState, StateStyles};
///
/// let registry = PseudoRegistry::standard();
/// let styles = StateStyles::new()
///     .base("borderColor", "$borderColor")
///     .on(PseudoState::Hover, "borderColor", "$borderColorHover")
///     .on(PseudoState::Press, "backgroundColor", "$backgroundPress");
///
/// let active = ActiveStateSet::new().with(PseudoState::Hover);
/// let style = styles.compute(&registry, active).unwrap();
/// assert_eq!(style["borderColor"], "$borderColorHover");
/// assert!(!style.contains_key("backgroundColor"));
/// ```
#[derive(Debug, Clone)]
pub struct StateStyles<V> {
    base: IndexMap<String, V>,
    states: FxHashMap<PseudoState, IndexMap<String, V>>,
}

impl<V> Default for StateStyles<V> {
    fn default() -> Self {
        Self {
            base: IndexMap::new(),
            states: FxHashMap::default(),
        }
    }
}

impl<V> StateStyles<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base property (builder pattern)
    pub fn base(mut self, property: impl Into<String>, value: V) -> Self {
        self.set_base(property, value);
        self
    }

    /// Set a property override for `state` (builder pattern)
    pub fn on(mut self, state: PseudoState, property: impl Into<String>, value: V) -> Self {
        self.set_state(state, property, value);
        self
    }

    pub fn set_base(&mut self, property: impl Into<String>, value: V) {
        self.base.insert(property.into(), value);
    }

    pub fn set_state(&mut self, state: PseudoState, property: impl Into<String>, value: V) {
        self.states
            .entry(state)
            .or_default()
            .insert(property.into(), value);
    }

    pub fn get_base(&self, property: &str) -> Option<&V> {
        self.base.get(property)
    }

    pub fn get_state(&self, state: PseudoState, property: &str) -> Option<&V> {
        self.states.get(&state).and_then(|props| props.get(property))
    }

    /// States that override at least one property
    pub fn states(&self) -> impl Iterator<Item = PseudoState> + '_ {
        PseudoState::ALL
            .into_iter()
            .filter(move |state| self.states.get(state).is_some_and(|props| !props.is_empty()))
    }

    /// Every `(state, value)` asserting `property`
    pub fn values_for<'a, 'p>(
        &'a self,
        property: &'p str,
    ) -> impl Iterator<Item = (PseudoState, &'a V)> + 'p
    where
        'a: 'p,
    {
        self.states
            .iter()
            .filter_map(move |(state, props)| props.get(property).map(|value| (*state, value)))
    }

    /// Effective value of one property for the given active states
    pub fn resolve_property(
        &self,
        registry: &PseudoRegistry,
        active: ActiveStateSet,
        property: &str,
    ) -> Result<Option<&V>, UnknownStateError> {
        let resolved = registry.resolve_conflict(active, property, self.values_for(property))?;
        Ok(resolved.or_else(|| self.base.get(property)))
    }

    /// Effective style map for the given active states.
    ///
    /// Base properties come first in declaration order, followed by
    /// properties only the active states define.
    pub fn compute(
        &self,
        registry: &PseudoRegistry,
        active: ActiveStateSet,
    ) -> Result<IndexMap<String, V>, UnknownStateError>
    where
        V: Clone,
    {
        let mut properties: Vec<&str> = self.base.keys().map(String::as_str).collect();
        for state in active.iter() {
            if let Some(props) = self.states.get(&state) {
                properties.extend(props.keys().map(String::as_str));
            }
        }

        let mut style = IndexMap::with_capacity(properties.len());
        for property in properties {
            if style.contains_key(property) {
                continue;
            }
            if let Some(value) = self.resolve_property(registry, active, property)? {
                style.insert(property.to_string(), value.clone());
            }
        }
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(states: &[PseudoState]) -> ActiveStateSet {
        states.iter().copied().collect()
    }

    #[test]
    fn test_press_beats_hover() {
        let registry = PseudoRegistry::standard();
        let (hover, press) = ("lightblue", "darkblue");

        let value = registry
            .resolve_conflict(
                set(&[PseudoState::Press, PseudoState::Hover]),
                "backgroundColor",
                [(PseudoState::Hover, &hover), (PseudoState::Press, &press)],
            )
            .unwrap();
        assert_eq!(value, Some(&press));
    }

    #[test]
    fn test_focus_beats_everything() {
        let registry = PseudoRegistry::standard();
        let values = [
            (PseudoState::Focus, "focus"),
            (PseudoState::Hover, "hover"),
            (PseudoState::Press, "press"),
        ];

        let value = registry
            .resolve_conflict(
                set(&PseudoState::ALL),
                "borderColor",
                values.iter().map(|(s, v)| (*s, v)),
            )
            .unwrap();
        assert_eq!(value, Some(&"focus"));
    }

    #[test]
    fn test_single_asserting_state_skips_priority() {
        // Hover is not registered, but it is the only state asserting the property
        let registry = PseudoRegistry::builder()
            .state(PseudoState::Focus, 1)
            .build()
            .unwrap();
        let opacity = 1.0_f32;

        let value = registry
            .resolve_conflict(
                set(&[PseudoState::Hover, PseudoState::Focus]),
                "opacity",
                [(PseudoState::Hover, &opacity)],
            )
            .unwrap();
        assert_eq!(value, Some(&1.0));
    }

    #[test]
    fn test_repeated_state_counts_once() {
        // Hover is not registered and asserts the property twice
        let registry = PseudoRegistry::builder()
            .state(PseudoState::Focus, 1)
            .build()
            .unwrap();

        let value = registry
            .resolve_conflict(
                set(&[PseudoState::Hover]),
                "opacity",
                [(PseudoState::Hover, &0.5), (PseudoState::Hover, &1.0)],
            )
            .unwrap();
        assert_eq!(value, Some(&1.0));

        let standard = PseudoRegistry::standard();
        let value = standard
            .resolve_conflict(
                set(&[PseudoState::Hover, PseudoState::Press]),
                "backgroundColor",
                [
                    (PseudoState::Press, &"early"),
                    (PseudoState::Hover, &"hover"),
                    (PseudoState::Press, &"late"),
                ],
            )
            .unwrap();
        assert_eq!(value, Some(&"late"));
    }

    #[test]
    fn test_contested_unregistered_state_fails() {
        let registry = PseudoRegistry::builder()
            .state(PseudoState::Focus, 1)
            .build()
            .unwrap();

        let err = registry
            .resolve_conflict(
                set(&[PseudoState::Hover, PseudoState::Focus]),
                "opacity",
                [(PseudoState::Hover, &0.5), (PseudoState::Focus, &1.0)],
            )
            .unwrap_err();
        assert_eq!(err.identifier, "hoverStyle");
    }

    #[test]
    fn test_inactive_states_are_ignored() {
        let registry = PseudoRegistry::standard();

        let value = registry
            .resolve_conflict(
                set(&[PseudoState::Hover]),
                "backgroundColor",
                [(PseudoState::Hover, &"hover"), (PseudoState::Press, &"press")],
            )
            .unwrap();
        assert_eq!(value, Some(&"hover"));

        let none = registry
            .resolve_conflict(
                ActiveStateSet::EMPTY,
                "backgroundColor",
                std::iter::empty::<(PseudoState, &&str)>(),
            )
            .unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_resolve_property_falls_back_to_base() {
        let registry = PseudoRegistry::standard();
        let styles = StateStyles::new()
            .base("opacity", 0.65)
            .on(PseudoState::Hover, "opacity", 1.0);

        let idle = styles
            .resolve_property(&registry, ActiveStateSet::EMPTY, "opacity")
            .unwrap();
        assert_eq!(idle, Some(&0.65));

        let hovered = styles
            .resolve_property(&registry, set(&[PseudoState::Hover]), "opacity")
            .unwrap();
        assert_eq!(hovered, Some(&1.0));

        let missing = styles
            .resolve_property(&registry, set(&[PseudoState::Hover]), "width")
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_compute_effective_style() {
        let registry = PseudoRegistry::standard();
        let styles = StateStyles::new()
            .base("borderColor", "$borderColor")
            .base("borderWidth", "1")
            .on(PseudoState::Hover, "borderColor", "$borderColorHover")
            .on(PseudoState::Press, "backgroundColor", "$backgroundPress")
            .on(PseudoState::Focus, "borderColor", "$borderColorFocus");

        let style = styles
            .compute(&registry, set(&[PseudoState::Hover, PseudoState::Press]))
            .unwrap();
        let entries: Vec<_> = style.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            entries,
            vec![
                ("borderColor", "$borderColorHover"),
                ("borderWidth", "1"),
                ("backgroundColor", "$backgroundPress"),
            ]
        );

        let focused = styles
            .compute(&registry, set(&PseudoState::ALL))
            .unwrap();
        assert_eq!(focused["borderColor"], "$borderColorFocus");
    }

    #[test]
    fn test_states_with_overrides() {
        let styles = StateStyles::new()
            .base("opacity", 0.5)
            .on(PseudoState::Focus, "opacity", 1.0);
        assert_eq!(styles.states().collect::<Vec<_>>(), vec![PseudoState::Focus]);
        assert_eq!(styles.get_state(PseudoState::Focus, "opacity"), Some(&1.0));
        assert_eq!(styles.get_base("opacity"), Some(&0.5));
    }
}
