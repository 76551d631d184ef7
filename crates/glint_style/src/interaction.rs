//! Interaction state for pressable elements
//!
//! Components keep their hover/press/focus flags in a
//! [`CoalescedState<InteractionState>`]. Each normalized event becomes a
//! partial patch; the state is only replaced (and listeners only notified)
//! when a flag actually flips.

use glint_core::events::{event_name, event_types, EventType};
use glint_core::{CoalescedState, ShallowState};
use tracing::debug;

use crate::pseudo::{ActiveStateSet, PseudoState};

/// Hover/press/focus flags of one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ShallowState)]
pub struct InteractionState {
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

impl InteractionState {
    /// Pseudo-states currently true, derived from the flags
    pub fn active_states(&self) -> ActiveStateSet {
        let mut active = ActiveStateSet::new();
        active.set(PseudoState::Hover, self.hovered);
        active.set(PseudoState::Press, self.pressed);
        active.set(PseudoState::Focus, self.focused);
        active
    }

    /// Returns true if no pseudo-state is active
    pub fn is_idle(&self) -> bool {
        !(self.hovered || self.pressed || self.focused)
    }
}

/// Translate an interaction event into a state patch.
///
/// Leaving the element also releases a press, matching how buttons drop
/// their pressed look when the pointer slides off. Events that do not
/// affect interaction state yield `None`.
pub fn interaction_patch(event: EventType) -> Option<InteractionStatePatch> {
    use event_types::*;
    let patch = InteractionStatePatch::new();
    match event {
        POINTER_ENTER => Some(patch.with_hovered(true)),
        POINTER_LEAVE => Some(patch.with_hovered(false).with_pressed(false)),
        POINTER_DOWN => Some(patch.with_pressed(true)),
        POINTER_UP | POINTER_CANCEL => Some(patch.with_pressed(false)),
        FOCUS => Some(patch.with_focused(true)),
        BLUR => Some(patch.with_focused(false)),
        _ => None,
    }
}

/// Coalesced interaction state driven by raw events
#[derive(Debug, Default)]
pub struct Interaction {
    state: CoalescedState<InteractionState>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from explicit flags (e.g. an element mounted while focused)
    pub fn with_state(initial: InteractionState) -> Self {
        Self {
            state: CoalescedState::new(initial),
        }
    }

    /// Feed one event. Returns true if the interaction state changed.
    pub fn handle_event(&mut self, event: EventType) -> bool {
        let Some(patch) = interaction_patch(event) else {
            return false;
        };
        let changed = self.state.apply(&patch);
        if changed {
            debug!(
                event = event_name(event),
                active = ?self.active_states(),
                "interaction state changed"
            );
        }
        changed
    }

    pub fn current(&self) -> &InteractionState {
        self.state.get()
    }

    pub fn active_states(&self) -> ActiveStateSet {
        self.state.get().active_states()
    }

    pub fn state(&self) -> &CoalescedState<InteractionState> {
        &self.state
    }

    /// Mutable access, e.g. to subscribe listeners or apply custom patches
    pub fn state_mut(&mut self) -> &mut CoalescedState<InteractionState> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::*;
    use std::sync::Arc;

    #[test]
    fn test_button_interaction() {
        let mut button = Interaction::new();
        assert!(button.current().is_idle());

        // Hover
        assert!(button.handle_event(POINTER_ENTER));
        assert_eq!(button.active_states(), ActiveStateSet::new().with(PseudoState::Hover));

        // Press
        assert!(button.handle_event(POINTER_DOWN));
        assert!(button.current().pressed);

        // Release
        assert!(button.handle_event(POINTER_UP));
        assert!(!button.current().pressed);
        assert!(button.current().hovered);

        // Leave
        assert!(button.handle_event(POINTER_LEAVE));
        assert!(button.current().is_idle());
    }

    #[test]
    fn test_leave_releases_press() {
        let mut button = Interaction::new();
        button.handle_event(POINTER_ENTER);
        button.handle_event(POINTER_DOWN);
        button.handle_event(POINTER_LEAVE);

        assert_eq!(*button.current(), InteractionState::default());
    }

    #[test]
    fn test_redundant_events_keep_state_object() {
        let mut field = Interaction::new();
        field.handle_event(FOCUS);
        let before = field.state().snapshot();

        assert!(!field.handle_event(FOCUS));
        assert!(!field.handle_event(POINTER_UP));
        assert!(!field.handle_event(POINTER_MOVE));
        assert!(Arc::ptr_eq(&before, field.state().current()));
        assert_eq!(field.state().revision(), 1);
    }

    #[test]
    fn test_press_then_focus_coalesce() {
        // Pointer-down immediately followed by focus within one burst
        let mut input = Interaction::new();
        input.handle_event(POINTER_ENTER);
        input.handle_event(POINTER_DOWN);
        input.handle_event(FOCUS);

        assert_eq!(
            *input.current(),
            InteractionState {
                hovered: true,
                pressed: true,
                focused: true,
            }
        );
        assert_eq!(input.active_states().len(), 3);
    }

    #[test]
    fn test_unrelated_events_have_no_patch() {
        assert!(interaction_patch(POINTER_MOVE).is_none());
        assert!(interaction_patch(999).is_none());

        let leave = interaction_patch(POINTER_LEAVE).unwrap();
        assert_eq!(leave.hovered, Some(false));
        assert_eq!(leave.pressed, Some(false));
        assert_eq!(leave.focused, None);
    }

    #[test]
    fn test_with_state() {
        let focused = Interaction::with_state(InteractionState {
            focused: true,
            ..Default::default()
        });
        assert_eq!(focused.active_states(), ActiveStateSet::new().with(PseudoState::Focus));
    }
}
