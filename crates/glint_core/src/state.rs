//! Coalesced component state
//!
//! [`CoalescedState`] owns the current state of one component instance and
//! applies partial patches to it. A patch replaces the state only when at
//! least one of its fields actually differs; otherwise the current `Arc` is
//! kept as-is, so consumers can skip work with a cheap [`Arc::ptr_eq`].
//!
//! Supports:
//! - Partial patches compared field by field ([`Coalesce`])
//! - Patches computed from the latest state ([`CoalescedState::apply_with`])
//! - Change listeners, invoked only on a committed replacement
//!
//! Deciding *when* to re-render is left to whoever subscribes.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use crate::coalesce::Coalesce;

/// Handle returned by [`CoalescedState::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Callback invoked with `(previous, next)` after a replacement
pub type ChangeListener<T> = Box<dyn FnMut(&T, &T) + Send>;

/// Live state of a single component instance
pub struct CoalescedState<T> {
    current: Arc<T>,
    /// Number of committed replacements since creation
    revision: u64,
    listeners: SmallVec<[(ListenerId, ChangeListener<T>); 2]>,
    next_listener: u32,
}

impl<T: Coalesce> CoalescedState<T> {
    /// Create state from the component's initial value
    pub fn new(initial: T) -> Self {
        Self::from_arc(Arc::new(initial))
    }

    /// Create state around an existing shared value without copying it
    pub fn from_arc(initial: Arc<T>) -> Self {
        Self {
            current: initial,
            revision: 0,
            listeners: SmallVec::new(),
            next_listener: 0,
        }
    }

    /// The current state object.
    ///
    /// The returned `Arc` is the same allocation until a patch changes
    /// something, so identity comparison tells whether anything changed.
    pub fn current(&self) -> &Arc<T> {
        &self.current
    }

    /// Borrow the current value
    pub fn get(&self) -> &T {
        &self.current
    }

    /// Clone the handle to the current state object
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.current)
    }

    /// Number of committed replacements
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a partial update.
    ///
    /// Returns `true` if the state was replaced. When every field in `patch`
    /// already matches, nothing is allocated, no listener runs and the
    /// current object is kept.
    pub fn apply(&mut self, patch: &T::Patch) -> bool {
        if !self.current.differs(patch) {
            trace!(revision = self.revision, "patch coalesced, state unchanged");
            return false;
        }

        let next = Arc::new(self.current.merged(patch));
        let previous = std::mem::replace(&mut self.current, next);
        self.revision += 1;
        trace!(
            revision = self.revision,
            listeners = self.listeners.len(),
            "state replaced"
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&*previous, &*self.current);
        }

        true
    }

    /// Apply a patch computed from the latest state.
    ///
    /// The closure always sees the state as left by the previous `apply`,
    /// never a snapshot taken earlier.
    pub fn apply_with<F>(&mut self, make_patch: F) -> bool
    where
        F: FnOnce(&T) -> T::Patch,
    {
        let patch = make_patch(&self.current);
        self.apply(&patch)
    }

    /// Register a listener for committed replacements
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T, &T) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Consume the state, returning the current object
    pub fn into_inner(self) -> Arc<T> {
        self.current
    }
}

impl<T: Coalesce + Default> Default for CoalescedState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for CoalescedState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoalescedState")
            .field("current", &self.current)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Hand-written shape; derived shapes are covered in tests/shallow_state.rs
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Flags {
        hover: bool,
        pressed: bool,
    }

    #[derive(Default)]
    struct FlagsPatch {
        hover: Option<bool>,
        pressed: Option<bool>,
    }

    impl Coalesce for Flags {
        type Patch = FlagsPatch;

        fn differs(&self, patch: &FlagsPatch) -> bool {
            patch.hover.is_some_and(|v| v != self.hover)
                || patch.pressed.is_some_and(|v| v != self.pressed)
        }

        fn merged(&self, patch: &FlagsPatch) -> Self {
            Self {
                hover: patch.hover.unwrap_or(self.hover),
                pressed: patch.pressed.unwrap_or(self.pressed),
            }
        }
    }

    fn hover(v: bool) -> FlagsPatch {
        FlagsPatch {
            hover: Some(v),
            ..Default::default()
        }
    }

    fn pressed(v: bool) -> FlagsPatch {
        FlagsPatch {
            pressed: Some(v),
            ..Default::default()
        }
    }

    #[test]
    fn test_real_change_replaces_state() {
        let mut state = CoalescedState::new(Flags::default());
        let before = state.snapshot();

        assert!(state.apply(&hover(true)));

        assert!(!Arc::ptr_eq(&before, state.current()));
        assert_eq!(
            *state.get(),
            Flags {
                hover: true,
                pressed: false
            }
        );
        // The previous object is never mutated
        assert_eq!(*before, Flags::default());
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_noop_patch_keeps_identity() {
        let mut state = CoalescedState::new(Flags::default());
        let before = state.snapshot();

        assert!(!state.apply(&hover(false)));
        assert!(Arc::ptr_eq(&before, state.current()));
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_empty_patch_never_replaces() {
        let mut state = CoalescedState::new(Flags::default());
        let before = state.snapshot();

        assert!(!state.apply(&FlagsPatch::default()));
        assert!(Arc::ptr_eq(&before, state.current()));
    }

    #[test]
    fn test_repeated_patch_is_idempotent() {
        let mut state = CoalescedState::new(Flags::default());

        assert!(state.apply(&pressed(true)));
        let after_first = state.snapshot();
        assert!(!state.apply(&pressed(true)));

        assert!(Arc::ptr_eq(&after_first, state.current()));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_patches_apply_in_order() {
        let mut state = CoalescedState::new(Flags::default());

        state.apply(&hover(true));
        state.apply(&pressed(true));
        state.apply(&hover(false));

        assert_eq!(
            *state.get(),
            Flags {
                hover: false,
                pressed: true
            }
        );
        assert_eq!(state.revision(), 3);
    }

    #[test]
    fn test_apply_with_sees_latest_state() {
        let mut state = CoalescedState::new(Flags::default());

        state.apply(&pressed(true));
        // Mirror the pressed flag into hover based on the state left by the previous apply
        let changed = state.apply_with(|current| hover(current.pressed));

        assert!(changed);
        assert!(state.get().hover);
    }

    #[test]
    fn test_listeners_only_run_on_replacement() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut state = CoalescedState::new(Flags::default());
        state.subscribe(move |prev: &Flags, next: &Flags| {
            seen_clone
                .lock()
                .unwrap()
                .push((prev.hover, next.hover));
        });

        state.apply(&hover(true));
        state.apply(&hover(true));
        state.apply(&hover(false));

        assert_eq!(*seen.lock().unwrap(), vec![(false, true), (true, false)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let mut state = CoalescedState::new(Flags::default());
        let id = state.subscribe(move |_: &Flags, _: &Flags| {
            *count_clone.lock().unwrap() += 1;
        });

        state.apply(&hover(true));
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.apply(&hover(false));

        assert_eq!(*count.lock().unwrap(), 1);
    }
}
