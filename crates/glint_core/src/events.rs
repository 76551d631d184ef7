//! Interaction event identifiers
//!
//! Raw pointer and focus notifications arrive from the platform layer already
//! normalized to these identifiers. Components translate them into partial
//! state patches; nothing in this crate binds to platform events directly.

/// Event type identifier
pub type EventType = u32;

/// Interaction event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Pointer interaction aborted by the platform (e.g. gesture stolen by a scroll)
    pub const POINTER_CANCEL: EventType = 8;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
}

/// Human-readable name for an interaction event type, used in trace output.
pub fn event_name(event: EventType) -> &'static str {
    use event_types::*;
    match event {
        POINTER_DOWN => "pointer_down",
        POINTER_UP => "pointer_up",
        POINTER_MOVE => "pointer_move",
        POINTER_ENTER => "pointer_enter",
        POINTER_LEAVE => "pointer_leave",
        POINTER_CANCEL => "pointer_cancel",
        FOCUS => "focus",
        BLUR => "blur",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::event_types::*;
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(event_name(POINTER_ENTER), "pointer_enter");
        assert_eq!(event_name(BLUR), "blur");
        assert_eq!(event_name(999), "unknown");
    }
}
