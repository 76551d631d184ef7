//! Pressable Demo
//!
//! Replays a pointer/focus event stream against a pagination card and prints
//! the effective style every time the interaction state actually changes.
//!
//! Run with:
//! `RUST_LOG=debug cargo run -p glint_style --example pressable`
//!
//! Pass a TOML registry file as the first argument to try a different
//! cascade.

use std::sync::Arc;

use glint_core::events::{event_name, event_types::*};
use glint_style::{Interaction, InteractionState, PseudoRegistry, PseudoState, StateStyles};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = match std::env::args().nth(1) {
        Some(path) => PseudoRegistry::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => PseudoRegistry::standard(),
    };
    for descriptor in registry.ordered() {
        println!(
            "{:<12} :{:<8} priority {}",
            descriptor.identifier(),
            descriptor.name,
            descriptor.priority
        );
    }

    let registry = Arc::new(registry);
    let styles = Arc::new(
        StateStyles::new()
            .base("borderColor", "$borderColor")
            .base("borderWidth", "1")
            .on(PseudoState::Hover, "borderColor", "$borderColorHover")
            .on(PseudoState::Press, "backgroundColor", "$backgroundPress")
            .on(PseudoState::Focus, "borderColor", "$borderColorFocus"),
    );

    let mut card = Interaction::new();
    {
        let registry = registry.clone();
        let styles = styles.clone();
        card.state_mut()
            .subscribe(move |_: &InteractionState, next: &InteractionState| {
                match styles.compute(&registry, next.active_states()) {
                    Ok(style) => println!("    render {:?} -> {:?}", next.active_states(), style),
                    Err(err) => eprintln!("    cannot resolve style: {err}"),
                }
            });
    }

    let events = [
        POINTER_ENTER,
        POINTER_MOVE,
        POINTER_DOWN,
        FOCUS,
        POINTER_DOWN,
        POINTER_UP,
        POINTER_LEAVE,
        BLUR,
    ];
    for event in events {
        let changed = card.handle_event(event);
        println!(
            "{:<14} {}",
            event_name(event),
            if changed { "changed" } else { "coalesced" }
        );
    }

    println!("{} renders for {} events", card.state().revision(), events.len());
    Ok(())
}
