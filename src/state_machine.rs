//! Core conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The dispatcher in `runtime` executes the effects a transition asks for and
//! feeds their outcomes back in as events.

mod effect;
pub mod event;
pub mod intent;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use intent::Intent;
pub use state::ConvState;
pub use transition::{transition, TransitionError};
