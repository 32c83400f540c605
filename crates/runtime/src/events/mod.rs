//! Event system for the battle runtime.
//!
//! Engine events are wrapped in [`Event`] and routed by [`Topic`] so observers
//! (UIs, loggers, tests) only receive what they subscribe to. The runtime adds
//! a few events of its own that the engine does not know about, such as
//! skipped or rejected moves.

mod bus;
pub mod narrative;

pub use bus::{Event, EventBus, Topic};
pub use narrative::describe;
