//! HR console shell
//!
//! Config loading, tracing, dependency wiring, and the command/event surface
//! the front-end talks to.

pub mod bootstrap;
pub mod commands;
pub mod events;

pub use bootstrap::{init_tracing_subscriber, load_config, AppRuntime};
pub use events::EventEmitter;
