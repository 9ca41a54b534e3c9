//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, gateway and
//! worker layers:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── HTTP results / Worker replies ┘
//! ```
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: View, search, paging and favorites transitions
//! - [`handler`]: Event processing
//! - [`modes`]: View and input mode types
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, View};
pub use state::AppState;
