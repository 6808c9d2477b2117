//! Profile module
//!
//! View model and loader for the agent profile screen.

pub mod loader;
pub mod view;
