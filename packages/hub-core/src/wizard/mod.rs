//! Wizard module
//!
//! The multi-step deployment workflow.

pub mod state;
