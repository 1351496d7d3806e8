//! Dashboard view layer.
//!
//! # Responsibility
//! - Hold ephemeral selection state for the dashboard.
//! - Derive the render-ready project list and tag badges from a snapshot.
//!
//! # Invariants
//! - Everything in this module is synchronous and side-effect free.

pub mod engine;
pub mod state;
