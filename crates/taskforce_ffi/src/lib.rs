//! Flutter-facing bridge over `taskforce_core`.

pub mod api;
