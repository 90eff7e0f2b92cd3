//! # Gym Tracker
//!
//! In-memory management core for a gym: member and class registries, an
//! enrollment ledger with capacity enforcement, an attendance matrix, and
//! read-only statistics over all of it.
//!
//! The crate exposes no I/O of its own. A presentation layer (CLI, TUI,
//! HTTP handler) constructs a [`Backend`] and drives the services on it
//! with command structs, getting result structs or typed domain errors
//! back.

pub mod backend;

pub use backend::Backend;
