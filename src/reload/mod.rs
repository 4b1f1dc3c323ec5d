// src/reload/mod.rs

//! Reload coordination.
//!
//! Change notifications arrive in unordered bursts; at most one reload may
//! execute per debounce window and reload executions never overlap. The
//! [`coordinator`] module implements this with a single-slot pending flag
//! (burst coalescing) in front of a one-token rate limiter.

pub mod coordinator;

pub use coordinator::ReloadCoordinator;
