// src/watch/mod.rs

//! File watching.
//!
//! Wires a cross-platform filesystem watcher (`notify`) to the runtime
//! channel. Changes are forwarded as opaque notifications: no path or
//! change-type information crosses the boundary, because the reload
//! coordinator only coalesces events, it never inspects them.

pub mod watcher;

pub use watcher::{WatcherHandle, spawn_watcher};
