//! Hyprland-specific implementations.
//!
//! This module provides concrete backends for the
//! [`Shell`](crate::traits::Shell) and
//! [`EventSource`](crate::traits::EventSource) traits, powered by
//! Hyprland's IPC sockets.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod cursor;
pub mod edges;
pub mod events;
pub mod ipc;
pub mod shell;
