//! **edgeswitch**: switch desktops by pushing the cursor against a screen
//! edge while something is being dragged.
//!
//! A switch only happens while a drag is active.  Three independent sources
//! count as a drag: an interactive window move/resize, a window presenting
//! a drag-and-drop icon, and the "switch on edge" hotkey toggle.  Corner
//! edges pick their direction from the cursor's latest motion.
//!
//! # Architecture
//!
//! The crate is organised around a few core traits:
//!
//! * [`traits::Shell`] / [`traits::ScreenEdges`]: abstract the windowing
//!   shell (edge registration, desktop switching, notifications) so the
//!   switching logic is not coupled to any specific compositor.  A
//!   [`traits::Capabilities`] descriptor states which optional operations
//!   the shell offers.
//! * [`traits::EventSource`]: abstracts the transport that delivers shell
//!   events (a Unix socket, Hyprland's event socket, a cursor poller, …).
//! * [`traits::ConfigSource`]: where settings are re-read from.
//!
//! [`controller::EdgeController`] owns all state and is driven one
//! [`event::Event`] at a time.  Concrete implementations live in
//! [`hyprland`] (Hyprland IPC) and [`ipc`] (Unix-socket event listener).

pub mod config;
pub mod controller;
pub mod cursor;
pub mod drag;
pub mod edge;
pub mod event;
pub mod hyprland;
pub mod ipc;
pub mod registry;
pub mod toggle;
pub mod traits;
