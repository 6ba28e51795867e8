//! IPC listener that accepts events over a Unix socket.
//!
//! Compositor plugins, key-bind helpers and `edgeswitch-ctl` connect to the
//! socket and send newline-delimited JSON events.

pub mod listener;

/// Default socket path for the event listener.
pub fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/edgeswitch.sock", runtime)
}
