//! Entry point for the **edgeswitch** daemon.
//!
//! Spawns every [`EventSource`](edgeswitch::traits::EventSource) on a
//! background thread and feeds their events, one at a time, into a single
//! [`EdgeController`] on the main thread.

use edgeswitch::config::FileConfig;
use edgeswitch::controller::EdgeController;
use edgeswitch::event::Event;
use edgeswitch::hyprland::cursor::CursorPoller;
use edgeswitch::hyprland::edges::EdgeZones;
use edgeswitch::hyprland::events::HyprlandEventSource;
use edgeswitch::hyprland::shell::HyprlandShell;
use edgeswitch::ipc::default_socket_path;
use edgeswitch::ipc::listener::UnixSocketListener;
use edgeswitch::traits::{ConfigSource, EventSource};
use log::{error, info};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

/// Resolve the config directory (`$XDG_CONFIG_HOME/edgeswitch`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("edgeswitch")
}

//  Main

fn main() {
    env_logger::init();

    let config_source = FileConfig::new(config_dir().join("config.json"));
    let hyprland = config_source.load().hyprland;

    let zones = Arc::new(Mutex::new(EdgeZones::new(hyprland.corner_size)));
    let poll = Duration::from_millis(hyprland.cursor_poll_ms.max(1));
    let shell = HyprlandShell::new(hyprland, zones.clone());
    let caps = shell.capabilities();

    let mut controller = EdgeController::new(shell, caps, config_source);
    controller.start();

    let (tx, rx) = mpsc::channel::<Event>();
    spawn_event_sources(tx, zones, poll);

    info!("edgeswitch running");
    for event in rx {
        controller.handle(event);
    }
    info!("all event sources closed, exiting");
}

//  Helpers

fn spawn<S: EventSource + 'static>(name: &'static str, mut source: S, tx: mpsc::Sender<Event>) {
    std::thread::spawn(move || {
        if let Err(e) = source.run(tx) {
            error!("{} error: {}", name, e);
        }
    });
}

fn spawn_event_sources(tx: mpsc::Sender<Event>, zones: Arc<Mutex<EdgeZones>>, poll: Duration) {
    spawn(
        "socket listener",
        UnixSocketListener::new(default_socket_path()),
        tx.clone(),
    );
    spawn("hyprland events", HyprlandEventSource::new(), tx.clone());
    spawn("cursor poller", CursorPoller::new(zones, poll), tx);
}
