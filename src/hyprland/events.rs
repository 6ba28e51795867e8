//! Translates Hyprland's event socket into edgeswitch [`Event`]s.
//!
//! Hyprland writes one `EVENT>>DATA` line per event to `.socket2.sock`.
//! Only a few matter here:
//!
//! | Event            | Payload                          | Becomes                |
//! |------------------|----------------------------------|------------------------|
//! | `openwindow`     | `<addr>,<ws>,<class>,<title>`    | [`Event::WindowAdded`] |
//! | `closewindow`    | `<addr>`                         | [`Event::WindowClosed`]|
//! | `configreloaded` | (empty)                          | [`Event::ConfigChanged`] |
//!
//! Hyprland has no notion of drag icons, so new windows are reported with
//! an unknown drag-icon state.

use crate::event::{Event, WindowId, WindowSnapshot};
use crate::hyprland::ipc::{self, HyprlandError};
use crate::traits::EventSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::sync::mpsc;

/// An [`EventSource`] reading Hyprland's event socket.
#[derive(Debug, Default)]
pub struct HyprlandEventSource;

impl HyprlandEventSource {
    pub fn new() -> Self {
        Self
    }
}

/// Parse a single event line from socket2.
///
/// Lines have the form `EVENT>>DATA\n`.
fn parse_event_line(line: &str) -> Option<(&str, &str)> {
    let sep = line.find(">>")?;
    Some((&line[..sep], &line[sep + 2..]))
}

/// Socket2 omits the `0x` prefix that `j/clients` uses.
fn window_id(raw: &str) -> WindowId {
    let raw = raw.trim();
    if raw.starts_with("0x") {
        WindowId(raw.to_string())
    } else {
        WindowId(format!("0x{}", raw))
    }
}

/// Map one socket2 event to an edgeswitch event.
fn translate(event: &str, data: &str) -> Option<Event> {
    match event {
        "openwindow" => {
            let addr = data.split(',').next().filter(|a| !a.trim().is_empty())?;
            Some(Event::WindowAdded(WindowSnapshot {
                id: window_id(addr),
                drag_icon: None,
            }))
        }
        "closewindow" if !data.trim().is_empty() => Some(Event::WindowClosed { id: window_id(data) }),
        "configreloaded" => Some(Event::ConfigChanged),
        _ => None,
    }
}

impl EventSource for HyprlandEventSource {
    type Error = HyprlandError;

    /// Connect to Hyprland's event socket and forward the events above.
    ///
    /// This method **blocks** until the socket closes.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        let path = ipc::socket2_path()?;
        let stream = UnixStream::connect(&path)
            .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;
        info!("connected to {}", path.display());

        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => {
                    let Some((name, data)) = parse_event_line(&line) else {
                        continue;
                    };
                    if let Some(event) = translate(name, data) {
                        debug!("socket2: {:?}", event);
                        if sink.send(event).is_err() {
                            info!("sink closed, shutting down");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    error!("socket2 read error: {}", e);
                    return Err(HyprlandError(format!("read error: {}", e)));
                }
            }
        }

        warn!("socket2 stream ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_line_valid() {
        assert_eq!(
            parse_event_line("openwindow>>5a1b,2,kitty,~"),
            Some(("openwindow", "5a1b,2,kitty,~"))
        );
        assert_eq!(parse_event_line("configreloaded>>"), Some(("configreloaded", "")));
    }

    #[test]
    fn parse_event_line_no_separator() {
        assert_eq!(parse_event_line("garbage"), None);
    }

    #[test]
    fn openwindow_becomes_window_added() {
        assert_eq!(
            translate("openwindow", "5a1b,2,kitty,~"),
            Some(Event::WindowAdded(WindowSnapshot {
                id: "0x5a1b".into(),
                drag_icon: None,
            }))
        );
    }

    #[test]
    fn closewindow_becomes_window_closed() {
        assert_eq!(
            translate("closewindow", "5a1b"),
            Some(Event::WindowClosed { id: "0x5a1b".into() })
        );
        assert_eq!(translate("closewindow", ""), None);
    }

    #[test]
    fn configreloaded_becomes_config_changed() {
        assert_eq!(translate("configreloaded", ""), Some(Event::ConfigChanged));
    }

    #[test]
    fn unknown_events_ignored() {
        assert_eq!(translate("workspace", "2"), None);
        assert_eq!(translate("activewindow", "kitty,~"), None);
        assert_eq!(translate("openwindow", ""), None);
    }
}
