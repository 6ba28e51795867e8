//! Direct Hyprland IPC helpers.
//!
//! Communicates with Hyprland through its Unix sockets at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/`, without spawning
//! `hyprctl` or pulling in a crate for socket discovery.  Every request
//! opens a short-lived connection.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(pub(crate) String);

/// Resolve a socket inside Hyprland's instance directory.
fn instance_socket(name: &str) -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!("{}/hypr/{}/{}", runtime_dir, his, name)))
}

/// The request socket (`.socket.sock`).
pub fn socket_path() -> Result<PathBuf, HyprlandError> {
    instance_socket(".socket.sock")
}

/// The event socket (`.socket2.sock`).
pub fn socket2_path() -> Result<PathBuf, HyprlandError> {
    instance_socket(".socket2.sock")
}

/// Send a raw request and return the response as a string.
pub fn request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a request that answers `ok` on success.
pub fn request_ok(command: &str) -> Result<(), HyprlandError> {
    let response = request(command)?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("{}: {}", command, response.trim())))
    }
}

/// Run a dispatcher, e.g. `workspace r+1`.
pub fn dispatch(args: &str) -> Result<(), HyprlandError> {
    request_ok(&format!("/dispatch {}", args))
}

/// Query a JSON data command (`j/<command>`) and decode it.
pub fn query<T: DeserializeOwned>(data_command: &str) -> Result<T, HyprlandError> {
    let json = request(&format!("j/{}", data_command))?;
    serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse {}: {}", data_command, e)))
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorJson {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

/// Subset of the JSON object returned by `j/clients`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientJson {
    pub address: String,
}

/// The JSON object returned by `j/cursorpos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CursorPosJson {
    pub x: i32,
    pub y: i32,
}

/// Quote `s` for Hyprland's `exec` dispatcher, which hands it to `sh -c`.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_monitor_json() {
        let json = r#"[{"id":0,"name":"DP-1","width":2560,"height":1440,"x":0,"y":0,"focused":true}]"#;
        let monitors: Vec<MonitorJson> = serde_json::from_str(json).unwrap();
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].name, "DP-1");
        assert_eq!(monitors[0].width, 2560);
    }

    #[test]
    fn parse_clients_json() {
        let json = r#"[{"address":"0x5a1b","title":"kitty","class":"kitty"},{"address":"0x77"}]"#;
        let clients: Vec<ClientJson> = serde_json::from_str(json).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[1].address, "0x77");
    }

    #[test]
    fn parse_cursorpos_json() {
        let pos: CursorPosJson = serde_json::from_str(r#"{"x":12,"y":-3}"#).unwrap();
        assert_eq!(pos, CursorPosJson { x: 12, y: -3 });
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("on"), "'on'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
