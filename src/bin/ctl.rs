//! `edgeswitch-ctl`: send one event to a running edgeswitch daemon.
//!
//! ```text
//! edgeswitch-ctl pulse            # toggle switch-on-edge (bind this to a key)
//! edgeswitch-ctl reload           # re-read the configuration
//! edgeswitch-ctl '{"MoveResizeStarted":{"id":"0x1"}}'
//! ```

use edgeswitch::event::Event;
use edgeswitch::ipc::default_socket_path;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Debug, thiserror::Error)]
enum CtlError {
    #[error("usage: edgeswitch-ctl <pulse|reload|JSON event>")]
    Usage,
    #[error("invalid event: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot reach daemon at {path}: {source}")]
    Connect {
        path: String,
        source: std::io::Error,
    },
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_event(arg: &str) -> Result<Event, CtlError> {
    match arg {
        "pulse" => Ok(Event::HotkeyPulse),
        "reload" => Ok(Event::ConfigChanged),
        json => Ok(serde_json::from_str(json)?),
    }
}

fn run() -> Result<(), CtlError> {
    let arg = std::env::args().nth(1).ok_or(CtlError::Usage)?;
    let event = parse_event(&arg)?;
    let path = default_socket_path();
    let mut stream =
        UnixStream::connect(&path).map_err(|source| CtlError::Connect { path, source })?;
    let line = serde_json::to_string(&event)?;
    writeln!(stream, "{}", line)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeswitch::edge::EdgeId;

    #[test]
    fn shorthands() {
        assert_eq!(parse_event("pulse").unwrap(), Event::HotkeyPulse);
        assert_eq!(parse_event("reload").unwrap(), Event::ConfigChanged);
    }

    #[test]
    fn raw_json() {
        assert_eq!(
            parse_event(r#"{"EdgeTriggered":"top"}"#).unwrap(),
            Event::EdgeTriggered(EdgeId::Top)
        );
        assert!(matches!(parse_event("nonsense"), Err(CtlError::Json(_))));
    }
}
