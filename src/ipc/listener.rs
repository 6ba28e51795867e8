//! Unix-socket [`EventSource`] implementation.
//!
//! This is how events Hyprland does not publish itself (interactive moves,
//! drag icons, hotkey pulses) reach the daemon.  A compositor plugin
//! typically keeps one connection open for its whole lifetime while
//! `edgeswitch-ctl` connects once per pulse, so every client gets its own
//! reader thread and a long-lived connection never delays a short one.
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"MoveResizeStarted":{"id":"0x55d1c2a0"}}
//! {"MoveResizeFinished":{"id":"0x55d1c2a0"}}
//! {"DragIconChanged":{"id":"0x55d1c2a0","active":true}}
//! "HotkeyPulse"
//! "ConfigChanged"
//! ```
//!
//! Blank lines are skipped.  Lines that do not decode to an [`Event`]
//! (including unknown edge identifiers) are logged and dropped; the
//! connection stays open.

use crate::event::Event;
use crate::traits::EventSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// An [`EventSource`] that accepts any number of concurrent clients on a
/// Unix stream socket.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// The socket file is created by [`run`](EventSource::run) and removed
    /// again however `run` returns.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owns the bound socket file and unlinks it on drop.
struct SocketFile<'a>(&'a Path);

impl Drop for SocketFile<'_> {
    fn drop(&mut self) {
        match std::fs::remove_file(self.0) {
            Ok(()) => debug!("removed {}", self.0.display()),
            Err(e) => debug!("could not remove {}: {}", self.0.display(), e),
        }
    }
}

impl EventSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and accept clients until the sink goes away.
    ///
    /// Blocks; run it on a dedicated thread.  A closed sink is noticed by
    /// the client thread that fails to send, and the accept loop exits on
    /// the next connection attempt.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        if self.path.exists() {
            debug!("replacing stale socket {}", self.path.display());
            std::fs::remove_file(&self.path)?;
        }
        let listener = UnixListener::bind(&self.path)?;
        let _socket = SocketFile(&self.path);
        info!("listening on {}", self.path.display());

        let sink_closed = Arc::new(AtomicBool::new(false));
        for (client, stream) in listener.incoming().enumerate() {
            if sink_closed.load(Ordering::SeqCst) {
                info!("sink closed, shutting down");
                break;
            }
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            spawn_client(client, stream, sink.clone(), sink_closed.clone());
        }
        Ok(())
    }
}

fn spawn_client(
    client: usize,
    stream: UnixStream,
    sink: mpsc::Sender<Event>,
    sink_closed: Arc<AtomicBool>,
) {
    let spawned = std::thread::Builder::new()
        .name(format!("edgeswitch-client-{}", client))
        .spawn(move || {
            debug!("client {} connected", client);
            if !serve_client(client, BufReader::new(stream), &sink) {
                sink_closed.store(true, Ordering::SeqCst);
            }
            debug!("client {} disconnected", client);
        });
    if let Err(e) = spawned {
        error!("could not start reader for client {}: {}", client, e);
    }
}

/// Forward every event `reader` yields until it reaches EOF or fails.
///
/// Returns `false` once the sink has been dropped.
fn serve_client<R: BufRead>(client: usize, reader: R, sink: &mpsc::Sender<Event>) -> bool {
    for line in reader.lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                warn!("client {}: read error: {}", client, e);
                break;
            }
        };
        let Some(event) = parse_line(&text) else {
            continue;
        };
        debug!("client {}: {:?}", client, event);
        if sink.send(event).is_err() {
            return false;
        }
    }
    true
}

fn parse_line(text: &str) -> Option<Event> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(e) => {
            error!("bad event: {} ({})", text, e);
            None
        }
    }
}

//  Tests
