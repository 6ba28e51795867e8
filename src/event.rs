//! Events delivered by the shell to the controller.
//!
//! This is the vocabulary every [`EventSource`](crate::traits::EventSource)
//! speaks.  On the wire each event is one line of externally tagged JSON:
//!
//! ```json
//! {"CursorMoved":{"x":0,"y":412}}
//! {"MoveResizeStarted":{"id":"0x55d1c2a0"}}
//! {"WindowAdded":{"id":"0x55d1c2a0","drag_icon":false}}
//! {"EdgeTriggered":"left"}
//! "HotkeyPulse"
//! "ConfigChanged"
//! ```

use crate::edge::EdgeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque window handle (on Hyprland, the window address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A window as first observed, either at startup or when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub id: WindowId,
    /// Whether the window currently presents a drag icon.
    ///
    /// `None` when the shell could not tell; such windows are not tracked.
    #[serde(default)]
    pub drag_icon: Option<bool>,
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The pointer moved to `(x, y)` in global coordinates.
    CursorMoved { x: i32, y: i32 },

    /// A new window appeared.
    WindowAdded(WindowSnapshot),

    /// A window was closed.
    WindowClosed { id: WindowId },

    /// A window was removed from the window list.  Covers windows that go
    /// away without a close notification.
    WindowRemoved { id: WindowId },

    /// An interactive move or resize began.
    MoveResizeStarted { id: WindowId },

    /// An interactive move or resize ended.
    MoveResizeFinished { id: WindowId },

    /// A window started (`active: true`) or stopped presenting a drag icon.
    DragIconChanged { id: WindowId, active: bool },

    /// The configuration changed and should be re-read.
    ConfigChanged,

    /// One activation of the "switch on edge" hotkey, including key repeat.
    HotkeyPulse,

    /// The cursor crossed a registered screen edge.
    EdgeTriggered(EdgeId),
}
