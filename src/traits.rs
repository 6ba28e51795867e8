//! Core traits that decouple edgeswitch from any specific shell or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The
//! [`EdgeController`](crate::controller::EdgeController) only depends on
//! these abstractions plus a [`Capabilities`] descriptor saying which of the
//! optional shell operations exist.

use crate::config::{Config, ShortcutConfig};
use crate::edge::{Direction, EdgeId};
use crate::event::{Event, WindowSnapshot};
use std::sync::mpsc;

/// Icon shown next to an on-screen notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Switch on edge was turned on.
    Enabled,
    /// Switch on edge was turned off.
    Disabled,
}

/// Which optional shell operations are available.
///
/// The controller never calls an operation whose capability is absent; a
/// missing capability turns the feature into a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub switch_left: bool,
    pub switch_right: bool,
    pub switch_up: bool,
    pub switch_down: bool,
    /// Primary notification channel ([`Shell::notify`]).
    pub notify: bool,
    /// Fallback notification channel ([`Shell::show_message`]).
    pub message: bool,
    /// Global shortcut registration ([`Shell::register_shortcut`]).
    pub shortcuts: bool,
}

impl Capabilities {
    /// Every operation available.
    pub fn all() -> Self {
        Self {
            switch_left: true,
            switch_right: true,
            switch_up: true,
            switch_down: true,
            notify: true,
            message: true,
            shortcuts: true,
        }
    }

    /// Nothing available.
    pub fn none() -> Self {
        Self {
            switch_left: false,
            switch_right: false,
            switch_up: false,
            switch_down: false,
            notify: false,
            message: false,
            shortcuts: false,
        }
    }

    /// Whether the shell can switch desktops towards `dir`.
    pub fn can_switch(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.switch_left,
            Direction::Right => self.switch_right,
            Direction::Up => self.switch_up,
            Direction::Down => self.switch_down,
        }
    }
}

/// The shell's screen-edge subsystem.
///
/// Once an edge is registered the shell reports crossings of it as
/// [`Event::EdgeTriggered`] carrying that edge.
pub trait ScreenEdges {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Start watching `edge`.  An error means the edge is not watched.
    fn register_edge(&self, edge: EdgeId) -> Result<(), Self::Error>;

    /// Stop watching `edge`.
    fn unregister_edge(&self, edge: EdgeId) -> Result<(), Self::Error>;
}

/// Abstraction over the windowing shell edgeswitch is running inside.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.  Operations guarded by a [`Capabilities`]
/// flag are only called when that flag is set.
pub trait Shell: ScreenEdges {
    /// Windows that exist right now.
    fn windows(&self) -> Result<Vec<WindowSnapshot>, Self::Error>;

    /// Bind the toggle action to its default key combination.
    fn register_shortcut(&self, shortcut: &ShortcutConfig) -> Result<(), Self::Error>;

    /// Switch to the neighbouring desktop in `dir`.
    fn switch_desktop(&self, dir: Direction) -> Result<(), Self::Error>;

    /// Show `text` through the shell's notification service.
    fn notify(&self, text: &str, icon: Icon) -> Result<(), Self::Error>;

    /// Fallback on-screen message, used when [`notify`](Shell::notify)
    /// fails or is unavailable.
    fn show_message(&self, text: &str) -> Result<(), Self::Error>;
}

/// Where the controller reads its settings from.
///
/// Loading never fails; a source that cannot produce a configuration
/// returns the defaults.
pub trait ConfigSource {
    fn load(&self) -> Config;
}

/// A source of [`Event`]s.
///
/// Implementations listen on some transport (a Unix socket, Hyprland's
/// event socket, a cursor poller, …) and forward events into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](EventSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait EventSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Event`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_switch_reads_matching_flag() {
        let caps = Capabilities {
            switch_up: true,
            ..Capabilities::none()
        };
        assert!(caps.can_switch(Direction::Up));
        assert!(!caps.can_switch(Direction::Down));
        assert!(!caps.can_switch(Direction::Left));
        assert!(Capabilities::all().can_switch(Direction::Left));
    }

    /// A test double that emits a fixed sequence of events.
    struct MockSource {
        events: Vec<Event>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl EventSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), MockError> {
            for event in self.events.drain(..) {
                let _ = sink.send(event);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_events() {
        let mut src = MockSource {
            events: vec![Event::HotkeyPulse, Event::EdgeTriggered(EdgeId::Top)],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events, vec![Event::HotkeyPulse, Event::EdgeTriggered(EdgeId::Top)]);
    }
}
