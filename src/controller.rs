//! The orchestrator that ties cursor tracking, drag state, the hotkey
//! toggle and edge registrations together.
//!
//! [`EdgeController`] owns all core state and reacts to [`Event`]s by
//! updating it and, when an edge fires while a drag is active, asking the
//! [`Shell`] to switch desktops.  Handlers never fail: shell errors are
//! logged and the affected feature degrades to a no-op.
//!
//! # Typical usage
//!
//! ```ignore
//! let mut controller = EdgeController::new(shell, capabilities, FileConfig::new(path));
//! controller.start();
//! for event in events {
//!     controller.handle(event);
//! }
//! ```

use crate::config::{Config, ShortcutConfig};
use crate::cursor::{CursorTracker, Delta};
use crate::drag::DragState;
use crate::edge::{self, format_edges, EdgeId};
use crate::event::{Event, WindowId, WindowSnapshot};
use crate::registry::EdgeRegistry;
use crate::toggle::{ToggleDebouncer, ToggleState};
use crate::traits::{Capabilities, ConfigSource, Icon, Shell};
use log::{debug, info, warn};
use std::time::Instant;

/// Single owner of the switching state.
///
/// Generic over the [`Shell`] it drives and the [`ConfigSource`] it reads,
/// so independent instances can run side by side in tests.
pub struct EdgeController<S: Shell, C: ConfigSource> {
    shell: S,
    caps: Capabilities,
    config: C,
    cursor: CursorTracker,
    drag: DragState,
    toggle: ToggleDebouncer,
    registry: EdgeRegistry,
    show_osd: bool,
}

impl<S: Shell, C: ConfigSource> EdgeController<S, C> {
    /// Create a controller.  Nothing is registered until [`start`](Self::start).
    pub fn new(shell: S, caps: Capabilities, config: C) -> Self {
        Self {
            shell,
            caps,
            config,
            cursor: CursorTracker::new(),
            drag: DragState::new(),
            toggle: ToggleDebouncer::new(),
            registry: EdgeRegistry::new(),
            show_osd: true,
        }
    }

    /// Apply the configuration, bind the toggle shortcut and pick up
    /// windows that already present a drag icon.
    pub fn start(&mut self) {
        let config = self.apply_config();
        self.bind_shortcut(&config.shortcut);

        match self.shell.windows() {
            Ok(windows) => {
                for window in windows {
                    self.window_added(window);
                }
            }
            Err(e) => warn!("could not list windows: {}", e),
        }

        info!("loaded");
    }

    /// Process a single [`Event`].
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::CursorMoved { x, y } => self.cursor.update(x, y),
            Event::WindowAdded(window) => self.window_added(window),
            Event::WindowClosed { id } | Event::WindowRemoved { id } => {
                self.drag.untrack_dnd(&id);
            }
            Event::MoveResizeStarted { id } => {
                debug!("move/resize started: {}", id);
                self.drag.move_resize_started();
            }
            Event::MoveResizeFinished { id } => {
                debug!("move/resize finished: {}", id);
                self.drag.move_resize_finished();
            }
            Event::DragIconChanged { id, active } => self.drag_icon_changed(id, active),
            Event::ConfigChanged => {
                // A shell reload may have dropped runtime key binds.
                let config = self.apply_config();
                self.bind_shortcut(&config.shortcut);
            }
            Event::HotkeyPulse => self.pulse_at(Instant::now()),
            Event::EdgeTriggered(edge) => self.edge_triggered(edge),
        }
    }

    /// One hotkey pulse received at `now`.
    pub fn pulse_at(&mut self, now: Instant) {
        if let Some(state) = self.toggle.pulse(now) {
            self.drag.set_hotkey_toggle(state == ToggleState::On);
            info!("switch on edge: {}", state);
            self.notify_toggle(state);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn toggle_state(&self) -> ToggleState {
        self.toggle.state()
    }

    pub fn registered_edges(&self) -> &[EdgeId] {
        self.registry.edges()
    }

    pub fn last_delta(&self) -> Delta {
        self.cursor.last_delta()
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    //  Event helpers

    /// Re-read the configuration and re-register edges if they changed.
    fn apply_config(&mut self) -> Config {
        let config = self.config.load();
        self.show_osd = config.show_toggle_osd;
        let edges = config.effective_edges();
        if self.registry.reconcile(&self.shell, edges.as_slice()) {
            info!("edges: {}", format_edges(self.registry.edges()));
        }
        config
    }

    fn bind_shortcut(&self, shortcut: &ShortcutConfig) {
        if !self.caps.shortcuts {
            return;
        }
        match self.shell.register_shortcut(shortcut) {
            Ok(()) => info!("shortcut {} bound to {}", shortcut.name, shortcut.keys),
            Err(e) => warn!("could not register shortcut {}: {}", shortcut.name, e),
        }
    }

    fn window_added(&mut self, window: WindowSnapshot) {
        match window.drag_icon {
            Some(true) => self.drag.track_dnd(window.id),
            Some(false) => {}
            None => debug!("drag icon state of {} unknown, not tracking", window.id),
        }
    }

    fn drag_icon_changed(&mut self, id: WindowId, active: bool) {
        if active {
            self.drag.track_dnd(id);
        } else {
            self.drag.untrack_dnd(&id);
        }
    }

    /// Switch desktops if a drag is active and the edge resolves to a
    /// direction the shell can switch in.
    fn edge_triggered(&mut self, edge: EdgeId) {
        if !self.registry.contains(edge) {
            debug!("edge {} fired but is not registered", edge);
            return;
        }
        if !self.drag.is_dragging() {
            return;
        }
        let Some(dir) = edge::direction(edge, self.cursor.last_delta()) else {
            return;
        };
        if !self.caps.can_switch(dir) {
            debug!("edge {}: shell cannot switch {}", edge, dir);
            return;
        }
        info!("edge {} -> switch {}", edge, dir);
        if let Err(e) = self.shell.switch_desktop(dir) {
            warn!("switch {} failed: {}", dir, e);
        }
    }

    /// Best-effort feedback: notification first, then the fallback message,
    /// otherwise nothing.
    fn notify_toggle(&self, state: ToggleState) {
        if !self.show_osd {
            return;
        }
        let text = format!("Switch on edge: {}", state);
        let icon = match state {
            ToggleState::On => Icon::Enabled,
            ToggleState::Off => Icon::Disabled,
        };
        if self.caps.notify {
            match self.shell.notify(&text, icon) {
                Ok(()) => return,
                Err(e) => debug!("notification failed: {}", e),
            }
        }
        if self.caps.message {
            if let Err(e) = self.shell.show_message(&text) {
                debug!("on-screen message failed, dropping: {}", e);
            }
        }
    }
}

//  Tests
