//! Fusion of the three sources that can make a drag "active".
//!
//! * an interactive window move/resize,
//! * a window presenting a drag-and-drop icon,
//! * the "switch on edge" hotkey toggle.
//!
//! [`DragState::is_dragging`] is their logical OR.  It is recomputed on every
//! mutation, so reads never see a stale value.

use crate::event::WindowId;
use log::debug;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct DragState {
    window_drag: bool,
    dnd_windows: HashSet<WindowId>,
    hotkey_toggle: bool,
    dragging: bool,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn window_drag_active(&self) -> bool {
        self.window_drag
    }

    pub fn dnd_drag_active(&self) -> bool {
        !self.dnd_windows.is_empty()
    }

    pub fn hotkey_toggle_active(&self) -> bool {
        self.hotkey_toggle
    }

    /// Whether `id` is currently tracked as presenting a drag icon.
    pub fn is_tracking(&self, id: &WindowId) -> bool {
        self.dnd_windows.contains(id)
    }

    /// Some window started an interactive move/resize.
    pub fn move_resize_started(&mut self) {
        self.window_drag = true;
        self.recompute();
    }

    /// Some window finished an interactive move/resize.
    pub fn move_resize_finished(&mut self) {
        self.window_drag = false;
        self.recompute();
    }

    /// Start tracking `id` as a drag-icon window.  Repeated calls are no-ops.
    pub fn track_dnd(&mut self, id: WindowId) {
        if self.dnd_windows.insert(id) {
            self.recompute();
        }
    }

    /// Stop tracking `id`.  Untracked ids are ignored.
    pub fn untrack_dnd(&mut self, id: &WindowId) {
        if self.dnd_windows.remove(id) {
            self.recompute();
        }
    }

    /// Written by the hotkey toggle only.
    pub fn set_hotkey_toggle(&mut self, active: bool) {
        self.hotkey_toggle = active;
        self.recompute();
    }

    fn recompute(&mut self) {
        let dragging = self.window_drag || self.dnd_drag_active() || self.hotkey_toggle;
        if dragging != self.dragging {
            debug!(
                "dragging: {} (window={} dnd={} hotkey={})",
                dragging,
                self.window_drag,
                self.dnd_windows.len(),
                self.hotkey_toggle
            );
        }
        self.dragging = dragging;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_or(s: &DragState) {
        assert_eq!(
            s.is_dragging(),
            s.window_drag_active() || s.dnd_drag_active() || s.hotkey_toggle_active()
        );
    }

    #[test]
    fn idle_by_default() {
        let s = DragState::new();
        assert!(!s.is_dragging());
        assert_or(&s);
    }

    #[test]
    fn window_drag_follows_latest_event() {
        let mut s = DragState::new();
        s.move_resize_started();
        assert!(s.window_drag_active());
        s.move_resize_finished();
        assert!(!s.window_drag_active());
        s.move_resize_started();
        s.move_resize_started();
        assert!(s.window_drag_active());
        s.move_resize_finished();
        assert!(!s.window_drag_active());
        assert_or(&s);
    }

    #[test]
    fn dnd_active_while_any_window_tracked() {
        let mut s = DragState::new();
        s.track_dnd("a".into());
        s.track_dnd("b".into());
        s.track_dnd("a".into());
        assert!(s.dnd_drag_active());
        s.untrack_dnd(&"a".into());
        assert!(s.dnd_drag_active());
        s.untrack_dnd(&"b".into());
        assert!(!s.dnd_drag_active());
        assert_or(&s);
    }

    #[test]
    fn removing_untracked_window_is_noop() {
        let mut s = DragState::new();
        s.track_dnd("a".into());
        s.untrack_dnd(&"zzz".into());
        assert!(s.is_tracking(&"a".into()));
        // close and remove both arrive for the same window
        s.untrack_dnd(&"a".into());
        s.untrack_dnd(&"a".into());
        assert!(!s.dnd_drag_active());
    }

    #[test]
    fn dragging_is_or_across_interleavings() {
        let mut s = DragState::new();
        let steps: Vec<fn(&mut DragState)> = vec![
            |s: &mut DragState| s.move_resize_started(),
            |s: &mut DragState| s.set_hotkey_toggle(true),
            |s: &mut DragState| s.track_dnd("w".into()),
            |s: &mut DragState| s.move_resize_finished(),
            |s: &mut DragState| s.set_hotkey_toggle(false),
            |s: &mut DragState| s.untrack_dnd(&"w".into()),
            |s: &mut DragState| s.set_hotkey_toggle(true),
            |s: &mut DragState| s.untrack_dnd(&"w".into()),
        ];
        for step in steps {
            step(&mut s);
            assert_or(&s);
        }
        assert!(s.is_dragging());
        s.set_hotkey_toggle(false);
        assert!(!s.is_dragging());
    }
}
