//! [`Shell`] implementation backed by Hyprland IPC.

use crate::config::ShortcutConfig;
use crate::edge::{Direction, EdgeId};
use crate::event::{WindowId, WindowSnapshot};
use crate::hyprland::edges::EdgeZones;
use crate::hyprland::ipc::{self, ClientJson, HyprlandError};
use crate::traits::{Capabilities, Icon, ScreenEdges, Shell};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Hyprland backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HyprlandConfig {
    /// Dispatcher run for each switch direction.  A direction without one
    /// cannot be switched in.
    pub switch: SwitchCommands,
    /// How far (px) a corner zone reaches along each side.  Default: `16`.
    pub corner_size: i32,
    /// Cursor polling interval (ms).  Default: `16`.
    pub cursor_poll_ms: u64,
    /// How long notifications stay on screen (ms).  Default: `1500`.
    pub notify_ms: u64,
    /// Fall back to `notify-send` when Hyprland's notification fails.
    /// Default: `true`.
    pub message_fallback: bool,
}

impl Default for HyprlandConfig {
    fn default() -> Self {
        Self {
            switch: SwitchCommands::default(),
            corner_size: 16,
            cursor_poll_ms: 16,
            notify_ms: 1500,
            message_fallback: true,
        }
    }
}

/// Dispatcher arguments per direction, e.g. `"workspace r+1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchCommands {
    pub left: Option<String>,
    pub right: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
}

impl Default for SwitchCommands {
    fn default() -> Self {
        Self {
            left: Some("workspace r-1".into()),
            right: Some("workspace r+1".into()),
            up: None,
            down: None,
        }
    }
}

impl SwitchCommands {
    pub fn get(&self, dir: Direction) -> Option<&str> {
        match dir {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
        }
    }
}

/// Hyprland-backed shell.
///
/// Edge registrations arm the shared [`EdgeZones`], which the
/// [`CursorPoller`](crate::hyprland::cursor::CursorPoller) consults.
/// Everything else is a short-lived IPC request.
pub struct HyprlandShell {
    config: HyprlandConfig,
    zones: Arc<Mutex<EdgeZones>>,
    /// Keys of the toggle bind this shell last installed.
    bound_keys: Mutex<Option<String>>,
}

impl HyprlandShell {
    pub fn new(config: HyprlandConfig, zones: Arc<Mutex<EdgeZones>>) -> Self {
        Self {
            config,
            zones,
            bound_keys: Mutex::new(None),
        }
    }

    /// What this backend can do with the given settings.
    pub fn capabilities(&self) -> Capabilities {
        let switch = &self.config.switch;
        Capabilities {
            switch_left: switch.left.is_some(),
            switch_right: switch.right.is_some(),
            switch_up: switch.up.is_some(),
            switch_down: switch.down.is_some(),
            notify: true,
            message: self.config.message_fallback,
            shortcuts: true,
        }
    }

    fn zones(&self) -> Result<MutexGuard<'_, EdgeZones>, HyprlandError> {
        self.zones
            .lock()
            .map_err(|_| HyprlandError("edge zones lock poisoned".into()))
    }
}

fn bind_request(shortcut: &ShortcutConfig) -> String {
    format!("/keyword bind {},exec,{}", shortcut.keys, shortcut.command)
}

fn unbind_request(keys: &str) -> String {
    format!("/keyword unbind {}", keys)
}

/// Hyprland's built-in notification icons.
fn icon_code(icon: Icon) -> i32 {
    match icon {
        Icon::Enabled => 5,
        Icon::Disabled => 1,
    }
}

impl ScreenEdges for HyprlandShell {
    type Error = HyprlandError;

    fn register_edge(&self, edge: EdgeId) -> Result<(), Self::Error> {
        self.zones()?.arm(edge);
        Ok(())
    }

    fn unregister_edge(&self, edge: EdgeId) -> Result<(), Self::Error> {
        self.zones()?.disarm(edge);
        Ok(())
    }
}

impl Shell for HyprlandShell {
    /// Hyprland cannot tell whether a client is a drag source, so every
    /// window is reported with an unknown drag icon.
    fn windows(&self) -> Result<Vec<WindowSnapshot>, Self::Error> {
        let clients: Vec<ClientJson> = ipc::query("clients")?;
        Ok(clients
            .into_iter()
            .map(|c| WindowSnapshot {
                id: WindowId(c.address),
                drag_icon: None,
            })
            .collect())
    }

    /// Runtime binds vanish when Hyprland reloads its config, so this is
    /// called again after every reload.  The previous bind is removed first
    /// so repeated calls never stack duplicate binds.
    fn register_shortcut(&self, shortcut: &ShortcutConfig) -> Result<(), Self::Error> {
        let mut bound = self
            .bound_keys
            .lock()
            .map_err(|_| HyprlandError("shortcut lock poisoned".into()))?;
        if let Some(keys) = bound.take() {
            if let Err(e) = ipc::request_ok(&unbind_request(&keys)) {
                debug!("unbind {}: {}", keys, e);
            }
        }
        ipc::request_ok(&bind_request(shortcut))?;
        *bound = Some(shortcut.keys.clone());
        Ok(())
    }

    fn switch_desktop(&self, dir: Direction) -> Result<(), Self::Error> {
        let command = self
            .config
            .switch
            .get(dir)
            .ok_or_else(|| HyprlandError(format!("no dispatcher for {}", dir)))?;
        ipc::dispatch(command)
    }

    fn notify(&self, text: &str, icon: Icon) -> Result<(), Self::Error> {
        ipc::request_ok(&format!(
            "/notify {} {} 0 {}",
            icon_code(icon),
            self.config.notify_ms,
            text
        ))
    }

    fn show_message(&self, text: &str) -> Result<(), Self::Error> {
        ipc::dispatch(&format!(
            "exec notify-send -a edgeswitch {}",
            ipc::shell_quote(text)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(config: HyprlandConfig) -> HyprlandShell {
        HyprlandShell::new(config, Arc::new(Mutex::new(EdgeZones::new(8))))
    }

    #[test]
    fn default_capabilities_switch_horizontally() {
        let caps = shell(HyprlandConfig::default()).capabilities();
        assert!(caps.can_switch(Direction::Left));
        assert!(caps.can_switch(Direction::Right));
        assert!(!caps.can_switch(Direction::Up));
        assert!(!caps.can_switch(Direction::Down));
        assert!(caps.notify && caps.message && caps.shortcuts);
    }

    #[test]
    fn configured_directions_become_capabilities() {
        let json = r#"{ "switch": { "left": null, "up": "workspace r-3" }, "message_fallback": false }"#;
        let config: HyprlandConfig = serde_json::from_str(json).unwrap();
        let caps = shell(config).capabilities();
        assert!(!caps.can_switch(Direction::Left));
        assert!(caps.can_switch(Direction::Right));
        assert!(caps.can_switch(Direction::Up));
        assert!(!caps.message);
    }

    #[test]
    fn registering_edges_arms_zones() {
        let zones = Arc::new(Mutex::new(EdgeZones::new(8)));
        let s = HyprlandShell::new(HyprlandConfig::default(), zones.clone());
        s.register_edge(EdgeId::Left).unwrap();
        s.register_edge(EdgeId::Top).unwrap();
        s.unregister_edge(EdgeId::Top).unwrap();
        let z = zones.lock().unwrap();
        assert!(z.is_armed(EdgeId::Left));
        assert!(!z.is_armed(EdgeId::Top));
    }

    #[test]
    fn shortcut_requests() {
        let shortcut = ShortcutConfig::default();
        assert_eq!(
            bind_request(&shortcut),
            "/keyword bind SUPER CTRL, E,exec,edgeswitch-ctl pulse"
        );
        assert_eq!(unbind_request(&shortcut.keys), "/keyword unbind SUPER CTRL, E");
    }

    #[test]
    fn switch_without_dispatcher_is_an_error() {
        let s = shell(HyprlandConfig::default());
        assert!(s.switch_desktop(Direction::Up).is_err());
    }
}
