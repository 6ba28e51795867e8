//! Cursor polling and edge detection.
//!
//! Hyprland publishes no pointer-motion events, so [`CursorPoller`] asks for
//! `j/cursorpos` at a fixed interval.  Each new position is sent as
//! [`Event::CursorMoved`], followed by [`Event::EdgeTriggered`] when the
//! position enters an armed [`EdgeZones`] zone.  The monitor layout is
//! re-read periodically so hot-plugged outputs move the edges with them.

use crate::event::Event;
use crate::hyprland::edges::{Bounds, EdgeZones};
use crate::hyprland::ipc::{self, CursorPosJson, HyprlandError, MonitorJson};
use crate::traits::EventSource;
use log::{debug, info, warn};
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

/// How often the monitor layout is refreshed.
const BOUNDS_REFRESH: Duration = Duration::from_secs(5);

pub struct CursorPoller {
    zones: Arc<Mutex<EdgeZones>>,
    interval: Duration,
}

impl CursorPoller {
    pub fn new(zones: Arc<Mutex<EdgeZones>>, interval: Duration) -> Self {
        Self { zones, interval }
    }

    fn refresh_bounds(&self) {
        let bounds = match ipc::query::<Vec<MonitorJson>>("monitors") {
            Ok(monitors) => Bounds::enclosing(&monitors),
            Err(e) => {
                warn!("could not query monitors: {}", e);
                return;
            }
        };
        if let Ok(mut zones) = self.zones.lock() {
            if zones.bounds() != bounds {
                info!("screen bounds: {:?}", bounds);
                zones.set_bounds(bounds);
            }
        }
    }
}

/// Events produced by moving from `last` to `pos`.
fn step(zones: &Mutex<EdgeZones>, last: Option<CursorPosJson>, pos: CursorPosJson) -> Vec<Event> {
    if last == Some(pos) {
        return Vec::new();
    }
    let mut events = vec![Event::CursorMoved { x: pos.x, y: pos.y }];
    let hit = zones.lock().ok().and_then(|mut z| z.update(pos.x, pos.y));
    if let Some(edge) = hit {
        debug!("cursor entered edge {}", edge);
        events.push(Event::EdgeTriggered(edge));
    }
    events
}

impl EventSource for CursorPoller {
    type Error = HyprlandError;

    /// Poll until the sink closes.  IPC failures are logged and retried on
    /// the next tick.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        info!("polling cursor every {:?}", self.interval);
        let mut last = None;
        let mut last_refresh: Option<Instant> = None;

        loop {
            if last_refresh.map_or(true, |t| t.elapsed() >= BOUNDS_REFRESH) {
                self.refresh_bounds();
                last_refresh = Some(Instant::now());
            }

            match ipc::query::<CursorPosJson>("cursorpos") {
                Ok(pos) => {
                    for event in step(&self.zones, last, pos) {
                        if sink.send(event).is_err() {
                            info!("sink closed, stopping cursor poller");
                            return Ok(());
                        }
                    }
                    last = Some(pos);
                }
                Err(e) => debug!("cursorpos: {}", e),
            }

            std::thread::sleep(self.interval);
        }
    }
}
