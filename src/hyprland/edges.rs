//! Screen edges for a compositor that has none.
//!
//! Hyprland has no edge-trigger API, so [`EdgeZones`] derives one from the
//! cursor position: the outer border of the box enclosing all monitors is
//! split into four sides and four corners, and entering a zone fires its
//! edge once.  Only edges armed through
//! [`ScreenEdges`](crate::traits::ScreenEdges) fire.

use crate::edge::EdgeId;
use crate::hyprland::ipc::MonitorJson;

/// The box enclosing every monitor, in global coordinates (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Enclose all `monitors`; `None` when the list is empty.
    pub fn enclosing(monitors: &[MonitorJson]) -> Option<Self> {
        monitors
            .iter()
            .map(|m| Bounds {
                min_x: m.x,
                min_y: m.y,
                max_x: m.x + m.width - 1,
                max_y: m.y + m.height - 1,
            })
            .reduce(|a, b| Bounds {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
    }
}

#[derive(Debug, Clone)]
pub struct EdgeZones {
    bounds: Option<Bounds>,
    corner_size: i32,
    armed: Vec<EdgeId>,
    current: Option<EdgeId>,
}

impl EdgeZones {
    /// `corner_size` is how far (px) a corner reaches along each side.
    pub fn new(corner_size: i32) -> Self {
        Self {
            bounds: None,
            corner_size: corner_size.max(1),
            armed: Vec::new(),
            current: None,
        }
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn arm(&mut self, edge: EdgeId) {
        if !self.armed.contains(&edge) {
            self.armed.push(edge);
        }
    }

    pub fn disarm(&mut self, edge: EdgeId) {
        self.armed.retain(|e| *e != edge);
    }

    pub fn is_armed(&self, edge: EdgeId) -> bool {
        self.armed.contains(&edge)
    }

    /// The zone `(x, y)` lies in, if any.
    pub fn zone_at(&self, x: i32, y: i32) -> Option<EdgeId> {
        let b = self.bounds?;
        let at_left = x <= b.min_x;
        let at_right = x >= b.max_x;
        let at_top = y <= b.min_y;
        let at_bottom = y >= b.max_y;
        let near_left = x < b.min_x + self.corner_size;
        let near_right = x > b.max_x - self.corner_size;
        let near_top = y < b.min_y + self.corner_size;
        let near_bottom = y > b.max_y - self.corner_size;

        if (at_left && near_top) || (at_top && near_left) {
            Some(EdgeId::TopLeft)
        } else if (at_right && near_top) || (at_top && near_right) {
            Some(EdgeId::TopRight)
        } else if (at_left && near_bottom) || (at_bottom && near_left) {
            Some(EdgeId::BottomLeft)
        } else if (at_right && near_bottom) || (at_bottom && near_right) {
            Some(EdgeId::BottomRight)
        } else if at_left {
            Some(EdgeId::Left)
        } else if at_right {
            Some(EdgeId::Right)
        } else if at_top {
            Some(EdgeId::Top)
        } else if at_bottom {
            Some(EdgeId::Bottom)
        } else {
            None
        }
    }

    /// Feed a cursor position; returns the armed edge whose zone was just
    /// entered.
    pub fn update(&mut self, x: i32, y: i32) -> Option<EdgeId> {
        let zone = self.zone_at(x, y);
        let entered = zone.filter(|z| self.current != Some(*z));
        self.current = zone;
        entered.filter(|e| self.is_armed(*e))
    }
}
