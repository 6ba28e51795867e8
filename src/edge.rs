//! Screen edges and the directions they switch towards.
//!
//! [`EdgeId`] names one of the eight trigger zones the shell can watch:
//! four sides and four corners.  Hosts number them clockwise starting at the
//! top (`0` = top, `1` = top-right, … `7` = top-left); configuration and the
//! wire format accept either that number or a name.
//!
//! [`direction`] maps a triggered edge to the way the desktop should move.
//! Corners are ambiguous, so the cursor's most recent motion decides which
//! of the two sides the user was heading for.

use crate::cursor::Delta;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the eight screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeId {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl EdgeId {
    /// Every edge, in host numbering order.
    pub const ALL: [EdgeId; 8] = [
        EdgeId::Top,
        EdgeId::TopRight,
        EdgeId::Right,
        EdgeId::BottomRight,
        EdgeId::Bottom,
        EdgeId::BottomLeft,
        EdgeId::Left,
        EdgeId::TopLeft,
    ];

    /// Look up an edge by its host number.
    pub fn from_number(n: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(n).ok()?).copied()
    }

    /// The host number of this edge.
    pub fn number(self) -> u8 {
        match self {
            EdgeId::Top => 0,
            EdgeId::TopRight => 1,
            EdgeId::Right => 2,
            EdgeId::BottomRight => 3,
            EdgeId::Bottom => 4,
            EdgeId::BottomLeft => 5,
            EdgeId::Left => 6,
            EdgeId::TopLeft => 7,
        }
    }

    /// Whether this edge is one of the four corners.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            EdgeId::TopLeft | EdgeId::TopRight | EdgeId::BottomLeft | EdgeId::BottomRight
        )
    }

    /// Parse a single configuration token: a host number (`"6"`) or a
    /// name (`"left"`, `"top-left"`, `"TopLeft"`).
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Ok(n) = token.parse::<u64>() {
            return Self::from_number(n);
        }
        let normalized: String = token
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        match normalized.as_str() {
            "top" => Some(EdgeId::Top),
            "topright" => Some(EdgeId::TopRight),
            "right" => Some(EdgeId::Right),
            "bottomright" => Some(EdgeId::BottomRight),
            "bottom" => Some(EdgeId::Bottom),
            "bottomleft" => Some(EdgeId::BottomLeft),
            "left" => Some(EdgeId::Left),
            "topleft" => Some(EdgeId::TopLeft),
            _ => None,
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Top => write!(f, "top"),
            EdgeId::TopRight => write!(f, "top-right"),
            EdgeId::Right => write!(f, "right"),
            EdgeId::BottomRight => write!(f, "bottom-right"),
            EdgeId::Bottom => write!(f, "bottom"),
            EdgeId::BottomLeft => write!(f, "bottom-left"),
            EdgeId::Left => write!(f, "left"),
            EdgeId::TopLeft => write!(f, "top-left"),
        }
    }
}

impl<'de> Deserialize<'de> for EdgeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = EdgeId;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "edge number 0-7 or edge name")
            }
            fn visit_u64<E>(self, n: u64) -> Result<EdgeId, E>
            where
                E: DeError,
            {
                EdgeId::from_number(n).ok_or_else(|| DeError::custom(format!("unknown edge: {}", n)))
            }
            fn visit_i64<E>(self, n: i64) -> Result<EdgeId, E>
            where
                E: DeError,
            {
                u64::try_from(n)
                    .ok()
                    .and_then(EdgeId::from_number)
                    .ok_or_else(|| DeError::custom(format!("unknown edge: {}", n)))
            }
            fn visit_str<E>(self, s: &str) -> Result<EdgeId, E>
            where
                E: DeError,
            {
                EdgeId::parse_token(s).ok_or_else(|| DeError::custom(format!("unknown edge: {:?}", s)))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Direction a desktop switch moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Resolve which way to switch when `edge` fires.
///
/// Sides map straight to their direction.  A corner picks its horizontal
/// side when `|dx| >= |dy|` (ties, including no motion at all, go
/// horizontal) and its vertical side otherwise.
pub fn direction(edge: EdgeId, last_delta: Delta) -> Option<Direction> {
    let (horizontal, vertical) = match edge {
        EdgeId::Left => return Some(Direction::Left),
        EdgeId::Right => return Some(Direction::Right),
        EdgeId::Top => return Some(Direction::Up),
        EdgeId::Bottom => return Some(Direction::Down),
        EdgeId::TopLeft => (Direction::Left, Direction::Up),
        EdgeId::TopRight => (Direction::Right, Direction::Up),
        EdgeId::BottomLeft => (Direction::Left, Direction::Down),
        EdgeId::BottomRight => (Direction::Right, Direction::Down),
    };
    if last_delta.dx.unsigned_abs() >= last_delta.dy.unsigned_abs() {
        Some(horizontal)
    } else {
        Some(vertical)
    }
}

/// An ordered list of edges without duplicates.
///
/// Built from whatever shape the configuration stores the edge selection
/// in; see [`EdgeList::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeList(Vec<EdgeId>);

impl EdgeList {
    /// Build a list, keeping the first occurrence of each edge.
    pub fn new(edges: impl IntoIterator<Item = EdgeId>) -> Self {
        let mut out = Vec::new();
        for edge in edges {
            if !out.contains(&edge) {
                out.push(edge);
            }
        }
        Self(out)
    }

    /// All eight edges.
    pub fn all() -> Self {
        Self(EdgeId::ALL.to_vec())
    }

    /// Normalize a raw configuration value.
    ///
    /// Accepts a delimited string (`"6,2"`, `"6 2;1"`), an array of numbers
    /// or strings, or a single scalar.  Tokens that do not name an edge are
    /// skipped; any other shape yields an empty list.
    pub fn from_value(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::new(n.as_u64().and_then(EdgeId::from_number)),
            Value::Array(items) => Self::new(items.iter().filter_map(|item| match item {
                Value::String(s) => EdgeId::parse_token(s),
                Value::Number(n) => n.as_u64().and_then(EdgeId::from_number),
                _ => None,
            })),
            _ => Self::default(),
        }
    }

    /// Parse a delimited string of edge tokens.
    pub fn parse(s: &str) -> Self {
        Self::new(
            s.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .filter_map(EdgeId::parse_token),
        )
    }

    pub fn as_slice(&self) -> &[EdgeId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for EdgeList {
    /// Never fails: unparsable input becomes an empty list.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer).unwrap_or_default();
        Ok(Self::from_value(&value))
    }
}

/// Format edges for status logging, e.g. `left,right`.
pub fn format_edges(edges: &[EdgeId]) -> String {
    edges
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delta(dx: i32, dy: i32) -> Delta {
        Delta { dx, dy }
    }

    #[test]
    fn sides_ignore_cursor_motion() {
        for d in [delta(0, 0), delta(50, -3), delta(-2, 90), delta(-40, -40)] {
            assert_eq!(direction(EdgeId::Left, d), Some(Direction::Left));
            assert_eq!(direction(EdgeId::Right, d), Some(Direction::Right));
            assert_eq!(direction(EdgeId::Top, d), Some(Direction::Up));
            assert_eq!(direction(EdgeId::Bottom, d), Some(Direction::Down));
        }
    }

    #[test]
    fn corner_without_motion_goes_horizontal() {
        assert_eq!(direction(EdgeId::TopLeft, delta(0, 0)), Some(Direction::Left));
        assert_eq!(direction(EdgeId::TopRight, delta(0, 0)), Some(Direction::Right));
        assert_eq!(direction(EdgeId::BottomLeft, delta(0, 0)), Some(Direction::Left));
        assert_eq!(direction(EdgeId::BottomRight, delta(0, 0)), Some(Direction::Right));
    }

    #[test]
    fn corner_tie_goes_horizontal() {
        assert_eq!(direction(EdgeId::TopRight, delta(7, -7)), Some(Direction::Right));
        assert_eq!(direction(EdgeId::BottomLeft, delta(-3, 3)), Some(Direction::Left));
    }

    #[test]
    fn corner_follows_dominant_vertical_motion() {
        assert_eq!(direction(EdgeId::TopLeft, delta(-2, -9)), Some(Direction::Up));
        assert_eq!(direction(EdgeId::BottomRight, delta(1, 12)), Some(Direction::Down));
    }

    #[test]
    fn corner_follows_dominant_horizontal_motion() {
        assert_eq!(direction(EdgeId::BottomLeft, delta(-20, 4)), Some(Direction::Left));
        assert_eq!(direction(EdgeId::TopRight, delta(15, -1)), Some(Direction::Right));
    }

    #[test]
    fn host_numbers_round_trip() {
        for edge in EdgeId::ALL {
            assert_eq!(EdgeId::from_number(edge.number() as u64), Some(edge));
        }
        assert_eq!(EdgeId::from_number(8), None);
    }

    #[test]
    fn parse_token_accepts_names_and_numbers() {
        assert_eq!(EdgeId::parse_token("6"), Some(EdgeId::Left));
        assert_eq!(EdgeId::parse_token(" top-left "), Some(EdgeId::TopLeft));
        assert_eq!(EdgeId::parse_token("BottomRight"), Some(EdgeId::BottomRight));
        assert_eq!(EdgeId::parse_token("bottom_left"), Some(EdgeId::BottomLeft));
        assert_eq!(EdgeId::parse_token("middle"), None);
        assert_eq!(EdgeId::parse_token("42"), None);
    }

    #[test]
    fn deserialize_edge_from_number_or_name() {
        let e: EdgeId = serde_json::from_str("2").unwrap();
        assert_eq!(e, EdgeId::Right);
        let e: EdgeId = serde_json::from_str(r#""top-right""#).unwrap();
        assert_eq!(e, EdgeId::TopRight);
        assert!(serde_json::from_str::<EdgeId>("9").is_err());
        assert!(serde_json::from_str::<EdgeId>(r#""nowhere""#).is_err());
    }

    #[test]
    fn edge_list_from_delimited_string() {
        let list = EdgeList::from_value(&json!("6, 2;top  x 99"));
        assert_eq!(list.as_slice(), &[EdgeId::Left, EdgeId::Right, EdgeId::Top]);
    }

    #[test]
    fn edge_list_from_array() {
        let list = EdgeList::from_value(&json!([6, "2", null, "bogus", 7]));
        assert_eq!(list.as_slice(), &[EdgeId::Left, EdgeId::Right, EdgeId::TopLeft]);
    }

    #[test]
    fn edge_list_from_scalar() {
        assert_eq!(EdgeList::from_value(&json!(4)).as_slice(), &[EdgeId::Bottom]);
        assert!(EdgeList::from_value(&json!(-1)).is_empty());
        assert!(EdgeList::from_value(&json!(true)).is_empty());
        assert!(EdgeList::from_value(&json!({"left": true})).is_empty());
    }

    #[test]
    fn edge_list_keeps_first_occurrence() {
        let list = EdgeList::from_value(&json!("2,6,2,left"));
        assert_eq!(list.as_slice(), &[EdgeId::Right, EdgeId::Left]);
    }

    #[test]
    fn format_edges_joins_names() {
        assert_eq!(format_edges(&[EdgeId::Left, EdgeId::Right]), "left,right");
        assert_eq!(format_edges(&[]), "");
    }
}
