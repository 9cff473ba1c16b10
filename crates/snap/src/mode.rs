//! Snap mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the three candidate points a snapper hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// Raw ray intersection.
    #[default]
    Exact,
    /// Nearest corner of the hit triangle.
    Vertex,
    /// Nearest quantized point on an edge of the hit triangle.
    Edge,
}

/// Which snap markers a renderer should show for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Indicators {
    /// Show the nearest-vertex marker.
    pub vertex: bool,
    /// Show the nearest-edge marker.
    pub edge: bool,
}

impl SnapMode {
    /// Every mode in cycling order.
    pub const ALL: [Self; 3] = [Self::Exact, Self::Vertex, Self::Edge];

    /// Exact -> Vertex -> Edge -> Exact.
    pub const fn next(self) -> Self {
        match self {
            Self::Exact => Self::Vertex,
            Self::Vertex => Self::Edge,
            Self::Edge => Self::Exact,
        }
    }

    /// Marker visibility for this mode. The exact-hit marker is always shown.
    pub const fn indicators(self) -> Indicators {
        match self {
            Self::Exact => Indicators {
                vertex: false,
                edge: false,
            },
            Self::Vertex => Indicators {
                vertex: true,
                edge: false,
            },
            Self::Edge => Indicators {
                vertex: false,
                edge: true,
            },
        }
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Vertex => "vertex",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for SnapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_has_period_three() {
        for mode in SnapMode::ALL {
            assert_ne!(mode.next(), mode);
            assert_eq!(mode.next().next().next(), mode);
        }
        assert_eq!(SnapMode::Exact.next(), SnapMode::Vertex);
        assert_eq!(SnapMode::Vertex.next(), SnapMode::Edge);
        assert_eq!(SnapMode::Edge.next(), SnapMode::Exact);
    }

    #[test]
    fn indicators_follow_mode() {
        assert_eq!(SnapMode::Exact.indicators(), Indicators::default());
        assert!(SnapMode::Vertex.indicators().vertex);
        assert!(!SnapMode::Vertex.indicators().edge);
        assert!(SnapMode::Edge.indicators().edge);
        assert!(!SnapMode::Edge.indicators().vertex);
    }

    #[test]
    fn default_is_exact() {
        assert_eq!(SnapMode::default(), SnapMode::Exact);
        assert_eq!(SnapMode::Edge.to_string(), "edge");
    }
}
