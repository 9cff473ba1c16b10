#![warn(missing_docs)]
//! Two-point distance measurement driven by discrete capture events.
//!
//! A capture carries the snapper's selected point, or `None` when the
//! snapper reported no hit:
//!
//! ```text
//! Idle   --p-->  First(p)
//! First  --p-->  Second(p1, p)
//! Second --p-->  Idle
//! any    --miss--> Idle
//! ```

use glam::Vec3;
use holosnap_core::Tick;
use holosnap_input::{ClickEvent, ClickHandler};
use serde::Serialize;
use tracing::debug;

/// Where the ruler is in its capture cycle, with the points captured so far.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RulerState {
    /// Nothing captured.
    #[default]
    Idle,
    /// First point captured.
    First {
        /// Start of the measurement.
        p1: Vec3,
    },
    /// Both points captured; the distance is valid.
    Second {
        /// Start of the measurement.
        p1: Vec3,
        /// End of the measurement.
        p2: Vec3,
    },
}

impl RulerState {
    /// Short name used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::First { .. } => "first",
            Self::Second { .. } => "second",
        }
    }

    /// Apply one capture and return the next state.
    pub fn next(self, sample: Option<Vec3>) -> Self {
        let Some(p) = sample else {
            return Self::Idle;
        };
        match self {
            Self::Idle => Self::First { p1: p },
            Self::First { p1 } => Self::Second { p1, p2: p },
            Self::Second { .. } => Self::Idle,
        }
    }
}

/// A finished measurement, ready to be drawn as a line with a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RulerSegment {
    /// First captured point.
    pub start: Vec3,
    /// Second captured point.
    pub end: Vec3,
    /// `|end - start|`.
    pub distance: f32,
}

impl RulerSegment {
    /// Text for the distance marker.
    pub fn label(&self) -> String {
        format!("{:.3}", self.distance)
    }
}

/// Measures the distance between two captured points.
#[derive(Debug, Clone, Default)]
pub struct Ruler {
    state: RulerState,
    last_capture: Option<Tick>,
}

impl Ruler {
    /// Create an idle ruler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RulerState {
        self.state
    }

    /// Tick of the last click delivered through [`ClickHandler`].
    pub fn last_capture(&self) -> Option<Tick> {
        self.last_capture
    }

    /// Feed one capture event and return the resulting state.
    ///
    /// `None` means the snapper had no hit; it forces the ruler back to idle
    /// without recording anything.
    pub fn capture(&mut self, sample: Option<Vec3>) -> RulerState {
        let next = self.state.next(sample);
        if sample.is_none() && self.state != RulerState::Idle {
            debug!(from = self.state.as_str(), "capture missed, ruler reset");
        } else if sample.is_some() {
            debug!(from = self.state.as_str(), to = next.as_str(), "ruler capture");
        }
        self.state = next;
        if let Some(segment) = self.segment() {
            debug!(distance = segment.distance, "measurement complete");
        }
        next
    }

    /// Drop any captured points.
    pub fn reset(&mut self) {
        self.state = RulerState::Idle;
    }

    /// Measured distance, only while both points are held.
    pub fn distance(&self) -> Option<f32> {
        self.segment().map(|segment| segment.distance)
    }

    /// The measurement to render, only while both points are held.
    pub fn segment(&self) -> Option<RulerSegment> {
        match self.state {
            RulerState::Second { p1, p2 } => Some(RulerSegment {
                start: p1,
                end: p2,
                distance: p1.distance(p2),
            }),
            _ => None,
        }
    }
}

impl ClickHandler for Ruler {
    fn on_click(&mut self, event: &ClickEvent) {
        self.last_capture = Some(event.tick);
        self.capture(event.point);
    }
}
