//! Simulation node types

use serde::{Deserialize, Serialize};

/// Input to the simulation: an identified circle with an optional target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    pub id: String,
    /// Target coordinate on the primary axis; `None` excludes the node
    pub target: Option<f64>,
    pub radius: f64,
}

impl NodeInput {
    pub fn new(id: impl Into<String>, target: Option<f64>, radius: f64) -> Self {
        Self {
            id: id.into(),
            target,
            radius,
        }
    }
}

/// Mutable per-run state of one circle, in primary/secondary coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationNode {
    pub id: String,
    pub target: f64,
    pub primary: f64,
    pub secondary: f64,
    pub velocity_primary: f64,
    pub velocity_secondary: f64,
    pub radius: f64,
}

/// Final placement of a circle in chart coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl PositionedNode {
    /// Distance between the two centers
    pub fn distance(&self, other: &PositionedNode) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Amount by which two circles overlap (zero when apart)
    pub fn overlap(&self, other: &PositionedNode) -> f64 {
        (self.radius + other.radius - self.distance(other)).max(0.0)
    }
}
