//! Simulation configuration

use crate::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

/// Axis along which nodes are pulled toward their own target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    /// The orthogonal axis
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Parameters of the force simulation.
///
/// Defaults follow the conventional force-layout schedule: the cooling
/// factor `alpha` starts at 1 and decays to `alpha_min` in roughly 300 ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Axis carrying each node's target coordinate
    pub primary_axis: Axis,
    /// Shared coordinate on the secondary axis
    pub centerline: f64,
    /// Hard cap on ticks
    pub max_iterations: usize,
    /// Stop once the summed per-tick displacement falls below this; 0 disables
    pub convergence_threshold: f64,
    /// Spring strength toward the node's target on the primary axis
    pub pull_strength: f64,
    /// Spring strength toward the centerline on the secondary axis
    pub center_strength: f64,
    /// Inverse-square charge between node pairs; negative repels
    pub charge_strength: f64,
    /// Extra distance kept between circle edges
    pub collision_padding: f64,
    /// Collision relaxation passes per tick
    pub collision_iterations: usize,
    /// Fraction of the remaining alpha removed per tick
    pub alpha_decay: f64,
    /// Alpha below which the simulation has cooled
    pub alpha_min: f64,
    /// Fraction of velocity lost per tick
    pub velocity_decay: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            primary_axis: Axis::X,
            centerline: 0.0,
            max_iterations: 300,
            convergence_threshold: 0.01,
            pull_strength: 0.1,
            center_strength: 0.1,
            charge_strength: -1.0,
            collision_padding: 1.0,
            collision_iterations: 1,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_min,
            velocity_decay: 0.4,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary_axis(mut self, axis: Axis) -> Self {
        self.primary_axis = axis;
        self
    }

    pub fn with_centerline(mut self, centerline: f64) -> Self {
        self.centerline = centerline;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_pull_strength(mut self, strength: f64) -> Self {
        self.pull_strength = strength;
        self
    }

    pub fn with_center_strength(mut self, strength: f64) -> Self {
        self.center_strength = strength;
        self
    }

    pub fn with_charge_strength(mut self, strength: f64) -> Self {
        self.charge_strength = strength;
        self
    }

    pub fn with_collision_padding(mut self, padding: f64) -> Self {
        self.collision_padding = padding;
        self
    }

    /// Reject parameters that would make the simulation diverge or stall
    pub fn validate(&self) -> LayoutResult<()> {
        let unit = |name: &'static str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(LayoutError::InvalidParameter { name, value })
            }
        };
        unit("pullStrength", self.pull_strength)?;
        unit("centerStrength", self.center_strength)?;
        unit("alphaDecay", self.alpha_decay)?;
        unit("velocityDecay", self.velocity_decay)?;

        let non_negative = |name: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidParameter { name, value })
            }
        };
        non_negative("collisionPadding", self.collision_padding)?;
        non_negative("convergenceThreshold", self.convergence_threshold)?;
        non_negative("alphaMin", self.alpha_min)?;

        if !self.charge_strength.is_finite() {
            return Err(LayoutError::InvalidParameter {
                name: "chargeStrength",
                value: self.charge_strength,
            });
        }
        if !self.centerline.is_finite() {
            return Err(LayoutError::InvalidParameter {
                name: "centerline",
                value: self.centerline,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decay_reaches_alpha_min_near_300_ticks() {
        let config = SimulationConfig::default();
        let alpha = (1.0 - config.alpha_decay).powi(300);
        assert!((alpha - config.alpha_min).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_strength() {
        let config = SimulationConfig::default().with_pull_strength(1.5);
        assert_eq!(
            config.validate().unwrap_err(),
            LayoutError::InvalidParameter {
                name: "pullStrength",
                value: 1.5
            }
        );

        let config = SimulationConfig::default().with_collision_padding(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"primaryAxis": "y", "maxIterations": 120}"#).unwrap();
        assert_eq!(config.primary_axis, Axis::Y);
        assert_eq!(config.max_iterations, 120);
        assert_eq!(config.velocity_decay, 0.4);
    }

    #[test]
    fn test_axis_other() {
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.other(), Axis::X);
    }
}
