//! Declarative chart configuration
//!
//! Every option the core recognizes lives on [`ChartConfig`], loadable from
//! camelCase JSON with defaults for anything omitted.

use crate::error::{ChartError, ChartResult};
use crate::layout::LayoutRect;
use crate::styles::Palette;
use force_layout::SimulationConfig;
use interaction::{InteractionConfig, OpacityPolicy, TieBreak};
use perf::{FrameBudget, PerfBudget};
use scales::{ContinuousOptions, DomainOptions};
use serde::{Deserialize, Serialize};

/// Which layout a chart uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Area,
    Dumbbell,
    BeeSwarm,
    CirclePack,
    Heatmap,
}

/// How multiple series share a category slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One series
    #[default]
    Simple,
    /// Series side by side within the slot
    Grouped,
    /// Series stacked on each other
    Stacked,
}

/// Direction of the value axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories along x, values along y
    #[default]
    Vertical,
    /// Categories along y, values along x
    Horizontal,
}

/// Space between the chart edge and the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

impl Margin {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Smallest and largest circle radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self { min: 3.0, max: 20.0 }
    }
}

/// How heatmap cells pick their colour
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellColoring {
    /// Bucket the value; needs one more palette colour than breakpoints
    Threshold { breakpoints: Vec<f64> },
    /// Colour by the record's colour group
    #[default]
    Ordinal,
}

/// Complete configuration of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub kind: ChartKind,
    pub orientation: Orientation,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Zero policy and min/max overrides for the value axis
    pub domain: DomainOptions,
    /// Nice rounding, tick count and clamping for continuous axes
    pub scale: ContinuousOptions,
    /// Fraction of each band slot left as gap
    pub padding: f64,
    pub radius_bounds: RadiusBounds,
    pub simulation: SimulationConfig,
    pub frame_budget: FrameBudget,
    /// Time allowances checked after layout passes and pointer lookups
    pub perf_budget: PerfBudget,
    pub interaction: InteractionConfig,
    pub tie_break: TieBreak,
    pub opacity: OpacityPolicy,
    pub cell_coloring: CellColoring,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            kind: ChartKind::default(),
            orientation: Orientation::default(),
            width: 600.0,
            height: 400.0,
            margin: Margin::default(),
            domain: DomainOptions::default(),
            scale: ContinuousOptions::nice(),
            padding: 0.2,
            radius_bounds: RadiusBounds::default(),
            simulation: SimulationConfig::default(),
            frame_budget: FrameBudget::default(),
            perf_budget: PerfBudget::default(),
            interaction: InteractionConfig::default(),
            tie_break: TieBreak::Center,
            opacity: OpacityPolicy::default(),
            cell_coloring: CellColoring::default(),
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_domain(mut self, domain: DomainOptions) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_scale(mut self, scale: ContinuousOptions) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Per-frame allowance for progressive simulations
    pub fn with_frame_budget(mut self, budget: FrameBudget) -> Self {
        self.frame_budget = budget;
        self
    }

    pub fn with_perf_budget(mut self, budget: PerfBudget) -> Self {
        self.perf_budget = budget;
        self
    }

    pub fn with_cell_coloring(mut self, coloring: CellColoring) -> Self {
        self.cell_coloring = coloring;
        self
    }

    /// Chart bounds minus margins
    pub fn plot_area(&self) -> LayoutRect {
        LayoutRect::new(0.0, 0.0, self.width, self.height).inset_sides(
            self.margin.top,
            self.margin.right,
            self.margin.bottom,
            self.margin.left,
        )
    }

    /// Check the configuration before any layout is attempted
    pub fn validate(&self) -> ChartResult<()> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "chart size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ChartError::InvalidConfig("margins must be non-negative".into()));
        }
        let plot = self.plot_area();
        if plot.width <= 0.0 || plot.height <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "margins leave no room for the plot area".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.padding) {
            return Err(scales::ScaleError::InvalidPadding(self.padding).into());
        }
        if self.scale.tick_count == 0 {
            return Err(ChartError::InvalidConfig("tick count must be at least 1".into()));
        }
        let r = self.radius_bounds;
        if !(r.min.is_finite() && r.max.is_finite() && r.min >= 0.0 && r.min <= r.max) {
            return Err(force_layout::LayoutError::InvalidRadiusBounds { min: r.min, max: r.max }.into());
        }
        self.simulation.validate()?;
        self.opacity.validate()?;
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig("palette has no colours".into()));
        }
        if let CellColoring::Threshold { breakpoints } = &self.cell_coloring {
            if breakpoints.len() + 1 > self.palette.len() {
                return Err(scales::ScaleError::ThresholdMismatch {
                    breakpoints: breakpoints.len(),
                    outputs: self.palette.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scales::ScaleError;

    #[test]
    fn test_default_is_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        let plot = config.plot_area();
        assert_eq!(plot.x, 50.0);
        assert_eq!(plot.width, 530.0);
        assert_eq!(plot.height, 340.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ChartConfig::from_json(
            r#"{
                "chartType": "beeSwarm",
                "orientation": "horizontal",
                "domain": {"startFromZero": false, "explicitMax": 50},
                "radiusBounds": {"min": 2, "max": 8},
                "simulation": {"maxIterations": 120},
                "interaction": {"resetOnDoubleClick": false},
                "tieBreak": "left"
            }"#,
        )
        .unwrap();
        assert_eq!(config.chart_type, ChartType::BeeSwarm);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(!config.domain.start_from_zero);
        assert_eq!(config.domain.explicit_max, Some(50.0));
        assert_eq!(config.radius_bounds, RadiusBounds { min: 2.0, max: 8.0 });
        assert_eq!(config.simulation.max_iterations, 120);
        assert!(!config.interaction.reset_on_double_click);
        assert_eq!(config.tie_break, TieBreak::Left);
        assert_eq!(config.width, 600.0);
    }

    #[test]
    fn test_from_json_rejects_bad_padding() {
        let err = ChartConfig::from_json(r#"{"padding": 1.0}"#).unwrap_err();
        assert!(matches!(err, ChartError::Scale(ScaleError::InvalidPadding(_))));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = ChartConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ChartError::ConfigParse(_)));
    }

    #[test]
    fn test_threshold_coloring_needs_enough_colours() {
        let config = ChartConfig::new(ChartType::Heatmap)
            .with_palette(Palette::new(vec![crate::Color::BLACK, crate::Color::WHITE]))
            .with_cell_coloring(CellColoring::Threshold {
                breakpoints: vec![1.0, 2.0],
            });
        assert!(matches!(
            config.validate(),
            Err(ChartError::Scale(ScaleError::ThresholdMismatch { breakpoints: 2, outputs: 2 }))
        ));
    }

    #[test]
    fn test_margins_must_leave_room() {
        let config = ChartConfig::default().with_size(60.0, 400.0);
        assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn test_round_trip_json() {
        let config = ChartConfig::new(ChartType::Line).with_kind(ChartKind::Stacked);
        let parsed = ChartConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.chart_type, ChartType::Line);
        assert_eq!(parsed.kind, ChartKind::Stacked);
        assert_eq!(parsed.palette, config.palette);
        assert_eq!(parsed.margin, config.margin);
    }

    #[test]
    fn test_radius_bounds_fill_missing_fields() {
        let config = ChartConfig::from_json(r#"{"radiusBounds": {"min": 2}}"#).unwrap();
        assert_eq!(config.radius_bounds, RadiusBounds { min: 2.0, max: 20.0 });
    }

    #[test]
    fn test_tick_only_frame_budget_round_trips() {
        let config = ChartConfig::new(ChartType::BeeSwarm).with_frame_budget(FrameBudget::ticks(5));
        let json = config.to_json().unwrap();
        let parsed = ChartConfig::from_json(&json).unwrap();
        assert_eq!(parsed.frame_budget, FrameBudget::ticks(5));
        assert_eq!(parsed.frame_budget.max_frame_ms, None);
    }
}
