//! Chart layout calculations
//!
//! This module turns a dataset and its configuration into pixel geometry.
//! Every chart type is one method of [`ChartLayoutCalculator`] over the
//! shared scales; bar variants differ only by [`ChartKind`] and
//! [`Orientation`].

use crate::config::{CellColoring, ChartConfig, ChartKind, ChartType, Orientation};
use crate::error::{ChartError, ChartResult};
use crate::model::{Datum, Dataset, Key};
use crate::styles::{Color, Palette};
use chrono::NaiveDate;
use force_layout::{
    Axis, GenerationTicket, NodeInput, PositionedNode, RadiusScale, Simulation, SimulationConfig, StepOutcome,
};
use interaction::PointerResolver;
use perf::{FrameBudget, Instant, PerfBudget, PerfTimer};
use scales::{BandScale, ContinuousOptions, ContinuousScale, OrdinalScale};
use serde::{Deserialize, Serialize};

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether the point lies inside or on the edge
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Shrink by different amounts on each side
    pub fn inset_sides(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Layout for a bar or one stacked segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub bounds: LayoutRect,
    pub datum_index: usize,
    pub series_index: usize,
    pub value: f64,
    pub color: Color,
}

/// Layout for a data point marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub center: LayoutPoint,
    pub radius: f64,
    pub datum_index: usize,
    pub series_index: usize,
    pub value: f64,
    pub color: Color,
}

/// Polyline for one series, in key order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub series_index: usize,
    pub points: Vec<LayoutPoint>,
    /// Record behind each point
    pub datum_indices: Vec<usize>,
    pub color: Color,
}

/// Layout for an area region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLayout {
    /// Points defining the top of the area
    pub top_points: Vec<LayoutPoint>,
    /// Points defining the bottom of the area, in the same key order
    pub bottom_points: Vec<LayoutPoint>,
    pub series_index: usize,
    pub color: Color,
}

/// One dumbbell: a connector spanning a record's values plus a marker per value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumbbellLayout {
    pub datum_index: usize,
    pub start: LayoutPoint,
    pub end: LayoutPoint,
    pub markers: Vec<MarkerLayout>,
}

/// A positioned circle of a bee-swarm or packed-circle chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleLayout {
    pub center: LayoutPoint,
    pub radius: f64,
    pub datum_index: usize,
    pub color: Color,
}

/// One heatmap cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLayout {
    pub bounds: LayoutRect,
    pub datum_index: usize,
    pub value: Option<f64>,
    pub color: Color,
}

/// Layout for axis tick marks and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTickLayout {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// Layout for a complete axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub line_start: LayoutPoint,
    pub line_end: LayoutPoint,
    pub ticks: Vec<AxisTickLayout>,
    pub orientation: AxisOrientation,
}

/// Recoverable conditions reported alongside a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// No records; the layout is an empty placeholder
    EmptyData,
    /// Records left out because they had no value to place
    ExcludedRecords { count: usize },
}

/// Complete layout for a chart, plus the scales that produced it
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub chart_type: ChartType,
    pub orientation: Orientation,
    /// Total bounds of the chart
    pub total_bounds: LayoutRect,
    /// Plot area bounds
    pub plot_area: LayoutRect,
    pub category_axis: Option<AxisLayout>,
    pub value_axis: Option<AxisLayout>,
    pub bars: Vec<BarLayout>,
    pub paths: Vec<SeriesPath>,
    pub areas: Vec<AreaLayout>,
    pub markers: Vec<MarkerLayout>,
    pub dumbbells: Vec<DumbbellLayout>,
    pub circles: Vec<CircleLayout>,
    pub cells: Vec<CellLayout>,
    pub warnings: Vec<LayoutWarning>,
    /// Category slots (bar, dumbbell, heatmap columns)
    pub band_scale: Option<BandScale>,
    /// Heatmap rows
    pub row_scale: Option<BandScale>,
    pub value_scale: Option<ContinuousScale>,
    /// Key axis of line and area charts
    pub key_scale: Option<ContinuousScale>,
    /// Sorted keys of line and area charts
    pub resolver: Option<PointerResolver<f64>>,
    /// Record index per band slot, or per resolver key
    pub slot_records: Vec<usize>,
}

impl ChartLayout {
    fn new(config: &ChartConfig) -> Self {
        Self {
            chart_type: config.chart_type,
            orientation: config.orientation,
            total_bounds: LayoutRect::new(0.0, 0.0, config.width, config.height),
            plot_area: config.plot_area(),
            ..Default::default()
        }
    }

    /// No marks were produced
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
            && self.paths.iter().all(|p| p.points.is_empty())
            && self.dumbbells.is_empty()
            && self.circles.is_empty()
            && self.cells.is_empty()
    }

    pub fn has_warning(&self, warning: &LayoutWarning) -> bool {
        self.warnings.contains(warning)
    }

    /// Record under the pointer, if any.
    ///
    /// Line and area charts bisect the sorted keys along x; band charts invert
    /// the category axis; circles and cells are hit tested.
    pub fn datum_at(&self, x: f64, y: f64) -> Option<usize> {
        match self.chart_type {
            ChartType::Line | ChartType::Area => {
                let resolver = self.resolver.as_ref()?;
                let key_scale = self.key_scale.as_ref()?;
                let index = resolver.resolve_pixel(x, |px| key_scale.invert(px))?;
                self.slot_records.get(index).copied()
            }
            ChartType::Bar | ChartType::Dumbbell => {
                let band = self.band_scale.as_ref()?;
                let along = match self.orientation {
                    Orientation::Vertical => x,
                    Orientation::Horizontal => y,
                };
                let slot = band.index_of(band.invert(along)?)?;
                self.slot_records.get(slot).copied()
            }
            ChartType::Heatmap => self
                .cells
                .iter()
                .find(|cell| cell.bounds.contains(x, y))
                .map(|cell| cell.datum_index),
            ChartType::BeeSwarm | ChartType::CirclePack => self
                .circles
                .iter()
                .filter(|c| c.center.distance(x, y) <= c.radius)
                .min_by(|a, b| a.center.distance(x, y).total_cmp(&b.center.distance(x, y)))
                .map(|c| c.datum_index),
        }
    }
}

/// A force-based layout whose simulation is still running
#[derive(Debug, Clone)]
pub struct PendingLayout {
    layout: ChartLayout,
    simulation: Simulation,
    /// Record index and colour of each simulated node
    marks: Vec<(usize, Color)>,
    budget: PerfBudget,
}

impl PendingLayout {
    fn start(
        layout: ChartLayout,
        nodes: &[NodeInput],
        marks: Vec<(usize, Color)>,
        config: SimulationConfig,
        budget: PerfBudget,
        ticket: Option<&GenerationTicket>,
    ) -> ChartResult<LayoutJob> {
        let mut simulation = Simulation::new(nodes, config)?;
        if let Some(ticket) = ticket {
            simulation = simulation.with_ticket(ticket.clone());
        }
        Ok(LayoutJob::Pending(Box::new(Self {
            layout,
            simulation,
            marks,
            budget,
        })))
    }

    pub fn outcome(&self) -> StepOutcome {
        self.simulation.outcome()
    }

    pub fn ticks(&self) -> usize {
        self.simulation.ticks()
    }

    /// Advance the simulation by one frame of work
    pub fn step_frame(&mut self, budget: &FrameBudget) -> StepOutcome {
        self.simulation.step_frame(budget)
    }

    /// Circles at their current, possibly overlapping, positions
    pub fn preview(&self) -> Vec<CircleLayout> {
        to_circles(&self.simulation.positions(), &self.marks)
    }

    /// Settle the circles and produce the final layout
    pub fn finish(self) -> ChartResult<ChartLayout> {
        let PendingLayout {
            mut layout,
            simulation,
            marks,
            ..
        } = self;
        layout.circles = to_circles(&simulation.finish()?, &marks);
        Ok(layout)
    }

    /// Run the remaining ticks synchronously and finish
    pub fn run(self) -> ChartResult<ChartLayout> {
        let PendingLayout {
            mut layout,
            simulation,
            marks,
            budget,
        } = self;
        let started = Instant::now();
        let positioned = simulation.run()?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if let Some(violation) = budget.check_simulation(elapsed_ms) {
            violation.log();
        }
        layout.circles = to_circles(&positioned, &marks);
        Ok(layout)
    }
}

/// Result of starting a layout
#[derive(Debug, Clone)]
pub enum LayoutJob {
    Ready(ChartLayout),
    Pending(Box<PendingLayout>),
}

impl LayoutJob {
    pub fn is_ready(&self) -> bool {
        matches!(self, LayoutJob::Ready(_))
    }

    /// Finish the layout now, running any simulation to the end
    pub fn complete(self) -> ChartResult<ChartLayout> {
        match self {
            LayoutJob::Ready(layout) => Ok(layout),
            LayoutJob::Pending(pending) => (*pending).run(),
        }
    }
}

/// Layout calculator for charts
#[derive(Debug, Clone)]
pub struct ChartLayoutCalculator {
    /// Marker radius for line and dumbbell charts
    pub marker_radius: f64,
    /// Gap fraction between series inside a grouped slot
    pub group_padding: f64,
}

impl Default for ChartLayoutCalculator {
    fn default() -> Self {
        Self {
            marker_radius: 4.0,
            group_padding: 0.1,
        }
    }
}

impl ChartLayoutCalculator {
    /// Create a new layout calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the complete layout for a chart.
    ///
    /// Force-based charts tie their simulation to `ticket` when given, and
    /// fail with a superseded error if a newer layout started meanwhile.
    pub fn calculate(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        ticket: Option<&GenerationTicket>,
    ) -> ChartResult<ChartLayout> {
        self.begin(dataset, config, ticket)?.complete()
    }

    /// Start a layout. Force-based charts come back pending so their
    /// simulation can be stepped one frame at a time.
    pub fn begin(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        ticket: Option<&GenerationTicket>,
    ) -> ChartResult<LayoutJob> {
        let timer = PerfTimer::layout("chart_layout");
        let mut layout = ChartLayout::new(config);

        if dataset.is_empty() {
            tracing::warn!(chart_type = ?config.chart_type, "dataset is empty; rendering placeholder");
            layout.warnings.push(LayoutWarning::EmptyData);
            return Ok(LayoutJob::Ready(layout));
        }

        let job = match config.chart_type {
            ChartType::Bar => {
                self.calculate_bar_layout(dataset, config, &mut layout)?;
                LayoutJob::Ready(layout)
            }
            ChartType::Line => {
                self.calculate_line_layout(dataset, config, &mut layout, false)?;
                LayoutJob::Ready(layout)
            }
            ChartType::Area => {
                self.calculate_line_layout(dataset, config, &mut layout, true)?;
                LayoutJob::Ready(layout)
            }
            ChartType::Dumbbell => {
                self.calculate_dumbbell_layout(dataset, config, &mut layout)?;
                LayoutJob::Ready(layout)
            }
            ChartType::Heatmap => {
                self.calculate_heatmap_layout(dataset, config, &mut layout)?;
                LayoutJob::Ready(layout)
            }
            ChartType::BeeSwarm => self.begin_beeswarm_layout(dataset, config, ticket, layout)?,
            ChartType::CirclePack => self.begin_pack_layout(dataset, config, ticket, layout)?,
        };

        tracing::debug!(
            chart_type = ?config.chart_type,
            records = dataset.len(),
            pending = !job.is_ready(),
            "calculated chart layout"
        );
        if let Some(violation) = config.perf_budget.check_layout(timer.stop()) {
            violation.log();
        }
        Ok(job)
    }

    fn calculate_bar_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        layout: &mut ChartLayout,
    ) -> ChartResult<()> {
        let plot = layout.plot_area;
        let orientation = config.orientation;
        let labels = dataset.key_labels();
        let band = scales::make_band_scale(labels.iter().cloned(), category_range(&plot, orientation), config.padding)?;

        let domain = match config.kind {
            ChartKind::Simple => scales::derive_domain(&dataset.records, Datum::value, &config.domain)?,
            ChartKind::Grouped => {
                let flat = all_values(dataset);
                scales::derive_domain(&flat, |v| *v, &config.domain)?
            }
            ChartKind::Stacked => {
                scales::derive_stacked_domain(&dataset.records, |r| r.values.as_slice(), &config.domain)?
            }
        };
        let value_scale =
            scales::make_continuous_scale(domain.as_tuple(), value_range(&plot, orientation), &config.scale)?;
        let baseline = value_scale.map(zero_within(&value_scale));

        let colors = group_colors(dataset, &config.palette)?;
        let series_count = max_series(dataset);
        let series_band = match config.kind {
            ChartKind::Grouped => Some(BandScale::new(
                (0..series_count).map(|i| i.to_string()),
                (0.0, band.bandwidth()),
                self.group_padding,
            )?),
            _ => None,
        };

        for (datum_index, (record, label)) in dataset.records.iter().zip(&labels).enumerate() {
            let Some(slot) = band.band(label) else { continue };
            match config.kind {
                ChartKind::Simple => {
                    if let Some(value) = record.value() {
                        layout.bars.push(BarLayout {
                            bounds: bar_rect(orientation, slot.start, slot.width, baseline, value_scale.map(value)),
                            datum_index,
                            series_index: 0,
                            value,
                            color: record_color(record, &colors, &config.palette),
                        });
                    }
                }
                ChartKind::Grouped => {
                    let Some(series_band) = &series_band else { continue };
                    for (series_index, value) in record.values.iter().enumerate() {
                        let Some(value) = *value else { continue };
                        let inner = series_band.band_at(series_index);
                        layout.bars.push(BarLayout {
                            bounds: bar_rect(
                                orientation,
                                slot.start + inner.start,
                                inner.width,
                                baseline,
                                value_scale.map(value),
                            ),
                            datum_index,
                            series_index,
                            value,
                            color: config.palette.color(series_index),
                        });
                    }
                }
                ChartKind::Stacked => {
                    let (mut below, mut above) = (0.0, 0.0);
                    for (series_index, value) in record.values.iter().enumerate() {
                        let Some(value) = *value else { continue };
                        let total = if value < 0.0 { &mut below } else { &mut above };
                        let from = value_scale.map(*total);
                        *total += value;
                        layout.bars.push(BarLayout {
                            bounds: bar_rect(orientation, slot.start, slot.width, from, value_scale.map(*total)),
                            datum_index,
                            series_index,
                            value,
                            color: config.palette.color(series_index),
                        });
                    }
                }
            }
        }

        let (category_axis, value_axis) = match orientation {
            Orientation::Vertical => (AxisOrientation::Horizontal, AxisOrientation::Vertical),
            Orientation::Horizontal => (AxisOrientation::Vertical, AxisOrientation::Horizontal),
        };
        layout.category_axis = Some(band_axis(&band, &plot, category_axis));
        layout.value_axis = Some(continuous_axis(&value_scale, &plot, value_axis, config.scale.tick_count, false));
        layout.slot_records = slot_records(&band, &labels);
        layout.band_scale = Some(band);
        layout.value_scale = Some(value_scale);
        Ok(())
    }

    fn calculate_line_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        layout: &mut ChartLayout,
        area: bool,
    ) -> ChartResult<()> {
        let plot = layout.plot_area;

        let mut keyed = Vec::with_capacity(dataset.len());
        for (index, record) in dataset.records.iter().enumerate() {
            match record.key.axis_value() {
                Some(v) if v.is_finite() => keyed.push((index, v)),
                _ => {
                    return Err(ChartError::InvalidData(format!(
                        "record {index} has key '{}' with no position on a continuous axis",
                        record.key
                    )))
                }
            }
        }
        // Stable: equal keys keep record order
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

        let Some(key_domain) = scales::derive_extent(&keyed, |(_, v)| Some(*v))? else {
            return Ok(());
        };
        let key_options = ContinuousOptions {
            nice: false,
            ..config.scale
        };
        let key_scale =
            scales::make_continuous_scale(key_domain.as_tuple(), (plot.x, plot.right()), &key_options)?;

        let stacked = area && config.kind == ChartKind::Stacked;
        let domain = if stacked {
            scales::derive_stacked_domain(&dataset.records, |r| r.values.as_slice(), &config.domain)?
        } else {
            scales::derive_domain(&all_values(dataset), |v| *v, &config.domain)?
        };
        let value_scale =
            scales::make_continuous_scale(domain.as_tuple(), (plot.bottom(), plot.y), &config.scale)?;
        let baseline = value_scale.map(zero_within(&value_scale));

        let mut running = vec![0.0; keyed.len()];
        for series_index in 0..max_series(dataset) {
            let color = config.palette.color(series_index);
            let mut points = Vec::with_capacity(keyed.len());
            let mut bottoms = Vec::with_capacity(keyed.len());
            let mut datum_indices = Vec::with_capacity(keyed.len());

            for (position, &(datum_index, key)) in keyed.iter().enumerate() {
                let x = key_scale.map(key);
                let value = dataset.records[datum_index].value_at(series_index);
                if stacked {
                    let base = running[position];
                    let top = base + value.unwrap_or(0.0);
                    running[position] = top;
                    points.push(LayoutPoint::new(x, value_scale.map(top)));
                    bottoms.push(LayoutPoint::new(x, value_scale.map(base)));
                    datum_indices.push(datum_index);
                } else if let Some(value) = value {
                    let point = LayoutPoint::new(x, value_scale.map(value));
                    points.push(point);
                    bottoms.push(LayoutPoint::new(x, baseline));
                    datum_indices.push(datum_index);
                    if !area {
                        layout.markers.push(MarkerLayout {
                            center: point,
                            radius: self.marker_radius,
                            datum_index,
                            series_index,
                            value,
                            color,
                        });
                    }
                }
            }

            if area {
                layout.areas.push(AreaLayout {
                    top_points: points.clone(),
                    bottom_points: bottoms,
                    series_index,
                    color,
                });
            }
            layout.paths.push(SeriesPath {
                series_index,
                points,
                datum_indices,
                color,
            });
        }

        let dates = dataset.records.iter().all(|r| matches!(r.key, Key::Date(_)));
        layout.category_axis = Some(continuous_axis(
            &key_scale,
            &plot,
            AxisOrientation::Horizontal,
            config.scale.tick_count,
            dates,
        ));
        layout.value_axis = Some(continuous_axis(
            &value_scale,
            &plot,
            AxisOrientation::Vertical,
            config.scale.tick_count,
            false,
        ));
        layout.resolver = Some(PointerResolver::new(
            keyed.iter().map(|(_, v)| *v).collect(),
            config.tie_break,
        )?);
        layout.slot_records = keyed.iter().map(|(i, _)| *i).collect();
        layout.key_scale = Some(key_scale);
        layout.value_scale = Some(value_scale);
        Ok(())
    }

    fn calculate_dumbbell_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        layout: &mut ChartLayout,
    ) -> ChartResult<()> {
        let plot = layout.plot_area;
        let orientation = config.orientation;
        let labels = dataset.key_labels();
        let band = scales::make_band_scale(labels.iter().cloned(), category_range(&plot, orientation), config.padding)?;
        let domain = scales::derive_domain(&all_values(dataset), |v| *v, &config.domain)?;
        let value_scale =
            scales::make_continuous_scale(domain.as_tuple(), value_range(&plot, orientation), &config.scale)?;

        for (datum_index, (record, label)) in dataset.records.iter().zip(&labels).enumerate() {
            let Some(category) = band.center(label) else { continue };
            let markers: Vec<MarkerLayout> = record
                .values
                .iter()
                .enumerate()
                .filter_map(|(series_index, value)| {
                    let value = (*value)?;
                    Some(MarkerLayout {
                        center: place(orientation, category, value_scale.map(value)),
                        radius: self.marker_radius,
                        datum_index,
                        series_index,
                        value,
                        color: config.palette.color(series_index),
                    })
                })
                .collect();

            if markers.is_empty() {
                continue;
            }
            let low = markers.iter().map(|m| m.value).fold(f64::INFINITY, f64::min);
            let high = markers.iter().map(|m| m.value).fold(f64::NEG_INFINITY, f64::max);
            layout.dumbbells.push(DumbbellLayout {
                datum_index,
                start: place(orientation, category, value_scale.map(low)),
                end: place(orientation, category, value_scale.map(high)),
                markers,
            });
        }

        let (category_axis, value_axis) = match orientation {
            Orientation::Vertical => (AxisOrientation::Horizontal, AxisOrientation::Vertical),
            Orientation::Horizontal => (AxisOrientation::Vertical, AxisOrientation::Horizontal),
        };
        layout.category_axis = Some(band_axis(&band, &plot, category_axis));
        layout.value_axis = Some(continuous_axis(&value_scale, &plot, value_axis, config.scale.tick_count, false));
        layout.slot_records = slot_records(&band, &labels);
        layout.band_scale = Some(band);
        layout.value_scale = Some(value_scale);
        Ok(())
    }

    fn begin_beeswarm_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        ticket: Option<&GenerationTicket>,
        mut layout: ChartLayout,
    ) -> ChartResult<LayoutJob> {
        let plot = layout.plot_area;
        let orientation = config.orientation;

        let Some(extent) = scales::derive_extent(&dataset.records, Datum::value)? else {
            tracing::warn!(records = dataset.len(), "no record has a value to place");
            layout.warnings.push(LayoutWarning::ExcludedRecords { count: dataset.len() });
            return Ok(LayoutJob::Ready(layout));
        };
        let min = config.domain.explicit_min.unwrap_or(extent.min);
        let max = config.domain.explicit_max.unwrap_or(extent.max);
        let value_scale = scales::make_continuous_scale((min, max), value_range(&plot, orientation), &config.scale)?;
        let radii = radius_scale(dataset, config, |r| r.size)?;
        let colors = group_colors(dataset, &config.palette)?;

        let mut nodes = Vec::with_capacity(dataset.len());
        let mut marks = Vec::with_capacity(dataset.len());
        for (index, record) in dataset.records.iter().enumerate() {
            if let Some(value) = record.value() {
                nodes.push(NodeInput::new(
                    index.to_string(),
                    Some(value_scale.map(value)),
                    radii.radius(record.size),
                ));
                marks.push((index, record_color(record, &colors, &config.palette)));
            }
        }
        let excluded = dataset.len() - nodes.len();
        if excluded > 0 {
            layout.warnings.push(LayoutWarning::ExcludedRecords { count: excluded });
        }

        let (axis, centerline, value_axis) = match orientation {
            Orientation::Vertical => (Axis::Y, plot.center_x(), AxisOrientation::Vertical),
            Orientation::Horizontal => (Axis::X, plot.center_y(), AxisOrientation::Horizontal),
        };
        layout.value_axis = Some(continuous_axis(&value_scale, &plot, value_axis, config.scale.tick_count, false));
        layout.value_scale = Some(value_scale);

        let simulation = config.simulation.with_primary_axis(axis).with_centerline(centerline);
        PendingLayout::start(layout, &nodes, marks, simulation, config.perf_budget, ticket)
    }

    fn begin_pack_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        ticket: Option<&GenerationTicket>,
        layout: ChartLayout,
    ) -> ChartResult<LayoutJob> {
        let plot = layout.plot_area;
        let size = |r: &Datum| r.size.or_else(|| r.value());
        let radii = radius_scale(dataset, config, size)?;
        let colors = group_colors(dataset, &config.palette)?;

        let mut nodes = Vec::with_capacity(dataset.len());
        let mut marks = Vec::with_capacity(dataset.len());
        for (index, record) in dataset.records.iter().enumerate() {
            nodes.push(NodeInput::new(index.to_string(), Some(plot.center_x()), radii.radius(size(record))));
            marks.push((index, record_color(record, &colors, &config.palette)));
        }

        let simulation = config
            .simulation
            .with_primary_axis(Axis::X)
            .with_centerline(plot.center_y());
        PendingLayout::start(layout, &nodes, marks, simulation, config.perf_budget, ticket)
    }

    fn calculate_heatmap_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
        layout: &mut ChartLayout,
    ) -> ChartResult<()> {
        let plot = layout.plot_area;
        let labels = dataset.key_labels();
        let rows = dataset.categories();
        if rows.is_empty() {
            return Err(ChartError::InvalidData(
                "heatmap records need a category for their row".into(),
            ));
        }

        let columns = scales::make_band_scale(labels.iter().cloned(), (plot.x, plot.right()), config.padding)?;
        let row_scale = scales::make_band_scale(rows, (plot.y, plot.bottom()), config.padding)?;

        let threshold = match &config.cell_coloring {
            CellColoring::Threshold { breakpoints } => Some(scales::make_threshold_scale(
                breakpoints.clone(),
                config.palette.take(breakpoints.len() + 1),
            )?),
            CellColoring::Ordinal => None,
        };
        let colors = group_colors(dataset, &config.palette)?;

        let mut excluded = 0;
        for (datum_index, (record, label)) in dataset.records.iter().zip(&labels).enumerate() {
            let row = record.category.as_deref().and_then(|c| row_scale.band(c));
            let (Some(column), Some(row)) = (columns.band(label), row) else {
                excluded += 1;
                continue;
            };
            let value = record.value();
            let color = match &threshold {
                Some(scale) => value.and_then(|v| scale.map(v)).copied().unwrap_or(Color::GRAY),
                None => record_color(record, &colors, &config.palette),
            };
            layout.cells.push(CellLayout {
                bounds: LayoutRect::new(column.start, row.start, column.width, row.width),
                datum_index,
                value,
                color,
            });
        }
        if excluded > 0 {
            layout.warnings.push(LayoutWarning::ExcludedRecords { count: excluded });
        }

        layout.category_axis = Some(band_axis(&columns, &plot, AxisOrientation::Horizontal));
        layout.value_axis = Some(band_axis(&row_scale, &plot, AxisOrientation::Vertical));
        layout.slot_records = slot_records(&columns, &labels);
        layout.band_scale = Some(columns);
        layout.row_scale = Some(row_scale);
        Ok(())
    }
}

/// Pixel span of the category axis
fn category_range(plot: &LayoutRect, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (plot.x, plot.right()),
        Orientation::Horizontal => (plot.y, plot.bottom()),
    }
}

/// Pixel span of the value axis; vertical values grow upward
fn value_range(plot: &LayoutRect, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (plot.bottom(), plot.y),
        Orientation::Horizontal => (plot.x, plot.right()),
    }
}

fn place(orientation: Orientation, category: f64, value: f64) -> LayoutPoint {
    match orientation {
        Orientation::Vertical => LayoutPoint::new(category, value),
        Orientation::Horizontal => LayoutPoint::new(value, category),
    }
}

fn bar_rect(orientation: Orientation, slot_start: f64, slot_width: f64, from: f64, to: f64) -> LayoutRect {
    let (low, length) = (from.min(to), (to - from).abs());
    match orientation {
        Orientation::Vertical => LayoutRect::new(slot_start, low, slot_width, length),
        Orientation::Horizontal => LayoutRect::new(low, slot_start, length, slot_width),
    }
}

/// Zero if the domain contains it, else the nearer domain end
fn zero_within(scale: &ContinuousScale) -> f64 {
    let (min, max) = scale.domain();
    0.0_f64.clamp(min, max)
}

fn all_values(dataset: &Dataset) -> Vec<Option<f64>> {
    dataset
        .records
        .iter()
        .flat_map(|r| r.values.iter().copied())
        .collect()
}

fn max_series(dataset: &Dataset) -> usize {
    dataset
        .records
        .iter()
        .map(|r| r.values.len())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Record index of the first record in each band slot
fn slot_records(band: &BandScale, labels: &[String]) -> Vec<usize> {
    let mut records = Vec::with_capacity(band.len());
    for (index, label) in labels.iter().enumerate() {
        if band.index_of(label) == Some(records.len()) {
            records.push(index);
        }
    }
    records
}

fn group_colors(dataset: &Dataset, palette: &Palette) -> ChartResult<OrdinalScale<Color>> {
    let outputs = if palette.is_empty() {
        vec![Color::GRAY]
    } else {
        palette.colors.clone()
    };
    Ok(scales::make_ordinal_scale(dataset.color_groups(), outputs)?.with_unknown(palette.color(0)))
}

fn record_color(record: &Datum, colors: &OrdinalScale<Color>, palette: &Palette) -> Color {
    record
        .color_group
        .as_deref()
        .and_then(|group| colors.map(group))
        .copied()
        .unwrap_or_else(|| palette.color(0))
}

/// Radius scale over a size column; unsized data gets the minimum radius
fn radius_scale<F>(dataset: &Dataset, config: &ChartConfig, size: F) -> ChartResult<RadiusScale>
where
    F: Fn(&Datum) -> Option<f64>,
{
    let bounds = (config.radius_bounds.min, config.radius_bounds.max);
    if dataset.records.iter().all(|r| size(r).is_none()) {
        return Ok(RadiusScale::fixed(bounds.0)?);
    }
    Ok(RadiusScale::from_values(dataset.records.iter().map(size), bounds)?)
}

fn to_circles(positioned: &[PositionedNode], marks: &[(usize, Color)]) -> Vec<CircleLayout> {
    positioned
        .iter()
        .zip(marks)
        .map(|(node, &(datum_index, color))| CircleLayout {
            center: LayoutPoint::new(node.x, node.y),
            radius: node.radius,
            datum_index,
            color,
        })
        .collect()
}

fn axis_line(plot: &LayoutRect, orientation: AxisOrientation) -> (LayoutPoint, LayoutPoint) {
    match orientation {
        AxisOrientation::Horizontal => (
            LayoutPoint::new(plot.x, plot.bottom()),
            LayoutPoint::new(plot.right(), plot.bottom()),
        ),
        AxisOrientation::Vertical => (
            LayoutPoint::new(plot.x, plot.y),
            LayoutPoint::new(plot.x, plot.bottom()),
        ),
    }
}

fn band_axis(band: &BandScale, plot: &LayoutRect, orientation: AxisOrientation) -> AxisLayout {
    let ticks = band
        .keys()
        .enumerate()
        .map(|(index, key)| AxisTickLayout {
            position: band.band_at(index).center(),
            label: key.to_string(),
        })
        .collect();
    let (line_start, line_end) = axis_line(plot, orientation);
    AxisLayout {
        line_start,
        line_end,
        ticks,
        orientation,
    }
}

fn continuous_axis(
    scale: &ContinuousScale,
    plot: &LayoutRect,
    orientation: AxisOrientation,
    count: usize,
    dates: bool,
) -> AxisLayout {
    let step = scale.tick_step(count);
    let ticks = scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTickLayout {
            position: scale.map(value),
            label: if dates {
                format_date_tick(value)
            } else {
                format_tick(value, step)
            },
        })
        .collect();
    let (line_start, line_end) = axis_line(plot, orientation);
    AxisLayout {
        line_start,
        line_end,
        ticks,
        orientation,
    }
}

/// Tick label with as many decimals as the tick step needs
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    // Avoid "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

fn format_date_tick(days: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(days.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format_tick(days, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margin;
    use crate::styles::ColorScheme;
    use scales::ScaleError;

    fn square(chart_type: ChartType) -> ChartConfig {
        ChartConfig::new(chart_type)
            .with_size(100.0, 100.0)
            .with_margin(Margin::uniform(0.0))
    }

    fn calculate(dataset: &Dataset, config: &ChartConfig) -> ChartLayout {
        ChartLayoutCalculator::new().calculate(dataset, config, None).unwrap()
    }

    #[test]
    fn test_layout_rect_inset_sides() {
        let rect = LayoutRect::new(10.0, 20.0, 100.0, 80.0);
        let inset = rect.inset_sides(5.0, 10.0, 15.0, 20.0);

        assert_eq!(inset.x, 30.0);
        assert_eq!(inset.y, 25.0);
        assert_eq!(inset.width, 70.0);
        assert_eq!(inset.height, 60.0);
        assert!(inset.contains(30.0, 85.0));
        assert!(!inset.contains(29.0, 50.0));
    }

    #[test]
    fn test_layout_rect_center() {
        let rect = LayoutRect::new(0.0, 0.0, 100.0, 80.0);

        assert_eq!(rect.center_x(), 50.0);
        assert_eq!(rect.center_y(), 40.0);
    }

    #[test]
    fn test_calculate_bar_chart_layout() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("A", 0.0))
            .with_record(Datum::single("B", 10.0));
        let layout = calculate(&dataset, &square(ChartType::Bar).with_padding(0.25));

        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 100.0, 37.5, 0.0));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(50.0, 0.0, 37.5, 100.0));
        let axis = layout.category_axis.unwrap();
        assert_eq!(axis.ticks[1].label, "B");
        assert_eq!(axis.ticks[1].position, 68.75);
    }

    #[test]
    fn test_calculate_horizontal_bar_layout() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("A", 5.0))
            .with_record(Datum::single("B", 10.0));
        let config = square(ChartType::Bar)
            .with_padding(0.0)
            .with_orientation(Orientation::Horizontal);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(0.0, 50.0, 100.0, 50.0));
        assert_eq!(layout.datum_at(10.0, 75.0), Some(1));
    }

    #[test]
    fn test_negative_bars_hang_from_zero() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("A", -5.0))
            .with_record(Datum::single("B", 5.0));
        let layout = calculate(&dataset, &square(ChartType::Bar).with_padding(0.0));

        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 50.0, 50.0, 50.0));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(50.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_calculate_grouped_bar_layout() {
        let dataset = Dataset::new(["2023", "2024"]).with_record(Datum::new("A", vec![Some(4.0), Some(8.0)]));
        let config = square(ChartType::Bar)
            .with_kind(ChartKind::Grouped)
            .with_padding(0.25);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 50.0, 33.75, 50.0));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(37.5, 0.0, 33.75, 100.0));
        assert_eq!(layout.bars[1].series_index, 1);
        assert_ne!(layout.bars[0].color, layout.bars[1].color);
    }

    #[test]
    fn test_calculate_stacked_bar_layout() {
        let dataset = Dataset::new(["x", "y"])
            .with_record(Datum::new("A", vec![Some(2.0), Some(3.0)]))
            .with_record(Datum::new("B", vec![Some(1.0), None]));
        let config = square(ChartType::Bar)
            .with_kind(ChartKind::Stacked)
            .with_padding(0.0);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.bars.len(), 3);
        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 60.0, 50.0, 40.0));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(0.0, 0.0, 50.0, 60.0));
        assert_eq!(layout.bars[2].bounds, LayoutRect::new(50.0, 80.0, 50.0, 20.0));
    }

    #[test]
    fn test_stacked_bars_diverge_around_zero() {
        let dataset = Dataset::new(["x", "y"])
            .with_record(Datum::new("A", vec![Some(5.0), Some(-3.0)]))
            .with_record(Datum::new("B", vec![Some(1.0), Some(1.0)]));
        let config = square(ChartType::Bar)
            .with_kind(ChartKind::Stacked)
            .with_padding(0.0);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.value_scale.as_ref().unwrap().domain(), (-3.0, 5.0));
        assert_eq!(layout.bars[0].bounds, LayoutRect::new(0.0, 0.0, 50.0, 62.5));
        assert_eq!(layout.bars[1].bounds, LayoutRect::new(0.0, 62.5, 50.0, 37.5));
        assert_eq!(layout.bars[2].bounds, LayoutRect::new(50.0, 50.0, 50.0, 12.5));
        assert_eq!(layout.bars[3].bounds, LayoutRect::new(50.0, 37.5, 50.0, 12.5));
        for bar in &layout.bars {
            assert!(bar.bounds.y >= layout.plot_area.y);
            assert!(bar.bounds.bottom() <= layout.plot_area.bottom());
        }
    }

    #[test]
    fn test_stacked_rows_must_match() {
        let dataset = Dataset::new(["x", "y"])
            .with_record(Datum::new("A", vec![Some(2.0), Some(3.0)]))
            .with_record(Datum::new("B", vec![Some(1.0)]));
        let config = square(ChartType::Bar).with_kind(ChartKind::Stacked);
        let err = ChartLayoutCalculator::new()
            .calculate(&dataset, &config, None)
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Scale(ScaleError::InconsistentStackLength { index: 1, expected: 2, found: 1 })
        ));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_bar_hit_testing() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("A", 1.0))
            .with_record(Datum::single("B", 2.0));
        let layout = calculate(&dataset, &square(ChartType::Bar).with_padding(0.25));

        assert_eq!(layout.datum_at(10.0, 50.0), Some(0));
        assert_eq!(layout.datum_at(60.0, 50.0), Some(1));
        assert_eq!(layout.datum_at(45.0, 50.0), None);
    }

    #[test]
    fn test_calculate_line_layout_sorts_by_key() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single(3.0, 30.0))
            .with_record(Datum::single(1.0, 10.0))
            .with_record(Datum::single(2.0, 20.0));
        let layout = calculate(&dataset, &square(ChartType::Line));

        let path = &layout.paths[0];
        let xs: Vec<f64> = path.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert_eq!(path.datum_indices, vec![1, 2, 0]);
        assert_eq!(layout.markers.len(), 3);

        assert_eq!(layout.datum_at(45.0, 0.0), Some(2));
        assert_eq!(layout.datum_at(-30.0, 0.0), Some(1));
        assert_eq!(layout.datum_at(500.0, 0.0), Some(0));
    }

    #[test]
    fn test_line_skips_missing_values() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single(1.0, 10.0))
            .with_record(Datum::new(2.0, vec![None]))
            .with_record(Datum::single(3.0, 30.0));
        let layout = calculate(&dataset, &square(ChartType::Line));
        assert_eq!(layout.paths[0].points.len(), 2);
        assert_eq!(layout.resolver.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_line_needs_ordered_keys() {
        let dataset = Dataset::single_series().with_record(Datum::single("A", 1.0));
        let err = ChartLayoutCalculator::new()
            .calculate(&dataset, &square(ChartType::Line), None)
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn test_date_key_axis_labels() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let dataset = Dataset::single_series()
            .with_record(Datum::single(day(1), 1.0))
            .with_record(Datum::single(day(11), 2.0));
        let layout = calculate(&dataset, &square(ChartType::Line));
        let labels: Vec<String> = layout
            .category_axis
            .unwrap()
            .ticks
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert!(labels.iter().all(|l| l.starts_with("2024-01-")));
    }

    #[test]
    fn test_calculate_stacked_area_layout() {
        let dataset = Dataset::new(["a", "b"])
            .with_record(Datum::new(1.0, vec![Some(1.0), Some(3.0)]))
            .with_record(Datum::new(2.0, vec![Some(2.0), Some(4.0)]));
        let config = square(ChartType::Area).with_kind(ChartKind::Stacked);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.areas.len(), 2);
        assert!(layout.markers.is_empty());
        for (lower, upper) in layout.areas[0].top_points.iter().zip(&layout.areas[1].bottom_points) {
            assert_eq!(lower, upper);
        }
        assert!(layout.areas[0].bottom_points.iter().all(|p| p.y == 100.0));
    }

    #[test]
    fn test_calculate_dumbbell_layout() {
        let dataset = Dataset::new(["before", "after"])
            .with_record(Datum::new("A", vec![Some(8.0), Some(2.0)]))
            .with_record(Datum::new("B", vec![None, None]));
        let layout = calculate(&dataset, &square(ChartType::Dumbbell).with_padding(0.0));

        assert_eq!(layout.dumbbells.len(), 1);
        let dumbbell = &layout.dumbbells[0];
        assert_eq!(dumbbell.start, LayoutPoint::new(25.0, 75.0));
        assert_eq!(dumbbell.end, LayoutPoint::new(25.0, 0.0));
        assert_eq!(dumbbell.markers.len(), 2);
    }

    #[test]
    fn test_calculate_beeswarm_layout() {
        let mut dataset = Dataset::single_series();
        for i in 0..20 {
            dataset.push(Datum::single(format!("n{i}"), (i % 5) as f64 * 10.0));
        }
        dataset.push(Datum::new("missing", vec![None]));

        let config = ChartConfig::new(ChartType::BeeSwarm).with_orientation(Orientation::Horizontal);
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.circles.len(), 20);
        assert!(layout.has_warning(&LayoutWarning::ExcludedRecords { count: 1 }));
        for (i, a) in layout.circles.iter().enumerate() {
            for b in &layout.circles[i + 1..] {
                assert!(a.center.distance(b.center.x, b.center.y) >= a.radius + b.radius - 1e-5);
            }
        }
        let first = &layout.circles[0];
        assert_eq!(layout.datum_at(first.center.x, first.center.y), Some(first.datum_index));
    }

    #[test]
    fn test_pending_layout_matches_one_shot() {
        let mut dataset = Dataset::single_series();
        for i in 0..12 {
            dataset.push(Datum::single(format!("n{i}"), (i % 3) as f64).with_size(i as f64));
        }
        let config = ChartConfig::new(ChartType::BeeSwarm);
        let calculator = ChartLayoutCalculator::new();

        let LayoutJob::Pending(mut pending) = calculator.begin(&dataset, &config, None).unwrap() else {
            panic!("bee-swarm layout should start pending");
        };
        assert_eq!(pending.preview().len(), 12);
        let budget = FrameBudget::ticks(7);
        while !pending.step_frame(&budget).is_finished() {}
        let chunked = pending.finish().unwrap();

        let one_shot = calculator.calculate(&dataset, &config, None).unwrap();
        assert_eq!(chunked.circles, one_shot.circles);
    }

    #[test]
    fn test_superseded_layout_is_discarded() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("a", 1.0))
            .with_record(Datum::single("b", 1.0));
        let generations = force_layout::LayoutGenerations::new();
        let stale = generations.begin();
        let job = ChartLayoutCalculator::new()
            .begin(&dataset, &ChartConfig::new(ChartType::BeeSwarm), Some(&stale))
            .unwrap();
        generations.begin();

        let err = job.complete().unwrap_err();
        assert!(matches!(err, ChartError::Layout(force_layout::LayoutError::Superseded { .. })));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_calculate_pack_layout() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("a", 100.0).with_color_group("x"))
            .with_record(Datum::single("b", 25.0).with_color_group("y"))
            .with_record(Datum::single("c", 25.0).with_color_group("x"));
        let layout = calculate(&dataset, &ChartConfig::new(ChartType::CirclePack));

        assert_eq!(layout.circles.len(), 3);
        assert_eq!(layout.circles[0].radius, 20.0);
        assert_eq!(layout.circles[0].color, layout.circles[2].color);
        assert_ne!(layout.circles[0].color, layout.circles[1].color);
    }

    #[test]
    fn test_calculate_heatmap_layout() {
        let palette = Palette::new(vec![Color::WHITE, Color::GRAY, Color::BLACK]);
        let dataset = Dataset::single_series()
            .with_record(Datum::single("x1", 5.0).with_category("r1"))
            .with_record(Datum::single("x2", 25.0).with_category("r1"))
            .with_record(Datum::single("x1", 15.0).with_category("r2"))
            .with_record(Datum::single("x2", 1.0));
        let config = square(ChartType::Heatmap)
            .with_padding(0.0)
            .with_palette(palette)
            .with_cell_coloring(CellColoring::Threshold {
                breakpoints: vec![10.0, 20.0],
            });
        let layout = calculate(&dataset, &config);

        assert_eq!(layout.cells.len(), 3);
        assert_eq!(layout.cells[0].color, Color::WHITE);
        assert_eq!(layout.cells[1].color, Color::BLACK);
        assert_eq!(layout.cells[2].color, Color::GRAY);
        assert_eq!(layout.cells[2].bounds, LayoutRect::new(0.0, 50.0, 50.0, 50.0));
        assert!(layout.has_warning(&LayoutWarning::ExcludedRecords { count: 1 }));
        assert_eq!(layout.datum_at(75.0, 25.0), Some(1));
    }

    #[test]
    fn test_heatmap_sequential_scheme() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("x1", 5.0).with_category("r1"))
            .with_record(Datum::single("x2", 55.0).with_category("r1"));
        let config = square(ChartType::Heatmap)
            .with_palette(Palette::from_scheme(ColorScheme::SequentialBlue))
            .with_cell_coloring(CellColoring::Threshold {
                breakpoints: vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
            });
        let layout = calculate(&dataset, &config);
        let blues = ColorScheme::SequentialBlue.colors();

        assert_eq!(layout.cells[0].color, blues[0]);
        assert_eq!(layout.cells[1].color, blues[5]);
    }

    #[test]
    fn test_empty_chart_layout() {
        let layout = calculate(&Dataset::single_series(), &ChartConfig::default());
        assert!(layout.is_empty());
        assert_eq!(layout.warnings, vec![LayoutWarning::EmptyData]);
        assert_eq!(layout.datum_at(10.0, 10.0), None);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.0, 1.0), "2");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.15, 0.05), "0.15");
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(2000.0, 500.0), "2000");
    }
}
