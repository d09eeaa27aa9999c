//! Whole-chart scenarios driven through `ChartInstance`

use charts::{
    CellColoring, ChartConfig, ChartError, ChartInstance, ChartKind, ChartType, Dataset, Datum,
    LayoutRect, LayoutWarning, Margin, Orientation,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn square(chart_type: ChartType) -> ChartConfig {
    ChartConfig::new(chart_type)
        .with_size(100.0, 100.0)
        .with_margin(Margin::uniform(0.0))
}

#[test]
fn test_two_bar_chart_geometry() {
    init_tracing();
    let data = Dataset::single_series()
        .with_record(Datum::single("A", 0.0))
        .with_record(Datum::single("B", 10.0));
    let chart = ChartInstance::new(data, square(ChartType::Bar).with_padding(0.25)).unwrap();

    let layout = chart.layout().unwrap();
    let band = layout.band_scale.as_ref().unwrap();
    assert_eq!(band.step(), 50.0);
    assert_eq!(band.bandwidth(), 37.5);
    assert_eq!(layout.bars[1].bounds, LayoutRect::new(50.0, 0.0, 37.5, 100.0));
    assert_eq!(layout.value_scale.unwrap().domain(), (0.0, 10.0));
}

#[test]
fn test_stacked_domain_ignores_missing_entries() {
    init_tracing();
    let data = Dataset::new(["x", "y"])
        .with_record(Datum::new("A", vec![Some(2.0), Some(3.0)]))
        .with_record(Datum::new("B", vec![Some(1.0), None]));
    let config = square(ChartType::Bar).with_kind(ChartKind::Stacked);
    let chart = ChartInstance::new(data, config).unwrap();

    assert_eq!(chart.layout().unwrap().value_scale.unwrap().domain(), (0.0, 5.0));
}

#[test]
fn test_ragged_stack_is_a_data_error() {
    init_tracing();
    let data = Dataset::new(["x", "y"])
        .with_record(Datum::new("A", vec![Some(2.0), Some(3.0)]))
        .with_record(Datum::new("B", vec![Some(1.0)]));
    let config = square(ChartType::Bar).with_kind(ChartKind::Stacked);
    let err = ChartInstance::new(data, config).unwrap_err();

    assert!(matches!(err, ChartError::Scale(_)));
    assert!(!err.is_configuration());
}

#[test]
fn test_threshold_palette_mismatch_is_a_config_error() {
    let json = r#"{
        "chartType": "heatmap",
        "cellColoring": {"kind": "threshold", "breakpoints": [1, 2, 3]},
        "palette": {"colors": [
            {"r": 0, "g": 0, "b": 0, "a": 255},
            {"r": 255, "g": 255, "b": 255, "a": 255}
        ]}
    }"#;
    let err = ChartConfig::from_json(json).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_heatmap_from_json_config() {
    init_tracing();
    let json = r#"{
        "chartType": "heatmap",
        "width": 200,
        "height": 100,
        "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0},
        "padding": 0,
        "cellColoring": {"kind": "threshold", "breakpoints": [10]}
    }"#;
    let config = ChartConfig::from_json(json).unwrap();
    assert_eq!(config.cell_coloring, CellColoring::Threshold { breakpoints: vec![10.0] });

    let data = Dataset::single_series()
        .with_record(Datum::single("mon", 4.0).with_category("am"))
        .with_record(Datum::single("tue", 40.0).with_category("am"));
    let chart = ChartInstance::new(data, config).unwrap();
    let cells = &chart.layout().unwrap().cells;

    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1].bounds, LayoutRect::new(100.0, 0.0, 100.0, 100.0));
    assert_ne!(cells[0].color, cells[1].color);
}

#[test]
fn test_line_hover_follows_nearest_date() {
    init_tracing();
    let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
    let data = Dataset::single_series()
        .with_record(Datum::single(day(1), 5.0))
        .with_record(Datum::single(day(5), 7.0))
        .with_record(Datum::single(day(11), 6.0));

    let hovered = Rc::new(RefCell::new(Vec::new()));
    let sink = hovered.clone();
    let mut chart = ChartInstance::new(data, square(ChartType::Line))
        .unwrap()
        .on_hover(move |d| sink.borrow_mut().push(d.copied()));

    assert!(chart.pointer_move(15.0, 50.0));
    assert!(chart.pointer_move(95.0, 50.0));
    chart.pointer_leave();

    assert_eq!(*hovered.borrow(), vec![Some(0), Some(2), None]);
}

#[test]
fn test_click_toggles_pin() {
    init_tracing();
    let data = Dataset::single_series()
        .with_record(Datum::single("A", 1.0))
        .with_record(Datum::single("B", 2.0));
    let mut chart = ChartInstance::new(data, square(ChartType::Bar).with_padding(0.0)).unwrap();

    chart.click(25.0, 50.0);
    assert_eq!(chart.state().pinned, Some(0));
    chart.click(75.0, 50.0);
    assert_eq!(chart.state().pinned, Some(1));
    chart.click(75.0, 50.0);
    assert_eq!(chart.state().pinned, None);
}

#[test]
fn test_horizontal_beeswarm_has_no_overlap() {
    init_tracing();
    let mut data = Dataset::single_series();
    for i in 0..40 {
        data.push(Datum::single(format!("p{i}"), (i % 4) as f64).with_size((i % 7) as f64));
    }
    let config = ChartConfig::new(ChartType::BeeSwarm).with_orientation(Orientation::Horizontal);
    let chart = ChartInstance::new(data, config).unwrap();

    let circles = &chart.layout().unwrap().circles;
    assert_eq!(circles.len(), 40);
    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            let distance = a.center.distance(b.center.x, b.center.y);
            assert!(distance >= a.radius + b.radius - 1e-5, "{i} overlaps {}", b.datum_index);
        }
    }
}

#[test]
fn test_empty_dataset_renders_placeholder() {
    init_tracing();
    let chart = ChartInstance::new(Dataset::single_series(), ChartConfig::new(ChartType::Line)).unwrap();
    let layout = chart.layout().unwrap();

    assert!(layout.is_empty());
    assert!(layout.has_warning(&LayoutWarning::EmptyData));
}

#[test]
fn test_instances_do_not_share_state() {
    let data = Dataset::single_series().with_record(Datum::single("A", 1.0));
    let mut first = ChartInstance::new(data.clone(), square(ChartType::Bar)).unwrap();
    let second = ChartInstance::new(data, square(ChartType::Bar)).unwrap();

    first.click(40.0, 50.0);
    assert!(first.state().is_pinned());
    assert!(second.state().is_idle());
}

proptest! {
    #[test]
    fn prop_bars_stay_inside_plot(values in prop::collection::vec(-100.0f64..100.0, 1..20)) {
        let mut data = Dataset::single_series();
        for (i, v) in values.iter().enumerate() {
            data.push(Datum::single(format!("k{i}"), *v));
        }
        let chart = ChartInstance::new(data, ChartConfig::new(ChartType::Bar)).unwrap();
        let layout = chart.layout().unwrap();
        let plot = layout.plot_area;

        prop_assert_eq!(layout.bars.len(), values.len());
        for bar in &layout.bars {
            prop_assert!(bar.bounds.x >= plot.x - 1e-9);
            prop_assert!(bar.bounds.right() <= plot.right() + 1e-9);
            prop_assert!(bar.bounds.y >= plot.y - 1e-9);
            prop_assert!(bar.bounds.bottom() <= plot.bottom() + 1e-9);
        }
    }
}
