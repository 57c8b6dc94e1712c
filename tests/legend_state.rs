use std::rc::Rc;

use pyri_rs::chart;
use pyri_rs::engine::Chart;
use pyri_rs::legend::{self, LegendLayout, LegendPlugin, NARROW_VIEWPORT_PX};
use pyri_rs::series::SeriesBundle;

fn sample_chart() -> Chart {
    let bundle = SeriesBundle {
        labels: vec!["14 mar".into()],
        temp: vec![Some("18.5".into())],
        risk_level: vec![Some("60".into())],
        ..SeriesBundle::default()
    };
    Chart::new(chart::build_config(bundle))
}

#[test]
fn rebuild_drops_unlabeled_series() {
    let chart = sample_chart();
    let view = legend::rebuild(chart.legend_items(), 1024);

    // seven datasets, but the two band bounds carry no label
    let texts: Vec<&str> = view.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Temperatura",
            "Vel. de Viento",
            "Precipitación",
            "Hum. en Aire",
            "Riesgo de Pyricularia",
        ]
    );
    // entries keep the dataset index so clicks reach the right series
    assert_eq!(view.entries[4].dataset_index, 4);
}

#[test]
fn layout_flips_exactly_at_the_narrow_threshold() {
    assert!(legend::narrow_viewport(NARROW_VIEWPORT_PX - 1));
    assert!(!legend::narrow_viewport(NARROW_VIEWPORT_PX));
    assert_eq!(legend::layout_policy(true), LegendLayout::NarrowGrid);
    assert_eq!(legend::layout_policy(false), LegendLayout::WideRow);

    let chart = sample_chart();
    let narrow = legend::rebuild(chart.legend_items(), NARROW_VIEWPORT_PX - 1);
    assert_eq!(narrow.layout, LegendLayout::NarrowGrid);
    let wide = legend::rebuild(chart.legend_items(), NARROW_VIEWPORT_PX);
    assert_eq!(wide.layout, LegendLayout::WideRow);
}

#[test]
fn rebuild_replaces_the_previous_view_wholesale() {
    let mut chart = sample_chart();
    let view = legend::shared_view();
    chart.register_plugin(Box::new(LegendPlugin::new(Rc::clone(&view))));
    chart.update();
    assert_eq!(view.borrow().entries.len(), 5);
    assert!(!view.borrow().entries[0].hidden);

    chart.set_dataset_visibility(0, false);
    chart.update();
    let entries = view.borrow().entries.clone();
    assert_eq!(entries.len(), 5, "no duplicated entries across rebuilds");
    assert!(entries[0].hidden);

    chart.set_dataset_visibility(0, true);
    chart.update();
    assert!(!view.borrow().entries[0].hidden);
}

#[test]
fn toggle_entry_round_trips_through_an_update() {
    let mut chart = sample_chart();
    let view = legend::shared_view();
    chart.register_plugin(Box::new(LegendPlugin::new(Rc::clone(&view))));
    chart.update();

    legend::toggle_entry(&mut chart, 4);
    assert!(!chart.is_dataset_visible(4));
    assert!(view.borrow().entries[4].hidden, "plugin saw the toggle");

    legend::toggle_entry(&mut chart, 4);
    assert!(chart.is_dataset_visible(4));
    assert!(!view.borrow().entries[4].hidden);
}

#[test]
fn zero_items_build_an_empty_view() {
    let view = legend::rebuild(&[], 1024);
    assert!(view.entries.is_empty());
    assert_eq!(view.layout, LegendLayout::WideRow);
}

#[test]
fn viewport_changes_show_up_on_the_next_update() {
    let mut chart = sample_chart();
    let view = legend::shared_view();
    chart.register_plugin(Box::new(LegendPlugin::new(Rc::clone(&view))));
    chart.set_viewport_width(1024);
    chart.update();
    assert_eq!(view.borrow().layout, LegendLayout::WideRow);

    chart.set_viewport_width(400);
    // nothing moves until the update runs
    assert_eq!(view.borrow().layout, LegendLayout::WideRow);
    chart.update();
    assert_eq!(view.borrow().layout, LegendLayout::NarrowGrid);
}
