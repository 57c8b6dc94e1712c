/*!
 * Tests for the GUI application functionality
 *
 * These tests verify the chart interaction logic the viewer builds on,
 * without requiring a display.
 */

use std::cell::RefCell;
use std::rc::Rc;

use pyri_rs::chart;
use pyri_rs::engine::Chart;
use pyri_rs::legend::{self, LegendLayout, LegendPlugin, LegendView};
use pyri_rs::render;
use pyri_rs::series::SeriesBundle;

fn viewer_chart() -> (Chart, Rc<RefCell<LegendView>>) {
    let bundle = SeriesBundle {
        labels: vec!["14 mar".into(), "15 mar".into()],
        temp: vec![Some("18.5".into()), Some("21.0".into())],
        risk_level: vec![Some("10".into()), Some("35".into())],
        ..SeriesBundle::default()
    };
    let mut chart = Chart::new(chart::build_config(bundle));
    let view = legend::shared_view();
    chart.register_plugin(Box::new(LegendPlugin::new(Rc::clone(&view))));
    chart.update();
    (chart, view)
}

/// Clicking a legend entry toggles the series; the next texture leaves it out.
#[test]
fn legend_click_flow_updates_view_and_chart() {
    let (mut chart, view) = viewer_chart();
    let target = view.borrow().entries[0].dataset_index;

    legend::toggle_entry(&mut chart, target);
    assert!(!chart.is_dataset_visible(target));
    assert!(view.borrow().entries[0].hidden, "strip shows strikethrough");

    legend::toggle_entry(&mut chart, target);
    assert!(chart.is_dataset_visible(target));
    assert!(!view.borrow().entries[0].hidden);
}

/// The viewer renders into an RGB texture and resolves hover positions
/// against the returned geometry.
#[test]
fn hover_tooltip_reports_visible_series_at_the_nearest_day() {
    let (chart, _view) = viewer_chart();
    let (buffer, geometry) = render::render_to_rgb(&chart, 800, 500).unwrap();
    assert_eq!(buffer.len(), 800 * 500 * 3);

    let x = geometry.x_of_record(1).unwrap();
    let y = f64::from(geometry.top + geometry.bottom) / 2.0;
    assert_eq!(geometry.record_index_at(x, y), Some(1));

    let lines: Vec<String> = chart
        .visible_samples_at(1)
        .iter()
        .map(|&(i, v)| chart::tooltip_line(&chart.datasets()[i].descriptor, v))
        .collect();
    assert_eq!(
        lines,
        vec![
            "Temperatura: 21.00 ºC".to_string(),
            "Riesgo de Pyricularia: 35.00 % (experimental)".to_string(),
        ]
    );
}

/// Narrow windows flip the legend strip into the two column grid on the
/// next update; wide windows flip it back.
#[test]
fn window_resize_changes_legend_layout_on_update() {
    let (mut chart, view) = viewer_chart();
    chart.set_viewport_width(360);
    chart.update();
    assert_eq!(view.borrow().layout, LegendLayout::NarrowGrid);

    chart.set_viewport_width(1024);
    chart.update();
    assert_eq!(view.borrow().layout, LegendLayout::WideRow);
}

/// Export writes the same drawing the window shows, at the current size.
#[test]
fn export_writes_png_and_svg() {
    let (chart, _view) = viewer_chart();
    let dir = tempfile::tempdir().unwrap();
    for name in ["chart.png", "chart.svg"] {
        let path = dir.path().join(name);
        render::render_to_path(&chart, &path, 640, 420).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "{name} has content");
    }
}
