use std::fs;
use std::path::PathBuf;

use pyri_rs::chart;
use pyri_rs::engine::Chart;
use pyri_rs::render;
use pyri_rs::series::SeriesBundle;

fn sample_chart() -> Chart {
    let bundle = SeriesBundle {
        labels: vec![
            "14 mar".into(),
            "15 mar".into(),
            "16 mar".into(),
            "17 mar".into(),
        ],
        temp: vec![
            Some("18.5".into()),
            Some("21.0".into()),
            None,
            Some("19.2".into()),
        ],
        windspeed: vec![
            Some("3.4".into()),
            Some("5.0".into()),
            Some("2.2".into()),
            Some("4.1".into()),
        ],
        precip: vec![Some("0".into()), Some("4.2".into()), Some("12.0".into()), None],
        humidity: vec![
            Some("70".into()),
            Some("82".into()),
            Some("90".into()),
            Some("65".into()),
        ],
        // the last value overshoots the axis window and must pin to 100
        risk_level: vec![
            Some("10".into()),
            Some("35".into()),
            Some("75".into()),
            Some("140".into()),
        ],
        tempmax: vec![
            Some("24.0".into()),
            Some("26.1".into()),
            Some("25.0".into()),
            Some("23.8".into()),
        ],
        tempmin: vec![
            Some("11.2".into()),
            Some("13.0".into()),
            Some("12.4".into()),
            Some("10.9".into()),
        ],
    };
    Chart::new(chart::build_config(bundle))
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("pyri_viz_{name}"));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "output has content");
    fs::remove_file(&path).ok();
}

#[test]
fn svg_and_png_outputs_have_content() {
    let chart = sample_chart();
    write_and_check(
        |p| render::render_to_path(&chart, p, 800, 480).unwrap(),
        "full.svg",
    );
    write_and_check(
        |p| render::render_to_path(&chart, p, 800, 480).unwrap(),
        "full.png",
    );
    // narrow viewport flips the legend band into the grid layout
    write_and_check(
        |p| render::render_to_path(&chart, p, 400, 500).unwrap(),
        "narrow.svg",
    );
}

#[test]
fn svg_styling_matches_the_widget() {
    let chart = sample_chart();
    let tmp = std::env::temp_dir().join("pyri_viz_style.svg");
    render::render_to_path(&chart, &tmp, 800, 480).unwrap();
    let svg = fs::read_to_string(&tmp).unwrap().to_ascii_uppercase();
    fs::remove_file(&tmp).ok();

    // black background, blue grid
    assert!(svg.contains("#000000"));
    assert!(svg.contains("#0070F3"));
    // legend band lists the labeled series
    assert!(svg.contains("TEMPERATURA"));
    assert!(svg.contains("RIESGO DE PYRICULARIA"));
}

#[test]
fn zero_records_still_render() {
    let chart = Chart::new(chart::build_config(SeriesBundle::default()));
    write_and_check(
        |p| render::render_to_path(&chart, p, 640, 400).unwrap(),
        "empty.svg",
    );
}

#[test]
fn hidden_series_are_left_out_of_the_drawing() {
    let mut chart = sample_chart();
    let tmp = std::env::temp_dir().join("pyri_viz_hidden.svg");
    render::render_to_path(&chart, &tmp, 800, 480).unwrap();
    let full = fs::read_to_string(&tmp).unwrap();

    for i in 0..7 {
        chart.set_dataset_visibility(i, false);
    }
    chart.update();
    render::render_to_path(&chart, &tmp, 800, 480).unwrap();
    let bare = fs::read_to_string(&tmp).unwrap();
    fs::remove_file(&tmp).ok();

    assert!(
        bare.len() < full.len(),
        "hiding every series must shrink the drawing"
    );
    // the band still lists the labeled entries, struck through
    assert!(bare.contains("Temperatura"));
}

#[test]
fn rgb_buffer_and_geometry_line_up() {
    let chart = sample_chart();
    let (buffer, geometry) = render::render_to_rgb(&chart, 640, 400).unwrap();
    assert_eq!(buffer.len(), 640 * 400 * 3);
    assert!(!buffer.iter().all(|&b| b == 0), "something was drawn");

    assert!(geometry.left < geometry.right);
    assert!(geometry.top < geometry.bottom);
    assert_eq!(geometry.record_count, 4);

    // a pointer in the middle of the plot resolves to a record
    let cx = f64::from(geometry.left + geometry.right) / 2.0;
    let cy = f64::from(geometry.top + geometry.bottom) / 2.0;
    let index = geometry.record_index_at(cx, cy).expect("inside the plot");
    assert!(index < 4);

    // snapping is stable: the crosshair x maps back to the same record
    let snap_x = geometry.x_of_record(index).unwrap();
    assert_eq!(geometry.record_index_at(snap_x, cy), Some(index));

    // outside the plot column there is no record
    assert_eq!(geometry.record_index_at(1.0, cy), None);
    assert_eq!(geometry.record_index_at(cx, 1.0), None);
    assert_eq!(geometry.record_index_at(639.0, 399.0), None);
}
