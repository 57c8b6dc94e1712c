//! Static rendering of the chart state to **SVG** or **PNG**, plus an RGB
//! buffer path for GUI textures.
//!
//! The drawing mirrors the interactive widget: two value axes stacked in one
//! column (risk strip on top), grid in `#0070F3` on black, white axis text,
//! only visible datasets drawn, and the rebuilt legend as a bottom band.

pub mod band;
pub mod text;

use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use crate::chart::{AxisSlot, AxisSpec, BACKGROUND_COLOR, GRID_COLOR, LINE_WIDTH, SeriesKind, TEXT_COLOR};
use crate::engine::Chart;
use crate::legend;
use text::estimate_text_width_px;

const MARGIN: i32 = 16;
const AXIS_FONT_PX: u32 = 12;
const X_LABEL_AREA: u32 = 32;

/// Pixel-space description of the rendered plot column. The GUI uses it to
/// map pointer positions back to record indexes for the crosshair tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub left: i32,
    pub right: i32,
    /// Top of the risk strip.
    pub top: i32,
    /// Bottom of the primary panel.
    pub bottom: i32,
    pub x_min: f64,
    pub x_max: f64,
    pub record_count: usize,
}

impl PlotGeometry {
    /// Record slot under an image-space position, when it falls inside the
    /// plot column. Index interaction: the nearest slot wins, the pointer
    /// never has to intersect a geometry.
    pub fn record_index_at(&self, px: f64, py: f64) -> Option<usize> {
        if self.record_count == 0 {
            return None;
        }
        if px < self.left as f64 || px > self.right as f64 {
            return None;
        }
        if py < self.top as f64 || py > self.bottom as f64 {
            return None;
        }
        let span = (self.right - self.left).max(1) as f64;
        let t = (px - self.left as f64) / span;
        let x = self.x_min + t * (self.x_max - self.x_min);
        let slot = x.round();
        if slot < 0.0 || slot >= self.record_count as f64 {
            return None;
        }
        Some(slot as usize)
    }

    /// Image-space x of one record slot center, for crosshair snapping.
    pub fn x_of_record(&self, index: usize) -> Option<f64> {
        if index >= self.record_count {
            return None;
        }
        let t = (index as f64 - self.x_min) / (self.x_max - self.x_min);
        Some(self.left as f64 + t * (self.right - self.left) as f64)
    }
}

/// Render the chart to a file; the extension picks the backend (`.svg` is
/// vector, anything else goes through the bitmap backend).
pub fn render_to_path<P: AsRef<Path>>(
    chart: &Chart,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_on(root, chart, true)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_on(root, chart, true)?;
    }
    Ok(())
}

/// Render into an RGB8 buffer (`width * height * 3` bytes). The GUI uploads
/// the buffer as a texture and keeps the geometry for hit testing; the band
/// is skipped because the GUI draws its own clickable legend.
pub fn render_to_rgb(chart: &Chart, width: u32, height: u32) -> Result<(Vec<u8>, PlotGeometry)> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    let geometry = {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_on(root, chart, false)?
    };
    Ok((buffer, geometry))
}

fn axis_label_count(axis: &AxisSpec) -> usize {
    ((axis.max - axis.min) / axis.step).round() as usize + 1
}

/// Clamp-pin one sample into the axis window. Out-of-range values sit on the
/// boundary instead of rescaling the axis.
fn pin(value: f64, axis: &AxisSpec) -> f64 {
    value.clamp(axis.min, axis.max)
}

/// All present samples as plot points, pinned to the axis window.
fn present(samples: &[Option<f64>], axis: &AxisSpec) -> Vec<(f64, f64)> {
    samples
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, pin(v, axis))))
        .collect()
}

/// Present samples split into contiguous runs, one polyline per run. Used
/// when a series does not span gaps.
fn gap_runs(samples: &[Option<f64>], axis: &AxisSpec) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut cur: Vec<(f64, f64)> = Vec::new();
    for (i, v) in samples.iter().enumerate() {
        match v {
            Some(v) => cur.push((i as f64, pin(*v, axis))),
            None => {
                if !cur.is_empty() {
                    runs.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        runs.push(cur);
    }
    runs
}

fn draw_on<DB>(root: DrawingArea<DB, Shift>, chart: &Chart, include_band: bool) -> Result<PlotGeometry>
where
    DB: DrawingBackend,
{
    let (root_w_u32, root_h_u32) = root.dim_in_pixel();
    let root_w = root_w_u32 as i32;
    let root_h = root_h_u32 as i32;

    root.fill(&BACKGROUND_COLOR).map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 1) Gutters and band split
    // ----------------------------
    // Widest y tick is "100"; both panels share the width so they align.
    let left_label_px = estimate_text_width_px("100", AXIS_FONT_PX) + 18;
    let axis_x_start = MARGIN + left_label_px as i32;

    let (plot_root, band_area) = if include_band {
        let view = legend::rebuild(chart.legend_items(), root_w_u32);
        let band_h = band::band_height(&view, root_w, axis_x_start).max(40);
        let (plot, band) = root.split_vertically((root_h - band_h).max(40));
        (plot, Some((band, view)))
    } else {
        (root.clone(), None)
    };

    let (_, plot_h) = plot_root.dim_in_pixel();
    let risk_axis = chart.risk_axis();
    let primary_axis = chart.primary_axis();
    let risk_share = risk_axis.weight / (risk_axis.weight + primary_axis.weight);
    let risk_h = (plot_h as f64 * risk_share).round() as i32;
    let (risk_area, primary_area) = plot_root.split_vertically(risk_h);

    // ----------------------------
    // 2) Axis ranges
    // ----------------------------
    let n = chart.record_count();
    let x_min = -0.5f64;
    // A zero-record chart still needs a non-degenerate x window.
    let x_max = if n == 0 { 0.5 } else { n as f64 - 0.5 };
    let x_label_count = n.clamp(1, 12);
    let labels = chart.labels();
    let x_label_fmt = |x: &f64| -> String {
        let slot = x.round();
        if slot < 0.0 {
            return String::new();
        }
        labels.get(slot as usize).cloned().unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| format!("{:.0}", v);

    // ----------------------------
    // 3) Panels: risk strip on top, weather below
    // ----------------------------
    let mut risk_ctx = ChartBuilder::on(&risk_area)
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .build_cartesian_2d(x_min..x_max, risk_axis.min..risk_axis.max)
        .map_err(|e| anyhow!("{:?}", e))?;
    risk_ctx
        .configure_mesh()
        .x_labels(x_label_count)
        .y_labels(axis_label_count(&risk_axis))
        .y_label_formatter(&y_label_fmt)
        .label_style(TextStyle::from((FontFamily::SansSerif, AXIS_FONT_PX)).color(&TEXT_COLOR))
        .axis_style(GRID_COLOR)
        .bold_line_style(GRID_COLOR)
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let mut primary_ctx = ChartBuilder::on(&primary_area)
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, X_LABEL_AREA)
        .build_cartesian_2d(x_min..x_max, primary_axis.min..primary_axis.max)
        .map_err(|e| anyhow!("{:?}", e))?;
    primary_ctx
        .configure_mesh()
        .x_labels(x_label_count)
        .y_labels(axis_label_count(&primary_axis))
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(TextStyle::from((FontFamily::SansSerif, AXIS_FONT_PX)).color(&TEXT_COLOR))
        .axis_style(GRID_COLOR)
        .bold_line_style(GRID_COLOR)
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 4) Series, visible only, catalog order
    // ----------------------------
    for (index, dataset) in chart.datasets().iter().enumerate() {
        if !chart.is_dataset_visible(index) {
            continue;
        }
        let d = &dataset.descriptor;
        let axis = match d.axis {
            AxisSlot::Primary => primary_axis,
            AxisSlot::Risk => risk_axis,
        };
        let ctx = match d.axis {
            AxisSlot::Primary => &mut primary_ctx,
            AxisSlot::Risk => &mut risk_ctx,
        };
        let samples = chart.samples(index);

        match d.kind {
            SeriesKind::Bar => {
                let half = d.bar_fraction.unwrap_or(0.6) / 2.0;
                let style = d.color.filled();
                for (x, y) in present(samples, &axis) {
                    let rect = Rectangle::new([(x - half, axis.min), (x + half, y)], style);
                    ctx.draw_series(std::iter::once(rect))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
            SeriesKind::Line => {
                let style = d.color.stroke_width(LINE_WIDTH);
                let runs = if d.span_gaps {
                    vec![present(samples, &axis)]
                } else {
                    gap_runs(samples, &axis)
                };
                for run in runs {
                    if run.len() < 2 {
                        continue;
                    }
                    match d.dash {
                        Some((on, off)) => {
                            ctx.draw_series(DashedLineSeries::new(run, on, off, style))
                                .map_err(|e| anyhow!("{:?}", e))?;
                        }
                        None => {
                            ctx.draw_series(LineSeries::new(run, style))
                                .map_err(|e| anyhow!("{:?}", e))?;
                        }
                    }
                }
                if d.point_radius > 0 {
                    let marker = d.color.filled();
                    ctx.draw_series(
                        present(samples, &axis)
                            .into_iter()
                            .map(|(x, y)| Circle::new((x, y), d.point_radius as i32, marker)),
                    )
                    .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
    }

    // ----------------------------
    // 5) Legend band
    // ----------------------------
    if let Some((band_area, view)) = &band_area {
        band::draw_band(band_area, view, axis_x_start)?;
    }

    // ----------------------------
    // 6) Geometry, then present
    // ----------------------------
    let (left, bottom) = primary_ctx.backend_coord(&(x_min, primary_axis.min));
    let (right, _) = primary_ctx.backend_coord(&(x_max, primary_axis.min));
    let (_, top) = risk_ctx.backend_coord(&(x_min, risk_axis.max));

    root.present().map_err(|e| anyhow!("{:?}", e))?;

    Ok(PlotGeometry {
        left,
        right,
        top,
        bottom,
        x_min,
        x_max,
        record_count: n,
    })
}
