/*!
 * GUI application for pyri-rs - Pyricularia risk chart viewer
 *
 * A cross-platform desktop application for browsing weather observation
 * tables:
 * - Loading a CSV table from a local file or an http(s) URL
 * - Toggling series through a clickable legend strip
 * - Inspecting per-day values with a crosshair tooltip
 * - Exporting the current chart as PNG or SVG
 *
 * Platform support: Windows, macOS, Linux
 */

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use eframe::egui;
use plotters::style::RGBColor;
use pyri_rs::engine::Chart;
use pyri_rs::ingest::DataSource;
use pyri_rs::legend::{LegendEntry, LegendLayout, LegendPlugin, LegendView};
use pyri_rs::models::ObservationRecord;
use pyri_rs::render::PlotGeometry;
use pyri_rs::{chart, legend, render, series};

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([360.0, 360.0])
            .with_title("Pyricularia Risk - pyri-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Pyricularia Risk",
        options,
        Box::new(|cc| {
            // The chart draws on black, so the surrounding UI goes dark too.
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(PyriApp::new()))
        }),
    )
}

/// Main application state
struct PyriApp {
    // Input fields
    input: String,

    // Chart state, built on the UI thread once a load completes
    chart: Option<Chart>,
    legend_view: Rc<RefCell<LegendView>>,
    texture: Option<egui::TextureHandle>,
    geometry: Option<PlotGeometry>,
    rendered_size: (u32, u32),
    needs_render: bool,
    viewport_width: u32,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background operation
    load_receiver: Option<mpsc::Receiver<LoadResult>>,
}

#[derive(Debug)]
enum LoadResult {
    Loaded(Vec<ObservationRecord>),
    Error(String),
}

impl PyriApp {
    fn new() -> Self {
        Self {
            input: String::new(),
            chart: None,
            legend_view: legend::shared_view(),
            texture: None,
            geometry: None,
            rendered_size: (0, 0),
            needs_render: false,
            viewport_width: 1024,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            load_receiver: None,
        }
    }

    fn start_load(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            self.error_message = "Please enter a CSV file path or http(s) URL".to_string();
            return;
        }

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "Loading table...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = Self::load_table(&input);
            let _ = sender.send(result);
        });
    }

    fn load_table(input: &str) -> LoadResult {
        match DataSource::default().load(input) {
            Ok(records) => LoadResult::Loaded(records),
            Err(e) => LoadResult::Error(format!("Failed to load table: {}", e)),
        }
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;

            match result {
                LoadResult::Loaded(records) => {
                    self.status_message = format!("Loaded {} records", records.len());
                    self.error_message.clear();
                    self.build_chart(&records);
                }
                LoadResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    /// Assemble the chart host for freshly loaded records and wire the
    /// legend plugin to it. Runs on the UI thread; the worker only ever
    /// ships plain records over the channel.
    fn build_chart(&mut self, records: &[ObservationRecord]) {
        let bundle = series::extract(records);
        let config = chart::build_config(bundle);
        let mut chart = Chart::new(config);

        let view = legend::shared_view();
        chart.register_plugin(Box::new(LegendPlugin::new(Rc::clone(&view))));
        chart.set_viewport_width(self.viewport_width);
        chart.update();

        self.legend_view = view;
        self.chart = Some(chart);
        self.geometry = None;
        self.needs_render = true;
    }

    fn export_chart(&mut self) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };

        // Default to user's home directory for output
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(home_dir)
            .set_file_name("pyricularia_chart.png")
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .save_file()
        else {
            return;
        };

        let (width, height) = if self.rendered_size == (0, 0) {
            (1000, 600)
        } else {
            self.rendered_size
        };
        match render::render_to_path(chart, &path, width, height) {
            Ok(()) => {
                self.status_message = format!("Wrote chart to {}", path.display());
                self.error_message.clear();
            }
            Err(e) => {
                self.error_message = format!("Failed to write chart: {}", e);
            }
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Table:");
            ui.text_edit_singleline(&mut self.input)
                .on_hover_text("CSV file path or http(s) URL");

            if ui.button("Browse").clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV table", &["csv"])
                    .pick_file()
            {
                self.input = path.to_string_lossy().to_string();
            }

            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Load"))
                .clicked()
            {
                self.start_load();
            }

            let can_export = self.chart.is_some() && !self.is_loading;
            if ui
                .add_enabled(can_export, egui::Button::new("Export chart"))
                .clicked()
            {
                self.export_chart();
            }

            if self.is_loading {
                ui.spinner();
                ui.label("Loading...");
            }
        });

        if !self.status_message.is_empty() {
            ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
        }
        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        }
        ui.add_space(4.0);
    }

    /// The clickable legend strip. Entries come from the view the plugin
    /// rebuilt on the last update, so layout changes lag one update behind
    /// the viewport, exactly like the drawn band.
    fn legend_ui(&mut self, ui: &mut egui::Ui) {
        if self.chart.is_none() {
            return;
        }
        let view = self.legend_view.borrow().clone();
        let mut clicked = None;

        ui.add_space(4.0);
        match view.layout {
            LegendLayout::WideRow => {
                ui.horizontal_wrapped(|ui| {
                    for entry in &view.entries {
                        if legend_entry_ui(ui, entry).clicked() {
                            clicked = Some(entry.dataset_index);
                        }
                    }
                });
            }
            LegendLayout::NarrowGrid => {
                egui::Grid::new("legend_grid")
                    .num_columns(2)
                    .min_col_width(170.0)
                    .show(ui, |ui| {
                        for (i, entry) in view.entries.iter().enumerate() {
                            if legend_entry_ui(ui, entry).clicked() {
                                clicked = Some(entry.dataset_index);
                            }
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
            }
        }
        ui.add_space(4.0);

        if let Some(dataset_index) = clicked
            && let Some(chart) = self.chart.as_mut()
        {
            legend::toggle_entry(chart, dataset_index);
            self.needs_render = true;
        }
    }

    fn chart_ui(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_size();
        self.viewport_width = (avail.x.max(1.0)) as u32;
        if let Some(chart) = self.chart.as_mut() {
            chart.set_viewport_width(self.viewport_width);
        }

        let Some(chart) = self.chart.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label("Load a weather table to see the chart.");
            });
            return;
        };

        // Re-render when the plot area resizes or the chart state changed.
        let want_w = (avail.x as u32).clamp(200, 3000);
        let want_h = (avail.y as u32).clamp(200, 3000);
        if self.needs_render || self.texture.is_none() || self.rendered_size != (want_w, want_h) {
            match render::render_to_rgb(chart, want_w, want_h) {
                Ok((buffer, geometry)) => {
                    let image =
                        egui::ColorImage::from_rgb([want_w as usize, want_h as usize], &buffer);
                    self.texture = Some(ui.ctx().load_texture(
                        "chart",
                        image,
                        egui::TextureOptions::LINEAR,
                    ));
                    self.geometry = Some(geometry);
                    self.rendered_size = (want_w, want_h);
                    self.needs_render = false;
                }
                Err(e) => {
                    self.error_message = format!("Failed to render chart: {}", e);
                    return;
                }
            }
        }

        let Some(texture) = self.texture.as_ref() else {
            return;
        };
        let response = ui.add(egui::Image::new(texture).sense(egui::Sense::hover()));
        let rect = response.rect;

        // Crosshair and tooltip: one hovered record index, every visible
        // series reports its value there.
        if let (Some(geometry), Some(pos)) = (self.geometry, response.hover_pos()) {
            let local_x = (pos.x - rect.min.x) as f64;
            let local_y = (pos.y - rect.min.y) as f64;
            if let Some(index) = geometry.record_index_at(local_x, local_y) {
                if let Some(record_x) = geometry.x_of_record(index) {
                    let x = rect.min.x + record_x as f32;
                    ui.painter().line_segment(
                        [
                            egui::pos2(x, rect.min.y + geometry.top as f32),
                            egui::pos2(x, rect.min.y + geometry.bottom as f32),
                        ],
                        egui::Stroke::new(1.0, egui::Color32::WHITE),
                    );
                }

                let label = chart.labels().get(index).cloned().unwrap_or_default();
                let lines: Vec<(egui::Color32, String)> = chart
                    .visible_samples_at(index)
                    .into_iter()
                    .map(|(dataset_index, value)| {
                        let descriptor = &chart.datasets()[dataset_index].descriptor;
                        (
                            color32(descriptor.color),
                            chart::tooltip_line(descriptor, value),
                        )
                    })
                    .collect();

                response.on_hover_ui_at_pointer(|ui| {
                    ui.strong(label);
                    for (color, line) in lines {
                        ui.colored_label(color, line);
                    }
                });
            }
        }
    }
}

impl eframe::App for PyriApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_result();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls_ui(ui);
        });
        egui::TopBottomPanel::bottom("legend").show(ctx, |ui| {
            self.legend_ui(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_ui(ui);
        });
    }
}

/// One legend entry: color marker plus label, struck through while hidden.
fn legend_entry_ui(ui: &mut egui::Ui, entry: &LegendEntry) -> egui::Response {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 10.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, color32(entry.fill_color));
        ui.painter()
            .rect_stroke(rect, 2.0, egui::Stroke::new(1.0, color32(entry.stroke_color)));

        let mut text = egui::RichText::new(&entry.text);
        if entry.hidden {
            text = text.strikethrough();
        }
        ui.add(egui::Label::new(text).sense(egui::Sense::click()))
    })
    .inner
}

fn color32(color: RGBColor) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}
