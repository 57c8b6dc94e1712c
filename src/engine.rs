use plotters::style::RGBColor;

use crate::chart::{AxisSpec, ChartConfiguration, Dataset, InteractionMode};

/// Engine-generated snapshot of one legend entry, one per dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub text: String,
    pub fill_color: RGBColor,
    pub stroke_color: RGBColor,
    pub hidden: bool,
    /// Position of the backing dataset in the chart, used to toggle it.
    pub dataset_index: usize,
}

/// State handed to plugins after a completed update. Plugins only ever see
/// the chart as of the finished update, never an intermediate.
pub struct ChartUpdate<'a> {
    pub datasets: &'a [Dataset],
    pub legend_items: &'a [LegendItem],
    pub viewport_width_px: u32,
}

/// Observer hook invoked by [`Chart::update`].
pub trait UpdatePlugin {
    fn after_update(&mut self, update: &ChartUpdate<'_>);
}

/// Numeric coercion applied at the engine boundary: trim, empty or
/// unparseable text becomes a gap. The same rule drives the stats summary.
pub fn coerce_sample(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    // Non-finite parses ("NaN", "inf") are gaps too; the axes are clamped
    // and clamping needs real numbers.
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The chart host. Owns the realized datasets and the per-dataset visibility
/// flags; everything downstream (legend, renderer, GUI) reads chart state
/// through this type instead of mutating shared globals.
pub struct Chart {
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    /// Coerced numeric samples, parallel to `datasets`.
    samples: Vec<Vec<Option<f64>>>,
    visible: Vec<bool>,
    legend_items: Vec<LegendItem>,
    primary_axis: AxisSpec,
    risk_axis: AxisSpec,
    interaction: InteractionMode,
    viewport_width_px: u32,
    plugins: Vec<Box<dyn UpdatePlugin>>,
}

impl Chart {
    /// Consume a configuration; every dataset starts visible.
    ///
    /// Plugins registered afterwards are first notified by the next
    /// [`Chart::update`] call.
    pub fn new(config: ChartConfiguration) -> Self {
        let samples = config
            .datasets
            .iter()
            .map(|d| d.values.iter().map(|v| coerce_sample(v.as_deref())).collect())
            .collect();
        let visible = vec![true; config.datasets.len()];
        let mut chart = Self {
            labels: config.labels,
            datasets: config.datasets,
            samples,
            visible,
            legend_items: Vec::new(),
            primary_axis: config.primary_axis,
            risk_axis: config.risk_axis,
            interaction: config.interaction,
            viewport_width_px: 1024,
            plugins: Vec::new(),
        };
        chart.legend_items = chart.build_legend_items();
        chart
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Coerced numeric sequence of one dataset; empty slice when the index
    /// is out of range.
    pub fn samples(&self, dataset_index: usize) -> &[Option<f64>] {
        self.samples
            .get(dataset_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn record_count(&self) -> usize {
        self.labels.len()
    }

    pub fn primary_axis(&self) -> AxisSpec {
        self.primary_axis
    }

    pub fn risk_axis(&self) -> AxisSpec {
        self.risk_axis
    }

    pub fn interaction(&self) -> InteractionMode {
        self.interaction
    }

    /// Snapshot from the most recent update (or from construction).
    pub fn legend_items(&self) -> &[LegendItem] {
        &self.legend_items
    }

    /// Width the legend layout policy is judged against, set by the caller
    /// whenever the viewport changes.
    pub fn set_viewport_width(&mut self, px: u32) {
        self.viewport_width_px = px;
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width_px
    }

    /// Flip one dataset's visibility. Out-of-range indexes are ignored.
    pub fn set_dataset_visibility(&mut self, dataset_index: usize, visible: bool) {
        if let Some(flag) = self.visible.get_mut(dataset_index) {
            *flag = visible;
        }
    }

    /// `false` for out-of-range indexes.
    pub fn is_dataset_visible(&self, dataset_index: usize) -> bool {
        self.visible.get(dataset_index).copied().unwrap_or(false)
    }

    pub fn register_plugin(&mut self, plugin: Box<dyn UpdatePlugin>) {
        self.plugins.push(plugin);
    }

    /// Complete one update: regenerate the legend-item snapshot, then notify
    /// every plugin with the settled state.
    pub fn update(&mut self) {
        self.legend_items = self.build_legend_items();
        let mut plugins = std::mem::take(&mut self.plugins);
        for plugin in plugins.iter_mut() {
            plugin.after_update(&ChartUpdate {
                datasets: &self.datasets,
                legend_items: &self.legend_items,
                viewport_width_px: self.viewport_width_px,
            });
        }
        self.plugins = plugins;
    }

    /// Values of all visible datasets at one record index, in dataset order.
    /// Gaps and hidden datasets are skipped.
    pub fn visible_samples_at(&self, record_index: usize) -> Vec<(usize, f64)> {
        let mut out = Vec::new();
        for (dataset_index, samples) in self.samples.iter().enumerate() {
            if !self.is_dataset_visible(dataset_index) {
                continue;
            }
            if let Some(Some(value)) = samples.get(record_index) {
                out.push((dataset_index, *value));
            }
        }
        out
    }

    fn build_legend_items(&self) -> Vec<LegendItem> {
        self.datasets
            .iter()
            .enumerate()
            .map(|(i, d)| LegendItem {
                text: d.descriptor.label.clone(),
                fill_color: d.descriptor.color,
                stroke_color: d.descriptor.color,
                hidden: !self.is_dataset_visible(i),
                dataset_index: i,
            })
            .collect()
    }
}
