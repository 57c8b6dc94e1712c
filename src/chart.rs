use plotters::style::RGBColor;

use crate::models::SeriesField;
use crate::series::SeriesBundle;

/// Axis grid lines, `#0070F3`.
pub const GRID_COLOR: RGBColor = RGBColor(0x00, 0x70, 0xF3);
/// Axis labels and tick text.
pub const TEXT_COLOR: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);
/// Chart background.
pub const BACKGROUND_COLOR: RGBColor = RGBColor(0x00, 0x00, 0x00);

/// Stroke width shared by every series.
pub const LINE_WIDTH: u32 = 3;
/// Point markers are suppressed on the drawn chart.
pub const POINT_RADIUS: u32 = 0;
/// Points still respond to pointer hits within this many pixels.
pub const POINT_HIT_RADIUS: u32 = 10;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

/// Which of the two stacked value axes a series reads against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlot {
    /// Weather axis, lower band of the shared column.
    Primary,
    /// Risk axis, narrow band above the weather axis.
    Risk,
}

/// One value axis of the stacked pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Share of the axis column, relative to the other axis' weight.
    pub weight: f64,
}

/// Weather axis: clamped [0, 100], ticks every 10.
pub const PRIMARY_AXIS: AxisSpec = AxisSpec {
    min: 0.0,
    max: 100.0,
    step: 10.0,
    weight: 1.0,
};

/// Risk axis: clamped [0, 100], ticks every 50, narrow band on top.
pub const RISK_AXIS: AxisSpec = AxisSpec {
    min: 0.0,
    max: 100.0,
    step: 50.0,
    weight: 0.25,
};

/// Pointer policy: the hover position selects one shared record index and
/// every visible series reports its value there (crosshair behavior), rather
/// than requiring the pointer to intersect a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    SharedIndex,
}

/// Static styling description of one series. Built once by the catalog,
/// never mutated; visibility state lives in the chart host.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDescriptor {
    pub label: String,
    pub field: SeriesField,
    pub kind: SeriesKind,
    pub color: RGBColor,
    pub axis: AxisSlot,
    /// Suffix appended to tooltip values, may be empty.
    pub unit: String,
    /// Dash pattern as (on, off) pixel lengths; solid when `None`.
    pub dash: Option<(u32, u32)>,
    /// Bar width as a fraction of one record slot.
    pub bar_fraction: Option<f64>,
    /// Line rendering bridges gaps instead of breaking the polyline.
    pub span_gaps: bool,
    pub point_radius: u32,
    pub point_hit_radius: u32,
}

impl SeriesDescriptor {
    fn line(label: &str, field: SeriesField, color: RGBColor, axis: AxisSlot, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            field,
            kind: SeriesKind::Line,
            color,
            axis,
            unit: unit.to_string(),
            dash: None,
            bar_fraction: None,
            span_gaps: true,
            point_radius: POINT_RADIUS,
            point_hit_radius: POINT_HIT_RADIUS,
        }
    }

    fn bar(label: &str, field: SeriesField, color: RGBColor, axis: AxisSlot, unit: &str) -> Self {
        Self {
            kind: SeriesKind::Bar,
            bar_fraction: Some(0.6),
            ..Self::line(label, field, color, axis, unit)
        }
    }

    fn dashed(mut self, on: u32, off: u32) -> Self {
        self.dash = Some((on, off));
        self
    }
}

/// The fixed series catalog, in draw and legend order.
///
/// The last two entries are the temperature band bounds: dashed red overlays
/// with an empty label, which keeps them plotted but out of the legend.
pub fn descriptors() -> Vec<SeriesDescriptor> {
    vec![
        SeriesDescriptor::line(
            "Temperatura",
            SeriesField::Temp,
            RGBColor(0xFF, 0x00, 0x00),
            AxisSlot::Primary,
            "ºC",
        ),
        SeriesDescriptor::line(
            "Vel. de Viento",
            SeriesField::WindSpeed,
            RGBColor(0x00, 0xFF, 0xFF),
            AxisSlot::Primary,
            "m/s",
        ),
        SeriesDescriptor::bar(
            "Precipitación",
            SeriesField::Precip,
            RGBColor(0x2E, 0x86, 0xC1),
            AxisSlot::Primary,
            "mm",
        ),
        SeriesDescriptor::line(
            "Hum. en Aire",
            SeriesField::Humidity,
            RGBColor(0x00, 0x86, 0x00),
            AxisSlot::Primary,
            "%",
        ),
        SeriesDescriptor::line(
            "Riesgo de Pyricularia",
            SeriesField::RiskLevel,
            RGBColor(0xFF, 0xFF, 0xFF),
            AxisSlot::Risk,
            "% (experimental)",
        ),
        SeriesDescriptor::line(
            "",
            SeriesField::TempMax,
            RGBColor(0xFF, 0x00, 0x00),
            AxisSlot::Primary,
            "",
        )
        .dashed(10, 5),
        SeriesDescriptor::line(
            "",
            SeriesField::TempMin,
            RGBColor(0xFF, 0x00, 0x00),
            AxisSlot::Primary,
            "",
        )
        .dashed(10, 5),
    ]
}

/// A descriptor realized with its raw value sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub descriptor: SeriesDescriptor,
    /// Raw text samples, one per record; `None` marks a gap.
    pub values: Vec<Option<String>>,
}

/// Everything the chart host needs, assembled once.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfiguration {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub primary_axis: AxisSpec,
    pub risk_axis: AxisSpec,
    pub interaction: InteractionMode,
}

/// Chart Configuration Builder: realize the catalog against one bundle.
///
/// Always yields exactly seven datasets; a zero-record bundle produces seven
/// empty ones, which is still a valid chart.
pub fn build_config(mut bundle: SeriesBundle) -> ChartConfiguration {
    let labels = std::mem::take(&mut bundle.labels);
    let datasets = descriptors()
        .into_iter()
        .map(|descriptor| {
            let values = take_values(&mut bundle, descriptor.field);
            Dataset { descriptor, values }
        })
        .collect();
    ChartConfiguration {
        labels,
        datasets,
        primary_axis: PRIMARY_AXIS,
        risk_axis: RISK_AXIS,
        interaction: InteractionMode::SharedIndex,
    }
}

fn take_values(bundle: &mut SeriesBundle, field: SeriesField) -> Vec<Option<String>> {
    match field {
        SeriesField::Temp => std::mem::take(&mut bundle.temp),
        SeriesField::WindSpeed => std::mem::take(&mut bundle.windspeed),
        SeriesField::Precip => std::mem::take(&mut bundle.precip),
        SeriesField::Humidity => std::mem::take(&mut bundle.humidity),
        SeriesField::RiskLevel => std::mem::take(&mut bundle.risk_level),
        SeriesField::TempMax => std::mem::take(&mut bundle.tempmax),
        SeriesField::TempMin => std::mem::take(&mut bundle.tempmin),
    }
}

/// Tooltip line for one series at one hovered value.
pub fn tooltip_line(descriptor: &SeriesDescriptor, value: f64) -> String {
    format!("{}: {:.2} {}", descriptor.label, value, descriptor.unit)
}
