use chrono::{Datelike, NaiveDate};

use crate::models::{ObservationRecord, SeriesField};

/// Lowercase month abbreviations for axis labels, indexed by `month0`.
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Extractor output: axis labels plus one raw value sequence per plotted
/// field. Every vector holds exactly one element per input record, gaps
/// included, so positions line up across the whole bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesBundle {
    pub labels: Vec<String>,
    pub temp: Vec<Option<String>>,
    pub windspeed: Vec<Option<String>>,
    pub precip: Vec<Option<String>>,
    pub humidity: Vec<Option<String>>,
    pub risk_level: Vec<Option<String>>,
    pub tempmax: Vec<Option<String>>,
    pub tempmin: Vec<Option<String>>,
}

impl SeriesBundle {
    /// Number of records the bundle was built from.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Raw value sequence for one plotted field.
    pub fn values(&self, field: SeriesField) -> &[Option<String>] {
        match field {
            SeriesField::Temp => &self.temp,
            SeriesField::WindSpeed => &self.windspeed,
            SeriesField::Precip => &self.precip,
            SeriesField::Humidity => &self.humidity,
            SeriesField::RiskLevel => &self.risk_level,
            SeriesField::TempMax => &self.tempmax,
            SeriesField::TempMin => &self.tempmin,
        }
    }
}

/// Format one datetime cell as day-of-month plus abbreviated month,
/// e.g. `2024-03-14` -> `14 mar`.
///
/// The cell is parsed as a plain calendar date, so no timezone can shift the
/// day. Text that is not `YYYY-MM-DD` passes through trimmed; a bad cell
/// still yields exactly one label.
pub fn format_date_label(datetime: &str) -> String {
    let trimmed = datetime.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => format!("{} {}", date.day(), MONTHS[date.month0() as usize]),
        Err(_) => trimmed.to_string(),
    }
}

/// Series Extractor: one pass over the records, order preserving.
///
/// No aggregation, filtering, or resampling happens here. Values stay the
/// raw `Option<String>` text; numeric coercion is the chart host's job.
pub fn extract(records: &[ObservationRecord]) -> SeriesBundle {
    let n = records.len();
    let mut bundle = SeriesBundle {
        labels: Vec::with_capacity(n),
        temp: Vec::with_capacity(n),
        windspeed: Vec::with_capacity(n),
        precip: Vec::with_capacity(n),
        humidity: Vec::with_capacity(n),
        risk_level: Vec::with_capacity(n),
        tempmax: Vec::with_capacity(n),
        tempmin: Vec::with_capacity(n),
    };
    for rec in records {
        bundle.labels.push(format_date_label(&rec.datetime));
        bundle.temp.push(rec.temp.clone());
        bundle.windspeed.push(rec.windspeed.clone());
        bundle.precip.push(rec.precip.clone());
        bundle.humidity.push(rec.humidity.clone());
        bundle.risk_level.push(rec.risk_level.clone());
        bundle.tempmax.push(rec.tempmax.clone());
        bundle.tempmin.push(rec.tempmin.clone());
    }
    bundle
}
