use serde::{Deserialize, Serialize};

/// One record as decoded from the source table; every field is untyped text.
///
/// Nothing is validated here: a missing column or an empty cell simply becomes
/// `None`. Columns outside the fixed set are dropped by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRow {
    pub datetime: Option<String>,
    pub tempmax: Option<String>,
    pub temp: Option<String>,
    pub tempmin: Option<String>,
    pub humidity: Option<String>,
    pub windspeed: Option<String>,
    pub winddir: Option<String>,
    pub precip: Option<String>,
    pub risk_label: Option<String>,
    pub risk_level: Option<String>,
}

/// Normalized form used by this crate (one row = one daily observation).
///
/// Same field set as [`RawRow`]; `datetime` is kept as the ISO-like date text
/// from the source (empty when absent), all other fields stay opaque strings.
/// Numeric coercion happens later, at the chart-host boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ObservationRecord {
    pub datetime: String,
    pub tempmax: Option<String>,
    pub temp: Option<String>,
    pub tempmin: Option<String>,
    pub humidity: Option<String>,
    pub windspeed: Option<String>,
    pub winddir: Option<String>,
    pub precip: Option<String>,
    pub risk_label: Option<String>,
    pub risk_level: Option<String>,
}

impl From<RawRow> for ObservationRecord {
    fn from(r: RawRow) -> Self {
        Self {
            datetime: r.datetime.unwrap_or_default(),
            tempmax: r.tempmax,
            temp: r.temp,
            tempmin: r.tempmin,
            humidity: r.humidity,
            windspeed: r.windspeed,
            winddir: r.winddir,
            precip: r.precip,
            risk_label: r.risk_label,
            risk_level: r.risk_level,
        }
    }
}

impl ObservationRecord {
    /// Numeric columns in canonical header order (everything except
    /// `datetime` and `risk_label`).
    pub const NUMERIC_FIELDS: [&'static str; 8] = [
        "tempmax",
        "temp",
        "tempmin",
        "humidity",
        "windspeed",
        "winddir",
        "precip",
        "risk_level",
    ];

    /// Raw text of a numeric column by name. `None` for unknown names too,
    /// which keeps callers on the fixed set.
    pub fn numeric_field(&self, name: &str) -> Option<&str> {
        match name {
            "tempmax" => self.tempmax.as_deref(),
            "temp" => self.temp.as_deref(),
            "tempmin" => self.tempmin.as_deref(),
            "humidity" => self.humidity.as_deref(),
            "windspeed" => self.windspeed.as_deref(),
            "winddir" => self.winddir.as_deref(),
            "precip" => self.precip.as_deref(),
            "risk_level" => self.risk_level.as_deref(),
            _ => None,
        }
    }
}

/// The seven fields that become plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesField {
    Temp,
    WindSpeed,
    Precip,
    Humidity,
    RiskLevel,
    TempMax,
    TempMin,
}

impl SeriesField {
    /// Raw value of this field in a record, gaps included.
    pub fn value<'a>(&self, rec: &'a ObservationRecord) -> Option<&'a str> {
        match self {
            SeriesField::Temp => rec.temp.as_deref(),
            SeriesField::WindSpeed => rec.windspeed.as_deref(),
            SeriesField::Precip => rec.precip.as_deref(),
            SeriesField::Humidity => rec.humidity.as_deref(),
            SeriesField::RiskLevel => rec.risk_level.as_deref(),
            SeriesField::TempMax => rec.tempmax.as_deref(),
            SeriesField::TempMin => rec.tempmin.as_deref(),
        }
    }

    /// Source column name, as it appears in the table header.
    pub fn column(&self) -> &'static str {
        match self {
            SeriesField::Temp => "temp",
            SeriesField::WindSpeed => "windspeed",
            SeriesField::Precip => "precip",
            SeriesField::Humidity => "humidity",
            SeriesField::RiskLevel => "risk_level",
            SeriesField::TempMax => "tempmax",
            SeriesField::TempMin => "tempmin",
        }
    }
}

/// Row Normalizer: one [`ObservationRecord`] per [`RawRow`], same order.
///
/// Fields are copied verbatim; there is no validation, no type coercion and
/// no error path. Absent fields stay `None` and flow through every later
/// stage as gaps.
pub fn normalize(rows: Vec<RawRow>) -> Vec<ObservationRecord> {
    rows.into_iter().map(ObservationRecord::from).collect()
}
