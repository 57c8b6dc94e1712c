use crate::engine::coerce_sample;
use crate::models::ObservationRecord;
use serde::{Deserialize, Serialize};

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub field: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-column statistics over every numeric field, in header order.
///
/// A cell counts as missing when it is absent or does not coerce to a
/// number, the same rule the chart host applies to samples.
pub fn field_summary(records: &[ObservationRecord]) -> Vec<Summary> {
    let mut out = Vec::with_capacity(ObservationRecord::NUMERIC_FIELDS.len());
    for field in ObservationRecord::NUMERIC_FIELDS {
        let mut vals: Vec<f64> = Vec::new();
        let mut missing = 0usize;
        for r in records {
            match coerce_sample(r.numeric_field(field)) {
                Some(v) => vals.push(v),
                None => missing += 1,
            }
        }
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            field: field.to_string(),
            count,
            missing,
            min,
            max,
            mean,
            median,
        });
    }
    out
}
