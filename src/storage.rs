use crate::models::ObservationRecord;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save records as CSV with the canonical ten column header. Absent fields
/// become empty cells.
pub fn save_csv<P: AsRef<Path>>(records: &[ObservationRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "datetime",
        "tempmax",
        "temp",
        "tempmin",
        "humidity",
        "windspeed",
        "winddir",
        "precip",
        "risk_label",
        "risk_level",
    ))?;
    for r in records {
        wtr.serialize((
            &r.datetime,
            &r.tempmax,
            &r.temp,
            &r.tempmin,
            &r.humidity,
            &r.windspeed,
            &r.winddir,
            &r.precip,
            &r.risk_label,
            &r.risk_level,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty JSON array. Absent fields serialize as `null`.
pub fn save_json<P: AsRef<Path>>(records: &[ObservationRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
