use pyri_rs::models::{ObservationRecord, RawRow, SeriesField, normalize};
use pyri_rs::series::{self, SeriesBundle};

fn rec(datetime: &str, temp: Option<&str>, precip: Option<&str>) -> ObservationRecord {
    ObservationRecord {
        datetime: datetime.into(),
        temp: temp.map(Into::into),
        precip: precip.map(Into::into),
        ..ObservationRecord::default()
    }
}

#[test]
fn date_labels_use_day_and_lowercase_month() {
    assert_eq!(series::format_date_label("2024-03-14"), "14 mar");
    assert_eq!(series::format_date_label("2023-12-01"), "1 dec");
    assert_eq!(series::format_date_label("2023-01-31"), "31 jan");
    // no zero padding on the day
    assert_eq!(series::format_date_label("2024-07-05"), "5 jul");
}

#[test]
fn all_twelve_months_abbreviate() {
    let months = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    for (i, month) in months.iter().enumerate() {
        let cell = format!("2024-{:02}-10", i + 1);
        assert_eq!(series::format_date_label(&cell), format!("10 {month}"));
    }
}

#[test]
fn bad_dates_pass_through_trimmed() {
    assert_eq!(series::format_date_label(" 2024-03-14 "), "14 mar");
    assert_eq!(series::format_date_label("yesterday"), "yesterday");
    assert_eq!(series::format_date_label("  n/a "), "n/a");
    assert_eq!(series::format_date_label(""), "");
    // not a real calendar date
    assert_eq!(series::format_date_label("2024-13-40"), "2024-13-40");
}

#[test]
fn extraction_keeps_positions_aligned() {
    let records = vec![
        rec("2024-03-14", Some("18.5"), Some("0")),
        rec("2024-03-15", None, Some("4.2")),
        rec("2024-03-16", Some("20.1"), None),
    ];
    let bundle = series::extract(&records);
    assert_eq!(bundle.len(), 3);
    assert_eq!(bundle.labels, vec!["14 mar", "15 mar", "16 mar"]);
    assert_eq!(
        bundle.temp,
        vec![Some("18.5".to_string()), None, Some("20.1".to_string())]
    );
    assert_eq!(
        bundle.precip,
        vec![Some("0".to_string()), Some("4.2".to_string()), None]
    );
    // untouched fields still hold one slot per record
    assert_eq!(bundle.humidity, vec![None, None, None]);
    assert_eq!(bundle.tempmin.len(), 3);
    assert_eq!(bundle.values(SeriesField::Temp), bundle.temp.as_slice());
}

#[test]
fn duplicate_datetimes_keep_duplicate_labels() {
    let records = vec![
        rec("2024-03-14", Some("18.5"), None),
        rec("2024-03-14", Some("19.0"), None),
    ];
    let bundle = series::extract(&records);
    assert_eq!(bundle.labels, vec!["14 mar", "14 mar"]);
}

#[test]
fn empty_input_gives_empty_bundle() {
    let bundle = series::extract(&[]);
    assert!(bundle.is_empty());
    assert_eq!(bundle, SeriesBundle::default());
}

#[test]
fn normalize_defaults_missing_datetime_to_empty() {
    let rows = vec![
        RawRow {
            datetime: Some("2024-03-14".into()),
            temp: Some("1".into()),
            ..RawRow::default()
        },
        RawRow {
            temp: Some("2".into()),
            ..RawRow::default()
        },
    ];
    let records = normalize(rows);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].datetime, "2024-03-14");
    assert_eq!(records[1].datetime, "");
    assert_eq!(records[1].temp.as_deref(), Some("2"));
}
