use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use series_prep::{load_timeseries, DateOrder, Frequency, LoadOptions, SeriesError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn headerless(names: Option<Vec<&str>>) -> LoadOptions {
    LoadOptions {
        has_header: false,
        column_names: names.map(|n| n.into_iter().map(String::from).collect()),
        ..LoadOptions::default()
    }
}

#[test]
fn test_load_sorts_and_drops_incomplete_rows() {
    let file = write_csv(&[
        "date,users,region",
        "2023-01-03,120,north",
        "2023-01-01,100,north",
        "not a date,90,north",
        "2023-01-02,abc,south",
        "2023-01-04,,south",
        "2023-01-05,130,south",
    ]);

    let series = load_timeseries(file.path(), 0usize, "users", &LoadOptions::default()).unwrap();

    assert_eq!(series.len(), 3);
    assert!(series.is_strictly_increasing());
    assert_eq!(series.name(), Some("users"));
    assert_eq!(series.index_name(), Some("date"));
    assert_eq!(
        series.observed(),
        vec![
            (day(2023, 1, 1), 100.0),
            (day(2023, 1, 3), 120.0),
            (day(2023, 1, 5), 130.0)
        ]
    );
}

#[test]
fn test_keep_missing_without_dropna() {
    let file = write_csv(&["date,users", "2023-01-02,7", "bad,8", "2023-01-01,"]);
    let options = LoadOptions {
        dropna: false,
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), "date", 1usize, &options).unwrap();

    // unparseable dates sort last
    assert_eq!(
        series.index(),
        &[Some(day(2023, 1, 1)), Some(day(2023, 1, 2)), None]
    );
    assert_eq!(series.values(), &[None, Some(7.0), Some(8.0)]);
    assert_eq!(series.missing_count(), 1);
}

#[test]
fn test_unsorted_when_sorting_disabled() {
    let file = write_csv(&["date,users", "2023-01-02,2", "2023-01-01,1"]);
    let options = LoadOptions {
        sort_index: false,
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), 0usize, 1usize, &options).unwrap();
    assert_eq!(series.observed_values(), vec![2.0, 1.0]);
}

#[test]
fn test_headerless_requires_two_column_names() {
    let file = write_csv(&["2023-01-01,100"]);

    let missing = load_timeseries(file.path(), 0usize, 1usize, &headerless(None));
    assert!(matches!(missing, Err(SeriesError::MissingConfiguration(_))));

    let too_many = load_timeseries(
        file.path(),
        0usize,
        1usize,
        &headerless(Some(vec!["date", "users", "extra"])),
    );
    assert!(matches!(too_many, Err(SeriesError::MissingConfiguration(_))));
}

#[test]
fn test_headerless_uses_given_names() {
    let file = write_csv(&["2023-01-01,100", "2023-01-02,110"]);

    let series = load_timeseries(
        file.path(),
        "day",
        "visits",
        &headerless(Some(vec!["day", "visits"])),
    )
    .unwrap();

    assert_eq!(series.name(), Some("visits"));
    assert_eq!(series.observed_values(), vec![100.0, 110.0]);
}

#[test]
fn test_column_not_found_lists_available_columns() {
    let file = write_csv(&["date,users", "2023-01-01,100"]);

    match load_timeseries(file.path(), 0usize, 5usize, &LoadOptions::default()) {
        Err(SeriesError::ColumnNotFound { column, available }) => {
            assert_eq!(column, "position 5");
            assert_eq!(available, vec!["date".to_string(), "users".to_string()]);
        }
        other => panic!("Expected ColumnNotFound, got {:?}", other),
    }

    let err = load_timeseries(file.path(), "when", 1usize, &LoadOptions::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'when'"));
    assert!(message.contains("users"));
}

#[test]
fn test_missing_file() {
    let result = load_timeseries(
        "definitely/not/here.csv",
        0usize,
        1usize,
        &LoadOptions::default(),
    );
    assert!(matches!(result, Err(SeriesError::FileNotFound(_))));
}

#[test]
fn test_explicit_date_format() {
    let file = write_csv(&["date,users", "05/01/2023,1", "06/01/2023,2", "2023-01-07,3"]);
    let options = LoadOptions {
        date_format: Some("%d/%m/%Y".to_string()),
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), 0usize, 1usize, &options).unwrap();
    assert_eq!(
        series.observed(),
        vec![(day(2023, 1, 5), 1.0), (day(2023, 1, 6), 2.0)]
    );
}

#[test]
fn test_day_first_order() {
    let file = write_csv(&["date,users", "02/01/2023,1", "01/01/2023,2"]);
    let options = LoadOptions {
        date_order: DateOrder::DayFirst,
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), 0usize, 1usize, &options).unwrap();
    assert_eq!(
        series.index(),
        &[Some(day(2023, 1, 1)), Some(day(2023, 1, 2))]
    );
}

#[test]
fn test_frequency_exposes_gaps() {
    let file = write_csv(&[
        "date,users",
        "2023-01-01,10",
        "2023-01-02,11",
        "2023-01-05,14",
    ]);
    let options = LoadOptions {
        freq: Some(Frequency::Day(1)),
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), 0usize, 1usize, &options).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(
        series.values(),
        &[Some(10.0), Some(11.0), None, None, Some(14.0)]
    );
    assert_eq!(series.freq(), Some(Frequency::Day(1)));
}

#[test]
fn test_frequency_rejects_duplicate_dates() {
    let file = write_csv(&["date,users", "2023-01-01,10", "2023-01-01,11"]);
    let options = LoadOptions {
        freq: Some(Frequency::Day(1)),
        ..LoadOptions::default()
    };

    let result = load_timeseries(file.path(), 0usize, 1usize, &options);
    assert!(matches!(result, Err(SeriesError::InvalidData(_))));
}

#[test]
fn test_custom_delimiter() {
    let file = write_csv(&["date;users", "2023-01-01;1,5", "2023-01-02;2"]);
    let options = LoadOptions {
        delimiter: ';',
        ..LoadOptions::default()
    };

    let series = load_timeseries(file.path(), 0usize, 1usize, &options).unwrap();
    // "1,5" is not a number
    assert_eq!(series.observed_values(), vec![2.0]);
}

#[test]
fn test_options_from_json() {
    let options = LoadOptions::from_json_str(
        r#"{"has_header": false, "column_names": ["date", "users"], "freq": "MS", "date_order": "day_first"}"#,
    )
    .unwrap();

    assert!(!options.has_header);
    assert_eq!(options.freq, Some(Frequency::MonthStart(1)));
    assert_eq!(options.date_order, DateOrder::DayFirst);
    assert!(options.dropna);
    assert_eq!(options.index_name, "date");

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", r#"{"freq": "W-MON", "dropna": false}"#).unwrap();
    let options = LoadOptions::from_json_file(file.path()).unwrap();
    assert_eq!(options.freq, Some(Frequency::Week(1, chrono::Weekday::Mon)));
    assert!(!options.dropna);

    assert!(matches!(
        LoadOptions::from_json_str(r#"{"freq": "fortnightly"}"#),
        Err(SeriesError::JsonError(_))
    ));
}
