use chrono::{NaiveDate, NaiveDateTime, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use series_prep::{Frequency, SeriesError};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[rstest]
#[case("D", Frequency::Day(1))]
#[case("3d", Frequency::Day(3))]
#[case("15min", Frequency::Minute(15))]
#[case("T", Frequency::Minute(1))]
#[case("H", Frequency::Hour(1))]
#[case("30S", Frequency::Second(30))]
#[case("B", Frequency::BusinessDay(1))]
#[case("W", Frequency::Week(1, Weekday::Sun))]
#[case("W-MON", Frequency::Week(1, Weekday::Mon))]
#[case("M", Frequency::MonthEnd(1))]
#[case("ME", Frequency::MonthEnd(1))]
#[case("MS", Frequency::MonthStart(1))]
#[case("2Q", Frequency::QuarterEnd(2))]
#[case("QS", Frequency::QuarterStart(1))]
#[case("Y", Frequency::YearEnd(1))]
#[case("AS", Frequency::YearStart(1))]
fn test_parse_aliases(#[case] alias: &str, #[case] expected: Frequency) {
    assert_eq!(alias.parse::<Frequency>().unwrap(), expected);
    // display form parses back to the same frequency
    assert_eq!(expected.to_string().parse::<Frequency>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("0D")]
#[case("fortnight")]
#[case("W-XYZ")]
fn test_parse_rejects(#[case] alias: &str) {
    assert!(matches!(
        alias.parse::<Frequency>(),
        Err(SeriesError::InvalidParameter(_))
    ));
}

#[test]
fn test_month_start_range_rolls_forward() {
    let points = Frequency::MonthStart(1).range(at(2023, 1, 15), at(2023, 4, 1));
    assert_eq!(points, vec![at(2023, 2, 1), at(2023, 3, 1), at(2023, 4, 1)]);
}

#[test]
fn test_month_end_range() {
    let points = Frequency::MonthEnd(1).range(at(2024, 1, 31), at(2024, 4, 30));
    assert_eq!(
        points,
        vec![at(2024, 1, 31), at(2024, 2, 29), at(2024, 3, 31), at(2024, 4, 30)]
    );
}

#[test]
fn test_business_day_range_skips_weekends() {
    // 2023-01-06 is a Friday
    let points = Frequency::BusinessDay(1).range(at(2023, 1, 6), at(2023, 1, 10));
    assert_eq!(points, vec![at(2023, 1, 6), at(2023, 1, 9), at(2023, 1, 10)]);
}

#[test]
fn test_weekly_range_is_anchored() {
    // 2023-01-04 is a Wednesday, the next Sunday is the 8th
    let points = Frequency::Week(1, Weekday::Sun).range(at(2023, 1, 4), at(2023, 1, 22));
    assert_eq!(points, vec![at(2023, 1, 8), at(2023, 1, 15), at(2023, 1, 22)]);
}

#[test]
fn test_quarter_and_year_ranges() {
    let quarters = Frequency::QuarterEnd(1).range(at(2023, 2, 1), at(2023, 12, 31));
    assert_eq!(
        quarters,
        vec![at(2023, 3, 31), at(2023, 6, 30), at(2023, 9, 30), at(2023, 12, 31)]
    );

    let years = Frequency::YearStart(1).range(at(2020, 1, 1), at(2022, 6, 1));
    assert_eq!(years, vec![at(2020, 1, 1), at(2021, 1, 1), at(2022, 1, 1)]);
}

#[test]
fn test_hourly_range_keeps_start_time() {
    let start = at(2023, 1, 1).date().and_hms_opt(10, 30, 0).unwrap();
    let end = at(2023, 1, 1).date().and_hms_opt(13, 0, 0).unwrap();
    let points = Frequency::Hour(1).range(start, end);
    assert_eq!(points.len(), 3);
    assert_eq!(points[2], at(2023, 1, 1).date().and_hms_opt(12, 30, 0).unwrap());
}

#[test]
fn test_infer_regular_and_calendar_spacing() {
    let daily = vec![at(2023, 1, 1), at(2023, 1, 2), at(2023, 1, 3)];
    assert_eq!(Frequency::infer(&daily), Some(Frequency::Day(1)));

    let weekly = vec![at(2023, 1, 2), at(2023, 1, 9), at(2023, 1, 16)];
    assert_eq!(Frequency::infer(&weekly), Some(Frequency::Week(1, Weekday::Mon)));

    let month_starts = vec![at(2023, 1, 1), at(2023, 2, 1), at(2023, 3, 1)];
    assert_eq!(Frequency::infer(&month_starts), Some(Frequency::MonthStart(1)));

    let month_ends = vec![at(2023, 1, 31), at(2023, 2, 28), at(2023, 3, 31)];
    assert_eq!(Frequency::infer(&month_ends), Some(Frequency::MonthEnd(1)));

    let quarter_ends = vec![at(2023, 3, 31), at(2023, 6, 30), at(2023, 9, 30)];
    assert_eq!(Frequency::infer(&quarter_ends), Some(Frequency::QuarterEnd(1)));

    let business = vec![at(2023, 1, 5), at(2023, 1, 6), at(2023, 1, 9), at(2023, 1, 10)];
    assert_eq!(Frequency::infer(&business), Some(Frequency::BusinessDay(1)));
}

#[test]
fn test_infer_gives_up() {
    assert_eq!(Frequency::infer(&[at(2023, 1, 1), at(2023, 1, 2)]), None);
    let irregular = vec![at(2023, 1, 1), at(2023, 1, 2), at(2023, 1, 7)];
    assert_eq!(Frequency::infer(&irregular), None);
    let unsorted = vec![at(2023, 1, 3), at(2023, 1, 2), at(2023, 1, 1)];
    assert_eq!(Frequency::infer(&unsorted), None);
}

#[rstest]
#[case(Frequency::Minute(5), 60)]
#[case(Frequency::Hour(1), 24)]
#[case(Frequency::Day(1), 7)]
#[case(Frequency::BusinessDay(1), 5)]
#[case(Frequency::Week(1, Weekday::Sun), 52)]
#[case(Frequency::MonthStart(1), 12)]
#[case(Frequency::QuarterEnd(1), 4)]
#[case(Frequency::YearEnd(1), 1)]
fn test_seasonal_period(#[case] freq: Frequency, #[case] period: usize) {
    assert_eq!(freq.seasonal_period(), period);
}

#[test]
fn test_serde_uses_aliases() {
    let json = serde_json::to_string(&Frequency::MonthStart(2)).unwrap();
    assert_eq!(json, "\"2MS\"");
    let back: Frequency = serde_json::from_str("\"W-FRI\"").unwrap();
    assert_eq!(back, Frequency::Week(1, Weekday::Fri));
}
