use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use series_prep::analysis::infer_period;
use series_prep::{
    acf, pacf, seasonal_decompose, DecompositionModel, Frequency, SeriesError, TimeSeries,
};

const WEEKLY_PATTERN: [f64; 7] = [5.0, 3.0, 1.0, 0.0, -2.0, -3.0, -4.0];

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn daily_seasonal(n: usize) -> TimeSeries {
    TimeSeries::from_observations((0..n).map(|t| {
        (
            start() + Duration::days(t as i64),
            100.0 + 0.2 * t as f64 + WEEKLY_PATTERN[t % 7],
        )
    }))
    .with_name("users")
}

#[test]
fn test_period_inferred_from_daily_index() {
    let series = daily_seasonal(42);
    assert_eq!(infer_period(&series), Some(7));

    let parts = seasonal_decompose(&series, DecompositionModel::Additive, None).unwrap();
    assert_eq!(parts.period, 7);
    assert_eq!(parts.observed.len(), 42);
    assert_eq!(parts.trend.index(), series.index());
    assert_eq!(parts.seasonal.name(), Some("seasonal"));

    // centered average of 7 points loses 3 at each end
    assert!(parts.trend.values()[2].is_none());
    assert_abs_diff_eq!(parts.trend.values()[3].unwrap(), 100.6, epsilon = 1e-9);
    let mean_pattern = WEEKLY_PATTERN.iter().sum::<f64>() / 7.0;
    assert_abs_diff_eq!(
        parts.seasonal.values()[0].unwrap(),
        WEEKLY_PATTERN[0] - mean_pattern,
        epsilon = 1e-9
    );
}

#[test]
fn test_period_from_attached_frequency() {
    let series = daily_seasonal(60).asfreq(Frequency::Day(1)).unwrap();
    assert_eq!(series.freq(), Some(Frequency::Day(1)));
    assert_eq!(infer_period(&series), Some(7));
}

#[test]
fn test_explicit_period_wins() {
    let parts = seasonal_decompose(&daily_seasonal(40), DecompositionModel::Additive, Some(4)).unwrap();
    assert_eq!(parts.period, 4);
}

#[test]
fn test_missing_period_without_regular_index() {
    let series = TimeSeries::from_observations(vec![
        (start(), 1.0),
        (start() + Duration::days(1), 2.0),
        (start() + Duration::days(5), 3.0),
        (start() + Duration::days(6), 4.0),
    ]);
    assert!(matches!(
        seasonal_decompose(&series, DecompositionModel::Additive, None),
        Err(SeriesError::MissingConfiguration(_))
    ));
}

#[test]
fn test_decomposition_domain_and_length() {
    let mut values: Vec<(NaiveDateTime, f64)> = daily_seasonal(28).observed();
    values[3].1 = -1.0;
    let with_negative = TimeSeries::from_observations(values);
    assert!(matches!(
        seasonal_decompose(&with_negative, DecompositionModel::Multiplicative, Some(7)),
        Err(SeriesError::DomainViolation(_))
    ));

    assert!(matches!(
        seasonal_decompose(&daily_seasonal(10), DecompositionModel::Additive, Some(7)),
        Err(SeriesError::InvalidData(_))
    ));
}

#[test]
fn test_correlograms() {
    let series = daily_seasonal(70);

    let autocorrelation = acf(&series, 14, 0.05).unwrap();
    assert_eq!(autocorrelation.nlags(), 14);
    assert_eq!(autocorrelation.values[0], 1.0);
    assert_eq!(autocorrelation.confidence[0], 0.0);
    assert!(autocorrelation.confidence[2] > autocorrelation.confidence[1]);

    let partial = pacf(&series, 20, 0.05).unwrap();
    assert_eq!(partial.values.len(), 21);
    assert_abs_diff_eq!(partial.confidence[1], 1.959964 / 70f64.sqrt(), epsilon = 1e-5);

    assert!(matches!(
        pacf(&series, 35, 0.05),
        Err(SeriesError::InvalidParameter(_))
    ));
    assert!(matches!(
        acf(&series, 70, 0.05),
        Err(SeriesError::InvalidParameter(_))
    ));
}
