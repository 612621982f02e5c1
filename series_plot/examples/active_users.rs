use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use series_plot::{
    plot_acf_pacf_side_by_side, plot_decomposition, plot_rolling_statistics, plot_series,
    CorrelationPlotOptions, DecompositionPlotOptions, RollingPlotOptions, SeriesPlotOptions,
};
use series_prep::{
    adfuller_test, boxcox_transform, difference_series, fill_missing, load_timeseries, AutoLag,
    FillMethod, Frequency, LoadOptions,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn write_sample_data(path: &Path) -> std::io::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 8.0).expect("valid normal distribution");
    let weekly = [15.0, 30.0, 45.0, 20.0, 5.0, -50.0, -65.0];
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid start date");

    let mut file = File::create(path)?;
    writeln!(file, "date,active_users")?;
    for t in 0..365i64 {
        // a couple of outages left no row at all, one left an empty cell
        if t == 100 || t == 101 {
            continue;
        }
        let date = start + Duration::days(t);
        if t == 200 {
            writeln!(file, "{},", date.format("%Y-%m-%d"))?;
            continue;
        }
        let value = 1000.0 + 2.0 * t as f64 + weekly[t as usize % 7] + noise.sample(&mut rng);
        writeln!(file, "{},{:.0}", date.format("%Y-%m-%d"), value)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let workdir = tempfile::tempdir()?;
    let csv_path = workdir.path().join("active_users.csv");
    write_sample_data(&csv_path)?;
    info!(path = %csv_path.display(), "sample data written");

    // Load on a daily grid so the outages show up as missing days
    let options = LoadOptions {
        freq: Some(Frequency::Day(1)),
        ..LoadOptions::default()
    };
    let series = load_timeseries(&csv_path, "date", "active_users", &options)?;
    info!(
        points = series.len(),
        missing = series.missing_count(),
        "series loaded"
    );

    let series = fill_missing(&series, FillMethod::Ffill, None)?;

    let level = adfuller_test(&series, 0.05, Some(AutoLag::Aic), true)?;
    let stationary = if level.is_stationary {
        series.clone()
    } else {
        let diffed = difference_series(&series, 1, true);
        adfuller_test(&diffed, 0.05, Some(AutoLag::Aic), true)?;
        diffed
    };

    let (_, lambda) = boxcox_transform(&series, None)?;
    info!(lambda, "Box-Cox lambda estimated");

    let out = Path::new("charts");
    std::fs::create_dir_all(out)?;

    plot_series(
        &series,
        &SeriesPlotOptions {
            title: "Daily active users".to_string(),
            ylabel: "Users".to_string(),
            ..SeriesPlotOptions::default()
        },
        out.join("series.svg"),
    )?;
    plot_decomposition(
        &series,
        &DecompositionPlotOptions::default(),
        out.join("decomposition.svg"),
    )?;
    plot_rolling_statistics(
        &series,
        &RollingPlotOptions {
            window: 30,
            ..RollingPlotOptions::default()
        },
        out.join("rolling.svg"),
    )?;
    plot_acf_pacf_side_by_side(
        &stationary,
        &CorrelationPlotOptions::default(),
        out.join("correlation.svg"),
    )?;

    info!(dir = %out.display(), "charts written");
    Ok(())
}
