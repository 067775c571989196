use obesity_trend::data::{DataLoader, DataProcessor, DataWriter, LoaderError, SourceColumns};
use obesity_trend::pipeline::{fit_and_forecast, load_and_clean};
use obesity_trend::run;
use obesity_trend::stats::ForecastError;
use obesity_trend::{PipelineConfig, PipelineError};
use std::fs;
use tempfile::TempDir;

const RAW_CSV: &str = "\
DIM_TIME,RATE_PER_100_N,GEO_NAME_SHORT
2018,30.0,Rwanda
2019,31.0,Rwanda
2020,,Rwanda
2020,32.0,Rwanda
2020,32.0,Rwanda
";

fn workspace(csv: &str) -> (TempDir, PipelineConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = PipelineConfig::in_dir(dir.path());
    fs::write(&config.input_path, csv).expect("write input");
    (dir, config)
}

#[test]
fn missing_and_duplicate_rows_are_dropped_before_forecasting() {
    let (_dir, config) = workspace(RAW_CSV);

    let cleaned = load_and_clean(&config).unwrap();
    assert_eq!(cleaned.height(), 3);

    let (trend, forecast) = fit_and_forecast(&cleaned, &config).unwrap();
    assert!((trend.slope - 1.0).abs() < 1e-9);
    assert_eq!(forecast.len(), 5);
    assert_eq!(forecast.points[0].year, 2026);
    assert!((forecast.points[0].rate - 38.0).abs() < 1e-6);
    assert_eq!(forecast.to_lines()[0], "2026: 38.00%");
    assert_eq!(forecast.to_lines()[4], "2030: 42.00%");
}

#[test]
fn forecast_is_deterministic() {
    let (_dir, config) = workspace(RAW_CSV);

    let cleaned = load_and_clean(&config).unwrap();
    let (_, first) = fit_and_forecast(&cleaned, &config).unwrap();
    let (_, second) = fit_and_forecast(&cleaned, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cleaned_csv_round_trips() {
    let (_dir, config) = workspace(RAW_CSV);

    let cleaned = load_and_clean(&config).unwrap();
    DataWriter::save_csv(&cleaned, &config.cleaned_path).unwrap();

    let written = fs::read_to_string(&config.cleaned_path).unwrap();
    assert!(written.starts_with("Year,ObesityRate,GEO_NAME_SHORT\n"));

    let reloaded = DataLoader::load_csv(&config.cleaned_path).unwrap();
    assert_eq!(reloaded.height(), cleaned.height());

    let recleaned = DataProcessor::clean(reloaded, &SourceColumns::default()).unwrap();
    assert_eq!(recleaned, cleaned);
}

#[test]
fn saving_overwrites_an_existing_file() {
    let (_dir, config) = workspace(RAW_CSV);
    fs::write(&config.cleaned_path, "stale").unwrap();

    let cleaned = load_and_clean(&config).unwrap();
    DataWriter::save_csv(&cleaned, &config.cleaned_path).unwrap();

    let written = fs::read_to_string(&config.cleaned_path).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(!written.contains("stale"));
}

#[test]
fn na_tokens_count_as_missing() {
    let (_dir, config) = workspace(
        "DIM_TIME,RATE_PER_100_N\n2018,30.0\n2019,NA\n2020,32.0\n2021,N/A\n",
    );

    let cleaned = load_and_clean(&config).unwrap();
    assert_eq!(cleaned.years().unwrap(), vec![2018, 2020]);
}

#[test]
fn nan_and_default_missing_tokens_are_dropped() {
    for token in ["nan", "-nan", "NaN", "#N/A", "None", "n/a", "<NA>", "-1.#IND"] {
        let (_dir, config) = workspace(&format!(
            "DIM_TIME,RATE_PER_100_N\n2018,30.0\n2019,{token}\n2020,32.0\n"
        ));

        let cleaned = load_and_clean(&config).unwrap();
        assert_eq!(cleaned.years().unwrap(), vec![2018, 2020], "token {token}");

        let (_, forecast) = fit_and_forecast(&cleaned, &config).unwrap();
        assert_eq!(forecast.to_lines()[0], "2026: 38.00%", "token {token}");
    }
}

#[test]
fn run_writes_cleaned_csv_and_both_charts() {
    let (_dir, config) = workspace(RAW_CSV);

    let report = run(&config).unwrap();
    assert_eq!(report.cleaned_rows, 3);
    assert!((report.forecast.points[0].rate - 38.0).abs() < 1e-6);

    for path in [
        &config.cleaned_path,
        &config.trend_chart_path,
        &config.forecast_chart_path,
    ] {
        let len = fs::metadata(path).expect("output written").len();
        assert!(len > 0, "{} is empty", path.display());
    }
    assert!(config.trend_chart_path.ends_with("obesity_trend.png"));
    assert!(config.forecast_chart_path.ends_with("forecast.png"));
}

#[test]
fn summary_lists_schema_and_preview() {
    let (_dir, config) = workspace(RAW_CSV);

    let raw = DataLoader::load_csv(&config.input_path).unwrap();
    let summary = DataLoader::summary(&raw);

    assert!(summary.contains("5 rows x 3 columns"));
    assert!(summary.contains("Non-Null Count"));
    for name in ["DIM_TIME", "RATE_PER_100_N", "GEO_NAME_SHORT"] {
        assert!(summary.contains(name), "missing {name}");
    }
    assert!(summary.contains("Rwanda"));
}

#[test]
fn absent_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::in_dir(dir.path());

    let err = load_and_clean(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoaderError::CsvError { .. })));
}

#[test]
fn single_year_is_a_singular_fit() {
    let (_dir, config) = workspace("DIM_TIME,RATE_PER_100_N\n2020,30.0\n2020,31.0\n");

    let cleaned = load_and_clean(&config).unwrap();
    let err = fit_and_forecast(&cleaned, &config).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Forecast(ForecastError::SingularFit { distinct_years: 1 })
    ));
}

#[test]
fn renamed_columns_must_exist() {
    let (_dir, config) = workspace("YEAR,RATE_PER_100_N\n2018,30.0\n2019,31.0\n");

    let err = load_and_clean(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Clean(_)));
}

#[test]
fn default_config_matches_fixed_layout() {
    let config = PipelineConfig::default();
    assert_eq!(config.input_path.to_str(), Some("RELAY_WHS.csv"));
    assert_eq!(config.cleaned_path.to_str(), Some("cleaned_data.csv"));
    assert_eq!(config.trend_chart_path.to_str(), Some("obesity_trend.png"));
    assert_eq!(config.forecast_chart_path.to_str(), Some("forecast.png"));
    assert_eq!(config.forecast_years, 2026..=2030);
    assert!(config.display_charts);
}
