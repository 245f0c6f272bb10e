use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use usage_forecast::config::EngineConfig;
use usage_forecast::data::{HistoricalSeries, Observation, TimeSeriesPoint};
use usage_forecast::source::InMemorySource;
use usage_forecast::{generate_forecast, ForecastError, Forecaster, Tier};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Complete hourly series of `days` days ending at 23:00 on `end`
fn hourly_days(end: &str, days: i64, value: impl Fn(usize) -> f64) -> HistoricalSeries {
    let start = (date(end) - Duration::days(days - 1))
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..(days * 24) as usize)
        .map(|h| Observation::new(start + Duration::hours(h as i64), value(h)))
        .collect()
}

fn daily_profile(h: usize) -> f64 {
    12.0 + 4.0 * (2.0 * std::f64::consts::PI * (h % 24) as f64 / 24.0).cos()
}

#[test]
fn test_multi_year_history_uses_holt_winters() {
    let series = hourly_days("2025-12-30", 731, daily_profile);
    let result = generate_forecast(date("2025-12-30"), 7, &series);

    assert_eq!(result.metadata.tier, Tier::HoltWinters);
    assert_eq!(result.metadata.confidence, 95);
    assert_eq!(result.metadata.accuracy_stars, Some(5));
    assert_eq!(result.metadata.warning, None);
    assert!(result.metadata.data_availability.has_multi_year_cycle);
    assert_eq!(result.predictions.len(), 7);
    assert_eq!(result.predictions[0].date, date("2025-12-31"));
    for prediction in &result.predictions {
        assert_relative_eq!(prediction.value, 12.0, epsilon = 1e-6);
    }
}

#[test]
fn test_ten_days_use_moving_average() {
    let series = hourly_days("2025-12-30", 10, |h| (h % 17) as f64 * 0.5 + 2.0);
    let result = generate_forecast(date("2025-12-30"), 5, &series);

    let availability = &result.metadata.data_availability;
    assert!(availability.has_recent_7_days);
    assert!(!availability.has_recent_30_days);
    assert_eq!(result.metadata.tier, Tier::MovingAverage);
    assert_eq!(result.metadata.confidence, 50);

    let values = series.values_abs();
    let tail = &values[values.len() - 7 * 24..];
    let expected = tail.iter().sum::<f64>() / tail.len() as f64;

    assert_eq!(result.predictions.len(), 5);
    for prediction in &result.predictions {
        assert_relative_eq!(prediction.value, expected, epsilon = 1e-9);
    }
}

#[rstest]
#[case(1)]
#[case(14)]
#[case(30)]
fn test_empty_history_is_insufficient(#[case] horizon: usize) {
    let result = generate_forecast(date("2025-12-30"), horizon, &HistoricalSeries::new());

    assert_eq!(result.metadata.tier, Tier::InsufficientData);
    assert_eq!(result.metadata.confidence, 0);
    assert_eq!(result.metadata.accuracy_stars, None);
    assert!(result.metadata.warning.is_some());
    assert!(result.predictions.is_empty());
    assert!(result.is_insufficient());
}

#[test]
fn test_gap_is_reported_in_metadata() {
    let series: HistoricalSeries = hourly_days("2025-12-30", 10, |_| 1.0)
        .observations()
        .iter()
        .enumerate()
        .filter(|(i, _)| !(100..147).contains(i))
        .map(|(_, o)| *o)
        .collect();

    let result = generate_forecast(date("2025-12-30"), 3, &series);
    let periods = &result.metadata.data_availability.missing_periods;

    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].length_days, 2);
}

#[test]
fn test_month_of_history_uses_trend() {
    let series = hourly_days("2025-12-28", 35, |h| 50.0 + 0.01 * h as f64);
    let result = generate_forecast(date("2025-12-30"), 4, &series);

    assert_eq!(result.metadata.tier, Tier::TrendBased);
    assert_eq!(result.metadata.confidence, 65);
    // Dated from the last reading
    assert_eq!(result.predictions[0].date, date("2025-12-29"));
    assert!(result.predictions[1].value > result.predictions[0].value);
}

#[test]
fn test_year_and_month_uses_seasonal_weighted() {
    let series = hourly_days("2025-12-30", 400, |_| 7.0);
    let result = generate_forecast(date("2025-12-30"), 10, &series);

    assert_eq!(result.metadata.tier, Tier::SeasonalWeighted);
    assert_eq!(result.metadata.confidence, 80);
    assert_eq!(result.predictions.len(), 10);
    assert_eq!(result.predictions[0].date, date("2025-12-31"));
    for prediction in &result.predictions {
        assert_relative_eq!(prediction.value, 7.0, epsilon = 1e-9);
    }
}

#[rstest]
#[case(10)]
#[case(35)]
#[case(400)]
fn test_forecast_is_deterministic(#[case] days: i64) {
    let series = hourly_days("2025-12-30", days, |h| (h as f64 * 0.37).sin() * 3.0 + 9.0);

    let first = generate_forecast(date("2025-12-30"), 7, &series);
    let second = generate_forecast(date("2025-12-30"), 7, &series);

    assert_eq!(first, second);
    assert_eq!(first.predictions.len(), 7);
}

#[test]
fn test_json_output_shape() {
    let series = hourly_days("2025-12-30", 10, |_| 3.0);
    let result = generate_forecast(date("2025-12-30"), 2, &series);
    let json: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["predictions"][0]["date"], "2025-12-31");
    assert_eq!(json["predictions"][0]["value"], 3.0);
    assert_eq!(json["metadata"]["tier"], "MOVING_AVERAGE");
    assert_eq!(json["metadata"]["displayName"], "Moving Average");
    assert_eq!(json["metadata"]["confidence"], 50);
    assert_eq!(json["metadata"]["accuracyStars"], 2);
    assert!(json["metadata"]["warning"].is_string());

    let availability = &json["metadata"]["dataAvailability"];
    assert_eq!(availability["hasMultiYearCycle"], false);
    assert_eq!(availability["hasLastYearWindow"], false);
    assert_eq!(availability["hasRecent30Days"], false);
    assert_eq!(availability["hasRecent7Days"], true);
    assert_eq!(availability["completenessScore"], 100);
    assert_eq!(availability["missingPeriods"], Value::Array(Vec::new()));
    assert_eq!(availability["totalPoints"], 240);
}

#[test]
fn test_insufficient_json_has_null_stars() {
    let result = generate_forecast(date("2025-12-30"), 3, &HistoricalSeries::new());
    let json: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["metadata"]["tier"], "INSUFFICIENT_DATA");
    assert!(json["metadata"]["accuracyStars"].is_null());
    assert_eq!(json["predictions"], Value::Array(Vec::new()));
}

#[test]
fn test_forecast_points_from_wire_format() {
    let points: Vec<TimeSeriesPoint> = hourly_days("2025-12-30", 8, |_| -2.0).to_points();
    let forecaster = Forecaster::default();

    let result = forecaster.forecast_points("2025-12-30", 3, &points).unwrap();
    assert_eq!(result.metadata.tier, Tier::MovingAverage);
    assert!(result.predictions.iter().all(|p| p.value == 2.0));

    let result = forecaster.forecast_points("not-a-date", 3, &points);
    assert!(matches!(result, Err(ForecastError::InvalidDate(_))));

    let result = forecaster.forecast_points("-262143-01-02", 7, &points);
    assert!(matches!(result, Err(ForecastError::InvalidDate(_))));
}

#[test]
fn test_forecast_from_source() {
    // History older than the lookback window is not fetched
    let series = hourly_days("2025-12-30", 40, |_| 6.0);
    let source = InMemorySource::new(series);
    let config = EngineConfig {
        lookback_days: 9,
        ..EngineConfig::default()
    };
    let forecaster = Forecaster::new(config).unwrap();

    let result = forecaster
        .forecast_from_source(&source, date("2025-12-30"), 5)
        .unwrap();

    assert_eq!(result.metadata.data_availability.total_points, 240);
    assert_eq!(result.metadata.tier, Tier::MovingAverage);
    assert_eq!(result.predictions.len(), 5);
}

#[test]
fn test_forecast_from_source_near_earliest_date() {
    let source = InMemorySource::new(HistoricalSeries::new());
    let result = Forecaster::default().forecast_from_source(&source, NaiveDate::MIN, 3);

    assert!(matches!(result, Err(ForecastError::InvalidDate(_))));
}

#[test]
fn test_forecaster_rejects_invalid_config() {
    let mut config = EngineConfig::default();
    config.smoothing.alpha = 1.0;

    assert!(matches!(
        Forecaster::new(config),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_forecast_summary() {
    let series = hourly_days("2025-12-30", 10, |_| 3.0);
    let summary = generate_forecast(date("2025-12-30"), 4, &series).summary();

    assert_relative_eq!(summary.total, 12.0, epsilon = 1e-9);
    assert_relative_eq!(summary.peak, 3.0, epsilon = 1e-9);
    assert_relative_eq!(summary.average_per_day, 3.0, epsilon = 1e-9);
    assert_eq!(summary.days, 4);

    let empty = generate_forecast(date("2025-12-30"), 4, &HistoricalSeries::new()).summary();
    assert_eq!(empty.total, 0.0);
    assert_eq!(empty.days, 0);
}
