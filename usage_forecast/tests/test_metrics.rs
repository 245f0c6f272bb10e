use approx::assert_relative_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use usage_forecast::data::{HistoricalSeries, Observation};
use usage_forecast::metrics::{evaluate_forecast, forecast_accuracy};
use usage_forecast::{DailyPrediction, ForecastError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let accuracy = forecast_accuracy(&predicted, &actual).unwrap();

    assert_relative_eq!(accuracy.mae, 2.4, epsilon = 1e-9);
    assert_relative_eq!(accuracy.mse, 6.0, epsilon = 1e-9);
    assert_relative_eq!(accuracy.rmse, 6.0_f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(accuracy.mape, 10.3, epsilon = 1e-9);

    let expected_smape = [(2.0, 22.0), (2.0, 38.0), (3.0, 63.0), (3.0, 77.0), (2.0, 102.0)]
        .iter()
        .map(|(e, d)| 200.0 * e / d)
        .sum::<f64>()
        / 5.0;
    assert_relative_eq!(accuracy.smape, expected_smape, epsilon = 1e-9);
    assert_eq!(accuracy.matched_days, 5);
}

#[test]
fn test_perfect_forecast() {
    let values = vec![3.0, 0.0, 7.5];
    let accuracy = forecast_accuracy(&values, &values).unwrap();

    assert_eq!(accuracy.mae, 0.0);
    assert_eq!(accuracy.rmse, 0.0);
    assert_eq!(accuracy.mape, 0.0);
    assert_eq!(accuracy.smape, 0.0);
}

#[test]
fn test_mape_skips_zero_actuals() {
    let accuracy = forecast_accuracy(&[1.0, 12.0], &[0.0, 10.0]).unwrap();

    assert_relative_eq!(accuracy.mape, 20.0, epsilon = 1e-9);
    assert_relative_eq!(accuracy.mae, 1.5, epsilon = 1e-9);
}

#[test]
fn test_invalid_metric_inputs() {
    assert!(matches!(
        forecast_accuracy(&[1.0, 2.0], &[1.0]),
        Err(ForecastError::ValidationError(_))
    ));
    assert!(matches!(
        forecast_accuracy(&[], &[]),
        Err(ForecastError::ValidationError(_))
    ));
}

#[test]
fn test_evaluate_against_observed_days() {
    let at = |s: &str| {
        NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(s[11..].parse().unwrap(), 0, 0)
            .unwrap()
    };
    let actual = HistoricalSeries::from_observations(vec![
        Observation::new(at("2025-12-31 08"), 4.0),
        Observation::new(at("2025-12-31 20"), 6.0),
        Observation::new(at("2026-01-01 09"), -8.0),
    ]);
    let predictions = vec![
        DailyPrediction::new(date("2025-12-31"), 5.0),
        DailyPrediction::new(date("2026-01-01"), 6.0),
        DailyPrediction::new(date("2026-01-02"), 7.0),
    ];

    let accuracy = evaluate_forecast(&predictions, &actual).unwrap();

    assert_eq!(accuracy.matched_days, 2);
    assert_relative_eq!(accuracy.mae, 1.0, epsilon = 1e-9);
    assert_relative_eq!(accuracy.mape, 12.5, epsilon = 1e-9);
}

#[test]
fn test_evaluate_without_overlap() {
    let actual = HistoricalSeries::from_observations(vec![Observation::new(
        date("2025-06-01").and_hms_opt(0, 0, 0).unwrap(),
        1.0,
    )]);
    let predictions = vec![DailyPrediction::new(date("2025-12-31"), 5.0)];

    assert!(matches!(
        evaluate_forecast(&predictions, &actual),
        Err(ForecastError::ValidationError(_))
    ));
}

#[test]
fn test_accuracy_display() {
    let accuracy = forecast_accuracy(&[2.0], &[4.0]).unwrap();
    let text = accuracy.to_string();

    assert!(text.contains("1 days"));
    assert!(text.contains("MAE:   2.0000"));
    assert!(text.contains("MAPE:  50.0000%"));
}
