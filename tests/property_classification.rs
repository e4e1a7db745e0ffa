use aqi_dashboard::domain::air_quality::{
    AirQualityReading, CurrentReadings, HourlyReadings, HourlySample, SeverityTier, classify,
    derive_hourly_series, parse_datetime,
};
use chrono::{Duration, Utc};
use proptest::prelude::*;

fn reading_with_hours(hours: usize) -> AirQualityReading {
    let start = parse_datetime("2026-02-12T00:00").expect("fixture time");
    let samples = (0..hours)
        .map(|idx| HourlySample {
            time: start + Duration::hours(idx as i64),
            pm10: Some(idx as f64),
            pm2_5: Some(idx as f64 * 0.5),
            ozone: None,
        })
        .collect();
    AirQualityReading {
        current: CurrentReadings::default(),
        hourly: HourlyReadings::from_samples(samples),
        fetched_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn classification_is_monotonic(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_tier = classify(low).expect("non-negative index");
        let high_tier = classify(high).expect("non-negative index");
        prop_assert!(low_tier <= high_tier);
    }

    #[test]
    fn tier_bounds_contain_the_index(index in 0.0f64..1000.0) {
        let tier = classify(index).expect("non-negative index");
        if let Some(upper) = tier.upper_bound() {
            prop_assert!(index <= upper);
        }
        let position = SeverityTier::ALL.iter().position(|t| *t == tier).expect("known tier");
        if position > 0 {
            let previous = SeverityTier::ALL[position - 1]
                .upper_bound()
                .expect("lower tiers are bounded");
            prop_assert!(index > previous);
        }
    }

    #[test]
    fn negative_indices_are_rejected(index in -1000.0f64..-0.0001) {
        prop_assert!(classify(index).is_err());
    }

    #[test]
    fn trend_never_exceeds_limit(hours in 0usize..120, limit in 0usize..100) {
        let reading = reading_with_hours(hours);
        let series = derive_hourly_series(&reading, limit);
        prop_assert_eq!(series.len(), hours.min(limit));
        prop_assert!(series.windows(2).all(|pair| pair[0].time < pair[1].time));
    }
}
