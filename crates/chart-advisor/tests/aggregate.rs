// File: crates/chart-advisor/tests/aggregate.rs
// Purpose: Calendar bucketing, bucket means, labels and output order.

use chart_advisor::aggregate::{bucket_key, week_start};
use chart_advisor::{aggregate_in, aggregate_with_zone, CalendarZone, Granularity, Observation, AGGREGATED_CATEGORY};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, value: f64) -> Observation {
    Observation::new(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(), value)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn empty_input_gives_empty_output() {
    for g in [Granularity::None, Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
        assert!(aggregate_in(&[], g, &Utc).is_empty());
    }
}

#[test]
fn none_is_pass_through() {
    let obs = vec![at(2024, 1, 1, 0, 1.0).with_label("raw"), at(2024, 1, 1, 1, 2.0)];
    assert_eq!(aggregate_in(&obs, Granularity::None, &Utc), obs);
}

#[test]
fn daily_one_point_per_day_keeps_values() {
    let obs = vec![at(2024, 1, 1, 9, 4.0), at(2024, 1, 2, 9, 7.5), at(2024, 1, 3, 9, -2.0)];
    let out = aggregate_in(&obs, Granularity::Daily, &Utc);
    assert_eq!(out.len(), obs.len());
    for (a, b) in out.iter().zip(&obs) {
        assert_eq!(a.value, b.value);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.category.as_deref(), Some(AGGREGATED_CATEGORY));
        assert!(a.is_aggregate());
    }
    assert_eq!(out[0].label.as_deref(), Some("1/1/2024"));
}

#[test]
fn daily_reduces_to_mean_and_keeps_first_timestamp() {
    let obs = vec![at(2024, 5, 20, 8, 1.0), at(2024, 5, 20, 12, 2.0), at(2024, 5, 20, 23, 6.0)];
    let out = aggregate_in(&obs, Granularity::Daily, &Utc);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].value, 3.0);
    assert_eq!(out[0].timestamp, obs[0].timestamp);
}

#[test]
fn input_is_left_untouched() {
    let obs = vec![at(2024, 5, 20, 8, 1.0), at(2024, 5, 20, 12, 2.0)];
    let before = obs.clone();
    let _ = aggregate_in(&obs, Granularity::Monthly, &Utc);
    assert_eq!(obs, before);
}

#[test]
fn monthly_mean_of_two_days() {
    let obs = vec![at(2024, 1, 3, 0, 10.0), at(2024, 1, 28, 0, 20.0)];
    let out = aggregate_in(&obs, Granularity::Monthly, &Utc);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].value, 15.0);
    assert_eq!(out[0].label.as_deref(), Some("January 2024"));
}

#[test]
fn weekly_uses_sunday_start() {
    // Tue 2024-10-01 and Sat 2024-10-05 share the week of Sun 2024-09-29;
    // Mon 2024-10-07 starts a new week on Sun 2024-10-06.
    let obs = vec![at(2024, 10, 1, 12, 2.0), at(2024, 10, 5, 12, 4.0), at(2024, 10, 7, 12, 9.0)];
    let out = aggregate_in(&obs, Granularity::Weekly, &Utc);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].value, 3.0);
    assert_eq!(out[0].label.as_deref(), Some("Week of 9/29/2024"));
    assert_eq!(out[1].value, 9.0);
    assert_eq!(out[1].label.as_deref(), Some("Week of 10/6/2024"));
}

#[test]
fn weekly_key_crosses_year_boundary() {
    assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 29));
    let wed = bucket_key(date(2025, 1, 1), Granularity::Weekly);
    let mon = bucket_key(date(2024, 12, 30), Granularity::Weekly);
    assert_eq!(wed, mon);
    assert_eq!((wed.year, wed.month, wed.day), (2024, 12, Some(29)));

    let obs = vec![at(2025, 1, 1, 12, 5.0), at(2024, 12, 30, 12, 7.0)];
    let out = aggregate_in(&obs, Granularity::Weekly, &Utc);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].value, 6.0);
    assert_eq!(out[0].timestamp, obs[0].timestamp);
    assert_eq!(out[0].label.as_deref(), Some("Week of 12/29/2024"));
}

#[test]
fn sunday_starts_its_own_week() {
    assert_eq!(week_start(date(2024, 9, 29)), date(2024, 9, 29));
}

#[test]
fn buckets_keep_first_seen_order() {
    let obs = vec![at(2024, 3, 10, 0, 1.0), at(2024, 1, 10, 0, 2.0), at(2024, 3, 11, 0, 3.0), at(2024, 2, 1, 0, 4.0)];
    let out = aggregate_in(&obs, Granularity::Monthly, &Utc);
    let labels: Vec<&str> = out.iter().filter_map(|o| o.label.as_deref()).collect();
    assert_eq!(labels, vec!["March 2024", "January 2024", "February 2024"]);
    assert_eq!(out[0].value, 2.0);
}

#[test]
fn calendar_follows_the_given_zone() {
    // 2024-06-30 23:30 UTC is already July 1st at UTC+2
    let late: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 6, 30, 23, 30, 0).unwrap();
    let obs = vec![Observation::new(late, 1.0)];
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let utc = aggregate_with_zone(&obs, Granularity::Monthly, CalendarZone::Utc);
    let shifted = aggregate_in(&obs, Granularity::Monthly, &plus_two);
    assert_eq!(utc[0].label.as_deref(), Some("June 2024"));
    assert_eq!(shifted[0].label.as_deref(), Some("July 2024"));
    assert_eq!(shifted[0].timestamp, late);
}
