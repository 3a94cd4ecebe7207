// File: crates/chart-advisor/src/aggregate.rs
// Summary: Calendar bucketing (daily/weekly/monthly) that reduces each bucket to its mean.
// Notes:
// - Output order is the order in which buckets are first seen, not
//   chronological order. Unsorted input yields unsorted output.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use crate::observation::{Observation, AGGREGATED_CATEGORY};
use crate::types::{CalendarZone, Granularity};

/// Calendar key of a bucket. Daily and weekly keys carry a day; monthly keys do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub year: i32,
    pub month: u32,
    pub day: Option<u32>,
}

struct Bucket {
    first_at: DateTime<Utc>,
    first_date: NaiveDate,
    sum: f64,
    count: usize,
}

/// Aggregate using the host's local calendar.
pub fn aggregate(observations: &[Observation], granularity: Granularity) -> Vec<Observation> {
    aggregate_in(observations, granularity, &Local)
}

pub fn aggregate_with_zone(observations: &[Observation], granularity: Granularity, zone: CalendarZone) -> Vec<Observation> {
    match zone {
        CalendarZone::Local => aggregate_in(observations, granularity, &Local),
        CalendarZone::Utc => aggregate_in(observations, granularity, &Utc),
    }
}

/// Aggregate using the calendar of `tz`.
pub fn aggregate_in<Tz: TimeZone>(observations: &[Observation], granularity: Granularity, tz: &Tz) -> Vec<Observation> {
    if granularity == Granularity::None {
        return observations.to_vec();
    }

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<BucketKey, usize> = HashMap::new();

    for obs in observations {
        let date = obs.timestamp.with_timezone(tz).date_naive();
        let key = bucket_key(date, granularity);
        match index.get(&key) {
            Some(&i) => {
                buckets[i].sum += obs.value;
                buckets[i].count += 1;
            }
            None => {
                index.insert(key, buckets.len());
                buckets.push(Bucket { first_at: obs.timestamp, first_date: date, sum: obs.value, count: 1 });
            }
        }
    }

    buckets
        .into_iter()
        .map(|b| Observation {
            timestamp: b.first_at,
            value: b.sum / b.count as f64,
            category: Some(AGGREGATED_CATEGORY.to_string()),
            label: Some(bucket_label(&b, granularity)),
        })
        .collect()
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Bucket key for a calendar date. `Granularity::None` keys by day.
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> BucketKey {
    match granularity {
        Granularity::Monthly => BucketKey { year: date.year(), month: date.month(), day: None },
        Granularity::Weekly => {
            let start = week_start(date);
            BucketKey { year: start.year(), month: start.month(), day: Some(start.day()) }
        }
        Granularity::Daily | Granularity::None => BucketKey { year: date.year(), month: date.month(), day: Some(date.day()) },
    }
}

fn bucket_label(bucket: &Bucket, granularity: Granularity) -> String {
    match granularity {
        Granularity::Weekly => format!("Week of {}", short_date(week_start(bucket.first_date))),
        Granularity::Monthly => bucket.first_date.format("%B %Y").to_string(),
        Granularity::Daily | Granularity::None => short_date(bucket.first_date),
    }
}

fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
