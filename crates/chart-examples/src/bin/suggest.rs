// File: crates/chart-examples/src/bin/suggest.rs
// Summary: Minimal example that ranks chart types for a small in-memory series and buckets it by week.

use chart_advisor::{aggregate_with_zone, suggest_chart_types, CalendarZone, Granularity, Observation};
use chrono::{Duration, TimeZone, Utc};

fn main() {
    // Two weeks of daily signups across three regions
    let t0 = Utc.with_ymd_and_hms(2024, 9, 25, 9, 0, 0).unwrap();
    let regions = ["eu", "us", "apac"];
    let data: Vec<Observation> = (0..14)
        .map(|i| {
            Observation::new(t0 + Duration::days(i), 20.0 + i as f64 * 1.5)
                .with_category(regions[i as usize % regions.len()])
        })
        .collect();

    for s in suggest_chart_types(&data) {
        println!("{:<8} {:>3}  {}", s.chart_type, s.confidence, s.reason);
    }

    for week in aggregate_with_zone(&data, Granularity::Weekly, CalendarZone::Utc) {
        println!("{:<22} {:>8.2}", week.label.unwrap_or_default(), week.value);
    }
}
