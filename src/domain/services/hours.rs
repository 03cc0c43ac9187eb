use crate::domain::models::hours::OpeningInterval;
use crate::domain::models::slot::parse_slot_time;
use crate::domain::ports::OpeningHoursRepository;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::sync::Arc;
use tracing::warn;

/// Hours substituted when the store is unreachable. Availability over
/// correctness: customers keep a usable slot list, and the warning below
/// is the operator's cue that it may not reflect reality.
fn fallback_interval() -> OpeningInterval {
    OpeningInterval {
        open: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        close: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        slot_number: 0,
    }
}

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[derive(Clone)]
pub struct OpeningHoursResolver {
    repo: Arc<dyn OpeningHoursRepository>,
}

impl OpeningHoursResolver {
    pub fn new(repo: Arc<dyn OpeningHoursRepository>) -> Self {
        Self { repo }
    }

    /// Resolves the open intervals applying on `date`'s weekday. Closed
    /// days and unconfigured restaurants yield an empty list. Rows with
    /// unparseable times or `open >= close` are skipped, not propagated.
    pub async fn intervals_for(&self, restaurant_id: &str, date: NaiveDate) -> Vec<OpeningInterval> {
        let rows = match super::fetch_with_retry("opening hours", || {
            self.repo.weekly_hours(restaurant_id)
        })
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                let fallback = fallback_interval();
                warn!(
                    restaurant = restaurant_id,
                    "opening hours unavailable, falling back to {}-{}: {}",
                    fallback.open, fallback.close, e
                );
                return vec![fallback];
            }
        };

        let key = weekday_key(date.weekday());
        let mut intervals: Vec<OpeningInterval> = rows
            .iter()
            .filter(|r| r.is_open && r.day == key)
            .filter_map(|r| {
                let open = parse_slot_time(&r.open_time);
                let close = parse_slot_time(&r.close_time);
                match (open, close) {
                    (Some(open), Some(close)) if open < close => Some(OpeningInterval {
                        open,
                        close,
                        slot_number: r.slot_number,
                    }),
                    _ => {
                        warn!(
                            restaurant = restaurant_id,
                            day = key,
                            "skipping invalid hours row {}-{}",
                            r.open_time,
                            r.close_time
                        );
                        None
                    }
                }
            })
            .collect();

        intervals.sort_by_key(|i| (i.slot_number, i.open));
        intervals
    }
}
