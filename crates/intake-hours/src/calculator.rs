// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business-hours verdict computation.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use intake_core::types::BusinessHours;

/// Result of evaluating a business-hours config against an instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HoursVerdict {
    /// Whether `now` falls inside the configured window.
    pub in_window: bool,
    /// Next instant the window opens, when currently closed.
    pub next_window_start: Option<DateTime<Utc>>,
    /// Human-readable reason for the verdict. Degenerate configs carry an
    /// explanation here so callers can log the warning.
    pub reason: &'static str,
}

impl HoursVerdict {
    fn open(reason: &'static str) -> Self {
        Self {
            in_window: true,
            next_window_start: None,
            reason,
        }
    }
}

/// Evaluate a business-hours config at a given instant.
///
/// - Absent config means always-open.
/// - The window is inclusive on both bounds: `[start, end]`.
/// - When closed, `next_window_start` is the opening instant of the nearest
///   configured day (circular search, 1-7 days ahead).
/// - Degenerate configs (empty day set, inverted `start > end`) are treated
///   as always-open: invalid configuration must never block the pipeline.
pub fn evaluate(config: Option<&BusinessHours>, now: DateTime<Utc>) -> HoursVerdict {
    let Some(hours) = config else {
        return HoursVerdict::open("no business hours configured");
    };

    if hours.days.is_empty() {
        return HoursVerdict::open("empty day set, treated as always open");
    }
    if hours.start > hours.end {
        return HoursVerdict::open("inverted window, treated as always open");
    }

    let local = now.with_timezone(&hours.timezone);
    let weekday = local.weekday().num_days_from_sunday() as u8;
    let time = local.time();

    let today_configured = hours.days.contains(&weekday);
    if today_configured && time >= hours.start && time <= hours.end {
        return HoursVerdict {
            in_window: true,
            next_window_start: None,
            reason: "within business hours",
        };
    }

    let next = if today_configured && time < hours.start {
        // Opens later today.
        resolve_local(&hours.timezone, local.date_naive().and_time(hours.start))
    } else {
        next_configured_day_start(hours, &local)
    };

    HoursVerdict {
        in_window: false,
        next_window_start: Some(next.with_timezone(&Utc)),
        reason: if today_configured {
            "outside business hours"
        } else {
            "not a business day"
        },
    }
}

/// Opening instant on the nearest configured day strictly after `local`'s date.
fn next_configured_day_start(hours: &BusinessHours, local: &DateTime<Tz>) -> DateTime<Tz> {
    let weekday = local.weekday().num_days_from_sunday() as u8;
    // days is non-empty, so some offset in 1..=7 always matches.
    let offset = (1..=7)
        .find(|off| hours.days.contains(&((weekday + off) % 7)))
        .unwrap_or(7);
    let date = local.date_naive() + Duration::days(i64::from(offset));
    resolve_local(&hours.timezone, date.and_time(hours.start))
}

/// Resolve a local wall-clock datetime to an instant in the timezone.
///
/// Ambiguous times (DST fold) take the earlier instant. Nonexistent times
/// (DST gap) shift forward one hour; the final fallback interprets the naive
/// time as UTC so the function never panics.
fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt,
        None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(tz)),
    }
}
