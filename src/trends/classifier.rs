// Target/control classification.
//
// A posting belongs to the target corpus when it was published within the
// lookback window and, if a location filter is given, lists that exact
// location. Everything else is baseline.

use chrono::{DateTime, TimeDelta, Utc};

use crate::muse::models::Job;

/// Decide target-corpus membership against the current time.
pub fn is_target(job: &Job, window_days: u32, location_filter: Option<&str>) -> bool {
    is_target_at(job, window_days, location_filter, Utc::now())
}

/// Same as [`is_target`] with an explicit clock.
///
/// The window edge is exclusive: a posting whose publication date plus the
/// window lands exactly on `now` is not recent.
pub fn is_target_at(
    job: &Job,
    window_days: u32,
    location_filter: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    let window = TimeDelta::days(i64::from(window_days));
    let recent = match job.publication_date.checked_add_signed(window) {
        Some(edge) => edge > now,
        // Beyond the representable range, so certainly after now
        None => true,
    };

    if !recent {
        return false;
    }

    match location_filter {
        Some(wanted) if !wanted.is_empty() => job.locations.iter().any(|loc| loc.name == wanted),
        _ => true,
    }
}
