use time::{Duration, UtcDateTime};

/// `time` with its sub-second part dropped, the precision creation times
/// are stored at.
#[must_use]
pub fn whole_seconds(time: UtcDateTime) -> UtcDateTime {
    time - Duration::nanoseconds(i64::from(time.nanosecond()))
}

/// Short relative label for a creation time, such as "3h ago".
///
/// Times in the future are treated as "just now".
#[must_use]
pub fn format_age(created_at: UtcDateTime, now: UtcDateTime) -> String {
    let age = now - created_at;

    if age.whole_minutes() < 1 {
        "just now".to_owned()
    } else if age.whole_hours() < 1 {
        format!("{}m ago", age.whole_minutes())
    } else if age.whole_days() < 1 {
        format!("{}h ago", age.whole_hours())
    } else {
        format!("{}d ago", age.whole_days())
    }
}
