//! Norwegian relative-time labels for history entries.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "des",
];

/// Label for an entry created at `created_at`, as seen at `now`.
///
/// Under a minute is "Nettopp", then minutes, hours and days; after a week
/// the date is shown as e.g. "3. mar" in the local time zone.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    time_ago_in(created_at, now, &Local)
}

/// [`time_ago`] with the calendar date taken in `tz`.
pub fn time_ago_in<Tz: TimeZone>(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    match seconds {
        s if s < 60 => "Nettopp".to_string(),
        s if s < 3_600 => format!("{} min siden", s / 60),
        s if s < 86_400 => format!("{} t siden", s / 3_600),
        s if s < 604_800 => format!("{} d siden", s / 86_400),
        _ => {
            let local = created_at.with_timezone(tz);
            format!("{}. {}", local.day(), MONTHS[local.month0() as usize])
        }
    }
}
