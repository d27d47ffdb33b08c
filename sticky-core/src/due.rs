//! Natural-language due phrases -> absolute local timestamps.
//!
//! Ordered pattern attempts, first match wins. The order is load-bearing:
//! a bare "tomorrow" must be tried before the "today"/"at" rules so that
//! "finish it tomorrow by 6pm"-style text resolves against the earlier rule
//! that matched, exactly as the rule chain is written.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use regex::{Captures, Regex};

static IN_ONE_MINUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin\s+(a|one|1)\s*(m|min|minute)\b").expect("static pattern"));

static IN_N_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bin\s+(\d+)\s*(m|mins|min|minute|minutes|h|hr|hour|hours)\b")
        .expect("static pattern")
});

static TOMORROW_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btomorrow\b(?:\s+at\s+)?\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
        .expect("static pattern")
});

static TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btomorrow\b").expect("static pattern"));

static TODAY_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btoday\b(?:\s+at\s+)?\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
        .expect("static pattern")
});

static TODAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\btoday\b").expect("static pattern"));

static AT_OR_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:at|by)\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b").expect("static pattern")
});

/// 12h -> 24h: hour mod 12, +12 when pm. `default_pm` applies when the text
/// carries no meridiem: "tomorrow" phrases default to am, "today"/"at"
/// phrases to pm.
fn hour24(hour12: u32, meridiem: Option<&str>, default_pm: bool) -> u32 {
    let pm = meridiem.map_or(default_pm, |m| m == "pm");
    let h = hour12 % 12;
    if pm { h + 12 } else { h }
}

fn clock_captures(caps: &Captures<'_>, default_pm: bool) -> Option<(u32, u32)> {
    let hour12: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some((hour24(hour12, caps.get(3).map(|m| m.as_str()), default_pm), minute))
}

/// Resolve a local wall-clock time; a DST gap falls through to the earliest
/// valid instant rather than failing.
fn at_local(date: NaiveDate, hour: u32, minute: u32, tz: Tz) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    tz.from_local_datetime(&date.and_time(time)).earliest()
}

/// Extract an absolute due time from free-form task text.
///
/// Never fails: unmatched or unrepresentable phrases yield `None`. Relative
/// offsets count from `now`; wall-clock phrases resolve in `now`'s timezone.
pub fn parse_due(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let lowered = text.to_lowercase();
    let s = lowered.trim();
    let tz = now.timezone();

    // "in a minute" / "in 1 m"
    if IN_ONE_MINUTE.is_match(s) {
        return now.checked_add_signed(Duration::seconds(60));
    }

    // "in 5 minutes" / "in 2 hours"
    if let Some(caps) = IN_N_UNITS.captures(s) {
        let n: i64 = caps[1].parse().ok()?;
        let delta = if caps[2].starts_with('h') {
            Duration::try_hours(n)?
        } else {
            Duration::try_minutes(n)?
        };
        return now.checked_add_signed(delta);
    }

    // "tomorrow 9am" / "tomorrow at 9:30"
    if let Some(caps) = TOMORROW_AT.captures(s) {
        let (hour, minute) = clock_captures(&caps, false)?;
        return at_local(now.date_naive().succ_opt()?, hour, minute, tz);
    }
    if TOMORROW.is_match(s) {
        return at_local(now.date_naive().succ_opt()?, 9, 0, tz);
    }

    // "today 10:35" / "today at 7pm"
    if let Some(caps) = TODAY_AT.captures(s) {
        let (hour, minute) = clock_captures(&caps, true)?;
        return at_local(now.date_naive(), hour, minute, tz);
    }
    if TODAY.is_match(s) {
        return at_local(now.date_naive(), 18, 0, tz);
    }

    // "at 6pm" / "by 6"
    if let Some(caps) = AT_OR_BY.captures(s) {
        let (hour, minute) = clock_captures(&caps, true)?;
        return at_local(now.date_naive(), hour, minute, tz);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Chicago;

    fn base_now() -> DateTime<Tz> {
        // A plain Thursday morning, no DST edge.
        Chicago.with_ymd_and_hms(2026, 2, 19, 8, 0, 0).unwrap()
    }

    #[test]
    fn in_a_minute() {
        let now = base_now();
        assert_eq!(parse_due("ping me in a minute", now), Some(now + Duration::seconds(60)));
        assert_eq!(parse_due("ping me in 1 m", now), Some(now + Duration::seconds(60)));
    }

    #[test]
    fn relative_minutes_and_hours() {
        let now = base_now();
        assert_eq!(
            parse_due("call boss in 5 minutes", now),
            Some(now + Duration::minutes(5))
        );
        assert_eq!(parse_due("review deck in 2 hours", now), Some(now + Duration::hours(2)));
        assert_eq!(parse_due("stretch in 10 min", now), Some(now + Duration::minutes(10)));
    }

    #[test]
    fn tomorrow_with_time_defaults_to_am() {
        let due = parse_due("pay rent tomorrow at 9", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap());
    }

    #[test]
    fn tomorrow_explicit_pm() {
        let due = parse_due("submit report tomorrow 4:30pm", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 20, 16, 30, 0).unwrap());
    }

    #[test]
    fn bare_tomorrow_is_nine_am() {
        let due = parse_due("water the plants tomorrow", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap());
    }

    /// "today" without a meridiem defaults to pm, unlike "tomorrow".
    #[test]
    fn today_with_time_defaults_to_pm() {
        let due = parse_due("standup notes today at 5", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 19, 17, 0, 0).unwrap());
    }

    #[test]
    fn bare_today_is_six_pm() {
        let due = parse_due("buy milk today", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 19, 18, 0, 0).unwrap());
    }

    #[test]
    fn at_or_by_clock_time() {
        let due = parse_due("ping client by 6pm", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 19, 18, 0, 0).unwrap());

        let due = parse_due("gym at 7:15", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 19, 19, 15, 0).unwrap());
    }

    #[test]
    fn twelve_hour_conversion_edges() {
        let due = parse_due("sleep at 12am", base_now()).unwrap();
        assert_eq!(due.hour(), 0);

        let due = parse_due("lunch at 12pm", base_now()).unwrap();
        assert_eq!(due.hour(), 12);
    }

    #[test]
    fn no_date_words_means_none() {
        assert!(parse_due("no date words here", base_now()).is_none());
        assert!(parse_due("", base_now()).is_none());
    }

    /// An earlier rule that matches wins even when a later one also would.
    #[test]
    fn rule_order_prefers_relative_offset() {
        let now = base_now();
        assert_eq!(
            parse_due("in 30 minutes call about the visa today", now),
            Some(now + Duration::minutes(30))
        );
    }

    /// "tomorrow <words> at 6pm" has no digits right after "tomorrow", so the
    /// bare-tomorrow rule fires before the at/by rule is ever consulted.
    #[test]
    fn bare_tomorrow_shadows_later_clock_rule() {
        let due = parse_due("finish it tomorrow by 6pm", base_now()).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap());
    }

    #[test]
    fn month_rollover() {
        let now = Chicago.with_ymd_and_hms(2026, 1, 31, 22, 0, 0).unwrap();
        let due = parse_due("dentist tomorrow 8am", now).unwrap();
        assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap());
    }
}
