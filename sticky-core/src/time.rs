//! Timezone resolution and local day keys.

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;

/// Resolve an IANA timezone name like "America/Chicago".
pub fn resolve_tz(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

/// Calendar-date key (`YYYY-MM-DD`) used to group history, in local time.
pub fn day_key(local: DateTime<Tz>) -> String {
    local.format("%Y-%m-%d").to_string()
}
