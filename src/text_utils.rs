use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses a post date into UTC.
///
/// Accepted forms:
/// - `2024-06-01`
/// - `2024-06-01 10:42`, `2024-06-01 10:42:32`, `2024-06-01T10:42:32.123`
/// - any RFC 3339 timestamp, e.g. `2024-06-01T10:42:32+02:00`
///
/// Dates without an offset are taken as UTC.
pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:\.(\d{1,9}))?)?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);
    let opt_u32 = |idx: usize| caps.get(idx).map_or(Ok(0), |m| to_u32(m.as_str()));

    let y: i32 = to_i32(&caps[1])?;
    let m: u32 = to_u32(&caps[2])?;
    let d: u32 = to_u32(&caps[3])?;
    let h: u32 = opt_u32(4)?;
    let mn: u32 = opt_u32(5)?;
    let s: u32 = opt_u32(6)?;
    let nanos: u32 = match caps.get(7) {
        // Right-pad the fraction so ".5" means 500ms
        Some(frac) => to_u32(&format!("{:0<9}", frac.as_str()))?,
        None => 0,
    };

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Invalid calendar date {}", buf))?;
    let time = NaiveTime::from_hms_nano_opt(h, mn, s, nanos)
        .ok_or_else(|| format!("Invalid time of day {}", buf))?;

    Ok(NaiveDateTime::new(date, time).and_utc())
}

/// RFC 822 date as used by RSS, always in GMT: `Mon, 01 Jan 2024 00:00:00 GMT`
pub fn format_rfc822(date_time: &DateTime<Utc>) -> String {
    date_time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// ISO 8601 with milliseconds and `Z`: `2024-01-01T00:00:00.000Z`
pub fn format_iso(date_time: &DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
