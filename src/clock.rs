use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use time::{
    Date, Duration, OffsetDateTime, UtcOffset, format_description::FormatItem,
    macros::format_description, macros::offset,
};

/// Asia/Tehran. Iran has kept a fixed offset since it dropped DST in 2022.
pub const TEHRAN_OFFSET: UtcOffset = offset!(+3:30);

const ISO_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const EN_GB_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year], [hour]:[minute]:[second]");
const OFFSET_FORMAT: &[FormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Arc<Mutex<OffsetDateTime>>,
}

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockLocale {
    /// Solar Hijri calendar with Persian digits.
    #[default]
    FaIr,
    EnGb,
    Iso,
}

impl FromStr for ClockLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fa-ir" | "fa" => Ok(ClockLocale::FaIr),
            "en-gb" | "en" => Ok(ClockLocale::EnGb),
            "iso" => Ok(ClockLocale::Iso),
            other => Err(format!("unsupported clock locale '{other}'")),
        }
    }
}

impl fmt::Display for ClockLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClockLocale::FaIr => "fa-IR",
            ClockLocale::EnGb => "en-GB",
            ClockLocale::Iso => "iso",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockSettings {
    pub offset: UtcOffset,
    pub locale: ClockLocale,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            offset: TEHRAN_OFFSET,
            locale: ClockLocale::FaIr,
        }
    }
}

pub fn parse_offset(raw: &str) -> Result<UtcOffset, time::error::Parse> {
    UtcOffset::parse(raw.trim(), OFFSET_FORMAT)
}

/// Render `now` as wall-clock time at the configured offset, 24-hour, with a
/// four-digit year and two-digit remaining fields.
pub fn format_clock_string(now: OffsetDateTime, settings: &ClockSettings) -> String {
    let local = now.to_offset(settings.offset);
    match settings.locale {
        ClockLocale::FaIr => {
            let (year, month, day) = gregorian_to_jalali(local.date());
            let latin = format!(
                "{year:04}/{month:02}/{day:02}, {:02}:{:02}:{:02}",
                local.hour(),
                local.minute(),
                local.second()
            );
            to_persian_digits(&latin)
        }
        ClockLocale::EnGb => local.format(EN_GB_FORMAT).unwrap_or_default(),
        ClockLocale::Iso => local.format(ISO_FORMAT).unwrap_or_default(),
    }
}

/// Calendar year at the viewer's local offset, UTC when that is unknown.
pub fn local_year(now: OffsetDateTime) -> i32 {
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset).year(),
        Err(_) => now.year(),
    }
}

/// Convert a Gregorian date to the Solar Hijri (Jalali) calendar.
pub fn gregorian_to_jalali(date: Date) -> (i32, u8, u8) {
    const MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy = i64::from(date.year());
    let gm = u8::from(date.month()) as usize;
    let gd = i64::from(date.day());

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
        + gd
        + MONTH_OFFSETS[gm - 1];

    let mut jy = -1595 + 33 * (days / 12_053);
    days %= 12_053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    (jy as i32, jm as u8, jd as u8)
}

fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x06F0 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_jalali_new_year() {
        assert_eq!(gregorian_to_jalali(date!(2024 - 03 - 20)), (1403, 1, 1));
        assert_eq!(gregorian_to_jalali(date!(2024 - 03 - 19)), (1402, 12, 29));
        assert_eq!(gregorian_to_jalali(date!(2025 - 03 - 21)), (1404, 1, 1));
    }

    #[test]
    fn test_jalali_second_half_of_year() {
        assert_eq!(gregorian_to_jalali(date!(2024 - 11 - 17)), (1403, 8, 27));
        assert_eq!(gregorian_to_jalali(date!(2023 - 12 - 31)), (1402, 10, 10));
    }

    #[test]
    fn test_persian_format() {
        let now = datetime!(2024-11-17 10:53:05 UTC);
        let text = format_clock_string(now, &ClockSettings::default());
        assert_eq!(text, "۱۴۰۳/۰۸/۲۷, ۱۴:۲۳:۰۵");
    }

    #[test]
    fn test_fixed_offset_crosses_midnight() {
        let now = datetime!(2024-03-19 21:00:00 UTC);
        let settings = ClockSettings {
            offset: TEHRAN_OFFSET,
            locale: ClockLocale::Iso,
        };
        assert_eq!(format_clock_string(now, &settings), "2024-03-20 00:30:00");
    }

    #[test]
    fn test_input_offset_does_not_matter() {
        let utc = datetime!(2024-11-17 10:53:05 UTC);
        let elsewhere = utc.to_offset(offset!(-8));
        let settings = ClockSettings {
            offset: TEHRAN_OFFSET,
            locale: ClockLocale::EnGb,
        };
        assert_eq!(
            format_clock_string(elsewhere, &settings),
            format_clock_string(utc, &settings)
        );
        assert_eq!(format_clock_string(utc, &settings), "17/11/2024, 14:23:05");
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+03:30").unwrap(), TEHRAN_OFFSET);
        assert_eq!(parse_offset("-05:00").unwrap(), offset!(-5));
        assert!(parse_offset("tehran").is_err());
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("fa-IR".parse::<ClockLocale>().unwrap(), ClockLocale::FaIr);
        assert_eq!("EN-gb".parse::<ClockLocale>().unwrap(), ClockLocale::EnGb);
        assert!("de-DE".parse::<ClockLocale>().is_err());
    }

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(datetime!(2024-01-01 00:00:00 UTC));
        let shared = clock.clone();
        clock.advance(Duration::seconds(90));
        assert_eq!(shared.now(), datetime!(2024-01-01 00:01:30 UTC));
    }
}
