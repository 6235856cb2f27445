//! Date formatting collaborator.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats timestamps with PHP-style date patterns (`H:i`, `l, d F Y`).
pub trait DateFormatter {
    fn format_date(&self, timestamp: DateTime<Utc>, pattern: &str) -> String;
}

/// `chrono`-backed formatter rendering in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoDateFormatter {
    offset: FixedOffset,
}

impl ChronoDateFormatter {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Returns `None` when the offset is out of range (±24h).
    pub fn with_offset_seconds(seconds_east: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds_east).map(|offset| Self { offset })
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format_date(&self, timestamp: DateTime<Utc>, pattern: &str) -> String {
        let local = timestamp.with_timezone(&self.offset);
        local.format(&php_pattern_to_strftime(pattern)).to_string()
    }
}

/// Converts a PHP `date()` pattern into a `strftime` pattern.
///
/// Unsupported letters are emitted literally; `\` escapes the next char.
pub fn php_pattern_to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let specifier = match c {
            'd' => "%d",
            'D' => "%a",
            'j' => "%-d",
            'l' => "%A",
            'N' => "%u",
            'w' => "%w",
            'F' => "%B",
            'm' => "%m",
            'M' => "%b",
            'n' => "%-m",
            'Y' => "%Y",
            'y' => "%y",
            'a' => "%P",
            'A' => "%p",
            'g' => "%-I",
            'G' => "%-H",
            'h' => "%I",
            'H' => "%H",
            'i' => "%M",
            's' => "%S",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(specifier);
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::{php_pattern_to_strftime, ChronoDateFormatter, DateFormatter};
    use chrono::{TimeZone, Utc};

    #[test]
    fn converts_common_patterns() {
        assert_eq!(php_pattern_to_strftime("H:i"), "%H:%M");
        assert_eq!(php_pattern_to_strftime("l, d F Y"), "%A, %d %B %Y");
        assert_eq!(php_pattern_to_strftime(r"\d\a\y j"), "day %-d");
        assert_eq!(php_pattern_to_strftime("100%"), "100%%");
    }

    #[test]
    fn formats_in_utc_and_fixed_offset() {
        let at = Utc.with_ymd_and_hms(2019, 3, 14, 9, 5, 0).unwrap();
        let utc = ChronoDateFormatter::utc();
        assert_eq!(utc.format_date(at, "l, d F Y"), "Thursday, 14 March 2019");
        assert_eq!(utc.format_date(at, "H:i"), "09:05");

        let cet = ChronoDateFormatter::with_offset_seconds(3600).expect("valid offset");
        assert_eq!(cet.format_date(at, "H:i"), "10:05");
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(ChronoDateFormatter::with_offset_seconds(90_000).is_none());
    }
}
