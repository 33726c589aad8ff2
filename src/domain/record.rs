//! Call detail record layout.
//!
//! A record on the bill is seven whitespace separated fields:
//!
//! ```text
//! 12  01/JAN/2024  10:00:00  9876543210  00:30  1  1.50
//! sno date         time      number      dur    p  amount
//! ```
//!
//! Bills print two records side by side, so a single physical line can
//! carry zero, one or two of them.

use super::section::Bucket;
use once_cell::sync::Lazy;
use regex::Regex;

/// One call, as rendered in the output statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// Serial as printed on the bill, leading zeros included.
    pub serial: String,
    pub date: String,
    pub time: String,
    pub number: String,
    pub name: String,
    pub duration: String,
    pub pulse: String,
    pub amount: String,
    pub bucket: Bucket,
}

impl CallRecord {
    /// Builds a record from matched fields plus the resolved contact name.
    pub fn new(fields: RecordFields<'_>, name: String, bucket: Bucket) -> Self {
        Self {
            serial: fields.serial.to_string(),
            date: fields.date.to_string(),
            time: fields.time.to_string(),
            number: fields.number.to_string(),
            name,
            duration: fields.duration.to_string(),
            pulse: fields.pulse.to_string(),
            amount: fields.amount.to_string(),
            bucket,
        }
    }

    /// Numeric ordering key for the serial.
    ///
    /// Compares as (significant digit count, digits), which orders decimal
    /// strings of any length by value.
    pub fn serial_key(&self) -> (usize, &str) {
        serial_key(&self.serial)
    }

    /// Table cells in output column order.
    pub fn cells(&self) -> [String; 8] {
        [
            self.serial.clone(),
            self.date.clone(),
            self.time.clone(),
            self.number.clone(),
            self.name.clone(),
            self.duration.clone(),
            self.pulse.clone(),
            self.amount.clone(),
        ]
    }
}

/// Fields of a single match, borrowed from the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields<'a> {
    pub serial: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub number: &'a str,
    pub duration: &'a str,
    pub pulse: &'a str,
    pub amount: &'a str,
}

/// Finds call records in a line of bill text.
#[derive(Debug, Clone, Default)]
pub struct CallRecordMatcher;

impl CallRecordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// The record pattern. Unanchored, so it can be applied repeatedly.
    pub fn pattern() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(concat!(
                r"(?P<serial>\d+)\s+",
                r"(?P<date>\d{2}/[A-Z]{3}/\d{4})\s+",
                r"(?P<time>\d{2}:\d{2}:\d{2})\s+",
                r"(?P<number>\d{10})\s+",
                r"(?P<duration>\d{2}:\d{2})\s+",
                r"(?P<pulse>\d+)\s+",
                r"(?P<amount>\d+\.\d{2})",
            ))
            .expect("Valid call record regex")
        });
        &PATTERN
    }

    /// Returns every non-overlapping record in `line`, left to right.
    pub fn extract_all<'a>(&self, line: &'a str) -> Vec<RecordFields<'a>> {
        Self::pattern()
            .captures_iter(line)
            .filter_map(|caps| {
                Some(RecordFields {
                    serial: caps.name("serial")?.as_str(),
                    date: caps.name("date")?.as_str(),
                    time: caps.name("time")?.as_str(),
                    number: caps.name("number")?.as_str(),
                    duration: caps.name("duration")?.as_str(),
                    pulse: caps.name("pulse")?.as_str(),
                    amount: caps.name("amount")?.as_str(),
                })
            })
            .collect()
    }

    pub fn is_match(&self, line: &str) -> bool {
        Self::pattern().is_match(line)
    }
}

fn serial_key(serial: &str) -> (usize, &str) {
    let digits = serial.trim_start_matches('0');
    (digits.len(), digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let matcher = CallRecordMatcher::new();
        let found = matcher.extract_all("1 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0],
            RecordFields {
                serial: "1",
                date: "01/JAN/2024",
                time: "10:00:00",
                number: "9876543210",
                duration: "00:30",
                pulse: "1",
                amount: "1.50",
            }
        );
    }

    #[test]
    fn test_side_by_side_records() {
        let matcher = CallRecordMatcher::new();
        let line = "3  02/FEB/2024  08:15:02  9945194909  01:10  2  1.00    \
                    41 03/FEB/2024  21:40:59  8123456789  12:00  12  6.00";
        let found = matcher.extract_all(line);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].serial, "3");
        assert_eq!(found[1].serial, "41");
        assert_eq!(found[1].amount, "6.00");
    }

    #[test]
    fn test_rejects_malformed_fields() {
        let matcher = CallRecordMatcher::new();
        // Lowercase month
        assert!(!matcher.is_match("1 01/jan/2024 10:00:00 9876543210 00:30 1 1.50"));
        // Nine digit number
        assert!(!matcher.is_match("1 01/JAN/2024 10:00:00 987654321 00:30 1 1.50"));
        // One fraction digit
        assert!(!matcher.is_match("1 01/JAN/2024 10:00:00 9876543210 00:30 1 1.5"));
    }

    #[test]
    fn test_long_serial_kept() {
        let matcher = CallRecordMatcher::new();
        let line = "123456789012345678901 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50";
        let found = matcher.extract_all(line);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].serial, "123456789012345678901");
    }

    #[test]
    fn test_leading_zero_serial_literal() {
        let fields = CallRecordMatcher::new()
            .extract_all("01 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50")[0];
        let record = CallRecord::new(fields, String::new(), Bucket::LocalMobile);
        assert_eq!(record.cells()[0], "01");
        assert_eq!(record.serial_key(), (1, "1"));
    }

    #[test]
    fn test_serial_key_numeric_order() {
        let mut serials = vec!["100", "9", "010", "123456789012345678901", "0", "2"];
        serials.sort_by(|a, b| serial_key(a).cmp(&serial_key(b)));
        assert_eq!(
            serials,
            vec!["0", "2", "9", "010", "100", "123456789012345678901"]
        );
    }

    #[test]
    fn test_cells_order() {
        let fields = CallRecordMatcher::new()
            .extract_all("7 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50")[0];
        let record = CallRecord::new(fields, "John".to_string(), Bucket::LocalMobile);
        assert_eq!(
            record.cells(),
            [
                "7",
                "01/JAN/2024",
                "10:00:00",
                "9876543210",
                "John",
                "00:30",
                "1",
                "1.50"
            ]
            .map(String::from)
        );
    }
}
