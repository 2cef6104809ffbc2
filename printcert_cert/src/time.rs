// SPDX-License-Identifier: Apache-2.0
use bcder::{
    decode::{self, Constructed, Content},
    Tag,
};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};

fn digits(text: &str, range: std::ops::Range<usize>) -> Option<u32> {
    text.get(range)?.parse().ok()
}

fn from_digits(text: &str, year: i32) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, digits(text, 0..2)?, digits(text, 2..4)?)?
        .and_hms_opt(
            digits(text, 4..6)?,
            digits(text, 6..8)?,
            digits(text, 8..10).unwrap_or(0),
        )?;
    Some(DateTime::<Utc>::from_utc(naive, Utc))
}

/// `YYMMDDHHMM[SS]Z`, with years 50 through 99 in the 20th century.
pub fn parse_utc_time(bytes: &[u8]) -> Option<DateTime<Utc>> {
    let text = std::str::from_utf8(bytes).ok()?.strip_suffix('Z')?;
    let year = digits(text, 0..2)? as i32;
    let year = if year >= 50 { 1900 + year } else { 2000 + year };
    from_digits(text.get(2..)?, year)
}

/// `YYYYMMDDHHMM[SS][.fff][Z]`; fractions are dropped and local times are read as UTC.
pub fn parse_generalized_time(bytes: &[u8]) -> Option<DateTime<Utc>> {
    let text = std::str::from_utf8(bytes).ok()?;
    let text = text.strip_suffix('Z').unwrap_or(text);
    let text = text.split('.').next()?;
    let year = digits(text, 0..4)? as i32;
    from_digits(text.get(4..)?, year)
}

/// Takes a `Time` (either UTCTime or GeneralizedTime).
pub fn take_time(cons: &mut Constructed<Bytes>) -> Result<DateTime<Utc>, decode::Error> {
    cons.take_value(|tag, content| {
        let text = match content {
            Content::Primitive(prim) => prim.take_all()?,
            Content::Constructed(_) => return Err(decode::Error::Malformed),
        };
        let time = if tag == Tag::UTC_TIME {
            parse_utc_time(&text)
        } else if tag == Tag::GENERALIZED_TIME {
            parse_generalized_time(&text)
        } else {
            None
        };
        time.ok_or(decode::Error::Malformed)
    })
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn utc_time_windows() {
        assert_eq!(
            parse_utc_time(b"220101000000Z"),
            Some(Utc.ymd(2022, 1, 1).and_hms(0, 0, 0))
        );
        assert_eq!(
            parse_utc_time(b"991231235959Z"),
            Some(Utc.ymd(1999, 12, 31).and_hms(23, 59, 59))
        );
        assert_eq!(parse_utc_time(b"220101000000"), None);
        assert_eq!(parse_utc_time(b"221301000000Z"), None);
    }

    #[test]
    fn generalized_time() {
        assert_eq!(
            parse_generalized_time(b"20500101000000Z"),
            Some(Utc.ymd(2050, 1, 1).and_hms(0, 0, 0))
        );
        assert_eq!(
            parse_generalized_time(b"19700101120000.123Z"),
            Some(Utc.ymd(1970, 1, 1).and_hms(12, 0, 0))
        );
    }
}
