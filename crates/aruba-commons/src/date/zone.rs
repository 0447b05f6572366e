//! Time zones used to interpret dates that carry no offset of their own.

use chrono::offset::LocalResult;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

/// The zone a wall-clock date is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZone {
    #[default]
    Utc,
    /// A constant offset from UTC.
    Fixed(FixedOffset),
    /// The system zone, including its daylight-saving rules.
    Local,
}

impl TimeZone {
    /// Returns the system time zone.
    pub fn current() -> Self {
        TimeZone::Local
    }

    /// Returns a fixed zone `seconds` east of UTC, or `None` if the offset
    /// is a day or more.
    pub fn fixed(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(TimeZone::Fixed)
    }

    /// Converts a wall-clock time in this zone to a UTC instant.
    ///
    /// Ambiguous local times resolve to the earliest instant; times skipped
    /// by a daylight-saving transition have no instant.
    pub fn to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        use chrono::TimeZone as _;

        match self {
            TimeZone::Utc => Some(Utc.from_utc_datetime(local)),
            TimeZone::Fixed(offset) => earliest(offset.from_local_datetime(local)),
            TimeZone::Local => earliest(Local.from_local_datetime(local)),
        }
    }
}

fn earliest<Tz: chrono::TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono::TimeZone as _;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_utc_is_identity() {
        let utc = TimeZone::Utc.to_utc(&noon()).unwrap();
        assert_eq!(utc.naive_utc(), noon());
    }

    #[test]
    fn test_fixed_offset_shifts() {
        let cet = TimeZone::fixed(3600).unwrap();
        let utc = cet.to_utc(&noon()).unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-03-15T11:00:00+00:00");
    }

    #[test]
    fn test_ambiguous_local_time_takes_earliest() {
        // A fall-back hour seen from both sides of the transition.
        let summer = FixedOffset::east_opt(2 * 3600).unwrap();
        let winter = FixedOffset::east_opt(3600).unwrap();
        let local = NaiveDate::from_ymd_opt(2024, 10, 27)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let first = summer.from_local_datetime(&local).unwrap();
        let second = winter.from_local_datetime(&local).unwrap();

        let utc = earliest(LocalResult::Ambiguous(first, second)).unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-10-27T00:30:00+00:00");

        let utc = earliest(LocalResult::Single(second)).unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-10-27T01:30:00+00:00");
    }

    #[test]
    fn test_skipped_local_time_has_no_instant() {
        assert_eq!(earliest::<FixedOffset>(LocalResult::None), None);
    }

    #[test]
    fn test_fixed_rejects_full_day() {
        assert!(TimeZone::fixed(86_400).is_none());
        assert!(TimeZone::fixed(-86_400).is_none());
    }
}
