//! Calendar date utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
};

/// [ISO 8601] calendar date format (`YYYY-MM-DD`).
///
/// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
const ISO8601_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Untyped calendar date.
pub type Date = DateOf;

/// UTC calendar date.
///
/// Date arithmetic and comparisons are whole-day: there is no time-of-day
/// component, and intervals built from these dates are inclusive on both
/// bounds.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current date (UTC).
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`Date`] from the provided [ISO 8601] string
    /// (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date.
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, ISO8601_DATE)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(ParseError::Parse)
    }

    /// Returns the [`Date`] as an [ISO 8601] string (`YYYY-MM-DD`).
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.inner.format(ISO8601_DATE).unwrap_or_else(|e| {
            panic!("cannot format `Date` as ISO 8601: {e}")
        })
    }

    /// Returns the [`Date`] following this one.
    #[expect(clippy::missing_panics_doc, reason = "calendar overflow")]
    #[must_use]
    pub fn next_day(self) -> Self {
        Self {
            inner: self.inner.next_day().expect("calendar overflow"),
            _of: PhantomData,
        }
    }

    /// Returns the [`Date`] the provided number of `days` after this one.
    #[must_use]
    pub fn plus_days(self, days: u32) -> Self {
        Self {
            inner: self.inner + time::Duration::days(i64::from(days)),
            _of: PhantomData,
        }
    }

    /// Returns the [`Date`] the provided number of `days` before this one.
    #[must_use]
    pub fn minus_days(self, days: u32) -> Self {
        Self {
            inner: self.inner - time::Duration::days(i64::from(days)),
            _of: PhantomData,
        }
    }

    /// Returns the number of whole days from this [`Date`] until the `other`
    /// one (negative if the `other` one is earlier).
    #[must_use]
    pub fn days_until<OtherOf: ?Sized>(self, other: DateOf<OtherOf>) -> i64 {
        (other.inner - self.inner).whole_days()
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into a [`Date`].
    Parse(time::error::Parse),
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> std::hash::Hash for DateOf<Of> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

impl<Of: ?Sized> TryFrom<&str> for DateOf<Of> {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_iso8601(s)
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::DateOf;

    impl<Of: ?Sized> serde::Serialize for DateOf<Of> {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::from_iso8601(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    #[test]
    fn parses_and_formats_iso8601() {
        assert_eq!(date("2025-01-09").to_iso8601(), "2025-01-09");
        assert_eq!(date("2025-12-31").to_iso8601(), "2025-12-31");

        assert!(Date::from_iso8601("2025-13-01").is_err());
        assert!(Date::from_iso8601("2025-1-1").is_err());
        assert!(Date::from_iso8601("not a date").is_err());
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(date("2025-01-08").next_day(), date("2025-01-09"));
        assert_eq!(date("2025-01-01").plus_days(7), date("2025-01-08"));
        assert_eq!(date("2025-01-08").minus_days(7), date("2025-01-01"));
        assert_eq!(date("2024-12-31").next_day(), date("2025-01-01"));
    }

    #[test]
    fn days_until_is_signed() {
        assert_eq!(date("2025-01-01").days_until(date("2025-01-08")), 7);
        assert_eq!(date("2025-01-08").days_until(date("2025-01-01")), -7);
        assert_eq!(date("2025-01-01").days_until(date("2025-01-01")), 0);
    }
}
