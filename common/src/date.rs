//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Untyped calendar date.
pub type Date = DateOf;

/// ISO 8601 calendar date format: `YYYY-MM-DD`.
const ISO: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Dotted calendar date format: `DD.MM.YYYY`.
const DOTTED: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year]");

/// Offset format: `±HH:MM`.
const OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Calendar date without a time zone.
///
/// Documents (orders, contracts, registrations) are dated by a day, so no time
/// component is ever stored.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self::today_at(UtcOffset::UTC)
    }

    /// Returns the current [`Date`] as seen at the provided [`UtcOffset`].
    #[must_use]
    pub fn today_at(offset: UtcOffset) -> Self {
        time::OffsetDateTime::now_utc()
            .to_offset(offset.0)
            .date()
            .into()
    }

    /// Creates a new [`Date`] out of the provided calendar components.
    ///
    /// [`None`] is returned if the components do not form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Into::into)
    }

    /// Parses a [`Date`] from one of the supported formats:
    /// - `YYYY-MM-DD`;
    /// - `DD.MM.YYYY`;
    /// - `DD.MM.YY` (years are taken from the 21st century).
    ///
    /// # Errors
    ///
    /// If the `input` matches none of the formats or is not a valid date.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        let bytes = input.as_bytes();
        let is_dotted =
            bytes.get(2) == Some(&b'.') && bytes.get(5) == Some(&b'.');

        let parsed = if is_dotted && input.len() == 8 {
            let (day_month, year) = input.split_at(6);
            time::Date::parse(&format!("{day_month}20{year}"), DOTTED)
        } else if is_dotted {
            time::Date::parse(input, DOTTED)
        } else {
            time::Date::parse(input, ISO)
        };
        parsed.map(Into::into).map_err(ParseError)
    }

    /// Returns this [`Date`] formatted as `DD.MM.YYYY`.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_dotted(&self) -> String {
        self.inner
            .format(DOTTED)
            .expect("`DOTTED` format is always valid")
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
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
#[display(
    "invalid date, expected `YYYY-MM-DD`, `DD.MM.YYYY` or `DD.MM.YY`: {_0}"
)]
pub struct ParseError(time::error::Parse);

/// Offset from UTC a local [`Date`] is determined at, in `±HH:MM` format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct UtcOffset(time::UtcOffset);

impl UtcOffset {
    /// Zero [`UtcOffset`].
    pub const UTC: Self = Self(time::UtcOffset::UTC);
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(OFFSET).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for UtcOffset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::UtcOffset::parse(s.trim(), OFFSET)
            .map(Self)
            .map_err(OffsetParseError)
    }
}

impl TryFrom<String> for UtcOffset {
    type Error = OffsetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UtcOffset> for String {
    fn from(offset: UtcOffset) -> Self {
        offset.to_string()
    }
}

/// Error of parsing a [`UtcOffset`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid UTC offset, expected `±HH:MM`: {_0}")]
pub struct OffsetParseError(time::error::Parse);

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

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.inner.format(ISO).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
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

impl<Of: ?Sized> Hash for DateOf<Of> {
    fn hash<H: Hasher>(&self, state: &mut H) {
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

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in `YYYY-MM-DD` format.
    ///
    /// `DD.MM.YYYY` and `DD.MM.YY` formats are accepted on input as well.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = crate::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::parse(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, UtcOffset};

    #[test]
    fn parses_supported_formats() {
        let expected = Date::from_ymd(2024, 6, 15).unwrap();

        assert_eq!(Date::parse("2024-06-15").unwrap(), expected);
        assert_eq!(Date::parse("15.06.2024").unwrap(), expected);
        assert_eq!(Date::parse("15.06.24").unwrap(), expected);
        assert_eq!(Date::parse(" 2024-06-15 ").unwrap(), expected);

        assert!(Date::parse("2024-13-01").is_err());
        assert!(Date::parse("31.02.2024").is_err());
        assert!(Date::parse("15/06/2024").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn formats() {
        let date = Date::from_ymd(2024, 1, 5).unwrap();

        assert_eq!(date.to_string(), "2024-01-05");
        assert_eq!(date.to_dotted(), "05.01.2024");
    }

    #[test]
    fn orders_chronologically() {
        let registered = Date::from_ymd(2024, 1, 1).unwrap();

        assert!(Date::from_ymd(2023, 12, 31).unwrap() < registered);
        assert!(Date::from_ymd(2024, 1, 1).unwrap() >= registered);
        assert!(Date::from_ymd(2024, 6, 1).unwrap() > registered);
    }

    #[test]
    fn parses_utc_offset() {
        let offset: UtcOffset = "+05:00".parse().unwrap();

        assert_eq!(offset.to_string(), "+05:00");
        assert_eq!(
            "-03:30".parse::<UtcOffset>().unwrap().to_string(),
            "-03:30",
        );
        assert_eq!(UtcOffset::default(), "+00:00".parse().unwrap());

        assert!("05:00".parse::<UtcOffset>().is_err());
        assert!("+5".parse::<UtcOffset>().is_err());
    }

    #[test]
    fn determines_today_at_offset() {
        let east = Date::today_at("+14:00".parse().unwrap());
        let west = Date::today_at("-12:00".parse().unwrap());

        assert!(east > west);
    }
}
