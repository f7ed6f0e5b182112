//! [`Employee`] definitions.

use std::sync::LazyLock;

use common::{unit, DateOf, DateTimeOf};
#[cfg(doc)]
use common::{Date, DateTime};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{company, define_digits, define_text, Address, Phone, Tin};
#[cfg(doc)]
use super::{Company, Contract};

/// Natural person registered in a [`Company`].
///
/// Being registered doesn't mean being employed: employment is defined by an
/// active [`Contract`] of this [`Employee`].
#[derive(Clone, Debug)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// ID of the [`Company`] this [`Employee`] is registered in.
    pub company_id: company::Id,

    /// Family [`Name`] of this [`Employee`].
    pub family_name: Name,

    /// First [`Name`] of this [`Employee`].
    pub first_name: Name,

    /// Patronymic [`Name`] of this [`Employee`].
    pub patronymic: Name,

    /// [`PersonalId`] of this [`Employee`].
    pub personal_id: PersonalId,

    /// [`Tin`] of this [`Employee`].
    pub tin: Tin,

    /// [`Passport`] details of this [`Employee`].
    pub passport: Passport,

    /// [`Address`] of this [`Employee`].
    pub address: Option<Address>,

    /// [`Phone`] of this [`Employee`].
    pub phone: Option<Phone>,

    /// Indicator whether this [`Employee`] has an active [`Contract`].
    pub is_employed: bool,

    /// [`DateTime`] when this [`Employee`] was created.
    pub created_at: CreationDateTime,
}

impl Employee {
    /// Returns the full name of this [`Employee`] in the
    /// "family first patronymic" order.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.family_name, self.first_name, self.patronymic)
    }
}

/// ID of an [`Employee`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Part of an [`Employee`]'s full name."]
    Name(max = 128)
}

define_digits! {
    #[doc = "Personal identification number of an [`Employee`] (PINFL).\n\n\
             Unique among the [`Employee`]s of the same [`Company`]."]
    PersonalId(len = 14)
}

/// Passport details of an [`Employee`].
///
/// Every detail is optional, as it's usually filled in later.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Passport {
    /// [`PassportSeries`] of this [`Passport`].
    pub series: Option<PassportSeries>,

    /// [`PassportNumber`] of this [`Passport`].
    pub number: Option<PassportNumber>,

    /// [`IssueAuthority`] of this [`Passport`].
    pub issued_by: Option<IssueAuthority>,

    /// [`Date`] when this [`Passport`] was issued.
    pub issued_on: Option<PassportIssueDate>,
}

/// Series of a [`Passport`]: two capital latin letters.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PassportSeries(String);

impl PassportSeries {
    /// Creates a new [`PassportSeries`] out of the trimmed `series`, if it's
    /// valid.
    ///
    /// Lowercase letters are capitalized.
    #[must_use]
    pub fn new(series: impl AsRef<str>) -> Option<Self> {
        let series = series.as_ref().trim().to_ascii_uppercase();
        Self::check(&series).then_some(Self(series))
    }

    /// Checks whether the given `series` is a valid [`PassportSeries`].
    fn check(series: &str) -> bool {
        /// Regular expression checking [`PassportSeries`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Z]{2}$").expect("valid regex")
        });

        REGEX.is_match(series)
    }
}

impl FromStr for PassportSeries {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PassportSeries`")
    }
}

define_digits! {
    #[doc = "Number of a [`Passport`]."]
    PassportNumber(len = 7)
}

define_text! {
    #[doc = "Authority which issued a [`Passport`]."]
    IssueAuthority(max = 256)
}

/// [`Date`] when a [`Passport`] was issued.
pub type PassportIssueDate = DateOf<(Passport, unit::Issue)>;

/// [`DateTime`] when an [`Employee`] was created.
pub type CreationDateTime = DateTimeOf<(Employee, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Name, PassportNumber, PassportSeries, PersonalId};

    #[test]
    fn personal_id() {
        assert!(PersonalId::new("40608840220079").is_some());
        assert!(PersonalId::new("4060884022007").is_none());
        assert!(PersonalId::new("406088402200790").is_none());
        assert!(PersonalId::new("4060884022007X").is_none());
    }

    #[test]
    fn passport() {
        assert_eq!(PassportSeries::new("aa").unwrap().as_ref(), "AA");
        assert_eq!(PassportSeries::new(" AB ").unwrap().as_ref(), "AB");
        assert!(PassportSeries::new("A").is_none());
        assert!(PassportSeries::new("A1").is_none());
        assert!(PassportSeries::new("ABC").is_none());

        assert!(PassportNumber::new("4598374").is_some());
        assert!(PassportNumber::new("459837").is_none());
    }

    #[test]
    fn name() {
        assert_eq!(Name::new(" Otabek ").unwrap().as_ref(), "Otabek");
        assert_eq!(Name::new("Ulug'bek").unwrap().as_ref(), "Ulug'bek");
        assert!(Name::new("").is_none());
    }
}
