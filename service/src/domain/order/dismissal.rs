//! [`Order`] of dismissal.

use common::Money;
use derive_more::{Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{company, contract, define_text, employee};
#[cfg(doc)]
use crate::domain::{Contract, Employee, Order};

use super::{CreationDateTime, Id, IssueDate, Number};

/// Dismissal [`Order`] closing a [`Contract`] with an [`Employee`].
#[derive(Clone, Debug)]
pub struct Dismissal {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Number`] of this [`Order`].
    pub number: Number,

    /// Date when this [`Order`] was issued.
    pub date: IssueDate,

    /// ID of the dismissed [`Employee`].
    pub employee_id: employee::Id,

    /// ID of the [`Contract`] closed by this [`Order`].
    pub contract_id: contract::Id,

    /// ID of the dismissing [`company::Company`].
    pub company_id: company::Id,

    /// Date when the [`Employee`] is dismissed.
    pub dismissed_on: contract::DismissalDate,

    /// [`Grounds`] of the dismissal.
    pub grounds: Grounds,

    /// Days of unused vacation to be compensated.
    pub compensation_days: CompensationDays,

    /// Average monthly salary of the dismissed [`Employee`], used to
    /// calculate the compensation.
    pub average_salary: Money,

    /// [`DateTime`] when this [`Order`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

define_text! {
    #[doc = "Grounds of an [`Employee`] dismissal."]
    Grounds(max = 512)
}

/// Number of days of unused vacation compensated on dismissal.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct CompensationDays(i32);

impl CompensationDays {
    /// Creates new [`CompensationDays`] if the given number of `days` is not
    /// negative.
    #[must_use]
    pub fn new(days: i32) -> Option<Self> {
        (days >= 0).then_some(Self(days))
    }
}

#[cfg(test)]
mod spec {
    use super::{CompensationDays, Grounds};

    #[test]
    fn grounds() {
        assert_eq!(Grounds::new(" Заявление ").unwrap().as_ref(), "Заявление");
        assert!(Grounds::new("").is_none());
        assert!(Grounds::new(" \t").is_none());
    }

    #[test]
    fn compensation_days() {
        assert!(CompensationDays::new(0).is_some());
        assert!(CompensationDays::new(5).is_some());
        assert!(CompensationDays::new(-1).is_none());
    }
}
