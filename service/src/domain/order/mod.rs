//! [`Order`] definitions.

pub mod dismissal;
pub mod hiring;

use common::{define_kind, unit, DateOf, DateTimeOf};
#[cfg(doc)]
use common::{Date, DateTime};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{company, contract, employee};
#[cfg(doc)]
use crate::domain::{Company, Contract, Employee};

pub use self::{dismissal::Dismissal, hiring::Hiring};

/// Personnel order of a [`Company`] regarding one of its [`Employee`]s.
#[derive(Clone, Debug, From)]
pub enum Order {
    #[doc(hidden)]
    Hiring(Hiring),
    #[doc(hidden)]
    Dismissal(Dismissal),
}

impl Order {
    /// Returns ID of this [`Order`].
    #[must_use]
    pub fn id(&self) -> Id {
        match self {
            Self::Hiring(o) => o.id,
            Self::Dismissal(o) => o.id,
        }
    }

    /// Returns [`Kind`] of this [`Order`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Hiring(_) => Kind::Hiring,
            Self::Dismissal(_) => Kind::Dismissal,
        }
    }

    /// Returns [`Number`] of this [`Order`].
    #[must_use]
    pub fn number(&self) -> Number {
        match self {
            Self::Hiring(o) => o.number,
            Self::Dismissal(o) => o.number,
        }
    }

    /// Returns [`Date`] of this [`Order`].
    #[must_use]
    pub fn date(&self) -> IssueDate {
        match self {
            Self::Hiring(o) => o.date,
            Self::Dismissal(o) => o.date,
        }
    }

    /// Returns ID of the [`Employee`] this [`Order`] regards.
    #[must_use]
    pub fn employee_id(&self) -> employee::Id {
        match self {
            Self::Hiring(o) => o.employee_id,
            Self::Dismissal(o) => o.employee_id,
        }
    }

    /// Returns ID of the [`Contract`] this [`Order`] regards.
    #[must_use]
    pub fn contract_id(&self) -> contract::Id {
        match self {
            Self::Hiring(o) => o.contract_id,
            Self::Dismissal(o) => o.contract_id,
        }
    }

    /// Returns ID of the [`Company`] issued this [`Order`].
    #[must_use]
    pub fn company_id(&self) -> company::Id {
        match self {
            Self::Hiring(o) => o.company_id,
            Self::Dismissal(o) => o.company_id,
        }
    }

    /// Returns [`DateTime`] when this [`Order`] was created.
    #[must_use]
    pub fn created_at(&self) -> CreationDateTime {
        match self {
            Self::Hiring(o) => o.created_at,
            Self::Dismissal(o) => o.created_at,
        }
    }
}

/// ID of an [`Order`].
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

/// Number of an [`Order`] among the ones of the same [`Company`].
///
/// Always positive.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Number(i32);

impl Number {
    /// Creates a new [`Number`] if the given `number` is positive.
    #[must_use]
    pub fn new(number: i32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Returns the [`Number`] following the given count of existing
    /// [`Order`]s.
    #[must_use]
    pub fn next_after(count: usize) -> Self {
        Self(i32::try_from(count).map_or(i32::MAX, |c| c.saturating_add(1)))
    }
}

define_kind! {
    #[doc = "Kind of an [`Order`]."]
    enum Kind {
        #[doc = "[`Hiring`] [`Order`]."]
        Hiring = 1,

        #[doc = "[`Dismissal`] [`Order`]."]
        Dismissal = 2,
    }
}

/// [`Date`] when an [`Order`] was issued.
pub type IssueDate = DateOf<(Order, unit::Issue)>;

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Kind, Number};

    #[test]
    fn number() {
        assert!(Number::new(1).is_some());
        assert!(Number::new(0).is_none());
        assert!(Number::new(-3).is_none());

        assert_eq!(Number::next_after(0), Number::new(1).unwrap());
        assert_eq!(Number::next_after(3), Number::new(4).unwrap());
    }

    #[test]
    fn kind_discriminants() {
        assert_eq!(Kind::Hiring.u8(), 1);
        assert_eq!(Kind::Dismissal.u8(), 2);
        assert_eq!(Kind::from_u8(2), Some(Kind::Dismissal));
        assert_eq!(Kind::from_u8(3), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Kind::Dismissal.to_string(), "DISMISSAL");
        assert_eq!("HIRING".parse::<Kind>(), Ok(Kind::Hiring));
        assert!("FIRING".parse::<Kind>().is_err());
    }
}
