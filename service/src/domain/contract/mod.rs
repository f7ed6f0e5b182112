//! [`Contract`] definitions.

use common::{unit, DateOf, DateTimeOf};
#[cfg(doc)]
use common::{Date, DateTime};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{company, employee};
#[cfg(doc)]
use crate::domain::{Company, Employee};

/// Employment contract between a [`Company`] and an [`Employee`].
#[derive(Clone, Debug)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// ID of the employed [`Employee`].
    pub employee_id: employee::Id,

    /// ID of the employing [`Company`].
    pub company_id: company::Id,

    /// [`Date`] when the [`Employee`] was hired.
    pub hired_on: HiringDate,

    /// [`Date`] when the [`Employee`] was dismissed.
    ///
    /// [`None`] while this [`Contract`] is active.
    pub dismissed_on: Option<DismissalDate>,

    /// [`DateTime`] when this [`Contract`] was created.
    pub created_at: CreationDateTime,
}

impl Contract {
    /// Returns whether this [`Contract`] is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dismissed_on.is_none()
    }
}

/// ID of a [`Contract`].
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

/// [`Date`] when an [`Employee`] was hired under a [`Contract`].
pub type HiringDate = DateOf<(Contract, unit::Hiring)>;

/// [`Date`] when an [`Employee`] was dismissed from a [`Contract`].
pub type DismissalDate = DateOf<(Contract, unit::Dismissal)>;

/// [`DateTime`] when a [`Contract`] was created.
pub type CreationDateTime = DateTimeOf<(Contract, unit::Creation)>;
